//! Textos de la interfaz en inglés, eslovaco y ruso.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sk,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Sk, Language::Ru];

    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "sk" => Ok(Self::Sk),
            "ru" => Ok(Self::Ru),
            other => Err(anyhow!("Idioma no soportado: {other}")),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sk => "sk",
            Self::Ru => "ru",
        }
    }

    pub fn display_name(self) -> &'static str {
        text(self, "language_name")
    }

    fn strings(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => EN,
            Self::Sk => SK,
            Self::Ru => RU,
        }
    }
}

/// Texto traducido. Si falta en el idioma se usa el inglés, y si tampoco
/// existe se devuelve la propia clave.
pub fn text<'a>(lang: Language, key: &'a str) -> &'a str {
    lookup(lang.strings(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

/// Tabla completa de un idioma, con las claves que falten tomadas del inglés.
pub fn table(lang: Language) -> BTreeMap<&'static str, &'static str> {
    let mut merged: BTreeMap<_, _> = EN.iter().copied().collect();
    merged.extend(lang.strings().iter().copied());
    merged
}

fn lookup(strings: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    strings.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

static EN: &[(&str, &str)] = &[
    ("language_name", "English"),
    ("app_title", "🍳 Food.com - Recipes Database"),
    ("app_subtitle", "Explore collection of 230,000+ recipes and 1,000,000+ reviews"),
    ("navigation", "Navigation"),
    ("view_mode", "View Mode:"),
    ("view_mode_recipes", "📖 Browse Recipes"),
    ("view_mode_reviews", "💬 Read Reviews"),
    ("view_mode_analysis", "📊 Data Analysis"),
    ("data_selection", "Data"),
    ("select_data", "Select data:"),
    ("about_data", "About the data"),
    (
        "data_info",
        "**Food.com contains:**\n- 230,000+ recipes\n- 1,000,000+ reviews\n- Data from 2000-2018\n- Recipes with ingredients and steps",
    ),
    ("recipes_file", "📖 Recipes"),
    ("reviews_file", "💬 Reviews"),
    ("recipes_title", "📖 Recipe Collection"),
    ("search_recipes", "🔍 Search Recipes"),
    ("recipe_name", "Recipe name:"),
    ("name_placeholder", "e.g., pizza, chicken..."),
    ("max_time", "Max cooking time (min):"),
    ("max_ingredients", "Max ingredients:"),
    ("found_recipes", "🍽️ Found recipes:"),
    ("cooking_time", "⏱️ Cooking time:"),
    ("minutes", "minutes"),
    ("ingredients_count", "🛒 Ingredients:"),
    ("steps_count", "👩‍🍳 Cooking steps:"),
    ("ingredients_title", "🛒 Ingredients:"),
    ("nutrition_title", "📊 Nutrition:"),
    ("cooking_steps", "👩‍🍳 Cooking steps:"),
    ("tags", "🏷️ Tags:"),
    ("and", "and"),
    ("more_ingredients", "more ingredients"),
    ("more_steps", "more steps"),
    ("unreadable_ingredients", "Unable to read ingredients"),
    ("unreadable_nutrition", "Unable to read nutrition"),
    ("unreadable_steps", "Unable to read cooking steps"),
    ("calories", "Calories"),
    ("total_fat", "Fat"),
    ("sugar", "Sugar"),
    ("sodium", "Sodium"),
    ("protein", "Protein"),
    ("saturated_fat", "Saturated fat"),
    ("carbohydrates", "Carbohydrates"),
    ("no_recipes", "😔 No recipes found. Try changing filters."),
    ("reviews_title", "💬 User Reviews"),
    ("filters", "🔍 Review Filters"),
    ("min_rating", "Minimum rating:"),
    ("reviews_count", "Number of reviews:"),
    ("latest_reviews", "📝 Latest reviews (rating {}+)"),
    ("rating", "Rating:"),
    ("date", "📅 Date:"),
    ("user", "👤 User:"),
    ("no_review_text", "_Review without text_"),
    ("analysis_title", "📊 Data Analysis"),
    ("total_records", "📊 Total records"),
    ("columns", "📈 Columns"),
    ("data_size", "💾 Data size"),
    ("duplicates", "🔍 Duplicates"),
    ("data_structure", "📋 Data structure"),
    ("column", "Column"),
    ("data_type", "Data type"),
    ("completeness", "Completeness"),
    ("unique", "Unique"),
    ("data_preview", "🔍 Data preview"),
    ("select_file_sidebar", "Select recipe file in sidebar"),
    ("select_reviews_sidebar", "Select reviews file in sidebar"),
    ("select_analysis_sidebar", "Select file for analysis in sidebar"),
    ("file_not_found", "❌ Recipe files not found!"),
    (
        "file_instructions",
        "**To make the app work:**\n1. Download data from [Kaggle](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n2. Place CSV files in the app folder\n3. Main files: `RAW_recipes.csv` and `RAW_interactions.csv`",
    ),
    ("loading_error", "❌ Error loading data:"),
    ("reviews_not_found", "❌ Review file not found!"),
    ("about_app_title", "📖 About this application"),
    (
        "welcome_text",
        "**Food.com Recipes Explorer** is an interactive web application that allows you to explore:\n\n🍽️ **Recipe Collection** - Browse 230,000+ recipes with ingredients and cooking steps\n💬 **User Reviews** - Read 1,000,000+ reviews and ratings\n📊 **Data Analysis** - Analyze dataset structure and statistics\n\n**Main Features:**\n- Search recipes by name, cooking time, and ingredients\n- Read user reviews with ratings\n- View nutritional information\n- Multi-language interface\n\n**Data Source:** [Food.com Recipes and Interactions](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n\nTo get started, make sure you have the CSV files in the application folder and click the button below!",
    ),
    ("get_started", "Get Started"),
];

static SK: &[(&str, &str)] = &[
    ("language_name", "Slovensky"),
    ("app_title", "🍳 Food.com - Databáza receptov"),
    ("app_subtitle", "Preskúmajte zbierku 230 000+ receptov a 1 000 000+ recenzií"),
    ("navigation", "Navigácia"),
    ("view_mode", "Režim zobrazenia:"),
    ("view_mode_recipes", "📖 Prehľad receptov"),
    ("view_mode_reviews", "💬 Čítanie recenzií"),
    ("view_mode_analysis", "📊 Analýza dát"),
    ("data_selection", "Dáta"),
    ("select_data", "Vyberte dáta:"),
    ("about_data", "O dátach"),
    (
        "data_info",
        "**Food.com obsahuje:**\n- 230 000+ receptov\n- 1 000 000+ recenzií\n- Dáta z rokov 2000-2018\n- Recepty s ingredienciami a krokmi",
    ),
    ("recipes_file", "📖 Recepty"),
    ("reviews_file", "💬 Recenzie"),
    ("recipes_title", "📖 Zbierka receptov"),
    ("search_recipes", "🔍 Hľadanie receptov"),
    ("recipe_name", "Názov receptu:"),
    ("name_placeholder", "napr. pizza, kura..."),
    ("max_time", "Max. čas varenia (min):"),
    ("max_ingredients", "Max. ingrediencií:"),
    ("found_recipes", "🍽️ Nájdené recepty:"),
    ("cooking_time", "⏱️ Čas varenia:"),
    ("minutes", "minút"),
    ("ingredients_count", "🛒 Ingrediencie:"),
    ("steps_count", "👩‍🍳 Kroky varenia:"),
    ("ingredients_title", "🛒 Ingrediencie:"),
    ("nutrition_title", "📊 Výživové hodnoty:"),
    ("cooking_steps", "👩‍🍳 Kroky varenia:"),
    ("tags", "🏷️ Tagy:"),
    ("and", "a"),
    ("more_ingredients", "ďalších ingrediencií"),
    ("more_steps", "ďalších krokov"),
    ("unreadable_ingredients", "Nepodarilo sa prečítať ingrediencie"),
    ("unreadable_nutrition", "Nepodarilo sa prečítať výživové hodnoty"),
    ("unreadable_steps", "Nepodarilo sa prečítať kroky varenia"),
    ("no_recipes", "😔 Nenašli sa žiadne recepty. Skúste zmeniť filtre."),
    ("reviews_title", "💬 Recenzie používateľov"),
    ("filters", "🔍 Filtre recenzií"),
    ("min_rating", "Minimálne hodnotenie:"),
    ("reviews_count", "Počet recenzií:"),
    ("latest_reviews", "📝 Najnovšie recenzie (hodnotenie {}+)"),
    ("rating", "Hodnotenie:"),
    ("date", "📅 Dátum:"),
    ("user", "👤 Používateľ:"),
    ("no_review_text", "_Recenzia bez textu_"),
    ("analysis_title", "📊 Analýza dát"),
    ("total_records", "📊 Celkový počet záznamov"),
    ("columns", "📈 Stĺpce"),
    ("data_size", "💾 Veľkosť dát"),
    ("duplicates", "🔍 Duplikáty"),
    ("data_structure", "📋 Štruktúra dát"),
    ("column", "Stĺpec"),
    ("data_type", "Typ dát"),
    ("completeness", "Úplnosť"),
    ("unique", "Unikátnych"),
    ("data_preview", "🔍 Náhľad dát"),
    ("select_file_sidebar", "Vyberte súbor s receptami v bočnom paneli"),
    ("select_reviews_sidebar", "Vyberte súbor s recenziami v bočnom paneli"),
    ("select_analysis_sidebar", "Vyberte súbor na analýzu v bočnom paneli"),
    ("file_not_found", "❌ Súbory s receptmi neboli nájdené!"),
    (
        "file_instructions",
        "**Aby aplikácia fungovala:**\n1. Stiahnite si dáta z [Kaggle](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n2. Umiestnite CSV súbory do priečinka s aplikáciou\n3. Hlavné súbory: `RAW_recipes.csv` a `RAW_interactions.csv`",
    ),
    ("loading_error", "❌ Chyba pri načítaní dát:"),
    ("reviews_not_found", "❌ Súbor s recenziami nebol nájdený!"),
    ("about_app_title", "📖 O tejto aplikácii"),
    (
        "welcome_text",
        "**Food.com Recipes Explorer** je interaktívna webová aplikácia, ktorá vám umožňuje preskúmať:\n\n🍽️ **Zbierku receptov** - Prehliadajte 230 000+ receptov s ingredienciami a krokmi varenia\n💬 **Recenzie používateľov** - Čítajte 1 000 000+ recenzií a hodnotení\n📊 **Analýzu dát** - Analyzujte štruktúru dátových súborov a štatistiky\n\n**Hlavné funkcie:**\n- Hľadanie receptov podľa názvu, času varenia a ingrediencií\n- Čítanie recenzií používateľov s hodnoteniami\n- Zobrazenie výživových informácií\n- Viacjazyčné rozhranie\n\n**Zdroj dát:** [Food.com Recipes and Interactions](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n\nAk chcete začať, uistite sa, že máte CSV súbory v priečinku aplikácie a kliknite na tlačidlo nižšie!",
    ),
    ("get_started", "Začať"),
];

static RU: &[(&str, &str)] = &[
    ("language_name", "Русский"),
    ("app_title", "🍳 Food.com - База рецептов"),
    ("app_subtitle", "Исследуйте коллекцию из 230+ тысяч рецептов и 1+ миллиона отзывов"),
    ("navigation", "Навигация"),
    ("view_mode", "Режим просмотра:"),
    ("view_mode_recipes", "📖 Просмотр рецептов"),
    ("view_mode_reviews", "💬 Чтение отзывов"),
    ("view_mode_analysis", "📊 Анализ данных"),
    ("data_selection", "Данные"),
    ("select_data", "Выберите данные:"),
    ("about_data", "О данных"),
    (
        "data_info",
        "**Food.com содержит:**\n- 230,000+ рецептов\n- 1,000,000+ отзывов\n- Данные за 2000-2018 годы\n- Рецепты с ингредиентами и шагами",
    ),
    ("recipes_file", "📖 Рецепты"),
    ("reviews_file", "💬 Отзывы"),
    ("recipes_title", "📖 Коллекция рецептов"),
    ("search_recipes", "🔍 Поиск рецептов"),
    ("recipe_name", "Название рецепта:"),
    ("name_placeholder", "например, пицца, курица..."),
    ("max_time", "Макс. время приготовления (мин):"),
    ("max_ingredients", "Макс. ингредиентов:"),
    ("found_recipes", "🍽️ Найдено рецептов:"),
    ("cooking_time", "⏱️ Время приготовления:"),
    ("minutes", "минут"),
    ("ingredients_count", "🛒 Ингредиентов:"),
    ("steps_count", "👩‍🍳 Шагов приготовления:"),
    ("ingredients_title", "🛒 Ингредиенты:"),
    ("nutrition_title", "📊 Пищевая ценность:"),
    ("cooking_steps", "👩‍🍳 Шаги приготовления:"),
    ("tags", "🏷️ Теги:"),
    ("and", "и"),
    ("more_ingredients", "ингредиентов"),
    ("more_steps", "шагов"),
    ("unreadable_ingredients", "Не удалось прочитать ингредиенты"),
    ("unreadable_nutrition", "Не удалось прочитать пищевую ценность"),
    ("unreadable_steps", "Не удалось прочитать шаги приготовления"),
    ("no_recipes", "😔 Рецепты по вашему запросу не найдены. Попробуйте изменить фильтры."),
    ("reviews_title", "💬 Отзывы пользователей"),
    ("filters", "🔍 Фильтры отзывов"),
    ("min_rating", "Минимальная оценка:"),
    ("reviews_count", "Количество отзывов:"),
    ("latest_reviews", "📝 Последние отзывы (оценка {}+)"),
    ("rating", "Оценка:"),
    ("date", "📅 Дата:"),
    ("user", "👤 Пользователь:"),
    ("no_review_text", "_Отзыв без текста_"),
    ("analysis_title", "📊 Анализ данных"),
    ("total_records", "📊 Всего записей"),
    ("columns", "📈 Столбцов"),
    ("data_size", "💾 Размер данных"),
    ("duplicates", "🔍 Дубликатов"),
    ("data_structure", "📋 Структура данных"),
    ("column", "Столбец"),
    ("data_type", "Тип данных"),
    ("completeness", "Заполненность"),
    ("unique", "Уникальных"),
    ("data_preview", "🔍 Предпросмотр данных"),
    ("select_file_sidebar", "Выберите файл с рецептами в боковой панели"),
    ("select_reviews_sidebar", "Выберите файл с отзывами в боковой панели"),
    ("select_analysis_sidebar", "Выберите файл для анализа в боковой панели"),
    ("file_not_found", "❌ Файлы с рецептами не найдены!"),
    (
        "file_instructions",
        "**Чтобы приложение заработало:**\n1. Скачайте данные с [Kaggle](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n2. Поместите CSV файлы в папку с приложением\n3. Основные файлы: `RAW_recipes.csv` и `RAW_interactions.csv`",
    ),
    ("loading_error", "❌ Ошибка загрузки данных:"),
    ("reviews_not_found", "❌ Файл с отзывами не найден!"),
    ("about_app_title", "📖 О приложении"),
    (
        "welcome_text",
        "**Food.com Recipes Explorer** - это интерактивное веб-приложение, которое позволяет исследовать:\n\n🍽️ **Коллекцию рецептов** - Просматривайте 230 000+ рецептов с ингредиентами и шагами приготовления\n💬 **Отзывы пользователей** - Читайте 1 000 000+ отзывов и оценок\n📊 **Анализ данных** - Анализируйте структуру данных и статистику\n\n**Основные функции:**\n- Поиск рецептов по названию, времени приготовления и ингредиентам\n- Чтение отзывов пользователей с оценками\n- Просмотр информации о пищевой ценности\n- Многоязычный интерфейс\n\n**Источник данных:** [Food.com Recipes and Interactions](https://www.kaggle.com/datasets/shuyangli94/food-com-recipes-and-user-interactions)\n\nЧтобы начать, убедитесь что CSV файлы находятся в папке с приложением и нажмите кнопку ниже!",
    ),
    ("get_started", "Начать"),
];
