//! Taxonomía de etiquetas: traduce las casillas de categorías que ve el
//! usuario (tipo de plato, cocina, dieta, ...) a los conjuntos de tags
//! crudos del dataset, y evalúa las recetas contra una selección.
//!
//! Las tablas son constantes del proceso. El filtro y la agrupación para
//! mostrar (`categorize`) leen las mismas tablas, de modo que un tag que
//! aparece bajo "Cuisine" siempre puede activarse desde el filtro de cocina.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Etiqueta visible y los tags crudos que la satisfacen.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Grupo de etiquetas con nombre (p. ej. "Cuisine").
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub title: &'static str,
    pub labels: &'static [Label],
}

impl Category {
    pub fn find_label(&self, label: &str) -> Option<&'static Label> {
        self.labels.iter().find(|l| l.label == label)
    }

    /// Todas las palabras clave de la categoría, en orden de definición.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
        self.labels.iter().flat_map(|l| l.keywords.iter().copied())
    }
}

const fn label(label: &'static str, keywords: &'static [&'static str]) -> Label {
    Label { label, keywords }
}

static CATEGORIES: &[Category] = &[
    Category {
        key: "meal_type",
        title: "Meal type",
        labels: &[
            label("🍳 Breakfast", &["breakfast", "brunch"]),
            label("🥪 Lunch", &["lunch"]),
            label("🍽️ Main dish", &["main-dish"]),
            label("🥗 Salads", &["salads"]),
            label("🍲 Soups & stews", &["soups-stews"]),
            label("🧀 Appetizers", &["appetizers"]),
            label("🥔 Side dishes", &["side-dishes"]),
            label("🍰 Desserts", &["desserts"]),
            label("🍿 Snacks", &["snacks"]),
            label("🍹 Beverages", &["beverages", "cocktails"]),
            label("🍞 Breads", &["breads"]),
        ],
    },
    Category {
        key: "cuisine",
        title: "World cuisine",
        labels: &[
            label("🇮🇹 Italian", &["italian"]),
            label("🇲🇽 Mexican", &["mexican"]),
            label("🇫🇷 French", &["french"]),
            label("🇨🇳 Chinese", &["chinese"]),
            label("🇯🇵 Japanese", &["japanese"]),
            label("🇮🇳 Indian", &["indian"]),
            label("🇹🇭 Thai", &["thai"]),
            label("🇬🇷 Greek", &["greek"]),
            label("🇪🇸 Spanish", &["spanish"]),
            label(
                "🇺🇸 American",
                &["american", "north-american", "southern-united-states"],
            ),
            label("🌊 Mediterranean", &["mediterranean"]),
            label("🌏 Asian", &["asian"]),
        ],
    },
    Category {
        key: "diet",
        title: "Diet & health",
        labels: &[
            label("🥦 Vegetarian", &["vegetarian"]),
            label("🌱 Vegan", &["vegan"]),
            label("💚 Healthy", &["healthy", "healthy-2"]),
            label("🥑 Low carb", &["low-carb", "very-low-carbs"]),
            label("🧈 Low fat", &["low-fat"]),
            label("🧂 Low sodium", &["low-sodium"]),
            label("🌾 Gluten free", &["gluten-free"]),
            label("🩺 Diabetic", &["diabetic"]),
        ],
    },
    Category {
        key: "cooking_method",
        title: "Cooking method",
        labels: &[
            label("🔥 Grilling", &["grilling", "barbecue"]),
            label("🥘 Oven", &["oven", "baking"]),
            label("🍳 Stove top", &["stove-top"]),
            label("🐢 Slow cooker", &["crock-pot-slow-cooker"]),
            label("⚡ Microwave", &["microwave"]),
            label("🍤 Frying", &["deep-fry", "stir-fry", "pan-fry"]),
            label("🥒 No cook", &["no-cook"]),
        ],
    },
    Category {
        key: "occasion",
        title: "Occasion",
        labels: &[
            label("🎉 Holiday", &["holiday-event"]),
            label("🎄 Christmas", &["christmas"]),
            label("🦃 Thanksgiving", &["thanksgiving"]),
            label("🐣 Easter", &["easter"]),
            label("🧺 Picnic", &["picnic"]),
            label("🥂 Dinner party", &["dinner-party"]),
            label("🎂 Birthday", &["birthday"]),
            label("💝 Romantic", &["romantic", "valentines-day"]),
        ],
    },
    Category {
        key: "season",
        title: "Season",
        labels: &[
            label("🌸 Spring", &["spring"]),
            label("☀️ Summer", &["summer"]),
            label("🍂 Fall", &["fall"]),
            label("❄️ Winter", &["winter"]),
        ],
    },
    Category {
        key: "difficulty",
        title: "Difficulty & time",
        labels: &[
            label("😊 Easy", &["easy", "beginner-cook"]),
            label("⏱️ 15 minutes or less", &["15-minutes-or-less"]),
            label("⏰ 30 minutes or less", &["30-minutes-or-less"]),
            label("🕐 60 minutes or less", &["60-minutes-or-less"]),
        ],
    },
];

/// Tabla completa de categorías, en orden de presentación.
pub fn list_categories() -> &'static [Category] {
    CATEGORIES
}

pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("categoría desconocida: '{0}'")]
    UnknownCategory(String),
    #[error("etiqueta desconocida '{label}' en la categoría '{category}'")]
    UnknownLabel { category: String, label: String },
}

/// Selección del usuario: clave de categoría → etiquetas marcadas.
pub type Selections = BTreeMap<String, Vec<String>>;

/// Cómo se combinan las etiquetas seleccionadas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Basta con un tag que coincida con cualquier etiqueta de cualquier
    /// categoría (OR global). Es el comportamiento por defecto.
    #[default]
    AnyLabel,
    /// OR dentro de cada categoría, AND entre categorías.
    EveryCategory,
}

/// Predicado sobre la secuencia de tags decodificada de una receta.
#[derive(Debug, Clone, Default)]
pub struct TagPredicate {
    mode: MatchMode,
    // Un conjunto de palabras clave por categoría con alguna selección.
    groups: Vec<HashSet<&'static str>>,
}

impl TagPredicate {
    /// `false` cuando no hay nada seleccionado: el predicado acepta todo.
    pub fn is_active(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Unión de todas las palabras clave implicadas por la selección.
    pub fn active_keywords(&self) -> BTreeSet<&'static str> {
        self.groups.iter().flatten().copied().collect()
    }

    /// `tags` es `None` cuando la celda no pudo decodificarse.
    pub fn matches(&self, tags: Option<&[String]>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(tags) = tags.filter(|t| !t.is_empty()) else {
            return false;
        };
        let hits = |group: &HashSet<&'static str>| tags.iter().any(|t| group.contains(t.as_str()));
        match self.mode {
            MatchMode::AnyLabel => self.groups.iter().any(hits),
            MatchMode::EveryCategory => self.groups.iter().all(hits),
        }
    }
}

/// Construye el predicado con semántica OR entre todas las etiquetas.
pub fn build_predicate(selections: &Selections) -> Result<TagPredicate, TaxonomyError> {
    build_predicate_with_mode(selections, MatchMode::AnyLabel)
}

pub fn build_predicate_with_mode(
    selections: &Selections,
    mode: MatchMode,
) -> Result<TagPredicate, TaxonomyError> {
    let mut groups = Vec::new();
    for (category_key, labels) in selections {
        let category = find_category(category_key)
            .ok_or_else(|| TaxonomyError::UnknownCategory(category_key.clone()))?;

        let mut keywords = HashSet::new();
        for name in labels {
            let label = category
                .find_label(name)
                .ok_or_else(|| TaxonomyError::UnknownLabel {
                    category: category_key.clone(),
                    label: name.clone(),
                })?;
            keywords.extend(label.keywords.iter().copied());
        }
        if !keywords.is_empty() {
            groups.push(keywords);
        }
    }
    Ok(TagPredicate { mode, groups })
}

/// Grupos de presentación para los tags de una receta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Cuisine,
    Diet,
    Method,
    Occasion,
    Other,
}

// Orden de prioridad: el primer grupo cuyo término aparezca en el tag se
// queda con él. Al ser por subcadena, tags como `chinese-new-year` o
// `south-american` acaban en cocina aunque ninguna etiqueta del filtro de
// cocina los seleccione.
static BUCKET_KEYWORDS: LazyLock<Vec<(Bucket, Vec<&'static str>)>> = LazyLock::new(|| {
    let from = |keys: &[&str]| -> Vec<&'static str> {
        keys.iter()
            .filter_map(|key| find_category(key))
            .flat_map(Category::keywords)
            .collect()
    };
    vec![
        (Bucket::Cuisine, from(&["cuisine"])),
        (Bucket::Diet, from(&["diet"])),
        (Bucket::Method, from(&["cooking_method", "difficulty"])),
        (Bucket::Occasion, from(&["occasion", "season"])),
    ]
});

/// Reparte los tags en grupos para mostrarlos. No interviene en el filtrado.
pub fn categorize(tags: &[String]) -> BTreeMap<Bucket, Vec<String>> {
    let mut buckets: BTreeMap<Bucket, Vec<String>> = BTreeMap::new();
    for tag in tags {
        let bucket = BUCKET_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| tag.contains(k)))
            .map(|(bucket, _)| *bucket)
            .unwrap_or(Bucket::Other);
        buckets.entry(bucket).or_default().push(tag.clone());
    }
    buckets
}
