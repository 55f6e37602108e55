//! Modelos de dominio (recetas, reseñas y ficheros de datos).

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Nombres de las posiciones del vector `nutrition` de Food.com.
pub const NUTRIENT_NAMES: [&str; 7] = [
    "calories",
    "total_fat",
    "sugar",
    "sodium",
    "protein",
    "saturated_fat",
    "carbohydrates",
];

/// Receta de `RAW_recipes.csv`.
/// Los campos decodificados desde literales son `None` cuando la celda falta
/// o está mal formada; nunca contienen una lista a medias.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub minutes: Option<u64>,
    pub n_ingredients: Option<u64>,
    pub n_steps: Option<u64>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub nutrition: Option<Nutrition>,
    pub contributor_id: Option<i64>,
    pub submitted: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Vector nutricional posicional. Las posiciones que faltan al final del
/// vector de origen simplemente no existen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Nutrition(pub Vec<f64>);

impl Nutrition {
    fn at(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn calories(&self) -> Option<f64> {
        self.at(0)
    }

    pub fn total_fat(&self) -> Option<f64> {
        self.at(1)
    }

    pub fn sugar(&self) -> Option<f64> {
        self.at(2)
    }

    pub fn sodium(&self) -> Option<f64> {
        self.at(3)
    }

    pub fn protein(&self) -> Option<f64> {
        self.at(4)
    }

    pub fn saturated_fat(&self) -> Option<f64> {
        self.at(5)
    }

    pub fn carbohydrates(&self) -> Option<f64> {
        self.at(6)
    }

    /// Pares (nombre, valor) para las posiciones presentes.
    pub fn labelled(&self) -> Vec<NutrientValue> {
        NUTRIENT_NAMES
            .iter()
            .zip(self.0.iter())
            .map(|(name, value)| NutrientValue { name: *name, value: *value })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientValue {
    pub name: &'static str,
    pub value: f64,
}

/// Reseña de `RAW_interactions.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub user_id: Option<i64>,
    pub recipe_id: Option<i64>,
    pub date: Option<NaiveDate>,
    /// 1–5; `None` si falta o está fuera de rango.
    pub rating: Option<u8>,
    pub review: Option<String>,
}

/// Tipo de contenido de un fichero CSV encontrado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Recipes,
    Reviews,
    Other,
}

impl DatasetKind {
    pub const RECIPES_FILE: &'static str = "RAW_recipes.csv";
    pub const REVIEWS_FILE: &'static str = "RAW_interactions.csv";

    pub fn from_file_name(name: &str) -> Self {
        match name {
            Self::RECIPES_FILE => Self::Recipes,
            Self::REVIEWS_FILE => Self::Reviews,
            _ => Self::Other,
        }
    }
}

/// Fichero CSV descubierto en el directorio de datos.
#[derive(Debug, Clone, Serialize)]
pub struct DataFile {
    pub name: String,
    pub path: PathBuf,
    pub kind: DatasetKind,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrition_positions() {
        let n = Nutrition(vec![51.5, 0.0, 13.0, 0.0, 2.0, 0.0]);
        assert_eq!(n.calories(), Some(51.5));
        assert_eq!(n.sugar(), Some(13.0));
        assert_eq!(n.saturated_fat(), Some(0.0));
        assert_eq!(n.carbohydrates(), None);

        let labelled = n.labelled();
        assert_eq!(labelled.len(), 6);
        assert_eq!(labelled[4], NutrientValue { name: "protein", value: 2.0 });
    }

    #[test]
    fn dataset_kind_from_name() {
        assert_eq!(DatasetKind::from_file_name("RAW_recipes.csv"), DatasetKind::Recipes);
        assert_eq!(DatasetKind::from_file_name("RAW_interactions.csv"), DatasetKind::Reviews);
        assert_eq!(DatasetKind::from_file_name("PP_users.csv"), DatasetKind::Other);
    }
}
