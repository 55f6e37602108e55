//! Búsqueda de recetas (nombre, tiempo, ingredientes y taxonomía de tags)
//! y lectura de reseñas filtradas por nota.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    dataset::{self, Table},
    models::{NutrientValue, Recipe, Review},
    taxonomy::{self, Bucket, MatchMode, Selections, TaxonomyError},
};

/// Recetas por página.
pub const PAGE_SIZE: usize = 20;
const MAX_INGREDIENTS_SHOWN: usize = 10;
const MAX_STEPS_SHOWN: usize = 5;
const MAX_TAGS_SHOWN: usize = 8;
/// Mínimo de valores para mostrar la información nutricional.
const MIN_NUTRITION_VALUES: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    #[error("la nota mínima debe estar entre 1 y 5 (recibido {0})")]
    InvalidRating(u8),
    #[error("el número de reseñas debe estar entre 1 y 50 (recibido {0})")]
    InvalidLimit(usize),
}

/// Metadatos de paginación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Página actual (desde 1).
    pub page: usize,
    pub total_pages: usize,
    pub offset: usize,
}

/// Calcula la paginación ajustando la página pedida a `[1, total_pages]`.
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    let page = requested_page.max(1).min(total_pages.max(1));
    Pagination {
        page,
        total_pages,
        offset: (page - 1) * PAGE_SIZE,
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecipeQuery {
    /// Subcadena del nombre, sin distinguir mayúsculas.
    pub name: Option<String>,
    pub max_minutes: u64,
    pub max_ingredients: u64,
    pub selections: Selections,
    pub mode: MatchMode,
    pub page: usize,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            name: None,
            max_minutes: 120,
            max_ingredients: 15,
            selections: Selections::new(),
            mode: MatchMode::default(),
            page: 1,
        }
    }
}

/// Lista truncada para las tarjetas, con el número de elementos ocultos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truncated {
    pub items: Vec<String>,
    pub remaining: usize,
}

impl Truncated {
    fn new(items: &[String], max: usize) -> Self {
        Self {
            items: items.iter().take(max).cloned().collect(),
            remaining: items.len().saturating_sub(max),
        }
    }
}

/// Resumen de una receta para el listado.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    pub id: i64,
    pub name: String,
    pub minutes: Option<u64>,
    pub n_ingredients: Option<u64>,
    pub n_steps: Option<u64>,
    pub ingredients: Option<Truncated>,
    pub steps: Option<Truncated>,
    pub tags: Option<Vec<String>>,
    pub tag_groups: BTreeMap<Bucket, Vec<String>>,
    pub nutrition: Option<Vec<NutrientValue>>,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            minutes: recipe.minutes,
            n_ingredients: recipe.n_ingredients,
            n_steps: recipe.n_steps,
            ingredients: recipe
                .ingredients
                .as_deref()
                .map(|i| Truncated::new(i, MAX_INGREDIENTS_SHOWN)),
            steps: recipe.steps.as_deref().map(|s| Truncated::new(s, MAX_STEPS_SHOWN)),
            tags: recipe
                .tags
                .as_ref()
                .filter(|t| !t.is_empty())
                .map(|t| t.iter().take(MAX_TAGS_SHOWN).cloned().collect()),
            tag_groups: recipe.tags.as_deref().map(taxonomy::categorize).unwrap_or_default(),
            nutrition: recipe
                .nutrition
                .as_ref()
                .filter(|n| n.0.len() >= MIN_NUTRITION_VALUES)
                .map(|n| n.labelled()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipePage {
    pub total: usize,
    pub pagination: Pagination,
    pub active_keywords: Vec<&'static str>,
    pub recipes: Vec<RecipeCard>,
}

/// Filtra las recetas de la tabla y devuelve la página pedida.
///
/// Los filtros de tiempo e ingredientes sólo se aplican si la columna existe;
/// una receta sin valor en esa columna queda fuera.
pub fn search_recipes(table: &Table, query: &RecipeQuery) -> Result<RecipePage, SearchError> {
    let predicate = taxonomy::build_predicate_with_mode(&query.selections, query.mode)?;
    let needle = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase);
    let check_minutes = table.has_column("minutes");
    let check_ingredients = table.has_column("n_ingredients");

    let matching: Vec<Recipe> = dataset::recipes(table)
        .into_iter()
        .filter(|r| {
            needle
                .as_deref()
                .map_or(true, |n| r.name.to_lowercase().contains(n))
        })
        .filter(|r| !check_minutes || r.minutes.is_some_and(|m| m <= query.max_minutes))
        .filter(|r| {
            !check_ingredients || r.n_ingredients.is_some_and(|n| n <= query.max_ingredients)
        })
        .filter(|r| predicate.matches(r.tags.as_deref()))
        .collect();

    let pagination = calculate_pagination(matching.len(), query.page);
    let recipes = matching
        .iter()
        .skip(pagination.offset)
        .take(PAGE_SIZE)
        .map(RecipeCard::from)
        .collect();

    Ok(RecipePage {
        total: matching.len(),
        pagination,
        active_keywords: predicate.active_keywords().into_iter().collect(),
        recipes,
    })
}

/// Ficha completa de una receta.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub tag_groups: BTreeMap<Bucket, Vec<String>>,
    pub nutrition_labelled: Vec<NutrientValue>,
}

pub fn find_recipe(table: &Table, id: i64) -> Option<RecipeDetail> {
    let recipe = dataset::recipes(table).into_iter().find(|r| r.id == id)?;
    Some(RecipeDetail {
        tag_groups: recipe.tags.as_deref().map(taxonomy::categorize).unwrap_or_default(),
        nutrition_labelled: recipe.nutrition.as_ref().map(|n| n.labelled()).unwrap_or_default(),
        recipe,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewQuery {
    pub min_rating: u8,
    pub limit: usize,
    pub recipe_id: Option<i64>,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            min_rating: 3,
            limit: 10,
            recipe_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCard {
    #[serde(flatten)]
    pub review: Review,
    pub stars: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewList {
    pub min_rating: u8,
    pub total_matching: usize,
    pub reviews: Vec<ReviewCard>,
}

/// Primeras `limit` reseñas con nota >= `min_rating`, en orden del fichero.
/// Las reseñas sin nota nunca superan el filtro. Sin columna `rating` no se
/// filtra por nota.
pub fn browse_reviews(table: &Table, query: &ReviewQuery) -> Result<ReviewList, SearchError> {
    if !(1..=5).contains(&query.min_rating) {
        return Err(SearchError::InvalidRating(query.min_rating));
    }
    if !(1..=50).contains(&query.limit) {
        return Err(SearchError::InvalidLimit(query.limit));
    }

    let check_rating = table.has_column("rating");
    let matching: Vec<Review> = dataset::reviews(table)
        .into_iter()
        .filter(|r| query.recipe_id.map_or(true, |id| r.recipe_id == Some(id)))
        .filter(|r| !check_rating || r.rating.is_some_and(|rating| rating >= query.min_rating))
        .collect();

    let total_matching = matching.len();
    let reviews = matching
        .into_iter()
        .take(query.limit)
        .map(|review| ReviewCard {
            stars: "⭐".repeat(review.rating.unwrap_or(0) as usize),
            review,
        })
        .collect();

    Ok(ReviewList {
        min_rating: query.min_rating,
        total_matching,
        reviews,
    })
}
