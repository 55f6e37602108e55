//! Food.com Recipes Explorer: decodificación de los literales del dataset,
//! filtro por taxonomía de tags y API web para explorar recetas y reseñas.

pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod dataset;
pub mod i18n;
pub mod literal;
pub mod models;
pub mod search;
pub mod taxonomy;

pub use api::create_router;
pub use app_state::AppState;
pub use config::AppConfig;
