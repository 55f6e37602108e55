use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    analysis::{self, DatasetProfile, TagStatistics},
    app_state::{AppState, Status},
    dataset::Table,
    i18n::{self, Language},
    models::{DataFile, DatasetKind},
    search::{self, RecipeDetail, RecipePage, RecipeQuery, ReviewList, ReviewQuery, SearchError},
    taxonomy::{self, Category},
};

type ApiError = (StatusCode, Json<serde_json::Value>);

// --- Payloads y Respuestas de la API ---

#[derive(Deserialize)]
pub struct LangParams {
    lang: Option<String>,
}

#[derive(Deserialize)]
pub struct TagStatsParams {
    top: Option<usize>,
}

#[derive(Serialize)]
pub struct TranslationTable {
    language: Language,
    language_name: &'static str,
    strings: std::collections::BTreeMap<&'static str, &'static str>,
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/files", get(list_files_handler))
        .route("/api/taxonomy", get(taxonomy_handler))
        .route("/api/i18n/:lang", get(i18n_handler))
        .route("/api/recipes/search", post(search_recipes_handler))
        .route("/api/recipes/:id", get(recipe_detail_handler))
        .route("/api/reviews", post(reviews_handler))
        .route("/api/analysis/:file", get(analysis_handler))
        .route("/api/tags/stats", get(tag_stats_handler))
        .route("/api/shutdown", post(shutdown_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn status_handler(State(state): State<AppState>) -> Json<Status> {
    Json(state.status())
}

#[axum::debug_handler]
async fn list_files_handler(State(state): State<AppState>) -> Json<Vec<DataFile>> {
    Json(state.files())
}

#[axum::debug_handler]
async fn taxonomy_handler() -> Json<&'static [Category]> {
    Json(taxonomy::list_categories())
}

#[axum::debug_handler]
async fn i18n_handler(Path(lang): Path<String>) -> Result<Json<TranslationTable>, ApiError> {
    let language = Language::from_str(&lang)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(TranslationTable {
        language,
        language_name: language.display_name(),
        strings: i18n::table(language),
    }))
}

#[axum::debug_handler]
async fn search_recipes_handler(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
    payload: Result<Json<RecipeQuery>, JsonRejection>,
) -> Result<Json<RecipePage>, ApiError> {
    let Json(query) = payload.map_err(rejected)?;
    let lang = request_language(&state, &params)?;
    let table = load_kind(&state, DatasetKind::Recipes, lang).await?;

    let page = run_blocking(move || search::search_recipes(&table, &query))
        .await?
        .map_err(search_error)?;
    info!(
        "Búsqueda de recetas: {} resultados (página {}/{}).",
        page.total, page.pagination.page, page.pagination.total_pages
    );
    Ok(Json(page))
}

#[axum::debug_handler]
async fn recipe_detail_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Query(params): Query<LangParams>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let Path(id) = id.map_err(rejected)?;
    let lang = request_language(&state, &params)?;
    let table = load_kind(&state, DatasetKind::Recipes, lang).await?;

    run_blocking(move || search::find_recipe(&table, id))
        .await?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Receta no encontrada: {id}")))
}

#[axum::debug_handler]
async fn reviews_handler(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
    payload: Result<Json<ReviewQuery>, JsonRejection>,
) -> Result<Json<ReviewList>, ApiError> {
    let Json(query) = payload.map_err(rejected)?;
    let lang = request_language(&state, &params)?;
    let table = load_kind(&state, DatasetKind::Reviews, lang).await?;

    let list = run_blocking(move || search::browse_reviews(&table, &query))
        .await?
        .map_err(search_error)?;
    Ok(Json(list))
}

#[axum::debug_handler]
async fn analysis_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<DatasetProfile>, ApiError> {
    let data_file = state
        .files()
        .into_iter()
        .find(|f| f.name == file)
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Fichero desconocido: {file}"),
            )
        })?;
    let table = load_file(&state, data_file, state.config.default_language).await?;

    let profile = run_blocking(move || analysis::profile(&table)).await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
async fn tag_stats_handler(
    State(state): State<AppState>,
    Query(params): Query<TagStatsParams>,
) -> Result<Json<TagStatistics>, ApiError> {
    let top_n = params.top.unwrap_or(50);
    let table = load_kind(&state, DatasetKind::Recipes, state.config.default_language).await?;

    let stats = run_blocking(move || analysis::tag_statistics(&table, top_n)).await?;
    Ok(Json(stats))
}

// --- Handler de Apagado y Utilidades ---

#[axum::debug_handler]
async fn shutdown_handler(State(state): State<AppState>) -> impl IntoResponse {
    info!("Petición de apagado recibida.");
    let sender = state
        .shutdown_sender
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .take();
    if let Some(sender) = sender {
        let _ = sender.send(());
    }
    StatusCode::OK
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Cuerpo o ruta que no se pudo interpretar: siempre 400 con el mensaje de axum.
fn rejected(rejection: impl std::fmt::Display) -> ApiError {
    warn!("Petición mal formada: {}", rejection);
    api_error(StatusCode::BAD_REQUEST, rejection.to_string())
}

fn search_error(e: SearchError) -> ApiError {
    warn!("Consulta rechazada: {}", e);
    api_error(StatusCode::BAD_REQUEST, e.to_string())
}

fn request_language(state: &AppState, params: &LangParams) -> Result<Language, ApiError> {
    match params.lang.as_deref() {
        Some(code) => {
            Language::from_str(code).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        None => Ok(state.config.default_language),
    }
}

async fn load_kind(
    state: &AppState,
    kind: DatasetKind,
    lang: Language,
) -> Result<Arc<Table>, ApiError> {
    let not_found_key = match kind {
        DatasetKind::Reviews => "reviews_not_found",
        _ => "file_not_found",
    };
    match state.file_of_kind(kind) {
        Some(file) => load_file(state, file, lang).await,
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": i18n::text(lang, not_found_key),
                "instructions": i18n::text(lang, "file_instructions"),
            })),
        )),
    }
}

async fn load_file(
    state: &AppState,
    file: DataFile,
    lang: Language,
) -> Result<Arc<Table>, ApiError> {
    let cache = state.cache.clone();
    let path = file.path.clone();
    run_blocking(move || cache.get(&path)).await?.map_err(|e| {
        error!("Error cargando {}: {}", file.path.display(), e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{} {}", i18n::text(lang, "loading_error"), e),
        )
    })
}

/// Ejecuta trabajo síncrono (lectura de CSV, filtrado) fuera del runtime.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("Tarea bloqueante interrumpida: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor")
    })
}
