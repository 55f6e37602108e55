use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::oneshot;

use crate::{
    config::AppConfig,
    dataset::{self, TableCache},
    i18n::Language,
    models::{DataFile, DatasetKind},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub cache: Arc<TableCache>,
    pub shutdown_sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl AppState {
    pub fn new(config: AppConfig, shutdown_sender: Option<oneshot::Sender<()>>) -> Self {
        Self {
            cache: Arc::new(TableCache::new(config.row_limit)),
            config,
            shutdown_sender: Arc::new(Mutex::new(shutdown_sender)),
        }
    }

    /// Ficheros CSV disponibles ahora mismo en el directorio de datos.
    pub fn files(&self) -> Vec<DataFile> {
        dataset::discover_csv_files(&self.config.data_dir)
    }

    pub fn file_of_kind(&self, kind: DatasetKind) -> Option<DataFile> {
        self.files().into_iter().find(|f| f.kind == kind)
    }

    pub fn status(&self) -> Status {
        let files = self.files();
        let has = |kind: DatasetKind| files.iter().any(|f| f.kind == kind);
        Status {
            message: if has(DatasetKind::Recipes) {
                "Servidor listo.".to_string()
            } else {
                "No se encontraron los ficheros de recetas.".to_string()
            },
            language: self.config.default_language,
            row_limit: self.config.row_limit,
            files_found: files.len(),
            recipes_available: has(DatasetKind::Recipes),
            reviews_available: has(DatasetKind::Reviews),
            cached_tables: self.cache.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub message: String,
    pub language: Language,
    pub row_limit: usize,
    pub files_found: usize,
    pub recipes_available: bool,
    pub reviews_available: bool,
    pub cached_tables: usize,
}
