//! Descubrimiento y carga de los ficheros CSV del dataset, y conversión de
//! sus filas en recetas y reseñas.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    literal::{self, Cell},
    models::{DataFile, DatasetKind, Nutrition, Recipe, Review},
};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no se pudo leer {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Busca ficheros `*.csv` en `root` y en `root/data` (sin recursión).
/// Si el mismo nombre aparece en ambos, gana el de `data/`.
pub fn discover_csv_files(root: &Path) -> Vec<DataFile> {
    let mut found: BTreeMap<String, DataFile> = BTreeMap::new();

    for dir in [root.to_path_buf(), root.join("data")] {
        if !dir.is_dir() {
            continue;
        }
        let entries = WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        for entry in entries {
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
            found.insert(
                name.clone(),
                DataFile {
                    kind: DatasetKind::from_file_name(&name),
                    name,
                    path: path.to_path_buf(),
                    size_bytes,
                },
            );
        }
    }

    debug!("{} ficheros CSV encontrados en {}", found.len(), root.display());
    found.into_values().collect()
}

/// Tabla CSV en memoria. Las celdas vacías se guardan como `None`.
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
    /// Registros descartados por estar mal formados.
    pub skipped: usize,
    index: HashMap<String, usize>,
}

impl Table {
    /// Lee hasta `row_limit` filas (0 = sin límite).
    pub fn load(path: &Path, row_limit: usize) -> Result<Self, DatasetError> {
        let file = fs::File::open(path).map_err(|e| DatasetError::Read {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let table = Self::from_reader(path, file, row_limit)?;
        info!(
            "Cargadas {} filas de {} ({} descartadas).",
            table.rows.len(),
            path.display(),
            table.skipped
        );
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(
        path: &Path,
        reader: R,
        row_limit: usize,
    ) -> Result<Self, DatasetError> {
        let read_error = |source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(read_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut skipped = 0;
        for (line, record) in rdr.records().enumerate() {
            if row_limit > 0 && rows.len() >= row_limit {
                break;
            }
            match record {
                Ok(record) => {
                    let mut row: Vec<Option<String>> = record
                        .iter()
                        .map(|field| (!field.is_empty()).then(|| field.to_string()))
                        .collect();
                    row.resize(headers.len(), None);
                    rows.push(row);
                }
                Err(e) => {
                    skipped += 1;
                    warn!("Registro {} de {} descartado: {}", line + 1, path.display(), e);
                }
            }
        }

        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
            skipped,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Valor de la columna `name` en `row`, si existe y no está vacío.
    pub fn cell<'a>(&self, row: &'a [Option<String>], name: &str) -> Option<&'a str> {
        self.column(name)
            .and_then(|i| row.get(i))
            .and_then(|v| v.as_deref())
    }
}

/// Caché de tablas por ruta. Las entradas no se invalidan hasta reiniciar.
#[derive(Debug, Default)]
pub struct TableCache {
    row_limit: usize,
    tables: Mutex<HashMap<PathBuf, Arc<Table>>>,
}

impl TableCache {
    pub fn new(row_limit: usize) -> Self {
        Self {
            row_limit,
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, path: &Path) -> Result<Arc<Table>, DatasetError> {
        if let Some(table) = self.lock().get(path) {
            return Ok(table.clone());
        }
        // La carga se hace sin el cerrojo; si otra petición llega antes,
        // se conserva su tabla.
        let table = Arc::new(Table::load(path, self.row_limit)?);
        Ok(self
            .lock()
            .entry(path.to_path_buf())
            .or_insert(table)
            .clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Table>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Convierte cada fila en una receta. Las celdas con literales mal formados
/// dejan el campo a `None` sin afectar al resto de filas.
pub fn recipes(table: &Table) -> Vec<Recipe> {
    table
        .rows
        .iter()
        .map(|row| recipe_from_row(table, row))
        .collect()
}

pub fn reviews(table: &Table) -> Vec<Review> {
    table
        .rows
        .iter()
        .map(|row| Review {
            user_id: parse_int(table.cell(row, "user_id")),
            recipe_id: parse_int(table.cell(row, "recipe_id")),
            date: parse_date(table.cell(row, "date")),
            rating: parse_int(table.cell(row, "rating"))
                .filter(|r| (1..=5).contains(r))
                .map(|r| r as u8),
            review: table.cell(row, "review").map(str::to_string),
        })
        .collect()
}

fn recipe_from_row(table: &Table, row: &[Option<String>]) -> Recipe {
    let id = parse_int(table.cell(row, "id")).unwrap_or_default();
    let strings = |column: &str| {
        literal::decode_strings(&Cell::from(table.cell(row, column)))
            .map_err(|e| debug!("Receta {id}: columna '{column}' no decodificable: {e}"))
            .ok()
    };

    Recipe {
        id,
        name: table.cell(row, "name").unwrap_or_default().trim().to_string(),
        minutes: parse_count(table.cell(row, "minutes")),
        n_ingredients: parse_count(table.cell(row, "n_ingredients")),
        n_steps: parse_count(table.cell(row, "n_steps")),
        ingredients: strings("ingredients"),
        steps: strings("steps"),
        tags: strings("tags"),
        nutrition: literal::decode_numbers(&Cell::from(table.cell(row, "nutrition")))
            .map_err(|e| debug!("Receta {id}: columna 'nutrition' no decodificable: {e}"))
            .ok()
            .map(Nutrition),
        contributor_id: parse_int(table.cell(row, "contributor_id")),
        submitted: parse_date(table.cell(row, "submitted")),
        description: table.cell(row, "description").map(str::to_string),
    }
}

/// Entero; acepta también `"5.0"`, que es como pandas reescribe enteros con nulos.
fn parse_int(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite() && x.fract() == 0.0)
            .map(|x| x as i64)
    })
}

fn parse_count(value: Option<&str>) -> Option<u64> {
    parse_int(value).and_then(|n| u64::try_from(n).ok())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECIPES_CSV: &str = "name,id,minutes,contributor_id,submitted,tags,nutrition,n_steps,steps,description,ingredients,n_ingredients
arriba   baked winter squash mexican style,137739,55,47892,2005-09-16,\"['60-minutes-or-less', 'time-to-make', 'mexican', 'easy']\",\"[51.5, 0.0, 13.0, 0.0, 2.0, 0.0, 4.0]\",11,\"['make a choice and proceed with recipe', 'cut squash in half']\",autumn is my favorite time of year,\"['winter squash', 'mexican seasoning', 'honey']\",3
broken row,2,10,1,2005-01-01,\"['easy', \",not-a-list,1,[],,\"[]\",0
";

    fn table_from(csv: &str, limit: usize) -> Table {
        Table::from_reader(Path::new("RAW_recipes.csv"), csv.as_bytes(), limit).unwrap()
    }

    #[test]
    fn loads_rows_and_maps_empty_cells_to_none() {
        let table = table_from(RECIPES_CSV, 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers.len(), 12);
        assert!(table.has_column("tags"));
        assert_eq!(table.cell(&table.rows[1], "description"), None);
        assert_eq!(table.cell(&table.rows[0], "id"), Some("137739"));
    }

    #[test]
    fn row_limit_caps_loading() {
        let table = table_from(RECIPES_CSV, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn recipes_decode_literal_columns() {
        let table = table_from(RECIPES_CSV, 0);
        let recipes = recipes(&table);

        let first = &recipes[0];
        assert_eq!(first.id, 137739);
        assert_eq!(first.name, "arriba   baked winter squash mexican style");
        assert_eq!(first.minutes, Some(55));
        assert_eq!(
            first.tags.as_deref().unwrap(),
            ["60-minutes-or-less", "time-to-make", "mexican", "easy"]
        );
        assert_eq!(first.ingredients.as_ref().map(Vec::len), Some(3));
        assert_eq!(first.steps.as_ref().map(Vec::len), Some(2));
        assert_eq!(first.nutrition.as_ref().and_then(Nutrition::carbohydrates), Some(4.0));
        assert_eq!(first.submitted, NaiveDate::from_ymd_opt(2005, 9, 16));
    }

    #[test]
    fn malformed_cells_become_absent_without_aborting() {
        let table = table_from(RECIPES_CSV, 0);
        let broken = &recipes(&table)[1];
        assert_eq!(broken.id, 2);
        assert!(broken.tags.is_none());
        assert!(broken.nutrition.is_none());
        assert_eq!(broken.steps.as_deref(), Some(&[][..]));
        assert_eq!(broken.ingredients.as_deref(), Some(&[][..]));
    }

    #[test]
    fn reviews_parse_ratings() {
        let csv = "user_id,recipe_id,date,rating,review\n38094,40893,2003-02-17,4,Great with a salad.\n1293707,40893,2011-12-21,5.0,\n8937,44394,2002-12-01,0,meh\n";
        let table = Table::from_reader(Path::new("RAW_interactions.csv"), csv.as_bytes(), 0).unwrap();
        let reviews = reviews(&table);
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].rating, Some(4));
        assert_eq!(reviews[0].review.as_deref(), Some("Great with a salad."));
        assert_eq!(reviews[1].rating, Some(5));
        assert_eq!(reviews[1].review, None);
        assert_eq!(reviews[2].rating, None);
    }

    #[test]
    fn discovers_csv_files_in_root_and_data() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::File::create(dir.path().join("RAW_recipes.csv"))
            .unwrap()
            .write_all(b"id\n1\n")
            .unwrap();
        std::fs::File::create(dir.path().join("data").join("RAW_interactions.csv")).unwrap();
        std::fs::File::create(dir.path().join("notes.txt")).unwrap();

        let files = discover_csv_files(dir.path());
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["RAW_interactions.csv", "RAW_recipes.csv"]);
        assert_eq!(files[0].kind, DatasetKind::Reviews);
        assert_eq!(files[1].kind, DatasetKind::Recipes);
        assert_eq!(files[1].size_bytes, 5);
    }

    #[test]
    fn data_dir_copy_wins_on_name_clash() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("RAW_recipes.csv"), "id\n1\n").unwrap();
        std::fs::write(dir.path().join("data").join("RAW_recipes.csv"), "id\n1\n2\n").unwrap();

        let files = discover_csv_files(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("data").join("RAW_recipes.csv"));
        assert_eq!(files[0].size_bytes, 7);
    }

    #[test]
    fn malformed_record_is_skipped_and_the_rest_loads() {
        let bytes: &[u8] = b"id,name\n1,apple pie\n2,caf\xff\n3,stew\n";
        let table = Table::from_reader(Path::new("RAW_recipes.csv"), bytes, 0).unwrap();
        assert_eq!(table.skipped, 1);
        assert_eq!(table.len(), 2);
        let ids: Vec<_> = recipes(&table).iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn cache_loads_each_path_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RAW_recipes.csv");
        std::fs::write(&path, "id,name\n1,a\n2,b\n").unwrap();

        let cache = TableCache::new(0);
        let first = cache.get(&path).unwrap();
        let second = cache.get(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&dir.path().join("missing.csv")).is_err());
    }
}
