//! Estadísticas de un fichero CSV (estructura, completitud, duplicados) y
//! frecuencia de tags del fichero de recetas.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    dataset::{self, Table},
    taxonomy,
};

const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    /// Columna sin ningún valor.
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: ColumnType,
    /// Porcentaje de celdas no vacías, con un decimal.
    pub completeness: f64,
    pub unique: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetProfile {
    pub file: String,
    pub total_records: usize,
    pub columns: usize,
    /// Tamaño aproximado en memoria.
    pub size_bytes: usize,
    pub duplicates: usize,
    pub skipped_records: usize,
    pub column_profiles: Vec<ColumnProfile>,
    pub preview_headers: Vec<String>,
    pub preview: Vec<Vec<Option<String>>>,
}

pub fn profile(table: &Table) -> DatasetProfile {
    let column_profiles = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| profile_column(table, i, name))
        .collect();

    let mut seen = HashSet::new();
    let duplicates = table.rows.iter().filter(|row| !seen.insert(row.as_slice())).count();

    DatasetProfile {
        file: table
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        total_records: table.len(),
        columns: table.headers.len(),
        size_bytes: approximate_size(table),
        duplicates,
        skipped_records: table.skipped,
        column_profiles,
        preview_headers: table.headers.clone(),
        preview: table.rows.iter().take(PREVIEW_ROWS).cloned().collect(),
    }
}

fn profile_column(table: &Table, index: usize, name: &str) -> ColumnProfile {
    let values: Vec<&str> = table
        .rows
        .iter()
        .filter_map(|row| row.get(index).and_then(|v| v.as_deref()))
        .collect();

    let completeness = if table.is_empty() {
        0.0
    } else {
        (values.len() as f64 / table.len() as f64 * 1000.0).round() / 10.0
    };

    ColumnProfile {
        name: name.to_string(),
        data_type: infer_type(&values),
        completeness,
        unique: values.iter().collect::<HashSet<_>>().len(),
    }
}

fn infer_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        ColumnType::Empty
    } else if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if values.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn approximate_size(table: &Table) -> usize {
    let cell_overhead = std::mem::size_of::<Option<String>>();
    let headers: usize = table.headers.iter().map(String::len).sum();
    let cells: usize = table
        .rows
        .iter()
        .flatten()
        .map(|cell| cell_overhead + cell.as_ref().map_or(0, String::len))
        .sum();
    headers + cells
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTags {
    pub key: &'static str,
    pub title: &'static str,
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagStatistics {
    pub recipes_scanned: usize,
    pub recipes_with_tags: usize,
    pub total_tags: usize,
    pub distinct_tags: usize,
    pub top: Vec<TagCount>,
    pub by_category: Vec<CategoryTags>,
}

/// Frecuencia de tags y tags observados por categoría de la taxonomía.
/// Un tag entra en una categoría si contiene alguna de sus palabras clave.
pub fn tag_statistics(table: &Table, top_n: usize) -> TagStatistics {
    let recipes = dataset::recipes(table);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut recipes_with_tags = 0;
    for tags in recipes.iter().filter_map(|r| r.tags.as_ref()) {
        recipes_with_tags += 1;
        for tag in tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<TagCount> = counts
        .iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    let by_category = taxonomy::list_categories()
        .iter()
        .map(|category| {
            let keywords: Vec<&str> = category.keywords().collect();
            let mut tags: Vec<TagCount> = ranked
                .iter()
                .filter(|t| keywords.iter().any(|k| t.tag.contains(k)))
                .cloned()
                .collect();
            tags.sort_by(|a, b| a.tag.cmp(&b.tag));
            CategoryTags {
                key: category.key,
                title: category.title,
                tags,
            }
        })
        .collect();

    TagStatistics {
        recipes_scanned: recipes.len(),
        recipes_with_tags,
        total_tags: counts.values().sum(),
        distinct_tags: counts.len(),
        top: ranked.into_iter().take(top_n).collect(),
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn table(csv: &str) -> Table {
        Table::from_reader(Path::new("data/RAW_recipes.csv"), csv.as_bytes(), 0).unwrap()
    }

    #[test]
    fn profiles_columns() {
        let t = table("id,score,name,empty\n1,1.5,a,\n2,2,b,\n2,2,b,\n3,,c,\n");
        let p = profile(&t);
        assert_eq!(p.file, "RAW_recipes.csv");
        assert_eq!(p.total_records, 4);
        assert_eq!(p.columns, 4);
        assert_eq!(p.duplicates, 1);
        assert!(p.size_bytes > 0);

        let by_name: HashMap<_, _> = p.column_profiles.iter().map(|c| (c.name.as_str(), c)).collect();
        assert_eq!(by_name["id"].data_type, ColumnType::Integer);
        assert_eq!(by_name["id"].unique, 3);
        assert_eq!(by_name["score"].data_type, ColumnType::Float);
        assert_eq!(by_name["score"].completeness, 75.0);
        assert_eq!(by_name["name"].data_type, ColumnType::Text);
        assert_eq!(by_name["empty"].data_type, ColumnType::Empty);
        assert_eq!(by_name["empty"].completeness, 0.0);
    }

    #[test]
    fn completeness_is_rounded_to_one_decimal() {
        let t = table("a,b\n1,\n2,x\n3,\n");
        assert_eq!(profile(&t).column_profiles[1].completeness, 33.3);
    }

    #[test]
    fn preview_is_capped() {
        let mut csv = String::from("id\n");
        for i in 0..25 {
            csv.push_str(&format!("{i}\n"));
        }
        let p = profile(&table(&csv));
        assert_eq!(p.preview.len(), PREVIEW_ROWS);
        assert_eq!(p.preview_headers, vec!["id"]);
    }

    #[test]
    fn counts_tags_and_groups_them_by_category() {
        let t = table(
            "id,tags\n1,\"['easy', 'italian', 'desserts']\"\n2,\"['easy', 'mexican']\"\n3,broken\n4,\"['easy', 'italian']\"\n",
        );
        let stats = tag_statistics(&t, 2);
        assert_eq!(stats.recipes_scanned, 4);
        assert_eq!(stats.recipes_with_tags, 3);
        assert_eq!(stats.total_tags, 7);
        assert_eq!(stats.distinct_tags, 4);
        assert_eq!(
            stats.top,
            vec![
                TagCount { tag: "easy".into(), count: 3 },
                TagCount { tag: "italian".into(), count: 2 },
            ]
        );

        let cuisine = stats.by_category.iter().find(|c| c.key == "cuisine").unwrap();
        let names: Vec<_> = cuisine.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(names, vec!["italian", "mexican"]);
    }
}
