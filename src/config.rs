//! Carga y gestión de configuración de la aplicación (servidor + datos).

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::i18n::Language;

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// Directorio donde se buscan los CSV (y su subdirectorio `data/`).
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Máximo de filas cargadas por fichero; 0 = sin límite.
    pub row_limit: usize,
    pub default_language: Language,
    pub open_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8501".to_string(),
            data_dir: PathBuf::from("."),
            static_dir: PathBuf::from("frontend"),
            row_limit: 10_000,
            default_language: Language::En,
            open_browser: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env`, pero leyendo de una función arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_addr = lookup("SERVER_ADDR").unwrap_or(defaults.server_addr);
        let data_dir = lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let row_limit = match lookup("ROW_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("ROW_LIMIT no es un número válido: {raw}"))?,
            None => defaults.row_limit,
        };

        let default_language = match lookup("DEFAULT_LANGUAGE") {
            Some(raw) => Language::from_str(&raw)?,
            None => defaults.default_language,
        };

        let open_browser = match lookup("OPEN_BROWSER") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("OPEN_BROWSER debe ser true/false: {raw}"))?,
            None => defaults.open_browser,
        };

        Ok(Self {
            server_addr,
            data_dir,
            static_dir,
            row_limit,
            default_language,
            open_browser,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.server_addr, "127.0.0.1:8501");
        assert_eq!(cfg.data_dir, PathBuf::from("."));
        assert_eq!(cfg.row_limit, 10_000);
        assert_eq!(cfg.default_language, Language::En);
        assert!(cfg.open_browser);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("SERVER_ADDR", "0.0.0.0:9000"),
            ("DATA_DIR", "/srv/foodcom"),
            ("ROW_LIMIT", "0"),
            ("DEFAULT_LANGUAGE", "sk"),
            ("OPEN_BROWSER", "off"),
        ])
        .unwrap();
        assert_eq!(cfg.server_addr, "0.0.0.0:9000");
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/foodcom"));
        assert_eq!(cfg.row_limit, 0);
        assert_eq!(cfg.default_language, Language::Sk);
        assert!(!cfg.open_browser);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config_from(&[("ROW_LIMIT", "many")]).is_err());
        assert!(config_from(&[("DEFAULT_LANGUAGE", "fr")]).is_err());
        assert!(config_from(&[("OPEN_BROWSER", "maybe")]).is_err());
    }
}
