use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_PATH_VAR: &str = "CONTENT_TRENDS_DATA";
pub const DEFAULT_ROWS_VAR: &str = "CONTENT_TRENDS_DEFAULT_ROWS";

const DEFAULT_DATA_PATH: &str = "netflix_clean_data.csv";
const DEFAULT_NUMBER_OF_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings, resolved once by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog file loaded at startup.
    pub data_path: PathBuf,
    /// Initial position of every row-count slider.
    pub default_rows: usize,
}

impl AppConfig {
    /// Resolve from the process: first CLI argument, then the environment
    /// (a `.env` file is honoured if present).
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) => log::debug!("No .env file loaded ({e}) - relying on environment"),
        }
        Self::from_sources(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    /// Resolve from an optional positional argument and a variable lookup.
    pub fn from_sources(arg: Option<String>, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_path: PathBuf = arg
            .or_else(|| var(DATA_PATH_VAR))
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
            .into();

        let default_rows = match var(DEFAULT_ROWS_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{DEFAULT_ROWS_VAR}={raw:?} is not a row count"))?,
            None => DEFAULT_NUMBER_OF_ROWS,
        };

        Ok(AppConfig {
            data_path,
            default_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_source() {
        let cfg = AppConfig::from_sources(None, vars(&[])).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("netflix_clean_data.csv"));
        assert_eq!(cfg.default_rows, 10);
    }

    #[test]
    fn argument_beats_environment() {
        let env = vars(&[(DATA_PATH_VAR, "/data/env.csv")]);
        let cfg = AppConfig::from_sources(Some("cli.parquet".to_string()), &env).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("cli.parquet"));
        let cfg = AppConfig::from_sources(None, &env).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("/data/env.csv"));
    }

    #[test]
    fn row_default_override() {
        let cfg = AppConfig::from_sources(None, vars(&[(DEFAULT_ROWS_VAR, " 25 ")])).unwrap();
        assert_eq!(cfg.default_rows, 25);
        assert!(AppConfig::from_sources(None, vars(&[(DEFAULT_ROWS_VAR, "many")])).is_err());
    }
}
