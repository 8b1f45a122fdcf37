use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::extract::EntityKind;

const DATABASE_PATH_ENV: &str = "CATALOG_DATABASE_PATH";
const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";
const EXTRACT_KINDS_ENV: &str = "EXTRACT_KINDS";

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty segments are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub log_dir: PathBuf,
    /// Kinds `extract` covers when none are given on the command line. Empty
    /// means every kind.
    pub default_kinds: Vec<EntityKind>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_path =
            env::var(DATABASE_PATH_ENV).unwrap_or_else(|_| "catalog.db".to_string());
        let log_dir = env::var(LOG_DIR_ENV).unwrap_or_else(|_| "logs".to_string());
        let default_kinds = get_env_var_as_vec(EXTRACT_KINDS_ENV, ';')
            .iter()
            .map(|kind| kind.parse::<EntityKind>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {}", EXTRACT_KINDS_ENV))?;

        Ok(Config {
            database_path,
            log_dir: PathBuf::from(log_dir),
            default_kinds,
        })
    }
}
