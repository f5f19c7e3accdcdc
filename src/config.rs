use std::env;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};
use crate::handlers::employee::IdPolicy;

pub const STORAGE_PATH_VAR: &str = "GOGO_STORAGE_PATH";
pub const PRINT_DIR_VAR: &str = "GOGO_PRINT_DIR";
pub const SEED_FILE_VAR: &str = "GOGO_SEED_FILE";
pub const ID_POLICY_VAR: &str = "GOGO_ID_POLICY";

const DEFAULT_PRINT_DIR: &str = "prints";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file backing the session; `None` keeps it in memory.
    pub storage_path: Option<PathBuf>,
    pub print_dir: PathBuf,
    /// Roster to start from instead of the built-in seed.
    pub seed_file: Option<PathBuf>,
    pub id_policy: IdPolicy,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let id_policy = match var(ID_POLICY_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|err| AppError::Config(format!("{}: {}", ID_POLICY_VAR, err)))?,
            None => IdPolicy::default(),
        };

        Ok(AppConfig {
            storage_path: var(STORAGE_PATH_VAR).map(PathBuf::from),
            print_dir: var(PRINT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRINT_DIR)),
            seed_file: var(SEED_FILE_VAR).map(PathBuf::from),
            id_policy,
        })
    }
}
