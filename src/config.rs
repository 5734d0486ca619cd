//! Process configuration, layered with figment.
//!
//! Precedence (highest wins):
//! 1. Environment variables (`DATABASE_URL`, `HOST`, `PORT`, `DATA_FILE`,
//!    `SKIP_STARTUP`, `LOGLEVEL`)
//! 2. Built-in defaults
//!
//! `.env` loading happens in `main` via dotenvy before the first CONFIG access.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// sqlx connection string for the SQLite store.
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Delimited source file loaded once at bootstrap.
    pub data_file: PathBuf,
    /// Skip schema creation and the bulk load entirely (tests, pre-seeded stores).
    pub skip_startup: bool,
    /// Fallback log level when RUST_LOG is unset.
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:banks.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_file: PathBuf::from("data/bank_branches.csv"),
            skip_startup: false,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&[
                "database_url",
                "host",
                "port",
                "data_file",
                "skip_startup",
                "loglevel",
            ]))
            .extract()
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| panic!("invalid configuration: {e}"))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_store() {
        let cfg = Config::default();
        assert_eq!(cfg.database_url, "sqlite:banks.db");
        assert_eq!(cfg.port, 8000);
        assert!(!cfg.skip_startup);
    }
}
