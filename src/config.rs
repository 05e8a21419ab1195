//! Runtime configuration
//!
//! Resolved once at startup from command-line flags and environment
//! variables, falling back to the platform config directory.

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

// Environment variable names
pub const ENV_DATA: &str = "CLIB_DATA";
pub const ENV_PAGE_SIZE: &str = "CLIB_PAGE_SIZE";
pub const ENV_LOG: &str = "CLIB_LOG";

pub const DEFAULT_PAGE_SIZE: usize = 3;
const APP_DIR: &str = "clib";
const DATA_FILE: &str = "clib.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding both snapshots
    pub data_path: PathBuf,
    /// Default page size for `show page`
    pub page_size: usize,
}

impl Config {
    /// Flag beats environment beats the config directory.
    pub fn resolve(data_flag: Option<PathBuf>) -> Result<Self> {
        Self::from_sources(
            data_flag,
            env::var(ENV_DATA).ok(),
            env::var(ENV_PAGE_SIZE).ok(),
            dirs::config_dir(),
        )
    }

    fn from_sources(
        data_flag: Option<PathBuf>,
        data_env: Option<String>,
        page_size_env: Option<String>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let data_path = match (data_flag, data_env.filter(|v| !v.is_empty())) {
            (Some(path), _) => path,
            (None, Some(path)) => PathBuf::from(path),
            (None, None) => config_dir
                .ok_or_else(|| anyhow!("Could not find config directory; set {}", ENV_DATA))?
                .join(APP_DIR)
                .join(DATA_FILE),
        };

        let page_size = match page_size_env {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {}", ENV_PAGE_SIZE);
                    DEFAULT_PAGE_SIZE
                }
            },
        };

        Ok(Self {
            data_path,
            page_size,
        })
    }
}
