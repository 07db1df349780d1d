//! Store configuration from environment variables

use std::env;
use std::path::PathBuf;

/// Default file name for persisted best scores
pub const DEFAULT_FILE_NAME: &str = "best_scores.json";

/// Where and whether best scores are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub disabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            disabled: false,
        }
    }
}

impl StoreConfig {
    /// Create from environment variables
    ///
    /// - `SLABS_DATA_DIR`: directory of the score file (default ".")
    /// - `SLABS_BEST_SCORE_FILE`: file name (default "best_scores.json")
    /// - `SLABS_STORE_DISABLED`: "1" or "true" turns persistence off
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] but reads through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = non_empty(lookup("SLABS_DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let file_name = non_empty(lookup("SLABS_BEST_SCORE_FILE")).unwrap_or(defaults.file_name);

        let disabled = lookup("SLABS_STORE_DISABLED")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(false);

        Self {
            data_dir,
            file_name,
            disabled,
        }
    }

    /// Full path of the score file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}
