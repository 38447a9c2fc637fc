//! Runner configuration, read from the environment.

use std::path::PathBuf;

pub const CATALOG_PATH_VAR: &str = "COSMERE_CATALOG_PATH";
pub const PRETTY_OUTPUT_VAR: &str = "COSMERE_PRETTY_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    pub pretty_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            pretty_output: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let catalog_path = var(CATALOG_PATH_VAR).map(PathBuf::from);
        let pretty_output = match var(PRETTY_OUTPUT_VAR) {
            Some(value) => parse_flag(&value).unwrap_or_else(|| {
                tracing::warn!(
                    value = %value,
                    "Unrecognized {PRETTY_OUTPUT_VAR}, using pretty output"
                );
                true
            }),
            None => true,
        };

        Self {
            catalog_path,
            pretty_output,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
