//! Service configuration read from the environment.

use std::path::PathBuf;

/// Runtime settings.
///
/// Read from env vars, after loading `.env` if present:
/// - HOST: bind address (default 0.0.0.0)
/// - PORT: bind port (default 3000)
/// - EXERCISES_PATH: JSON file with the exercise catalog (built-in catalog if unset)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub exercises_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "3000".to_string(),
            exercises_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT").unwrap_or(defaults.port),
            exercises_path: lookup("EXERCISES_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
