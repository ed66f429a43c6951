use crate::summary::core::DEFAULT_LONG_READ_THRESHOLD;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults for both summary commands; command-line flags win.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Appended to every label as `_<append>`; empty disables it.
    #[serde(default = "default_append")]
    pub append: String,

    /// Keep only the second `/` segment of each input path in labels.
    #[serde(default = "default_shortname")]
    pub shortname: bool,

    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Minimum length of a read counted in the `whales` column.
    #[serde(default = "default_long_read_threshold")]
    pub long_read_threshold: u64,
}

fn default_append() -> String {
    "fast".to_string()
}

fn default_shortname() -> bool {
    true
}

fn default_threads() -> usize {
    1
}

fn default_long_read_threshold() -> u64 {
    DEFAULT_LONG_READ_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            append: default_append(),
            shortname: default_shortname(),
            threads: default_threads(),
            long_read_threshold: default_long_read_threshold(),
        }
    }
}

impl Config {
    /// `config.toml` in the platform config directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "runqc", "runqc-tools")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Load the user config, falling back to defaults when it is missing
    /// or cannot be parsed.
    pub fn load() -> Self {
        let Some(config_path) = Self::default_path() else {
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {:#}", e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "append = \"sup\"\nthreads = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.append, "sup");
        assert_eq!(config.threads, 4);
        assert!(config.shortname);
        assert_eq!(config.long_read_threshold, 1_000_000);
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "threads = \"many\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
