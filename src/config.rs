//! JSON configuration loading.
//!
//! The config file is optional. A missing or malformed file falls back to
//! defaults with a warning rather than failing the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "CITRON_CONFIG";

/// Errors that can occur while reading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`Config`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tags silently dropped from every caption.
    #[serde(default)]
    pub tags_to_absorb: Vec<String>,

    /// Location of the reference name database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokedex_path: Option<PathBuf>,
}

impl Config {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the absorb set from `tags_to_absorb`.
    pub fn absorb_set(&self) -> AbsorbSet {
        AbsorbSet::from_tags(self.tags_to_absorb.iter())
    }
}

/// Loads the config file, substituting defaults on any failure.
///
/// # Examples
///
/// ```
/// use citron::config::load_config;
///
/// let config = load_config(std::path::Path::new("/nonexistent/config.json"));
/// assert!(config.tags_to_absorb.is_empty());
/// ```
pub fn load_config(path: &Path) -> Config {
    match Config::from_file(path) {
        Ok(config) => {
            debug!(
                path = %path.display(),
                absorb = config.tags_to_absorb.len(),
                "loaded config"
            );
            config
        }
        Err(ConfigError::NotFound(_)) => {
            warn!(path = %path.display(), "config file not found, using empty config");
            Config::default()
        }
        Err(e) => {
            warn!(error = %e, "using empty config");
            Config::default()
        }
    }
}

/// Picks the config file: explicit path, then `CITRON_CONFIG`, then
/// `config.json` in the working directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Set of lowercase tags dropped during processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsorbSet(HashSet<String>);

impl AbsorbSet {
    /// Builds the set, trimming and lowercasing entries and skipping empty ones.
    ///
    /// ```
    /// use citron::AbsorbSet;
    ///
    /// let set = AbsorbSet::from_tags([" No Humans ", ""]);
    /// assert!(set.contains("no humans"));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|tag| tag.as_ref().trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )
    }

    /// Checks membership of an already-lowercased tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn parses_tags_to_absorb() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"tags_to_absorb": ["Pokemon (creature)", " no humans "]}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        let absorb = config.absorb_set();
        assert!(absorb.contains("pokemon (creature)"));
        assert!(absorb.contains("no humans"));
        assert!(config.pokedex_path.is_none());
    }

    #[test]
    fn missing_field_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"unrelated": true}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.tags_to_absorb.is_empty());
    }

    #[test]
    fn missing_file_is_not_found_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn malformed_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn reads_pokedex_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"pokedex_path": "/data/dex.db"}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.pokedex_path, Some(PathBuf::from("/data/dex.db")));
    }

    #[test]
    #[serial]
    fn resolve_config_path_prefers_explicit_then_env() {
        let original = std::env::var(CONFIG_ENV_VAR).ok();

        unsafe { std::env::set_var(CONFIG_ENV_VAR, "/etc/citron.json") };
        assert_eq!(
            resolve_config_path(Some(Path::new("mine.json"))),
            PathBuf::from("mine.json")
        );
        assert_eq!(resolve_config_path(None), PathBuf::from("/etc/citron.json"));

        unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
        assert_eq!(resolve_config_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));

        if let Some(value) = original {
            unsafe { std::env::set_var(CONFIG_ENV_VAR, value) };
        }
    }
}
