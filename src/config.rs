//! Configuration for linterlog.
//!
//! The configuration file is a small YAML document:
//!
//! ```yaml
//! rules:
//!   capital_letter: true
//!   only_english: true
//!   special_symbols: true
//!   sensitive_data: true
//! exclude:
//!   - "**/generated/**"
//! include_tests: false
//! ```
//!
//! Rule toggles are taken verbatim from the document: a key that is
//! missing loads as `false`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lint::RuleKind;

/// Config file names searched for, in order, when none is given.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["config/config.yml", ".linterlog.yml", "linterlog.yml"];

/// Template written by `linterlog init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/config.yml");

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// The four rule toggles consulted by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub capital_letter: bool,
    #[serde(default)]
    pub only_english: bool,
    #[serde(default)]
    pub special_symbols: bool,
    #[serde(default)]
    pub sensitive_data: bool,
}

impl Default for RuleConfig {
    /// All rules enabled.
    fn default() -> Self {
        Self {
            capital_letter: true,
            only_english: true,
            special_symbols: true,
            sensitive_data: true,
        }
    }
}

impl RuleConfig {
    /// A configuration with every rule switched off.
    pub fn disabled() -> Self {
        Self {
            capital_letter: false,
            only_english: false,
            special_symbols: false,
            sensitive_data: false,
        }
    }

    /// Whether the given rule is switched on.
    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        match rule {
            RuleKind::CapitalLetter => self.capital_letter,
            RuleKind::OnlyEnglish => self.only_english,
            RuleKind::SpecialSymbols => self.special_symbols,
            RuleKind::SensitiveData => self.sensitive_data,
        }
    }

    /// Return a copy with one rule switched on or off.
    pub fn with(mut self, rule: RuleKind, enabled: bool) -> Self {
        match rule {
            RuleKind::CapitalLetter => self.capital_letter = enabled,
            RuleKind::OnlyEnglish => self.only_english = enabled,
            RuleKind::SpecialSymbols => self.special_symbols = enabled,
            RuleKind::SensitiveData => self.sensitive_data = enabled,
        }
        self
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    /// Rule toggles. A document without a `rules` section disables all rules.
    #[serde(default = "RuleConfig::disabled")]
    pub rules: RuleConfig,
    /// Glob patterns for paths to skip (e.g., "**/vendor/**").
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Whether `_test.go` files are linted (default: false).
    #[serde(default)]
    pub include_tests: Option<bool>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            exclude: Vec::new(),
            include_tests: None,
        }
    }
}

impl FileConfig {
    /// Parse a configuration from a YAML string.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content, path)
    }

    /// Returns whether to include test files (defaults to false).
    pub fn should_include_tests(&self) -> bool {
        self.include_tests.unwrap_or(false)
    }

    /// Check if a path should be excluded based on `exclude` patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Find a configuration file under `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default names are
/// searched under `dir`; if none is found all rules are enabled.
/// Returns the configuration and the file it came from, if any.
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match discover(dir) {
            Some(p) => p,
            None => {
                tracing::info!(dir = %dir.display(), "no config file found, enabling all rules");
                return Ok((FileConfig::default(), None));
            }
        },
    };

    let config = FileConfig::parse_file(&path)?;
    validate(&config)?;
    tracing::debug!(path = %path.display(), rules = ?config.rules, "loaded config");
    Ok((config, Some(path)))
}

/// Validate a configuration for correctness.
pub fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    for pattern in &config.exclude {
        globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
rules:
  capital_letter: true
  only_english: false
  special_symbols: true
  sensitive_data: true
exclude:
  - "**/gen/**"
"#;
        let config = FileConfig::parse_str(yaml, Path::new("config.yml")).unwrap();
        assert!(config.rules.capital_letter);
        assert!(!config.rules.only_english);
        assert!(config.rules.special_symbols);
        assert!(config.rules.sensitive_data);
        assert_eq!(config.exclude.len(), 1);
        assert!(!config.should_include_tests());
    }

    #[test]
    fn test_missing_key_loads_as_disabled() {
        let yaml = r#"
rules:
  capital_letter: true
"#;
        let config = FileConfig::parse_str(yaml, Path::new("config.yml")).unwrap();
        assert!(config.rules.capital_letter);
        assert!(!config.rules.only_english);
        assert!(!config.rules.special_symbols);
        assert!(!config.rules.sensitive_data);
    }

    #[test]
    fn test_missing_rules_section_disables_all() {
        let config = FileConfig::parse_str("include_tests: true\n", Path::new("c.yml")).unwrap();
        assert_eq!(config.rules, RuleConfig::disabled());
        assert!(config.should_include_tests());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let err = FileConfig::parse_str("rules: [1, 2", Path::new("bad.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn test_default_enables_everything() {
        let rules = RuleConfig::default();
        for kind in RuleKind::ALL {
            assert!(rules.is_enabled(kind));
        }
        let rules = rules.with(RuleKind::SensitiveData, false);
        assert!(!rules.is_enabled(RuleKind::SensitiveData));
        assert!(rules.is_enabled(RuleKind::CapitalLetter));
    }

    #[test]
    fn test_template_enables_everything() {
        let config =
            FileConfig::parse_str(DEFAULT_CONFIG_TEMPLATE, Path::new("config.yml")).unwrap();
        assert_eq!(config.rules, RuleConfig::default());
    }

    #[test]
    fn test_discover_original_location() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());

        std::fs::create_dir(temp.path().join("config")).unwrap();
        std::fs::write(temp.path().join("config/config.yml"), "rules: {}\n").unwrap();
        std::fs::write(temp.path().join(".linterlog.yml"), "rules: {}\n").unwrap();

        let found = discover(temp.path()).unwrap();
        assert!(found.ends_with("config/config.yml"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load(None, temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.rules, RuleConfig::default());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load(Some(&missing), temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = FileConfig {
            exclude: vec!["a/{b".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_is_path_excluded() {
        let config = FileConfig {
            exclude: vec!["**/gen/**".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("pkg/gen/model.go")));
        assert!(!config.is_path_excluded(Path::new("pkg/api/model.go")));
    }
}
