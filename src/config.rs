//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursetree/coursetree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `COURSETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DuplicatePolicy, DEFAULT_DELIMITER};
use crate::util::path::expand_path;

/// Unified configuration for coursetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Course data offered when the load prompt is left blank
    pub data_file: PathBuf,
    /// Field separator of the course data
    pub delimiter: char,
    /// Handling of a second record with an identifier already in the catalog
    pub duplicates: DuplicatePolicy,
    /// Runs averaged per strategy by `bench`
    pub bench_repeat: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("courses.csv"),
            delimiter: DEFAULT_DELIMITER,
            duplicates: DuplicatePolicy::default(),
            bench_repeat: 5,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub duplicates: Option<DuplicatePolicy>,
    pub bench_repeat: Option<usize>,
}

/// Get the XDG config directory for coursetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursetree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.data_file = expand_path(&self.data_file);
    }

    /// Overlay wins field by field where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            duplicates: overlay.duplicates.unwrap_or(self.duplicates),
            bench_repeat: overlay.bench_repeat.unwrap_or(self.bench_repeat),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply COURSETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("COURSETREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = parse_delimiter(&val)?;
        }
        if let Ok(val) = config.get_string("duplicates") {
            settings.duplicates = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("bench_repeat") {
            settings.bench_repeat = val.trim().parse().map_err(|e| ApplicationError::Config {
                message: format!("COURSETREE_BENCH_REPEAT={val}: {e}"),
            })?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.delimiter.is_whitespace() || self.delimiter.is_alphanumeric() {
            return Err(ApplicationError::Config {
                message: format!("unusable delimiter {:?}", self.delimiter),
            });
        }
        if self.bench_repeat == 0 {
            return Err(ApplicationError::Config {
                message: "bench_repeat must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parse settings from TOML text on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ApplicationError> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| ApplicationError::Config {
            message: format!("parse config: {e}"),
        })?;
        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        settings.validate()?;
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coursetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/coursetree/coursetree.toml
#   Explicit: --config <file>
#   Env:      COURSETREE_* environment variables (e.g. COURSETREE_DUPLICATES=reject)

# Course data loaded when the menu's file prompt is left blank
# data_file = "courses.csv"

# Field separator (single character)
# delimiter = ","

# Same identifier inserted twice: "retain" (keep both), "reject", "overwrite"
# duplicates = "retain"

# Runs averaged per strategy by `coursetree bench`
# bench_repeat = 5
"#
        .to_string()
    }
}

fn parse_delimiter(val: &str) -> Result<char, ApplicationError> {
    let mut chars = val.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {val:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
