//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outline-docs/outline-docs.toml`
//! 3. Local config: `<outline_dir>/.outline-docs.toml` (next to the input outline)
//! 4. Environment variables: `OUTLINE_DOCS_*` prefix
//!
//! Command-line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::SanitizePolicy;

pub const APP_NAME: &str = "outline-docs";
pub const ENV_PREFIX: &str = "OUTLINE_DOCS";
pub const LOCAL_CONFIG_FILE: &str = ".outline-docs.toml";

/// Raw settings for intermediate parsing (all fields optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_name_length: Option<usize>,
    pub doc_extension: Option<String>,
    pub index_name: Option<String>,
    pub sanitize_policy: Option<SanitizePolicy>,
    pub allow_empty_folders: Option<bool>,
}

/// Unified configuration for outline-docs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum characters of a generated name, extension excluded
    pub max_name_length: usize,
    /// Extension of generated documents (without dot)
    pub doc_extension: String,
    /// File stem of the document written inside each directory
    pub index_name: String,
    /// Name sanitization policy
    pub sanitize_policy: SanitizePolicy,
    /// Turn leaves into directories when a sibling has children
    pub allow_empty_folders: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_name_length: 20,
            doc_extension: "md".into(),
            index_name: "index".into(),
            sanitize_policy: SanitizePolicy::Default,
            allow_empty_folders: false,
        }
    }
}

/// Get the XDG config directory for outline-docs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{}.toml", APP_NAME)))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
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
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_name_length: overlay.max_name_length.unwrap_or(self.max_name_length),
            doc_extension: overlay
                .doc_extension
                .clone()
                .unwrap_or_else(|| self.doc_extension.clone()),
            index_name: overlay
                .index_name
                .clone()
                .unwrap_or_else(|| self.index_name.clone()),
            sanitize_policy: overlay.sanitize_policy.unwrap_or(self.sanitize_policy),
            allow_empty_folders: overlay
                .allow_empty_folders
                .unwrap_or(self.allow_empty_folders),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.outline-docs.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/outline-docs/outline-docs.toml`
    /// 3. Local config: `<local_dir>/.outline-docs.toml`
    /// 4. Environment variables: `OUTLINE_DOCS_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config next to the outline
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply OUTLINE_DOCS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_int("max_name_length"))? {
            settings.max_name_length =
                usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("max_name_length must not be negative: {}", val),
                })?;
        }
        if let Some(val) = env_value(config.get_string("doc_extension"))? {
            settings.doc_extension = val;
        }
        if let Some(val) = env_value(config.get_string("index_name"))? {
            settings.index_name = val;
        }
        if let Some(val) = env_value(config.get_string("sanitize_policy"))? {
            settings.sanitize_policy = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Some(val) = env_value(config.get_bool("allow_empty_folders"))? {
            settings.allow_empty_folders = val;
        }

        Ok(settings)
    }

    /// Reject settings that cannot produce valid file names.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_name_length == 0 {
            return Err(ApplicationError::Config {
                message: "max_name_length must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("doc_extension", &self.doc_extension),
            ("index_name", &self.index_name),
        ] {
            let invalid = value.is_empty()
                || value.starts_with('.')
                || value.contains(['/', '\\'])
                || value.chars().any(char::is_whitespace);
            if invalid {
                return Err(ApplicationError::Config {
                    message: format!("{} is not a valid file name part: {:?}", field, value),
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# outline-docs configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/outline-docs/outline-docs.toml
#   Local:  <outline_dir>/.outline-docs.toml  (next to the input outline)
#   Env:    OUTLINE_DOCS_* environment variables (explicit overrides)
#   CLI:    --remove-digits, --allow-empty-folders, --max-name-length

# Maximum characters of a generated file or directory name (extension excluded).
# Longer names keep their start and end with "…" in between.
# max_name_length = 20

# Extension of generated documents
# doc_extension = "md"

# Name of the document written inside each generated directory
# index_name = "index"

# Name sanitization: "default" (strip list markers, dots become underscores)
# or "strip-digits" (delete dots, strip leading digits)
# sanitize_policy = "default"

# Make leaves directories too when a sibling has children
# allow_empty_folders = false
"#
        .to_string()
    }
}

/// `None` if the variable is not set; a value that does not parse is an error.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment ({}_*): {}", ENV_PREFIX, e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
