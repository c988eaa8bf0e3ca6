//! Indentation configuration persistence
//!
//! Stores user preferences in `~/.config/bracket-indent/config.yaml`.
//! The core never caches this: callers load or build an [`IndentConfig`]
//! and pass it into every newline invocation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::model::EditorSettings;

/// Options controlling how newline indentation is computed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentConfig {
    /// When the text before the cursor ends with an open bracket, skip the
    /// bracket scan and use the default indentation (+1 tab width)
    #[serde(default)]
    pub use_default_indentation_after_empty_bracket: bool,

    /// Legacy behavior: a trailing open bracket is skipped and contributes
    /// one tab width on top of the next-outer bracket's column
    #[serde(default)]
    pub tab_stop_after_trailing_bracket: bool,

    /// Treat `<` and `>` as a bracket family
    #[serde(default)]
    pub include_angle_brackets: bool,

    /// Settings used by the built-in buffer host (the CLI)
    #[serde(default)]
    pub editor: EditorSettings,
}

impl IndentConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self)?;

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
