use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".colorto.json";

pub const DEFAULT_TEXT_STYLE_INTERFACE: &str = "Microsoft.Maui.ITextStyle";
pub const DEFAULT_ANIMATABLE_INTERFACE: &str = "Microsoft.Maui.Controls.IAnimatable";
pub const DEFAULT_LIBRARY_MODULE: &str = "Microsoft.Maui.Controls";
pub const DEFAULT_OPERATION_SUFFIX: &str = "TextColorTo";
pub const DEFAULT_PLATFORM_TAG: &str = "shared";
pub const DEFAULT_FILE_EXTENSION: &str = "cs";
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Settings for one generator instance.
///
/// Every field is optional in `.colorto.json`; missing ones take the defaults
/// for .NET MAUI projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Metadata name of the first capability interface
    pub text_style_interface: String,
    /// Metadata name of the second capability interface
    pub animatable_interface: String,
    /// Name of the referenced module whose capable types are generated for too
    pub library_module: String,
    /// Module name recorded for types declared by the program under analysis
    pub program_module: String,
    pub operation_suffix: String,
    pub platform_tag: String,
    pub file_extension: String,
    /// Entries kept by the incremental cache before eviction
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_style_interface: DEFAULT_TEXT_STYLE_INTERFACE.to_string(),
            animatable_interface: DEFAULT_ANIMATABLE_INTERFACE.to_string(),
            library_module: DEFAULT_LIBRARY_MODULE.to_string(),
            program_module: "Program".to_string(),
            operation_suffix: DEFAULT_OPERATION_SUFFIX.to_string(),
            platform_tag: DEFAULT_PLATFORM_TAG.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` to the first directory holding a config file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = if start_path.is_file() {
            start_path.parent()?
        } else {
            start_path
        };

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config above `start_path`, or the defaults if none exists
    pub fn load_from_path(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                tracing::debug!(
                    "No {} above {}, using defaults",
                    CONFIG_FILE_NAME,
                    start_path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn capability_interfaces(&self) -> [&str; 2] {
        [&self.text_style_interface, &self.animatable_interface]
    }
}
