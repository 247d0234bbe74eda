//! Configuration validation, run whenever a config is loaded

use super::Config;
use crate::error::{Error, Result};

impl Config {
    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("text_style_interface", &self.text_style_interface),
            ("animatable_interface", &self.animatable_interface),
            ("library_module", &self.library_module),
            ("program_module", &self.program_module),
            ("operation_suffix", &self.operation_suffix),
            ("platform_tag", &self.platform_tag),
            ("file_extension", &self.file_extension),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigError(format!("'{field}' must not be empty")));
            }
        }

        if self.text_style_interface == self.animatable_interface {
            return Err(Error::ConfigError(
                "the two capability interfaces must be distinct".to_string(),
            ));
        }

        if !is_identifier(&self.operation_suffix) {
            return Err(Error::ConfigError(format!(
                "'operation_suffix' must be a valid identifier, got '{}'",
                self.operation_suffix
            )));
        }

        if self.platform_tag.contains(['/', '\\', '.']) {
            return Err(Error::ConfigError(format!(
                "'platform_tag' must not contain path separators or dots, got '{}'",
                self.platform_tag
            )));
        }

        if self.cache_capacity == 0 {
            return Err(Error::ConfigError(
                "'cache_capacity' must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
