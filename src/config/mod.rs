//! Configuration system for yamlscribe.
//!
//! Configuration is read from a TOML file and merged with command-line
//! arguments by the binary. Every field has a serde default, so a partial file
//! (or no file at all) is valid.
//!
//! # Example
//!
//! ```
//! use yamlscribe::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.indent_size, 4);
//! assert_eq!(config.list_item_indent, 2);
//!
//! let custom = Config {
//!     indent_size: 2,
//!     ..Config::default()
//! };
//! assert_eq!(custom.list_item_indent, 2);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commentable::CommentStyle;

/// Configuration for generated YAML files.
///
/// # Fields
///
/// * `indent_size` - Columns per level of mapping nesting (default: 4)
/// * `list_item_indent` - Columns per level of sequence nesting (default: 2)
/// * `marker` - Text of the "generated file" comment written first
/// * `header_comment` - Optional comment written below the marker
/// * `create_backup` - Create .bak files before overwriting (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Columns per level of mapping nesting
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Columns per level of sequence nesting
    #[serde(default = "default_list_item_indent")]
    pub list_item_indent: usize,

    /// First comment line of every rendered file
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub header_comment: Option<String>,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,
}

fn default_indent_size() -> usize {
    4
}

fn default_list_item_indent() -> usize {
    2
}

fn default_marker() -> String {
    "~~ Generated by yamlscribe. Do not edit by hand.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            list_item_indent: default_list_item_indent(),
            marker: default_marker(),
            header_comment: None,
            create_backup: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlscribe/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlscribe");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be
    /// read; a broken file is reported as a warning.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            tracing::warn!(path = %config_path.display(), "ignoring config file: {:#}", err);
            Self::default()
        })
    }

    /// Loads configuration from an explicit file.
    ///
    /// Unlike [`Config::load`], a missing or invalid file is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Sequence items are written as `-` plus padding, so mapping indentation
    /// needs room for the dash.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.indent_size < 2 {
            anyhow::bail!("indent_size must be at least 2, got {}", self.indent_size);
        }
        if self.list_item_indent < 2 {
            anyhow::bail!(
                "list_item_indent must be at least 2, got {}",
                self.list_item_indent
            );
        }
        Ok(())
    }

    /// The rendering settings for commentable files.
    pub fn comment_style(&self) -> CommentStyle {
        CommentStyle {
            indent: self.indent_size,
            list_item_indent: self.list_item_indent,
            marker: self.marker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("indent_size = 2\n").unwrap();
        assert_eq!(config.indent_size, 2);
        assert_eq!(config.list_item_indent, 2);
        assert_eq!(config.marker, default_marker());
        assert!(!config.create_backup);
    }

    #[test]
    fn test_validate_rejects_tiny_indent() {
        let config = Config {
            indent_size: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_comment_style_mirrors_config() {
        let style = Config::default().comment_style();
        assert_eq!(style.indent, 4);
        assert_eq!(style.list_item_indent, 2);
        assert_eq!(style.marker, default_marker());
    }
}
