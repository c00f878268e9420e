//! Configuration module for copyqn
//!
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::VALID_CLIPBOARD_PROVIDERS;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.copyqn/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".copyqn").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Clipboard configuration
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Status output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the clipboard provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Provider: "auto" (default), a program name, "command" or "stdout"
    #[serde(default = "default_clipboard_provider")]
    pub provider: String,

    /// Program and arguments used when provider is "command"
    #[serde(default)]
    pub command: Vec<String>,

    /// Clear the clipboard when nothing under the caret resolves
    #[serde(default = "default_clear_on_unresolved")]
    pub clear_on_unresolved: bool,
}

/// Configuration for user-facing status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the copied name after a successful copy
    #[serde(default = "default_echo_status")]
    pub echo_status: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            provider: default_clipboard_provider(),
            command: Vec::new(),
            clear_on_unresolved: default_clear_on_unresolved(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            echo_status: default_echo_status(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !VALID_CLIPBOARD_PROVIDERS.contains(&self.clipboard.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid clipboard provider '{}'. Must be one of: {:?}",
                self.clipboard.provider, VALID_CLIPBOARD_PROVIDERS
            )));
        }

        if self.clipboard.provider == "command" && self.clipboard.command.is_empty() {
            return Err(Error::config(
                "clipboard.command must name a program when provider is 'command'".to_string(),
            ));
        }

        Ok(())
    }
}
