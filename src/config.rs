//! Window configuration files.
//!
//! A JSON document describing the window the demo opens. Every field is optional;
//! omitted fields take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ClientApi, OpenGlProfile};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Everything needed to create one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub resizable: bool,
    pub visible: bool,
    pub decorated: bool,
    pub maximized: bool,
    /// MSAA samples, 0 to disable
    pub samples: i32,
    pub client_api: ClientApi,
    /// `[major, minor]`; the platform default when absent
    pub context_version: Option<[i32; 2]>,
    pub opengl_profile: Option<OpenGlProfile>,
    /// Applied once after creation; needs a client API
    pub swap_interval: Option<i32>,
    /// X11 `WM_CLASS` class name, ASCII only
    pub x11_class_name: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "GLFW".to_string(),
            resizable: true,
            visible: true,
            decorated: true,
            maximized: false,
            samples: 0,
            client_api: ClientApi::OpenGl,
            context_version: None,
            opengl_profile: None,
            swap_interval: Some(1),
            x11_class_name: None,
        }
    }
}

impl WindowConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
