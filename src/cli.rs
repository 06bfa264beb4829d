// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigResult, WindowConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "glfw-demo")]
#[command(about = "Opens a GLFW window and echoes input into its title", long_about = None)]
pub struct Cli {
    /// Path to the GLFW shared library (default: $GLFW_LIBRARY, then the platform names)
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// JSON window configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width, overrides the config
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height, overrides the config
    #[arg(long)]
    pub height: Option<i32>,

    /// Window title, overrides the config
    #[arg(long)]
    pub title: Option<String>,

    /// Wake up at least every SECS seconds instead of blocking until input
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Print connected monitors and their video modes, then exit
    #[arg(long = "list-monitors", default_value = "false")]
    pub list_monitors: bool,
}

impl Cli {
    /// The config file (or defaults) with command-line overrides applied.
    pub fn window_config(&self) -> ConfigResult<WindowConfig> {
        let mut config = match &self.config {
            Some(path) => WindowConfig::load(path)?,
            None => WindowConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        Ok(config)
    }
}
