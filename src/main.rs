use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glfw_native::cli::Cli;
use glfw_native::demo::{self, DemoApp};
use glfw_native::Glfw;

// === Setup ===

fn load(cli: &Cli) -> Result<Glfw> {
    let glfw = match &cli.library {
        Some(path) => Glfw::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Glfw::load_default().context("loading GLFW")?,
    };
    glfw.set_error_callback(Some(Box::new(|code, description| {
        log::warn!("GLFW error {:?}: {}", code, description);
    })));
    glfw.init().context("initializing GLFW")?;
    log::info!("GLFW {}", glfw.version_string());
    Ok(glfw)
}

// === Entry Point ===

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.window_config()?;
    let glfw = load(&cli)?;

    if cli.list_monitors {
        for line in demo::describe_monitors(&glfw)? {
            println!("{}", line);
        }
        return Ok(());
    }

    let timeout = cli
        .timeout
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --timeout")?;

    println!("GLFW demo - Enter or Escape to quit");
    let mut app = DemoApp::new(&glfw, &config)?;
    app.run(timeout)?;
    app.close()?;

    glfw.terminate()?;
    Ok(())
}
