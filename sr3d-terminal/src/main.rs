//! SR3D Terminal Demo - flat-shaded rotating meshes
//!
//! Controls:
//!   - WASD / Arrow Keys: Rotate
//!   - E/R: Roll rotation
//!   - Space: Pause the spin
//!   - Q/ESC: Quit

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use sr3d_core::{load_obj_file, Mesh, RenderConfig, Scene};
use sr3d_terminal::{AppOptions, TerminalApp};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sr3d-terminal")]
#[command(about = "Software 3D renderer in the terminal", long_about = None)]
struct Cli {
    /// OBJ file to load in the background
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Add a cube with this edge length (default when no OBJ is given)
    #[arg(long)]
    cube: Option<f32>,

    /// Shift the cube by half its extent before rendering
    #[arg(long, default_value = "false")]
    center: bool,

    /// Distance along +z at which meshes are placed
    #[arg(long, default_value = "50")]
    distance: f32,

    /// JSON render configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable triangle outlines
    #[arg(long = "no-outline", default_value = "false")]
    no_outline: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = RenderConfig::from_json_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = load_config(cli.config.as_ref())?;
    if cli.no_outline {
        config.style.stroke = None;
    }

    let mut scene = Scene::new();

    let cube_size = match (&cli.obj, cli.cube) {
        (_, Some(size)) => Some(size),
        (None, None) => Some(35.0),
        (Some(_), None) => None,
    };
    if let Some(size) = cube_size {
        let mut cube = Mesh::cube(size).context("Failed to build cube")?;
        if cli.center {
            cube.center_origin();
        }
        cube.position.z = cli.distance;
        scene.add(cube);
    }

    if let Some(path) = &cli.obj {
        info!(path = %path.display(), "loading OBJ");
        scene.spawn_load(path.display().to_string(), load_obj_file(path.clone()));
    }

    let options = AppOptions {
        placement_depth: cli.distance,
        ..AppOptions::default()
    };

    // Run the terminal app
    let mut app = TerminalApp::new(scene, config, options)?;
    app.run()?;

    Ok(())
}
