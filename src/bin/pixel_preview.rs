//! pixel-preview - render a triangle scene to PNG.
//!
//! Loads a scene and an optional render configuration, draws one frame in
//! vector or pixel-preview mode, and writes it as a PNG.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::info;

use trueno_pixel::config::RenderConfig;
use trueno_pixel::logging::{init_logging, LoggingConfig};
use trueno_pixel::output::PngEncoder;
use trueno_pixel::scene::Scene;

#[derive(Debug, Parser)]
#[command(name = "pixel-preview", version, about = "Render a triangle scene to PNG")]
struct Cli {
    /// Scene YAML file (defaults to the built-in demo scene)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Render configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Zoom factor
    #[arg(long)]
    scale: Option<f32>,

    /// Pan offset as DX,DY screen pixels
    #[arg(long, value_parser = parse_pair::<f32>, allow_hyphen_values = true)]
    pan: Option<(f32, f32)>,

    /// Render in pixel-preview mode
    #[arg(long)]
    preview: bool,

    /// Pixel-preview sample grid as ROWSxCOLS
    #[arg(long, value_parser = parse_grid)]
    grid: Option<(u32, u32)>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Output PNG path
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated values, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<T>()
            .map_err(|_| format!("invalid number '{v}'"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_grid(s: &str) -> Result<(u32, u32), String> {
    let (rows, cols) = s
        .split_once(&['x', 'X'][..])
        .ok_or_else(|| format!("expected ROWSxCOLS, got '{s}'"))?;
    parse_pair::<u32>(&format!("{rows},{cols}"))
}

/// CLI flags override the file, which overrides defaults.
fn apply_overrides(cli: &Cli, config: &mut RenderConfig) {
    if let Some(scale) = cli.scale {
        config.viewport.scale = scale;
    }
    if let Some((dx, dy)) = cli.pan {
        config.viewport.offset = [dx, dy];
    }
    if cli.preview {
        config.preview.enabled = true;
    }
    if let Some((rows, cols)) = cli.grid {
        config.preview.rows = rows;
        config.preview.cols = cols;
    }
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_verbosity(cli.verbose));

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    apply_overrides(&cli, &mut config);
    config.validate()?;

    let scene = match &cli.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::demo(),
    };

    let renderer = config.renderer()?;
    let mut frame = config.framebuffer()?;
    let stats = renderer.redraw(&scene, &mut frame);
    info!(
        "drew {} triangles ({} degenerate), {} preview cells",
        stats.triangles, stats.degenerate, stats.cells
    );

    PngEncoder::write_to_file(&frame, &cli.output)?;
    println!(
        "wrote {} ({}x{})",
        cli.output.display(),
        frame.width(),
        frame.height()
    );
    Ok(())
}
