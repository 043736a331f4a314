use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use renderer::RendererConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let surface_size = match args.size.as_deref() {
        Some(spec) => parse_surface_size(spec)?,
        None => renderer::DEFAULT_SURFACE_SIZE,
    };
    let vertex_source = load_shader_source(
        args.vertex_shader.as_deref(),
        renderer::DEFAULT_VERTEX_SHADER,
    )?;
    let fragment_source = load_shader_source(
        args.fragment_shader.as_deref(),
        renderer::DEFAULT_FRAGMENT_SHADER,
    )?;

    tracing::info!(
        width = surface_size.0,
        height = surface_size.1,
        zoom = args.zoom,
        offset_x = args.offset_x,
        offset_y = args.offset_y,
        "starting julia viewer"
    );

    let config = RendererConfig {
        surface_size,
        vertex_source,
        fragment_source,
        zoom: args.zoom,
        offset: [args.offset_x, args.offset_y],
        start_paused: args.paused,
    };
    renderer::run_windowed(config)
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_shader_source(path: Option<&Path>, bundled: &str) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read shader at {}", path.display())),
        None => Ok(bundled.to_owned()),
    }
}

fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 1000x1000"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}
