//! Headless session-frame-to-image render command

use crate::commands::{load_config, resolve_seed};
use crate::session::{play, SessionScript};
use anyhow::{Context, Result};
use clickfx_core::Color;
use clickfx_render::ImageSurface;

pub struct RenderArgs {
    pub script: String,
    pub frame: u64,
    pub output: String,
    pub config: Option<String>,
    pub seed: Option<u32>,
    pub background: Option<String>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let script = SessionScript::load(&args.script)
        .context(format!("Failed to load session {}", args.script))?;
    let config = load_config(args.config.as_deref())?;
    let seed = resolve_seed(args.seed, &config);

    let background = match &args.background {
        Some(hex) => Color::parse_hex(hex).context("Invalid --background")?,
        None => Color::TRANSPARENT,
    };
    let size = script.size();
    let surface = ImageSurface::with_background(
        size.width.round() as u32,
        size.height.round() as u32,
        background,
    );

    // Frame indices start at 0; playing N+1 frames leaves frame N on the surface
    let playback = play(&script, &config, seed, args.frame + 1, surface)
        .context("Session playback failed")?;

    playback
        .surface
        .save_png(&args.output)
        .context(format!("Failed to save image to {}", args.output))?;
    let img = playback.surface.image();

    let live = playback.frames.last().map_or(0, |s| s.total_live());
    println!(
        "Rendered frame {} ({} live) to {} ({}x{})",
        args.frame,
        live,
        args.output,
        img.width(),
        img.height()
    );
    Ok(())
}
