//! CLI command implementations

pub mod init;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use clickfx_particles::EffectsConfig;

/// Load the effect configuration, falling back to defaults
pub fn load_config(path: Option<&str>) -> Result<EffectsConfig> {
    match path {
        Some(p) => EffectsConfig::load(p).context(format!("Failed to load config {}", p)),
        None => Ok(EffectsConfig::default()),
    }
}

/// Seed precedence: command line, then config file, then a fixed default
pub fn resolve_seed(cli: Option<u32>, config: &EffectsConfig) -> u32 {
    cli.or(config.seed).unwrap_or(1)
}
