//! clickfx Particles - pointer-driven particle effects
//!
//! Provides the effects a host installs:
//! - `ClickEffect` — press burst plus a long-press charged release burst,
//!   simulated once per frame with radius decay, damping and drift
//! - `ColorBallBurst` — time-based balls that fly out and shrink on release
//! - `EffectStack` — forwards host events and runs update/clear/draw per frame
//! - `EffectsConfig` — TOML configuration with validation

pub mod click;
pub mod color_ball;
pub mod config;
pub mod curves;
pub mod long_press;
pub mod particle;
pub mod rand;
pub mod stack;

pub use click::ClickEffect;
pub use color_ball::ColorBallBurst;
pub use config::{ClickConfig, ColorBallConfig, EffectsConfig, DEFAULT_CONFIG_TOML};
pub use particle::{Particle, ParticleStore, StepParams};
pub use stack::{Effect, EffectStack, FrameStats};
