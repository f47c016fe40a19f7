//! clickfx Core - Foundational types for the clickfx effects
//!
//! This crate provides the types that all other clickfx crates depend on:
//! - `Vec2`, `Size` - Screen-space geometry in CSS pixels
//! - `Color` - RGBA colours parsed from CSS hex strings
//! - Error types and Result alias

mod error;
mod types;

pub use error::{FxError, Result};
pub use types::{Color, Size, Vec2};
