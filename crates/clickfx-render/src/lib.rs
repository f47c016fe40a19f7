//! clickfx Render - 2D drawing surfaces
//!
//! Effects draw filled circles onto a `Surface`. The browser host provides a
//! canvas-backed surface; this crate provides the host-independent ones:
//! - `ImageSurface` — software rasteriser over an RGBA image, saved as PNG
//! - `RecordingSurface` — records draw calls for inspection in tests

mod image_surface;
mod surface;

pub use image_surface::ImageSurface;
pub use surface::{DrawCommand, Drawable, RecordingSurface, Surface};
