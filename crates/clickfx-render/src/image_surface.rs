//! Software surface for offscreen render-to-image

use crate::surface::Surface;
use clickfx_core::{Color, FxError, Result, Size, Vec2};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Offscreen surface that rasterises circles into an RGBA image instead of a canvas
pub struct ImageSurface {
    image: RgbaImage,
    background: Color,
}

impl ImageSurface {
    /// Create a surface with the given dimensions and a transparent background
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let mut surface = Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            background,
        };
        surface.clear();
        surface
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Encode the current contents as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| FxError::RenderError(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "[render] wrote {}x{} image to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let src_a = color.a * coverage;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel(x, y).0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let channel = |src: f32, dst: u8| {
            let dst = dst as f32 / 255.0;
            let v = (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        let out = [
            channel(color.r, dst[0]),
            channel(color.g, dst[1]),
            channel(color.b, dst[2]),
            (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ];
        self.image.put_pixel(x, y, Rgba(out));
    }
}

impl Surface for ImageSurface {
    fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    fn resize(&mut self, size: Size) {
        let width = size.width.round().max(1.0) as u32;
        let height = size.height.round().max(1.0) as u32;
        self.image = RgbaImage::new(width, height);
        self.clear();
    }

    fn clear(&mut self) {
        let fill = Rgba(self.background.to_rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let min_x = (center.x - radius - 1.0).floor().max(0.0);
        let max_x = (center.x + radius + 1.0).ceil().min(w);
        let min_y = (center.y - radius - 1.0).floor().max(0.0);
        let max_y = (center.y + radius + 1.0).ceil().min(h);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for py in min_y as u32..max_y as u32 {
            for px in min_x as u32..max_x as u32 {
                // Sample at pixel centre; one-pixel linear falloff at the edge
                let dx = px as f32 + 0.5 - center.x;
                let dy = py as f32 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }
}
