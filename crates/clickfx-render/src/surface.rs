//! Drawing surface trait and a recording implementation

use clickfx_core::{Color, Size, Vec2};

/// A 2D target that effects are redrawn onto every frame.
///
/// There is no double buffering: a frame is `clear` followed by any number of
/// `fill_circle` calls.
pub trait Surface {
    /// Current dimensions in CSS pixels
    fn size(&self) -> Size;

    /// Resize the backing store. Contents are discarded.
    fn resize(&mut self, size: Size);

    /// Erase the whole surface
    fn clear(&mut self);

    /// Fill a circle. Non-positive radii draw nothing.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Something that can paint itself onto a surface
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// One recorded surface operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Surface that records every call instead of producing pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    /// Drop earlier commands on every `clear`
    last_frame_only: bool,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            last_frame_only: false,
        }
    }

    /// Keep only the commands issued since the most recent `clear`, so long
    /// runs do not grow without bound
    pub fn last_frame_only(size: Size) -> Self {
        Self {
            last_frame_only: true,
            ..Self::new(size)
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Circles drawn since the last `clear`
    pub fn circles_since_clear(&self) -> usize {
        self.commands
            .iter()
            .rev()
            .take_while(|c| **c != DrawCommand::Clear)
            .count()
    }

    /// Drain recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn clear(&mut self) {
        if self.last_frame_only {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.clear();
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::WHITE);
        surface.fill_circle(Vec2::new(4.0, 5.0), 0.0, Color::WHITE);

        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.circles_since_clear(), 1);

        surface.clear();
        assert_eq!(surface.circles_since_clear(), 0);
        assert_eq!(surface.take().len(), 3);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn last_frame_only_drops_history() {
        let mut surface = RecordingSurface::last_frame_only(Size::new(10.0, 10.0));
        surface.clear();
        surface.fill_circle(Vec2::new(1.0, 1.0), 1.0, Color::WHITE);
        surface.fill_circle(Vec2::new(2.0, 2.0), 1.0, Color::WHITE);
        surface.clear();
        surface.fill_circle(Vec2::new(3.0, 3.0), 1.0, Color::WHITE);

        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.circles_since_clear(), 1);
    }
}
