//! Host input notifications and the pointer indicator they drive

use clickfx_core::{Size, Vec2};
use serde::Serialize;

/// An input notification forwarded from the host to every effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    PointerDown { position: Vec2 },
    PointerUp { position: Vec2 },
    PointerMove { position: Vec2 },
    Resize { size: Size },
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::PointerDown { .. } => "pointer_down",
            HostEvent::PointerUp { .. } => "pointer_up",
            HostEvent::PointerMove { .. } => "pointer_move",
            HostEvent::Resize { .. } => "resize",
        }
    }
}

/// Visual pointer state a host mirrors onto page elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PointerIndicator {
    /// A pointer is currently held down
    pub pressed: bool,
    /// The hold passed the long-press threshold and has not been released
    pub long_press: bool,
    /// Last known pointer position
    pub cursor: Vec2,
}
