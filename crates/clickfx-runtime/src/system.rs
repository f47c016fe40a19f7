//! Runtime system trait

use crate::event::{HostEvent, PointerIndicator};
use clickfx_core::{Result, Size};

/// An effect that can be driven by the frame loop
///
/// Systems receive host events as they arrive and one `update` per animation
/// frame, always on the same logical thread. Every call carries the host's
/// millisecond timestamp.
pub trait RuntimeSystem {
    /// Called once with the initial surface size before any event or frame
    fn initialize(&mut self, surface: Size) -> Result<()>;

    /// Called for every pointer or resize notification
    fn handle_event(&mut self, event: &HostEvent, now_ms: f64);

    /// Called once per animation frame
    fn update(&mut self, now_ms: f64);

    /// Pointer state to mirror onto the page, if this system tracks one
    fn indicator(&self) -> Option<PointerIndicator> {
        None
    }

    /// Number of live visual elements, for diagnostics
    fn live_count(&self) -> usize;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
