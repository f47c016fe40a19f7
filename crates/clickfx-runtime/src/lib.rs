//! clickfx Runtime - Frame loop infrastructure
//!
//! Provides the host-independent building blocks every effect host needs:
//! - `FrameClock` — timestamp-driven frame timing
//! - `Timers` — one-shot millisecond timers polled by their owner
//! - `FrameScheduler` — injectable "request the next animation frame" capability
//! - `HostEvent` / `PointerIndicator` — input notifications and visual pointer state
//! - `RuntimeSystem` — trait for effects ticked by the frame loop

mod clock;
mod event;
mod scheduler;
mod system;
mod timer;

pub use clock::FrameClock;
pub use event::{HostEvent, PointerIndicator};
pub use scheduler::{run_every_frame, FrameCallback, FrameScheduler, ManualScheduler};
pub use system::RuntimeSystem;
pub use timer::{TimerId, Timers};
