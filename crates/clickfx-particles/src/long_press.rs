//! Long-press state: pressed flag, threshold timer, and the charge multiplier

use clickfx_runtime::TimerId;

#[derive(Debug, Default)]
pub struct LongPress {
    /// Threshold timer started on pointer-down
    timer: Option<TimerId>,
    pressed: bool,
    /// Threshold reached and not yet released
    active: bool,
    multiplier: f32,
}

impl LongPress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down; returns the previous timer if one was still pending
    pub fn press(&mut self, timer: TimerId) -> Option<TimerId> {
        self.pressed = true;
        self.timer.replace(timer)
    }

    /// A timer fired. Returns true if it was this hold's threshold timer.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.active = true;
        true
    }

    /// Pointer went up. Returns the pending timer to cancel and, if the
    /// threshold had been reached, the multiplier at release.
    pub fn release(&mut self) -> (Option<TimerId>, Option<f32>) {
        self.pressed = false;
        let charged = if self.active {
            self.active = false;
            Some(self.multiplier)
        } else {
            None
        };
        (self.timer.take(), charged)
    }

    /// Per-frame ramp while active, decay floored at zero otherwise
    pub fn tick(&mut self, ramp: f32, decay: f32) {
        if self.active {
            self.multiplier += ramp;
        } else {
            self.multiplier = (self.multiplier - decay).max(0.0);
        }
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }
}
