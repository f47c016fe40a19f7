//! Frame clock driven by host timestamps

/// Tracks frame timing from the millisecond timestamps the host passes to
/// each animation-frame callback.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the latest frame in milliseconds
    pub now_ms: f64,
    /// Time since the previous frame in milliseconds
    pub delta_ms: f64,
    /// Frames ticked so far
    pub frame_count: u64,
    first_tick: bool,
}

/// Largest delta reported after a stall (e.g. a background tab)
const MAX_DELTA_MS: f64 = 250.0;

impl FrameClock {
    pub fn new() -> Self {
        Self {
            first_tick: true,
            ..Self::default()
        }
    }

    /// Advance to the frame stamped `timestamp_ms`. Call once per frame.
    pub fn tick(&mut self, timestamp_ms: f64) {
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.now_ms = timestamp_ms;
            self.delta_ms = 0.0;
            return;
        }

        self.delta_ms = (timestamp_ms - self.now_ms).clamp(0.0, MAX_DELTA_MS);
        self.now_ms = timestamp_ms;
    }

    /// Frames per second implied by the latest delta
    pub fn fps(&self) -> f64 {
        if self.delta_ms > 0.0 {
            1000.0 / self.delta_ms
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(1234.0);
        assert_eq!(clock.delta_ms, 0.0);
        assert_eq!(clock.now_ms, 1234.0);
        assert_eq!(clock.frame_count, 1);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_delta_and_fps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(20.0);
        assert!((clock.delta_ms - 20.0).abs() < 1e-10);
        assert!((clock.fps() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_delta_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(10_000.0);
        assert_eq!(clock.delta_ms, MAX_DELTA_MS);

        // Timestamps never run backwards into a negative delta
        clock.tick(5_000.0);
        assert_eq!(clock.delta_ms, 0.0);
    }
}
