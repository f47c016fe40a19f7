//! One-shot timers on the host's millisecond clock

/// Handle to a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A set of one-shot timers.
///
/// Nothing fires on its own: the owner passes the current time to
/// [`Timers::fire_due`] from its event handlers and frame callback, which keeps
/// all state changes on the owner's single logical thread.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: Vec<(TimerId, f64)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer that becomes due `delay_ms` after `now_ms`
    pub fn start(&mut self, now_ms: f64, delay_ms: f64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, now_ms + delay_ms.max(0.0)));
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }

    /// Remove and return every timer due at `now_ms`, earliest deadline first
    pub fn fire_due(&mut self, now_ms: f64) -> Vec<TimerId> {
        let mut due: Vec<(TimerId, f64)> = Vec::new();
        self.pending.retain(|&(id, deadline)| {
            if deadline <= now_ms {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
