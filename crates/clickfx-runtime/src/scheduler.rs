//! Injectable animation-frame scheduling

use clickfx_core::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback run on the next animation frame with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// The host's "call me before the next repaint" primitive.
///
/// Browsers implement it with `requestAnimationFrame`; tests and the CLI use
/// [`ManualScheduler`] and step frames explicitly.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()>;
}

/// Scheduler whose frames only run when [`ManualScheduler::run_frame`] is called
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Vec<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback requested before this call. Callbacks requested while
    /// running are deferred to the next frame. Returns how many ran.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let callbacks = std::mem::take(&mut *self.queue.borrow_mut());
        let count = callbacks.len();
        for callback in callbacks {
            callback(timestamp_ms);
        }
        count
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        self.queue.borrow_mut().push(callback);
        Ok(())
    }
}

/// Run `tick` on every frame until it returns `false`.
///
/// Each callback re-requests the next frame from inside itself, the same way a
/// browser animation loop does.
pub fn run_every_frame<S>(scheduler: Rc<S>, tick: impl FnMut(f64) -> bool + 'static) -> Result<()>
where
    S: FrameScheduler + ?Sized + 'static,
{
    let tick: Rc<RefCell<dyn FnMut(f64) -> bool>> = Rc::new(RefCell::new(tick));
    request_next(scheduler, tick)
}

fn request_next<S>(scheduler: Rc<S>, tick: Rc<RefCell<dyn FnMut(f64) -> bool>>) -> Result<()>
where
    S: FrameScheduler + ?Sized + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |timestamp_ms| {
        let keep_running = {
            let mut f = tick.borrow_mut();
            (&mut *f)(timestamp_ms)
        };
        if !keep_running {
            log::debug!("[runtime] frame loop stopped at {timestamp_ms:.1}ms");
            return;
        }
        if let Err(e) = request_next(next, tick) {
            log::error!("[runtime] failed to request animation frame: {e}");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_manual_scheduler_defers_rerequests() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hits = Rc::new(Cell::new(0));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_hits = Rc::clone(&hits);
        scheduler
            .request_frame(Box::new(move |_| {
                inner_hits.set(inner_hits.get() + 1);
                let again = Rc::clone(&inner_hits);
                inner_scheduler
                    .request_frame(Box::new(move |_| again.set(again.get() + 10)))
                    .unwrap();
            }))
            .unwrap();

        assert_eq!(scheduler.run_frame(0.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_frame(16.0), 1);
        assert_eq!(hits.get(), 11);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_run_every_frame_until_stopped() {
        let scheduler = Rc::new(ManualScheduler::new());
        let stamps = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&stamps);
        run_every_frame(Rc::clone(&scheduler), move |ts| {
            seen.borrow_mut().push(ts);
            seen.borrow().len() < 3
        })
        .unwrap();

        for frame in 0..5 {
            scheduler.run_frame(frame as f64 * 16.0);
        }

        assert_eq!(*stamps.borrow(), vec![0.0, 16.0, 32.0]);
        assert_eq!(scheduler.pending(), 0);
    }
}
