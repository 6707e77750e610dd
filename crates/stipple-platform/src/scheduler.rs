//! Frame scheduling as an explicit request/cancel contract.
//!
//! Engines that need a per-frame callback ask the host through this trait
//! instead of owning their own loop. The host fires at most one callback per
//! request; a continuously animating engine re-requests from inside its tick
//! handler. This keeps the loops cancellable and lets tests drive frames by
//! hand with [`ManualScheduler`].

use std::sync::{Arc, Mutex};

pub trait FrameScheduler: Send {
    /// Ask the host for one callback on its next frame. Requests do not
    /// stack; a second request before the tick fires is absorbed.
    fn request_tick(&mut self);

    /// Drop the pending tick request, if any.
    fn cancel_tick(&mut self);

    /// Whether a tick is currently pending.
    fn tick_pending(&self) -> bool;
}

#[derive(Debug, Default)]
struct ManualState {
    pending: bool,
    requests: u64,
    cancellations: u64,
}

/// Hand-cranked scheduler for tests and headless hosts.
///
/// Clones share state, so a test can keep one handle while the engine owns
/// another, then [`fire`](ManualScheduler::fire) pending ticks itself.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending tick. Returns `false` when nothing was scheduled.
    pub fn fire(&self) -> bool {
        let mut state = self.lock();
        let was_pending = state.pending;
        state.pending = false;
        was_pending
    }

    /// Total `request_tick` calls observed.
    pub fn requests(&self) -> u64 {
        self.lock().requests
    }

    /// Total `cancel_tick` calls observed.
    pub fn cancellations(&self) -> u64 {
        self.lock().cancellations
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        let mut state = self.lock();
        state.requests += 1;
        state.pending = true;
    }

    fn cancel_tick(&mut self) {
        let mut state = self.lock();
        state.cancellations += 1;
        state.pending = false;
    }

    fn tick_pending(&self) -> bool {
        self.lock().pending
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameScheduler, ManualScheduler};

    #[test]
    fn requests_coalesce_until_fired() {
        let handle = ManualScheduler::new();
        let mut sched = handle.clone();
        sched.request_tick();
        sched.request_tick();
        assert!(handle.tick_pending());
        assert_eq!(handle.requests(), 2);
        assert!(handle.fire());
        assert!(!handle.tick_pending());
        assert!(!handle.fire());
    }

    #[test]
    fn cancel_drops_pending_tick() {
        let handle = ManualScheduler::new();
        let mut sched = handle.clone();
        sched.request_tick();
        sched.cancel_tick();
        assert!(!handle.tick_pending());
        assert!(!handle.fire());
        assert_eq!(handle.cancellations(), 1);
    }
}
