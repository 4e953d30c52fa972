//! Long-press repeat for a single key.
//!
//! The first event is emitted by the press itself. The repeater only owns the
//! timer that produces the follow-up events: it starts after `delay` and then
//! fires every `interval` until the key is released.

use crate::scheduler::{Scheduler, TimerHandle};
use std::time::Duration;
use tracing::debug;

/// Repeat timing and the currently running sequence for one key.
#[derive(Debug, Clone)]
pub struct KeyRepeater {
    delay: Duration,
    interval: Duration,
    active: Option<TimerHandle>,
}

impl KeyRepeater {
    /// Create an idle repeater.
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            active: None,
        }
    }

    /// Start a repeat sequence, cancelling any sequence already running.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) -> TimerHandle {
        self.stop(scheduler);
        let handle = scheduler.schedule(self.delay, self.interval);
        debug!(timer = handle.id(), delay_ms = self.delay.as_millis() as u64, "repeat armed");
        self.active = Some(handle);
        handle
    }

    /// Stop the running sequence, if any.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.active.take() {
            scheduler.cancel(handle);
            debug!(timer = handle.id(), "repeat stopped");
        }
    }

    /// Check if a fired handle belongs to the running sequence.
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.active == Some(handle)
    }

    /// Handle of the running sequence.
    pub fn active(&self) -> Option<TimerHandle> {
        self.active
    }

    /// Check if a sequence is running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::DeadlineScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_start_arms_timer() {
        let mut sched = DeadlineScheduler::new();
        let mut repeater = KeyRepeater::new(ms(400), ms(100));
        let h = repeater.start(&mut sched);
        assert!(repeater.owns(h));
        assert_eq!(sched.next_deadline(), Some(ms(400)));
    }

    #[test]
    fn test_restart_cancels_previous() {
        let mut sched = DeadlineScheduler::new();
        let mut repeater = KeyRepeater::new(ms(400), ms(100));
        let first = repeater.start(&mut sched);
        let second = repeater.start(&mut sched);
        assert!(!repeater.owns(first));
        assert!(!sched.is_active(first));
        assert!(sched.is_active(second));
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sched = DeadlineScheduler::new();
        let mut repeater = KeyRepeater::new(ms(400), ms(100));
        repeater.stop(&mut sched);
        repeater.start(&mut sched);
        repeater.stop(&mut sched);
        repeater.stop(&mut sched);
        assert!(!repeater.is_running());
        assert!(sched.is_empty());
    }
}
