//! Cancellable scheduled callbacks.
//!
//! The keyboard never owns a thread or a clock. It asks a `Scheduler` for a
//! timer and gets back a handle; when the host's event loop sees the timer
//! fire, it hands the handle back to the keyboard.
//!
//! `DeadlineScheduler` is the polling implementation: the host tells it what
//! time it is and it reports which timers are due. Time is a `Duration` since
//! an arbitrary origin, so tests can drive it without sleeping.

use std::collections::HashMap;
use std::time::Duration;
use tracing::trace;

/// Opaque id of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a host timer id. Scheduler implementations must keep ids unique
    /// among live timers.
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, for hosts that key their own timer tables by integer.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of delayed, optionally repeating timers.
pub trait Scheduler {
    /// Schedule a timer that fires once after `delay`, then every `interval`.
    /// A zero interval makes it one-shot.
    fn schedule(&mut self, delay: Duration, interval: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already finished handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Duration,
    interval: Duration,
}

/// Deadline-driven scheduler with a caller-supplied clock.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    now: Duration,
    next_id: u64,
    timers: HashMap<TimerHandle, Pending>,
}

impl DeadlineScheduler {
    /// Create a scheduler whose clock starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on this scheduler's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Check if no timers are live.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Check if a handle is still live.
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|p| p.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// The clock moves to `now`. A repeating timer is re-armed one interval
    /// after `now`, not after its missed deadline, so a late poll fires each
    /// overdue timer once instead of replaying every interval it slept
    /// through. Returns `None` once nothing is due. The clock never runs
    /// backwards.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerHandle> {
        self.now = self.now.max(now);
        let now = self.now;
        let (handle, pending) = self
            .timers
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(handle, p)| (p.deadline, **handle))
            .map(|(handle, p)| (*handle, *p))?;

        if pending.interval.is_zero() {
            self.timers.remove(&handle);
        } else if let Some(p) = self.timers.get_mut(&handle) {
            p.deadline = now + pending.interval;
        }
        trace!(
            timer = handle.0,
            due_ms = pending.deadline.as_millis() as u64,
            at_ms = now.as_millis() as u64,
            "timer fired"
        );
        Some(handle)
    }

    /// Advance the clock to `now`, returning every fire in order.
    ///
    /// Each due timer fires at most once per call.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        while let Some(handle) = self.pop_due(now) {
            fired.push(handle);
        }
        fired
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            Pending {
                deadline: self.now + delay,
                interval,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}
