//! Keyboard driver: session state, repeat timers and the outbound sink.
//!
//! `Keyboard` is what the host talks to. The view calls `press` and `release`
//! with raw labels, the host's timer callback calls `fire`, and after each of
//! those the view reads `context()` to redraw. Events go to the sink as they
//! happen.

use crate::config::Config;
use crate::context::KeyboardContext;
use crate::key_event::{KeyAction, KeyEvent};
use crate::layer::Layer;
use crate::proxy::KeySink;
use crate::repeat::KeyRepeater;
use crate::scheduler::{DeadlineScheduler, Scheduler, TimerHandle};
use crate::session::{KeyboardSession, PressState};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, trace};

/// Software keyboard bound to a scheduler and an event sink.
///
/// Generic over S (the timer source) and K (where events go).
pub struct Keyboard<S: Scheduler, K: KeySink> {
    /// Layer and held keys
    session: KeyboardSession,

    /// Timer source for key repeat
    scheduler: S,

    /// Receiver of emitted events
    sink: K,

    /// View-facing snapshot, refreshed after every input
    context: KeyboardContext,

    repeat_delay: Duration,
    repeat_interval: Duration,
}

impl<S: Scheduler, K: KeySink> Keyboard<S, K> {
    /// Create a keyboard with the given configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: &Config, scheduler: S, sink: K) -> Result<Self> {
        config.validate().context("invalid keyboard configuration")?;
        let session = KeyboardSession::new(config.initial_layer);
        let mut context = KeyboardContext::new();
        session.sync_to_context(&mut context);
        Ok(Self {
            session,
            scheduler,
            sink,
            context,
            repeat_delay: config.repeat_delay(),
            repeat_interval: config.repeat_interval(),
        })
    }

    /// Current layer.
    pub fn layer(&self) -> Layer {
        self.session.layer()
    }

    /// Get the view-facing snapshot.
    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    /// Get the session.
    pub fn session(&self) -> &KeyboardSession {
        &self.session
    }

    /// Get the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Get the sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Key press-down.
    ///
    /// Applies the layer transition and emits the key's event right away.
    /// Delete additionally arms its repeat timer. Pressing a key that is
    /// already held restarts it: the old repeat sequence is cancelled first.
    pub fn press(&mut self, label: &str) {
        if let Some(previous) = self.session.end_press(label) {
            debug!(label, "key pressed again while held");
            self.stop(previous);
        }

        let repeats = KeyAction::from_label(label).repeats();
        let event = self.session.controller_mut().press(label);
        if let Some(event) = event {
            self.emit(event);
        }

        let state = if repeats {
            let mut repeater = KeyRepeater::new(self.repeat_delay, self.repeat_interval);
            repeater.start(&mut self.scheduler);
            PressState::repeating(repeater)
        } else {
            PressState::plain()
        };
        self.session.begin_press(label, state);
        self.sync();
    }

    /// Key release. Stops any repeat; releasing a key that is not held does
    /// nothing. Returns true if the key was held.
    pub fn release(&mut self, label: &str) -> bool {
        match self.session.end_press(label) {
            Some(state) => {
                self.stop(state);
                self.sync();
                true
            }
            None => false,
        }
    }

    /// Press and immediately release.
    pub fn tap(&mut self, label: &str) {
        self.press(label);
        self.release(label);
    }

    /// Timer callback from the host event loop.
    ///
    /// Emits the held key's event again if `handle` is that key's running
    /// repeat timer. Handles that were cancelled or replaced are ignored.
    /// Returns true if an event was emitted.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        let Some(label) = self.session.repeat_owner(handle) else {
            trace!(timer = handle.id(), "stale timer ignored");
            return false;
        };
        // Repeats re-emit the key's event without another layer transition.
        let event = KeyAction::from_label(label).event();
        match event {
            Some(event) => {
                self.emit(event);
                true
            }
            None => false,
        }
    }

    /// Release every held key, cancel every timer and go back to the
    /// configured initial layer.
    pub fn reset(&mut self) {
        for (_, state) in self.session.drain_presses() {
            self.stop(state);
        }
        self.session.clear();
        self.sync();
        debug!(layer = %self.session.initial_layer(), "keyboard reset");
    }

    fn stop(&mut self, state: PressState) {
        if let Some(mut repeater) = state.repeater {
            repeater.stop(&mut self.scheduler);
        }
    }

    fn emit(&mut self, event: KeyEvent) {
        trace!(%event, "emit");
        self.sink.send(event);
    }

    fn sync(&mut self) {
        self.session.sync_to_context(&mut self.context);
    }
}

impl<K: KeySink> Keyboard<DeadlineScheduler, K> {
    /// Create a keyboard driven by a polling `DeadlineScheduler`.
    pub fn with_sink(config: &Config, sink: K) -> Result<Self> {
        Self::new(config, DeadlineScheduler::new(), sink)
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Advance the clock to `now`, firing every due timer in order.
    /// Each timer fires at most once per call.
    /// Returns the number of events emitted.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut emitted = 0;
        while let Some(handle) = self.scheduler.pop_due(now) {
            if self.fire(handle) {
                emitted += 1;
            }
        }
        emitted
    }

    /// Advance the clock by `elapsed`.
    pub fn advance_by(&mut self, elapsed: Duration) -> usize {
        let now = self.scheduler.now() + elapsed;
        self.advance_to(now)
    }

    /// Key press-down at host time `now`.
    ///
    /// The clock only knows the last time it was polled, so a press after an
    /// idle stretch must carry its own timestamp: timers due by `now` fire
    /// first, then the key's repeat is armed relative to `now`.
    pub fn press_at(&mut self, now: Duration, label: &str) {
        self.advance_to(now);
        self.press(label);
    }

    /// Key release at host time `now`. Timers due by `now` fire first.
    pub fn release_at(&mut self, now: Duration, label: &str) -> bool {
        self.advance_to(now);
        self.release(label)
    }

    /// Press and release at host time `now`.
    pub fn tap_at(&mut self, now: Duration, label: &str) {
        self.advance_to(now);
        self.tap(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::EventLog;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn keyboard() -> Keyboard<DeadlineScheduler, EventLog> {
        Keyboard::with_sink(&Config::default(), EventLog::new()).unwrap()
    }

    #[test]
    fn test_delete_emits_immediately() {
        let mut kb = keyboard();
        kb.press("delete");
        assert_eq!(kb.sink().events(), &[KeyEvent::Backspace]);
        assert!(kb.context().is_pressed("delete"));
    }

    #[test]
    fn test_short_delete_tap_emits_once() {
        let mut kb = keyboard();
        kb.press("delete");
        kb.advance_to(ms(399));
        kb.release("delete");
        kb.advance_to(ms(2000));
        assert_eq!(kb.sink().backspaces(), 1);
        assert!(kb.scheduler().is_empty());
    }

    #[test]
    fn test_hold_delete_repeats_until_release() {
        let mut kb = keyboard();
        kb.press("delete");
        let repeats: usize = (1..10).map(|tick| kb.advance_to(ms(tick * 100))).sum();
        assert_eq!(repeats, 6); // 400..=900
        kb.release("delete");
        assert_eq!(kb.advance_to(ms(3000)), 0);
        assert_eq!(kb.sink().backspaces(), 7);
    }

    #[test]
    fn test_late_poll_emits_one_repeat() {
        let mut kb = keyboard();
        kb.press("delete");
        assert_eq!(kb.advance_to(ms(2400)), 1);
        assert_eq!(kb.advance_to(ms(2450)), 0);
        assert_eq!(kb.advance_to(ms(2500)), 1);
        assert_eq!(kb.sink().backspaces(), 3);
    }

    #[test]
    fn test_press_after_idle_gap_starts_fresh_delay() {
        let mut kb = keyboard();
        kb.press("delete");
        kb.advance_to(ms(100));
        kb.release("delete");

        // Nothing polled the clock while the user was idle.
        kb.press_at(ms(5000), "delete");
        assert_eq!(kb.now(), ms(5000));
        assert_eq!(kb.advance_to(ms(5050)), 0);
        assert!(kb.release_at(ms(5050), "delete"));
        assert_eq!(kb.sink().backspaces(), 2);
        assert!(kb.scheduler().is_empty());
    }

    #[test]
    fn test_timestamped_hold() {
        let mut kb = keyboard();
        kb.tap_at(ms(1000), "a");
        kb.press_at(ms(2000), "delete");
        assert_eq!(kb.advance_to(ms(2400)), 1);
        assert!(kb.release_at(ms(2450), "delete"));
        assert_eq!(
            kb.sink().events(),
            &[KeyEvent::insert("a"), KeyEvent::Backspace, KeyEvent::Backspace]
        );
    }

    #[test]
    fn test_repress_does_not_double_stream() {
        let mut kb = keyboard();
        kb.press("delete");
        kb.advance_to(ms(450)); // one repeat at 400
        kb.press("delete"); // restarts: next repeat at 850
        assert_eq!(kb.scheduler().len(), 1);
        assert_eq!(kb.advance_to(ms(849)), 0);
        assert_eq!(kb.advance_to(ms(850)), 1);
        assert_eq!(kb.advance_to(ms(950)), 1);
        assert_eq!(kb.sink().backspaces(), 5);
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut kb = keyboard();
        kb.press("delete");
        let state = kb.session().press_state("delete").unwrap();
        let handle = state.repeater.as_ref().and_then(|r| r.active()).unwrap();
        kb.release("delete");
        assert!(!kb.fire(handle));
        assert_eq!(kb.sink().backspaces(), 1);
    }

    #[test]
    fn test_letters_do_not_repeat() {
        let mut kb = keyboard();
        kb.press("a");
        kb.advance_to(ms(5000));
        assert_eq!(kb.sink().events(), &[KeyEvent::insert("a")]);
        assert!(kb.scheduler().is_empty());
    }

    #[test]
    fn test_release_unpressed_is_noop() {
        let mut kb = keyboard();
        assert!(!kb.release("q"));
        assert!(kb.sink().is_empty());
    }

    #[test]
    fn test_shift_scenario_updates_context() {
        let mut kb = keyboard();
        kb.tap("shift");
        assert_eq!(kb.context().layer, Layer::Uppercase);
        assert_eq!(kb.context().rows[0][0], "Q");
        kb.tap("A");
        assert_eq!(kb.context().layer, Layer::Lowercase);
        assert_eq!(kb.sink().events(), &[KeyEvent::insert("A")]);
    }

    #[test]
    fn test_reset_cancels_timers() {
        let mut kb = keyboard();
        kb.tap("123");
        kb.press("delete");
        kb.reset();
        assert_eq!(kb.layer(), Layer::Lowercase);
        assert!(kb.context().pressed.is_empty());
        assert!(kb.scheduler().is_empty());
        assert_eq!(kb.advance_to(ms(2000)), 0);
    }

    #[test]
    fn test_custom_timing() {
        let config = Config {
            repeat_delay_ms: 200,
            repeat_interval_ms: 50,
            ..Config::default()
        };
        let mut kb = Keyboard::with_sink(&config, EventLog::new()).unwrap();
        kb.press("delete");
        assert_eq!(kb.advance_by(ms(199)), 0);
        assert_eq!(kb.advance_by(ms(1)), 1); // 200
        assert_eq!(kb.advance_by(ms(50)), 1); // 250
        assert_eq!(kb.advance_by(ms(50)), 1); // 300
    }

    #[test]
    fn test_zero_interval_config_rejected() {
        let config = Config {
            repeat_interval_ms: 0,
            ..Config::default()
        };
        let err = Keyboard::with_sink(&config, EventLog::new()).err().unwrap();
        assert!(format!("{:#}", err).contains("repeat_interval_ms"));
    }
}
