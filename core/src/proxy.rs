//! Outbound side: where key events go.
//!
//! The keyboard emits `KeyEvent`s into a `KeySink`. Hosts that expose a text
//! document proxy (insert text / delete backward) can wrap it in a
//! `ProxySink`; simple callers can pass a closure or record into an `EventLog`.

use crate::key_event::KeyEvent;

/// Receiver of key events.
pub trait KeySink {
    /// Deliver one event.
    fn send(&mut self, event: KeyEvent);
}

impl<F: FnMut(KeyEvent)> KeySink for F {
    fn send(&mut self, event: KeyEvent) {
        self(event)
    }
}

/// Sink that records every event it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<KeyEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count recorded backspaces.
    pub fn backspaces(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, KeyEvent::Backspace))
            .count()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.events)
    }
}

impl KeySink for EventLog {
    fn send(&mut self, event: KeyEvent) {
        self.events.push(event);
    }
}

/// The host's handle on the document being edited.
pub trait TextDocumentProxy {
    /// Insert text at the insertion point.
    fn insert_text(&mut self, text: &str);

    /// Delete one character before the insertion point.
    fn delete_backward(&mut self);
}

/// Adapts a `TextDocumentProxy` into a `KeySink`.
#[derive(Debug, Default)]
pub struct ProxySink<P> {
    proxy: P,
}

impl<P: TextDocumentProxy> ProxySink<P> {
    /// Wrap a proxy.
    pub fn new(proxy: P) -> Self {
        Self { proxy }
    }

    /// Get the wrapped proxy.
    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    /// Get a mutable reference to the wrapped proxy.
    pub fn proxy_mut(&mut self) -> &mut P {
        &mut self.proxy
    }

    /// Unwrap the proxy.
    pub fn into_inner(self) -> P {
        self.proxy
    }
}

impl<P: TextDocumentProxy> KeySink for ProxySink<P> {
    fn send(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Insert(text) => self.proxy.insert_text(&text),
            KeyEvent::Backspace => self.proxy.delete_backward(),
            KeyEvent::Newline => self.proxy.insert_text("\n"),
        }
    }
}
