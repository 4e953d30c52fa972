//! Keyboard session state.
//!
//! `KeyboardSession` holds everything that persists between key events: the
//! current layer and the press state of each key that is currently held. It
//! has no timers or host callbacks of its own; `Keyboard` drives it.

use crate::context::KeyboardContext;
use crate::controller::LayerController;
use crate::layer::Layer;
use crate::layout::LayerLayout;
use crate::repeat::KeyRepeater;
use crate::scheduler::TimerHandle;
use std::collections::HashMap;

/// Transient state of one held key. Exists only between press and release.
#[derive(Debug, Clone, Default)]
pub struct PressState {
    /// Repeat sequence, for keys that repeat while held
    pub repeater: Option<KeyRepeater>,
}

impl PressState {
    /// State for a key that does not repeat.
    pub fn plain() -> Self {
        Self { repeater: None }
    }

    /// State for a key with a repeat sequence.
    pub fn repeating(repeater: KeyRepeater) -> Self {
        Self {
            repeater: Some(repeater),
        }
    }
}

/// Layer plus held keys.
#[derive(Debug, Clone)]
pub struct KeyboardSession {
    controller: LayerController,
    initial_layer: Layer,
    pressed: HashMap<String, PressState>,
}

impl KeyboardSession {
    /// Create a session starting on `initial_layer`.
    pub fn new(initial_layer: Layer) -> Self {
        Self {
            controller: LayerController::new(initial_layer),
            initial_layer,
            pressed: HashMap::new(),
        }
    }

    /// Get a mutable reference to the layer controller.
    pub fn controller_mut(&mut self) -> &mut LayerController {
        &mut self.controller
    }

    /// Current layer.
    pub fn layer(&self) -> Layer {
        self.controller.layer()
    }

    /// Rows for the current layer.
    pub fn layout(&self) -> LayerLayout {
        self.controller.layout()
    }

    /// Layer the session starts on and resets to.
    pub fn initial_layer(&self) -> Layer {
        self.initial_layer
    }

    /// Check if a key is currently held.
    pub fn is_pressed(&self, label: &str) -> bool {
        self.pressed.contains_key(label)
    }

    /// Press state of a held key.
    pub fn press_state(&self, label: &str) -> Option<&PressState> {
        self.pressed.get(label)
    }

    /// Record a key as held, returning the state it replaces (if it was
    /// already held).
    pub fn begin_press(&mut self, label: &str, state: PressState) -> Option<PressState> {
        self.pressed.insert(label.to_string(), state)
    }

    /// Forget a held key, returning its state.
    pub fn end_press(&mut self, label: &str) -> Option<PressState> {
        self.pressed.remove(label)
    }

    /// Remove every held key, returning their states.
    pub fn drain_presses(&mut self) -> Vec<(String, PressState)> {
        self.pressed.drain().collect()
    }

    /// Label of the held key whose repeat sequence owns `handle`.
    pub fn repeat_owner(&self, handle: TimerHandle) -> Option<&str> {
        self.pressed
            .iter()
            .find(|(_, state)| state.repeater.as_ref().is_some_and(|r| r.owns(handle)))
            .map(|(label, _)| label.as_str())
    }

    /// Labels of held keys, sorted.
    pub fn pressed_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.pressed.keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Back to the initial layer with nothing held.
    ///
    /// Callers with running repeat timers must cancel them first
    /// (see `drain_presses`).
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.controller.set_layer(self.initial_layer);
    }

    /// Write the view-facing state into a context.
    pub fn sync_to_context(&self, context: &mut KeyboardContext) {
        let layout = self.layout();
        context.layer = layout.layer;
        context.rows = layout.rows.iter().map(|row| row.to_vec()).collect();
        context.bottom_bar = layout.bottom_bar.to_vec();
        context.pressed = self.pressed_labels();
    }
}

impl Default for KeyboardSession {
    fn default() -> Self {
        Self::new(Layer::default())
    }
}
