//! Layer-switching controller.
//!
//! `transition` is the whole state machine: it takes the current layer and a
//! raw label and returns the next layer plus at most one event. The
//! `LayerController` wrapper owns the layer value for callers that want it
//! held for them.

use crate::key_event::{KeyAction, KeyEvent};
use crate::layer::Layer;
use crate::layout::LayerLayout;
use tracing::{debug, trace};

/// Result of pressing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Layer after the press
    pub layer: Layer,
    /// Event to forward to the host, if any
    pub event: Option<KeyEvent>,
}

/// Apply one key press to a layer.
///
/// Layer keys switch layers without emitting anything. Delete and return emit
/// their control token and keep the layer. Any other label is inserted
/// literally, and an uppercase layer drops back to lowercase afterwards.
pub fn transition(layer: Layer, label: &str) -> Transition {
    let action = KeyAction::from_label(label);
    let next = match action {
        KeyAction::ToggleShift => layer.shifted(),
        KeyAction::ShowNumeric => Layer::Numeric,
        KeyAction::ShowAlphabetic => Layer::Lowercase,
        KeyAction::Delete | KeyAction::Return => layer,
        KeyAction::Insert(_) if layer == Layer::Uppercase => Layer::Lowercase,
        KeyAction::Insert(_) => layer,
    };
    Transition {
        layer: next,
        event: action.event(),
    }
}

/// Holds the current layer and applies transitions to it.
#[derive(Debug, Clone, Default)]
pub struct LayerController {
    layer: Layer,
}

impl LayerController {
    /// Create a controller starting on the given layer.
    pub fn new(layer: Layer) -> Self {
        Self { layer }
    }

    /// Current layer.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Force a layer, e.g. when the host resets the keyboard.
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    /// Rows for the current layer.
    pub fn layout(&self) -> LayerLayout {
        LayerLayout::for_layer(self.layer)
    }

    /// Press a key and return the event to emit.
    pub fn press(&mut self, label: &str) -> Option<KeyEvent> {
        let Transition { layer, event } = transition(self.layer, label);
        if layer != self.layer {
            debug!(from = %self.layer, to = %layer, label, "layer change");
            self.layer = layer;
        }
        if let Some(event) = &event {
            trace!(%event, label, "key event");
        }
        event
    }
}
