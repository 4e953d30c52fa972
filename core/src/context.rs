//! View-facing keyboard state.
//!
//! The rendering layer reads these fields after every press, release or timer
//! fire to decide what to draw. Plain data, no callbacks.

use crate::layer::Layer;

/// Snapshot of what the keyboard should show.
///
/// # Fields
///
/// - `layer`: active layer
/// - `rows`: the three main rows of that layer
/// - `bottom_bar`: mode switch, emoji, space, return
/// - `pressed`: labels currently held down (sorted), for pressed styling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardContext {
    /// Active layer
    pub layer: Layer,

    /// Main key rows, top to bottom
    pub rows: Vec<Vec<&'static str>>,

    /// Bottom-bar labels
    pub bottom_bar: Vec<&'static str>,

    /// Held labels, sorted
    pub pressed: Vec<String>,
}

impl KeyboardContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a label is drawn in the pressed state.
    pub fn is_pressed(&self, label: &str) -> bool {
        self.pressed.iter().any(|l| l == label)
    }

    /// Render the rows as text, one line per row. Used by the simulator.
    pub fn render_rows(&self) -> String {
        self.rows
            .iter()
            .chain(std::iter::once(&self.bottom_bar))
            .map(|row| {
                row.iter()
                    .map(|label| {
                        if self.is_pressed(label) {
                            format!("[{}]", label)
                        } else {
                            label.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_pressed_keys() {
        let ctx = KeyboardContext {
            layer: Layer::Lowercase,
            rows: vec![vec!["q", "w"], vec!["a"], vec!["shift", "delete"]],
            bottom_bar: vec!["123", "space"],
            pressed: vec!["delete".to_string()],
        };
        assert_eq!(ctx.render_rows(), "q w\na\nshift [delete]\n123 space");
    }
}
