//! Keyboard layers.
//!
//! A layer is one of the mutually exclusive label sets shown on the keyboard
//! at a time. Letter layers (lowercase/uppercase) and number layers
//! (numeric/symbols) each form a pair that the shift key toggles between.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The visible key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Lowercase latin letters
    Lowercase,
    /// Uppercase latin letters (one-shot shift)
    Uppercase,
    /// Digits and common full-width punctuation
    Numeric,
    /// Brackets, operators and less common symbols
    Symbols,
}

impl Default for Layer {
    fn default() -> Self {
        Self::Lowercase
    }
}

impl Layer {
    /// Every layer, in display order.
    pub const ALL: [Layer; 4] = [
        Layer::Lowercase,
        Layer::Uppercase,
        Layer::Numeric,
        Layer::Symbols,
    ];

    /// The other member of this layer's shift pair.
    pub fn shifted(self) -> Self {
        match self {
            Layer::Lowercase => Layer::Uppercase,
            Layer::Uppercase => Layer::Lowercase,
            Layer::Numeric => Layer::Symbols,
            Layer::Symbols => Layer::Numeric,
        }
    }

    /// Check if this is one of the letter layers.
    pub fn is_alphabetic(self) -> bool {
        matches!(self, Layer::Lowercase | Layer::Uppercase)
    }

    /// Lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Lowercase => "lowercase",
            Layer::Uppercase => "uppercase",
            Layer::Numeric => "numeric",
            Layer::Symbols => "symbols",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
