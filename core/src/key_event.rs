//! Key events sent to the host, and classification of raw key labels.
//!
//! The presentation layer hands us raw labels exactly as drawn on the keys.
//! A handful of labels are special (layer switches and control keys); every
//! other label is text to insert.

use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// Labels with special meaning.
pub mod labels {
    pub const SHIFT: &str = "shift";
    pub const MORE_SYMBOLS: &str = "#+=";
    pub const NUMERIC: &str = "123";
    pub const ALPHABETIC: &str = "ABC";
    pub const DELETE: &str = "delete";
    pub const RETURN: &str = "return";
    pub const SPACE: &str = "space";
    pub const EMOJI: &str = "emoji";
}

/// Normalized output of a key press.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum KeyEvent {
    /// Literal text to insert at the cursor
    Insert(String),
    /// Delete the character before the cursor
    Backspace,
    /// Insert a line break
    Newline,
}

impl KeyEvent {
    /// Convenience constructor for an insert event.
    pub fn insert(text: impl Into<String>) -> Self {
        KeyEvent::Insert(text.into())
    }

    /// Check if this is a control token rather than literal text.
    pub fn is_control(&self) -> bool {
        !matches!(self, KeyEvent::Insert(_))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Insert(text) => write!(f, "{:?}", text),
            KeyEvent::Backspace => f.write_str("{backspace}"),
            KeyEvent::Newline => f.write_str("{newline}"),
        }
    }
}

/// What a raw label does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction<'a> {
    /// Toggle within the current shift pair
    ToggleShift,
    /// Jump to the numeric layer
    ShowNumeric,
    /// Jump back to the lowercase layer
    ShowAlphabetic,
    /// Emit a backspace (repeats while held)
    Delete,
    /// Emit a newline
    Return,
    /// Insert text; the one-shot shift is consumed
    Insert(&'a str),
}

static SPECIAL_KEYS: phf::Map<&'static str, KeyAction<'static>> = phf_map! {
    "shift" => KeyAction::ToggleShift,
    "#+=" => KeyAction::ToggleShift,
    "123" => KeyAction::ShowNumeric,
    "ABC" => KeyAction::ShowAlphabetic,
    "delete" => KeyAction::Delete,
    "return" => KeyAction::Return,
    "space" => KeyAction::Insert(" "),
};

impl<'a> KeyAction<'a> {
    /// Classify a raw key label. Never fails: unknown labels insert themselves.
    pub fn from_label(label: &'a str) -> Self {
        match SPECIAL_KEYS.get(label) {
            Some(action) => *action,
            None => KeyAction::Insert(label),
        }
    }

    /// The event this action emits, if any.
    pub fn event(&self) -> Option<KeyEvent> {
        match self {
            KeyAction::ToggleShift | KeyAction::ShowNumeric | KeyAction::ShowAlphabetic => None,
            KeyAction::Delete => Some(KeyEvent::Backspace),
            KeyAction::Return => Some(KeyEvent::Newline),
            KeyAction::Insert(text) => Some(KeyEvent::insert(*text)),
        }
    }

    /// Check if holding this key repeats its event.
    pub fn repeats(&self) -> bool {
        matches!(self, KeyAction::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_labels() {
        assert_eq!(KeyAction::from_label("shift"), KeyAction::ToggleShift);
        assert_eq!(KeyAction::from_label("#+="), KeyAction::ToggleShift);
        assert_eq!(KeyAction::from_label("123"), KeyAction::ShowNumeric);
        assert_eq!(KeyAction::from_label("ABC"), KeyAction::ShowAlphabetic);
        assert_eq!(KeyAction::from_label("delete"), KeyAction::Delete);
        assert_eq!(KeyAction::from_label("return"), KeyAction::Return);
    }

    #[test]
    fn test_space_inserts_blank() {
        assert_eq!(KeyAction::from_label("space").event(), Some(KeyEvent::insert(" ")));
    }

    #[test]
    fn test_unknown_labels_insert_themselves() {
        for label in ["a", "Q", "。", "^_^", "——", "emoji", "Shift", ""] {
            assert_eq!(KeyAction::from_label(label), KeyAction::Insert(label));
            assert_eq!(KeyAction::from_label(label).event(), Some(KeyEvent::insert(label)));
        }
    }

    #[test]
    fn test_only_delete_repeats() {
        assert!(KeyAction::from_label("delete").repeats());
        for label in ["shift", "return", "space", "a", "123"] {
            assert!(!KeyAction::from_label(label).repeats());
        }
    }

    #[test]
    fn test_display_tokens() {
        assert_eq!(KeyEvent::Backspace.to_string(), "{backspace}");
        assert_eq!(KeyEvent::Newline.to_string(), "{newline}");
        assert_eq!(KeyEvent::insert("a").to_string(), "\"a\"");
        assert!(KeyEvent::Newline.is_control());
        assert!(!KeyEvent::insert("x").is_control());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&KeyEvent::insert("好")).unwrap();
        assert_eq!(json, r#"{"kind":"insert","text":"好"}"#);
        let json = serde_json::to_string(&KeyEvent::Backspace).unwrap();
        assert_eq!(json, r#"{"kind":"backspace"}"#);
    }
}
