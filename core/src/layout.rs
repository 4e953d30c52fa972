//! Static key-layout tables.
//!
//! Each layer shows three main rows and a bottom bar. Row 3 always starts with
//! the layer-toggle key and ends with delete; the bottom bar always starts with
//! the mode switch (`123` on letter layers, `ABC` on number layers).

use crate::key_event::labels;
use crate::layer::Layer;

const ROW1_LOWER: &[&str] = &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"];
const ROW2_LOWER: &[&str] = &["a", "s", "d", "f", "g", "h", "j", "k", "l"];
const ROW3_LOWER: &[&str] = &[
    labels::SHIFT,
    "z",
    "x",
    "c",
    "v",
    "b",
    "n",
    "m",
    labels::DELETE,
];

const ROW1_UPPER: &[&str] = &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"];
const ROW2_UPPER: &[&str] = &["A", "S", "D", "F", "G", "H", "J", "K", "L"];
const ROW3_UPPER: &[&str] = &[
    labels::SHIFT,
    "Z",
    "X",
    "C",
    "V",
    "B",
    "N",
    "M",
    labels::DELETE,
];

const ROW1_NUM: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
const ROW2_NUM: &[&str] = &[
    "-", "/", "：", "；", "（", "）", "$", "@", "\u{201C}", "\u{201D}",
];
const ROW3_NUM: &[&str] = &[
    labels::MORE_SYMBOLS,
    "。",
    "，",
    "、",
    "！",
    ".",
    labels::DELETE,
];

const ROW1_SYM: &[&str] = &["【", "】", "{", "}", "#", "%", "^", "*", "+", "="];
const ROW2_SYM: &[&str] = &["_", "——", "\\", "|", "～", "《", "》", "€", "&", "·"];
const ROW3_SYM: &[&str] = &[
    labels::MORE_SYMBOLS,
    "…",
    ",",
    "?",
    "!",
    "'",
    "^_^",
    labels::DELETE,
];

const BOTTOM_LETTERS: &[&str] = &[labels::NUMERIC, labels::EMOJI, labels::SPACE, labels::RETURN];
const BOTTOM_NUMBERS: &[&str] = &[
    labels::ALPHABETIC,
    labels::EMOJI,
    labels::SPACE,
    labels::RETURN,
];

/// The rows shown for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerLayout {
    /// Layer these rows belong to
    pub layer: Layer,
    /// Main rows, top to bottom
    pub rows: [&'static [&'static str]; 3],
    /// Bottom bar (mode switch, emoji, space, return)
    pub bottom_bar: &'static [&'static str],
}

impl LayerLayout {
    /// Look up the layout for a layer.
    pub fn for_layer(layer: Layer) -> Self {
        let (rows, bottom_bar) = match layer {
            Layer::Lowercase => ([ROW1_LOWER, ROW2_LOWER, ROW3_LOWER], BOTTOM_LETTERS),
            Layer::Uppercase => ([ROW1_UPPER, ROW2_UPPER, ROW3_UPPER], BOTTOM_LETTERS),
            Layer::Numeric => ([ROW1_NUM, ROW2_NUM, ROW3_NUM], BOTTOM_NUMBERS),
            Layer::Symbols => ([ROW1_SYM, ROW2_SYM, ROW3_SYM], BOTTOM_NUMBERS),
        };
        Self {
            layer,
            rows,
            bottom_bar,
        }
    }

    /// Main rows followed by the bottom bar.
    pub fn all_rows(&self) -> impl Iterator<Item = &'static [&'static str]> + '_ {
        self.rows.iter().copied().chain(std::iter::once(self.bottom_bar))
    }

    /// Every label on this layer, row by row.
    pub fn all_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.all_rows().flat_map(|row| row.iter().copied())
    }

    /// Check if a label is shown on this layer.
    pub fn contains(&self, label: &str) -> bool {
        self.all_labels().any(|l| l == label)
    }

    /// The wide keys bracketing row 3: (layer toggle, delete).
    pub fn row3_edges(&self) -> (&'static str, &'static str) {
        let row = self.rows[2];
        // Every row 3 table is non-empty.
        (row[0], row[row.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lengths_match_ten_key_grid() {
        for layer in [Layer::Lowercase, Layer::Uppercase] {
            let layout = LayerLayout::for_layer(layer);
            assert_eq!(layout.rows[0].len(), 10);
            assert_eq!(layout.rows[1].len(), 9);
            assert_eq!(layout.rows[2].len(), 9);
        }
        let symbols = LayerLayout::for_layer(Layer::Symbols);
        assert_eq!(symbols.rows[1].len(), 10);
    }

    #[test]
    fn test_uppercase_mirrors_lowercase() {
        let lower = LayerLayout::for_layer(Layer::Lowercase);
        let upper = LayerLayout::for_layer(Layer::Uppercase);
        for (lo, up) in lower.all_labels().zip(upper.all_labels()) {
            if lo.chars().count() == 1 {
                assert_eq!(lo.to_uppercase(), up);
            } else {
                assert_eq!(lo, up);
            }
        }
    }

    #[test]
    fn test_row3_is_bracketed_by_toggle_and_delete() {
        for layer in Layer::ALL {
            let (first, last) = LayerLayout::for_layer(layer).row3_edges();
            let expected = if layer.is_alphabetic() {
                labels::SHIFT
            } else {
                labels::MORE_SYMBOLS
            };
            assert_eq!(first, expected, "row 3 of {}", layer);
            assert_eq!(last, labels::DELETE, "row 3 of {}", layer);
        }
    }

    #[test]
    fn test_bottom_bar_mode_switch() {
        assert_eq!(LayerLayout::for_layer(Layer::Lowercase).bottom_bar[0], "123");
        assert_eq!(LayerLayout::for_layer(Layer::Uppercase).bottom_bar[0], "123");
        assert_eq!(LayerLayout::for_layer(Layer::Numeric).bottom_bar[0], "ABC");
        assert_eq!(LayerLayout::for_layer(Layer::Symbols).bottom_bar[0], "ABC");
    }

    #[test]
    fn test_contains() {
        let numeric = LayerLayout::for_layer(Layer::Numeric);
        assert!(numeric.contains("7"));
        assert!(numeric.contains("return"));
        assert!(!numeric.contains("q"));
        assert!(!numeric.contains("shift"));
    }

    #[test]
    fn test_labels_unique_within_layer() {
        for layer in Layer::ALL {
            let labels: Vec<_> = LayerLayout::for_layer(layer).all_labels().collect();
            let mut dedup = labels.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(labels.len(), dedup.len(), "duplicate label on {}", layer);
        }
    }
}
