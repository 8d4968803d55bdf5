//! Visual themes for the board renderer.
//!
//! A theme is polymorphic over the same capability set as the original
//! formatter strategy: pit shape, store shape, pit color, stone color. The
//! game core never consults a theme; only the renderer does.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Pluggable board look: glyph pair drawn around each slot plus the colors
/// used for slot outlines and stone counts.
pub trait BoardTheme {
    fn name(&self) -> &'static str;
    /// Opening/closing glyphs around a playable pit
    fn pit_shape(&self) -> (&'static str, &'static str);
    /// Opening/closing glyphs around a store
    fn store_shape(&self) -> (&'static str, &'static str);
    fn pit_color(&self) -> Color;
    fn stone_color(&self) -> Color;
}

/// Round pits, boxy stores, blue pits with green stones.
pub struct ClassicTheme;

impl BoardTheme for ClassicTheme {
    fn name(&self) -> &'static str {
        "Classic"
    }

    fn pit_shape(&self) -> (&'static str, &'static str) {
        ("(", ")")
    }

    fn store_shape(&self) -> (&'static str, &'static str) {
        ("[", "]")
    }

    fn pit_color(&self) -> Color {
        Color::Blue
    }

    fn stone_color(&self) -> Color {
        Color::Green
    }
}

/// Angular pits on a dark palette.
pub struct MidnightTheme;

impl BoardTheme for MidnightTheme {
    fn name(&self) -> &'static str {
        "Midnight"
    }

    fn pit_shape(&self) -> (&'static str, &'static str) {
        ("<", ">")
    }

    fn store_shape(&self) -> (&'static str, &'static str) {
        ("{", "}")
    }

    fn pit_color(&self) -> Color {
        Color::Magenta
    }

    fn stone_color(&self) -> Color {
        Color::Cyan
    }
}

/// Theme selector, parsed from config and cycled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKind {
    Classic,
    Midnight,
}

impl Default for ThemeKind {
    fn default() -> Self {
        ThemeKind::Classic
    }
}

impl ThemeKind {
    pub fn theme(self) -> &'static dyn BoardTheme {
        match self {
            ThemeKind::Classic => &ClassicTheme,
            ThemeKind::Midnight => &MidnightTheme,
        }
    }

    /// Next theme in the cycle
    pub fn next(self) -> ThemeKind {
        match self {
            ThemeKind::Classic => ThemeKind::Midnight,
            ThemeKind::Midnight => ThemeKind::Classic,
        }
    }
}
