//! Card and character color palette.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// A named swatch offered by the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorSwatch {
    pub name: &'static str,
    pub value: &'static str,
}

const fn swatch(name: &'static str, value: &'static str) -> ColorSwatch {
    ColorSwatch { name, value }
}

/// Swatches offered for card and character colors.
pub const CARD_COLORS: &[ColorSwatch] = &[
    swatch("Blue", "#3B82F6"),
    swatch("Green", "#10B981"),
    swatch("Red", "#EF4444"),
    swatch("Yellow", "#F59E0B"),
    swatch("Purple", "#8B5CF6"),
    swatch("Pink", "#EC4899"),
    swatch("Indigo", "#6366F1"),
    swatch("Cyan", "#06B6D4"),
    swatch("Orange", "#F97316"),
    swatch("Lime", "#84CC16"),
    swatch("Emerald", "#059669"),
    swatch("Slate", "#64748B"),
];

/// Number of avatar tints a row header cycles through when a character has
/// no explicit color.
pub const AVATAR_TINTS: usize = 6;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid")
});

/// Validate a `#RRGGBB` color string.
pub fn validate_hex_color(value: &str) -> Result<(), CoreError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{value}'. Expected #RRGGBB"
        )))
    }
}

/// Look up the swatch for a stored color value, case-insensitively.
pub fn swatch_for(value: &str) -> Option<&'static ColorSwatch> {
    CARD_COLORS
        .iter()
        .find(|swatch| swatch.value.eq_ignore_ascii_case(value))
}

/// Avatar tint index for the character at `row` in display order.
pub fn avatar_tint(row: usize) -> usize {
    row % AVATAR_TINTS
}
