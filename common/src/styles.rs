//! Pre-computed text styles and scale-aware font selection.
//!
//! Alignment styles are `const` so draw routines never build them per frame.
//! Field text color depends on the theme, so callers build
//! `MonoTextStyle::new(field_font(scale), color)` on the fly; only the color
//! varies, the font reference is shared.

use embedded_graphics::{
    mono_font::MonoFont,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered horizontally and vertically on the anchor point.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font Selection
// =============================================================================

/// Scale factor below which the small field font is used.
pub const SMALL_FONT_BELOW: f32 = 0.9;

/// Scale factor at or above which the large field font is used.
pub const LARGE_FONT_FROM: f32 = 1.3;

const _: () = assert!(SMALL_FONT_BELOW < LARGE_FONT_FROM);

/// Field font for a screen's scale factor.
pub fn field_font(scale_factor: f32) -> &'static MonoFont<'static> {
    if scale_factor < SMALL_FONT_BELOW {
        &PROFONT_14_POINT
    } else if scale_factor < LARGE_FONT_FROM {
        &PROFONT_18_POINT
    } else {
        &PROFONT_24_POINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_font_grows_with_scale() {
        let small = field_font(0.8).character_size.height;
        let medium = field_font(1.0).character_size.height;
        let large = field_font(1.6).character_size.height;
        assert!(small < medium && medium < large);
    }
}
