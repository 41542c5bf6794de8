//! Screen-size driven layout configuration.
//!
//! Every length on the watchface is defined once at a 260x260 reference
//! resolution and multiplied by a scale factor derived from the physical
//! screen. The result is cached in a [`LayoutConfig`] that is rebuilt
//! wholesale on every layout event and never mutated mid-frame.
//!
//! # Pixel Conversion Policy
//!
//! Scaled pixel lengths are truncated, not rounded:
//! ```text
//! length_px = (base * scale_factor) as u32
//! ```
//! Proportional positions (date and notification rows, gauge bounds) are
//! derived from the screen dimensions directly and are independent of the
//! scale factor.

use embedded_graphics::prelude::{Point, Size};

use crate::styles::field_font;

// =============================================================================
// Reference Resolution
// =============================================================================

/// Edge length (px) of the reference screen. Scale factor is 1.0 here.
pub const REFERENCE_EDGE: f32 = 260.0;

// =============================================================================
// Base Lengths (pixels at reference resolution)
// =============================================================================

/// Width of the hour-hand wedge at its outer end.
pub const HOUR_HAND_WIDTH_BASE: f32 = 160.0;

/// Distance from pivot to the outer end of the hour-hand wedge.
pub const HOUR_HAND_LENGTH_BASE: f32 = 151.6;

/// Distance the hour-hand point sits past the pivot.
pub const HOUR_HAND_TAIL_BASE: f32 = 10.0;

/// Minute hand stroke width.
pub const MINUTE_HAND_WIDTH_BASE: f32 = 2.0;

/// Distance from pivot to the minute-hand tip.
pub const MINUTE_HAND_LENGTH_BASE: f32 = 120.0;

/// Minute hand protrusion past the pivot.
pub const MINUTE_TAIL_BASE: f32 = 15.0;

/// Hour hash mark length, measured inward from the rim.
pub const HOUR_HASH_LENGTH_BASE: f32 = 15.0;

/// Minute hash mark length, measured inward from the rim.
pub const MINUTE_HASH_LENGTH_BASE: f32 = 5.0;

/// Stroke width of hour hash marks.
pub const HOUR_HASH_STROKE_BASE: f32 = 2.0;

/// Height of the gauge tick lines.
pub const GAUGE_BAR_HEIGHT_BASE: f32 = 11.0;

/// Radius of the gauge position indicator.
pub const GAUGE_INDICATOR_RADIUS_BASE: f32 = 5.0;

/// Radius of the arbor (pivot hub).
pub const ARBOR_RADIUS_BASE: f32 = 8.0;

/// Multiplier governing the height of the text field strips.
pub const NOTIFICATION_MULTIPLIER_BASE: f32 = 4.6;

/// Field strip height in units of the scaled notification multiplier.
pub const FIELD_STRIP_UNIT: f32 = 5.0;

/// Rows kept free around the field font cell inside a strip.
///
/// Middle-baseline text sits `(h - 1) / 2` rows above its anchor, so a strip
/// exactly one cell tall clips the last row of even-height fonts.
pub const FIELD_STRIP_PADDING: u32 = 2;

// =============================================================================
// Proportional Positions (fractions of width/height)
// =============================================================================

/// Vertical center of the top (date) field as a fraction of height.
pub const DATE_Y_RATIO: f32 = 0.25;

/// Vertical center of the bottom (notification) field as a fraction of height.
pub const NOTIFICATION_Y_RATIO: f32 = 0.77;

/// Top edge of the gauge tick lines as a fraction of height.
pub const GAUGE_Y_RATIO: f32 = 0.62;

/// Left end of the gauge as a fraction of width.
pub const GAUGE_LEFT_RATIO: f32 = 0.25;

/// Right end of the gauge as a fraction of width.
pub const GAUGE_RIGHT_RATIO: f32 = 0.75;

const _: () = assert!(GAUGE_LEFT_RATIO < GAUGE_RIGHT_RATIO);
const _: () = assert!(DATE_Y_RATIO < GAUGE_Y_RATIO);
const _: () = assert!(GAUGE_Y_RATIO < NOTIFICATION_Y_RATIO);

// =============================================================================
// Scale Calculator
// =============================================================================

/// Map a physical screen size to a scale factor relative to the 260px reference.
///
/// Returns `(width + height) / 2 / 260`. Exactly 1.0 at 260x260 and
/// monotonically increasing in both dimensions.
#[inline]
pub fn calculate_scale_factor(width: u32, height: u32) -> f32 {
    (width + height) as f32 / 2.0 / REFERENCE_EDGE
}

#[inline]
fn scaled_px(base: f32, scale: f32) -> u32 {
    // Truncation of a non-negative float
    (base * scale) as u32
}

#[inline]
fn proportion(ratio: f32, extent: u32) -> i32 {
    (ratio * extent as f32) as i32
}

// =============================================================================
// Screen Dimensions
// =============================================================================

/// Physical screen size reported by the host for a layout event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

impl ScreenDimensions {
    /// Returns `None` if either dimension is zero.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

// =============================================================================
// Layout Configuration
// =============================================================================

/// Layout constants for one screen configuration.
///
/// Built once per layout event by [`LayoutConfig::new`] and read-only for the
/// lifetime of that screen size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// Dial center (pivot point of both hands).
    pub center: Point,
    /// Scale relative to the 260px reference screen.
    pub scale_factor: f32,
    /// Rim radius used for hash marks.
    pub outer_radius: u32,

    pub hour_hand_width: u32,
    pub hour_hand_length: u32,
    pub hour_hand_tail: u32,
    pub minute_hand_width: u32,
    pub minute_hand_length: u32,
    pub minute_tail: u32,
    pub hour_hash_length: u32,
    pub minute_hash_length: u32,
    pub hour_hash_stroke: u32,
    pub gauge_bar_height: u32,
    pub gauge_indicator_radius: u32,
    pub arbor_radius: u32,

    /// Scaled notification multiplier (kept fractional).
    pub notification_multiplier: f32,
    /// Height of the top and bottom field strips.
    pub field_strip_height: u32,

    /// Top field center as a fraction of height.
    pub date_y_ratio: f32,
    /// Bottom field center as a fraction of height.
    pub notification_y_ratio: f32,

    /// Left gauge bound, `floor(0.25 * width)`.
    pub battery_left: i32,
    /// Right gauge bound, `floor(0.75 * width)`.
    pub battery_right: i32,
    /// Top edge of the gauge tick lines.
    pub gauge_top: i32,
}

impl LayoutConfig {
    /// Compute every layout constant for a `width` x `height` screen.
    pub fn new(width: u32, height: u32) -> Self {
        let scale = calculate_scale_factor(width, height);
        let notification_multiplier = NOTIFICATION_MULTIPLIER_BASE * scale;

        Self {
            width,
            height,
            center: Point::new((width / 2) as i32, (height / 2) as i32),
            scale_factor: scale,
            outer_radius: width.min(height) / 2,

            hour_hand_width: scaled_px(HOUR_HAND_WIDTH_BASE, scale),
            hour_hand_length: scaled_px(HOUR_HAND_LENGTH_BASE, scale),
            hour_hand_tail: scaled_px(HOUR_HAND_TAIL_BASE, scale),
            minute_hand_width: scaled_px(MINUTE_HAND_WIDTH_BASE, scale),
            minute_hand_length: scaled_px(MINUTE_HAND_LENGTH_BASE, scale),
            minute_tail: scaled_px(MINUTE_TAIL_BASE, scale),
            hour_hash_length: scaled_px(HOUR_HASH_LENGTH_BASE, scale),
            minute_hash_length: scaled_px(MINUTE_HASH_LENGTH_BASE, scale),
            hour_hash_stroke: scaled_px(HOUR_HASH_STROKE_BASE, scale).max(1),
            gauge_bar_height: scaled_px(GAUGE_BAR_HEIGHT_BASE, scale),
            gauge_indicator_radius: scaled_px(GAUGE_INDICATOR_RADIUS_BASE, scale),
            arbor_radius: scaled_px(ARBOR_RADIUS_BASE, scale),

            notification_multiplier,
            field_strip_height: ((notification_multiplier * FIELD_STRIP_UNIT) as u32)
                .max(field_font(scale).character_size.height + FIELD_STRIP_PADDING),

            date_y_ratio: DATE_Y_RATIO,
            notification_y_ratio: NOTIFICATION_Y_RATIO,

            battery_left: proportion(GAUGE_LEFT_RATIO, width),
            battery_right: proportion(GAUGE_RIGHT_RATIO, width),
            gauge_top: proportion(GAUGE_Y_RATIO, height),
        }
    }

    /// Build from validated dimensions.
    #[inline]
    pub fn from_dimensions(dims: ScreenDimensions) -> Self {
        Self::new(dims.width, dims.height)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Vertical center of the top field.
    #[inline]
    pub fn date_y(&self) -> i32 {
        proportion(self.date_y_ratio, self.height)
    }

    /// Vertical center of the bottom field.
    #[inline]
    pub fn notification_y(&self) -> i32 {
        proportion(self.notification_y_ratio, self.height)
    }

    /// Top edge of the strip centered on `center_y`, clamped to the screen.
    pub fn strip_top(&self, center_y: i32) -> u32 {
        let top = center_y - (self.field_strip_height / 2) as i32;
        let max_top = self.height.saturating_sub(self.field_strip_height);
        (top.max(0) as u32).min(max_top)
    }

    /// Vertical center of the gauge tick lines.
    #[inline]
    pub const fn gauge_center_y(&self) -> i32 {
        self.gauge_top + (self.gauge_bar_height / 2) as i32
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
