//! Color constants for the watchface.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! Standard colors come from the `RgbColor` trait constants. Status colors
//! have a second, darker variant used on the light theme so they keep their
//! contrast against a white background.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Dark theme background, light theme ink.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Light theme background, dark theme ink.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Inactivity alert and low gauge readings on dark.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Healthy gauge readings on dark.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Warning gauge readings on dark.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Hour hand while the phone is connected. Same on both themes.
/// RGB565: (31, 32, 0).
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Sky blue for charging on dark. RGB565: (0, 40, 31).
pub const SKY_BLUE: Rgb565 = Rgb565::new(0, 40, 31);

/// Mid gray, hour hand while disconnected. RGB565: (16, 32, 16).
pub const MID_GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Light gray for minute hashes and gauge lines on dark. RGB565: (21, 42, 21).
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Dark gray for minute hashes and gauge lines on light. RGB565: (8, 16, 8).
pub const DARK_GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Light-Theme Status Variants
// =============================================================================

/// Saturated green readable on white. RGB565: (0, 36, 0).
pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 36, 0);

/// Deep red readable on white. RGB565: (24, 0, 0).
pub const DARK_RED: Rgb565 = Rgb565::new(24, 0, 0);

/// Amber in place of yellow on white. RGB565: (28, 40, 0).
pub const AMBER: Rgb565 = Rgb565::new(28, 40, 0);

/// Navy-ish blue readable on white. RGB565: (0, 16, 26).
pub const DEEP_BLUE: Rgb565 = Rgb565::new(0, 16, 26);
