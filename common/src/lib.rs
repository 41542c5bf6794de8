//! Responsive analog watchface core for round wearable displays.
//!
//! This crate contains the platform-agnostic rendering engine shared by the
//! desktop simulator and device builds:
//!
//! - [`layout`]: Scale factor and the per-screen [`LayoutConfig`]
//! - [`geometry`]: Rotation primitive, hand polygons, hash marks, bounding boxes
//! - [`time`]: Wall-clock and calendar values supplied by the host
//! - [`sensors`]: Device readings snapshot (every field optional)
//! - [`progress`]: Clamped progress values and the six gauge data sources
//! - [`gauge`]: 11-tick progress gauge geometry and drawing
//! - [`colors`] / [`theme`]: RGB565 palette and semantic color roles
//! - [`settings`]: Raw host settings and their validated, typed form
//! - [`fields`]: Text content for the top and bottom field slots
//! - [`styles`]: Pre-computed text styles and scale-aware font choice
//! - [`face`]: Draw routines for each watchface element
//! - [`compositor`]: Offscreen layers, full/partial redraw, sleep state
//! - [`watchface`]: The session object receiving host callbacks
//! - [`event_log`]: Leveled diagnostic ring buffer
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. The `alloc` crate is used only for
//! offscreen layer storage, which is allocated once per layout event.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

pub mod colors;
pub mod compositor;
pub mod event_log;
pub mod face;
pub mod fields;
pub mod gauge;
pub mod geometry;
pub mod layout;
pub mod progress;
pub mod sensors;
pub mod settings;
pub mod styles;
pub mod theme;
pub mod time;
pub mod watchface;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use compositor::{Buffering, FrameKind, PowerState};
pub use face::FrameInput;
pub use layout::{LayoutConfig, calculate_scale_factor};
pub use progress::{GaugeSource, ProgressValue};
pub use sensors::SensorSnapshot;
pub use settings::{RawSettings, Settings};
pub use theme::{ColorRole, Theme};
pub use time::{CalendarDate, ClockTime, Weekday};
pub use watchface::WatchFace;
