//! Segmented progress gauge.
//!
//! The gauge is two independent parts:
//! - a static scale of 11 tick lines at 0%, 10%, ... 100% of the span
//!   `[battery_left, battery_right]`, always in the neutral gauge-line color;
//! - one filled indicator circle whose position and color follow the data.
//!
//! The renderer never knows which metric it is showing. It receives a
//! [`GaugeReading`] built from any [`GaugeSource`](crate::progress::GaugeSource).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};

use crate::layout::LayoutConfig;
use crate::progress::ProgressValue;
use crate::theme::{ColorRole, Theme};

// =============================================================================
// Gauge Constants
// =============================================================================

/// Number of tick lines (0% to 100% in 10% steps).
pub const GAUGE_TICK_COUNT: usize = 11;

/// Readings at or below this are shown red in multi-color mode.
pub const GAUGE_LOW_THRESHOLD: u8 = 10;

/// Readings at or below this (and above low) are shown yellow in multi-color mode.
pub const GAUGE_WARNING_THRESHOLD: u8 = 20;

const _: () = assert!(GAUGE_LOW_THRESHOLD < GAUGE_WARNING_THRESHOLD);

// =============================================================================
// Reading
// =============================================================================

/// Data-driven input to the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeReading {
    pub value: ProgressValue,
    /// Color the indicator by threshold instead of always green.
    pub multi_color: bool,
    /// Battery is charging (only meaningful with `multi_color`).
    pub charging: bool,
}

impl GaugeReading {
    /// Semantic color of the indicator.
    pub const fn indicator_role(&self) -> ColorRole {
        if !self.multi_color {
            return ColorRole::GaugeGreen;
        }
        let percent = self.value.get();
        if self.charging {
            ColorRole::GaugeBlue
        } else if percent <= GAUGE_LOW_THRESHOLD {
            ColorRole::GaugeRed
        } else if percent <= GAUGE_WARNING_THRESHOLD {
            ColorRole::GaugeYellow
        } else {
            ColorRole::GaugeGreen
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Pixel positions of every gauge element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeGeometry {
    /// x of each tick line, left to right.
    pub ticks_x: [i32; GAUGE_TICK_COUNT],
    /// Top of the tick lines.
    pub top: i32,
    /// Bottom of the tick lines (inclusive).
    pub bottom: i32,
    /// Indicator circle center.
    pub indicator: Point,
    pub indicator_radius: u32,
}

impl GaugeGeometry {
    pub fn new(layout: &LayoutConfig, value: ProgressValue) -> Self {
        let left = layout.battery_left as f32;
        let span = (layout.battery_right - layout.battery_left) as f32;

        let mut ticks_x = [0i32; GAUGE_TICK_COUNT];
        for (i, x) in ticks_x.iter_mut().enumerate() {
            *x = (left + span * i as f32 / 10.0) as i32;
        }

        let top = layout.gauge_top;
        Self {
            ticks_x,
            top,
            bottom: top + layout.gauge_bar_height.saturating_sub(1) as i32,
            indicator: Point::new(indicator_x(layout, value), layout.gauge_center_y()),
            indicator_radius: layout.gauge_indicator_radius,
        }
    }
}

/// `battery_left + (battery_right - battery_left) / 10 * (percent / 10)`, truncated.
pub fn indicator_x(layout: &LayoutConfig, value: ProgressValue) -> i32 {
    let left = layout.battery_left as f32;
    let span = (layout.battery_right - layout.battery_left) as f32;
    (left + span / 10.0 * (f32::from(value.get()) / 10.0)) as i32
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw the tick scale and the indicator.
pub fn draw_gauge<D>(
    display: &mut D,
    layout: &LayoutConfig,
    reading: &GaugeReading,
    theme: Theme,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let geometry = GaugeGeometry::new(layout, reading.value);

    let line_style = PrimitiveStyle::with_stroke(theme.color(ColorRole::GaugeLine), 1);
    for &x in &geometry.ticks_x {
        Line::new(Point::new(x, geometry.top), Point::new(x, geometry.bottom))
            .into_styled(line_style)
            .draw(display)
            .ok();
    }

    Circle::with_center(geometry.indicator, geometry.indicator_radius * 2 + 1)
        .into_styled(PrimitiveStyle::with_fill(theme.color(reading.indicator_role())))
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingDisplay;

    fn reading(percent: u32, multi_color: bool, charging: bool) -> GaugeReading {
        GaugeReading {
            value: ProgressValue::from_percent(percent),
            multi_color,
            charging,
        }
    }

    #[test]
    fn test_tick_count_fixed() {
        let layout = LayoutConfig::new(260, 260);
        for p in [0, 1, 37, 99, 100] {
            let geometry = GaugeGeometry::new(&layout, ProgressValue::from_percent(p));
            assert_eq!(geometry.ticks_x.len(), 11);
        }
    }

    #[test]
    fn test_ticks_span_bounds() {
        for w in [208, 218, 240, 260, 280, 390, 416] {
            let layout = LayoutConfig::new(w, w);
            let geometry = GaugeGeometry::new(&layout, ProgressValue::ZERO);
            assert_eq!(geometry.ticks_x[0], layout.battery_left);
            assert_eq!(geometry.ticks_x[10], layout.battery_right);
            assert!(geometry.ticks_x.windows(2).all(|w| w[0] < w[1]), "ticks ascend at {w}");
        }
    }

    #[test]
    fn test_indicator_position_formula() {
        for w in [208, 218, 240, 260, 280, 390, 416] {
            let layout = LayoutConfig::new(w, w);
            let left = layout.battery_left as f32;
            let right = layout.battery_right as f32;
            for p in 0..=100u32 {
                let expected = (left + (right - left) / 10.0 * (p as f32 / 10.0)) as i32;
                assert_eq!(
                    indicator_x(&layout, ProgressValue::from_percent(p)),
                    expected,
                    "p = {p} at {w}"
                );
            }
        }
    }

    #[test]
    fn test_indicator_endpoints() {
        let layout = LayoutConfig::new(260, 260);
        assert_eq!(indicator_x(&layout, ProgressValue::ZERO), layout.battery_left);
        assert_eq!(indicator_x(&layout, ProgressValue::FULL), layout.battery_right);
        assert_eq!(indicator_x(&layout, ProgressValue::from_percent(50)), 130);
    }

    #[test]
    fn test_indicator_vertically_centered() {
        let layout = LayoutConfig::new(260, 260);
        let geometry = GaugeGeometry::new(&layout, ProgressValue::ZERO);
        assert_eq!(geometry.indicator.y, layout.gauge_top + 5);
        assert_eq!(geometry.bottom - geometry.top, 10);
    }

    #[test]
    fn test_indicator_colors_multi() {
        assert_eq!(reading(5, true, false).indicator_role(), ColorRole::GaugeRed);
        assert_eq!(reading(10, true, false).indicator_role(), ColorRole::GaugeRed);
        assert_eq!(reading(11, true, false).indicator_role(), ColorRole::GaugeYellow);
        assert_eq!(reading(20, true, false).indicator_role(), ColorRole::GaugeYellow);
        assert_eq!(reading(21, true, false).indicator_role(), ColorRole::GaugeGreen);
        assert_eq!(reading(5, true, true).indicator_role(), ColorRole::GaugeBlue);
    }

    #[test]
    fn test_indicator_color_single() {
        for p in [0, 10, 20, 100] {
            assert_eq!(reading(p, false, false).indicator_role(), ColorRole::GaugeGreen);
            assert_eq!(reading(p, false, true).indicator_role(), ColorRole::GaugeGreen);
        }
    }

    #[test]
    fn test_draw_gauge_emits_eleven_tick_columns() {
        let layout = LayoutConfig::new(260, 260);
        // Indicator sits between ticks at these values, so none is covered
        for p in [35, 55, 75] {
            let mut display = RecordingDisplay::new(layout.size());
            draw_gauge(&mut display, &layout, &reading(p, true, false), Theme::Dark);
            let line_color = Theme::Dark.color(ColorRole::GaugeLine);
            let columns = display.columns_with(line_color);
            assert_eq!(columns.len(), 11, "tick columns at p = {p}");
        }
    }

    #[test]
    fn test_draw_gauge_indicator_color() {
        let layout = LayoutConfig::new(260, 260);
        let mut display = RecordingDisplay::new(layout.size());
        draw_gauge(&mut display, &layout, &reading(8, true, false), Theme::Light);
        let center = GaugeGeometry::new(&layout, ProgressValue::from_percent(8)).indicator;
        assert_eq!(display.pixel(center), Some(Theme::Light.color(ColorRole::GaugeRed)));
    }
}
