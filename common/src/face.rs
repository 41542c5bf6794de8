//! Draw routines for each watchface element.
//!
//! A [`Scene`] gathers everything one frame needs (polygons, colors, gauge
//! reading, field text) from the layout, the settings and the host input.
//! The draw functions below only turn a scene into pixels; they never look at
//! settings or sensors themselves.
//!
//! # Draw Order
//!
//! 1. Background fill
//! 2. Minute and hour hash marks
//! 3. Gauge (gated)
//! 4. Hour hand (always)
//! 5. Minute hand and arbor (gated together)
//! 6. Top field (gated)
//! 7. Bottom field (gated)
//!
//! Steps 1-4 are the *static* part of a frame ([`draw_static`]); the
//! compositor caches them in an offscreen layer when it can.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle,
};
use embedded_graphics::text::Text;

use crate::fields::{FieldSlot, FieldText, field_text};
use crate::gauge::{GaugeReading, draw_gauge};
use crate::geometry::{
    PointF, Quad4, Triangle3, generate_hand_coordinates, generate_hash_mark_segments,
    generate_hour_coordinates, hour_angle, minute_angle,
};
use crate::layout::LayoutConfig;
use crate::sensors::SensorSnapshot;
use crate::settings::{Settings, Visibility};
use crate::styles::{CENTERED, field_font};
use crate::theme::{ColorRole, Theme};
use crate::time::{CalendarDate, ClockTime};

// =============================================================================
// Frame Input and Scene
// =============================================================================

/// Per-frame values supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub time: ClockTime,
    pub date: CalendarDate,
    pub sensors: SensorSnapshot,
}

/// Time-dependent part of a frame: hand polygons and arbor state.
///
/// This is all a partial update computes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hands {
    pub hour: Triangle3,
    pub minute: Quad4,
    pub arbor_alert: bool,
}

impl Hands {
    pub fn new(
        layout: &LayoutConfig,
        settings: &Settings,
        input: &FrameInput,
    ) -> Self {
        let center = PointF::from(layout.center);
        Self {
            hour: generate_hour_coordinates(
                center,
                hour_angle(input.time, settings.hand_mode),
                layout.hour_hand_length,
                layout.hour_hand_tail,
                layout.hour_hand_width,
            ),
            minute: generate_hand_coordinates(
                center,
                minute_angle(input.time),
                layout.minute_hand_length,
                layout.minute_tail,
                layout.minute_hand_width,
            ),
            arbor_alert: input.sensors.move_alert(),
        }
    }
}

/// Everything needed to draw one frame.
///
/// Built for every full frame. Partial frames reuse the last one and only
/// replace [`Scene::hands`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub theme: Theme,
    pub visibility: Visibility,
    pub hands: Hands,
    pub hour_role: ColorRole,
    pub gauge: GaugeReading,
    pub top_text: FieldText,
    pub bottom_text: FieldText,
}

impl Scene {
    pub fn new(
        layout: &LayoutConfig,
        settings: &Settings,
        input: &FrameInput,
    ) -> Self {
        let sensors = &input.sensors;

        let source = settings.gauge_source;
        let gauge = GaugeReading {
            value: source.progress(sensors, settings.calorie_goals),
            multi_color: source.multi_color(),
            charging: sensors.charging,
        };

        Self {
            theme: settings.theme,
            visibility: settings.visibility,
            hands: Hands::new(layout, settings, input),
            hour_role: if sensors.phone_connected {
                ColorRole::HourHandConnected
            } else {
                ColorRole::HourHandDisconnected
            },
            gauge,
            top_text: field_text(FieldSlot::Top, settings.top_field, input.date, sensors),
            bottom_text: field_text(FieldSlot::Bottom, settings.bottom_field, input.date, sensors),
        }
    }

    /// Text for `slot`.
    pub fn text(&self, slot: FieldSlot) -> &str {
        match slot {
            FieldSlot::Top => &self.top_text,
            FieldSlot::Bottom => &self.bottom_text,
        }
    }

    /// Whether `slot` is drawn at all.
    pub const fn field_visible(&self, slot: FieldSlot) -> bool {
        match slot {
            FieldSlot::Top => self.visibility.top_field,
            FieldSlot::Bottom => self.visibility.bottom_field,
        }
    }
}

// =============================================================================
// Element Draw Routines
// =============================================================================

/// Fill the whole screen with the background color.
pub fn draw_background<D>(
    display: &mut D,
    layout: &LayoutConfig,
    theme: Theme,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let screen = Rectangle::new(Point::zero(), layout.size());
    display.fill_solid(&screen, theme.color(ColorRole::Background)).ok();
}

/// 60 minute marks, then the 12 hour marks on top of them.
pub fn draw_hash_marks<D>(
    display: &mut D,
    layout: &LayoutConfig,
    theme: Theme,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let center = PointF::from(layout.center);

    let minute_style = PrimitiveStyle::with_stroke(theme.color(ColorRole::MinuteHash), 1);
    for segment in generate_hash_mark_segments(center, layout.outer_radius, 12, 4, layout.minute_hash_length) {
        Line::new(segment.start.to_pixel(), segment.end.to_pixel())
            .into_styled(minute_style)
            .draw(display)
            .ok();
    }

    let hour_style =
        PrimitiveStyle::with_stroke(theme.color(ColorRole::HourHash), layout.hour_hash_stroke);
    for segment in generate_hash_mark_segments(center, layout.outer_radius, 6, 1, layout.hour_hash_length) {
        Line::new(segment.start.to_pixel(), segment.end.to_pixel())
            .into_styled(hour_style)
            .draw(display)
            .ok();
    }
}

/// Filled hour hand triangle.
pub fn draw_hour_hand<D>(
    display: &mut D,
    hand: &Triangle3,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_triangle(display, hand.map(PointF::to_pixel), color, MAX_FILL_AREA2, MAX_FILL_SPLITS);
}

/// Largest doubled triangle area handed to `embedded-graphics` in one piece.
///
/// Its join math squares the doubled area in `i32`, which overflows above
/// 46340.
const MAX_FILL_AREA2: i64 = 1 << 14;

/// Recursion limit for [`fill_triangle`]. Each split halves the area.
const MAX_FILL_SPLITS: u32 = 8;

const _: () = assert!(MAX_FILL_AREA2 * MAX_FILL_AREA2 < i32::MAX as i64);

/// Fill a triangle, splitting it at the midpoint of its longest edge until
/// every piece is at most `max_area2` (doubled area).
fn fill_triangle<D>(
    display: &mut D,
    [a, b, c]: [Point; 3],
    color: Rgb565,
    max_area2: i64,
    splits_left: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if splits_left == 0 || doubled_area(a, b, c) <= max_area2 {
        Triangle::new(a, b, c).into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();
        return;
    }

    // Rotate so that `a`-`b` is the longest edge
    let [a, b, c] = [[a, b, c], [b, c, a], [c, a, b]]
        .into_iter()
        .max_by_key(|&[p, q, _]| squared_length(q - p))
        .unwrap_or([a, b, c]);
    let mid = Point::new((a.x + b.x).div_euclid(2), (a.y + b.y).div_euclid(2));
    fill_triangle(display, [a, mid, c], color, max_area2, splits_left - 1);
    fill_triangle(display, [mid, b, c], color, max_area2, splits_left - 1);
}

fn squared_length(v: Point) -> i64 {
    i64::from(v.x) * i64::from(v.x) + i64::from(v.y) * i64::from(v.y)
}

fn doubled_area(
    a: Point,
    b: Point,
    c: Point,
) -> i64 {
    let (ab, ac) = (b - a, c - a);
    (i64::from(ab.x) * i64::from(ac.y) - i64::from(ab.y) * i64::from(ac.x)).abs()
}

/// Minute hand quad as two triangles sharing the 0-2 diagonal.
///
/// Outlined as well as filled so a hand narrower than two pixels still shows.
pub fn draw_minute_hand<D>(
    display: &mut D,
    hand: &Quad4,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .fill_color(color)
        .stroke_color(color)
        .stroke_width(1)
        .build();
    let [a, b, c, d] = hand.map(PointF::to_pixel);
    Triangle::new(a, b, c).into_styled(style).draw(display).ok();
    Triangle::new(a, c, d).into_styled(style).draw(display).ok();
}

/// Filled circle over the hand pivot.
pub fn draw_arbor<D>(
    display: &mut D,
    layout: &LayoutConfig,
    alert: bool,
    theme: Theme,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let role = if alert { ColorRole::ArborAlert } else { ColorRole::ArborNormal };
    Circle::with_center(layout.center, layout.arbor_radius * 2 + 1)
        .into_styled(PrimitiveStyle::with_fill(theme.color(role)))
        .draw(display)
        .ok();
}

/// Field text centered in its strip. Empty text draws nothing.
pub fn draw_field_text<D>(
    display: &mut D,
    layout: &LayoutConfig,
    slot: FieldSlot,
    text: &str,
    theme: Theme,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if text.is_empty() {
        return;
    }
    let style = MonoTextStyle::new(field_font(layout.scale_factor), theme.color(ColorRole::Text));
    let anchor = Point::new(layout.center.x, field_center_y(layout, slot));
    Text::with_text_style(text, anchor, style, CENTERED).draw(display).ok();
}

/// Vertical center of a field slot.
pub fn field_center_y(
    layout: &LayoutConfig,
    slot: FieldSlot,
) -> i32 {
    match slot {
        FieldSlot::Top => layout.date_y(),
        FieldSlot::Bottom => layout.notification_y(),
    }
}

/// Full-width strip holding a field, clamped inside the screen.
pub fn strip_rect(
    layout: &LayoutConfig,
    slot: FieldSlot,
) -> Rectangle {
    let top = layout.strip_top(field_center_y(layout, slot));
    Rectangle::new(
        Point::new(0, top as i32),
        Size::new(layout.width, layout.field_strip_height),
    )
}

// =============================================================================
// Composite Steps
// =============================================================================

/// Steps 1-4: background, hash marks, gauge and hour hand.
pub fn draw_static<D>(
    display: &mut D,
    layout: &LayoutConfig,
    scene: &Scene,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_background(display, layout, scene.theme);
    draw_hash_marks(display, layout, scene.theme);
    if scene.visibility.gauge {
        draw_gauge(display, layout, &scene.gauge, scene.theme);
    }
    draw_hour_hand(display, &scene.hands.hour, scene.theme.color(scene.hour_role));
}

/// Step 5: minute hand and arbor, skipped together when hidden.
pub fn draw_minute_layer<D>(
    display: &mut D,
    layout: &LayoutConfig,
    scene: &Scene,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if !scene.visibility.minute_hand {
        return;
    }
    draw_minute_hand(display, &scene.hands.minute, scene.theme.color(ColorRole::MinuteHand));
    draw_arbor(display, layout, scene.hands.arbor_alert, scene.theme);
}

/// Every step in order, straight onto `display`.
pub fn draw_direct<D>(
    display: &mut D,
    layout: &LayoutConfig,
    scene: &Scene,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_static(display, layout, scene);
    draw_minute_layer(display, layout, scene);
    for slot in [FieldSlot::Top, FieldSlot::Bottom] {
        if scene.field_visible(slot) {
            draw_field_text(display, layout, slot, scene.text(slot), scene.theme);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
