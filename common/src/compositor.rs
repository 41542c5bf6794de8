//! Frame composition through offscreen layers.
//!
//! # Strategies
//!
//! The strategy is chosen once per layout event, never per frame:
//!
//! - **Buffered**: three [`Layer`]s are allocated. The *background* layer
//!   caches draw steps 1-4 (fill, hash marks, gauge, hour hand). Each field
//!   layer is a full-width strip copied from the background with only its text
//!   drawn on top. A partial update re-blits the background under the old and
//!   new minute hand, redraws the minute hand and arbor, then re-blits the
//!   part of each strip that was touched.
//! - **Direct**: no layers. Every frame draws every element straight onto the
//!   display. Partial requests are served as full frames.
//!
//! The direct strategy is picked when the host has no buffer capability or
//! when layer allocation fails. Rendering is identical outside the field
//! strips; buffered strips are opaque, so they also cover the minute hand
//! where it crosses them.
//!
//! # Power
//!
//! [`PowerState`] tracks the host's sleep signals and recommends a redraw
//! period. The power-budget signal latches partial updates off for the rest of
//! the session ([`FrameCompositor::disable_partial_updates`]).

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{OffsetOutline, Rectangle};

use crate::event_log::{EventLog, LogLevel};
use crate::log_fmt;
use crate::face::{Hands, Scene, draw_direct, draw_field_text, draw_minute_layer, draw_static, strip_rect};
use crate::fields::FieldSlot;
use crate::geometry::{Triangle3, pixel_bounds, square_around, union_rect};
use crate::layout::LayoutConfig;

// =============================================================================
// Host Capability and Session State
// =============================================================================

/// Whether the host can provide offscreen buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Buffering {
    #[default]
    Available,
    Unavailable,
}

/// Composition strategy in effect for the current layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Buffered,
    Direct,
}

/// Host power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerState {
    /// Full redraw every tick.
    #[default]
    AwakeFull,
    /// Reduced-rate redraw.
    AwakeSleeping,
}

impl PowerState {
    /// Recommended seconds between full redraws.
    pub const fn full_redraw_period_secs(self) -> u32 {
        match self {
            Self::AwakeFull => 1,
            Self::AwakeSleeping => 60,
        }
    }
}

/// Which redraw path a frame took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Full,
    Partial,
}

// =============================================================================
// Layer
// =============================================================================

/// Offscreen RGB565 buffer covering a rectangle of the screen.
///
/// Drawn to in screen coordinates; anything outside [`Layer::area`] is
/// clipped.
pub struct Layer {
    area: Rectangle,
    pixels: Vec<Rgb565>,
}

impl Layer {
    /// Allocate a layer, or `None` if the memory is not available.
    pub fn try_new(area: Rectangle) -> Option<Self> {
        let len = area.size.width as usize * area.size.height as usize;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).ok()?;
        pixels.resize(len, Rgb565::BLACK);
        Some(Self { area, pixels })
    }

    /// Screen rectangle this layer covers.
    #[inline]
    pub const fn area(&self) -> Rectangle {
        self.area
    }

    fn index(
        &self,
        p: Point,
    ) -> Option<usize> {
        let x = p.x - self.area.top_left.x;
        let y = p.y - self.area.top_left.y;
        let inside = x >= 0
            && y >= 0
            && (x as u32) < self.area.size.width
            && (y as u32) < self.area.size.height;
        inside.then(|| y as usize * self.area.size.width as usize + x as usize)
    }

    /// Color at screen point `p`.
    pub fn pixel(
        &self,
        p: Point,
    ) -> Option<Rgb565> {
        self.index(p).map(|i| self.pixels[i])
    }

    /// Copy the overlapping region of `source` into this layer.
    pub fn copy_from(
        &mut self,
        source: &Self,
    ) {
        let overlap = self.area.intersection(&source.area);
        let Some(bottom_right) = overlap.bottom_right() else {
            return;
        };
        let width = overlap.size.width as usize;
        for y in overlap.top_left.y..=bottom_right.y {
            let row_start = Point::new(overlap.top_left.x, y);
            if let (Some(dst), Some(src)) = (self.index(row_start), source.index(row_start)) {
                self.pixels[dst..dst + width].copy_from_slice(&source.pixels[src..src + width]);
            }
        }
    }

    /// Copy the part of this layer inside `area` onto `target`.
    pub fn blit<D>(
        &self,
        target: &mut D,
        area: &Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = area.intersection(&self.area);
        if area.is_zero_sized() {
            return;
        }
        let Some(first) = self.index(area.top_left) else {
            return;
        };
        let stride = self.area.size.width as usize;
        let width = area.size.width as usize;
        let colors = (0..area.size.height as usize).flat_map(move |row| {
            let start = first + row * stride;
            self.pixels[start..start + width].iter().copied()
        });
        target.fill_contiguous(&area, colors).ok();
    }
}

impl Dimensions for Layer {
    fn bounding_box(&self) -> Rectangle {
        self.area
    }
}

impl DrawTarget for Layer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(i) = self.index(p) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.area);
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let width = area.size.width as usize;
        for y in area.top_left.y..=bottom_right.y {
            if let Some(start) = self.index(Point::new(area.top_left.x, y)) {
                self.pixels[start..start + width].fill(color);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

/// Background plus the two field strips.
struct Layers {
    background: Layer,
    top: Layer,
    bottom: Layer,
}

impl Layers {
    fn try_new(layout: &LayoutConfig) -> Option<Self> {
        Some(Self {
            background: Layer::try_new(Rectangle::new(Point::zero(), layout.size()))?,
            top: Layer::try_new(strip_rect(layout, FieldSlot::Top))?,
            bottom: Layer::try_new(strip_rect(layout, FieldSlot::Bottom))?,
        })
    }

    fn strip(
        &self,
        slot: FieldSlot,
    ) -> &Layer {
        match slot {
            FieldSlot::Top => &self.top,
            FieldSlot::Bottom => &self.bottom,
        }
    }

    fn strip_mut(
        &mut self,
        slot: FieldSlot,
    ) -> (&Layer, &mut Layer) {
        match slot {
            FieldSlot::Top => (&self.background, &mut self.top),
            FieldSlot::Bottom => (&self.background, &mut self.bottom),
        }
    }
}

enum Mode {
    Buffered(Layers),
    Direct,
}

// =============================================================================
// Frame Compositor
// =============================================================================

const SLOTS: [FieldSlot; 2] = [FieldSlot::Top, FieldSlot::Bottom];

/// Orchestrates draw order, layer caching and the partial-update path.
pub struct FrameCompositor {
    buffering: Buffering,
    mode: Mode,
    power: PowerState,
    partial_allowed: bool,
    /// Hour hand baked into the background layer, `None` when stale.
    cached_hour_hand: Option<Triangle3>,
    /// Pixels covered by the minute hand and arbor on screen.
    last_minute_bounds: Option<Rectangle>,
}

impl FrameCompositor {
    /// Compositor with no layout yet. Draws directly until [`resize`](Self::resize).
    pub const fn new(buffering: Buffering) -> Self {
        Self {
            buffering,
            mode: Mode::Direct,
            power: PowerState::AwakeFull,
            partial_allowed: true,
            cached_hour_hand: None,
            last_minute_bounds: None,
        }
    }

    /// Pick the strategy for a new layout and allocate its layers.
    pub fn resize(
        &mut self,
        layout: &LayoutConfig,
        log: &mut EventLog,
    ) -> Strategy {
        // Release the old layers before allocating new ones
        self.mode = Mode::Direct;
        self.invalidate();

        match self.buffering {
            Buffering::Unavailable => {
                log.push(LogLevel::Info, "no buffer support, drawing direct");
            }
            Buffering::Available => match Layers::try_new(layout) {
                Some(layers) => {
                    self.mode = Mode::Buffered(layers);
                    log_fmt!(log, LogLevel::Debug, "layers allocated {}x{}", layout.width, layout.height);
                }
                None => {
                    log.push(LogLevel::Warn, "layer alloc failed, drawing direct");
                }
            },
        }
        self.strategy()
    }

    /// Forget cached layer content. The next frame is full.
    pub fn invalidate(&mut self) {
        self.cached_hour_hand = None;
        self.last_minute_bounds = None;
    }

    pub const fn strategy(&self) -> Strategy {
        match self.mode {
            Mode::Buffered(_) => Strategy::Buffered,
            Mode::Direct => Strategy::Direct,
        }
    }

    #[inline]
    pub const fn power_state(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the state changed.
    pub fn enter_sleep(&mut self) -> bool {
        let changed = self.power != PowerState::AwakeSleeping;
        self.power = PowerState::AwakeSleeping;
        changed
    }

    /// Returns `true` if the state changed.
    pub fn exit_sleep(&mut self) -> bool {
        let changed = self.power != PowerState::AwakeFull;
        self.power = PowerState::AwakeFull;
        changed
    }

    /// Turn the partial-update path off for the rest of the session.
    ///
    /// Returns `true` the first time only.
    pub fn disable_partial_updates(&mut self) -> bool {
        let was_allowed = self.partial_allowed;
        self.partial_allowed = false;
        was_allowed
    }

    #[inline]
    pub const fn partial_updates_enabled(&self) -> bool {
        self.partial_allowed
    }

    /// Path a frame with `hands` will take when `requested` is asked for.
    ///
    /// A partial request becomes full when partial updates are latched off,
    /// when drawing direct, or when the cached background no longer matches
    /// (no full frame yet, settings or layout changed, or the hour hand moved).
    pub fn plan(
        &self,
        requested: FrameKind,
        hands: &Hands,
    ) -> FrameKind {
        let cache_valid = self.cached_hour_hand.as_ref() == Some(&hands.hour)
            && self.last_minute_bounds.is_some();
        match requested {
            FrameKind::Partial
                if self.partial_allowed && cache_valid && matches!(self.mode, Mode::Buffered(_)) =>
            {
                FrameKind::Partial
            }
            _ => FrameKind::Full,
        }
    }

    /// Draw one frame onto `target` and report the path taken.
    pub fn render<D>(
        &mut self,
        target: &mut D,
        layout: &LayoutConfig,
        scene: &Scene,
        requested: FrameKind,
    ) -> FrameKind
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let kind = self.plan(requested, &scene.hands);
        match kind {
            FrameKind::Full => self.render_full(target, layout, scene),
            FrameKind::Partial => self.render_partial(target, layout, scene),
        }
        kind
    }

    fn render_full<D>(
        &mut self,
        target: &mut D,
        layout: &LayoutConfig,
        scene: &Scene,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let Mode::Buffered(layers) = &mut self.mode else {
            draw_direct(target, layout, scene);
            return;
        };

        draw_static(&mut layers.background, layout, scene);
        for slot in SLOTS {
            let (background, strip) = layers.strip_mut(slot);
            strip.copy_from(background);
            draw_field_text(strip, layout, slot, scene.text(slot), scene.theme);
        }

        layers.background.blit(target, &layers.background.area());
        draw_minute_layer(target, layout, scene);
        for slot in SLOTS {
            if scene.field_visible(slot) {
                let strip = layers.strip(slot);
                strip.blit(target, &strip.area());
            }
        }

        self.cached_hour_hand = Some(scene.hands.hour);
        self.last_minute_bounds = Some(minute_bounds(layout, scene));
    }

    fn render_partial<D>(
        &mut self,
        target: &mut D,
        layout: &LayoutConfig,
        scene: &Scene,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let Mode::Buffered(layers) = &self.mode else {
            return;
        };

        let current = minute_bounds(layout, scene);
        let dirty = self
            .last_minute_bounds
            .map_or(current, |previous| union_rect(previous, current))
            .intersection(&layers.background.area());

        layers.background.blit(target, &dirty);
        draw_minute_layer(target, layout, scene);
        for slot in SLOTS {
            if scene.field_visible(slot) {
                layers.strip(slot).blit(target, &dirty);
            }
        }

        self.last_minute_bounds = Some(current);
    }
}

/// Extra pixels around the minute hand vertices covered by its outline joins.
const HAND_OUTLINE_MARGIN: i32 = 2;

/// Pixels the minute hand and arbor of `scene` can touch.
pub fn minute_bounds(
    layout: &LayoutConfig,
    scene: &Scene,
) -> Rectangle {
    let arbor = square_around(layout.center, layout.arbor_radius);
    pixel_bounds(&scene.hands.minute).map_or(arbor, |hand| {
        union_rect(hand.offset(HAND_OUTLINE_MARGIN), arbor)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::ContainsPoint;

    use super::*;
    use crate::face::FrameInput;
    use crate::sensors::SensorSnapshot;
    use crate::settings::{HandMode, Settings};
    use crate::test_support::RecordingDisplay;
    use crate::theme::{ColorRole, Theme};
    use crate::time::{CalendarDate, ClockTime, Weekday};

    fn layout() -> LayoutConfig {
        LayoutConfig::new(260, 260)
    }

    fn discrete() -> Settings {
        Settings {
            hand_mode: HandMode::Discrete,
            ..Settings::default()
        }
    }

    fn scene_at(settings: &Settings, hour: u8, minute: u8) -> Scene {
        let input = FrameInput {
            time: ClockTime::new(hour, minute),
            date: CalendarDate::new(Weekday::Sunday, 18, 10),
            sensors: SensorSnapshot {
                battery_percent: Some(64.0),
                phone_connected: true,
                notification_count: Some(4),
                ..SensorSnapshot::empty()
            },
        };
        Scene::new(&layout(), settings, &input)
    }

    fn buffered(log: &mut EventLog) -> FrameCompositor {
        let mut compositor = FrameCompositor::new(Buffering::Available);
        assert_eq!(compositor.resize(&layout(), log), Strategy::Buffered);
        compositor
    }

    /// Strip plus a small margin for glyphs that overhang it when drawn direct.
    fn in_strip(layout: &LayoutConfig, p: Point) -> bool {
        SLOTS.iter().any(|&slot| strip_rect(layout, slot).offset(3).contains(p))
    }

    #[test]
    fn test_layer_clips_and_blits() {
        let area = Rectangle::new(Point::new(0, 50), Size::new(20, 10));
        let mut layer = Layer::try_new(area).expect("alloc");
        layer.fill_solid(&Rectangle::new(Point::new(5, 40), Size::new(5, 15)), Rgb565::RED).ok();
        assert_eq!(layer.pixel(Point::new(5, 50)), Some(Rgb565::RED));
        assert_eq!(layer.pixel(Point::new(5, 54)), Some(Rgb565::RED));
        assert_eq!(layer.pixel(Point::new(5, 55)), Some(Rgb565::BLACK));
        assert_eq!(layer.pixel(Point::new(5, 49)), None);

        let mut display = RecordingDisplay::new(Size::new(40, 80));
        layer.blit(&mut display, &Rectangle::new(Point::new(0, 0), Size::new(8, 80)));
        assert_eq!(display.writes, 8 * 10, "blit limited to layer and area overlap");
        assert_eq!(display.pixel(Point::new(6, 52)), Some(Rgb565::RED));
        assert_eq!(display.pixel(Point::new(4, 52)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_layer_copy_from() {
        let mut background = Layer::try_new(Rectangle::new(Point::zero(), Size::new(30, 30))).expect("alloc");
        background.fill_solid(&Rectangle::new(Point::new(0, 12), Size::new(30, 1)), Rgb565::GREEN).ok();
        let mut strip = Layer::try_new(Rectangle::new(Point::new(0, 10), Size::new(30, 5))).expect("alloc");
        strip.copy_from(&background);
        assert_eq!(strip.pixel(Point::new(17, 12)), Some(Rgb565::GREEN));
        assert_eq!(strip.pixel(Point::new(17, 11)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_unavailable_buffering_draws_direct() {
        let mut log = EventLog::new();
        let mut compositor = FrameCompositor::new(Buffering::Unavailable);
        assert_eq!(compositor.resize(&layout(), &mut log), Strategy::Direct);
        assert!(!log.is_empty(), "strategy choice is logged");

        let scene = scene_at(&discrete(), 10, 10);
        let mut display = RecordingDisplay::new(layout().size());
        assert_eq!(compositor.render(&mut display, &layout(), &scene, FrameKind::Full), FrameKind::Full);
        assert_eq!(
            compositor.render(&mut display, &layout(), &scene, FrameKind::Partial),
            FrameKind::Full,
            "direct strategy has no partial path"
        );
    }

    #[test]
    fn test_buffered_full_matches_direct_outside_strips() {
        let mut log = EventLog::new();
        let layout = layout();
        let scene = scene_at(&Settings::default(), 10, 25);

        let mut compositor = buffered(&mut log);
        let mut buffered_display = RecordingDisplay::new(layout.size());
        compositor.render(&mut buffered_display, &layout, &scene, FrameKind::Full);

        let mut direct_display = RecordingDisplay::new(layout.size());
        draw_direct(&mut direct_display, &layout, &scene);

        for y in 0..layout.height as i32 {
            for x in 0..layout.width as i32 {
                let p = Point::new(x, y);
                if !in_strip(&layout, p) {
                    assert_eq!(buffered_display.pixel(p), direct_display.pixel(p), "at {p:?}");
                }
            }
        }
        let text = Theme::Dark.color(ColorRole::Text);
        let top = strip_rect(&layout, FieldSlot::Top);
        assert!(
            top.points().any(|p| buffered_display.pixel(p) == Some(text)),
            "date text drawn into the top strip"
        );
    }

    #[test]
    fn test_partial_matches_full_and_touches_less() {
        let mut log = EventLog::new();
        let layout = layout();
        let settings = discrete();

        let mut compositor = buffered(&mut log);
        let mut display = RecordingDisplay::new(layout.size());
        compositor.render(&mut display, &layout, &scene_at(&settings, 10, 10), FrameKind::Full);
        let full_writes = display.writes;

        display.reset_writes();
        let next = scene_at(&settings, 10, 11);
        assert_eq!(compositor.plan(FrameKind::Partial, &next.hands), FrameKind::Partial);
        assert_eq!(compositor.render(&mut display, &layout, &next, FrameKind::Partial), FrameKind::Partial);
        assert!(display.writes < full_writes / 2, "{} vs {}", display.writes, full_writes);

        let mut fresh = buffered(&mut log);
        let mut expected = RecordingDisplay::new(layout.size());
        fresh.render(&mut expected, &layout, &next, FrameKind::Full);
        for p in Rectangle::new(Point::zero(), layout.size()).points() {
            assert_eq!(display.pixel(p), expected.pixel(p), "at {p:?}");
        }
    }

    #[test]
    fn test_partial_before_full_is_full() {
        let mut log = EventLog::new();
        let compositor = buffered(&mut log);
        let scene = scene_at(&discrete(), 3, 0);
        assert_eq!(compositor.plan(FrameKind::Partial, &scene.hands), FrameKind::Full);
    }

    #[test]
    fn test_moved_hour_hand_forces_full() {
        let mut log = EventLog::new();
        let layout = layout();
        let settings = Settings::default();
        let mut compositor = buffered(&mut log);
        let mut display = RecordingDisplay::new(layout.size());
        compositor.render(&mut display, &layout, &scene_at(&settings, 10, 10), FrameKind::Full);
        // Smooth hands: the hour hand moves with every minute
        let next = scene_at(&settings, 10, 11);
        assert_eq!(compositor.plan(FrameKind::Partial, &next.hands), FrameKind::Full);
    }

    #[test]
    fn test_power_budget_latch_is_one_way() {
        let mut log = EventLog::new();
        let layout = layout();
        let settings = discrete();
        let mut compositor = buffered(&mut log);
        let mut display = RecordingDisplay::new(layout.size());
        let scene = scene_at(&settings, 8, 0);
        compositor.render(&mut display, &layout, &scene, FrameKind::Full);

        assert!(compositor.disable_partial_updates());
        assert!(!compositor.disable_partial_updates(), "already latched");
        assert!(!compositor.partial_updates_enabled());

        compositor.enter_sleep();
        compositor.exit_sleep();
        compositor.resize(&layout, &mut log);
        compositor.render(&mut display, &layout, &scene, FrameKind::Full);
        assert_eq!(compositor.plan(FrameKind::Partial, &scene.hands), FrameKind::Full);
    }

    #[test]
    fn test_invalidate_forces_full() {
        let mut log = EventLog::new();
        let layout = layout();
        let mut compositor = buffered(&mut log);
        let mut display = RecordingDisplay::new(layout.size());
        let scene = scene_at(&discrete(), 8, 0);
        compositor.render(&mut display, &layout, &scene, FrameKind::Full);
        assert_eq!(compositor.plan(FrameKind::Partial, &scene.hands), FrameKind::Partial);
        compositor.invalidate();
        assert_eq!(compositor.plan(FrameKind::Partial, &scene.hands), FrameKind::Full);
    }

    #[test]
    fn test_sleep_transitions() {
        let mut compositor = FrameCompositor::new(Buffering::Available);
        assert_eq!(compositor.power_state(), PowerState::AwakeFull);
        assert!(compositor.enter_sleep());
        assert!(!compositor.enter_sleep());
        assert_eq!(compositor.power_state(), PowerState::AwakeSleeping);
        assert_eq!(compositor.power_state().full_redraw_period_secs(), 60);
        assert!(compositor.exit_sleep());
        assert_eq!(compositor.power_state().full_redraw_period_secs(), 1);
    }

    #[test]
    fn test_minute_bounds_cover_arbor() {
        let layout = layout();
        let scene = scene_at(&discrete(), 6, 30);
        let bounds = minute_bounds(&layout, &scene);
        let arbor = square_around(layout.center, layout.arbor_radius);
        assert!(bounds.contains(arbor.top_left));
        assert!(arbor.bottom_right().is_some_and(|br| bounds.contains(br)));
    }
}
