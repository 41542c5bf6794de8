//! The watchface session driven by host callbacks.
//!
//! The host delivers callbacks serially: layout, full update, partial update,
//! enter/exit sleep, settings changed and power budget exceeded. Layout and
//! settings are written only by their own callbacks; update callbacks only
//! read them. Every decision worth knowing about is recorded in the session's
//! [`EventLog`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::compositor::{Buffering, FrameCompositor, FrameKind, PowerState, Strategy};
use crate::event_log::{EventLog, LogLevel};
use crate::log_fmt;
use crate::face::{FrameInput, Hands, Scene};
use crate::layout::{LayoutConfig, ScreenDimensions};
use crate::settings::{RawSettings, Settings};

/// One watchface session.
pub struct WatchFace {
    settings: Settings,
    layout: Option<LayoutConfig>,
    compositor: FrameCompositor,
    /// Scene of the last full frame, reused by partial frames.
    scene: Option<Scene>,
    log: EventLog,
    frame: u32,
}

impl WatchFace {
    /// Start a session with the host's stored settings and buffer capability.
    pub fn new(
        raw: RawSettings,
        buffering: Buffering,
    ) -> Self {
        let mut face = Self {
            settings: Settings::default(),
            layout: None,
            compositor: FrameCompositor::new(buffering),
            scene: None,
            log: EventLog::new(),
            frame: 0,
        };
        face.load_settings(raw);
        face
    }

    // =========================================================================
    // Host Callbacks
    // =========================================================================

    /// Screen size known or changed. Returns `false` for a zero-sized screen.
    ///
    /// The layout is rebuilt wholesale; a repeat of the current size is a no-op.
    pub fn on_layout(
        &mut self,
        width: u32,
        height: u32,
    ) -> bool {
        let Some(dims) = ScreenDimensions::new(width, height) else {
            log_fmt!(self.log, LogLevel::Error, "rejected layout {width}x{height}");
            return false;
        };
        if self.layout.is_some_and(|layout| layout.width == width && layout.height == height) {
            self.log.push(LogLevel::Trace, "layout unchanged");
            return true;
        }

        let layout = LayoutConfig::from_dimensions(dims);
        log_fmt!(self.log, LogLevel::Info, "layout {width}x{height} scale {:.3}", layout.scale_factor);
        let strategy = self.compositor.resize(&layout, &mut self.log);
        if strategy == Strategy::Direct {
            self.log.push(LogLevel::Debug, "partial updates unavailable");
        }
        self.layout = Some(layout);
        self.scene = None;
        true
    }

    /// Reload settings. The next frame is a full redraw.
    pub fn on_settings_changed(
        &mut self,
        raw: RawSettings,
    ) {
        self.load_settings(raw);
        self.compositor.invalidate();
        self.scene = None;
        self.log.push(LogLevel::Info, "settings reloaded");
    }

    /// Full redraw. Returns `None` before the first layout.
    pub fn on_update<D>(
        &mut self,
        display: &mut D,
        input: &FrameInput,
    ) -> Option<FrameKind>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.render(display, input, FrameKind::Full)
    }

    /// Reduced-cost redraw of the minute hand and arbor.
    ///
    /// Only the hands are computed; field text and gauge come from the last
    /// full frame. Falls back to a full frame whenever the partial path cannot
    /// be used.
    pub fn on_partial_update<D>(
        &mut self,
        display: &mut D,
        input: &FrameInput,
    ) -> Option<FrameKind>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.render(display, input, FrameKind::Partial)
    }

    pub fn on_enter_sleep(&mut self) {
        if self.compositor.enter_sleep() {
            self.log.push(LogLevel::Info, "enter sleep");
        }
    }

    pub fn on_exit_sleep(&mut self) {
        if self.compositor.exit_sleep() {
            self.log.push(LogLevel::Info, "exit sleep");
        }
    }

    /// Latch partial updates off for the rest of the session.
    pub fn on_power_budget_exceeded(&mut self) {
        if self.compositor.disable_partial_updates() {
            self.log.push(LogLevel::Warn, "power budget exceeded, partial off");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub const fn layout(&self) -> Option<&LayoutConfig> {
        self.layout.as_ref()
    }

    #[inline]
    pub const fn power_state(&self) -> PowerState {
        self.compositor.power_state()
    }

    #[inline]
    pub const fn partial_updates_enabled(&self) -> bool {
        self.compositor.partial_updates_enabled()
    }

    #[inline]
    pub const fn strategy(&self) -> Strategy {
        self.compositor.strategy()
    }

    /// Frames drawn so far.
    #[inline]
    pub const fn frame_count(&self) -> u32 {
        self.frame
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn load_settings(
        &mut self,
        mut raw: RawSettings,
    ) {
        let resets = raw.validate();
        if resets > 0 {
            log_fmt!(self.log, LogLevel::Warn, "{resets} settings reset to default");
        }
        self.settings = Settings::from_raw(raw);
    }

    fn render<D>(
        &mut self,
        display: &mut D,
        input: &FrameInput,
        requested: FrameKind,
    ) -> Option<FrameKind>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(layout) = self.layout.as_ref() else {
            self.log.push(LogLevel::Warn, "update before layout");
            return None;
        };

        self.frame = self.frame.wrapping_add(1);
        self.log.set_frame(self.frame);

        let hands = Hands::new(layout, &self.settings, input);
        let kind = match self.scene.as_mut() {
            Some(scene) if self.compositor.plan(requested, &hands) == FrameKind::Partial => {
                scene.hands = hands;
                self.compositor.render(display, layout, scene, FrameKind::Partial)
            }
            _ => {
                let scene = self.scene.insert(Scene::new(layout, &self.settings, input));
                self.compositor.render(display, layout, scene, FrameKind::Full)
            }
        };
        if kind != requested {
            self.log.push(LogLevel::Trace, "partial served as full");
        }
        Some(kind)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
