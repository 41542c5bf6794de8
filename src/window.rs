//! Interactive SDL window.
//!
//! The simulated clock advances one minute every [`TICKS_PER_MINUTE`] ticks.
//! A full update is drawn once the face's recommended redraw period has
//! passed in simulated time (every tick awake, once a minute asleep); other
//! ticks are partial updates.

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use watchface_common::settings::HandMode;
use watchface_common::{Buffering, GaugeSource, PowerState, Theme, WatchFace};

use crate::config::SimConfig;
use crate::demo::demo_input;
use crate::print_log;
use crate::profiling::ProfilingMetrics;

/// Screen used by the window.
const WINDOW_SIZE: Size = Size::new(260, 260);

/// Window pixel scale.
const WINDOW_SCALE: u32 = 2;

/// Loop period.
const TICK_TIME: Duration = Duration::from_millis(250);

/// Ticks per simulated minute.
const TICKS_PER_MINUTE: u32 = 4;

/// Simulated seconds per tick.
const SECS_PER_TICK: u32 = 60 / TICKS_PER_MINUTE;

pub fn run(config: &SimConfig) -> ExitCode {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(WINDOW_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Watchface Simulator", &output_settings);

    let mut raw = config.settings;
    let mut face = WatchFace::new(raw, Buffering::Available);
    face.on_layout(WINDOW_SIZE.width, WINDOW_SIZE.height);

    let mut metrics = ProfilingMetrics::new();
    let mut tick = 0u32;
    let mut secs_since_full = u32::MAX;

    loop {
        let tick_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    println!("{}", metrics.summary());
                    return ExitCode::SUCCESS;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::S => match face.power_state() {
                            PowerState::AwakeFull => face.on_enter_sleep(),
                            PowerState::AwakeSleeping => face.on_exit_sleep(),
                        },
                        Keycode::T => {
                            raw.theme = Theme::from_u8(raw.theme).toggle().as_u8();
                            face.on_settings_changed(raw);
                        }
                        Keycode::G => {
                            raw.gauge_mode = GaugeSource::from_u8(raw.gauge_mode).next().as_u8();
                            face.on_settings_changed(raw);
                        }
                        Keycode::H => {
                            raw.hand_mode = HandMode::from_u8(raw.hand_mode).toggle().as_u8();
                            face.on_settings_changed(raw);
                        }
                        Keycode::P => face.on_power_budget_exceeded(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let input = demo_input(config.start, tick / TICKS_PER_MINUTE);
        let full_due = secs_since_full >= face.power_state().full_redraw_period_secs();

        let render_start = Instant::now();
        let kind = if full_due {
            secs_since_full = 0;
            face.on_update(&mut display, &input)
        } else {
            face.on_partial_update(&mut display, &input)
        };
        metrics.record_frame(kind, render_start.elapsed());
        secs_since_full = secs_since_full.saturating_add(SECS_PER_TICK);

        window.update(&display);
        print_log(face.log_mut());

        tick = tick.wrapping_add(1);
        if let Some(rest) = TICK_TIME.checked_sub(tick_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
