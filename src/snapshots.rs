//! Headless run: one simulated half hour per screen size, saved as PNG.

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use watchface_common::{Buffering, WatchFace};

use crate::config::{SCREEN_SIZES, SIMULATED_MINUTES, SLEEP_TICK_SECS, SimConfig};
use crate::demo::demo_input;
use crate::print_log;
use crate::profiling::ProfilingMetrics;

pub fn run(config: &SimConfig) -> ExitCode {
    if let Err(e) = fs::create_dir_all(&config.out_dir) {
        eprintln!("error: cannot create {}: {e}", config.out_dir.display());
        return ExitCode::FAILURE;
    }

    let mut failures = 0;
    for (width, height) in SCREEN_SIZES {
        println!("{width}x{height}");

        let mut face = WatchFace::new(config.settings, Buffering::Available);
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(width, height));
        let mut metrics = ProfilingMetrics::new();

        face.on_layout(width, height);

        // Awake: one full frame
        let start = Instant::now();
        let kind = face.on_update(&mut display, &demo_input(config.start, 0));
        metrics.record_frame(kind, start.elapsed());

        // Asleep: a full frame per redraw period, partial updates in between
        face.on_enter_sleep();
        let partials = face.power_state().full_redraw_period_secs() / SLEEP_TICK_SECS - 1;
        for minute in 1..=SIMULATED_MINUTES {
            let input = demo_input(config.start, minute);
            let start = Instant::now();
            let kind = face.on_update(&mut display, &input);
            metrics.record_frame(kind, start.elapsed());

            for _ in 0..partials {
                let start = Instant::now();
                let kind = face.on_partial_update(&mut display, &input);
                metrics.record_frame(kind, start.elapsed());
            }
        }
        face.on_exit_sleep();

        print_log(face.log_mut());
        println!("  {}", metrics.summary());

        let path = config.out_dir.join(format!("watchface_{width}x{height}.png"));
        match display.to_rgb_output_image(&OutputSettingsBuilder::new().build()).save_png(&path) {
            Ok(()) => println!("  saved {}", path.display()),
            Err(e) => {
                eprintln!("  error: cannot save {}: {e}", path.display());
                failures += 1;
            }
        }
    }

    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
