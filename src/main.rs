// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

//! Desktop simulator for the responsive analog watchface.
//!
//! Drives a [`WatchFace`](watchface_common::WatchFace) the way a wearable host
//! would: layout, then full updates, with partial updates while sleeping.
//! Sensor data is generated by [`demo`].
//!
//! # Modes
//!
//! - **Headless** (default): renders every resolution in
//!   [`config::SCREEN_SIZES`] for [`config::SIMULATED_MINUTES`] simulated
//!   minutes, saves the last frame of each as a PNG, and prints the event log
//!   and render timings.
//! - **Window** (`--features window`): opens an SDL window and runs the face
//!   interactively.
//!
//! # Controls (Window Mode)
//!
//! | Key | Action |
//! |-----|--------|
//! | `S` | Toggle sleep (full redraw per minute, partial otherwise) |
//! | `T` | Toggle theme |
//! | `G` | Next gauge data source |
//! | `H` | Toggle smooth/discrete hour hand |
//! | `P` | Signal power budget exceeded (partial updates off for good) |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! # Usage
//!
//! ```text
//! watchface-simulator 10:10 --light --gauge 1 --out snapshots
//! ```

mod config;
mod demo;
mod profiling;
#[cfg(not(feature = "window"))]
mod snapshots;
#[cfg(feature = "window")]
mod window;

use std::process::ExitCode;

use watchface_common::event_log::EventLog;

use crate::config::SimConfig;

const USAGE: &str = "usage: watchface-simulator [HH:MM] [--light] [--discrete] [--gauge 0-5] [--out DIR]";

fn main() -> ExitCode {
    let config = match SimConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    run(&config)
}

#[cfg(not(feature = "window"))]
fn run(config: &SimConfig) -> ExitCode {
    snapshots::run(config)
}

#[cfg(feature = "window")]
fn run(config: &SimConfig) -> ExitCode {
    window::run(config)
}

/// Print and remove every pending log entry.
fn print_log(log: &mut EventLog) {
    for entry in log.drain() {
        println!("  [{}] #{:<5} {}", entry.level.prefix(), entry.frame, entry.message);
    }
}
