//! Simulator configuration: screen list, timing, and command-line options.
//!
//! ```text
//! watchface-simulator [HH:MM] [--light] [--discrete] [--gauge N] [--out DIR]
//! ```

use std::path::PathBuf;

use watchface_common::settings::HandMode;
use watchface_common::{ClockTime, GaugeSource, RawSettings, Theme};

// =============================================================================
// Display Configuration
// =============================================================================

/// Round wearable resolutions rendered in headless mode.
pub const SCREEN_SIZES: [(u32, u32); 7] = [
    (208, 208),
    (218, 218),
    (240, 240),
    (260, 260),
    (280, 280),
    (390, 390),
    (416, 416),
];

// =============================================================================
// Timing Configuration
// =============================================================================

/// Simulated minutes rendered per screen size in headless mode.
pub const SIMULATED_MINUTES: u32 = 30;

/// Host tick while sleeping: one partial update per second.
pub const SLEEP_TICK_SECS: u32 = 1;

// =============================================================================
// Command Line
// =============================================================================

/// Options parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub start: ClockTime,
    pub settings: RawSettings,
    pub out_dir: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start: ClockTime::new(10, 10),
            settings: RawSettings::default(),
            out_dir: PathBuf::from("snapshots"),
        }
    }
}

impl SimConfig {
    /// Parse arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--light" => config.settings.theme = Theme::Light.as_u8(),
                "--discrete" => config.settings.hand_mode = HandMode::Discrete.as_u8(),
                "--gauge" => {
                    let value = args.next().ok_or("--gauge needs a value")?;
                    let mode: u8 = value.parse().map_err(|_| format!("bad gauge mode: {value}"))?;
                    if mode >= GaugeSource::COUNT {
                        return Err(format!("gauge mode must be 0-{}", GaugeSource::COUNT - 1));
                    }
                    config.settings.gauge_mode = mode;
                }
                "--out" => {
                    config.out_dir = args.next().ok_or("--out needs a directory")?.into();
                }
                time => config.start = parse_time(time)?,
            }
        }
        Ok(config)
    }
}

/// Parse `HH:MM`.
fn parse_time(s: &str) -> Result<ClockTime, String> {
    let (h, m) = s.split_once(':').ok_or_else(|| format!("expected HH:MM, got {s}"))?;
    let hour: u8 = h.parse().map_err(|_| format!("bad hour: {h}"))?;
    let minute: u8 = m.parse().map_err(|_| format!("bad minute: {m}"))?;
    if hour > 23 || minute > 59 {
        return Err(format!("time out of range: {s}"));
    }
    Ok(ClockTime::new(hour, minute))
}
