//! Fake device data for the simulator.
//!
//! Readings sweep slowly with the simulated minute so every gauge color and
//! field state shows up over an hour of simulated time.

use watchface_common::time::{CalendarDate, ClockTime};
use watchface_common::{FrameInput, SensorSnapshot};

/// 2026-10-18, a Sunday.
pub const DEMO_DAY: u64 = 20_744;

/// Generate a smoothly varying fake signal between `min` and `max`.
fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Device readings at simulated minute `t`.
pub fn demo_sensors(t: u32) -> SensorSnapshot {
    let t = t as f32;
    let steps = fake_signal(t, 0.0, 12_000.0, 0.05) as u32;
    SensorSnapshot {
        battery_percent: Some(fake_signal(t, 3.0, 100.0, 0.07)),
        charging: fake_signal(t, 0.0, 1.0, 0.02) > 0.85,
        phone_connected: fake_signal(t, 0.0, 1.0, 0.11) > 0.3,
        notification_count: Some(fake_signal(t, 0.0, 9.0, 0.13) as u32),
        heart_rate: Some(fake_signal(t, 58.0, 145.0, 0.17) as u32),
        steps: Some(steps),
        step_goal: Some(10_000),
        active_minutes_week: Some(fake_signal(t, 0.0, 180.0, 0.03) as u32),
        active_minutes_week_goal: Some(150),
        // Floors have no goal on this fake device
        floors_climbed: Some(fake_signal(t, 0.0, 14.0, 0.04) as u32),
        floors_climbed_goal: None,
        calories: Some(fake_signal(t, 600.0, 2_800.0, 0.05) as u32),
        active_calories: Some(fake_signal(t, 0.0, 900.0, 0.06) as u32),
        move_bar_level: Some(fake_signal(t, 0.0, 5.0, 0.09) as u8),
    }
}

/// Frame input `minutes` after `start` on the demo day.
pub fn demo_input(
    start: ClockTime,
    minutes: u32,
) -> FrameInput {
    let start_minutes = u32::from(start.hour) * 60 + u32::from(start.minute);
    let days = u64::from((start_minutes + minutes) / 1440);
    FrameInput {
        time: start.add_minutes(minutes),
        date: CalendarDate::from_days_since_epoch(DEMO_DAY + days),
        sensors: demo_sensors(minutes),
    }
}
