//! Device reading snapshot handed to the renderer each frame.
//!
//! Every reading is optional. A sensor the device lacks, a value the host
//! could not read, and a read that failed are all the same `None`; the
//! renderer substitutes a neutral default and keeps drawing.

/// Move-bar level at which the arbor switches to the alert color.
pub const MOVE_ALERT_LEVEL: u8 = 1;

/// Read-only device readings for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Battery charge, 0.0-100.0.
    pub battery_percent: Option<f32>,
    pub charging: bool,
    /// Phone link over Bluetooth.
    pub phone_connected: bool,
    pub notification_count: Option<u32>,
    pub heart_rate: Option<u32>,
    pub steps: Option<u32>,
    pub step_goal: Option<u32>,
    pub active_minutes_week: Option<u32>,
    pub active_minutes_week_goal: Option<u32>,
    pub floors_climbed: Option<u32>,
    pub floors_climbed_goal: Option<u32>,
    pub calories: Option<u32>,
    pub active_calories: Option<u32>,
    /// Inactivity indicator, 0 = recently active.
    pub move_bar_level: Option<u8>,
}

impl SensorSnapshot {
    /// Snapshot with every reading absent.
    pub const fn empty() -> Self {
        Self {
            battery_percent: None,
            charging: false,
            phone_connected: false,
            notification_count: None,
            heart_rate: None,
            steps: None,
            step_goal: None,
            active_minutes_week: None,
            active_minutes_week_goal: None,
            floors_climbed: None,
            floors_climbed_goal: None,
            calories: None,
            active_calories: None,
            move_bar_level: None,
        }
    }

    /// Whether the inactivity alert is raised.
    #[inline]
    pub fn move_alert(&self) -> bool {
        self.move_bar_level.is_some_and(|level| level >= MOVE_ALERT_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matches_default() {
        assert_eq!(SensorSnapshot::empty(), SensorSnapshot::default());
    }

    #[test]
    fn test_move_alert() {
        let mut snapshot = SensorSnapshot::empty();
        assert!(!snapshot.move_alert(), "absent level is not an alert");
        snapshot.move_bar_level = Some(0);
        assert!(!snapshot.move_alert());
        snapshot.move_bar_level = Some(1);
        assert!(snapshot.move_alert());
        snapshot.move_bar_level = Some(5);
        assert!(snapshot.move_alert());
    }
}
