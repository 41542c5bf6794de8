//! Text content of the top and bottom field slots.

use core::fmt::Write;

use heapless::String;

use crate::sensors::SensorSnapshot;
use crate::settings::FieldMode;
use crate::time::CalendarDate;

/// Longest field text, e.g. `"4294967295"`.
pub const FIELD_TEXT_LEN: usize = 16;

/// Field text buffer.
pub type FieldText = String<FIELD_TEXT_LEN>;

/// Which of the two text strips a field occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSlot {
    /// Strip centered at `date_y_ratio * height`.
    Top,
    /// Strip centered at `notification_y_ratio * height`.
    Bottom,
}

/// Text shown in `slot` for `mode`. Empty when the reading is absent.
pub fn field_text(
    slot: FieldSlot,
    mode: FieldMode,
    date: CalendarDate,
    sensors: &SensorSnapshot,
) -> FieldText {
    let mut text = FieldText::new();
    match mode {
        FieldMode::Default => match slot {
            FieldSlot::Top => {
                write!(text, "{} {}", date.weekday.abbreviation(), date.day).ok();
            }
            FieldSlot::Bottom => push_nonzero(&mut text, sensors.notification_count),
        },
        FieldMode::Steps => push_value(&mut text, sensors.steps),
        FieldMode::HeartRate => push_value(&mut text, sensors.heart_rate),
        FieldMode::Battery => {
            if let Some(percent) = sensors.battery_percent {
                let whole = micromath::F32(percent).round().0 as u32;
                write!(text, "{}%", whole.min(100)).ok();
            }
        }
        FieldMode::Calories => push_value(&mut text, sensors.calories),
        FieldMode::ActiveCalories => push_value(&mut text, sensors.active_calories),
    }
    text
}

fn push_value(
    text: &mut FieldText,
    value: Option<u32>,
) {
    if let Some(v) = value {
        write!(text, "{v}").ok();
    }
}

fn push_nonzero(
    text: &mut FieldText,
    value: Option<u32>,
) {
    push_value(text, value.filter(|&v| v > 0));
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Weekday;

    fn date() -> CalendarDate {
        CalendarDate::new(Weekday::Sunday, 18, 10)
    }

    fn sensors() -> SensorSnapshot {
        SensorSnapshot {
            battery_percent: Some(56.6),
            notification_count: Some(3),
            heart_rate: Some(72),
            steps: Some(8421),
            calories: Some(1830),
            active_calories: Some(412),
            ..SensorSnapshot::empty()
        }
    }

    #[test]
    fn test_default_top_is_date() {
        let text = field_text(FieldSlot::Top, FieldMode::Default, date(), &sensors());
        assert_eq!(text.as_str(), "SUN 18");
    }

    #[test]
    fn test_default_bottom_is_notifications() {
        let text = field_text(FieldSlot::Bottom, FieldMode::Default, date(), &sensors());
        assert_eq!(text.as_str(), "3");
    }

    #[test]
    fn test_zero_notifications_empty() {
        let mut s = sensors();
        s.notification_count = Some(0);
        assert!(field_text(FieldSlot::Bottom, FieldMode::Default, date(), &s).is_empty());
        s.notification_count = None;
        assert!(field_text(FieldSlot::Bottom, FieldMode::Default, date(), &s).is_empty());
    }

    #[test]
    fn test_metric_modes() {
        let s = sensors();
        let text = |mode| field_text(FieldSlot::Top, mode, date(), &s);
        assert_eq!(text(FieldMode::Steps).as_str(), "8421");
        assert_eq!(text(FieldMode::HeartRate).as_str(), "72");
        assert_eq!(text(FieldMode::Battery).as_str(), "57%");
        assert_eq!(text(FieldMode::Calories).as_str(), "1830");
        assert_eq!(text(FieldMode::ActiveCalories).as_str(), "412");
    }

    #[test]
    fn test_metric_modes_same_in_both_slots() {
        let s = sensors();
        for mode in &FieldMode::ALL[1..] {
            assert_eq!(
                field_text(FieldSlot::Top, *mode, date(), &s),
                field_text(FieldSlot::Bottom, *mode, date(), &s),
                "{mode:?}"
            );
        }
    }

    #[test]
    fn test_absent_readings_empty() {
        let s = SensorSnapshot::empty();
        for mode in &FieldMode::ALL[1..] {
            assert!(field_text(FieldSlot::Bottom, *mode, date(), &s).is_empty(), "{mode:?}");
        }
    }

    #[test]
    fn test_largest_value_fits() {
        let s = SensorSnapshot {
            steps: Some(u32::MAX),
            ..SensorSnapshot::empty()
        };
        let text = field_text(FieldSlot::Top, FieldMode::Steps, date(), &s);
        assert_eq!(text.as_str(), "4294967295");
    }
}
