//! User settings: raw host values and their validated, typed form.
//!
//! The host settings store delivers plain integers and booleans
//! ([`RawSettings`]). They are validated once per settings load: any
//! enumerated value outside its range resets to index 0, and any calorie goal
//! outside `[floor, CALORIE_GOAL_MAX]` resets to its default. Validation never
//! alters an in-range value. The typed [`Settings`] built from the validated
//! raw values is what the renderer reads.

use crate::progress::GaugeSource;
use crate::theme::Theme;

// =============================================================================
// Calorie Goal Limits
// =============================================================================

/// Default overall daily calorie goal.
pub const CALORIE_GOAL_DEFAULT: u32 = 2400;

/// Smallest accepted overall calorie goal.
pub const CALORIE_GOAL_MIN: u32 = 1000;

/// Default active calorie goal.
pub const ACTIVE_CALORIE_GOAL_DEFAULT: u32 = 750;

/// Smallest accepted active calorie goal.
pub const ACTIVE_CALORIE_GOAL_MIN: u32 = 200;

/// Largest accepted value for either calorie goal.
pub const CALORIE_GOAL_MAX: u32 = 20_000;

const _: () = assert!(CALORIE_GOAL_MIN <= CALORIE_GOAL_DEFAULT);
const _: () = assert!(CALORIE_GOAL_DEFAULT <= CALORIE_GOAL_MAX);
const _: () = assert!(ACTIVE_CALORIE_GOAL_MIN <= ACTIVE_CALORIE_GOAL_DEFAULT);
const _: () = assert!(ACTIVE_CALORIE_GOAL_DEFAULT <= CALORIE_GOAL_MAX);

// =============================================================================
// Enumerated Settings
// =============================================================================

/// Hour hand motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandMode {
    /// Hour hand advances continuously with the minutes.
    #[default]
    Smooth,
    /// Hour hand jumps once per hour.
    Discrete,
}

impl HandMode {
    pub const COUNT: u8 = 2;

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Smooth => 0,
            Self::Discrete => 1,
        }
    }

    pub const fn from_u8(n: u8) -> Self {
        match n {
            1 => Self::Discrete,
            _ => Self::Smooth,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Smooth => Self::Discrete,
            Self::Discrete => Self::Smooth,
        }
    }
}

/// Content of a text field slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// The slot's native content: date on top, notification count on the bottom.
    #[default]
    Default,
    Steps,
    HeartRate,
    Battery,
    Calories,
    ActiveCalories,
}

impl FieldMode {
    pub const COUNT: u8 = 6;

    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Steps,
        Self::HeartRate,
        Self::Battery,
        Self::Calories,
        Self::ActiveCalories,
    ];

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Steps => 1,
            Self::HeartRate => 2,
            Self::Battery => 3,
            Self::Calories => 4,
            Self::ActiveCalories => 5,
        }
    }

    pub const fn from_u8(n: u8) -> Self {
        match n {
            1 => Self::Steps,
            2 => Self::HeartRate,
            3 => Self::Battery,
            4 => Self::Calories,
            5 => Self::ActiveCalories,
            _ => Self::Default,
        }
    }
}

// =============================================================================
// Typed Settings
// =============================================================================

/// User-configurable calorie goals (not provided by the device).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalorieGoals {
    pub overall: u32,
    pub active: u32,
}

impl Default for CalorieGoals {
    fn default() -> Self {
        Self {
            overall: CALORIE_GOAL_DEFAULT,
            active: ACTIVE_CALORIE_GOAL_DEFAULT,
        }
    }
}

/// Independent switches, each gating a whole draw step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub top_field: bool,
    pub gauge: bool,
    pub bottom_field: bool,
    /// Gates the minute hand and the arbor together.
    pub minute_hand: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            top_field: true,
            gauge: true,
            bottom_field: true,
            minute_hand: true,
        }
    }
}

/// Validated settings read by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Settings {
    pub hand_mode: HandMode,
    pub gauge_source: GaugeSource,
    pub top_field: FieldMode,
    pub bottom_field: FieldMode,
    pub theme: Theme,
    pub calorie_goals: CalorieGoals,
    pub visibility: Visibility,
}

impl Settings {
    /// Validate `raw` and convert it.
    pub fn from_raw(mut raw: RawSettings) -> Self {
        raw.validate();
        Self {
            hand_mode: HandMode::from_u8(raw.hand_mode),
            gauge_source: GaugeSource::from_u8(raw.gauge_mode),
            top_field: FieldMode::from_u8(raw.top_field),
            bottom_field: FieldMode::from_u8(raw.bottom_field),
            theme: Theme::from_u8(raw.theme),
            calorie_goals: CalorieGoals {
                overall: raw.calorie_goal as u32,
                active: raw.active_calorie_goal as u32,
            },
            visibility: Visibility {
                top_field: raw.show_top_field,
                gauge: raw.show_gauge,
                bottom_field: raw.show_bottom_field,
                minute_hand: raw.show_minute_hand,
            },
        }
    }

    /// Raw form of these settings, as the host would store them.
    pub const fn to_raw(&self) -> RawSettings {
        RawSettings {
            hand_mode: self.hand_mode.as_u8(),
            gauge_mode: self.gauge_source.as_u8(),
            top_field: self.top_field.as_u8(),
            bottom_field: self.bottom_field.as_u8(),
            theme: self.theme.as_u8(),
            calorie_goal: self.calorie_goals.overall as i32,
            active_calorie_goal: self.calorie_goals.active as i32,
            show_top_field: self.visibility.top_field,
            show_gauge: self.visibility.gauge,
            show_bottom_field: self.visibility.bottom_field,
            show_minute_hand: self.visibility.minute_hand,
        }
    }
}

// =============================================================================
// Raw Settings
// =============================================================================

/// Settings exactly as delivered by the host settings store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSettings {
    pub hand_mode: u8,
    pub gauge_mode: u8,
    pub top_field: u8,
    pub bottom_field: u8,
    pub theme: u8,
    pub calorie_goal: i32,
    pub active_calorie_goal: i32,
    pub show_top_field: bool,
    pub show_gauge: bool,
    pub show_bottom_field: bool,
    pub show_minute_hand: bool,
}

impl Default for RawSettings {
    fn default() -> Self {
        Settings::default().to_raw()
    }
}

#[inline]
fn reset_enum(value: &mut u8, count: u8) -> u8 {
    if *value >= count {
        *value = 0;
        1
    } else {
        0
    }
}

#[inline]
fn reset_goal(value: &mut i32, min: u32, default: u32) -> u8 {
    if *value < min as i32 || *value > CALORIE_GOAL_MAX as i32 {
        *value = default as i32;
        1
    } else {
        0
    }
}

impl RawSettings {
    /// Reset every out-of-range field to its default.
    ///
    /// Returns the number of fields that were reset.
    pub fn validate(&mut self) -> u8 {
        reset_enum(&mut self.hand_mode, HandMode::COUNT)
            + reset_enum(&mut self.gauge_mode, GaugeSource::COUNT)
            + reset_enum(&mut self.top_field, FieldMode::COUNT)
            + reset_enum(&mut self.bottom_field, FieldMode::COUNT)
            + reset_enum(&mut self.theme, Theme::COUNT)
            + reset_goal(&mut self.calorie_goal, CALORIE_GOAL_MIN, CALORIE_GOAL_DEFAULT)
            + reset_goal(
                &mut self.active_calorie_goal,
                ACTIVE_CALORIE_GOAL_MIN,
                ACTIVE_CALORIE_GOAL_DEFAULT,
            )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.hand_mode, HandMode::Smooth);
        assert_eq!(settings.gauge_source, GaugeSource::Battery);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.calorie_goals.overall, 2400);
        assert_eq!(settings.calorie_goals.active, 750);
        assert_eq!(settings.visibility, Visibility::default());
        assert!(settings.visibility.minute_hand);
    }

    #[test]
    fn test_default_raw_is_valid() {
        let mut raw = RawSettings::default();
        assert_eq!(raw.validate(), 0);
        assert_eq!(raw, RawSettings::default());
    }

    #[test]
    fn test_out_of_range_enums_reset_to_zero() {
        let mut raw = RawSettings {
            hand_mode: 2,
            gauge_mode: 6,
            top_field: 9,
            bottom_field: 200,
            theme: 2,
            ..RawSettings::default()
        };
        assert_eq!(raw.validate(), 5);
        assert_eq!(raw.hand_mode, 0);
        assert_eq!(raw.gauge_mode, 0);
        assert_eq!(raw.top_field, 0);
        assert_eq!(raw.bottom_field, 0);
        assert_eq!(raw.theme, 0);
    }

    #[test]
    fn test_low_calorie_goal_resets_to_default() {
        let mut raw = RawSettings {
            calorie_goal: 500,
            active_calorie_goal: 100,
            ..RawSettings::default()
        };
        assert_eq!(raw.validate(), 2);
        assert_eq!(raw.calorie_goal, 2400);
        assert_eq!(raw.active_calorie_goal, 750);
    }

    #[test]
    fn test_negative_and_huge_goals_reset() {
        let mut raw = RawSettings {
            calorie_goal: -5,
            active_calorie_goal: 50_000,
            ..RawSettings::default()
        };
        raw.validate();
        assert_eq!(raw.calorie_goal, 2400);
        assert_eq!(raw.active_calorie_goal, 750);
    }

    #[test]
    fn test_goals_at_floor_are_kept() {
        let mut raw = RawSettings {
            calorie_goal: 1000,
            active_calorie_goal: 200,
            ..RawSettings::default()
        };
        assert_eq!(raw.validate(), 0);
        assert_eq!(raw.calorie_goal, 1000);
        assert_eq!(raw.active_calorie_goal, 200);
    }

    #[test]
    fn test_valid_values_never_altered() {
        for hand in 0..HandMode::COUNT {
            for gauge in 0..GaugeSource::COUNT {
                for field in 0..FieldMode::COUNT {
                    for theme in 0..Theme::COUNT {
                        let original = RawSettings {
                            hand_mode: hand,
                            gauge_mode: gauge,
                            top_field: field,
                            bottom_field: FieldMode::COUNT - 1 - field,
                            theme,
                            calorie_goal: 3000,
                            active_calorie_goal: 900,
                            show_top_field: hand == 0,
                            show_gauge: gauge % 2 == 0,
                            show_bottom_field: theme == 1,
                            show_minute_hand: field > 2,
                        };
                        let mut raw = original;
                        assert_eq!(raw.validate(), 0);
                        assert_eq!(raw, original);
                        assert_eq!(Settings::from_raw(original).to_raw(), original);
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_raw_maps_fields() {
        let raw = RawSettings {
            hand_mode: 1,
            gauge_mode: 3,
            top_field: 2,
            bottom_field: 5,
            theme: 1,
            show_gauge: false,
            ..RawSettings::default()
        };
        let settings = Settings::from_raw(raw);
        assert_eq!(settings.hand_mode, HandMode::Discrete);
        assert_eq!(settings.gauge_source, GaugeSource::FloorsClimbed);
        assert_eq!(settings.top_field, FieldMode::HeartRate);
        assert_eq!(settings.bottom_field, FieldMode::ActiveCalories);
        assert_eq!(settings.theme, Theme::Light);
        assert!(!settings.visibility.gauge);
    }

    #[test]
    fn test_enum_round_trip() {
        for mode in FieldMode::ALL {
            assert_eq!(FieldMode::from_u8(mode.as_u8()), mode);
        }
        assert_eq!(HandMode::Smooth.toggle(), HandMode::Discrete);
        assert_eq!(HandMode::Discrete.toggle(), HandMode::Smooth);
    }
}
