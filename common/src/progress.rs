//! Progress values and the gauge data sources.
//!
//! Each [`GaugeSource`] variant only knows how to find its `(current, goal)`
//! pair in a [`SensorSnapshot`]. The percentage math and clamping live once,
//! in [`ProgressValue::from_ratio`]. Anything missing (no sensor, no goal,
//! zero goal) folds into a progress of 0.

use micromath::F32;

use crate::sensors::SensorSnapshot;
use crate::settings::CalorieGoals;

// =============================================================================
// Progress Value
// =============================================================================

/// Integer progress in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ProgressValue(u8);

impl ProgressValue {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Clamp a whole percentage to 100.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        if percent > 100 { Self::FULL } else { Self(percent as u8) }
    }

    /// `min(100, round(100 * current / goal))`, or 0 when `goal` is 0.
    ///
    /// Rounds half up using integer arithmetic.
    pub const fn from_ratio(current: u32, goal: u32) -> Self {
        if goal == 0 {
            return Self::ZERO;
        }
        let goal = goal as u64;
        let rounded = (200 * current as u64 + goal) / (2 * goal);
        if rounded > 100 { Self::FULL } else { Self(rounded as u8) }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

// =============================================================================
// Gauge Data Sources
// =============================================================================

/// Metric displayed by the progress gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GaugeSource {
    /// Battery charge, passed through.
    #[default]
    Battery,
    Steps,
    WeeklyActiveMinutes,
    FloorsClimbed,
    /// Calories against the user's overall calorie goal.
    Calories,
    /// Active calories against the user's active calorie goal.
    ActiveCalories,
}

impl GaugeSource {
    pub const COUNT: u8 = 6;

    pub const ALL: [Self; 6] = [
        Self::Battery,
        Self::Steps,
        Self::WeeklyActiveMinutes,
        Self::FloorsClimbed,
        Self::Calories,
        Self::ActiveCalories,
    ];

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Battery => 0,
            Self::Steps => 1,
            Self::WeeklyActiveMinutes => 2,
            Self::FloorsClimbed => 3,
            Self::Calories => 4,
            Self::ActiveCalories => 5,
        }
    }

    pub const fn from_u8(n: u8) -> Self {
        match n {
            1 => Self::Steps,
            2 => Self::WeeklyActiveMinutes,
            3 => Self::FloorsClimbed,
            4 => Self::Calories,
            5 => Self::ActiveCalories,
            _ => Self::Battery,
        }
    }

    /// Next source in settings order, wrapping.
    pub const fn next(self) -> Self {
        Self::from_u8((self.as_u8() + 1) % Self::COUNT)
    }

    /// Whether the indicator color follows the low/warning thresholds.
    #[inline]
    pub const fn multi_color(self) -> bool {
        matches!(self, Self::Battery)
    }

    /// `(current, goal)` for this metric, if both are available.
    pub fn current_and_goal(
        self,
        sensors: &SensorSnapshot,
        goals: CalorieGoals,
    ) -> Option<(u32, u32)> {
        match self {
            Self::Battery => {
                let percent = sensors.battery_percent?;
                // Saturating cast: NaN and negatives become 0
                Some((F32(percent).round().0 as u32, 100))
            }
            Self::Steps => Some((sensors.steps?, sensors.step_goal?)),
            Self::WeeklyActiveMinutes => {
                Some((sensors.active_minutes_week?, sensors.active_minutes_week_goal?))
            }
            Self::FloorsClimbed => Some((sensors.floors_climbed?, sensors.floors_climbed_goal?)),
            Self::Calories => Some((sensors.calories?, goals.overall)),
            Self::ActiveCalories => Some((sensors.active_calories?, goals.active)),
        }
    }

    /// Progress toward the goal, 0 when anything is missing.
    pub fn progress(
        self,
        sensors: &SensorSnapshot,
        goals: CalorieGoals,
    ) -> ProgressValue {
        self.current_and_goal(sensors, goals)
            .map_or(ProgressValue::ZERO, |(current, goal)| ProgressValue::from_ratio(current, goal))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
