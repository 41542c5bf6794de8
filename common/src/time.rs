//! Wall-clock and calendar values supplied by the host time source.
//!
//! The core never reads a clock itself; the host hands a fresh [`ClockTime`]
//! and [`CalendarDate`] to every update callback.

/// Wall-clock time of day (24h).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClockTime {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
}

impl ClockTime {
    /// Create a time, wrapping out-of-range components into range.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// Advance by `minutes`, wrapping at midnight.
    pub const fn add_minutes(self, minutes: u32) -> Self {
        let total = (self.hour as u32 * 60 + self.minute as u32 + minutes) % 1440;
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

/// Day of the week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Weekday {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Three-letter uppercase abbreviation shown in the date field.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "SUN",
            Self::Monday => "MON",
            Self::Tuesday => "TUE",
            Self::Wednesday => "WED",
            Self::Thursday => "THU",
            Self::Friday => "FRI",
            Self::Saturday => "SAT",
        }
    }

    /// Weekday for a count of days since 1970-01-01 (a Thursday).
    pub const fn from_days_since_epoch(days: u64) -> Self {
        Self::ALL[((days + 4) % 7) as usize]
    }
}

/// Calendar date shown in the top field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    pub weekday: Weekday,
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
}

impl CalendarDate {
    pub const fn new(weekday: Weekday, day: u8, month: u8) -> Self {
        Self { weekday, day, month }
    }

    /// Civil date for a count of days since 1970-01-01.
    pub const fn from_days_since_epoch(days: u64) -> Self {
        // Howard Hinnant's days-to-civil, restricted to non-negative days
        let z = days as i64 + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        Self {
            weekday: Weekday::from_days_since_epoch(days),
            day,
            month,
        }
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::from_days_since_epoch(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_wraps_components() {
        assert_eq!(ClockTime::new(25, 61), ClockTime::new(1, 1));
    }

    #[test]
    fn test_add_minutes_wraps_midnight() {
        assert_eq!(ClockTime::new(23, 59).add_minutes(1), ClockTime::new(0, 0));
        assert_eq!(ClockTime::new(10, 10).add_minutes(50), ClockTime::new(11, 0));
    }

    #[test]
    fn test_epoch_date() {
        let date = CalendarDate::from_days_since_epoch(0);
        assert_eq!(date, CalendarDate::new(Weekday::Thursday, 1, 1));
    }

    #[test]
    fn test_known_date() {
        // 2024-02-29 is day 19782 since the epoch, a Thursday
        let date = CalendarDate::from_days_since_epoch(19_782);
        assert_eq!(date, CalendarDate::new(Weekday::Thursday, 29, 2));
        // 2026-10-18 is a Sunday
        let date = CalendarDate::from_days_since_epoch(20_744);
        assert_eq!(date, CalendarDate::new(Weekday::Sunday, 18, 10));
    }
}
