//! Simulated clock and time-of-day arrival rates

use rand::Rng;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

use super::types::MINUTES_PER_DAY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockParseError {
    #[error("expected a time like 7:00AM, got {0:?}")]
    Format(String),
    #[error("hour must be 1-12, got {0}")]
    Hour(u32),
    #[error("minute must be 0-59, got {0}")]
    Minute(u32),
}

/// Time of day in whole minutes, wrapping at midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimClock {
    minutes: u32,
}

impl SimClock {
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        Self {
            minutes: (hour * 60 + minute) % MINUTES_PER_DAY,
        }
    }

    /// Parse a 12-hour time such as `7:00AM` or `03:45pm`
    pub fn parse(text: &str) -> Result<Self, ClockParseError> {
        let format_error = || ClockParseError::Format(text.to_string());
        let trimmed = text.trim();
        if trimmed.len() < 3 || !trimmed.is_char_boundary(trimmed.len() - 2) {
            return Err(format_error());
        }

        let (time, meridiem) = trimmed.split_at(trimmed.len() - 2);
        let pm = match meridiem.to_ascii_uppercase().as_str() {
            "AM" => false,
            "PM" => true,
            _ => return Err(format_error()),
        };

        let (hour, minute) = time.trim().split_once(':').ok_or_else(format_error)?;
        let hour: u32 = hour.parse().map_err(|_| format_error())?;
        let minute: u32 = minute.parse().map_err(|_| format_error())?;
        if !(1..=12).contains(&hour) {
            return Err(ClockParseError::Hour(hour));
        }
        if minute > 59 {
            return Err(ClockParseError::Minute(minute));
        }

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Ok(Self::from_hm(hour, minute))
    }

    /// Move forward one minute
    pub fn advance(&mut self) {
        self.minutes = (self.minutes + 1) % MINUTES_PER_DAY;
    }

    /// Hour of day, 0-23
    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }
}

impl FromStr for SimClock {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if self.hour() < 12 { "AM" } else { "PM" };
        write!(f, "{:02}:{:02}{}", hour, self.minute(), meridiem)
    }
}

/// How many vehicles arrive per minute, by hour of day
#[derive(Debug, Clone)]
pub struct ArrivalSchedule {
    windows: Vec<(Range<u32>, (u32, u32))>,
}

impl Default for ArrivalSchedule {
    /// Quiet nights, a morning bump and an afternoon rush
    fn default() -> Self {
        Self::new(vec![
            (0..7, (0, 0)),
            (7..9, (0, 3)),
            (9..13, (0, 2)),
            (13..15, (0, 3)),
            (15..18, (2, 6)),
            (18..20, (0, 3)),
            (20..23, (0, 2)),
            (23..25, (0, 0)),
        ])
    }
}

impl ArrivalSchedule {
    /// Windows are checked in order; the first containing the hour wins
    pub fn new(windows: Vec<(Range<u32>, (u32, u32))>) -> Self {
        Self { windows }
    }

    /// Schedule with the same range all day
    pub fn constant(min: u32, max: u32) -> Self {
        Self::new(vec![(0..24, (min, max))])
    }

    /// Inclusive arrival range for an hour, `(0, 0)` if no window matches
    pub fn arrival_range(&self, hour: u32) -> (u32, u32) {
        self.windows
            .iter()
            .find(|(hours, _)| hours.contains(&hour))
            .map(|(_, range)| *range)
            .unwrap_or((0, 0))
    }

    pub fn draw_arrivals<R: Rng + ?Sized>(&self, hour: u32, rng: &mut R) -> u32 {
        let (min, max) = self.arrival_range(hour);
        if min >= max {
            return min;
        }
        rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clock_parse_and_display() {
        let clock = SimClock::parse("7:00AM").unwrap();
        assert_eq!(clock.hour(), 7);
        assert_eq!(clock.to_string(), "07:00AM");

        assert_eq!(SimClock::parse("12:00AM").unwrap().hour(), 0);
        assert_eq!(SimClock::parse("12:30PM").unwrap().to_string(), "12:30PM");
        assert_eq!(SimClock::parse("3:45pm").unwrap().hour(), 15);
    }

    #[test]
    fn test_clock_parse_errors() {
        assert!(matches!(SimClock::parse("700"), Err(ClockParseError::Format(_))));
        assert!(matches!(SimClock::parse("7:00XM"), Err(ClockParseError::Format(_))));
        assert_eq!(SimClock::parse("13:00PM"), Err(ClockParseError::Hour(13)));
        assert_eq!(SimClock::parse("1:75AM"), Err(ClockParseError::Minute(75)));
    }

    #[test]
    fn test_clock_wraps_at_midnight() {
        let mut clock = SimClock::parse("11:59PM").unwrap();
        clock.advance();
        assert_eq!(clock.to_string(), "12:00AM");
        assert_eq!(clock.hour(), 0);
    }

    #[test]
    fn test_default_schedule_windows() {
        let schedule = ArrivalSchedule::default();
        assert_eq!(schedule.arrival_range(3), (0, 0));
        assert_eq!(schedule.arrival_range(7), (0, 3));
        assert_eq!(schedule.arrival_range(16), (2, 6));
        assert_eq!(schedule.arrival_range(23), (0, 0));
        assert_eq!(schedule.arrival_range(30), (0, 0));
    }

    #[test]
    fn test_draw_arrivals_stays_in_range() {
        let schedule = ArrivalSchedule::default();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..500 {
            let arrivals = schedule.draw_arrivals(16, &mut rng);
            assert!((2..=6).contains(&arrivals));
        }
        assert_eq!(schedule.draw_arrivals(2, &mut rng), 0);
    }
}
