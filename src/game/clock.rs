use std::cell::Cell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate, NaiveTime, Timelike};

use crate::helpers::days_since_epoch;

/// Source of the player's local calendar date and the current instant.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn time_of_day(&self) -> NaiveTime;

    fn now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    time_of_day: Cell<NaiveTime>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
            time_of_day: Cell::new(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()),
        }
    }

    pub fn set_time_of_day(&self, time: NaiveTime) {
        self.time_of_day.set(time);
    }

    pub fn advance_days(&self, days: u64) {
        let next = self
            .today
            .get()
            .checked_add_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.today.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.time_of_day.get()
    }

    fn now(&self) -> SystemTime {
        let days = days_since_epoch(self.today()).max(0) as u64;
        let secs = self.time_of_day().num_seconds_from_midnight() as u64;
        UNIX_EPOCH + Duration::from_secs(days * 86_400 + secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_fixed_clock_now_tracks_date() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        clock.set_time_of_day(NaiveTime::from_hms_opt(0, 0, 30).unwrap());
        assert_eq!(clock.now(), UNIX_EPOCH + Duration::from_secs(86_430));
    }
}
