use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike as _};
use model::errors::TrackerError;

use crate::signals::Signal;

/// Daily nudge to fill in the tracker. The caller ticks it, typically once a minute.
#[derive(Debug, Clone)]
pub struct Reminder {
    at: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl Reminder {
    pub fn new(at: NaiveTime) -> Self {
        Reminder {
            at,
            last_fired: None,
        }
    }

    /// `HH:MM`
    pub fn parse_time(value: &str) -> Result<NaiveTime, TrackerError> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map_err(|_| TrackerError::InvalidTime(value.to_owned()))
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// Fires during the reminder minute, at most once per day.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Signal> {
        let today = now.date();
        if now.hour() != self.at.hour() || now.minute() != self.at.minute() {
            return None;
        }
        if self.last_fired == Some(today) {
            return None;
        }
        self.last_fired = Some(today);
        Some(Signal::Reminder(today))
    }
}
