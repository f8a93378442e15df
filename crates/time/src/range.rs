use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{end_of_month, end_of_week, end_of_year, start_of_month, start_of_week, start_of_year};

/// Inclusive span of calendar days.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `None` when the range is inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            None
        } else {
            Some(DateRange { start, end })
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        crate::is_date_between(date, self.start, self.end)
    }

    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days()).map(move |offset| start + Duration::days(offset as i64))
    }

    pub fn is_subset_of(&self, other: &DateRange) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Range {
    Week(NaiveDate),
    Month(NaiveDate),
    Year(NaiveDate),
    Custom(Option<NaiveDate>, Option<NaiveDate>),
}

impl Range {
    /// Concrete days covered by the range. Missing or inverted custom bounds give `None`.
    pub fn bounds(&self) -> Option<DateRange> {
        match self {
            Range::Week(date) => DateRange::new(start_of_week(*date), end_of_week(*date)),
            Range::Month(date) => DateRange::new(start_of_month(*date), end_of_month(*date)),
            Range::Year(date) => DateRange::new(start_of_year(*date), end_of_year(*date)),
            Range::Custom(Some(start), Some(end)) => DateRange::new(*start, *end),
            Range::Custom(_, _) => None,
        }
    }
}
