use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use time::{days_in_month, days_in_year, DateRange, Range};

pub const DEFAULT_WEEKLY_WORKOUTS: u32 = 3;
const DAYS_PER_WEEK: u32 = 7;
/// Month and year workout targets use a flat 4 and 52 weeks.
const WEEKS_PER_MONTH: u32 = 4;
const WEEKS_PER_YEAR: u32 = 52;

#[derive(Debug, Serialize, Deserialize, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatsMode {
    Week,
    Month,
    Year,
}

impl StatsMode {
    pub fn range(&self, today: NaiveDate) -> Range {
        match self {
            StatsMode::Week => Range::Week(today),
            StatsMode::Month => Range::Month(today),
            StatsMode::Year => Range::Year(today),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Targets {
    pub cardio: u32,
    pub workout: u32,
    pub diet: u32,
}

impl Targets {
    pub fn for_range(range: &Range, weekly_workouts: u32) -> Targets {
        match range {
            Range::Week(_) => Targets {
                cardio: DAYS_PER_WEEK,
                workout: weekly_workouts,
                diet: DAYS_PER_WEEK,
            },
            Range::Month(anchor) => Targets::daily(
                days_in_month(*anchor),
                weekly_workouts.saturating_mul(WEEKS_PER_MONTH),
            ),
            Range::Year(anchor) => {
                Targets::daily(
                    days_in_year(*anchor),
                    weekly_workouts.saturating_mul(WEEKS_PER_YEAR),
                )
            }
            Range::Custom(_, _) => range
                .bounds()
                .map(|bounds| Targets::for_days(&bounds, weekly_workouts))
                .unwrap_or_default(),
        }
    }

    /// Arbitrary span: every day counts for cardio and diet, workouts pro rata per week.
    pub fn for_days(range: &DateRange, weekly_workouts: u32) -> Targets {
        let days = range.len_days();
        let workout = (days as f64 * weekly_workouts as f64 / DAYS_PER_WEEK as f64).round();
        Targets::daily(days, workout as u32)
    }

    fn daily(days: u32, workout: u32) -> Targets {
        Targets {
            cardio: days,
            workout,
            diet: days,
        }
    }
}
