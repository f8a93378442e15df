use serde::{Deserialize, Serialize};
use time::Range;

use super::{compute_percent, targets::Targets, Stats, StatsRange};

/// Counts of a range next to the targets of its period.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub range: Range,
    /// `None` when the requested range was missing a bound or inverted.
    pub bounds: Option<StatsRange>,
    pub stats: Stats,
    pub targets: Targets,
    pub cardio_percent: u8,
    pub workout_percent: u8,
    pub diet_percent: u8,
}

impl StatsReport {
    pub fn new(range: Range, stats: Stats, weekly_workouts: u32) -> Self {
        let targets = Targets::for_range(&range, weekly_workouts);
        StatsReport {
            range,
            bounds: range.bounds(),
            cardio_percent: compute_percent(stats.cardio.done, targets.cardio as i64),
            workout_percent: compute_percent(stats.workout.done, targets.workout as i64),
            diet_percent: compute_percent(stats.diet.done, targets.diet as i64),
            stats,
            targets,
        }
    }
}
