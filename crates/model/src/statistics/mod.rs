pub mod report;
pub mod targets;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::{Activity, DayRecord, MissReason};

pub use time::DateRange as StatsRange;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ActivityStats {
    pub done: u32,
    pub miss: u32,
    pub reasons: BTreeMap<MissReason, u32>,
}

impl ActivityStats {
    /// A day counts as done, as an explicit miss (a reason was given), or not at all.
    pub fn extend(&mut self, done: bool, reason: Option<MissReason>) {
        if done {
            self.done += 1;
        } else if let Some(reason) = reason {
            self.miss += 1;
            *self.reasons.entry(reason).or_insert(0) += 1;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Stats {
    pub cardio: ActivityStats,
    pub workout: ActivityStats,
    pub diet: ActivityStats,
}

impl Stats {
    pub fn extend(&mut self, day: &DayRecord) {
        for activity in [Activity::Cardio, Activity::Workout, Activity::Diet] {
            self.activity_mut(activity)
                .extend(day.is_done(activity), day.miss_reason(activity));
        }
    }

    pub fn activity(&self, activity: Activity) -> &ActivityStats {
        match activity {
            Activity::Cardio => &self.cardio,
            Activity::Workout => &self.workout,
            Activity::Diet => &self.diet,
        }
    }

    fn activity_mut(&mut self, activity: Activity) -> &mut ActivityStats {
        match activity {
            Activity::Cardio => &mut self.cardio,
            Activity::Workout => &mut self.workout,
            Activity::Diet => &mut self.diet,
        }
    }
}

impl<'a> FromIterator<&'a DayRecord> for Stats {
    fn from_iter<I: IntoIterator<Item = &'a DayRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Stats::default(), |mut stats, day| {
            stats.extend(day);
            stats
        })
    }
}

/// `done` against `target` in whole percent, clamped to `0..=100`. No target means 0.
pub fn compute_percent(done: u32, target: i64) -> u8 {
    if target <= 0 {
        return 0;
    }
    let percent = (done as f64 / target as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}
