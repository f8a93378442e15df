use serde::{Deserialize, Serialize};

use crate::day::{Activity, DayRecord};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Incomplete,
    Complete,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Completed,
    Reopened,
}

pub fn is_day_complete(record: &DayRecord) -> bool {
    record.is_complete()
}

impl DayState {
    pub fn of(record: &DayRecord) -> DayState {
        if is_day_complete(record) {
            DayState::Complete
        } else {
            DayState::Incomplete
        }
    }

    /// Edge between two consecutive states of the same day. Staying put is not a transition.
    pub fn transition(self, next: DayState) -> Option<Transition> {
        match (self, next) {
            (DayState::Incomplete, DayState::Complete) => Some(Transition::Completed),
            (DayState::Complete, DayState::Incomplete) => Some(Transition::Reopened),
            _ => None,
        }
    }
}

/// Activities that went from not done to done between two versions of a day.
pub fn newly_done(before: &DayRecord, after: &DayRecord) -> Vec<Activity> {
    [Activity::Cardio, Activity::Workout, Activity::Diet]
        .into_iter()
        .filter(|activity| !before.is_done(*activity) && after.is_done(*activity))
        .collect()
}
