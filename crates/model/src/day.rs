use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use strum::{Display, EnumIter, EnumString};

use crate::{decimal::Decimal, errors::TrackerError};

/// Prefix of the keys that share the namespace with day records but are not days.
pub const RESERVED_KEY_PREFIX: char = '_';

pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_KEY_PREFIX)
}

pub fn parse_day_key(key: &str) -> Result<NaiveDate, TrackerError> {
    if is_reserved_key(key) {
        return Err(TrackerError::InvalidDateKey(key.to_owned()));
    }
    time::parse_date_key(key).map_err(|_| TrackerError::InvalidDateKey(key.to_owned()))
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MissReason {
    Tempo,
    Stanchezza,
    Salute,
    Lavoro,
    Viaggio,
    Altro,
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
)]
#[strum(ascii_case_insensitive)]
pub enum Workout {
    Leg,
    Pull,
    Push,
    #[default]
    Rest,
}

impl Workout {
    pub fn is_qualifying(&self) -> bool {
        !matches!(self, Workout::Rest)
    }
}

#[derive(Debug, Serialize, Deserialize, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Activity {
    Cardio,
    Workout,
    Diet,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub cardio_done: bool,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub cardio_miss_reason: Option<MissReason>,
    pub workout_selection: Workout,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub workout_miss_reason: Option<MissReason>,
    pub diet_done: bool,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub diet_miss_reason: Option<MissReason>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
}

impl DayRecord {
    /// Done flag of an activity. For the workout this means a qualifying selection.
    pub fn is_done(&self, activity: Activity) -> bool {
        match activity {
            Activity::Cardio => self.cardio_done,
            Activity::Workout => self.workout_selection.is_qualifying(),
            Activity::Diet => self.diet_done,
        }
    }

    pub fn miss_reason(&self, activity: Activity) -> Option<MissReason> {
        match activity {
            Activity::Cardio => self.cardio_miss_reason,
            Activity::Workout => self.workout_miss_reason,
            Activity::Diet => self.diet_miss_reason,
        }
    }

    fn miss_reason_mut(&mut self, activity: Activity) -> &mut Option<MissReason> {
        match activity {
            Activity::Cardio => &mut self.cardio_miss_reason,
            Activity::Workout => &mut self.workout_miss_reason,
            Activity::Diet => &mut self.diet_miss_reason,
        }
    }

    /// Drops every miss reason whose activity is done.
    pub fn clear_resolved_reasons(&mut self) {
        for activity in [Activity::Cardio, Activity::Workout, Activity::Diet] {
            if self.is_done(activity) {
                *self.miss_reason_mut(activity) = None;
            }
        }
    }

    /// Same record with the reason invariant applied.
    pub fn sanitized(mut self) -> Self {
        self.clear_resolved_reasons();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.cardio_done && self.workout_selection.is_qualifying() && self.diet_done
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_record() {
        let record = DayRecord::default();
        assert!(!record.cardio_done);
        assert!(!record.diet_done);
        assert_eq!(record.workout_selection, Workout::Rest);
        assert_eq!(record.weight, None);
        assert!(record.notes.is_empty());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_qualifying_workouts() {
        assert!(Workout::Leg.is_qualifying());
        assert!(Workout::Pull.is_qualifying());
        assert!(Workout::Push.is_qualifying());
        assert!(!Workout::Rest.is_qualifying());
    }

    #[test]
    fn test_sanitized_clears_done_reasons() {
        let record = DayRecord {
            cardio_done: true,
            cardio_miss_reason: Some(MissReason::Lavoro),
            workout_selection: Workout::Push,
            workout_miss_reason: Some(MissReason::Stanchezza),
            diet_done: false,
            diet_miss_reason: Some(MissReason::Viaggio),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(record.cardio_miss_reason, None);
        assert_eq!(record.workout_miss_reason, None);
        assert_eq!(record.diet_miss_reason, Some(MissReason::Viaggio));
    }

    #[test]
    fn test_wire_format() {
        let record = DayRecord {
            cardio_done: false,
            cardio_miss_reason: Some(MissReason::Lavoro),
            workout_selection: Workout::Leg,
            weight: Some(Decimal::from(84.5)),
            notes: "ok".to_owned(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "cardioDone": false,
                "cardioMissReason": "lavoro",
                "workoutSelection": "Leg",
                "workoutMissReason": "",
                "dietDone": false,
                "dietMissReason": "",
                "weight": 84.5,
                "notes": "ok",
            })
        );
        let back: DayRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_day_keys() {
        assert!(is_reserved_key("_goal"));
        assert!(!is_reserved_key("2024-05-15"));
        assert_eq!(
            parse_day_key("2024-05-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
        assert_eq!(
            parse_day_key("_goal"),
            Err(TrackerError::InvalidDateKey("_goal".to_owned()))
        );
        assert!(parse_day_key("yesterday").is_err());
    }
}
