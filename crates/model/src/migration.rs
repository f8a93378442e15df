//! Normalisation of persisted day records.
//!
//! Records written by older versions of the tracker used `cardio`/`workout`/`diet` and had no
//! miss reasons or weight. Hand-edited or partially written blobs may carry string booleans,
//! unknown workout names or weights with a comma separator. Every record goes through
//! [`normalize`] once when the blob is loaded, whatever shape it had.

use std::str::FromStr as _;

use log::debug;
use serde_json::{Map, Value};

use crate::{
    day::{DayRecord, MissReason, Workout},
    decimal::Decimal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// `{cardio, workout, diet, notes}`
    V1,
    /// `{cardioDone, cardioMissReason, workoutSelection, ..., weight, notes}`
    V2,
}

pub const CURRENT_VERSION: SchemaVersion = SchemaVersion::V2;

struct Fields {
    cardio: &'static str,
    workout: &'static str,
    diet: &'static str,
}

impl SchemaVersion {
    pub fn detect(object: &Map<String, Value>) -> SchemaVersion {
        let legacy = ["cardio", "workout", "diet"]
            .iter()
            .any(|field| object.contains_key(*field));
        let current = ["cardioDone", "workoutSelection", "dietDone"]
            .iter()
            .any(|field| object.contains_key(*field));
        if legacy && !current {
            SchemaVersion::V1
        } else {
            SchemaVersion::V2
        }
    }

    fn fields(&self) -> Fields {
        match self {
            SchemaVersion::V1 => Fields {
                cardio: "cardio",
                workout: "workout",
                diet: "diet",
            },
            SchemaVersion::V2 => Fields {
                cardio: "cardioDone",
                workout: "workoutSelection",
                diet: "dietDone",
            },
        }
    }
}

/// Builds a record that satisfies the current schema out of any persisted value.
pub fn normalize(value: &Value) -> DayRecord {
    let Some(object) = value.as_object() else {
        debug!("Replacing non-object day record with defaults: {}", value);
        return DayRecord::default();
    };

    let version = SchemaVersion::detect(object);
    let fields = version.fields();
    let record = DayRecord {
        cardio_done: coerce_bool(object.get(fields.cardio)),
        cardio_miss_reason: coerce_reason(object.get("cardioMissReason")),
        workout_selection: coerce_workout(object.get(fields.workout)),
        workout_miss_reason: coerce_reason(object.get("workoutMissReason")),
        diet_done: coerce_bool(object.get(fields.diet)),
        diet_miss_reason: coerce_reason(object.get("dietMissReason")),
        weight: coerce_weight(object.get("weight")),
        notes: object
            .get("notes")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    };
    record.sanitized()
}

fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes"
        ),
        _ => false,
    }
}

fn coerce_reason(value: Option<&Value>) -> Option<MissReason> {
    value
        .and_then(Value::as_str)
        .and_then(|text| MissReason::from_str(text.trim()).ok())
}

fn coerce_workout(value: Option<&Value>) -> Workout {
    value
        .and_then(Value::as_str)
        .and_then(|text| Workout::from_str(text.trim()).ok())
        .unwrap_or_default()
}

fn coerce_weight(value: Option<&Value>) -> Option<Decimal> {
    value.and_then(Decimal::from_json)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_legacy_record() {
        let record = normalize(&json!({
            "cardio": true,
            "workout": "Pull",
            "diet": false,
            "notes": "gambe pesanti",
        }));
        assert_eq!(
            record,
            DayRecord {
                cardio_done: true,
                workout_selection: Workout::Pull,
                notes: "gambe pesanti".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_detect_version() {
        let legacy = json!({"cardio": true});
        let current = json!({"cardioDone": true, "notes": ""});
        assert_eq!(
            SchemaVersion::detect(legacy.as_object().unwrap()),
            SchemaVersion::V1
        );
        assert_eq!(
            SchemaVersion::detect(current.as_object().unwrap()),
            CURRENT_VERSION
        );
    }

    #[test]
    fn test_string_booleans() {
        let record = normalize(&json!({
            "cardioDone": "true",
            "dietDone": "false",
            "workoutSelection": "Leg",
        }));
        assert!(record.cardio_done);
        assert!(!record.diet_done);

        let record = normalize(&json!({"cardioDone": 1, "dietDone": "on"}));
        assert!(record.cardio_done);
        assert!(record.diet_done);

        let record = normalize(&json!({"cardioDone": null, "dietDone": "maybe"}));
        assert!(!record.cardio_done);
        assert!(!record.diet_done);
    }

    #[test]
    fn test_unknown_workout_is_rest() {
        let record = normalize(&json!({"workoutSelection": "Yoga"}));
        assert_eq!(record.workout_selection, Workout::Rest);
        let record = normalize(&json!({"workoutSelection": 3}));
        assert_eq!(record.workout_selection, Workout::Rest);
        let record = normalize(&json!({}));
        assert_eq!(record.workout_selection, Workout::Rest);
        let record = normalize(&json!({"workoutSelection": "push"}));
        assert_eq!(record.workout_selection, Workout::Push);
    }

    #[test]
    fn test_weights() {
        let record = normalize(&json!({"weight": "82,4"}));
        assert_eq!(record.weight, Some(Decimal::from(82.4)));
        let record = normalize(&json!({"weight": 82.4}));
        assert_eq!(record.weight, Some(Decimal::from(82.4)));
        let record = normalize(&json!({"weight": "pesante"}));
        assert_eq!(record.weight, None);
        let record = normalize(&json!({"weight": ""}));
        assert_eq!(record.weight, None);
        let record = normalize(&json!({"weight": null}));
        assert_eq!(record.weight, None);
    }

    #[test]
    fn test_out_of_range_weights_are_dropped() {
        for weight in [json!("-1e300"), json!("1e300"), json!(-1e300), json!(1e300)] {
            let record = normalize(&json!({"weight": weight, "cardioDone": true}));
            assert_eq!(record.weight, None);
            assert!(record.cardio_done);
        }
    }

    #[test]
    fn test_reasons() {
        let record = normalize(&json!({
            "cardioDone": false,
            "cardioMissReason": "lavoro",
            "dietDone": true,
            "dietMissReason": "viaggio",
            "workoutSelection": "Rest",
            "workoutMissReason": "pigrizia",
        }));
        assert_eq!(record.cardio_miss_reason, Some(MissReason::Lavoro));
        // diet is done, the stale reason goes away
        assert_eq!(record.diet_miss_reason, None);
        assert_eq!(record.workout_miss_reason, None);
    }

    #[test]
    fn test_non_object() {
        assert_eq!(normalize(&json!("garbage")), DayRecord::default());
        assert_eq!(normalize(&json!(null)), DayRecord::default());
        assert_eq!(normalize(&json!([1, 2])), DayRecord::default());
    }

    #[test]
    fn test_current_record_round_trip() {
        let record = DayRecord {
            cardio_done: false,
            cardio_miss_reason: Some(MissReason::Salute),
            workout_selection: Workout::Leg,
            diet_done: true,
            weight: Some(Decimal::from(79.6)),
            notes: "ok".to_owned(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(normalize(&value), record);
    }
}
