use log::warn;
use model::goal::{GoalConfig, MilestoneState};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::session::Session;

const GOAL_KEY: &str = "_goal";
const MILESTONE_KEY: &str = "_milestone";

/// Goal weights and milestone progress, kept under reserved keys next to the days.
#[derive(Clone, Default)]
pub struct GoalStore;

impl GoalStore {
    pub fn get(&self, session: &Session) -> GoalConfig {
        read(session, GOAL_KEY)
    }

    pub fn set(&self, session: &mut Session, goal: GoalConfig) {
        write(session, GOAL_KEY, &goal);
    }

    pub fn milestone(&self, session: &Session) -> MilestoneState {
        read(session, MILESTONE_KEY)
    }

    pub fn set_milestone(&self, session: &mut Session, state: MilestoneState) {
        write(session, MILESTONE_KEY, &state);
    }
}

fn read<T: DeserializeOwned + Default>(session: &Session, key: &str) -> T {
    let Some(value) = session.meta.get(key) else {
        return T::default();
    };
    match serde_json::from_value(value.clone()) {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring malformed {}: {}", key, err);
            T::default()
        }
    }
}

fn write<T: Serialize>(session: &mut Session, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => {
            session.meta.insert(key.to_owned(), value);
            session.persist();
        }
        Err(err) => warn!("Failed to serialize {}: {}", key, err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use model::decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::{backend::MemoryBackend, calendar::CalendarStore, session::Db};

    const NS: &str = "tracker";

    #[test]
    fn test_goal_round_trip() {
        let db = Db::new(Arc::new(MemoryBackend::new()), NS);
        let mut session = db.start_session();
        assert_eq!(GoalStore.get(&session), GoalConfig::default());

        let goal = GoalConfig::new(Decimal::int(90), Decimal::from(80.5));
        GoalStore.set(&mut session, goal);

        let session = db.start_session();
        assert_eq!(GoalStore.get(&session), goal);
        assert!(CalendarStore.keys(&session).is_empty());
    }

    #[test]
    fn test_legacy_string_weights() {
        let blob = json!({"_goal": {"startWeight": "92,5", "goalWeight": 85}});
        let db = Db::new(Arc::new(MemoryBackend::with_entry(NS, &blob.to_string())), NS);
        let goal = GoalStore.get(&db.start_session());
        assert_eq!(goal.start_weight, Some(Decimal::from(92.5)));
        assert_eq!(goal.goal_weight, Some(Decimal::int(85)));
    }

    #[test]
    fn test_malformed_goal_is_default() {
        let blob = json!({"_goal": "ninety"});
        let db = Db::new(Arc::new(MemoryBackend::with_entry(NS, &blob.to_string())), NS);
        assert_eq!(GoalStore.get(&db.start_session()), GoalConfig::default());
    }

    #[test]
    fn test_bad_weight_keeps_other_field() {
        let blob = json!({"_goal": {"startWeight": "abc", "goalWeight": 80}});
        let db = Db::new(Arc::new(MemoryBackend::with_entry(NS, &blob.to_string())), NS);
        let goal = GoalStore.get(&db.start_session());
        assert_eq!(goal.start_weight, None);
        assert_eq!(goal.goal_weight, Some(Decimal::int(80)));
    }

    #[test]
    fn test_milestone_state() {
        let db = Db::new(Arc::new(MemoryBackend::new()), NS);
        let mut session = db.start_session();
        let state = MilestoneState {
            best_weight: Some(Decimal::int(88)),
            last_milestone_weight: Some(Decimal::int(89)),
        };
        GoalStore.set_milestone(&mut session, state);
        assert_eq!(GoalStore.milestone(&db.start_session()), state);
    }
}
