use std::{collections::BTreeMap, sync::Arc};

use log::{debug, error, info, warn};
use model::{
    day::{is_reserved_key, DayRecord},
    migration,
};
use serde_json::{Map, Value};

use crate::backend::Backend;

/// Handle on the namespace the whole tracker lives in.
#[derive(Clone)]
pub struct Db {
    backend: Arc<dyn Backend>,
    namespace: String,
}

impl Db {
    pub fn new(backend: Arc<dyn Backend>, namespace: &str) -> Self {
        Db {
            backend,
            namespace: namespace.to_owned(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Loads the blob and normalises every day record in it. An absent, unreadable or
    /// malformed blob yields an empty session; the next write replaces it.
    pub fn start_session(&self) -> Session {
        let raw = match self.backend.get(&self.namespace) {
            Ok(raw) => raw,
            Err(err) => {
                error!("Failed to read {}: {:#}", self.namespace, err);
                None
            }
        };

        let blob = match raw.map(|raw| serde_json::from_str::<Map<String, Value>>(&raw)) {
            Some(Ok(blob)) => blob,
            Some(Err(err)) => {
                warn!(
                    "Stored data under {} is corrupt, starting empty: {}",
                    self.namespace, err
                );
                Map::new()
            }
            None => Map::new(),
        };

        let mut session = Session {
            db: self.clone(),
            days: BTreeMap::new(),
            meta: BTreeMap::new(),
        };
        for (key, value) in blob {
            if is_reserved_key(&key) {
                session.meta.insert(key, value);
            } else {
                let record = migration::normalize(&value);
                session.days.insert(key, record);
            }
        }
        info!(
            "Loaded {} days from {}",
            session.days.len(),
            self.namespace
        );
        session
    }
}

/// The loaded state of one editing session. There is a single writer at a time.
pub struct Session {
    db: Db,
    pub(crate) days: BTreeMap<String, DayRecord>,
    pub(crate) meta: BTreeMap<String, Value>,
}

impl Session {
    /// Writes the whole namespace back. Failures are logged and dropped: the in-memory state
    /// stays authoritative and the next mutation tries again.
    pub fn persist(&self) {
        let mut blob = Map::new();
        for (key, record) in &self.days {
            match serde_json::to_value(record) {
                Ok(value) => {
                    blob.insert(key.clone(), value);
                }
                Err(err) => error!("Failed to serialize day {}: {}", key, err),
            }
        }
        for (key, value) in &self.meta {
            blob.insert(key.clone(), value.clone());
        }

        let raw = match serde_json::to_string(&blob) {
            Ok(raw) => raw,
            Err(err) => {
                error!("Failed to serialize {}: {}", self.db.namespace, err);
                return;
            }
        };
        match self.db.backend.set(&self.db.namespace, &raw) {
            Ok(()) => debug!("Persisted {} bytes to {}", raw.len(), self.db.namespace),
            Err(err) => error!("Failed to persist {}: {:#}", self.db.namespace, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use eyre::eyre;
    use serde_json::json;

    use super::*;
    use crate::backend::MemoryBackend;

    const NS: &str = "motivationalCalendarV2";

    struct BrokenBackend;

    impl Backend for BrokenBackend {
        fn get(&self, _: &str) -> eyre::Result<Option<String>> {
            Err(eyre!("disk on fire"))
        }

        fn set(&self, _: &str, _: &str) -> eyre::Result<()> {
            Err(eyre!("quota exceeded"))
        }
    }

    #[test]
    fn test_corrupt_blob_is_empty() {
        let db = Db::new(Arc::new(MemoryBackend::with_entry(NS, "{not json")), NS);
        let session = db.start_session();
        assert!(session.days.is_empty());
        assert!(session.meta.is_empty());

        let db = Db::new(Arc::new(MemoryBackend::with_entry(NS, "[1,2,3]")), NS);
        assert!(db.start_session().days.is_empty());
    }

    #[test]
    fn test_broken_backend_never_raises() {
        let db = Db::new(Arc::new(BrokenBackend), NS);
        let mut session = db.start_session();
        assert!(session.days.is_empty());
        session
            .days
            .insert("2024-05-15".to_owned(), DayRecord::default());
        session.persist();
        assert_eq!(session.days.len(), 1);
    }

    #[test]
    fn test_load_splits_reserved_keys_and_migrates() {
        let blob = json!({
            "2024-05-13": {"cardio": "true", "workout": "Leg", "diet": true, "notes": ""},
            "_goal": {"startWeight": 90.0, "goalWeight": 80.0},
        });
        let backend = Arc::new(MemoryBackend::with_entry(NS, &blob.to_string()));
        let db = Db::new(backend.clone(), NS);
        let session = db.start_session();

        assert_eq!(session.days.len(), 1);
        assert!(session.days["2024-05-13"].is_complete());
        assert!(session.meta.contains_key("_goal"));

        session.persist();
        let raw = backend.get(NS).unwrap().unwrap();
        let stored: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["2024-05-13"]["cardioDone"], json!(true));
        assert_eq!(stored["2024-05-13"]["workoutSelection"], json!("Leg"));
        assert_eq!(stored["_goal"]["goalWeight"], json!(80.0));
    }
}
