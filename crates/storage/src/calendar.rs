use chrono::NaiveDate;
use log::debug;
use model::day::{is_reserved_key, DayRecord};
use time::date_key;

use crate::session::Session;

/// Day records keyed by local calendar date.
#[derive(Clone, Default)]
pub struct CalendarStore;

impl CalendarStore {
    /// Stored record of `date`. A day that was never touched is created with defaults and
    /// persisted before it is returned.
    pub fn get_day(&self, session: &mut Session, date: NaiveDate) -> DayRecord {
        let key = date_key(date);
        if let Some(record) = session.days.get(&key) {
            return record.clone();
        }

        debug!("Creating day {}", key);
        let record = DayRecord::default();
        session.days.insert(key, record.clone());
        session.persist();
        record
    }

    /// Stored record of `date` without creating it.
    pub fn find_day(&self, session: &Session, date: NaiveDate) -> Option<DayRecord> {
        session.days.get(&date_key(date)).cloned()
    }

    /// Replaces the record of `date` wholesale and persists the namespace.
    pub fn set_day(&self, session: &mut Session, date: NaiveDate, record: DayRecord) {
        session.days.insert(date_key(date), record);
        session.persist();
    }

    /// Keys of the stored days. Reserved keys never show up here.
    pub fn keys(&self, session: &Session) -> Vec<String> {
        self.days(session).map(|(key, _)| key.to_owned()).collect()
    }

    pub fn days<'s>(
        &self,
        session: &'s Session,
    ) -> impl Iterator<Item = (&'s str, &'s DayRecord)> + 's {
        session
            .days
            .iter()
            .filter(|(key, _)| !is_reserved_key(key))
            .map(|(key, record)| (key.as_str(), record))
    }
}
