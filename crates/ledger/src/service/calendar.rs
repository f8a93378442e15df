use chrono::NaiveDate;
use log::info;
use model::day::DayRecord;
use storage::{calendar::CalendarStore, session::Session};

#[derive(Clone)]
pub struct Calendar {
    store: CalendarStore,
}

impl Calendar {
    pub(crate) fn new(store: CalendarStore) -> Self {
        Calendar { store }
    }

    pub fn get_day(&self, session: &mut Session, date: NaiveDate) -> DayRecord {
        self.store.get_day(session, date)
    }

    /// Replaces the day with `record` after dropping reasons of done activities.
    /// Returns the previous and the stored version.
    pub fn save_day(
        &self,
        session: &mut Session,
        date: NaiveDate,
        record: DayRecord,
    ) -> (DayRecord, DayRecord) {
        let before = self.store.find_day(session, date).unwrap_or_default();
        let after = record.sanitized();
        info!("Saving day {}", date);
        self.store.set_day(session, date, after.clone());
        (before, after)
    }
}
