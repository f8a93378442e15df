pub mod backend;
pub mod calendar;
pub mod goal;
pub mod session;

use std::sync::Arc;

use backend::Backend;
use calendar::CalendarStore;
use goal::GoalStore;
use session::{Db, Session};

pub const DEFAULT_NAMESPACE: &str = "motivationalCalendarV2";

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub calendar: CalendarStore,
    pub goals: GoalStore,
}

impl Storage {
    pub fn new(backend: Arc<dyn Backend>, namespace: &str) -> Self {
        Storage {
            db: Db::new(backend, namespace),
            calendar: CalendarStore,
            goals: GoalStore,
        }
    }

    pub fn start_session(&self) -> Session {
        self.db.start_session()
    }
}
