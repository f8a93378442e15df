pub mod clock;
pub mod reminder;
pub mod service;
pub mod settings;
pub mod signals;

use std::sync::Arc;

use chrono::NaiveDate;
use clock::{Clock, SystemClock};
use env::Env;
use log::info;
use model::{
    completion::{is_day_complete, newly_done, DayState, Transition},
    day::DayRecord,
    decimal::Decimal,
    goal::GoalConfig,
    statistics::{report::StatsReport, targets::StatsMode, Stats},
};
use reminder::Reminder;
use serde::{Deserialize, Serialize};
use service::{calendar::Calendar, statistics::Statistics, weight::Weight};
use settings::Settings;
use signals::Signal;
use storage::{backend::FileBackend, session::Session, Storage};
use time::Range;

/// Result of an explicit edit of a day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The record as stored.
    pub record: DayRecord,
    pub transition: Option<Transition>,
    pub signals: Vec<Signal>,
}

#[derive(Clone)]
pub struct Ledger {
    pub storage: Storage,
    pub calendar: Calendar,
    pub statistics: Statistics,
    pub weight: Weight,
    clock: Arc<dyn Clock>,
    settings: Settings,
}

impl Ledger {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, settings: Settings) -> Self {
        let calendar = Calendar::new(storage.calendar.clone());
        let statistics = Statistics::new(storage.calendar.clone(), settings.weekly_workouts);
        let weight = Weight::new(storage.goals.clone(), storage.calendar.clone());
        Ledger {
            storage,
            calendar,
            statistics,
            weight,
            clock,
            settings,
        }
    }

    /// File backed tracker on the system clock, configured from the environment.
    pub fn from_env(env: &Env) -> Self {
        info!(
            "Opening tracker {} in {}",
            env.namespace(),
            env.data_dir().display()
        );
        let backend = FileBackend::new(env.data_dir());
        let storage = Storage::new(Arc::new(backend), env.namespace());
        Ledger::new(storage, Arc::new(SystemClock), Settings::from_env(env))
    }

    pub fn start_session(&self) -> Session {
        self.storage.start_session()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn reminder(&self) -> Reminder {
        Reminder::new(self.settings.reminder_at)
    }

    pub fn get_day_data(&self, session: &mut Session, date: NaiveDate) -> DayRecord {
        self.calendar.get_day(session, date)
    }

    /// Replaces the day and reports what changed: activities switched to done, the
    /// completion edge and a weight milestone.
    pub fn save_day_data(
        &self,
        session: &mut Session,
        date: NaiveDate,
        record: DayRecord,
    ) -> SaveOutcome {
        let (before, after) = self.calendar.save_day(session, date, record);

        let mut signals = newly_done(&before, &after)
            .into_iter()
            .map(|activity| Signal::ActivityDone { date, activity })
            .collect::<Vec<_>>();

        let transition = DayState::of(&before).transition(DayState::of(&after));
        if transition == Some(Transition::Completed) {
            info!("Day {} completed", date);
            signals.push(Signal::DayCompleted(date));
        }

        if let Some(weight) = after.weight {
            if let Some(milestone) = self.weight.observe(session, weight) {
                signals.push(Signal::Milestone(milestone));
            }
        }

        SaveOutcome {
            record: after,
            transition,
            signals,
        }
    }

    pub fn compute_stats_for_range(&self, session: &Session, range: &Range) -> Stats {
        self.statistics.compute_stats_for_range(session, range)
    }

    pub fn report(&self, session: &Session, range: Range) -> StatsReport {
        self.statistics.report(session, range)
    }

    /// Report of the week, month or year containing today.
    pub fn report_mode(&self, session: &Session, mode: StatsMode) -> StatsReport {
        self.report(session, mode.range(self.today()))
    }

    pub fn compute_weight_percent(&self, session: &Session, current: Option<Decimal>) -> u8 {
        self.weight.compute_weight_percent(session, current)
    }

    pub fn goal(&self, session: &Session) -> GoalConfig {
        self.weight.goal(session)
    }

    pub fn set_goal(&self, session: &mut Session, goal: GoalConfig) {
        self.weight.set_goal(session, goal)
    }

    pub fn is_day_complete(&self, record: &DayRecord) -> bool {
        is_day_complete(record)
    }
}
