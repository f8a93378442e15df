use log::{debug, warn};
use model::{
    day::parse_day_key,
    statistics::{report::StatsReport, Stats},
};
use storage::{calendar::CalendarStore, session::Session};
use time::Range;

#[derive(Clone)]
pub struct Statistics {
    store: CalendarStore,
    weekly_workouts: u32,
}

impl Statistics {
    pub(crate) fn new(store: CalendarStore, weekly_workouts: u32) -> Self {
        Statistics {
            store,
            weekly_workouts,
        }
    }

    pub fn weekly_workouts(&self) -> u32 {
        self.weekly_workouts
    }

    /// Done/miss counts and miss reason tallies of the stored days inside `range`.
    /// A range with a missing or inverted bound yields zeroed stats.
    pub fn compute_stats_for_range(&self, session: &Session, range: &Range) -> Stats {
        let Some(bounds) = range.bounds() else {
            warn!("Empty stats for invalid range {:?}", range);
            return Stats::default();
        };

        let mut stats = Stats::default();
        for (key, record) in self.store.days(session) {
            let date = match parse_day_key(key) {
                Ok(date) => date,
                Err(err) => {
                    debug!("Skipping day: {}", err);
                    continue;
                }
            };
            if bounds.contains(date) {
                stats.extend(record);
            }
        }
        stats
    }

    pub fn report(&self, session: &Session, range: Range) -> StatsReport {
        let stats = self.compute_stats_for_range(session, &range);
        StatsReport::new(range, stats, self.weekly_workouts)
    }
}
