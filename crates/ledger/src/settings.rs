use chrono::NaiveTime;
use env::Env;
use model::statistics::targets::DEFAULT_WEEKLY_WORKOUTS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Qualifying workouts expected per week.
    pub weekly_workouts: u32,
    pub reminder_at: NaiveTime,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            weekly_workouts: DEFAULT_WEEKLY_WORKOUTS,
            reminder_at: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl Settings {
    pub fn from_env(env: &Env) -> Self {
        Settings {
            weekly_workouts: env.weekly_workouts(),
            reminder_at: env.reminder_at(),
        }
    }
}
