use std::{
    env::var,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveTime;
use dotenv::dotenv;
use eyre::{ensure, Context, Error};
use log::info;

const DEFAULT_RUST_LOG: &str = "info";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_NAMESPACE: &str = "motivationalCalendarV2";
const DEFAULT_WEEKLY_WORKOUTS: u32 = 3;
/// One qualifying workout per day at most.
const MAX_WEEKLY_WORKOUTS: u32 = 7;
const DEFAULT_REMINDER_AT: &str = "22:00";

#[derive(Clone, Debug)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone, Debug)]
pub struct EnvInner {
    rust_log: String,
    data_dir: PathBuf,
    namespace: String,
    weekly_workouts: u32,
    reminder_at: NaiveTime,
}

impl Env {
    pub fn rust_log(&self) -> &str {
        &self.0.rust_log
    }

    pub fn data_dir(&self) -> &Path {
        &self.0.data_dir
    }

    pub fn namespace(&self) -> &str {
        &self.0.namespace
    }

    pub fn weekly_workouts(&self) -> u32 {
        self.0.weekly_workouts
    }

    pub fn reminder_at(&self) -> NaiveTime {
        self.0.reminder_at
    }

    /// Process environment, after an optional `.env` file.
    pub fn load() -> Result<Env, Error> {
        if let Err(err) = dotenv() {
            info!("Failed to load .env file: {}", err);
        }
        Env::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Env, Error> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let weekly_workouts = get(
            "TRACKER_WEEKLY_WORKOUTS",
            &DEFAULT_WEEKLY_WORKOUTS.to_string(),
        );
        let weekly_workouts = weekly_workouts
            .trim()
            .parse::<u32>()
            .with_context(|| format!("TRACKER_WEEKLY_WORKOUTS is invalid: {weekly_workouts}"))?;
        ensure!(
            weekly_workouts <= MAX_WEEKLY_WORKOUTS,
            "TRACKER_WEEKLY_WORKOUTS must be at most {MAX_WEEKLY_WORKOUTS}, got {weekly_workouts}"
        );
        let reminder_at = get("TRACKER_REMINDER_AT", DEFAULT_REMINDER_AT);

        Ok(Env(Arc::new(EnvInner {
            rust_log: get("RUST_LOG", DEFAULT_RUST_LOG),
            data_dir: PathBuf::from(get("TRACKER_DATA_DIR", DEFAULT_DATA_DIR)),
            namespace: get("TRACKER_NAMESPACE", DEFAULT_NAMESPACE),
            weekly_workouts,
            reminder_at: NaiveTime::parse_from_str(reminder_at.trim(), "%H:%M")
                .with_context(|| format!("TRACKER_REMINDER_AT is invalid: {reminder_at}"))?,
        })))
    }
}

/// Installs the `pretty_env_logger` logger filtered by `RUST_LOG`. Calling it again is a no-op.
pub fn init_logger(env: &Env) {
    let result = pretty_env_logger::formatted_builder()
        .parse_filters(env.rust_log())
        .try_init();
    if result.is_ok() {
        info!("Logger initialized with filter {}", env.rust_log());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Result<Env, Error> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Env::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let env = env(&[]).unwrap();
        assert_eq!(env.rust_log(), "info");
        assert_eq!(env.data_dir(), Path::new("./data"));
        assert_eq!(env.namespace(), "motivationalCalendarV2");
        assert_eq!(env.weekly_workouts(), 3);
        assert_eq!(env.reminder_at(), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
    }

    #[test]
    fn test_overrides() {
        let env = env(&[
            ("TRACKER_WEEKLY_WORKOUTS", " 5 "),
            ("TRACKER_REMINDER_AT", "07:30"),
            ("TRACKER_NAMESPACE", "tracker"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(env.weekly_workouts(), 5);
        assert_eq!(env.reminder_at(), NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(env.namespace(), "tracker");
        assert_eq!(env.rust_log(), "debug");
    }

    #[test]
    fn test_invalid_values() {
        let err = env(&[("TRACKER_WEEKLY_WORKOUTS", "three")]).unwrap_err();
        assert!(format!("{err:#}").contains("TRACKER_WEEKLY_WORKOUTS"));
        assert!(env(&[("TRACKER_REMINDER_AT", "late")]).is_err());
    }

    #[test]
    fn test_weekly_workouts_bounds() {
        assert_eq!(env(&[("TRACKER_WEEKLY_WORKOUTS", "7")]).unwrap().weekly_workouts(), 7);
        assert_eq!(env(&[("TRACKER_WEEKLY_WORKOUTS", "0")]).unwrap().weekly_workouts(), 0);
        let err = env(&[("TRACKER_WEEKLY_WORKOUTS", "100000000")]).unwrap_err();
        assert!(format!("{err:#}").contains("at most 7"));
        assert!(env(&[("TRACKER_WEEKLY_WORKOUTS", "8")]).is_err());
    }

    #[test]
    fn test_init_logger_twice() {
        let env = env(&[("RUST_LOG", "warn")]).unwrap();
        init_logger(&env);
        init_logger(&env);
    }
}
