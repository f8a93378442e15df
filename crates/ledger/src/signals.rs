use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use model::{day::Activity, goal::Milestone};
use serde::{Deserialize, Serialize};

/// Edges detected by the tracker. Reacting to them is up to the embedding application.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ActivityDone { date: NaiveDate, activity: Activity },
    DayCompleted(NaiveDate),
    Milestone(Milestone),
    Reminder(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Success,
    Celebration,
}

pub trait SoundPlayer: Send + Sync {
    fn play(&self, cue: Cue);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self, _: Cue) {}
}

impl Notifier for Silent {
    fn notify(&self, _: &str, _: &str) {}
}

/// Maps signals onto the sound and notification capabilities. Fire and forget.
#[derive(Clone)]
pub struct Effects {
    sound: Arc<dyn SoundPlayer>,
    notifier: Arc<dyn Notifier>,
}

impl Effects {
    pub fn new(sound: Arc<dyn SoundPlayer>, notifier: Arc<dyn Notifier>) -> Self {
        Effects { sound, notifier }
    }

    pub fn silent() -> Self {
        Effects::new(Arc::new(Silent), Arc::new(Silent))
    }

    pub fn dispatch(&self, signals: &[Signal]) {
        for signal in signals {
            debug!("Dispatching {:?}", signal);
            match signal {
                Signal::ActivityDone { .. } => self.sound.play(Cue::Success),
                Signal::DayCompleted(_) => self.sound.play(Cue::Celebration),
                Signal::Milestone(milestone) => self.notifier.notify(
                    "New milestone",
                    &format!(
                        "Best weight {} (from {})",
                        milestone.weight, milestone.previous
                    ),
                ),
                Signal::Reminder(_) => self.notifier.notify(
                    "Fill in your tracker",
                    "Log today's cardio, workout and diet.",
                ),
            }
        }
    }
}
