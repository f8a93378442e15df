use log::info;
use model::{
    day::parse_day_key,
    decimal::Decimal,
    goal::{GoalConfig, Milestone, MilestoneState},
};
use storage::{calendar::CalendarStore, goal::GoalStore, session::Session};

#[derive(Clone)]
pub struct Weight {
    goals: GoalStore,
    calendar: CalendarStore,
}

impl Weight {
    pub(crate) fn new(goals: GoalStore, calendar: CalendarStore) -> Self {
        Weight { goals, calendar }
    }

    pub fn goal(&self, session: &Session) -> GoalConfig {
        self.goals.get(session)
    }

    /// Replaces the goal and restarts milestone tracking from the new start weight.
    pub fn set_goal(&self, session: &mut Session, goal: GoalConfig) {
        info!(
            "Setting goal: start={:?} goal={:?}",
            goal.start_weight, goal.goal_weight
        );
        self.goals.set(session, goal);
        self.goals.set_milestone(session, MilestoneState::default());
    }

    /// Weight of the most recent day that has one.
    pub fn latest_weight(&self, session: &Session) -> Option<Decimal> {
        self.calendar
            .days(session)
            .filter_map(|(key, record)| Some((parse_day_key(key).ok()?, record.weight?)))
            .max_by_key(|(date, _)| *date)
            .map(|(_, weight)| weight)
    }

    /// Progress towards the goal in `0..=100`; 0 when a weight is missing.
    pub fn compute_weight_percent(&self, session: &Session, current: Option<Decimal>) -> u8 {
        self.goal(session).progress_percent(current)
    }

    pub fn latest_weight_percent(&self, session: &Session) -> u8 {
        self.compute_weight_percent(session, self.latest_weight(session))
    }

    pub fn observe(&self, session: &mut Session, weight: Decimal) -> Option<Milestone> {
        let goal = self.goal(session);
        let mut state = self.goals.milestone(session);
        let before = state;
        let milestone = state.observe(&goal, weight);
        if state != before {
            self.goals.set_milestone(session, state);
        }
        if let Some(milestone) = &milestone {
            info!(
                "Milestone reached: {} (previous {})",
                milestone.weight, milestone.previous
            );
        }
        milestone
    }
}
