use serde::{Deserialize, Serialize};

use crate::decimal::{deserialize_lenient, Decimal};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalConfig {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub start_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub goal_weight: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Loss,
    Gain,
    Keep,
}

impl GoalConfig {
    pub fn new(start_weight: Decimal, goal_weight: Decimal) -> Self {
        GoalConfig {
            start_weight: Some(start_weight),
            goal_weight: Some(goal_weight),
        }
    }

    /// `None` until both weights are set.
    pub fn direction(&self) -> Option<Direction> {
        let (start, goal) = (self.start_weight?, self.goal_weight?);
        Some(if goal < start {
            Direction::Loss
        } else if goal > start {
            Direction::Gain
        } else {
            Direction::Keep
        })
    }

    /// Percent of the way from the start weight to the goal, clamped to `0..=100`.
    /// Undefined progress (any weight missing) is reported as 0.
    pub fn progress_percent(&self, current: Option<Decimal>) -> u8 {
        let (Some(start), Some(goal), Some(current)) = (self.start_weight, self.goal_weight, current)
        else {
            return 0;
        };

        let (total, done) = match self.direction() {
            Some(Direction::Loss) => (start - goal, start - current),
            Some(Direction::Gain) => (goal - start, current - start),
            _ => return if current == goal { 100 } else { 0 },
        };
        if total.is_zero() || total.is_negative() {
            return 0;
        }
        let percent = (done.inner() as f64 / total.inner() as f64 * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

/// Weight change that triggers a milestone.
pub fn milestone_step() -> Decimal {
    Decimal::int(1)
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub weight: Decimal,
    pub previous: Decimal,
}

/// Best weight reached so far and the weight at which the last milestone fired.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneState {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub best_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub last_milestone_weight: Option<Decimal>,
}

impl MilestoneState {
    /// Feeds a newly recorded weight. Fires when the best weight moved at least one full unit
    /// towards the goal since the last milestone (or since the start weight). Goals without a
    /// direction never fire.
    pub fn observe(&mut self, goal: &GoalConfig, weight: Decimal) -> Option<Milestone> {
        let direction = goal.direction()?;
        if direction == Direction::Keep {
            return None;
        }
        let start = goal.start_weight?;
        let towards_goal = |from: Decimal, to: Decimal| match direction {
            Direction::Loss => from - to,
            _ => to - from,
        };

        let mut best = self.best_weight.unwrap_or(start);
        if towards_goal(best, weight) > Decimal::zero() {
            best = weight;
        }
        self.best_weight = Some(best);

        let last = self.last_milestone_weight.unwrap_or(start);
        if towards_goal(last, best) >= milestone_step() {
            self.last_milestone_weight = Some(best);
            Some(Milestone {
                weight: best,
                previous: last,
            })
        } else {
            self.last_milestone_weight = Some(last);
            None
        }
    }
}
