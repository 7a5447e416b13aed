//! Dashboard trackers: weight history and personal goals. In-memory only.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default horizon for a new goal.
pub const DEFAULT_GOAL_HORIZON_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(String),
    #[error("goal title must not be empty")]
    EmptyTitle,
    #[error("no goal with id {0}")]
    UnknownGoal(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub weight: f64,
}

/// Weight history kept in date order.
#[derive(Debug, Default, Clone)]
pub struct WeightLog {
    entries: Vec<WeightEntry>,
    next_id: u64,
}

impl WeightLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after any entry with the same or an earlier date.
    pub fn record(&mut self, date: NaiveDate, weight: f64) -> Result<EntryId, TrackerError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(TrackerError::InvalidWeight(weight.to_string()));
        }
        self.next_id += 1;
        let id = EntryId(self.next_id);
        let at = self.entries.partition_point(|e| e.date <= date);
        self.entries.insert(at, WeightEntry { id, date, weight });
        Ok(id)
    }

    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&WeightEntry> {
        self.entries.last()
    }

    /// Latest minus earliest weight; negative means weight was lost.
    pub fn change_since_first(&self) -> Option<f64> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) if self.entries.len() > 1 => Some(last.weight - first.weight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoalId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub target_date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Default, Clone)]
pub struct GoalBoard {
    goals: Vec<Goal>,
    next_id: u64,
}

/// `today` plus [`DEFAULT_GOAL_HORIZON_DAYS`].
pub fn default_target_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_GOAL_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

impl GoalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, title: &str, target_date: NaiveDate) -> Result<GoalId, TrackerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::EmptyTitle);
        }
        self.next_id += 1;
        let id = GoalId(self.next_id);
        self.goals.push(Goal {
            id,
            title: title.to_string(),
            target_date,
            completed: false,
        });
        Ok(id)
    }

    /// Flips completion and returns the new state.
    pub fn toggle(&mut self, id: GoalId) -> Result<bool, TrackerError> {
        let goal = self.find_mut(id)?;
        goal.completed = !goal.completed;
        Ok(goal.completed)
    }

    pub fn rename(&mut self, id: GoalId, title: &str) -> Result<(), TrackerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::EmptyTitle);
        }
        self.find_mut(id)?.title = title.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != before
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Share of completed goals, rounded to a whole percent. 0 with no goals.
    pub fn completion_percentage(&self) -> u8 {
        if self.goals.is_empty() {
            return 0;
        }
        let done = self.goals.iter().filter(|g| g.completed).count();
        ((done as f64 / self.goals.len() as f64) * 100.0).round() as u8
    }

    fn find_mut(&mut self, id: GoalId) -> Result<&mut Goal, TrackerError> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(TrackerError::UnknownGoal(id.0))
    }
}
