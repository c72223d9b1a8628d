//! Progress notifications and the long-lived player profile

use crate::data::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// A newly unlocked achievement, resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementUnlocked {
    pub id: String,
    pub name: String,
    pub point_value: u32,
}

impl AchievementUnlocked {
    /// Build from a catalog entry, falling back to the bare id for
    /// achievements the catalog does not describe
    pub fn from_definition(id: &str, definition: Option<&AchievementDefinition>) -> Self {
        match definition {
            Some(def) => Self {
                id: def.id.clone(),
                name: def.name.clone(),
                point_value: def.point_value,
            },
            None => Self {
                id: id.to_string(),
                name: id.to_string(),
                point_value: 0,
            },
        }
    }
}

/// Receives progress events from the [`crate::Game`] driver
pub trait ProgressObserver {
    fn on_decision(&mut self, _record: &DecisionRecord) {}

    fn on_achievement_unlocked(&mut self, _achievement: &AchievementUnlocked) {}

    /// Called once, after the completing choice and its awards
    fn on_scenario_complete(&mut self, _session: &SessionState) {}
}

/// Lets the caller keep a handle on an observer owned by the driver
impl<T: ProgressObserver> ProgressObserver for Rc<RefCell<T>> {
    fn on_decision(&mut self, record: &DecisionRecord) {
        self.borrow_mut().on_decision(record);
    }

    fn on_achievement_unlocked(&mut self, achievement: &AchievementUnlocked) {
        self.borrow_mut().on_achievement_unlocked(achievement);
    }

    fn on_scenario_complete(&mut self, session: &SessionState) {
        self.borrow_mut().on_scenario_complete(session);
    }
}

impl ProgressObserver for PlayerProfile {
    fn on_decision(&mut self, _record: &DecisionRecord) {
        self.decisions_total = self.decisions_total.saturating_add(1);
    }

    fn on_achievement_unlocked(&mut self, achievement: &AchievementUnlocked) {
        // XP is granted once per lifetime, not once per session.
        if self.unlock_achievement(&achievement.id) {
            if let Some(level) = self.add_xp(u64::from(achievement.point_value)) {
                info!(player = %self.name, level, title = %self.title, "rank up");
            }
        }
    }

    fn on_scenario_complete(&mut self, session: &SessionState) {
        self.scenarios_completed = self.scenarios_completed.saturating_add(1);
        let score = session.score();
        if self.scenarios_completed == 1 || score > self.best_score {
            self.best_score = score;
        }
        if let Ok(xp) = u64::try_from(score) {
            if let Some(level) = self.add_xp(xp) {
                info!(player = %self.name, level, title = %self.title, "rank up");
            }
        }
    }
}
