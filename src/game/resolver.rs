//! Decision resolver
//!
//! Applies one choice to a session: outcome deltas, decision log,
//! achievement and feature unlocks, then the phase transition. Every
//! precondition is checked before the session is touched.

use crate::data::*;
use crate::{GameError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the playthrough goes after a choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextStep {
    Phase(String),
    Complete,
}

/// The achievement named by the chosen option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlock {
    pub id: String,
    /// `false` when the session already held it
    pub newly_unlocked: bool,
}

/// Everything the caller needs to render a resolved choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub scenario_id: String,
    pub phase_name: String,
    pub choice_index: usize,
    pub feedback: Option<Feedback>,
    pub next: NextStep,
    /// Changes applied to the session after clamping
    pub effective: StateDeltas,
    pub achievement: Option<AchievementUnlock>,
    /// Choice achievement and completion awards unlocked by this call
    pub newly_unlocked_achievements: Vec<String>,
    pub newly_unlocked_features: Vec<String>,
}

impl ResolutionResult {
    pub fn is_complete(&self) -> bool {
        self.next == NextStep::Complete
    }

    pub fn next_phase(&self) -> Option<&str> {
        match &self.next {
            NextStep::Phase(name) => Some(name),
            NextStep::Complete => None,
        }
    }

    pub fn newly_unlocked(&self, achievement_id: &str) -> bool {
        self.newly_unlocked_achievements.iter().any(|id| id == achievement_id)
    }
}

/// Resolve `choice_index` in `phase_name`, stamping the decision with the
/// current time
pub fn resolve_choice(
    session: &mut SessionState,
    scenario: &ScenarioDefinition,
    phase_name: &str,
    choice_index: usize,
) -> Result<ResolutionResult> {
    resolve_choice_at(session, scenario, phase_name, choice_index, Utc::now())
}

/// Same as [`resolve_choice`] with an explicit decision timestamp
pub fn resolve_choice_at(
    session: &mut SessionState,
    scenario: &ScenarioDefinition,
    phase_name: &str,
    choice_index: usize,
    now: DateTime<Utc>,
) -> Result<ResolutionResult> {
    if session.has_completed(&scenario.id) {
        return Err(GameError::ScenarioComplete(scenario.id.clone()));
    }

    let phase = scenario.phase(phase_name).ok_or_else(|| GameError::PhaseNotFound {
        scenario: scenario.id.clone(),
        phase: phase_name.to_string(),
    })?;

    let choice = phase.choices.get(choice_index).ok_or_else(|| GameError::InvalidChoice {
        phase: phase_name.to_string(),
        index: choice_index,
        available: phase.choices.len(),
    })?;

    let outcome = &choice.outcome;
    let next = match &outcome.next_phase {
        Some(target) => {
            if scenario.phase(target).is_none() {
                return Err(GameError::PhaseNotFound {
                    scenario: scenario.id.clone(),
                    phase: target.clone(),
                });
            }
            NextStep::Phase(target.clone())
        }
        None => match scenario.phase_after(phase_name) {
            Some(following) => NextStep::Phase(following.name.clone()),
            None => NextStep::Complete,
        },
    };

    // Validation done; mutation starts here.
    debug!(
        scenario = %scenario.id,
        phase = phase_name,
        choice = choice_index,
        label = %choice.label,
        "applying outcome"
    );
    let effective = session.apply(&outcome.deltas);

    session.record(DecisionRecord {
        scenario_id: scenario.id.clone(),
        phase_name: phase_name.to_string(),
        choice_index,
        deltas: outcome.deltas.clone(),
        effective: effective.clone(),
        timestamp: now,
    });

    let mut newly_unlocked_achievements = Vec::new();
    let achievement = outcome.achievement_id.as_ref().map(|id| {
        let newly_unlocked = session.unlock_achievement(id);
        if newly_unlocked {
            info!(achievement = %id, "achievement unlocked");
            newly_unlocked_achievements.push(id.clone());
        }
        AchievementUnlock {
            id: id.clone(),
            newly_unlocked,
        }
    });

    let newly_unlocked_features: Vec<String> = outcome
        .unlocks
        .iter()
        .filter(|feature| session.unlock_feature(feature))
        .cloned()
        .collect();

    match &next {
        NextStep::Phase(name) => {
            debug!(scenario = %scenario.id, from = phase_name, to = %name, "phase transition");
            session.enter_phase(name);
        }
        NextStep::Complete => {
            session.mark_complete(&scenario.id);
            for award in &scenario.completion_awards {
                if award.is_met_by(session.value(award.field))
                    && session.unlock_achievement(&award.achievement_id)
                {
                    info!(achievement = %award.achievement_id, "completion award unlocked");
                    newly_unlocked_achievements.push(award.achievement_id.clone());
                }
            }
            info!(scenario = %scenario.id, score = session.score(), "scenario complete");
        }
    }

    Ok(ResolutionResult {
        scenario_id: scenario.id.clone(),
        phase_name: phase_name.to_string(),
        choice_index,
        feedback: outcome.feedback.clone(),
        next,
        effective,
        achievement,
        newly_unlocked_achievements,
        newly_unlocked_features,
    })
}
