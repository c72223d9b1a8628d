//! Outcome descriptors attached to choices
//!
//! Deltas are a fixed record keyed by [`StateField`] rather than a loose
//! name/value bag, so a misspelled counter fails when content is parsed.

use super::FeedbackKind;
use serde::{Deserialize, Serialize};

/// A numeric counter on the session state that outcomes may change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    Score,
    Budget,
    TimeElapsed,
    SystemsAffected,
    Reputation,
    ContainmentLevel,
    StakeholderConfidence,
    TeamMorale,
}

impl StateField {
    pub const ALL: [StateField; 8] = [
        StateField::Score,
        StateField::Budget,
        StateField::TimeElapsed,
        StateField::SystemsAffected,
        StateField::Reputation,
        StateField::ContainmentLevel,
        StateField::StakeholderConfidence,
        StateField::TeamMorale,
    ];

    /// Clamped fields always stay within `[0, 100]`
    pub fn is_clamped(&self) -> bool {
        matches!(
            self,
            StateField::Reputation
                | StateField::ContainmentLevel
                | StateField::StakeholderConfidence
                | StateField::TeamMorale
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StateField::Score => "score",
            StateField::Budget => "budget",
            StateField::TimeElapsed => "time_elapsed",
            StateField::SystemsAffected => "systems_affected",
            StateField::Reputation => "reputation",
            StateField::ContainmentLevel => "containment_level",
            StateField::StakeholderConfidence => "stakeholder_confidence",
            StateField::TeamMorale => "team_morale",
        }
    }
}

impl std::fmt::Display for StateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed changes to session counters. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDeltas {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(default, alias = "timeElapsed", skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<i64>,
    #[serde(default, alias = "systemsAffected", skip_serializing_if = "Option::is_none")]
    pub systems_affected: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,
    #[serde(default, alias = "containmentLevel", skip_serializing_if = "Option::is_none")]
    pub containment_level: Option<i64>,
    #[serde(default, alias = "stakeholderConfidence", skip_serializing_if = "Option::is_none")]
    pub stakeholder_confidence: Option<i64>,
    #[serde(default, alias = "teamMorale", skip_serializing_if = "Option::is_none")]
    pub team_morale: Option<i64>,
}

impl StateDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: StateField) -> Option<i64> {
        match field {
            StateField::Score => self.score,
            StateField::Budget => self.budget,
            StateField::TimeElapsed => self.time_elapsed,
            StateField::SystemsAffected => self.systems_affected,
            StateField::Reputation => self.reputation,
            StateField::ContainmentLevel => self.containment_level,
            StateField::StakeholderConfidence => self.stakeholder_confidence,
            StateField::TeamMorale => self.team_morale,
        }
    }

    pub fn set(&mut self, field: StateField, value: i64) {
        let slot = match field {
            StateField::Score => &mut self.score,
            StateField::Budget => &mut self.budget,
            StateField::TimeElapsed => &mut self.time_elapsed,
            StateField::SystemsAffected => &mut self.systems_affected,
            StateField::Reputation => &mut self.reputation,
            StateField::ContainmentLevel => &mut self.containment_level,
            StateField::StakeholderConfidence => &mut self.stakeholder_confidence,
            StateField::TeamMorale => &mut self.team_morale,
        };
        *slot = Some(value);
    }

    /// Builder-style setter for content written in code
    pub fn with(mut self, field: StateField, value: i64) -> Self {
        self.set(field, value);
        self
    }

    /// Present deltas in declaration order
    pub fn entries(&self) -> Vec<(StateField, i64)> {
        StateField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|delta| (*field, delta)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        StateField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

/// Feedback text returned to the caller for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            details: Vec::new(),
        }
    }

    pub fn detail(mut self, line: &str) -> Self {
        self.details.push(line.to_string());
        self
    }
}

/// Everything that happens when a choice is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outcome {
    #[serde(default)]
    pub deltas: StateDeltas,
    #[serde(default)]
    pub feedback: Option<Feedback>,
    #[serde(default)]
    pub achievement_id: Option<String>,
    /// Explicit redirect; otherwise the next phase in order
    #[serde(default)]
    pub next_phase: Option<String>,
    /// Feature ids unlocked by this choice
    #[serde(default)]
    pub unlocks: Vec<String>,
}

impl Outcome {
    pub fn with_deltas(deltas: StateDeltas) -> Self {
        Self {
            deltas,
            ..Self::default()
        }
    }
}

/// An achievement granted when a scenario completes with a counter in range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionAward {
    pub achievement_id: String,
    pub field: StateField,
    #[serde(default)]
    pub at_least: Option<i64>,
    #[serde(default)]
    pub at_most: Option<i64>,
}

impl CompletionAward {
    pub fn at_least(achievement_id: &str, field: StateField, threshold: i64) -> Self {
        Self {
            achievement_id: achievement_id.to_string(),
            field,
            at_least: Some(threshold),
            at_most: None,
        }
    }

    pub fn at_most(achievement_id: &str, field: StateField, threshold: i64) -> Self {
        Self {
            achievement_id: achievement_id.to_string(),
            field,
            at_least: None,
            at_most: Some(threshold),
        }
    }

    /// An award without any bound never fires
    pub fn is_met_by(&self, value: i64) -> bool {
        if self.at_least.is_none() && self.at_most.is_none() {
            return false;
        }
        self.at_least.map_or(true, |min| value >= min) && self.at_most.map_or(true, |max| value <= max)
    }
}
