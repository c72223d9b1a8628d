//! Per-playthrough session state
//!
//! Only the decision resolver changes a session, through the crate-private
//! mutators below. Everything else sees it read-only.

use super::{Id, StateDeltas, StateField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const GAUGE_MAX: i64 = 100;

/// Starting counter values for a fresh session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub score: i64,
    pub reputation: u8,
    pub budget: i64,
    pub containment_level: u8,
    pub time_elapsed: i64,
    pub stakeholder_confidence: u8,
    pub team_morale: u8,
    pub systems_affected: i64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            score: 0,
            reputation: 100,
            budget: 100_000,
            containment_level: 0,
            time_elapsed: 0,
            stakeholder_confidence: 100,
            team_morale: 100,
            systems_affected: 0,
        }
    }
}

/// One entry of the append-only decision log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub scenario_id: String,
    pub phase_name: String,
    pub choice_index: usize,
    /// Deltas as declared by the content
    pub deltas: StateDeltas,
    /// Change actually applied after clamping
    pub effective: StateDeltas,
    pub timestamp: DateTime<Utc>,
}

/// A stored session that breaks a session invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionDecodeError {
    #[error("{field} is {value}, gauges must stay within 0-100")]
    GaugeOutOfRange { field: StateField, value: u8 },
}

/// Mutable record of one playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct SessionState {
    id: Id,
    scenario_id: String,
    started_at: DateTime<Utc>,
    current_phase: Option<String>,

    score: i64,
    budget: i64,
    time_elapsed: i64,
    systems_affected: i64,

    // 0-100 gauges
    reputation: u8,
    containment_level: u8,
    stakeholder_confidence: u8,
    team_morale: u8,

    decisions_log: Vec<DecisionRecord>,
    evidence_collected: BTreeSet<String>,
    unlocked_achievements: BTreeSet<String>,
    unlocked_features: BTreeSet<String>,
    completed_scenarios: BTreeSet<String>,
}

/// Wire form of [`SessionState`], checked before it becomes one
#[derive(Deserialize)]
struct RawSession {
    id: Id,
    scenario_id: String,
    started_at: DateTime<Utc>,
    current_phase: Option<String>,
    score: i64,
    budget: i64,
    time_elapsed: i64,
    systems_affected: i64,
    reputation: u8,
    containment_level: u8,
    stakeholder_confidence: u8,
    team_morale: u8,
    decisions_log: Vec<DecisionRecord>,
    evidence_collected: BTreeSet<String>,
    unlocked_achievements: BTreeSet<String>,
    unlocked_features: BTreeSet<String>,
    completed_scenarios: BTreeSet<String>,
}

impl TryFrom<RawSession> for SessionState {
    type Error = SessionDecodeError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        for (field, value) in [
            (StateField::Reputation, raw.reputation),
            (StateField::ContainmentLevel, raw.containment_level),
            (StateField::StakeholderConfidence, raw.stakeholder_confidence),
            (StateField::TeamMorale, raw.team_morale),
        ] {
            if i64::from(value) > GAUGE_MAX {
                return Err(SessionDecodeError::GaugeOutOfRange { field, value });
            }
        }
        Ok(Self {
            id: raw.id,
            scenario_id: raw.scenario_id,
            started_at: raw.started_at,
            current_phase: raw.current_phase,
            score: raw.score,
            budget: raw.budget,
            time_elapsed: raw.time_elapsed,
            systems_affected: raw.systems_affected,
            reputation: raw.reputation,
            containment_level: raw.containment_level,
            stakeholder_confidence: raw.stakeholder_confidence,
            team_morale: raw.team_morale,
            decisions_log: raw.decisions_log,
            evidence_collected: raw.evidence_collected,
            unlocked_achievements: raw.unlocked_achievements,
            unlocked_features: raw.unlocked_features,
            completed_scenarios: raw.completed_scenarios,
        })
    }
}

impl SessionState {
    /// Fresh session for `scenario_id` with the standard starting values
    pub fn new(scenario_id: &str) -> Self {
        Self::with_defaults(scenario_id, &SessionDefaults::default())
    }

    /// Fresh session with configured starting values. Gauges above 100 are
    /// clamped.
    pub fn with_defaults(scenario_id: &str, defaults: &SessionDefaults) -> Self {
        let gauge = |v: u8| v.min(GAUGE_MAX as u8);
        Self {
            id: Id::new(),
            scenario_id: scenario_id.to_string(),
            started_at: Utc::now(),
            current_phase: None,
            score: defaults.score,
            budget: defaults.budget,
            time_elapsed: defaults.time_elapsed,
            systems_affected: defaults.systems_affected,
            reputation: gauge(defaults.reputation),
            containment_level: gauge(defaults.containment_level),
            stakeholder_confidence: gauge(defaults.stakeholder_confidence),
            team_morale: gauge(defaults.team_morale),
            decisions_log: Vec::new(),
            evidence_collected: BTreeSet::new(),
            unlocked_achievements: BTreeSet::new(),
            unlocked_features: BTreeSet::new(),
            completed_scenarios: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Phase the next choice is expected in, `None` before the mission
    /// begins or after completion
    pub fn current_phase(&self) -> Option<&str> {
        self.current_phase.as_deref()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn time_elapsed(&self) -> i64 {
        self.time_elapsed
    }

    pub fn systems_affected(&self) -> i64 {
        self.systems_affected
    }

    pub fn reputation(&self) -> u8 {
        self.reputation
    }

    pub fn containment_level(&self) -> u8 {
        self.containment_level
    }

    pub fn stakeholder_confidence(&self) -> u8 {
        self.stakeholder_confidence
    }

    pub fn team_morale(&self) -> u8 {
        self.team_morale
    }

    /// Read any counter by field
    pub fn value(&self, field: StateField) -> i64 {
        match field {
            StateField::Score => self.score,
            StateField::Budget => self.budget,
            StateField::TimeElapsed => self.time_elapsed,
            StateField::SystemsAffected => self.systems_affected,
            StateField::Reputation => i64::from(self.reputation),
            StateField::ContainmentLevel => i64::from(self.containment_level),
            StateField::StakeholderConfidence => i64::from(self.stakeholder_confidence),
            StateField::TeamMorale => i64::from(self.team_morale),
        }
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions_log
    }

    pub fn evidence_collected(&self) -> &BTreeSet<String> {
        &self.evidence_collected
    }

    pub fn unlocked_achievements(&self) -> &BTreeSet<String> {
        &self.unlocked_achievements
    }

    pub fn unlocked_features(&self) -> &BTreeSet<String> {
        &self.unlocked_features
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.contains(id)
    }

    pub fn has_completed(&self, scenario_id: &str) -> bool {
        self.completed_scenarios.contains(scenario_id)
    }

    pub fn completed_scenarios(&self) -> &BTreeSet<String> {
        &self.completed_scenarios
    }

    /// Add `delta` to `field`, clamping gauges into [0, 100] after the
    /// addition. Returns the change actually applied.
    pub(crate) fn apply_delta(&mut self, field: StateField, delta: i64) -> i64 {
        let before = self.value(field);
        match field {
            StateField::Score => self.score = self.score.saturating_add(delta),
            StateField::Budget => self.budget = self.budget.saturating_add(delta),
            StateField::TimeElapsed => self.time_elapsed = self.time_elapsed.saturating_add(delta),
            StateField::SystemsAffected => {
                self.systems_affected = self.systems_affected.saturating_add(delta)
            }
            StateField::Reputation => self.reputation = clamp_gauge(before, delta),
            StateField::ContainmentLevel => self.containment_level = clamp_gauge(before, delta),
            StateField::StakeholderConfidence => {
                self.stakeholder_confidence = clamp_gauge(before, delta)
            }
            StateField::TeamMorale => self.team_morale = clamp_gauge(before, delta),
        }
        self.value(field) - before
    }

    /// Apply every present delta; returns the effective changes
    pub(crate) fn apply(&mut self, deltas: &StateDeltas) -> StateDeltas {
        let mut effective = StateDeltas::new();
        for (field, delta) in deltas.entries() {
            let applied = self.apply_delta(field, delta);
            effective.set(field, applied);
        }
        effective
    }

    pub(crate) fn record(&mut self, decision: DecisionRecord) {
        self.decisions_log.push(decision);
    }

    /// `true` when the achievement was not already held
    pub(crate) fn unlock_achievement(&mut self, id: &str) -> bool {
        self.unlocked_achievements.insert(id.to_string())
    }

    pub(crate) fn unlock_feature(&mut self, id: &str) -> bool {
        self.unlocked_features.insert(id.to_string())
    }

    pub(crate) fn collect_evidence(&mut self, id: &str) -> bool {
        self.evidence_collected.insert(id.to_string())
    }

    pub(crate) fn enter_phase(&mut self, phase: &str) {
        self.current_phase = Some(phase.to_string());
    }

    pub(crate) fn mark_complete(&mut self, scenario_id: &str) {
        self.current_phase = None;
        self.completed_scenarios.insert(scenario_id.to_string());
    }
}

fn clamp_gauge(current: i64, delta: i64) -> u8 {
    current.saturating_add(delta).clamp(0, GAUGE_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_uses_standard_start_values() {
        let s = SessionState::new("ransomware_001");
        assert_eq!(s.score(), 0);
        assert_eq!(s.reputation(), 100);
        assert_eq!(s.budget(), 100_000);
        assert_eq!(s.containment_level(), 0);
        assert_eq!(s.time_elapsed(), 0);
        assert_eq!(s.stakeholder_confidence(), 100);
        assert_eq!(s.team_morale(), 100);
        assert!(s.decisions().is_empty());
        assert!(s.current_phase().is_none());
    }

    #[test]
    fn gauges_clamp_after_addition() {
        let mut s = SessionState::new("x");
        assert_eq!(s.apply_delta(StateField::Reputation, 25), 0);
        assert_eq!(s.reputation(), 100);
        assert_eq!(s.apply_delta(StateField::Reputation, -250), -100);
        assert_eq!(s.reputation(), 0);
        assert_eq!(s.apply_delta(StateField::ContainmentLevel, 80), 80);
        assert_eq!(s.apply_delta(StateField::ContainmentLevel, 80), 20);
        assert_eq!(s.containment_level(), 100);
    }

    #[test]
    fn budget_goes_negative_and_score_saturates() {
        let mut s = SessionState::new("x");
        s.apply_delta(StateField::Budget, -2_500_000);
        assert_eq!(s.budget(), -2_400_000);
        s.apply_delta(StateField::Score, i64::MAX);
        s.apply_delta(StateField::Score, 10);
        assert_eq!(s.score(), i64::MAX);
    }

    #[test]
    fn configured_gauges_are_capped() {
        let defaults = SessionDefaults {
            reputation: 250,
            ..SessionDefaults::default()
        };
        let s = SessionState::with_defaults("x", &defaults);
        assert_eq!(s.reputation(), 100);
    }

    #[test]
    fn unlocks_are_idempotent() {
        let mut s = SessionState::new("x");
        assert!(s.unlock_achievement("quick_thinker"));
        assert!(!s.unlock_achievement("quick_thinker"));
        assert_eq!(s.unlocked_achievements().len(), 1);
        assert!(s.collect_evidence("ev_1"));
        assert!(!s.collect_evidence("ev_1"));
    }

    #[test]
    fn stored_session_round_trips() {
        let mut s = SessionState::new("ransomware_001");
        s.apply_delta(StateField::Reputation, -35);
        s.collect_evidence("ev_beacon");
        s.enter_phase("containment");
        let json = serde_json::to_value(&s).unwrap();
        let back: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn stored_gauge_above_range_is_rejected() {
        let mut json = serde_json::to_value(SessionState::new("x")).unwrap();
        json["reputation"] = serde_json::json!(250);
        let err = serde_json::from_value::<SessionState>(json).unwrap_err();
        assert!(err.to_string().contains("reputation is 250"), "{err}");

        let mut json = serde_json::to_value(SessionState::new("x")).unwrap();
        json["team_morale"] = serde_json::json!(100);
        json["containment_level"] = serde_json::json!(101);
        assert!(serde_json::from_value::<SessionState>(json).is_err());
    }
}
