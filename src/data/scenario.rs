//! Scenario, phase and choice definitions
//!
//! These are read-only content. A scenario is an ordered list of phases;
//! phases are traversed in order unless a choice redirects explicitly.

use super::{CompletionAward, Difficulty, EvidenceRecord, Outcome};
use serde::{Deserialize, Serialize};

fn default_required_level() -> u32 {
    1
}

/// A complete training exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Attack family, e.g. "Ransomware" or "APT"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub estimated_time_minutes: u32,
    /// Player level needed before the scenario is offered
    #[serde(default = "default_required_level")]
    pub required_level: u32,
    #[serde(default)]
    pub briefing: Option<String>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    /// Entry point is the first phase. Never empty once loaded.
    pub phases: Vec<PhaseDefinition>,
    #[serde(default)]
    pub scoring: Option<ScoringThresholds>,
    #[serde(default)]
    pub completion_awards: Vec<CompletionAward>,
}

/// A mission objective shown in the briefing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Objective {
    pub description: String,
    #[serde(default)]
    pub point_value: u32,
}

/// Score cut-offs for the debrief grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringThresholds {
    pub perfect: i64,
    pub excellent: i64,
    pub good: i64,
    pub passing: i64,
}

/// One narrative beat within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseDefinition {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Empty for narrative-only phases
    #[serde(default)]
    pub choices: Vec<ChoiceDefinition>,
    #[serde(default)]
    pub evidence_items: Vec<EvidenceRecord>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// A selectable option bound to an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceDefinition {
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Currency units, shown to the player. Budget changes live in the deltas.
    #[serde(default)]
    pub cost: u64,
    /// Minutes, shown to the player
    #[serde(default)]
    pub time_cost: u32,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub outcome: Outcome,
}

impl ScenarioDefinition {
    pub fn phase(&self, name: &str) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn phase_index(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name == name)
    }

    pub fn first_phase(&self) -> Option<&PhaseDefinition> {
        self.phases.first()
    }

    /// The phase after `name` in declaration order, `None` if `name` is last
    pub fn phase_after(&self, name: &str) -> Option<&PhaseDefinition> {
        self.phase_index(name).and_then(|idx| self.phases.get(idx + 1))
    }

    pub fn is_available_at(&self, level: u32) -> bool {
        self.required_level <= level
    }

    /// Sum of objective point values
    pub fn objective_points(&self) -> u32 {
        self.objectives.iter().map(|o| o.point_value).sum()
    }

    /// Find an evidence template anywhere in the scenario
    pub fn evidence(&self, id: &str) -> Option<(&PhaseDefinition, &EvidenceRecord)> {
        self.phases
            .iter()
            .find_map(|p| p.evidence(id).map(|ev| (p, ev)))
    }
}

impl PhaseDefinition {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: String::new(),
            choices: Vec::new(),
            evidence_items: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn choice(mut self, choice: ChoiceDefinition) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn evidence_item(mut self, record: EvidenceRecord) -> Self {
        self.evidence_items.push(record);
        self
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hints.push(hint.to_string());
        self
    }

    pub fn evidence(&self, id: &str) -> Option<&EvidenceRecord> {
        self.evidence_items.iter().find(|e| e.id == id)
    }

    pub fn is_narrative_only(&self) -> bool {
        self.choices.is_empty()
    }
}

impl ChoiceDefinition {
    pub fn new(label: &str, outcome: Outcome) -> Self {
        Self {
            label: label.to_string(),
            description: String::new(),
            cost: 0,
            time_cost: 0,
            recommended: false,
            outcome,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Displayed price in currency units and minutes
    pub fn priced(mut self, cost: u64, time_cost: u32) -> Self {
        self.cost = cost;
        self.time_cost = time_cost;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    pub fn achievement(mut self, id: &str) -> Self {
        self.outcome.achievement_id = Some(id.to_string());
        self
    }

    pub fn jump_to(mut self, phase: &str) -> Self {
        self.outcome.next_phase = Some(phase.to_string());
        self
    }

    pub fn unlocks(mut self, features: &[&str]) -> Self {
        self.outcome.unlocks.extend(features.iter().map(|f| f.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_phase() -> ScenarioDefinition {
        ScenarioDefinition {
            id: "s".to_string(),
            title: "S".to_string(),
            description: String::new(),
            difficulty: Difficulty::Normal,
            category: "Ransomware".to_string(),
            industry: None,
            estimated_time_minutes: 10,
            required_level: 3,
            briefing: None,
            objectives: vec![
                Objective { description: "a".to_string(), point_value: 100 },
                Objective { description: "b".to_string(), point_value: 150 },
            ],
            phases: vec![
                PhaseDefinition::new("a", "A"),
                PhaseDefinition::new("b", "B"),
                PhaseDefinition::new("c", "C"),
            ],
            scoring: None,
            completion_awards: Vec::new(),
        }
    }

    #[test]
    fn phase_order_helpers() {
        let s = three_phase();
        assert_eq!(s.first_phase().map(|p| p.name.as_str()), Some("a"));
        assert_eq!(s.phase_after("a").map(|p| p.name.as_str()), Some("b"));
        assert!(s.phase_after("c").is_none());
        assert!(s.phase_after("missing").is_none());
        assert_eq!(s.phase_index("c"), Some(2));
    }

    #[test]
    fn level_gate_and_objective_points() {
        let s = three_phase();
        assert!(!s.is_available_at(2));
        assert!(s.is_available_at(3));
        assert_eq!(s.objective_points(), 250);
    }
}
