//! End-of-scenario review

use crate::data::*;
use serde::{Deserialize, Serialize};

/// Overall ending, judged on final score and reputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EndingRank {
    Failure,
    Survival,
    Success,
    Exemplary,
}

impl EndingRank {
    pub fn from_state(score: i64, reputation: u8) -> Self {
        match (score, reputation) {
            (s, r) if s >= 300 && r >= 80 => EndingRank::Exemplary,
            (s, r) if s >= 200 && r >= 60 => EndingRank::Success,
            (s, r) if s >= 100 && r >= 40 => EndingRank::Survival,
            _ => EndingRank::Failure,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EndingRank::Exemplary => "EXEMPLARY",
            EndingRank::Success => "SUCCESS",
            EndingRank::Survival => "SURVIVAL",
            EndingRank::Failure => "FAILURE",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EndingRank::Exemplary => "SECURITY HERO",
            EndingRank::Success => "CRISIS AVERTED",
            EndingRank::Survival => "BARELY MADE IT",
            EndingRank::Failure => "CATASTROPHIC BREACH",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            EndingRank::Exemplary => "Your exceptional incident response has saved the company.",
            EndingRank::Success => "You successfully navigated a major security incident.",
            EndingRank::Survival => "The company survives, but it was a close call.",
            EndingRank::Failure => {
                "Your incident response was inadequate. The consequences are severe."
            }
        }
    }

    pub fn career_impact(&self) -> &'static str {
        match self {
            EndingRank::Exemplary => "You're promoted to Chief Information Security Officer",
            EndingRank::Success => "Management recognizes your solid performance",
            EndingRank::Survival => "You keep your job, but you're on thin ice",
            EndingRank::Failure => "You are asked to resign",
        }
    }
}

impl std::fmt::Display for EndingRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code(), self.title())
    }
}

/// Letter grade against a scenario's scoring thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    C,
    B,
    A,
    S,
}

impl Grade {
    pub fn from_score(score: i64, thresholds: &ScoringThresholds) -> Self {
        if score >= thresholds.perfect {
            Grade::S
        } else if score >= thresholds.excellent {
            Grade::A
        } else if score >= thresholds.good {
            Grade::B
        } else if score >= thresholds.passing {
            Grade::C
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Summary of a finished playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debrief {
    pub scenario_id: String,
    pub scenario_title: String,
    pub ending: EndingRank,
    /// `None` when the scenario defines no scoring thresholds
    pub grade: Option<Grade>,
    pub score: i64,
    pub reputation: u8,
    pub budget: i64,
    pub time_elapsed: i64,
    pub containment_level: u8,
    pub systems_affected: i64,
    pub decisions: usize,
    pub achievements: Vec<String>,
    pub features: Vec<String>,
}

impl Debrief {
    pub fn new(session: &SessionState, scenario: &ScenarioDefinition) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            scenario_title: scenario.title.clone(),
            ending: EndingRank::from_state(session.score(), session.reputation()),
            grade: scenario
                .scoring
                .as_ref()
                .map(|t| Grade::from_score(session.score(), t)),
            score: session.score(),
            reputation: session.reputation(),
            budget: session.budget(),
            time_elapsed: session.time_elapsed(),
            containment_level: session.containment_level(),
            systems_affected: session.systems_affected(),
            decisions: session
                .decisions()
                .iter()
                .filter(|d| d.scenario_id == scenario.id)
                .count(),
            achievements: session.unlocked_achievements().iter().cloned().collect(),
            features: session.unlocked_features().iter().cloned().collect(),
        }
    }
}
