//! Core game logic and playthrough state

pub mod catalog;
pub mod debrief;
pub mod loader;
pub mod progression;
pub mod resolver;
pub mod scenarios;

pub use catalog::{IndicatorMatch, ScenarioCatalog, ScenarioFilter};
pub use debrief::{Debrief, EndingRank, Grade};
pub use loader::{CatalogDocument, ContentError, ContentFormat, ContentLoader, ContentWarning, LoadResult};
pub use progression::{AchievementUnlocked, ProgressObserver};
pub use resolver::{resolve_choice, resolve_choice_at, AchievementUnlock, NextStep, ResolutionResult};

use crate::data::*;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the current playthrough stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaythroughState {
    NotStarted,
    Briefing { scenario_id: String },
    InPhase { scenario_id: String, phase: String },
    Complete { scenario_id: String },
}

/// Drives one playthrough at a time over a shared catalog
pub struct Game {
    catalog: Arc<ScenarioCatalog>,
    defaults: SessionDefaults,
    session: Option<SessionState>,
    state: PlaythroughState,
    observers: Vec<Box<dyn ProgressObserver>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("session", &self.session.as_ref().map(|s| s.id()))
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Game {
    pub fn new(catalog: Arc<ScenarioCatalog>) -> Self {
        Self::with_defaults(catalog, SessionDefaults::default())
    }

    /// Use configured starting values for every new session
    pub fn with_defaults(catalog: Arc<ScenarioCatalog>, defaults: SessionDefaults) -> Self {
        Self {
            catalog,
            defaults,
            session: None,
            state: PlaythroughState::NotStarted,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &PlaythroughState {
        &self.state
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// The scenario being played, if any
    pub fn scenario(&self) -> Option<&ScenarioDefinition> {
        let id = match &self.state {
            PlaythroughState::NotStarted => return None,
            PlaythroughState::Briefing { scenario_id }
            | PlaythroughState::InPhase { scenario_id, .. }
            | PlaythroughState::Complete { scenario_id } => scenario_id,
        };
        self.catalog.get_scenario(id).ok()
    }

    /// The phase awaiting a choice
    pub fn current_phase(&self) -> Option<&PhaseDefinition> {
        match &self.state {
            PlaythroughState::InPhase { phase, .. } => self.scenario()?.phase(phase),
            _ => None,
        }
    }

    /// Start `scenario_id` with a fresh session. Any previous session is
    /// discarded.
    pub fn start_scenario(&mut self, scenario_id: &str) -> Result<&ScenarioDefinition> {
        let scenario = self.catalog.get_scenario(scenario_id)?;
        info!(scenario = %scenario.id, title = %scenario.title, "scenario started");
        self.session = Some(SessionState::with_defaults(scenario_id, &self.defaults));
        self.state = PlaythroughState::Briefing {
            scenario_id: scenario_id.to_string(),
        };
        Ok(scenario)
    }

    /// Leave the briefing and enter the first phase
    pub fn begin_mission(&mut self) -> Result<&PhaseDefinition> {
        let scenario_id = match &self.state {
            PlaythroughState::Briefing { scenario_id } => scenario_id.clone(),
            PlaythroughState::InPhase { scenario_id, .. } => {
                return Err(GameError::ScenarioInProgress(scenario_id.clone()));
            }
            PlaythroughState::Complete { scenario_id } => {
                return Err(GameError::ScenarioComplete(scenario_id.clone()));
            }
            PlaythroughState::NotStarted => return Err(GameError::NoActiveScenario),
        };
        let catalog = Arc::clone(&self.catalog);
        let scenario = catalog.get_scenario(&scenario_id)?;
        let first = scenario.first_phase().ok_or_else(|| GameError::PhaseNotFound {
            scenario: scenario_id.clone(),
            phase: "<first>".to_string(),
        })?;
        let session = self.session.as_mut().ok_or(GameError::NoActiveScenario)?;

        session.enter_phase(&first.name);
        debug!(scenario = %scenario_id, phase = %first.name, "mission begins");
        self.state = PlaythroughState::InPhase {
            scenario_id,
            phase: first.name.clone(),
        };
        self.current_phase().ok_or(GameError::NoActiveScenario)
    }

    /// Pick option `index` in the current phase
    pub fn choose(&mut self, index: usize) -> Result<ResolutionResult> {
        let (scenario_id, phase) = match &self.state {
            PlaythroughState::InPhase { scenario_id, phase } => (scenario_id.clone(), phase.clone()),
            PlaythroughState::Briefing { scenario_id } => {
                return Err(GameError::MissionNotStarted(scenario_id.clone()));
            }
            PlaythroughState::Complete { scenario_id } => {
                return Err(GameError::ScenarioComplete(scenario_id.clone()));
            }
            PlaythroughState::NotStarted => return Err(GameError::NoActiveScenario),
        };
        let catalog = Arc::clone(&self.catalog);
        let scenario = catalog.get_scenario(&scenario_id)?;
        let session = self.session.as_mut().ok_or(GameError::NoActiveScenario)?;

        let result = resolve_choice(session, scenario, &phase, index)?;

        self.state = match &result.next {
            NextStep::Phase(next) => PlaythroughState::InPhase {
                scenario_id,
                phase: next.clone(),
            },
            NextStep::Complete => PlaythroughState::Complete { scenario_id },
        };
        self.notify(&result);
        Ok(result)
    }

    /// Record an evidence item from the current phase. Returns `true` when it
    /// was not collected before.
    pub fn collect_evidence(&mut self, evidence_id: &str) -> Result<bool> {
        let phase = self.current_phase().ok_or_else(|| match &self.state {
            PlaythroughState::Briefing { scenario_id } => {
                GameError::MissionNotStarted(scenario_id.clone())
            }
            PlaythroughState::Complete { scenario_id } => {
                GameError::ScenarioComplete(scenario_id.clone())
            }
            _ => GameError::NoActiveScenario,
        })?;
        if phase.evidence(evidence_id).is_none() {
            return Err(GameError::EvidenceNotFound {
                phase: phase.name.clone(),
                evidence: evidence_id.to_string(),
            });
        }
        let session = self.session.as_mut().ok_or(GameError::NoActiveScenario)?;
        let fresh = session.collect_evidence(evidence_id);
        if fresh {
            debug!(evidence = evidence_id, "evidence collected");
        }
        Ok(fresh)
    }

    /// Drop the session and go back to the scenario menu
    pub fn return_to_menu(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(session = %session.id(), "session discarded");
        }
        self.state = PlaythroughState::NotStarted;
    }

    /// Ending and grade for a completed playthrough
    pub fn debrief(&self) -> Result<Debrief> {
        match &self.state {
            PlaythroughState::Complete { scenario_id } => {
                let scenario = self.catalog.get_scenario(scenario_id)?;
                let session = self.session.as_ref().ok_or(GameError::NoActiveScenario)?;
                Ok(Debrief::new(session, scenario))
            }
            PlaythroughState::Briefing { scenario_id }
            | PlaythroughState::InPhase { scenario_id, .. } => {
                Err(GameError::ScenarioInProgress(scenario_id.clone()))
            }
            PlaythroughState::NotStarted => Err(GameError::NoActiveScenario),
        }
    }

    fn notify(&mut self, result: &ResolutionResult) {
        if self.observers.is_empty() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let events: Vec<AchievementUnlocked> = result
            .newly_unlocked_achievements
            .iter()
            .map(|id| AchievementUnlocked::from_definition(id, self.catalog.get_achievement(id)))
            .collect();
        let record = session.decisions().last();

        for observer in &mut self.observers {
            if let Some(record) = record {
                observer.on_decision(record);
            }
            for event in &events {
                observer.on_achievement_unlocked(event);
            }
            if result.is_complete() {
                observer.on_scenario_complete(session);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        let catalog = scenarios::builtin_catalog().unwrap();
        Game::new(Arc::new(catalog))
    }

    #[test]
    fn choices_need_a_started_mission() {
        let mut g = game();
        assert_eq!(g.choose(0).unwrap_err(), GameError::NoActiveScenario);

        g.start_scenario("ransomware_001").unwrap();
        assert_eq!(
            g.choose(0).unwrap_err(),
            GameError::MissionNotStarted("ransomware_001".to_string())
        );
        assert!(g.session().unwrap().decisions().is_empty());

        let phase = g.begin_mission().unwrap();
        assert_eq!(phase.name, "detection");
        assert_eq!(
            g.begin_mission().unwrap_err(),
            GameError::ScenarioInProgress("ransomware_001".to_string())
        );
        assert!(g.debrief().is_err());
    }

    #[test]
    fn evidence_is_scoped_to_the_current_phase() {
        let mut g = game();
        g.start_scenario("ransomware_001").unwrap();
        g.begin_mission().unwrap();
        assert!(g.collect_evidence("ev_phishing").unwrap());
        assert!(!g.collect_evidence("ev_phishing").unwrap());

        g.choose(0).unwrap();
        let err = g.collect_evidence("ev_beacon").unwrap_err();
        assert_eq!(
            err,
            GameError::EvidenceNotFound {
                phase: "containment".to_string(),
                evidence: "ev_beacon".to_string()
            }
        );
    }

    #[test]
    fn restart_discards_the_session() {
        let mut g = game();
        g.start_scenario("ransomware_001").unwrap();
        g.begin_mission().unwrap();
        g.choose(0).unwrap();
        let first = g.session().unwrap().id();

        g.start_scenario("ransomware_001").unwrap();
        assert_ne!(g.session().unwrap().id(), first);
        assert!(g.session().unwrap().decisions().is_empty());

        g.return_to_menu();
        assert!(g.session().is_none());
        assert_eq!(g.state(), &PlaythroughState::NotStarted);
    }
}
