//! Incident Drill: a scenario decision engine for incident response training
//!
//! Players work through scripted cybersecurity incidents, pick one option
//! per phase, and watch score, reputation, containment and budget react.
//!
//! # Game Mechanics
//!
//! - **Decisions**: every choice carries typed outcome deltas
//! - **Gauges**: reputation, containment, stakeholder confidence and team
//!   morale stay within 0-100; score, budget and time accumulate freely
//! - **Branching**: choices advance to the next phase or jump explicitly
//! - **Achievements**: unlocked once per session, forwarded to the profile
//!
//! # Architecture
//!
//! - `data` - Content definitions, session state, player profile
//! - `game` - Catalog, decision resolver, playthrough driver, content loader
//! - `config` - Engine configuration file
//! - `logging` - Tracing subscriber setup for the binary

pub mod config;
pub mod data;
pub mod game;
pub mod logging;

pub use data::*;
pub use game::Game;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Recoverable engine errors. None of them leave a session changed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Phase '{phase}' not found in scenario '{scenario}'")]
    PhaseNotFound { scenario: String, phase: String },

    #[error("Invalid choice {index} in phase '{phase}' ({available} available)")]
    InvalidChoice {
        phase: String,
        index: usize,
        available: usize,
    },

    #[error("Scenario already complete: {0}")]
    ScenarioComplete(String),

    #[error("Mission not started for scenario '{0}': still in briefing")]
    MissionNotStarted(String),

    #[error("Scenario still in progress: {0}")]
    ScenarioInProgress(String),

    #[error("No active scenario")]
    NoActiveScenario,

    #[error("Evidence '{evidence}' not found in phase '{phase}'")]
    EvidenceNotFound { phase: String, evidence: String },
}
