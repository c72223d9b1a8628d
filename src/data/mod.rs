//! Data structures for scenario content, the IOC library and playthrough
//! state
//!
//! Scenario definitions are static content; `SessionState` is the only
//! mutable record and is changed exclusively by the decision resolver.

pub mod achievement;
pub mod evidence;
pub mod ioc;
pub mod outcome;
pub mod player;
pub mod scenario;
pub mod session;

pub use achievement::*;
pub use evidence::*;
pub use ioc::*;
pub use outcome::*;
pub use player::*;
pub use scenario::*;
pub use session::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How demanding a scenario is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn badge(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "★",
            Difficulty::Normal => "★★",
            Difficulty::Hard => "★★★",
            Difficulty::Expert => "★★★★",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Tone of the feedback shown after a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Warning,
    Error,
    Critical,
    Info,
}

impl FeedbackKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            FeedbackKind::Success => "✔",
            FeedbackKind::Warning => "▲",
            FeedbackKind::Error => "✖",
            FeedbackKind::Critical => "⬤",
            FeedbackKind::Info => "ℹ",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackKind::Success => write!(f, "SUCCESS"),
            FeedbackKind::Warning => write!(f, "WARNING"),
            FeedbackKind::Error => write!(f, "ERROR"),
            FeedbackKind::Critical => write!(f, "CRITICAL"),
            FeedbackKind::Info => write!(f, "INFO"),
        }
    }
}

/// A unique identifier wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_legacy_easy_alias() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert_eq!("EXPERT".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
    }
}
