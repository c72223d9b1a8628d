//! Content loader
//!
//! Reads scenario catalogs from YAML or JSON documents:
//! 1. Parse into typed definitions (unknown fields are rejected)
//! 2. Hard validation, collecting every problem before failing
//! 3. Lint pass for suspicious but legal structure
//! 4. Freeze the catalog behind an `Arc`

use super::catalog::ScenarioCatalog;
use crate::data::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// On-disk catalog layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub achievements: Vec<AchievementDefinition>,
    #[serde(default)]
    pub iocs: Vec<IocDefinition>,
    #[serde(default)]
    pub detection_patterns: Vec<DetectionPattern>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

/// Errors raised while loading content
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML content: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported content file extension: {0}")]
    UnsupportedFormat(String),

    #[error("content failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Document syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Yaml,
    Json,
}

impl ContentFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ContentFormat::Yaml),
            "json" => Ok(ContentFormat::Json),
            _ => Err(ContentError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Result of loading a catalog
#[derive(Debug)]
pub struct LoadResult {
    pub catalog: Arc<ScenarioCatalog>,
    pub warnings: Vec<ContentWarning>,
}

/// A lint finding that does not prevent loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    pub message: String,
    pub location: Option<String>,
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Catalog loader
#[derive(Debug, Default)]
pub struct ContentLoader;

impl ContentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a catalog file, choosing the parser by extension
    pub fn load_file(&self, path: &Path) -> Result<LoadResult, ContentError> {
        let format = ContentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?format, "loading content");
        self.load_str(&text, format)
    }

    pub fn load_str(&self, text: &str, format: ContentFormat) -> Result<LoadResult, ContentError> {
        let document: CatalogDocument = match format {
            ContentFormat::Yaml => serde_yaml::from_str(text)?,
            ContentFormat::Json => serde_json::from_str(text)?,
        };
        self.load_document(document)
    }

    /// Validate and freeze an already parsed document
    pub fn load_document(&self, document: CatalogDocument) -> Result<LoadResult, ContentError> {
        let warnings = validate(&document)?;
        for warning in &warnings {
            warn!(location = warning.location.as_deref().unwrap_or("-"), "{}", warning.message);
        }
        debug!(
            scenarios = document.scenarios.len(),
            achievements = document.achievements.len(),
            iocs = document.iocs.len(),
            "content loaded"
        );
        Ok(LoadResult {
            catalog: Arc::new(ScenarioCatalog::from_validated(document)),
            warnings,
        })
    }
}

/// Check a document. Hard errors are collected and returned together;
/// otherwise the lint warnings are returned.
pub fn validate(document: &CatalogDocument) -> Result<Vec<ContentWarning>, ContentError> {
    let mut errors = Vec::new();

    let mut achievement_ids = HashSet::new();
    for achievement in &document.achievements {
        if !achievement_ids.insert(achievement.id.as_str()) {
            errors.push(format!("duplicate achievement id '{}'", achievement.id));
        }
    }

    let mut ioc_ids = HashSet::new();
    for ioc in &document.iocs {
        if !ioc_ids.insert(ioc.id.as_str()) {
            errors.push(format!("duplicate IOC id '{}'", ioc.id));
        }
    }

    let mut scenario_ids = HashSet::new();
    for scenario in &document.scenarios {
        if !scenario_ids.insert(scenario.id.as_str()) {
            errors.push(format!("duplicate scenario id '{}'", scenario.id));
        }
        check_scenario(scenario, &achievement_ids, &mut errors);
    }

    if !errors.is_empty() {
        return Err(ContentError::Validation(errors));
    }

    let mut warnings: Vec<ContentWarning> =
        document.scenarios.iter().flat_map(lint_scenario).collect();
    warnings.extend(lint_ioc_references(document, &ioc_ids));
    Ok(warnings)
}

/// Identifier-style evidence labels and detection patterns that point at
/// IOCs the library does not describe
fn lint_ioc_references(document: &CatalogDocument, ioc_ids: &HashSet<&str>) -> Vec<ContentWarning> {
    let mut warnings = Vec::new();
    for scenario in &document.scenarios {
        for phase in &scenario.phases {
            for ev in &phase.evidence_items {
                for label in ev.iocs.iter().filter(|l| is_ioc_reference(l)) {
                    if !ioc_ids.contains(label.as_str()) {
                        warnings.push(ContentWarning {
                            message: format!("evidence '{}' references unknown IOC '{}'", ev.id, label),
                            location: Some(format!("{}/{}", scenario.id, phase.name)),
                        });
                    }
                }
            }
        }
    }
    for pattern in &document.detection_patterns {
        for id in pattern.indicates.iter().filter(|id| !ioc_ids.contains(id.as_str())) {
            warnings.push(ContentWarning {
                message: format!("pattern '{}' indicates unknown IOC '{}'", pattern.pattern, id),
                location: Some("detection_patterns".to_string()),
            });
        }
    }
    warnings
}

fn check_scenario(
    scenario: &ScenarioDefinition,
    achievement_ids: &HashSet<&str>,
    errors: &mut Vec<String>,
) {
    let sid = &scenario.id;
    if scenario.phases.is_empty() {
        errors.push(format!("scenario '{}' has no phases", sid));
    }

    let mut phase_names = HashSet::new();
    let mut evidence_ids = HashSet::new();
    for phase in &scenario.phases {
        if !phase_names.insert(phase.name.as_str()) {
            errors.push(format!("scenario '{}': duplicate phase '{}'", sid, phase.name));
        }
        for ev in &phase.evidence_items {
            if !evidence_ids.insert(ev.id.as_str()) {
                errors.push(format!("scenario '{}': duplicate evidence id '{}'", sid, ev.id));
            }
        }
    }

    for phase in &scenario.phases {
        for (index, choice) in phase.choices.iter().enumerate() {
            let outcome = &choice.outcome;
            if let Some(target) = &outcome.next_phase {
                if scenario.phase(target).is_none() {
                    errors.push(format!(
                        "scenario '{}', phase '{}', choice {}: next_phase '{}' does not exist",
                        sid, phase.name, index, target
                    ));
                }
            }
            if let Some(id) = &outcome.achievement_id {
                if !achievement_ids.contains(id.as_str()) {
                    errors.push(format!(
                        "scenario '{}', phase '{}', choice {}: unknown achievement '{}'",
                        sid, phase.name, index, id
                    ));
                }
            }
        }
    }

    for award in &scenario.completion_awards {
        if !achievement_ids.contains(award.achievement_id.as_str()) {
            errors.push(format!(
                "scenario '{}': completion award references unknown achievement '{}'",
                sid, award.achievement_id
            ));
        }
        if award.at_least.is_none() && award.at_most.is_none() {
            errors.push(format!(
                "scenario '{}': completion award '{}' has no bound",
                sid, award.achievement_id
            ));
        }
    }
}

/// Phase indices a phase can lead to
fn successors(scenario: &ScenarioDefinition, index: usize) -> Vec<usize> {
    let phase = &scenario.phases[index];
    phase
        .choices
        .iter()
        .filter_map(|choice| match &choice.outcome.next_phase {
            Some(target) => scenario.phase_index(target),
            None if index + 1 < scenario.phases.len() => Some(index + 1),
            None => None,
        })
        .collect()
}

fn lint_scenario(scenario: &ScenarioDefinition) -> Vec<ContentWarning> {
    let mut warnings = Vec::new();
    let last = scenario.phases.len().saturating_sub(1);

    for (index, phase) in scenario.phases.iter().enumerate() {
        let location = Some(format!("{}/{}", scenario.id, phase.name));
        // Without a choice nothing leaves the phase.
        if phase.is_narrative_only() {
            warnings.push(ContentWarning {
                message: "phase has no choices; a playthrough reaching it cannot finish".to_string(),
                location: location.clone(),
            });
        }
        for (choice_index, choice) in phase.choices.iter().enumerate() {
            let Some(target) = &choice.outcome.next_phase else {
                continue;
            };
            if let Some(target_index) = scenario.phase_index(target) {
                // Every cycle needs at least one edge that does not move forward.
                if target_index <= index {
                    warnings.push(ContentWarning {
                        message: format!(
                            "choice {} jumps back to '{}'; the playthrough can loop",
                            choice_index, target
                        ),
                        location: location.clone(),
                    });
                }
            }
        }
    }

    if scenario.phases.is_empty() {
        return warnings;
    }

    let mut reached = vec![false; scenario.phases.len()];
    let mut queue = VecDeque::from([0]);
    reached[0] = true;
    while let Some(index) = queue.pop_front() {
        for next in successors(scenario, index) {
            if !reached[next] {
                reached[next] = true;
                queue.push_back(next);
            }
        }
    }
    for (index, phase) in scenario.phases.iter().enumerate() {
        if !reached[index] {
            warnings.push(ContentWarning {
                message: "phase is unreachable from the first phase".to_string(),
                location: Some(format!("{}/{}", scenario.id, phase.name)),
            });
        }
    }

    let can_complete = scenario.phases[last].choices.iter().any(|c| c.outcome.next_phase.is_none())
        && reached[last];
    if !can_complete {
        warnings.push(ContentWarning {
            message: "no choice path reaches completion".to_string(),
            location: Some(scenario.id.clone()),
        });
    }

    warnings
}
