//! Read-only scenario and achievement registry

use super::loader::{validate, CatalogDocument, ContentError};
use crate::data::*;
use crate::{GameError, Result};
use std::collections::HashMap;

/// Filter for [`ScenarioCatalog::list_scenarios`]. Empty fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioFilter {
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Only scenarios a player of this level may start
    pub max_required_level: Option<u32>,
}

impl ScenarioFilter {
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn available_at(mut self, level: u32) -> Self {
        self.max_required_level = Some(level);
        self
    }

    pub fn matches(&self, scenario: &ScenarioDefinition) -> bool {
        self.difficulty.map_or(true, |d| scenario.difficulty == d)
            && self
                .category
                .as_ref()
                .map_or(true, |c| scenario.category.eq_ignore_ascii_case(c))
            && self
                .max_required_level
                .map_or(true, |level| scenario.is_available_at(level))
    }
}

/// Scenario catalog. Built once, never mutated.
///
/// Construct through [`crate::game::loader::ContentLoader`] or
/// [`crate::game::scenarios::builtin_catalog`], both of which validate the
/// content first.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<ScenarioDefinition>,
    scenario_index: HashMap<String, usize>,
    achievements: Vec<AchievementDefinition>,
    achievement_index: HashMap<String, usize>,
    iocs: Vec<IocDefinition>,
    ioc_index: HashMap<String, usize>,
    detection_patterns: Vec<DetectionPattern>,
}

/// A detection pattern that matched an observation, with the IOCs it points
/// at. Ids the library does not describe are left out of `iocs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorMatch<'a> {
    pub pattern: &'a DetectionPattern,
    pub iocs: Vec<&'a IocDefinition>,
}

impl ScenarioCatalog {
    /// Validate a document and index it. Lint warnings are dropped; use the
    /// loader to see them.
    pub fn new(document: CatalogDocument) -> std::result::Result<Self, ContentError> {
        validate(&document)?;
        Ok(Self::from_validated(document))
    }

    /// Index already-validated content
    pub(crate) fn from_validated(document: CatalogDocument) -> Self {
        let CatalogDocument {
            achievements,
            iocs,
            detection_patterns,
            scenarios,
        } = document;
        Self {
            scenario_index: index_by(&scenarios, |s| &s.id),
            scenarios,
            achievement_index: index_by(&achievements, |a| &a.id),
            achievements,
            ioc_index: index_by(&iocs, |i| &i.id),
            iocs,
            detection_patterns,
        }
    }

    pub fn get_scenario(&self, id: &str) -> Result<&ScenarioDefinition> {
        self.scenario_index
            .get(id)
            .map(|&i| &self.scenarios[i])
            .ok_or_else(|| GameError::ScenarioNotFound(id.to_string()))
    }

    /// Scenarios matching `filter`, in catalog order
    pub fn list_scenarios(&self, filter: &ScenarioFilter) -> Vec<&ScenarioDefinition> {
        self.scenarios.iter().filter(|s| filter.matches(s)).collect()
    }

    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    pub fn get_achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievement_index.get(id).map(|&i| &self.achievements[i])
    }

    pub fn achievements(&self) -> &[AchievementDefinition] {
        &self.achievements
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for s in &self.scenarios {
            if !s.category.is_empty() && !seen.contains(&s.category.as_str()) {
                seen.push(s.category.as_str());
            }
        }
        seen
    }

    pub fn get_ioc(&self, id: &str) -> Option<&IocDefinition> {
        self.ioc_index.get(id).map(|&i| &self.iocs[i])
    }

    pub fn iocs(&self) -> &[IocDefinition] {
        &self.iocs
    }

    /// IOCs in `category`, ignoring case
    pub fn iocs_by_category(&self, category: &str) -> Vec<&IocDefinition> {
        self.iocs
            .iter()
            .filter(|i| i.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// IOCs used by any actor whose name contains `actor`
    pub fn iocs_by_threat_actor(&self, actor: &str) -> Vec<&IocDefinition> {
        self.iocs.iter().filter(|i| i.is_attributed_to(actor)).collect()
    }

    /// Remediation steps for an IOC; empty when the id is unknown
    pub fn remediation(&self, id: &str) -> &[String] {
        self.get_ioc(id)
            .map(|i| i.remediation.as_slice())
            .unwrap_or_default()
    }

    pub fn detection_patterns(&self) -> &[DetectionPattern] {
        &self.detection_patterns
    }

    /// Detection patterns suggested by an observed behaviour
    pub fn analyze_indicator(&self, observation: &str) -> Vec<IndicatorMatch<'_>> {
        self.detection_patterns
            .iter()
            .filter(|p| p.matches(observation))
            .map(|pattern| IndicatorMatch {
                pattern,
                iocs: pattern.indicates.iter().filter_map(|id| self.get_ioc(id)).collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (key(item).clone(), i))
        .collect()
}
