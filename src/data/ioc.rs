//! Indicator-of-compromise library entries
//!
//! An [`IocDefinition`] describes one tool or malware family: how it shows
//! up on the network and on hosts, which ATT&CK techniques it maps to, who
//! uses it and how to clean up after it. Evidence items point at entries by
//! id. [`DetectionPattern`]s map an observed behaviour back to entries.

use serde::{Deserialize, Serialize};

/// How dangerous an IOC is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// One observable trace of an IOC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorDefinition {
    /// e.g. "c2_beacon", "named_pipe", "lsass_access"
    #[serde(alias = "type")]
    pub kind: String,
    pub indicator: String,
    #[serde(default)]
    pub details: String,
    /// How an analyst would spot it
    #[serde(default)]
    pub detection: String,
}

/// A catalogued tool or malware family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IocDefinition {
    pub id: String,
    pub name: String,
    /// e.g. "C2 Framework", "Credential Stealer"
    pub category: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub network_indicators: Vec<IndicatorDefinition>,
    #[serde(default)]
    pub host_indicators: Vec<IndicatorDefinition>,
    /// ATT&CK technique ids such as "T1055"
    #[serde(default)]
    pub mitre_attack: Vec<String>,
    #[serde(default)]
    pub threat_actors: Vec<String>,
    #[serde(default)]
    pub remediation: Vec<String>,
}

impl IocDefinition {
    pub fn new(id: &str, name: &str, category: &str, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            severity,
            description: String::new(),
            network_indicators: Vec::new(),
            host_indicators: Vec::new(),
            mitre_attack: Vec::new(),
            threat_actors: Vec::new(),
            remediation: Vec::new(),
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn network(mut self, kind: &str, indicator: &str, detection: &str) -> Self {
        self.network_indicators.push(IndicatorDefinition {
            kind: kind.to_string(),
            indicator: indicator.to_string(),
            details: String::new(),
            detection: detection.to_string(),
        });
        self
    }

    pub fn host(mut self, kind: &str, indicator: &str, detection: &str) -> Self {
        self.host_indicators.push(IndicatorDefinition {
            kind: kind.to_string(),
            indicator: indicator.to_string(),
            details: String::new(),
            detection: detection.to_string(),
        });
        self
    }

    pub fn techniques(mut self, ids: &[&str]) -> Self {
        self.mitre_attack.extend(ids.iter().map(|t| t.to_string()));
        self
    }

    pub fn actors(mut self, actors: &[&str]) -> Self {
        self.threat_actors.extend(actors.iter().map(|a| a.to_string()));
        self
    }

    pub fn remediate(mut self, steps: &[&str]) -> Self {
        self.remediation.extend(steps.iter().map(|s| s.to_string()));
        self
    }

    /// Network indicators followed by host indicators
    pub fn indicators(&self) -> impl Iterator<Item = &IndicatorDefinition> {
        self.network_indicators.iter().chain(self.host_indicators.iter())
    }

    /// Case-insensitive substring match on the threat actor names, so
    /// "apt29" finds "APT29 (Cozy Bear)"
    pub fn is_attributed_to(&self, actor: &str) -> bool {
        let needle = actor.to_lowercase();
        self.threat_actors
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
    }
}

/// How strongly a pattern points at its IOCs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
            Confidence::VeryHigh => write!(f, "very high"),
        }
    }
}

/// Maps an observed behaviour to the IOCs it suggests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionPattern {
    pub pattern: String,
    /// IOC ids
    pub indicates: Vec<String>,
    pub confidence: Confidence,
    #[serde(default)]
    pub reasoning: String,
}

impl DetectionPattern {
    pub fn new(pattern: &str, indicates: &[&str], confidence: Confidence, reasoning: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            indicates: indicates.iter().map(|i| i.to_string()).collect(),
            confidence,
            reasoning: reasoning.to_string(),
        }
    }

    /// Either text contains the other, ignoring case. Blank observations
    /// match nothing.
    pub fn matches(&self, observation: &str) -> bool {
        let observation = observation.trim().to_lowercase();
        if observation.is_empty() {
            return false;
        }
        let pattern = self.pattern.to_lowercase();
        pattern.contains(&observation) || observation.contains(&pattern)
    }
}

/// Evidence `iocs` entries written as identifiers (`cobalt_strike`) are
/// references into the IOC library; anything else ("Lateral movement") is a
/// free-form label.
pub fn is_ioc_reference(label: &str) -> bool {
    let mut chars = label.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_references_and_prose_is_not() {
        assert!(is_ioc_reference("cobalt_strike"));
        assert!(is_ioc_reference("mimikatz"));
        assert!(is_ioc_reference("huc_packet2"));
        assert!(!is_ioc_reference("Lateral movement"));
        assert!(!is_ioc_reference("Macro-enabled Excel file"));
        assert!(!is_ioc_reference("_private"));
        assert!(!is_ioc_reference(""));
    }

    #[test]
    fn patterns_match_in_both_directions() {
        let p = DetectionPattern::new(
            "w3wp.exe spawning cmd.exe",
            &["china_chopper"],
            Confidence::High,
            "IIS worker process should not spawn command shells",
        );
        assert!(p.matches("W3WP.EXE spawning"));
        assert!(p.matches("EDR alert: w3wp.exe spawning cmd.exe on MAIL01"));
        assert!(!p.matches("rundll32 loading beacon.dll"));
        assert!(!p.matches("   "));
    }

    #[test]
    fn actor_lookup_is_partial_and_case_insensitive() {
        let ioc = IocDefinition::new("cobalt_strike", "Cobalt Strike", "C2 Framework", Severity::Critical)
            .actors(&["APT29 (Cozy Bear)", "FIN7"]);
        assert!(ioc.is_attributed_to("apt29"));
        assert!(ioc.is_attributed_to("cozy bear"));
        assert!(!ioc.is_attributed_to("Lazarus"));
    }

    #[test]
    fn yaml_accepts_type_alias_and_rejects_unknown_fields() {
        let ioc: IocDefinition = serde_yaml::from_str(
            "id: mimikatz\nname: Mimikatz\ncategory: Credential Stealer\nseverity: critical\n\
             host_indicators:\n  - type: lsass_access\n    indicator: LSASS read by PowerShell\n",
        )
        .unwrap();
        assert_eq!(ioc.host_indicators[0].kind, "lsass_access");
        assert_eq!(ioc.indicators().count(), 1);

        let err = serde_yaml::from_str::<IocDefinition>(
            "id: x\nname: X\ncategory: C\nseverity: low\nnetworkIOCs: []\n",
        );
        assert!(err.is_err());
    }
}
