//! Evidence templates that phases expose for discovery

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    /// Phishing or exfiltration mail
    Email,
    /// Traffic captures, beacons, DNS
    Network,
    /// Process, registry, or file-system activity on an endpoint
    Host,
    /// Raw log lines
    Log,
    /// Security tool alert (SIEM, EDR)
    Alert,
    /// A suspicious file or binary
    File,
    /// Statements gathered from staff
    Interview,
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceKind::Email => write!(f, "Email"),
            EvidenceKind::Network => write!(f, "Network"),
            EvidenceKind::Host => write!(f, "Host"),
            EvidenceKind::Log => write!(f, "Log"),
            EvidenceKind::Alert => write!(f, "Alert"),
            EvidenceKind::File => write!(f, "File"),
            EvidenceKind::Interview => write!(f, "Interview"),
        }
    }
}

/// A discoverable piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceRecord {
    pub id: String,
    pub kind: EvidenceKind,
    /// Free-form source timestamp, e.g. "2025-11-06 14:23:15"
    #[serde(default)]
    pub timestamp: Option<String>,
    pub description: String,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
    /// Indicators of compromise this item points at
    #[serde(default)]
    pub iocs: Vec<String>,
    #[serde(default)]
    pub correct_analysis: Option<String>,
}

impl EvidenceRecord {
    pub fn new(id: &str, kind: EvidenceKind, description: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            timestamp: None,
            description: description.to_string(),
            details: BTreeMap::new(),
            iocs: Vec::new(),
            correct_analysis: None,
        }
    }

    pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn ioc(mut self, indicator: &str) -> Self {
        self.iocs.push(indicator.to_string());
        self
    }

    pub fn analysis(mut self, conclusion: &str) -> Self {
        self.correct_analysis = Some(conclusion.to_string());
        self
    }

    /// Get a brief description of the evidence
    pub fn brief(&self) -> String {
        let mut line = format!("{}: {}", self.kind, self.description);
        if !self.iocs.is_empty() {
            line.push_str(&format!(" [{}]", self.iocs.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_lists_iocs() {
        let mut ev = EvidenceRecord::new("ev_beacon", EvidenceKind::Network, "Outbound beacon traffic")
            .detail("destination", "203.0.113.42:443");
        ev.iocs.push("cobalt_strike".to_string());
        assert_eq!(ev.brief(), "Network: Outbound beacon traffic [cobalt_strike]");
        assert_eq!(ev.details["destination"], "203.0.113.42:443");
    }

    #[test]
    fn numeric_details_survive_deserialization() {
        let ev: EvidenceRecord = serde_json::from_str(
            r#"{"id":"ev_enc","kind":"host","description":"Mass file modification",
                "details":{"files_affected":45237}}"#,
        )
        .unwrap();
        assert_eq!(ev.details["files_affected"], 45237);
    }
}
