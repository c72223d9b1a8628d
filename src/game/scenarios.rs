//! Built-in scenarios
//!
//! Content shipped with the engine so it runs without a catalog file. Each
//! scenario is assembled in code and goes through the same validation as
//! loaded content.

use super::catalog::ScenarioCatalog;
use super::loader::{CatalogDocument, ContentError};
use crate::data::StateField::{
    Budget, ContainmentLevel, Reputation, Score, StakeholderConfidence, SystemsAffected,
    TeamMorale, TimeElapsed,
};
use crate::data::*;

/// The shipped catalog
pub fn builtin_catalog() -> Result<ScenarioCatalog, ContentError> {
    ScenarioCatalog::new(builtin_document())
}

pub fn builtin_document() -> CatalogDocument {
    CatalogDocument {
        achievements: builtin_achievements(),
        iocs: builtin_iocs(),
        detection_patterns: builtin_detection_patterns(),
        scenarios: vec![create_night_shift_scenario(), create_lockdown_scenario()],
    }
}

pub fn builtin_achievements() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::new(
            "quick_thinker",
            "Quick Thinker",
            "Made the optimal choice in the initial detection",
            100,
        )
        .icon("⚡"),
        AchievementDefinition::new(
            "team_player",
            "Team Player",
            "Effectively coordinated with stakeholders",
            100,
        )
        .icon("🤝"),
        AchievementDefinition::new(
            "ethical_responder",
            "Ethical Responder",
            "Refused to negotiate with criminals",
            150,
        )
        .icon("⚖️")
        .rarity(Rarity::Uncommon),
        AchievementDefinition::new(
            "expert_consulted",
            "Expert Consulted",
            "Brought in specialized expertise",
            100,
        )
        .icon("🎓"),
        AchievementDefinition::new(
            "defense_in_depth",
            "Defense in Depth",
            "Implemented comprehensive security controls",
            200,
        )
        .icon("🛡️")
        .rarity(Rarity::Rare),
        AchievementDefinition::new(
            "threat_hunter",
            "Threat Hunter",
            "Successfully identified APT activity",
            150,
        )
        .icon("🎯")
        .rarity(Rarity::Uncommon),
        AchievementDefinition::new(
            "apt_hunter",
            "APT Hunter",
            "Eliminated advanced persistent threats",
            250,
        )
        .icon("🔍")
        .rarity(Rarity::Rare),
        AchievementDefinition::new(
            "transparent_leader",
            "Transparent Leader",
            "Provided honest, timely communication",
            150,
        )
        .icon("💎")
        .rarity(Rarity::Uncommon),
        AchievementDefinition::new(
            "compliance_champion",
            "Compliance Champion",
            "Exceeded regulatory requirements",
            200,
        )
        .icon("🏆")
        .rarity(Rarity::Rare),
        AchievementDefinition::new("perfect_score", "Perfect Response", "Achieved maximum score", 500)
            .icon("⭐")
            .rarity(Rarity::Legendary),
        AchievementDefinition::new(
            "speed_runner",
            "Speed Runner",
            "Completed response in minimal time",
            300,
        )
        .icon("⏱️")
        .rarity(Rarity::Epic),
        AchievementDefinition::new(
            "reputation_master",
            "Reputation Master",
            "Maintained 100%+ reputation",
            300,
        )
        .icon("👑")
        .rarity(Rarity::Epic),
    ]
}

/// IOC library entries referenced by built-in evidence
pub fn builtin_iocs() -> Vec<IocDefinition> {
    vec![
        IocDefinition::new("cobalt_strike", "Cobalt Strike", "C2 Framework", Severity::Critical)
            .described("Post-exploitation framework used by APT groups and ransomware operators")
            .network(
                "c2_beacon",
                "Beaconing to external IPs on ports 80, 443, 8080",
                "Look for periodic connections to the same external IP with jitter",
            )
            .network(
                "dns",
                "DNS queries to typosquatted domains hosting beacon configs",
                "Monitor DNS for lookalikes of legitimate domains",
            )
            .host(
                "process",
                "rundll32.exe executing a beacon DLL",
                "Monitor rundll32 with unusual DLL paths or arguments",
            )
            .host(
                "named_pipe",
                r"Named pipes \\.\pipe\msagent_* or \\.\pipe\MSSE-*",
                "Monitor named pipe creation with MSSE/msagent prefixes",
            )
            .techniques(&["T1071.001", "T1573.001", "T1090.002", "T1055", "T1218.011"])
            .actors(&["APT29 (Cozy Bear)", "APT32 (OceanLotus)", "FIN7", "Maze ransomware group"])
            .remediate(&[
                "Block C2 IP addresses and domains at firewall",
                "Kill beacon processes and remove persistence",
                "Scan all systems for named pipes matching Cobalt Strike patterns",
                "Reset credentials for all potentially compromised accounts",
                "Isolate infected systems from network",
            ]),
        IocDefinition::new("mimikatz", "Mimikatz", "Credential Stealer", Severity::Critical)
            .described("Extracts credentials from LSASS memory, enabling lateral movement")
            .network(
                "smb",
                "Pass-the-hash authentication attempts",
                "Event 4624 with LogonType 3 and NTLM",
            )
            .network(
                "kerberos",
                "Golden ticket usage with a 10-year lifetime",
                "Event 4768/4769 with unusual ticket properties",
            )
            .host(
                "lsass_access",
                "Non-system process reading lsass.exe memory",
                "Sysmon Event ID 10 ProcessAccess to lsass.exe",
            )
            .host(
                "registry",
                "WDigest UseLogonCredential enabled",
                "Alert on WDigest registry modification",
            )
            .techniques(&["T1003.001", "T1550.002", "T1558.001"])
            .actors(&["APT28 (Fancy Bear)", "APT29 (Cozy Bear)", "Lazarus Group", "FIN6"])
            .remediate(&[
                "Immediately reset all domain admin passwords",
                "Revoke all Kerberos tickets",
                "Enable Protected Process Light for LSASS",
                "Disable WDigest authentication",
                "Enable Credential Guard",
            ]),
        IocDefinition::new("china_chopper", "China Chopper", "Web Shell", Severity::High)
            .described("Tiny one-line webshell used for persistence and remote access")
            .network(
                "http_pattern",
                "Command terminator &echo [S]&cd&echo [E] in POST bodies",
                "Alert on HTTP bodies containing the terminator",
            )
            .host(
                "process",
                "w3wp.exe spawning cmd.exe or powershell.exe",
                "Monitor the process tree under the IIS worker",
            )
            .techniques(&["T1505.003", "T1190", "T1059.003"])
            .actors(&["Emissary Panda (APT27)", "APT40 (Leviathan)", "Hafnium"])
            .remediate(&[
                "Delete webshell files from web directories",
                "Patch Exchange Server vulnerabilities",
                "Check for other webshells using YARA rules",
                "Change all administrator passwords",
            ]),
        IocDefinition::new(
            "powershell_empire",
            "PowerShell Empire",
            "Post-Exploitation Framework",
            Severity::Critical,
        )
        .described("PowerShell-based C2 framework for lateral movement and persistence")
        .network(
            "c2_beacon",
            "PowerShell beaconing to /admin/get.php or /news.php",
            "Block known Empire C2 URI patterns",
        )
        .host(
            "command_line",
            "Encoded PowerShell with hidden window",
            "Monitor Event 4104 for encoded PowerShell execution",
        )
        .techniques(&["T1059.001", "T1547.001", "T1546.003", "T1027"])
        .actors(&["APT19 (Deep Panda)", "APT29", "FIN7"])
        .remediate(&[
            "Enable PowerShell Constrained Language Mode",
            "Enable Script Block Logging and Transcription",
            "Remove PowerShell v2",
        ]),
    ]
}

pub fn builtin_detection_patterns() -> Vec<DetectionPattern> {
    vec![
        DetectionPattern::new(
            "Beaconing traffic every 60 seconds with jitter",
            &["cobalt_strike", "powershell_empire"],
            Confidence::High,
            "C2 frameworks use regular beaconing with jitter to blend in",
        ),
        DetectionPattern::new(
            "lsass.exe memory accessed by PowerShell",
            &["mimikatz"],
            Confidence::VeryHigh,
            "Mimikatz is loaded via PowerShell to dump LSASS credentials",
        ),
        DetectionPattern::new(
            "w3wp.exe spawning cmd.exe",
            &["china_chopper"],
            Confidence::High,
            "IIS worker process should not spawn command shells",
        ),
        DetectionPattern::new(
            "PowerShell -enc with hidden window",
            &["powershell_empire", "cobalt_strike"],
            Confidence::High,
            "Encoded PowerShell with stealth flags indicates a C2 framework",
        ),
        DetectionPattern::new(
            "Kerberos ticket with 10-year lifetime",
            &["mimikatz"],
            Confidence::VeryHigh,
            "Golden ticket attack with a forged Kerberos ticket",
        ),
    ]
}

fn option(label: &str, deltas: &[(StateField, i64)], feedback: Feedback) -> ChoiceDefinition {
    let deltas = deltas
        .iter()
        .fold(StateDeltas::new(), |acc, &(field, value)| acc.with(field, value));
    let mut outcome = Outcome::with_deltas(deltas);
    outcome.feedback = Some(feedback);
    ChoiceDefinition::new(label, outcome)
}

/// The 2:47 AM ransomware campaign: six decisions from first alert to
/// regulator notification
pub fn create_night_shift_scenario() -> ScenarioDefinition {
    let detection = PhaseDefinition::new("detection", "INITIAL DETECTION")
        .described(
            "It's 2:47 AM. Your phone buzzes with an alert from the SIEM system. Multiple \
             endpoints are showing unusual encryption activity and file extensions are being \
             changed to '.encrypted'. The help desk is receiving calls from the night shift \
             about inaccessible files.",
        )
        .choice(option(
            "Immediately shut down the entire network to stop the spread",
            &[(Score, 30), (Reputation, -10), (TimeElapsed, 5), (ContainmentLevel, 60)],
            Feedback::new(
                FeedbackKind::Warning,
                "Network Shutdown",
                "The ransomware spread is halted, but business operations are completely \
                 stopped. The CEO is furious about the unplanned downtime.",
            )
            .detail("+30 points for quick action, -10 reputation for business impact"),
        ))
        .choice(option(
            "Investigate further to understand the scope before taking action",
            &[(Score, 10), (TimeElapsed, 25), (ContainmentLevel, 20), (SystemsAffected, 50)],
            Feedback::new(
                FeedbackKind::Error,
                "Delayed Response",
                "While investigating, the ransomware spreads to 50 more systems. You've lost \
                 valuable time.",
            ),
        ))
        .choice(
            option(
                "Isolate affected systems and preserve evidence while investigating",
                &[(Score, 50), (TimeElapsed, 10), (ContainmentLevel, 80)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Excellent Choice!",
                    "You isolate affected systems using network segmentation. Evidence is \
                     preserved for forensics, and the spread is contained.",
                ),
            )
            .recommended()
            .achievement("quick_thinker"),
        )
        .choice(option(
            "Wait until morning when the full team is available",
            &[(Score, -50), (Reputation, -40), (TimeElapsed, 300), (SystemsAffected, 200)],
            Feedback::new(
                FeedbackKind::Critical,
                "DISASTER!",
                "By morning, 200+ systems are encrypted. Critical business data is lost.",
            )
            .detail("-50 points and -40 reputation for delayed response"),
        ));

    let communication = PhaseDefinition::new("communication", "COMMUNICATION CRISIS")
        .described(
            "The incident is partially contained. The CEO, CISO, legal team, and PR department \
             all want updates, and the media has caught wind of the situation. Who do you \
             notify first?",
        )
        .choice(
            option(
                "Alert the executive team and legal counsel immediately",
                &[(Score, 40), (Reputation, 10), (TimeElapsed, 15)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Smart Move!",
                    "Legal counsel helps navigate compliance requirements. The executive team \
                     coordinates resources to support your response.",
                ),
            )
            .recommended()
            .achievement("team_player"),
        )
        .choice(option(
            "Focus on technical remediation first, communicate later",
            &[(Score, 20), (Reputation, -20), (TimeElapsed, 5)],
            Feedback::new(
                FeedbackKind::Warning,
                "Technical Focus",
                "Technical progress is good, but stakeholders are frustrated. Legal issues may \
                 arise from delayed notification.",
            ),
        ))
        .choice(option(
            "Contact law enforcement and regulatory bodies right away",
            &[(Score, 35), (Reputation, 5), (TimeElapsed, 30)],
            Feedback::new(
                FeedbackKind::Success,
                "Compliance First",
                "Law enforcement is engaged and regulatory requirements are met. However, the \
                 executive team feels blindsided.",
            ),
        ))
        .choice(option(
            "Prepare a public statement to get ahead of the story",
            &[(Score, -20), (Reputation, -30), (TimeElapsed, 45)],
            Feedback::new(
                FeedbackKind::Critical,
                "Premature Disclosure",
                "Without legal review the statement backfires and exposes the company to \
                 liability. Stock price drops 15% on the news.",
            ),
        ));

    let ransom = PhaseDefinition::new("ransom_demand", "THE RANSOM DEMAND")
        .described(
            "\"Pay 50 Bitcoin within 48 hours or the decryption key will be destroyed.\" Your \
             backups were also hit; only 60% of data can be restored. The executive team wants \
             a recommendation.",
        )
        .choice(option(
            "Pay the ransom immediately to minimize downtime",
            &[(Score, -30), (Reputation, -25), (TimeElapsed, 20)],
            Feedback::new(
                FeedbackKind::Critical,
                "Payment Failed",
                "The attackers provide a faulty decryption key. Only 40% of files recover, and \
                 you've funded criminal activity.",
            ),
        ))
        .choice(
            option(
                "Refuse to pay, restore from backups, and rebuild compromised systems",
                &[(Score, 50), (Reputation, 15), (TimeElapsed, 120)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Ethical Response!",
                    "It takes 5 days, but 60% of data is restored from backups and the rest is \
                     rebuilt with improved security.",
                ),
            )
            .achievement("ethical_responder"),
        )
        .choice(option(
            "Negotiate with attackers while preparing recovery options",
            &[(Score, 10), (Reputation, -5), (TimeElapsed, 60)],
            Feedback::new(
                FeedbackKind::Warning,
                "Risky Strategy",
                "You restore from backups without paying, but the negotiation tactics were \
                 risky and ethically questionable.",
            ),
        ))
        .choice(
            option(
                "Engage a specialized incident response firm to handle this",
                &[(Score, 60), (Reputation, 20), (TimeElapsed, 30)],
                Feedback::new(
                    FeedbackKind::Success,
                    "OUTSTANDING!",
                    "The IR firm identifies the variant and finds a decryption tool. 70% of \
                     data is recovered without paying the ransom.",
                ),
            )
            .recommended()
            .achievement("expert_consulted"),
        );

    let root_cause = PhaseDefinition::new("root_cause", "ROOT CAUSE ANALYSIS")
        .described(
            "Forensics reveals three potential entry points: a phishing email opened in \
             accounting, an unpatched VPN server, and compromised vendor credentials.",
        )
        .choice(option(
            "Implement comprehensive security awareness training for all staff",
            &[(Score, 25), (TimeElapsed, 45)],
            Feedback::new(
                FeedbackKind::Warning,
                "Partial Solution",
                "Training is launched company-wide. The technical vulnerabilities remain.",
            ),
        ))
        .choice(option(
            "Accelerate patch management and vulnerability scanning programs",
            &[(Score, 25), (TimeElapsed, 45)],
            Feedback::new(
                FeedbackKind::Warning,
                "Technical Focus",
                "Patch management is improved, but human error is still the weakest link.",
            ),
        ))
        .choice(option(
            "Review and strengthen all third-party vendor security controls",
            &[(Score, 25), (TimeElapsed, 45)],
            Feedback::new(
                FeedbackKind::Warning,
                "Supply Chain Security",
                "Third-party risks are addressed, but internal vulnerabilities still exist.",
            ),
        ))
        .choice(
            option(
                "Implement all of the above with a phased security improvement plan",
                &[(Score, 70), (Reputation, 25), (TimeElapsed, 120), (ContainmentLevel, 100)],
                Feedback::new(
                    FeedbackKind::Success,
                    "EXCEPTIONAL!",
                    "The board approves increased security budget based on your multi-layered \
                     plan.",
                )
                .detail("Monthly security awareness training")
                .detail("Automated patch management within 48 hours")
                .detail("Third-party security assessments"),
            )
            .recommended()
            .achievement("defense_in_depth"),
        );

    let threat_intel = PhaseDefinition::new("threat_intel", "THREAT INTELLIGENCE")
        .described(
            "APT indicators suggest the attackers were in your network for weeks before the \
             ransomware, possibly exfiltrating data. Determine the full scope.",
        )
        .choice(option(
            "Immediately disconnect all systems and perform full forensic imaging",
            &[(Score, 20), (Reputation, -15), (TimeElapsed, 240)],
            Feedback::new(
                FeedbackKind::Warning,
                "Overly Aggressive",
                "Forensic integrity is preserved at the cost of massive business disruption.",
            ),
        ))
        .choice(
            option(
                "Deploy EDR/XDR solutions and conduct live forensics while monitoring",
                &[(Score, 55), (Reputation, 10), (TimeElapsed, 72)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Balanced Approach",
                    "Live forensics reveals the full attack timeline while operations continue.",
                ),
            )
            .achievement("threat_hunter"),
        )
        .choice(option(
            "Focus only on the ransomware, ignore the potential APT activity",
            &[(Score, -40), (Reputation, -30), (TimeElapsed, 10)],
            Feedback::new(
                FeedbackKind::Critical,
                "Critical Oversight",
                "Three months later the attackers still have access. A second attack follows.",
            ),
        ))
        .choice(
            option(
                "Bring in specialized APT hunting team with threat intelligence",
                &[(Score, 65), (Reputation, 15), (TimeElapsed, 96)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Expert Analysis",
                    "Backdoors, lateral movement, and data staging are found. All persistence is \
                     eliminated.",
                ),
            )
            .recommended()
            .achievement("apt_hunter"),
        );

    let compliance = PhaseDefinition::new("compliance", "REGULATORY COMPLIANCE")
        .described(
            "Customer PII was accessed. GDPR and CCPA notification deadlines are approaching \
             and regulators are asking questions.",
        )
        .choice(option(
            "Delay notifications until you have complete information",
            &[(Score, -45), (Reputation, -40), (TimeElapsed, 168)],
            Feedback::new(
                FeedbackKind::Critical,
                "Compliance Violation",
                "Regulatory deadlines are missed. Fines are imposed and lawsuits are filed.",
            ),
        ))
        .choice(
            option(
                "Provide immediate transparent disclosure with what you know",
                &[(Score, 50), (Reputation, 20), (TimeElapsed, 24)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Transparent Response",
                    "All deadlines are met with honest communication. Regulators acknowledge \
                     your cooperation.",
                ),
            )
            .achievement("transparent_leader"),
        )
        .choice(option(
            "Notify only the minimum required by law, downplay the breach",
            &[(Score, 10), (Reputation, -25), (TimeElapsed, 72)],
            Feedback::new(
                FeedbackKind::Warning,
                "Minimal Compliance",
                "Customers feel deceived when the full scope is revealed.",
            ),
        ))
        .choice(
            option(
                "Work with legal team on comprehensive compliance plan with customer support",
                &[(Score, 60), (Reputation, 25), (TimeElapsed, 48)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Exemplary Compliance",
                    "Free credit monitoring and a dedicated support line keep customer \
                     retention high.",
                ),
            )
            .recommended()
            .achievement("compliance_champion"),
        );

    ScenarioDefinition {
        id: "night_shift_ransomware".to_string(),
        title: "Night Shift Ransomware".to_string(),
        description: "A ransomware outbreak at 2:47 AM, followed through communication, \
                      ransom, root cause, threat hunting and compliance decisions."
            .to_string(),
        difficulty: Difficulty::Beginner,
        category: "Ransomware".to_string(),
        industry: Some("Technology".to_string()),
        estimated_time_minutes: 20,
        required_level: 1,
        briefing: Some(
            "You are the on-call incident responder. Every decision moves score, reputation \
             and the clock."
                .to_string(),
        ),
        objectives: Vec::new(),
        phases: vec![detection, communication, ransom, root_cause, threat_intel, compliance],
        scoring: None,
        completion_awards: vec![
            CompletionAward::at_least("perfect_score", Score, 300),
            CompletionAward::at_most("speed_runner", TimeElapsed, 200),
            CompletionAward::at_least("reputation_master", Reputation, 100),
        ],
    }
}

/// MedCare Hospital ransomware outbreak with budget and stakeholder pressure
pub fn create_lockdown_scenario() -> ScenarioDefinition {
    let objective = |description: &str, point_value: u32| Objective {
        description: description.to_string(),
        point_value,
    };

    let detection = PhaseDefinition::new("detection", "Detection & Analysis")
        .described(
            "11:32 AM, Monday. EDR has triggered multiple critical alerts. Ransom notes demand \
             $2.5 million in Bitcoin, 45 workstations and 3 file servers are encrypted, and \
             medical staff cannot reach patient records.",
        )
        .evidence_item(
            EvidenceRecord::new("ev_phishing", EvidenceKind::Email, "Phishing email with malicious attachment")
                .at("2025-11-06 14:23:15")
                .detail("from", "support@microsft-365.com")
                .detail("subject", "Important: Update Your Password")
                .detail("attachment", "password_update.xlsx")
                .detail("recipient", "john.smith@company.com")
                .ioc("Typosquatted domain")
                .ioc("Macro-enabled Excel file")
                .analysis("Initial access via phishing"),
        )
        .evidence_item(
            EvidenceRecord::new("ev_beacon", EvidenceKind::Network, "Suspicious outbound beacon traffic")
                .at("2025-11-06 14:28:42")
                .detail("source", "192.168.1.105")
                .detail("destination", "203.0.113.42:443")
                .detail("protocol", "HTTPS")
                .detail("pattern", "Regular beaconing every 60s with 10% jitter")
                .ioc("cobalt_strike")
                .analysis("Cobalt Strike C2 beacon"),
        )
        .evidence_item(
            EvidenceRecord::new("ev_lateral", EvidenceKind::Host, "Unusual SMB activity between workstations")
                .at("2025-11-06 15:45:12")
                .detail("source", "WS-SMITH-105")
                .detail("destination", "WS-JONES-110")
                .detail("tool", "PsExec")
                .detail("user", "DOMAIN\\admin_backup")
                .ioc("Lateral movement")
                .ioc("Compromised credentials")
                .ioc("mimikatz")
                .analysis("Lateral movement using stolen credentials"),
        )
        .evidence_item(
            EvidenceRecord::new("ev_encryption", EvidenceKind::Host, "Mass file modification activity")
                .at("2025-11-07 03:40:22")
                .detail("process", "svchost.exe (renamed ransomware)")
                .detail("files_affected", 45_237)
                .detail("extension_changed", ".encrypted")
                .detail("ransom_note", "README_DECRYPT.txt")
                .ioc("File encryption")
                .ioc("Ransomware execution")
                .analysis("Ransomware payload execution"),
        )
        .hint("Check email logs first - many ransomware attacks start with phishing")
        .hint("Look for beaconing patterns in network traffic - regular intervals with jitter")
        .choice(
            option(
                "Immediate Network Segmentation",
                &[
                    (Score, 50),
                    (Reputation, 5),
                    (TimeElapsed, 10),
                    (ContainmentLevel, 40),
                    (Budget, -5_000),
                    (StakeholderConfidence, 5),
                ],
                Feedback::new(
                    FeedbackKind::Success,
                    "Excellent Containment",
                    "Infected segments are isolated. The spread stops while evidence is \
                     preserved.",
                ),
            )
            .described("Isolate infected segments to halt the spread")
            .priced(5_000, 10)
            .recommended(),
        )
        .choice(
            option(
                "Deep Investigation First",
                &[
                    (Score, 30),
                    (Reputation, -10),
                    (TimeElapsed, 30),
                    (ContainmentLevel, 10),
                    (SystemsAffected, 25),
                    (Budget, -15_000),
                    (StakeholderConfidence, -15),
                ],
                Feedback::new(
                    FeedbackKind::Warning,
                    "Investigation Delayed Containment",
                    "You learn a lot about the attack, but 25 more systems are encrypted while \
                     you look.",
                ),
            )
            .described("Understand the full scope before acting")
            .priced(15_000, 30),
        )
        .choice(
            option(
                "Prepare Ransom Payment",
                &[
                    (Score, -20),
                    (Reputation, -25),
                    (TimeElapsed, 15),
                    (ContainmentLevel, 5),
                    (StakeholderConfidence, -20),
                ],
                Feedback::new(
                    FeedbackKind::Error,
                    "Premature Ransom Consideration",
                    "Payment preparation signals weakness and does nothing to stop the spread.",
                ),
            )
            .described("Begin arranging Bitcoin for the attackers")
            .priced(2_500_000, 15),
        )
        .choice(
            option(
                "External Incident Response Team",
                &[
                    (Score, 40),
                    (Reputation, 10),
                    (TimeElapsed, 20),
                    (ContainmentLevel, 30),
                    (Budget, -50_000),
                    (StakeholderConfidence, 10),
                    (TeamMorale, 15),
                ],
                Feedback::new(
                    FeedbackKind::Success,
                    "Expert Assistance Secured",
                    "A retained IR firm joins the bridge call within the hour.",
                ),
            )
            .described("Call in a retained IR firm")
            .priced(50_000, 20)
            .unlocks(&["expert_mode", "advanced_forensics"]),
        );

    let containment = PhaseDefinition::new("containment", "Containment")
        .described("Stop the attack from spreading")
        .hint("Isolate systems at network level to preserve forensic evidence")
        .choice(
            option(
                "Disable network ports on switches",
                &[(Score, 50), (ContainmentLevel, 30)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Correct!",
                    "This prevents lateral movement while preserving evidence.",
                ),
            )
            .recommended(),
        )
        .choice(option(
            "Shut down all servers immediately",
            &[(Score, -30), (StakeholderConfidence, -20), (TimeElapsed, 30)],
            Feedback::new(
                FeedbackKind::Error,
                "Too Aggressive",
                "This causes business disruption and potential data loss.",
            ),
        ))
        .choice(option(
            "Block C2 domain at firewall only",
            &[(Score, 10), (ContainmentLevel, 10)],
            Feedback::new(
                FeedbackKind::Warning,
                "Not Sufficient",
                "Attackers may have alternative C2 channels.",
            ),
        ));

    let eradication = PhaseDefinition::new("eradication", "Eradication")
        .described("Remove the threat completely")
        .choice(
            option(
                "Kill processes, remove registry persistence, delete files",
                &[(Score, 100), (ContainmentLevel, 20)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Comprehensive",
                    "All beacon components are removed.",
                ),
            )
            .recommended(),
        )
        .choice(option(
            "Just kill the beacon process",
            &[(Score, -20)],
            Feedback::new(
                FeedbackKind::Error,
                "Insufficient",
                "Persistence mechanisms will relaunch the beacon.",
            ),
        ))
        .choice(option(
            "Reimage all systems immediately without analysis",
            &[(Score, 30), (TimeElapsed, 60)],
            Feedback::new(
                FeedbackKind::Warning,
                "Evidence Destroyed",
                "Analyze first, then reimage.",
            ),
        ));

    let recovery = PhaseDefinition::new("recovery", "Recovery")
        .described("Restore operations safely")
        .choice(
            option(
                "Restore from clean backups after verification",
                &[(Score, 100), (StakeholderConfidence, 10), (TeamMorale, 10)],
                Feedback::new(
                    FeedbackKind::Success,
                    "Correct!",
                    "Backups are verified clean before restoration.",
                ),
            )
            .recommended(),
        )
        .choice(option(
            "Pay the ransom to get decryption key",
            &[(Score, -100), (Reputation, -30), (Budget, -2_500_000)],
            Feedback::new(
                FeedbackKind::Critical,
                "Never Recommended",
                "Payment funds criminals and carries no guarantee of decryption.",
            ),
        ))
        .choice(option(
            "Use free decryption tools from internet",
            &[(Score, 10)],
            Feedback::new(
                FeedbackKind::Warning,
                "Verify First",
                "Some tools work for specific variants, but verify legitimacy first.",
            ),
        ));

    ScenarioDefinition {
        id: "ransomware_001".to_string(),
        title: "Operation LockDown - Ransomware Outbreak".to_string(),
        description: "A sophisticated ransomware attack has encrypted critical systems across \
                      your organization"
            .to_string(),
        difficulty: Difficulty::Normal,
        category: "Ransomware".to_string(),
        industry: Some("Healthcare".to_string()),
        estimated_time_minutes: 45,
        required_level: 1,
        briefing: Some(
            "As Lead Incident Responder at MedCare Hospital you must contain the outbreak while \
             keeping patient care systems operational."
                .to_string(),
        ),
        objectives: vec![
            objective("Identify patient zero and infection vector", 100),
            objective("Contain the spread to prevent further encryption", 150),
            objective("Determine if data was exfiltrated", 100),
            objective("Decide whether to pay ransom or restore from backups", 150),
            objective("Ensure patient care systems remain operational", 200),
        ],
        phases: vec![detection, containment, eradication, recovery],
        scoring: Some(ScoringThresholds {
            perfect: 300,
            excellent: 240,
            good: 180,
            passing: 120,
        }),
        completion_awards: Vec::new(),
    }
}
