//! Player profile and progression
//!
//! The profile outlives sessions: XP, rank and lifetime achievements carry
//! over between scenarios while session counters do not.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A step on the career ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub level: u32,
    pub title: &'static str,
    pub xp_required: u64,
}

pub const RANKS: [Rank; 10] = [
    Rank { level: 1, title: "Junior SOC Analyst", xp_required: 0 },
    Rank { level: 2, title: "SOC Analyst", xp_required: 1_000 },
    Rank { level: 3, title: "Senior SOC Analyst", xp_required: 2_500 },
    Rank { level: 4, title: "Lead Security Analyst", xp_required: 5_000 },
    Rank { level: 5, title: "Incident Response Specialist", xp_required: 10_000 },
    Rank { level: 6, title: "Senior IR Specialist", xp_required: 18_000 },
    Rank { level: 7, title: "IR Team Lead", xp_required: 30_000 },
    Rank { level: 8, title: "Principal Security Engineer", xp_required: 50_000 },
    Rank { level: 9, title: "Security Architect", xp_required: 80_000 },
    Rank { level: 10, title: "Chief Security Officer", xp_required: 120_000 },
];

/// Highest rank reachable with `xp`
pub fn rank_for_xp(xp: u64) -> Rank {
    RANKS
        .iter()
        .rev()
        .find(|r| xp >= r.xp_required)
        .copied()
        .unwrap_or(RANKS[0])
}

/// Long-lived player progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub xp: u64,
    pub level: u32,
    pub title: String,
    pub achievements: HashSet<String>,
    pub scenarios_completed: u32,
    pub decisions_total: u32,
    pub best_score: i64,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        let rank = RANKS[0];
        Self {
            name: name.to_string(),
            xp: 0,
            level: rank.level,
            title: rank.title.to_string(),
            achievements: HashSet::new(),
            scenarios_completed: 0,
            decisions_total: 0,
            best_score: 0,
        }
    }

    /// Add XP; returns the new level if the player ranked up
    pub fn add_xp(&mut self, amount: u64) -> Option<u32> {
        self.xp = self.xp.saturating_add(amount);
        let rank = rank_for_xp(self.xp);
        if rank.level > self.level {
            self.level = rank.level;
            self.title = rank.title.to_string();
            Some(rank.level)
        } else {
            None
        }
    }

    /// Record a lifetime unlock. Returns `false` if it was already held.
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        self.achievements.insert(id.to_string())
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    /// XP still missing for the next rank, `None` at the top
    pub fn xp_to_next_level(&self) -> Option<u64> {
        RANKS
            .iter()
            .find(|r| r.level == self.level + 1)
            .map(|r| r.xp_required.saturating_sub(self.xp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_lookup() {
        assert_eq!(rank_for_xp(0).level, 1);
        assert_eq!(rank_for_xp(999).level, 1);
        assert_eq!(rank_for_xp(1_000).level, 2);
        assert_eq!(rank_for_xp(500_000).title, "Chief Security Officer");
    }

    #[test]
    fn xp_ranks_up_once() {
        let mut p = PlayerProfile::new("Agent");
        assert_eq!(p.add_xp(400), None);
        assert_eq!(p.add_xp(2_200), Some(3));
        assert_eq!(p.title, "Senior SOC Analyst");
        assert_eq!(p.xp_to_next_level(), Some(5_000 - 2_600));
    }

    #[test]
    fn top_rank_has_no_next_level() {
        let mut p = PlayerProfile::new("Agent");
        p.add_xp(200_000);
        assert_eq!(p.level, 10);
        assert_eq!(p.xp_to_next_level(), None);
    }
}
