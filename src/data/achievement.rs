//! Achievement catalog entries

use serde::{Deserialize, Serialize};

/// How rare an achievement is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Common => write!(f, "COMMON"),
            Rarity::Uncommon => write!(f, "UNCOMMON"),
            Rarity::Rare => write!(f, "RARE"),
            Rarity::Epic => write!(f, "EPIC"),
            Rarity::Legendary => write!(f, "LEGENDARY"),
        }
    }
}

/// A named milestone. Unlocks are tracked by id on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// XP granted to the player profile
    #[serde(default)]
    pub point_value: u32,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub rarity: Rarity,
}

impl AchievementDefinition {
    pub fn new(id: &str, name: &str, description: &str, point_value: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            point_value,
            icon: None,
            rarity: Rarity::Common,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// One-line label for notifications
    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {} (+{} XP)", icon, self.name, self.point_value),
            None => format!("{} (+{} XP)", self.name, self.point_value),
        }
    }
}
