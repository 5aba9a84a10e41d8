use serde::{Deserialize, Serialize};
use std::fmt;

/// XP granted for an action the catalog does not know.
pub const DEFAULT_XP: u64 = 5;

/// An eco-action reported by the user.
///
/// Unknown identifiers are kept verbatim in `Other` so they still reach the
/// history log and earn the default XP.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EcoAction {
    Recycle,
    Walk,
    EnergySave,
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub co2_grams: f64,
    pub plastic_items: f64,
    pub energy_points: f64,
}

impl Impact {
    pub const NONE: Impact = Impact {
        co2_grams: 0.0,
        plastic_items: 0.0,
        energy_points: 0.0,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub xp: u64,
    pub impact: Impact,
}

pub static CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        id: "recycle",
        label: "Recycled properly",
        xp: 5,
        impact: Impact {
            co2_grams: 80.0,
            plastic_items: 0.5,
            energy_points: 4.0,
        },
    },
    CatalogEntry {
        id: "walk",
        label: "Walked instead of drove",
        xp: 10,
        impact: Impact {
            co2_grams: 300.0,
            plastic_items: 0.0,
            energy_points: 5.0,
        },
    },
    CatalogEntry {
        id: "energySave",
        label: "Saved energy",
        xp: 7,
        impact: Impact {
            co2_grams: 40.0,
            plastic_items: 0.0,
            energy_points: 6.0,
        },
    },
];

impl EcoAction {
    pub fn id(&self) -> &str {
        match self {
            EcoAction::Recycle => "recycle",
            EcoAction::Walk => "walk",
            EcoAction::EnergySave => "energySave",
            EcoAction::Other(s) => s,
        }
    }

    pub fn entry(&self) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|e| e.id == self.id())
    }

    /// Total over every input: unknown actions fall back to [`DEFAULT_XP`].
    pub fn xp(&self) -> u64 {
        self.entry().map_or(DEFAULT_XP, |e| e.xp)
    }

    pub fn impact(&self) -> Impact {
        self.entry().map_or(Impact::NONE, |e| e.impact)
    }
}

pub fn xp_for(action: &str) -> u64 {
    EcoAction::from(action).xp()
}

impl From<&str> for EcoAction {
    fn from(s: &str) -> Self {
        match s {
            "recycle" => EcoAction::Recycle,
            "walk" => EcoAction::Walk,
            "energySave" => EcoAction::EnergySave,
            other => EcoAction::Other(other.to_string()),
        }
    }
}

impl From<String> for EcoAction {
    fn from(s: String) -> Self {
        EcoAction::from(s.as_str())
    }
}

impl From<EcoAction> for String {
    fn from(a: EcoAction) -> Self {
        a.id().to_string()
    }
}

impl fmt::Display for EcoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_actions_have_catalog_xp() {
        assert_eq!(xp_for("recycle"), 5);
        assert_eq!(xp_for("walk"), 10);
        assert_eq!(xp_for("energySave"), 7);
    }

    #[test]
    fn unknown_action_gets_default_xp_and_no_impact() {
        let action = EcoAction::from("plant_tree");
        assert_eq!(action, EcoAction::Other("plant_tree".to_string()));
        assert_eq!(action.xp(), DEFAULT_XP);
        assert_eq!(action.impact(), Impact::NONE);
    }

    #[test]
    fn serializes_as_plain_identifier() {
        let json = serde_json::to_string(&EcoAction::EnergySave).unwrap();
        assert_eq!(json, "\"energySave\"");
        let back: EcoAction = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(back.id(), "mystery");
    }
}
