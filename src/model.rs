use serde::{Deserialize, Serialize};

use crate::catalog::EcoAction;
use crate::evolution::{stage_for, RAN_AWAY_LABEL};

pub const SCHEMA_VERSION: u32 = 1;

/// Mood ladder, best first. `Gone` sits past the worst mood and is terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Okay,
    Meh,
    Sad,
    Miserable,
    Gone,
}

impl Mood {
    pub const LADDER: [Mood; 5] = [Mood::Happy, Mood::Okay, Mood::Meh, Mood::Sad, Mood::Miserable];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Okay => "okay",
            Mood::Meh => "meh",
            Mood::Sad => "sad",
            Mood::Miserable => "miserable",
            Mood::Gone => "gone",
        }
    }

    /// Lenient parse used when reading older records. Unknown values map to `Okay`.
    pub fn from_legacy(s: &str) -> Mood {
        match s {
            "happy" => Mood::Happy,
            "okay" | "neutral" => Mood::Okay,
            "meh" => Mood::Meh,
            "sad" => Mood::Sad,
            "miserable" => Mood::Miserable,
            "gone" => Mood::Gone,
            _ => Mood::Okay,
        }
    }

    fn rung(self) -> Option<usize> {
        Mood::LADDER.iter().position(|m| *m == self)
    }

    /// Moves `steps` rungs toward `Miserable`. Past the bottom the pet is gone.
    pub fn decayed(self, steps: u64) -> Mood {
        let Some(idx) = self.rung() else {
            return Mood::Gone;
        };
        let next = (idx as u64).saturating_add(steps);
        if next >= Mood::LADDER.len() as u64 {
            Mood::Gone
        } else {
            Mood::LADDER[next as usize]
        }
    }

    /// One rung toward `Happy`, capped at the top. `Gone` stays gone.
    pub fn improved(self) -> Mood {
        match self.rung() {
            Some(0) => Mood::Happy,
            Some(idx) => Mood::LADDER[idx - 1],
            None => Mood::Gone,
        }
    }

    pub fn is_low(self) -> bool {
        matches!(self, Mood::Sad | Mood::Miserable)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted as `{ "name": ... }` so the record stays readable by older clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageLabel {
    pub name: String,
}

impl StageLabel {
    pub fn for_level(level: u32) -> Self {
        Self {
            name: stage_for(level).name.to_string(),
        }
    }

    pub fn ran_away() -> Self {
        Self {
            name: RAN_AWAY_LABEL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetState {
    pub schema_version: u32,
    pub mood: Mood,
    pub xp: u64,
    pub level: u32,
    pub stage: StageLabel,
    /// Milliseconds since the Unix epoch.
    pub last_updated: i64,
    pub has_run_away: bool,
    /// Store balance. The engine carries it through untouched.
    pub coins: i64,
    pub message: Option<String>,
}

impl PetState {
    pub fn new_default(now_ms: i64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            mood: Mood::Happy,
            xp: 0,
            level: 1,
            stage: StageLabel::for_level(1),
            last_updated: now_ms,
            has_run_away: false,
            coins: 0,
            message: None,
        }
    }
}

pub fn level_for_xp(xp: u64, xp_per_level: u64) -> u32 {
    let per = xp_per_level.max(1);
    let level = 1u64.saturating_add(xp / per);
    u32::try_from(level).unwrap_or(u32::MAX)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: i64,
    #[serde(alias = "action")]
    pub action_type: EcoAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, alias = "xp", skip_serializing_if = "Option::is_none")]
    pub xp_gain: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_xp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEntry {
    /// True when the action was recorded but had no effect on the pet.
    pub fn was_ignored(&self) -> bool {
        self.xp_gain.is_none()
    }
}

/// Cumulative environmental impact, folded from the history log.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EcoStats {
    pub co2_saved: f64,
    pub plastic_reduced: f64,
    pub energy_saved: f64,
}

impl EcoStats {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        history
            .iter()
            .filter(|e| !e.was_ignored())
            .fold(Self::default(), |mut acc, e| {
                let impact = e.action_type.impact();
                acc.co2_saved += impact.co2_grams;
                acc.plastic_reduced += impact.plastic_items;
                acc.energy_saved += impact.energy_points;
                acc
            })
    }
}
