use crate::catalog::EcoAction;
use crate::model::{HistoryEntry, PetState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unlock {
    /// Any effective history entry with this action id.
    Performed(&'static str),
    /// Pet level at or above the threshold.
    Level(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlock: Unlock,
}

pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "recycler",
        title: "Recycler",
        description: "Log your first recycling run.",
        unlock: Unlock::Performed("recycle"),
    },
    Achievement {
        id: "walker",
        title: "Footpath Friend",
        description: "Walk instead of driving once.",
        unlock: Unlock::Performed("walk"),
    },
    Achievement {
        id: "energy_saver",
        title: "Energy Saver",
        description: "Save energy for the first time.",
        unlock: Unlock::Performed("energySave"),
    },
    Achievement {
        id: "level_5",
        title: "Sprouting",
        description: "Reach level 5.",
        unlock: Unlock::Level(5),
    },
    Achievement {
        id: "level_16",
        title: "Hatched",
        description: "Reach level 16 and leave the egg behind.",
        unlock: Unlock::Level(16),
    },
    Achievement {
        id: "level_32",
        title: "Guardian",
        description: "Reach level 32.",
        unlock: Unlock::Level(32),
    },
];

fn is_unlocked(ach: &Achievement, pet: &PetState, history: &[HistoryEntry]) -> bool {
    match ach.unlock {
        Unlock::Performed(id) => {
            let action = EcoAction::from(id);
            history
                .iter()
                .any(|h| !h.was_ignored() && h.action_type == action)
        }
        Unlock::Level(min) => pet.level >= min,
    }
}

pub fn unlocked(pet: &PetState, history: &[HistoryEntry]) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| is_unlocked(a, pet, history))
        .collect()
}

/// Achievements unlocked now that are not in `already`.
pub fn newly_unlocked(
    pet: &PetState,
    history: &[HistoryEntry],
    already: &[&str],
) -> Vec<&'static Achievement> {
    unlocked(pet, history)
        .into_iter()
        .filter(|a| !already.contains(&a.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: &str, ignored: bool) -> HistoryEntry {
        HistoryEntry {
            timestamp: 0,
            action_type: EcoAction::from(action),
            detail: None,
            xp_gain: if ignored { None } else { Some(5) },
            new_xp: None,
            new_level: None,
            note: None,
        }
    }

    #[test]
    fn fresh_pet_has_nothing() {
        let pet = PetState::new_default(0);
        assert!(unlocked(&pet, &[]).is_empty());
    }

    #[test]
    fn history_and_level_unlocks() {
        let mut pet = PetState::new_default(0);
        pet.level = 17;
        let ids: Vec<_> = unlocked(&pet, &[entry("walk", false)])
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["walker", "level_5", "level_16"]);
    }

    #[test]
    fn ignored_entries_do_not_count() {
        let pet = PetState::new_default(0);
        assert!(unlocked(&pet, &[entry("recycle", true)]).is_empty());
    }

    #[test]
    fn newly_unlocked_skips_known_ids() {
        let pet = PetState::new_default(0);
        let history = [entry("recycle", false), entry("energySave", false)];
        let fresh = newly_unlocked(&pet, &history, &["recycler"]);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, "energy_saver");
    }
}
