use crate::catalog::EcoAction;
use crate::model::{level_for_xp, Mood, PetState, StageLabel};
use chrono::Duration;

#[derive(Clone, Debug)]
pub struct Rules {
    /// One mood rung is lost per full interval without an update.
    pub decay_interval: Duration,
    pub xp_per_level: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            decay_interval: Duration::hours(6),
            xp_per_level: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecaySummary {
    pub steps: u64,
    pub ran_away: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied {
        xp_gain: u64,
        new_xp: u64,
        new_level: u32,
    },
    /// The pet has run away; nothing changed.
    Ignored,
}

/// Applies mood decay for the time elapsed since `last_updated`.
///
/// Only whole intervals count, so calling this twice within one interval
/// changes nothing the second time. When at least one interval has passed,
/// `last_updated` moves to `now_ms`.
pub fn catch_up(pet: &mut PetState, now_ms: i64, rules: &Rules) -> DecaySummary {
    let elapsed = now_ms.saturating_sub(pet.last_updated);
    let interval = rules.decay_interval.num_milliseconds().max(1);
    if elapsed <= 0 {
        return DecaySummary::default();
    }
    let steps = (elapsed / interval) as u64;
    if steps == 0 {
        return DecaySummary::default();
    }

    let was_gone = pet.has_run_away;
    pet.mood = pet.mood.decayed(steps);
    if pet.mood == Mood::Gone {
        pet.has_run_away = true;
        pet.stage = StageLabel::ran_away();
    }
    pet.last_updated = now_ms;

    DecaySummary {
        steps,
        ran_away: pet.has_run_away && !was_gone,
    }
}

/// Rewards an eco-action: XP, level, stage and one rung of mood.
pub fn apply_action(
    pet: &mut PetState,
    action: &EcoAction,
    now_ms: i64,
    rules: &Rules,
) -> ActionOutcome {
    if pet.has_run_away {
        return ActionOutcome::Ignored;
    }

    let xp_gain = action.xp();
    pet.xp = pet.xp.saturating_add(xp_gain);
    pet.level = level_for_xp(pet.xp, rules.xp_per_level);
    pet.stage = StageLabel::for_level(pet.level);
    pet.mood = pet.mood.improved();
    pet.last_updated = pet.last_updated.max(now_ms);

    ActionOutcome::Applied {
        xp_gain,
        new_xp: pet.xp,
        new_level: pet.level,
    }
}
