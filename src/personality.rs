use crate::catalog::EcoAction;
use crate::model::{EcoStats, Mood, PetState};

const HIGH_CO2_SAVED: f64 = 1000.0;
const HIGH_PLASTIC_REDUCED: f64 = 10.0;

pub const DEFAULT_MESSAGE: &str = "Your pet is feeling okay. Keep up the eco-habits!";

struct Context<'a> {
    pet: &'a PetState,
    stats: &'a EcoStats,
}

type Rule = (fn(&Context<'_>) -> bool, &'static str);

// Evaluated top to bottom; first match wins.
const RULES: &[Rule] = &[
    (
        |c: &Context<'_>| c.pet.mood == Mood::Gone,
        "Your pet packed a tiny bag and left. Reset to start over.",
    ),
    (
        |c: &Context<'_>| c.pet.mood.is_low(),
        "Your pet looks sluggish... maybe time for another eco-action?",
    ),
    (
        |c: &Context<'_>| c.stats.co2_saved >= HIGH_CO2_SAVED,
        "Your pet can breathe easier already. You've saved so much CO2!",
    ),
    (
        |c: &Context<'_>| c.stats.plastic_reduced >= HIGH_PLASTIC_REDUCED,
        "Your pet is swimming in cleaner oceans thanks to you.",
    ),
    (
        |c: &Context<'_>| c.pet.level >= 64,
        "Your pet hums with the whole forest behind it.",
    ),
    (
        |c: &Context<'_>| c.pet.level >= 32,
        "Your pet stands tall, roots deep and leaves bright.",
    ),
    (
        |c: &Context<'_>| c.pet.level >= 16,
        "Your pet wobbles around, proud of how much it has grown.",
    ),
];

fn action_message(action: &EcoAction) -> Option<&'static str> {
    match action {
        EcoAction::Walk => Some("Your pet loved the fresh air from your walk!"),
        EcoAction::Recycle => Some("Clink! Recycling makes your pet feel refreshed."),
        EcoAction::EnergySave => Some("Nice! Your pet can see the stars now."),
        EcoAction::Other(_) => None,
    }
}

/// Picks the line the pet says next.
///
/// A reaction to the most recent action beats everything else; after that the
/// mood, milestone, and level rules apply in order.
pub fn message_for(pet: &PetState, stats: &EcoStats, last_action: Option<&EcoAction>) -> &'static str {
    if let Some(msg) = last_action.and_then(action_message) {
        return msg;
    }
    let ctx = Context { pet, stats };
    RULES
        .iter()
        .find(|(matches, _)| matches(&ctx))
        .map_or(DEFAULT_MESSAGE, |(_, msg)| msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> PetState {
        PetState::new_default(0)
    }

    #[test]
    fn action_reaction_wins_over_low_mood() {
        let mut p = pet();
        p.mood = Mood::Sad;
        let msg = message_for(&p, &EcoStats::default(), Some(&EcoAction::Walk));
        assert!(msg.contains("walk"));
    }

    #[test]
    fn unknown_action_falls_through_to_rules() {
        let mut p = pet();
        p.mood = Mood::Miserable;
        let msg = message_for(&p, &EcoStats::default(), Some(&EcoAction::from("juggle")));
        assert!(msg.contains("sluggish"));
    }

    #[test]
    fn low_mood_beats_milestones() {
        let mut p = pet();
        p.mood = Mood::Sad;
        let stats = EcoStats {
            co2_saved: 5000.0,
            ..EcoStats::default()
        };
        assert!(message_for(&p, &stats, None).contains("sluggish"));
    }

    #[test]
    fn milestone_then_level_then_default() {
        let mut p = pet();
        let big = EcoStats {
            co2_saved: 1000.0,
            ..EcoStats::default()
        };
        assert!(message_for(&p, &big, None).contains("CO2"));

        let plastic = EcoStats {
            plastic_reduced: 10.0,
            ..EcoStats::default()
        };
        assert!(message_for(&p, &plastic, None).contains("oceans"));

        p.level = 40;
        assert!(message_for(&p, &EcoStats::default(), None).contains("stands tall"));

        p.level = 1;
        assert_eq!(message_for(&p, &EcoStats::default(), None), DEFAULT_MESSAGE);
    }

    #[test]
    fn runaway_pet_has_its_own_line() {
        let mut p = pet();
        p.mood = Mood::Gone;
        assert!(message_for(&p, &EcoStats::default(), None).contains("left"));
    }
}
