/// Label shown instead of a stage once the pet has run away.
pub const RAN_AWAY_LABEL: &str = "Ran away...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvolutionStage {
    pub name: &'static str,
    pub min_level: u32,
    /// Inclusive. `None` on the last band.
    pub max_level: Option<u32>,
}

impl EvolutionStage {
    pub fn contains(&self, level: u32) -> bool {
        level >= self.min_level && self.max_level.map_or(true, |max| level <= max)
    }
}

// Bands are contiguous and ordered; the first match wins.
pub static STAGES: [EvolutionStage; 4] = [
    EvolutionStage {
        name: "Egg",
        min_level: 1,
        max_level: Some(15),
    },
    EvolutionStage {
        name: "Blob",
        min_level: 16,
        max_level: Some(31),
    },
    EvolutionStage {
        name: "Tree Guardian",
        min_level: 32,
        max_level: Some(63),
    },
    EvolutionStage {
        name: "Forest Spirit",
        min_level: 64,
        max_level: None,
    },
];

/// Falls back to the first band for levels below 1.
pub fn stage_for(level: u32) -> &'static EvolutionStage {
    STAGES
        .iter()
        .find(|s| s.contains(level))
        .unwrap_or(&STAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_maps_to_exactly_one_band() {
        for level in 1..=200 {
            let hits = STAGES.iter().filter(|s| s.contains(level)).count();
            assert_eq!(hits, 1, "level {level}");
            assert!(stage_for(level).contains(level));
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(stage_for(1).name, "Egg");
        assert_eq!(stage_for(15).name, "Egg");
        assert_eq!(stage_for(16).name, "Blob");
        assert_eq!(stage_for(63).name, "Tree Guardian");
        assert_eq!(stage_for(64).name, "Forest Spirit");
        assert_eq!(stage_for(u32::MAX).name, "Forest Spirit");
    }

    #[test]
    fn level_zero_falls_back_to_first_band() {
        assert_eq!(stage_for(0), &STAGES[0]);
    }
}
