#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that draws the skills offered on every level-up.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use turret_survivor_core::{Command, Event, SkillId};

/// Configuration parameters required to construct the skill offer system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    choices_per_level: usize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration drawing `choices_per_level` skills.
    #[must_use]
    pub const fn new(choices_per_level: usize, rng_seed: u64) -> Self {
        Self {
            choices_per_level,
            rng_seed,
        }
    }
}

/// Skill offer system drawing distinct catalog entries without replacement.
#[derive(Debug)]
pub struct SkillOffer {
    choices_per_level: usize,
    rng: ChaCha8Rng,
}

impl SkillOffer {
    /// Creates a new skill offer system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            choices_per_level: config.choices_per_level,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits one `Command::OfferSkills` per level-up event.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelUp { .. } = event {
                let choices = self.present_choices();
                out.push(Command::OfferSkills { choices });
            }
        }
    }

    /// Draws `min(choices_per_level, catalog size)` distinct skills.
    pub fn present_choices(&mut self) -> Vec<SkillId> {
        let amount = self.choices_per_level.min(SkillId::CATALOG.len());
        SkillId::CATALOG
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect()
    }
}
