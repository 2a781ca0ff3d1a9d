use clap::ValueEnum;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use turret_survivor_core::{SkillDescriptor, SkillId};
use turret_survivor_simulation::{FirstSkillPicker, SkillPicker};

/// Strategy used to answer skill offers in unattended runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PickerKind {
    /// Always take the first offered skill.
    First,
    /// Pick uniformly with a generator seeded from the run seed.
    Random,
}

impl PickerKind {
    pub(crate) fn build(self, seed: u64) -> Box<dyn SkillPicker> {
        match self {
            Self::First => Box::new(FirstSkillPicker),
            Self::Random => Box::new(RandomSkillPicker::new(seed)),
        }
    }
}

/// Picker drawing one of the offered skills at random.
#[derive(Debug)]
pub(crate) struct RandomSkillPicker {
    rng: ChaCha8Rng,
}

impl RandomSkillPicker {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SkillPicker for RandomSkillPicker {
    fn pick(&mut self, choices: &[SkillDescriptor]) -> Option<SkillId> {
        choices.choose(&mut self.rng).map(|descriptor| descriptor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_picker_only_returns_offered_skills() {
        let choices = [
            SkillId::DryIce.descriptor(),
            SkillId::RapidFire.descriptor(),
        ];
        let mut picker = RandomSkillPicker::new(3);

        for _ in 0..50 {
            let picked = picker.pick(&choices).expect("choices are not empty");
            assert!(choices.iter().any(|descriptor| descriptor.id == picked));
        }
        assert_eq!(picker.pick(&[]), None);
    }

    #[test]
    fn random_picker_is_reproducible() {
        let choices: Vec<_> = SkillId::CATALOG
            .iter()
            .map(|skill| skill.descriptor())
            .collect();
        let mut first = RandomSkillPicker::new(99);
        let mut second = RandomSkillPicker::new(99);

        for _ in 0..20 {
            assert_eq!(first.pick(&choices), second.pick(&choices));
        }
    }
}
