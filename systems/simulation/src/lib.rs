#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestrator wiring the pure systems to the authoritative world.
//!
//! Each [`Simulation::step`] runs the spawn policy, advances the world by one
//! tick, aims and fires the turret's weapons, and publishes skill offers for
//! any level-up reached during the frame. The caller receives a
//! [`StepOutcome`] telling it whether the run continues, is waiting for a
//! skill choice, or has ended.

use std::time::Duration;

use tracing::debug;
use turret_survivor_core::{
    Command, Event, GroundPoint, PlayState, SkillChoiceError, SkillDescriptor, SkillId, Tuning,
    TuningError,
};
use turret_survivor_system_skill_offer::{self as skill_offer, SkillOffer};
use turret_survivor_system_spawning::{self as spawning, Spawning};
use turret_survivor_system_targeting::Targeting;
use turret_survivor_system_weapons::Weapons;
use turret_survivor_world::{self as world, query, World};

/// Salt mixed into the run seed so skill draws do not mirror spawn rolls.
const SKILL_OFFER_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Result of advancing the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The run continues.
    Running,
    /// A level-up is pending; no frame advances until a skill is chosen.
    AwaitingSkillChoice {
        /// Skills offered for the pending level-up.
        choices: Vec<SkillDescriptor>,
    },
    /// The turret was destroyed.
    GameOver {
        /// Score at the moment the run ended.
        final_score: u32,
    },
}

/// Capability that answers a pending skill offer.
pub trait SkillPicker {
    /// Selects one of `choices`, or `None` to leave the offer pending.
    fn pick(&mut self, choices: &[SkillDescriptor]) -> Option<SkillId>;
}

/// Picker that always takes the first offered skill.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstSkillPicker;

impl SkillPicker for FirstSkillPicker {
    fn pick(&mut self, choices: &[SkillDescriptor]) -> Option<SkillId> {
        choices.first().map(|descriptor| descriptor.id)
    }
}

/// Owns the world and every system taking part in a frame.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    targeting: Targeting,
    weapons: Weapons,
    skill_offer: SkillOffer,
    aim: Option<GroundPoint>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Validates `tuning` and builds a fresh run seeded from its spawn section.
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let seed = tuning.spawning.seed;
        let spawning = Spawning::new(spawning::Config::from_tuning(&tuning.spawning));
        let skill_offer = SkillOffer::new(skill_offer::Config::new(
            tuning.progression.choices_per_level,
            seed ^ SKILL_OFFER_SALT,
        ));

        Ok(Self {
            world: World::with_tuning(tuning),
            spawning,
            targeting: Targeting::new(),
            weapons: Weapons::new(),
            skill_offer,
            aim: None,
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Point the turret aimed at during the last frame that ran.
    #[must_use]
    pub fn aim(&self) -> Option<GroundPoint> {
        self.aim
    }

    /// Events broadcast by the most recent call to [`Self::step`] or
    /// [`Self::choose_skill`].
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Advances the run by one frame of `dt` wall-clock time.
    ///
    /// Paused and finished runs do not advance; the current outcome is
    /// returned unchanged.
    pub fn step(&mut self, dt: Duration) -> StepOutcome {
        self.events.clear();
        if query::play_state(&self.world) != PlayState::Running {
            return self.outcome();
        }

        let level = query::progression(&self.world).level();
        self.spawning
            .handle(PlayState::Running, level, &mut self.commands);
        self.commands.push(Command::Tick { dt });
        self.flush_commands();

        let play_state = query::play_state(&self.world);
        let target = self.targeting.handle(
            play_state,
            query::turret(&self.world),
            query::enemy_view(&self.world),
        );
        self.aim = target.map(|target| target.position);
        self.weapons.handle(
            play_state,
            query::cooldown_view(&self.world),
            self.aim,
            &mut self.commands,
        );
        self.flush_commands();

        self.publish_offers();
        self.outcome()
    }

    /// Resolves the pending level-up with `skill`.
    ///
    /// A rejected choice leaves the world untouched and reports why.
    pub fn choose_skill(&mut self, skill: SkillId) -> Result<StepOutcome, SkillChoiceError> {
        self.events.clear();
        self.commands.push(Command::ChooseSkill { skill });
        self.flush_commands();

        let rejection = self.events.iter().find_map(|event| match event {
            Event::SkillChoiceRejected { reason, .. } => Some(*reason),
            _ => None,
        });
        if let Some(reason) = rejection {
            return Err(reason);
        }

        self.publish_offers();
        Ok(self.outcome())
    }

    /// Advances one frame and lets `picker` answer any offer it produced.
    ///
    /// If the picker declines or names a skill that was not offered, the
    /// run stays paused and the offer is reported back.
    pub fn step_with<P>(&mut self, dt: Duration, picker: &mut P) -> StepOutcome
    where
        P: SkillPicker + ?Sized,
    {
        let mut outcome = self.step(dt);
        let mut frame_events = std::mem::take(&mut self.events);

        while let StepOutcome::AwaitingSkillChoice { choices } = &outcome {
            let Some(skill) = picker.pick(choices) else {
                break;
            };
            match self.choose_skill(skill) {
                Ok(next) => {
                    frame_events.append(&mut self.events);
                    outcome = next;
                }
                Err(reason) => {
                    debug!(?skill, ?reason, "picker answer rejected");
                    frame_events.append(&mut self.events);
                    break;
                }
            }
        }

        self.events = frame_events;
        outcome
    }

    /// Outcome describing the current state of the run.
    #[must_use]
    pub fn outcome(&self) -> StepOutcome {
        match query::play_state(&self.world) {
            PlayState::Running => StepOutcome::Running,
            PlayState::AwaitingSkillChoice => StepOutcome::AwaitingSkillChoice {
                choices: query::offered_skills(&self.world)
                    .iter()
                    .map(|skill| skill.descriptor())
                    .collect(),
            },
            PlayState::GameOver => StepOutcome::GameOver {
                final_score: query::hud(&self.world).score,
            },
        }
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Draws skills for every level-up in the pending events, following
    /// chained level-ups raised while the offers are applied.
    fn publish_offers(&mut self) {
        let mut cursor = 0;
        loop {
            let end = self.events.len();
            self.skill_offer
                .handle(&self.events[cursor..end], &mut self.commands);
            if self.commands.is_empty() {
                return;
            }
            self.flush_commands();
            cursor = end;
        }
    }
}
