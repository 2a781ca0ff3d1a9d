#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting enemy spawn commands.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use turret_survivor_core::{Command, GroundPoint, PlayState, SpawnTuning};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    chance_per_tick: f64,
    half_width: f32,
    spawn_z: f32,
    base_hit_points: i16,
    hit_points_per_level: f32,
    min_speed: f32,
    max_speed: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from the spawn section of the tuning.
    #[must_use]
    pub fn from_tuning(tuning: &SpawnTuning) -> Self {
        Self {
            chance_per_tick: tuning.chance_per_tick.clamp(0.0, 1.0),
            half_width: tuning.half_width.abs(),
            spawn_z: tuning.spawn_z,
            base_hit_points: tuning.base_hit_points,
            hit_points_per_level: tuning.hit_points_per_level,
            min_speed: tuning.min_speed,
            max_speed: tuning.max_speed,
            rng_seed: tuning.seed,
        }
    }

    /// Returns a copy using the provided seed.
    #[must_use]
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Hit points of an enemy spawned while the player is at `level`.
    #[must_use]
    pub fn hit_points_for_level(&self, level: u32) -> i16 {
        let bonus = (level as f32 * self.hit_points_per_level).floor();
        let bonus = bonus.clamp(0.0, f32::from(i16::MAX)) as i16;
        self.base_hit_points.saturating_add(bonus)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_tuning(&SpawnTuning::default())
    }
}

/// Pure system that rolls once per frame for a new enemy.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Rolls the spawn chance for one frame and emits at most one command.
    ///
    /// Nothing is drawn from the generator unless the run is in progress.
    pub fn handle(&mut self, play_state: PlayState, level: u32, out: &mut Vec<Command>) {
        if play_state != PlayState::Running {
            return;
        }

        if !self.rng.gen_bool(self.config.chance_per_tick) {
            return;
        }

        let x = self.lateral_position();
        let speed = self.speed();
        out.push(Command::SpawnEnemy {
            position: GroundPoint::new(x, self.config.spawn_z),
            hit_points: self.config.hit_points_for_level(level),
            speed,
        });
    }

    fn lateral_position(&mut self) -> f32 {
        let half_width = self.config.half_width;
        if half_width <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-half_width..half_width)
    }

    fn speed(&mut self) -> f32 {
        let (min, max) = (self.config.min_speed, self.config.max_speed);
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }
}
