//! Tunable constants that parameterise the simulation.
//!
//! Every section implements [`Default`] with the stock game balance and is
//! deserialised with `#[serde(default)]`, so configuration files only need to
//! list the values they override.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GroundPoint;

/// Aggregated tuning knobs for a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Entity pool capacities.
    pub pools: PoolTuning,
    /// Arena geometry.
    pub arena: ArenaTuning,
    /// Damage, status and reward constants.
    pub combat: CombatTuning,
    /// Starting stats and skill effects.
    pub progression: ProgressionTuning,
    /// Enemy spawn policy.
    pub spawning: SpawnTuning,
}

impl Tuning {
    /// Checks that every value lies inside the range the simulation supports.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.pools.enemy_capacity == 0 {
            return Err(TuningError::ZeroCapacity { pool: "enemy" });
        }
        if self.pools.bullet_capacity == 0 {
            return Err(TuningError::ZeroCapacity { pool: "bullet" });
        }

        let positive = [
            ("arena.grid_cell_size", self.arena.grid_cell_size),
            (
                "arena.player_collision_radius",
                self.arena.player_collision_radius,
            ),
            ("combat.hit_radius", self.combat.hit_radius),
            ("combat.splash_radius", self.combat.splash_radius),
            ("progression.bullet_speed", self.progression.bullet_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field });
            }
        }

        let finite = [
            ("spawning.half_width", self.spawning.half_width),
            ("spawning.min_speed", self.spawning.min_speed),
            ("spawning.max_speed", self.spawning.max_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field });
            }
        }
        if self.spawning.half_width < 0.0 {
            return Err(TuningError::NegativeHalfWidth {
                half_width: self.spawning.half_width,
            });
        }

        if !(0.0..=1.0).contains(&self.spawning.chance_per_tick) {
            return Err(TuningError::SpawnChanceOutOfRange {
                chance: self.spawning.chance_per_tick,
            });
        }
        if !(self.spawning.min_speed <= self.spawning.max_speed) {
            return Err(TuningError::InvertedSpeedRange {
                min: self.spawning.min_speed,
                max: self.spawning.max_speed,
            });
        }
        if !(self.progression.threshold_growth >= 1.0) {
            return Err(TuningError::ShrinkingThreshold {
                growth: self.progression.threshold_growth,
            });
        }
        let factor = self.progression.rapid_fire_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(TuningError::RapidFireFactorOutOfRange { factor });
        }
        if self.progression.initial_threshold == 0 {
            return Err(TuningError::NotPositive {
                field: "progression.initial_threshold",
            });
        }

        Ok(())
    }
}

/// Reasons a [`Tuning`] value is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// An entity pool was configured without room for a single record.
    #[error("{pool} pool capacity must be at least one")]
    ZeroCapacity {
        /// Name of the offending pool.
        pool: &'static str,
    },
    /// A length, radius or speed was zero, negative or not finite.
    #[error("`{field}` must be a positive finite number")]
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A value that must be a real number was NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NotFinite {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// Spawn positions would be drawn from an inverted lateral band.
    #[error("spawn half width {half_width} must not be negative")]
    NegativeHalfWidth {
        /// Configured half width.
        half_width: f32,
    },
    /// Rapid fire would stop or lengthen the shot interval.
    #[error("rapid fire factor {factor} is outside 0.0 (exclusive) ..= 1.0")]
    RapidFireFactorOutOfRange {
        /// Configured multiplier.
        factor: f64,
    },
    /// The per-tick spawn probability fell outside `0.0..=1.0`.
    #[error("spawn chance {chance} is outside 0.0..=1.0")]
    SpawnChanceOutOfRange {
        /// Configured probability.
        chance: f64,
    },
    /// The enemy speed range is empty.
    #[error("enemy speed range {min}..{max} is inverted")]
    InvertedSpeedRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// The experience threshold would shrink after a level-up.
    #[error("threshold growth {growth} must be at least 1.0")]
    ShrinkingThreshold {
        /// Configured growth factor.
        growth: f64,
    },
}

/// Entity pool capacities. Storage is allocated once at these sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTuning {
    /// Maximum number of live enemies.
    pub enemy_capacity: usize,
    /// Maximum number of live bullets.
    pub bullet_capacity: usize,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            enemy_capacity: 1_000,
            bullet_capacity: 500,
        }
    }
}

/// Arena geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    /// Ground position of the turret.
    pub turret: GroundPoint,
    /// Depth offset of the muzzle relative to the turret.
    pub muzzle_offset_z: f32,
    /// Edge length of a spatial grid cell.
    pub grid_cell_size: f32,
    /// Bullets with a depth below this value leave the playfield.
    pub bullet_min_z: f32,
    /// Bullets with a depth above this value leave the playfield.
    pub bullet_max_z: f32,
    /// Bullets with a lateral offset beyond this magnitude leave the playfield.
    pub bullet_half_width: f32,
    /// Enemies closer than this to the turret damage it.
    pub player_collision_radius: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            turret: GroundPoint::new(0.0, 5.0),
            muzzle_offset_z: -1.5,
            grid_cell_size: 4.0,
            bullet_min_z: -80.0,
            bullet_max_z: 40.0,
            bullet_half_width: 40.0,
            player_collision_radius: 3.0,
        }
    }
}

/// Damage, status and reward constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Bullet/enemy overlap distance.
    pub hit_radius: f32,
    /// Extra primary-target damage dealt by thermobaric rounds.
    pub thermobaric_bonus: i16,
    /// Radius of the thermobaric splash.
    pub splash_radius: f32,
    /// Damage dealt to every enemy inside the splash.
    pub splash_damage: i16,
    /// Ticks a splash keeps an enemy burning.
    pub burn_ticks: u16,
    /// Interval between burn pulses in milliseconds.
    pub burn_interval_ms: u64,
    /// Ticks a dry-ice round keeps an enemy frozen.
    pub freeze_ticks: u16,
    /// Speed multiplier applied to frozen enemies.
    pub frozen_speed_multiplier: f32,
    /// Pierce of an electromagnetic lance before skill bonuses.
    pub electromagnetic_pierce: u8,
    /// Angle in radians between neighbouring bullets of a multi-shot volley.
    pub multi_shot_spread: f32,
    /// Health removed when an enemy reaches the turret.
    pub contact_damage: i32,
    /// Score awarded per kill.
    pub kill_score: u32,
    /// Experience awarded per kill.
    pub kill_experience: u32,
    /// Frames a hit marker stays visible.
    pub blast_ticks: u16,
}

impl CombatTuning {
    /// Interval between burn pulses.
    #[must_use]
    pub fn burn_interval(&self) -> Duration {
        Duration::from_millis(self.burn_interval_ms)
    }
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            hit_radius: 1.5,
            thermobaric_bonus: 2,
            splash_radius: 4.0,
            splash_damage: 2,
            burn_ticks: 120,
            burn_interval_ms: 1_000,
            freeze_ticks: 60,
            frozen_speed_multiplier: 0.5,
            electromagnetic_pierce: 5,
            multi_shot_spread: 0.2,
            contact_damage: 10,
            kill_score: 10,
            kill_experience: 20,
            blast_ticks: 30,
        }
    }
}

/// Starting stats and skill effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    /// Starting turret health.
    pub initial_health: i32,
    /// Experience required for the first level-up.
    pub initial_threshold: u32,
    /// Factor applied to the threshold after each level-up.
    pub threshold_growth: f64,
    /// Damage dealt by every bullet before type bonuses.
    pub base_damage: i16,
    /// Primary weapon shot interval in milliseconds.
    pub shot_interval_ms: u64,
    /// Bullets per primary volley.
    pub multi_shot: u32,
    /// Bullet displacement per tick.
    pub bullet_speed: f32,
    /// Thermobaric skill cooldown in milliseconds.
    pub thermobaric_cooldown_ms: u64,
    /// Electromagnetic skill cooldown in milliseconds.
    pub electromagnetic_cooldown_ms: u64,
    /// Dry-ice skill cooldown in milliseconds.
    pub dry_ice_cooldown_ms: u64,
    /// Shot interval multiplier applied by rapid fire.
    pub rapid_fire_factor: f64,
    /// Pierce added to electromagnetic lances per skill level.
    pub pierce_per_level: u8,
    /// Burn damage added per thermobaric skill level.
    pub burn_damage_per_level: i16,
    /// Number of skills offered per level-up.
    pub choices_per_level: usize,
}

impl ProgressionTuning {
    /// Primary weapon shot interval.
    #[must_use]
    pub fn shot_interval(&self) -> Duration {
        Duration::from_millis(self.shot_interval_ms)
    }
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            initial_health: 100,
            initial_threshold: 100,
            threshold_growth: 1.2,
            base_damage: 1,
            shot_interval_ms: 500,
            multi_shot: 1,
            bullet_speed: 0.5,
            thermobaric_cooldown_ms: 3_000,
            electromagnetic_cooldown_ms: 5_000,
            dry_ice_cooldown_ms: 4_000,
            rapid_fire_factor: 0.8,
            pierce_per_level: 2,
            burn_damage_per_level: 1,
            choices_per_level: 3,
        }
    }
}

/// Enemy spawn policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Probability that a frame spawns an enemy.
    pub chance_per_tick: f64,
    /// Spawn positions are drawn from `-half_width..half_width`.
    pub half_width: f32,
    /// Depth at which enemies enter.
    pub spawn_z: f32,
    /// Hit points of an enemy spawned at level zero.
    pub base_hit_points: i16,
    /// Hit points added per player level, truncated.
    pub hit_points_per_level: f32,
    /// Slowest enemy speed per tick.
    pub min_speed: f32,
    /// Fastest enemy speed per tick, exclusive.
    pub max_speed: f32,
    /// Seed of the spawn and skill-draw generators.
    pub seed: u64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            chance_per_tick: 0.05,
            half_width: 15.0,
            spawn_z: -60.0,
            base_hit_points: 3,
            hit_points_per_level: 0.5,
            min_speed: 0.02,
            max_speed: 0.04,
            seed: 0x5eed_7a12_e7c0_0001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.pools.bullet_capacity = 0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::ZeroCapacity { pool: "bullet" })
        );
    }

    #[test]
    fn non_finite_cell_size_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.arena.grid_cell_size = f32::NAN;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "arena.grid_cell_size"
            })
        );
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawning.min_speed = 0.5;
        tuning.spawning.max_speed = 0.1;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedSpeedRange { .. })
        ));
    }

    #[test]
    fn non_finite_spawn_band_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawning.half_width = f32::NAN;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotFinite {
                field: "spawning.half_width"
            })
        );

        let mut tuning = Tuning::default();
        tuning.spawning.half_width = f32::INFINITY;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotFinite {
                field: "spawning.half_width"
            })
        );
    }

    #[test]
    fn negative_half_width_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawning.half_width = -2.0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NegativeHalfWidth { half_width: -2.0 })
        );
    }

    #[test]
    fn unbounded_speed_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawning.min_speed = f32::NEG_INFINITY;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotFinite {
                field: "spawning.min_speed"
            })
        );

        let mut tuning = Tuning::default();
        tuning.spawning.max_speed = f32::INFINITY;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotFinite {
                field: "spawning.max_speed"
            })
        );
    }

    #[test]
    fn rapid_fire_factor_must_shorten_the_interval() {
        for factor in [-0.5, 0.0, f64::NAN, 1.5, f64::INFINITY] {
            let mut tuning = Tuning::default();
            tuning.progression.rapid_fire_factor = factor;
            assert!(
                matches!(
                    tuning.validate(),
                    Err(TuningError::RapidFireFactorOutOfRange { .. })
                ),
                "factor {factor} accepted"
            );
        }

        let mut tuning = Tuning::default();
        tuning.progression.rapid_fire_factor = 1.0;
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn shrinking_threshold_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.progression.threshold_growth = 0.9;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ShrinkingThreshold { .. })
        ));
    }
}
