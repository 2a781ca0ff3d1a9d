//! Damage resolution for bullet impacts and burn pulses.
//!
//! Every function records the position of each enemy whose hit points cross
//! zero into `kills`; the caller turns those into score and experience.

use turret_survivor_core::{CombatTuning, DamageType, GroundPoint, StatusKind};

use crate::pool::EnemyPool;

/// Bullet impact on a specific enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Index of the struck enemy.
    pub target: usize,
    /// Bullet position at the moment of impact.
    pub impact: GroundPoint,
    /// Type of the bullet that struck.
    pub damage_type: DamageType,
    /// Damage dealt before type bonuses.
    pub base_damage: i16,
}

/// Applies a bullet hit and returns the position of the struck enemy.
///
/// Thermobaric rounds splash every live enemy around the impact point, the
/// struck enemy included, before the primary damage lands.
pub fn resolve_hit(
    enemies: &mut EnemyPool,
    hit: Hit,
    tuning: &CombatTuning,
    kills: &mut Vec<GroundPoint>,
) -> GroundPoint {
    let mut damage = hit.base_damage;

    match hit.damage_type {
        DamageType::Standard | DamageType::Electromagnetic => {}
        DamageType::Thermobaric => {
            damage = damage.saturating_add(tuning.thermobaric_bonus);
            splash(enemies, hit.impact, tuning, kills);
        }
        DamageType::DryIce => {
            enemies.set_status(hit.target, StatusKind::Frozen, tuning.freeze_ticks);
        }
    }

    let struck = enemies.position(hit.target);
    if enemies.apply_damage(hit.target, damage) {
        kills.push(struck);
    }
    struck
}

/// Deals burn damage to a single enemy.
pub fn burn(enemies: &mut EnemyPool, index: usize, damage: i16, kills: &mut Vec<GroundPoint>) {
    if enemies.apply_damage(index, damage) {
        kills.push(enemies.position(index));
    }
}

fn splash(
    enemies: &mut EnemyPool,
    center: GroundPoint,
    tuning: &CombatTuning,
    kills: &mut Vec<GroundPoint>,
) {
    let radius_squared = tuning.splash_radius * tuning.splash_radius;
    for index in 0..enemies.len() {
        if enemies.hit_points(index) <= 0 {
            continue;
        }
        let position = enemies.position(index);
        if position.distance_squared(center) >= radius_squared {
            continue;
        }

        enemies.set_status(index, StatusKind::Burning, tuning.burn_ticks);
        if enemies.apply_damage(index, tuning.splash_damage) {
            kills.push(position);
        }
    }
}
