#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Turret Survivor.

use std::time::Duration;

use tracing::{debug, info, trace};
use turret_survivor_core::{
    ArenaTuning, BlastSnapshot, Command, DamageType, Event, FireSource, GroundPoint, PlayState,
    SkillId, StatusKind, Tuning, WELCOME_BANNER,
};

pub mod combat;
pub mod grid;
pub mod pool;
pub mod progression;

use combat::Hit;
use grid::SpatialGrid;
use pool::{BulletPool, BulletRecord, EnemyPool, EnemyRecord};
use progression::ProgressionState;

const BLAST_CAPACITY: usize = 256;

/// Represents the authoritative Turret Survivor world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    enemies: EnemyPool,
    bullets: BulletPool,
    grid: SpatialGrid,
    progression: ProgressionState,
    blasts: Vec<BlastSnapshot>,
    burn_clock: Duration,
    tick_index: u64,
    kills: Vec<GroundPoint>,
}

impl World {
    /// Creates a world using the stock game balance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Creates a world with the provided tuning.
    #[must_use]
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            banner: WELCOME_BANNER,
            enemies: EnemyPool::with_capacity(tuning.pools.enemy_capacity),
            bullets: BulletPool::with_capacity(tuning.pools.bullet_capacity),
            grid: SpatialGrid::new(tuning.arena.grid_cell_size),
            progression: ProgressionState::new(&tuning.progression),
            blasts: Vec::with_capacity(BLAST_CAPACITY),
            burn_clock: Duration::ZERO,
            tick_index: 0,
            kills: Vec::new(),
            tuning,
        }
    }

    fn is_running(&self) -> bool {
        self.progression.play_state() == PlayState::Running
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        if !self.advance_enemies(dt, out_events) {
            return;
        }

        self.grid.rebuild(self.enemies.view());
        self.advance_bullets(out_events);
        self.compact_enemies();
        self.settle_kills(out_events);

        self.blasts.retain_mut(|blast| {
            blast.ticks_remaining = blast.ticks_remaining.saturating_sub(1);
            blast.ticks_remaining > 0
        });
        self.progression.advance_cooldowns(dt);
    }

    /// Moves every enemy and resolves burn and contact damage.
    ///
    /// Returns `false` when the turret fell and the rest of the tick is skipped.
    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> bool {
        let burn_damage = self.burn_damage(dt);
        let turret = self.tuning.arena.turret;
        let contact_radius = self.tuning.arena.player_collision_radius;
        let contact_radius_squared = contact_radius * contact_radius;
        let frozen_multiplier = self.tuning.combat.frozen_speed_multiplier;

        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies.hit_points(index) <= 0 {
                index += 1;
                continue;
            }

            if burn_damage > 0 && self.enemies.status(index) == StatusKind::Burning {
                combat::burn(&mut self.enemies, index, burn_damage, &mut self.kills);
            }
            self.enemies.decay_status(index);
            if self.enemies.hit_points(index) <= 0 {
                index += 1;
                continue;
            }

            let position = self.enemies.position(index);
            if position.distance_squared(turret) < contact_radius_squared {
                self.enemies.remove(index);
                let amount = self.tuning.combat.contact_damage;
                let health = self.progression.take_damage(amount);
                out_events.push(Event::PlayerDamaged { amount, health });

                if self.progression.play_state() == PlayState::GameOver {
                    self.settle_kills(out_events);
                    let final_score = self.progression.score();
                    info!(final_score, tick = self.tick_index, "turret destroyed");
                    out_events.push(Event::GameOver { final_score });
                    return false;
                }
                continue;
            }

            if let Some((dx, dz)) = position.direction_to(turret) {
                let mut speed = self.enemies.speed(index);
                if self.enemies.status(index) == StatusKind::Frozen {
                    speed *= frozen_multiplier;
                }
                self.enemies.set_position(
                    index,
                    GroundPoint::new(position.x() + dx * speed, position.z() + dz * speed),
                );
            }
            index += 1;
        }

        true
    }

    /// Counts burn pulses elapsed during `dt` and returns the damage they deal.
    fn burn_damage(&mut self, dt: Duration) -> i16 {
        let interval = self.tuning.combat.burn_interval();
        self.burn_clock = self.burn_clock.saturating_add(dt);

        let pulses: i16 = if interval.is_zero() {
            1
        } else {
            let mut pulses = 0_i16;
            while self.burn_clock >= interval {
                self.burn_clock -= interval;
                pulses = pulses.saturating_add(1);
            }
            pulses
        };

        if pulses == 0 {
            return 0;
        }
        self.progression
            .stats()
            .burn_damage
            .max(1)
            .saturating_mul(pulses)
    }

    fn advance_bullets(&mut self, out_events: &mut Vec<Event>) {
        let hit_radius = self.tuning.combat.hit_radius;
        let hit_radius_squared = hit_radius * hit_radius;
        let base_damage = self.progression.stats().damage;

        let mut index = 0;
        while index < self.bullets.len() {
            let position = self.bullets.advance(index);
            if leaves_playfield(position, &self.tuning.arena) {
                self.bullets.remove(index);
                continue;
            }

            let enemies = &self.enemies;
            let target = self
                .grid
                .query(position.x(), position.z())
                .iter()
                .copied()
                .find(|&candidate| {
                    candidate < enemies.len()
                        && enemies.hit_points(candidate) > 0
                        && enemies.position(candidate).distance_squared(position)
                            < hit_radius_squared
                });

            if let Some(target) = target {
                let damage_type = self.bullets.damage_type(index);
                let struck = combat::resolve_hit(
                    &mut self.enemies,
                    Hit {
                        target,
                        impact: position,
                        damage_type,
                        base_damage,
                    },
                    &self.tuning.combat,
                    &mut self.kills,
                );
                out_events.push(Event::EnemyHit {
                    position: struck,
                    damage_type,
                });
                self.record_blast(struck, damage_type);

                if self.bullets.consume_pierce(index) == 0 {
                    self.bullets.remove(index);
                    continue;
                }
            }
            index += 1;
        }
    }

    fn compact_enemies(&mut self) {
        for index in (0..self.enemies.len()).rev() {
            if self.enemies.hit_points(index) <= 0 {
                self.enemies.remove(index);
            }
        }
    }

    fn settle_kills(&mut self, out_events: &mut Vec<Event>) {
        let score = self.tuning.combat.kill_score;
        let experience = self.tuning.combat.kill_experience;
        for position in self.kills.drain(..) {
            out_events.push(Event::EnemyKilled { position });
            self.progression.add_score(score);
            if let Some(level) = self.progression.gain_experience(experience) {
                out_events.push(Event::LevelUp { level });
            }
        }
    }

    fn record_blast(&mut self, position: GroundPoint, damage_type: DamageType) {
        if self.blasts.len() >= BLAST_CAPACITY {
            return;
        }
        self.blasts.push(BlastSnapshot {
            position,
            damage_type,
            ticks_remaining: self.tuning.combat.blast_ticks,
        });
    }

    fn spawn_enemy(&mut self, record: EnemyRecord, out_events: &mut Vec<Event>) {
        match self.enemies.spawn(record) {
            Ok(_) => out_events.push(Event::EnemySpawned {
                position: record.position,
            }),
            Err(full) => trace!(capacity = full.capacity, "enemy spawn dropped"),
        }
    }

    fn fire_volley(&mut self, source: FireSource, target: GroundPoint, out_events: &mut Vec<Event>) {
        if !self.progression.is_ready(source) {
            return;
        }

        let stats = *self.progression.stats();
        let (damage_type, count, pierce) = match source {
            FireSource::Primary => (DamageType::Standard, stats.multi_shot.max(1), 1),
            FireSource::Skill(skill) => {
                let Some(damage_type) = skill.autonomous_damage_type() else {
                    return;
                };
                let pierce = if skill == SkillId::Electromagnetic {
                    self.tuning
                        .combat
                        .electromagnetic_pierce
                        .saturating_add(stats.pierce_bonus)
                } else {
                    1
                };
                (damage_type, 1, pierce)
            }
        };

        let arena = &self.tuning.arena;
        let turret = arena.turret;
        let muzzle = GroundPoint::new(turret.x(), turret.z() + arena.muzzle_offset_z);
        let (aim_x, aim_z) = turret.direction_to(target).unwrap_or((0.0, -1.0));
        let spread = self.tuning.combat.multi_shot_spread;
        let centre = (count - 1) as f32 / 2.0;

        let mut fired = 0_u32;
        for shot in 0..count {
            let angle = (shot as f32 - centre) * spread;
            let (sin, cos) = angle.sin_cos();
            let direction_x = aim_x * cos + aim_z * sin;
            let direction_z = -aim_x * sin + aim_z * cos;
            let record = BulletRecord {
                position: muzzle,
                velocity_x: direction_x * stats.bullet_speed,
                velocity_z: direction_z * stats.bullet_speed,
                damage_type,
                pierce,
            };
            if let Err(full) = self.bullets.spawn(record) {
                trace!(capacity = full.capacity, "bullet spawn dropped");
                break;
            }
            fired += 1;
        }

        self.progression.reset_cooldown(source);
        debug!(?source, bullets = fired, "volley fired");
        out_events.push(Event::VolleyFired {
            source,
            bullets: fired,
        });
    }

    fn offer_skills(&mut self, choices: Vec<SkillId>, out_events: &mut Vec<Event>) {
        if choices.is_empty() {
            if let Ok(chained) = self.progression.skip_choice() {
                debug!("no skills left to offer, resuming");
                if let Some(level) = chained {
                    out_events.push(Event::LevelUp { level });
                }
            }
            return;
        }

        if self.progression.present_choices(&choices).is_err() {
            trace!("skill offer outside a pending level-up ignored");
            return;
        }
        let descriptors = self
            .progression
            .offered()
            .iter()
            .map(|skill| skill.descriptor())
            .collect();
        out_events.push(Event::SkillChoicesOffered {
            choices: descriptors,
        });
    }

    fn choose_skill(&mut self, skill: SkillId, out_events: &mut Vec<Event>) {
        match self
            .progression
            .choose_skill(skill, &self.tuning.progression)
        {
            Ok(chained) => {
                out_events.push(Event::SkillApplied { skill });
                if let Some(level) = chained {
                    out_events.push(Event::LevelUp { level });
                }
            }
            Err(reason) => {
                debug!(?skill, ?reason, "skill choice rejected");
                out_events.push(Event::SkillChoiceRejected { skill, reason });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Frame commands are ignored unless the run is in [`PlayState::Running`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.is_running() {
                world.tick(dt, out_events);
            }
        }
        Command::SpawnEnemy {
            position,
            hit_points,
            speed,
        } => {
            if world.is_running() {
                world.spawn_enemy(EnemyRecord::new(position, hit_points, speed), out_events);
            }
        }
        Command::FireVolley { source, target } => {
            if world.is_running() {
                world.fire_volley(source, target, out_events);
            }
        }
        Command::OfferSkills { choices } => world.offer_skills(choices, out_events),
        Command::ChooseSkill { skill } => world.choose_skill(skill, out_events),
    }
}

fn leaves_playfield(position: GroundPoint, arena: &ArenaTuning) -> bool {
    position.z() < arena.bullet_min_z
        || position.z() > arena.bullet_max_z
        || position.x().abs() > arena.bullet_half_width
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{
        grid::SpatialGrid,
        progression::{CombatStats, ProgressionState},
        World,
    };
    use turret_survivor_core::{
        BlastSnapshot, BulletView, CooldownView, EnemyView, GroundPoint, HudSnapshot, PlayState,
        SkillId, Tuning,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Lifecycle state of the run.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.progression.play_state()
    }

    /// Ground position of the turret.
    #[must_use]
    pub fn turret(world: &World) -> GroundPoint {
        world.tuning.arena.turret
    }

    /// Borrowed columns of every live enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView<'_> {
        world.enemies.view()
    }

    /// Borrowed columns of every live bullet.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView<'_> {
        world.bullets.view()
    }

    /// Hit markers that have not faded out yet.
    #[must_use]
    pub fn blasts(world: &World) -> &[BlastSnapshot] {
        &world.blasts
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        world.progression.hud()
    }

    /// Cooldowns of every armed weapon source.
    #[must_use]
    pub fn cooldown_view(world: &World) -> CooldownView {
        world.progression.cooldown_view()
    }

    /// Current combat stats.
    #[must_use]
    pub fn stats(world: &World) -> &CombatStats {
        world.progression.stats()
    }

    /// Full progression state of the run.
    #[must_use]
    pub fn progression(world: &World) -> &ProgressionState {
        &world.progression
    }

    /// Skills offered for the pending level-up.
    #[must_use]
    pub fn offered_skills(world: &World) -> &[SkillId] {
        world.progression.offered()
    }

    /// Spatial grid as rebuilt during the last tick.
    #[must_use]
    pub fn grid(world: &World) -> &SpatialGrid {
        &world.grid
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turret_survivor_core::SkillChoiceError;

    const FRAME: Duration = Duration::from_millis(16);

    fn spawn(world: &mut World, x: f32, z: f32, hit_points: i16, speed: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                position: GroundPoint::new(x, z),
                hit_points,
                speed,
            },
            &mut events,
        );
        events
    }

    fn tick(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick { dt: FRAME }, &mut events);
        events
    }

    fn fire(world: &mut World, source: FireSource, target: GroundPoint) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::FireVolley { source, target }, &mut events);
        events
    }

    fn level_up(world: &mut World) {
        let needed = query::hud(world).experience_to_next;
        assert!(world.progression.gain_experience(needed).is_some());
    }

    #[test]
    fn new_world_starts_running_and_empty() {
        let world = World::new();
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::play_state(&world), PlayState::Running);
        assert!(query::enemy_view(&world).is_empty());
        assert!(query::bullet_view(&world).is_empty());
        assert_eq!(query::hud(&world).health, 100);
    }

    #[test]
    fn spawn_beyond_capacity_is_dropped_silently() {
        let mut tuning = Tuning::default();
        tuning.pools.enemy_capacity = 1;
        let mut world = World::with_tuning(tuning);

        assert_eq!(spawn(&mut world, 0.0, -60.0, 3, 0.02).len(), 1);
        assert!(spawn(&mut world, 1.0, -60.0, 3, 0.02).is_empty());
        assert_eq!(query::enemy_view(&world).len(), 1);
    }

    #[test]
    fn enemies_walk_towards_the_turret() {
        let mut world = World::new();
        let _ = spawn(&mut world, 0.0, -60.0, 3, 0.5);
        let _ = tick(&mut world);

        let position = query::enemy_view(&world).position(0).expect("enemy alive");
        assert!((position.z() + 59.5).abs() < 1e-4);
        assert!(position.x().abs() < 1e-6);
    }

    #[test]
    fn frozen_enemies_move_at_half_speed() {
        let mut world = World::new();
        let _ = spawn(&mut world, 0.0, -60.0, 3, 0.4);
        world.enemies.set_status(0, StatusKind::Frozen, 10);
        let _ = tick(&mut world);

        let position = query::enemy_view(&world).position(0).expect("enemy alive");
        assert!((position.z() + 59.8).abs() < 1e-4);
        assert_eq!(query::enemy_view(&world).get(0).map(|e| e.status_ticks), Some(9));
    }

    #[test]
    fn primary_volley_spreads_around_aim_direction() {
        let mut world = World::new();
        let tuning = world.tuning.progression.clone();
        progression::apply_skill(&mut world.progression, SkillId::DoubleTap, &tuning);
        progression::apply_skill(&mut world.progression, SkillId::DoubleTap, &tuning);

        let events = fire(&mut world, FireSource::Primary, GroundPoint::new(0.0, -60.0));

        assert_eq!(
            events,
            vec![Event::VolleyFired {
                source: FireSource::Primary,
                bullets: 3,
            }]
        );
        let bullets: Vec<_> = query::bullet_view(&world).iter().collect();
        assert_eq!(bullets.len(), 3);
        assert!(bullets[1].velocity_x.abs() < 1e-6);
        assert!((bullets[1].velocity_z + 0.5).abs() < 1e-6);
        assert!((bullets[0].velocity_x + bullets[2].velocity_x).abs() < 1e-6);
        for bullet in &bullets {
            assert_eq!(bullet.position, GroundPoint::new(0.0, 3.5));
            assert_eq!(bullet.damage_type, DamageType::Standard);
            assert_eq!(bullet.pierce, 1);
        }
    }

    #[test]
    fn volley_respects_cooldown() {
        let mut world = World::new();
        let target = GroundPoint::new(0.0, -60.0);

        assert_eq!(fire(&mut world, FireSource::Primary, target).len(), 1);
        assert!(fire(&mut world, FireSource::Primary, target).is_empty());
        for _ in 0..32 {
            let _ = tick(&mut world);
        }
        assert_eq!(fire(&mut world, FireSource::Primary, target).len(), 1);
    }

    #[test]
    fn unacquired_skill_does_not_fire() {
        let mut world = World::new();
        let events = fire(
            &mut world,
            FireSource::Skill(SkillId::Thermobaric),
            GroundPoint::new(0.0, -10.0),
        );
        assert!(events.is_empty());
        assert!(query::bullet_view(&world).is_empty());
    }

    #[test]
    fn electromagnetic_lance_carries_bonus_pierce() {
        let mut world = World::new();
        let tuning = world.tuning.progression.clone();
        progression::apply_skill(&mut world.progression, SkillId::Electromagnetic, &tuning);

        let _ = fire(
            &mut world,
            FireSource::Skill(SkillId::Electromagnetic),
            GroundPoint::new(0.0, -20.0),
        );

        let bullet = query::bullet_view(&world).get(0).expect("lance fired");
        assert_eq!(bullet.damage_type, DamageType::Electromagnetic);
        assert_eq!(bullet.pierce, 7);
    }

    #[test]
    fn degenerate_aim_fires_down_the_lane() {
        let mut world = World::new();
        let turret = query::turret(&world);
        let _ = fire(&mut world, FireSource::Primary, turret);

        let bullet = query::bullet_view(&world).get(0).expect("bullet fired");
        assert_eq!(bullet.velocity_x, 0.0);
        assert!((bullet.velocity_z + 0.5).abs() < 1e-6);
    }

    #[test]
    fn bullets_leave_playfield() {
        let mut world = World::new();
        let _ = fire(&mut world, FireSource::Primary, GroundPoint::new(0.0, -60.0));
        for _ in 0..167 {
            let _ = tick(&mut world);
        }
        assert_eq!(query::bullet_view(&world).len(), 1);
        let _ = tick(&mut world);
        assert!(query::bullet_view(&world).is_empty());
    }

    #[test]
    fn burning_enemies_take_damage_per_pulse() {
        let mut world = World::new();
        let _ = spawn(&mut world, 0.0, -60.0, 3, 0.0);
        world.enemies.set_status(0, StatusKind::Burning, 200);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(999),
            },
            &mut events,
        );
        assert_eq!(query::enemy_view(&world).get(0).map(|e| e.hit_points), Some(3));

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(2),
            },
            &mut events,
        );
        assert_eq!(query::enemy_view(&world).get(0).map(|e| e.hit_points), Some(2));
    }

    #[test]
    fn burn_kill_awards_score_and_experience() {
        let mut world = World::new();
        let _ = spawn(&mut world, 0.0, -60.0, 1, 0.0);
        world.enemies.set_status(0, StatusKind::Burning, 200);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1_000),
            },
            &mut events,
        );

        assert!(events.contains(&Event::EnemyKilled {
            position: GroundPoint::new(0.0, -60.0)
        }));
        assert!(query::enemy_view(&world).is_empty());
        let hud = query::hud(&world);
        assert_eq!((hud.score, hud.experience), (10, 20));
    }

    #[test]
    fn commands_are_ignored_while_awaiting_choice() {
        let mut world = World::new();
        level_up(&mut world);

        assert!(spawn(&mut world, 0.0, -60.0, 3, 0.02).is_empty());
        assert!(tick(&mut world).is_empty());
        assert!(fire(&mut world, FireSource::Primary, GroundPoint::ORIGIN).is_empty());
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn offer_then_choose_resumes_the_run() {
        let mut world = World::new();
        level_up(&mut world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::OfferSkills {
                choices: vec![SkillId::RapidFire, SkillId::DoubleTap],
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SkillChoicesOffered {
                choices: vec![
                    SkillId::RapidFire.descriptor(),
                    SkillId::DoubleTap.descriptor()
                ],
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::ChooseSkill {
                skill: SkillId::DoubleTap,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SkillApplied {
                skill: SkillId::DoubleTap
            }]
        );
        assert_eq!(query::play_state(&world), PlayState::Running);
        assert_eq!(query::stats(&world).multi_shot, 2);
        assert_eq!(query::hud(&world).experience_to_next, 120);
    }

    #[test]
    fn unoffered_choice_is_rejected_without_side_effects() {
        let mut world = World::new();
        level_up(&mut world);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::OfferSkills {
                choices: vec![SkillId::Thermobaric],
            },
            &mut events,
        );

        events.clear();
        apply(
            &mut world,
            Command::ChooseSkill {
                skill: SkillId::RapidFire,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::SkillChoiceRejected {
                skill: SkillId::RapidFire,
                reason: SkillChoiceError::NotOffered,
            }]
        );
        assert_eq!(query::play_state(&world), PlayState::AwaitingSkillChoice);
        assert_eq!(query::offered_skills(&world), &[SkillId::Thermobaric]);
    }

    #[test]
    fn empty_offer_resumes_with_scaled_threshold() {
        let mut world = World::new();
        level_up(&mut world);
        let mut events = Vec::new();

        apply(&mut world, Command::OfferSkills { choices: Vec::new() }, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::play_state(&world), PlayState::Running);
        assert_eq!(query::hud(&world).experience_to_next, 120);
    }

    #[test]
    fn blasts_fade_after_their_lifetime() {
        let mut world = World::new();
        world.record_blast(GroundPoint::ORIGIN, DamageType::Thermobaric);
        for _ in 0..29 {
            let _ = tick(&mut world);
        }
        assert_eq!(query::blasts(&world).len(), 1);
        assert_eq!(query::blasts(&world)[0].ticks_remaining, 1);
        let _ = tick(&mut world);
        assert!(query::blasts(&world).is_empty());
    }
}
