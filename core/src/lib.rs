#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Turret Survivor simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read borrowed views of the
//! world and submit [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what happened during the frame.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod tuning;

pub use tuning::{
    ArenaTuning, CombatTuning, PoolTuning, ProgressionTuning, SpawnTuning, Tuning, TuningError,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Turret Survivor online. Hold the line.";

/// Lifecycle state of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// Frames advance normally.
    Running,
    /// A level-up is pending and no combat update runs until a skill is chosen.
    AwaitingSkillChoice,
    /// The turret was destroyed. Terminal.
    GameOver,
}

/// Point on the ground plane expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    x: f32,
    z: f32,
}

impl GroundPoint {
    /// Origin of the ground plane.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new ground point.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Coordinate along the lateral axis.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Coordinate along the depth axis.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Squared planar distance between two points.
    #[must_use]
    pub fn distance_squared(self, other: GroundPoint) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        dx * dx + dz * dz
    }

    /// Unit vector pointing from `self` towards `other`.
    ///
    /// Returns `None` when the points coincide or the distance is not finite.
    #[must_use]
    pub fn direction_to(self, other: GroundPoint) -> Option<(f32, f32)> {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        let length = (dx * dx + dz * dz).sqrt();
        if !length.is_finite() || length <= f32::EPSILON {
            return None;
        }
        Some((dx / length, dz / length))
    }
}

/// Behavioural class of a bullet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Plain round fired by the primary weapon.
    #[default]
    Standard,
    /// Explosive round that splashes and ignites nearby enemies.
    Thermobaric,
    /// Lance that pierces through several enemies.
    Electromagnetic,
    /// Round that freezes the enemy it strikes.
    DryIce,
}

/// Timed modifier attached to an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// No status effect is active.
    #[default]
    None,
    /// Enemy takes damage on every burn pulse.
    Burning,
    /// Enemy moves at reduced speed.
    Frozen,
}

/// Opaque RGB colour carried alongside skill descriptors for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl SkillColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Identifier of an upgrade skill that may be offered on level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillId {
    /// Periodically fires a thermobaric round.
    Thermobaric,
    /// Periodically fires a piercing electromagnetic lance.
    Electromagnetic,
    /// Periodically fires a freezing dry-ice round.
    DryIce,
    /// Shortens the primary weapon's shot interval.
    RapidFire,
    /// Adds a projectile to every primary volley.
    DoubleTap,
}

impl SkillId {
    /// Every skill that can be offered, in catalog order.
    pub const CATALOG: [SkillId; 5] = [
        Self::Thermobaric,
        Self::Electromagnetic,
        Self::DryIce,
        Self::RapidFire,
        Self::DoubleTap,
    ];

    /// Presentation metadata for the skill.
    #[must_use]
    pub const fn descriptor(self) -> SkillDescriptor {
        match self {
            Self::Thermobaric => SkillDescriptor {
                id: self,
                name: "Thermobaric Rounds",
                description: "Fires an incendiary round every 3 seconds",
                color: SkillColor::from_rgb(0xff, 0x44, 0x00),
            },
            Self::Electromagnetic => SkillDescriptor {
                id: self,
                name: "Electromagnetic Lance",
                description: "Fires a piercing lance every 5 seconds",
                color: SkillColor::from_rgb(0xaa, 0x00, 0xff),
            },
            Self::DryIce => SkillDescriptor {
                id: self,
                name: "Dry Ice Shells",
                description: "Fires a freezing round every 4 seconds",
                color: SkillColor::from_rgb(0x00, 0xff, 0xff),
            },
            Self::RapidFire => SkillDescriptor {
                id: self,
                name: "Rapid Fire",
                description: "Attack speed +20%",
                color: SkillColor::from_rgb(0xff, 0xcc, 0x00),
            },
            Self::DoubleTap => SkillDescriptor {
                id: self,
                name: "Double Tap",
                description: "Projectiles +1",
                color: SkillColor::from_rgb(0x00, 0xcc, 0xff),
            },
        }
    }

    /// Damage type of the bullet the skill fires on its own cooldown.
    ///
    /// Passive stat upgrades return `None`.
    #[must_use]
    pub const fn autonomous_damage_type(self) -> Option<DamageType> {
        match self {
            Self::Thermobaric => Some(DamageType::Thermobaric),
            Self::Electromagnetic => Some(DamageType::Electromagnetic),
            Self::DryIce => Some(DamageType::DryIce),
            Self::RapidFire | Self::DoubleTap => None,
        }
    }
}

/// Presentation metadata describing an offered skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SkillDescriptor {
    /// Identifier the collaborator must echo back when choosing the skill.
    pub id: SkillId,
    /// Display name.
    pub name: &'static str,
    /// One-line description of the effect.
    pub description: &'static str,
    /// Accent colour used by the skill picker.
    pub color: SkillColor,
}

/// Weapon that emits a volley.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FireSource {
    /// The turret's primary auto-fire weapon.
    Primary,
    /// An acquired skill firing on its own cooldown.
    Skill(SkillId),
}

/// Reasons a skill choice may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillChoiceError {
    /// No level-up is pending.
    NotAwaitingChoice,
    /// The skill was not among the offered choices.
    NotOffered,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one frame.
    Tick {
        /// Wall-clock time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Requests that a new enemy enter the arena.
    SpawnEnemy {
        /// Spawn location.
        position: GroundPoint,
        /// Starting hit points.
        hit_points: i16,
        /// Distance travelled per tick before status modifiers.
        speed: f32,
    },
    /// Requests that a weapon source fire at the provided ground point.
    FireVolley {
        /// Weapon emitting the volley.
        source: FireSource,
        /// Point the volley is aimed at.
        target: GroundPoint,
    },
    /// Publishes the skills drawn for the pending level-up.
    OfferSkills {
        /// Distinct skills to present.
        choices: Vec<SkillId>,
    },
    /// Resolves the pending level-up with the chosen skill.
    ChooseSkill {
        /// Skill picked by the collaborator.
        skill: SkillId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Location the enemy was placed at.
        position: GroundPoint,
    },
    /// Reports a bullet impact on an enemy.
    EnemyHit {
        /// Location of the struck enemy.
        position: GroundPoint,
        /// Type of the bullet that struck.
        damage_type: DamageType,
    },
    /// Reports that an enemy's hit points crossed zero.
    EnemyKilled {
        /// Location of the enemy when it died.
        position: GroundPoint,
    },
    /// Reports that an enemy reached the turret.
    PlayerDamaged {
        /// Health removed by the contact.
        amount: i32,
        /// Health remaining after the contact.
        health: i32,
    },
    /// Confirms that a weapon source fired.
    VolleyFired {
        /// Weapon that fired.
        source: FireSource,
        /// Bullets that fit into the pool.
        bullets: u32,
    },
    /// Announces that the experience threshold was crossed.
    LevelUp {
        /// Level reached.
        level: u32,
    },
    /// Publishes the skills offered for the pending level-up.
    SkillChoicesOffered {
        /// Descriptors in presentation order.
        choices: Vec<SkillDescriptor>,
    },
    /// Confirms that a skill was applied and the simulation resumed.
    SkillApplied {
        /// Skill that was applied.
        skill: SkillId,
    },
    /// Reports that a skill choice was rejected.
    SkillChoiceRejected {
        /// Skill that was requested.
        skill: SkillId,
        /// Specific reason the choice failed.
        reason: SkillChoiceError,
    },
    /// Announces the terminal state.
    GameOver {
        /// Score at the moment the turret fell.
        final_score: u32,
    },
}

/// Immutable representation of a single live enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Dense pool index, valid until the next removal.
    pub index: usize,
    /// Current position.
    pub position: GroundPoint,
    /// Remaining hit points.
    pub hit_points: i16,
    /// Active status effect.
    pub status: StatusKind,
    /// Ticks left before the status effect expires.
    pub status_ticks: u16,
}

/// Borrowed parallel columns describing every live enemy.
///
/// Columns are truncated to the shortest input so every index below
/// [`EnemyView::len`] is live.
#[derive(Clone, Copy, Debug)]
pub struct EnemyView<'a> {
    x: &'a [f32],
    z: &'a [f32],
    hit_points: &'a [i16],
    status: &'a [StatusKind],
    status_ticks: &'a [u16],
}

impl<'a> EnemyView<'a> {
    /// Captures a new view over the provided columns.
    #[must_use]
    pub fn new(
        x: &'a [f32],
        z: &'a [f32],
        hit_points: &'a [i16],
        status: &'a [StatusKind],
        status_ticks: &'a [u16],
    ) -> Self {
        let len = x
            .len()
            .min(z.len())
            .min(hit_points.len())
            .min(status.len())
            .min(status_ticks.len());
        Self {
            x: &x[..len],
            z: &z[..len],
            hit_points: &hit_points[..len],
            status: &status[..len],
            status_ticks: &status_ticks[..len],
        }
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Position of the enemy at `index`, if live.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<GroundPoint> {
        Some(GroundPoint::new(*self.x.get(index)?, *self.z.get(index)?))
    }

    /// Snapshot of the enemy at `index`, if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EnemySnapshot> {
        Some(EnemySnapshot {
            index,
            position: self.position(index)?,
            hit_points: *self.hit_points.get(index)?,
            status: *self.status.get(index)?,
            status_ticks: *self.status_ticks.get(index)?,
        })
    }

    /// Iterator over live enemies in dense index order.
    pub fn iter(&self) -> impl Iterator<Item = EnemySnapshot> + 'a {
        let view = *self;
        (0..view.len()).filter_map(move |index| view.get(index))
    }

    /// Lateral coordinates of live enemies.
    #[must_use]
    pub fn xs(&self) -> &'a [f32] {
        self.x
    }

    /// Depth coordinates of live enemies.
    #[must_use]
    pub fn zs(&self) -> &'a [f32] {
        self.z
    }
}

/// Immutable representation of a single live bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Dense pool index, valid until the next removal.
    pub index: usize,
    /// Current position.
    pub position: GroundPoint,
    /// Lateral displacement per tick.
    pub velocity_x: f32,
    /// Depth displacement per tick.
    pub velocity_z: f32,
    /// Behavioural class of the bullet.
    pub damage_type: DamageType,
    /// Hits left before the bullet is consumed.
    pub pierce: u8,
}

/// Borrowed parallel columns describing every live bullet.
#[derive(Clone, Copy, Debug)]
pub struct BulletView<'a> {
    x: &'a [f32],
    z: &'a [f32],
    velocity_x: &'a [f32],
    velocity_z: &'a [f32],
    damage_type: &'a [DamageType],
    pierce: &'a [u8],
}

impl<'a> BulletView<'a> {
    /// Captures a new view over the provided columns.
    #[must_use]
    pub fn new(
        x: &'a [f32],
        z: &'a [f32],
        velocity_x: &'a [f32],
        velocity_z: &'a [f32],
        damage_type: &'a [DamageType],
        pierce: &'a [u8],
    ) -> Self {
        let len = x
            .len()
            .min(z.len())
            .min(velocity_x.len())
            .min(velocity_z.len())
            .min(damage_type.len())
            .min(pierce.len());
        Self {
            x: &x[..len],
            z: &z[..len],
            velocity_x: &velocity_x[..len],
            velocity_z: &velocity_z[..len],
            damage_type: &damage_type[..len],
            pierce: &pierce[..len],
        }
    }

    /// Number of live bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Reports whether no bullet is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Snapshot of the bullet at `index`, if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<BulletSnapshot> {
        Some(BulletSnapshot {
            index,
            position: GroundPoint::new(*self.x.get(index)?, *self.z.get(index)?),
            velocity_x: *self.velocity_x.get(index)?,
            velocity_z: *self.velocity_z.get(index)?,
            damage_type: *self.damage_type.get(index)?,
            pierce: *self.pierce.get(index)?,
        })
    }

    /// Iterator over live bullets in dense index order.
    pub fn iter(&self) -> impl Iterator<Item = BulletSnapshot> + 'a {
        let view = *self;
        (0..view.len()).filter_map(move |index| view.get(index))
    }
}

/// Short-lived hit marker handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlastSnapshot {
    /// Impact location.
    pub position: GroundPoint,
    /// Type of the bullet that caused the blast.
    pub damage_type: DamageType,
    /// Frames left before the blast fades out.
    pub ticks_remaining: u16,
}

/// Cooldown state of a single weapon source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownSnapshot {
    /// Weapon source the cooldown belongs to.
    pub source: FireSource,
    /// Time left before the source may fire again.
    pub ready_in: Duration,
}

/// Read-only snapshot of every armed weapon source.
#[derive(Clone, Debug, Default)]
pub struct CooldownView {
    snapshots: Vec<CooldownSnapshot>,
}

impl CooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.source);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &CooldownSnapshot> {
        self.snapshots.iter()
    }
}

/// Values displayed by the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    /// Accumulated score.
    pub score: u32,
    /// Remaining turret health.
    pub health: i32,
    /// Current level.
    pub level: u32,
    /// Experience accumulated towards the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub experience_to_next: u32,
    /// Lifecycle state of the run.
    pub play_state: PlayState,
}

impl HudSnapshot {
    /// Progress towards the next level in the range `0.0..=1.0`.
    #[must_use]
    pub fn experience_fraction(&self) -> f32 {
        if self.experience_to_next == 0 {
            return 1.0;
        }
        (self.experience as f32 / self.experience_to_next as f32).clamp(0.0, 1.0)
    }
}
