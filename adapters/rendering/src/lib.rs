#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Turret Survivor adapters.
//!
//! Backends never read the world directly. Each frame the adapter hands a
//! [`SceneSource`] built from core views to [`Scene::update`], which turns
//! the dense entity slices into instance lists with transforms and colours
//! already resolved for the active [`Theme`].

use anyhow::Result as AnyResult;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;
use turret_survivor_core::{
    BlastSnapshot, BulletView, DamageType, EnemyView, GroundPoint, HudSnapshot, PlayState,
    SkillDescriptor, SkillId, StatusKind,
};

const ENEMY_HEIGHT: f32 = 0.6;
const BULLET_HEIGHT: f32 = 1.0;
const BLAST_HEIGHT: f32 = 1.0;
const SWAY_RATE: f32 = 0.01;
const SWAY_AMPLITUDE: f32 = 0.1;
const LANCE_LENGTH_SCALE: f32 = 10.0;
const BLAST_FADE_TICKS: f32 = 20.0;
const BLAST_SCALE: f32 = 2.0;
const THERMOBARIC_BLAST_SCALE: f32 = 4.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Cosmetic look applied to the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Flat arcade colours on a black field.
    Basic,
    /// Neon accents over a dark blue arena.
    #[default]
    Cyber,
}

impl Theme {
    /// Every selectable theme.
    pub const ALL: [Theme; 2] = [Theme::Basic, Theme::Cyber];

    /// Lower-case name used on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Cyber => "cyber",
        }
    }

    /// Colours used when presenting the theme.
    #[must_use]
    pub const fn palette(self) -> Palette {
        let base = Palette {
            clear: Color::from_hex(0x050510),
            ground: Color::from_hex(0x0a0a1a),
            turret: Color::from_hex(0x00d2ff),
            enemy: Color::from_hex(0xffffff),
            burning: Color::from_hex(0xff4400),
            frozen: Color::from_hex(0x00ffff),
            bullet_standard: Color::from_hex(0xffff00),
            bullet_thermobaric: Color::from_hex(0xff4400),
            bullet_electromagnetic: Color::from_hex(0xaa00ff),
            bullet_dry_ice: Color::from_hex(0x00ffff),
            blast: Color::from_hex(0xffffff),
            blast_thermobaric: Color::from_hex(0xff4400),
            blast_dry_ice: Color::from_hex(0x00ffff),
        };
        match self {
            Self::Cyber => base,
            Self::Basic => Palette {
                clear: Color::from_hex(0x000000),
                ground: Color::from_hex(0x000000),
                enemy: Color::from_hex(0xff4d4d),
                bullet_standard: Color::from_hex(0xfff700),
                ..base
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = RenderingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RenderingError::UnknownTheme {
                name: wanted.to_owned(),
            })
    }
}

/// Resolved colours for one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Background cleared every frame.
    pub clear: Color,
    /// Ground plane.
    pub ground: Color,
    /// Turret body.
    pub turret: Color,
    /// Enemy without a status effect.
    pub enemy: Color,
    /// Enemy that is burning.
    pub burning: Color,
    /// Enemy that is frozen.
    pub frozen: Color,
    /// Primary weapon rounds.
    pub bullet_standard: Color,
    /// Thermobaric rounds.
    pub bullet_thermobaric: Color,
    /// Electromagnetic lances.
    pub bullet_electromagnetic: Color,
    /// Dry ice rounds.
    pub bullet_dry_ice: Color,
    /// Impact flash for rounds without a dedicated colour.
    pub blast: Color,
    /// Thermobaric impact flash.
    pub blast_thermobaric: Color,
    /// Dry ice impact flash.
    pub blast_dry_ice: Color,
}

impl Palette {
    /// Enemy tint for the provided status.
    #[must_use]
    pub const fn enemy_color(&self, status: StatusKind) -> Color {
        match status {
            StatusKind::None => self.enemy,
            StatusKind::Burning => self.burning,
            StatusKind::Frozen => self.frozen,
        }
    }

    /// Bullet tint for the provided damage type.
    #[must_use]
    pub const fn bullet_color(&self, damage_type: DamageType) -> Color {
        match damage_type {
            DamageType::Standard => self.bullet_standard,
            DamageType::Thermobaric => self.bullet_thermobaric,
            DamageType::Electromagnetic => self.bullet_electromagnetic,
            DamageType::DryIce => self.bullet_dry_ice,
        }
    }

    /// Impact flash tint for the provided damage type.
    #[must_use]
    pub const fn blast_color(&self, damage_type: DamageType) -> Color {
        match damage_type {
            DamageType::Thermobaric => self.blast_thermobaric,
            DamageType::DryIce => self.blast_dry_ice,
            DamageType::Standard | DamageType::Electromagnetic => self.blast,
        }
    }
}

/// Transform and tint of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyInstance {
    /// Centre of the enemy body.
    pub position: Vec3,
    /// Roll around the depth axis in radians.
    pub sway: f32,
    /// Remaining hit points.
    pub hit_points: i16,
    /// Tint reflecting the status effect.
    pub color: Color,
}

/// Transform and tint of a single bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletInstance {
    /// Centre of the bullet.
    pub position: Vec3,
    /// Rotation about the vertical axis, `atan2(vx, vz)`.
    pub heading: f32,
    /// Stretch along the direction of travel.
    pub length_scale: f32,
    /// Tint reflecting the damage type.
    pub color: Color,
}

/// Fading impact flash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlastInstance {
    /// Centre of the flash.
    pub position: Vec3,
    /// Uniform sprite scale.
    pub scale: f32,
    /// Opacity in the range 0.0..=1.0.
    pub opacity: f32,
    /// Tint reflecting the damage type.
    pub color: Color,
}

/// Borrowed simulation state a scene is rebuilt from.
#[derive(Clone, Copy, Debug)]
pub struct SceneSource<'a> {
    /// Live enemies.
    pub enemies: EnemyView<'a>,
    /// Live bullets.
    pub bullets: BulletView<'a>,
    /// Active impact markers.
    pub blasts: &'a [BlastSnapshot],
    /// Heads-up display values.
    pub hud: HudSnapshot,
    /// Turret location.
    pub turret: GroundPoint,
    /// Point the turret is aiming at, if any.
    pub aim: Option<GroundPoint>,
    /// Skills awaiting a choice.
    pub offered: &'a [SkillId],
    /// Time elapsed since the run started.
    pub elapsed: Duration,
}

/// Scene content that should be displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Theme the instances were tinted with.
    pub theme: Theme,
    /// Enemy instances in pool order.
    pub enemies: Vec<EnemyInstance>,
    /// Bullet instances in pool order.
    pub bullets: Vec<BulletInstance>,
    /// Impact flashes.
    pub blasts: Vec<BlastInstance>,
    /// Heads-up display values.
    pub hud: HudSnapshot,
    /// Turret base position.
    pub turret: Vec3,
    /// Turret rotation about the vertical axis in radians.
    pub turret_heading: f32,
    /// Turret body tint.
    pub turret_color: Color,
    /// Descriptors shown by the skill picker overlay.
    pub offered: Vec<SkillDescriptor>,
    /// Time elapsed since the run started.
    pub elapsed: Duration,
}

impl Scene {
    /// Creates an empty scene showing `hud`.
    #[must_use]
    pub fn new(theme: Theme, hud: HudSnapshot) -> Self {
        Self {
            theme,
            enemies: Vec::new(),
            bullets: Vec::new(),
            blasts: Vec::new(),
            hud,
            turret: Vec3::ZERO,
            turret_heading: 0.0,
            turret_color: theme.palette().turret,
            offered: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Colours of the active theme.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Lifecycle state shown by the overlay.
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        self.hud.play_state
    }

    /// Rebuilds every instance list from `source`, reusing allocations.
    pub fn update(&mut self, source: &SceneSource<'_>) {
        let palette = self.palette();
        let clock = source.elapsed.as_secs_f32() * 1_000.0 * SWAY_RATE;

        self.enemies.clear();
        self.enemies
            .extend(source.enemies.iter().map(|enemy| EnemyInstance {
                position: ground_to_world(enemy.position, ENEMY_HEIGHT),
                sway: if enemy.status == StatusKind::Frozen {
                    0.0
                } else {
                    (clock + enemy.index as f32).sin() * SWAY_AMPLITUDE
                },
                hit_points: enemy.hit_points,
                color: palette.enemy_color(enemy.status),
            }));

        self.bullets.clear();
        self.bullets
            .extend(source.bullets.iter().map(|bullet| BulletInstance {
                position: ground_to_world(bullet.position, BULLET_HEIGHT),
                heading: bullet.velocity_x.atan2(bullet.velocity_z),
                length_scale: if bullet.damage_type == DamageType::Electromagnetic {
                    LANCE_LENGTH_SCALE
                } else {
                    1.0
                },
                color: palette.bullet_color(bullet.damage_type),
            }));

        self.blasts.clear();
        self.blasts
            .extend(source.blasts.iter().map(|blast| BlastInstance {
                position: ground_to_world(blast.position, BLAST_HEIGHT),
                scale: if blast.damage_type == DamageType::Thermobaric {
                    THERMOBARIC_BLAST_SCALE
                } else {
                    BLAST_SCALE
                },
                opacity: (f32::from(blast.ticks_remaining) / BLAST_FADE_TICKS).clamp(0.0, 1.0),
                color: palette.blast_color(blast.damage_type),
            }));

        self.hud = source.hud;
        self.turret = ground_to_world(source.turret, 0.0);
        self.turret_heading = source
            .aim
            .map(|aim| (aim.x() - source.turret.x()).atan2(aim.z() - source.turret.z()))
            .unwrap_or(0.0);
        self.turret_color = palette.turret;
        self.offered.clear();
        self.offered
            .extend(source.offered.iter().map(|skill| skill.descriptor()));
        self.elapsed = source.elapsed;
    }
}

fn ground_to_world(point: GroundPoint, height: f32) -> Vec3 {
    Vec3::new(point.x(), height, point.z())
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Tint of the arena floor.
    pub ground_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor cleared with the scene's theme.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        let palette = scene.palette();
        Self {
            window_title: window_title.into(),
            clear_color: palette.clear,
            ground_color: palette.ground,
            scene,
        }
    }
}

/// Decision returned by the per-frame update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop after the current frame.
    Exit,
}

/// Rendering backend capable of presenting Turret Survivor scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and may mutate the scene before it is rendered, allowing adapters to
    /// animate world snapshots deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The requested theme does not exist.
    #[error("unknown theme `{name}` (expected basic or cyber)")]
    UnknownTheme {
        /// Name that failed to match.
        name: String,
    },
}
