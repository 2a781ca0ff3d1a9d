use std::time::Duration;

use serde::Serialize;
use tracing::info;
use turret_survivor_core::{Event, HudSnapshot, SkillId};
use turret_survivor_rendering::{FrameControl, Scene, SceneSource, Theme};
use turret_survivor_simulation::{Simulation, SkillPicker, StepOutcome};
use turret_survivor_world::query;

/// Drives a simulation from the rendering backend's frame loop.
pub(crate) struct Session {
    simulation: Simulation,
    picker: Box<dyn SkillPicker>,
    outcome: StepOutcome,
    elapsed: Duration,
    frames_run: u32,
    tally: Tally,
    skills: Vec<SkillId>,
}

/// Counters accumulated from broadcast events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Tally {
    pub(crate) spawned: u32,
    pub(crate) volleys: u32,
    pub(crate) hits: u32,
    pub(crate) kills: u32,
    pub(crate) contacts: u32,
}

/// Final report printed when the session ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SessionSummary {
    pub(crate) seed: u64,
    pub(crate) theme: Theme,
    pub(crate) frames_run: u32,
    pub(crate) outcome: &'static str,
    pub(crate) hud: HudSnapshot,
    pub(crate) tally: Tally,
    pub(crate) skills: Vec<SkillId>,
}

impl Session {
    pub(crate) fn new(simulation: Simulation, picker: Box<dyn SkillPicker>) -> Self {
        Self {
            outcome: simulation.outcome(),
            simulation,
            picker,
            elapsed: Duration::ZERO,
            frames_run: 0,
            tally: Tally::default(),
            skills: Vec::new(),
        }
    }

    /// Advances one frame and mirrors the world into `scene`.
    pub(crate) fn advance(&mut self, dt: Duration, scene: &mut Scene) -> FrameControl {
        self.outcome = self.simulation.step_with(dt, self.picker.as_mut());
        self.frames_run += 1;
        self.elapsed += dt;
        for event in self.simulation.events() {
            self.tally.record(event);
            if let Event::SkillApplied { skill } = event {
                self.skills.push(*skill);
            }
        }

        let world = self.simulation.world();
        scene.update(&SceneSource {
            enemies: query::enemy_view(world),
            bullets: query::bullet_view(world),
            blasts: query::blasts(world),
            hud: query::hud(world),
            turret: query::turret(world),
            aim: self.simulation.aim(),
            offered: query::offered_skills(world),
            elapsed: self.elapsed,
        });

        match &self.outcome {
            StepOutcome::Running => FrameControl::Continue,
            StepOutcome::AwaitingSkillChoice { choices } => {
                info!(offered = choices.len(), "skill offer left unanswered");
                FrameControl::Exit
            }
            StepOutcome::GameOver { final_score } => {
                info!(final_score, frames = self.frames_run, "run ended");
                FrameControl::Exit
            }
        }
    }

    pub(crate) fn summary(&self, seed: u64, theme: Theme) -> SessionSummary {
        SessionSummary {
            seed,
            theme,
            frames_run: self.frames_run,
            outcome: match self.outcome {
                StepOutcome::Running => "running",
                StepOutcome::AwaitingSkillChoice { .. } => "awaiting_skill_choice",
                StepOutcome::GameOver { .. } => "game_over",
            },
            hud: query::hud(self.simulation.world()),
            tally: self.tally,
            skills: self.skills.clone(),
        }
    }
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::EnemySpawned { .. } => self.spawned += 1,
            Event::VolleyFired { .. } => self.volleys += 1,
            Event::EnemyHit { .. } => self.hits += 1,
            Event::EnemyKilled { .. } => self.kills += 1,
            Event::PlayerDamaged { .. } => self.contacts += 1,
            _ => {}
        }
    }
}

impl SessionSummary {
    /// Human-readable report.
    pub(crate) fn render_text(&self) -> String {
        let skills = if self.skills.is_empty() {
            "none".to_owned()
        } else {
            self.skills
                .iter()
                .map(|skill| skill.descriptor().name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "outcome: {}\nframes: {} (seed {}, theme {})\nscore: {}  level: {}  health: {}\n\
             spawned: {}  volleys: {}  hits: {}  kills: {}  contacts: {}\nskills: {}",
            self.outcome,
            self.frames_run,
            self.seed,
            self.theme,
            self.hud.score,
            self.hud.level,
            self.hud.health,
            self.tally.spawned,
            self.tally.volleys,
            self.tally.hits,
            self.tally.kills,
            self.tally.contacts,
            skills,
        )
    }
}
