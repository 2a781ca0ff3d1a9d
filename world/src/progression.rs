//! Experience, levelling, skill upgrades and weapon cooldowns.

use std::time::Duration;

use tracing::debug;
use turret_survivor_core::{
    CooldownSnapshot, CooldownView, FireSource, HudSnapshot, PlayState, ProgressionTuning,
    SkillChoiceError, SkillId,
};

/// Combat stats modified by skills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatStats {
    /// Damage dealt by every bullet before type bonuses.
    pub damage: i16,
    /// Primary weapon shot interval.
    pub shot_interval: Duration,
    /// Bullets per primary volley.
    pub multi_shot: u32,
    /// Bullet displacement per tick.
    pub bullet_speed: f32,
    /// Damage per burn pulse. Grows with each thermobaric level instead of
    /// staying at a flat one point; pulses always deal at least one.
    pub burn_damage: i16,
    /// Extra pierce granted to electromagnetic lances.
    pub pierce_bonus: u8,
}

impl CombatStats {
    fn from_tuning(tuning: &ProgressionTuning) -> Self {
        Self {
            damage: tuning.base_damage,
            shot_interval: tuning.shot_interval(),
            multi_shot: tuning.multi_shot,
            bullet_speed: tuning.bullet_speed,
            burn_damage: 0,
            pierce_bonus: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SkillSlot {
    level: u32,
    ready_in: Duration,
    period: Option<Duration>,
}

/// Player-facing progression of a run.
#[derive(Clone, Debug)]
pub struct ProgressionState {
    score: u32,
    experience: u32,
    threshold: u32,
    threshold_growth: f64,
    level: u32,
    health: i32,
    stats: CombatStats,
    skills: [SkillSlot; SkillId::CATALOG.len()],
    shot_ready_in: Duration,
    play_state: PlayState,
    offered: Vec<SkillId>,
}

impl ProgressionState {
    /// Creates the starting state of a run.
    #[must_use]
    pub fn new(tuning: &ProgressionTuning) -> Self {
        let skills = SkillId::CATALOG.map(|skill| SkillSlot {
            level: 0,
            ready_in: Duration::ZERO,
            period: cooldown_period(skill, tuning),
        });
        Self {
            score: 0,
            experience: 0,
            threshold: tuning.initial_threshold,
            threshold_growth: tuning.threshold_growth,
            level: 1,
            health: tuning.initial_health,
            stats: CombatStats::from_tuning(tuning),
            skills,
            shot_ready_in: Duration::ZERO,
            play_state: PlayState::Running,
            offered: Vec::new(),
        }
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Experience carried towards the next level.
    #[must_use]
    pub fn experience(&self) -> u32 {
        self.experience
    }

    /// Experience required for the next level.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Current level, starting at one.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Remaining turret health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Current combat stats.
    #[must_use]
    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    /// Lifecycle state of the run.
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Skills offered for the pending level-up.
    #[must_use]
    pub fn offered(&self) -> &[SkillId] {
        &self.offered
    }

    /// Number of times `skill` was chosen.
    #[must_use]
    pub fn skill_level(&self, skill: SkillId) -> u32 {
        self.skills[slot_index(skill)].level
    }

    /// Adds points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Adds experience and returns the new level when a level-up is triggered.
    ///
    /// Levelling only happens while running; experience gained during a pending
    /// choice is kept and re-checked once the choice resolves.
    pub fn gain_experience(&mut self, amount: u32) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        self.try_level_up()
    }

    /// Removes health and returns what is left, ending the run at zero.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health = self.health.saturating_sub(amount);
        if self.health <= 0 {
            self.play_state = PlayState::GameOver;
        }
        self.health
    }

    /// Records the skills presented for the pending level-up.
    pub fn present_choices(&mut self, choices: &[SkillId]) -> Result<(), SkillChoiceError> {
        if self.play_state != PlayState::AwaitingSkillChoice {
            return Err(SkillChoiceError::NotAwaitingChoice);
        }
        self.offered.clear();
        for &skill in choices {
            if !self.offered.contains(&skill) {
                self.offered.push(skill);
            }
        }
        Ok(())
    }

    /// Applies an offered skill and resumes the run.
    ///
    /// Returns the next level when leftover experience immediately triggers a
    /// further level-up.
    pub fn choose_skill(
        &mut self,
        skill: SkillId,
        tuning: &ProgressionTuning,
    ) -> Result<Option<u32>, SkillChoiceError> {
        if self.play_state != PlayState::AwaitingSkillChoice {
            return Err(SkillChoiceError::NotAwaitingChoice);
        }
        if !self.offered.contains(&skill) {
            return Err(SkillChoiceError::NotOffered);
        }

        apply_skill(self, skill, tuning);
        Ok(self.resume())
    }

    /// Resolves a level-up for which no skill could be offered.
    pub fn skip_choice(&mut self) -> Result<Option<u32>, SkillChoiceError> {
        if self.play_state != PlayState::AwaitingSkillChoice {
            return Err(SkillChoiceError::NotAwaitingChoice);
        }
        Ok(self.resume())
    }

    /// Reports whether `source` is armed and off cooldown.
    #[must_use]
    pub fn is_ready(&self, source: FireSource) -> bool {
        match source {
            FireSource::Primary => self.shot_ready_in.is_zero(),
            FireSource::Skill(skill) => {
                let slot = &self.skills[slot_index(skill)];
                slot.level > 0 && slot.period.is_some() && slot.ready_in.is_zero()
            }
        }
    }

    /// Restarts the cooldown of `source` after it fired.
    pub fn reset_cooldown(&mut self, source: FireSource) {
        match source {
            FireSource::Primary => self.shot_ready_in = self.stats.shot_interval,
            FireSource::Skill(skill) => {
                let slot = &mut self.skills[slot_index(skill)];
                if let Some(period) = slot.period {
                    slot.ready_in = period;
                }
            }
        }
    }

    /// Counts every cooldown down by `dt`.
    pub fn advance_cooldowns(&mut self, dt: Duration) {
        self.shot_ready_in = self.shot_ready_in.saturating_sub(dt);
        for slot in &mut self.skills {
            slot.ready_in = slot.ready_in.saturating_sub(dt);
        }
    }

    /// Cooldowns of the primary weapon and every acquired autonomous skill.
    #[must_use]
    pub fn cooldown_view(&self) -> CooldownView {
        let mut snapshots = vec![CooldownSnapshot {
            source: FireSource::Primary,
            ready_in: self.shot_ready_in,
        }];
        for (skill, slot) in SkillId::CATALOG.iter().zip(&self.skills) {
            if slot.level > 0 && slot.period.is_some() {
                snapshots.push(CooldownSnapshot {
                    source: FireSource::Skill(*skill),
                    ready_in: slot.ready_in,
                });
            }
        }
        CooldownView::from_snapshots(snapshots)
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            health: self.health,
            level: self.level,
            experience: self.experience,
            experience_to_next: self.threshold,
            play_state: self.play_state,
        }
    }

    fn try_level_up(&mut self) -> Option<u32> {
        if self.play_state != PlayState::Running || self.experience < self.threshold {
            return None;
        }
        self.experience -= self.threshold;
        self.level = self.level.saturating_add(1);
        self.play_state = PlayState::AwaitingSkillChoice;
        self.offered.clear();
        debug!(level = self.level, "level up");
        Some(self.level)
    }

    fn resume(&mut self) -> Option<u32> {
        self.threshold = scale_threshold(self.threshold, self.threshold_growth);
        self.offered.clear();
        self.play_state = PlayState::Running;
        self.try_level_up()
    }
}

/// Runs the stat mutation attached to `skill`.
pub fn apply_skill(state: &mut ProgressionState, skill: SkillId, tuning: &ProgressionTuning) {
    let slot = &mut state.skills[slot_index(skill)];
    slot.level = slot.level.saturating_add(1);

    let stats = &mut state.stats;
    match skill {
        SkillId::Thermobaric => {
            stats.burn_damage = stats.burn_damage.saturating_add(tuning.burn_damage_per_level);
            slot.ready_in = Duration::ZERO;
        }
        SkillId::Electromagnetic => {
            stats.pierce_bonus = stats.pierce_bonus.saturating_add(tuning.pierce_per_level);
            slot.ready_in = Duration::ZERO;
        }
        SkillId::DryIce => slot.ready_in = Duration::ZERO,
        SkillId::RapidFire => {
            stats.shot_interval = stats.shot_interval.mul_f64(tuning.rapid_fire_factor);
        }
        SkillId::DoubleTap => stats.multi_shot = stats.multi_shot.saturating_add(1),
    }
    debug!(?skill, level = slot.level, "skill applied");
}

/// Threshold after one level-up, `floor(threshold * growth)`.
#[must_use]
pub fn scale_threshold(threshold: u32, growth: f64) -> u32 {
    let scaled = (f64::from(threshold) * growth).floor();
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (scaled as u32).max(1)
    }
}

fn cooldown_period(skill: SkillId, tuning: &ProgressionTuning) -> Option<Duration> {
    let millis = match skill {
        SkillId::Thermobaric => tuning.thermobaric_cooldown_ms,
        SkillId::Electromagnetic => tuning.electromagnetic_cooldown_ms,
        SkillId::DryIce => tuning.dry_ice_cooldown_ms,
        SkillId::RapidFire | SkillId::DoubleTap => return None,
    };
    Some(Duration::from_millis(millis))
}

fn slot_index(skill: SkillId) -> usize {
    match skill {
        SkillId::Thermobaric => 0,
        SkillId::Electromagnetic => 1,
        SkillId::DryIce => 2,
        SkillId::RapidFire => 3,
        SkillId::DoubleTap => 4,
    }
}
