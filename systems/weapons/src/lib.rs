#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits volley commands from targeting data.

use turret_survivor_core::{Command, CooldownView, GroundPoint, PlayState};

/// Weapons system that queues a volley for every ready source.
#[derive(Debug, Default)]
pub struct Weapons {
    scratch: Vec<Command>,
}

impl Weapons {
    /// Creates a new weapons system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireVolley` entries for sources whose cooldown elapsed.
    ///
    /// Sources fire in cooldown-view order: the primary weapon first, then
    /// skills in catalog order.
    pub fn handle(
        &mut self,
        play_state: PlayState,
        cooldowns: CooldownView,
        target: Option<GroundPoint>,
        out: &mut Vec<Command>,
    ) {
        if play_state != PlayState::Running {
            return;
        }

        let Some(target) = target else {
            return;
        };

        self.scratch.clear();
        for snapshot in cooldowns.iter() {
            if snapshot.ready_in.is_zero() {
                self.scratch.push(Command::FireVolley {
                    source: snapshot.source,
                    target,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use turret_survivor_core::{CooldownSnapshot, FireSource, SkillId};

    const TARGET: GroundPoint = GroundPoint::new(2.0, -30.0);

    fn snapshot(source: FireSource, ready_in_ms: u64) -> CooldownSnapshot {
        CooldownSnapshot {
            source,
            ready_in: Duration::from_millis(ready_in_ms),
        }
    }

    #[test]
    fn paused_run_is_silent() {
        let mut system = Weapons::new();
        let cooldowns = CooldownView::from_snapshots(vec![snapshot(FireSource::Primary, 0)]);
        let mut out = Vec::new();

        system.handle(
            PlayState::AwaitingSkillChoice,
            cooldowns,
            Some(TARGET),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn missing_target_holds_fire() {
        let mut system = Weapons::new();
        let cooldowns = CooldownView::from_snapshots(vec![snapshot(FireSource::Primary, 0)]);
        let mut out = Vec::new();

        system.handle(PlayState::Running, cooldowns, None, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn ready_sources_fire_in_catalog_order() {
        let mut system = Weapons::new();
        let cooldowns = CooldownView::from_snapshots(vec![
            snapshot(FireSource::Skill(SkillId::DryIce), 0),
            snapshot(FireSource::Skill(SkillId::Electromagnetic), 1_200),
            snapshot(FireSource::Primary, 0),
            snapshot(FireSource::Skill(SkillId::Thermobaric), 0),
        ]);
        let mut out = Vec::new();

        system.handle(PlayState::Running, cooldowns, Some(TARGET), &mut out);

        assert_eq!(
            out,
            vec![
                Command::FireVolley {
                    source: FireSource::Primary,
                    target: TARGET,
                },
                Command::FireVolley {
                    source: FireSource::Skill(SkillId::Thermobaric),
                    target: TARGET,
                },
                Command::FireVolley {
                    source: FireSource::Skill(SkillId::DryIce),
                    target: TARGET,
                },
            ],
        );
    }
}
