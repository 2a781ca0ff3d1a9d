#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the enemy nearest to the turret.

use turret_survivor_core::{EnemyView, GroundPoint, PlayState};

/// Enemy selected as the aim point for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Dense pool index of the enemy, valid until the next removal.
    pub index: usize,
    /// Position of the enemy.
    pub position: GroundPoint,
    /// Squared distance between the enemy and the turret.
    pub distance_squared: f32,
}

/// Targeting system selecting the closest live enemy.
#[derive(Debug, Default)]
pub struct Targeting;

impl Targeting {
    /// Creates a new targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live enemy nearest to `turret`.
    ///
    /// Equal distances resolve to the lower pool index. Nothing is selected
    /// unless the run is in progress.
    #[must_use]
    pub fn handle(
        &mut self,
        play_state: PlayState,
        turret: GroundPoint,
        enemies: EnemyView<'_>,
    ) -> Option<Target> {
        if play_state != PlayState::Running {
            return None;
        }

        let mut best: Option<Target> = None;
        for enemy in enemies.iter() {
            if enemy.hit_points <= 0 {
                continue;
            }

            let candidate = Target {
                index: enemy.index,
                position: enemy.position,
                distance_squared: enemy.position.distance_squared(turret),
            };
            match &best {
                Some(existing) if !candidate.precedes(existing) => {}
                _ => best = Some(candidate),
            }
        }
        best
    }
}

impl Target {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_squared != other.distance_squared {
            return self.distance_squared < other.distance_squared;
        }
        self.index < other.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turret_survivor_core::StatusKind;

    const TURRET: GroundPoint = GroundPoint::new(0.0, 5.0);

    fn select(xs: &[f32], zs: &[f32], hit_points: &[i16]) -> Option<Target> {
        let status = vec![StatusKind::None; xs.len()];
        let ticks = vec![0; xs.len()];
        let view = EnemyView::new(xs, zs, hit_points, &status, &ticks);
        Targeting::new().handle(PlayState::Running, TURRET, view)
    }

    #[test]
    fn nearest_enemy_is_selected() {
        let target = select(&[0.0, 3.0, -8.0], &[-60.0, -10.0, -20.0], &[3, 3, 3])
            .expect("enemies present");
        assert_eq!(target.index, 1);
        assert_eq!(target.position, GroundPoint::new(3.0, -10.0));
        assert_eq!(target.distance_squared, 9.0 + 225.0);
    }

    #[test]
    fn equal_distances_prefer_lower_index() {
        let target = select(&[4.0, -4.0], &[-20.0, -20.0], &[3, 3]).expect("enemies present");
        assert_eq!(target.index, 0);
    }

    #[test]
    fn dead_enemies_are_skipped() {
        let target = select(&[0.0, 0.0], &[-1.0, -30.0], &[0, 3]).expect("one enemy alive");
        assert_eq!(target.index, 1);
    }

    #[test]
    fn empty_view_or_paused_run_selects_nothing() {
        assert!(select(&[], &[], &[]).is_none());

        let status = [StatusKind::None];
        let view = EnemyView::new(&[0.0], &[-10.0], &[3], &status, &[0]);
        let mut targeting = Targeting::new();
        assert!(targeting
            .handle(PlayState::AwaitingSkillChoice, TURRET, view)
            .is_none());
        assert!(targeting.handle(PlayState::GameOver, TURRET, view).is_none());
    }
}
