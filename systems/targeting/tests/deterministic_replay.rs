use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use turret_survivor_core::{Command, GroundPoint};
use turret_survivor_system_targeting::{Target, Targeting};
use turret_survivor_world::{self as world, query, World};

#[test]
fn deterministic_replay_tracks_the_closest_enemy() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());

    let selected: Vec<_> = first.targets.iter().flatten().collect();
    assert!(!selected.is_empty(), "expected at least one target");
    assert!(first.targets[0].is_none(), "no enemy before the first spawn");
}

#[test]
fn approaching_enemy_overtakes_a_stationary_one() {
    let mut world = World::new();
    let mut events = Vec::new();
    for (x, z, speed) in [(0.0, -20.0, 0.0), (10.0, -40.0, 1.0)] {
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                position: GroundPoint::new(x, z),
                hit_points: 3,
                speed,
            },
            &mut events,
        );
    }

    let mut targeting = Targeting::new();
    let aim = |world: &World, targeting: &mut Targeting| {
        targeting
            .handle(
                query::play_state(world),
                query::turret(world),
                query::enemy_view(world),
            )
            .map(|target| target.index)
    };

    assert_eq!(aim(&world, &mut targeting), Some(0));
    for _ in 0..30 {
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
    }
    assert_eq!(aim(&world, &mut targeting), Some(1));
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut targeting = Targeting::new();
    let mut targets = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        let target = targeting.handle(
            query::play_state(&world),
            query::turret(&world),
            query::enemy_view(&world),
        );
        targets.push(target.map(TargetRecord::from));
    }

    ReplayOutcome { targets }
}

fn scripted_commands() -> Vec<Command> {
    let tick = Command::Tick {
        dt: Duration::from_millis(16),
    };
    let mut commands = vec![tick.clone()];
    for (x, z, speed) in [(-12.0, -60.0, 0.03), (4.0, -60.0, 0.035), (9.5, -60.0, 0.021)] {
        commands.push(Command::SpawnEnemy {
            position: GroundPoint::new(x, z),
            hit_points: 3,
            speed,
        });
        commands.extend(std::iter::repeat(tick.clone()).take(40));
    }
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    targets: Vec<Option<TargetRecord>>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TargetRecord {
    index: usize,
    x_bits: u32,
    z_bits: u32,
    distance_bits: u32,
}

impl From<Target> for TargetRecord {
    fn from(target: Target) -> Self {
        Self {
            index: target.index,
            x_bits: target.position.x().to_bits(),
            z_bits: target.position.z().to_bits(),
            distance_bits: target.distance_squared.to_bits(),
        }
    }
}
