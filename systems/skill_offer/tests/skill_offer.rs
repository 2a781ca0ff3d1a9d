use std::{collections::BTreeSet, time::Duration};

use turret_survivor_core::{Command, Event, FireSource, GroundPoint, PlayState, SkillId, Tuning};
use turret_survivor_system_skill_offer::{Config, SkillOffer};
use turret_survivor_world::{self as world, query, World};

/// Kills a single enemy in a world whose first level needs one kill.
fn world_after_first_kill() -> (World, Vec<Event>) {
    let mut tuning = Tuning::default();
    tuning.progression.initial_threshold = 20;
    let mut world = World::with_tuning(tuning);
    let target = GroundPoint::new(0.0, -10.0);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            position: target,
            hit_points: 1,
            speed: 0.0,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::FireVolley {
            source: FireSource::Primary,
            target,
        },
        &mut events,
    );

    for _ in 0..60 {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        if query::play_state(&world) != PlayState::Running {
            break;
        }
    }
    (world, events)
}

#[test]
fn same_seed_draws_the_same_sequence() {
    let mut first = SkillOffer::new(Config::new(3, 0xfeed));
    let mut second = SkillOffer::new(Config::new(3, 0xfeed));

    let first_draws: Vec<_> = (0..20).map(|_| first.present_choices()).collect();
    let second_draws: Vec<_> = (0..20).map(|_| second.present_choices()).collect();

    assert_eq!(first_draws, second_draws);
}

#[test]
fn every_catalog_entry_is_eventually_offered() {
    let mut offer = SkillOffer::new(Config::new(3, 0x0ff3));
    let mut seen = BTreeSet::new();

    for _ in 0..200 {
        seen.extend(offer.present_choices());
    }

    let catalog: BTreeSet<_> = SkillId::CATALOG.iter().copied().collect();
    assert_eq!(seen, catalog);
}

#[test]
fn offered_choices_are_published_by_the_world() {
    let (mut world, events) = world_after_first_kill();
    assert!(events.contains(&Event::LevelUp { level: 2 }));

    let mut offer = SkillOffer::new(Config::new(3, 0xabc));
    let mut commands = Vec::new();
    offer.handle(&events, &mut commands);
    assert_eq!(commands.len(), 1);

    let mut published = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut published);
    }

    let offered = query::offered_skills(&world).to_vec();
    assert_eq!(offered.len(), 3);
    assert_eq!(
        published,
        vec![Event::SkillChoicesOffered {
            choices: offered.iter().map(|skill| skill.descriptor()).collect(),
        }]
    );
    assert_eq!(query::play_state(&world), PlayState::AwaitingSkillChoice);
}

#[test]
fn offers_outside_a_level_up_are_ignored() {
    let mut world = World::new();
    let mut offer = SkillOffer::new(Config::new(3, 0xabc));
    let mut commands = Vec::new();
    offer.handle(&[Event::LevelUp { level: 2 }], &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert!(events.is_empty());
    assert_eq!(query::play_state(&world), PlayState::Running);
    assert!(query::offered_skills(&world).is_empty());
}
