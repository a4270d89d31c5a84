use std::sync::{Arc, Mutex};
use std::time::Duration;

use tactics_core::{
    Action, ActionCatalog, Actor, ActorId, AppliedValue, Archetype, CommandError, Direction,
    MapDimensions, Phase, Position, ResourceLedger, Roster, StatBlock, TargetRef, TurnConfig,
    TurnCoordinator, TurnEnv, TurnEvent, TurnMode,
};

const MAP: MapDimensions = MapDimensions::new(8, 8);

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn player(id: u32, x: i32, y: i32, stats: StatBlock) -> Actor {
    Actor::new(ActorId(id), format!("p{id}"), true, Archetype::Warrior, Position::new(x, y))
        .with_stats(stats)
}

fn enemy(id: u32, x: i32, y: i32) -> Actor {
    Actor::new(ActorId(id), format!("e{id}"), false, Archetype::Monster, Position::new(x, y))
}

/// Enemy that starts the session with both pools drained.
fn drained_enemy(id: u32, x: i32, y: i32) -> Actor {
    enemy(id, x, y).with_ledger(
        ResourceLedger::new(Archetype::Monster.default_stats())
            .with_action_points(0)
            .with_movement_points(0),
    )
}

fn record(coordinator: &mut TurnCoordinator) -> Arc<Mutex<Vec<TurnEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    coordinator.subscribe(move |event: &TurnEvent| sink.lock().unwrap().push(event.clone()));
    events
}

fn phase_changes(events: &[TurnEvent], is_player: bool) -> usize {
    events
        .iter()
        .filter(|event| {
            matches!(event, TurnEvent::PhaseChange { is_player_phase } if *is_player_phase == is_player)
        })
        .count()
}

/// Moves one tile and waits, spending one movement and one action point.
fn move_and_wait(coordinator: &mut TurnCoordinator, env: TurnEnv<'_>, direction: Direction) {
    coordinator.move_active(env, direction).unwrap();
    coordinator.enter_action_select(env).unwrap();
    coordinator.select_action(env, "wait").unwrap();
}

fn two_player_session(config: TurnConfig) -> TurnCoordinator {
    let thin = StatBlock::new(100, 1, 1, 10, 0, 0);
    let roster = Roster::new(vec![
        player(1, 0, 0, thin),
        player(2, 0, 2, thin),
        drained_enemy(3, 7, 7),
        drained_enemy(4, 6, 7),
    ])
    .unwrap();
    TurnCoordinator::new(roster, config)
}

#[test]
fn start_turn_restores_points_and_selects() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let roster = Roster::new(vec![
        player(1, 0, 0, Archetype::Warrior.default_stats()),
        enemy(2, 7, 7),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new().with_auto_end(false, false));
    coordinator.start().unwrap();

    move_and_wait(&mut coordinator, env, Direction::North);
    coordinator.move_active(env, Direction::North).unwrap();
    let spent = coordinator.active_actor().unwrap();
    assert_eq!((spent.movement_points(), spent.action_points()), (2, 1));

    coordinator.start_turn(ActorId(1)).unwrap();
    let actor = coordinator.active_actor().unwrap();
    let ledger = actor.ledger().unwrap();
    assert_eq!(ledger.movement_points(), ledger.max_movement_points());
    assert_eq!(ledger.action_points(), ledger.max_action_points());
    assert!(actor.is_alive());
    assert!(actor.is_selected());
    assert_eq!(coordinator.turn().mode, TurnMode::Movement);
}

#[test]
fn cycling_never_selects_a_dead_actor() {
    let stats = Archetype::Warrior.default_stats();
    let fallen = player(2, 1, 0, stats).with_ledger(ResourceLedger::new(stats).with_health(0));
    let roster = Roster::new(vec![
        player(1, 0, 0, stats),
        fallen,
        player(3, 2, 0, stats),
        enemy(4, 7, 7),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new());
    coordinator.start().unwrap();

    for expected in [3, 1, 3, 1] {
        assert_eq!(coordinator.cycle_actor(), Ok(ActorId(expected)));
        assert!(!coordinator.roster().get(ActorId(2)).unwrap().is_selected());
    }
}

#[test]
fn both_toggles_wait_for_both_pools_before_ending() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let roster = Roster::new(vec![
        player(1, 0, 0, StatBlock::new(100, 1, 1, 35, 0, 0)),
        player(2, 0, 3, Archetype::Warrior.default_stats()),
        enemy(3, 2, 0),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new().with_auto_end(true, true));
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    coordinator.move_active(env, Direction::East).unwrap();
    let actor = coordinator.active_actor().unwrap();
    assert_eq!(actor.id, ActorId(1));
    assert_eq!((actor.movement_points(), actor.action_points()), (0, 1));

    coordinator.enter_action_select(env).unwrap();
    assert!(coordinator.select_action(env, "attack").unwrap().is_none());
    assert_eq!(coordinator.turn().mode, TurnMode::TargetSelect);
    let outcome = coordinator
        .select_target(env, TargetRef::Id(ActorId(3)))
        .unwrap()
        .expect("attack resolves");
    assert_eq!(outcome.effect, AppliedValue::Damage { planned: 35, actual: 32 });
    assert_eq!(coordinator.roster().get(ActorId(3)).unwrap().ledger().unwrap().health(), 48);

    assert_eq!(coordinator.turn().active, Some(ActorId(2)));
    let events = events.lock().unwrap();
    assert_eq!(
        events[events.len() - 2..],
        [
            TurnEvent::TurnEnd { actor: ActorId(1) },
            TurnEvent::TurnStart { actor: ActorId(2) },
        ]
    );
}

#[test]
fn movement_toggle_alone_ends_turn_on_last_step() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let roster = Roster::new(vec![
        player(1, 0, 0, StatBlock::new(100, 2, 1, 35, 0, 0)),
        player(2, 5, 0, Archetype::Warrior.default_stats()),
        enemy(3, 7, 7),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new().with_auto_end(true, false));
    coordinator.start().unwrap();

    coordinator.move_active(env, Direction::North).unwrap();
    assert_eq!(coordinator.turn().active, Some(ActorId(2)));
    assert_eq!(coordinator.roster().get(ActorId(1)).unwrap().action_points(), 2);
}

#[test]
fn exhausted_phase_transitions_once_after_delay() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let config = TurnConfig::new()
        .with_phase_transition_delay(ms(500))
        .with_enemy_phase_auto_pass(false);
    let mut coordinator = two_player_session(config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    move_and_wait(&mut coordinator, env, Direction::North);
    assert_eq!(coordinator.turn().active, Some(ActorId(2)));
    move_and_wait(&mut coordinator, env, Direction::East);

    assert_eq!(coordinator.time_until_transition(), Some(ms(500)));
    assert!(!coordinator.advance(ms(499)));
    assert_eq!(coordinator.turn().phase, Phase::Player);

    assert!(coordinator.advance(ms(1)));
    assert_eq!(coordinator.turn().phase, Phase::Enemy);
    assert_eq!(coordinator.turn().active, Some(ActorId(3)));
    for id in [3, 4] {
        let ledger = coordinator.roster().get(ActorId(id)).unwrap().ledger().unwrap();
        assert_eq!(ledger.action_points(), ledger.max_action_points());
        assert_eq!(ledger.movement_points(), ledger.max_movement_points());
    }
    for id in [1, 2] {
        assert!(!coordinator.roster().get(ActorId(id)).unwrap().is_selected());
    }

    assert!(!coordinator.advance(ms(10_000)));
    let events = events.lock().unwrap();
    assert_eq!(phase_changes(&events, false), 1);
    assert!(events.ends_with(&[
        TurnEvent::PhaseChange { is_player_phase: false },
        TurnEvent::TurnStart { actor: ActorId(3) },
    ]));
}

#[test]
fn ended_phase_keeps_its_deadline() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let config = TurnConfig::new()
        .with_phase_transition_delay(ms(500))
        .with_enemy_phase_auto_pass(false);
    let mut coordinator = two_player_session(config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    move_and_wait(&mut coordinator, env, Direction::North);
    move_and_wait(&mut coordinator, env, Direction::East);
    assert!(!coordinator.advance(ms(200)));

    assert_eq!(coordinator.end_actor_turn(), Err(CommandError::NoActiveActor));
    assert_eq!(coordinator.time_until_transition(), Some(ms(300)));
    assert!(!coordinator.advance(ms(299)));
    assert!(coordinator.advance(ms(1)));
    assert!(!coordinator.advance(ms(10_000)));

    assert_eq!(phase_changes(&events.lock().unwrap(), false), 1);
}

#[test]
fn ended_actor_cannot_act_while_transition_waits() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let roster = Roster::new(vec![
        player(1, 0, 0, Archetype::Warrior.default_stats()),
        enemy(2, 7, 7),
    ])
    .unwrap();
    let config = TurnConfig::new()
        .with_phase_transition_delay(ms(500))
        .with_enemy_phase_auto_pass(false);
    let mut coordinator = TurnCoordinator::new(roster, config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    coordinator.end_actor_turn().unwrap();
    assert_eq!(coordinator.turn().active, None);
    assert!(!coordinator.roster().get(ActorId(1)).unwrap().is_selected());
    assert!(coordinator.available_actions(env).is_empty());

    let before = coordinator.snapshot();
    assert_eq!(coordinator.enter_action_select(env), Err(CommandError::NoActiveActor));
    assert_eq!(coordinator.select_action(env, "wait"), Err(CommandError::NoActiveActor));
    assert_eq!(
        coordinator.move_active(env, Direction::North),
        Err(CommandError::NoActiveActor)
    );
    assert_eq!(coordinator.cycle_actor(), Err(CommandError::NoActiveActor));
    assert_eq!(coordinator.start_turn(ActorId(1)), Err(CommandError::NoActiveActor));
    assert_eq!(coordinator.end_actor_turn(), Err(CommandError::NoActiveActor));
    assert_eq!(coordinator.snapshot(), before);

    assert!(coordinator.advance(ms(500)));
    assert_eq!(coordinator.turn().phase, Phase::Enemy);
    assert_eq!(coordinator.turn().active, Some(ActorId(2)));

    let events = events.lock().unwrap();
    let turn_ends = events
        .iter()
        .filter(|event| matches!(event, TurnEvent::TurnEnd { actor: ActorId(1) }))
        .count();
    assert_eq!(turn_ends, 1);
    assert!(!events.iter().any(|event| matches!(event, TurnEvent::ActionPerformed { .. })));
}

#[test]
fn auto_end_skips_actors_whose_policy_is_already_met() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let one_step = StatBlock::new(100, 2, 1, 35, 0, 0);
    let roster = Roster::new(vec![
        player(1, 0, 0, one_step),
        player(2, 3, 0, one_step),
        player(3, 6, 0, Archetype::Warrior.default_stats()),
        enemy(4, 7, 7),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new().with_auto_end(true, false));
    coordinator.start().unwrap();

    assert_eq!(coordinator.cycle_actor(), Ok(ActorId(2)));
    coordinator.move_active(env, Direction::North).unwrap();
    assert_eq!(coordinator.turn().active, Some(ActorId(3)));
    assert_eq!(coordinator.cycle_actor(), Ok(ActorId(1)));

    // #2 still has action points, but its movement is spent.
    coordinator.move_active(env, Direction::North).unwrap();
    assert_eq!(coordinator.turn().active, Some(ActorId(3)));
    assert_eq!(coordinator.roster().get(ActorId(2)).unwrap().action_points(), 2);
}

#[test]
fn force_end_races_scheduled_transition() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let config = TurnConfig::new()
        .with_phase_transition_delay(ms(500))
        .with_enemy_phase_auto_pass(false);
    let mut coordinator = two_player_session(config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    move_and_wait(&mut coordinator, env, Direction::North);
    move_and_wait(&mut coordinator, env, Direction::East);
    assert!(coordinator.pending_transition().is_some());

    assert_eq!(coordinator.force_end_phase(), Ok(Phase::Enemy));
    assert!(coordinator.pending_transition().is_none());
    assert!(!coordinator.advance(ms(1_000)));

    assert_eq!(phase_changes(&events.lock().unwrap(), false), 1);
}

#[test]
fn force_end_ignores_remaining_points() {
    let config = TurnConfig::new().with_phase_transition_delay(Duration::ZERO);
    let mut coordinator = two_player_session(config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    // Zero delay: the enemy phase passes straight back to the players.
    assert_eq!(coordinator.force_end_phase(), Ok(Phase::Enemy));
    assert_eq!(coordinator.turn().phase, Phase::Player);
    assert_eq!(coordinator.turn().round, 2);
    assert_eq!(coordinator.turn().active, Some(ActorId(1)));

    let events = events.lock().unwrap();
    assert_eq!(events[2], TurnEvent::TurnEnd { actor: ActorId(1) });
    assert_eq!(phase_changes(&events, false), 1);
    assert_eq!(phase_changes(&events, true), 2);
}

#[test]
fn moves_respect_bounds_blocking_and_points() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let roster = Roster::new(vec![
        player(1, 0, 0, StatBlock::new(100, 1, 1, 10, 0, 0)),
        enemy(2, 1, 0),
    ])
    .unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new().with_auto_end(false, false));
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    assert_eq!(
        coordinator.move_active(env, Direction::South),
        Err(CommandError::OutOfBounds { position: Position::new(0, -1) })
    );
    assert_eq!(
        coordinator.move_active(env, Direction::West),
        Err(CommandError::OutOfBounds { position: Position::new(-1, 0) })
    );
    assert!(matches!(
        coordinator.move_active(env, Direction::East),
        Err(CommandError::Occupied { occupant: ActorId(2), .. })
    ));

    assert_eq!(coordinator.move_active(env, Direction::North), Ok(Position::new(0, 1)));
    assert_eq!(
        coordinator.move_active(env, Direction::North),
        Err(CommandError::NoMovementPoints { actor: ActorId(1) })
    );

    coordinator.enter_action_select(env).unwrap();
    assert!(matches!(
        coordinator.move_active(env, Direction::North),
        Err(CommandError::WrongMode { .. })
    ));

    let moved: Vec<_> = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, TurnEvent::ActorMoved { .. }))
        .cloned()
        .collect();
    assert_eq!(
        moved,
        vec![TurnEvent::ActorMoved {
            actor: ActorId(1),
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }]
    );
}

#[test]
fn targets_can_be_picked_by_index() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let archer = Actor::new(ActorId(1), "Ivy", true, Archetype::Archer, Position::ORIGIN);
    let roster = Roster::new(vec![archer, enemy(3, 2, 0), enemy(4, 0, 3), enemy(5, 5, 5)]).unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new());
    coordinator.start().unwrap();

    coordinator.enter_action_select(env).unwrap();
    assert_eq!(coordinator.select_action(env, "shoot"), Ok(None));
    assert_eq!(coordinator.turn().pending_action.as_deref(), Some(Action::RANGED_ATTACK));
    assert_eq!(coordinator.pending_targets(env), vec![ActorId(3), ActorId(4)]);

    assert_eq!(
        coordinator.select_target(env, TargetRef::Index(5)),
        Err(CommandError::UnknownTarget { target: TargetRef::Index(5) })
    );
    assert_eq!(
        coordinator.select_target(env, TargetRef::Id(ActorId(99))),
        Err(CommandError::UnknownTarget { target: TargetRef::Id(ActorId(99)) })
    );
    assert_eq!(coordinator.turn().mode, TurnMode::TargetSelect);

    let outcome = coordinator
        .select_target(env, TargetRef::Index(1))
        .unwrap()
        .expect("ranged attack resolves");
    assert_eq!(outcome.target, Some(ActorId(4)));
    assert_eq!(coordinator.roster().get(ActorId(4)).unwrap().ledger().unwrap().health(), 58);
    assert_eq!(coordinator.turn().mode, TurnMode::Movement);
    assert!(coordinator.turn().pending_action.is_none());
}

#[test]
fn invalid_target_resolves_as_no_op() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let archer = Actor::new(ActorId(1), "Ivy", true, Archetype::Archer, Position::ORIGIN);
    let roster = Roster::new(vec![archer, enemy(3, 2, 0), enemy(5, 5, 5)]).unwrap();
    let mut coordinator = TurnCoordinator::new(roster, TurnConfig::new());
    coordinator.start().unwrap();

    coordinator.enter_action_select(env).unwrap();
    coordinator.select_action(env, Action::RANGED_ATTACK).unwrap();
    let out_of_range = coordinator.select_target(env, TargetRef::Id(ActorId(5)));

    assert_eq!(out_of_range, Ok(None));
    assert_eq!(coordinator.roster().get(ActorId(5)).unwrap().ledger().unwrap().health(), 80);
    assert_eq!(coordinator.active_actor().unwrap().action_points(), 2);
    assert_eq!(coordinator.turn().mode, TurnMode::Movement);
}

#[test]
fn defeated_enemy_is_skipped_in_its_phase() {
    let catalog = ActionCatalog::with_defaults();
    let env = TurnEnv::new(&catalog, &MAP);
    let brute = StatBlock::new(100, 2, 4, 200, 0, 0);
    let roster = Roster::new(vec![player(1, 0, 0, brute), enemy(2, 1, 0), enemy(3, 7, 7)]).unwrap();
    let config = TurnConfig::new().with_enemy_phase_auto_pass(false);
    let mut coordinator = TurnCoordinator::new(roster, config);
    let events = record(&mut coordinator);
    coordinator.start().unwrap();

    coordinator.enter_action_select(env).unwrap();
    coordinator.select_action(env, "strike").unwrap();
    let outcome = coordinator.select_target(env, TargetRef::Index(0)).unwrap().unwrap();
    assert_eq!(outcome.defeated, Some(ActorId(2)));
    assert!(events.lock().unwrap().contains(&TurnEvent::ActorDefeated { actor: ActorId(2) }));

    coordinator.force_end_phase().unwrap();
    assert_eq!(coordinator.turn().active, Some(ActorId(3)));
    assert_eq!(coordinator.cycle_actor(), Ok(ActorId(3)));
}
