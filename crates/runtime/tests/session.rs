use std::time::Duration;

use tactics_content::ScenarioLoader;
use tactics_core::{
    Action, Actor, ActorId, Archetype, CommandError, Direction, MapDimensions, Phase, Position,
    Roster, TurnConfig, TurnEvent, TurnMode,
};
use tactics_runtime::{Runtime, RuntimeError, Topic};
use tokio::time::Instant;

const DELAY: Duration = Duration::from_millis(500);

fn roster() -> Roster {
    Roster::new(vec![
        Actor::new(ActorId(1), "Ada", true, Archetype::Warrior, Position::new(0, 0)),
        Actor::new(ActorId(2), "Bo", true, Archetype::Warrior, Position::new(0, 2)),
        Actor::new(ActorId(3), "Grub", false, Archetype::Monster, Position::new(5, 5)),
    ])
    .expect("valid roster")
}

async fn start() -> Runtime {
    Runtime::builder()
        .turn_config(
            TurnConfig::new()
                .with_auto_end(false, false)
                .with_phase_transition_delay(DELAY),
        )
        .roster(roster())
        .map(MapDimensions::new(8, 8))
        .build()
        .await
        .expect("runtime should build")
}

#[tokio::test(start_paused = true)]
async fn enemy_phase_hands_back_after_delay() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    let started = Instant::now();
    let phase = handle.force_end_phase().await.expect("force end");
    assert_eq!(phase, Phase::Enemy);

    let mut seen = Vec::new();
    loop {
        let event = turn_rx.recv().await.expect("turn event");
        seen.push(event.event.clone());
        if event.event == (TurnEvent::PhaseChange { is_player_phase: true }) {
            break;
        }
    }
    assert!(started.elapsed() >= DELAY);
    assert_eq!(
        &seen[..3],
        &[
            TurnEvent::TurnEnd { actor: ActorId(1) },
            TurnEvent::PhaseChange { is_player_phase: false },
            TurnEvent::TurnStart { actor: ActorId(3) },
        ]
    );
    assert_eq!(
        turn_rx.recv().await.expect("turn start").event,
        TurnEvent::TurnStart { actor: ActorId(1) }
    );

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.turn.phase, Phase::Player);
    assert_eq!(snapshot.turn.round, 2);
    assert_eq!(snapshot.transition_in, None);
}

#[tokio::test(start_paused = true)]
async fn rejected_command_leaves_session_untouched() {
    let runtime = start().await;
    let handle = runtime.handle();
    let before = handle.snapshot().await.expect("snapshot");

    let error = handle
        .move_actor(Direction::West)
        .await
        .expect_err("west of the origin is off the map");
    assert!(error.is_rejection());
    assert_eq!(
        error.as_command_error(),
        Some(&CommandError::OutOfBounds {
            position: Position::new(-1, 0)
        })
    );

    let error = handle
        .select_action("wait")
        .await
        .expect_err("not in action mode");
    assert!(matches!(
        error,
        RuntimeError::Command(CommandError::WrongMode {
            actual: TurnMode::Movement,
            ..
        })
    ));

    let after = handle.snapshot().await.expect("snapshot");
    assert_eq!(after.turn, before.turn);
    assert_eq!(after.roster, before.roster);
}

#[tokio::test(start_paused = true)]
async fn moves_are_published_on_the_action_topic() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut action_rx = handle.subscribe(Topic::Action);
    let mut turn_rx = handle.subscribe(Topic::Turn);

    let to = handle.move_actor(Direction::North).await.expect("move");
    assert_eq!(to, Position::new(0, 1));

    let event = action_rx.recv().await.expect("action event");
    assert_eq!(event.topic(), Topic::Action);
    assert_eq!(
        event.event,
        TurnEvent::ActorMoved {
            actor: ActorId(1),
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }
    );
    assert!(turn_rx.try_recv().is_err());

    // Bo blocks the next step north.
    let error = handle.move_actor(Direction::North).await.expect_err("occupied");
    assert_eq!(
        error.as_command_error(),
        Some(&CommandError::Occupied {
            position: Position::new(0, 2),
            occupant: ActorId(2),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn actions_resolve_by_alias() {
    let runtime = start().await;
    let handle = runtime.handle();

    assert!(handle.toggle_action_mode().await.expect("toggle"));
    let outcome = handle
        .select_action("skip")
        .await
        .expect("wait is available")
        .expect("untargeted actions resolve at once");
    assert_eq!(outcome.action, Action::WAIT);
    assert_eq!(outcome.actor, ActorId(1));

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.turn.mode, TurnMode::Movement);
    assert_eq!(snapshot.turn.active, Some(ActorId(1)));
}

#[tokio::test(start_paused = true)]
async fn catalog_edits_apply_to_later_commands() {
    let runtime = start().await;
    let handle = runtime.handle();

    let removed = handle.unregister_action(Action::DEFEND).await.expect("unregister");
    assert_eq!(removed.map(|action| action.name().to_owned()).as_deref(), Some(Action::DEFEND));
    let available = handle.available_actions().await.expect("available");
    assert!(!available.iter().any(|name| name == Action::DEFEND));

    let replaced = handle
        .register_action(Action::no_target(Action::DEFEND))
        .await
        .expect("register");
    assert!(replaced.is_none());
    let available = handle.available_actions().await.expect("available");
    assert!(available.iter().any(|name| name == Action::DEFEND));
}

#[tokio::test(start_paused = true)]
async fn cycling_moves_control_between_players() {
    let runtime = start().await;
    let handle = runtime.handle();

    assert_eq!(handle.cycle_actor().await.expect("cycle"), ActorId(2));
    assert_eq!(handle.cycle_actor().await.expect("cycle"), ActorId(1));
    handle.end_actor_turn().await.expect("end turn");

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.turn.active, Some(ActorId(2)));
}

#[tokio::test(start_paused = true)]
async fn builds_from_embedded_scenario() {
    let scenario = ScenarioLoader::embedded().expect("embedded scenario");
    let runtime = Runtime::builder()
        .scenario(scenario)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.turn.phase, Phase::Player);
    assert_eq!(snapshot.turn.round, 1);
    assert!(snapshot.turn.active.is_some());

    drop(handle);
    runtime.shutdown().await.expect("worker should stop cleanly");
}

#[tokio::test]
async fn build_requires_roster_and_map() {
    let missing_map = Runtime::builder().roster(roster()).build().await;
    assert!(matches!(missing_map, Err(RuntimeError::MissingMap)));

    let missing_roster = Runtime::builder().map(MapDimensions::new(4, 4)).build().await;
    assert!(matches!(missing_roster, Err(RuntimeError::MissingRoster)));
}

#[tokio::test]
async fn build_rejects_roster_without_living_player() {
    let roster = Roster::new(vec![Actor::new(
        ActorId(9),
        "Lonely",
        false,
        Archetype::Monster,
        Position::new(1, 1),
    )])
    .expect("valid roster");

    let result = Runtime::builder()
        .roster(roster)
        .map(MapDimensions::new(4, 4))
        .build()
        .await;
    assert!(matches!(result, Err(RuntimeError::InitialState(_))));
}
