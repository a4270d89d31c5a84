//! Human-readable messages for session events and snapshots.

use tactics_core::{AppliedValue, SessionSnapshot, TurnEvent};

/// One line describing what happened.
pub fn describe_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::TurnStart { actor } => format!("{actor} takes control"),
        TurnEvent::TurnEnd { actor } => format!("{actor} ends its turn"),
        TurnEvent::PhaseChange { is_player_phase: true } => "== player phase ==".to_owned(),
        TurnEvent::PhaseChange {
            is_player_phase: false,
        } => "== enemy phase ==".to_owned(),
        TurnEvent::AvailableActionsChanged { actor, actions } if actions.is_empty() => {
            format!("{actor} has no available actions")
        }
        TurnEvent::AvailableActionsChanged { actor, actions } => {
            format!("{actor} can: {}", actions.join(", "))
        }
        TurnEvent::ActionModeChanged { active: true } => "action selection".to_owned(),
        TurnEvent::ActionModeChanged { active: false } => "movement".to_owned(),
        TurnEvent::ActionPerformed {
            actor,
            action,
            target,
            effect,
        } => {
            let on = target.map(|id| format!(" on {id}")).unwrap_or_default();
            format!("{actor} uses {action}{on}{}", describe_effect(effect))
        }
        TurnEvent::ActorDefeated { actor } => format!("{actor} is defeated"),
        TurnEvent::ActorMoved { actor, from, to } => format!("{actor} moves {from} -> {to}"),
    }
}

fn describe_effect(effect: &AppliedValue) -> String {
    match effect {
        AppliedValue::Damage { actual, .. } => format!(" for {actual} damage"),
        AppliedValue::Healing { actual, planned } if actual < planned => {
            format!(" restoring {actual} hp ({planned} planned)")
        }
        AppliedValue::Healing { actual, .. } => format!(" restoring {actual} hp"),
        AppliedValue::None => String::new(),
    }
}

/// Multi-line summary of the session.
pub fn describe_snapshot(snapshot: &SessionSnapshot) -> String {
    let turn = &snapshot.turn;
    let mut lines = vec![format!(
        "round {} | {} phase | mode {}",
        turn.round, turn.phase, turn.mode
    )];
    if let Some(action) = &turn.pending_action {
        lines.push(format!("pending: {action}"));
    }
    if let Some(remaining) = snapshot.transition_in {
        lines.push(format!("next phase in {} ms", remaining.as_millis()));
    }

    for actor in snapshot.roster.iter() {
        let marker = if turn.active == Some(actor.id) { '>' } else { ' ' };
        let side = if actor.player_controlled { "player" } else { "enemy" };
        let status = match actor.ledger() {
            _ if !actor.is_alive() => "defeated".to_owned(),
            Some(ledger) => format!(
                "hp {}/{} ap {} mp {}",
                ledger.health(),
                ledger.max_health(),
                ledger.action_points(),
                ledger.movement_points()
            ),
            None => "no stats".to_owned(),
        };
        lines.push(format!(
            "{marker} {} {:<10} {:<7} {:<8} at {} {}",
            actor.id, actor.name, side, actor.archetype, actor.position, status
        ));
    }
    lines.join("\n")
}
