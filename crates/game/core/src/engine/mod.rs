//! Turn coordination: the phase/actor state machine.
//!
//! [`TurnCoordinator`] is the single authority over a session. It owns the
//! [`Roster`] and [`TurnState`], validates every command against the current
//! mode, and publishes a [`TurnEvent`] for each observable change. Commands
//! that consult the action catalog or the map borrow them through a
//! [`TurnEnv`] for the duration of the call.
//!
//! Delayed phase transitions run on the coordinator's own session clock,
//! which callers move forward with [`TurnCoordinator::advance`].

mod errors;
mod events;
mod timer;

pub use errors::{CommandError, TargetRef};
pub use events::{EventSink, ObserverId, ObserverRegistry, TurnEvent, TurnObserver};
pub use timer::{PendingTransition, PhaseTimer};

use core::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::action::{Action, ActionCatalog, ActionOutcome};
use crate::config::TurnConfig;
use crate::env::MapOracle;
use crate::error::GameError;
use crate::state::{
    Actor, ActorId, Direction, InitializationError, Phase, Position, Roster, TurnMode, TurnState,
};

/// Read-only collaborators a command may consult.
#[derive(Clone, Copy)]
pub struct TurnEnv<'a> {
    pub catalog: &'a ActionCatalog,
    pub map: &'a dyn MapOracle,
}

impl<'a> TurnEnv<'a> {
    pub fn new(catalog: &'a ActionCatalog, map: &'a dyn MapOracle) -> Self {
        Self { catalog, map }
    }
}

/// Point-in-time copy of a session, detached from the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub turn: TurnState,
    pub roster: Roster,
    pub clock: Duration,
    /// Time left before a scheduled phase transition fires.
    pub transition_in: Option<Duration>,
}

/// Drives actor turns and phase changes for one session.
pub struct TurnCoordinator {
    roster: Roster,
    turn: TurnState,
    config: TurnConfig,
    timer: PhaseTimer,
    clock: Duration,
    observers: ObserverRegistry,
    started: bool,
}

impl TurnCoordinator {
    pub fn new(roster: Roster, config: TurnConfig) -> Self {
        Self {
            roster,
            turn: TurnState::new(),
            config,
            timer: PhaseTimer::new(),
            clock: Duration::ZERO,
            observers: ObserverRegistry::new(),
            started: false,
        }
    }

    pub fn subscribe(&mut self, observer: impl TurnObserver + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Current session-clock reading.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn active_actor(&self) -> Option<&Actor> {
        self.turn.active.and_then(|id| self.roster.get(id))
    }

    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.timer.pending()
    }

    pub fn time_until_transition(&self) -> Option<Duration> {
        self.timer.remaining(self.clock)
    }

    /// Actions the active actor could perform right now.
    pub fn available_actions(&self, env: TurnEnv<'_>) -> Vec<String> {
        self.active_actor()
            .map(|actor| env.catalog.available_actions(actor, &self.roster))
            .unwrap_or_default()
    }

    /// Valid targets of the action awaiting a target, in roster order.
    pub fn pending_targets(&self, env: TurnEnv<'_>) -> Vec<ActorId> {
        let pending = self
            .turn
            .pending_action
            .as_deref()
            .and_then(|name| env.catalog.get(name));
        match (pending, self.active_actor()) {
            (Some(action), Some(actor)) => action.valid_targets(actor, &self.roster),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turn: self.turn.clone(),
            roster: self.roster.clone(),
            clock: self.clock,
            transition_in: self.time_until_transition(),
        }
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Opens the first player phase and hands control to the first living
    /// player actor. Calling it again restarts the session.
    pub fn start(&mut self) -> Result<ActorId, InitializationError> {
        let first = self
            .roster
            .living(Phase::Player)
            .next()
            .map(|actor| actor.id)
            .ok_or(InitializationError::NoLivingPlayer)?;

        if self.started {
            debug!("restarting session");
        }
        self.timer.cancel();
        for actor in self.roster.iter_mut() {
            actor.set_selected(false);
        }
        self.turn = TurnState::new();
        self.turn.round = 1;
        self.started = true;

        refresh_phase(&mut self.roster, Phase::Player);
        info!(round = self.turn.round, "session started");
        self.observers.emit(TurnEvent::PhaseChange {
            is_player_phase: true,
        });
        self.activate(first, true);
        Ok(first)
    }

    /// Gives control to `id`, restoring its movement and action points.
    pub fn start_turn(&mut self, id: ActorId) -> Result<(), CommandError> {
        self.require_open_phase()?;
        let actor = self
            .roster
            .get(id)
            .ok_or(CommandError::UnknownActor { actor: id })?;
        if !actor.is_alive() {
            return Err(reject(CommandError::Defeated { actor: id }));
        }
        if !self.turn.phase.controls(actor) {
            return Err(reject(CommandError::OutOfPhase {
                actor: id,
                phase: self.turn.phase,
            }));
        }

        self.leave_action_mode();
        self.activate(id, true);
        Ok(())
    }

    /// Passes control to the next living actor of the phase, wrapping around.
    ///
    /// Points are not restored; the actor keeps whatever it has left.
    pub fn cycle_actor(&mut self) -> Result<ActorId, CommandError> {
        self.require_open_phase()?;
        let next = self
            .roster
            .next_in_phase(self.turn.phase, self.turn.active, Actor::is_alive)
            .ok_or_else(|| reject(CommandError::NoActiveActor))?;

        self.leave_action_mode();
        self.activate(next, false);
        Ok(next)
    }

    // ------------------------------------------------------------------
    // Action selection
    // ------------------------------------------------------------------

    /// Enters action selection and announces what the active actor can do.
    pub fn enter_action_select(&mut self, env: TurnEnv<'_>) -> Result<Vec<String>, CommandError> {
        let actor = self.require_active()?;

        self.turn.clear_pending();
        self.turn.mode = TurnMode::ActionSelect;
        self.observers
            .emit(TurnEvent::ActionModeChanged { active: true });

        let actions = self.available_actions(env);
        self.observers.emit(TurnEvent::AvailableActionsChanged {
            actor,
            actions: actions.clone(),
        });
        Ok(actions)
    }

    pub fn exit_action_select(&mut self) -> Result<(), CommandError> {
        self.require_active()?;
        if !self.turn.mode.is_action_mode() {
            return Err(reject(CommandError::WrongMode {
                expected: TurnMode::ActionSelect,
                actual: self.turn.mode,
            }));
        }
        self.leave_action_mode();
        Ok(())
    }

    /// Flips between movement and action selection. Returns true when the
    /// session ends up in action mode.
    pub fn toggle_action_mode(&mut self, env: TurnEnv<'_>) -> Result<bool, CommandError> {
        if self.turn.mode.is_action_mode() {
            self.exit_action_select()?;
            Ok(false)
        } else {
            self.enter_action_select(env)?;
            Ok(true)
        }
    }

    /// Picks an action by canonical name or alias.
    ///
    /// Untargeted actions resolve immediately and the outcome is returned.
    /// Targeted actions wait in target selection and return `Ok(None)`.
    pub fn select_action(
        &mut self,
        env: TurnEnv<'_>,
        name: &str,
    ) -> Result<Option<ActionOutcome>, CommandError> {
        let actor = self.require_active()?;
        self.require_action_mode()?;

        let canonical = env.catalog.resolve_name(name).ok_or_else(|| {
            reject(CommandError::UnknownAction {
                name: name.to_owned(),
            })
        })?;
        if !self
            .available_actions(env)
            .iter()
            .any(|available| available == canonical)
        {
            return Err(reject(CommandError::ActionUnavailable {
                actor,
                action: canonical.to_owned(),
            }));
        }
        let action = env
            .catalog
            .get(canonical)
            .ok_or_else(|| CommandError::UnknownAction {
                name: canonical.to_owned(),
            })?;

        self.turn.pending_action = Some(canonical.to_owned());
        if action.requires_target() {
            debug!(%actor, action = canonical, "awaiting target");
            self.turn.mode = TurnMode::TargetSelect;
            return Ok(None);
        }

        Ok(self.perform(action, actor, None))
    }

    /// Resolves the pending action against the chosen target.
    ///
    /// An index counts into [`TurnCoordinator::pending_targets`]. A target
    /// that exists but fails validation resolves as a no-op and `Ok(None)`.
    pub fn select_target(
        &mut self,
        env: TurnEnv<'_>,
        target: TargetRef,
    ) -> Result<Option<ActionOutcome>, CommandError> {
        let actor = self.require_active()?;
        self.require_mode(TurnMode::TargetSelect)?;

        let name = self
            .turn
            .pending_action
            .as_deref()
            .ok_or_else(|| reject(CommandError::NoPendingAction))?;
        let action = env
            .catalog
            .get(name)
            .ok_or_else(|| {
                reject(CommandError::UnknownAction {
                    name: name.to_owned(),
                })
            })?;

        let target_id = match target {
            TargetRef::Id(id) if self.roster.get(id).is_some() => id,
            TargetRef::Index(index) => self
                .pending_targets(env)
                .get(index)
                .copied()
                .ok_or_else(|| reject(CommandError::UnknownTarget { target }))?,
            TargetRef::Id(_) => return Err(reject(CommandError::UnknownTarget { target })),
        };

        Ok(self.perform(action, actor, Some(target_id)))
    }

    // ------------------------------------------------------------------
    // Movement and turn ending
    // ------------------------------------------------------------------

    /// Steps the active actor one tile, spending one movement point.
    pub fn move_active(
        &mut self,
        env: TurnEnv<'_>,
        direction: Direction,
    ) -> Result<Position, CommandError> {
        let id = self.require_active()?;
        self.require_mode(TurnMode::Movement)?;

        let actor = self
            .roster
            .get(id)
            .ok_or(CommandError::UnknownActor { actor: id })?;
        if actor.movement_points() == 0 {
            return Err(reject(CommandError::NoMovementPoints { actor: id }));
        }
        let from = actor.position;
        let to = from
            .step(direction)
            .ok_or_else(|| reject(CommandError::OffGrid { position: from, direction }))?;
        if !env.map.is_in_bounds(to) {
            return Err(reject(CommandError::OutOfBounds { position: to }));
        }
        if !env.map.is_passable(to) {
            return Err(reject(CommandError::Impassable { position: to }));
        }
        if let Some(occupant) = self.roster.occupant_at(to) {
            return Err(reject(CommandError::Occupied {
                position: to,
                occupant: occupant.id,
            }));
        }

        let exhausted = match self.roster.get_mut(id) {
            Some(actor) => {
                actor.position = to;
                let ledger = actor.ensure_ledger();
                ledger.spend_movement(1);
                ledger.movement_points() == 0
            }
            None => false,
        };
        self.observers
            .emit(TurnEvent::ActorMoved { actor: id, from, to });

        if exhausted {
            debug!(actor = %id, "movement exhausted");
            self.evaluate_auto_end();
        }
        Ok(to)
    }

    /// Ends the active actor's turn.
    ///
    /// Control moves to the next actor of the phase that still has points;
    /// when none is left the phase transition is scheduled.
    pub fn end_actor_turn(&mut self) -> Result<(), CommandError> {
        self.require_active()?;
        self.end_active_turn();
        Ok(())
    }

    /// Flips the phase now, cancelling any scheduled transition.
    pub fn phase_transition(&mut self) -> Result<Phase, CommandError> {
        self.require_started()?;
        Ok(self.transition())
    }

    /// Ends the active actor's turn and the phase regardless of remaining
    /// points.
    pub fn force_end_phase(&mut self) -> Result<Phase, CommandError> {
        self.require_started()?;
        if let Some(id) = self.turn.active {
            self.finish_actor(id);
        }
        info!(phase = %self.turn.phase, "phase force-ended");
        Ok(self.transition())
    }

    /// Moves the session clock forward, firing a scheduled transition that
    /// has come due. Returns true if one fired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.clock += elapsed;
        if !self.started {
            return false;
        }
        match self.timer.take_due(self.clock) {
            Some(pending) => {
                debug!(generation = pending.generation, "scheduled phase transition is due");
                self.transition();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_started(&self) -> Result<(), CommandError> {
        if self.started {
            Ok(())
        } else {
            Err(reject(CommandError::NotStarted))
        }
    }

    /// Rejects hand-overs once every actor of the phase has ended its turn
    /// and the transition is only waiting on its delay.
    fn require_open_phase(&self) -> Result<(), CommandError> {
        self.require_started()?;
        if self.turn.active.is_none() && self.timer.pending().is_some() {
            return Err(reject(CommandError::NoActiveActor));
        }
        Ok(())
    }

    fn require_active(&self) -> Result<ActorId, CommandError> {
        self.require_started()?;
        self.turn
            .active
            .filter(|id| self.roster.get(*id).is_some_and(Actor::is_alive))
            .ok_or_else(|| reject(CommandError::NoActiveActor))
    }

    fn require_mode(&self, expected: TurnMode) -> Result<(), CommandError> {
        if self.turn.mode == expected {
            Ok(())
        } else {
            Err(reject(CommandError::WrongMode {
                expected,
                actual: self.turn.mode,
            }))
        }
    }

    fn require_action_mode(&self) -> Result<(), CommandError> {
        if self.turn.mode.is_action_mode() {
            Ok(())
        } else {
            Err(reject(CommandError::WrongMode {
                expected: TurnMode::ActionSelect,
                actual: self.turn.mode,
            }))
        }
    }

    /// Hands control to `id`. `refresh` restores its points first.
    fn activate(&mut self, id: ActorId, refresh: bool) {
        if let Some(previous) = self.turn.active.and_then(|prev| self.roster.get_mut(prev)) {
            previous.set_selected(false);
        }
        if let Some(actor) = self.roster.get_mut(id) {
            if refresh {
                refresh_actor(actor);
            }
            actor.set_selected(true);
        }
        self.turn.active = Some(id);
        self.turn.mode = TurnMode::Movement;
        self.turn.clear_pending();
        debug!(actor = %id, phase = %self.turn.phase, "turn started");
        self.observers.emit(TurnEvent::TurnStart { actor: id });
    }

    /// Returns to movement mode, announcing the change if action mode was on.
    fn leave_action_mode(&mut self) {
        self.turn.clear_pending();
        if self.turn.mode.is_action_mode() {
            self.turn.mode = TurnMode::Movement;
            self.observers
                .emit(TurnEvent::ActionModeChanged { active: false });
        }
    }

    fn perform(
        &mut self,
        action: &Action,
        actor: ActorId,
        target: Option<ActorId>,
    ) -> Option<ActionOutcome> {
        let outcome = action.resolve(actor, target, &mut self.roster, &mut self.observers);
        self.leave_action_mode();
        self.evaluate_auto_end();
        outcome
    }

    /// Ends the active turn when the configured policy says it is over.
    fn evaluate_auto_end(&mut self) {
        let Some(actor) = self.active_actor() else {
            return;
        };
        let (movement, actions) = (actor.movement_points(), actor.action_points());
        if self.config.auto_end_policy().should_end(movement, actions) {
            debug!(actor = %actor.id, movement, actions, "auto-ending turn");
            self.end_active_turn();
        }
    }

    fn end_active_turn(&mut self) {
        let Some(id) = self.turn.active else {
            return;
        };
        self.finish_actor(id);

        let phase = self.turn.phase;
        let policy = self.config.auto_end_policy();
        let next = self.roster.next_in_phase(phase, Some(id), |candidate| {
            candidate.id != id
                && candidate.has_remaining_points()
                && !policy.should_end(candidate.movement_points(), candidate.action_points())
        });
        match next {
            Some(next) => self.activate(next, false),
            None => {
                // Nobody holds control until the next phase opens.
                if let Some(actor) = self.roster.get_mut(id) {
                    actor.set_selected(false);
                }
                self.turn.active = None;
                self.schedule_transition();
            }
        }
    }

    /// Zeroes the actor's movement, drops action mode and announces the end.
    fn finish_actor(&mut self, id: ActorId) {
        if let Some(actor) = self.roster.get_mut(id) {
            actor.ensure_ledger().zero_movement();
        }
        self.leave_action_mode();
        self.observers.emit(TurnEvent::TurnEnd { actor: id });
    }

    fn schedule_transition(&mut self) {
        let delay = self.config.phase_transition_delay();
        if delay.is_zero() {
            self.transition();
            return;
        }
        let pending = self.timer.schedule(self.clock, delay);
        debug!(
            phase = %self.turn.phase,
            generation = pending.generation,
            delay_ms = self.config.phase_transition_delay_ms,
            "phase transition scheduled"
        );
    }

    fn transition(&mut self) -> Phase {
        self.timer.cancel();
        self.leave_action_mode();

        let ending = self.turn.phase;
        for actor in self.roster.iter_mut().filter(|actor| ending.controls(actor)) {
            actor.set_selected(false);
        }

        let phase = ending.next();
        self.turn.phase = phase;
        self.turn.active = None;
        if phase.is_player() {
            self.turn.round += 1;
        }

        refresh_phase(&mut self.roster, phase);
        info!(%phase, round = self.turn.round, "phase changed");
        self.observers.emit(TurnEvent::PhaseChange {
            is_player_phase: phase.is_player(),
        });

        let first = self.roster.living(phase).next().map(|actor| actor.id);
        if let Some(first) = first {
            self.activate(first, true);
        } else {
            info!(%phase, "no living actor in phase");
        }

        if phase == Phase::Enemy && (self.config.enemy_phase_auto_pass || first.is_none()) {
            self.schedule_transition();
        }
        phase
    }
}

impl core::fmt::Debug for TurnCoordinator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TurnCoordinator")
            .field("turn", &self.turn)
            .field("clock", &self.clock)
            .field("pending", &self.timer.pending())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn refresh_actor(actor: &mut Actor) {
    let ledger = actor.ensure_ledger();
    ledger.reset_for_turn();
    ledger.reset_movement();
}

/// Restores points for every living actor of `phase`.
fn refresh_phase(roster: &mut Roster, phase: Phase) {
    for actor in roster
        .iter_mut()
        .filter(|actor| phase.controls(actor) && actor.is_alive())
    {
        refresh_actor(actor);
    }
}

fn reject(error: CommandError) -> CommandError {
    let severity = error.severity();
    if severity.is_internal() {
        warn!(code = error.error_code(), %error, "command rejected");
    } else if severity.is_recoverable() {
        trace!(code = error.error_code(), %error, "command rejected");
    } else {
        debug!(code = error.error_code(), severity = severity.as_str(), %error, "command rejected");
    }
    error
}
