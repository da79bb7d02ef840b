// Owns a game and everything around it: randomness, the AI opponent and the sync client.
// All changes go through `Engine::dispatch`, so the engine is the only writer of the state.

use instant::Instant;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::adventure::{AdventureRef, random_adventure};
use crate::ai::{AiStrategy, make_strategy};
use crate::coord::Coord;
use crate::event::{AdventureOpenPayload, AdventureResolvePayload, NetworkEvent, ResetPayload};
use crate::game::{Action, GameState, Rejection, try_reduce};
use crate::movement::check_move;
use crate::network::{NoopClient, SyncClient, parse_event};
use crate::piece::{PieceId, PieceKind};
use crate::rules::{EngineConfig, GameMode};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayOutcome {
    Moved,
    // `adventure` is `None` when the General was captured.
    Captured { adventure: Option<AdventureRef> },
    // The target's immunity absorbed the capture.
    Shielded(PieceId),
    Rejected(Rejection),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReceiveError {
    Malformed,
    Rejected(Rejection),
}

// An AI move scheduled for a specific turn. Any accepted action makes it stale.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct AiTask {
    generation: u64,
    due: Instant,
}

pub struct Engine {
    config: EngineConfig,
    state: GameState,
    rng: StdRng,
    generation: u64,
    ai_task: Option<AiTask>,
    strategy: Box<dyn AiStrategy>,
    client: Box<dyn SyncClient>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self { Self::with_client(config, Box::new(NoopClient)) }

    pub fn with_client(config: EngineConfig, client: Box<dyn SyncClient>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Engine {
            state: GameState::new(config.mode),
            rng,
            generation: 0,
            ai_task: None,
            strategy: make_strategy(config.ai_strategy),
            client,
            config,
        }
    }

    // Replaces the game. Used to start from custom positions.
    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
        self.bump_generation();
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn state(&self) -> &GameState { &self.state }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn ai_deadline(&self) -> Option<Instant> { self.ai_task.map(|task| task.due) }

    pub fn dispatch(&mut self, action: Action) -> Result<(), Rejection> {
        match try_reduce(&self.state, &action, &mut self.rng) {
            Ok(next) => {
                self.state = next;
                self.bump_generation();
                Ok(())
            }
            Err(rejection) => {
                debug!("Action {:?} rejected: {:?}", action, rejection);
                Err(rejection)
            }
        }
    }

    // Board input: the active player moves a piece from `from` to `to`. Decides whether this
    // is a quiet move, a capture or an attack on a shielded piece.
    pub fn play_move(&mut self, from: Coord, to: Coord) -> PlayOutcome {
        match self.try_play_move(from, to) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                debug!("Move {}-{} rejected: {:?}", from.to_algebraic(), to.to_algebraic(), rejection);
                PlayOutcome::Rejected(rejection)
            }
        }
    }

    fn try_play_move(&mut self, from: Coord, to: Coord) -> Result<PlayOutcome, Rejection> {
        let state = &self.state;
        if state.is_game_over() {
            return Err(Rejection::GameOver);
        }
        if state.is_frozen() {
            return Err(Rejection::Frozen);
        }
        let piece = state.grid().get(from).piece().copied().ok_or(Rejection::NoPiece)?;
        if piece.force != state.active_force() {
            return Err(Rejection::WrongForce);
        }
        if state.effects().is_sealed(piece.id) {
            return Err(Rejection::Sealed);
        }
        let target = state.grid().get(to).piece().copied();
        let Some(target) = target.filter(|target| target.force != piece.force) else {
            return self.play_quiet_move(from, to);
        };

        if state.phase().bonus_move_phase {
            return Err(Rejection::BonusMoveCannotCapture);
        }
        if state.phase().opponent_cannot_capture {
            return Err(Rejection::CaptureForbidden);
        }
        check_move(state.grid(), from, to, &piece).map_err(Rejection::IllegalMove)?;
        if state.effects().is_immune(target.id) {
            self.dispatch(Action::ConsumeImmunity { target: target.id })?;
            info!("{:?} {} is shielded", target.force, target.label());
            return Ok(PlayOutcome::Shielded(target.id));
        }

        self.dispatch(Action::CapturePiece { from, to })?;
        if target.kind == PieceKind::General {
            self.emit(NetworkEvent::new_move(from, to, true, None));
            return Ok(PlayOutcome::Captured { adventure: None });
        }
        let adventure = random_adventure(&mut self.rng);
        self.dispatch(Action::OpenAdventure(adventure))?;
        info!("Adventure opened: {:?} #{}", adventure.kind, adventure.index);
        self.emit(NetworkEvent::new_move(from, to, true, Some(adventure)));
        self.emit(NetworkEvent::AdventureOpen(AdventureOpenPayload {
            move_id: self.last_move_id(),
            adventure_type: adventure.kind,
            adventure_index: adventure.index,
        }));
        Ok(PlayOutcome::Captured { adventure: Some(adventure) })
    }

    fn play_quiet_move(&mut self, from: Coord, to: Coord) -> Result<PlayOutcome, Rejection> {
        let ends_turn = self.quiet_move_ends_turn();
        self.dispatch(Action::MovePiece { from, to })?;
        if ends_turn {
            self.dispatch(Action::TurnEnd)?;
        }
        self.emit(NetworkEvent::new_move(from, to, false, None));
        Ok(PlayOutcome::Moved)
    }

    pub fn close_adventure(&mut self) -> Result<(), Rejection> {
        self.dispatch(Action::CloseAdventure)?;
        self.emit(NetworkEvent::AdventureResolve(AdventureResolvePayload {
            move_id: self.last_move_id(),
        }));
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), Rejection> { self.set_mode(self.state.mode()) }

    pub fn set_mode(&mut self, mode: GameMode) -> Result<(), Rejection> {
        let was_online = self.state.mode() == GameMode::OnlineReserved;
        self.dispatch(Action::SetMode(mode))?;
        if was_online || mode == GameMode::OnlineReserved {
            self.client.send(&NetworkEvent::Reset(ResetPayload { room_id: None, mode }));
        }
        Ok(())
    }

    // Applies an event received from the remote side. Nothing is sent back.
    pub fn receive(&mut self, raw: &str) -> Result<(), ReceiveError> {
        let event = parse_event(raw).ok_or(ReceiveError::Malformed)?;
        let action = event.to_action();
        let ends_turn = matches!(action, Action::SyncMove { capture: false, .. })
            && self.quiet_move_ends_turn();
        self.dispatch(action).map_err(ReceiveError::Rejected)?;
        if ends_turn {
            self.dispatch(Action::TurnEnd).map_err(ReceiveError::Rejected)?;
        }
        Ok(())
    }

    // Drives the AI opponent. Call periodically: schedules a move when it is the AI's turn
    // and makes it once the configured delay has passed.
    pub fn poll_ai(&mut self, now: Instant) -> Option<PlayOutcome> {
        if !self.ai_to_move() {
            self.ai_task = None;
            return None;
        }
        if let Some(task) = self.ai_task {
            if task.generation != self.generation {
                debug!("Dropping stale AI task for generation {}", task.generation);
                self.ai_task = None;
            }
        }
        let generation = self.generation;
        let delay = self.config.ai_delay;
        let task = *self.ai_task.get_or_insert_with(|| AiTask { generation, due: now + delay });
        if now < task.due {
            return None;
        }
        self.ai_task = None;
        let view = self.state.clone();
        let Some(mv) = self.strategy.pick_move(&view, &mut self.rng) else {
            info!("AI ({}) has no moves", self.strategy.name());
            return None;
        };
        info!("AI ({}) plays {}-{}", self.strategy.name(), mv.from.to_algebraic(), mv.to.to_algebraic());
        Some(self.play_move(mv.from, mv.to))
    }

    fn ai_to_move(&self) -> bool {
        let state = &self.state;
        state.mode() == GameMode::Pve
            && !state.is_game_over()
            && state.active_force() == self.config.ai_force
            && !state.is_frozen()
            && state.adventure().is_idle()
    }

    // A quiet move that arms the bonus phase keeps the turn open.
    fn quiet_move_ends_turn(&self) -> bool {
        let phase = self.state.phase();
        phase.bonus_move_phase || phase.pending_double_move != Some(self.state.active_force())
    }

    fn bump_generation(&mut self) { self.generation += 1; }

    fn last_move_id(&self) -> String { self.state.history().len().saturating_sub(1).to_string() }

    // Only moves, adventures and resets go over the wire. Rewards, undo and shielded captures
    // stay local: the peer never learns about the immunity they would consume.
    fn emit(&mut self, event: NetworkEvent) {
        if self.state.mode() == GameMode::OnlineReserved {
            self.client.send(&event);
        }
    }
}
