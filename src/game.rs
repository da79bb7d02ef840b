// The turn state machine. Every change to a game goes through `try_reduce`, which
// produces a brand new state and leaves the old one intact.
//
// Turn structure:
//   - A quiet move passes the turn, unless the mover holds a pending double move, in which
//     case the mover enters a bonus phase and keeps the turn for one more quiet move.
//   - A capture never passes the turn by itself. It freezes the game until the adventure
//     it triggers is closed. Closing the adventure passes the turn unless a bonus phase is
//     active.
//   - Capturing a General ends the game.

use enum_map::enum_map;
use itertools::Itertools;
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::adventure::{AdventureKind, AdventureRef, AdventureState, RewardEffect};
use crate::coord::Coord;
use crate::effect::{Effect, EffectKind, Effects};
use crate::force::Force;
use crate::grid::Grid;
use crate::history::{History, MoveOrigin, MoveRecord, Snapshot, Stash, revert_without_snapshot};
use crate::movement::{MoveError, check_move};
use crate::piece::{PieceId, PieceKind, PieceOnBoard};
use crate::rules::GameMode;
use crate::starter::generate_starting_grid;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Victory(Force),
}

impl GameStatus {
    pub fn is_active(self) -> bool { self == GameStatus::Active }
    pub fn winner(self) -> Option<Force> {
        match self {
            GameStatus::Active => None,
            GameStatus::Victory(force) => Some(force),
        }
    }
}

// Bonus move bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct TurnPhase {
    // The force that will get a bonus move after its next move.
    pub pending_double_move: Option<Force>,
    // The active force is making a bonus move. Bonus moves cannot capture.
    pub bonus_move_phase: bool,
    // The force whose next capture will be followed by a bonus move.
    pub next_capture_grants_extra_move: Option<Force>,
    // The active force cannot capture. Lifted at turn end.
    pub opponent_cannot_capture: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RewardGrant {
    // Protects the last moved piece from one capture.
    Immunity,
    UndoToken,
    Taunt,
    // Seals every enemy Chariot for one turn.
    SealChariots,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    MovePiece { from: Coord, to: Coord },
    CapturePiece { from: Coord, to: Coord },
    SyncMove { from: Coord, to: Coord, capture: bool, adventure: Option<AdventureRef> },
    OpenAdventure(AdventureRef),
    CloseAdventure,
    TurnEnd,
    ApplyReward(RewardGrant),
    ConsumeImmunity { target: PieceId },
    UndoMove,
    HideTaunt,
    ForceTurn,
    SetMode(GameMode),
    ResetGame,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    GameOver,
    Frozen,
    NoPiece,
    NoTarget,
    WrongForce,
    DestinationOccupied,
    CaptureOwnPiece,
    Sealed,
    TargetImmune,
    BonusMoveCannotCapture,
    CaptureForbidden,
    IllegalMove(MoveError),
    NoSuchAdventure,
    NoAdventure,
    NoLastMove,
    NoUndoTokens,
    NotImmune,
    TauntNotShown,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    mode: GameMode,
    grid: Grid,
    active_force: Force,
    frozen: bool,
    adventure: AdventureState,
    history: History,
    stash: Stash,
    effects: Effects,
    undo_tokens: u32,
    status: GameStatus,
    phase: TurnPhase,
    show_taunt: bool,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self::new_with_grid(mode, generate_starting_grid(&mut PieceId::new()), Force::Red)
    }

    pub fn new_with_grid(mode: GameMode, grid: Grid, active_force: Force) -> Self {
        GameState {
            mode,
            grid,
            active_force,
            frozen: false,
            adventure: AdventureState::Idle,
            history: History::new(),
            stash: enum_map! { _ => vec![] },
            effects: Effects::new(),
            undo_tokens: 0,
            status: GameStatus::Active,
            phase: TurnPhase::default(),
            show_taunt: false,
        }
    }

    pub fn mode(&self) -> GameMode { self.mode }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn is_frozen(&self) -> bool { self.frozen }
    pub fn adventure(&self) -> AdventureState { self.adventure }
    pub fn history(&self) -> &History { &self.history }
    pub fn last_move(&self) -> Option<&MoveRecord> { self.history.last_record() }
    pub fn stash(&self) -> &Stash { &self.stash }
    pub fn effects(&self) -> &Effects { &self.effects }
    pub fn undo_tokens(&self) -> u32 { self.undo_tokens }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn is_game_over(&self) -> bool { !self.status.is_active() }
    pub fn phase(&self) -> TurnPhase { self.phase }
    pub fn show_taunt(&self) -> bool { self.show_taunt }

    // Whether the active force may capture right now.
    pub fn can_capture(&self) -> bool {
        !self.phase.bonus_move_phase && !self.phase.opponent_cannot_capture
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            active_force: self.active_force,
            stash: self.stash.clone(),
            effects: self.effects.clone(),
            status: self.status,
            phase: self.phase,
        }
    }

    fn pass_turn(&mut self) { self.active_force = self.active_force.opponent(); }

    fn reset(&mut self, mode: GameMode) { *self = GameState::new(mode); }

    // Common checks for any move of the active force's piece.
    fn movable_piece(&self, from: Coord) -> Result<PieceOnBoard, Rejection> {
        let Some(piece) = self.grid.get(from).piece().copied() else {
            return Err(Rejection::NoPiece);
        };
        if piece.force != self.active_force {
            return Err(Rejection::WrongForce);
        }
        if self.effects.is_sealed(piece.id) {
            return Err(Rejection::Sealed);
        }
        Ok(piece)
    }

    fn check_quiet_move(&self, from: Coord, to: Coord) -> Result<PieceOnBoard, Rejection> {
        let piece = self.movable_piece(from)?;
        if self.grid.is_occupied(to) {
            return Err(Rejection::DestinationOccupied);
        }
        check_move(&self.grid, from, to, &piece).map_err(Rejection::IllegalMove)?;
        Ok(piece)
    }

    fn check_capture(&self, from: Coord, to: Coord) -> Result<(PieceOnBoard, PieceOnBoard), Rejection> {
        let piece = self.movable_piece(from)?;
        let Some(target) = self.grid.get(to).piece().copied() else {
            return Err(Rejection::NoTarget);
        };
        if target.force == piece.force {
            return Err(Rejection::CaptureOwnPiece);
        }
        if self.phase.bonus_move_phase {
            return Err(Rejection::BonusMoveCannotCapture);
        }
        if self.phase.opponent_cannot_capture {
            return Err(Rejection::CaptureForbidden);
        }
        // Shielded pieces are handled by `Action::ConsumeImmunity` instead.
        if self.effects.is_immune(target.id) {
            return Err(Rejection::TargetImmune);
        }
        check_move(&self.grid, from, to, &piece).map_err(Rejection::IllegalMove)?;
        Ok((piece, target))
    }

    fn commit_quiet_move(&mut self, from: Coord, to: Coord, piece: PieceOnBoard, origin: MoveOrigin) {
        let snapshot = (origin == MoveOrigin::Local).then(|| self.snapshot());
        self.grid[to] = self.grid[from].take();
        let record = MoveRecord {
            from,
            to,
            piece_id: piece.id,
            piece_kind: piece.kind,
            force: piece.force,
            captured: None,
            adventure: None,
            origin,
        };
        self.history.push(record, snapshot);
        if self.phase.bonus_move_phase {
            self.phase.bonus_move_phase = false;
            self.pass_turn();
        } else if self.phase.pending_double_move == Some(piece.force) {
            self.phase.pending_double_move = None;
            self.phase.bonus_move_phase = true;
        } else {
            self.pass_turn();
        }
    }

    fn commit_capture(
        &mut self, from: Coord, to: Coord, piece: PieceOnBoard, target: PieceOnBoard,
        adventure: Option<AdventureRef>, origin: MoveOrigin,
    ) {
        let snapshot = (origin == MoveOrigin::Local).then(|| self.snapshot());
        self.grid[to] = self.grid[from].take();
        self.stash[piece.force].push(target);
        self.effects.strip_piece(target.id);
        let record = MoveRecord {
            from,
            to,
            piece_id: piece.id,
            piece_kind: piece.kind,
            force: piece.force,
            captured: Some(target.id),
            adventure,
            origin,
        };
        self.history.push(record, snapshot);

        if target.kind == PieceKind::General {
            info!("{:?} captured the General, game over", piece.force);
            self.status = GameStatus::Victory(piece.force);
            self.phase.pending_double_move = None;
            self.phase.bonus_move_phase = false;
            self.phase.next_capture_grants_extra_move = None;
            self.frozen = false;
            self.adventure = AdventureState::Idle;
            return;
        }

        self.frozen = true;
        self.adventure = AdventureState::Pending;
        if self.phase.pending_double_move == Some(piece.force) {
            self.phase.pending_double_move = None;
            self.phase.bonus_move_phase = true;
        }
        if self.phase.next_capture_grants_extra_move == Some(piece.force) {
            self.phase.next_capture_grants_extra_move = None;
            self.phase.bonus_move_phase = true;
        }
    }

    fn close_adventure(&mut self, rng: &mut impl Rng) -> Result<(), Rejection> {
        let adventure = match self.adventure {
            AdventureState::Idle => return Err(Rejection::NoAdventure),
            AdventureState::Pending => None,
            AdventureState::Open(adventure) => Some(adventure),
        };
        self.effects.age_seals();
        let effect = adventure
            .filter(|adv| adv.kind == AdventureKind::Reward)
            .and_then(|adv| adv.card())
            .and_then(|card| card.effect);
        let mover = self.active_force;
        match effect {
            None => {}
            Some(RewardEffect::DoubleMove) => self.phase.pending_double_move = Some(mover),
            Some(RewardEffect::Pacifism) => self.phase.opponent_cannot_capture = true,
            Some(RewardEffect::ExtraMoveOnCapture) => {
                self.phase.next_capture_grants_extra_move = Some(mover)
            }
            Some(RewardEffect::RandomSeal) => {
                let enemies = self
                    .grid
                    .pieces()
                    .filter(|(_, piece)| piece.force == mover.opponent())
                    .map(|(_, piece)| piece)
                    .collect_vec();
                if let Some(victim) = enemies.choose(rng) {
                    info!("{:?} {} is sealed", victim.force, victim.label());
                    self.effects.grant(Effect::seal(victim.id, mover));
                }
            }
        }
        if !self.phase.bonus_move_phase {
            self.pass_turn();
        }
        self.adventure = AdventureState::Idle;
        self.frozen = false;
        Ok(())
    }

    fn apply_reward(&mut self, grant: RewardGrant) -> Result<(), Rejection> {
        let last_move = *self.history.last_record().ok_or(Rejection::NoLastMove)?;
        let mover = last_move.force;
        match grant {
            RewardGrant::Immunity => {
                self.effects.grant(Effect::immunity(last_move.piece_id, mover));
            }
            RewardGrant::UndoToken => self.undo_tokens += 1,
            RewardGrant::Taunt => self.show_taunt = true,
            RewardGrant::SealChariots => {
                let chariots = self
                    .grid
                    .pieces()
                    .filter(|(_, p)| p.kind == PieceKind::Chariot && p.force == mover.opponent())
                    .map(|(_, p)| p.id)
                    .collect_vec();
                // Replaces every seal on the board, not only the ones on chariots.
                self.effects.clear(EffectKind::Seal);
                for id in chariots {
                    self.effects.grant(Effect::seal(id, mover));
                }
            }
        }
        Ok(())
    }

    fn undo_move(&mut self) -> Result<(), Rejection> {
        if self.undo_tokens == 0 {
            return Err(Rejection::NoUndoTokens);
        }
        let entry = self.history.pop().ok_or(Rejection::NoLastMove)?;
        match &entry.snapshot {
            Some(snapshot) => {
                self.grid = snapshot.grid.clone();
                self.stash = snapshot.stash.clone();
                self.effects = snapshot.effects.clone();
                self.status = snapshot.status;
                self.phase = snapshot.phase;
            }
            None => {
                revert_without_snapshot(&mut self.grid, &mut self.stash, &entry.record);
                self.status = GameStatus::Active;
                self.phase = TurnPhase::default();
            }
        }
        self.active_force = entry.record.force;
        self.undo_tokens -= 1;
        self.adventure = AdventureState::Idle;
        self.frozen = false;
        self.show_taunt = false;
        info!(
            "Undid {} {}-{}, {} undo tokens left",
            entry.record.piece_kind.label(),
            entry.record.from.to_algebraic(),
            entry.record.to.to_algebraic(),
            self.undo_tokens
        );
        Ok(())
    }
}

pub fn try_reduce(
    state: &GameState, action: &Action, rng: &mut impl Rng,
) -> Result<GameState, Rejection> {
    let resets = matches!(action, Action::SetMode(_) | Action::ResetGame);
    if state.is_game_over() && !resets {
        return Err(Rejection::GameOver);
    }
    let mut next = state.clone();
    match *action {
        Action::MovePiece { from, to } => {
            if state.frozen {
                return Err(Rejection::Frozen);
            }
            let piece = state.check_quiet_move(from, to)?;
            next.commit_quiet_move(from, to, piece, MoveOrigin::Local);
        }
        Action::CapturePiece { from, to } => {
            if state.frozen {
                return Err(Rejection::Frozen);
            }
            let (piece, target) = state.check_capture(from, to)?;
            next.commit_capture(from, to, piece, target, None, MoveOrigin::Local);
        }
        Action::SyncMove { from, to, capture, adventure } => {
            if state.frozen {
                return Err(Rejection::Frozen);
            }
            if capture {
                let (piece, target) = state.check_capture(from, to)?;
                next.commit_capture(from, to, piece, target, adventure, MoveOrigin::Synced);
            } else {
                let piece = state.check_quiet_move(from, to)?;
                next.commit_quiet_move(from, to, piece, MoveOrigin::Synced);
            }
        }
        Action::OpenAdventure(adventure) => {
            if adventure.card().is_none() {
                return Err(Rejection::NoSuchAdventure);
            }
            next.adventure = AdventureState::Open(adventure);
            next.frozen = true;
            next.history.bind_adventure(adventure);
        }
        Action::CloseAdventure => next.close_adventure(rng)?,
        Action::TurnEnd => {
            next.effects.age_seals();
            next.phase.opponent_cannot_capture = false;
        }
        Action::ApplyReward(grant) => next.apply_reward(grant)?,
        Action::ConsumeImmunity { target } => {
            if next.effects.remove(EffectKind::Immunity, target).is_none() {
                return Err(Rejection::NotImmune);
            }
            next.effects.age_seals();
            next.pass_turn();
            next.frozen = false;
            next.adventure = AdventureState::Idle;
        }
        Action::UndoMove => next.undo_move()?,
        Action::HideTaunt => {
            if !state.show_taunt {
                return Err(Rejection::TauntNotShown);
            }
            next.show_taunt = false;
        }
        Action::ForceTurn => {
            next.pass_turn();
            next.frozen = false;
            next.phase = TurnPhase::default();
        }
        Action::SetMode(mode) => next.reset(mode),
        Action::ResetGame => next.reset(state.mode),
    }
    Ok(next)
}

// Total version of `try_reduce`: a rejected action leaves the state unchanged.
pub fn reduce(state: &GameState, action: &Action, rng: &mut impl Rng) -> GameState {
    match try_reduce(state, action, rng) {
        Ok(next) => next,
        Err(rejection) => {
            debug!("Action {:?} rejected: {:?}", action, rejection);
            state.clone()
        }
    }
}
