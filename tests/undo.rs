mod common;

use common::{PieceIs, apply, apply_all, c, rejection, state_from_diagram};
use pretty_assertions::assert_eq;
use xiangqi_dare::adventure::{AdventureKind, AdventureRef, AdventureState};
use xiangqi_dare::force::Force;
use xiangqi_dare::game::{Action, GameState, Rejection, RewardGrant, reduce};
use xiangqi_dare::rules::GameMode;
use xiangqi_dare::test_util::deterministic_rng;


const FIRST_DARE: AdventureRef = AdventureRef { kind: AdventureKind::Dare, index: 0 };
const DOUBLE_MOVE: AdventureRef = AdventureRef { kind: AdventureKind::Reward, index: 0 };
const CRITICAL_STRIKE: AdventureRef = AdventureRef { kind: AdventureKind::Reward, index: 4 };

fn skirmish() -> GameState {
    state_from_diagram("
        . . . k . . . . .
        . . . . . . . . .
        . . . . . . . . .
        p . . . . r . . .
        . . . . . . . . .
        R . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . K . . . .
    ", Force::Red)
}


#[test]
fn undo_requires_token() {
    let state = apply(&GameState::new(GameMode::Local), Action::MovePiece { from: c(6, 0), to: c(5, 0) });
    assert_eq!(rejection(&state, Action::UndoMove), Rejection::NoUndoTokens);
    assert_eq!(reduce(&state, &Action::UndoMove, &mut deterministic_rng()), state);
}

#[test]
fn undo_without_moves() {
    let state = apply(&GameState::new(GameMode::Local), Action::MovePiece { from: c(6, 0), to: c(5, 0) });
    let state = apply_all(&state, &[Action::ApplyReward(RewardGrant::UndoToken); 2]);
    assert_eq!(state.undo_tokens(), 2);
    let state = apply(&state, Action::UndoMove);
    assert_eq!(state.undo_tokens(), 1);
    assert_eq!(rejection(&state, Action::UndoMove), Rejection::NoLastMove);
}

#[test]
fn undo_quiet_move_restores_start() {
    let state = apply_all(&GameState::new(GameMode::Local), &[
        Action::MovePiece { from: c(6, 0), to: c(5, 0) },
        Action::ApplyReward(RewardGrant::UndoToken),
        Action::UndoMove,
    ]);
    assert_eq!(state, GameState::new(GameMode::Local));
}

#[test]
fn undo_capture_with_open_adventure() {
    let before = apply_all(&skirmish(), &[
        Action::MovePiece { from: c(9, 4), to: c(8, 4) },
        Action::ApplyReward(RewardGrant::UndoToken),
        Action::MovePiece { from: c(0, 3), to: c(1, 3) },
    ]);
    let after = apply_all(&before, &[
        Action::CapturePiece { from: c(5, 0), to: c(3, 0) },
        Action::OpenAdventure(FIRST_DARE),
        Action::UndoMove,
    ]);
    assert_eq!(after.grid(), before.grid());
    assert_eq!(after.active_force(), Force::Red);
    assert_eq!(after.stash(), before.stash());
    assert_eq!(after.history().len(), before.history().len());
    assert_eq!(after.adventure(), AdventureState::Idle);
    assert!(!after.is_frozen());
    assert_eq!(after.undo_tokens(), 0);
}
// Red takes the soldier and resolves `reward`, Black answers, and Red earns an undo token.
fn rewarded_red_to_move(reward: AdventureRef) -> GameState {
    apply_all(&skirmish(), &[
        Action::CapturePiece { from: c(5, 0), to: c(3, 0) },
        Action::OpenAdventure(reward),
        Action::CloseAdventure,
        Action::MovePiece { from: c(0, 3), to: c(1, 3) },
        Action::TurnEnd,
        Action::ApplyReward(RewardGrant::UndoToken),
    ])
}

#[test]
fn undo_first_move_of_double_move() {
    let before = rewarded_red_to_move(DOUBLE_MOVE);
    assert_eq!(before.active_force(), Force::Red);
    assert_eq!(before.phase().pending_double_move, Some(Force::Red));

    let mid = apply(&before, Action::MovePiece { from: c(3, 0), to: c(3, 1) });
    assert!(mid.phase().bonus_move_phase);
    assert_eq!(mid.phase().pending_double_move, None);

    let after = apply(&mid, Action::UndoMove);
    assert_eq!(after.phase().pending_double_move, Some(Force::Red));
    assert!(!after.phase().bonus_move_phase);
    assert_eq!(after.phase(), before.phase());
    assert_eq!(after.active_force(), Force::Red);
    assert_eq!(after.grid(), before.grid());
    assert!(after.grid()[c(3, 0)].is(piece!(Red Chariot)));
}

#[test]
fn undo_capture_that_started_bonus_move() {
    let before = rewarded_red_to_move(CRITICAL_STRIKE);
    assert_eq!(before.phase().next_capture_grants_extra_move, Some(Force::Red));

    let mid = apply(&before, Action::CapturePiece { from: c(3, 0), to: c(3, 5) });
    assert!(mid.phase().bonus_move_phase);
    assert_eq!(mid.phase().next_capture_grants_extra_move, None);

    let after = apply(&mid, Action::UndoMove);
    assert_eq!(after.phase().next_capture_grants_extra_move, Some(Force::Red));
    assert!(!after.phase().bonus_move_phase);
    assert_eq!(after.active_force(), Force::Red);
    assert_eq!(after.grid(), before.grid());
    assert_eq!(after.stash(), before.stash());
    assert_eq!(after.adventure(), AdventureState::Idle);
    assert!(!after.is_frozen());
}

#[test]
fn undo_restores_effects() {
    let state = apply_all(&skirmish(), &[
        Action::MovePiece { from: c(9, 4), to: c(8, 4) },
        Action::ApplyReward(RewardGrant::SealChariots),
        Action::ApplyReward(RewardGrant::Taunt),
        Action::ApplyReward(RewardGrant::UndoToken),
    ]);
    assert_eq!(state.effects().len(), 1);
    let state = apply(&state, Action::UndoMove);
    assert!(state.effects().is_empty());
    assert!(!state.show_taunt());
    assert!(state.grid()[c(9, 4)].is(piece!(Red General)));
    assert_eq!(state.active_force(), Force::Red);
}

#[test]
fn undo_synced_capture() {
    let start = GameState::new(GameMode::OnlineReserved);
    let state = apply_all(&start, &[
        Action::SyncMove { from: c(7, 1), to: c(0, 1), capture: true, adventure: Some(FIRST_DARE) },
        Action::ApplyReward(RewardGrant::UndoToken),
    ]);
    assert!(state.is_frozen());
    assert_eq!(state.stash()[Force::Red].len(), 1);

    let state = apply(&state, Action::UndoMove);
    assert_eq!(state.grid(), start.grid());
    assert!(state.stash()[Force::Red].is_empty());
    assert_eq!(state.active_force(), Force::Red);
    assert_eq!(state.adventure(), AdventureState::Idle);
    assert!(!state.is_frozen());
    assert!(state.history().is_empty());
}

#[test]
fn undo_synced_quiet_move() {
    let start = GameState::new(GameMode::OnlineReserved);
    let state = apply_all(&start, &[
        Action::SyncMove { from: c(6, 4), to: c(5, 4), capture: false, adventure: None },
        Action::ApplyReward(RewardGrant::UndoToken),
        Action::UndoMove,
    ]);
    assert_eq!(state.grid(), start.grid());
    assert_eq!(state.active_force(), Force::Red);
}
