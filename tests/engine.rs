mod common;

use std::time::Duration;

use common::{PieceIs, apply_all, c, state_from_diagram};
use instant::Instant;
use pretty_assertions::assert_eq;
use xiangqi_dare::adventure::{AdventureKind, AdventureRef, AdventureState};
use xiangqi_dare::ai::AiStrategyKind;
use xiangqi_dare::engine::{Engine, PlayOutcome};
use xiangqi_dare::force::Force;
use xiangqi_dare::game::{Action, GameState, GameStatus, Rejection, RewardGrant, TurnPhase};
use xiangqi_dare::piece::PieceKind;
use xiangqi_dare::rules::{EngineConfig, GameMode};


const AI_DELAY: Duration = Duration::from_millis(800);

fn pve_engine() -> Engine {
    Engine::new(EngineConfig {
        ai_strategy: AiStrategyKind::Greedy,
        ai_delay: AI_DELAY,
        rng_seed: Some(42),
        ..EngineConfig::pve()
    })
}

fn local_engine() -> Engine {
    Engine::new(EngineConfig { rng_seed: Some(42), ..EngineConfig::local() })
}

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
fn ai_moves_after_delay() {
    let mut engine = pve_engine();
    let t0 = Instant::now();
    assert_eq!(engine.poll_ai(t0), None);
    assert_eq!(engine.ai_deadline(), None);

    assert_eq!(engine.play_move(c(6, 0), c(5, 0)), PlayOutcome::Moved);
    assert_eq!(engine.poll_ai(t0), None);
    assert_eq!(engine.ai_deadline(), Some(t0 + AI_DELAY));
    assert_eq!(engine.poll_ai(t0 + Duration::from_millis(799)), None);

    // Greedy Black takes one of the horses with a cannon.
    let outcome = engine.poll_ai(t0 + AI_DELAY);
    assert!(matches!(outcome, Some(PlayOutcome::Captured { adventure: Some(_) })), "{outcome:?}");
    let state = engine.state();
    assert_eq!(state.stash()[Force::Black][0].kind, PieceKind::Horse);
    assert!(matches!(state.adventure(), AdventureState::Open(_)));
    assert!(state.last_move().unwrap().to == c(9, 1) || state.last_move().unwrap().to == c(9, 7));

    // Nothing to do while the adventure is open.
    assert_eq!(engine.poll_ai(t0 + 2 * AI_DELAY), None);
    assert_eq!(engine.ai_deadline(), None);

    engine.close_adventure().unwrap();
    assert_eq!(engine.state().active_force(), Force::Red);
    assert_eq!(engine.poll_ai(t0 + 3 * AI_DELAY), None);
}

#[test]
fn stale_ai_task_is_rescheduled() {
    let mut engine = pve_engine();
    let t0 = Instant::now();
    engine.play_move(c(6, 0), c(5, 0));
    assert_eq!(engine.poll_ai(t0), None);

    engine.dispatch(Action::TurnEnd).unwrap();
    let t1 = t0 + AI_DELAY;
    assert_eq!(engine.poll_ai(t1), None);
    assert_eq!(engine.ai_deadline(), Some(t1 + AI_DELAY));
    assert!(engine.poll_ai(t1 + AI_DELAY).is_some());
}

#[test]
fn local_mode_has_no_ai() {
    let mut engine = local_engine();
    let t0 = Instant::now();
    engine.play_move(c(6, 0), c(5, 0));
    assert_eq!(engine.poll_ai(t0 + 10 * AI_DELAY), None);
    assert_eq!(engine.ai_deadline(), None);
    assert_eq!(engine.state().active_force(), Force::Black);
}

#[test]
fn play_move_rejections() {
    let mut engine = local_engine();
    assert_eq!(engine.play_move(c(3, 0), c(4, 0)), PlayOutcome::Rejected(Rejection::WrongForce));
    assert_eq!(engine.play_move(c(5, 0), c(4, 0)), PlayOutcome::Rejected(Rejection::NoPiece));
    assert_eq!(
        engine.play_move(c(9, 0), c(9, 1)),
        PlayOutcome::Rejected(Rejection::DestinationOccupied)
    );
    assert_eq!(engine.generation(), 0);
}

#[test]
fn shielded_capture() {
    let mut engine = local_engine();
    engine.load_state(skirmish());
    assert_eq!(engine.play_move(c(5, 0), c(5, 5)), PlayOutcome::Moved);
    engine.dispatch(Action::ApplyReward(RewardGrant::Immunity)).unwrap();
    let chariot = engine.state().grid()[c(5, 5)].unwrap();

    assert_eq!(engine.play_move(c(3, 5), c(5, 5)), PlayOutcome::Shielded(chariot.id));
    assert!(engine.state().grid()[c(5, 5)].is(piece!(Red Chariot)));
    assert_eq!(engine.state().active_force(), Force::Red);

    // The shield is spent, so the next attack captures.
    assert_eq!(engine.play_move(c(5, 5), c(6, 5)), PlayOutcome::Moved);
    assert!(matches!(
        engine.play_move(c(3, 5), c(6, 5)),
        PlayOutcome::Captured { adventure: Some(_) }
    ));
    assert!(engine.state().grid()[c(6, 5)].is(piece!(Black Chariot)));
}

#[test]
fn general_capture_ends_game() {
    let mut engine = local_engine();
    engine.load_state(state_from_diagram("
        . . . . k . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . R . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . K . . . .
    ", Force::Red));
    assert_eq!(engine.play_move(c(5, 4), c(0, 4)), PlayOutcome::Captured { adventure: None });
    assert_eq!(engine.state().status(), GameStatus::Victory(Force::Red));
    assert_eq!(engine.state().adventure(), AdventureState::Idle);
    assert_eq!(engine.play_move(c(9, 4), c(8, 4)), PlayOutcome::Rejected(Rejection::GameOver));
    engine.reset().unwrap();
    assert!(engine.state().status().is_active());
    assert_eq!(engine.state().mode(), GameMode::Local);
}

#[test]
fn double_move_through_engine() {
    let mut engine = local_engine();
    engine.load_state(apply_all(&skirmish(), &[
        Action::CapturePiece { from: c(5, 0), to: c(3, 0) },
        Action::OpenAdventure(AdventureRef { kind: AdventureKind::Reward, index: 0 }),
        Action::CloseAdventure,
    ]));
    assert_eq!(engine.play_move(c(0, 3), c(1, 3)), PlayOutcome::Moved);
    assert_eq!(engine.state().active_force(), Force::Red);

    assert_eq!(engine.play_move(c(3, 0), c(3, 1)), PlayOutcome::Moved);
    assert_eq!(engine.state().active_force(), Force::Red);
    assert_eq!(
        engine.play_move(c(3, 1), c(3, 5)),
        PlayOutcome::Rejected(Rejection::BonusMoveCannotCapture)
    );
    assert_eq!(engine.play_move(c(3, 1), c(4, 1)), PlayOutcome::Moved);
    assert_eq!(engine.state().active_force(), Force::Black);
    assert_eq!(engine.state().phase(), TurnPhase::default());
}
