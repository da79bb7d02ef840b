// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::cell::RefCell;
use std::rc::Rc;

use xiangqi_dare::coord::Coord;
use xiangqi_dare::event::NetworkEvent;
use xiangqi_dare::force::Force;
use xiangqi_dare::game::{Action, GameState, Rejection, try_reduce};
use xiangqi_dare::network::SyncClient;
use xiangqi_dare::piece::{PieceKind, PieceOnBoard};
use xiangqi_dare::rules::GameMode;
use xiangqi_dare::test_util::{deterministic_rng, grid_from_diagram};


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: PieceKind,
    pub force: Force,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<PieceOnBoard> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.force == matcher.force
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        common::PieceMatcher {
            force: xiangqi_dare::force::Force::$force,
            kind: xiangqi_dare::piece::PieceKind::$kind,
        }
    };
}

// Zero-based (row, col) shorthand: row 0 is Black's back rank.
#[allow(dead_code)]
pub fn c(row: i8, col: i8) -> Coord { Coord::from_zero_based(row, col) }

#[allow(dead_code)]
pub fn state_from_diagram(diagram: &str, active_force: Force) -> GameState {
    GameState::new_with_grid(GameMode::Local, grid_from_diagram(diagram), active_force)
}

// Applies actions in order, panicking on the first rejection.
#[allow(dead_code)]
pub fn apply_all(state: &GameState, actions: &[Action]) -> GameState {
    let mut rng = deterministic_rng();
    let mut state = state.clone();
    for action in actions {
        state = try_reduce(&state, action, &mut rng)
            .unwrap_or_else(|rejection| panic!("{:?} rejected: {:?}", action, rejection));
    }
    state
}

#[allow(dead_code)]
pub fn apply(state: &GameState, action: Action) -> GameState { apply_all(state, &[action]) }

#[allow(dead_code)]
pub fn rejection(state: &GameState, action: Action) -> Rejection {
    match try_reduce(state, &action, &mut deterministic_rng()) {
        Ok(_) => panic!("{:?} was accepted", action),
        Err(rejection) => rejection,
    }
}

// Remembers everything the engine sends out.
#[derive(Clone, Default)]
pub struct RecordingClient {
    pub sent: Rc<RefCell<Vec<NetworkEvent>>>,
}

impl SyncClient for RecordingClient {
    fn send(&mut self, event: &NetworkEvent) { self.sent.borrow_mut().push(event.clone()); }
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn take(&self) -> Vec<NetworkEvent> { std::mem::take(&mut *self.sent.borrow_mut()) }
}
