#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod adventure;
pub mod ai;
pub mod coord;
pub mod display;
pub mod effect;
pub mod engine;
pub mod event;
pub mod force;
pub mod game;
pub mod grid;
pub mod history;
pub mod movement;
pub mod network;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod starter;
pub mod test_util;
pub mod util;

pub use adventure::{AdventureCard, AdventureKind, AdventureRef, AdventureState, RewardEffect};
pub use coord::{Col, Coord, Row};
pub use effect::{Effect, EffectKind};
pub use engine::{Engine, PlayOutcome};
pub use force::Force;
pub use game::{Action, GameState, GameStatus, Rejection, RewardGrant, TurnPhase, reduce, try_reduce};
pub use grid::Grid;
pub use movement::{MoveError, can_move, check_move};
pub use piece::{PieceId, PieceKind, PieceOnBoard};
pub use rules::{EngineConfig, GameMode};
