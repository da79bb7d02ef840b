use itertools::Itertools;
use rand::RngCore;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::coord::Coord;
use crate::game::GameState;
use crate::movement::can_move;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AiMove {
    pub from: Coord,
    pub to: Coord,
}

// Picks a move for the active force. Strategies only look at the state: the chosen move
// goes through the same validation as human input.
pub trait AiStrategy {
    fn name(&self) -> &'static str;
    fn pick_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<AiMove>;
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiStrategyKind {
    Random,
    // Takes the most valuable piece available, otherwise moves at random.
    Greedy,
}

pub fn make_strategy(kind: AiStrategyKind) -> Box<dyn AiStrategy> {
    match kind {
        AiStrategyKind::Random => Box::new(RandomStrategy),
        AiStrategyKind::Greedy => Box::new(GreedyStrategy),
    }
}

// Moves the active force could make now. Sealed pieces are skipped, and so are captures
// while the current phase forbids them.
pub fn legal_moves(state: &GameState) -> Vec<AiMove> {
    let grid = state.grid();
    let force = state.active_force();
    let mut moves = vec![];
    for (from, piece) in grid.pieces() {
        if piece.force != force || state.effects().is_sealed(piece.id) {
            continue;
        }
        for to in Coord::all() {
            if !can_move(grid, from, to, &piece) {
                continue;
            }
            if grid.is_occupied(to) && !state.can_capture() {
                continue;
            }
            moves.push(AiMove { from, to });
        }
    }
    moves
}

pub fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::General => 1000,
        PieceKind::Chariot => 90,
        PieceKind::Cannon => 45,
        PieceKind::Horse => 40,
        PieceKind::Advisor | PieceKind::Elephant => 20,
        PieceKind::Soldier => 10,
    }
}

pub struct RandomStrategy;

impl AiStrategy for RandomStrategy {
    fn name(&self) -> &'static str { "random" }
    fn pick_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<AiMove> {
        legal_moves(state).choose(rng).copied()
    }
}

pub struct GreedyStrategy;

impl AiStrategy for GreedyStrategy {
    fn name(&self) -> &'static str { "greedy" }
    fn pick_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<AiMove> {
        let moves = legal_moves(state);
        let grid = state.grid();
        let capture_value = |mv: &AiMove| grid[mv.to].map(|target| piece_value(target.kind));
        let best_captures = moves
            .iter()
            .filter_map(|mv| capture_value(mv).map(|value| (value, *mv)))
            .max_set_by_key(|(value, _)| *value);
        if let Some((_, mv)) = best_captures.choose(rng) {
            return Some(*mv);
        }
        moves.choose(rng).copied()
    }
}
