// Piece movement legality. Everything here is a pure function of the grid: whose turn it
// is, effects and bonus phases are the state machine's business (see `game`).

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{PieceKind, PieceOnBoard};
use crate::util::sort_two;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MoveError {
    OffBoard,
    NullMove,
    PieceMismatch,
    OwnPiece,
    ImpossibleTrajectory,
    OutsidePalace,
    RiverCrossing,
    PathBlocked,
    FlyingGeneral,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Reachability {
    Ok,
    Blocked,
    Impossible,
}

pub fn can_move(grid: &Grid, from: Coord, to: Coord, piece: &PieceOnBoard) -> bool {
    check_move(grid, from, to, piece).is_ok()
}

// Checks are done in a fixed order; the first failure is reported.
pub fn check_move(grid: &Grid, from: Coord, to: Coord, piece: &PieceOnBoard) -> Result<(), MoveError> {
    if !from.is_on_board() || !to.is_on_board() {
        return Err(MoveError::OffBoard);
    }
    if from == to {
        return Err(MoveError::NullMove);
    }
    // Guards against stale piece references held by the caller.
    if grid[from] != Some(*piece) {
        return Err(MoveError::PieceMismatch);
    }
    let target = grid[to];
    if let Some(target) = target {
        if target.force == piece.force {
            return Err(MoveError::OwnPiece);
        }
    }
    check_geography(to, piece)?;
    match reachability(grid, from, to, piece, target.is_some()) {
        Reachability::Ok => {}
        Reachability::Blocked => return Err(MoveError::PathBlocked),
        Reachability::Impossible => return Err(MoveError::ImpossibleTrajectory),
    }
    if creates_flying_general(grid, from, to, piece) {
        return Err(MoveError::FlyingGeneral);
    }
    Ok(())
}

// Number of occupied squares strictly between `from` and `to`. `None` if the squares do
// not share a row or a column.
pub fn count_obstacles(grid: &Grid, from: Coord, to: Coord) -> Option<usize> {
    let (d_row, d_col) = to - from;
    if d_row != 0 && d_col != 0 {
        return None;
    }
    let direction = (d_row.signum(), d_col.signum());
    let mut count = 0;
    let mut pos = from + direction;
    while pos != to {
        if grid.is_occupied(pos) {
            count += 1;
        }
        pos = pos + direction;
    }
    Some(count)
}

// Restrictions based solely on where the piece lands.
fn check_geography(to: Coord, piece: &PieceOnBoard) -> Result<(), MoveError> {
    match piece.kind {
        PieceKind::General | PieceKind::Advisor => {
            if !to.is_in_palace(piece.force) {
                return Err(MoveError::OutsidePalace);
            }
        }
        PieceKind::Elephant => {
            if to.is_across_river(piece.force) {
                return Err(MoveError::RiverCrossing);
            }
        }
        PieceKind::Horse | PieceKind::Chariot | PieceKind::Cannon | PieceKind::Soldier => {}
    }
    Ok(())
}

fn reachability(
    grid: &Grid, from: Coord, to: Coord, piece: &PieceOnBoard, capturing: bool,
) -> Reachability {
    use Reachability::*;
    let (d_row, d_col) = to - from;
    let is_straight_move = d_row == 0 || d_col == 0;
    let is_free = |pos: Coord| grid.get(pos).is_free();

    match piece.kind {
        PieceKind::General => {
            if d_row.abs() + d_col.abs() == 1 { Ok } else { Impossible }
        }
        PieceKind::Advisor => {
            if d_row.abs() == 1 && d_col.abs() == 1 { Ok } else { Impossible }
        }
        PieceKind::Elephant => {
            if d_row.abs() != 2 || d_col.abs() != 2 {
                return Impossible;
            }
            let eye = from + (d_row / 2, d_col / 2);
            if is_free(eye) { Ok } else { Blocked }
        }
        PieceKind::Horse => {
            if sort_two((d_row.abs(), d_col.abs())) != (1, 2) {
                return Impossible;
            }
            let leg = if d_row.abs() == 2 { from + (d_row / 2, 0) } else { from + (0, d_col / 2) };
            if is_free(leg) { Ok } else { Blocked }
        }
        PieceKind::Chariot => {
            if !is_straight_move {
                return Impossible;
            }
            if count_obstacles(grid, from, to) == Some(0) { Ok } else { Blocked }
        }
        PieceKind::Cannon => {
            if !is_straight_move {
                return Impossible;
            }
            // A capturing cannon must jump over exactly one screen.
            let required = if capturing { 1 } else { 0 };
            if count_obstacles(grid, from, to) == Some(required) { Ok } else { Blocked }
        }
        PieceKind::Soldier => {
            let forward = d_row == piece.force.forward() && d_col == 0;
            let sideways =
                from.is_across_river(piece.force) && d_row == 0 && d_col.abs() == 1;
            if forward || sideways { Ok } else { Impossible }
        }
    }
}

// Generals may never face each other on an open column. Evaluated on the board as it
// would be after the move.
fn creates_flying_general(grid: &Grid, from: Coord, to: Coord, piece: &PieceOnBoard) -> bool {
    let mut after = grid.clone();
    after[from] = None;
    after[to] = Some(*piece);
    // A General captured by this very move is gone from `after`.
    let (Some(red), Some(black)) =
        (after.find_general(Force::Red), after.find_general(Force::Black))
    else {
        return false;
    };
    red.col == black.col && count_obstacles(&after, red, black) == Some(0)
}
