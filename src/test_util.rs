// Test utilities shared by unit tests and the "tests" folder.

use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::grid::Grid;
use crate::piece::{PieceId, PieceOnBoard, piece_from_ascii};
use crate::starter::assign_piece_ids;


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

// Builds a grid from a diagram with one line per row, Black's back rank first. Pieces use
// FEN letters (uppercase for Red), '.' is an empty square, whitespace is ignored. Ids are
// assigned in reading order starting from 0.
pub fn grid_from_diagram(diagram: &str) -> Grid {
    let rows = diagram.lines().map(str::trim).filter(|line| !line.is_empty()).collect_vec();
    assert_eq!(rows.len(), NUM_ROWS as usize, "{}", diagram);
    let mut grid = Grid::new();
    for (row, line) in rows.into_iter().enumerate() {
        let squares = line.chars().filter(|ch| !ch.is_whitespace()).collect_vec();
        assert_eq!(squares.len(), NUM_COLS as usize, "{}", line);
        for (col, ch) in squares.into_iter().enumerate() {
            if ch == '.' {
                continue;
            }
            let (kind, force) = piece_from_ascii(ch).unwrap_or_else(|| panic!("Unknown piece: {ch}"));
            let pos = Coord::from_zero_based(row as i8, col as i8);
            grid[pos] = Some(PieceOnBoard::new(PieceId::tmp(), kind, force));
        }
    }
    assign_piece_ids(&mut grid, &mut PieceId::new());
    grid
}
