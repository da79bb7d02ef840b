use crate::coord::{Col, Coord, NUM_ROWS, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{PieceId, PieceKind, PieceOnBoard};


fn new_red(kind: PieceKind) -> PieceOnBoard { PieceOnBoard::new(PieceId::tmp(), kind, Force::Red) }

fn setup_red_soldiers(grid: &mut Grid) {
    for col in Col::all().step_by(2) {
        grid[Coord::new(Row::from_zero_based(6), col)] = Some(new_red(PieceKind::Soldier));
    }
}

fn setup_black_pieces_mirrorlike(grid: &mut Grid) {
    for coord in Coord::all() {
        if let Some(piece) = grid[coord] {
            if piece.force == Force::Red {
                let mirror_row = Row::from_zero_based(NUM_ROWS - coord.row.to_zero_based() - 1);
                let mirror_coord = Coord::new(mirror_row, coord.col);
                assert!(grid[mirror_coord].is_none(), "{:?}", grid);
                grid[mirror_coord] = Some(PieceOnBoard { force: Force::Black, ..piece });
            }
        }
    }
}

pub fn assign_piece_ids(grid: &mut Grid, piece_id: &mut PieceId) {
    for coord in Coord::all() {
        if let Some(piece) = grid[coord] {
            grid[coord] = Some(PieceOnBoard { id: piece_id.inc(), ..piece });
        }
    }
}

pub fn starting_piece_row() -> &'static [PieceKind] {
    use PieceKind::*;
    &[Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot]
}

pub fn generate_starting_grid(piece_id: &mut PieceId) -> Grid {
    let mut grid = Grid::new();
    let back_row = Row::from_zero_based(NUM_ROWS - 1);
    for (col, kind) in Col::all().zip(starting_piece_row()) {
        grid[Coord::new(back_row, col)] = Some(new_red(*kind));
    }
    for col in [Col::from_zero_based(1), Col::from_zero_based(7)] {
        grid[Coord::new(Row::from_zero_based(7), col)] = Some(new_red(PieceKind::Cannon));
    }
    setup_red_soldiers(&mut grid);
    setup_black_pieces_mirrorlike(&mut grid);
    assign_piece_ids(&mut grid, piece_id);
    grid
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn starting_grid() {
        let grid = generate_starting_grid(&mut PieceId::new());
        assert_eq!(grid.pieces().count(), 32);
        assert_eq!(grid.find_general(Force::Red), Some(Coord::from_zero_based(9, 4)));
        assert_eq!(grid.find_general(Force::Black), Some(Coord::from_zero_based(0, 4)));
        let black_cannon = grid[Coord::from_zero_based(2, 7)].unwrap();
        assert_eq!((black_cannon.kind, black_cannon.force), (PieceKind::Cannon, Force::Black));
        let red_soldier = grid[Coord::from_zero_based(6, 8)].unwrap();
        assert_eq!((red_soldier.kind, red_soldier.force), (PieceKind::Soldier, Force::Red));
        let ids: HashSet<_> = grid.pieces().map(|(_, piece)| piece.id).collect();
        assert_eq!(ids.len(), 32);
    }
}
