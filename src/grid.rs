use std::{fmt, ops};

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::piece::{PieceId, PieceKind, PieceOnBoard};


pub type Grid = GenericGrid<PieceOnBoard>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GridItem<T> {
    Piece(T),
    Empty,
    OutOfBounds,
}

impl<T> GridItem<T> {
    pub fn is_free(&self) -> bool { matches!(self, GridItem::Empty) }
    pub fn piece(self) -> Option<T> {
        match self {
            GridItem::Piece(piece) => Some(piece),
            GridItem::Empty | GridItem::OutOfBounds => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericGrid<T: Clone> {
    data: Array2<Option<T>>,
}

impl<T: Clone> GenericGrid<T> {
    pub fn new() -> Self {
        GenericGrid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn get(&self, pos: Coord) -> GridItem<&T> {
        if !pos.is_on_board() {
            return GridItem::OutOfBounds;
        }
        match self.data.get(coord_to_index(pos)) {
            None => GridItem::OutOfBounds,
            Some(None) => GridItem::Empty,
            Some(Some(v)) => GridItem::Piece(v),
        }
    }

    pub fn is_occupied(&self, pos: Coord) -> bool { matches!(self.get(pos), GridItem::Piece(_)) }
}

impl Grid {
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        Coord::all().filter_map(|pos| self[pos].map(|piece| (pos, piece)))
    }

    pub fn find_piece(&self, id: PieceId) -> Option<(Coord, PieceOnBoard)> {
        self.pieces().find(|(_, piece)| piece.id == id)
    }

    pub fn find_general(&self, force: Force) -> Option<Coord> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::General && piece.force == force)
            .map(|(pos, _)| pos)
    }
}

impl<T: Clone> ops::Index<Coord> for GenericGrid<T> {
    type Output = Option<T>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        if !pos.is_on_board() {
            panic!("{}", out_of_bound_message(pos));
        }
        &self.data[coord_to_index(pos)]
    }
}

impl<T: Clone> ops::IndexMut<Coord> for GenericGrid<T> {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        if !pos.is_on_board() {
            panic!("{}", out_of_bound_message(pos));
        }
        &mut self.data[coord_to_index(pos)]
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [pos.row.to_zero_based() as usize, pos.col.to_zero_based() as usize]
}

fn out_of_bound_message(pos: Coord) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        pos.row.to_zero_based(),
        pos.col.to_zero_based(),
        NUM_ROWS,
        NUM_COLS
    )
}

fn debug_format_piece(piece: &PieceOnBoard) -> String {
    format!("[{}]-{:?}-{:?}", piece.id.0, piece.force, piece.kind)
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(pos, piece)| (pos.to_algebraic(), debug_format_piece(&piece))))
            .finish()
    }
}
