use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::force::Force;


pub const NUM_ROWS: i8 = 10;
pub const NUM_COLS: i8 = 9;

// Rows 0-4 are Black's half of the board, rows 5-9 are Red's half.
const LAST_BLACK_ROW: i8 = 4;
const PALACE_COLS: ops::RangeInclusive<i8> = 3..=5;


// Rows and columns are allowed to go off board: move candidates are often computed
// as offsets. Use `Coord::is_on_board` before indexing a grid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: i8, // 0-based, 0 is Black's back rank
}

impl Row {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    // ICCS ranks count from Red's side: rank '0' is row 9.
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let rank = ch.to_digit(10)? as i8;
        Some(Self::from_zero_based(NUM_ROWS - 1 - rank))
    }
    pub fn to_algebraic(self) -> char { (b'0' + (NUM_ROWS - 1 - self.idx) as u8) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_ROWS).map(Self::from_zero_based) }
}

impl ops::Add<i8> for Row {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: i8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        if ('a'..='i').contains(&ch) {
            Some(Self::from_zero_based((ch as u8 - b'a') as i8))
        } else {
            None
        }
    }
    pub fn to_algebraic(self) -> char { (b'a' + self.idx as u8) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_COLS).map(Self::from_zero_based) }
}

impl ops::Add<i8> for Col {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub const fn from_zero_based(row: i8, col: i8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }
    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    pub fn is_on_board(self) -> bool {
        (0..NUM_ROWS).contains(&self.row.idx) && (0..NUM_COLS).contains(&self.col.idx)
    }

    // The 3x3 zone Generals and Advisors are confined to.
    pub fn is_in_palace(self, force: Force) -> bool {
        let rows = match force {
            Force::Black => 0..=2,
            Force::Red => 7..=9,
        };
        rows.contains(&self.row.idx) && PALACE_COLS.contains(&self.col.idx)
    }

    // Whether the square lies on the opponent's half of the board.
    pub fn is_across_river(self, force: Force) -> bool {
        match force {
            Force::Red => self.row.idx <= LAST_BLACK_ROW,
            Force::Black => self.row.idx > LAST_BLACK_ROW,
        }
    }

    // ICCS notation, e.g. "e0" for Red General's starting square.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Coord::new(Row::from_algebraic(row)?, Col::from_algebraic(col)?))
    }
    pub fn to_algebraic(self) -> String {
        if self.is_on_board() {
            format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
        } else {
            format!("({},{})", self.row.idx, self.col.idx)
        }
    }
}

impl ops::Add<(i8, i8)> for Coord {
    type Output = Self;
    fn add(self, other: (i8, i8)) -> Self::Output {
        Self { row: self.row + other.0, col: self.col + other.1 }
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output { (self.row - other.row, self.col - other.col) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}
