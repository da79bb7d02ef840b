// Plain text rendering of a board. Black is on top, like on a physical board seen from
// Red's side.

use itertools::Itertools;

use crate::coord::{Col, Coord, Row};
use crate::grid::Grid;
use crate::piece::piece_to_ascii;


const EMPTY_SQUARE: char = '·';
const RIVER: &str = "  ~~~~~~~~~~~~~~~~~~~~~~~~~~~";

fn render(square: impl Fn(Coord) -> String) -> String {
    let files = Col::all().map(|col| format!(" {} ", col.to_algebraic())).join("");
    let file_header = format!("   {}", files.trim_end());
    let mut lines = vec![file_header.clone()];
    for row in Row::all() {
        if row == Row::from_zero_based(5) {
            lines.push(RIVER.to_owned());
        }
        let squares = Col::all().map(|col| square(Coord::new(row, col))).join("");
        lines.push(format!(" {} {} {}", row.to_algebraic(), squares, row.to_algebraic()));
    }
    lines.push(file_header);
    lines.join("\n")
}

// Pictograms, e.g. 帅 and 将. Pictograms are double-width in most terminals.
pub fn render_as_unicode(grid: &Grid) -> String {
    render(|pos| match grid[pos] {
        Some(piece) => format!(" {}", piece.symbol()),
        None => format!(" {} ", EMPTY_SQUARE),
    })
}

// FEN-style letters: uppercase for Red, lowercase for Black.
pub fn render_as_ascii(grid: &Grid) -> String {
    render(|pos| match grid[pos] {
        Some(piece) => format!(" {} ", piece_to_ascii(piece.kind, piece.force)),
        None => " . ".to_owned(),
    })
}
