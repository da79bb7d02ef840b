// ICCS-style move notation: source and destination squares, e.g. "h2e2" or "h2-e2".
// Files are 'a'..'i' from Red's left, ranks are '0'..'9' from Red's back rank.

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::coord::Coord;


pub fn parse_move(notation: &str) -> Option<(Coord, Coord)> {
    lazy_static! {
        static ref MOVE_RE: Regex = Regex::new(r"^([a-i][0-9])\s*[-x:]?\s*([a-i][0-9])$").unwrap();
    }
    let cap = MOVE_RE.captures(notation.trim())?;
    let from = Coord::from_algebraic(cap.get(1)?.as_str())?;
    let to = Coord::from_algebraic(cap.get(2)?.as_str())?;
    Some((from, to))
}

pub fn format_move(from: Coord, to: Coord) -> String {
    format!("{}{}", from.to_algebraic(), to.to_algebraic())
}
