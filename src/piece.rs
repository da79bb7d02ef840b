use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

// Identifies a piece for its whole lifetime, including the time spent in a capture stash.
// Ids are never reused within a game.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    pub fn new() -> Self { PieceId(0) }
    // Placeholder for pieces that are about to get a real id via `starter::assign_piece_ids`.
    pub fn tmp() -> Self { PieceId(u32::MAX) }
    pub fn inc(&mut self) -> Self {
        let id = *self;
        self.0 += 1;
        id
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub id: PieceId,
    pub kind: PieceKind,
    pub force: Force,
}

impl PieceOnBoard {
    pub fn symbol(&self) -> char { piece_to_pictogram(self.kind, self.force) }
    pub fn label(&self) -> &'static str { self.kind.label() }
}

impl PieceKind {
    pub fn label(self) -> &'static str {
        match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        }
    }

    // Letters follow the common Xiangqi FEN convention.
    pub fn to_ascii(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'B',
            PieceKind::Horse => 'N',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }

    pub fn from_ascii(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'K' => Some(PieceKind::General),
            'A' => Some(PieceKind::Advisor),
            'B' => Some(PieceKind::Elephant),
            'N' => Some(PieceKind::Horse),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'P' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

// Uppercase is Red, lowercase is Black.
pub fn piece_from_ascii(ch: char) -> Option<(PieceKind, Force)> {
    let kind = PieceKind::from_ascii(ch)?;
    let force = if ch.is_ascii_uppercase() { Force::Red } else { Force::Black };
    Some((kind, force))
}

pub fn piece_to_ascii(kind: PieceKind, force: Force) -> char {
    match force {
        Force::Red => kind.to_ascii(),
        Force::Black => kind.to_ascii().to_ascii_lowercase(),
    }
}

pub fn piece_to_pictogram(kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, kind) {
        (Red, General) => '帅',
        (Red, Advisor) => '仕',
        (Red, Elephant) => '相',
        (Red, Soldier) => '兵',
        (Black, General) => '将',
        (Black, Advisor) => '士',
        (Black, Elephant) => '象',
        (Black, Soldier) => '卒',
        (_, Horse) => '马',
        (_, Chariot) => '车',
        (_, Cannon) => '炮',
    }
}
