use std::rc::Rc;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::adventure::AdventureRef;
use crate::coord::Coord;
use crate::effect::Effects;
use crate::force::Force;
use crate::game::{GameStatus, TurnPhase};
use crate::grid::Grid;
use crate::piece::{PieceId, PieceKind, PieceOnBoard};


pub type Stash = EnumMap<Force, Vec<PieceOnBoard>>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MoveOrigin {
    Local,
    // Received from the remote side.
    Synced,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub piece_id: PieceId,
    pub piece_kind: PieceKind,
    pub force: Force,
    pub captured: Option<PieceId>,
    // The adventure drawn after this move, if any.
    pub adventure: Option<AdventureRef>,
    pub origin: MoveOrigin,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool { self.captured.is_some() }
}

// Game state as it was right before a move. Undo tokens are not part of it: spending a
// token must not give it back.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub grid: Grid,
    pub active_force: Force,
    pub stash: Stash,
    pub effects: Effects,
    pub status: GameStatus,
    pub phase: TurnPhase,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    pub record: MoveRecord,
    // Missing for synced moves.
    pub snapshot: Option<Rc<Snapshot>>,
}

// Move log. Each entry pairs a move with the snapshot taken before it, so the log and the
// snapshot stack can never go out of sync.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[HistoryEntry] { &self.entries }
    pub fn records(&self) -> impl DoubleEndedIterator<Item = &MoveRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }
    pub fn last_record(&self) -> Option<&MoveRecord> { self.entries.last().map(|e| &e.record) }

    pub fn push(&mut self, record: MoveRecord, snapshot: Option<Snapshot>) {
        self.entries.push(HistoryEntry { record, snapshot: snapshot.map(Rc::new) });
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> { self.entries.pop() }

    // Returns false if there are no moves to bind the adventure to.
    pub fn bind_adventure(&mut self, adventure: AdventureRef) -> bool {
        match self.entries.last_mut() {
            Some(entry) => {
                entry.record.adventure = Some(adventure);
                true
            }
            None => false,
        }
    }
}

// Best-effort rollback of a move for which no snapshot exists: the mover goes back, and the
// captured piece is taken out of the capturer's stash. If the captured id is not in the
// stash, the most recently captured piece is revived instead.
pub fn revert_without_snapshot(grid: &mut Grid, stash: &mut Stash, record: &MoveRecord) {
    grid[record.from] = grid[record.to].take();
    let Some(captured_id) = record.captured else {
        return;
    };
    let captures = &mut stash[record.force];
    let revived = match captures.iter().position(|piece| piece.id == captured_id) {
        Some(idx) => Some(captures.remove(idx)),
        None => captures.pop(),
    };
    if let Some(piece) = revived {
        grid[record.to] = Some(piece);
    }
}


#[cfg(test)]
mod tests {
    use enum_map::enum_map;

    use super::*;

    fn capture_record(captured: PieceId) -> MoveRecord {
        MoveRecord {
            from: Coord::from_zero_based(9, 0),
            to: Coord::from_zero_based(5, 0),
            piece_id: PieceId(1),
            piece_kind: PieceKind::Chariot,
            force: Force::Red,
            captured: Some(captured),
            adventure: None,
            origin: MoveOrigin::Synced,
        }
    }

    #[test]
    fn revert_revives_captured_piece_by_id() {
        let chariot = PieceOnBoard::new(PieceId(1), PieceKind::Chariot, Force::Red);
        let soldier = PieceOnBoard::new(PieceId(2), PieceKind::Soldier, Force::Black);
        let horse = PieceOnBoard::new(PieceId(3), PieceKind::Horse, Force::Black);
        let mut grid = Grid::new();
        grid[Coord::from_zero_based(5, 0)] = Some(chariot);
        let mut stash: Stash = enum_map! { Force::Red => vec![soldier, horse], Force::Black => vec![] };
        revert_without_snapshot(&mut grid, &mut stash, &capture_record(soldier.id));
        assert_eq!(grid[Coord::from_zero_based(9, 0)], Some(chariot));
        assert_eq!(grid[Coord::from_zero_based(5, 0)], Some(soldier));
        assert_eq!(stash[Force::Red], vec![horse]);
    }

    #[test]
    fn revert_falls_back_to_last_capture() {
        let chariot = PieceOnBoard::new(PieceId(1), PieceKind::Chariot, Force::Red);
        let horse = PieceOnBoard::new(PieceId(3), PieceKind::Horse, Force::Black);
        let mut grid = Grid::new();
        grid[Coord::from_zero_based(5, 0)] = Some(chariot);
        let mut stash: Stash = enum_map! { Force::Red => vec![horse], Force::Black => vec![] };
        revert_without_snapshot(&mut grid, &mut stash, &capture_record(PieceId(42)));
        assert_eq!(grid[Coord::from_zero_based(5, 0)], Some(horse));
        assert!(stash[Force::Red].is_empty());
    }

    #[test]
    fn bind_adventure_requires_a_move() {
        let mut history = History::new();
        let adventure = AdventureRef { kind: crate::adventure::AdventureKind::Dare, index: 0 };
        assert!(!history.bind_adventure(adventure));
        history.push(capture_record(PieceId(2)), None);
        assert!(history.bind_adventure(adventure));
        assert_eq!(history.last_record().unwrap().adventure, Some(adventure));
    }
}
