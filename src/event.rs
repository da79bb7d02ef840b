// Sync protocol between two engines playing the same game. Wire format is JSON:
//   {"type": "move", "payload": {"from": {"r": 6, "c": 0}, "to": {"r": 5, "c": 0}, ...}}

use serde::{Deserialize, Serialize};

use crate::adventure::{AdventureKind, AdventureRef};
use crate::coord::Coord;
use crate::game::Action;
use crate::rules::GameMode;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct WirePosition {
    pub r: i8,
    pub c: i8,
}

impl From<Coord> for WirePosition {
    fn from(pos: Coord) -> Self {
        WirePosition { r: pos.row.to_zero_based(), c: pos.col.to_zero_based() }
    }
}

impl From<WirePosition> for Coord {
    fn from(pos: WirePosition) -> Self { Coord::from_zero_based(pos.r, pos.c) }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    pub from: WirePosition,
    pub to: WirePosition,
    pub capture: bool,
    pub adventure_type: Option<AdventureKind>,
    pub adventure_index: Option<usize>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureOpenPayload {
    pub move_id: String,
    pub adventure_type: AdventureKind,
    pub adventure_index: usize,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureResolvePayload {
    pub move_id: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPayload {
    pub room_id: Option<String>,
    pub mode: GameMode,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum NetworkEvent {
    Move(MovePayload),
    AdventureOpen(AdventureOpenPayload),
    AdventureResolve(AdventureResolvePayload),
    Reset(ResetPayload),
}

impl MovePayload {
    pub fn adventure(&self) -> Option<AdventureRef> {
        match (self.adventure_type, self.adventure_index) {
            (Some(kind), Some(index)) => Some(AdventureRef { kind, index }),
            _ => None,
        }
    }
}

impl NetworkEvent {
    pub fn new_move(from: Coord, to: Coord, capture: bool, adventure: Option<AdventureRef>) -> Self {
        NetworkEvent::Move(MovePayload {
            from: from.into(),
            to: to.into(),
            capture,
            adventure_type: adventure.map(|adv| adv.kind),
            adventure_index: adventure.map(|adv| adv.index),
        })
    }

    // The action that replays the event on the receiving side.
    pub fn to_action(&self) -> Action {
        match self {
            NetworkEvent::Move(payload) => Action::SyncMove {
                from: payload.from.into(),
                to: payload.to.into(),
                capture: payload.capture,
                adventure: payload.adventure(),
            },
            NetworkEvent::AdventureOpen(payload) => Action::OpenAdventure(AdventureRef {
                kind: payload.adventure_type,
                index: payload.adventure_index,
            }),
            NetworkEvent::AdventureResolve(_) => Action::CloseAdventure,
            NetworkEvent::Reset(payload) => Action::SetMode(payload.mode),
        }
    }
}
