use std::collections::BTreeMap;

use derive_new::new;
use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;
use crate::piece::PieceId;


pub const SEAL_DURATION: u8 = 1;
pub const IMMUNITY_CHARGES: u8 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum EffectKind {
    // Cancels the next capture attempt against the piece, then disappears.
    Immunity,
    // The piece cannot be moved until the seal wears off.
    Seal,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub target: PieceId,
    pub remaining: u8,
    pub owner: Force,
}

impl Effect {
    pub fn seal(target: PieceId, owner: Force) -> Self {
        Effect::new(EffectKind::Seal, target, SEAL_DURATION, owner)
    }
    pub fn immunity(target: PieceId, owner: Force) -> Self {
        Effect::new(EffectKind::Immunity, target, IMMUNITY_CHARGES, owner)
    }
}

// Active effects. A piece holds at most one effect of each kind: granting an effect
// replaces the previous one of the same kind instead of stacking.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Effects {
    by_kind: EnumMap<EffectKind, BTreeMap<PieceId, Effect>>,
}

impl Effects {
    pub fn new() -> Self { Effects { by_kind: enum_map! { _ => BTreeMap::new() } } }

    pub fn get(&self, kind: EffectKind, target: PieceId) -> Option<&Effect> {
        self.by_kind[kind].get(&target)
    }
    pub fn has(&self, kind: EffectKind, target: PieceId) -> bool {
        self.by_kind[kind].contains_key(&target)
    }
    pub fn is_sealed(&self, target: PieceId) -> bool { self.has(EffectKind::Seal, target) }
    pub fn is_immune(&self, target: PieceId) -> bool { self.has(EffectKind::Immunity, target) }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.by_kind.values().flat_map(|effects| effects.values())
    }
    pub fn len(&self) -> usize { self.by_kind.values().map(|effects| effects.len()).sum() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn grant(&mut self, effect: Effect) {
        self.by_kind[effect.kind].insert(effect.target, effect);
    }

    pub fn remove(&mut self, kind: EffectKind, target: PieceId) -> Option<Effect> {
        self.by_kind[kind].remove(&target)
    }

    pub fn clear(&mut self, kind: EffectKind) { self.by_kind[kind].clear(); }

    // Called when the target leaves the board.
    pub fn strip_piece(&mut self, target: PieceId) {
        for effects in self.by_kind.values_mut() {
            effects.remove(&target);
        }
    }

    // One tick of seal aging. Seals reaching zero are lifted. Immunity does not age.
    pub fn age_seals(&mut self) {
        let seals = &mut self.by_kind[EffectKind::Seal];
        for seal in seals.values_mut() {
            seal.remaining = seal.remaining.saturating_sub(1);
        }
        seals.retain(|_, seal| seal.remaining > 0);
    }
}
