use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::AiStrategyKind;
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    // Single player against the engine's AI.
    Pve,
    // Two players sharing one board.
    Local,
    // Reserved for online play: the engine emits sync events, but there is no transport.
    OnlineReserved,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    pub mode: GameMode,
    pub ai_strategy: AiStrategyKind,
    pub ai_force: Force,
    #[serde(with = "humantime_serde")]
    pub ai_delay: Duration,
    // Fixed seed for reproducible games. Entropy-seeded if missing.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl EngineConfig {
    pub fn local() -> Self {
        Self {
            mode: GameMode::Local,
            ai_strategy: AiStrategyKind::Random,
            ai_force: Force::Black,
            ai_delay: Duration::from_millis(800),
            rng_seed: None,
        }
    }

    pub fn pve() -> Self { Self { mode: GameMode::Pve, ..Self::local() } }
}
