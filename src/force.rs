use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


// Red sits at the bottom of the board (rows 5-9) and moves first.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Force {
    Red,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::Red => Force::Black,
            Force::Black => Force::Red,
        }
    }

    // Row delta of a step "forward" from this force's point of view.
    pub fn forward(self) -> i8 {
        match self {
            Force::Red => -1,
            Force::Black => 1,
        }
    }
}
