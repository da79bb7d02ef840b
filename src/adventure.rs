// Adventures are the interrupts that follow a capture: either a dare for the capturing
// player to perform, or a reward that changes the course of the game.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdventureKind {
    Dare,
    Reward,
}

// Mechanical outcome of a reward card. Display text never affects game logic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RewardEffect {
    // The mover's next quiet move is followed by one more non-capturing move.
    DoubleMove,
    // The opponent cannot capture during their next turn.
    Pacifism,
    // The mover's next capture is followed by a non-capturing bonus move.
    ExtraMoveOnCapture,
    // A random enemy piece is sealed for one turn.
    RandomSeal,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AdventureCard {
    pub text: &'static str,
    pub effect: Option<RewardEffect>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AdventureRef {
    pub kind: AdventureKind,
    pub index: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AdventureState {
    #[default]
    Idle,
    // A capture happened, the adventure has not been drawn yet.
    Pending,
    Open(AdventureRef),
}

impl AdventureState {
    pub fn is_idle(&self) -> bool { matches!(self, AdventureState::Idle) }
}

const fn dare(text: &'static str) -> AdventureCard { AdventureCard { text, effect: None } }
const fn reward(text: &'static str, effect: RewardEffect) -> AdventureCard {
    AdventureCard { text, effect: Some(effect) }
}

static DARES: [AdventureCard; 40] = [
    dare("Meow like a cat three times"),
    dare("Do five push-ups"),
    dare("Praise your opponent for thirty seconds"),
    dare("Act out a meme face"),
    dare("Commentate your next three moves in a regional accent"),
    dare("Hold eye contact with your opponent for ten seconds"),
    dare("Shout \"I am a total beginner!\""),
    dare("Sing a nursery rhyme"),
    dare("Drink half a glass of water"),
    dare("Truth or dare: your opponent picks"),
    dare("Compliment your opponent using only sarcasm"),
    dare("Spin around five times, then make your next move"),
    dare("Say one sentence in the voice of your worst-playing self"),
    dare("Bark like a dog three times"),
    dare("Say \"I'm not joking, I really am bad at this\" three times in a row"),
    dare("Make your next move with your eyes closed"),
    dare("Make a finger heart three times"),
    dare("Say one line like an overexcited game streamer"),
    dare("Describe your blunder with a line of poetry"),
    dare("Pick a random piece and confess your love to it for ten seconds"),
    dare("Strike a dramatic \"I see through everything\" pose"),
    dare("Compare your opponent's style to a famous general"),
    dare("Give your General an intimidating nickname"),
    dare("Rap your plan for the next move"),
    dare("Dance on the spot for five seconds"),
    dare("Tap the table and declare \"I can still win!\""),
    dare("Ask your opponent \"How am I doing, coach?\""),
    dare("Say a random sentence in a foreign language"),
    dare("Clap ten times before your next move"),
    dare("Strike a cool over-the-shoulder pose"),
    dare("Say \"nice move\" in a regional accent"),
    dare("Flash a peace sign before your next move"),
    dare("Freeze like a zombie for one second"),
    dare("Recap your last blunder like a news anchor"),
    dare("Walk up to the board like a pigeon"),
    dare("Boast that your next move will checkmate the world champion"),
    dare("Bow to thin air three times in apology"),
    dare("Say \"Recalculation sequence initiated\" in a robot voice"),
    dare("Make your next move with your off hand"),
    dare("Apologize to the board for letting it down"),
];

static REWARDS: [AdventureCard; 5] = [
    reward(
        "Combo time: next turn you make two moves (the second one cannot capture)",
        RewardEffect::DoubleMove,
    ),
    reward("Swift chariot: next turn your chariot moves twice", RewardEffect::DoubleMove),
    reward("Absolute zero: a random enemy piece is frozen", RewardEffect::RandomSeal),
    reward("Pacifism: your opponent cannot capture next turn", RewardEffect::Pacifism),
    reward(
        "Critical strike: after your next capture you get one more move",
        RewardEffect::ExtraMoveOnCapture,
    ),
];

pub fn catalog(kind: AdventureKind) -> &'static [AdventureCard] {
    match kind {
        AdventureKind::Dare => &DARES,
        AdventureKind::Reward => &REWARDS,
    }
}

pub fn adventure_card(kind: AdventureKind, index: usize) -> Option<&'static AdventureCard> {
    catalog(kind).get(index)
}

impl AdventureRef {
    pub fn card(self) -> Option<&'static AdventureCard> { adventure_card(self.kind, self.index) }
}

// Even odds between a dare and a reward, then a uniform pick within the kind.
pub fn random_adventure(rng: &mut impl Rng) -> AdventureRef {
    let kind = if rng.random_bool(0.5) { AdventureKind::Dare } else { AdventureKind::Reward };
    let index = rng.random_range(0..catalog(kind).len());
    AdventureRef { kind, index }
}
