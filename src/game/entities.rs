use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use super::constants::DECK_SIZE;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        };
        write!(f, "{repr}")
    }
}

/// A playing card. `rotation` is the display jitter (in degrees) a card
/// picked up on its way to the center pile. It carries no game-logic
/// weight: equality, ordering, and hashing all ignore it, and snap
/// comparisons look at ranks only.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub rotation: f32,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            rotation: 0.0,
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, self.suit).cmp(&(other.rank, other.suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("{}/{}", self.rank, self.suit);
        write!(f, "{repr:>4}")
    }
}

/// The ordered reference deck of 52 unique cards. Built once per engine
/// and never mutated afterwards; gameplay only ever copies and shuffles it.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh uniform permutation of the deck (Fisher-Yates).
    #[must_use]
    pub fn shuffled(&self) -> Vec<Card> {
        let mut cards = self.cards.to_vec();
        cards.shuffle(&mut rand::rng());
        cards
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card::new(Suit::Club, Rank::Ace); DECK_SIZE];
        for (i, rank) in Rank::ALL.into_iter().enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card::new(suit, rank);
            }
        }
        Self { cards }
    }
}

/// The two sides of the table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Seat {
    Player,
    Computer,
}

impl Seat {
    #[must_use]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Player => Self::Computer,
            Self::Computer => Self::Player,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Player => "player",
            Self::Computer => "computer",
        };
        write!(f, "{repr}")
    }
}

/// Lifecycle of a round. `Win`/`Lose` are from the player's perspective.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GameStatus {
    /// Boot placeholder presentation shows before the first snapshot
    /// lands. The engine's own initial status is `Ready`.
    Pending,
    Ready,
    Dealing,
    Started,
    Win,
    Lose,
    Draw,
}

impl GameStatus {
    /// Whether the round has ended with an outcome.
    #[must_use]
    pub const fn is_outcome(&self) -> bool {
        matches!(self, Self::Win | Self::Lose | Self::Draw)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Dealing => "dealing",
            Self::Started => "started",
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        };
        write!(f, "{repr}")
    }
}

/// A snap attempt, emitted once per attempt whether it was correct or not.
/// Ephemeral: broadcast to subscribers and never stored in game state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SnapEvent {
    pub seat: Seat,
    pub was_correct: bool,
}
