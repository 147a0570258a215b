//! Snap game state machine.
//!
//! `GameState` is the single aggregate the whole engine revolves around.
//! Every command transition lives here as a synchronous, pure-ish method
//! (randomness aside) so the rules can be exercised without timers or
//! channels. The async shell in [`crate::engine`] clones the latest
//! snapshot, applies exactly one transition, and atomically replaces the
//! stored state, so no observer ever sees a half-applied command.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{HAND_SIZE, MAX_CARD_ROTATION};
use super::entities::{Card, Deck, GameStatus, Seat, SnapEvent};

/// Errors a command can report.
///
/// Out-of-turn and out-of-phase draws are not errors: they are ignored
/// no-ops, the same as a stray click on a disabled control. An empty
/// hand is different. Callers are expected to consult a snapshot before
/// offering a draw, so hitting this means an invariant was broken
/// upstream.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("no cards left in the {seat} hand to draw")]
    EmptyHand { seat: Seat },
}

/// The authoritative game state. Replaced wholesale on every mutation,
/// never patched in place.
///
/// The top of a hand and the most recent pile card are the *last*
/// elements of their vectors.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub player_hand: Vec<Card>,
    pub computer_hand: Vec<Card>,
    pub center_pile: Vec<Card>,
    pub status: GameStatus,
    pub round: u32,
    pub turn: Seat,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            player_hand: Vec::new(),
            computer_hand: Vec::new(),
            center_pile: Vec::new(),
            status: GameStatus::Ready,
            round: 0,
            turn: Seat::Player,
        }
    }

    fn hand_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player => &mut self.player_hand,
            Seat::Computer => &mut self.computer_hand,
        }
    }

    /// Total cards across both hands and the pile. 52 at all times after
    /// the first deal, 0 before it.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.player_hand.len() + self.computer_hand.len() + self.center_pile.len()
    }

    /// Whether the two most recent pile cards share a rank, i.e. a
    /// correct snap is currently available. Suit and rotation are
    /// irrelevant.
    #[must_use]
    pub fn has_matching_pair(&self) -> bool {
        match self.center_pile.as_slice() {
            [.., below, top] => below.rank == top.rank,
            _ => false,
        }
    }

    /// Starts or restarts a game: reshuffles the deck, deals the first
    /// half to the player and the rest to the computer, clears the pile,
    /// bumps the round, and picks who opens at random. Play stays gated
    /// behind `Dealing` until [`Self::finish_dealing`].
    pub fn start_new_game(&mut self, deck: &Deck) {
        let mut shuffled = deck.shuffled();
        self.computer_hand = shuffled.split_off(HAND_SIZE);
        self.player_hand = shuffled;
        self.center_pile.clear();
        self.round += 1;
        self.status = GameStatus::Dealing;
        self.turn = if rand::rng().random_bool(0.5) {
            Seat::Player
        } else {
            Seat::Computer
        };
    }

    /// Dealing is over; open play. Returns false when the state already
    /// moved on (a superseded dealing timer firing late must not flip a
    /// finished or restarted round back to `Started`).
    pub fn finish_dealing(&mut self) -> bool {
        if self.status != GameStatus::Dealing {
            return false;
        }
        self.status = GameStatus::Started;
        true
    }

    /// Draws the top card of `seat`'s hand onto the center pile.
    ///
    /// Returns `Ok(None)` when the draw is not legal right now (not this
    /// seat's turn, or play is not open): the click is swallowed and the
    /// state untouched. On success the card lands on the pile with fresh
    /// rotation jitter, the turn flips, and the round-completion check
    /// runs against the exact post-flip state before anything else can
    /// interleave.
    pub fn draw_card(&mut self, seat: Seat) -> Result<Option<Card>, GameError> {
        if self.status != GameStatus::Started || self.turn != seat {
            return Ok(None);
        }
        let Some(mut card) = self.hand_mut(seat).pop() else {
            return Err(GameError::EmptyHand { seat });
        };
        card.rotation = rand::rng().random_range(-MAX_CARD_ROTATION..=MAX_CARD_ROTATION);
        self.center_pile.push(card);
        self.turn = seat.opponent();
        self.check_round_completion();
        Ok(Some(card))
    }

    /// Attempts to snap the center pile. Ignored (returns `None`) unless
    /// play is open and the pile holds at least two cards.
    ///
    /// A correct snap moves the whole pile under the *opponent's* hand; a
    /// wrong one moves it under the snapper's own. The loser gains the
    /// pile: snapping well burdens the other side with more cards to get
    /// rid of. Either way the pile ends up empty, the cards are neatened
    /// back to center, and an event is emitted.
    pub fn attempt_snap(&mut self, seat: Seat) -> Option<SnapEvent> {
        if self.status != GameStatus::Started || self.center_pile.len() < 2 {
            return None;
        }
        let was_correct = self.has_matching_pair();
        let receiver = if was_correct { seat.opponent() } else { seat };

        let mut pile = std::mem::take(&mut self.center_pile);
        for card in &mut pile {
            card.rotation = 0.0;
        }
        // The pile slides under the receiving hand, so recovered cards
        // are the last ones drawn.
        let hand = self.hand_mut(receiver);
        pile.extend(hand.drain(..));
        *hand = pile;

        Some(SnapEvent { seat, was_correct })
    }

    /// Stops play and returns to the idle shape. The round counter is
    /// kept so restarts keep counting up; the bot reaction time lives
    /// outside this aggregate and is not touched here.
    pub fn reset(&mut self) {
        let round = self.round;
        *self = Self::new();
        self.round = round;
    }

    /// Declares the round outcome, if any. Runs once per turn flip,
    /// against the post-flip state.
    ///
    /// A pending correct snap on top of the pile takes precedence over
    /// any outcome: whoever snaps it gets the pile moved, so no result is
    /// declared while the match sits there.
    fn check_round_completion(&mut self) {
        if self.has_matching_pair() {
            return;
        }
        let outcome = if self.player_hand.is_empty() && self.computer_hand.is_empty() {
            GameStatus::Draw
        } else if self.turn == Seat::Player && self.player_hand.is_empty() {
            GameStatus::Win
        } else if self.turn == Seat::Computer && self.computer_hand.is_empty() {
            GameStatus::Lose
        } else {
            return;
        };
        self.status = outcome;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
