//! Bot decision logic.

use crate::game::entities::{GameStatus, Seat};
use crate::game::state_machine::GameState;

/// One step of the bot's action batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BotAction {
    /// Snap the center pile.
    Snap,
    /// Draw the top card of the computer hand.
    Draw,
}

/// Decides the bot's action batch against a state snapshot.
///
/// Snapping comes first: a matching pair on the pile is taken whether or
/// not it is the bot's turn. Drawing follows only when the turn is the
/// computer's and its hand still holds cards; a draw is never offered on
/// an empty hand. Outside open play the bot does nothing.
#[must_use]
pub fn decide(state: &GameState) -> Vec<BotAction> {
    if state.status != GameStatus::Started {
        return Vec::new();
    }
    let mut actions = Vec::with_capacity(2);
    if state.has_matching_pair() {
        actions.push(BotAction::Snap);
    }
    if state.turn == Seat::Computer && !state.computer_hand.is_empty() {
        actions.push(BotAction::Draw);
    }
    actions
}
