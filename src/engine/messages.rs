//! Engine actor message types.

use std::time::Duration;
use tokio::sync::oneshot;

use crate::game::entities::{Card, Seat, SnapEvent};
use crate::game::state_machine::GameError;

/// Messages that can be sent to a [`crate::engine::GameActor`].
#[derive(Debug)]
pub enum EngineMessage {
    /// Start (or restart) a game: shuffle, deal, enter the dealing phase.
    StartNewGame { response: oneshot::Sender<()> },

    /// Draw the top card of a seat's hand onto the center pile.
    DrawCard {
        seat: Seat,
        response: oneshot::Sender<Result<Option<Card>, GameError>>,
    },

    /// Attempt to snap the center pile.
    AttemptSnap {
        seat: Seat,
        response: oneshot::Sender<Option<SnapEvent>>,
    },

    /// Update the bot reaction time.
    SetReactionTime {
        reaction_time: Duration,
        response: oneshot::Sender<()>,
    },

    /// Stop playing and return to the ready state.
    Reset { response: oneshot::Sender<()> },

    /// Internal: the dealing delay elapsed.
    DealingElapsed { generation: u64 },

    /// Internal: the bot reaction delay elapsed.
    BotElapsed { generation: u64 },
}
