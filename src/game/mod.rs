//! Snap game core - entities, rules, and the state machine.
//!
//! Everything in this module is synchronous and timer-free:
//! - [`entities`]: cards, the deck, seats, statuses, snap events
//! - [`state_machine`]: the `GameState` aggregate and its command
//!   transitions
//! - [`constants`]: deck geometry and timing defaults
//!
//! The asynchronous shell that owns the state container and the
//! background timers lives in [`crate::engine`].

pub mod constants;
pub mod entities;
pub mod state_machine;

pub use entities::{Card, Deck, GameStatus, Rank, Seat, SnapEvent, Suit};
pub use state_machine::{GameError, GameState};
