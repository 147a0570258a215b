//! Bot opponent.
//!
//! The bot has no difficulty levels, only a configurable reaction time:
//! the engine re-arms a delay whenever the game moves, and when the
//! delay elapses the decision function below picks the action batch.

pub mod decision;

pub use decision::{BotAction, decide};
