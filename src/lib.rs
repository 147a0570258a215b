//! # Snap Engine
//!
//! Reactive game-state engine for a two-player (human vs. bot) game of
//! Snap.
//!
//! The engine owns the authoritative game state, the turn-taking
//! protocol, the bot's autonomous decision loop, and win/lose/draw
//! determination. Presentation layers stay outside: they subscribe to
//! state snapshots and issue commands, nothing more.
//!
//! ## Architecture
//!
//! A single mutable state container drives several interacting
//! asynchronous processes that must never race:
//!
//! - **Dealing timer**: holds play closed for a fixed dealing phase
//!   after each deal
//! - **Bot loop**: re-arms a reaction delay whenever the game moves,
//!   then snaps and/or draws
//! - **Round-completion check**: runs atomically with every turn flip
//!
//! All of them funnel through one actor task; every mutation is a
//! full-state replacement observed by field-scoped subscriptions.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, the deck, and the synchronous state machine
//! - [`engine`]: the tokio actor, state container, and subscriptions
//! - [`bot`]: the bot's decision function
//!
//! ## Example
//!
//! ```no_run
//! use snap_engine::{EngineConfig, GameActor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = GameActor::spawn(EngineConfig::default());
//!     handle.start_new_game().await.unwrap();
//! }
//! ```

/// Asynchronous engine shell: actor, state container, subscriptions.
pub mod engine;
pub use engine::{
    EngineConfig, EngineError, FieldWatcher, GameActor, GameHandle, SnapFlash, StateReader,
    StateStore,
};

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    constants,
    entities::{Card, Deck, GameStatus, Rank, Seat, SnapEvent, Suit},
    state_machine::{GameError, GameState},
};

/// Bot opponent decision logic.
pub mod bot;
pub use bot::BotAction;
