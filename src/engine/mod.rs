//! Asynchronous engine shell around the game core.
//!
//! This module implements:
//! - `GameActor`: the single task that owns the state container, applies
//!   commands, and runs the background timers (dealing phase, bot
//!   reaction delay)
//! - `GameHandle`: cloneable command + subscription handle
//! - `StateStore`/`StateReader`: single-writer container with
//!   replay-last-value field subscriptions and the fire-once snap-event
//!   channel
//! - `SnapFlash`: the time-windowed projection presentation uses for
//!   flash feedback
//!
//! ## Architecture
//!
//! The engine runs in one tokio task with an mpsc inbox. Commands and
//! elapsed timers arrive as messages and are applied one at a time
//! against the latest snapshot; each mutation is a full-state swap, so
//! subscribers only ever observe complete states. Timers are armed by
//! spawning a sleeper that echoes a generation number back into the
//! inbox; re-arming bumps the generation, which is how a newer deal or a
//! changed reaction time supersedes a pending delay.
//!
//! ## Example
//!
//! ```no_run
//! use snap_engine::{EngineConfig, GameActor, Seat};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = GameActor::spawn(EngineConfig::default());
//!     let mut status = handle.reader().watch_status();
//!
//!     handle.start_new_game().await.unwrap();
//!     status
//!         .wait_for(|s| *s == snap_engine::GameStatus::Started)
//!         .await;
//!     handle.draw_card(Seat::Player).await.unwrap();
//! }
//! ```

pub mod actor;
pub mod config;
pub mod events;
pub mod messages;
pub mod store;
mod timers;

pub use actor::{EngineError, GameActor, GameHandle};
pub use config::EngineConfig;
pub use events::SnapFlash;
pub use messages::EngineMessage;
pub use store::{FieldWatcher, StateReader, StateStore};
