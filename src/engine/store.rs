//! Single-writer state container with field-scoped subscriptions.
//!
//! [`StateStore`] owns the authoritative [`GameState`] and the bot
//! reaction time; [`StateReader`] is the cloneable subscription endpoint
//! handed to everything else. Two distinct subscription contracts live
//! here and must not be conflated:
//!
//! - state fields and the reaction time replay their current value to
//!   every new subscriber and then deliver changes (`tokio::sync::watch`)
//! - snap events fire once, with no replay, to whoever is subscribed at
//!   emission time (`tokio::sync::broadcast`)

use log::debug;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

use super::config::EngineConfig;
use crate::game::entities::{Card, GameStatus, Seat, SnapEvent};
use crate::game::state_machine::GameState;

/// The single writer. Only the engine actor holds one; `replace` is the
/// sole state mutation primitive, and it always swaps the full aggregate
/// so no observer can see a half-applied command.
#[derive(Debug)]
pub struct StateStore {
    state_tx: watch::Sender<GameState>,
    reaction_tx: watch::Sender<Duration>,
    snap_tx: broadcast::Sender<SnapEvent>,
}

impl StateStore {
    pub fn new(config: &EngineConfig) -> (Self, StateReader) {
        let (state_tx, state_rx) = watch::channel(GameState::new());
        let (reaction_tx, reaction_rx) = watch::channel(config.default_reaction_time);
        let (snap_tx, _) = broadcast::channel(config.snap_event_buffer);
        let reader = StateReader {
            state_rx,
            reaction_rx,
            snap_tx: snap_tx.clone(),
        };
        let store = Self {
            state_tx,
            reaction_tx,
            snap_tx,
        };
        (store, reader)
    }

    /// The latest state. Commands computing a successor must read through
    /// here and replace synchronously, with no await in between.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state_tx.borrow().clone()
    }

    /// Swaps in the next state. Subscribers are only woken when the state
    /// actually changed; returns whether it did.
    pub fn replace(&self, next: GameState) -> bool {
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    #[must_use]
    pub fn reaction_time(&self) -> Duration {
        *self.reaction_tx.borrow()
    }

    /// Updates the reaction time, returning whether the value changed.
    pub fn set_reaction_time(&self, reaction_time: Duration) -> bool {
        self.reaction_tx.send_if_modified(|current| {
            if *current == reaction_time {
                return false;
            }
            *current = reaction_time;
            true
        })
    }

    /// Fans a snap event out to current subscribers. Events are transient:
    /// nobody listening means the event simply evaporates.
    pub fn publish_snap(&self, event: SnapEvent) {
        if self.snap_tx.send(event).is_err() {
            debug!("snap event dropped, no subscribers");
        }
    }
}

/// Read-side handle: snapshots, field-scoped watchers, and the snap-event
/// channel. Cheap to clone and hand to presentation.
#[derive(Clone, Debug)]
pub struct StateReader {
    state_rx: watch::Receiver<GameState>,
    reaction_rx: watch::Receiver<Duration>,
    snap_tx: broadcast::Sender<SnapEvent>,
}

impl StateReader {
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state_rx.borrow().clone()
    }

    #[must_use]
    pub fn watch_player_hand(&self) -> FieldWatcher<Vec<Card>> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.player_hand.clone())
    }

    #[must_use]
    pub fn watch_computer_hand(&self) -> FieldWatcher<Vec<Card>> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.computer_hand.clone())
    }

    #[must_use]
    pub fn watch_center_pile(&self) -> FieldWatcher<Vec<Card>> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.center_pile.clone())
    }

    #[must_use]
    pub fn watch_status(&self) -> FieldWatcher<GameStatus> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.status)
    }

    #[must_use]
    pub fn watch_round(&self) -> FieldWatcher<u32> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.round)
    }

    #[must_use]
    pub fn watch_turn(&self) -> FieldWatcher<Seat> {
        FieldWatcher::new(self.state_rx.clone(), |state| state.turn)
    }

    /// Reaction-time subscription; replays the current value via
    /// `borrow` like any other field.
    #[must_use]
    pub fn watch_reaction_time(&self) -> watch::Receiver<Duration> {
        self.reaction_rx.clone()
    }

    /// Fire-once snap-event subscription. Only attempts made after the
    /// subscription exists are delivered; there is no replay.
    #[must_use]
    pub fn subscribe_snap_events(&self) -> broadcast::Receiver<SnapEvent> {
        self.snap_tx.subscribe()
    }
}

/// A projection of one logical field out of the state aggregate.
///
/// New subscribers see the current value immediately via
/// [`FieldWatcher::current`]; [`FieldWatcher::changed`] then resolves
/// only when the projected field itself changes, so a hand update never
/// wakes a status subscriber.
#[derive(Debug)]
pub struct FieldWatcher<T> {
    rx: watch::Receiver<GameState>,
    project: fn(&GameState) -> T,
    seen: T,
}

impl<T: Clone + PartialEq> FieldWatcher<T> {
    fn new(mut rx: watch::Receiver<GameState>, project: fn(&GameState) -> T) -> Self {
        let seen = project(&rx.borrow_and_update());
        Self { rx, project, seen }
    }

    /// The field's most recent value.
    #[must_use]
    pub fn current(&self) -> T {
        (self.project)(&self.rx.borrow())
    }

    /// Waits for the next change of the projected field. Returns `None`
    /// once the engine has shut down.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            let next = (self.project)(&self.rx.borrow());
            if next != self.seen {
                self.seen = next.clone();
                return Some(next);
            }
        }
    }

    /// Resolves as soon as the field satisfies `predicate`, checking the
    /// current value first. Returns `None` once the engine has shut down.
    pub async fn wait_for(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let current = self.current();
        if predicate(&current) {
            self.seen = current.clone();
            return Some(current);
        }
        loop {
            let next = self.changed().await?;
            if predicate(&next) {
                return Some(next);
            }
        }
    }
}
