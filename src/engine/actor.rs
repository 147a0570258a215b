//! Engine actor with async message handling.
//!
//! All mutations funnel through one task: commands from [`GameHandle`]
//! and elapsed timers land in the same inbox and are applied one at a
//! time against the latest snapshot, so a timer can never preempt an
//! in-flight command and the round-completion check always observes the
//! exact post-flip state that triggered it.

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::sleep;

use std::time::Duration;

use super::config::EngineConfig;
use super::events::SnapFlash;
use super::messages::EngineMessage;
use super::store::{StateReader, StateStore};
use super::timers::ArmedTimer;
use crate::bot;
use crate::game::entities::{Card, Deck, GameStatus, Seat, SnapEvent};
use crate::game::state_machine::{GameError, GameState};

/// Errors surfaced by [`GameHandle`] commands.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    /// The engine task has shut down.
    #[error("engine is closed")]
    Closed,
    /// The game rejected the command.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Cloneable handle for issuing commands and reading state.
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<EngineMessage>,
    reader: StateReader,
    snap_flash_window: Duration,
}

impl GameHandle {
    /// Subscription endpoint: field watchers, reaction time, snap events.
    #[must_use]
    pub fn reader(&self) -> &StateReader {
        &self.reader
    }

    /// The latest full state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.reader.snapshot()
    }

    /// Spawns a flash projection of the snap-event channel for this
    /// handle, using the engine's configured window.
    #[must_use]
    pub fn snap_flash(&self) -> watch::Receiver<Option<SnapEvent>> {
        SnapFlash::spawn(&self.reader, self.snap_flash_window)
    }

    /// Starts or restarts a game. Always legal.
    pub async fn start_new_game(&self) -> Result<(), EngineError> {
        let (response, ack) = oneshot::channel();
        self.send(EngineMessage::StartNewGame { response }).await?;
        ack.await.map_err(|_| EngineError::Closed)
    }

    /// Draws the top card of `seat`'s hand. `Ok(None)` means the draw was
    /// ignored as out of turn or out of phase.
    pub async fn draw_card(&self, seat: Seat) -> Result<Option<Card>, EngineError> {
        let (response, ack) = oneshot::channel();
        self.send(EngineMessage::DrawCard { seat, response }).await?;
        Ok(ack.await.map_err(|_| EngineError::Closed)??)
    }

    /// Attempts to snap the pile. `Ok(None)` means the attempt was
    /// ignored; otherwise the emitted event is echoed back.
    pub async fn attempt_snap(&self, seat: Seat) -> Result<Option<SnapEvent>, EngineError> {
        let (response, ack) = oneshot::channel();
        self.send(EngineMessage::AttemptSnap { seat, response })
            .await?;
        ack.await.map_err(|_| EngineError::Closed)
    }

    /// Updates the bot reaction time. Survives `reset`.
    pub async fn set_reaction_time(&self, reaction_time: Duration) -> Result<(), EngineError> {
        let (response, ack) = oneshot::channel();
        self.send(EngineMessage::SetReactionTime {
            reaction_time,
            response,
        })
        .await?;
        ack.await.map_err(|_| EngineError::Closed)
    }

    /// Stops playing and returns to the ready state.
    pub async fn reset(&self) -> Result<(), EngineError> {
        let (response, ack) = oneshot::channel();
        self.send(EngineMessage::Reset { response }).await?;
        ack.await.map_err(|_| EngineError::Closed)
    }

    async fn send(&self, message: EngineMessage) -> Result<(), EngineError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| EngineError::Closed)
    }
}

/// Engine actor owning the authoritative state and the background timers.
pub struct GameActor {
    config: EngineConfig,

    /// Reference deck, built once and reshuffled into every deal.
    deck: Deck,

    /// Single-writer state container.
    store: StateStore,

    /// Command and timer inbox.
    inbox: mpsc::Receiver<EngineMessage>,

    /// Weak clone of the inbox sender handed to sleeper tasks; weak so a
    /// pending timer cannot keep a dropped engine alive.
    timer_tx: mpsc::WeakSender<EngineMessage>,

    /// Pending dealing-phase delay.
    dealing_timer: ArmedTimer,

    /// Pending bot reaction delay.
    bot_timer: ArmedTimer,

    /// `(round, turn, status)` triple the bot delay was last armed for.
    bot_trigger: (u32, Seat, GameStatus),
}

impl GameActor {
    #[must_use]
    pub fn new(config: EngineConfig) -> (Self, GameHandle) {
        let (sender, inbox) = mpsc::channel(config.command_buffer);
        let (store, reader) = StateStore::new(&config);
        let snapshot = store.snapshot();
        let snap_flash_window = config.snap_flash_window;

        let actor = Self {
            timer_tx: sender.downgrade(),
            deck: Deck::new(),
            dealing_timer: ArmedTimer::new(),
            bot_timer: ArmedTimer::new(),
            bot_trigger: (snapshot.round, snapshot.turn, snapshot.status),
            config,
            store,
            inbox,
        };
        let handle = GameHandle {
            sender,
            reader,
            snap_flash_window,
        };
        (actor, handle)
    }

    /// Constructs an engine and spawns its run loop onto the runtime.
    #[must_use]
    pub fn spawn(config: EngineConfig) -> GameHandle {
        let (actor, handle) = Self::new(config);
        tokio::spawn(actor.run());
        handle
    }

    /// Runs until every handle is gone and no timer is in flight.
    pub async fn run(mut self) {
        info!("snap engine started");
        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            self.rearm_bot_on_trigger_change();
        }
        info!("snap engine closed");
    }

    fn handle_message(&mut self, message: EngineMessage) {
        match message {
            EngineMessage::StartNewGame { response } => {
                self.start_new_game();
                let _ = response.send(());
            }
            EngineMessage::DrawCard { seat, response } => {
                let _ = response.send(self.draw_card(seat));
            }
            EngineMessage::AttemptSnap { seat, response } => {
                let _ = response.send(self.attempt_snap(seat));
            }
            EngineMessage::SetReactionTime {
                reaction_time,
                response,
            } => {
                self.set_reaction_time(reaction_time);
                let _ = response.send(());
            }
            EngineMessage::Reset { response } => {
                self.reset();
                let _ = response.send(());
            }
            EngineMessage::DealingElapsed { generation } => self.on_dealing_elapsed(generation),
            EngineMessage::BotElapsed { generation } => self.on_bot_elapsed(generation),
        }
    }

    fn start_new_game(&mut self) {
        let mut next = self.store.snapshot();
        next.start_new_game(&self.deck);
        let round = next.round;
        let opener = next.turn;
        self.store.replace(next);
        self.arm_dealing_timer();
        info!("round {round} dealing, {opener} opens");
    }

    fn draw_card(&mut self, seat: Seat) -> Result<Option<Card>, GameError> {
        let mut next = self.store.snapshot();
        let drawn = next.draw_card(seat)?;
        if let Some(card) = drawn {
            debug!("{seat} drew {card}");
            let status = next.status;
            self.store.replace(next);
            if status.is_outcome() {
                info!("round over: {status}");
            }
        }
        Ok(drawn)
    }

    fn attempt_snap(&mut self, seat: Seat) -> Option<SnapEvent> {
        let mut next = self.store.snapshot();
        let event = next.attempt_snap(seat)?;
        self.store.replace(next);
        self.store.publish_snap(event);
        debug!(
            "{seat} snapped {}",
            if event.was_correct { "correctly" } else { "wrongly" }
        );
        Some(event)
    }

    fn set_reaction_time(&mut self, reaction_time: Duration) {
        if self.store.set_reaction_time(reaction_time) {
            debug!("reaction time set to {reaction_time:?}");
            self.arm_bot_timer();
        }
    }

    fn reset(&mut self) {
        let mut next = self.store.snapshot();
        next.reset();
        self.store.replace(next);
        self.dealing_timer.disarm();
        info!("game reset");
    }

    fn on_dealing_elapsed(&mut self, generation: u64) {
        if !self.dealing_timer.fire(generation) {
            return;
        }
        let mut next = self.store.snapshot();
        if next.finish_dealing() {
            let round = next.round;
            self.store.replace(next);
            info!("round {round} started");
        }
    }

    /// One bot action batch per armed delay: snap first when the pile has
    /// a match, then draw when it is the bot's turn. The next batch needs
    /// a fresh arming.
    fn on_bot_elapsed(&mut self, generation: u64) {
        if !self.bot_timer.fire(generation) {
            return;
        }
        let snapshot = self.store.snapshot();
        for action in bot::decide(&snapshot) {
            match action {
                bot::BotAction::Snap => {
                    self.attempt_snap(Seat::Computer);
                }
                bot::BotAction::Draw => {
                    if let Err(error) = self.draw_card(Seat::Computer) {
                        warn!("bot draw failed: {error}");
                    }
                }
            }
        }
    }

    /// The bot watches the `(round, turn, status)` triple: any change
    /// re-arms its delay with the reaction time in effect right now,
    /// superseding whatever was pending.
    fn rearm_bot_on_trigger_change(&mut self) {
        let snapshot = self.store.snapshot();
        let trigger = (snapshot.round, snapshot.turn, snapshot.status);
        if trigger != self.bot_trigger {
            self.bot_trigger = trigger;
            self.arm_bot_timer();
        }
    }

    fn arm_dealing_timer(&mut self) {
        let generation = self.dealing_timer.arm();
        let delay = self.config.dealing_duration;
        self.spawn_sleeper(delay, EngineMessage::DealingElapsed { generation });
    }

    fn arm_bot_timer(&mut self) {
        let generation = self.bot_timer.arm();
        let delay = self.store.reaction_time();
        self.spawn_sleeper(delay, EngineMessage::BotElapsed { generation });
    }

    fn spawn_sleeper(&self, delay: Duration, message: EngineMessage) {
        let Some(sender) = self.timer_tx.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = sender.send(message).await;
        });
    }
}
