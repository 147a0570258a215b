//! Ephemeral snap-event projections.

use log::warn;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, sleep_until};

use super::store::StateReader;
use crate::game::entities::SnapEvent;

/// Time-windowed view of the latest snap event, for flash feedback.
///
/// The authoritative state never records snap attempts; this projection
/// derives a `Some(event)`-then-`None` signal from the broadcast channel
/// instead, clearing `window` after the last attempt. A newer attempt
/// restarts the window. Dropping every receiver stops the task.
pub struct SnapFlash;

impl SnapFlash {
    pub fn spawn(reader: &StateReader, window: Duration) -> watch::Receiver<Option<SnapEvent>> {
        let mut events = reader.subscribe_snap_events();
        let (tx, rx) = watch::channel(None);

        tokio::spawn(async move {
            let mut deadline: Option<Instant> = None;
            loop {
                let wake = deadline.unwrap_or_else(Instant::now);
                tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => {
                            deadline = Some(Instant::now() + window);
                            if tx.send(Some(event)).is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("snap flash lagged, skipped {skipped} events");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    () = sleep_until(wake), if deadline.is_some() => {
                        deadline = None;
                        if tx.send(None).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::store::StateStore;
    use crate::game::entities::Seat;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(2000);

    fn snap(seat: Seat) -> SnapEvent {
        SnapEvent {
            seat,
            was_correct: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_flash_shows_then_clears() {
        let (store, reader) = StateStore::new(&EngineConfig::default());
        let mut flash = SnapFlash::spawn(&reader, WINDOW);
        assert_eq!(*flash.borrow(), None);

        store.publish_snap(snap(Seat::Player));
        flash.changed().await.unwrap();
        assert_eq!(*flash.borrow(), Some(snap(Seat::Player)));

        sleep(WINDOW + Duration::from_millis(100)).await;
        assert_eq!(*flash.borrow(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_event_restarts_the_window() {
        let (store, reader) = StateStore::new(&EngineConfig::default());
        let mut flash = SnapFlash::spawn(&reader, WINDOW);

        store.publish_snap(snap(Seat::Player));
        flash.changed().await.unwrap();
        sleep(Duration::from_millis(1500)).await;

        store.publish_snap(snap(Seat::Computer));
        flash.changed().await.unwrap();
        sleep(Duration::from_millis(1000)).await;
        // 2500ms after the first event, 1000ms after the second: still lit.
        assert_eq!(*flash.borrow(), Some(snap(Seat::Computer)));

        sleep(Duration::from_millis(1100)).await;
        assert_eq!(*flash.borrow(), None);
    }
}
