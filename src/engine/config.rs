//! Engine configuration.

use std::time::Duration;

use crate::game::constants::{DEALING_DURATION, DEFAULT_REACTION_TIME, SNAP_FLASH_WINDOW};

/// Tuning knobs for a single engine instance.
///
/// Engines are constructed from a config rather than reading ambient
/// globals, so tests can build isolated instances with shortened timers.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// How long the dealing phase lasts before play opens.
    pub dealing_duration: Duration,
    /// Bot reaction time in effect until `set_reaction_time` changes it.
    pub default_reaction_time: Duration,
    /// How long the snap flash projection keeps an event visible.
    pub snap_flash_window: Duration,
    /// Command inbox depth.
    pub command_buffer: usize,
    /// Snap-event broadcast capacity. Subscribers that lag past this many
    /// events lose the oldest ones.
    pub snap_event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            DEALING_DURATION,
            DEFAULT_REACTION_TIME,
            SNAP_FLASH_WINDOW,
            100,
            16,
        )
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn new(
        dealing_duration: Duration,
        default_reaction_time: Duration,
        snap_flash_window: Duration,
        command_buffer: usize,
        snap_event_buffer: usize,
    ) -> Self {
        Self {
            dealing_duration,
            default_reaction_time,
            snap_flash_window,
            command_buffer,
            snap_event_buffer,
        }
    }
}
