//! Game-wide constants.

use std::time::Duration;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Cards dealt to each hand at the start of a round.
pub const HAND_SIZE: usize = DECK_SIZE / 2;

/// How long the dealing phase lasts before play opens.
pub const DEALING_DURATION: Duration = Duration::from_millis(2000);

/// Bot reaction time used until the player adjusts it.
pub const DEFAULT_REACTION_TIME: Duration = Duration::from_millis(1000);

/// Upper bound presentation layers clamp the reaction time slider to.
/// The engine itself accepts any non-negative duration.
pub const MAX_REACTION_TIME: Duration = Duration::from_millis(5000);

/// How long a snap event stays visible before the flash projection
/// clears it.
pub const SNAP_FLASH_WINDOW: Duration = Duration::from_millis(2000);

/// Maximum rotation jitter, in degrees, applied to a freshly drawn card.
pub const MAX_CARD_ROTATION: f32 = 20.0;
