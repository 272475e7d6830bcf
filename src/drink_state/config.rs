use super::error::DrinkError;
use super::{MAX_SHOTS, MAX_SHOT_LIMIT};

/// Configuration for a [`PourState`](super::PourState).
///
/// [`DrinkConfig::default()`] reproduces the reference machine (2 shots per
/// bottle). The bottle count is not stored here; it is the const generic
/// `N` of each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrinkConfig {
    max_shots: u8,
}

impl Default for DrinkConfig {
    fn default() -> Self {
        Self {
            max_shots: MAX_SHOTS,
        }
    }
}

impl DrinkConfig {
    /// Build a config with a custom shot limit.
    ///
    /// Returns [`DrinkError::InvalidConfig`] if `max_shots > 9`, since every
    /// count must render as a single ASCII digit.
    pub fn new(max_shots: u8) -> Result<Self, DrinkError> {
        if max_shots > MAX_SHOT_LIMIT {
            #[cfg(feature = "defmt")]
            defmt::warn!("shot limit {} exceeds {}", max_shots, MAX_SHOT_LIMIT);
            return Err(DrinkError::InvalidConfig);
        }
        Ok(Self { max_shots })
    }

    /// Maximum shots a single bottle can be set to (inclusive).
    pub fn max_shots(&self) -> u8 {
        self.max_shots
    }
}
