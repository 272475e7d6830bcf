//! Error types for the drink state.

use core::fmt;

/// Errors that can occur when reading or editing the drink state.
///
/// Saturating at `0` or `max_shots` is not an error. Every operation that
/// returns one of these leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrinkError {
    /// Bottle index is out of bounds (must be < `bottle_count`).
    OutOfRange { index: usize, bottle_count: usize },
    /// Supplied amounts have the wrong length, a non-digit byte, or a count
    /// above the shot limit.
    InvalidInitialState,
    /// Shot limit does not fit in a single digit (must be <= 9).
    InvalidConfig,
}

impl fmt::Display for DrinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DrinkError::OutOfRange {
                index,
                bottle_count,
            } => write!(
                f,
                "bottle index {} out of range (dispenser has {} bottles)",
                index, bottle_count
            ),
            DrinkError::InvalidInitialState => write!(f, "invalid initial pour amounts"),
            DrinkError::InvalidConfig => write!(f, "shot limit must be a single digit"),
        }
    }
}
