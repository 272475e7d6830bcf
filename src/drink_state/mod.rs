//! Dispenser front-panel state: bottle focus and per-bottle pour amounts.
//!
//! This module provides the two leaf components edited by the dispenser's
//! input loop and read by its display:
//!
//! - [`BottleSelection`]: a cyclic cursor over the bottle slots. The
//!   "next"/"previous" controls call [`advance()`](BottleSelection::advance)
//!   and [`retreat()`](BottleSelection::retreat), which wrap at both ends.
//! - [`PourState`]: one shot count per bottle, bounded to
//!   `[0, max_shots]`. Increments and decrements saturate silently at the
//!   bounds instead of wrapping or failing.
//!
//! Neither component knows about the other. [`DispenserState`] bundles them
//! for the common case where the "more"/"less" controls act on the bottle
//! under the cursor.
//!
//! ```text
//! cursor:        v
//! bottle:   [0] [1] [2] [3] [4]
//! shots:     0   2   1   0   0      → display "02100"
//! ```
//!
//! # Configuration
//!
//! The bottle count is the const generic `N` of every component, and the
//! shot limit comes from [`DrinkConfig`]. [`BOTTLE_COUNT`] and [`MAX_SHOTS`]
//! describe the reference five-bottle machine.
//!
//! # Change Tracking
//!
//! Both components carry dirty flags so a display task only redraws what
//! moved. [`BottleSelection::take_changed()`] reports cursor movement and
//! [`PourState::take_changes()`] reports every slot whose count changed.
//! Saturated no-op adjustments do not set a flag.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Storage is fixed-size arrays and the change list is a
//! [`heapless::Vec`]. The optional `defmt` feature enables structured
//! logging for embedded targets.

mod config;
mod dispenser;
mod error;
mod pour;
mod selection;
#[cfg(feature = "shared")]
mod shared;

pub use config::DrinkConfig;
pub use dispenser::DispenserState;
pub use error::DrinkError;
pub use pour::{Adjustment, PourChange, PourState};
pub use selection::BottleSelection;
#[cfg(feature = "shared")]
pub use shared::{shared_dispenser, SharedDispenser};

/// Number of bottle slots on the reference dispenser.
pub const BOTTLE_COUNT: usize = 5;

/// Default maximum shots per bottle.
pub const MAX_SHOTS: u8 = 2;

/// Largest accepted shot limit. Counts are rendered as one ASCII digit.
pub const MAX_SHOT_LIMIT: u8 = 9;

/// [`PourState`] sized for the reference dispenser.
pub type DrinkPour = PourState<BOTTLE_COUNT>;

/// [`BottleSelection`] sized for the reference dispenser.
pub type DrinkSelection = BottleSelection<BOTTLE_COUNT>;

/// Validate a bottle index against a dispenser with `N` slots.
fn check_bottle_index<const N: usize>(index: usize) -> Result<usize, DrinkError> {
    if index >= N {
        #[cfg(feature = "defmt")]
        defmt::warn!("bottle index {} out of range (count {})", index, N);
        return Err(DrinkError::OutOfRange {
            index,
            bottle_count: N,
        });
    }
    Ok(index)
}
