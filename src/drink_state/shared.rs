//! Coarse-lock wrapper for sharing [`DispenserState`] between async tasks.
//!
//! One mutex guards both the selection and the pour amounts. Hold the guard
//! only for in-memory updates, never across bus I/O:
//!
//! ```ignore
//! static DISPENSER: StaticCell<SharedDispenser<CriticalSectionRawMutex, BOTTLE_COUNT>> =
//!     StaticCell::new();
//!
//! let dispenser = DISPENSER.init(shared_dispenser(DrinkConfig::default()));
//!
//! // In the button task:
//! {
//!     let mut state = dispenser.lock().await;
//!     state.adjust_selected(true)?;
//! } // mutex released before any display flush
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use super::config::DrinkConfig;
use super::dispenser::DispenserState;

/// [`DispenserState`] behind an `embassy-sync` mutex.
///
/// `M` is the raw mutex flavour: `CriticalSectionRawMutex` when tasks run
/// on different executors or interrupt priorities, `NoopRawMutex` when they
/// share one executor.
pub type SharedDispenser<M, const N: usize> = Mutex<M, DispenserState<N>>;

/// Create a fresh session wrapped in a [`SharedDispenser`].
pub fn shared_dispenser<M: RawMutex, const N: usize>(config: DrinkConfig) -> SharedDispenser<M, N> {
    Mutex::new(DispenserState::new(config))
}
