//! Drink selection state for a multi-bottle dispenser UI.
//!
//! The [`drink_state`] module holds the two pieces of state the dispenser
//! front panel edits: which bottle the control is focused on
//! ([`BottleSelection`](drink_state::BottleSelection)) and how many shots
//! of each bottle the user has dialled in
//! ([`PourState`](drink_state::PourState)).
//!
//! # Quick Start
//!
//! ```
//! use dispenser::drink_state::{DispenserState, DrinkConfig, BOTTLE_COUNT};
//!
//! let mut state: DispenserState<BOTTLE_COUNT> = DispenserState::new(DrinkConfig::default());
//!
//! // Button "next", then "more" twice on bottle 1.
//! state.selection.advance();
//! state.adjust_selected(true).unwrap();
//! state.adjust_selected(true).unwrap();
//!
//! assert_eq!(state.pour.get(1), Ok(2));
//! assert_eq!(state.pour.to_ascii(), *b"02000");
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`](https://docs.rs/defmt).
//! - **`shared`**: [`SharedDispenser`](drink_state::SharedDispenser), an
//!   `embassy-sync` mutex around [`DispenserState`](drink_state::DispenserState)
//!   for firmware that reads the state from more than one task.

#![no_std]

pub mod drink_state;
