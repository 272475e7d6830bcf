use super::config::DrinkConfig;
use super::error::DrinkError;
use super::pour::PourState;
use super::selection::BottleSelection;

/// Front-panel state for one dispenser session.
///
/// Owns a [`BottleSelection`] and a [`PourState`] over the same `N` bottle
/// slots. The two stay independent: both fields are public and any bottle
/// can still be edited directly through `pour`. The helpers here cover the
/// usual button wiring, where "more"/"less" act on the focused bottle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispenserState<const N: usize> {
    /// Which bottle the control is focused on.
    pub selection: BottleSelection<N>,
    /// Shot counts for the drink being assembled.
    pub pour: PourState<N>,
}

impl<const N: usize> DispenserState<N> {
    /// Start a session: cursor on bottle 0, every bottle at 0 shots.
    pub fn new(config: DrinkConfig) -> Self {
        Self {
            selection: BottleSelection::new(),
            pour: PourState::new(config),
        }
    }

    /// Adjust the focused bottle by one shot.
    ///
    /// Returns the new count for that bottle. The selection is always a
    /// valid index, so this only fails if the two components disagree on
    /// `N`, which the type system rules out.
    pub fn adjust_selected(&mut self, increase: bool) -> Result<u8, DrinkError> {
        self.pour.adjust(self.selection.current(), increase)
    }

    /// Shot count of the focused bottle.
    pub fn selected_shots(&self) -> Result<u8, DrinkError> {
        self.pour.get(self.selection.current())
    }

    /// Clear the drink and move the cursor back to bottle 0.
    pub fn new_order(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("new order, discarding {} shots", self.pour.total_shots());
        self.pour.reset();
        self.selection.initialize();
    }
}
