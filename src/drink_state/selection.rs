use super::check_bottle_index;
use super::error::DrinkError;

/// Cyclic cursor over the `N` bottle slots.
///
/// The position is always a valid index in `[0, N)`. `N` must be non-zero;
/// a zero-bottle selection fails to compile when constructed.
#[derive(Debug, Clone, Copy)]
pub struct BottleSelection<const N: usize> {
    /// Index of the focused bottle.
    position: usize,
    /// Set when the cursor moves, cleared by [`take_changed()`](Self::take_changed).
    changed: bool,
}

impl<const N: usize> Default for BottleSelection<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BottleSelection<N> {
    const NON_EMPTY: () = assert!(N > 0, "a dispenser needs at least one bottle");

    /// Create a selection focused on bottle 0.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            position: 0,
            changed: false,
        }
    }

    /// Move the cursor back to bottle 0 (start of a session).
    pub fn initialize(&mut self) {
        self.move_to(0);
    }

    /// Index of the focused bottle.
    pub fn current(&self) -> usize {
        self.position
    }

    /// Number of bottle slots the cursor cycles over.
    pub fn bottle_count(&self) -> usize {
        N
    }

    /// Focus the next bottle, wrapping from `N - 1` to `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dispenser::drink_state::DrinkSelection;
    ///
    /// let mut selection = DrinkSelection::new();
    /// for _ in 0..5 {
    ///     selection.advance();
    /// }
    /// assert_eq!(selection.current(), 0);
    /// ```
    pub fn advance(&mut self) {
        self.move_to((self.position + 1) % N);
    }

    /// Focus the previous bottle, wrapping from `0` to `N - 1`.
    pub fn retreat(&mut self) {
        let previous = if self.position == 0 {
            N - 1
        } else {
            self.position - 1
        };
        self.move_to(previous);
    }

    /// Jump directly to `index`.
    ///
    /// Returns [`DrinkError::OutOfRange`] if `index >= N`; the cursor does
    /// not move in that case.
    pub fn select(&mut self, index: usize) -> Result<(), DrinkError> {
        let index = check_bottle_index::<N>(index)?;
        self.move_to(index);
        Ok(())
    }

    /// Returns `true` if the cursor moved since the last call, then clears
    /// the flag.
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }

    fn move_to(&mut self, index: usize) {
        if index != self.position {
            self.position = index;
            self.changed = true;
        }
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for BottleSelection<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BottleSelection({}/{})", self.position, N);
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
