use core::fmt;

use heapless::Vec;

use super::check_bottle_index;
use super::config::DrinkConfig;
use super::error::DrinkError;

/// Direction of a single-step shot adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adjustment {
    /// One more shot, saturating at `max_shots`.
    Increase,
    /// One less shot, saturating at `0`.
    Decrease,
}

impl From<bool> for Adjustment {
    /// `true` is [`Increase`](Adjustment::Increase), matching the
    /// "more"/"less" button convention of [`PourState::adjust()`].
    fn from(increase: bool) -> Self {
        if increase {
            Adjustment::Increase
        } else {
            Adjustment::Decrease
        }
    }
}

/// Describes a single slot change, returned by [`PourState::take_changes()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PourChange {
    /// Bottle slot index (0-based).
    pub bottle: usize,
    /// Shot count after the change.
    pub shots: u8,
}

/// Per-bottle shot counts for the drink being assembled.
///
/// Every count is always within `[0, max_shots]`. Single-step adjustments
/// saturate at the bounds; bulk writes are validated up front and either
/// apply completely or not at all.
#[derive(Debug, Clone, Copy)]
pub struct PourState<const N: usize> {
    /// Shot count per bottle slot.
    amounts: [u8; N],
    /// Slots whose count changed since the last [`take_changes()`](Self::take_changes).
    changed: [bool; N],
    config: DrinkConfig,
}

impl<const N: usize> Default for PourState<N> {
    fn default() -> Self {
        Self::new(DrinkConfig::default())
    }
}

impl<const N: usize> PourState<N> {
    /// Create an empty drink (every bottle at 0 shots).
    pub fn new(config: DrinkConfig) -> Self {
        Self {
            amounts: [0; N],
            changed: [false; N],
            config,
        }
    }

    /// Create a drink from a caller-supplied set of amounts.
    ///
    /// Returns [`DrinkError::InvalidInitialState`] if `amounts.len() != N`
    /// or any amount exceeds the configured shot limit.
    pub fn from_amounts(amounts: &[u8], config: DrinkConfig) -> Result<Self, DrinkError> {
        let mut pour = Self::new(config);
        pour.amounts = pour.validate(amounts)?;
        Ok(pour)
    }

    /// Parse the display encoding, where `k` shots is the byte `b'0' + k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dispenser::drink_state::{DrinkConfig, DrinkPour};
    ///
    /// let pour = DrinkPour::from_ascii(b"01200", DrinkConfig::default()).unwrap();
    /// assert_eq!(pour.get_all(), &[0, 1, 2, 0, 0]);
    ///
    /// // '3' is above the default limit of 2 shots.
    /// assert!(DrinkPour::from_ascii(b"03000", DrinkConfig::default()).is_err());
    /// ```
    pub fn from_ascii(bytes: &[u8], config: DrinkConfig) -> Result<Self, DrinkError> {
        if bytes.len() != N {
            return Err(invalid_initial_state());
        }
        let mut amounts = [0u8; N];
        for (amount, &byte) in amounts.iter_mut().zip(bytes) {
            if !byte.is_ascii_digit() {
                return Err(invalid_initial_state());
            }
            *amount = byte - b'0';
        }
        Self::from_amounts(&amounts, config)
    }

    // ── Bulk access ──────────────────────────────────────────────────

    /// Replace every amount at the start of a session.
    ///
    /// Validation happens before any write: on error the drink is unchanged.
    /// Slots whose value differs are marked changed.
    pub fn initialize(&mut self, initial_amounts: &[u8]) -> Result<(), DrinkError> {
        let amounts = self.validate(initial_amounts)?;
        self.store_all(amounts);
        Ok(())
    }

    /// All amounts, indexed by bottle slot.
    pub fn get_all(&self) -> &[u8; N] {
        &self.amounts
    }

    /// Copy all `N` amounts from `new_amounts`.
    ///
    /// Same validation and change tracking as [`initialize()`](Self::initialize).
    pub fn set_all(&mut self, new_amounts: &[u8]) -> Result<(), DrinkError> {
        self.initialize(new_amounts)
    }

    /// Set every bottle back to 0 shots (new order).
    pub fn reset(&mut self) {
        self.store_all([0; N]);
    }

    // ── Per-bottle access ────────────────────────────────────────────

    /// Shot count for `bottle`.
    ///
    /// Returns [`DrinkError::OutOfRange`] if `bottle >= N`.
    pub fn get(&self, bottle: usize) -> Result<u8, DrinkError> {
        let bottle = check_bottle_index::<N>(bottle)?;
        Ok(self.amounts[bottle])
    }

    /// Add (`increase == true`) or remove one shot from `bottle`.
    ///
    /// Only slot `bottle` is written, and by at most one unit. At `0` or
    /// `max_shots` the call is a silent no-op. Returns the count after the
    /// adjustment, or [`DrinkError::OutOfRange`] with no mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dispenser::drink_state::DrinkPour;
    ///
    /// let mut pour = DrinkPour::default();
    /// assert_eq!(pour.adjust(2, true), Ok(1));
    /// assert_eq!(pour.adjust(2, true), Ok(2));
    /// assert_eq!(pour.adjust(2, true), Ok(2)); // clamped at 2 shots
    /// assert_eq!(pour.adjust(2, false), Ok(1));
    /// assert!(pour.adjust(5, true).is_err());
    /// ```
    pub fn adjust(&mut self, bottle: usize, increase: bool) -> Result<u8, DrinkError> {
        self.apply(bottle, Adjustment::from(increase))
    }

    /// Add one shot to `bottle`, saturating at `max_shots`.
    pub fn increment(&mut self, bottle: usize) -> Result<u8, DrinkError> {
        self.apply(bottle, Adjustment::Increase)
    }

    /// Remove one shot from `bottle`, saturating at `0`.
    pub fn decrement(&mut self, bottle: usize) -> Result<u8, DrinkError> {
        self.apply(bottle, Adjustment::Decrease)
    }

    /// Apply a single-step [`Adjustment`] to `bottle`.
    pub fn apply(&mut self, bottle: usize, adjustment: Adjustment) -> Result<u8, DrinkError> {
        let current = self.get(bottle)?;
        let next = match adjustment {
            Adjustment::Increase if current < self.config.max_shots() => current + 1,
            Adjustment::Decrease if current > 0 => current - 1,
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("bottle {} saturated at {} shots", bottle, current);
                return Ok(current);
            }
        };
        self.amounts[bottle] = next;
        self.changed[bottle] = true;
        Ok(next)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Number of bottle slots.
    pub fn bottle_count(&self) -> usize {
        N
    }

    /// Configured shot limit per bottle.
    pub fn max_shots(&self) -> u8 {
        self.config.max_shots()
    }

    /// Sum of shots across all bottles.
    pub fn total_shots(&self) -> u16 {
        self.amounts.iter().map(|&a| u16::from(a)).sum()
    }

    /// Returns `true` if no bottle has any shots selected.
    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    /// Render every count as an ASCII digit (`k` shots → `b'0' + k`).
    pub fn to_ascii(&self) -> [u8; N] {
        core::array::from_fn(|i| b'0' + self.amounts[i])
    }

    // ── Change consumption ───────────────────────────────────────────

    /// Collect every slot whose count changed, in bottle order, then clear
    /// those flags.
    ///
    /// Saturated adjustments never appear here.
    pub fn take_changes(&mut self) -> Vec<PourChange, N> {
        let mut changes = Vec::new();
        for (bottle, changed) in self.changed.iter_mut().enumerate() {
            if core::mem::replace(changed, false) {
                // At most N flags, so the push always fits.
                let _ = changes.push(PourChange {
                    bottle,
                    shots: self.amounts[bottle],
                });
            }
        }
        changes
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Check length and range of a full set of amounts without writing.
    fn validate(&self, amounts: &[u8]) -> Result<[u8; N], DrinkError> {
        let amounts: [u8; N] = amounts.try_into().map_err(|_| invalid_initial_state())?;
        if amounts.iter().any(|&a| a > self.config.max_shots()) {
            return Err(invalid_initial_state());
        }
        Ok(amounts)
    }

    fn store_all(&mut self, amounts: [u8; N]) {
        for (bottle, &amount) in amounts.iter().enumerate() {
            if self.amounts[bottle] != amount {
                self.changed[bottle] = true;
            }
        }
        self.amounts = amounts;
    }
}

impl<const N: usize> fmt::Display for PourState<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &amount in &self.amounts {
            write!(f, "{}", amount)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for PourState<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PourState({=[u8]})", &self.amounts[..]);
    }
}

fn invalid_initial_state() -> DrinkError {
    #[cfg(feature = "defmt")]
    defmt::warn!("rejected pour amounts");
    DrinkError::InvalidInitialState
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    const N: usize = 5;

    fn pour_with(amounts: [u8; N]) -> PourState<N> {
        PourState::from_amounts(&amounts, DrinkConfig::default()).unwrap()
    }

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn default_state_is_empty() {
        let mut pour = PourState::<N>::default();
        assert_eq!(pour.get_all(), &[0; N]);
        assert!(pour.is_empty());
        assert_eq!(pour.total_shots(), 0);
        assert!(pour.take_changes().is_empty());
    }

    // ── Saturation ───────────────────────────────────────────────────

    #[test]
    fn increase_saturates_at_max_shots() {
        for bottle in 0..N {
            let mut pour = PourState::<N>::default();
            for _ in 0..(pour.max_shots() as usize + 3) {
                pour.adjust(bottle, true).unwrap();
            }
            assert_eq!(pour.get(bottle), Ok(2));
        }
    }

    #[test]
    fn decrease_from_zero_stays_zero() {
        for bottle in 0..N {
            let mut pour = PourState::<N>::default();
            for _ in 0..10 {
                pour.adjust(bottle, false).unwrap();
            }
            assert_eq!(pour.get(bottle), Ok(0));
        }
    }

    #[test]
    fn saturation_respects_custom_limit() {
        let mut pour = PourState::<N>::new(DrinkConfig::new(4).unwrap());
        for _ in 0..10 {
            pour.increment(0).unwrap();
        }
        assert_eq!(pour.get(0), Ok(4));
    }

    #[test]
    fn zero_limit_never_increments() {
        let mut pour = PourState::<N>::new(DrinkConfig::new(0).unwrap());
        assert_eq!(pour.increment(1), Ok(0));
        assert!(pour.take_changes().is_empty());
    }

    // ── Round trips ──────────────────────────────────────────────────

    #[test]
    fn interior_round_trip_restores_count() {
        let mut pour = pour_with([1, 1, 1, 1, 1]);
        pour.adjust(3, true).unwrap();
        pour.adjust(3, false).unwrap();
        assert_eq!(pour.get(3), Ok(1));
    }

    #[test]
    fn round_trip_at_max_does_not_restore() {
        let mut pour = pour_with([0, 0, 2, 0, 0]);
        pour.adjust(2, true).unwrap(); // clamped
        pour.adjust(2, false).unwrap();
        assert_eq!(pour.get(2), Ok(1));
    }

    #[test]
    fn decrease_then_increase_at_zero_ends_at_one() {
        let mut pour = PourState::<N>::default();
        pour.adjust(0, false).unwrap(); // clamped
        pour.adjust(0, true).unwrap();
        assert_eq!(pour.get(0), Ok(1));
    }

    // ── Slot isolation ───────────────────────────────────────────────

    #[test]
    fn adjust_touches_only_its_slot() {
        let start = [1, 2, 0, 1, 2];
        for bottle in 0..N {
            for increase in [true, false] {
                let mut pour = pour_with(start);
                pour.adjust(bottle, increase).unwrap();
                for other in (0..N).filter(|&j| j != bottle) {
                    assert_eq!(pour.get(other), Ok(start[other]));
                }
            }
        }
    }

    #[test]
    fn bottle_two_scenario() {
        let mut pour = PourState::<N>::default();
        pour.initialize(&[0, 0, 0, 0, 0]).unwrap();

        pour.adjust(2, true).unwrap();
        assert_eq!(pour.get(2), Ok(1));
        assert_eq!(pour.get_all(), &[0, 0, 1, 0, 0]);

        pour.adjust(2, true).unwrap();
        pour.adjust(2, true).unwrap();
        assert_eq!(pour.get(2), Ok(2));

        pour.adjust(2, false).unwrap();
        assert_eq!(pour.get(2), Ok(1));
    }

    // ── Out of range ─────────────────────────────────────────────────

    #[test]
    fn get_out_of_range() {
        let pour = PourState::<N>::default();
        let expected = |index| DrinkError::OutOfRange {
            index,
            bottle_count: N,
        };
        assert_eq!(pour.get(5), Err(expected(5)));
        // A negative index cast to usize wraps to the top of the range.
        assert_eq!(pour.get(-1isize as usize), Err(expected(usize::MAX)));
    }

    #[test]
    fn adjust_out_of_range_changes_nothing() {
        let mut pour = pour_with([1, 1, 1, 1, 1]);
        assert!(pour.adjust(5, true).is_err());
        assert!(pour.adjust(100, false).is_err());
        assert_eq!(pour.get_all(), &[1; N]);
        assert!(pour.take_changes().is_empty());
    }

    // ── Bulk writes ──────────────────────────────────────────────────

    #[test]
    fn initialize_rejects_wrong_length() {
        let mut pour = PourState::<N>::default();
        assert_eq!(pour.initialize(&[1, 1, 1]), Err(DrinkError::InvalidInitialState));
        assert_eq!(
            pour.initialize(&[1, 1, 1, 1, 1, 1]),
            Err(DrinkError::InvalidInitialState)
        );
        assert_eq!(pour.get_all(), &[0; N]);
    }

    #[test]
    fn initialize_rejects_over_limit_without_partial_write() {
        let mut pour = PourState::<N>::default();
        assert_eq!(
            pour.initialize(&[1, 1, 3, 1, 1]),
            Err(DrinkError::InvalidInitialState)
        );
        assert_eq!(pour.get_all(), &[0; N]);
        assert!(pour.take_changes().is_empty());
    }

    #[test]
    fn set_all_copies_every_slot() {
        let mut pour = PourState::<N>::default();
        pour.set_all(&[2, 1, 0, 1, 2]).unwrap();
        assert_eq!(pour.get_all(), &[2, 1, 0, 1, 2]);
    }

    #[test]
    fn from_amounts_rejects_over_limit() {
        let result = PourState::<N>::from_amounts(&[0, 0, 0, 0, 9], DrinkConfig::default());
        assert_eq!(result.err(), Some(DrinkError::InvalidInitialState));
    }

    #[test]
    fn reset_clears_every_slot() {
        let mut pour = pour_with([2, 1, 0, 1, 2]);
        pour.reset();
        assert!(pour.is_empty());
        let changes = pour.take_changes();
        assert_eq!(changes.len(), 4);
    }

    #[test]
    fn total_shots_sums_slots() {
        let pour = pour_with([2, 1, 0, 1, 2]);
        assert_eq!(pour.total_shots(), 6);
        assert!(!pour.is_empty());
    }

    // ── ASCII encoding ───────────────────────────────────────────────

    #[test]
    fn to_ascii_renders_digits() {
        let pour = pour_with([0, 1, 2, 0, 1]);
        assert_eq!(&pour.to_ascii(), b"01201");
    }

    #[test]
    fn from_ascii_parses_digits() {
        let pour = PourState::<N>::from_ascii(b"20010", DrinkConfig::default()).unwrap();
        assert_eq!(pour.get_all(), &[2, 0, 0, 1, 0]);
    }

    #[test]
    fn from_ascii_rejects_bad_input() {
        let config = DrinkConfig::default();
        assert!(PourState::<N>::from_ascii(b"0000", config).is_err());
        assert!(PourState::<N>::from_ascii(b"000000", config).is_err());
        assert!(PourState::<N>::from_ascii(b"00a00", config).is_err());
        assert!(PourState::<N>::from_ascii(b"0000\0", config).is_err());
        assert!(PourState::<N>::from_ascii(b"00900", config).is_err());
    }

    #[test]
    fn display_writes_digits() {
        let pour = pour_with([1, 0, 2, 0, 0]);
        let mut buf: String<8> = String::new();
        write!(buf, "{}", pour).unwrap();
        assert_eq!(buf.as_str(), "10200");
    }

    // ── Change consumption ───────────────────────────────────────────

    #[test]
    fn take_changes_reports_slot_and_count() {
        let mut pour = PourState::<N>::default();
        pour.increment(3).unwrap();

        let changes = pour.take_changes();
        assert_eq!(changes.as_slice(), &[PourChange { bottle: 3, shots: 1 }]);
        assert!(pour.take_changes().is_empty());
    }

    #[test]
    fn take_changes_in_bottle_order() {
        let mut pour = PourState::<N>::default();
        pour.increment(4).unwrap();
        pour.increment(1).unwrap();

        let changes = pour.take_changes();
        assert_eq!(changes[0].bottle, 1);
        assert_eq!(changes[1].bottle, 4);
    }

    #[test]
    fn saturated_adjust_is_not_a_change() {
        let mut pour = pour_with([2, 0, 0, 0, 0]);
        pour.increment(0).unwrap();
        pour.decrement(1).unwrap();
        assert!(pour.take_changes().is_empty());
    }

    #[test]
    fn initialize_marks_only_differing_slots() {
        let mut pour = pour_with([1, 0, 0, 0, 0]);
        pour.initialize(&[1, 2, 0, 0, 0]).unwrap();
        let changes = pour.take_changes();
        assert_eq!(changes.as_slice(), &[PourChange { bottle: 1, shots: 2 }]);
    }

    // ── Adjustment ───────────────────────────────────────────────────

    #[test]
    fn adjustment_from_bool() {
        assert_eq!(Adjustment::from(true), Adjustment::Increase);
        assert_eq!(Adjustment::from(false), Adjustment::Decrease);
    }
}
