//! Two-bit saturating counter.
//!
//! States 0 and 1 predict not-taken, 2 and 3 predict taken. Training moves
//! one step toward the observed outcome and stops at the ends; it never wraps.

/// Strongly not-taken.
pub const STRONGLY_NOT_TAKEN: u8 = 0b00;
/// Weakly not-taken.
pub const WEAKLY_NOT_TAKEN: u8 = 0b01;
/// Weakly taken; the state of an untrained counter.
pub const WEAKLY_TAKEN: u8 = 0b10;
/// Strongly taken.
pub const STRONGLY_TAKEN: u8 = 0b11;

/// A 2-bit saturating counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SatCounter(u8);

impl Default for SatCounter {
    fn default() -> Self {
        Self(WEAKLY_TAKEN)
    }
}

impl SatCounter {
    /// Creates a counter, clamping `value` into `0..=3`.
    pub const fn new(value: u8) -> Self {
        if value > STRONGLY_TAKEN {
            Self(STRONGLY_TAKEN)
        } else {
            Self(value)
        }
    }

    /// Raw counter value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Direction this counter currently predicts.
    #[inline]
    pub const fn predicts_taken(self) -> bool {
        self.0 >= WEAKLY_TAKEN
    }

    /// Moves toward strongly taken.
    #[inline]
    pub fn increment(&mut self) {
        self.0 = (self.0 + 1).min(STRONGLY_TAKEN);
    }

    /// Moves toward strongly not-taken.
    #[inline]
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Trains toward the resolved direction.
    #[inline]
    pub fn train(&mut self, taken: bool) {
        if taken {
            self.increment();
        } else {
            self.decrement();
        }
    }
}
