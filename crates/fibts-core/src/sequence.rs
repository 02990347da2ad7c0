//! Unbounded Fibonacci sequence engine.
//!
//! The engine holds exactly one pair of terms at a time. Position in the
//! sequence is only known through the iteration counter carried alongside
//! the pair.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Advances the recurrence by one step.
///
/// Given the two most recent terms `(a, b)`, returns `(b, a + b)`.
///
/// # Examples
///
/// ```
/// use fibts_core::sequence::next;
/// use num_bigint::BigUint;
///
/// let (a, b) = next(&BigUint::from(3u32), &BigUint::from(5u32));
/// assert_eq!(a, BigUint::from(5u32));
/// assert_eq!(b, BigUint::from(8u32));
/// ```
pub fn next(a: &BigUint, b: &BigUint) -> (BigUint, BigUint) {
    (b.clone(), a + b)
}

/// Immutable snapshot of the sequence engine.
///
/// `advance` never mutates; it hands back the emitted term together with
/// the state that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    previous: BigUint,
    current: BigUint,
    /// 1-based index of the next term to be emitted.
    iteration: u64,
}

impl SequenceState {
    /// Seed state: F(0) = 0, F(1) = 1, nothing emitted yet.
    pub fn seed() -> Self {
        Self {
            previous: BigUint::zero(),
            current: BigUint::one(),
            iteration: 1,
        }
    }

    /// Index that the next emitted term will carry.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Computes the next term and returns it with the successor state.
    ///
    /// The first call on a seeded state emits `0 + 1 = 1`, then `2`, `3`,
    /// `5`, `8`, ...
    ///
    /// # Returns
    ///
    /// The emitted term tagged with its iteration, and the state that will
    /// emit the one after it. `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibts_core::SequenceState;
    /// use num_bigint::BigUint;
    ///
    /// let seed = SequenceState::seed();
    /// let (first, state) = seed.advance();
    /// let (second, _) = state.advance();
    ///
    /// assert_eq!((first.iteration, first.value), (1, BigUint::from(1u32)));
    /// assert_eq!((second.iteration, second.value), (2, BigUint::from(2u32)));
    /// assert_eq!(seed.iteration(), 1);
    /// ```
    pub fn advance(&self) -> (Term, SequenceState) {
        let (previous, current) = next(&self.previous, &self.current);
        let term = Term {
            iteration: self.iteration,
            value: current.clone(),
        };
        let state = SequenceState {
            previous,
            current,
            iteration: self.iteration + 1,
        };
        (term, state)
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::seed()
    }
}

/// One emitted term and the iteration it was produced on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub iteration: u64,
    pub value: BigUint,
}

/// Endless iterator over emitted terms, starting from the seed.
#[derive(Debug, Clone, Default)]
pub struct Terms {
    state: SequenceState,
}

impl Terms {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Terms {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        let (term, state) = self.state.advance();
        self.state = state;
        Some(term)
    }
}
