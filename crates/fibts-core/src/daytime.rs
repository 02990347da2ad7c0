//! Reinterpretation of a term as elapsed seconds.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Shown in place of a daytime when the term is out of range.
pub const OVERFLOW_SENTINEL: &str = "Overflow - Unable to convert";

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// A term decomposed into days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Daytime {
    pub days: i32,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// The term does not fit the conversion's intermediate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", OVERFLOW_SENTINEL)]
pub struct ConversionOverflow;

impl Daytime {
    /// Converts a term of seconds.
    ///
    /// Total seconds are carried as `u64` and the day count as `i32`; a term
    /// outside either range is an overflow.
    pub fn from_seconds(total: &BigUint) -> Result<Self, ConversionOverflow> {
        let total = total.to_u64().ok_or(ConversionOverflow)?;
        let days = i32::try_from(total / SECONDS_PER_DAY).map_err(|_| ConversionOverflow)?;
        let remainder = total % SECONDS_PER_DAY;

        // Each component is bounded by its divisor, so the narrowing is exact.
        Ok(Self {
            days,
            hours: (remainder / SECONDS_PER_HOUR) as u8,
            minutes: (remainder % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            seconds: (remainder % SECONDS_PER_MINUTE) as u8,
        })
    }
}

impl fmt::Display for Daytime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "Day {}, ", self.days)?;
        }
        write!(
            f,
            "Time {:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Renders a term as a daytime string, degrading to [`OVERFLOW_SENTINEL`].
///
/// ```
/// use fibts_core::{daytime, OVERFLOW_SENTINEL};
/// use num_bigint::BigUint;
///
/// assert_eq!(daytime(&BigUint::from(90_061u32)), "Day 1, Time 01:01:01");
/// assert_eq!(daytime(&(BigUint::from(u64::MAX) + 1u32)), OVERFLOW_SENTINEL);
/// ```
pub fn daytime(term: &BigUint) -> String {
    match Daytime::from_seconds(term) {
        Ok(daytime) => daytime.to_string(),
        Err(overflow) => overflow.to_string(),
    }
}
