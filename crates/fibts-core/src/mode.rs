//! Output modes, chosen once per run.

use std::fmt;

use num_bigint::BigUint;

use crate::daytime::daytime;

/// The three mutually exclusive run modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `Fibonacci: {term}`
    #[default]
    Plain,
    /// `Fibonacci: {term}, Daytime: {daytime}`
    Daytime,
    /// Digit scan; runs its own loop.
    SubstringScan,
}

impl Mode {
    /// Maps the menu number to a mode. Anything other than 2 or 3 is plain.
    pub fn from_number(number: i64) -> Self {
        match number {
            2 => Mode::Daytime,
            3 => Mode::SubstringScan,
            _ => Mode::Plain,
        }
    }

    /// Parses the menu answer typed at the prompt.
    ///
    /// Input that is not an integer falls back to [`Mode::Plain`], so the
    /// returned value is the one used both for reporting and branching.
    ///
    /// # Arguments
    ///
    /// * `input` - The raw answer, surrounding whitespace allowed
    ///
    /// # Returns
    ///
    /// The selected mode; never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibts_core::Mode;
    ///
    /// assert_eq!(Mode::from_selection("2"), Mode::Daytime);
    /// assert_eq!(Mode::from_selection("oops"), Mode::Plain);
    /// ```
    pub fn from_selection(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map(Self::from_number)
            .unwrap_or_default()
    }

    pub fn number(self) -> u8 {
        match self {
            Mode::Plain => 1,
            Mode::Daytime => 2,
            Mode::SubstringScan => 3,
        }
    }

    /// Line layout for the modes that share the presenter loop.
    ///
    /// Returns `None` for [`Mode::SubstringScan`], which runs its own loop.
    pub fn line_format(self) -> Option<LineFormat> {
        match self {
            Mode::Plain => Some(LineFormat::Plain),
            Mode::Daytime => Some(LineFormat::Daytime),
            Mode::SubstringScan => None,
        }
    }

    /// Menu text shown at the prompt.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Plain => "Just generate the Fibonacci sequence (no conversion)",
            Mode::Daytime => {
                "Generate Fibonacci sequence with time conversion (as daytime format)"
            }
            Mode::SubstringScan => "Generate Fibonacci sequence and check for sequence",
        }
    }

    pub fn all() -> [Mode; 3] {
        [Mode::Plain, Mode::Daytime, Mode::SubstringScan]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Plain => "plain",
            Mode::Daytime => "daytime",
            Mode::SubstringScan => "substring-scan",
        };
        f.write_str(name)
    }
}

/// How the presenter renders a term, one variant per presenter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Plain,
    Daytime,
}

impl LineFormat {
    /// Formats one term as an output line.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibts_core::mode::LineFormat;
    /// use num_bigint::BigUint;
    ///
    /// let term = BigUint::from(3_661u32);
    /// assert_eq!(LineFormat::Plain.format(&term), "Fibonacci: 3661");
    /// assert_eq!(
    ///     LineFormat::Daytime.format(&term),
    ///     "Fibonacci: 3661, Daytime: Time 01:01:01"
    /// );
    /// ```
    pub fn format(self, term: &BigUint) -> String {
        match self {
            LineFormat::Plain => format!("Fibonacci: {term}"),
            LineFormat::Daytime => format!("Fibonacci: {term}, Daytime: {}", daytime(term)),
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            LineFormat::Plain => Mode::Plain,
            LineFormat::Daytime => Mode::Daytime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daytime::OVERFLOW_SENTINEL;

    #[test]
    fn test_selection_parsing() {
        assert_eq!(Mode::from_selection("1"), Mode::Plain);
        assert_eq!(Mode::from_selection(" 2 "), Mode::Daytime);
        assert_eq!(Mode::from_selection("3\n"), Mode::SubstringScan);
    }

    #[test]
    fn test_invalid_selection_defaults_to_plain() {
        assert_eq!(Mode::from_selection(""), Mode::Plain);
        assert_eq!(Mode::from_selection("abc"), Mode::Plain);
        assert_eq!(Mode::from_selection("4"), Mode::Plain);
        assert_eq!(Mode::from_selection("-2"), Mode::Plain);
    }

    #[test]
    fn test_number_round_trips_menu() {
        for mode in Mode::all() {
            assert_eq!(Mode::from_number(mode.number() as i64), mode);
        }
    }

    #[test]
    fn test_plain_format() {
        let line = LineFormat::Plain.format(&BigUint::from(13u32));
        assert_eq!(line, "Fibonacci: 13");
    }

    #[test]
    fn test_daytime_format() {
        let line = LineFormat::Daytime.format(&BigUint::from(86_400u32));
        assert_eq!(line, "Fibonacci: 86400, Daytime: Day 1, Time 00:00:00");
    }

    #[test]
    fn test_daytime_format_overflow() {
        let term: BigUint = "354224848179261915075".parse().unwrap();
        let line = LineFormat::Daytime.format(&term);
        assert!(line.ends_with(OVERFLOW_SENTINEL), "{line}");
    }

    #[test]
    fn test_presenter_modes_have_a_line_format() {
        assert_eq!(Mode::Plain.line_format(), Some(LineFormat::Plain));
        assert_eq!(Mode::Daytime.line_format(), Some(LineFormat::Daytime));
        assert_eq!(Mode::SubstringScan.line_format(), None);
        for format in [LineFormat::Plain, LineFormat::Daytime] {
            assert_eq!(format.mode().line_format(), Some(format));
        }
    }
}
