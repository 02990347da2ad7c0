//! Digit-substring scanning over emitted terms.

use std::fmt;

use tracing::debug;

/// Target searched for when nothing else is configured.
pub const DEFAULT_TARGET: &str = "003706";

/// Number of digits captured after the target by default.
pub const DEFAULT_WIDTH: usize = 7;

/// Returns the `width` characters that follow the first occurrence of
/// `target` in `digits`.
///
/// Only the leftmost occurrence is considered. When fewer than `width`
/// characters remain after it, or `width` is too large to address, there
/// is no match.
///
/// # Examples
///
/// ```
/// use fibts_core::scanner::following_digits;
///
/// assert_eq!(following_digits("12300370612345678", "003706", 7), Some("1234567"));
/// assert_eq!(following_digits("0037061234", "003706", 7), None);
/// ```
pub fn following_digits<'a>(digits: &'a str, target: &str, width: usize) -> Option<&'a str> {
    let start = digits.find(target)? + target.len();
    let end = start.checked_add(width)?;
    digits.get(start..end)
}

/// One accepted occurrence of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// 1-based count of accepted matches so far.
    pub occurrence: u64,
    pub iteration: u64,
    pub following_digits: String,
}

impl fmt::Display for ScanMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sequence found! Following numbers: {}, Iteration: {}, Found #{}",
            self.following_digits, self.iteration, self.occurrence
        )
    }
}

/// Stateful scanner that numbers accepted matches.
#[derive(Debug, Clone)]
pub struct SubstringScanner {
    target: String,
    width: usize,
    occurrences: u64,
}

impl SubstringScanner {
    pub fn new(target: impl Into<String>, width: usize) -> Self {
        Self {
            target: target.into(),
            width,
            occurrences: 0,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }

    /// Scans the decimal rendering of one term.
    ///
    /// # Arguments
    ///
    /// * `digits` - the term in base 10
    /// * `iteration` - the term's 1-based index, carried into the match
    ///
    /// # Returns
    ///
    /// The match, numbered after every earlier accepted match, or `None`
    /// when the target is absent or too close to the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibts_core::SubstringScanner;
    ///
    /// let mut scanner = SubstringScanner::new("37", 2);
    /// assert!(scanner.scan("1237", 1).is_none());
    ///
    /// let found = scanner.scan("3745", 2).unwrap();
    /// assert_eq!(found.following_digits, "45");
    /// assert_eq!(found.occurrence, 1);
    /// ```
    pub fn scan(&mut self, digits: &str, iteration: u64) -> Option<ScanMatch> {
        let following = following_digits(digits, &self.target, self.width)?;
        self.occurrences += 1;
        debug!(iteration, occurrence = self.occurrences, "target found");
        Some(ScanMatch {
            occurrence: self.occurrences,
            iteration,
            following_digits: following.to_string(),
        })
    }
}

impl Default for SubstringScanner {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, DEFAULT_WIDTH)
    }
}
