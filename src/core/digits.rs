//! Four-digit codes
//!
//! `Digits` is the value type behind both the secret and every guess.

use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in every secret and guess
pub const NUM_DIGITS: usize = 4;

/// A validated sequence of four decimal digits
///
/// Each element is in `0..=9`. Used for the secret and for guesses alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digits([u8; NUM_DIGITS]);

/// Error type for invalid digit strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitsError {
    #[error("Please enter exactly 4 digits.")]
    InvalidLength(usize),
    #[error("All characters must be digits (0-9).")]
    NonDigit,
}

impl Digits {
    /// Parse four digit characters
    ///
    /// # Errors
    /// Returns `DigitsError` if:
    /// - Length is not exactly 4 characters
    /// - Any character is outside `'0'..='9'`
    ///
    /// # Examples
    /// ```
    /// use digit_guess::core::Digits;
    ///
    /// let code = Digits::new("0482").unwrap();
    /// assert_eq!(code.values(), &[0, 4, 8, 2]);
    ///
    /// assert!(Digits::new("12345").is_err());
    /// assert!(Digits::new("12a4").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, DigitsError> {
        let count = text.chars().count();
        if count != NUM_DIGITS {
            return Err(DigitsError::InvalidLength(count));
        }

        let mut values = [0u8; NUM_DIGITS];
        for (slot, ch) in values.iter_mut().zip(text.chars()) {
            *slot = ch.to_digit(10).ok_or(DigitsError::NonDigit)? as u8;
        }

        Ok(Self(values))
    }

    /// Build from raw values
    ///
    /// Returns `None` if any value is greater than 9.
    #[must_use]
    pub fn from_values(values: [u8; NUM_DIGITS]) -> Option<Self> {
        values.iter().all(|&d| d <= 9).then_some(Self(values))
    }

    /// Draw four independent, uniformly distributed digits
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values = [0u8; NUM_DIGITS];
        for slot in &mut values {
            *slot = rng.random_range(0..10);
        }
        Self(values)
    }

    #[inline]
    #[must_use]
    pub const fn values(&self) -> &[u8; NUM_DIGITS] {
        &self.0
    }

    /// Get the digit at a specific position (0-3)
    ///
    /// # Panics
    /// Panics if position >= 4
    #[inline]
    #[must_use]
    pub const fn digit_at(&self, position: usize) -> u8 {
        self.0[position]
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self([0; NUM_DIGITS])
    }
}

impl FromStr for Digits {
    type Err = DigitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}
