//! Guess feedback calculation
//!
//! Feedback for a guess is a pair of counts:
//! - correct positions: guess digit equals the secret digit at the same index
//! - correct digits: guess digits found anywhere in the secret, including the
//!   correct positions, with no digit counted twice on either side

use super::digits::{Digits, NUM_DIGITS};
use std::fmt;

/// Feedback for one guess against the secret
///
/// Invariant: `correct_positions <= correct_digits <= 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    correct_digits: u8,
    correct_positions: u8,
}

impl Score {
    /// Every digit in its place
    pub const PERFECT: Self = Self {
        correct_digits: NUM_DIGITS as u8,
        correct_positions: NUM_DIGITS as u8,
    };

    /// Total digits matched, position matches included
    #[inline]
    #[must_use]
    pub const fn correct_digits(self) -> u8 {
        self.correct_digits
    }

    #[inline]
    #[must_use]
    pub const fn correct_positions(self) -> u8 {
        self.correct_positions
    }

    /// Check if the guess was the secret
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.correct_positions == NUM_DIGITS as u8
    }

    /// Sort key for closeness: positions first, then total digits
    #[inline]
    #[must_use]
    pub const fn closeness(self) -> (u8, u8) {
        (self.correct_positions, self.correct_digits)
    }

    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// # Algorithm
    /// 1. First pass: lock exact position matches, consuming both slots
    /// 2. Second pass: for each unlocked guess slot (ascending), take the first
    ///    unlocked secret slot (ascending) with the same digit
    /// 3. Correct digits is the sum of both passes
    ///
    /// # Examples
    /// ```
    /// use digit_guess::core::{Digits, Score};
    ///
    /// let secret = Digits::new("1123").unwrap();
    /// let guess = Digits::new("1111").unwrap();
    /// let score = Score::calculate(&guess, &secret);
    ///
    /// assert_eq!(score.correct_positions(), 2);
    /// assert_eq!(score.correct_digits(), 2);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Digits, secret: &Digits) -> Self {
        let guess = guess.values();
        let secret = secret.values();
        let mut guess_used = [false; NUM_DIGITS];
        let mut secret_used = [false; NUM_DIGITS];

        // First pass: exact position matches
        let mut correct_positions = 0u8;
        #[allow(clippy::needless_range_loop)]
        for i in 0..NUM_DIGITS {
            if guess[i] == secret[i] {
                correct_positions += 1;
                guess_used[i] = true;
                secret_used[i] = true;
            }
        }

        // Second pass: right digit, wrong place
        let mut misplaced = 0u8;
        #[allow(clippy::needless_range_loop)]
        for i in 0..NUM_DIGITS {
            if guess_used[i] {
                continue;
            }
            let found = (0..NUM_DIGITS).find(|&j| !secret_used[j] && guess[i] == secret[j]);
            if let Some(j) = found {
                secret_used[j] = true;
                misplaced += 1;
            }
        }

        Self {
            correct_digits: correct_positions + misplaced,
            correct_positions,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} digits, {} positions",
            self.correct_digits, self.correct_positions
        )
    }
}
