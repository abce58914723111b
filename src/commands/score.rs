//! One-shot scoring command
//!
//! Scores a guess against a secret given on the command line.

use crate::core::{Digits, DigitsError, Score};

/// Result of scoring a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub guess: Digits,
    pub secret: Digits,
    pub score: Score,
}

/// Score `guess` against `secret`
///
/// # Errors
///
/// Returns an error if either argument is not exactly four digits.
pub fn score_guess(guess: &str, secret: &str) -> Result<ScoreReport, DigitsError> {
    let guess = Digits::new(guess.trim())?;
    let secret = Digits::new(secret.trim())?;

    Ok(ScoreReport {
        guess,
        secret,
        score: Score::calculate(&guess, &secret),
    })
}
