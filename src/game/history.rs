//! Guess history views
//!
//! Records are recomputed from the guesses and the secret each time; scores
//! are never stored.

use crate::core::{Digits, Score};
use std::cmp::Reverse;

/// One played turn with its feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRecord {
    /// 0-based turn index
    pub turn_index: usize,
    pub guess: Digits,
    pub score: Score,
}

impl GuessRecord {
    /// 1-based turn number, as shown to the player
    #[must_use]
    pub const fn turn_number(&self) -> usize {
        self.turn_index + 1
    }
}

/// Score every guess, in turn order
#[must_use]
pub fn records(guesses: &[Digits], secret: &Digits) -> Vec<GuessRecord> {
    guesses
        .iter()
        .enumerate()
        .map(|(turn_index, guess)| GuessRecord {
            turn_index,
            guess: *guess,
            score: Score::calculate(guess, secret),
        })
        .collect()
}

/// Guesses ordered from closest to furthest
///
/// Sorted by correct positions, then correct digits, both descending. Ties
/// keep turn order.
///
/// # Examples
/// ```
/// use digit_guess::core::Digits;
/// use digit_guess::game::history::rank;
///
/// let secret = Digits::new("1234").unwrap();
/// let guesses = [Digits::new("5678").unwrap(), Digits::new("1243").unwrap()];
/// let ranked = rank(&guesses, &secret);
///
/// assert_eq!(ranked[0].turn_index, 1);
/// assert_eq!(ranked[1].turn_index, 0);
/// ```
#[must_use]
pub fn rank(guesses: &[Digits], secret: &Digits) -> Vec<GuessRecord> {
    let mut ranked = records(guesses, secret);
    // sort_by_key is stable
    ranked.sort_by_key(|record| Reverse(record.score.closeness()));
    ranked
}

/// Guesses whose feedback matches both targets exactly, in turn order
#[must_use]
pub fn search(
    guesses: &[Digits],
    secret: &Digits,
    target_digits: u8,
    target_positions: u8,
) -> Vec<GuessRecord> {
    records(guesses, secret)
        .into_iter()
        .filter(|record| {
            record.score.correct_digits() == target_digits
                && record.score.correct_positions() == target_positions
        })
        .collect()
}
