//! Core domain types for the guessing game
//!
//! Pure value types and calculations: no I/O, no session state.

mod digits;
mod milestone;
mod score;

pub use digits::{Digits, DigitsError, NUM_DIGITS};
pub use milestone::Milestone;
pub use score::Score;
