//! Digit Guess
//!
//! A terminal game: find a secret 4-digit number within a limited number of
//! turns, guided by how many digits and positions each guess gets right.
//!
//! # Quick Start
//!
//! ```rust
//! use digit_guess::core::{Digits, Score};
//!
//! let guess = Digits::new("2213").unwrap();
//! let secret = Digits::new("1234").unwrap();
//!
//! let score = Score::calculate(&guess, &secret);
//! assert_eq!(score.correct_digits(), 3);
//! assert_eq!(score.correct_positions(), 1);
//! ```

// Core domain types
pub mod core;

// Sessions, history and save files
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
