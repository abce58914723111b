//! Display functions for game results
//!
//! Everything writes to a caller-supplied writer so the console front end
//! can be driven and checked in tests.

use super::formatters::{large_digits, title_art};
use crate::core::{Digits, Milestone, Score};
use crate::game::{GuessRecord, TurnOutcome};
use colored::Colorize;
use std::io::{self, Write};

/// Print the title banner
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_title<W: Write>(out: &mut W) -> io::Result<()> {
    for row in title_art() {
        writeln!(out, "{}", row.bright_yellow().bold())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "        GUESS THE NUMBER GAME".bold())?;
    writeln!(out)
}

/// Print the feedback for one turn
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_turn_result<W: Write>(out: &mut W, outcome: &TurnOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("TURN {} RESULT", outcome.turn_index + 1).bold()
    )?;
    writeln!(out, "{}", "-".repeat(25).bold())?;
    print_score(out, outcome.score)?;
    writeln!(out, "Your Guess: {}", outcome.guess)
}

/// Print both feedback counts, coloured by whether anything matched
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_score<W: Write>(out: &mut W, score: Score) -> io::Result<()> {
    let location = format!("Correct Location: {}", score.correct_positions());
    if score.correct_positions() > 0 {
        writeln!(out, "{}", location.green())?;
    } else {
        writeln!(out, "{}", location.red())?;
    }

    let number = format!("Correct Number: {}", score.correct_digits());
    if score.correct_digits() > 0 {
        writeln!(out, "{}", number.yellow())
    } else {
        writeln!(out, "{}", number.red())
    }
}

/// Print the guess history from closest to furthest
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_ranked<W: Write>(out: &mut W, ranked: &[GuessRecord]) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "No guesses to sort.");
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "=== Sorted Guess History (Best to Worst) ===".bright_cyan()
    )?;
    for record in ranked {
        writeln!(
            out,
            "Turn {:2}: {} -> {}",
            record.turn_number(),
            record.guess,
            record.score
        )?;
    }
    writeln!(out)
}

/// Print the guesses that matched a search
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_search_results<W: Write>(
    out: &mut W,
    target_digits: u8,
    target_positions: u8,
    found: &[GuessRecord],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("=== Search Results (digit={target_digits}, pos={target_positions}) ===")
            .bright_magenta()
    )?;
    if found.is_empty() {
        writeln!(out, "No matching guesses found.")?;
    }
    for record in found {
        writeln!(out, "Turn {:2}: {}", record.turn_number(), record.guess)?;
    }
    writeln!(out)
}

/// Celebrate a win and show the secret in large digits
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_win<W: Write>(out: &mut W, guess: &Digits, turns: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "Congratulations! You guessed the number!".bright_green().bold()
    )?;
    writeln!(
        out,
        "Your final guess: {} (turn {turns})",
        guess.to_string().green()
    )?;
    print_large(out, guess)
}

/// Announce a loss and reveal the secret
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_loss<W: Write>(out: &mut W, secret: &Digits) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Out of turns!".bright_red().bold())?;
    writeln!(out, "The secret number was: {}", secret.to_string().bold())?;
    print_large(out, secret)
}

fn print_large<W: Write>(out: &mut W, code: &Digits) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Secret number (ASCII art):".bold())?;
    for row in large_digits(code) {
        writeln!(out, "{row}")?;
    }
    writeln!(out)
}

/// Print a phase marker when a turn lands on a labelled milestone
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn print_phase<W: Write>(out: &mut W, turn: u32, total_turns: u32) -> io::Result<()> {
    match Milestone::at_turn(turn, total_turns).and_then(Milestone::phase_label) {
        Some(label) => writeln!(out, "{}", format!("[Phase: {label}]").bright_black()),
        None => Ok(()),
    }
}
