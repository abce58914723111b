//! Formatting utilities for terminal output
//!
//! ASCII-art glyphs for the title and for revealing the secret.

use crate::core::Digits;

/// Height of every glyph, in rows
pub const GLYPH_ROWS: usize = 5;

const DIGIT_GLYPHS: [[&str; GLYPH_ROWS]; 10] = [
    [" ***** ", " *   * ", " *   * ", " *   * ", " ***** "],
    ["  **   ", " ***   ", "  **   ", "  **   ", " ***** "],
    [" ***** ", "     * ", " ***** ", " *     ", " ***** "],
    [" ***** ", "     * ", " ***** ", "     * ", " ***** "],
    [" *   * ", " *   * ", " ***** ", "     * ", "     * "],
    [" ***** ", " *     ", " ***** ", "     * ", " ***** "],
    [" ***** ", " *     ", " ***** ", " *   * ", " ***** "],
    [" ***** ", "     * ", "    *  ", "   *   ", "  *    "],
    [" ***** ", " *   * ", " ***** ", " *   * ", " ***** "],
    [" ***** ", " *   * ", " ***** ", "     * ", " ***** "],
];

const LETTER_G: [&str; GLYPH_ROWS] = [" ***** ", " *     ", " *  ** ", " *   * ", " ***** "];
const LETTER_O: [&str; GLYPH_ROWS] = [" ***** ", " *   * ", " *   * ", " *   * ", " ***** "];
const LETTER_P: [&str; GLYPH_ROWS] = [" ***** ", " *   * ", " ***** ", " *     ", " *     "];
const DOT: [&str; GLYPH_ROWS] = ["   ", "   ", " * ", "   ", "   "];

/// Render a code as five rows of large digits
///
/// # Examples
/// ```
/// use digit_guess::core::Digits;
/// use digit_guess::output::formatters::large_digits;
///
/// let rows = large_digits(&Digits::new("1234").unwrap());
/// assert_eq!(rows.len(), 5);
/// ```
#[must_use]
pub fn large_digits(code: &Digits) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            code.values()
                .iter()
                .map(|&digit| DIGIT_GLYPHS[usize::from(digit)][row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// The "G.O.P" title banner
#[must_use]
pub fn title_art() -> Vec<String> {
    let glyphs = [&LETTER_G, &DOT, &LETTER_O, &DOT, &LETTER_P];
    (0..GLYPH_ROWS)
        .map(|row| {
            glyphs
                .iter()
                .map(|glyph| glyph[row])
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

/// Singular or plural noun for a count
#[must_use]
pub fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}
