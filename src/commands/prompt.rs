//! Line-based input reading
//!
//! Every read yields a typed `Reply`: a parsed value, a validation error for
//! the caller to report, or the end of input. A bad line is consumed whole,
//! so the next read always starts on a fresh line.

use crate::core::{Digits, DigitsError};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Malformed player input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid input.")]
    NotANumber(String),
    #[error("Please choose {min}-{max}!")]
    OutOfRange { min: u8, max: u8 },
    #[error(transparent)]
    Guess(#[from] DigitsError),
}

/// Outcome of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Valid(T),
    Invalid(InputError),
    /// Input stream closed
    Closed,
}

/// Parse a menu choice in `min..=max`
///
/// # Errors
/// Returns `InputError::OutOfRange` for anything that is not a number in
/// range, including text that is not a number at all.
pub fn parse_choice(text: &str, min: u8, max: u8) -> Result<u8, InputError> {
    text.trim()
        .parse::<u8>()
        .ok()
        .filter(|choice| (min..=max).contains(choice))
        .ok_or(InputError::OutOfRange { min, max })
}

/// Parse a four-digit guess
///
/// # Errors
/// Returns `InputError::Guess` if the text is not exactly four digits.
pub fn parse_guess(text: &str) -> Result<Digits, InputError> {
    Ok(Digits::new(text.trim())?)
}

/// Parse a small non-negative count
///
/// # Errors
/// Returns `InputError::NotANumber` if the text is not a number.
pub fn parse_count(text: &str) -> Result<u8, InputError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))
}

/// Prompts on a writer and reads answers from a reader
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `prompt` and read one raw line, without the line ending
    ///
    /// Returns `None` once the input is exhausted.
    ///
    /// # Errors
    /// Returns any I/O error from reading or writing.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Show `prompt`, read one line and parse it
    ///
    /// # Errors
    /// Returns any I/O error from reading or writing. Parse failures are
    /// reported through `Reply::Invalid`.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl FnOnce(&str) -> Result<T, InputError>,
    ) -> io::Result<Reply<T>> {
        Ok(match self.read_line(prompt)? {
            None => Reply::Closed,
            Some(line) => match parse(&line) {
                Ok(value) => Reply::Valid(value),
                Err(err) => Reply::Invalid(err),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parse_choice_in_range() {
        assert_eq!(parse_choice(" 3 ", 1, 5), Ok(3));
        assert_eq!(
            parse_choice("6", 1, 5),
            Err(InputError::OutOfRange { min: 1, max: 5 })
        );
        assert_eq!(
            parse_choice("two", 1, 5),
            Err(InputError::OutOfRange { min: 1, max: 5 })
        );
        assert_eq!(
            InputError::OutOfRange { min: 1, max: 5 }.to_string(),
            "Please choose 1-5!"
        );
    }

    #[test]
    fn parse_guess_reports_reason() {
        assert_eq!(parse_guess("0123\n"), Ok(Digits::new("0123").unwrap()));
        assert_eq!(
            parse_guess("123"),
            Err(InputError::Guess(DigitsError::InvalidLength(3)))
        );
        assert_eq!(
            parse_guess("12x4").unwrap_err().to_string(),
            "All characters must be digits (0-9)."
        );
    }

    #[test]
    fn parse_count_rejects_text() {
        assert_eq!(parse_count("2"), Ok(2));
        assert_eq!(parse_count("two"), Err(InputError::NotANumber("two".into())));
        assert_eq!(parse_count("-1"), Err(InputError::NotANumber("-1".into())));
    }

    #[test]
    fn read_line_strips_line_endings() {
        let mut p = prompter("12\r\nnext\n");
        assert_eq!(p.read_line("> ").unwrap(), Some("12".to_string()));
        assert_eq!(p.read_line("> ").unwrap(), Some("next".to_string()));
        assert_eq!(p.read_line("> ").unwrap(), None);
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "> > > ");
    }

    #[test]
    fn ask_consumes_bad_line_whole() {
        let mut p = prompter("abc def\n4\n");
        assert_eq!(
            p.ask("Choose: ", |s| parse_choice(s, 1, 5)).unwrap(),
            Reply::Invalid(InputError::OutOfRange { min: 1, max: 5 })
        );
        assert_eq!(
            p.ask("Choose: ", |s| parse_choice(s, 1, 5)).unwrap(),
            Reply::Valid(4)
        );
        assert_eq!(
            p.ask("Choose: ", |s| parse_choice(s, 1, 5)).unwrap(),
            Reply::Closed
        );
    }
}
