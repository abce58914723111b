//! Save file format
//!
//! Plain text, one field per line:
//!
//! ```text
//! 4          number of digits, must be 4
//! 4821       secret
//! 15         total turns
//! 2          turns used
//! 1234       one line per guess
//! 5678
//! ```
//!
//! Scores are not stored; they are recomputed from the secret on load.

use super::session::{GameSession, Phase, TotalTurns};
use crate::core::{Digits, DigitsError, NUM_DIGITS};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default save file, relative to the working directory
pub const DEFAULT_SAVE_FILE: &str = "savegame.txt";

/// Structural problems in save data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveFormatError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("invalid or incompatible save (digits must be 4, found {0})")]
    DigitCount(u32),
    #[error("error reading secret: {0}")]
    Secret(DigitsError),
    #[error("turn count {0} is outside 10-20")]
    TotalTurns(u32),
    #[error("turns used ({used}) must be below total turns ({total})")]
    TurnsUsed { used: u32, total: u32 },
    #[error("error reading guess {turn}: {source}")]
    Guess { turn: usize, source: DigitsError },
    #[error("only {found} of {expected} guesses present")]
    MissingGuesses { expected: usize, found: usize },
    #[error("guess {0} already matches the secret; the game is over")]
    AlreadySolved(usize),
}

/// Failure to save or load a game
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt save file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: SaveFormatError,
    },
    #[error("nothing to save: game is {0}")]
    NotSaveable(Phase),
}

impl PersistenceError {
    /// Whether the failure was simply a missing save file
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Render a session in save file format
#[must_use]
pub fn encode(session: &GameSession) -> String {
    let mut lines = vec![
        NUM_DIGITS.to_string(),
        session.secret().to_string(),
        session.total_turns().to_string(),
        session.turns_used().to_string(),
    ];
    lines.extend(session.guesses().iter().map(ToString::to_string));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Rebuild a session from save file text
///
/// The result is in progress at the saved turn.
///
/// # Errors
/// Returns `SaveFormatError` if the digit count is not 4, a numeric field
/// does not parse, the secret or a guess is not four digits, or fewer
/// guesses are present than the header declares.
///
/// # Examples
/// ```
/// use digit_guess::game::save::decode;
///
/// let session = decode("4\n4821\n15\n1\n1234\n").unwrap();
/// assert_eq!(session.secret().to_string(), "4821");
/// assert_eq!(session.turns_used(), 1);
///
/// assert!(decode("5\n48210\n15\n0\n").is_err());
/// ```
pub fn decode(text: &str) -> Result<GameSession, SaveFormatError> {
    let mut lines = text.lines().map(str::trim);

    let num_digits = parse_number(lines.next(), "digit count")?;
    if num_digits as usize != NUM_DIGITS {
        return Err(SaveFormatError::DigitCount(num_digits));
    }

    let secret = Digits::new(lines.next().ok_or(SaveFormatError::MissingField("secret"))?)
        .map_err(SaveFormatError::Secret)?;

    let total = parse_number(lines.next(), "total turns")?;
    let total_turns = TotalTurns::new(total).ok_or(SaveFormatError::TotalTurns(total))?;

    let used = parse_number(lines.next(), "turns used")?;
    if used >= total {
        return Err(SaveFormatError::TurnsUsed { used, total });
    }
    let expected = used as usize;

    let mut guesses = Vec::with_capacity(expected);
    for (turn_index, line) in lines.take(expected).enumerate() {
        let guess = Digits::new(line).map_err(|source| SaveFormatError::Guess {
            turn: turn_index + 1,
            source,
        })?;
        if guess == secret {
            return Err(SaveFormatError::AlreadySolved(turn_index + 1));
        }
        guesses.push(guess);
    }

    if guesses.len() < expected {
        return Err(SaveFormatError::MissingGuesses {
            expected,
            found: guesses.len(),
        });
    }

    Ok(GameSession::restore(total_turns, secret, guesses))
}

fn parse_number(line: Option<&str>, field: &'static str) -> Result<u32, SaveFormatError> {
    let line = line.ok_or(SaveFormatError::MissingField(field))?;
    line.parse().map_err(|_| SaveFormatError::NotANumber {
        field,
        value: line.to_string(),
    })
}

/// Write the session to `path`
///
/// The file is either fully replaced or left as it was: data goes to a
/// sibling temporary file that is then renamed over the target.
///
/// # Errors
/// Returns `PersistenceError::NotSaveable` unless a game is in progress or
/// paused, or `PersistenceError::Io` if the file cannot be written.
pub fn save_to_file<P: AsRef<Path>>(session: &GameSession, path: P) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    if !session.is_saveable() {
        return Err(PersistenceError::NotSaveable(session.phase()));
    }

    let io_error = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let temp_path = temp_path_for(path);
    if let Err(source) = fs::write(&temp_path, encode(session)) {
        let _ = fs::remove_file(&temp_path);
        warn!("saving to {} failed: {source}", path.display());
        return Err(io_error(source));
    }
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        warn!("saving to {} failed: {source}", path.display());
        return Err(io_error(source));
    }

    info!(
        "saved game at turn {} of {} to {}",
        session.turns_used(),
        session.total_turns(),
        path.display()
    );
    Ok(())
}

/// Read a session from `path`
///
/// # Errors
/// Returns `PersistenceError::Io` if the file cannot be read, or
/// `PersistenceError::Format` if its contents are not a resumable game.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<GameSession, PersistenceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| {
        warn!("loading {} failed: {source}", path.display());
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let session = decode(&text).map_err(|source| {
        warn!("rejecting save file {}: {source}", path.display());
        PersistenceError::Format {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "loaded game at turn {} of {} from {}",
        session.turns_used(),
        session.total_turns(),
        path.display()
    );
    Ok(session)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::TurnStatus;
    use tempfile::tempdir;

    fn code(text: &str) -> Digits {
        Digits::new(text).unwrap()
    }

    fn sample_session() -> GameSession {
        let mut session = GameSession::with_secret(TotalTurns::new(12).unwrap(), code("4821"));
        session.submit_guess(code("1234")).unwrap();
        session.submit_guess(code("0048")).unwrap();
        session
    }

    #[test]
    fn encode_layout() {
        assert_eq!(encode(&sample_session()), "4\n4821\n12\n2\n1234\n0048\n");
    }

    #[test]
    fn decode_round_trip() {
        let original = sample_session();
        let restored = decode(&encode(&original)).unwrap();

        assert_eq!(restored.secret(), original.secret());
        assert_eq!(restored.total_turns(), original.total_turns());
        assert_eq!(restored.turns_used(), original.turns_used());
        assert_eq!(restored.guesses(), original.guesses());
        assert_eq!(restored.phase(), Phase::InProgress);
    }

    #[test]
    fn decode_paused_game_resumes_in_progress() {
        let mut original = sample_session();
        original.quit().unwrap();
        let restored = decode(&encode(&original)).unwrap();
        assert_eq!(restored.phase(), Phase::InProgress);
    }

    #[test]
    fn decode_tolerates_whitespace_and_extra_lines() {
        let session = decode("4\r\n 0007 \n10\n0\nleftover\n").unwrap();
        assert_eq!(session.secret(), &code("0007"));
        assert_eq!(session.turns_used(), 0);
    }

    #[test]
    fn decode_rejects_wrong_digit_count() {
        assert_eq!(
            decode("5\n48215\n15\n0\n").unwrap_err(),
            SaveFormatError::DigitCount(5)
        );
    }

    #[test]
    fn decode_rejects_short_guess_line() {
        let err = decode("4\n4821\n15\n2\n1234\n123\n").unwrap_err();
        assert_eq!(
            err,
            SaveFormatError::Guess {
                turn: 2,
                source: DigitsError::InvalidLength(3)
            }
        );
    }

    #[test]
    fn decode_rejects_non_numeric_turns() {
        let err = decode("4\n4821\nfifteen\n0\n").unwrap_err();
        assert!(matches!(
            err,
            SaveFormatError::NotANumber {
                field: "total turns",
                ..
            }
        ));
    }

    #[test]
    fn decode_rejects_bad_secret() {
        assert_eq!(
            decode("4\n48a1\n15\n0\n").unwrap_err(),
            SaveFormatError::Secret(DigitsError::NonDigit)
        );
    }

    #[test]
    fn decode_rejects_truncated_data() {
        assert_eq!(
            decode("4\n4821\n").unwrap_err(),
            SaveFormatError::MissingField("total turns")
        );
        assert_eq!(
            decode("4\n4821\n15\n3\n1234\n").unwrap_err(),
            SaveFormatError::MissingGuesses {
                expected: 3,
                found: 1
            }
        );
        assert_eq!(decode("").unwrap_err(), SaveFormatError::MissingField("digit count"));
    }

    #[test]
    fn decode_rejects_finished_games() {
        assert_eq!(
            decode("4\n4821\n10\n10\n").unwrap_err(),
            SaveFormatError::TurnsUsed { used: 10, total: 10 }
        );
        assert_eq!(
            decode("4\n4821\n10\n1\n4821\n").unwrap_err(),
            SaveFormatError::AlreadySolved(1)
        );
        assert_eq!(
            decode("4\n4821\n30\n0\n").unwrap_err(),
            SaveFormatError::TotalTurns(30)
        );
    }

    #[test]
    fn file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("savegame.txt");
        let original = sample_session();

        save_to_file(&original, &path).unwrap();
        let mut restored = load_from_file(&path).unwrap();

        assert_eq!(restored.guesses(), original.guesses());
        assert!(!temp_path_for(&path).exists());

        let outcome = restored.submit_guess(code("4821")).unwrap();
        assert_eq!(outcome.turn_index, 2);
        assert_eq!(outcome.status, TurnStatus::Won);
    }

    #[test]
    fn save_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("savegame.txt");
        fs::write(&path, "old contents\n").unwrap();

        save_to_file(&sample_session(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), encode(&sample_session()));
    }

    #[test]
    fn save_refuses_unsaveable_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("savegame.txt");

        let err = save_to_file(&GameSession::new(), &path).unwrap_err();
        assert!(matches!(err, PersistenceError::NotSaveable(Phase::NotStarted)));
        assert!(!path.exists());
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("savegame.txt");

        let err = save_to_file(&sample_session(), &path).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_from_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("savegame.txt");
        fs::write(&path, "5\n12345\n15\n0\n").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Format {
                source: SaveFormatError::DigitCount(5),
                ..
            }
        ));
    }
}
