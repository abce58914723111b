//! Game session state machine
//!
//! A session owns the secret, the turn budget and the guess log, and moves
//! through `NotStarted -> InProgress -> Won | Lost | Abandoned`.

use super::history::{self, GuessRecord};
use crate::core::{Digits, Score};
use log::debug;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Validated turn budget for one game (10-20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TotalTurns(u8);

impl TotalTurns {
    pub const MIN: u8 = 10;
    pub const MAX: u8 = 20;
    pub const DEFAULT: Self = Self(15);

    /// Accept a turn count inside `10..=20`
    #[must_use]
    pub fn new(turns: u32) -> Option<Self> {
        u8::try_from(turns)
            .ok()
            .filter(|t| (Self::MIN..=Self::MAX).contains(t))
            .map(Self)
    }

    /// Resolve a requested turn count typed by the player
    ///
    /// Anything unparseable or out of range falls back to the default of 15.
    ///
    /// # Examples
    /// ```
    /// use digit_guess::game::{TotalTurns, TurnsSetting};
    ///
    /// assert_eq!(TotalTurns::resolve("12").total().get(), 12);
    /// assert!(matches!(TotalTurns::resolve("42"), TurnsSetting::Defaulted(_)));
    /// assert_eq!(TotalTurns::resolve("lots").total(), TotalTurns::DEFAULT);
    /// ```
    #[must_use]
    pub fn resolve(input: &str) -> TurnsSetting {
        match input.trim().parse::<u32>().ok().and_then(Self::new) {
            Some(turns) => TurnsSetting::Chosen(turns),
            None => TurnsSetting::Defaulted(Self::DEFAULT),
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for TotalTurns {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TotalTurns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a turn request was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnsSetting {
    /// The request was valid
    Chosen(TotalTurns),
    /// The request was rejected and the default substituted
    Defaulted(TotalTurns),
}

impl TurnsSetting {
    #[must_use]
    pub const fn total(self) -> TotalTurns {
        match self {
            Self::Chosen(turns) | Self::Defaulted(turns) => turns,
        }
    }

    #[must_use]
    pub const fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    InProgress,
    Won,
    Lost,
    /// Left mid-game; can be resumed
    Abandoned,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Abandoned => "paused",
        };
        write!(f, "{text}")
    }
}

/// Operation not allowed in the session's current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No game in progress (game is {0})")]
    NotInProgress(Phase),
    #[error("Nothing to resume (game is {0}); start a new game or load one")]
    NotResumable(Phase),
}

/// What happened on the turn just played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Continue { turns_left: usize },
    Won,
    /// Out of turns; carries the secret for the one-time reveal
    Lost { secret: Digits },
}

/// Result of a submitted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// 0-based index of the turn just played
    pub turn_index: usize,
    pub guess: Digits,
    pub score: Score,
    pub status: TurnStatus,
}

/// A single game: secret, turn budget and guess log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    phase: Phase,
    total_turns: TotalTurns,
    secret: Digits,
    guesses: Vec<Digits>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Empty session waiting for a new game or a load
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            total_turns: TotalTurns::DEFAULT,
            secret: Digits::default(),
            guesses: Vec::new(),
        }
    }

    /// Session in progress with a known secret
    #[must_use]
    pub fn with_secret(total_turns: TotalTurns, secret: Digits) -> Self {
        Self {
            phase: Phase::InProgress,
            total_turns,
            secret,
            guesses: Vec::with_capacity(usize::from(total_turns.get())),
        }
    }

    /// Rebuild a session at its resume point
    pub(crate) fn restore(total_turns: TotalTurns, secret: Digits, guesses: Vec<Digits>) -> Self {
        debug_assert!(guesses.len() < usize::from(total_turns.get()));
        Self {
            phase: Phase::InProgress,
            total_turns,
            secret,
            guesses,
        }
    }

    /// Start over with a fresh random secret
    ///
    /// Replaces whatever game was held before, finished or not.
    pub fn new_game<R: Rng + ?Sized>(&mut self, total_turns: TotalTurns, rng: &mut R) {
        *self = Self::with_secret(total_turns, Digits::random(rng));
        debug!("new game started with {total_turns} turns");
    }

    /// Play one turn
    ///
    /// # Errors
    /// Returns `SessionError::NotInProgress` unless the game is in progress;
    /// the session is left untouched in that case.
    pub fn submit_guess(&mut self, guess: Digits) -> Result<TurnOutcome, SessionError> {
        if self.phase != Phase::InProgress {
            return Err(SessionError::NotInProgress(self.phase));
        }

        let turn_index = self.guesses.len();
        let score = Score::calculate(&guess, &self.secret);
        self.guesses.push(guess);

        let status = if score.is_perfect() {
            self.phase = Phase::Won;
            TurnStatus::Won
        } else if self.turns_left() == 0 {
            self.phase = Phase::Lost;
            TurnStatus::Lost {
                secret: self.secret,
            }
        } else {
            TurnStatus::Continue {
                turns_left: self.turns_left(),
            }
        };

        debug!(
            "turn {} of {}: {guess} -> {score}, game {}",
            turn_index + 1,
            self.total_turns,
            self.phase
        );

        Ok(TurnOutcome {
            turn_index,
            guess,
            score,
            status,
        })
    }

    /// Leave the game mid-way; progress is kept for resuming
    ///
    /// # Errors
    /// Returns `SessionError::NotInProgress` unless the game is in progress.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::InProgress {
            return Err(SessionError::NotInProgress(self.phase));
        }
        self.phase = Phase::Abandoned;
        debug!("game paused after {} turns", self.turns_used());
        Ok(())
    }

    /// Continue a paused game
    ///
    /// A game already in progress stays in progress.
    ///
    /// # Errors
    /// Returns `SessionError::NotResumable` if no game was started or the game
    /// is over.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            Phase::Abandoned => {
                self.phase = Phase::InProgress;
                debug!("game resumed at turn {}", self.turns_used() + 1);
                Ok(())
            }
            phase => Err(SessionError::NotResumable(phase)),
        }
    }

    /// Whether the session holds a game worth writing to disk
    #[must_use]
    pub const fn is_saveable(&self) -> bool {
        matches!(self.phase, Phase::InProgress | Phase::Abandoned)
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub const fn total_turns(&self) -> TotalTurns {
        self.total_turns
    }

    /// Turns played so far
    #[inline]
    #[must_use]
    pub fn turns_used(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn turns_left(&self) -> usize {
        usize::from(self.total_turns.get()).saturating_sub(self.guesses.len())
    }

    #[inline]
    #[must_use]
    pub const fn secret(&self) -> &Digits {
        &self.secret
    }

    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[Digits] {
        &self.guesses
    }

    /// Every turn with its feedback, in turn order
    #[must_use]
    pub fn records(&self) -> Vec<GuessRecord> {
        history::records(&self.guesses, &self.secret)
    }

    /// Turns ordered from closest to furthest
    #[must_use]
    pub fn ranked_history(&self) -> Vec<GuessRecord> {
        history::rank(&self.guesses, &self.secret)
    }

    /// Turns whose feedback matches both targets
    #[must_use]
    pub fn search_history(&self, target_digits: u8, target_positions: u8) -> Vec<GuessRecord> {
        history::search(
            &self.guesses,
            &self.secret,
            target_digits,
            target_positions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn code(text: &str) -> Digits {
        Digits::new(text).unwrap()
    }

    fn session(secret: &str, turns: u32) -> GameSession {
        GameSession::with_secret(TotalTurns::new(turns).unwrap(), code(secret))
    }

    #[test]
    fn total_turns_bounds() {
        assert_eq!(TotalTurns::new(10).map(TotalTurns::get), Some(10));
        assert_eq!(TotalTurns::new(20).map(TotalTurns::get), Some(20));
        assert!(TotalTurns::new(9).is_none());
        assert!(TotalTurns::new(21).is_none());
        assert!(TotalTurns::new(300).is_none());
    }

    #[test]
    fn resolve_defaults_bad_requests() {
        assert_eq!(
            TotalTurns::resolve(" 18 "),
            TurnsSetting::Chosen(TotalTurns::new(18).unwrap())
        );
        for bad in ["", "abc", "9", "21", "-12", "15.5"] {
            let setting = TotalTurns::resolve(bad);
            assert!(setting.is_defaulted(), "{bad:?} should default");
            assert_eq!(setting.total().get(), 15);
        }
    }

    #[test]
    fn fresh_session_not_started() {
        let mut game = GameSession::new();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.turns_used(), 0);
        assert_eq!(game.total_turns(), TotalTurns::DEFAULT);
        assert!(!game.is_saveable());

        let err = game.submit_guess(code("1234")).unwrap_err();
        assert_eq!(err, SessionError::NotInProgress(Phase::NotStarted));
        assert_eq!(game.turns_used(), 0);
    }

    #[test]
    fn new_game_uses_injected_rng() {
        let mut a = GameSession::new();
        let mut b = GameSession::new();
        a.new_game(TotalTurns::new(12).unwrap(), &mut StdRng::seed_from_u64(99));
        b.new_game(TotalTurns::new(12).unwrap(), &mut StdRng::seed_from_u64(99));

        assert_eq!(a.phase(), Phase::InProgress);
        assert_eq!(a.secret(), b.secret());
        assert_eq!(a.total_turns().get(), 12);
    }

    #[test]
    fn new_game_discards_previous_guesses() {
        let mut game = session("1234", 10);
        game.submit_guess(code("5678")).unwrap();
        game.new_game(TotalTurns::DEFAULT, &mut StdRng::seed_from_u64(1));

        assert_eq!(game.turns_used(), 0);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn guess_advances_turn() {
        let mut game = session("1234", 10);
        let outcome = game.submit_guess(code("1243")).unwrap();

        assert_eq!(outcome.turn_index, 0);
        assert_eq!(outcome.score.correct_positions(), 2);
        assert_eq!(outcome.score.correct_digits(), 4);
        assert_eq!(outcome.status, TurnStatus::Continue { turns_left: 9 });
        assert_eq!(game.turns_used(), 1);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn perfect_guess_wins() {
        let mut game = session("0420", 10);
        game.submit_guess(code("0000")).unwrap();
        let outcome = game.submit_guess(code("0420")).unwrap();

        assert_eq!(outcome.status, TurnStatus::Won);
        assert_eq!(game.phase(), Phase::Won);
        assert_eq!(game.turns_used(), 2);
        assert!(game.submit_guess(code("0420")).is_err());
    }

    #[test]
    fn win_on_last_turn_is_not_a_loss() {
        let mut game = session("1234", 10);
        for _ in 0..9 {
            game.submit_guess(code("9999")).unwrap();
        }
        let outcome = game.submit_guess(code("1234")).unwrap();
        assert_eq!(outcome.status, TurnStatus::Won);
    }

    #[test]
    fn running_out_of_turns_reveals_secret_once() {
        let mut game = session("1234", 10);
        let mut reveals = 0;
        for _ in 0..10 {
            let outcome = game.submit_guess(code("5678")).unwrap();
            if let TurnStatus::Lost { secret } = outcome.status {
                assert_eq!(secret, code("1234"));
                reveals += 1;
            }
        }

        assert_eq!(reveals, 1);
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(game.turns_used(), 10);
        assert_eq!(
            game.submit_guess(code("1234")),
            Err(SessionError::NotInProgress(Phase::Lost))
        );
        assert_eq!(game.turns_used(), 10);
    }

    #[test]
    fn quit_then_resume() {
        let mut game = session("1234", 10);
        game.submit_guess(code("1111")).unwrap();
        game.quit().unwrap();

        assert_eq!(game.phase(), Phase::Abandoned);
        assert!(game.is_saveable());
        assert_eq!(game.turns_used(), 1);
        assert!(game.submit_guess(code("1234")).is_err());

        game.resume().unwrap();
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.turns_left(), 9);
    }

    #[test]
    fn resume_rejects_finished_or_unstarted() {
        let mut fresh = GameSession::new();
        assert_eq!(
            fresh.resume(),
            Err(SessionError::NotResumable(Phase::NotStarted))
        );

        let mut won = session("1234", 10);
        won.submit_guess(code("1234")).unwrap();
        assert_eq!(won.resume(), Err(SessionError::NotResumable(Phase::Won)));
        assert!(won.quit().is_err());
        assert!(!won.is_saveable());
    }

    #[test]
    fn session_history_views() {
        let mut game = session("1234", 10);
        for guess in ["5678", "1243", "4321"] {
            game.submit_guess(code(guess)).unwrap();
        }

        let ranked: Vec<usize> = game.ranked_history().iter().map(|r| r.turn_index).collect();
        assert_eq!(ranked, vec![1, 2, 0]);

        let found = game.search_history(4, 0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].guess, code("4321"));
        assert_eq!(game.records().len(), 3);
    }
}
