//! Simple interactive CLI mode
//!
//! Numbered main menu and in-game menu on plain stdin/stdout.

use super::config::GameConfig;
use super::prompt::{Prompter, Reply, parse_choice, parse_count, parse_guess};
use crate::game::{
    GameSession, PersistenceError, Phase, TotalTurns, TurnStatus, load_from_file, save_to_file,
};
use crate::output::{
    print_loss, print_phase, print_ranked, print_search_results, print_title, print_turn_result,
    print_win,
};
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Whether the menus should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Console front end driving one session at a time
pub struct Console<R, W, G> {
    prompter: Prompter<R, W>,
    session: GameSession,
    rng: G,
    config: GameConfig,
}

impl<R: BufRead, W: Write, G: Rng> Console<R, W, G> {
    pub fn new(input: R, output: W, rng: G, config: GameConfig) -> Self {
        Self::with_session(input, output, rng, config, GameSession::new())
    }

    /// Start from an existing session instead of an empty one
    pub fn with_session(
        input: R,
        output: W,
        rng: G,
        config: GameConfig,
        session: GameSession,
    ) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            session,
            rng,
            config,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run the main menu until the player exits or input ends
    ///
    /// # Errors
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        print_title(self.prompter.output())?;

        loop {
            let out = self.prompter.output();
            writeln!(out)?;
            writeln!(out, "{}", "Main Menu:".bright_cyan().bold())?;
            writeln!(out, "1. {}", "New Game".green())?;
            writeln!(out, "2. {}", "Load Game".yellow())?;
            writeln!(out, "3. {}", "Save Game".blue())?;
            writeln!(out, "4. {}", "Play".cyan())?;
            writeln!(out, "5. {}", "Exit".red())?;

            let flow = match self.prompter.ask("Choose (1-5): ", |s| parse_choice(s, 1, 5))? {
                Reply::Valid(1) => self.new_game()?,
                Reply::Valid(2) => self.load()?,
                Reply::Valid(3) => self.save()?,
                Reply::Valid(4) => self.play()?,
                Reply::Valid(_) | Reply::Closed => Flow::Exit,
                Reply::Invalid(err) => {
                    writeln!(self.prompter.output(), "{err}")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                writeln!(self.prompter.output(), "\nThanks for playing! Goodbye :)\n")?;
                return Ok(());
            }
        }
    }

    fn new_game(&mut self) -> io::Result<Flow> {
        let request = self
            .prompter
            .read_line("Number of turns (10-20): ")?
            .unwrap_or_default();
        let setting = TotalTurns::resolve(&request);
        let out = self.prompter.output();
        if setting.is_defaulted() {
            writeln!(
                out,
                "{}",
                format!("Using the default of {} turns.", setting.total()).bright_black()
            )?;
        }

        self.session.new_game(setting.total(), &mut self.rng);
        writeln!(
            self.prompter.output(),
            "New game started! Secret number generated."
        )?;
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> io::Result<Flow> {
        let out = self.prompter.output();
        match load_from_file(&self.config.save_path) {
            Ok(session) => {
                self.session = session;
                writeln!(
                    out,
                    "Game loaded. Resuming from turn {} of {}.",
                    self.session.turns_used() + 1,
                    self.session.total_turns()
                )?;
            }
            Err(err) if err.is_not_found() => {
                writeln!(out, "No save file found.")?;
                writeln!(out, "{}", "Failed to load game.".red())?;
            }
            Err(err) => report_persistence_failure(out, "load", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> io::Result<Flow> {
        let out = self.prompter.output();
        match save_to_file(&self.session, &self.config.save_path) {
            Ok(()) => writeln!(out, "Game progress saved.")?,
            Err(err) => report_persistence_failure(out, "save", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self) -> io::Result<Flow> {
        if let Err(err) = self.session.resume() {
            writeln!(self.prompter.output(), "{}", err.to_string().red())?;
            return Ok(Flow::Continue);
        }

        let out = self.prompter.output();
        writeln!(out, "\n=== GAME MODE ===")?;
        writeln!(
            out,
            "Digits: 4, Total Turns: {}",
            self.session.total_turns()
        )?;
        writeln!(out, "Starting at turn {}.", self.session.turns_used() + 1)?;

        while self.session.phase() == Phase::InProgress {
            let out = self.prompter.output();
            writeln!(out)?;
            writeln!(out, "{}", "In-Game Menu".bright_cyan().bold())?;
            writeln!(out, "1. {}", "Guess".green())?;
            writeln!(out, "2. {}", "Save Progress".yellow())?;
            writeln!(out, "3. {}", "Sort & View Guess History".blue())?;
            writeln!(out, "4. {}", "Search Guess History".magenta())?;
            writeln!(out, "5. {}", "Quit".red())?;

            match self.prompter.ask("Choose (1-5): ", |s| parse_choice(s, 1, 5))? {
                Reply::Valid(1) => {
                    if self.take_turn()? == Flow::Exit {
                        self.pause();
                        return Ok(Flow::Exit);
                    }
                }
                Reply::Valid(2) => {
                    self.save()?;
                }
                Reply::Valid(3) => {
                    let ranked = self.session.ranked_history();
                    print_ranked(self.prompter.output(), &ranked)?;
                }
                Reply::Valid(4) => {
                    if self.search()? == Flow::Exit {
                        self.pause();
                        return Ok(Flow::Exit);
                    }
                }
                Reply::Valid(_) => {
                    self.pause();
                    writeln!(
                        self.prompter.output(),
                        "Returning to main menu. Progress saved in memory."
                    )?;
                    return Ok(Flow::Continue);
                }
                Reply::Invalid(_) => {
                    writeln!(self.prompter.output(), "Please choose 1-5.")?;
                }
                Reply::Closed => {
                    self.pause();
                    return Ok(Flow::Exit);
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Read guesses until one is valid, then score it
    fn take_turn(&mut self) -> io::Result<Flow> {
        let prompt = format!(
            "Turn {}/{} - Enter a 4-digit guess: ",
            self.session.turns_used() + 1,
            self.session.total_turns()
        );

        let guess = loop {
            match self.prompter.ask(&prompt, parse_guess)? {
                Reply::Valid(guess) => break guess,
                Reply::Invalid(err) => writeln!(self.prompter.output(), "{err}")?,
                Reply::Closed => return Ok(Flow::Exit),
            }
        };

        let Ok(outcome) = self.session.submit_guess(guess) else {
            return Ok(Flow::Continue);
        };

        let out = self.prompter.output();
        print_turn_result(out, &outcome)?;
        if self.config.show_phases {
            let total = u32::from(self.session.total_turns().get());
            print_phase(out, outcome.turn_index as u32 + 1, total)?;
        }

        match outcome.status {
            TurnStatus::Continue { turns_left } => writeln!(
                out,
                "Turns left: {turns_left}/{}",
                self.session.total_turns()
            )?,
            TurnStatus::Won => print_win(out, &outcome.guess, outcome.turn_index + 1)?,
            TurnStatus::Lost { secret } => print_loss(out, &secret)?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        if self.session.guesses().is_empty() {
            writeln!(self.prompter.output(), "No guesses to search.")?;
            return Ok(Flow::Continue);
        }

        let target_digits = match self
            .prompter
            .ask("Enter target correct digits (total): ", parse_count)?
        {
            Reply::Valid(value) => value,
            Reply::Invalid(err) => {
                writeln!(self.prompter.output(), "{err}")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };
        let target_positions = match self
            .prompter
            .ask("Enter target correct positions: ", parse_count)?
        {
            Reply::Valid(value) => value,
            Reply::Invalid(err) => {
                writeln!(self.prompter.output(), "{err}")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };

        let found = self.session.search_history(target_digits, target_positions);
        print_search_results(
            self.prompter.output(),
            target_digits,
            target_positions,
            &found,
        )?;
        Ok(Flow::Continue)
    }

    /// Leave the game paused; a no-op once it has finished
    fn pause(&mut self) {
        if self.session.quit().is_ok() {
            log::debug!("left game at turn {}", self.session.turns_used() + 1);
        }
    }
}

fn report_persistence_failure<W: Write>(
    out: &mut W,
    action: &str,
    err: &PersistenceError,
) -> io::Result<()> {
    writeln!(out, "Error: {err}")?;
    writeln!(out, "{}", format!("Failed to {action} game.").red())
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or writing
/// to the terminal.
pub fn run_simple(config: &GameConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.rng(), config.clone());
    console.run()
}
