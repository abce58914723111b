//! TUI application state and logic

use crate::commands::GameConfig;
use crate::commands::prompt::{parse_count, parse_guess};
use crate::core::{Digits, Milestone};
use crate::game::{
    GameSession, GuessRecord, Phase, TotalTurns, TurnOutcome, TurnStatus, load_from_file,
    save_to_file,
};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App {
    pub session: GameSession,
    pub config: GameConfig,
    rng: StdRng,
    pub screen: Screen,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub history_view: HistoryView,
    pub last_turn: Option<TurnOutcome>,
    /// Secret shown once the game is over
    pub reveal: Option<Digits>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    TurnsEntry,
    Playing,
    SearchEntry,
    GameOver,
}

/// Which listing the history panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryView {
    Chronological,
    Ranked,
    Search { digits: u8, positions: u8 },
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = config.rng();
        Self::with_session(config, rng, GameSession::new())
    }

    #[must_use]
    pub fn with_session(config: GameConfig, rng: StdRng, session: GameSession) -> Self {
        Self {
            session,
            config,
            rng,
            screen: Screen::MainMenu,
            input_buffer: String::new(),
            messages: vec![Message {
                text: "Welcome! Crack the 4-digit secret before your turns run out.".to_string(),
                style: MessageStyle::Info,
            }],
            history_view: HistoryView::Chronological,
            last_turn: None,
            reveal: None,
            should_quit: false,
        }
    }

    /// Records for the history panel, per the current view
    #[must_use]
    pub fn history_records(&self) -> Vec<GuessRecord> {
        match self.history_view {
            HistoryView::Chronological => self.session.records(),
            HistoryView::Ranked => self.session.ranked_history(),
            HistoryView::Search { digits, positions } => {
                self.session.search_history(digits, positions)
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit();
            return;
        }

        match self.screen {
            Screen::MainMenu => self.handle_menu_key(key.code),
            Screen::TurnsEntry => self.handle_turns_key(key.code),
            Screen::Playing => self.handle_playing_key(key.code),
            Screen::SearchEntry => self.handle_search_key(key.code),
            Screen::GameOver => match key.code {
                KeyCode::Char('q') => self.exit(),
                _ => self.screen = Screen::MainMenu,
            },
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('1' | 'n') => {
                self.input_buffer.clear();
                self.screen = Screen::TurnsEntry;
                self.add_message(
                    "Number of turns (10-20)? Enter to accept the default of 15.",
                    MessageStyle::Info,
                );
            }
            KeyCode::Char('2' | 'l') => self.load_game(),
            KeyCode::Char('3' | 's') => self.save_game(),
            KeyCode::Char('4' | 'p') => self.play(),
            KeyCode::Char('5' | 'q') | KeyCode::Esc => self.exit(),
            _ => self.add_message("Please choose 1-5!", MessageStyle::Error),
        }
    }

    fn handle_turns_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if self.input_buffer.len() < 3 => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => {
                let request = std::mem::take(&mut self.input_buffer);
                self.new_game(&request);
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.screen = Screen::MainMenu;
            }
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('s') => self.save_game(),
            KeyCode::Char('r') => {
                self.history_view = match self.history_view {
                    HistoryView::Ranked => HistoryView::Chronological,
                    _ => HistoryView::Ranked,
                };
            }
            KeyCode::Char('f' | '/') => {
                if self.session.guesses().is_empty() {
                    self.add_message("No guesses to search.", MessageStyle::Error);
                } else {
                    self.input_buffer.clear();
                    self.screen = Screen::SearchEntry;
                    self.add_message(
                        "Search: enter correct digits and positions, e.g. '3 1'",
                        MessageStyle::Info,
                    );
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit_to_menu(),
            KeyCode::Char(c) if self.input_buffer.len() < 4 => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input_buffer);
                self.handle_guess(&input);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if self.input_buffer.len() < 5 => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input_buffer);
                self.apply_search(&input);
                self.screen = Screen::Playing;
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.screen = Screen::Playing;
            }
            _ => {}
        }
    }

    pub fn new_game(&mut self, request: &str) {
        let setting = TotalTurns::resolve(request);
        if setting.is_defaulted() && !request.trim().is_empty() {
            self.add_message(
                &format!("Using the default of {} turns.", TotalTurns::DEFAULT),
                MessageStyle::Info,
            );
        }

        self.session.new_game(setting.total(), &mut self.rng);
        self.reset_view();
        self.screen = Screen::Playing;
        self.add_message(
            &format!(
                "New game started! Secret number generated. {} turns to find it.",
                setting.total()
            ),
            MessageStyle::Success,
        );
    }

    pub fn handle_guess(&mut self, input: &str) {
        let guess = match parse_guess(input) {
            Ok(guess) => guess,
            Err(err) => {
                self.add_message(&err.to_string(), MessageStyle::Error);
                return;
            }
        };

        let outcome = match self.session.submit_guess(guess) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.add_message(&err.to_string(), MessageStyle::Error);
                return;
            }
        };
        self.last_turn = Some(outcome);

        let turn = outcome.turn_index + 1;
        match outcome.status {
            TurnStatus::Continue { turns_left } => {
                self.add_message(
                    &format!(
                        "Turn {turn}: {} -> {}. Turns left: {turns_left}",
                        outcome.guess, outcome.score
                    ),
                    MessageStyle::Info,
                );
                if self.config.show_phases {
                    self.announce_phase(turn);
                }
            }
            TurnStatus::Won => {
                self.reveal = Some(outcome.guess);
                self.screen = Screen::GameOver;
                self.add_message(
                    &format!("Congratulations! You guessed the number on turn {turn}!"),
                    MessageStyle::Success,
                );
            }
            TurnStatus::Lost { secret } => {
                self.reveal = Some(secret);
                self.screen = Screen::GameOver;
                self.add_message(
                    &format!("Out of turns! The secret number was {secret}."),
                    MessageStyle::Error,
                );
            }
        }
    }

    fn announce_phase(&mut self, turn: usize) {
        let total = u32::from(self.session.total_turns().get());
        if let Some(label) =
            Milestone::at_turn(turn as u32, total).and_then(Milestone::phase_label)
        {
            self.add_message(&format!("[Phase: {label}]"), MessageStyle::Info);
        }
    }

    pub fn apply_search(&mut self, input: &str) {
        let mut parts = input.split_whitespace();
        let parsed = match (parts.next(), parts.next(), parts.next()) {
            (Some(digits), Some(positions), None) => parse_count(digits)
                .and_then(|d| parse_count(positions).map(|p| (d, p)))
                .ok(),
            _ => None,
        };

        match parsed {
            Some((digits, positions)) => {
                self.history_view = HistoryView::Search { digits, positions };
                let found = self.session.search_history(digits, positions).len();
                if found == 0 {
                    self.add_message("No matching guesses found.", MessageStyle::Info);
                } else {
                    self.add_message(
                        &format!("{found} matching guesses (digit={digits}, pos={positions})"),
                        MessageStyle::Info,
                    );
                }
            }
            None => self.add_message("Invalid input.", MessageStyle::Error),
        }
    }

    pub fn play(&mut self) {
        match self.session.resume() {
            Ok(()) => {
                self.screen = Screen::Playing;
                self.add_message(
                    &format!(
                        "Turn {} of {}. Type 4 digits and press Enter.",
                        self.session.turns_used() + 1,
                        self.session.total_turns()
                    ),
                    MessageStyle::Info,
                );
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    pub fn quit_to_menu(&mut self) {
        if self.session.quit().is_ok() {
            self.add_message(
                "Returning to main menu. Progress saved in memory.",
                MessageStyle::Info,
            );
        }
        self.input_buffer.clear();
        self.screen = Screen::MainMenu;
    }

    pub fn save_game(&mut self) {
        match save_to_file(&self.session, &self.config.save_path) {
            Ok(()) => self.add_message("Game progress saved.", MessageStyle::Success),
            Err(err) => self.add_message(&format!("Failed to save game: {err}"), MessageStyle::Error),
        }
    }

    pub fn load_game(&mut self) {
        match load_from_file(&self.config.save_path) {
            Ok(session) => {
                self.session = session;
                self.reset_view();
                self.add_message(
                    &format!(
                        "Game loaded. Resuming from turn {} of {}. Press 4 to play.",
                        self.session.turns_used() + 1,
                        self.session.total_turns()
                    ),
                    MessageStyle::Success,
                );
            }
            Err(err) if err.is_not_found() => {
                self.add_message("No save file found.", MessageStyle::Error);
            }
            Err(err) => self.add_message(&format!("Failed to load game: {err}"), MessageStyle::Error),
        }
    }

    fn reset_view(&mut self) {
        self.history_view = HistoryView::Chronological;
        self.last_turn = None;
        self.reveal = None;
        self.input_buffer.clear();
    }

    fn exit(&mut self) {
        if self.session.phase() == Phase::InProgress {
            let _ = self.session.quit();
        }
        self.should_quit = true;
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn app_with(session: GameSession, dir: &std::path::Path) -> App {
        App::with_session(
            GameConfig::new(dir.join("savegame.txt")),
            StdRng::seed_from_u64(3),
            session,
        )
    }

    fn known_game(secret: &str) -> GameSession {
        GameSession::with_secret(TotalTurns::new(10).unwrap(), Digits::new(secret).unwrap())
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            let code = if c == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(c)
            };
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    fn last_message(app: &App) -> &str {
        &app.messages.last().unwrap().text
    }

    #[test]
    fn new_game_from_menu() {
        let dir = tempdir().unwrap();
        let mut app = app_with(GameSession::new(), dir.path());

        press(&mut app, "112\n");
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.session.phase(), Phase::InProgress);
        assert_eq!(app.session.total_turns().get(), 12);
    }

    #[test]
    fn new_game_defaults_bad_request() {
        let dir = tempdir().unwrap();
        let mut app = app_with(GameSession::new(), dir.path());

        press(&mut app, "1abc\n");
        assert_eq!(app.session.total_turns(), TotalTurns::DEFAULT);
        assert!(
            app.messages
                .iter()
                .any(|m| m.text == "Using the default of 15 turns.")
        );
    }

    #[test]
    fn invalid_menu_key_reports() {
        let dir = tempdir().unwrap();
        let mut app = app_with(GameSession::new(), dir.path());

        press(&mut app, "x");
        assert_eq!(last_message(&app), "Please choose 1-5!");
        assert_eq!(app.screen, Screen::MainMenu);
    }

    #[test]
    fn play_requires_a_game() {
        let dir = tempdir().unwrap();
        let mut app = app_with(GameSession::new(), dir.path());

        press(&mut app, "4");
        assert_eq!(app.screen, Screen::MainMenu);
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);
    }

    #[test]
    fn invalid_guess_leaves_session_unchanged() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());

        press(&mut app, "412\n");
        assert_eq!(last_message(&app), "Please enter exactly 4 digits.");
        assert_eq!(app.session.turns_used(), 0);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn winning_guess_ends_game() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());

        press(&mut app, "45678\n1234\n");
        assert_eq!(app.screen, Screen::GameOver);
        assert_eq!(app.session.phase(), Phase::Won);
        assert_eq!(app.reveal, Some(Digits::new("1234").unwrap()));

        press(&mut app, "x");
        assert_eq!(app.screen, Screen::MainMenu);
    }

    #[test]
    fn losing_reveals_secret() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());

        press(&mut app, "4");
        press(&mut app, &"5678\n".repeat(10));
        assert_eq!(app.session.phase(), Phase::Lost);
        assert_eq!(app.reveal, Some(Digits::new("1234").unwrap()));
        assert_eq!(
            last_message(&app),
            "Out of turns! The secret number was 1234."
        );
    }

    #[test]
    fn history_views_toggle_and_search() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());

        press(&mut app, "45678\n4321\n");
        let order: Vec<usize> = app.history_records().iter().map(|r| r.turn_index).collect();
        assert_eq!(order, vec![0, 1]);

        press(&mut app, "r");
        let order: Vec<usize> = app.history_records().iter().map(|r| r.turn_index).collect();
        assert_eq!(order, vec![1, 0]);

        press(&mut app, "f4 0\n");
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(
            app.history_view,
            HistoryView::Search {
                digits: 4,
                positions: 0
            }
        );
        assert_eq!(app.history_records().len(), 1);

        press(&mut app, "fzz\n");
        assert_eq!(last_message(&app), "Invalid input.");
    }

    #[test]
    fn quit_save_and_load() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());

        press(&mut app, "41111\nq");
        assert_eq!(app.screen, Screen::MainMenu);
        assert_eq!(app.session.phase(), Phase::Abandoned);

        press(&mut app, "3");
        assert_eq!(last_message(&app), "Game progress saved.");

        let mut other = app_with(GameSession::new(), dir.path());
        press(&mut other, "2");
        assert_eq!(other.session.guesses(), app.session.guesses());
        press(&mut other, "4");
        assert_eq!(other.screen, Screen::Playing);
    }

    #[test]
    fn ctrl_c_exits() {
        let dir = tempdir().unwrap();
        let mut app = app_with(known_game("1234"), dir.path());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
