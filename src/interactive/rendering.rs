//! TUI rendering with ratatui
//!
//! Board, history and message panels for the guessing game.

use super::app::{App, HistoryView, MessageStyle, Screen};
use crate::core::{Milestone, NUM_DIGITS, Score};
use crate::game::{GuessRecord, Phase};
use crate::output::formatters::large_digits;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

const MENU: [&str; 5] = [
    "1. New Game",
    "2. Load Game",
    "3. Save Game",
    "4. Play Game",
    "5. Exit",
];

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Left panel
            Constraint::Percentage(45), // Right panel
        ])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("G.O.P - GUESS THE NUMBER GAME")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::MainMenu | Screen::TurnsEntry => render_menu(f, app, area),
        Screen::GameOver => render_reveal(f, app, area),
        Screen::Playing | Screen::SearchEntry => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6), // Last result
                    Constraint::Min(4),    // Board
                ])
                .split(area);

            render_last_turn(f, app, chunks[0]);
            render_board(f, app, chunks[1]);
        }
    }
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = MENU
        .iter()
        .map(|item| Line::from(format!("  {item}")))
        .collect();

    lines.push(Line::from(""));
    let game = match app.session.phase() {
        Phase::NotStarted => "No game yet.".to_string(),
        phase => format!(
            "Current game: {phase}, {} of {} turns used",
            app.session.turns_used(),
            app.session.total_turns()
        ),
    };
    lines.push(Line::from(Span::styled(
        game,
        Style::default().fg(Color::DarkGray),
    )));

    let menu = Paragraph::new(lines).block(
        Block::default()
            .title(" Main Menu ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(menu, area);
}

fn render_last_turn(f: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(outcome) = app.last_turn {
        vec![
            Line::from(vec![
                Span::raw("Your Guess:       "),
                Span::styled(
                    outcome.guess.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            score_line("Correct Location: ", outcome.score.correct_positions(), Color::Green),
            score_line("Correct Number:   ", outcome.score.correct_digits(), Color::Yellow),
        ]
    } else {
        vec![Line::from("No guesses yet this session.")]
    };

    let title = app
        .last_turn
        .map_or_else(|| " Result ".to_string(), |o| format!(" Turn {} Result ", o.turn_index + 1));

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn score_line(label: &'static str, count: u8, color: Color) -> Line<'static> {
    let color = if count > 0 { color } else { Color::Red };
    Line::from(vec![
        Span::raw(label),
        Span::styled(
            count.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .records()
        .iter()
        .rev()
        .map(|record| ListItem::new(board_line(record)))
        .collect();

    let board = List::new(items).block(
        Block::default()
            .title(" Guesses (latest first) ")
            .borders(Borders::ALL),
    );
    f.render_widget(board, area);
}

fn board_line(record: &GuessRecord) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:>2}: ", record.turn_number())),
        Span::styled(
            record.guess.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(pegs(record.score), Style::default().fg(Color::Green)),
    ])
}

/// One mark per matched digit: `#` in place, `+` elsewhere
fn pegs(score: Score) -> String {
    let placed = usize::from(score.correct_positions());
    let misplaced = usize::from(score.correct_digits()) - placed;
    let blank = NUM_DIGITS - placed - misplaced;
    format!(
        "[{}{}{}]",
        "#".repeat(placed),
        "+".repeat(misplaced),
        ".".repeat(blank)
    )
}

fn render_reveal(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match app.session.phase() {
        Phase::Won => (" You cracked it! ", Color::Green),
        _ => (" Secret number ", Color::Red),
    };

    let lines: Vec<Line> = app
        .reveal
        .map(|secret| large_digits(&secret))
        .unwrap_or_default()
        .into_iter()
        .map(Line::from)
        .collect();

    let art = Paragraph::new(lines)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(art, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Turn gauge
            Constraint::Percentage(50), // History view
            Constraint::Min(4),         // Messages
        ])
        .split(area);

    render_turn_gauge(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_turn_gauge(f: &mut Frame, app: &App, area: Rect) {
    let used = app.session.turns_used();
    let total = usize::from(app.session.total_turns().get());
    let ratio = if app.session.phase() == Phase::NotStarted {
        0.0
    } else {
        (used as f64 / total as f64).min(1.0)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Turns Used ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{used}/{total}"));

    f.render_widget(gauge, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.history_view {
        HistoryView::Chronological => " History ".to_string(),
        HistoryView::Ranked => " Sorted (best to worst) ".to_string(),
        HistoryView::Search { digits, positions } => {
            format!(" Search (digit={digits}, pos={positions}) ")
        }
    };

    let records = app.history_records();
    let items: Vec<ListItem> = if records.is_empty() {
        let empty = match app.history_view {
            HistoryView::Search { .. } => "No matching guesses found.",
            _ => "No guesses yet.",
        };
        vec![ListItem::new(empty).style(Style::default().fg(Color::DarkGray))]
    } else {
        records
            .iter()
            .map(|r| {
                ListItem::new(format!(
                    "Turn {:2}: {} -> {}",
                    r.turn_number(),
                    r.guess,
                    r.score
                ))
            })
            .collect()
    };

    let history = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(history, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match app.screen {
        Screen::MainMenu => (" Choose an option (1-5) ", Color::Cyan),
        Screen::TurnsEntry => (" Number of turns (10-20) | ESC to cancel ", Color::Cyan),
        Screen::Playing => (" Enter your 4-digit guess ", Color::Yellow),
        Screen::SearchEntry => (" Correct digits and positions, e.g. 3 1 | ESC to cancel ", Color::Magenta),
        Screen::GameOver => (" Game over | Press any key for the menu, 'q' to quit ", Color::Green),
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let game = Paragraph::new(format!("Game: {}", app.session.phase())).alignment(Alignment::Center);
    f.render_widget(game, chunks[0]);

    let phase_text = if app.config.show_phases && app.session.turns_used() > 0 {
        let total = u32::from(app.session.total_turns().get());
        let turn = app.session.turns_used() as u32;
        Milestone::ALL
            .iter()
            .rev()
            .find(|m| m.turn(total) <= turn)
            .and_then(|m| m.phase_label())
            .unwrap_or("Opening")
    } else {
        ""
    };
    let phase = Paragraph::new(phase_text).alignment(Alignment::Center);
    f.render_widget(phase, chunks[1]);

    let help_text = match app.screen {
        Screen::Playing => "Enter: Guess | s: Save | r: Sort | f: Search | Esc: Menu",
        Screen::MainMenu => "1-5: Choose | q: Quit",
        _ => "Ctrl-C: Quit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Digits;

    #[test]
    fn pegs_mark_placed_then_misplaced() {
        let score = Score::calculate(
            &Digits::new("2213").unwrap(),
            &Digits::new("1234").unwrap(),
        );
        assert_eq!(pegs(score), "[#++.]");
        assert_eq!(pegs(Score::PERFECT), "[####]");
    }
}
