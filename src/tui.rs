//! Full-screen terminal interface for the game.
//!
//! Renders the guess board (entry row on top, history below it newest-first),
//! the Turkish Q-keyboard with eliminated letters marked, a status line, and
//! key hints. Input is cell-oriented: letters fill the cell under the
//! cursor and advance it, the arrow keys move the cursor,
//! Backspace clears or steps left, and the guess submits on its own the
//! moment the fifth cell fills.
//!
//! A keystroke on an eliminated letter is refused and the matching keyboard
//! key flashes - the "shake" cue. It clears on the next key press.

use crate::alphabet::{KEYBOARD_ROWS, WORD_LENGTH, normalize_char};
use crate::game_state::{
    Feedback, GameInterface, RoundState, RoundStatus, ScoredGuess, UserAction,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::BTreeSet;
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn feedback_colors(feedback: Feedback) -> (Color, Color) {
    match feedback {
        Feedback::Correct => (Color::Green, Color::Black),
        Feedback::Present => (Color::Yellow, Color::Black),
        Feedback::Absent => (Color::Gray, Color::Black),
    }
}

/// Main TUI component: terminal handle plus the display copies of the round
/// state the game loop pushes in through [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    entry: [Option<char>; WORD_LENGTH],
    cursor: usize,
    history: Vec<ScoredGuess>,
    disabled: BTreeSet<char>,
    won: bool,
    shaking: Option<char>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            entry: [None; WORD_LENGTH],
            cursor: 0,
            history: Vec::new(),
            disabled: BTreeSet::new(),
            won: false,
            shaking: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let entry = self.entry;
        let cursor = self.cursor;
        let won = self.won;
        // Borrow-friendly copies for the draw closure.
        let history: Vec<ScoredGuess> = self.history.clone();
        let disabled = self.disabled.clone();
        let shaking = self.shaking;
        let message = self.message.clone();
        let error_message = self.error_message.clone();
        let status = self.status.clone();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Title
                    Constraint::Min(8),    // Board
                    Constraint::Length(5), // Keyboard
                    Constraint::Length(3), // Status line
                    Constraint::Length(3), // Instructions
                ])
                .split(f.area());

            render_title(f, chunks[0]);
            render_board(f, chunks[1], &entry, cursor, won, &history);
            render_keyboard(f, chunks[2], &disabled, shaking);
            render_status(f, chunks[3], &status);
            render_instructions(f, chunks[4], won, &message, &error_message);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        // Filter out non-key events (mouse, focus, resize, paste).
        let Event::Key(key) = event else {
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid
        // double input.
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage characters arrive from terminal escape sequences when
        // alt-tabbing; drop them before they reach the entry row.
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            return Ok(None);
        }

        if self.won {
            Ok(self.handle_won_input(key))
        } else {
            Ok(self.handle_entry_input(key))
        }
    }

    fn handle_entry_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.shaking = None;
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_entry_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor < WORD_LENGTH - 1 {
                    self.cursor += 1;
                }
            }
            KeyCode::Backspace => {
                if self.entry[self.cursor].is_some() {
                    self.entry[self.cursor] = None;
                } else if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Char(c) => {
                if Self::has_modifier_keys(&key) {
                    debug_log!("handle_entry_input() - Ignoring modified key: {:?}", key);
                    return None;
                }
                return self.type_letter(c);
            }
            _ => {
                debug_log!("handle_entry_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn type_letter(&mut self, raw: char) -> Option<UserAction> {
        let Some(letter) = normalize_char(raw) else {
            self.error_message = format!("'{raw}' is not a Turkish letter.");
            return None;
        };
        if self.disabled.contains(&letter) {
            info_log!("type_letter() - '{}' is eliminated, shaking", letter);
            self.shaking = Some(letter);
            self.error_message = format!("'{letter}' is already eliminated.");
            return None;
        }

        self.entry[self.cursor] = Some(letter);
        if self.cursor < WORD_LENGTH - 1 {
            self.cursor += 1;
        }

        // The guess goes in the moment the last open cell fills.
        if self.entry.iter().all(Option::is_some) {
            let word: String = self.entry.iter().flatten().collect();
            info_log!("type_letter() - Entry complete: '{}'", word);
            return Some(UserAction::Word(word));
        }
        None
    }

    fn handle_won_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewRound),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("KELİMECE")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn entry_row(entry: &[Option<char>; WORD_LENGTH], cursor: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, cell) in entry.iter().enumerate() {
        let letter = cell.unwrap_or(' ');
        let mut style = Style::default().fg(Color::White).bg(Color::DarkGray);
        if i == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {letter} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn guess_row(guess: &ScoredGuess) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, letter) in guess.word.letters().iter().enumerate() {
        let (bg, fg) = feedback_colors(guess.feedback[i]);
        spans.push(Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg).bg(bg),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_board(
    f: &mut Frame,
    area: Rect,
    entry: &[Option<char>; WORD_LENGTH],
    cursor: usize,
    won: bool,
    history: &[ScoredGuess],
) {
    let mut lines = Vec::new();
    if !won {
        lines.push(entry_row(entry, cursor));
        lines.push(Line::from(""));
    }
    // Newest guess first.
    for guess in history.iter().rev() {
        lines.push(guess_row(guess));
        lines.push(Line::from(""));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Guesses").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn keyboard_key_style(letter: char, disabled: &BTreeSet<char>, shaking: Option<char>) -> Style {
    if shaking == Some(letter) {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else if disabled.contains(&letter) {
        Style::default().fg(Color::Red).bg(Color::Black)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

fn render_keyboard(f: &mut Frame, area: Rect, disabled: &BTreeSet<char>, shaking: Option<char>) {
    let mut lines = Vec::new();
    for (row_index, row) in KEYBOARD_ROWS.iter().enumerate() {
        let mut spans = vec![Span::raw(" ".repeat(row_index + 1))];
        for letter in row.iter() {
            spans.push(Span::styled(
                format!("{letter} "),
                keyboard_key_style(*letter, disabled, shaking),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, won: bool, message: &str, error_message: &str) {
    let line = if !error_message.is_empty() {
        Line::from(Span::styled(error_message.to_string(), ERROR_STYLE))
    } else if !message.is_empty() {
        let style = if won { SUCCESS_STYLE } else { MESSAGE_STYLE };
        Line::from(Span::styled(message.to_string(), style))
    } else if won {
        Line::from("N: New round | ESC: Quit")
    } else {
        Line::from("Type letters | LEFT/RIGHT: Move | BACKSPACE: Erase | ESC: Quit")
    };

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn round_started(&mut self, _state: &RoundState, word_count: usize) {
        self.entry = [None; WORD_LENGTH];
        self.cursor = 0;
        self.history.clear();
        self.disabled.clear();
        self.won = false;
        self.shaking = None;
        self.message.clear();
        self.error_message.clear();
        self.status = format!("New round - target drawn from {word_count} words");
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        info_log!("read_action() - Starting input loop");
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Input error, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn entry_invalid(&mut self) {
        // Cell-level filtering keeps malformed words out of the entry row;
        // reaching this means the row and the core disagreed somehow.
        self.entry = [None; WORD_LENGTH];
        self.cursor = 0;
        self.error_message = "That was not a usable 5-letter word.".to_string();
        self.draw_or_log();
    }

    fn letter_blocked(&mut self, letter: char) {
        self.shaking = Some(letter);
        self.error_message = format!("'{letter}' is already eliminated.");
        self.draw_or_log();
    }

    fn guess_scored(&mut self, state: &RoundState, guess: &ScoredGuess) {
        self.history.push(*guess);
        self.disabled = state.disabled().clone();
        if state.status() == RoundStatus::InProgress {
            self.entry = [None; WORD_LENGTH];
            self.cursor = 0;
        }
        self.status = format!(
            "{} guesses, {} letters eliminated",
            self.history.len(),
            self.disabled.len()
        );
        self.draw_or_log();
    }

    fn round_won(&mut self, state: &RoundState) {
        self.won = true;
        self.message = format!(
            "Correct! The word was {} ({} guesses). N: new round | ESC: quit",
            state.target(),
            state.history().len()
        );
        self.status = format!("Round over - solution: {}", state.target());
        self.draw_or_log();
    }

    fn exiting(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
