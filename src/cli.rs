use crate::game_state::{Feedback, GameInterface, RoundState, ScoredGuess, UserAction};
use clap::Parser;
use std::collections::BTreeSet;
use std::io::BufRead;

/// Kelimece CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the embedded
    /// Turkish list)
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<String>,

    /// Seed for target word selection; omit for a random round
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Text rendering helpers, shared with the tests.

fn feedback_marks(feedback: &[Feedback]) -> String {
    feedback
        .iter()
        .map(|f| match f {
            Feedback::Correct => 'G',
            Feedback::Present => 'Y',
            Feedback::Absent => 'X',
        })
        .collect()
}

fn spaced(text: &str) -> String {
    let mut out = String::new();
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn disabled_list(disabled: &BTreeSet<char>) -> String {
    let letters: Vec<String> = disabled.iter().map(char::to_string).collect();
    letters.join(", ")
}

/// Line-oriented implementation of the game interface.
///
/// Reads one word per line from any `BufRead`, which keeps full games
/// scriptable from a `Cursor` in tests. `exit` quits, `next` starts a new
/// round, EOF behaves like `exit`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    won: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, won: false }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn round_started(&mut self, _state: &RoundState, word_count: usize) {
        self.won = false;
        println!("New round started. Target drawn from {word_count} words.");
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.won {
            println!("\nRound over. Type 'next' for a new round or 'exit' to quit:");
        } else {
            println!("\nEnter your guess (5 letters, or 'exit' to quit, or 'next' to start a new round):");
        }
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => return Some(UserAction::Exit),
            Ok(_) => {}
        }
        let input = input.trim();

        match input.to_uppercase().as_str() {
            "EXIT" => Some(UserAction::Exit),
            "NEXT" => Some(UserAction::NewRound),
            _ if self.won => {
                println!("The round is finished; only 'next' or 'exit' work now.");
                None
            }
            _ => Some(UserAction::Word(input.to_string())),
        }
    }

    fn entry_invalid(&mut self) {
        println!("Invalid guess. Please enter 5 Turkish letters.");
    }

    fn letter_blocked(&mut self, letter: char) {
        println!("'{letter}' is already eliminated - it is not in the word.");
    }

    fn guess_scored(&mut self, state: &RoundState, guess: &ScoredGuess) {
        println!("  {}", spaced(&guess.word.to_string()));
        println!("  {}", spaced(&feedback_marks(&guess.feedback)));
        if !state.disabled().is_empty() {
            println!("Eliminated letters: {}", disabled_list(state.disabled()));
        }
    }

    fn round_won(&mut self, state: &RoundState) {
        self.won = true;
        println!(
            "Correct! The word was {} ({} guesses).",
            state.target(),
            state.history().len()
        );
    }

    fn exiting(&mut self) {
        println!("Exiting.");
    }
}
