// Library interface for kelimece
// This allows integration tests to access internal modules

pub mod alphabet;
pub mod cli;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use alphabet::{ALPHABET, WORD_LENGTH, normalize_char, normalize_input};
pub use game_state::{
    Action, Applied, Feedback, GameInterface, RoundState, RoundStatus, ScoredGuess, UserAction,
    enter_word, evaluate, game_loop,
};
pub use wordbank::{EMBEDDED_WORDLIST, Word, WordBank, WordBankError, WordError};
