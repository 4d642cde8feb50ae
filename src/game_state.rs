use crate::alphabet::{WORD_LENGTH, normalize_char};
use crate::wordbank::{Word, WordBank};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeSet;

/// Per-letter verdict for one cell of a submitted guess.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Feedback {
    Correct,
    Present,
    Absent,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundStatus {
    InProgress,
    Won,
}

/// A completed guess together with the feedback it earned. Feedback is
/// fixed at submit time; renderers never re-score a historical guess.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoredGuess {
    pub word: Word,
    pub feedback: [Feedback; WORD_LENGTH],
}

/// Score a guess against the target.
///
/// A cell is `Correct` on a positional match, otherwise `Present` if the
/// letter occurs anywhere in the target, otherwise `Absent`. Presence is
/// decided by membership alone: a letter repeated in the guess is scored
/// independently per occurrence, regardless of how many times the target
/// actually contains it.
///
/// The second value is true iff every cell is `Correct`.
pub fn evaluate(guess: &Word, target: &Word) -> ([Feedback; WORD_LENGTH], bool) {
    let mut feedback = [Feedback::Absent; WORD_LENGTH];
    let mut won = true;
    for i in 0..WORD_LENGTH {
        feedback[i] = if guess.letter(i) == target.letter(i) {
            Feedback::Correct
        } else if target.contains(guess.letter(i)) {
            won = false;
            Feedback::Present
        } else {
            won = false;
            Feedback::Absent
        };
    }
    (feedback, won)
}

/// A transition request against a [`RoundState`].
///
/// Target selection stays outside the state machine: `Reset` carries the
/// freshly picked word, so `apply` is a pure function of state and action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Put a (raw, un-normalized) character into one cell of the entry row.
    Edit { cell: usize, input: char },
    /// Empty one cell of the entry row.
    Clear { cell: usize },
    /// Start over with a new target word.
    Reset { target: Word },
}

/// What an [`Action`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Applied {
    /// The cell was set; the entry row is still incomplete.
    Edited,
    /// The edit filled the last open cell and the guess was scored.
    Submitted(ScoredGuess),
    /// The cell was emptied.
    Cleared,
    /// The edit was refused: the letter is already known absent. The state
    /// is unchanged; the letter is carried for the presentation cue.
    Blocked(char),
    /// A fresh round began.
    Started,
    /// The action does not apply in the current state (finished round,
    /// out-of-range cell, character outside the alphabet).
    Ignored,
}

/// One round of the game: the secret target, the in-progress entry row,
/// the scored guesses so far, and the letters proven absent.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoundState {
    target: Word,
    entry: [Option<char>; WORD_LENGTH],
    history: Vec<ScoredGuess>,
    disabled: BTreeSet<char>,
    status: RoundStatus,
}

impl RoundState {
    pub fn new(target: Word) -> Self {
        Self {
            target,
            entry: [None; WORD_LENGTH],
            history: Vec::new(),
            disabled: BTreeSet::new(),
            status: RoundStatus::InProgress,
        }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn entry(&self) -> &[Option<char>; WORD_LENGTH] {
        &self.entry
    }

    /// Scored guesses in submission order. Display order is newest-first,
    /// which is the renderer's job.
    pub fn history(&self) -> &[ScoredGuess] {
        &self.history
    }

    pub fn disabled(&self) -> &BTreeSet<char> {
        &self.disabled
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Apply one action, producing the successor state and what happened.
    ///
    /// `self` is never mutated; a refused or inapplicable action returns a
    /// clone of the current state.
    pub fn apply(&self, action: &Action) -> (RoundState, Applied) {
        match *action {
            Action::Reset { target } => (RoundState::new(target), Applied::Started),
            Action::Edit { cell, input } => self.edit(cell, input),
            Action::Clear { cell } => self.clear(cell),
        }
    }

    fn edit(&self, cell: usize, input: char) -> (RoundState, Applied) {
        if self.status == RoundStatus::Won || cell >= WORD_LENGTH {
            return (self.clone(), Applied::Ignored);
        }
        let Some(letter) = normalize_char(input) else {
            return (self.clone(), Applied::Ignored);
        };
        if self.disabled.contains(&letter) {
            debug_log!("edit refused: '{}' is already eliminated", letter);
            return (self.clone(), Applied::Blocked(letter));
        }
        let mut next = self.clone();
        next.entry[cell] = Some(letter);
        if let Some(letters) = completed(&next.entry) {
            let applied = next.submit(Word::from_letters(letters));
            return (next, applied);
        }
        (next, Applied::Edited)
    }

    fn clear(&self, cell: usize) -> (RoundState, Applied) {
        if self.status == RoundStatus::Won || cell >= WORD_LENGTH {
            return (self.clone(), Applied::Ignored);
        }
        let mut next = self.clone();
        next.entry[cell] = None;
        (next, Applied::Cleared)
    }

    /// Score a completed entry row. Absent letters join the disabled set;
    /// Correct and Present letters never do. On a win the entry row is left
    /// as typed, otherwise it empties for the next attempt.
    fn submit(&mut self, word: Word) -> Applied {
        let (feedback, won) = evaluate(&word, &self.target);
        for (letter, verdict) in word.letters().iter().zip(&feedback) {
            if *verdict == Feedback::Absent {
                self.disabled.insert(*letter);
            }
        }
        let guess = ScoredGuess { word, feedback };
        self.history.push(guess);
        if won {
            self.status = RoundStatus::Won;
        } else {
            self.entry = [None; WORD_LENGTH];
        }
        info_log!(
            "guess {} scored, {} letters disabled, status {:?}",
            word,
            self.disabled.len(),
            self.status
        );
        Applied::Submitted(guess)
    }
}

fn completed(entry: &[Option<char>; WORD_LENGTH]) -> Option<[char; WORD_LENGTH]> {
    let mut letters = [' '; WORD_LENGTH];
    for (slot, cell) in letters.iter_mut().zip(entry) {
        *slot = (*cell)?;
    }
    Some(letters)
}

/// Outcome of feeding a whole word into the entry row cell-by-cell.
#[derive(Debug)]
pub enum WordEntry {
    /// All five cells filled; the guess was scored.
    Submitted { state: RoundState, guess: ScoredGuess },
    /// Some letter of the word is already eliminated; nothing was scored
    /// and the caller's state is still current.
    Blocked { letter: char },
    /// Not a well-formed 5-letter word for the current state.
    Invalid,
}

/// Run a whole word through successive `Edit` actions.
///
/// A disabled letter anywhere in the word rejects the entry at that edit;
/// the evaluator is never reached and the partial cells are discarded.
pub fn enter_word(state: &RoundState, text: &str) -> WordEntry {
    let letters: Vec<char> = text.chars().collect();
    if letters.len() != WORD_LENGTH {
        return WordEntry::Invalid;
    }
    let mut current = state.clone();
    for (cell, raw) in letters.into_iter().enumerate() {
        let (next, applied) = current.apply(&Action::Edit { cell, input: raw });
        match applied {
            Applied::Blocked(letter) => return WordEntry::Blocked { letter },
            Applied::Ignored => return WordEntry::Invalid,
            Applied::Submitted(guess) => return WordEntry::Submitted { state: next, guess },
            _ => current = next,
        }
    }
    WordEntry::Invalid
}

/// What the player asked for, as reported by an interface.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UserAction {
    /// A complete word to submit as a guess.
    Word(String),
    /// Abandon the current round and pick a fresh target.
    NewRound,
    Exit,
}

/// Presentation-layer hooks the game loop drives.
///
/// Implementations render state and collect input; they never score guesses
/// or track disabled letters themselves.
pub trait GameInterface {
    /// A round began (first round or after `next`).
    fn round_started(&mut self, state: &RoundState, word_count: usize);

    /// Block until the player does something. `None` means "nothing yet,
    /// ask again" (timeouts, redraws).
    fn read_action(&mut self) -> Option<UserAction>;

    /// The submitted text was not a usable 5-letter word.
    fn entry_invalid(&mut self);

    /// An edit was refused because the letter is already eliminated.
    fn letter_blocked(&mut self, letter: char);

    /// A guess was scored; `state` already includes it.
    fn guess_scored(&mut self, state: &RoundState, guess: &ScoredGuess);

    /// The last guess matched the target.
    fn round_won(&mut self, state: &RoundState);

    fn exiting(&mut self);
}

/// Drive rounds until the player exits.
pub fn game_loop<R: Rng, I: GameInterface>(bank: &WordBank, rng: &mut R, interface: &mut I) {
    let mut state = RoundState::new(bank.pick(rng));
    info_log!("round started, target selected from {} words", bank.len());
    interface.round_started(&state, bank.len());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        match action {
            UserAction::Exit => {
                interface.exiting();
                break;
            }
            UserAction::NewRound => {
                let (next, _) = state.apply(&Action::Reset {
                    target: bank.pick(rng),
                });
                state = next;
                info_log!("new round requested");
                interface.round_started(&state, bank.len());
            }
            UserAction::Word(text) => match enter_word(&state, &text) {
                WordEntry::Submitted { state: next, guess } => {
                    state = next;
                    interface.guess_scored(&state, &guess);
                    if state.status() == RoundStatus::Won {
                        interface.round_won(&state);
                    }
                }
                WordEntry::Blocked { letter } => interface.letter_blocked(letter),
                WordEntry::Invalid => interface.entry_invalid(),
            },
        }
    }
}
