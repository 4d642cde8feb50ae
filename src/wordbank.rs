use crate::alphabet::{WORD_LENGTH, normalize_char};
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const EMBEDDED_WORDLIST: &str = include_str!("resources/kelimeler.txt");

/// A normalized 5-letter word over the Turkish alphabet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([char; WORD_LENGTH]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordError {
    Length(usize),
    Letter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(len) => write!(f, "word must be exactly {WORD_LENGTH} letters, got {len}"),
            Self::Letter(c) => write!(f, "'{c}' is not a letter of the Turkish alphabet"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Parse and normalize a word.
    ///
    /// Every character runs through the same normalization table as player
    /// input, so `kitap` and `KİTAP` produce the same value.
    pub fn parse(text: &str) -> Result<Self, WordError> {
        let mut letters = [' '; WORD_LENGTH];
        let mut count = 0;
        for raw in text.chars() {
            if count == WORD_LENGTH {
                return Err(WordError::Length(text.chars().count()));
            }
            letters[count] = normalize_char(raw).ok_or(WordError::Letter(raw))?;
            count += 1;
        }
        if count != WORD_LENGTH {
            return Err(WordError::Length(count));
        }
        Ok(Self(letters))
    }

    /// Build a word from letters that are already normalized.
    pub(crate) fn from_letters(letters: [char; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    pub fn letter(&self, index: usize) -> char {
        self.0[index]
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

#[derive(Debug)]
pub enum WordBankError {
    Io(io::Error),
    Empty,
    Line { number: usize, source: WordError },
}

impl fmt::Display for WordBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read word list: {e}"),
            Self::Empty => write!(f, "word list contains no words"),
            Self::Line { number, source } => write!(f, "word list line {number}: {source}"),
        }
    }
}

impl std::error::Error for WordBankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Line { source, .. } => Some(source),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for WordBankError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// The pool of possible target words. Non-empty by construction: loading
/// rejects empty or malformed lists outright, so selection never has to
/// deal with a missing word.
#[derive(Debug)]
pub struct WordBank {
    words: Vec<Word>,
}

impl WordBank {
    /// Load from newline-delimited text. Blank lines are skipped; any other
    /// malformed entry fails the whole load.
    pub fn from_str(data: &str) -> Result<Self, WordBankError> {
        let mut words = Vec::new();
        for (index, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let word = Word::parse(line).map_err(|source| WordBankError::Line {
                number: index + 1,
                source,
            })?;
            words.push(word);
        }
        if words.is_empty() {
            return Err(WordBankError::Empty);
        }
        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordBankError> {
        let mut data = String::new();
        File::open(path)?.read_to_string(&mut data)?;
        Self::from_str(&data)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Pick a target word uniformly at random. Independent per call, with
    /// replacement across rounds: the same word can come up twice.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        self.words[rng.random_range(0..self.words.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_normalizes_lowercase_turkish() {
        let word = Word::parse("kitap").unwrap();
        assert_eq!(word.to_string(), "KİTAP");

        let word = Word::parse("balık").unwrap();
        assert_eq!(word.to_string(), "BALIK");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(Word::parse("kedi"), Err(WordError::Length(4)));
        assert_eq!(Word::parse("kediler"), Err(WordError::Length(7)));
        assert_eq!(Word::parse(""), Err(WordError::Length(0)));
    }

    #[test]
    fn test_parse_rejects_foreign_letters() {
        assert_eq!(Word::parse("waltz"), Err(WordError::Letter('w')));
        assert_eq!(Word::parse("kal3m"), Err(WordError::Letter('3')));
    }

    #[test]
    fn test_from_str_loads_and_normalizes() {
        let bank = WordBank::from_str("kalem\n  elmas  \n\nkitap\n").unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.words()[2].to_string(), "KİTAP");
    }

    #[test]
    fn test_from_str_rejects_empty_list() {
        assert!(matches!(
            WordBank::from_str("\n  \n"),
            Err(WordBankError::Empty)
        ));
    }

    #[test]
    fn test_from_str_reports_bad_line() {
        let err = WordBank::from_str("kalem\nqueen\n").unwrap_err();
        match err {
            WordBankError::Line { number, source } => {
                assert_eq!(number, 2);
                assert_eq!(source, WordError::Letter('q'));
            }
            other => panic!("expected Line error, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_wordlist_is_well_formed() {
        let bank = WordBank::from_str(EMBEDDED_WORDLIST).unwrap();
        assert!(bank.len() > 50);
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let bank = WordBank::from_str(EMBEDDED_WORDLIST).unwrap();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(bank.pick(&mut a), bank.pick(&mut b));
        }
    }

    #[test]
    fn test_pick_stays_within_bank() {
        let bank = WordBank::from_str("kalem\nelmas\nmasal\n").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let word = bank.pick(&mut rng);
            assert!(bank.words().contains(&word));
        }
    }
}
