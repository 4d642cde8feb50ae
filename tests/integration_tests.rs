// Integration tests for the kelimece application
// These tests drive full games through the CLI interface with scripted input

use kelimece::cli::CliInterface;
use kelimece::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

fn bank_of(words: &str) -> WordBank {
    WordBank::from_str(words).unwrap()
}

#[test]
fn test_game_loop_win_in_one_guess() {
    // A single-word bank makes the target known; the first guess wins and
    // the game waits for 'next' or 'exit'.
    let bank = bank_of("kalem");
    let mut rng = StdRng::seed_from_u64(1);
    let input = "kalem\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_game_loop_blocked_letter_flow() {
    // ELMAS vs KALEM eliminates S; SALON then starts with the eliminated
    // letter and is refused before evaluation, and KALEM still wins.
    let bank = bank_of("kalem");
    let mut rng = StdRng::seed_from_u64(1);
    let input = "elmas\nsalon\nkalem\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_game_loop_invalid_entries_then_exit() {
    let bank = bank_of("kalem\nelmas\nmasal");
    let mut rng = StdRng::seed_from_u64(3);
    // Too short, too long, foreign letters, then quit.
    let input = "kale\nkalemlik\nqueen\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_game_loop_new_round_command() {
    let bank = bank_of("kalem");
    let mut rng = StdRng::seed_from_u64(5);
    // Win, start a new round against the same one-word bank, win again.
    let input = "kalem\nnext\nkalem\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_game_loop_exit_on_eof() {
    // No trailing 'exit': the reader just runs dry and the loop must stop.
    let bank = bank_of("kalem\nelmas");
    let mut rng = StdRng::seed_from_u64(8);
    let input = "masal\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_game_loop_turkish_lowercase_input() {
    // Lowercase Turkish letters normalize to the same form as the target.
    let bank = bank_of("çiçek");
    let mut rng = StdRng::seed_from_u64(13);
    let input = "çiçek\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&bank, &mut rng, &mut interface);
}

#[test]
fn test_seeded_games_pick_the_same_targets() {
    let bank = bank_of(EMBEDDED_WORDLIST);
    let mut a = StdRng::seed_from_u64(21);
    let mut b = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        assert_eq!(bank.pick(&mut a), bank.pick(&mut b));
    }
}

#[test]
fn test_round_state_full_game_against_known_target() {
    // Play the state machine directly, no interface involved.
    let target = Word::parse("elmas").unwrap();
    let state = RoundState::new(target);

    let game_state::WordEntry::Submitted { state, guess } = enter_word(&state, "elman") else {
        panic!("expected a scored guess");
    };
    assert_eq!(
        guess.feedback,
        [
            Feedback::Correct,
            Feedback::Correct,
            Feedback::Correct,
            Feedback::Correct,
            Feedback::Absent,
        ]
    );
    assert_eq!(state.status(), RoundStatus::InProgress);
    assert!(state.disabled().contains(&'N'));

    let game_state::WordEntry::Submitted { state, .. } = enter_word(&state, "elmas") else {
        panic!("expected a scored guess");
    };
    assert_eq!(state.status(), RoundStatus::Won);
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_disabled_letters_survive_won_state_until_reset() {
    let target = Word::parse("kalem").unwrap();
    let state = RoundState::new(target);

    let game_state::WordEntry::Submitted { state, .. } = enter_word(&state, "çorba") else {
        panic!("expected a scored guess");
    };
    let game_state::WordEntry::Submitted { state, .. } = enter_word(&state, "kalem") else {
        panic!("expected a scored guess");
    };
    assert_eq!(state.status(), RoundStatus::Won);
    assert!(!state.disabled().is_empty());

    let (state, _) = state.apply(&Action::Reset {
        target: Word::parse("elmas").unwrap(),
    });
    assert!(state.disabled().is_empty());
    assert!(state.history().is_empty());
}

#[test]
fn test_custom_wordlist_file_to_game() {
    // Load a custom word list from disk, then play a game over it.
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("kelimece_test_wordlist.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "kalem").unwrap();
    }

    let bank = WordBank::from_file(&path).unwrap();
    assert_eq!(bank.len(), 1);
    assert_eq!(bank.words()[0].to_string(), "KALEM");

    let mut rng = StdRng::seed_from_u64(2);
    let input = "kalem\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    game_loop(&bank, &mut rng, &mut interface);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_wordlist_file_with_bad_entry_fails_at_startup() {
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("kelimece_test_bad_wordlist.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "kalem").unwrap();
        writeln!(file, "abcd").unwrap();
    }

    let err = WordBank::from_file(&path).unwrap_err();
    assert!(matches!(err, WordBankError::Line { number: 2, .. }));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_embedded_wordlist_loads_and_plays() {
    let bank = bank_of(EMBEDDED_WORDLIST);
    let mut rng = StdRng::seed_from_u64(99);

    // Whatever target the seed picks, guessing it verbatim must win.
    let target = bank.pick(&mut rng);
    let state = RoundState::new(target);
    let game_state::WordEntry::Submitted { state, .. } =
        enter_word(&state, &target.to_string()) else {
        panic!("expected a scored guess");
    };
    assert_eq!(state.status(), RoundStatus::Won);
}
