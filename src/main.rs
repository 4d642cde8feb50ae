use kelimece::cli::{CliInterface, parse_cli};
use kelimece::tui::TuiInterface;
use kelimece::wordbank::{EMBEDDED_WORDLIST, WordBank};
use kelimece::{game_loop, logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() {
    logging::init();
    let cli = parse_cli();

    let bank = match &cli.wordlist_path {
        Some(path) => match WordBank::from_file(path) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        },
        None => match WordBank::from_str(EMBEDDED_WORDLIST) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("Embedded word list is unusable: {e}");
                return;
            }
        },
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&bank, &mut rng, &mut interface),
            Err(e) => eprintln!("Failed to start the terminal interface: {e}"),
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        println!("Loaded {} words.", bank.len());
        game_loop(&bank, &mut rng, &mut interface);
    }
}
