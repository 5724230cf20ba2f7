use clap::Parser;
use punto_banco_lib::{play_fresh_round, Outcome, DECK_COUNT};
use punto_banco_sim::logging::init_tracing;

/// Plays a number of rounds, each from a new shoe, printing every result and a tally at the end.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of rounds to play
    rounds: u32,
    /// Number of decks in the shoe
    #[arg(long, default_value_t = DECK_COUNT)]
    decks: usize,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let (mut player_wins, mut banker_wins, mut ties, mut naturals) = (0u32, 0u32, 0u32, 0u32);

    for _ in 0..args.rounds {
        let result = match play_fresh_round(args.decks) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        };
        println!("{result}");

        match result.outcome {
            Outcome::Player => player_wins += 1,
            Outcome::Banker => banker_wins += 1,
            Outcome::Tie => ties += 1,
        }
        if result.is_natural() {
            naturals += 1;
        }
    }

    const WIDTH: usize = 80;
    const TEXT_WIDTH: usize = "rounds played:".len() + 20;
    const NUMERIC_WIDTH: usize = WIDTH - TEXT_WIDTH;
    println!("{}", "-".repeat(WIDTH));
    println!("{:-^WIDTH$}", "tally");
    println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "rounds played:", args.rounds);
    println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "player wins:", player_wins);
    println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "banker wins:", banker_wins);
    println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "ties:", ties);
    println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "naturals:", naturals);
    println!("{}", "-".repeat(WIDTH));
}
