use clap::Parser;
use punto_banco_lib::{play_fresh_round, DECK_COUNT};
use punto_banco_sim::logging::init_tracing;
use tracing::error;

/// Deals a single round of punto banco from a freshly shuffled shoe and prints the result on one line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of decks in the shoe
    #[arg(long, default_value_t = DECK_COUNT)]
    decks: usize,
    /// Print the round as JSON instead of a single line
    #[arg(long)]
    json: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let result = match play_fresh_round(args.decks) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "round could not be played");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{result}");
    }
}
