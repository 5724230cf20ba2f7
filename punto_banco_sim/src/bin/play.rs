use clap::Parser;
use punto_banco_lib::DECK_COUNT;
use punto_banco_sim::console::messages::Messages;
use punto_banco_sim::console::pacing::Pacing;
use punto_banco_sim::console::{ConsoleError, InteractiveGame};
use punto_banco_sim::logging::init_tracing;
use std::io;
use std::path::PathBuf;

/// Play punto banco against the captain at the console.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Reveal the cards without pausing
    #[arg(long)]
    no_delay: bool,
    /// JSON file replacing some or all of the table talk
    #[arg(long, value_name = "FILE")]
    messages: Option<PathBuf>,
    /// Number of decks in the shoe
    #[arg(long, default_value_t = DECK_COUNT)]
    decks: usize,
}

fn run(args: Args) -> Result<u32, ConsoleError> {
    let messages = match &args.messages {
        Some(path) => Messages::from_file(path)?,
        None => Messages::new(),
    };
    let pacing = if args.no_delay {
        Pacing::disabled()
    } else {
        Pacing::default()
    };

    let mut game = InteractiveGame::new(io::stdin().lock(), io::stdout(), messages, pacing)
        .with_decks(args.decks);
    game.run()
}

fn main() {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(_) => {}
        Err(ConsoleError::InputClosed) => println!(),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
