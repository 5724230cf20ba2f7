use clap::Parser;
use punto_banco_lib::DECK_COUNT;
use punto_banco_sim::logging::init_tracing;
use punto_banco_sim::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Tests betting strategies against a simulated punto banco table, one thread per strategy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Strategies to simulate
    #[arg(short, long, value_delimiter = ',', default_values_t = STRATEGY_NAMES.map(String::from))]
    strategies: Vec<String>,
    /// Number of simulations per strategy
    #[arg(long, default_value_t = 100)]
    simulations: u32,
    /// Rounds played in each simulation
    #[arg(long, default_value_t = 50)]
    rounds: u32,
    /// Base stake of every strategy, also the minimum bet
    #[arg(long, default_value_t = 5)]
    stake: u64,
    /// Starting balance of each simulation
    #[arg(long, default_value_t = 500)]
    balance: u64,
    /// Number of decks in the shoe
    #[arg(long, default_value_t = DECK_COUNT)]
    decks: usize,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Write the summaries as JSON
    #[arg(long)]
    json: bool,
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Run the strategies one after another on this thread, printing the stats of every simulation
    #[arg(short, long, conflicts_with_all = ["json", "output"])]
    verbose: bool,
}

/// Runs each strategy in turn with the per simulation stats printed, then its accumulated stats.
fn run_verbose(args: &Args, config: &BaccaratSimulatorConfig) -> Result<(), SimulationError> {
    for (offset, name) in args.strategies.iter().enumerate() {
        let strategy = create_betting_strategy(name, args.stake)?;
        let mut simulator = BaccaratSimulator::new(strategy, config, offset as u64);
        simulator.run()?;
        simulator.display_stats();
    }
    Ok(())
}

fn run(args: Args) -> Result<(), SimulationError> {
    let mut config = BaccaratSimulatorConfig::new();
    config
        .starting_balance(args.balance)
        .num_simulations(args.simulations)
        .rounds_per_simulation(args.rounds)
        .num_decks(args.decks)
        .min_bet(args.stake);
    if let Some(seed) = args.seed {
        config.seed(seed);
    }
    let config = config.silent(!args.verbose).build();

    if args.verbose {
        return run_verbose(&args, &config);
    }

    let mut simulator = MulStrategyBaccaratSimulator::new(config).build();
    for name in &args.strategies {
        simulator.add_simulation(create_betting_strategy(name, args.stake)?);
    }
    info!(strategies = args.strategies.len(), "starting simulations");

    let file_out: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| SimulationError::WriteError(e.to_string()))?,
        )),
        None => Box::new(io::stdout()),
    };
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    simulator.run(file_out, format)
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
