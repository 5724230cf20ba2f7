pub mod console;
pub mod game;
pub mod logging;
pub mod strategy;
pub mod write;

use game::BaccaratGameSim;
use punto_banco_lib::{PuntoBancoError, DECK_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Write;
use std::sync::mpsc;
use std::thread;
use strategy::{BettingStrategy, BettingStrategyDyn};
use thiserror::Error;
use tracing::{error, info};
use write::OutputFormat;

pub mod prelude {
    pub use super::{
        strategy::prelude::*, write::OutputFormat, BaccaratSimulation, BaccaratSimulator,
        BaccaratSimulatorConfig, BaccaratSimulatorConfigBuilder, MulStrategyBaccaratSimulator,
        MulStrategyBaccaratSimulatorBuilder, SimulationError, SimulationSummary,
    };
}

/// Simple struct for recording all of the interesting data points accumulated during a simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub label: String,
    pub rounds: u64,
    pub wins: u64,
    pub losses: u64,
    pub player_outcomes: u64,
    pub banker_outcomes: u64,
    pub ties: u64,
    pub naturals: u64,
    pub early_endings: u64,
    pub total_wagered: u64,
    pub winnings: i64,
}

impl SimulationSummary {
    /// Associated function for an empty summary carrying `label`.
    pub fn new(label: String) -> Self {
        SimulationSummary {
            label,
            ..Default::default()
        }
    }

    /// Adds the counts of `other` to `self`, the label is left as is.
    pub fn merge(&mut self, other: &SimulationSummary) {
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.losses += other.losses;
        self.player_outcomes += other.player_outcomes;
        self.banker_outcomes += other.banker_outcomes;
        self.ties += other.ties;
        self.naturals += other.naturals;
        self.early_endings += other.early_endings;
        self.total_wagered += other.total_wagered;
        self.winnings += other.winnings;
    }

    pub fn win_pct(&self) -> f64 {
        ratio(self.wins as f64, self.rounds as f64)
    }

    pub fn tie_pct(&self) -> f64 {
        ratio(self.ties as f64, self.rounds as f64)
    }

    pub fn avg_winnings_per_round(&self) -> f64 {
        ratio(self.winnings as f64, self.rounds as f64)
    }

    /// Share of the total amount wagered that was lost to the house.
    pub fn house_edge(&self) -> f64 {
        ratio(-self.winnings as f64, self.total_wagered as f64)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "average winnings per round".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let body = format!(
            "{}{}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}\n",
            "strategy: ",
            self.label,
            "rounds played",
            self.rounds,
            "wagers won",
            self.wins,
            "wagers lost",
            self.losses,
            "player wins",
            self.player_outcomes,
            "banker wins",
            self.banker_outcomes,
            "ties",
            self.ties,
            "naturals",
            self.naturals,
            "number of early endings",
            self.early_endings,
            "total wagered",
            self.total_wagered,
            "winnings",
            self.winnings,
            "win percentage",
            self.win_pct(),
            "tie percentage",
            self.tie_pct(),
            "average winnings per round",
            self.avg_winnings_per_round(),
            "house edge",
            self.house_edge(),
        );
        write!(f, "{}", body)
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("game error: {0}")]
    GameError(#[from] PuntoBancoError),
    #[error("unable to send simulation summary: {0}")]
    SendingError(String),
    #[error("unable to write simulation summaries: {0}")]
    WriteError(String),
    #[error("a stake of {stake} is below the table minimum of {min_bet}")]
    StakeBelowMinimum { stake: u64, min_bet: u64 },
    #[error("betting strategy '{0}' not recognized")]
    UnknownStrategy(String),
    #[error("a simulation thread panicked")]
    ThreadPanicked,
}

pub trait BaccaratSimulation: Send {
    /// Required method, the method that will be called to run all simulations.
    fn run(&mut self) -> Result<(), SimulationError>;
    /// Required method, runs a single simulation and returns the summary of that simulation alone.
    fn run_single_simulation(&mut self) -> Result<SimulationSummary, SimulationError>;
    /// Required method, the method that will display the stats recorded over all simulations.
    fn display_stats(&self);
    /// Required method, the method that will reset the simulation
    fn reset(&mut self);
    /// Required method, the method for producing output statistics/data recorded during the simulation
    fn summary(&self) -> SimulationSummary;
}

/// Builds the generator for one simulator. With a configured seed every simulator gets its own reproducible stream.
fn simulation_rng(seed: Option<u64>, offset: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
        None => StdRng::from_entropy(),
    }
}

/// Struct for running a number of simulations for a specific betting strategy.
/// A `BaccaratSimulator` object's main purpose is convenience, it wraps the session and the bookkeeping needed to test a strategy,
/// and lets the caller control the parameters of the table such as the number of decks, the minimum bet and the starting balance.
pub struct BaccaratSimulator<B>
where
    B: BettingStrategy,
{
    game: BaccaratGameSim<B>,
    starting_balance: u64,
    num_simulations: u32,
    accumulated: SimulationSummary,
    silent: bool,
}

impl<B: BettingStrategy> BaccaratSimulator<B> {
    /// Associated function to create a new `BaccaratSimulator`. `seed_offset` separates the random streams of simulators
    /// that share a seeded configuration.
    pub fn new(strategy: B, config: &BaccaratSimulatorConfig, seed_offset: u64) -> Self {
        let game = BaccaratGameSim::new(
            strategy,
            simulation_rng(config.seed, seed_offset),
            config.num_decks,
            config.rounds_per_simulation,
            config.min_bet,
            config.starting_balance,
        );
        let accumulated = SimulationSummary::new(game.label());
        Self {
            game,
            starting_balance: config.starting_balance,
            num_simulations: config.num_simulations,
            accumulated,
            silent: config.silent,
        }
    }
}

impl<B: BettingStrategy + Send> BaccaratSimulation for BaccaratSimulator<B> {
    /// Method that will run every simulation, recording the necessary data.
    fn run(&mut self) -> Result<(), SimulationError> {
        for i in 0..self.num_simulations {
            self.run_single_simulation()?;
            if !self.silent {
                println!("simulation #{}", i + 1);
                self.game.display_stats();
            }
            self.reset();
        }
        Ok(())
    }

    /// Method to run a single simulation. The session is not reset afterwards.
    fn run_single_simulation(&mut self) -> Result<SimulationSummary, SimulationError> {
        self.game.run()?;
        let summary = self.game.summary();
        self.accumulated.merge(&summary);
        Ok(summary)
    }

    /// Method that will display the accumulated data recorded from running all simulations.
    fn display_stats(&self) {
        println!(
            "{:-^80}",
            format!("running {} simulations", self.num_simulations)
        );
        print!("{}", self.accumulated);
        println!("{}", "-".repeat(80));
    }

    /// Method for resetting the session so another simulation can be run, the accumulated data is kept.
    fn reset(&mut self) {
        self.game.reset(self.starting_balance);
    }

    fn summary(&self) -> SimulationSummary {
        self.accumulated.clone()
    }
}

/// This struct is for testing multiple strategies at once. Each strategy is simulated in its own thread
/// and the results are written by a dedicated writer thread.
pub struct MulStrategyBaccaratSimulator {
    simulations: Vec<Box<dyn BaccaratSimulation>>,
    pub config: BaccaratSimulatorConfig,
}

impl MulStrategyBaccaratSimulator {
    /// Method that returns a new `MulStrategyBaccaratSimulatorBuilder` object.
    pub fn new(config: BaccaratSimulatorConfig) -> MulStrategyBaccaratSimulatorBuilder {
        MulStrategyBaccaratSimulatorBuilder {
            simulations: None,
            config,
        }
    }

    pub fn simulations(&self) -> &[Box<dyn BaccaratSimulation>] {
        &self.simulations
    }

    /// A method for adding a simulation for a strategy chosen at runtime.
    pub fn add_simulation(&mut self, strategy: BettingStrategyDyn) {
        let offset = self.simulations.len() as u64;
        let simulation: Box<dyn BaccaratSimulation> =
            Box::new(BaccaratSimulator::new(strategy, &self.config, offset));
        self.simulations.push(simulation);
    }

    /// Runs every configured simulation, one thread per strategy. Each thread sends the summary of every simulation
    /// it completes to the writer thread, which aggregates them and writes the result to `file_out` once all are done.
    /// The simulations are consumed.
    pub fn run(
        &mut self,
        file_out: Box<dyn Write + Send + 'static>,
        format: OutputFormat,
    ) -> Result<(), SimulationError> {
        if self.simulations.is_empty() {
            return Ok(());
        }

        let (write_sender, write_receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();

        // Unique ids let the writer know when every simulation has finished
        let ids: HashSet<usize> = (1..=self.simulations.len()).collect();
        let write_handle =
            thread::spawn(move || write::write_summaries(write_receiver, ids, file_out, format));

        let num_simulations = self.config.num_simulations;
        let mut handles = vec![];
        for (i, mut simulation) in self.simulations.drain(..).enumerate() {
            let id = i + 1;
            let sender = write_sender.clone();
            let handle = thread::spawn(move || -> Result<(), SimulationError> {
                for _ in 0..num_simulations {
                    let summary = simulation.run_single_simulation()?;
                    sender
                        .send((Some(summary), id))
                        .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                    simulation.reset();
                }
                sender
                    .send((None, id))
                    .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                info!(id, "strategy finished");
                Ok(())
            });
            handles.push(handle);
        }
        // Only the worker threads hold senders now, the writer stops waiting if they all exit
        drop(write_sender);

        // Every thread is joined before any error is returned
        let mut first_error = None;
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle
                .join()
                .unwrap_or(Err(SimulationError::ThreadPanicked));
            if let Err(e) = result {
                error!(simulation = i + 1, error = %e, "simulation failed");
                first_error.get_or_insert(e);
            }
        }
        let written = write_handle
            .join()
            .unwrap_or(Err(SimulationError::ThreadPanicked));

        match first_error {
            Some(e) => Err(e),
            None => written,
        }
    }
}

/// Struct for building a `MulStrategyBaccaratSimulator` object
pub struct MulStrategyBaccaratSimulatorBuilder {
    simulations: Option<Vec<Box<dyn BaccaratSimulation>>>,
    config: BaccaratSimulatorConfig,
}

impl MulStrategyBaccaratSimulatorBuilder {
    /// Method for adding a new simulation, the only required input is a struct that implements `BettingStrategy`,
    /// the rest of the configuration is taken from the `BaccaratSimulatorConfig` passed during object creation.
    pub fn simulation<B: BettingStrategy + Send + 'static>(&mut self, strategy: B) -> &mut Self {
        let sim_vec = self.simulations.get_or_insert_with(Vec::new);
        let offset = sim_vec.len() as u64;
        sim_vec.push(Box::new(BaccaratSimulator::new(
            strategy,
            &self.config,
            offset,
        )));
        self
    }

    /// Method that builds a `MulStrategyBaccaratSimulator` object
    pub fn build(&mut self) -> MulStrategyBaccaratSimulator {
        MulStrategyBaccaratSimulator {
            simulations: self.simulations.take().unwrap_or_default(),
            config: self.config,
        }
    }
}

/// Struct for configuring a `BaccaratSimulator`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaccaratSimulatorConfig {
    pub starting_balance: u64,
    pub num_simulations: u32,
    pub rounds_per_simulation: u32,
    pub num_decks: usize,
    pub min_bet: u64,
    pub silent: bool,
    pub seed: Option<u64>,
}

impl BaccaratSimulatorConfig {
    /// Associated method for returning a new `BaccaratSimulatorConfigBuilder` object, allows the user to choose
    /// the parameters of the simulation such as the starting balance, the number of simulations and the minimum bet.
    pub fn new() -> BaccaratSimulatorConfigBuilder {
        BaccaratSimulatorConfigBuilder::default()
    }
}

impl Default for BaccaratSimulatorConfig {
    /// Returns the standard configuration, an eight deck shoe and a minimum bet of 5.
    fn default() -> Self {
        BaccaratSimulatorConfig::new().build()
    }
}

/// Struct to implement builder pattern for `BaccaratSimulatorConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct BaccaratSimulatorConfigBuilder {
    starting_balance: Option<u64>,
    num_simulations: Option<u32>,
    rounds_per_simulation: Option<u32>,
    num_decks: Option<usize>,
    min_bet: Option<u64>,
    silent: Option<bool>,
    seed: Option<u64>,
}

impl BaccaratSimulatorConfigBuilder {
    /// Method for changing the starting balance of the player.
    pub fn starting_balance(&mut self, balance: u64) -> &mut Self {
        self.starting_balance = Some(balance);
        self
    }

    /// Method for setting the number of simulations run per strategy.
    pub fn num_simulations(&mut self, n: u32) -> &mut Self {
        self.num_simulations = Some(n);
        self
    }

    /// Method for setting the maximum number of rounds played in each simulation
    pub fn rounds_per_simulation(&mut self, rounds: u32) -> &mut Self {
        self.rounds_per_simulation = Some(rounds);
        self
    }

    /// Method for choosing the number of decks in each shoe
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the table minimum. A strategy asking for a smaller stake makes its simulation fail.
    pub fn min_bet(&mut self, bet: u64) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting a boolean flag, if set to false each simulator prints its stats after every simulation.
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.silent = Some(silent);
        self
    }

    /// Method for seeding the shuffles so a run can be reproduced. Shoes are shuffled from system entropy otherwise.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for building a `BaccaratSimulatorConfig` object from the given builder.
    pub fn build(&mut self) -> BaccaratSimulatorConfig {
        BaccaratSimulatorConfig {
            starting_balance: self.starting_balance.unwrap_or(500),
            num_simulations: self.num_simulations.unwrap_or(100),
            rounds_per_simulation: self.rounds_per_simulation.unwrap_or(50),
            num_decks: self.num_decks.unwrap_or(DECK_COUNT),
            min_bet: self.min_bet.unwrap_or(5),
            silent: self.silent.unwrap_or(true),
            seed: self.seed,
        }
    }
}
