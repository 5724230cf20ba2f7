//! Module that focuses on the simulation of a single session at the punto banco table. In other words,
//! this module provides all the functionality needed to test a betting strategy over a fixed number of rounds.

use crate::strategy::BettingStrategy;
use crate::{SimulationError, SimulationSummary};
use punto_banco_lib::{play_fresh_round_with, Outcome, RoundResult, Settlement, Wager};
use rand::rngs::StdRng;
use tracing::trace;

/// Struct that provides the functionality to simulate a session of punto banco using a specific betting strategy.
/// Every round is dealt from a freshly built and shuffled shoe.
/// This struct saves all of the necessary data for reporting the stats of the session as well.
pub struct BaccaratGameSim<B: BettingStrategy> {
    strategy: B,
    rng: StdRng,
    num_decks: usize,
    num_rounds: u32,
    min_bet: u64,
    pub balance: u64,
    pub rounds_played: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub player_outcomes: u64,
    pub banker_outcomes: u64,
    pub ties: u64,
    pub naturals: u64,
    pub total_wagered: u64,
    pub total_winnings: i64,
    pub ended_early: bool,
}

impl<B: BettingStrategy> BaccaratGameSim<B> {
    /// Associated method for building a new session.
    /// `num_rounds` is the number of rounds played during a single call to `self.run()`, the session ends sooner
    /// only if the balance cannot cover the next stake. `rng` shuffles every shoe of the session.
    pub fn new(
        strategy: B,
        rng: StdRng,
        num_decks: usize,
        num_rounds: u32,
        min_bet: u64,
        starting_balance: u64,
    ) -> BaccaratGameSim<B> {
        BaccaratGameSim {
            strategy,
            rng,
            num_decks,
            num_rounds,
            min_bet,
            balance: starting_balance,
            rounds_played: 0,
            total_wins: 0,
            total_losses: 0,
            player_outcomes: 0,
            banker_outcomes: 0,
            ties: 0,
            naturals: 0,
            total_wagered: 0,
            total_winnings: 0,
            ended_early: false,
        }
    }

    /// Method that plays the number of rounds specified during object creation.
    /// The session ends early as soon as the balance cannot cover the stake the strategy asks for.
    /// A stake below the table minimum is an error.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        for _ in 0..self.num_rounds {
            let stake = self.strategy.stake(self.balance);
            if stake < self.min_bet {
                return Err(SimulationError::StakeBelowMinimum {
                    stake,
                    min_bet: self.min_bet,
                });
            }
            if stake > self.balance {
                self.ended_early = true;
                break;
            }

            let wager = Wager::new(self.strategy.side(), stake)?;
            self.balance -= stake;

            let result = play_fresh_round_with(self.num_decks, &mut self.rng)?;
            let settlement = wager.settle(result.outcome);
            self.balance += settlement.payout;

            self.record(&result, &wager, &settlement);
            self.strategy.update(&result, settlement.won);
        }

        Ok(())
    }

    fn record(&mut self, result: &RoundResult, wager: &Wager, settlement: &Settlement) {
        trace!(%result, side = %wager.side(), stake = wager.stake(), net = settlement.net, "settled round");
        self.rounds_played += 1;
        self.total_wagered += wager.stake();
        self.total_winnings += settlement.net;
        if settlement.won {
            self.total_wins += 1;
        } else {
            self.total_losses += 1;
        }
        match result.outcome {
            Outcome::Player => self.player_outcomes += 1,
            Outcome::Banker => self.banker_outcomes += 1,
            Outcome::Tie => self.ties += 1,
        }
        if result.is_natural() {
            self.naturals += 1;
        }
    }

    /// Method to get a `SimulationSummary` of the rounds played since the last reset.
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            label: self.label(),
            rounds: self.rounds_played,
            wins: self.total_wins,
            losses: self.total_losses,
            player_outcomes: self.player_outcomes,
            banker_outcomes: self.banker_outcomes,
            ties: self.ties,
            naturals: self.naturals,
            early_endings: u64::from(self.ended_early),
            total_wagered: self.total_wagered,
            winnings: self.total_winnings,
        }
    }

    /// Prints the stats currently recorded.
    pub fn display_stats(&self) {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "players final balance:".len() + 20;
        const NUMERIC_WIDTH: usize = WIDTH - TEXT_WIDTH;

        println!("{}", "-".repeat(WIDTH));
        println!("{:-^WIDTH$}", "stats");
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "rounds played:", self.rounds_played);
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "total wins:", self.total_wins);
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "total losses:", self.total_losses);
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "total winnings:", self.total_winnings);
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "players final balance:", self.balance);
        println!("{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", "ended early:", self.ended_early);
        println!("{}", "-".repeat(WIDTH));
    }

    pub fn label(&self) -> String {
        self.strategy.label()
    }

    /// Resets balance, counters and strategy so another session can be played.
    pub fn reset(&mut self, new_balance: u64) {
        self.balance = new_balance;
        self.rounds_played = 0;
        self.total_wins = 0;
        self.total_losses = 0;
        self.player_outcomes = 0;
        self.banker_outcomes = 0;
        self.ties = 0;
        self.naturals = 0;
        self.total_wagered = 0;
        self.total_winnings = 0;
        self.ended_early = false;
        self.strategy.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FlatBet;
    use punto_banco_lib::BetSide;
    use rand::SeedableRng;

    #[test]
    fn test_game() {
        let strategy = FlatBet::new(BetSide::Banker, 5);
        let mut game = BaccaratGameSim::new(strategy, StdRng::seed_from_u64(1), 8, 300, 5, 1_000_000);

        game.run().unwrap();

        assert_eq!(game.rounds_played, 300);
        assert_eq!(game.total_wins + game.total_losses, 300);
        assert_eq!(game.player_outcomes + game.banker_outcomes + game.ties, 300);
        assert_eq!(game.total_wins, game.banker_outcomes);
        assert_eq!(game.total_wagered, 1_500);
        assert_eq!(game.balance as i64, 1_000_000 + game.total_winnings);
        assert!(!game.ended_early);
    }

    #[test]
    fn session_ends_early_when_broke() {
        let strategy = FlatBet::new(BetSide::Tie, 10);
        let mut game = BaccaratGameSim::new(strategy, StdRng::seed_from_u64(3), 8, 10_000, 10, 30);

        game.run().unwrap();

        assert!(game.ended_early);
        assert_eq!(game.balance, 0);
        assert!(game.rounds_played < 10_000);
        assert_eq!(game.summary().early_endings, 1);
    }

    #[test]
    fn short_stack_ends_session_instead_of_shrinking_the_stake() {
        let strategy = FlatBet::new(BetSide::Tie, 10);
        let mut game = BaccaratGameSim::new(strategy, StdRng::seed_from_u64(3), 8, 10_000, 1, 15);

        game.run().unwrap();

        assert!(game.ended_early);
        assert_eq!(game.total_wagered % 10, 0);
        assert_eq!(game.total_wagered, 10 * game.rounds_played);
        assert!(game.balance < 10);
        assert_eq!(game.balance % 10, 5);
    }

    #[test]
    fn stake_below_table_minimum_is_rejected() {
        let strategy = FlatBet::new(BetSide::Banker, 5);
        let mut game = BaccaratGameSim::new(strategy, StdRng::seed_from_u64(1), 8, 10, 10, 500);

        let result = game.run();

        assert!(matches!(
            result,
            Err(SimulationError::StakeBelowMinimum {
                stake: 5,
                min_bet: 10
            })
        ));
        assert_eq!(game.rounds_played, 0);
        assert_eq!(game.balance, 500);
    }

    #[test]
    fn reset_clears_counters() {
        let strategy = FlatBet::new(BetSide::Player, 5);
        let mut game = BaccaratGameSim::new(strategy, StdRng::seed_from_u64(9), 8, 20, 5, 500);
        game.run().unwrap();
        game.reset(500);
        let summary = game.summary();
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.winnings, 0);
        assert_eq!(game.balance, 500);
        assert_eq!(summary.label, "flat player");
    }
}
