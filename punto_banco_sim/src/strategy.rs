//! Betting strategies the simulator can test. A strategy only decides where and how much to bet,
//! the cards are always dealt by the same fixed rules.

use crate::SimulationError;
use punto_banco_lib::{BetSide, Outcome, RoundResult};

pub mod prelude {
    pub use super::{
        create_betting_strategy, BettingStrategy, BettingStrategyDyn, FlatBet, FollowTheShoe,
        Martingale, STRATEGY_NAMES,
    };
}

/// Trait for a generic betting strategy.
pub trait BettingStrategy {
    /// The side the next wager is placed on.
    fn side(&self) -> BetSide;
    /// The stake the strategy wants for the next wager given the current `balance`.
    /// The simulation ends the session rather than accept a smaller stake than the one returned.
    fn stake(&self, balance: u64) -> u64;
    /// Lets the strategy see the finished round and whether its wager won.
    fn update(&mut self, result: &RoundResult, won: bool);
    /// Puts the strategy back into its starting state for a new simulation.
    fn reset(&mut self);
    /// Short description used when reporting results.
    fn label(&self) -> String;
}

/// Strategy object picked at runtime.
pub type BettingStrategyDyn = Box<dyn BettingStrategy + Send + 'static>;

impl<B: BettingStrategy + ?Sized> BettingStrategy for Box<B> {
    fn side(&self) -> BetSide {
        (**self).side()
    }

    fn stake(&self, balance: u64) -> u64 {
        (**self).stake(balance)
    }

    fn update(&mut self, result: &RoundResult, won: bool) {
        (**self).update(result, won)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Struct for the simplest strategy, the same stake on the same side every round.
#[derive(Debug, Clone, Copy)]
pub struct FlatBet {
    side: BetSide,
    stake: u64,
}

impl FlatBet {
    /// Associated method for returning a new `FlatBet` struct
    pub fn new(side: BetSide, stake: u64) -> FlatBet {
        FlatBet { side, stake }
    }
}

impl BettingStrategy for FlatBet {
    fn side(&self) -> BetSide {
        self.side
    }

    fn stake(&self, _balance: u64) -> u64 {
        self.stake
    }

    fn update(&mut self, _result: &RoundResult, _won: bool) {}

    fn reset(&mut self) {}

    fn label(&self) -> String {
        format!("flat {}", self.side)
    }
}

/// Struct for a strategy that bets on whichever side won the last round, ties are ignored.
/// Bets on the banker before any round has been seen.
#[derive(Debug, Clone, Copy)]
pub struct FollowTheShoe {
    stake: u64,
    next: BetSide,
}

impl FollowTheShoe {
    pub fn new(stake: u64) -> FollowTheShoe {
        FollowTheShoe {
            stake,
            next: BetSide::Banker,
        }
    }
}

impl BettingStrategy for FollowTheShoe {
    fn side(&self) -> BetSide {
        self.next
    }

    fn stake(&self, _balance: u64) -> u64 {
        self.stake
    }

    fn update(&mut self, result: &RoundResult, _won: bool) {
        if result.outcome != Outcome::Tie {
            self.next = BetSide::from(result.outcome);
        }
    }

    fn reset(&mut self) {
        self.next = BetSide::Banker;
    }

    fn label(&self) -> String {
        String::from("follow the shoe")
    }
}

/// Struct for the martingale progression, the stake doubles after every loss and drops back to the base stake after a win.
/// The stake never grows past `base_stake * 2^max_doublings`.
#[derive(Debug, Clone, Copy)]
pub struct Martingale {
    side: BetSide,
    base_stake: u64,
    current_stake: u64,
    max_doublings: u32,
}

impl Martingale {
    pub const DEFAULT_MAX_DOUBLINGS: u32 = 6;

    pub fn new(side: BetSide, base_stake: u64, max_doublings: u32) -> Martingale {
        Martingale {
            side,
            base_stake,
            current_stake: base_stake,
            max_doublings,
        }
    }

    fn max_stake(&self) -> u64 {
        self.base_stake.saturating_mul(1u64 << self.max_doublings.min(32))
    }
}

impl BettingStrategy for Martingale {
    fn side(&self) -> BetSide {
        self.side
    }

    fn stake(&self, _balance: u64) -> u64 {
        self.current_stake
    }

    fn update(&mut self, _result: &RoundResult, won: bool) {
        if won {
            self.current_stake = self.base_stake;
        } else {
            self.current_stake = u64::min(self.current_stake.saturating_mul(2), self.max_stake());
        }
    }

    fn reset(&mut self) {
        self.current_stake = self.base_stake;
    }

    fn label(&self) -> String {
        format!("martingale {}", self.side)
    }
}

/// Names accepted by `create_betting_strategy`.
pub const STRATEGY_NAMES: [&str; 5] = ["player", "banker", "tie", "follow", "martingale"];

/// Helper function to create a betting strategy i.e. a `BettingStrategy` trait object at runtime.
pub fn create_betting_strategy<S: AsRef<str>>(
    name: S,
    stake: u64,
) -> Result<BettingStrategyDyn, SimulationError> {
    let strategy: BettingStrategyDyn = match name.as_ref() {
        "player" => Box::new(FlatBet::new(BetSide::Player, stake)),
        "banker" => Box::new(FlatBet::new(BetSide::Banker, stake)),
        "tie" => Box::new(FlatBet::new(BetSide::Tie, stake)),
        "follow" => Box::new(FollowTheShoe::new(stake)),
        "martingale" => Box::new(Martingale::new(
            BetSide::Banker,
            stake,
            Martingale::DEFAULT_MAX_DOUBLINGS,
        )),
        other => return Err(SimulationError::UnknownStrategy(other.to_string())),
    };

    Ok(strategy)
}
