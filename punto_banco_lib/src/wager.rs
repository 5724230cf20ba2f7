//! Settlement of a single wager against the outcome of a round.

use crate::rules::Outcome;
use crate::PuntoBancoError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The side a wager is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Player,
    Banker,
    Tie,
}

impl BetSide {
    /// Parses the letter typed at the table, case insensitive. 'c' is the captain i.e. the banker, 'b' is accepted as well.
    pub fn from_choice(choice: char) -> Result<BetSide, PuntoBancoError> {
        match choice.to_ascii_lowercase() {
            'p' => Ok(BetSide::Player),
            'c' | 'b' => Ok(BetSide::Banker),
            't' => Ok(BetSide::Tie),
            _ => Err(PuntoBancoError::InvalidBetSide(choice)),
        }
    }

    /// Amount returned on a winning wager per hundred coins staked. The banker pays a five percent commission.
    pub fn payout_percent(&self) -> u64 {
        match self {
            BetSide::Player => 200,
            BetSide::Banker => 195,
            BetSide::Tie => 800,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.payout_percent() as f64 / 100.0
    }

    /// Returns true if a wager on this side wins given `outcome`.
    pub fn wins_on(&self, outcome: Outcome) -> bool {
        BetSide::from(outcome) == *self
    }
}

impl From<Outcome> for BetSide {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Player => BetSide::Player,
            Outcome::Banker => BetSide::Banker,
            Outcome::Tie => BetSide::Tie,
        }
    }
}

impl Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self {
            BetSide::Player => "player",
            BetSide::Banker => "banker",
            BetSide::Tie => "tie",
        };
        write!(f, "{}", side)
    }
}

/// Largest stake a wager accepts. Even the tie payout of such a stake fits in an `i64`.
pub const MAX_STAKE: u64 = i64::MAX as u64 / 800;

/// A stake placed on one side before the cards are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wager {
    side: BetSide,
    stake: u64,
}

/// What a wager pays back once the round is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub won: bool,
    /// Coins handed back to the bettor, stake included. Zero on a loss.
    pub payout: u64,
    /// Payout less the stake.
    pub net: i64,
}

impl Wager {
    /// Associated function to create a new `Wager`. A stake of zero or above `MAX_STAKE` is rejected.
    pub fn new(side: BetSide, stake: u64) -> Result<Wager, PuntoBancoError> {
        if stake == 0 || stake > MAX_STAKE {
            return Err(PuntoBancoError::InvalidStake);
        }
        Ok(Wager { side, stake })
    }

    pub fn side(&self) -> BetSide {
        self.side
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    /// Settles the wager, fractional coins of the banker commission are dropped.
    /// A tie is a loss for wagers on the player or the banker.
    pub fn settle(&self, outcome: Outcome) -> Settlement {
        if self.side.wins_on(outcome) {
            let payout = self.stake * self.side.payout_percent() / 100;
            Settlement {
                won: true,
                payout,
                net: payout as i64 - self.stake as i64,
            }
        } else {
            Settlement {
                won: false,
                payout: 0,
                net: -(self.stake as i64),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('p', BetSide::Player)]
    #[case('P', BetSide::Player)]
    #[case('c', BetSide::Banker)]
    #[case('C', BetSide::Banker)]
    #[case('b', BetSide::Banker)]
    #[case('t', BetSide::Tie)]
    #[case('T', BetSide::Tie)]
    fn parses_choices(#[case] choice: char, #[case] side: BetSide) {
        assert_eq!(BetSide::from_choice(choice), Ok(side));
    }

    #[rstest]
    #[case('x')]
    #[case('1')]
    #[case(' ')]
    fn rejects_unknown_choices(#[case] choice: char) {
        assert_eq!(
            BetSide::from_choice(choice),
            Err(PuntoBancoError::InvalidBetSide(choice))
        );
    }

    #[rstest]
    #[case(BetSide::Player, Outcome::Player, 100, 200)]
    #[case(BetSide::Banker, Outcome::Banker, 100, 195)]
    #[case(BetSide::Banker, Outcome::Banker, 3, 5)]
    #[case(BetSide::Tie, Outcome::Tie, 100, 800)]
    fn winning_payouts(
        #[case] side: BetSide,
        #[case] outcome: Outcome,
        #[case] stake: u64,
        #[case] payout: u64,
    ) {
        let settlement = Wager::new(side, stake).unwrap().settle(outcome);
        assert!(settlement.won);
        assert_eq!(settlement.payout, payout);
        assert_eq!(settlement.net, payout as i64 - stake as i64);
    }

    #[rstest]
    #[case(BetSide::Player, Outcome::Banker)]
    #[case(BetSide::Player, Outcome::Tie)]
    #[case(BetSide::Banker, Outcome::Player)]
    #[case(BetSide::Banker, Outcome::Tie)]
    #[case(BetSide::Tie, Outcome::Player)]
    fn losing_wagers_pay_nothing(#[case] side: BetSide, #[case] outcome: Outcome) {
        let settlement = Wager::new(side, 40).unwrap().settle(outcome);
        assert!(!settlement.won);
        assert_eq!(settlement.payout, 0);
        assert_eq!(settlement.net, -40);
    }

    #[test]
    fn zero_stake_is_rejected() {
        assert_eq!(
            Wager::new(BetSide::Player, 0),
            Err(PuntoBancoError::InvalidStake)
        );
    }

    #[test]
    fn largest_stake_settles_without_overflow() {
        let settlement = Wager::new(BetSide::Tie, MAX_STAKE)
            .unwrap()
            .settle(Outcome::Tie);
        assert_eq!(settlement.payout, MAX_STAKE * 8);
        assert_eq!(settlement.net, (MAX_STAKE * 7) as i64);

        let lost = Wager::new(BetSide::Banker, MAX_STAKE)
            .unwrap()
            .settle(Outcome::Player);
        assert_eq!(lost.net, -(MAX_STAKE as i64));
    }

    #[rstest]
    #[case(MAX_STAKE + 1)]
    #[case(100_000_000_000_000_000)]
    #[case(u64::MAX)]
    fn oversized_stake_is_rejected(#[case] stake: u64) {
        assert_eq!(
            Wager::new(BetSide::Tie, stake),
            Err(PuntoBancoError::InvalidStake)
        );
    }

    #[test]
    fn multipliers() {
        assert_eq!(BetSide::Player.multiplier(), 2.0);
        assert_eq!(BetSide::Banker.multiplier(), 1.95);
        assert_eq!(BetSide::Tie.multiplier(), 8.0);
    }
}
