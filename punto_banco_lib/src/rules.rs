//! The fixed drawing rules of punto banco. Every function here works on totals and pip values only,
//! so the whole decision table can be checked without dealing a card.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// Two card total from which a hand is a natural.
pub const NATURAL: u8 = 8;
/// Highest total on which the player draws a third card.
pub const PLAYER_DRAWS_UP_TO: u8 = 5;
/// Highest total on which the banker draws when the player stood.
pub const BANKER_DRAWS_UP_TO: u8 = 5;

/// The result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Player,
    Banker,
    Tie,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Player => "PLAYER",
            Outcome::Banker => "BANKER",
            Outcome::Tie => "TIE",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Returns true if either two card total is a natural, in which case both sides stand.
pub fn is_natural(player_total: u8, banker_total: u8) -> bool {
    player_total >= NATURAL || banker_total >= NATURAL
}

/// Returns true if the player draws a third card on `player_total`.
pub fn player_draws(player_total: u8) -> bool {
    player_total <= PLAYER_DRAWS_UP_TO
}

/// Returns true if the banker draws a third card. `player_third` is the pip value of the player's third card,
/// `None` when the player stood.
pub fn banker_draws(banker_total: u8, player_third: Option<u8>) -> bool {
    let Some(third) = player_third else {
        return banker_total <= BANKER_DRAWS_UP_TO;
    };
    match banker_total {
        0..=2 => true,
        3 => third != 8,
        4 => (2..=7).contains(&third),
        5 => (4..=7).contains(&third),
        6 => matches!(third, 6 | 7),
        _ => false,
    }
}

/// Compares the final totals, the higher total wins.
pub fn outcome(player_total: u8, banker_total: u8) -> Outcome {
    match player_total.cmp(&banker_total) {
        Ordering::Greater => Outcome::Player,
        Ordering::Less => Outcome::Banker,
        Ordering::Equal => Outcome::Tie,
    }
}
