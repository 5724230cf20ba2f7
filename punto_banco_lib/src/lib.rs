//! Core of the punto banco (baccarat) game: an eight deck shoe, the fixed third card drawing rules,
//! and settlement of a wager against the outcome of a round.

pub mod card;
pub mod error;
pub mod hand;
pub mod round;
pub mod rules;
pub mod shoe;
pub mod wager;

pub use card::Rank;
pub use error::PuntoBancoError;
pub use hand::Hand;
pub use round::{play_fresh_round, play_fresh_round_with, play_round, RoundResult};
pub use rules::Outcome;
pub use shoe::{Shoe, CARDS_PER_DECK, DECK_COUNT};
pub use wager::{BetSide, Settlement, Wager, MAX_STAKE};

pub mod prelude {
    pub use super::{
        play_fresh_round, play_fresh_round_with, play_round, BetSide, Hand, Outcome,
        PuntoBancoError, Rank, RoundResult, Settlement, Shoe, Wager, DECK_COUNT, MAX_STAKE,
    };
}
