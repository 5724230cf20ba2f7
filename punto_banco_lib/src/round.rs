//! The round engine. Deals one hand of punto banco from a shoe and applies the drawing rules.

use crate::hand::Hand;
use crate::rules::{self, Outcome};
use crate::shoe::Shoe;
use crate::PuntoBancoError;
use rand::Rng;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// Struct holding everything about a finished round: both hands, both final totals and the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub player: Hand,
    pub banker: Hand,
    pub player_total: u8,
    pub banker_total: u8,
    pub outcome: Outcome,
}

impl RoundResult {
    /// Returns true if the round was decided on the first four cards by a natural.
    pub fn is_natural(&self) -> bool {
        self.player.is_natural() || self.banker.is_natural()
    }

    /// Number of cards the round took from the shoe.
    pub fn cards_dealt(&self) -> usize {
        self.player.len() + self.banker.len()
    }
}

impl Display for RoundResult {
    /// Formats the result as a single line, the player's hand, the banker's hand and the outcome.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.player, self.banker, self.outcome)
    }
}

/// Plays one round from `shoe`. The result depends only on the order in which the shoe yields its cards.
/// Fails only if the shoe runs out, which cannot happen with six or more cards left.
pub fn play_round(shoe: &mut Shoe) -> Result<RoundResult, PuntoBancoError> {
    // Player is dealt both cards before the banker
    let mut player = Hand::new(shoe.draw()?, shoe.draw()?);
    let mut banker = Hand::new(shoe.draw()?, shoe.draw()?);
    let mut player_total = player.total();
    let mut banker_total = banker.total();
    debug!(%player, %banker, player_total, banker_total, "dealt opening hands");

    if rules::is_natural(player_total, banker_total) {
        debug!("natural, both sides stand");
    } else {
        if rules::player_draws(player_total) {
            player_total = player.receive_third(shoe.draw()?);
            debug!(%player, player_total, "player drew a third card");
        }

        let player_third = player.third_card().map(|card| card.pip());
        if rules::banker_draws(banker_total, player_third) {
            banker_total = banker.receive_third(shoe.draw()?);
            debug!(%banker, banker_total, "banker drew a third card");
        }
    }

    let outcome = rules::outcome(player_total, banker_total);
    debug!(%outcome, player_total, banker_total, "round finished");

    Ok(RoundResult {
        player,
        banker,
        player_total,
        banker_total,
        outcome,
    })
}

/// Builds a shoe of `deck_count` decks, shuffles it from system entropy and plays one round from it.
/// The shoe is discarded afterwards.
pub fn play_fresh_round(deck_count: usize) -> Result<RoundResult, PuntoBancoError> {
    let mut shoe = Shoe::build(deck_count)?;
    shoe.shuffle();
    play_round(&mut shoe)
}

/// Same as `play_fresh_round` but shuffles with the given generator.
pub fn play_fresh_round_with<R: Rng + ?Sized>(
    deck_count: usize,
    rng: &mut R,
) -> Result<RoundResult, PuntoBancoError> {
    let mut shoe = Shoe::build(deck_count)?;
    shoe.shuffle_with(rng);
    play_round(&mut shoe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;
    use rstest::rstest;

    fn stacked(values: &[u8]) -> Shoe {
        Shoe::stacked(values.iter().map(|&v| Rank::new(v).unwrap()))
    }

    #[test]
    fn player_natural_wins() {
        let mut shoe = stacked(&[1, 8, 2, 9]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player_total, 9);
        assert_eq!(result.banker_total, 1);
        assert_eq!(result.outcome, Outcome::Player);
        assert!(result.is_natural());
        assert_eq!(result.to_string(), "A,8 2,9 PLAYER");
    }

    #[test]
    fn banker_natural_stops_player_drawing() {
        // player 0 would draw, but the banker has 8
        let mut shoe = stacked(&[10, 13, 4, 4, 9, 9]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player.third_card(), None);
        assert_eq!(result.banker.third_card(), None);
        assert_eq!(result.outcome, Outcome::Banker);
        assert_eq!(shoe.len(), 2);
    }

    #[test]
    fn both_draw_to_a_tie() {
        let mut shoe = stacked(&[5, 5, 5, 5, 3, 3]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player_total, 3);
        assert_eq!(result.banker_total, 3);
        assert_eq!(result.outcome, Outcome::Tie);
        assert_eq!(result.to_string(), "5,5,3 5,5,3 TIE");
        assert_eq!(result.cards_dealt(), 6);
        assert!(shoe.is_empty());
    }

    #[test]
    fn banker_draws_on_five_when_player_stands() {
        let mut shoe = stacked(&[6, 10, 2, 3, 4]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player.len(), 2);
        assert_eq!(result.banker_total, 9);
        assert_eq!(result.to_string(), "6,T 2,3,4 BANKER");
    }

    #[test]
    fn banker_stands_on_six_when_player_stands() {
        let mut shoe = stacked(&[7, 10, 3, 3, 9]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.cards_dealt(), 4);
        assert_eq!(result.outcome, Outcome::Player);
        assert_eq!(shoe.len(), 1);
    }

    #[rstest]
    #[case(6, true)]
    #[case(7, true)]
    #[case(8, false)]
    #[case(5, false)]
    fn banker_six_depends_on_player_third(#[case] third: u8, #[case] draws: bool) {
        // player 2,A = 3 draws, banker 3,3 = 6
        let mut shoe = stacked(&[2, 1, 3, 3, third, 1]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player.third_card().map(u8::from), Some(third));
        assert_eq!(result.banker.third_card().is_some(), draws);
    }

    #[test]
    fn banker_seven_stands_against_player_seven() {
        let mut shoe = stacked(&[2, 1, 3, 4, 7, 9]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player_total, 0);
        assert_eq!(result.banker.third_card(), None);
        assert_eq!(result.outcome, Outcome::Banker);
        assert_eq!(shoe.len(), 1);
    }

    #[test]
    fn banker_three_stands_against_player_eight() {
        let mut shoe = stacked(&[1, 1, 1, 2, 8, 5]);
        let result = play_round(&mut shoe).unwrap();
        assert_eq!(result.player_total, 0);
        assert_eq!(result.banker_total, 3);
        assert_eq!(result.banker.len(), 2);
        assert_eq!(result.outcome, Outcome::Banker);
    }

    #[test]
    fn same_draw_order_gives_same_result() {
        let order = [4, 12, 1, 2, 6, 9, 3];
        let first = play_round(&mut stacked(&order)).unwrap();
        let second = play_round(&mut stacked(&order)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_shoe_fails() {
        let mut shoe = stacked(&[1, 2, 3]);
        assert_eq!(play_round(&mut shoe), Err(PuntoBancoError::EmptyShoe));
    }

    #[test]
    fn fresh_round_consumes_four_to_six_cards() {
        let result = play_fresh_round(8).unwrap();
        assert!((4..=6).contains(&result.cards_dealt()));
        assert!(play_fresh_round(0).is_err());
    }

    #[test]
    fn serializes_to_json() {
        let result = play_round(&mut stacked(&[1, 8, 2, 9])).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["player"], serde_json::json!(["A", "8"]));
        assert_eq!(json["banker_total"], 1);
        assert_eq!(json["outcome"], "PLAYER");
    }
}
