use punto_banco_lib::prelude::*;
use punto_banco_lib::rules;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ROUNDS: u64 = 2_000;

/// Plays many seeded rounds and checks every result against the drawing rules from the opening hands.
#[test]
fn seeded_rounds_follow_the_drawing_rules() {
    for seed in 0..ROUNDS {
        let mut shoe = Shoe::new();
        shoe.shuffle_with(&mut StdRng::seed_from_u64(seed));
        let result = play_round(&mut shoe).unwrap();

        assert!(result.player_total <= 9 && result.banker_total <= 9);
        assert_eq!(result.player_total, result.player.total());
        assert_eq!(result.banker_total, result.banker.total());
        assert_eq!(shoe.len(), 416 - result.cards_dealt());

        let mut player_cards = result.player.cards();
        let mut banker_cards = result.banker.cards();
        let opening_player = Hand::new(player_cards.next().unwrap(), player_cards.next().unwrap());
        let opening_banker = Hand::new(banker_cards.next().unwrap(), banker_cards.next().unwrap());
        let (player_start, banker_start) = (opening_player.total(), opening_banker.total());

        if rules::is_natural(player_start, banker_start) {
            assert_eq!(result.cards_dealt(), 4, "seed {seed}: natural must stand");
            assert!(result.is_natural());
            continue;
        }

        assert_eq!(
            result.player.third_card().is_some(),
            rules::player_draws(player_start),
            "seed {seed}: player draw"
        );
        let player_third = result.player.third_card().map(|card| card.pip());
        assert_eq!(
            result.banker.third_card().is_some(),
            rules::banker_draws(banker_start, player_third),
            "seed {seed}: banker draw"
        );
        assert_eq!(
            result.outcome,
            rules::outcome(result.player_total, result.banker_total)
        );
    }
}

#[test]
fn shoe_cards_are_conserved_through_a_round() {
    let mut shoe = Shoe::new();
    shoe.shuffle_with(&mut StdRng::seed_from_u64(42));
    let result = play_round(&mut shoe).unwrap();
    for rank in Rank::all() {
        let dealt = result
            .player
            .cards()
            .chain(result.banker.cards())
            .filter(|&card| card == rank)
            .count();
        assert_eq!(shoe.count(rank) + dealt, 32);
    }
}

#[test]
fn every_outcome_occurs_over_many_rounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    let (mut player, mut banker, mut tie) = (0, 0, 0);
    for _ in 0..ROUNDS {
        match play_fresh_round_with(DECK_COUNT, &mut rng).unwrap().outcome {
            Outcome::Player => player += 1,
            Outcome::Banker => banker += 1,
            Outcome::Tie => tie += 1,
        }
    }
    assert!(player > 0 && banker > 0 && tie > 0);
    assert!(banker > tie && player > tie);
}
