use crate::card::Rank;
use crate::PuntoBancoError;
use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Number of decks in a standard punto banco shoe.
pub const DECK_COUNT: usize = 8;
pub const CARDS_PER_DECK: usize = 52;
const COPIES_PER_RANK: usize = 4;

/// Struct for the card supply of a single round. A shoe is built, shuffled once and then drained from the top,
/// the top being the end of the backing vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Rank>,
}

impl Shoe {
    /// Associated function to create a new, unshuffled shoe of `DECK_COUNT` decks.
    pub fn new() -> Shoe {
        Shoe::with_decks(DECK_COUNT)
    }

    /// Associated function that builds `deck_count` decks in generation order, four of each rank per deck.
    /// Fails if `deck_count` is zero.
    pub fn build(deck_count: usize) -> Result<Shoe, PuntoBancoError> {
        if deck_count == 0 {
            return Err(PuntoBancoError::InvalidDeckCount);
        }
        Ok(Shoe::with_decks(deck_count))
    }

    fn with_decks(deck_count: usize) -> Shoe {
        let mut cards = Vec::with_capacity(deck_count * CARDS_PER_DECK);
        for _ in 0..deck_count {
            for rank in Rank::all() {
                cards.extend(std::iter::repeat(rank).take(COPIES_PER_RANK));
            }
        }
        Shoe { cards }
    }

    /// Associated function for a pre-arranged shoe, `draw_order` lists the cards in the order `draw()` yields them.
    /// Intended for replaying a known round.
    pub fn stacked<I: IntoIterator<Item = Rank>>(draw_order: I) -> Shoe {
        let mut cards: Vec<Rank> = draw_order.into_iter().collect();
        cards.reverse();
        Shoe { cards }
    }

    /// Shuffles the shoe in place with a generator seeded from system entropy mixed with the current time.
    pub fn shuffle(&mut self) {
        let mut rng = StdRng::from_seed(entropy_seed());
        self.shuffle_with(&mut rng);
    }

    /// Shuffles the shoe in place with the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        debug!(cards = self.cards.len(), "shuffled shoe");
    }

    /// Removes and returns the top card of the shoe.
    pub fn draw(&mut self) -> Result<Rank, PuntoBancoError> {
        let card = self.cards.pop().ok_or(PuntoBancoError::EmptyShoe)?;
        trace!(%card, remaining = self.cards.len(), "drew card");
        Ok(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of copies of `rank` still in the shoe.
    pub fn count(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|&&card| card == rank).count()
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Shoe::new()
    }
}

/// Seed built from the OS generator with the wall clock in nanoseconds folded in, so two shoes shuffled
/// within the same second still differ.
fn entropy_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    for (byte, time_byte) in seed.iter_mut().zip(nanos.to_le_bytes()) {
        *byte ^= time_byte;
    }
    seed
}
