use crate::PuntoBancoError;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Lowest and highest rank a card can take, ace through king.
pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 13;

/// Struct for the face value of a card. Suits play no part in punto banco so they are not modelled,
/// a deck is simply four copies of each rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const TEN: Rank = Rank(10);
    pub const KING: Rank = Rank(13);

    /// Associated function to create a new `Rank`, fails if `value` is outside of 1..=13.
    pub fn new(value: u8) -> Result<Rank, PuntoBancoError> {
        if (MIN_RANK..=MAX_RANK).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(PuntoBancoError::InvalidRank(value))
        }
    }

    /// Iterator over every rank in generation order, ace first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (MIN_RANK..=MAX_RANK).map(Rank)
    }

    /// Getter for the numeric rank.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the pip value of the card, tens and face cards count for nothing.
    pub fn pip(&self) -> u8 {
        if self.0 > 9 {
            0
        } else {
            self.0
        }
    }

    /// Returns the single character used to display the card.
    pub fn glyph(&self) -> char {
        match self.0 {
            1 => 'A',
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            n => char::from(b'0' + n),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = PuntoBancoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.glyph())
    }
}
