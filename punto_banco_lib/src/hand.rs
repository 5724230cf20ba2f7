use crate::card::Rank;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Struct for one side's hand, the two dealt cards plus the third card if one was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    first: Rank,
    second: Rank,
    third: Option<Rank>,
}

impl Hand {
    /// Associated function to create a new two card `Hand`.
    pub fn new(first: Rank, second: Rank) -> Hand {
        Hand {
            first,
            second,
            third: None,
        }
    }

    /// Adds the third card to the hand and returns the new total.
    pub(crate) fn receive_third(&mut self, card: Rank) -> u8 {
        debug_assert!(self.third.is_none(), "a hand holds at most three cards");
        self.third = Some(card);
        self.total()
    }

    /// The hand's total, the pip values summed modulo ten.
    pub fn total(&self) -> u8 {
        self.cards().map(|card| card.pip()).sum::<u8>() % 10
    }

    /// The hand as it was first dealt, without any third card.
    pub fn opening(&self) -> Hand {
        Hand::new(self.first, self.second)
    }

    pub fn third_card(&self) -> Option<Rank> {
        self.third
    }

    /// The cards of the hand in the order they were dealt.
    pub fn cards(&self) -> impl Iterator<Item = Rank> {
        [self.first, self.second].into_iter().chain(self.third)
    }

    pub fn len(&self) -> usize {
        if self.third.is_some() {
            3
        } else {
            2
        }
    }

    /// Returns true if the two dealt cards total eight or nine.
    pub fn is_natural(&self) -> bool {
        self.third.is_none() && self.total() >= 8
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyphs = self
            .cards()
            .map(|card| card.glyph().to_string())
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}", glyphs)
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for card in self.cards() {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}
