use thiserror::Error;

/// Error type shared by every fallible operation of the punto banco core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuntoBancoError {
    /// A card was requested from a shoe that has no cards left.
    #[error("attempted to draw a card from an empty shoe")]
    EmptyShoe,
    #[error("{0} is not a valid card rank, expected a value from 1 to 13")]
    InvalidRank(u8),
    #[error("a shoe must be built from at least one deck")]
    InvalidDeckCount,
    #[error("'{0}' is not a valid bet, pick from 'p', 'c' or 't'")]
    InvalidBetSide(char),
    #[error("a wager must stake between 1 and {} coins", crate::wager::MAX_STAKE)]
    InvalidStake,
}
