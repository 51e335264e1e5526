use thiserror::Error;

use crate::RoundPhase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot {action} during {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: RoundPhase,
    },
    #[error("deck is exhausted")]
    DeckExhausted,
    #[error("invalid card rank: {0}")]
    InvalidRank(u8),
    #[error("wager must be positive, got {0}")]
    InvalidWager(u128),
    #[error("wager {wager} is not a multiple of {unit}")]
    WagerNotMultiple { wager: u128, unit: u128 },
    #[error("wager {wager} outside table limits {min}..={max}")]
    WagerOutOfRange { wager: u128, min: u128, max: u128 },
    #[error("wager {wager} exceeds balance {balance}")]
    InsufficientBalance { wager: u128, balance: u128 },
    #[error("dealer must stand on a total from 17 to 21, got {0}")]
    InvalidDealerThreshold(u8),
    #[error("invalid round: {0}")]
    InvalidRound(&'static str),
}

pub type Result<T> = std::result::Result<T, GameError>;
