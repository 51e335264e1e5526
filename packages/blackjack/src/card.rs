use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// A playing card. Rank 1 is the Ace, 11/12/13 are Jack, Queen and King.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    suit: Suit,
    rank: u8,
}

#[derive(Deserialize)]
struct RawCard {
    suit: Suit,
    rank: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = GameError;

    fn try_from(raw: RawCard) -> Result<Self> {
        Card::new(raw.suit, raw.rank)
    }
}

impl Card {
    pub const ACE: u8 = 1;
    pub const JACK: u8 = 11;
    pub const QUEEN: u8 = 12;
    pub const KING: u8 = 13;

    pub fn new(suit: Suit, rank: u8) -> Result<Self> {
        if !(Self::ACE..=Self::KING).contains(&rank) {
            return Err(GameError::InvalidRank(rank));
        }
        Ok(Self { suit, rank })
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Self::ACE
    }

    /// Blackjack value with the Ace counted soft (11).
    pub fn value(&self) -> u8 {
        match self.rank {
            Self::ACE => 11,
            r => r.min(10),
        }
    }

    /// Index in creation order: suits outer, ranks inner.
    pub fn index(&self) -> usize {
        self.suit as usize * 13 + (self.rank as usize - 1)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 52 {
            return None;
        }
        Some(Self {
            suit: Suit::ALL[index / 13],
            rank: (index % 13) as u8 + 1,
        })
    }

    pub fn rank_label(&self) -> String {
        match self.rank {
            Self::ACE => "A".to_string(),
            Self::JACK => "J".to_string(),
            Self::QUEEN => "Q".to_string(),
            Self::KING => "K".to_string(),
            r => r.to_string(),
        }
    }

    pub fn to_display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit.symbol())
    }
}
