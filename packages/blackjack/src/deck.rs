use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Card, GameError, Result, Suit};

pub const DECK_SIZE: usize = 52;

/// Build the 52-card sequence, suits outer and ranks inner.
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Card::ACE..=Card::KING {
            if let Ok(card) = Card::new(suit, rank) {
                cards.push(card);
            }
        }
    }
    cards
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

/// Cards remaining to be dealt. The next card dealt is the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: create_deck(),
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// A deck that deals `deal_order` front to back.
    pub fn stacked(deal_order: &[Card]) -> Self {
        Self {
            cards: deal_order.iter().rev().copied().collect(),
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.cards, rng);
    }

    pub fn deal(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
