use crate::Card;
use serde::{Deserialize, Serialize};

pub const BLACKJACK: u8 = 21;

/// Aces count 11 until the total passes 21, then drop to 1 one at a time.
/// Totals past `u8::MAX` saturate.
fn soft_total(cards: &[Card]) -> (u8, usize) {
    let mut total: u32 = 0;
    let mut soft_aces: usize = 0;

    for card in cards {
        if card.is_ace() {
            soft_aces += 1;
        }
        total = total.saturating_add(u32::from(card.value()));
    }

    while total > u32::from(BLACKJACK) && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    (u8::try_from(total).unwrap_or(u8::MAX), soft_aces)
}

/// Calculate the value of a blackjack hand
pub fn score(cards: &[Card]) -> u8 {
    soft_total(cards).0
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    soft_total(cards).1 > 0
}

pub fn is_busted(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        score(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit;

    fn c(rank: u8) -> Card {
        Card::new(Suit::Hearts, rank).unwrap()
    }

    #[test]
    fn test_score_simple() {
        assert_eq!(score(&[c(2), c(3)]), 5);
    }

    #[test]
    fn test_score_face_cards() {
        assert_eq!(score(&[c(13), c(12)]), 20);
        assert_eq!(score(&[c(11), c(10)]), 20);
    }

    #[test]
    fn test_score_ace_king() {
        assert_eq!(score(&[c(1), c(13)]), 21);
    }

    #[test]
    fn test_score_two_aces_and_nine() {
        assert_eq!(score(&[c(1), c(1), c(9)]), 21);
    }

    #[test]
    fn test_score_three_aces_and_eight() {
        assert_eq!(score(&[c(1), c(1), c(1), c(8)]), 21);
    }

    #[test]
    fn test_score_bust() {
        assert_eq!(score(&[c(13), c(12), c(5)]), 25);
    }

    #[test]
    fn test_score_hard_ace() {
        assert_eq!(score(&[c(1), c(6), c(9)]), 16);
    }

    #[test]
    fn test_score_all_aces() {
        let aces = vec![c(1); 4];
        assert_eq!(score(&aces), 14);
    }

    #[test]
    fn test_score_empty() {
        assert_eq!(score(&[]), 0);
    }

    #[test]
    fn test_score_long_slices() {
        assert_eq!(score(&vec![c(1); 21]), 21);
        assert_eq!(score(&vec![c(1); 22]), 22);
        assert_eq!(score(&vec![c(1); 256]), u8::MAX);
        assert!(is_busted(&vec![c(1); 256]));
        assert!(!is_soft_hand(&vec![c(1); 300]));
        assert_eq!(score(&vec![c(13); 40]), u8::MAX);
    }

    #[test]
    fn test_soft_hand() {
        assert!(is_soft_hand(&[c(1), c(6)]));
        assert!(!is_soft_hand(&[c(1), c(6), c(9)]));
        assert!(!is_soft_hand(&[c(13), c(12)]));
        // One ace forced hard, the other still soft: A + A + 5 = 17
        assert!(is_soft_hand(&[c(1), c(1), c(5)]));
    }

    #[test]
    fn test_busted() {
        assert!(is_busted(&[c(13), c(12), c(5)]));
        assert!(!is_busted(&[c(13), c(12)]));
        assert!(!is_busted(&[c(13), c(12), c(1)]));
    }

    #[test]
    fn test_blackjack() {
        assert!(is_blackjack(&[c(1), c(13)]));
        assert!(!is_blackjack(&[c(7), c(7), c(7)]));
        assert!(!is_blackjack(&[c(13), c(12)]));
    }

    #[test]
    fn test_hand_struct_value() {
        let mut hand = Hand::new();
        hand.add_card(c(13));
        hand.add_card(c(7));
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.len(), 2);
        assert!(!hand.is_soft());
    }
}
