mod card;
mod deck;
mod engine;
mod error;
mod hand;
mod outcome;
mod round;
mod rules;
mod stats;

pub use card::{Card, Suit};
pub use deck::{create_deck, shuffle, Deck, DECK_SIZE};
pub use engine::Engine;
pub use error::{GameError, Result};
pub use hand::{is_blackjack, is_busted, is_soft_hand, score, Hand, BLACKJACK};
pub use outcome::{settle, Outcome, Resolution, RoundResult};
pub use round::{play_dealer, GameRound, RoundPhase};
pub use rules::{TableRules, MIN_DEALER_STAND};
pub use stats::SessionStats;
