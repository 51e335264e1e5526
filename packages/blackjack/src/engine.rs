use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{Deck, GameRound, Result, TableRules};

/// Local game engine: a table's rules plus the RNG used to shuffle each
/// round's fresh deck.
#[derive(Debug, Clone)]
pub struct Engine {
    rng: ChaCha8Rng,
    rules: TableRules,
}

impl Engine {
    pub fn new(rules: TableRules) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            rules,
        }
    }

    /// Reproducible engine; the same seed deals the same sequence of rounds.
    pub fn from_seed(seed: u64, rules: TableRules) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            rules,
        }
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// Build and shuffle a fresh deck, then deal a new round.
    pub fn start_round(&mut self, wager: u128) -> Result<GameRound> {
        let deck = Deck::shuffled(&mut self.rng);
        GameRound::deal(wager, deck, &self.rules)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(TableRules::default())
    }
}
