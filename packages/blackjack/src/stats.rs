use serde::{Deserialize, Serialize};

use crate::{Outcome, RoundResult};

/// Running totals across the rounds of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub total_wagered: u128,
    pub net: i128,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.result {
            RoundResult::Win => self.wins += 1,
            RoundResult::Loss => self.losses += 1,
            RoundResult::Push => self.pushes += 1,
        }
        self.total_wagered = self.total_wagered.saturating_add(outcome.wager);
        self.net = self.net.saturating_add(outcome.net());
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }

    /// Fraction of rounds won, pushes included in the denominator
    pub fn win_rate(&self) -> f64 {
        match self.rounds_played() {
            0 => 0.0,
            n => f64::from(self.wins) / f64::from(n),
        }
    }
}
