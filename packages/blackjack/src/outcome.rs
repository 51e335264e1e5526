use serde::{Deserialize, Serialize};

use crate::hand::BLACKJACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Loss,
    Push,
}

/// Why a round ended the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    PlayerBust,
    DealerBust,
    HigherScore,
    Tie,
    LowerScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: RoundResult,
    pub reason: Resolution,
    pub wager: u128,
    /// Winnings for a win, the returned stake for a push, nothing for a loss.
    pub payout: u128,
}

impl Outcome {
    /// Amount credited back once the stake has already been taken at bet time.
    pub fn total_return(&self) -> u128 {
        match self.result {
            RoundResult::Win => self.wager.saturating_add(self.payout),
            RoundResult::Push => self.wager,
            RoundResult::Loss => 0,
        }
    }

    /// Change to the player's balance over the whole round.
    pub fn net(&self) -> i128 {
        let wager = i128::try_from(self.wager).unwrap_or(i128::MAX);
        match self.result {
            RoundResult::Win => wager,
            RoundResult::Push => 0,
            RoundResult::Loss => -wager,
        }
    }
}

/// Settle a finished round from the final scores. A player bust loses
/// regardless of the dealer total.
pub fn settle(player_score: u8, dealer_score: u8, wager: u128) -> Outcome {
    let (result, reason) = if player_score > BLACKJACK {
        (RoundResult::Loss, Resolution::PlayerBust)
    } else if dealer_score > BLACKJACK {
        (RoundResult::Win, Resolution::DealerBust)
    } else if player_score > dealer_score {
        (RoundResult::Win, Resolution::HigherScore)
    } else if player_score == dealer_score {
        (RoundResult::Push, Resolution::Tie)
    } else {
        (RoundResult::Loss, Resolution::LowerScore)
    };

    let payout = match result {
        RoundResult::Win | RoundResult::Push => wager,
        RoundResult::Loss => 0,
    };

    Outcome {
        result,
        reason,
        wager,
        payout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bust_loses_even_if_dealer_busts() {
        let outcome = settle(25, 24, 100);
        assert_eq!(outcome.result, RoundResult::Loss);
        assert_eq!(outcome.reason, Resolution::PlayerBust);
        assert_eq!(outcome.payout, 0);
    }

    #[test]
    fn test_dealer_bust_wins() {
        let outcome = settle(12, 22, 100);
        assert_eq!(outcome.result, RoundResult::Win);
        assert_eq!(outcome.reason, Resolution::DealerBust);
        assert_eq!(outcome.payout, 100);
        assert_eq!(outcome.total_return(), 200);
    }

    #[test]
    fn test_swapping_scores_flips_result() {
        for (high, low) in [(20, 19), (21, 17), (18, 4)] {
            assert_eq!(settle(high, low, 50).result, RoundResult::Win);
            assert_eq!(settle(low, high, 50).result, RoundResult::Loss);
        }
    }

    #[test]
    fn test_equal_scores_push_returns_wager() {
        for score in [4, 17, 20, 21] {
            let outcome = settle(score, score, 75);
            assert_eq!(outcome.result, RoundResult::Push);
            assert_eq!(outcome.reason, Resolution::Tie);
            assert_eq!(outcome.payout, 75);
            assert_eq!(outcome.total_return(), 75);
            assert_eq!(outcome.net(), 0);
        }
    }

    #[test]
    fn test_net() {
        assert_eq!(settle(20, 19, 100).net(), 100);
        assert_eq!(settle(18, 19, 100).net(), -100);
    }
}
