use serde::{Deserialize, Serialize};

use crate::{GameError, Result, BLACKJACK};

pub const MIN_DEALER_STAND: u8 = 17;

/// Table configuration for the local game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Dealer keeps drawing while below this total
    pub dealer_stands_on: u8,

    /// Wagers must be a multiple of this amount
    pub bet_unit: u128,

    pub min_bet: u128,
    pub max_bet: u128,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            dealer_stands_on: MIN_DEALER_STAND,
            bet_unit: 10,
            min_bet: 10,
            max_bet: 1_000,
        }
    }
}

impl TableRules {
    /// The dealer must keep drawing below 17 and cannot draw past 21.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEALER_STAND..=BLACKJACK).contains(&self.dealer_stands_on) {
            return Err(GameError::InvalidDealerThreshold(self.dealer_stands_on));
        }
        Ok(())
    }

    /// Check a wager before a round is opened. The engine itself only
    /// requires a positive wager; granularity and limits are table policy.
    pub fn validate_wager(&self, wager: u128, balance: u128) -> Result<()> {
        if wager == 0 {
            return Err(GameError::InvalidWager(wager));
        }
        if self.bet_unit > 1 && wager % self.bet_unit != 0 {
            return Err(GameError::WagerNotMultiple {
                wager,
                unit: self.bet_unit,
            });
        }
        if wager < self.min_bet || wager > self.max_bet {
            return Err(GameError::WagerOutOfRange {
                wager,
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if wager > balance {
            return Err(GameError::InsufficientBalance { wager, balance });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = TableRules::default();
        assert_eq!(rules.dealer_stands_on, 17);
        assert_eq!(rules.bet_unit, 10);
    }

    #[test]
    fn test_validate_wager_accepts_valid() {
        let rules = TableRules::default();
        assert!(rules.validate_wager(100, 1_000).is_ok());
        assert!(rules.validate_wager(1_000, 1_000).is_ok());
    }

    #[test]
    fn test_validate_wager_zero() {
        let rules = TableRules::default();
        assert_eq!(rules.validate_wager(0, 1_000), Err(GameError::InvalidWager(0)));
    }

    #[test]
    fn test_validate_wager_not_multiple() {
        let rules = TableRules::default();
        assert_eq!(
            rules.validate_wager(25, 1_000),
            Err(GameError::WagerNotMultiple { wager: 25, unit: 10 })
        );
    }

    #[test]
    fn test_validate_wager_limits() {
        let rules = TableRules {
            min_bet: 20,
            max_bet: 200,
            ..TableRules::default()
        };
        assert!(matches!(
            rules.validate_wager(10, 1_000),
            Err(GameError::WagerOutOfRange { .. })
        ));
        assert!(matches!(
            rules.validate_wager(210, 1_000),
            Err(GameError::WagerOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_wager_balance() {
        let rules = TableRules::default();
        assert_eq!(
            rules.validate_wager(500, 300),
            Err(GameError::InsufficientBalance {
                wager: 500,
                balance: 300
            })
        );
    }

    #[test]
    fn test_dealer_threshold_range() {
        for stands_on in [17, 18, 21] {
            let rules = TableRules {
                dealer_stands_on: stands_on,
                ..TableRules::default()
            };
            assert!(rules.validate().is_ok());
        }
        for stands_on in [0, 12, 16, 22, 30] {
            let rules = TableRules {
                dealer_stands_on: stands_on,
                ..TableRules::default()
            };
            assert_eq!(
                rules.validate(),
                Err(GameError::InvalidDealerThreshold(stands_on))
            );
        }
    }

    #[test]
    fn test_unit_of_one_skips_granularity() {
        let rules = TableRules {
            bet_unit: 1,
            min_bet: 1,
            ..TableRules::default()
        };
        assert!(rules.validate_wager(37, 100).is_ok());
    }
}
