use blackjack::{Engine, TableRules};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "blackjack-tui", about = "Local blackjack table in the terminal")]
pub struct Config {
    /// Starting balance in base units
    #[arg(long, env = "BLACKJACK_BALANCE", default_value = "1000")]
    pub balance: u128,

    /// Wagers must be a multiple of this amount
    #[arg(long, env = "BLACKJACK_BET_UNIT", default_value = "10")]
    pub bet_unit: u128,

    #[arg(long, env = "BLACKJACK_MIN_BET", default_value = "10")]
    pub min_bet: u128,

    #[arg(long, env = "BLACKJACK_MAX_BET", default_value = "1000")]
    pub max_bet: u128,

    /// RNG seed for a reproducible session
    #[arg(long, env = "BLACKJACK_SEED")]
    pub seed: Option<u64>,

    /// Pause between dealer cards when the dealer plays out
    #[arg(long, env = "BLACKJACK_REVEAL_DELAY_MS", default_value = "600")]
    pub reveal_delay_ms: u64,

    /// Show engine debug messages in the log panel
    #[arg(long, short, env = "BLACKJACK_VERBOSE", default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    pub fn rules(&self) -> TableRules {
        TableRules {
            bet_unit: self.bet_unit,
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            ..TableRules::default()
        }
    }

    pub fn engine(&self) -> Engine {
        match self.seed {
            Some(seed) => Engine::from_seed(seed, self.rules()),
            None => Engine::new(self.rules()),
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "blackjack-tui",
            "--balance",
            "500",
            "--bet-unit",
            "5",
            "--seed",
            "42",
            "--reveal-delay-ms",
            "0",
        ])
        .unwrap();

        assert_eq!(config.balance, 500);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.reveal_delay(), Duration::ZERO);

        let rules = config.rules();
        assert_eq!(rules.bet_unit, 5);
        assert_eq!(rules.dealer_stands_on, 17);
    }

    #[test]
    fn test_rejects_non_numeric_balance() {
        assert!(Config::try_parse_from(["blackjack-tui", "--balance", "lots"]).is_err());
    }
}
