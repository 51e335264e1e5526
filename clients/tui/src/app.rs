use blackjack::{Card, Engine, GameRound, Outcome, Resolution, SessionStats, TableRules};
use crossterm::event::KeyCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::Config;

const MAX_LOG_LINES: usize = 20;
const MAX_BET_DIGITS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Betting,
    PlayerTurn,
    /// The round is already resolved; dealer cards are shown one at a time.
    DealerReveal,
    RoundOver,
}

pub struct App {
    engine: Engine,
    round: Option<GameRound>,
    pub screen: Screen,
    pub balance: u128,
    pub bet_input: String,
    pub stats: SessionStats,
    pub status: String,
    pub result_message: Option<String>,
    pub outcome: Option<Outcome>,
    pub logs: Vec<String>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    pub log_visible: bool,
    reveal_delay: Duration,
    revealed_dealer_cards: usize,
    last_reveal: Option<Instant>,
}

impl App {
    pub fn new(config: &Config, log_buffer: Arc<Mutex<Vec<String>>>) -> App {
        let engine = config.engine();
        let rules = *engine.rules();
        App {
            engine,
            round: None,
            screen: Screen::Betting,
            balance: config.balance,
            bet_input: rules.min_bet.to_string(),
            stats: SessionStats::new(),
            status: betting_prompt(&rules),
            result_message: None,
            outcome: None,
            logs: vec![
                "Welcome to the blackjack table!".to_string(),
                "Type a bet and press [Enter] to deal.".to_string(),
            ],
            log_buffer,
            log_visible: true,
            reveal_delay: config.reveal_delay(),
            revealed_dealer_cards: 0,
            last_reveal: None,
        }
    }

    pub fn rules(&self) -> &TableRules {
        self.engine.rules()
    }

    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
        }
    }

    /// Returns true when the app should quit.
    pub fn on_key(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Char('l') | KeyCode::Char('L') => self.log_visible = !self.log_visible,
            KeyCode::Char(c) if c.is_ascii_digit() => self.push_bet_digit(c),
            KeyCode::Backspace => {
                if self.screen == Screen::Betting {
                    self.bet_input.pop();
                }
            }
            KeyCode::Enter => {
                if self.screen == Screen::Betting {
                    self.place_bet();
                }
            }
            KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('H') => self.player_hit(),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => self.player_stand(now),
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_round(),
            _ => {}
        }
        false
    }

    fn push_bet_digit(&mut self, c: char) {
        if self.screen != Screen::Betting || self.bet_input.len() >= MAX_BET_DIGITS {
            return;
        }
        if self.bet_input == "0" {
            self.bet_input.clear();
        }
        self.bet_input.push(c);
    }

    pub fn place_bet(&mut self) {
        if self.screen != Screen::Betting {
            return;
        }

        let wager = match self.bet_input.parse::<u128>() {
            Ok(wager) => wager,
            Err(_) => {
                self.status = "Please enter a valid bet amount".to_string();
                return;
            }
        };

        if let Err(e) = self.rules().validate_wager(wager, self.balance) {
            log::warn!("Bet rejected: {e}");
            self.status = format!("Bet rejected: {e}");
            return;
        }

        let round = match self.engine.start_round(wager) {
            Ok(round) => round,
            Err(e) => {
                log::error!("Failed to deal: {e}");
                self.status = format!("Failed to deal: {e}");
                return;
            }
        };

        self.balance -= wager;
        self.add_log(format!(
            "Bet {wager}. You have {} ({}), dealer shows {}",
            format_cards(round.player_hand().cards()),
            round.player_score(),
            round.dealer_upcard().map(|c| c.to_string()).unwrap_or_default()
        ));
        self.round = Some(round);
        self.screen = Screen::PlayerTurn;
        self.result_message = None;
        self.outcome = None;
        self.status = "Your turn: [↑/H] Hit or [↓/S] Stand".to_string();
    }

    pub fn player_hit(&mut self) {
        if self.screen != Screen::PlayerTurn {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.hit() {
            Ok(card) => {
                let score = round.player_score();
                let busted = round.is_resolved();
                self.add_log(format!("You draw {card}, total {score}"));
                if busted {
                    self.add_log(format!("Bust with {score}!"));
                    self.finish_round();
                }
            }
            Err(e) => {
                log::error!("Hit failed: {e}");
                self.status = format!("Hit failed: {e}");
            }
        }
    }

    pub fn player_stand(&mut self, now: Instant) {
        if self.screen != Screen::PlayerTurn {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.stand() {
            Ok(drawn) => {
                let hole = round.dealer_hand().cards().get(1).copied();
                let score = round.player_score();
                let dealer_len = round.dealer_hand().len();
                self.add_log(format!("You stand on {score}"));
                if let Some(hole) = hole {
                    self.add_log(format!("Dealer reveals {hole}"));
                }
                log::debug!("Dealer will draw {} card(s)", drawn.len());
                self.revealed_dealer_cards = 2;
                self.last_reveal = Some(now);
                self.screen = Screen::DealerReveal;
                self.status = "Dealer playing...".to_string();
                if self.reveal_delay.is_zero() {
                    for _ in 0..=dealer_len {
                        self.tick(now);
                    }
                }
            }
            Err(e) => {
                log::error!("Stand failed: {e}");
                self.status = format!("Stand failed: {e}");
            }
        }
    }

    /// Advance the dealer reveal. The engine has already played the dealer
    /// out; this only paces what is shown.
    pub fn tick(&mut self, now: Instant) {
        if self.screen != Screen::DealerReveal {
            return;
        }
        let due = match self.last_reveal {
            Some(last) => now.duration_since(last) >= self.reveal_delay,
            None => true,
        };
        if !due {
            return;
        }

        let dealer_cards = self
            .round
            .as_ref()
            .map(|r| r.dealer_hand().cards().to_vec())
            .unwrap_or_default();

        if self.revealed_dealer_cards < dealer_cards.len() {
            let card = dealer_cards[self.revealed_dealer_cards];
            self.revealed_dealer_cards += 1;
            let shown = blackjack::score(&dealer_cards[..self.revealed_dealer_cards]);
            self.add_log(format!("Dealer draws {card}, total {shown}"));
            self.last_reveal = Some(now);
        } else {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        let (outcome, player_score, dealer_score, dealer_len) = match self.round.as_ref() {
            Some(round) => match round.resolve() {
                Ok(outcome) => (
                    outcome,
                    round.player_score(),
                    round.dealer_score(),
                    round.dealer_hand().len(),
                ),
                Err(e) => {
                    log::error!("Failed to settle round: {e}");
                    self.status = format!("Failed to settle round: {e}");
                    return;
                }
            },
            None => return,
        };

        self.balance = self.balance.saturating_add(outcome.total_return());
        self.stats.record(&outcome);
        let message = result_message(&outcome);
        self.add_log(format!("Final scores: you {player_score} - dealer {dealer_score}"));
        log::info!("{message}");

        self.revealed_dealer_cards = dealer_len;
        self.result_message = Some(message);
        self.outcome = Some(outcome);
        self.screen = Screen::RoundOver;
        self.status = if self.balance < self.rules().min_bet {
            "Out of funds. Press [Q] to leave the table".to_string()
        } else {
            "Press [N] for the next round".to_string()
        };
    }

    pub fn next_round(&mut self) {
        if self.screen != Screen::RoundOver {
            return;
        }
        self.round = None;
        self.result_message = None;
        self.revealed_dealer_cards = 0;
        self.last_reveal = None;
        self.screen = Screen::Betting;
        self.status = betting_prompt(self.rules());
    }

    /// Dealer cards as the table shows them right now.
    pub fn dealer_display(&self) -> Vec<Option<Card>> {
        let Some(round) = self.round.as_ref() else {
            return Vec::new();
        };
        match self.screen {
            Screen::DealerReveal => round
                .dealer_hand()
                .cards()
                .iter()
                .take(self.revealed_dealer_cards)
                .map(|c| Some(*c))
                .collect(),
            _ => round.dealer_visible_cards(),
        }
    }

    pub fn dealer_score_shown(&self) -> Option<u8> {
        let cards: Vec<Card> = self.dealer_display().into_iter().flatten().collect();
        if cards.is_empty() {
            None
        } else {
            Some(blackjack::score(&cards))
        }
    }
}

fn betting_prompt(rules: &TableRules) -> String {
    format!(
        "Place your bet ({}-{}, multiples of {}) and press [Enter]",
        rules.min_bet, rules.max_bet, rules.bet_unit
    )
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn result_message(outcome: &Outcome) -> String {
    let wager = outcome.wager;
    match outcome.reason {
        Resolution::PlayerBust => format!("BUST! You went over 21. Lost {wager}."),
        Resolution::DealerBust => format!("YOU WIN! Dealer busted! Won {wager}."),
        Resolution::HigherScore => format!("YOU WIN! You beat the dealer! Won {wager}."),
        Resolution::Tie => format!("PUSH. It's a tie! Your {wager} was returned."),
        Resolution::LowerScore => format!("DEALER WINS. Lost {wager}."),
    }
}
