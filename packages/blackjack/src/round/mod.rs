use crate::outcome::settle;
use crate::{Card, Deck, GameError, Hand, Outcome, Result, TableRules, DECK_SIZE};
use serde::{Deserialize, Serialize};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    PlayerTurn,
    DealerTurn,
    Resolved,
}

/// Draw into the dealer hand until it reaches `stands_on`. Returns the cards
/// drawn, in order. The decision to draw depends only on the hand total.
pub fn play_dealer(dealer: &mut Hand, deck: &mut Deck, stands_on: u8) -> Result<Vec<Card>> {
    let mut drawn = Vec::new();
    while dealer.value() < stands_on {
        let card = deck.deal()?;
        dealer.add_card(card);
        drawn.push(card);
    }
    Ok(drawn)
}

/// One wager from deal to settlement. The round owns its deck, so the deck
/// and both hands always partition the 52 cards it was opened with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawRound")]
pub struct GameRound {
    wager: u128,
    player: Hand,
    dealer: Hand,
    deck: Deck,
    phase: RoundPhase,
    player_score: u8,
    dealer_score: u8,
    dealer_stands_on: u8,
}

impl GameRound {
    /// Open a round from an already prepared deck: two cards to the player,
    /// then two to the dealer.
    pub fn deal(wager: u128, mut deck: Deck, rules: &TableRules) -> Result<Self> {
        if wager == 0 {
            return Err(GameError::InvalidWager(wager));
        }
        rules.validate()?;

        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.add_card(deck.deal()?);
        player.add_card(deck.deal()?);
        dealer.add_card(deck.deal()?);
        dealer.add_card(deck.deal()?);

        let round = Self {
            wager,
            player_score: player.value(),
            dealer_score: dealer.value(),
            player,
            dealer,
            deck,
            phase: RoundPhase::PlayerTurn,
            dealer_stands_on: rules.dealer_stands_on,
        };
        log::debug!(
            "Round opened: wager {}, player {} vs dealer up-card {}",
            round.wager,
            round.player_score,
            round.dealer.cards()[0]
        );
        Ok(round)
    }

    fn ensure_player_turn(&self, action: &'static str) -> Result<()> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(GameError::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Draw one card for the player. A total over 21 ends the round without
    /// a dealer turn.
    pub fn hit(&mut self) -> Result<Card> {
        self.ensure_player_turn("hit")?;

        let card = self.deck.deal()?;
        self.player.add_card(card);
        self.player_score = self.player.value();
        log::debug!("Player draws {card}, total {}", self.player_score);

        if self.player.is_busted() {
            log::debug!("Player busts with {}", self.player_score);
            self.phase = RoundPhase::Resolved;
        }
        Ok(card)
    }

    /// End the player's turn and play out the dealer. Returns the cards the
    /// dealer drew beyond the initial two.
    pub fn stand(&mut self) -> Result<Vec<Card>> {
        self.ensure_player_turn("stand")?;
        self.phase = RoundPhase::DealerTurn;

        // Play against copies so an exhausted deck leaves the round untouched.
        let mut dealer = self.dealer.clone();
        let mut deck = self.deck.clone();
        let drawn = match play_dealer(&mut dealer, &mut deck, self.dealer_stands_on) {
            Ok(drawn) => drawn,
            Err(e) => {
                self.phase = RoundPhase::PlayerTurn;
                return Err(e);
            }
        };

        self.dealer = dealer;
        self.deck = deck;
        self.dealer_score = self.dealer.value();
        self.phase = RoundPhase::Resolved;
        log::debug!(
            "Dealer drew {} card(s), stands at {}",
            drawn.len(),
            self.dealer_score
        );
        Ok(drawn)
    }

    pub fn resolve(&self) -> Result<Outcome> {
        if self.phase != RoundPhase::Resolved {
            return Err(GameError::InvalidPhase {
                action: "resolve",
                phase: self.phase,
            });
        }
        let outcome = settle(self.player_score, self.dealer_score, self.wager);
        log::debug!(
            "Round resolved: {:?} ({:?}), player {} vs dealer {}",
            outcome.result,
            outcome.reason,
            self.player_score,
            self.dealer_score
        );
        Ok(outcome)
    }

    pub fn wager(&self) -> u128 {
        self.wager
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == RoundPhase::Resolved
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> u8 {
        self.player_score
    }

    pub fn dealer_score(&self) -> u8 {
        self.dealer_score
    }

    pub fn remaining(&self) -> &Deck {
        &self.deck
    }

    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.cards().first().copied()
    }

    /// Dealer cards as the player may see them: the hole card (second card)
    /// stays hidden until the round is resolved.
    pub fn dealer_visible_cards(&self) -> Vec<Option<Card>> {
        self.dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                if idx == 1 && !self.is_resolved() {
                    None
                } else {
                    Some(*card)
                }
            })
            .collect()
    }

    pub fn visible_dealer_score(&self) -> u8 {
        let visible: Vec<Card> = self.dealer_visible_cards().into_iter().flatten().collect();
        crate::score(&visible)
    }
}

/// Serialized form of a round. Scores are not read back; they are
/// recomputed from the hands.
#[derive(Deserialize)]
struct RawRound {
    wager: u128,
    player: Hand,
    dealer: Hand,
    deck: Deck,
    phase: RoundPhase,
    dealer_stands_on: u8,
}

impl TryFrom<RawRound> for GameRound {
    type Error = GameError;

    fn try_from(raw: RawRound) -> Result<Self> {
        if raw.wager == 0 {
            return Err(GameError::InvalidWager(raw.wager));
        }
        TableRules {
            dealer_stands_on: raw.dealer_stands_on,
            ..TableRules::default()
        }
        .validate()?;

        let mut seen = [false; DECK_SIZE];
        let all = raw
            .deck
            .cards()
            .iter()
            .chain(raw.player.cards())
            .chain(raw.dealer.cards());
        for card in all {
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(GameError::InvalidRound("card appears twice"));
            }
        }
        if seen.iter().any(|present| !present) {
            return Err(GameError::InvalidRound("cards are missing"));
        }

        if raw.player.len() < 2 || raw.dealer.len() < 2 {
            return Err(GameError::InvalidRound("hands hold fewer than two cards"));
        }

        // Every draw after the opening two must have been taken below the limit.
        let player = raw.player.cards();
        if player.len() > 2 && crate::is_busted(&player[..player.len() - 1]) {
            return Err(GameError::InvalidRound("player drew after busting"));
        }
        let dealer = raw.dealer.cards();
        if dealer.len() > 2 && crate::score(&dealer[..dealer.len() - 1]) >= raw.dealer_stands_on {
            return Err(GameError::InvalidRound("dealer drew past the stand total"));
        }

        let consistent = match raw.phase {
            RoundPhase::PlayerTurn => !raw.player.is_busted() && dealer.len() == 2,
            RoundPhase::DealerTurn => false,
            RoundPhase::Resolved if raw.player.is_busted() => dealer.len() == 2,
            RoundPhase::Resolved => raw.dealer.value() >= raw.dealer_stands_on,
        };
        if !consistent {
            return Err(GameError::InvalidRound("phase does not match the hands"));
        }

        Ok(Self {
            wager: raw.wager,
            player_score: raw.player.value(),
            dealer_score: raw.dealer.value(),
            player: raw.player,
            dealer: raw.dealer,
            deck: raw.deck,
            phase: raw.phase,
            dealer_stands_on: raw.dealer_stands_on,
        })
    }
}
