use blackjack::{
    Card, Engine, GameError, GameRound, RoundPhase, RoundResult, SessionStats, TableRules,
    DECK_SIZE,
};
use std::collections::HashSet;

fn assert_partition(round: &GameRound) {
    let mut seen: HashSet<Card> = HashSet::new();
    let all = round
        .remaining()
        .cards()
        .iter()
        .chain(round.player_hand().cards())
        .chain(round.dealer_hand().cards());
    for card in all {
        assert!(seen.insert(*card), "duplicate card {card}");
    }
    assert_eq!(seen.len(), DECK_SIZE);
}

/// Play a round hitting below `hit_below`, checking invariants on every step.
fn play(engine: &mut Engine, wager: u128, hit_below: u8) -> GameRound {
    let mut round = engine.start_round(wager).unwrap();
    assert_partition(&round);

    while round.phase() == RoundPhase::PlayerTurn && round.player_score() < hit_below {
        round.hit().unwrap();
        assert_partition(&round);
    }
    if round.phase() == RoundPhase::PlayerTurn {
        round.stand().unwrap();
        assert_partition(&round);
    }
    round
}

#[test]
fn test_seeded_rounds_keep_invariants() {
    let mut engine = Engine::from_seed(2024, TableRules::default());

    for i in 0..500 {
        let hit_below = 12 + (i % 8) as u8;
        let round = play(&mut engine, 10, hit_below);
        assert_eq!(round.phase(), RoundPhase::Resolved);

        let outcome = round.resolve().unwrap();
        if round.player_score() > 21 {
            assert_eq!(round.dealer_hand().len(), 2);
            assert_eq!(outcome.result, RoundResult::Loss);
        } else {
            assert!(round.dealer_score() >= 17);
        }
    }
}

#[test]
fn test_stats_match_balance_changes() {
    let mut engine = Engine::from_seed(11, TableRules::default());
    let mut stats = SessionStats::new();
    let mut balance: u128 = 10_000;

    for _ in 0..200 {
        let wager = 50;
        engine.rules().validate_wager(wager, balance).unwrap();
        balance -= wager;

        let round = play(&mut engine, wager, 17);
        let outcome = round.resolve().unwrap();
        balance += outcome.total_return();
        stats.record(&outcome);
    }

    assert_eq!(stats.rounds_played(), 200);
    assert_eq!(stats.total_wagered, 200 * 50);
    assert_eq!(balance as i128, 10_000 + stats.net);
}

#[test]
fn test_round_resumes_from_json() {
    let mut engine = Engine::from_seed(5, TableRules::default());
    let round = engine.start_round(20).unwrap();

    let json = serde_json::to_string(&round).unwrap();
    let mut restored: GameRound = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.player_hand(), round.player_hand());
    assert_eq!(restored.remaining(), round.remaining());

    restored.stand().unwrap();
    assert!(restored.is_resolved());
    assert_partition(&restored);
}

#[test]
fn test_corrupted_round_is_not_resumed() {
    let mut engine = Engine::from_seed(5, TableRules::default());
    let round = engine.start_round(20).unwrap();

    let mut value = serde_json::to_value(&round).unwrap();
    let first = value["player"]["cards"][0].clone();
    value["deck"]["cards"].as_array_mut().unwrap().push(first);
    assert!(serde_json::from_value::<GameRound>(value).is_err());

    let mut value = serde_json::to_value(&round).unwrap();
    value["wager"] = serde_json::json!(0);
    assert!(serde_json::from_value::<GameRound>(value).is_err());

    let mut value = serde_json::to_value(&round).unwrap();
    value["player_score"] = serde_json::json!(3);
    let restored: GameRound = serde_json::from_value(value).unwrap();
    assert_eq!(restored.player_score(), round.player_score());
}

#[test]
fn test_resolved_round_rejects_further_play() {
    let mut engine = Engine::from_seed(8, TableRules::default());
    let mut round = play(&mut engine, 10, 17);

    assert!(matches!(round.hit(), Err(GameError::InvalidPhase { .. })));
    assert!(matches!(round.stand(), Err(GameError::InvalidPhase { .. })));
    assert!(round.resolve().is_ok());
}
