use blackjack::{Engine, RoundPhase, SessionStats, TableRules};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "simulate",
    about = "Play many local blackjack rounds with a fixed policy and report the results"
)]
struct Args {
    /// Number of rounds to play
    #[arg(long, default_value = "10000")]
    rounds: u32,

    /// Wager per round in base units
    #[arg(long, default_value = "10")]
    wager: u128,

    /// Player hits while below this total
    #[arg(long, default_value = "17")]
    hit_below: u8,

    /// Dealer draws while below this total (17 to 21)
    #[arg(long, default_value = "17")]
    dealer_stands_on: u8,

    /// RNG seed for a reproducible run
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let rules = TableRules {
        dealer_stands_on: args.dealer_stands_on,
        ..TableRules::default()
    };
    if let Err(e) = rules.validate() {
        eprintln!("Invalid table rules: {e}");
        std::process::exit(2);
    }
    let mut engine = match args.seed {
        Some(seed) => Engine::from_seed(seed, rules),
        None => Engine::new(rules),
    };

    log::info!(
        "Simulating {} rounds: wager {}, hit below {}, dealer stands on {}",
        args.rounds,
        args.wager,
        args.hit_below,
        args.dealer_stands_on
    );

    let mut stats = SessionStats::new();
    for n in 0..args.rounds {
        let outcome = match play_round(&mut engine, args.wager, args.hit_below) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Round {} failed: {e}", n + 1);
                std::process::exit(1);
            }
        };
        log::debug!("Round {}: {:?} ({:?})", n + 1, outcome.result, outcome.reason);
        stats.record(&outcome);
    }

    println!("Rounds:         {}", stats.rounds_played());
    println!("Wins:           {}", stats.wins);
    println!("Losses:         {}", stats.losses);
    println!("Pushes:         {}", stats.pushes);
    println!("Total wagered:  {}", stats.total_wagered);
    println!("Net:            {:+}", stats.net);
    println!("Win rate:       {:.2}%", stats.win_rate() * 100.0);
    if stats.total_wagered > 0 {
        let edge = -(stats.net as f64) / stats.total_wagered as f64;
        println!("House edge:     {:+.4}%", edge * 100.0);
    }
}

fn play_round(
    engine: &mut Engine,
    wager: u128,
    hit_below: u8,
) -> blackjack::Result<blackjack::Outcome> {
    let mut round = engine.start_round(wager)?;
    while round.phase() == RoundPhase::PlayerTurn && round.player_score() < hit_below {
        round.hit()?;
    }
    if round.phase() == RoundPhase::PlayerTurn {
        round.stand()?;
    }
    round.resolve()
}
