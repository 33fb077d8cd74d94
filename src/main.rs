use astra::{
    config::{Config, ConfigStore, FileConfigStore},
    round_log::RoundLog,
    score_store::ScoreStore,
    session::{GameSession, RoundConfig, RoundState},
    util::mean,
};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{error::Error, path::PathBuf};

/// headless harness for the astra scoring core
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Headless harness for the astra core: inspect the persistent ranked scoreboard and drive simulated rounds through the adaptive difficulty loop."
)]
struct Cli {
    /// number of ranked scores to print
    #[clap(short = 't', long, default_value_t = 10)]
    top: usize,

    /// drive this many simulated rounds through a session before printing
    #[clap(short = 's', long)]
    simulate: Option<u32>,

    /// rng seed for --simulate
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// directory for the scoreboard and round log (defaults to the state dir)
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// clear the persisted scoreboard and exit
    #[clap(long)]
    reset: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.data_dir {
        Some(dir) => ScoreStore::with_path(dir.join("highscores.txt")),
        None => ScoreStore::new(),
    };

    if cli.reset {
        store.clear()?;
        println!("scoreboard cleared");
        return Ok(());
    }

    if let Some(rounds) = cli.simulate {
        let config: Config = FileConfigStore::new().load();
        let mut session = GameSession::new(RoundConfig::from(&config), store.clone());

        let round_log = match &cli.data_dir {
            Some(dir) => Some(RoundLog::with_path(dir.join("rounds.csv"))),
            None => RoundLog::new(),
        };
        if let Some(round_log) = round_log {
            session = session.with_round_log(round_log);
        }

        simulate(&mut session, rounds, cli.seed);
        println!();
    }

    print_scoreboard(&store.top_n(cli.top));
    Ok(())
}

/// Plays scripted rounds against a coin-flip marksman whose hit chance
/// drops as the target speeds up, so the adaptive loop gets exercised.
fn simulate(session: &mut GameSession, rounds: u32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut final_scores = Vec::new();

    for round in 1..=rounds {
        let mut state = RoundState::new();

        while !state.is_over(&session.config) {
            let fall_speed = session.fall_speed(&state);
            let hit_chance = (0.95 - fall_speed * 0.05).clamp(0.05, 0.95);

            if rng.gen_bool(hit_chance) {
                state.hit();
            } else {
                state.miss(&session.config);
            }
        }

        session.finish_round(&state);
        final_scores.push(f64::from(state.score));
        println!(
            "round {round}: score {}, misses {}",
            state.score, state.misses
        );
    }

    if let Some(avg) = mean(&final_scores) {
        println!("simulated {rounds} rounds, average score {avg:.1}");
    }
}

fn print_scoreboard(scores: &[u32]) {
    if scores.is_empty() {
        println!("no scores recorded yet");
        return;
    }

    for (idx, score) in scores.iter().enumerate() {
        println!("{:>2}. Score: {}", idx + 1, score);
    }
}
