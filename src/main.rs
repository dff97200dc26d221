use dotenvy::dotenv;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Instant};

use mafia_engine::{
    console::{self, Command, ConsoleError},
    models::{config::Config, game::GameStatus},
    state::AppState,
    utils::logging::init_logger,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "mafia-engine", about = "Play a game of mafia from the terminal.")]
struct Opt {
    /// seed for role assignment, random when omitted
    #[structopt(long)]
    seed: Option<u64>,
    /// print every player's role in `players`
    #[structopt(long)]
    show_roles: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    if let Err(e) = dotenv() {
        eprintln!("Warning: could not load .env file: {}", e);
    }

    let mut config = Config::from_env();
    config.show_player_roles |= opt.show_roles;
    init_logger(config.verbose_logging);

    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let state = AppState::new(config);
    if state.config.auto_advance_phases {
        tokio::spawn(run_phase_timer(state.clone()));
    }

    println!("{}", console::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match console::parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let config = state.config.clone();
        let result = state
            .with_game(|game| console::execute(game, &config, &mut rng, command))
            .await;
        match result {
            Ok(output) => {
                for line in output {
                    println!("{}", line);
                }
            }
            Err(ConsoleError::Game(e)) if e.is_fatal() => {
                log::error!("engine invariant violated: {}", e);
                return Err(e.into());
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

/// Times out a phase that outlives its configured duration, with a warning
/// shortly before.
async fn run_phase_timer(state: AppState) {
    let mut ticker = interval(Duration::from_secs(1));
    let mut seen = state.phase().await;
    let mut entered = Instant::now();
    let mut warned = false;

    loop {
        ticker.tick().await;
        let current = state.phase().await;
        if current != seen {
            seen = current;
            entered = Instant::now();
            warned = false;
            continue;
        }
        if seen.status == GameStatus::NotRunning {
            continue;
        }

        let elapsed = entered.elapsed();
        let limit = state.config.phase_duration(seen.status);
        if elapsed < limit {
            if let Some(lead) = state.config.warning_lead(seen.status) {
                if !warned && elapsed + lead >= limit {
                    println!("Only {} seconds left!", lead.as_secs());
                    warned = true;
                }
            }
            continue;
        }

        let outcome = state
            .timeout_if_unchanged(seen, console::render_timeout)
            .await
            .map_err(ConsoleError::from)
            .and_then(|rendered| rendered.transpose());
        match outcome {
            Ok(Some(lines)) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("phase timeout failed: {}", e);
                return;
            }
        }
    }
}
