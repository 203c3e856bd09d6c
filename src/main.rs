//! Roulette terminal game
//!
//! Plays rounds on stdin/stdout until the player quits or runs out of funds.

use clap::Parser;
use roulette::{
    config::{ConfigLoader, GameConfig},
    display::format_money,
    errors::RouletteResult,
    games::{RandomSpins, SpinSource},
    session::Session,
};
use std::io;
use std::path::PathBuf;

/// European roulette in the terminal
#[derive(Parser, Debug)]
#[command(name = "roulette")]
#[command(about = "Single-zero roulette with integer-penny settlement", long_about = None)]
struct Cli {
    /// RNG seed for a reproducible session (0 = time based)
    #[arg(long)]
    seed: Option<u64>,

    /// Faster spin animation
    #[arg(long)]
    fast: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Starting balance in pennies
    #[arg(long)]
    balance: Option<u64>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> RouletteResult<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = resolve_config(&cli)?;
    log::debug!("Effective configuration: {:?}", config);

    let spins: Box<dyn SpinSource> = match config.rng.seed {
        Some(seed) => {
            log::info!("Seeding wheel with {}", seed);
            Box::new(RandomSpins::seeded(seed))
        }
        None => Box::new(RandomSpins::from_entropy()),
    };

    let stdin = io::stdin();
    let mut session = Session::new(&config, stdin.lock(), io::stdout(), spins);
    let final_balance = session.run()?;
    log::info!("Leaving the table with {}", format_money(final_balance));

    Ok(())
}

/// Defaults, then file and environment, then command line flags
fn resolve_config(cli: &Cli) -> RouletteResult<GameConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if cli.fast {
        config.display.spin_delay_ms = GameConfig::fast().display.spin_delay_ms;
    }
    if cli.no_color {
        config.display.color = false;
    }
    if let Some(balance) = cli.balance {
        config.table.starting_balance = balance;
    }
    match cli.seed {
        Some(0) => config.rng.seed = None,
        Some(seed) => config.rng.seed = Some(seed),
        None => {}
    }

    config.validate()?;
    Ok(config)
}
