//! Eco Rewards Engine CLI
//!
//! Command-line interface for replaying disposal scan events against a
//! demo-seeded rewards service.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- events.csv > wallets.csv
//! cargo run -- --strategy sync events.csv > wallets.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 events.csv > wallets.csv
//! ```
//!
//! The program reads scan events from the input CSV file, settles each
//! disposal through the rewards engine using the selected strategy, and
//! writes the final wallet summaries to stdout. Diagnostics go to stderr
//! via `tracing` and can be tuned with `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use eco_rewards_engine::cli;
use eco_rewards_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics to stderr so stdout stays a clean CSV stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Process scan events using the selected strategy; output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
