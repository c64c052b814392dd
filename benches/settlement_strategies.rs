//! Benchmark suite for comparing processing strategies
//!
//! Compares the synchronous and asynchronous scan replay pipelines using
//! the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Fixture files are generated once per size into temporary files; each
//! event is an eligible demo scan so the settlement path (resolution,
//! eligibility, atomic append + credit) dominates the measurement.

use eco_rewards_engine::cli::StrategyType;
use eco_rewards_engine::seed;
use eco_rewards_engine::strategy::{create_strategy, BatchConfig};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::NamedTempFile;

fn main() {
    divan::main();
}

static SMALL_FIXTURE: OnceLock<NamedTempFile> = OnceLock::new();
static MEDIUM_FIXTURE: OnceLock<NamedTempFile> = OnceLock::new();

/// Generate a scan event CSV with `events` eligible rows
fn generate_fixture(events: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture file");
    let mut content = String::from("bin,product,user\n");
    for i in 0..events {
        // Rotate through the demo bins and matching materials
        let (bin, product) = match i % 3 {
            0 => ("BIN-DEL-001", seed::DEMO_PRODUCT_ID),
            1 => ("BIN-MUM-002", seed::DEMO_GLASS_PRODUCT_ID),
            _ => ("BIN-PUN-004", seed::DEMO_PAPER_PRODUCT_ID),
        };
        content.push_str(&format!("{bin},{product},{}\n", seed::DEMO_USER_ID));
    }
    file.write_all(content.as_bytes())
        .expect("Failed to write fixture");
    file.flush().expect("Failed to flush fixture");
    file
}

fn small() -> &'static Path {
    SMALL_FIXTURE.get_or_init(|| generate_fixture(100)).path()
}

fn medium() -> &'static Path {
    MEDIUM_FIXTURE.get_or_init(|| generate_fixture(1000)).path()
}

/// Benchmark synchronous replay with a small dataset (100 events)
#[divan::bench]
fn sync_strategy_small() {
    let strategy = create_strategy(StrategyType::Sync, None);
    let mut output = Vec::new();
    strategy.process(small(), &mut output).expect("Processing failed");
}

/// Benchmark asynchronous replay with a small dataset (100 events)
#[divan::bench]
fn async_strategy_small() {
    let strategy = create_strategy(StrategyType::Async, Some(BatchConfig::default()));
    let mut output = Vec::new();
    strategy.process(small(), &mut output).expect("Processing failed");
}

/// Benchmark synchronous replay with a medium dataset (1,000 events)
#[divan::bench]
fn sync_strategy_medium() {
    let strategy = create_strategy(StrategyType::Sync, None);
    let mut output = Vec::new();
    strategy.process(medium(), &mut output).expect("Processing failed");
}

/// Benchmark asynchronous replay with a medium dataset (1,000 events)
#[divan::bench]
fn async_strategy_medium() {
    let strategy = create_strategy(StrategyType::Async, Some(BatchConfig::default()));
    let mut output = Vec::new();
    strategy.process(medium(), &mut output).expect("Processing failed");
}
