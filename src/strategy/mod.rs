//! Processing strategy module for scan event replay
//!
//! This module defines the Strategy pattern for complete scan processing
//! pipelines, encompassing CSV parsing, disposal settlement, and wallet
//! output. This allows different processing implementations (synchronous,
//! asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig, ProcessingResult, ScanProcessor};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete scan processing pipelines
///
/// Each strategy reads scan events from a CSV file, settles them against
/// a demo-seeded rewards service, and writes the final wallet summaries
/// to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process scan events from input file and write wallet summaries
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing scan events
    /// * `output` - Mutable reference to a writer for the wallet report
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (possibly with recoverable,
    ///   logged per-event failures)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O
    ///   error, runtime construction failure)
    ///
    /// Individual settlement failures are logged and never abort the run;
    /// processing continues with the next event.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory selecting the implementation at runtime from the CLI choice.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `config` - Optional configuration for async batch processing
///   (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
