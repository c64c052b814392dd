//! Asynchronous batch processing strategy
//!
//! Multi-threaded scan replay with user-based partitioning. Events are
//! read in batches; within a batch, events for different users settle
//! concurrently while each user's events stay in file order.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── ScanProcessor (user partitioning + task spawning)
//!         └── Arc<RewardsService> (thread-safe settlement)
//! ```
//!
//! Batches are processed sequentially so a user's events never interleave
//! across batch boundaries. Correctness does not depend on partitioning
//! (the ledger's per-user critical section already prevents balance
//! races); partitioning keeps per-user settlement ordering deterministic.

use crate::core::{RewardsService, SettlementReceipt};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_wallets_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::{RecordId, RewardsError, ScanRecord};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of scan events per batch
    pub batch_size: usize,
    /// Maximum number of worker threads settling concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to defaults on zero values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Result of settling a single scan event
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The scan event that was processed
    pub record: ScanRecord,
    /// The settlement outcome
    pub result: Result<SettlementReceipt, RewardsError>,
}

/// Batch processor with user-based partitioning
///
/// Cloneable; clones share the same underlying service.
#[derive(Debug, Clone)]
pub struct ScanProcessor {
    service: Arc<RewardsService>,
}

impl ScanProcessor {
    /// Create a processor over a shared service
    pub fn new(service: Arc<RewardsService>) -> Self {
        Self { service }
    }

    /// Partition a batch of scan events by user
    ///
    /// Each event appears in exactly one sub-batch, and events for each
    /// user keep their original order.
    pub fn partition_by_user(&self, batch: Vec<ScanRecord>) -> HashMap<RecordId, Vec<ScanRecord>> {
        let mut user_batches: HashMap<RecordId, Vec<ScanRecord>> = HashMap::new();

        for record in batch {
            user_batches.entry(record.user_id).or_default().push(record);
        }

        user_batches
    }

    /// Settle all events for a single user sequentially
    ///
    /// Failures are captured in the results and do not stop processing.
    pub async fn process_user_scans(&self, scans: Vec<ScanRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(scans.len());

        for record in scans {
            let result = self.service.settle_disposal(
                &record.bin_id,
                &record.product_id,
                &record.user_id,
            );
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Settle a batch of scan events with user-based partitioning
    ///
    /// Spawns one task per user, settling different users concurrently
    /// while keeping each user's events in order. All events are
    /// processed even when some fail; results may come back in any order
    /// across users.
    pub async fn process_batch(&self, batch: Vec<ScanRecord>) -> Vec<ProcessingResult> {
        let user_batches = self.partition_by_user(batch);

        let mut tasks = Vec::new();
        for (_user_id, scans) in user_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_user_scans(scans).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(user_results) => results.extend(user_results),
                Err(e) => {
                    warn!("Settlement task panicked: {:?}", e);
                }
            }
        }

        results
    }
}

/// Asynchronous batch processing strategy
///
/// Reads scan events in batches and settles them on a tokio
/// multi-threaded runtime. The shared service state is safe for
/// concurrent settlement; two events for the same user cannot race the
/// wallet balance.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process scan events from input file and write wallet summaries
    ///
    /// 1. Builds a tokio multi-threaded runtime
    /// 2. Seeds a fresh demo service shared across tasks
    /// 3. Reads events in batches with AsyncReader
    /// 4. Settles each batch with user-based partitioning, waiting for a
    ///    batch to finish before reading the next
    /// 5. Writes the final wallet summaries to output
    ///
    /// Fatal errors (file not found, runtime errors) are returned;
    /// individual settlement failures are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let service = Arc::new(RewardsService::with_demo_data());
            let processor = ScanProcessor::new(Arc::clone(&service));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            // Process batches sequentially so per-user ordering holds
            // across the entire file
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for outcome in processor.process_batch(batch).await {
                    if let Err(e) = outcome.result {
                        warn!(bin = %outcome.record.bin_id, "Settlement error: {}", e);
                    }
                }
            }

            write_wallets_csv(&service.wallet_summaries(), output)?;

            Ok(())
        })
    }
}
