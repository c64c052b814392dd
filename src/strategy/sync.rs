//! Synchronous processing strategy
//!
//! Single-threaded scan replay: events stream through the iterator-based
//! reader and settle one at a time against the demo-seeded service.
//!
//! # Design
//!
//! The strategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Settlement to `RewardsService` (business logic)
//! - CSV output to `csv_format::write_wallets_csv` (format handling)

use crate::core::RewardsService;
use crate::io::csv_format::write_wallets_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// Settles scan events sequentially in file order. Send + Sync so it can
/// be driven from multi-threaded hosts even though processing itself is
/// single-threaded.
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process scan events from input file and write wallet summaries
    ///
    /// 1. Seeds a fresh demo service
    /// 2. Streams events through a SyncReader
    /// 3. Settles each event, logging recoverable failures
    /// 4. Writes the final wallet summaries to output
    ///
    /// Fatal errors (file not found, output I/O) are returned; individual
    /// parse or settlement failures are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let service = RewardsService::with_demo_data();

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(scan) => {
                    if let Err(e) =
                        service.settle_disposal(&scan.bin_id, &scan.product_id, &scan.user_id)
                    {
                        warn!(bin = %scan.bin_id, "Settlement error: {}", e);
                    }
                }
                Err(e) => {
                    warn!("CSV parsing error: {}", e);
                }
            }
        }

        write_wallets_csv(&service.wallet_summaries(), output)?;

        Ok(())
    }
}
