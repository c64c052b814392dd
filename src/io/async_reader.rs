//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over scan events from a CSV file.
//! Supports batch reading for efficient async processing.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Batch reading so the processor can partition work per user
//!
//! Malformed rows are logged at warn level and skipped; reading continues
//! with the next row.

use crate::io::csv_format::{convert_scan_record, ScanCsvRecord};
use crate::types::ScanRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader over scan events
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of scan events
    ///
    /// Reads up to `batch_size` rows, converting them to ScanRecords.
    /// Invalid rows are logged and skipped.
    ///
    /// # Returns
    ///
    /// A vector of successfully converted scan events; empty when the end
    /// of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<ScanRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<ScanCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_scan_record(csv_record) {
                    Ok(scan) => batch.push(scan),
                    Err(e) => warn!("Record conversion error: {}", e),
                },
                Some(Err(e)) => warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
