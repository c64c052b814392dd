//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over scan events from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<ScanRecord, String>` for each CSV row, so malformed rows can
//! be logged and skipped while processing continues.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row parsing errors are yielded as Err variants with line
//!   numbers for debugging
//!
//! # Memory Efficiency
//!
//! Rows are read one at a time; memory usage is O(1) per row, not
//! O(file_size).

use crate::io::csv_format::{convert_scan_record, ScanCsvRecord};
use crate::types::ScanRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader over scan events
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to trim whitespace from all fields
    /// and allow flexible field counts.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<ScanRecord, String>;

    /// Get the next scan event from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(ScanRecord))` - Successfully parsed event
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<ScanCsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Line numbers are offset by one for the header row
                Some(
                    convert_scan_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use uuid::Uuid;

    const PRODUCT: &str = "67500000-0000-0000-0000-000000000001";
    const USER: &str = "67400000-0000-0000-0000-000000000001";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn event_row(bin: &str) -> String {
        format!("{bin},{PRODUCT},{USER}\n")
    }

    #[test]
    fn test_sync_reader_new_opens_file() {
        let file = create_temp_csv(&format!("bin,product,user\n{}", event_row("BIN-DEL-001")));
        assert!(SyncReader::new(file.path()).is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_event() {
        let file = create_temp_csv(&format!("bin,product,user\n{}", event_row("BIN-DEL-001")));

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.bin_id, "BIN-DEL-001");
        assert_eq!(record.product_id, PRODUCT.parse::<Uuid>().unwrap());
        assert_eq!(record.user_id, USER.parse::<Uuid>().unwrap());
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let content = format!("bin,product,user\n  BIN-DEL-001  ,  {PRODUCT}  ,  {USER}  \n");
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().bin_id, "BIN-DEL-001");
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let content = format!(
            "bin,product,user\n{}BIN-X,not-a-uuid,{USER}\n{}",
            event_row("BIN-DEL-001"),
            event_row("BIN-MUM-002"),
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());

        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3")); // Line 3 because of header
        assert!(error.contains("Invalid product ID"));
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let content = format!(
            "bin,product,user\n,{PRODUCT},{USER}\n{}",
            event_row("BIN-DEL-001")
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let valid: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].bin_id, "BIN-DEL-001");
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("bin,product,user\n");

        let reader = SyncReader::new(file.path()).unwrap();
        assert_eq!(reader.count(), 0);
    }
}
