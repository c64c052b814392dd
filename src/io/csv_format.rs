//! CSV format handling for scan events and wallet output
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScanCsvRecord structure for deserialization
//! - Conversion from CSV records to domain scan events
//! - Wallet summary output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::WalletSummary;
use crate::types::{RecordId, ScanRecord};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the scan event input format with columns: bin, product, user.
/// The bin column carries the external identifier scanned from the QR
/// payload; product and user carry record identities.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScanCsvRecord {
    pub bin: String,
    pub product: String,
    pub user: String,
}

/// Convert a ScanCsvRecord to a ScanRecord
///
/// This function:
/// - Rejects rows with an empty bin, product, or user column
/// - Parses the product and user columns as record identities
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(ScanRecord) - Successfully converted scan event
/// - Err(String) - Error message describing the conversion failure
pub fn convert_scan_record(csv_record: ScanCsvRecord) -> Result<ScanRecord, String> {
    if csv_record.bin.is_empty() {
        return Err("Bin ID is required".to_string());
    }
    if csv_record.product.is_empty() {
        return Err("Product ID is required".to_string());
    }
    if csv_record.user.is_empty() {
        return Err("User ID is required".to_string());
    }

    let product_id = RecordId::from_str(&csv_record.product)
        .map_err(|_| format!("Invalid product ID '{}'", csv_record.product))?;
    let user_id = RecordId::from_str(&csv_record.user)
        .map_err(|_| format!("Invalid user ID '{}'", csv_record.user))?;

    Ok(ScanRecord {
        bin_id: csv_record.bin,
        product_id,
        user_id,
    })
}

/// Write wallet summaries to CSV format
///
/// Writes summaries with columns: user, email, balance, rewards.
/// Rows are sorted by email for deterministic output; balances are
/// printed with 2 decimal places.
///
/// # Arguments
///
/// * `summaries` - Slice of wallet summaries to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_wallets_csv(
    summaries: &[WalletSummary],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["user", "email", "balance", "rewards"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort by email for deterministic output
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| a.email.cmp(&b.email));

    for summary in sorted {
        writer
            .write_record(&[
                summary.user_id.to_string(),
                summary.email,
                format!("{:.2}", summary.balance),
                summary.rewards.to_string(),
            ])
            .map_err(|e| format!("Failed to write wallet record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    const PRODUCT: &str = "67500000-0000-0000-0000-000000000001";
    const USER: &str = "67400000-0000-0000-0000-000000000001";

    #[test]
    fn test_convert_valid_scan_record() {
        let record = ScanCsvRecord {
            bin: "BIN-DEL-001".to_string(),
            product: PRODUCT.to_string(),
            user: USER.to_string(),
        };

        let scan = convert_scan_record(record).unwrap();

        assert_eq!(scan.bin_id, "BIN-DEL-001");
        assert_eq!(scan.product_id, Uuid::from_str(PRODUCT).unwrap());
        assert_eq!(scan.user_id, Uuid::from_str(USER).unwrap());
    }

    #[rstest]
    #[case::missing_bin("", PRODUCT, USER, "Bin ID is required")]
    #[case::missing_product("BIN-DEL-001", "", USER, "Product ID is required")]
    #[case::missing_user("BIN-DEL-001", PRODUCT, "", "User ID is required")]
    #[case::bad_product("BIN-DEL-001", "not-a-uuid", USER, "Invalid product ID")]
    #[case::bad_user("BIN-DEL-001", PRODUCT, "not-a-uuid", "Invalid user ID")]
    fn test_convert_scan_record_errors(
        #[case] bin: &str,
        #[case] product: &str,
        #[case] user: &str,
        #[case] expected_error: &str,
    ) {
        let record = ScanCsvRecord {
            bin: bin.to_string(),
            product: product.to_string(),
            user: user.to_string(),
        };

        let result = convert_scan_record(record);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    fn summary(email: &str, balance: i64, rewards: usize, id: u128) -> WalletSummary {
        WalletSummary {
            user_id: Uuid::from_u128(id),
            email: email.to_string(),
            balance: Decimal::new(balance, 0),
            rewards,
        }
    }

    #[test]
    fn test_write_wallets_csv_sorted_by_email() {
        let summaries = vec![
            summary("zoe@example.com", 40, 2, 2),
            summary("ada@example.com", 0, 0, 1),
        ];

        let mut output = Vec::new();
        write_wallets_csv(&summaries, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let expected = format!(
            "user,email,balance,rewards\n{},ada@example.com,0.00,0\n{},zoe@example.com,40.00,2\n",
            Uuid::from_u128(1),
            Uuid::from_u128(2)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_write_wallets_csv_empty() {
        let mut output = Vec::new();
        write_wallets_csv(&[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "user,email,balance,rewards\n"
        );
    }

    #[test]
    fn test_write_wallets_csv_two_decimal_balances() {
        let mut fractional = summary("ada@example.com", 0, 1, 1);
        fractional.balance = Decimal::new(4250, 2); // 42.50

        let mut output = Vec::new();
        write_wallets_csv(&[fractional], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("42.50"));
    }
}
