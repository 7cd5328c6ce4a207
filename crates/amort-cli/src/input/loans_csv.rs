//! The loan parameter source: a CSV table with one loan per row.
//!
//! Expected header: `name,nominal_rate,compounding_frequency,payment_frequency`.
//! Rates are decimals (0.0229 = 2.29%); frequencies are per-year integers.

use amort_core::LoanRecord;

use super::file::resolve_path;

/// Read every loan row from the table, failing on the first malformed row
/// with its line number.
pub fn read_loans(path: &str) -> Result<Vec<LoanRecord>, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<LoanRecord>().enumerate() {
        // Header is line 1, first record line 2
        let record = row.map_err(|e| format!("line {}: {}", idx + 2, e))?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(format!("no loans in '{}'", resolved.display()).into());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_table(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_a_loan_table() {
        let path = write_table(
            "amort_loans_ok.csv",
            "name,nominal_rate,compounding_frequency,payment_frequency\n\
             My Mortgage,0.0229,2,52\n\
             Car,0.05,12,12\n",
        );
        let records = read_loans(path.to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "My Mortgage");
        assert_eq!(records[0].nominal_rate, dec!(0.0229));
        assert_eq!(records[1].payment_frequency, 12);
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let path = write_table(
            "amort_loans_bad.csv",
            "name,nominal_rate,compounding_frequency,payment_frequency\n\
             Broken,not-a-rate,2,52\n",
        );
        let err = read_loans(path.to_str().unwrap()).unwrap_err().to_string();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn empty_tables_are_rejected() {
        let path = write_table(
            "amort_loans_empty.csv",
            "name,nominal_rate,compounding_frequency,payment_frequency\n",
        );
        assert!(read_loans(path.to_str().unwrap()).is_err());
    }
}
