// 📊 Financial Records - Four monthly source tables
//
// The protocol consumes one table per authoritative source:
// general ledger, bank transactions, GST filings, payroll.
// Amounts are ₹ lakh, rounded to 2 decimals at generation time.
// Records carry no cross-table relationships beyond the monthly index.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

// ============================================================================
// RECORD TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    pub month: String,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRecord {
    pub month: String,
    pub reported_revenue: f64,
    pub filed_on_time: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub month: String,
    pub total_salary: f64,
    pub statutory_compliant: bool,
}

// ============================================================================
// RECORD SET
// ============================================================================

/// One complete synthetic dataset: the four tables the protocol ingests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecordSet {
    pub ledger: Vec<LedgerRecord>,
    pub bank: Vec<BankRecord>,
    pub gst: Vec<GstRecord>,
    pub payroll: Vec<PayrollRecord>,
}

impl FinancialRecordSet {
    /// Total records across all four tables
    pub fn record_count(&self) -> usize {
        self.ledger.len() + self.bank.len() + self.gst.len() + self.payroll.len()
    }

    /// Content hash of the full dataset (SHA-256, hex)
    ///
    /// Amounts are folded in at 2-decimal precision, matching the
    /// precision they are generated and displayed at. Two runs with the
    /// same seed produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for r in &self.ledger {
            hasher.update(format!("GL|{}|{:.2}|{:.2}|{:.2}\n", r.month, r.revenue, r.expenses, r.net));
        }
        for r in &self.bank {
            hasher.update(format!("BANK|{}|{:.2}|{:.2}|{:.2}\n", r.month, r.inflow, r.outflow, r.net));
        }
        for r in &self.gst {
            hasher.update(format!("GST|{}|{:.2}|{}\n", r.month, r.reported_revenue, r.filed_on_time));
        }
        for r in &self.payroll {
            hasher.update(format!("PAY|{}|{:.2}|{}\n", r.month, r.total_salary, r.statutory_compliant));
        }

        format!("{:x}", hasher.finalize())
    }

    /// Write the four tables as CSV files into a directory
    ///
    /// Produces ledger.csv, bank.csv, gst.csv, payroll.csv. The directory
    /// is created if missing.
    pub fn export_csv<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

        write_table(&dir.join("ledger.csv"), &self.ledger)?;
        write_table(&dir.join("bank.csv"), &self.bank)?;
        write_table(&dir.join("gst.csv"), &self.gst)?;
        write_table(&dir.join("payroll.csv"), &self.payroll)?;

        Ok(())
    }

    /// Serialize one table to CSV text (header + rows)
    pub fn table_csv<T: Serialize>(records: &[T]) -> Result<String> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            for record in records {
                wtr.serialize(record).context("Failed to serialize record")?;
            }
            wtr.flush().context("Failed to flush CSV writer")?;
        }
        String::from_utf8(buf).context("CSV output was not valid UTF-8")
    }
}

fn write_table<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;

    for record in records {
        wtr.serialize(record)
            .with_context(|| format!("Failed to write record to {:?}", path))?;
    }

    wtr.flush().with_context(|| format!("Failed to flush {:?}", path))?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> FinancialRecordSet {
        FinancialRecordSet {
            ledger: vec![LedgerRecord {
                month: "2025-01".to_string(),
                revenue: 62.5,
                expenses: 45.0,
                net: 17.5,
            }],
            bank: vec![BankRecord {
                month: "2025-01".to_string(),
                inflow: 60.0,
                outflow: 48.0,
                net: 12.0,
            }],
            gst: vec![GstRecord {
                month: "2025-01".to_string(),
                reported_revenue: 61.0,
                filed_on_time: true,
            }],
            payroll: vec![PayrollRecord {
                month: "2025-01".to_string(),
                total_salary: 16.8,
                statutory_compliant: true,
            }],
        }
    }

    #[test]
    fn test_record_count() {
        assert_eq!(sample_set().record_count(), 4);
    }

    #[test]
    fn test_fingerprint_stable_for_equal_data() {
        let a = sample_set();
        let b = sample_set();

        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_data() {
        let a = sample_set();
        let mut b = sample_set();
        b.ledger[0].revenue += 0.01;

        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_table_csv_has_header_and_rows() {
        let set = sample_set();
        let csv = FinancialRecordSet::table_csv(&set.gst).unwrap();

        assert!(csv.starts_with("month,reported_revenue,filed_on_time"));
        assert!(csv.contains("2025-01,61.0,true"));
    }
}
