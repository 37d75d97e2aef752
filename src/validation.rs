// ⚖️ Validation Rules - Five cross-check heuristics over the source tables
//
// Each rule is a pure function from one or two tables to a scored outcome.
// Thresholds and tier scores are fixed. Degenerate denominators default
// the metric to 0 (variance, gap) or 100 (volatility) instead of erroring.
//
// Dimension weights sum to 1.0:
//   Revenue Integrity 0.25, Cash Flow 0.25, Tax 0.20, Payroll 0.15, Audit 0.15

use crate::records::{BankRecord, FinancialRecordSet, GstRecord, LedgerRecord, PayrollRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WEIGHT_REVENUE: f64 = 0.25;
pub const WEIGHT_CASH_FLOW: f64 = 0.25;
pub const WEIGHT_TAX: f64 = 0.20;
pub const WEIGHT_PAYROLL: f64 = 0.15;
pub const WEIGHT_AUDIT: f64 = 0.15;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pass,
    Warn,
    Alert,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Alert => "ALERT",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VALIDATION OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Dimension name, e.g. "Revenue Integrity"
    pub dimension: String,

    /// Fraction of the composite score this dimension carries
    pub weight: f64,

    /// 0-100, fixed per tier
    pub score: f64,

    pub status: Status,

    /// Human-readable finding
    pub detail: String,

    /// The computed metric behind the finding
    pub formula: String,
}

impl ValidationOutcome {
    fn new(dimension: &str, weight: f64, score: f64, status: Status, detail: String, formula: String) -> Self {
        ValidationOutcome {
            dimension: dimension.to_string(),
            weight,
            score,
            status,
            detail,
            formula,
        }
    }
}

/// Tally of non-passing outcomes, for status panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub alerts: usize,
    pub warnings: usize,
}

pub fn count_statuses(outcomes: &[ValidationOutcome]) -> StatusCounts {
    StatusCounts {
        alerts: outcomes.iter().filter(|v| v.status == Status::Alert).count(),
        warnings: outcomes.iter().filter(|v| v.status == Status::Warn).count(),
    }
}

// ============================================================================
// RULE 1: REVENUE INTEGRITY
// ============================================================================

/// Compare total revenue as seen by GL, bank, and GST.
///
/// Metric: largest absolute deviation of the three totals from their mean,
/// as a percentage of the mean.
pub fn validate_revenue_integrity(
    ledger: &[LedgerRecord],
    bank: &[BankRecord],
    gst: &[GstRecord],
) -> ValidationOutcome {
    let gl_total: f64 = ledger.iter().map(|r| r.revenue).sum();
    let bank_total: f64 = bank.iter().map(|r| r.inflow).sum();
    let gst_total: f64 = gst.iter().map(|r| r.reported_revenue).sum();

    let avg = (gl_total + bank_total + gst_total) / 3.0;
    let max_var = (gl_total - avg)
        .abs()
        .max((bank_total - avg).abs())
        .max((gst_total - avg).abs());
    let variance_pct = if avg > 0.0 { max_var / avg * 100.0 } else { 0.0 };

    const DIM: &str = "Revenue Integrity";
    if variance_pct < 5.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_REVENUE,
            95.0,
            Status::Pass,
            "Strong alignment across sources".to_string(),
            format!("Variance: {:.1}%", variance_pct),
        )
    } else if variance_pct < 12.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_REVENUE,
            75.0,
            Status::Warn,
            format!("Moderate variance: {:.1}%", variance_pct),
            format!("GL={:.0}, Bank={:.0}, GST={:.0}", gl_total, bank_total, gst_total),
        )
    } else {
        ValidationOutcome::new(
            DIM,
            WEIGHT_REVENUE,
            50.0,
            Status::Alert,
            format!("High variance: {:.1}%", variance_pct),
            format!("GL={:.0}, Bank={:.0}, GST={:.0}", gl_total, bank_total, gst_total),
        )
    }
}

// ============================================================================
// RULE 2: CASH FLOW BEHAVIOUR
// ============================================================================

/// Volatility of monthly net bank flow.
///
/// Metric: coefficient of variation (population std dev / mean × 100).
/// A non-positive mean flow pins the metric at 100.
pub fn validate_cash_flow(bank: &[BankRecord]) -> ValidationOutcome {
    let nets: Vec<f64> = bank.iter().map(|r| r.net).collect();
    let mean = mean(&nets);
    let std = population_std(&nets, mean);
    let cv = if mean > 0.0 { std / mean * 100.0 } else { 100.0 };

    const DIM: &str = "Cash Flow Behaviour";
    if cv < 25.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_CASH_FLOW,
            90.0,
            Status::Pass,
            "Stable and predictable".to_string(),
            format!("CV: {:.1}%", cv),
        )
    } else if cv < 50.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_CASH_FLOW,
            70.0,
            Status::Warn,
            format!("Moderate volatility: {:.1}%", cv),
            format!("Mean={:.1}, Std={:.1}", mean, std),
        )
    } else {
        ValidationOutcome::new(
            DIM,
            WEIGHT_CASH_FLOW,
            45.0,
            Status::Alert,
            format!("High volatility: {:.1}%", cv),
            format!("Mean={:.1}, Std={:.1}", mean, std),
        )
    }
}

// ============================================================================
// RULE 3: TAX COMPLIANCE
// ============================================================================

/// Share of GST returns filed on time.
pub fn validate_tax_compliance(gst: &[GstRecord]) -> ValidationOutcome {
    let on_time = gst.iter().filter(|r| r.filed_on_time).count();
    let on_time_rate = if gst.is_empty() {
        0.0
    } else {
        on_time as f64 * 100.0 / gst.len() as f64
    };

    const DIM: &str = "Tax Compliance";
    if on_time_rate >= 90.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_TAX,
            95.0,
            Status::Pass,
            "Timely filings".to_string(),
            format!("On-time: {:.0}%", on_time_rate),
        )
    } else if on_time_rate >= 75.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_TAX,
            70.0,
            Status::Warn,
            format!("Some delays: {:.0}% late", 100.0 - on_time_rate),
            format!("On-time: {:.0}%", on_time_rate),
        )
    } else {
        ValidationOutcome::new(
            DIM,
            WEIGHT_TAX,
            40.0,
            Status::Alert,
            "Frequent delays".to_string(),
            format!("On-time: {:.0}%", on_time_rate),
        )
    }
}

// ============================================================================
// RULE 4: PAYROLL CONSISTENCY
// ============================================================================

/// Share of payroll months meeting statutory requirements.
pub fn validate_payroll(payroll: &[PayrollRecord]) -> ValidationOutcome {
    let compliant = payroll.iter().filter(|r| r.statutory_compliant).count();
    let compliance_rate = if payroll.is_empty() {
        0.0
    } else {
        compliant as f64 * 100.0 / payroll.len() as f64
    };

    const DIM: &str = "Payroll Consistency";
    if compliance_rate >= 90.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_PAYROLL,
            92.0,
            Status::Pass,
            "Regular and compliant".to_string(),
            format!("Compliance: {:.0}%", compliance_rate),
        )
    } else if compliance_rate >= 75.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_PAYROLL,
            68.0,
            Status::Warn,
            format!("Some issues: {:.0}% flagged", 100.0 - compliance_rate),
            format!("Compliance: {:.0}%", compliance_rate),
        )
    } else {
        ValidationOutcome::new(
            DIM,
            WEIGHT_PAYROLL,
            35.0,
            Status::Alert,
            "Compliance issues".to_string(),
            format!("Compliance: {:.0}%", compliance_rate),
        )
    }
}

// ============================================================================
// RULE 5: AUDIT READINESS
// ============================================================================

/// Consistency of GL net position against bank net position.
///
/// Metric: absolute gap as a percentage of the larger of the two totals.
/// A non-positive larger total pins the metric at 0.
pub fn validate_audit_readiness(ledger: &[LedgerRecord], bank: &[BankRecord]) -> ValidationOutcome {
    let gl_net: f64 = ledger.iter().map(|r| r.net).sum();
    let bank_net: f64 = bank.iter().map(|r| r.net).sum();

    let larger = gl_net.max(bank_net);
    let diff_pct = if larger > 0.0 {
        (gl_net - bank_net).abs() / larger * 100.0
    } else {
        0.0
    };

    const DIM: &str = "Audit Readiness";
    if diff_pct < 8.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_AUDIT,
            88.0,
            Status::Pass,
            "High consistency".to_string(),
            format!("GL-Bank diff: {:.1}%", diff_pct),
        )
    } else if diff_pct < 18.0 {
        ValidationOutcome::new(
            DIM,
            WEIGHT_AUDIT,
            65.0,
            Status::Warn,
            format!("Moderate gaps: {:.1}%", diff_pct),
            format!("GL={:.0}, Bank={:.0}", gl_net, bank_net),
        )
    } else {
        ValidationOutcome::new(
            DIM,
            WEIGHT_AUDIT,
            40.0,
            Status::Alert,
            "Significant gaps".to_string(),
            format!("GL={:.0}, Bank={:.0}", gl_net, bank_net),
        )
    }
}

// ============================================================================
// RULE RUNNER
// ============================================================================

/// Run all five rules in their fixed order
pub fn run_all(records: &FinancialRecordSet) -> Vec<ValidationOutcome> {
    vec![
        validate_revenue_integrity(&records.ledger, &records.bank, &records.gst),
        validate_cash_flow(&records.bank),
        validate_tax_compliance(&records.gst),
        validate_payroll(&records.payroll),
        validate_audit_readiness(&records.ledger, &records.bank),
    ]
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

// ============================================================================
// TESTS
// ============================================================================
