// RTFTI - Real-Time Financial Trust Infrastructure - Core Library
// Exposes all modules for use in the terminal binary, API server, and tests

pub mod entity;
pub mod records;
pub mod generator;
pub mod validation;
pub mod trust;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use entity::{Entity, Sector};
pub use records::{BankRecord, FinancialRecordSet, GstRecord, LedgerRecord, PayrollRecord};
pub use generator::{generate, CASE_STUDY_SEED, DEFAULT_MONTHS};
pub use validation::{
    count_statuses, run_all, validate_audit_readiness, validate_cash_flow, validate_payroll,
    validate_revenue_integrity, validate_tax_compliance, Status, StatusCounts, ValidationOutcome,
};
pub use trust::{compute_trust, LendingDecision, Rating, RiskTier, TrustProfile, MODEL_CONFIDENCE};
pub use pipeline::{execute, ingest, normalize, IngestionSummary, NormalizationSummary, ProtocolRun};
pub use report::{render_markdown, to_json, write_report};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
