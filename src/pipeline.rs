// 🔁 Protocol Pipeline - Ingestion → Normalization → Validation → Trust
//
// A run is a single synchronous pass over one record set. Nothing is
// persisted; every execution recomputes from scratch and is identified
// by a fresh run id.

use crate::entity::Entity;
use crate::records::FinancialRecordSet;
use crate::trust::{compute_trust, TrustProfile};
use crate::validation::{run_all, ValidationOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// LAYER 2: INGESTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionSummary {
    pub gl_records: usize,
    pub bank_records: usize,
    pub gst_records: usize,
    pub payroll_records: usize,

    /// SHA-256 of the ingested dataset
    pub fingerprint: String,

    pub timestamp: DateTime<Utc>,
    pub status: String,
}

pub fn ingest(records: &FinancialRecordSet) -> IngestionSummary {
    IngestionSummary {
        gl_records: records.ledger.len(),
        bank_records: records.bank.len(),
        gst_records: records.gst.len(),
        payroll_records: records.payroll.len(),
        fingerprint: records.fingerprint(),
        timestamp: Utc::now(),
        status: "complete".to_string(),
    }
}

// ============================================================================
// LAYER 3: NORMALIZATION
// ============================================================================

// Generated data is already schema-aligned and single-currency; the layer
// exists to report that, matching the pipeline's five-layer shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationSummary {
    pub records_in: usize,
    pub records_out: usize,
    pub duplicates_removed: usize,
    pub schema_aligned: bool,
    pub currency_standardized: bool,
}

pub fn normalize(ingestion: &IngestionSummary) -> NormalizationSummary {
    let total = ingestion.gl_records + ingestion.bank_records + ingestion.gst_records + ingestion.payroll_records;

    NormalizationSummary {
        records_in: total,
        records_out: total,
        duplicates_removed: 0,
        schema_aligned: true,
        currency_standardized: true,
    }
}

// ============================================================================
// PROTOCOL RUN
// ============================================================================

/// The complete output of one protocol execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolRun {
    pub run_id: Uuid,
    pub entity: Entity,
    pub ingestion: IngestionSummary,
    pub normalization: NormalizationSummary,
    pub validations: Vec<ValidationOutcome>,
    pub trust: TrustProfile,
}

/// Execute layers 2-5 over a record set
pub fn execute(entity: &Entity, records: &FinancialRecordSet) -> ProtocolRun {
    let ingestion = ingest(records);
    let normalization = normalize(&ingestion);
    let validations = run_all(records);
    let trust = compute_trust(&validations);

    ProtocolRun {
        run_id: Uuid::new_v4(),
        entity: entity.clone(),
        ingestion,
        normalization,
        validations,
        trust,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, CASE_STUDY_SEED, DEFAULT_MONTHS};

    #[test]
    fn test_ingestion_counts_match_tables() {
        let entity = Entity::case_study();
        let records = generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED);

        let ingestion = ingest(&records);

        assert_eq!(ingestion.gl_records, 12);
        assert_eq!(ingestion.bank_records, 12);
        assert_eq!(ingestion.gst_records, 12);
        assert_eq!(ingestion.payroll_records, 12);
        assert_eq!(ingestion.fingerprint, records.fingerprint());
        assert_eq!(ingestion.status, "complete");
    }

    #[test]
    fn test_normalization_is_identity() {
        let entity = Entity::case_study();
        let records = generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED);

        let norm = normalize(&ingest(&records));

        assert_eq!(norm.records_in, 48);
        assert_eq!(norm.records_out, 48);
        assert_eq!(norm.duplicates_removed, 0);
        assert!(norm.schema_aligned);
        assert!(norm.currency_standardized);
    }

    #[test]
    fn test_execute_produces_five_validations() {
        let entity = Entity::case_study();
        let records = generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED);

        let run = execute(&entity, &records);

        assert_eq!(run.validations.len(), 5);
        assert!(run.trust.fts <= 100);
        assert_eq!(run.entity, entity);
    }

    #[test]
    fn test_fixed_seed_reproduces_score() {
        let entity = Entity::case_study();

        let a = execute(&entity, &generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED));
        let b = execute(&entity, &generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED));

        assert_eq!(a.trust, b.trust);
        assert_eq!(a.validations, b.validations);
        assert_eq!(a.ingestion.fingerprint, b.ingestion.fingerprint);
        // run ids are per-execution
        assert_ne!(a.run_id, b.run_id);
    }
}
