// 📄 Report Rendering - Markdown assessment report + JSON profile
//
// The markdown report replaces the original dashboard's cosmetic PDF
// export: entity header, layer summaries, the five-rule breakdown, and
// the three stakeholder views.

use crate::pipeline::ProtocolRun;
use crate::validation::{count_statuses, Status};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Render a full assessment report as markdown
pub fn render_markdown(run: &ProtocolRun) -> String {
    let mut out = String::new();
    let trust = &run.trust;
    let counts = count_statuses(&run.validations);

    let _ = writeln!(out, "# Financial Trust Assessment");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Entity:** {}", run.entity.name);
    let _ = writeln!(out, "- **Sector:** {}", run.entity.sector);
    let _ = writeln!(out, "- **Turnover:** ₹{} Cr | **Employees:** {}", run.entity.turnover_cr, run.entity.employees);
    let _ = writeln!(out, "- **Run:** {} ({})", run.run_id, run.ingestion.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "- **Dataset:** {} records, fingerprint `{}`",
        run.normalization.records_in,
        &run.ingestion.fingerprint[..16],
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Financial Trust Score");
    let _ = writeln!(out);
    let _ = writeln!(out, "**FTS: {}/100** (confidence {:.0}%) — {}", trust.fts, trust.confidence * 100.0, trust.rating());
    let _ = writeln!(out, "Alerts: {} | Warnings: {}", counts.alerts, counts.warnings);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Validation Breakdown");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Dimension | Weight | Score | Status | Detail |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for v in &run.validations {
        let _ = writeln!(
            out,
            "| {} | {:.0}% | {:.0}/100 | {} | {} ({}) |",
            v.dimension,
            v.weight * 100.0,
            v.score,
            v.status,
            v.detail,
            v.formula,
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Stakeholder Views");
    let _ = writeln!(out);
    let _ = writeln!(out, "### MSME");
    let _ = writeln!(out, "Rating: **{}**", trust.rating());
    let improvements: Vec<_> = run.validations.iter().filter(|v| v.status != Status::Pass).collect();
    if !improvements.is_empty() {
        let _ = writeln!(out, "Improvement areas:");
        for v in &improvements {
            let _ = writeln!(out, "- {}: {}", v.dimension, v.detail);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "### Bank");
    let decision = trust.lending_decision();
    let _ = writeln!(out, "Decision: **{}** — {}", decision, decision.terms());
    let _ = writeln!(out);

    let _ = writeln!(out, "### Regulator");
    let tier = trust.risk_tier();
    let _ = writeln!(out, "Tier: **{}** — {}", tier, tier.guidance());
    let alerts: Vec<_> = run.validations.iter().filter(|v| v.status == Status::Alert).collect();
    if !alerts.is_empty() {
        let _ = writeln!(out, "Early warnings:");
        for v in &alerts {
            let _ = writeln!(out, "- {}: {}", v.dimension, v.detail);
        }
    }

    out
}

/// Write the markdown report to a file
pub fn write_report<P: AsRef<Path>>(run: &ProtocolRun, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_markdown(run))
        .with_context(|| format!("Failed to write report: {:?}", path))
}

/// Serialize the full run as pretty JSON
pub fn to_json(run: &ProtocolRun) -> Result<String> {
    serde_json::to_string_pretty(run).context("Failed to serialize run")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::generator::{generate, CASE_STUDY_SEED, DEFAULT_MONTHS};
    use crate::pipeline::execute;

    fn sample_run() -> ProtocolRun {
        let entity = Entity::case_study();
        let records = generate(&entity, DEFAULT_MONTHS, CASE_STUDY_SEED);
        execute(&entity, &records)
    }

    #[test]
    fn test_report_names_every_dimension() {
        let report = render_markdown(&sample_run());

        for dim in [
            "Revenue Integrity",
            "Cash Flow Behaviour",
            "Tax Compliance",
            "Payroll Consistency",
            "Audit Readiness",
        ] {
            assert!(report.contains(dim), "missing dimension: {}", dim);
        }
        assert!(report.contains("Precision Tools Pvt. Ltd."));
        assert!(report.contains("FTS:"));
    }

    #[test]
    fn test_json_roundtrip() {
        let run = sample_run();
        let json = to_json(&run).unwrap();

        let parsed: ProtocolRun = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, run);
    }
}
