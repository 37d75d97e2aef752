// 🛰️ Trust Output - Composite FTS and stakeholder views
//
// The Financial Trust Score is the weighted sum of the five dimension
// scores, rounded to the nearest integer. Confidence is a fixed model
// constant. Stakeholder views (MSME rating, bank lending decision,
// regulator risk tier) are pure functions of the composite.

use crate::validation::ValidationOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed model confidence reported alongside the composite
pub const MODEL_CONFIDENCE: f64 = 0.92;

// ============================================================================
// TRUST PROFILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustProfile {
    /// Financial Trust Score, 0-100
    pub fts: u8,

    pub confidence: f64,

    // Per-dimension scores, truncated to integers for display
    pub revenue_integrity: u8,
    pub cash_flow: u8,
    pub tax_compliance: u8,
    pub payroll: u8,
    pub audit_readiness: u8,
}

/// Aggregate the five validation outcomes into a trust profile.
///
/// The composite is the dot product of (score, weight) pairs; since the
/// weights sum to 1 and scores are 0-100, the result is always 0-100.
pub fn compute_trust(outcomes: &[ValidationOutcome]) -> TrustProfile {
    let fts: f64 = outcomes.iter().map(|v| v.score * v.weight).sum();

    let score_for = |dimension: &str| -> u8 {
        outcomes
            .iter()
            .find(|v| v.dimension == dimension)
            .map(|v| v.score as u8)
            .unwrap_or(0)
    };

    TrustProfile {
        fts: fts.round() as u8,
        confidence: MODEL_CONFIDENCE,
        revenue_integrity: score_for("Revenue Integrity"),
        cash_flow: score_for("Cash Flow Behaviour"),
        tax_compliance: score_for("Tax Compliance"),
        payroll: score_for("Payroll Consistency"),
        audit_readiness: score_for("Audit Readiness"),
    }
}

// ============================================================================
// STAKEHOLDER VIEWS
// ============================================================================

/// MSME-facing rating band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bank-facing lending decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LendingDecision {
    Approved,
    Conditional,
    Review,
}

impl LendingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            LendingDecision::Approved => "APPROVED",
            LendingDecision::Conditional => "CONDITIONAL",
            LendingDecision::Review => "REVIEW",
        }
    }

    /// Indicative lending terms attached to the decision
    pub fn terms(&self) -> &'static str {
        match self {
            LendingDecision::Approved => "Fast-track lending, Prime + 1.5%",
            LendingDecision::Conditional => "Standard process, Prime + 3.5%",
            LendingDecision::Review => "Detailed audit required",
        }
    }
}

impl fmt::Display for LendingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Regulator-facing risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW RISK",
            RiskTier::Medium => "MEDIUM RISK",
            RiskTier::High => "HIGH RISK",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            RiskTier::Low => "No systemic concerns",
            RiskTier::Medium => "Monitor closely",
            RiskTier::High => "Early intervention recommended",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TrustProfile {
    pub fn rating(&self) -> Rating {
        if self.fts >= 80 {
            Rating::Excellent
        } else if self.fts >= 65 {
            Rating::Good
        } else {
            Rating::NeedsImprovement
        }
    }

    pub fn lending_decision(&self) -> LendingDecision {
        if self.fts >= 80 {
            LendingDecision::Approved
        } else if self.fts >= 65 {
            LendingDecision::Conditional
        } else {
            LendingDecision::Review
        }
    }

    pub fn risk_tier(&self) -> RiskTier {
        if self.fts >= 70 {
            RiskTier::Low
        } else if self.fts >= 50 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Status, WEIGHT_AUDIT, WEIGHT_CASH_FLOW, WEIGHT_PAYROLL, WEIGHT_REVENUE, WEIGHT_TAX};

    fn outcome(dimension: &str, weight: f64, score: f64, status: Status) -> ValidationOutcome {
        ValidationOutcome {
            dimension: dimension.to_string(),
            weight,
            score,
            status,
            detail: String::new(),
            formula: String::new(),
        }
    }

    fn all_with_scores(scores: [f64; 5]) -> Vec<ValidationOutcome> {
        vec![
            outcome("Revenue Integrity", WEIGHT_REVENUE, scores[0], Status::Pass),
            outcome("Cash Flow Behaviour", WEIGHT_CASH_FLOW, scores[1], Status::Pass),
            outcome("Tax Compliance", WEIGHT_TAX, scores[2], Status::Pass),
            outcome("Payroll Consistency", WEIGHT_PAYROLL, scores[3], Status::Pass),
            outcome("Audit Readiness", WEIGHT_AUDIT, scores[4], Status::Pass),
        ]
    }

    #[test]
    fn test_composite_is_weighted_sum() {
        // all-PASS tier scores: 95*.25 + 90*.25 + 95*.20 + 92*.15 + 88*.15 = 92.25
        let trust = compute_trust(&all_with_scores([95.0, 90.0, 95.0, 92.0, 88.0]));

        assert_eq!(trust.fts, 92);
        assert_eq!(trust.confidence, MODEL_CONFIDENCE);
        assert_eq!(trust.revenue_integrity, 95);
        assert_eq!(trust.cash_flow, 90);
        assert_eq!(trust.tax_compliance, 95);
        assert_eq!(trust.payroll, 92);
        assert_eq!(trust.audit_readiness, 88);
    }

    #[test]
    fn test_composite_all_alert() {
        // 50*.25 + 45*.25 + 40*.20 + 35*.15 + 40*.15 = 43.0
        let trust = compute_trust(&all_with_scores([50.0, 45.0, 40.0, 35.0, 40.0]));
        assert_eq!(trust.fts, 43);
    }

    #[test]
    fn test_composite_bounds() {
        assert_eq!(compute_trust(&all_with_scores([0.0; 5])).fts, 0);
        assert_eq!(compute_trust(&all_with_scores([100.0; 5])).fts, 100);
    }

    #[test]
    fn test_missing_dimension_scores_zero() {
        let outcomes = vec![outcome("Revenue Integrity", WEIGHT_REVENUE, 95.0, Status::Pass)];
        let trust = compute_trust(&outcomes);

        assert_eq!(trust.revenue_integrity, 95);
        assert_eq!(trust.cash_flow, 0);
    }

    #[test]
    fn test_rating_bands() {
        let mut trust = compute_trust(&all_with_scores([100.0; 5]));

        trust.fts = 80;
        assert_eq!(trust.rating(), Rating::Excellent);
        trust.fts = 79;
        assert_eq!(trust.rating(), Rating::Good);
        trust.fts = 65;
        assert_eq!(trust.rating(), Rating::Good);
        trust.fts = 64;
        assert_eq!(trust.rating(), Rating::NeedsImprovement);
    }

    #[test]
    fn test_lending_decision_bands() {
        let mut trust = compute_trust(&all_with_scores([100.0; 5]));

        trust.fts = 85;
        assert_eq!(trust.lending_decision(), LendingDecision::Approved);
        assert_eq!(trust.lending_decision().terms(), "Fast-track lending, Prime + 1.5%");

        trust.fts = 70;
        assert_eq!(trust.lending_decision(), LendingDecision::Conditional);

        trust.fts = 64;
        assert_eq!(trust.lending_decision(), LendingDecision::Review);
    }

    #[test]
    fn test_risk_tier_bands() {
        let mut trust = compute_trust(&all_with_scores([100.0; 5]));

        trust.fts = 70;
        assert_eq!(trust.risk_tier(), RiskTier::Low);
        trust.fts = 69;
        assert_eq!(trust.risk_tier(), RiskTier::Medium);
        trust.fts = 50;
        assert_eq!(trust.risk_tier(), RiskTier::Medium);
        trust.fts = 49;
        assert_eq!(trust.risk_tier(), RiskTier::High);
    }
}
