//! Scoring: scale, predict, and classify risk.

use std::fmt;

use ndarray::Array1;

use crate::artifacts::Artifacts;
use crate::error::PipelineError;

/// Discrete risk classification derived from the churn probability.
///
/// The thresholds are presentation policy, independent of the model, and the
/// boundary semantics are deliberate: HIGH is inclusive at 0.7, MEDIUM
/// inclusive at 0.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.7 {
            RiskTier::High
        } else if probability >= 0.4 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scoring request's outcome. Derived, never stored.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    /// Binary class decision: true means likely to churn.
    pub churn: bool,
    /// Probability of the positive ("churn") class, in [0, 1].
    pub probability: f64,
    pub risk: RiskTier,
}

/// Score one feature vector against the loaded artifacts.
///
/// Scale, predict, classify. Read-only with respect to the artifacts; any
/// failure aborts the request with a typed error rather than a default
/// prediction.
pub fn score(artifacts: &Artifacts, vector: &Array1<f64>) -> Result<ScoreOutcome, PipelineError> {
    let scaled = artifacts.scaler.transform(vector)?;
    let probability = artifacts.model.predict_probability(&scaled)?;
    let churn = artifacts.model.predict(&scaled)?;

    Ok(ScoreOutcome {
        churn,
        probability,
        risk: RiskTier::from_probability(probability),
    })
}
