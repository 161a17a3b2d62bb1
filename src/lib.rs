//! churnforge: telecom customer churn prediction over pre-trained artifacts
//!
//! The scoring core maps human-readable customer attributes through fixed
//! categorical encodings into the exact feature vector a pre-trained model
//! expects, then scales, predicts, and classifies the churn probability into
//! a risk tier. A companion dashboard renders descriptive statistics over
//! the telecom customer dataset.

pub mod artifacts;
pub mod cli;
pub mod data;
pub mod encoding;
pub mod error;
pub mod features;
pub mod scoring;
pub mod viz;

// Re-export public items for easier access
pub use artifacts::{Artifacts, ChurnModel, FeatureColumns, StandardScaler};
pub use cli::{Cli, Command};
pub use data::ChurnDataset;
pub use error::PipelineError;
pub use features::{build, DisplayRecord, RawInput, RawValue};
pub use scoring::{score, RiskTier, ScoreOutcome};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
