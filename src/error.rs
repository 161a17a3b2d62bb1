//! Typed failures for the scoring pipeline.
//!
//! Every variant is fatal to the current request: there is no retry path and
//! no default substitution. The binary layer wraps these in `anyhow` for
//! display; tests match on the variants directly.

use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::Domain;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A label outside a domain's fixed set reached the registry. Input is
    /// supposed to be pre-constrained to the registry's label sets, so this
    /// is a caller bug rather than a user error.
    #[error("unknown label {label:?} for domain {domain}")]
    UnknownLabel { domain: Domain, label: String },

    /// The feature-column ordering references a field the builder did not
    /// produce. Configuration drift between training artifacts and pipeline
    /// code; silently defaulting the slot would corrupt every prediction.
    #[error("feature column {column:?} has no collected field")]
    MissingFeature { column: String },

    /// A vector's dimensionality disagrees with what the scaler or model
    /// expects.
    #[error("feature vector has {actual} values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A raw value's type does not match the field's declared kind.
    #[error("field {field:?} expects a {expected} value")]
    FieldKind {
        field: String,
        expected: &'static str,
    },

    /// A scaler with a zero scale entry cannot transform anything.
    #[error("scaler scale entry {index} is zero")]
    ZeroScale { index: usize },

    /// An artifact file could not be read, parsed, or reconciled with its
    /// siblings.
    #[error("artifact {}: {reason}", .path.display())]
    Artifact { path: PathBuf, reason: String },
}
