//! Startup-loaded scoring artifacts: model, scaler, and feature ordering.
//!
//! The three files are the boundary to the training side of the system. They
//! are deserialized once, validated against each other, and then shared
//! immutably for the lifetime of the process. Schema structs are kept
//! separate from the runtime types so deserialization cannot bypass
//! construction-time validation.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array1;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Pre-trained binary churn classifier.
///
/// The scoring engine only ever calls [`predict`](Self::predict) and
/// [`predict_probability`](Self::predict_probability); the logistic form is
/// an implementation detail of this module.
#[derive(Debug, Clone)]
pub struct ChurnModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl ChurnModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    /// Probability of the positive ("churn") class, in [0, 1].
    pub fn predict_probability(&self, vector: &Array1<f64>) -> Result<f64, PipelineError> {
        self.check_shape(vector)?;
        let margin: f64 = self
            .weights
            .iter()
            .zip(vector.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(margin))
    }

    /// Binary class decision: churn when the probability reaches 0.5.
    pub fn predict(&self, vector: &Array1<f64>) -> Result<bool, PipelineError> {
        Ok(self.predict_probability(vector)? >= 0.5)
    }

    fn check_shape(&self, vector: &Array1<f64>) -> Result<(), PipelineError> {
        if vector.len() != self.weights.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: self.weights.len(),
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

/// Numerically stable sigmoid. Clamps input to [-500, 500] so exp never
/// overflows.
fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}

/// Pre-fitted standardizing scaler.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, PipelineError> {
        if mean.len() != scale.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        if let Some(index) = scale.iter().position(|s| *s == 0.0) {
            return Err(PipelineError::ZeroScale { index });
        }
        Ok(Self { mean, scale })
    }

    pub fn num_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one feature vector: `(x - mean) / scale` per slot.
    pub fn transform(&self, vector: &Array1<f64>) -> Result<Array1<f64>, PipelineError> {
        if vector.len() != self.mean.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: self.mean.len(),
                actual: vector.len(),
            });
        }
        let scaled = vector
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect();
        Ok(Array1::from_vec(scaled))
    }
}

/// The authoritative feature-name ordering for model vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureColumns(Vec<String>);

impl FeatureColumns {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

// On-disk schemas, decoupled from the runtime types above.

#[derive(Debug, Serialize, Deserialize)]
struct ModelSchema {
    weights: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScalerSchema {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

/// The immutable configuration object holding everything scoring needs.
/// Constructed once at startup and passed by reference thereafter.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: ChurnModel,
    pub scaler: StandardScaler,
    pub columns: FeatureColumns,
}

impl Artifacts {
    /// Load and cross-validate the three artifact files from a directory.
    ///
    /// Dimensional drift between the files is a training/pipeline mismatch
    /// and fails here, at startup, rather than mid-request.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let dir = dir.as_ref();

        let model: ModelSchema = read_json(&dir.join(MODEL_FILE))?;
        let scaler: ScalerSchema = read_json(&dir.join(SCALER_FILE))?;
        let columns: FeatureColumns = read_json(&dir.join(FEATURE_COLUMNS_FILE))?;

        let model = ChurnModel::new(model.weights, model.intercept);
        let scaler = StandardScaler::new(scaler.mean, scaler.scale)?;

        if model.num_features() != columns.len() || scaler.num_features() != columns.len() {
            return Err(PipelineError::Artifact {
                path: dir.to_path_buf(),
                reason: format!(
                    "dimension drift: {} feature columns, model expects {}, scaler expects {}",
                    columns.len(),
                    model.num_features(),
                    scaler.num_features()
                ),
            });
        }

        Ok(Self {
            model,
            scaler,
            columns,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &PathBuf) -> Result<T, PipelineError> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::Artifact {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| PipelineError::Artifact {
        path: path.clone(),
        reason: e.to_string(),
    })
}
