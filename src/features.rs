//! Raw customer input and feature vector assembly.
//!
//! Each form field carries a declarative descriptor saying how its raw value
//! becomes a model feature. The builder produces two records per request: a
//! display record preserving what the user submitted, and the numeric vector
//! the model consumes. Vector slots are filled by name lookup against the
//! external feature-column ordering, never by collection order, so a column
//! with no collected field fails loudly instead of silently defaulting.

use std::collections::BTreeMap;

use ndarray::Array1;

use crate::artifacts::FeatureColumns;
use crate::encoding::{self, Domain};
use crate::error::PipelineError;

/// A raw field value as entered by a user.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Label(String),
    Number(f64),
}

/// One scoring request's worth of raw field values. Transient; discarded
/// once the display record and feature vector are derived.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    values: BTreeMap<String, RawValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_label(&mut self, field: &str, label: impl Into<String>) {
        self.values
            .insert(field.to_string(), RawValue::Label(label.into()));
    }

    pub fn set_number(&mut self, field: &str, value: f64) {
        self.values
            .insert(field.to_string(), RawValue::Number(value));
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.values.get(field)
    }
}

/// Human-readable field/value pairs in form order, for summary display.
pub type DisplayRecord = Vec<(&'static str, String)>;

/// How a field's raw value becomes a model feature.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Encoded through the registry table for the given domain.
    Categorical(Domain),
    /// Collected as a Yes/No label but encoded by direct comparison
    /// (training-time convention; must not go through the binary table).
    SeniorFlag,
    /// Whole months, passed through unchanged.
    Months,
    /// Floating-point currency amount, passed through unchanged.
    Currency,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Every collectable field, in form order. The classification is fixed here,
/// never inferred from the value.
pub const FIELDS: [FieldSpec; 18] = [
    FieldSpec { name: "gender", kind: FieldKind::Categorical(Domain::Gender) },
    FieldSpec { name: "SeniorCitizen", kind: FieldKind::SeniorFlag },
    FieldSpec { name: "Partner", kind: FieldKind::Categorical(Domain::Binary) },
    FieldSpec { name: "Dependents", kind: FieldKind::Categorical(Domain::Binary) },
    FieldSpec { name: "tenure", kind: FieldKind::Months },
    FieldSpec { name: "Contract", kind: FieldKind::Categorical(Domain::Contract) },
    FieldSpec { name: "PaperlessBilling", kind: FieldKind::Categorical(Domain::Binary) },
    FieldSpec { name: "PhoneService", kind: FieldKind::Categorical(Domain::Binary) },
    FieldSpec { name: "MultipleLines", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "InternetService", kind: FieldKind::Categorical(Domain::InternetService) },
    FieldSpec { name: "OnlineSecurity", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "OnlineBackup", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "TechSupport", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "StreamingTV", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "StreamingMovies", kind: FieldKind::Categorical(Domain::Service) },
    FieldSpec { name: "PaymentMethod", kind: FieldKind::Categorical(Domain::PaymentMethod) },
    FieldSpec { name: "MonthlyCharges", kind: FieldKind::Currency },
    FieldSpec { name: "TotalCharges", kind: FieldKind::Currency },
];

/// Assemble the display record and model feature vector for one request.
///
/// Pure function of the raw input plus the static field table and the
/// externally supplied column ordering. The returned vector always has
/// exactly `columns.len()` entries.
pub fn build(
    raw: &RawInput,
    columns: &FeatureColumns,
) -> Result<(DisplayRecord, Array1<f64>), PipelineError> {
    let mut display = Vec::with_capacity(FIELDS.len());
    let mut encoded: BTreeMap<&'static str, f64> = BTreeMap::new();

    for spec in &FIELDS {
        let Some(value) = raw.get(spec.name) else {
            continue;
        };
        display.push((spec.name, display_value(value)));
        encoded.insert(spec.name, encode_field(spec, value)?);
    }

    let mut slots = Vec::with_capacity(columns.len());
    for column in columns.names() {
        let value = encoded
            .get(column.as_str())
            .ok_or_else(|| PipelineError::MissingFeature {
                column: column.clone(),
            })?;
        slots.push(*value);
    }

    Ok((display, Array1::from_vec(slots)))
}

fn encode_field(spec: &FieldSpec, value: &RawValue) -> Result<f64, PipelineError> {
    match (spec.kind, value) {
        (FieldKind::Categorical(domain), RawValue::Label(label)) => {
            Ok(encoding::encode(domain, label)? as f64)
        }
        (FieldKind::SeniorFlag, RawValue::Label(label)) => {
            Ok(if label == "Yes" { 1.0 } else { 0.0 })
        }
        (FieldKind::Months | FieldKind::Currency, RawValue::Number(n)) => Ok(*n),
        (FieldKind::Categorical(_) | FieldKind::SeniorFlag, RawValue::Number(_)) => {
            Err(PipelineError::FieldKind {
                field: spec.name.to_string(),
                expected: "label",
            })
        }
        (FieldKind::Months | FieldKind::Currency, RawValue::Label(_)) => {
            Err(PipelineError::FieldKind {
                field: spec.name.to_string(),
                expected: "numeric",
            })
        }
    }
}

fn display_value(value: &RawValue) -> String {
    match value {
        RawValue::Label(label) => label.clone(),
        RawValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        RawValue::Number(n) => format!("{n}"),
    }
}
