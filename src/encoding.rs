//! Categorical label encodings fixed at training time.
//!
//! The integer codes are a contract between this pipeline and the trained
//! model: renumbering any of them invalidates the model. Tables are immutable
//! process-wide configuration; the presentation layer constrains its inputs
//! to [`labels`] so [`encode`] never sees free text.

use std::fmt;

use crate::error::PipelineError;

/// The categorical domains the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Plain No/Yes fields (Partner, Dependents, PaperlessBilling, PhoneService).
    Binary,
    Gender,
    /// Three-state service add-ons (OnlineSecurity, StreamingTV, ...).
    /// MultipleLines reuses this table; code 2 doubles as "No phone service".
    Service,
    InternetService,
    Contract,
    PaymentMethod,
}

impl Domain {
    pub const fn name(self) -> &'static str {
        match self {
            Domain::Binary => "binary",
            Domain::Gender => "gender",
            Domain::Service => "service",
            Domain::InternetService => "internet service",
            Domain::Contract => "contract",
            Domain::PaymentMethod => "payment method",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const BINARY: &[(&str, i64)] = &[("No", 0), ("Yes", 1)];

const GENDER: &[(&str, i64)] = &[("Female", 0), ("Male", 1)];

const SERVICE: &[(&str, i64)] = &[("No", 0), ("Yes", 1), ("No internet service", 2)];

const INTERNET_SERVICE: &[(&str, i64)] = &[("DSL", 0), ("Fiber optic", 1), ("No", 2)];

const CONTRACT: &[(&str, i64)] = &[("Month-to-month", 0), ("One year", 1), ("Two year", 2)];

const PAYMENT_METHOD: &[(&str, i64)] = &[
    ("Electronic check", 0),
    ("Mailed check", 1),
    ("Bank transfer (automatic)", 2),
    ("Credit card (automatic)", 3),
];

const fn table(domain: Domain) -> &'static [(&'static str, i64)] {
    match domain {
        Domain::Binary => BINARY,
        Domain::Gender => GENDER,
        Domain::Service => SERVICE,
        Domain::InternetService => INTERNET_SERVICE,
        Domain::Contract => CONTRACT,
        Domain::PaymentMethod => PAYMENT_METHOD,
    }
}

/// Return the trained integer code for a label.
pub fn encode(domain: Domain, label: &str) -> Result<i64, PipelineError> {
    table(domain)
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, code)| *code)
        .ok_or_else(|| PipelineError::UnknownLabel {
            domain,
            label: label.to_string(),
        })
}

/// The full label set for a domain, in code order. Used to constrain what
/// the presentation layer may collect.
pub fn labels(domain: Domain) -> Vec<&'static str> {
    table(domain).iter().map(|(label, _)| *label).collect()
}
