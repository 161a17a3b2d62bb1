//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};

use crate::encoding::{self, Domain};
use crate::features::RawInput;

/// Telecom customer churn prediction and EDA dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one customer against the pre-trained churn artifacts
    Predict(PredictArgs),
    /// Render descriptive statistics and charts over the telecom dataset
    Dashboard(DashboardArgs),
}

/// Customer attributes for one scoring request. Categorical flags only
/// accept the labels the encoding registry exposes, so free text never
/// reaches the pipeline.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory holding model.json, scaler.json, and feature_columns.json
    #[arg(long, default_value = "artifacts")]
    pub artifacts: PathBuf,

    #[arg(long, default_value = "Female",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Gender)))]
    pub gender: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(["No", "Yes"]))]
    pub senior_citizen: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Binary)))]
    pub partner: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Binary)))]
    pub dependents: String,

    /// Tenure in months
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(0..=72))]
    pub tenure: u32,

    #[arg(long, default_value = "Month-to-month",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Contract)))]
    pub contract: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Binary)))]
    pub paperless_billing: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Binary)))]
    pub phone_service: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub multiple_lines: String,

    #[arg(long, default_value = "DSL",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::InternetService)))]
    pub internet_service: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub online_security: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub online_backup: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub tech_support: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub streaming_tv: String,

    #[arg(long, default_value = "No",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::Service)))]
    pub streaming_movies: String,

    #[arg(long, default_value = "Electronic check",
          value_parser = PossibleValuesParser::new(encoding::labels(Domain::PaymentMethod)))]
    pub payment_method: String,

    #[arg(long, default_value_t = 50.0)]
    pub monthly_charges: f64,

    #[arg(long, default_value_t = 100.0)]
    pub total_charges: f64,
}

impl PredictArgs {
    /// Convert the parsed flags into one raw input record.
    pub fn to_raw_input(&self) -> RawInput {
        let mut raw = RawInput::new();
        raw.set_label("gender", self.gender.clone());
        raw.set_label("SeniorCitizen", self.senior_citizen.clone());
        raw.set_label("Partner", self.partner.clone());
        raw.set_label("Dependents", self.dependents.clone());
        raw.set_number("tenure", self.tenure as f64);
        raw.set_label("Contract", self.contract.clone());
        raw.set_label("PaperlessBilling", self.paperless_billing.clone());
        raw.set_label("PhoneService", self.phone_service.clone());
        raw.set_label("MultipleLines", self.multiple_lines.clone());
        raw.set_label("InternetService", self.internet_service.clone());
        raw.set_label("OnlineSecurity", self.online_security.clone());
        raw.set_label("OnlineBackup", self.online_backup.clone());
        raw.set_label("TechSupport", self.tech_support.clone());
        raw.set_label("StreamingTV", self.streaming_tv.clone());
        raw.set_label("StreamingMovies", self.streaming_movies.clone());
        raw.set_label("PaymentMethod", self.payment_method.clone());
        raw.set_number("MonthlyCharges", self.monthly_charges);
        raw.set_number("TotalCharges", self.total_charges);
        raw
    }
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Path to the telecom customer CSV file
    #[arg(short, long, default_value = "telecom_dashboard.csv")]
    pub input: String,

    /// Output path for the main chart; sibling charts derive their names
    /// from it
    #[arg(short, long, default_value = "dashboard.png")]
    pub output: String,
}
