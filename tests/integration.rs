//! Integration tests for churnforge

use std::fs;
use std::io::Write;
use std::path::Path;

use approx::assert_abs_diff_eq;
use churnforge::{build, score, viz, Artifacts, ChurnDataset, PipelineError, RawInput, RiskTier};
use tempfile::{tempdir, NamedTempFile, TempDir};

/// Feature-column ordering matching the training-time artifact.
const COLUMNS: [&str; 18] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "Contract",
    "PaperlessBilling",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
];

/// Encoded values for the sample customer below, in column order.
const SAMPLE_ENCODED: [f64; 18] = [
    1.0, 0.0, 1.0, 0.0, 12.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 70.5,
    846.0,
];

/// Write a consistent artifact set to a temp directory.
///
/// The scaler mean equals the sample customer's encoded vector, so the
/// scaled vector is all zeros and the probability is sigmoid(intercept)
/// regardless of the weights.
fn create_test_artifacts(intercept: f64, extra_column: Option<&str>) -> TempDir {
    let dir = tempdir().unwrap();

    let mut columns: Vec<String> = COLUMNS.iter().map(|s| s.to_string()).collect();
    let mut mean: Vec<f64> = SAMPLE_ENCODED.to_vec();
    if let Some(extra) = extra_column {
        columns.push(extra.to_string());
        mean.push(0.0);
    }
    let n = columns.len();

    let model = serde_json::json!({ "weights": vec![0.3; n], "intercept": intercept });
    let scaler = serde_json::json!({ "mean": mean, "scale": vec![1.0; n] });

    fs::write(dir.path().join("model.json"), model.to_string()).unwrap();
    fs::write(dir.path().join("scaler.json"), scaler.to_string()).unwrap();
    fs::write(
        dir.path().join("feature_columns.json"),
        serde_json::to_string(&columns).unwrap(),
    )
    .unwrap();

    dir
}

/// The sample customer used throughout: male, junior, on fiber optic with a
/// month-to-month contract.
fn sample_input() -> RawInput {
    let mut raw = RawInput::new();
    raw.set_label("gender", "Male");
    raw.set_label("SeniorCitizen", "No");
    raw.set_label("Partner", "Yes");
    raw.set_label("Dependents", "No");
    raw.set_number("tenure", 12.0);
    raw.set_label("Contract", "Month-to-month");
    raw.set_label("PaperlessBilling", "Yes");
    raw.set_label("PhoneService", "Yes");
    raw.set_label("MultipleLines", "No");
    raw.set_label("InternetService", "Fiber optic");
    raw.set_label("OnlineSecurity", "No");
    raw.set_label("OnlineBackup", "No");
    raw.set_label("TechSupport", "No");
    raw.set_label("StreamingTV", "No");
    raw.set_label("StreamingMovies", "No");
    raw.set_label("PaymentMethod", "Electronic check");
    raw.set_number("MonthlyCharges", 70.5);
    raw.set_number("TotalCharges", 846.0);
    raw
}

fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "gender,SeniorCitizen,Partner,Dependents,tenure,InternetService,Contract,PaymentMethod,MonthlyCharges,TotalCharges,Churn"
    )
    .unwrap();
    writeln!(file, "Female,0,Yes,No,60,DSL,Two year,Mailed check,30.0,1800.0,No").unwrap();
    writeln!(file, "Male,0,No,No,48,DSL,One year,Credit card (automatic),40.0,1920.0,No").unwrap();
    writeln!(file, "Female,1,No,No,2,Fiber optic,Month-to-month,Electronic check,90.0,180.0,Yes")
        .unwrap();
    writeln!(file, "Male,0,Yes,Yes,36,No,Two year,Mailed check,20.0,720.0,No").unwrap();
    writeln!(file, "Male,1,No,No,4,Fiber optic,Month-to-month,Electronic check,95.0,380.0,Yes")
        .unwrap();
    writeln!(file, "Female,0,Yes,No,24,DSL,One year,Bank transfer (automatic),50.0,1200.0,No")
        .unwrap();
    file
}

#[test]
fn test_end_to_end_prediction() {
    let dir = create_test_artifacts(1.0, None);
    let artifacts = Artifacts::load(dir.path()).unwrap();
    assert_eq!(artifacts.columns.len(), 18);

    let (display, vector) = build(&sample_input(), &artifacts.columns).unwrap();
    assert_eq!(display.len(), 18);
    assert_eq!(vector.to_vec(), SAMPLE_ENCODED.to_vec());

    let outcome = score(&artifacts, &vector).unwrap();

    // Scaled vector is all zeros, so probability = sigmoid(1.0).
    let expected = 1.0 / (1.0 + (-1.0f64).exp());
    assert_abs_diff_eq!(outcome.probability, expected, epsilon = 1e-12);
    assert!(outcome.churn);
    assert_eq!(outcome.risk, RiskTier::High);
}

#[test]
fn test_end_to_end_low_risk() {
    let dir = create_test_artifacts(-1.5, None);
    let artifacts = Artifacts::load(dir.path()).unwrap();

    let (_, vector) = build(&sample_input(), &artifacts.columns).unwrap();
    let outcome = score(&artifacts, &vector).unwrap();

    assert!(outcome.probability < 0.4);
    assert!(!outcome.churn);
    assert_eq!(outcome.risk, RiskTier::Low);
}

#[test]
fn test_missing_feature_aborts_build() {
    // Artifacts trained with a feature the pipeline never collects.
    let dir = create_test_artifacts(0.0, Some("AvgDailyUsage"));
    let artifacts = Artifacts::load(dir.path()).unwrap();

    let err = build(&sample_input(), &artifacts.columns).unwrap_err();
    match err {
        PipelineError::MissingFeature { column } => assert_eq!(column, "AvgDailyUsage"),
        other => panic!("expected MissingFeature, got {other:?}"),
    }
}

#[test]
fn test_unknown_label_aborts_build() {
    let dir = create_test_artifacts(0.0, None);
    let artifacts = Artifacts::load(dir.path()).unwrap();

    let mut raw = sample_input();
    raw.set_label("Contract", "Quarterly");
    let err = build(&raw, &artifacts.columns).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownLabel { .. }));
}

#[test]
fn test_shape_mismatch_aborts_scoring() {
    let dir = create_test_artifacts(0.0, None);
    let artifacts = Artifacts::load(dir.path()).unwrap();

    let short = ndarray::Array1::from_vec(vec![1.0, 2.0]);
    let err = score(&artifacts, &short).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ShapeMismatch {
            expected: 18,
            actual: 2
        }
    ));
}

#[test]
fn test_dashboard_pipeline() {
    let csv = create_test_csv();
    let data = ChurnDataset::load(csv.path().to_str().unwrap()).unwrap();

    assert_eq!(data.num_customers(), 6);

    let kpis = data.kpis().unwrap();
    assert_eq!(kpis.total_customers, 6);
    assert_eq!(kpis.churned, 2);
    assert_abs_diff_eq!(kpis.churn_rate_pct, 33.0, epsilon = 1e-9);

    let correlations = data.churn_correlations().unwrap();
    let tenure = correlations.iter().find(|c| c.feature == "tenure").unwrap();
    assert!(tenure.r < 0.0);

    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("dashboard.png");
    let output_str = output_path.to_str().unwrap();
    viz::generate_dashboard_report(&data, output_str).unwrap();
    assert!(Path::new(output_str).exists());
}
