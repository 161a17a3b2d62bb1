//! churnforge: churn prediction and EDA dashboard CLI
//!
//! This is the main entrypoint that orchestrates artifact loading, input
//! encoding, scoring, and dashboard generation.

use std::time::Instant;

use anyhow::Result;
use churnforge::cli::{Cli, Command, DashboardArgs, PredictArgs};
use churnforge::{build, score, viz, Artifacts, ChurnDataset};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("churnforge - Telecom Customer Churn Prediction");
        println!("==============================================\n");
    }

    match cli.command {
        Command::Predict(args) => run_predict(&args, cli.verbose),
        Command::Dashboard(args) => run_dashboard(&args, cli.verbose),
    }
}

/// Score a single customer against the pre-trained artifacts.
fn run_predict(args: &PredictArgs, verbose: bool) -> Result<()> {
    println!("=== Churn Prediction ===");

    let start_time = Instant::now();

    if verbose {
        println!("\nLoading artifacts from: {}", args.artifacts.display());
    }
    let artifacts = Artifacts::load(&args.artifacts)?;
    println!("✓ Artifacts loaded: {} feature columns", artifacts.columns.len());

    let raw = args.to_raw_input();
    let (display, vector) = build(&raw, &artifacts.columns)?;
    if verbose {
        println!("✓ Feature vector assembled: {} values", vector.len());
    }

    let outcome = score(&artifacts, &vector)?;

    let elapsed = start_time.elapsed();

    if outcome.churn {
        println!("\n⚠ Customer is likely to churn");
    } else {
        println!("\n✓ Customer is not likely to churn");
    }
    println!("Churn probability: {:.2}", outcome.probability);
    println!("Risk level: {}", outcome.risk);

    println!("\n=== Customer Input Summary ===");
    for (field, value) in &display {
        println!("  {:<17} {}", field, value);
    }

    if verbose {
        println!("\nProcessing time: {:.2}s", elapsed.as_secs_f64());
    }

    Ok(())
}

/// Run the full dashboard pipeline: load, compute statistics, render charts.
fn run_dashboard(args: &DashboardArgs, verbose: bool) -> Result<()> {
    println!("=== Churn Dashboard ===\n");

    let start_time = Instant::now();

    if verbose {
        println!("Step 1: Loading dataset");
        println!("  Input file: {}", args.input);
    }

    let data_start = Instant::now();
    let data = ChurnDataset::load(&args.input)?;
    let data_time = data_start.elapsed();

    println!("✓ Data loaded: {} customers", data.num_customers());
    if verbose {
        println!("  Processing time: {:.2}s", data_time.as_secs_f64());
    }

    if verbose {
        println!("\nStep 2: Generating charts and statistics");
        println!("  Output file: {}", args.output);
    }

    let viz_start = Instant::now();
    viz::generate_dashboard_report(&data, &args.output)?;
    let viz_time = viz_start.elapsed();

    println!("\n✓ Dashboard generated");
    if verbose {
        println!("  Rendering time: {:.2}s", viz_time.as_secs_f64());
    }

    let total_time = start_time.elapsed();
    println!("\n=== Dashboard Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Main plot saved to: {}", args.output);

    Ok(())
}
