//! Dashboard chart rendering using Plotters.

use plotters::prelude::*;

use crate::data::{self, CategoryChurn, ChurnCorrelation, ChurnDataset, Kpis};

const CHURNED_COLOR: RGBColor = RED;
const RETAINED_COLOR: RGBColor = BLUE;

/// Number of bins for numeric feature histograms.
const HIST_BINS: usize = 30;

/// Draw a histogram of one numeric feature.
pub fn create_histogram(values: &[f64], feature: &str, output_path: &str) -> crate::Result<()> {
    if values.is_empty() {
        anyhow::bail!("no values to plot for {}", feature);
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    // Keep the axis non-degenerate when all values are equal.
    let span = (max - min).max(1e-9);
    let max = min + span;

    let mut counts = vec![0usize; HIST_BINS];
    for &value in values {
        let idx = (((value - min) / span) * HIST_BINS as f64) as usize;
        counts[idx.min(HIST_BINS - 1)] += 1;
    }
    let y_max = *counts.iter().max().unwrap_or(&1) as f64 * 1.1;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Distribution of {feature}"), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(min..max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(feature)
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let bin_width = span / HIST_BINS as f64;
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = min + i as f64 * bin_width;
        let x1 = x0 + bin_width;
        Rectangle::new([(x0, 0.0), (x1, count as f64)], RETAINED_COLOR.mix(0.6).filled())
    }))?;

    root.present()?;
    println!("Histogram saved to: {}", output_path);

    Ok(())
}

/// Draw vertical boxplots of one numeric feature, churned vs retained.
/// Skipped (with a note) when either side is empty.
pub fn create_churn_boxplot(
    churned: &[f64],
    retained: &[f64],
    feature: &str,
    output_path: &str,
) -> crate::Result<()> {
    if churned.is_empty() || retained.is_empty() {
        println!("Skipping {feature} boxplot: one churn group is empty");
        return Ok(());
    }

    let churned_q = Quartiles::new(churned);
    let retained_q = Quartiles::new(retained);
    let y_max = churned_q.values()[4].max(retained_q.values()[4]) * 1.1;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{feature} by churn status"), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..3f32, 0f32..y_max)?;

    let groups = ["", "Churned", "Retained"];
    chart
        .configure_mesh()
        .x_labels(3)
        .x_label_formatter(&|x| {
            groups
                .get(x.round() as usize)
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .y_desc(feature)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(vec![
        Boxplot::new_vertical(1f32, &churned_q)
            .width(40)
            .style(CHURNED_COLOR),
        Boxplot::new_vertical(2f32, &retained_q)
            .width(40)
            .style(RETAINED_COLOR),
    ])?;

    root.present()?;
    println!("Boxplot saved to: {}", output_path);

    Ok(())
}

/// Draw the overall churn distribution as a two-bar chart.
pub fn create_churn_distribution_chart(
    rows: &[(String, usize)],
    output_path: &str,
) -> crate::Result<()> {
    if rows.is_empty() {
        anyhow::bail!("no churn distribution to plot");
    }

    let y_max = rows.iter().map(|(_, count)| *count).max().unwrap_or(1) as f64 * 1.1;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Churn Distribution", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..rows.len() as f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| {
            let idx = (x.floor() as usize).min(rows.len() - 1);
            rows[idx].0.clone()
        })
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, (level, count))| {
        let color = if level == "Churned" {
            CHURNED_COLOR
        } else {
            RETAINED_COLOR
        };
        Rectangle::new(
            [(i as f64 + 0.2, 0.0), (i as f64 + 0.8, *count as f64)],
            color.filled(),
        )
    }))?;

    root.present()?;
    println!("Churn distribution chart saved to: {}", output_path);

    Ok(())
}

/// Draw churned/retained counts per level of a categorical feature as
/// grouped bars.
pub fn create_category_churn_chart(
    rows: &[CategoryChurn],
    column: &str,
    output_path: &str,
) -> crate::Result<()> {
    if rows.is_empty() {
        anyhow::bail!("no category levels to plot for {}", column);
    }

    let y_max = rows
        .iter()
        .map(|r| r.churned.max(r.retained))
        .max()
        .unwrap_or(1) as f64
        * 1.1;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Churn by {column}"), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..rows.len() as f64, 0f64..y_max.max(1.0))?;

    chart
        .configure_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| {
            let idx = (x.floor() as usize).min(rows.len() - 1);
            rows[idx].level.clone()
        })
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Rectangle::new(
                [(i as f64 + 0.1, 0.0), (i as f64 + 0.45, row.churned as f64)],
                CHURNED_COLOR.filled(),
            )
        }))?
        .label("Churned")
        .legend(|(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], CHURNED_COLOR.filled()));

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Rectangle::new(
                [(i as f64 + 0.55, 0.0), (i as f64 + 0.9, row.retained as f64)],
                RETAINED_COLOR.filled(),
            )
        }))?
        .label("Retained")
        .legend(|(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], RETAINED_COLOR.filled()));

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Category chart saved to: {}", output_path);

    Ok(())
}

/// Draw the MonthlyCharges vs TotalCharges scatter, colored by churn status.
pub fn create_charges_scatter(
    points: &[(f64, f64, bool)],
    output_path: &str,
) -> crate::Result<()> {
    if points.is_empty() {
        anyhow::bail!("no data points for the charges scatter");
    }

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min) - 5.0;
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max) + 5.0;
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min) - 50.0;
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max) + 50.0;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Monthly vs Total Charges (Colored by Churn)",
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Monthly Charges")
        .y_desc("Total Charges")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart
        .draw_series(
            points
                .iter()
                .filter(|(_, _, churned)| *churned)
                .map(|&(x, y, _)| Circle::new((x, y), 4, CHURNED_COLOR.mix(0.6).filled())),
        )?
        .label("Churned")
        .legend(|(x, y)| Circle::new((x + 5, y), 4, CHURNED_COLOR.filled()));

    chart
        .draw_series(
            points
                .iter()
                .filter(|(_, _, churned)| !*churned)
                .map(|&(x, y, _)| Circle::new((x, y), 4, RETAINED_COLOR.mix(0.6).filled())),
        )?
        .label("Retained")
        .legend(|(x, y)| Circle::new((x + 5, y), 4, RETAINED_COLOR.filled()));

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Charges scatter saved to: {}", output_path);

    Ok(())
}

/// Draw absolute churn correlation per numeric feature.
pub fn create_correlation_chart(
    correlations: &[ChurnCorrelation],
    output_path: &str,
) -> crate::Result<()> {
    if correlations.is_empty() {
        anyhow::bail!("no correlations to plot");
    }

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Absolute Correlation with Churn", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..correlations.len() as f64, 0f64..1f64)?;

    chart
        .configure_mesh()
        .x_labels(correlations.len())
        .x_label_formatter(&|x| {
            let idx = (x.floor() as usize).min(correlations.len() - 1);
            correlations[idx].feature.clone()
        })
        .y_desc("|r|")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(correlations.iter().enumerate().map(|(i, c)| {
        Rectangle::new(
            [(i as f64 + 0.2, 0.0), (i as f64 + 0.8, c.r.abs())],
            RETAINED_COLOR.mix(0.8).filled(),
        )
    }))?;

    root.present()?;
    println!("Correlation chart saved to: {}", output_path);

    Ok(())
}

/// Print the dashboard summary tables to the console.
pub fn print_dashboard_summary(
    kpis: &Kpis,
    correlations: &[ChurnCorrelation],
    contract: &[CategoryChurn],
) {
    println!("\n=== Dashboard Summary ===");
    println!("Total customers: {}", kpis.total_customers);
    println!("Churned customers: {}", kpis.churned);
    println!("Churn rate: {:.0}%", kpis.churn_rate_pct);
    println!("Avg monthly charges: {:.2}", kpis.avg_monthly_charges);
    println!("Avg tenure (months): {:.1}", kpis.avg_tenure);

    println!("\nCorrelation with churn:");
    println!("  Feature        |       r");
    println!("  ---------------|--------");
    for c in correlations {
        println!("  {:<14} | {:>7.3}", c.feature, c.r);
    }

    println!("\nChurn by contract:");
    println!("  Contract       | Churned | Retained");
    println!("  ---------------|---------|---------");
    for row in contract {
        println!("  {:<14} | {:>7} | {:>8}", row.level, row.churned, row.retained);
    }

    println!(
        "\nChurn is influenced by multiple factors together; no single feature alone determines it."
    );
}

/// Render every dashboard chart and print the summary tables.
///
/// Sibling chart files derive their names from `base_output_path`
/// (`dashboard.png` -> `dashboard_tenure.png`, ...); the charges scatter is
/// the main plot at the base path itself.
pub fn generate_dashboard_report(data: &ChurnDataset, base_output_path: &str) -> crate::Result<()> {
    let points = data.charges_scatter()?;
    create_charges_scatter(&points, base_output_path)?;

    for feature in data::NUM_FEATURES {
        let values = data.numeric_column(feature)?;
        let path = base_output_path.replace(".png", &format!("_{}.png", feature.to_lowercase()));
        create_histogram(&values, feature, &path)?;
    }

    let distribution = data.churn_distribution()?;
    create_churn_distribution_chart(
        &distribution,
        &base_output_path.replace(".png", "_churn_distribution.png"),
    )?;

    let (churned, retained) = data.churn_split("tenure")?;
    create_churn_boxplot(
        &churned,
        &retained,
        "tenure",
        &base_output_path.replace(".png", "_tenure_by_churn.png"),
    )?;

    for column in data::CAT_FEATURES {
        let rows = data.category_churn_counts(column)?;
        let path =
            base_output_path.replace(".png", &format!("_{}_churn.png", column.to_lowercase()));
        create_category_churn_chart(&rows, column, &path)?;
    }

    let correlations = data.churn_correlations()?;
    create_correlation_chart(
        &correlations,
        &base_output_path.replace(".png", "_correlation.png"),
    )?;

    print_dashboard_summary(
        &data.kpis()?,
        &correlations,
        &data.category_churn_counts("Contract")?,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{tempdir, NamedTempFile};

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "gender,SeniorCitizen,Partner,Dependents,tenure,InternetService,Contract,PaymentMethod,MonthlyCharges,TotalCharges,Churn"
        )
        .unwrap();
        writeln!(file, "Female,0,Yes,No,60,DSL,Two year,Mailed check,30.0,1800.0,No").unwrap();
        writeln!(file, "Male,1,No,No,2,Fiber optic,Month-to-month,Electronic check,90.0,180.0,Yes")
            .unwrap();
        writeln!(file, "Male,0,Yes,Yes,36,No,Two year,Mailed check,20.0,720.0,No").unwrap();
        writeln!(file, "Female,0,No,No,5,Fiber optic,Month-to-month,Electronic check,85.0,425.0,Yes")
            .unwrap();
        writeln!(file, "Female,0,Yes,No,24,DSL,One year,Bank transfer (automatic),50.0,1200.0,No")
            .unwrap();
        file
    }

    #[test]
    fn test_create_histogram() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("hist.png");
        let output_str = output_path.to_str().unwrap();

        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        create_histogram(&values, "tenure", output_str).unwrap();
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_create_histogram_rejects_empty() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("hist.png");
        assert!(create_histogram(&[], "tenure", output_path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_create_category_churn_chart() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("contract.png");
        let output_str = output_path.to_str().unwrap();

        let rows = vec![
            CategoryChurn {
                level: "Month-to-month".to_string(),
                churned: 12,
                retained: 8,
            },
            CategoryChurn {
                level: "Two year".to_string(),
                churned: 1,
                retained: 19,
            },
        ];
        create_category_churn_chart(&rows, "Contract", output_str).unwrap();
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_create_charges_scatter() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("scatter.png");
        let output_str = output_path.to_str().unwrap();

        let points = vec![
            (30.0, 1800.0, false),
            (90.0, 180.0, true),
            (50.0, 1200.0, false),
        ];
        create_charges_scatter(&points, output_str).unwrap();
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_generate_dashboard_report() {
        let csv = create_test_csv();
        let data = ChurnDataset::load(csv.path().to_str().unwrap()).unwrap();

        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("dashboard.png");
        let output_str = output_path.to_str().unwrap();

        generate_dashboard_report(&data, output_str).unwrap();

        assert!(Path::new(output_str).exists());
        for sibling in [
            "dashboard_tenure.png",
            "dashboard_monthlycharges.png",
            "dashboard_totalcharges.png",
            "dashboard_churn_distribution.png",
            "dashboard_tenure_by_churn.png",
            "dashboard_contract_churn.png",
            "dashboard_correlation.png",
        ] {
            assert!(
                temp_dir.path().join(sibling).exists(),
                "missing chart {sibling}"
            );
        }
    }
}
