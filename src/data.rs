//! Dashboard dataset loading and descriptive statistics using Polars.

use polars::prelude::*;

/// Numeric features the dashboard profiles.
pub const NUM_FEATURES: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];

/// Categorical features the dashboard cross-tabulates against churn.
pub const CAT_FEATURES: [&str; 7] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "InternetService",
    "Contract",
    "PaymentMethod",
];

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct Kpis {
    pub total_customers: usize,
    pub churned: usize,
    /// Churn rate in percent, rounded to the nearest whole number.
    pub churn_rate_pct: f64,
    pub avg_monthly_charges: f64,
    pub avg_tenure: f64,
}

/// Churned/retained counts for one level of a categorical feature.
#[derive(Debug, Clone)]
pub struct CategoryChurn {
    pub level: String,
    pub churned: usize,
    pub retained: usize,
}

/// Pearson correlation of one numeric feature with the churn flag.
#[derive(Debug, Clone)]
pub struct ChurnCorrelation {
    pub feature: String,
    pub r: f64,
}

/// The telecom dataset with derived churn columns.
#[derive(Debug)]
pub struct ChurnDataset {
    df: DataFrame,
}

impl ChurnDataset {
    /// Load the CSV and derive the churn indicator columns.
    ///
    /// `TotalCharges` arrives as text in the raw export (blank for brand-new
    /// customers), so it is coerced to f64 with invalid entries becoming
    /// null; numeric statistics skip the nulls.
    pub fn load(file_path: &str) -> crate::Result<Self> {
        let df = LazyCsvReader::new(file_path)
            .has_header(true)
            .finish()?
            .with_columns([
                col("TotalCharges").cast(DataType::Float64),
                when(col("Churn").eq(lit("Yes")))
                    .then(lit(1i64))
                    .otherwise(lit(0i64))
                    .alias("ChurnFlag"),
                when(col("Churn").eq(lit("Yes")))
                    .then(lit("Churned"))
                    .otherwise(lit("Retained"))
                    .alias("ChurnLabel"),
            ])
            .collect()?;

        if df.height() == 0 {
            anyhow::bail!("no rows found in {}", file_path);
        }

        Ok(Self { df })
    }

    pub fn num_customers(&self) -> usize {
        self.df.height()
    }

    /// Headline KPI block.
    pub fn kpis(&self) -> crate::Result<Kpis> {
        let total_customers = self.df.height();
        let churned = self.df.column("ChurnFlag")?.i64()?.sum().unwrap_or(0) as usize;
        let churn_rate_pct = (churned as f64 / total_customers as f64 * 100.0).round();

        let avg_monthly_charges = self
            .df
            .column("MonthlyCharges")?
            .cast(&DataType::Float64)?
            .f64()?
            .mean()
            .unwrap_or(0.0);
        let avg_tenure = self
            .df
            .column("tenure")?
            .cast(&DataType::Float64)?
            .f64()?
            .mean()
            .unwrap_or(0.0);

        Ok(Kpis {
            total_customers,
            churned,
            churn_rate_pct,
            avg_monthly_charges,
            avg_tenure,
        })
    }

    /// One numeric column with nulls dropped.
    pub fn numeric_column(&self, name: &str) -> crate::Result<Vec<f64>> {
        let series = self.df.column(name)?.cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().flatten().collect())
    }

    /// A numeric column split into (churned, retained) values.
    pub fn churn_split(&self, name: &str) -> crate::Result<(Vec<f64>, Vec<f64>)> {
        let series = self.df.column(name)?.cast(&DataType::Float64)?;
        let values = series.f64()?;
        let flags = self.df.column("ChurnFlag")?.i64()?;

        let mut churned = Vec::new();
        let mut retained = Vec::new();
        for (value, flag) in values.into_iter().zip(flags.into_iter()) {
            if let (Some(value), Some(flag)) = (value, flag) {
                if flag == 1 {
                    churned.push(value);
                } else {
                    retained.push(value);
                }
            }
        }
        Ok((churned, retained))
    }

    /// (MonthlyCharges, TotalCharges, churned) triples for the scatter plot.
    /// Rows with a null TotalCharges are skipped.
    pub fn charges_scatter(&self) -> crate::Result<Vec<(f64, f64, bool)>> {
        let monthly_series = self.df.column("MonthlyCharges")?.cast(&DataType::Float64)?;
        let monthly = monthly_series.f64()?;
        let total_series = self.df.column("TotalCharges")?.cast(&DataType::Float64)?;
        let total = total_series.f64()?;
        let flags = self.df.column("ChurnFlag")?.i64()?;

        let mut points = Vec::with_capacity(self.df.height());
        for ((m, t), f) in monthly
            .into_iter()
            .zip(total.into_iter())
            .zip(flags.into_iter())
        {
            if let (Some(m), Some(t), Some(f)) = (m, t, f) {
                points.push((m, t, f == 1));
            }
        }
        Ok(points)
    }

    /// Churned/retained totals from the derived label column.
    pub fn churn_distribution(&self) -> crate::Result<Vec<(String, usize)>> {
        let out = self
            .df
            .clone()
            .lazy()
            .group_by([col("ChurnLabel").alias("level")])
            .agg([col("ChurnFlag").count().alias("count")])
            .sort("level", SortOptions::default())
            .collect()?;

        let levels = out.column("level")?.str()?;
        let counts = out.column("count")?.u32()?;

        let mut rows = Vec::with_capacity(out.height());
        for (level, count) in levels.into_iter().zip(counts.into_iter()) {
            if let (Some(level), Some(count)) = (level, count) {
                rows.push((level.to_string(), count as usize));
            }
        }
        Ok(rows)
    }

    /// Churned/retained counts per level of a categorical feature, sorted by
    /// level name for deterministic output.
    pub fn category_churn_counts(&self, column: &str) -> crate::Result<Vec<CategoryChurn>> {
        let out = self
            .df
            .clone()
            .lazy()
            .group_by([col(column).cast(DataType::String).alias("level")])
            .agg([
                col("ChurnFlag").sum().alias("churned"),
                col("ChurnFlag").count().alias("total"),
            ])
            .sort("level", SortOptions::default())
            .collect()?;

        let levels = out.column("level")?.str()?;
        let churned = out.column("churned")?.i64()?;
        let totals = out.column("total")?.u32()?;

        let mut rows = Vec::with_capacity(out.height());
        for ((level, churned), total) in levels
            .into_iter()
            .zip(churned.into_iter())
            .zip(totals.into_iter())
        {
            if let (Some(level), Some(churned), Some(total)) = (level, churned, total) {
                rows.push(CategoryChurn {
                    level: level.to_string(),
                    churned: churned as usize,
                    retained: total as usize - churned as usize,
                });
            }
        }
        Ok(rows)
    }

    /// Mean of a numeric feature per level of a categorical feature.
    pub fn category_means(&self, cat: &str, num: &str) -> crate::Result<Vec<(String, f64)>> {
        let out = self
            .df
            .clone()
            .lazy()
            .group_by([col(cat).cast(DataType::String).alias("level")])
            .agg([col(num).cast(DataType::Float64).mean().alias("mean")])
            .sort("level", SortOptions::default())
            .collect()?;

        let levels = out.column("level")?.str()?;
        let means = out.column("mean")?.f64()?;

        let mut rows = Vec::with_capacity(out.height());
        for (level, mean) in levels.into_iter().zip(means.into_iter()) {
            if let (Some(level), Some(mean)) = (level, mean) {
                rows.push((level.to_string(), mean));
            }
        }
        Ok(rows)
    }

    /// Pearson correlation of each numeric feature with the churn flag,
    /// sorted by absolute correlation descending.
    pub fn churn_correlations(&self) -> crate::Result<Vec<ChurnCorrelation>> {
        let flags: Vec<f64> = self
            .df
            .column("ChurnFlag")?
            .i64()?
            .into_no_null_iter()
            .map(|v| v as f64)
            .collect();

        let mut correlations = Vec::with_capacity(NUM_FEATURES.len());
        for feature in NUM_FEATURES {
            let series = self.df.column(feature)?.cast(&DataType::Float64)?;
            let values = series.f64()?;

            let mut xs = Vec::with_capacity(flags.len());
            let mut ys = Vec::with_capacity(flags.len());
            for (value, flag) in values.into_iter().zip(flags.iter()) {
                if let Some(value) = value {
                    xs.push(value);
                    ys.push(*flag);
                }
            }

            correlations.push(ChurnCorrelation {
                feature: feature.to_string(),
                r: pearson(&xs, &ys),
            });
        }

        correlations.sort_by(|a, b| {
            b.r.abs()
                .partial_cmp(&a.r.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(correlations)
    }
}

/// Pearson correlation coefficient; 0.0 when either side is degenerate.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return 0.0;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}
