//! Loan Analytics CLI
//!
//! Analyzes one or more loan-tape CSV files and writes the requested exports.
//! Growth trend parameters can be overridden with GROWTH_POINTS,
//! GROWTH_STEP_DAYS, GROWTH_YIELD_STEP and GROWTH_VOLUME_STEP.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use loan_analytics::analytics::AnalysisOutcome;
use loan_analytics::export::ExportSelection;
use loan_analytics::{AnalyticsConfig, BatchRunner, Upload};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "loan-analytics", version, about = "Portfolio analytics for loan CSV uploads")]
struct Args {
    /// CSV files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Export formats (csv, json, markdown, all); all when omitted
    #[arg(short, long = "format", value_delimiter = ',')]
    formats: Vec<ExportSelection>,

    /// Directory for export files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON config file; environment overrides apply when absent
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AnalyticsConfig::from_env()),
    }
}

/// Output file stem per input. Inputs sharing a stem (`a/loans.csv`,
/// `b/loans.csv`) get `_2`, `_3`, ... suffixes in argument order.
fn unique_output_stems(paths: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "analytics".to_string());
            let mut stem = base.clone();
            let mut n = 2;
            while !used.insert(stem.clone()) {
                stem = format!("{}_{}", base, n);
                n += 1;
            }
            stem
        })
        .collect()
}

fn print_summary(name: &str, outcome: &AnalysisOutcome) {
    let kpis = &outcome.analytics.kpis;
    println!("{}", name);
    println!("  Loans:            {}", kpis.loan_count);
    println!("  Delinquency rate: {:.2}%", kpis.delinquency_rate);
    println!("  Portfolio yield:  {:.2}%", kpis.portfolio_yield);
    println!("  Average LTV:      {:.1}%", kpis.average_ltv);
    println!("  Average DTI:      {:.1}%", kpis.average_dti);
    println!("  Segments:         {}", outcome.analytics.treemap.len());
    println!("  Roll-rate cells:  {}", outcome.analytics.roll_rates.len());
    if let Some(advisory) = &outcome.advisory {
        println!("  Note: {}", advisory);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let formats = ExportSelection::expand(&args.formats);

    let uploads = args
        .files
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Upload::new(path.display().to_string(), content))
        })
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let runner = BatchRunner::with_config(config);
    let results = runner.run_batch(&uploads);
    let generated_at = Utc::now();
    let mut failures = 0;

    let stems = unique_output_stems(&args.files);

    for (stem, result) in stems.iter().zip(&results) {
        let outcome = match &result.outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("{}: {}", result.name, err);
                failures += 1;
                continue;
            }
        };
        print_summary(&result.name, outcome);

        for format in &formats {
            let text = format
                .render(&outcome.analytics, generated_at)
                .with_context(|| format!("Failed to export {} as {:?}", result.name, format))?;
            let out_path = args
                .output_dir
                .join(format!("{}_analytics.{}", stem, format.extension()));
            fs::write(&out_path, text)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            println!("  Wrote {}", out_path.display());
        }
        println!();
    }

    if failures > 0 {
        bail!("{} of {} uploads were rejected", failures, results.len());
    }
    Ok(())
}
