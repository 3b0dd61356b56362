//! Batch analysis of independent uploads
//!
//! Each upload runs the full pipeline on its own input; nothing is shared
//! between them beyond the read-only configuration, so they run in parallel.

use crate::analytics::{AnalysisOutcome, AnalyticsConfig, LoanAnalyzer};
use crate::error::IngestError;
use log::warn;
use rayon::prelude::*;

/// One named CSV upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub content: String,
}

impl Upload {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Per-upload result, in input order
#[derive(Debug)]
pub struct BatchResult {
    pub name: String,
    pub outcome: Result<AnalysisOutcome, IngestError>,
}

/// Pre-configured runner for many uploads
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new();
/// let results = runner.run_batch(&[Upload::new("q1.csv", q1_text)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    analyzer: LoanAnalyzer,
}

impl BatchRunner {
    /// Runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self {
            analyzer: LoanAnalyzer::new(config),
        }
    }

    /// Analyze a single upload
    pub fn run(&self, upload: &Upload) -> BatchResult {
        let outcome = self.analyzer.analyze(&upload.content);
        if let Err(err) = &outcome {
            warn!("Upload {} rejected: {}", upload.name, err);
        }
        BatchResult {
            name: upload.name.clone(),
            outcome,
        }
    }

    /// Analyze uploads in parallel; a rejected upload does not affect the rest
    pub fn run_batch(&self, uploads: &[Upload]) -> Vec<BatchResult> {
        uploads.par_iter().map(|upload| self.run(upload)).collect()
    }

    pub fn analyzer(&self) -> &LoanAnalyzer {
        &self.analyzer
    }
}
