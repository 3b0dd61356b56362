//! Loan Analytics - CSV ingestion and portfolio aggregation for loan tapes
//!
//! This library provides:
//! - Tolerant CSV ingestion (quoted fields, header synonyms, currency cells)
//! - Portfolio KPIs (delinquency, weighted yield, LTV, DTI)
//! - Status treemap, DPD roll-rate matrix, and a placeholder growth trend
//! - CSV, JSON and Markdown exports
//! - Parallel batch analysis of independent uploads
//!
//! Everything is synchronous and in-memory: raw text in, structured analytics out.

pub mod analytics;
pub mod batch;
pub mod error;
pub mod export;
pub mod ingest;

// Re-export commonly used types
pub use analytics::{
    analyze_csv, process_loan_rows, AnalyticsConfig, KpiStats, LoanAnalyzer, ProcessedAnalytics,
};
pub use batch::{BatchRunner, Upload};
pub use error::{ExportError, IngestError};
pub use export::{ExportFormat, ExportSelection};
pub use ingest::{ingest_csv, parse_loan_csv, LoanRow, UploadAdvisory};
