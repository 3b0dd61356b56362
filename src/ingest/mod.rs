//! CSV ingestion: tokenizing, header normalization, and row typing

mod data;
pub mod header;
pub mod loader;
pub mod tokenizer;

pub use data::{coerce_number, LoanRow, UNKNOWN_STATUS};
pub use header::{normalize_header, REQUIRED_COLUMNS};
pub use loader::{ingest_csv, parse_loan_csv, LoanUpload, UploadAdvisory};
pub use tokenizer::parse_csv_line;
