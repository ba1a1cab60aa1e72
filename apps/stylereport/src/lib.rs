//! Stylereport core library.
//!
//! Groups the diagnostics of an external style checker into fixed
//! categories and reports per-category compliance with PEP 8 and the
//! Google Python style guide for a single file.
//!
//! High-level modules:
//! - `registry`: The fixed categories and the codes each aggregates.
//! - `engine`: Runs the style checker and parses its statistics.
//! - `aggregate`: Per-category compliance and error breakdown.
//! - `naming`: Naming checker boundary and its scoped session.
//! - `report`: Report assembly and the analysis pipeline.
//! - `output`: JSON and human printers.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `models`: Report data types.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod naming;
pub mod output;
pub mod registry;
pub mod report;
pub mod utils;

pub use error::{AnalyzeError, Result};
pub use models::{CategoryAnalysis, CategoryResult, ErrorBreakdown, RawCounters, Report};
pub use report::{analyze_file, build_report, run, validate_file_name, Analysis};
