//! Report assembly and the single-file analysis pipeline.
//!
//! `file path -> engine scan -> per-category aggregation (+ naming) -> Report`.

use crate::aggregate::aggregate;
use crate::engine::{DiagnosticEngine, Diagnostics};
use crate::error::{AnalyzeError, Result};
use crate::models::{CategoryAnalysis, RawCounters, Report};
use crate::naming::{NamingChecker, NamingSession};
use crate::registry::CODE_SET_CATEGORIES;
use std::path::Path;
use tracing::{debug, info};

/// Whitespace rejected in file names. Plain spaces are allowed.
const FORBIDDEN_WHITESPACE: [char; 5] = ['\t', '\n', '\r', '\x0b', '\x0c'];

/// Reject file names containing whitespace other than plain spaces.
pub fn validate_file_name(input: &str) -> Result<()> {
    let stripped = input.replace(' ', "");
    if stripped.contains(&FORBIDDEN_WHITESPACE[..]) {
        return Err(AnalyzeError::InvalidFileName {
            input: input.to_string(),
        });
    }
    Ok(())
}

/// Build the report from engine counters plus the naming checker's result.
///
/// The naming checker is released before this returns, on success or error.
pub fn build_report<N: NamingChecker + ?Sized>(
    path: &Path,
    counters: &RawCounters,
    naming: &mut N,
) -> Result<Report> {
    let mut session = NamingSession::new(naming);
    let (names, naming_errors) = session.results(path)?;

    let per_category = CODE_SET_CATEGORIES.map(|def| {
        let (result, errors) = aggregate(def.codes, counters);
        debug!(category = %def.category, errors, "category aggregated");
        (result, errors)
    });
    let total_error_count = per_category
        .iter()
        .fold(naming_errors, |acc, (_, errors)| acc.saturating_add(*errors));
    let [indentation, tabs, length, blanks, imports] =
        per_category.map(|(result, _)| CategoryAnalysis::Checked(result));

    Ok(Report {
        naming_analysis: CategoryAnalysis::Checked(names),
        indentation_analysis: indentation,
        tabs_vs_spaces_analysis: tabs,
        line_length_analysis: length,
        blank_lines_analysis: blanks,
        import_analysis: imports,
        file_encoding_analysis: CategoryAnalysis::NotSupported,
        total_error_count,
    })
}

/// Report plus the diagnostics it was built from.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub diagnostics: Diagnostics,
}

/// Scan `path` once and build its report.
///
/// Missing files and fatal engine diagnostics are errors rather than a
/// clean report.
pub fn analyze_file<E, N>(path: &Path, engine: &E, naming: &mut N) -> Result<Analysis>
where
    E: DiagnosticEngine + ?Sized,
    N: NamingChecker + ?Sized,
{
    if !path.is_file() {
        return Err(AnalyzeError::FileNotFound(path.to_path_buf()));
    }
    let diagnostics = engine.scan(path)?;
    if let Some((code, message)) = diagnostics.fatal() {
        return Err(AnalyzeError::EngineFatal {
            code: code.to_string(),
            message: message.to_string(),
        });
    }
    let report = build_report(path, diagnostics.counters(), naming)?;
    info!(
        file = %path.display(),
        total_errors = report.total_error_count,
        "report built"
    );
    Ok(Analysis {
        report,
        diagnostics,
    })
}

/// Validate `file_name`, then analyze it.
pub fn run<E, N>(file_name: &str, engine: &E, naming: &mut N) -> Result<Analysis>
where
    E: DiagnosticEngine + ?Sized,
    N: NamingChecker + ?Sized,
{
    validate_file_name(file_name)?;
    analyze_file(Path::new(file_name), engine, naming)
}
