//! Naming-compliance collaborator.
//!
//! The naming checker owns state between its result and its cleanup, so it
//! is only ever used through a [`NamingSession`], which releases it when the
//! session goes out of scope, whichever way that happens.

use crate::aggregate::aggregate;
use crate::engine::{parse_statistics, CheckerCommand};
use crate::error::{AnalyzeError, Result};
use crate::models::CategoryResult;
use crate::registry::NAMING_CODES;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Produces the naming category for a file.
pub trait NamingChecker {
    /// Naming result for `path` and the number of naming errors found.
    fn naming_results(&mut self, path: &Path) -> Result<(CategoryResult, u64)>;

    /// Release whatever the checker acquired while producing results.
    fn cleanup(&mut self);
}

/// Scoped use of a [`NamingChecker`]; cleanup runs exactly once on drop.
pub struct NamingSession<'a, N: NamingChecker + ?Sized> {
    checker: &'a mut N,
}

impl<'a, N: NamingChecker + ?Sized> NamingSession<'a, N> {
    pub fn new(checker: &'a mut N) -> Self {
        NamingSession { checker }
    }

    pub fn results(&mut self, path: &Path) -> Result<(CategoryResult, u64)> {
        self.checker.naming_results(path)
    }
}

impl<N: NamingChecker + ?Sized> Drop for NamingSession<'_, N> {
    fn drop(&mut self) {
        self.checker.cleanup();
        debug!("naming checker released");
    }
}

/// Naming checker backed by an external command (pep8-naming via flake8 by
/// default). Output goes to a scratch directory created on first use.
pub struct CommandNamingChecker {
    command: CheckerCommand,
    scratch: Option<TempDir>,
    verified: bool,
}

impl CommandNamingChecker {
    pub fn new(command: CheckerCommand) -> Self {
        CommandNamingChecker {
            command,
            scratch: None,
            verified: false,
        }
    }

    fn output_file(&mut self) -> Result<PathBuf> {
        let dir = match self.scratch.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("stylereport-naming")
                    .tempdir()
                    .map_err(|source| AnalyzeError::Io {
                        source,
                        path: std::env::temp_dir(),
                    })?;
                debug!(dir = %dir.path().display(), "naming scratch acquired");
                dir
            }
        };
        let file = dir.path().join("naming.txt");
        self.scratch = Some(dir);
        Ok(file)
    }
}

impl Default for CommandNamingChecker {
    fn default() -> Self {
        CommandNamingChecker::new(CheckerCommand::flake8_naming())
    }
}

impl NamingChecker for CommandNamingChecker {
    fn naming_results(&mut self, path: &Path) -> Result<(CategoryResult, u64)> {
        if !self.verified {
            self.command.verify()?;
            self.verified = true;
        }
        let out_file = self.output_file()?;
        if let Err(e) = fs::remove_file(&out_file) {
            if e.kind() != ErrorKind::NotFound {
                return Err(AnalyzeError::Io {
                    source: e,
                    path: out_file,
                });
            }
        }
        let mut arg = OsString::from("--output-file=");
        arg.push(&out_file);
        let output = self.command.run(&[arg], path)?;

        // No output file means the checker had nothing to report.
        let text = match fs::read_to_string(&out_file) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(AnalyzeError::Io {
                    source,
                    path: out_file,
                })
            }
        };
        let mut diags = parse_statistics(&text);
        if diags.counters().is_empty() {
            diags = parse_statistics(&String::from_utf8_lossy(&output.stdout));
        }
        Ok(aggregate(NAMING_CODES, diags.counters()))
    }

    fn cleanup(&mut self) {
        if let Some(dir) = self.scratch.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(dir = %path.display(), error = %e, "failed to remove naming scratch");
            }
        }
    }
}
