//! Diagnostic engine adapter.
//!
//! Runs an external style checker once per file and turns its statistics
//! output into per-code counters plus one descriptive message per code.
//! Statistics lines look like `3       E501 line too long (88 > 79 characters)`,
//! which is what both `pycodestyle --statistics` and `flake8 --statistics`
//! print.

use crate::error::{AnalyzeError, Result};
use crate::models::RawCounters;
use crate::registry::FATAL_CODES;
use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::OnceLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Counters and messages produced by one engine pass.
pub struct Diagnostics {
    counters: RawCounters,
    messages: HashMap<String, String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `code`. The first message seen for a code is kept.
    pub fn record(&mut self, code: &str, count: u64, message: &str) {
        let total = self.counters.entry(code.to_string()).or_insert(0);
        *total = total.saturating_add(count);
        self.messages
            .entry(code.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn counters(&self) -> &RawCounters {
        &self.counters
    }

    pub fn count(&self, code: &str) -> u64 {
        self.counters.get(code).copied().unwrap_or(0)
    }

    /// Descriptive text reported for `code`, without the code prefix.
    pub fn message(&self, code: &str) -> Option<&str> {
        self.messages.get(code).map(String::as_str)
    }

    /// First fatal code (the file could not be checked) with its message.
    pub fn fatal(&self) -> Option<(&str, &str)> {
        FATAL_CODES
            .iter()
            .find(|code| self.count(code) > 0)
            .map(|code| (*code, self.message(code).unwrap_or("")))
    }
}

fn stat_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s+([A-Z]+[0-9]+)\s*(.*?)\s*$").expect("statistics regex is valid")
    })
}

/// Parse checker statistics output. Lines that are not statistics are skipped.
pub fn parse_statistics(text: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    for line in text.lines() {
        let Some(caps) = stat_line().captures(line) else {
            continue;
        };
        let Ok(count) = caps[1].parse::<u64>() else {
            continue;
        };
        diags.record(&caps[2], count, &caps[3]);
    }
    diags
}

/// Source of per-file diagnostics.
pub trait DiagnosticEngine {
    fn scan(&self, path: &Path) -> Result<Diagnostics>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// External program plus leading arguments; the file path is appended last.
pub struct CheckerCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Text `program <args> --version` must print, e.g. a plugin name.
    pub requires: Option<String>,
}

impl CheckerCommand {
    pub fn pycodestyle() -> Self {
        CheckerCommand {
            program: "pycodestyle".into(),
            args: vec!["--statistics".into(), "-qq".into()],
            requires: None,
        }
    }

    pub fn flake8_naming() -> Self {
        CheckerCommand {
            program: "flake8".into(),
            args: vec!["--select=N8".into(), "--statistics".into(), "-qq".into()],
            requires: Some("pep8-naming".into()),
        }
    }

    /// Check that the version banner mentions `requires`.
    ///
    /// flake8 silently reports nothing for `--select=N8` when pep8-naming is
    /// missing, which would read as a clean naming result.
    pub(crate) fn verify(&self) -> Result<()> {
        let Some(required) = self.requires.as_deref() else {
            return Ok(());
        };
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("--version")
            .output()
            .map_err(|source| AnalyzeError::EngineUnavailable {
                program: self.program.clone(),
                source,
            })?;
        let banner = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !banner.contains(required) {
            return Err(AnalyzeError::MissingPlugin {
                program: self.program.clone(),
                plugin: required.to_string(),
            });
        }
        debug!(program = %self.program, required, "checker requirement satisfied");
        Ok(())
    }

    /// Run once with `extra` arguments before the file path.
    ///
    /// Exit status 1 only means diagnostics were reported.
    pub(crate) fn run(&self, extra: &[OsString], path: &Path) -> Result<Output> {
        debug!(program = %self.program, args = ?self.args, file = %path.display(), "running checker");
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .arg(path)
            .output()
            .map_err(|source| AnalyzeError::EngineUnavailable {
                program: self.program.clone(),
                source,
            })?;
        match output.status.code() {
            Some(0) | Some(1) => Ok(output),
            _ => Err(AnalyzeError::EngineFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

/// Engine backed by an external checker's statistics output.
pub struct CommandEngine {
    command: CheckerCommand,
}

impl CommandEngine {
    pub fn new(command: CheckerCommand) -> Self {
        CommandEngine { command }
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        CommandEngine::new(CheckerCommand::pycodestyle())
    }
}

impl DiagnosticEngine for CommandEngine {
    fn scan(&self, path: &Path) -> Result<Diagnostics> {
        self.command.verify()?;
        let output = self.command.run(&[], path)?;
        let diags = parse_statistics(&String::from_utf8_lossy(&output.stdout));
        info!(
            file = %path.display(),
            codes = diags.counters().len(),
            "diagnostic scan complete"
        );
        Ok(diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pycodestyle_statistics() {
        let text = "3       E501 line too long (88 > 79 characters)\n\
                    1       E302 expected 2 blank lines, found 1\n\
                    12      W191 indentation contains tabs\n";
        let d = parse_statistics(text);
        assert_eq!(d.count("E501"), 3);
        assert_eq!(d.count("E302"), 1);
        assert_eq!(d.count("W191"), 12);
        assert_eq!(d.count("E401"), 0);
        assert_eq!(d.message("E501"), Some("line too long (88 > 79 characters)"));
        assert_eq!(d.message("W191"), Some("indentation contains tabs"));
    }

    #[test]
    fn test_parse_skips_noise_and_flake8_spacing() {
        let text = "\nsome banner\n2     N802 function name 'doIt' should be lowercase\n";
        let d = parse_statistics(text);
        assert_eq!(d.counters().len(), 1);
        assert_eq!(d.count("N802"), 2);
        assert_eq!(d.message("N802"), Some("function name 'doIt' should be lowercase"));
    }

    #[test]
    fn test_fatal_code_detection() {
        let d = parse_statistics("1       E902 FileNotFoundError: [Errno 2] No such file\n");
        let (code, msg) = d.fatal().unwrap();
        assert_eq!(code, "E902");
        assert!(msg.starts_with("FileNotFoundError"));
        assert!(parse_statistics("1       E501 line too long\n").fatal().is_none());
    }

    #[test]
    fn test_missing_program_is_engine_unavailable() {
        let engine = CommandEngine::new(CheckerCommand {
            program: "stylereport-no-such-checker".into(),
            args: vec![],
            requires: None,
        });
        let err = engine.scan(Path::new("x.py")).unwrap_err();
        assert!(matches!(err, AnalyzeError::EngineUnavailable { .. }));
    }

    #[cfg(unix)]
    fn sh(script: &str) -> CommandEngine {
        CommandEngine::new(CheckerCommand {
            program: "sh".into(),
            args: vec!["-c".into(), script.into(), "sh".into()],
            requires: None,
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_one_is_success() {
        let engine = sh("printf '3       E501 line too long (90 > 79 characters)\\n'; exit 1");
        let d = engine.scan(Path::new("x.py")).unwrap();
        assert_eq!(d.count("E501"), 3);
        assert_eq!(d.message("E501"), Some("line too long (90 > 79 characters)"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_zero_with_no_output_is_clean() {
        let d = sh("exit 0").scan(Path::new("x.py")).unwrap();
        assert!(d.counters().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_other_exit_status_is_engine_failed() {
        let err = sh("echo 'usage: checker' >&2; exit 2")
            .scan(Path::new("x.py"))
            .unwrap_err();
        match err {
            AnalyzeError::EngineFailed { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "usage: checker");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_file_path_is_passed_last() {
        let d = sh("printf '1       E501 %s\\n' \"$1\"").scan(Path::new("dir/x.py")).unwrap();
        assert_eq!(d.message("E501"), Some("dir/x.py"));
    }

    #[cfg(unix)]
    #[test]
    fn test_requirement_checked_against_version_banner() {
        let script = "case \"$1\" in --version) echo '6.1.0 (mccabe: 0.7.0) CPython';; esac";
        let mut command = CheckerCommand {
            program: "sh".into(),
            args: vec!["-c".into(), script.into(), "sh".into()],
            requires: Some("pep8-naming".into()),
        };
        let err = command.verify().unwrap_err();
        assert!(matches!(err, AnalyzeError::MissingPlugin { .. }));

        command.requires = Some("mccabe".into());
        assert!(command.verify().is_ok());
        command.requires = None;
        assert!(command.verify().is_ok());
    }
}
