//! Configuration discovery and effective settings resolution.
//!
//! Stylereport reads `stylereport.toml|yaml|yml` from the start directory
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. A relative start (`--root` or the default `.`) is
//! resolved against the current directory before walking upward.
//! Defaults:
//! - `output`: `json`
//! - `engine`: `pycodestyle --statistics -qq`
//! - `naming`: `flake8 --select=N8 --statistics -qq`, requiring `pep8-naming`
//!   in its version banner (`requires = ""` turns the check off)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::engine::CheckerCommand;
use crate::error::{AnalyzeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const CONFIG_TOML: &str = "stylereport.toml";
const CONFIG_YAML: [&str; 2] = ["stylereport.yaml", "stylereport.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Checker override under `[engine]` or `[naming]`.
pub struct CheckerCfg {
    pub program: Option<String>,
    /// Replaces the default leading arguments when set.
    pub args: Option<Vec<String>>,
    pub requires: Option<String>,
}

impl CheckerCfg {
    fn apply(&self, mut base: CheckerCommand) -> CheckerCommand {
        if let Some(p) = &self.program {
            base.program = p.clone();
        }
        if let Some(a) = &self.args {
            base.args = a.clone();
        }
        if let Some(r) = &self.requires {
            base.requires = Some(r.clone()).filter(|r| !r.is_empty());
        }
        base
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `stylereport.toml|yaml`.
pub struct StyleReportConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub engine: Option<CheckerCfg>,
    #[serde(default)]
    pub naming: Option<CheckerCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub output: String,
    pub engine: CheckerCommand,
    pub naming: CheckerCommand,
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when a `stylereport.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| cur.join(y).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AnalyzeError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// Load `StyleReportConfig` from `stylereport.toml` or `stylereport.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<StyleReportConfig>> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|e| AnalyzeError::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %toml_path.display(), "config loaded");
        return Ok(Some(cfg));
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s).map_err(|e| AnalyzeError::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            debug!(path = %p.display(), "config loaded");
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli_root: Option<&str>, cli_output: Option<&str>) -> Result<Effective> {
    let cwd = std::env::current_dir().map_err(|source| AnalyzeError::Io {
        source,
        path: PathBuf::from("."),
    })?;
    resolve_effective_from(&cwd, cli_root, cli_output)
}

/// Same as [`resolve_effective`], with a relative `cli_root` taken from `base`.
pub fn resolve_effective_from(
    base: &Path,
    cli_root: Option<&str>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let joined = match cli_root {
        Some(r) => base.join(r),
        None => base.to_path_buf(),
    };
    // `a/b/.` would otherwise have `a` as its parent and skip `b`.
    let start: PathBuf = joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let root = detect_root(&start);
    debug!(start = %start.display(), root = %root.display(), "config root resolved");
    let cfg = load_config(&root)?.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "json".to_string());

    let engine = cfg
        .engine
        .unwrap_or_default()
        .apply(CheckerCommand::pycodestyle());
    let naming = cfg
        .naming
        .unwrap_or_default()
        .apply(CheckerCommand::flake8_naming());

    Ok(Effective {
        output,
        engine,
        naming,
    })
}
