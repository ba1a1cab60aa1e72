use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("That is not a valid file name. Please double-check your input.")]
    InvalidFileName { input: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not run '{program}': {source}")]
    EngineUnavailable {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' failed ({status}): {stderr}")]
    EngineFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{program} --version' does not mention '{plugin}'; is it installed?")]
    MissingPlugin { program: String, plugin: String },

    #[error("{code} {message}")]
    EngineFatal { code: String, message: String },

    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
