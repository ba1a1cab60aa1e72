//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "stylereport",
    version,
    about = "PEP 8 / Google style compliance report for a Python file",
    long_about = "Stylereport runs a style checker over one file and groups its diagnostics into naming, indentation, tabs vs. spaces, line length, blank line, and import categories.\n\nConfiguration precedence: CLI > stylereport.toml > defaults.",
    after_help = "Examples:\n  stylereport src/app.py\n  stylereport src/app.py --output human\n  RUST_LOG=debug stylereport src/app.py"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Python file to analyze")]
    pub file: String,
    #[arg(long, help = "Output mode: json|human (default: json)")]
    pub output: Option<String>,
    #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, short = 'v', action = clap::ArgAction::SetTrue, help = "Enable info-level logging to stderr")]
    pub verbose: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable debug-level logging to stderr")]
    pub debug: bool,
}
