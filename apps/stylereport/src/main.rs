//! Stylereport CLI binary entry point.
//! Resolves configuration, analyzes the file, and prints the report.

use clap::Parser;
use stylereport::cli::Cli;
use stylereport::engine::CommandEngine;
use stylereport::naming::CommandNamingChecker;
use stylereport::{config, output, utils};
use tracing::debug;

/// Initialize tracing based on CLI flags; `RUST_LOG` takes precedence.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
    debug!("Logging initialized at level: {}", level);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let eff = match config::resolve_effective(cli.root.as_deref(), cli.output.as_deref()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    if eff.output != "json" && eff.output != "human" {
        eprintln!(
            "{} unknown output mode '{}'; using json",
            utils::note_prefix(),
            eff.output
        );
    }

    let engine = CommandEngine::new(eff.engine.clone());
    let mut naming = CommandNamingChecker::new(eff.naming.clone());
    let analysis = match stylereport::run(&cli.file, &engine, &mut naming) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    if let Err(e) = output::print_report(&analysis.report, &analysis.diagnostics, &eff.output) {
        eprintln!("{} {}", utils::error_prefix(), e);
        std::process::exit(2);
    }
}
