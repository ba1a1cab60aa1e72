//! Output rendering for analysis results.
//!
//! Supports `json` (default, one compact line) and `human`, a per-category
//! summary of the engine diagnostics. Naming has its own presentation and is
//! not part of the human summary.

use crate::engine::Diagnostics;
use crate::error::Result;
use crate::models::Report;
use crate::registry::CODE_SET_CATEGORIES;
use owo_colors::OwoColorize;
use std::fmt::Write;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Compose the report JSON (pure) as a single line.
pub fn compose_report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

/// Render the human summary (pure) for the code-set categories.
pub fn render_summary(diags: &Diagnostics, color: bool) -> String {
    let mut out = String::new();
    for def in CODE_SET_CATEGORIES.iter() {
        let header = format!("{} Errors:", def.header);
        if color {
            let _ = writeln!(out, "{}", header.bold());
        } else {
            let _ = writeln!(out, "{}", header);
        }
        let mut has_errs = false;
        for code in def.codes {
            let count = diags.count(code);
            if count == 0 {
                continue;
            }
            has_errs = true;
            let plural = if count > 1 { "s" } else { "" };
            let msg = diags.message(code).unwrap_or("");
            let code_str = if color {
                code.red().to_string()
            } else {
                code.to_string()
            };
            let _ = writeln!(out, "    {}, {} occurrence{}: {}", code_str, count, plural, msg);
        }
        if !has_errs {
            let _ = writeln!(
                out,
                "    None. {} statements conform to PEP 8.",
                def.clean
            );
        }
    }
    out
}

/// Closing line of the human summary: total and the non-compliant categories.
pub fn render_footer(report: &Report) -> String {
    let failing: Vec<&str> = report.failing().into_iter().map(|c| c.name()).collect();
    let failing = if failing.is_empty() {
        "none".to_string()
    } else {
        failing.join(",")
    };
    format!(
        "— Summary — total_errors={} failing={}",
        report.total_error_count, failing
    )
}

/// Print the analysis in the requested format.
pub fn print_report(report: &Report, diags: &Diagnostics, output: &str) -> Result<()> {
    match output {
        "human" => {
            let color = use_colors(output);
            print!("{}", render_summary(diags, color));
            let summary = render_footer(report);
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
        _ => println!("{}", compose_report_json(report)?),
    }
    Ok(())
}
