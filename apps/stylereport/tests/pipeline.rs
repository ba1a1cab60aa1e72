use std::path::Path;

use stylereport::engine::{parse_statistics, DiagnosticEngine, Diagnostics};
use stylereport::naming::NamingChecker;
use stylereport::output::compose_report_json;
use stylereport::registry::{Category, CODE_SET_CATEGORIES};
use stylereport::{
    analyze_file, run, AnalyzeError, CategoryAnalysis, CategoryResult, ErrorBreakdown,
    RawCounters, Report, Result,
};
use tempfile::TempDir;

struct FakeEngine {
    stats: &'static str,
}

impl DiagnosticEngine for FakeEngine {
    fn scan(&self, _path: &Path) -> Result<Diagnostics> {
        Ok(parse_statistics(self.stats))
    }
}

struct FakeNaming {
    result: CategoryResult,
    errors: u64,
    calls: usize,
    cleanups: usize,
}

impl FakeNaming {
    fn clean() -> Self {
        FakeNaming {
            result: CategoryResult::compliant(),
            errors: 0,
            calls: 0,
            cleanups: 0,
        }
    }
}

impl NamingChecker for FakeNaming {
    fn naming_results(&mut self, _path: &Path) -> Result<(CategoryResult, u64)> {
        self.calls += 1;
        Ok((self.result.clone(), self.errors))
    }

    fn cleanup(&mut self) {
        self.cleanups += 1;
    }
}

fn python_file(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, "import os, sys\n").unwrap();
    let s = path.to_string_lossy().to_string();
    (dir, s)
}

fn result(a: &CategoryAnalysis) -> &CategoryResult {
    a.result().expect("category was checked")
}

fn assert_total_matches_breakdowns(report: &Report) {
    let sum: u64 = report.analyses().iter().map(|(_, a)| a.error_total()).sum();
    assert_eq!(report.total_error_count, sum);
}

#[test]
fn clean_file_reports_every_category_compliant() {
    let (_dir, file) = python_file("clean.py");
    let mut naming = FakeNaming::clean();
    let analysis = run(&file, &FakeEngine { stats: "" }, &mut naming).unwrap();
    let report = analysis.report;

    assert_eq!(report.total_error_count, 0);
    for (category, a) in report.analyses() {
        if category == Category::FileEncoding {
            assert_eq!(*a, CategoryAnalysis::NotSupported);
        } else {
            assert_eq!(*result(a), CategoryResult::compliant(), "{category}");
        }
    }
    assert_eq!(naming.calls, 1);
    assert_eq!(naming.cleanups, 1);
}

#[test]
fn single_line_length_violation() {
    let (_dir, file) = python_file("long.py");
    let engine = FakeEngine {
        stats: "3       E501 line too long (120 > 79 characters)\n",
    };
    let report = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;

    let length = result(&report.line_length_analysis);
    assert_eq!(length.pep, Some(false));
    assert_eq!(length.google, Some(false));
    assert_eq!(length.errors.as_ref().unwrap().get("E501"), Some(3));
    assert_eq!(length.errors.as_ref().unwrap().len(), 1);
    for (category, a) in report.analyses() {
        match category {
            Category::LineLength => {}
            Category::FileEncoding => assert_eq!(*a, CategoryAnalysis::NotSupported),
            _ => assert_eq!(*result(a), CategoryResult::compliant(), "{category}"),
        }
    }
    assert_eq!(report.failing(), vec![Category::LineLength]);
    assert_eq!(report.total_error_count, 3);
    assert_total_matches_breakdowns(&report);
}

#[test]
fn violations_across_two_categories() {
    let (_dir, file) = python_file("mixed.py");
    let engine = FakeEngine {
        stats: "1       E501 line too long (80 > 79 characters)\n\
                2       E401 multiple imports on one line\n",
    };
    let report = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;

    assert_eq!(report.total_error_count, 3);
    assert_eq!(
        report.failing(),
        vec![Category::LineLength, Category::Import]
    );
}

#[test]
fn naming_result_is_trusted_and_counted() {
    let (_dir, file) = python_file("names.py");
    let mut breakdown = ErrorBreakdown::default();
    breakdown.push("N801", 1);
    breakdown.push("N806", 4);
    let mut naming = FakeNaming {
        result: CategoryResult {
            pep: Some(false),
            google: Some(false),
            errors: Some(breakdown),
        },
        errors: 5,
        calls: 0,
        cleanups: 0,
    };
    let engine = FakeEngine {
        stats: "2       E302 expected 2 blank lines, found 1\n",
    };
    let report = run(&file, &engine, &mut naming).unwrap().report;
    assert_eq!(report.total_error_count, 7);
    assert_eq!(result(&report.naming_analysis).errors.as_ref().unwrap().get("N806"), Some(4));
    assert_total_matches_breakdowns(&report);
    assert_eq!(naming.cleanups, 1);
}

#[test]
fn breakdown_uses_definition_order_not_engine_order() {
    let (_dir, file) = python_file("indent.py");
    let engine = FakeEngine {
        stats: "1       E131 continuation line unaligned for hanging indent\n\
                4       E128 continuation line under-indented for visual indent\n\
                2       E111 indentation is not a multiple of 4\n",
    };
    let report = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;
    let json = compose_report_json(&report).unwrap();
    assert!(json.contains(r#""indentation_analysis":{"pep":false,"google":false,"errors":{"E111":2,"E128":4,"E131":1}}"#));
}

#[test]
fn repeated_runs_serialize_identically() {
    let (_dir, file) = python_file("same.py");
    let engine = FakeEngine {
        stats: "1       E101 indentation contains mixed spaces and tabs\n\
                1       W191 indentation contains tabs\n\
                2       E303 too many blank lines (3)\n\
                1       E402 module level import not at top of file\n",
    };
    let first = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;
    let second = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;
    assert_eq!(
        compose_report_json(&first).unwrap(),
        compose_report_json(&second).unwrap()
    );
}

#[test]
fn flags_agree_across_guides_for_every_category() {
    let (_dir, file) = python_file("agree.py");
    let engine = FakeEngine {
        stats: "1       E113 unexpected indentation\n\
                5       E224 tab after operator\n",
    };
    let report = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;
    for (_, a) in report.analyses() {
        if let Some(r) = a.result() {
            assert_eq!(r.pep, r.google);
            assert_eq!(r.errors.is_none(), r.is_compliant());
        }
    }
    assert_eq!(report.total_error_count, 6);
}

#[test]
fn unknown_codes_do_not_count() {
    let (_dir, file) = python_file("other.py");
    let engine = FakeEngine {
        stats: "3       W291 trailing whitespace\n\
                1       E231 missing whitespace after ','\n",
    };
    let report = run(&file, &engine, &mut FakeNaming::clean()).unwrap().report;
    assert_eq!(report.total_error_count, 0);
    for def in CODE_SET_CATEGORIES.iter() {
        assert!(!def.contains("W291"));
    }
}

#[test]
fn file_name_with_space_passes_validation() {
    let (_dir, file) = python_file("my file.py");
    let analysis = run(&file, &FakeEngine { stats: "" }, &mut FakeNaming::clean());
    assert!(analysis.is_ok());
}

#[test]
fn file_name_with_tab_is_rejected_before_analysis() {
    let mut naming = FakeNaming::clean();
    let err = run("my\tfile.py", &FakeEngine { stats: "" }, &mut naming).unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidFileName { .. }));
    assert_eq!(
        err.to_string(),
        "That is not a valid file name. Please double-check your input."
    );
    assert_eq!(naming.calls, 0);
}

#[test]
fn missing_file_is_not_reported_as_compliant() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.py");
    let mut naming = FakeNaming::clean();
    let err = analyze_file(&missing, &FakeEngine { stats: "" }, &mut naming).unwrap_err();
    assert!(matches!(err, AnalyzeError::FileNotFound(_)));
    assert_eq!(naming.calls, 0);
    assert_eq!(naming.cleanups, 0);
}

#[test]
fn fatal_engine_diagnostic_is_an_error() {
    let (_dir, file) = python_file("broken.py");
    let engine = FakeEngine {
        stats: "1       E901 SyntaxError: invalid syntax\n\
                2       E501 line too long (90 > 79 characters)\n",
    };
    let err = run(&file, &engine, &mut FakeNaming::clean()).unwrap_err();
    match err {
        AnalyzeError::EngineFatal { code, message } => {
            assert_eq!(code, "E901");
            assert_eq!(message, "SyntaxError: invalid syntax");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_counts_from_engine_are_ignored() {
    let counters: RawCounters = [("E501".to_string(), 0)].into_iter().collect();
    let report = stylereport::build_report(
        Path::new("x.py"),
        &counters,
        &mut FakeNaming::clean(),
    )
    .unwrap();
    assert!(result(&report.line_length_analysis).is_compliant());
    assert_eq!(report.total_error_count, 0);
}
