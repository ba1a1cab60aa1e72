//! Shared data models for category results and the per-file report.
//!
//! Guide A is PEP 8 (serialized as `pep`), guide B is the Google Python
//! style guide (serialized as `google`).

use crate::registry::Category;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Occurrence count per diagnostic code for one scanned file.
///
/// Codes absent from the map count as zero.
pub type RawCounters = HashMap<String, u64>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-code error counts, kept in the category's definition order.
pub struct ErrorBreakdown(Vec<(String, u64)>);

impl ErrorBreakdown {
    pub fn push(&mut self, code: impl Into<String>, count: u64) {
        self.0.push((code.into(), count));
    }

    pub fn get(&self, code: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, count)| *count)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }

    /// Sum of the counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(*count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ErrorBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, count) in &self.0 {
            map.serialize_entry(code, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Compliance of one category under both guide profiles.
///
/// `errors` is `None` exactly when both flags are `Some(true)`.
pub struct CategoryResult {
    pub pep: Option<bool>,
    pub google: Option<bool>,
    pub errors: Option<ErrorBreakdown>,
}

impl CategoryResult {
    /// A category with no violations under either guide.
    pub fn compliant() -> Self {
        CategoryResult {
            pep: Some(true),
            google: Some(true),
            errors: None,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.pep == Some(true) && self.google == Some(true)
    }

    /// Sum of the breakdown counts; zero when compliant.
    pub fn error_total(&self) -> u64 {
        self.errors.as_ref().map_or(0, ErrorBreakdown::total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
/// Outcome of a category slot in the report.
///
/// `NotSupported` marks a category that was never analyzed and serializes
/// as `null`, so it cannot be confused with a pass.
pub enum CategoryAnalysis {
    Checked(CategoryResult),
    NotSupported,
}

impl CategoryAnalysis {
    pub fn result(&self) -> Option<&CategoryResult> {
        match self {
            CategoryAnalysis::Checked(r) => Some(r),
            CategoryAnalysis::NotSupported => None,
        }
    }

    pub fn error_total(&self) -> u64 {
        self.result().map_or(0, CategoryResult::error_total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Structured compliance report for a single file.
pub struct Report {
    pub naming_analysis: CategoryAnalysis,
    pub indentation_analysis: CategoryAnalysis,
    pub tabs_vs_spaces_analysis: CategoryAnalysis,
    pub line_length_analysis: CategoryAnalysis,
    pub blank_lines_analysis: CategoryAnalysis,
    pub import_analysis: CategoryAnalysis,
    pub file_encoding_analysis: CategoryAnalysis,
    pub total_error_count: u64,
}

impl Report {
    /// The slot serialized as `<category>_analysis`.
    pub fn analysis(&self, category: Category) -> &CategoryAnalysis {
        match category {
            Category::Naming => &self.naming_analysis,
            Category::Indentation => &self.indentation_analysis,
            Category::TabsVsSpaces => &self.tabs_vs_spaces_analysis,
            Category::LineLength => &self.line_length_analysis,
            Category::BlankLines => &self.blank_lines_analysis,
            Category::Import => &self.import_analysis,
            Category::FileEncoding => &self.file_encoding_analysis,
        }
    }

    /// All category slots in serialization order.
    pub fn analyses(&self) -> [(Category, &CategoryAnalysis); 7] {
        Category::ALL.map(|category| (category, self.analysis(category)))
    }

    /// Categories that were checked and found non-compliant.
    pub fn failing(&self) -> Vec<Category> {
        self.analyses()
            .into_iter()
            .filter(|(_, a)| a.result().map_or(false, |r| !r.is_compliant()))
            .map(|(category, _)| category)
            .collect()
    }
}
