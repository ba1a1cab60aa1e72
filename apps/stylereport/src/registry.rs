//! Fixed diagnostic categories and the codes each one aggregates.
//!
//! The code sets are pairwise disjoint and listed in the order breakdowns
//! are reported in.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Report categories, in report order.
pub enum Category {
    Naming,
    Indentation,
    TabsVsSpaces,
    LineLength,
    BlankLines,
    Import,
    FileEncoding,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Naming,
        Category::Indentation,
        Category::TabsVsSpaces,
        Category::LineLength,
        Category::BlankLines,
        Category::Import,
        Category::FileEncoding,
    ];

    /// Short name used to build report keys.
    pub fn name(self) -> &'static str {
        match self {
            Category::Naming => "naming",
            Category::Indentation => "indentation",
            Category::TabsVsSpaces => "tabs_vs_spaces",
            Category::LineLength => "line_length",
            Category::BlankLines => "blank_lines",
            Category::Import => "import",
            Category::FileEncoding => "file_encoding",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
/// A category backed by a fixed set of engine codes.
pub struct CategoryDef {
    pub category: Category,
    pub codes: &'static [&'static str],
    /// Section header used by the human summary.
    pub header: &'static str,
    /// Subject of the "no violations" sentence.
    pub clean: &'static str,
}

impl CategoryDef {
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&code)
    }
}

pub const INDENTATION: CategoryDef = CategoryDef {
    category: Category::Indentation,
    codes: &[
        "E111", "E112", "E113", "E121", "E122", "E123", "E124", "E125", "E126", "E127", "E128",
        "E129", "E131", "E133",
    ],
    header: "Indentation",
    clean: "Indentations of",
};

pub const TABS_VS_SPACES: CategoryDef = CategoryDef {
    category: Category::TabsVsSpaces,
    codes: &["E101", "E223", "E224", "E242", "E273", "E274", "W191"],
    header: "Tabs vs. Spaces",
    clean: "Space-indented",
};

pub const LINE_LENGTH: CategoryDef = CategoryDef {
    category: Category::LineLength,
    codes: &["E501"],
    header: "Line Length",
    clean: "Line length of",
};

pub const BLANK_LINES: CategoryDef = CategoryDef {
    category: Category::BlankLines,
    codes: &["E301", "E302", "E303", "E304", "E305", "E306"],
    header: "Blank Line",
    clean: "Blank line",
};

pub const IMPORT: CategoryDef = CategoryDef {
    category: Category::Import,
    codes: &["E401", "E402"],
    header: "Import Statement",
    clean: "Import",
};

/// Code-set categories aggregated from engine counters, in report order.
pub const CODE_SET_CATEGORIES: [CategoryDef; 5] =
    [INDENTATION, TABS_VS_SPACES, LINE_LENGTH, BLANK_LINES, IMPORT];

/// pep8-naming codes used by the bundled naming checker.
pub const NAMING_CODES: &[&str] = &[
    "N801", "N802", "N803", "N804", "N805", "N806", "N807", "N811", "N812", "N813", "N814",
    "N815", "N816", "N817", "N818",
];

/// Engine codes that mean the file could not be checked at all.
pub const FATAL_CODES: &[&str] = &["E901", "E902"];
