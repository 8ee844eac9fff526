//! Symbol tables for the run code fields
//!
//! Each field of a run code (category, language, severity, output feature)
//! has a fixed, ordered table. A name's position in the table is its bit
//! index inside the field's byte group, so entries may only ever be appended.

/// An ordered, immutable mapping between names and bit indices.
///
/// Indices are contiguous and start at 0.
///
/// # Examples
///
/// ```rust
/// use semgrep_search::runconfig::table::SEVERITIES;
///
/// assert_eq!(SEVERITIES.lookup("ERROR"), Some(4));
/// assert_eq!(SEVERITIES.reverse(2), Some("INFO"));
/// assert_eq!(SEVERITIES.lookup("CRITICAL"), None);
/// ```
#[derive(Debug)]
pub struct EnumTable {
    field: &'static str,
    names: &'static [&'static str],
}

impl EnumTable {
    const fn new(field: &'static str, names: &'static [&'static str]) -> Self {
        Self { field, names }
    }

    /// Name of the field this table belongs to
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Index of `name`, if it is part of the table
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| *candidate == name)
    }

    /// Name stored at `index`, if the table is large enough
    pub fn reverse(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied()
    }

    /// Number of defined names
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Highest defined index
    pub fn max_index(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    /// All names in index order
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

/// Rule categories
pub static CATEGORIES: EnumTable = EnumTable::new(
    "category",
    &[
        "null",
        "best-practice",
        "correctness",
        "maintainability",
        "performance",
        "portability",
        "security",
    ],
);

/// Rule languages (base names, see [`crate::filters::languages`] for aliases)
pub static LANGUAGES: EnumTable = EnumTable::new(
    "language",
    &[
        "apex",
        "bash",
        "c",
        "cairo",
        "clojure",
        "cpp",
        "csharp",
        "dart",
        "dockerfile",
        "ex",
        "generic",
        "go",
        "html",
        "java",
        "js",
        "json",
        "jsonnet",
        "julia",
        "kt",
        "lisp",
        "lua",
        "ocaml",
        "php",
        "python",
        "r",
        "ruby",
        "rust",
        "scala",
        "scheme",
        "solidity",
        "swift",
        "tf",
        "ts",
        "yaml",
        "xml",
    ],
);

/// Rule severities
pub static SEVERITIES: EnumTable = EnumTable::new(
    "severity",
    &["null", "INVENTORY", "INFO", "WARNING", "ERROR"],
);

/// Output features
pub static FEATURES: EnumTable =
    EnumTable::new("feature", &["export_text", "export_json", "export_sarif"]);

/// The four fields of a run code, in canonical wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Category,
    Language,
    Severity,
    Feature,
}

impl Field {
    /// Canonical field order. Never reordered.
    pub const ALL: [Field; 4] = [
        Field::Category,
        Field::Language,
        Field::Severity,
        Field::Feature,
    ];

    /// Table holding this field's names
    pub fn table(self) -> &'static EnumTable {
        match self {
            Field::Category => &CATEGORIES,
            Field::Language => &LANGUAGES,
            Field::Severity => &SEVERITIES,
            Field::Feature => &FEATURES,
        }
    }

    /// Field name as used in messages
    pub fn name(self) -> &'static str {
        self.table().field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(CATEGORIES.size(), 7);
        assert_eq!(LANGUAGES.size(), 35);
        assert_eq!(SEVERITIES.size(), 5);
        assert_eq!(FEATURES.size(), 3);
    }

    #[test]
    fn test_max_index() {
        assert_eq!(CATEGORIES.max_index(), 6);
        assert_eq!(LANGUAGES.max_index(), 34);
        assert_eq!(SEVERITIES.max_index(), 4);
        assert_eq!(FEATURES.max_index(), 2);
    }

    #[test]
    fn test_known_indices() {
        assert_eq!(CATEGORIES.lookup("null"), Some(0));
        assert_eq!(CATEGORIES.lookup("security"), Some(6));
        assert_eq!(LANGUAGES.lookup("apex"), Some(0));
        assert_eq!(LANGUAGES.lookup("python"), Some(23));
        assert_eq!(LANGUAGES.lookup("xml"), Some(34));
        assert_eq!(SEVERITIES.lookup("INVENTORY"), Some(1));
        assert_eq!(FEATURES.lookup("export_json"), Some(1));
        assert_eq!(FEATURES.lookup("export_sarif"), Some(2));
    }

    #[test]
    fn test_lookup_and_reverse_agree() {
        for field in Field::ALL {
            let table = field.table();
            for (index, name) in table.names().iter().enumerate() {
                assert_eq!(table.lookup(name), Some(index), "{}", name);
                assert_eq!(table.reverse(index), Some(*name));
            }
            assert_eq!(table.reverse(table.size()), None);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(SEVERITIES.lookup("error"), None);
        assert_eq!(LANGUAGES.lookup("Python"), None);
    }

    #[test]
    fn test_field_order_and_names() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["category", "language", "severity", "feature"]);
    }
}
