//! The configuration vocabulary shared by every source loader.
//!
//! Every field is optional: an absent field is not the same as `false` or an
//! empty list, and never overwrites a value contributed by another source.

use serde::{Deserialize, Serialize};

use super::eol::EolKind;

/// Formatting options resolved for one source file.
///
/// Scalar fields are replaced wholesale when a higher-precedence source sets
/// them; `exclude`, `exclude_glob` and `keep_unused` accumulate across
/// sources, and `sort_rules` is unioned key by key. See
/// [`merge_config`](super::merge_config) for the exact per-field strategy.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Name of the dedicated JSON config file to search for.
    pub configuration_file_name: Option<String>,

    /// Stops the upward directory search for layered sources at this level.
    pub root: Option<bool>,

    /// Maximum line length before named imports are wrapped.
    pub max_line_length: Option<usize>,

    /// Indentation width for wrapped import lines.
    pub tab_size: Option<usize>,

    /// Whether the output ends with a newline.
    pub insert_final_newline: Option<bool>,

    /// Line-ending style for the output.
    pub eol: Option<EolKind>,

    /// Regular expressions matched against file paths to exclude.
    pub exclude: Option<Vec<String>>,

    /// Glob patterns matched against file paths to exclude.
    pub exclude_glob: Option<Vec<String>>,

    /// Module patterns whose imports are kept even when unused.
    pub keep_unused: Option<Vec<String>>,

    /// How import paths and names are ordered.
    pub sort_rules: Option<SortRules>,
}

/// Sort order definitions, unioned key by key across sources.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortRules {
    /// Order of module specifiers between import statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<SegmentOrder>,

    /// Order of bound names inside an import statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<SegmentOrder>,
}

/// One sort-rule value: either the keyword `"none"` (keep original order) or
/// a list of segment tokens such as `["_", "aA"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentOrder {
    Keyword(String),
    Segments(Vec<String>),
}

impl SegmentOrder {
    /// True for the `"none"` keyword: contributions in original order.
    pub fn is_unsorted(&self) -> bool {
        matches!(self, SegmentOrder::Keyword(k) if k == "none")
    }

    /// True when the rule asks for case-sensitive, capitals-first ordering.
    pub fn is_case_sensitive(&self) -> bool {
        match self {
            SegmentOrder::Keyword(_) => false,
            SegmentOrder::Segments(segments) => segments
                .iter()
                .find(|s| matches!(s.as_str(), "AZ" | "az" | "aA"))
                .is_some_and(|s| s == "AZ"),
        }
    }
}
