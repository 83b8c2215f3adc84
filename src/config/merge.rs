//! Configuration merging
//!
//! Later operands take precedence. A handful of fields accumulate instead of
//! being replaced: sequences concatenate in precedence order and `sort_rules`
//! is unioned key by key. An absent field never overwrites a present one.

use super::types::{Configuration, SortRules};

/// Fold configurations left to right, highest precedence last.
///
/// Each field follows a declared strategy:
/// - scalar fields: the later present value wins;
/// - `exclude`, `exclude_glob`, `keep_unused`: earlier ++ later;
/// - `sort_rules`: key union, later value wins per key.
pub fn merge_config<I>(configs: I) -> Configuration
where
    I: IntoIterator<Item = Configuration>,
{
    configs.into_iter().fold(Configuration::default(), merge_two)
}

fn merge_two(earlier: Configuration, later: Configuration) -> Configuration {
    Configuration {
        configuration_file_name: later
            .configuration_file_name
            .or(earlier.configuration_file_name),
        root: later.root.or(earlier.root),
        max_line_length: later.max_line_length.or(earlier.max_line_length),
        tab_size: later.tab_size.or(earlier.tab_size),
        insert_final_newline: later.insert_final_newline.or(earlier.insert_final_newline),
        eol: later.eol.or(earlier.eol),
        exclude: concat(earlier.exclude, later.exclude),
        exclude_glob: concat(earlier.exclude_glob, later.exclude_glob),
        keep_unused: concat(earlier.keep_unused, later.keep_unused),
        sort_rules: union(earlier.sort_rules, later.sort_rules),
    }
}

fn concat(earlier: Option<Vec<String>>, later: Option<Vec<String>>) -> Option<Vec<String>> {
    match (earlier, later) {
        (Some(mut a), Some(b)) => {
            a.extend(b);
            Some(a)
        }
        (a, None) => a,
        (None, b) => b,
    }
}

fn union(earlier: Option<SortRules>, later: Option<SortRules>) -> Option<SortRules> {
    match (earlier, later) {
        (Some(a), Some(b)) => Some(SortRules {
            paths: b.paths.or(a.paths),
            names: b.names.or(a.names),
        }),
        (a, None) => a,
        (None, b) => b,
    }
}
