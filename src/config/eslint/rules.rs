//! Rule translators
//!
//! Each translator maps one ESLint rule's raw configuration into a
//! configuration delta. Deltas merge on top of the rest of the precedence
//! chain, so an active rule always wins. Adding support for a rule means
//! adding a row to [`TRANSLATORS`]; the merge logic is untouched.

use serde::Deserialize;

use super::{extract_options, Rules};
use crate::config::merge::merge_config;
use crate::config::types::Configuration;

/// Outcome of one translator run.
#[derive(Debug, Default)]
pub struct Translation {
    /// Configuration fields derived from the rule. Empty when inactive.
    pub delta: Configuration,
    /// Whether the rule was explicitly configured and enabled.
    pub active: bool,
}

impl Translation {
    fn inactive() -> Self {
        Self::default()
    }

    fn delta(delta: Configuration) -> Self {
        Self {
            delta,
            active: true,
        }
    }
}

/// A translator consumes the merged rule mapping and yields a delta.
pub type Translator = fn(&Rules) -> Translation;

/// Registered translators, applied in order.
pub const TRANSLATORS: &[(&str, Translator)] = &[
    ("eol-last", eol_last),
    ("indent", indent),
    ("max-len", max_len),
];

/// Apply every registered translator on top of `config`.
///
/// Returns the enhanced configuration and the names of the rules that were
/// active. Inactive translators contribute no delta and leave the merge
/// unaffected.
pub fn apply_translators(config: Configuration, rules: &Rules) -> (Configuration, Vec<&'static str>) {
    let mut merged = config;
    let mut active = vec![];
    for (name, translate) in TRANSLATORS {
        let translation = translate(rules);
        if translation.active {
            merged = merge_config([merged, translation.delta]);
            active.push(*name);
        }
    }
    (merged, active)
}

/// `eol-last`: `"never"` forbids the final newline, anything else
/// (including the default `"always"`) requires it.
fn eol_last(rules: &Rules) -> Translation {
    let Some(option) = extract_options(rules, "eol-last", "always".to_string()) else {
        return Translation::inactive();
    };
    Translation::delta(Configuration {
        insert_final_newline: Some(option != "never"),
        ..Default::default()
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndentOption {
    Spaces(usize),
    Keyword(String),
}

/// `indent`: a numeric option sets the tab size; `"tab"` has no
/// counterpart in our vocabulary and contributes nothing.
fn indent(rules: &Rules) -> Translation {
    let Some(option) = extract_options(rules, "indent", IndentOption::Spaces(4)) else {
        return Translation::inactive();
    };
    match option {
        IndentOption::Spaces(n) => Translation::delta(Configuration {
            tab_size: Some(n),
            ..Default::default()
        }),
        IndentOption::Keyword(_) => Translation::delta(Configuration::default()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaxLenOption {
    Length(usize),
    Detailed { code: Option<usize> },
}

/// `max-len`: a bare number or a `{"code": n}` object sets the maximum
/// line length; ESLint's default of 80 applies otherwise.
fn max_len(rules: &Rules) -> Translation {
    let Some(option) = extract_options(rules, "max-len", MaxLenOption::Length(80)) else {
        return Translation::inactive();
    };
    let length = match option {
        MaxLenOption::Length(n) => n,
        MaxLenOption::Detailed { code } => code.unwrap_or(80),
    };
    Translation::delta(Configuration {
        max_line_length: Some(length),
        ..Default::default()
    })
}
