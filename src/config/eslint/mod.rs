//! ESLint rule configuration: discovery, severity decoding, and the generic
//! option extraction shared by all rule translators.

pub mod rules;

use std::collections::HashMap;
use std::fs;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::path::{ancestors_of, is_regular_file, join};

/// Merged `{rule name → raw rule value}` mapping for one source file.
pub type Rules = HashMap<String, Value>;

const CONFIG_FILE_NAMES: &[&str] = &[".eslintrc.json", ".eslintrc"];

/// ESLint rules applying to `path`.
///
/// Config files are collected upward from the file's directory; the nearest
/// file wins per rule key and the search stops at a file that sets ESLint's
/// own `"root": true`. Unreadable or malformed files contribute nothing
/// beyond a warning.
pub fn load_eslint_rules(path: &str, warnings: &mut Vec<String>) -> Rules {
    let mut rules = Rules::new();
    for file in config_files(path) {
        let Some(doc) = read_json(&file, warnings) else {
            continue;
        };
        if let Some(Value::Object(map)) = doc.get("rules") {
            for (name, value) in map {
                rules.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
        if doc.get("root") == Some(&Value::Bool(true)) {
            break;
        }
    }
    rules
}

fn config_files(path: &str) -> Vec<String> {
    let mut files = vec![];
    for dir in ancestors_of(path) {
        for name in CONFIG_FILE_NAMES {
            let candidate = join(&dir, name);
            if is_regular_file(&candidate) {
                files.push(candidate);
            }
        }
    }
    files
}

fn read_json(file: &str, warnings: &mut Vec<String>) -> Option<Value> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warnings.push(format!("failed to read \"{file}\": {e}"));
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warnings.push(format!("failed to parse \"{file}\": {e}"));
            None
        }
    }
}

/// One rule's configured state, decoded from the raw shapes ESLint accepts:
/// a bare severity token, or an array of severity plus options.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleState<'a> {
    Disabled,
    EnabledWithDefault,
    EnabledWithOptions(&'a Value),
}

/// Decode the raw value for `rule_name`. Absent rules, `"off"`/`0`
/// severities, and unrecognized severity shapes all read as disabled.
pub fn rule_state<'a>(rules: &'a Rules, rule_name: &str) -> RuleState<'a> {
    let Some(raw) = rules.get(rule_name) else {
        return RuleState::Disabled;
    };
    match raw {
        Value::Array(parts) => {
            if !parts.first().is_some_and(severity_enables) {
                return RuleState::Disabled;
            }
            match parts.get(1) {
                Some(options) => RuleState::EnabledWithOptions(options),
                None => RuleState::EnabledWithDefault,
            }
        }
        value if severity_enables(value) => RuleState::EnabledWithDefault,
        _ => RuleState::Disabled,
    }
}

fn severity_enables(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_u64().is_some_and(|n| n == 1 || n == 2),
        Value::String(s) => s == "warn" || s == "error",
        _ => false,
    }
}

/// Options for `rule_name`, or `None` when the rule is absent or off.
///
/// A bare enabled severity yields `default_options`. A malformed options
/// value also falls back to `default_options` instead of failing.
pub fn extract_options<T>(rules: &Rules, rule_name: &str, default_options: T) -> Option<T>
where
    T: DeserializeOwned,
{
    match rule_state(rules, rule_name) {
        RuleState::Disabled => None,
        RuleState::EnabledWithDefault => Some(default_options),
        RuleState::EnabledWithOptions(value) => {
            Some(serde_json::from_value(value.clone()).unwrap_or(default_options))
        }
    }
}
