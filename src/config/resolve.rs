//! Per-file configuration resolution.
//!
//! One resolution is a pure function of the file path, the caller's base
//! configuration, and filesystem state at call time; nothing is cached
//! between invocations, so callers may resolve many files concurrently.

use std::fs;

use globset::Glob;
use regex::Regex;

use super::editorconfig::editor_settings_config;
use super::eol::{detect_eol, enhance_eol};
use super::eslint::load_eslint_rules;
use super::eslint::rules::apply_translators;
use super::json_file::{file_config, ConfigError, DEFAULT_CONFIG_FILE_NAME};
use super::merge::merge_config;
use super::package_json::package_config;
use super::prettier::prettier_config;
use super::types::Configuration;

/// A fully resolved configuration plus resolution context.
#[derive(Debug, Default)]
pub struct ResolvedConfig {
    pub config: Configuration,
    /// ESLint rules that contributed a delta.
    pub active_rules: Vec<&'static str>,
    /// Non-fatal degradations encountered along the way.
    pub warnings: Vec<String>,
}

/// Resolve the effective configuration for one source file.
///
/// Sources merge from low to high precedence: the caller's base config,
/// `.editorconfig`, Prettier, the dedicated JSON config file(s), the
/// `package.json` section, and finally ESLint rule deltas. Line-ending
/// detection from actual file content fills `eol` only when no source set
/// it. Problems in the dedicated config file abort resolution for this
/// file; everything else degrades to a warning.
pub fn resolve_config_for_file(
    path: &str,
    base_config: &Configuration,
) -> Result<ResolvedConfig, ConfigError> {
    let mut warnings = vec![];

    let editor = editor_settings_config(path, &mut warnings);
    let prettier = prettier_config(path, &mut warnings);
    let file_name = base_config
        .configuration_file_name
        .as_deref()
        .unwrap_or(DEFAULT_CONFIG_FILE_NAME);
    let dedicated = file_config(file_name, path)?;
    let manifest = package_config(path, &mut warnings);

    let merged = merge_config([
        base_config.clone(),
        editor,
        prettier,
        dedicated,
        manifest,
    ]);

    let rules = load_eslint_rules(path, &mut warnings);
    let (config, active_rules) = apply_translators(merged, &rules);

    let config = enhance_eol(config, || {
        detect_eol(&fs::read_to_string(path).unwrap_or_default()).to_string()
    });

    Ok(ResolvedConfig {
        config,
        active_rules,
        warnings,
    })
}

/// True when `path` matches any of the configuration's exclusion patterns.
///
/// `exclude` entries are regular expressions tried against the path both as
/// given and with separators normalized to `/`; `exclude_glob` entries are
/// globs tried against the normalized form. Patterns that fail to compile
/// are skipped.
pub fn is_file_excluded_by_config(path: &str, config: &Configuration) -> bool {
    let normalized = path.replace('\\', "/");

    for pattern in config.exclude.iter().flatten() {
        if let Ok(re) = Regex::new(pattern) {
            if re.is_match(path) || re.is_match(&normalized) {
                return true;
            }
        }
    }

    for pattern in config.exclude_glob.iter().flatten() {
        if let Ok(glob) = Glob::new(pattern) {
            if glob.compile_matcher().is_match(&normalized) {
                return true;
            }
        }
    }

    false
}
