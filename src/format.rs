//! Line-based import-statement formatting.
//!
//! The formatter collects the leading block of import statements, sorts and
//! merges them under the resolved configuration, and re-emits the file with
//! the configured line endings. It is deliberately conservative: anything it
//! cannot parse with confidence leaves the import block untouched.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{Configuration, EolKind, SegmentOrder};

const DEFAULT_MAX_LINE_LENGTH: usize = 80;
const DEFAULT_TAB_SIZE: usize = 2;

// Joined statements longer than this are assumed to be a parse gone wrong.
const MAX_JOINED_STATEMENT_LEN: usize = 4096;

/// File types the formatter understands.
pub fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts" | "tsx" | "js" | "jsx" | "mts" | "cts" | "mjs" | "cjs")
    )
}

/// Format `source` under `config`.
///
/// Returns `None` when the file is already formatted, otherwise the full
/// rewritten text. Side-effect imports keep their relative order ahead of
/// bindable imports; duplicate named imports from one module merge into a
/// single statement; statements longer than the maximum line length are
/// wrapped one name per line. The configured line-ending style applies to
/// the whole output, and `insert_final_newline` (default true) leaves
/// exactly one trailing newline.
pub fn format_source(source: &str, config: &Configuration) -> Option<String> {
    if source.is_empty() {
        return None;
    }
    let content = source.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = content.split('\n').collect();

    let start = preamble_end(&lines);
    let mut output: Vec<String>;

    match collect_import_block(&lines, start) {
        Some(block) => {
            output = lines[..start].iter().map(|l| l.to_string()).collect();
            let statements = arrange(block.statements, config);
            let max_len = config.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH);
            let tab_size = config.tab_size.unwrap_or(DEFAULT_TAB_SIZE);
            for stmt in &statements {
                render(stmt, max_len, tab_size, &mut output);
            }

            // Exactly one blank line between imports and what follows.
            let mut rest = &lines[block.end..];
            while rest.first().is_some_and(|l| l.trim().is_empty()) {
                rest = &rest[1..];
            }
            if !rest.is_empty() {
                output.push(String::new());
                output.extend(rest.iter().map(|l| l.to_string()));
            }
        }
        None => {
            output = lines.iter().map(|l| l.to_string()).collect();
        }
    }

    while output.last().is_some_and(|l| l.is_empty()) {
        output.pop();
    }
    let eol = config.eol.unwrap_or(EolKind::LF).as_str();
    let mut text = output.join(eol);
    if config.insert_final_newline.unwrap_or(true) && !text.is_empty() {
        text.push_str(eol);
    }

    if text == source {
        None
    } else {
        Some(text)
    }
}

/// Lines before the first statement: blank lines and comments are preamble
/// and are preserved verbatim.
fn preamble_end(lines: &[&str]) -> usize {
    let mut in_block_comment = false;
    for (i, line) in lines.iter().enumerate() {
        let t = line.trim();
        if in_block_comment {
            if t.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if t.is_empty() || t.starts_with("//") {
            continue;
        }
        if t.starts_with("/*") {
            if !t.contains("*/") {
                in_block_comment = true;
            }
            continue;
        }
        return i;
    }
    lines.len()
}

#[derive(Debug)]
struct ImportBlock {
    statements: Vec<ImportStatement>,
    /// Line index just past the last import statement.
    end: usize,
}

/// Collect consecutive import statements from `start`, joining multi-line
/// statements. A comment with further imports below it aborts the whole
/// collection (reordering would detach the comment from its statement), as
/// does an import-like run that never parses; the file is then left
/// untouched.
fn collect_import_block(lines: &[&str], start: usize) -> Option<ImportBlock> {
    let mut statements = vec![];
    let mut end = start;
    let mut pending = String::new();

    let mut idx = start;
    while idx < lines.len() {
        let t = lines[idx].trim();
        if pending.is_empty() {
            if t.is_empty() {
                idx += 1;
                continue;
            }
            if !starts_import(t) {
                let is_comment = t.starts_with("//") || t.starts_with("/*");
                if is_comment && lines[idx..].iter().any(|l| starts_import(l.trim())) {
                    return None;
                }
                break;
            }
            pending.push_str(t);
        } else {
            pending.push(' ');
            pending.push_str(t);
        }
        if let Some(stmt) = parse_statement(&pending) {
            statements.push(stmt);
            pending.clear();
            end = idx + 1;
        } else if pending.len() > MAX_JOINED_STATEMENT_LEN {
            return None;
        }
        idx += 1;
    }

    if !pending.is_empty() || statements.is_empty() {
        return None;
    }
    Some(ImportBlock { statements, end })
}

fn starts_import(line: &str) -> bool {
    line.strip_prefix("import").is_some_and(|rest| {
        rest.is_empty() || rest.starts_with([' ', '\t', '\'', '"', '{', '*'])
    })
}

#[derive(Debug, Clone)]
struct ImportStatement {
    specifier: String,
    quote: char,
    type_only: bool,
    side_effect: bool,
    default_binding: Option<String>,
    namespace_binding: Option<String>,
    named: Option<Vec<String>>,
}

fn side_effect_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^import\s*(['"])([^'"]+)['"]\s*;?$"#).unwrap())
}

fn binding_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^import\s+(type\s+)?(.+?)\s*from\s*(['"])([^'"]+)['"]\s*;?$"#).unwrap()
    })
}

fn parse_statement(text: &str) -> Option<ImportStatement> {
    if let Some(caps) = side_effect_re().captures(text) {
        return Some(ImportStatement {
            specifier: caps[2].to_string(),
            quote: caps[1].chars().next().unwrap_or('\''),
            type_only: false,
            side_effect: true,
            default_binding: None,
            namespace_binding: None,
            named: None,
        });
    }

    let caps = binding_re().captures(text)?;
    let type_only = caps.get(1).is_some();
    let clause = caps[2].trim().to_string();
    let quote = caps[3].chars().next().unwrap_or('\'');
    let specifier = caps[4].to_string();

    let (default_binding, namespace_binding, named) = parse_clause(&clause)?;
    Some(ImportStatement {
        specifier,
        quote,
        type_only,
        side_effect: false,
        default_binding,
        namespace_binding,
        named,
    })
}

type Clause = (Option<String>, Option<String>, Option<Vec<String>>);

fn parse_clause(clause: &str) -> Option<Clause> {
    let mut default_binding = None;
    let mut rest = clause.trim();

    if !rest.is_empty() && !rest.starts_with('{') && !rest.starts_with('*') {
        let (head, tail) = match rest.split_once(',') {
            Some((head, tail)) => (head.trim(), tail.trim()),
            None => (rest, ""),
        };
        if !is_identifier(head) {
            return None;
        }
        default_binding = Some(head.to_string());
        rest = tail;
    }

    if rest.is_empty() {
        if default_binding.is_none() {
            return None;
        }
        return Some((default_binding, None, None));
    }

    if let Some(after_star) = rest.strip_prefix('*') {
        let after_as = after_star.trim_start().strip_prefix("as")?;
        if !after_as.starts_with(char::is_whitespace) {
            return None;
        }
        let name = after_as.trim();
        if !is_identifier(name) {
            return None;
        }
        return Some((default_binding, Some(name.to_string()), None));
    }

    if let Some(inner) = rest.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        let mut names = vec![];
        for part in inner.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !is_named_binding(part) {
                return None;
            }
            names.push(part.to_string());
        }
        return Some((default_binding, None, Some(names)));
    }

    None
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_named_binding(s: &str) -> bool {
    let s = s.strip_prefix("type ").map(str::trim_start).unwrap_or(s);
    match s.split_once(" as ") {
        Some((name, alias)) => is_identifier(name.trim()) && is_identifier(alias.trim()),
        None => is_identifier(s),
    }
}

/// Sort key of one named binding: the imported name, without any `type`
/// prefix or `as` alias.
fn binding_name(binding: &str) -> &str {
    let binding = binding.strip_prefix("type ").unwrap_or(binding).trim();
    match binding.split_once(" as ") {
        Some((name, _)) => name.trim_end(),
        None => binding,
    }
}

fn compare_tokens(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    }
}

/// Merge duplicates, sort names within statements, and order statements:
/// side-effect imports first in original order, then bindable imports under
/// the configured path comparator.
fn arrange(statements: Vec<ImportStatement>, config: &Configuration) -> Vec<ImportStatement> {
    let paths_order = config.sort_rules.as_ref().and_then(|r| r.paths.as_ref());
    let names_order = config.sort_rules.as_ref().and_then(|r| r.names.as_ref());

    let (side_effects, bindables): (Vec<_>, Vec<_>) =
        statements.into_iter().partition(|s| s.side_effect);
    let mut bindables = merge_duplicates(bindables);

    if !names_order.is_some_and(SegmentOrder::is_unsorted) {
        let case_sensitive = names_order.is_some_and(SegmentOrder::is_case_sensitive);
        for stmt in &mut bindables {
            if let Some(names) = &mut stmt.named {
                names.sort_by(|a, b| {
                    compare_tokens(binding_name(a), binding_name(b), case_sensitive)
                });
            }
        }
    }

    if !paths_order.is_some_and(SegmentOrder::is_unsorted) {
        let case_sensitive = paths_order.is_some_and(SegmentOrder::is_case_sensitive);
        bindables.sort_by(|a, b| compare_tokens(&a.specifier, &b.specifier, case_sensitive));
    }

    let mut arranged = side_effects;
    arranged.extend(bindables);
    arranged
}

/// Fold statements that import named bindings from the same module into a
/// single statement. Statements carrying default or namespace bindings are
/// left as they are.
fn merge_duplicates(statements: Vec<ImportStatement>) -> Vec<ImportStatement> {
    let mut merged: Vec<ImportStatement> = vec![];
    for stmt in statements {
        let pure_named = |s: &ImportStatement| {
            s.named.is_some() && s.default_binding.is_none() && s.namespace_binding.is_none()
        };
        if pure_named(&stmt) {
            if let Some(existing) = merged
                .iter_mut()
                .find(|m| {
                    m.specifier == stmt.specifier
                        && m.type_only == stmt.type_only
                        && pure_named(&**m)
                })
            {
                let names = existing.named.get_or_insert_with(Vec::new);
                for name in stmt.named.clone().unwrap_or_default() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                continue;
            }
        }
        merged.push(stmt);
    }
    merged
}

fn render(stmt: &ImportStatement, max_len: usize, tab_size: usize, out: &mut Vec<String>) {
    let q = stmt.quote;
    let spec = &stmt.specifier;

    if stmt.side_effect {
        out.push(format!("import {q}{spec}{q};"));
        return;
    }

    let mut head = String::from("import ");
    if stmt.type_only {
        head.push_str("type ");
    }

    let mut bindings = vec![];
    if let Some(name) = &stmt.default_binding {
        bindings.push(name.clone());
    }
    if let Some(name) = &stmt.namespace_binding {
        bindings.push(format!("* as {name}"));
    }
    if let Some(names) = &stmt.named {
        if names.is_empty() {
            bindings.push("{}".to_string());
        } else {
            bindings.push(format!("{{ {} }}", names.join(", ")));
        }
    }

    let line = format!("{head}{} from {q}{spec}{q};", bindings.join(", "));
    let wrappable = stmt.named.as_ref().is_some_and(|names| !names.is_empty());
    if line.len() <= max_len || !wrappable {
        out.push(line);
        return;
    }

    // One name per line once the single-line form overflows.
    let mut opener = head;
    if let Some(name) = &stmt.default_binding {
        opener.push_str(name);
        opener.push_str(", ");
    }
    opener.push('{');
    out.push(opener);
    let indent = " ".repeat(tab_size);
    if let Some(names) = &stmt.named {
        for name in names {
            out.push(format!("{indent}{name},"));
        }
    }
    out.push(format!("}} from {q}{spec}{q};"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortRules;

    fn format(source: &str) -> Option<String> {
        format_source(source, &Configuration::default())
    }

    #[test]
    fn test_already_formatted_returns_none() {
        let source = "import a from 'a';\nimport b from 'b';\n\nconst x = 1;\n";
        assert_eq!(format(source), None);
    }

    #[test]
    fn test_sorts_imports_by_specifier() {
        let source = "import b from 'b';\nimport a from 'a';\n\nconst x = 1;\n";
        let expected = "import a from 'a';\nimport b from 'b';\n\nconst x = 1;\n";
        assert_eq!(format(source).as_deref(), Some(expected));
    }

    #[test]
    fn test_sort_is_case_insensitive_by_default() {
        let source = "import Zoo from 'Zoo';\nimport apple from 'apple';\n";
        let formatted = format(source).unwrap();
        assert!(formatted.find("apple").unwrap() < formatted.find("Zoo").unwrap());
    }

    #[test]
    fn test_case_sensitive_sort_rule() {
        let config = Configuration {
            sort_rules: Some(SortRules {
                paths: Some(SegmentOrder::Segments(vec!["AZ".to_string()])),
                names: None,
            }),
            ..Default::default()
        };
        let source = "import apple from 'apple';\nimport Zoo from 'Zoo';\n";
        let formatted = format_source(source, &config).unwrap();
        assert!(formatted.find("Zoo").unwrap() < formatted.find("apple").unwrap());
    }

    #[test]
    fn test_none_sort_rule_keeps_order() {
        let config = Configuration {
            sort_rules: Some(SortRules {
                paths: Some(SegmentOrder::Keyword("none".to_string())),
                names: None,
            }),
            ..Default::default()
        };
        let source = "import b from 'b';\nimport a from 'a';\n";
        assert_eq!(format_source(source, &config), None);
    }

    #[test]
    fn test_side_effect_imports_stay_first_in_order() {
        let source = "import 'z-polyfill';\nimport a from 'a';\nimport 'b-shim';\n";
        let formatted = format(source).unwrap();
        let expected = "import 'z-polyfill';\nimport 'b-shim';\nimport a from 'a';\n";
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_merges_duplicate_named_imports() {
        let source = "import { b } from 'mod';\nimport { a } from 'mod';\n";
        let formatted = format(source).unwrap();
        assert_eq!(formatted, "import { a, b } from 'mod';\n");
    }

    #[test]
    fn test_does_not_merge_default_with_named() {
        let source = "import z from 'z';\nimport def from 'mod';\nimport { a } from 'mod';\n";
        let formatted = format(source).unwrap();
        assert!(formatted.contains("import def from 'mod';"));
        assert!(formatted.contains("import { a } from 'mod';"));
        assert!(formatted.ends_with("import z from 'z';\n"));
    }

    #[test]
    fn test_sorts_names_within_statement() {
        let source = "import { c, a as x, b } from 'mod';\n";
        let formatted = format(source).unwrap();
        assert_eq!(formatted, "import { a as x, b, c } from 'mod';\n");
    }

    #[test]
    fn test_joins_multiline_import() {
        let source = "import {\n  b,\n  a,\n} from 'mod';\n";
        let formatted = format(source).unwrap();
        assert_eq!(formatted, "import { a, b } from 'mod';\n");
    }

    #[test]
    fn test_wraps_long_import() {
        let config = Configuration {
            max_line_length: Some(40),
            tab_size: Some(2),
            ..Default::default()
        };
        let source = "import { alpha, bravo, charlie, delta } from 'long-module-name';\n";
        let formatted = format_source(source, &config).unwrap();
        let expected = "import {\n  alpha,\n  bravo,\n  charlie,\n  delta,\n} from 'long-module-name';\n";
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_preserves_preamble_comments() {
        let source = "// copyright\nimport b from 'b';\nimport a from 'a';\n";
        let formatted = format(source).unwrap();
        assert!(formatted.starts_with("// copyright\nimport a from 'a';"));
    }

    #[test]
    fn test_comment_before_later_import_aborts() {
        let source = "import b from 'b';\n// grouped separately\nimport a from 'a';\n";
        assert_eq!(format(source), None);
    }

    #[test]
    fn test_comment_after_imports_is_fine() {
        let source = "import b from 'b';\nimport a from 'a';\n\n// main\nconst x = 1;\n";
        let formatted = format(source).unwrap();
        assert_eq!(
            formatted,
            "import a from 'a';\nimport b from 'b';\n\n// main\nconst x = 1;\n"
        );
    }

    #[test]
    fn test_type_imports_kept_and_sorted() {
        let source = "import type { T } from 'types';\nimport a from 'a';\n";
        let formatted = format(source).unwrap();
        assert_eq!(formatted, "import a from 'a';\nimport type { T } from 'types';\n");
    }

    #[test]
    fn test_namespace_import_renders() {
        let source = "import * as path from 'path';\nimport fs from 'fs';\n";
        let formatted = format(source).unwrap();
        assert_eq!(formatted, "import fs from 'fs';\nimport * as path from 'path';\n");
    }

    #[test]
    fn test_unparsable_import_leaves_file_untouched() {
        let source = "import b from 'b';\nimport { oops( } from 'a';\n";
        assert_eq!(format(source), None);
    }

    #[test]
    fn test_applies_configured_eol() {
        let config = Configuration {
            eol: Some(EolKind::CRLF),
            ..Default::default()
        };
        let source = "import a from 'a';\n";
        let formatted = format_source(source, &config).unwrap();
        assert_eq!(formatted, "import a from 'a';\r\n");
    }

    #[test]
    fn test_insert_final_newline_false_strips() {
        let config = Configuration {
            insert_final_newline: Some(false),
            ..Default::default()
        };
        let source = "import a from 'a';\n";
        let formatted = format_source(source, &config).unwrap();
        assert_eq!(formatted, "import a from 'a';");
    }

    #[test]
    fn test_file_without_imports_only_normalizes_endings() {
        let config = Configuration {
            eol: Some(EolKind::LF),
            ..Default::default()
        };
        assert_eq!(
            format_source("const x = 1;\r\n", &config).as_deref(),
            Some("const x = 1;\n")
        );
        assert_eq!(format_source("const x = 1;\n", &config), None);
    }

    #[test]
    fn test_missing_final_newline_added() {
        assert_eq!(format("const x = 1;").as_deref(), Some("const x = 1;\n"));
    }

    #[test]
    fn test_empty_source_untouched() {
        assert_eq!(format(""), None);
    }

    #[test]
    fn test_import_like_identifier_is_not_an_import() {
        let source = "importantThing();\n";
        assert_eq!(format(source), None);
    }

    #[test]
    fn test_is_supported_extensions() {
        assert!(is_supported(Path::new("a.ts")));
        assert!(is_supported(Path::new("a.tsx")));
        assert!(is_supported(Path::new("a.mjs")));
        assert!(!is_supported(Path::new("a.rs")));
        assert!(!is_supported(Path::new("a.json")));
        assert!(!is_supported(Path::new("Makefile")));
    }
}
