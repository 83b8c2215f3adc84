//! `.editorconfig` settings mapped into the shared configuration
//! vocabulary.
//!
//! Only the `[*]` section is considered; glob-specific sections are the
//! editor's business, not ours.

use std::fs;

use super::eol::EolKind;
use super::path::find_nearest_of;
use super::types::Configuration;

const CONFIG_FILE_NAMES: &[&str] = &[".editorconfig"];

/// Nearest `.editorconfig` settings translated for `path`.
///
/// Maps `max_line_length`, `indent_size`, `end_of_line` and
/// `insert_final_newline`. Absent or unreadable files degrade to an empty
/// configuration with a warning.
pub fn editor_settings_config(path: &str, warnings: &mut Vec<String>) -> Configuration {
    let Some(file) = find_nearest_of(CONFIG_FILE_NAMES, path) else {
        return Configuration::default();
    };
    match fs::read_to_string(&file) {
        Ok(content) => parse_editor_settings(&content),
        Err(e) => {
            warnings.push(format!("failed to read \"{file}\": {e}"));
            Configuration::default()
        }
    }
}

fn parse_editor_settings(content: &str) -> Configuration {
    let mut config = Configuration::default();
    let mut in_global_section = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            // [*] applies to all files
            in_global_section = line == "[*]";
            continue;
        }

        if !in_global_section {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim().to_lowercase();

        match key.as_str() {
            "insert_final_newline" => config.insert_final_newline = Some(value == "true"),
            "end_of_line" => config.eol = EolKind::from_keyword(&value),
            "indent_size" => config.tab_size = value.parse().ok(),
            "max_line_length" => config.max_line_length = value.parse().ok(),
            _ => {}
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_global_section_mapped() {
        let config = parse_editor_settings(
            r#"
root = true

[*]
indent_size = 4
end_of_line = crlf
insert_final_newline = true
max_line_length = 100

[*.md]
max_line_length = off
"#,
        );
        assert_eq!(config.tab_size, Some(4));
        assert_eq!(config.eol, Some(EolKind::CRLF));
        assert_eq!(config.insert_final_newline, Some(true));
        assert_eq!(config.max_line_length, Some(100));
    }

    #[test]
    fn test_non_global_sections_ignored() {
        let config = parse_editor_settings(
            r#"
[*.js]
indent_size = 2
"#,
        );
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_unparsable_values_contribute_nothing() {
        let config = parse_editor_settings(
            r#"
[*]
indent_size = tab
insert_final_newline = false
"#,
        );
        assert_eq!(config.tab_size, None);
        assert_eq!(config.insert_final_newline, Some(false));
    }

    #[test]
    fn test_found_in_parent_directory() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("src");
        fs::create_dir(&nested).unwrap();
        fs::write(
            root.path().join(".editorconfig"),
            "[*]\ninsert_final_newline = true\n",
        )
        .unwrap();

        let mut warnings = vec![];
        let config = editor_settings_config(&nested.to_string_lossy(), &mut warnings);
        assert_eq!(config.insert_final_newline, Some(true));
        assert!(warnings.is_empty());
    }
}
