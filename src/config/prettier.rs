//! Prettier settings mapped into the shared configuration vocabulary.

use std::fs;

use serde::Deserialize;

use super::eol::EolKind;
use super::path::find_nearest_of;
use super::types::Configuration;

const CONFIG_FILE_NAMES: &[&str] = &[".prettierrc", ".prettierrc.json"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PrettierSettings {
    print_width: Option<usize>,
    tab_width: Option<usize>,
    end_of_line: Option<String>,
}

/// Nearest Prettier config translated for `path`.
///
/// Only the fields with a counterpart in our vocabulary are mapped:
/// `printWidth`, `tabWidth` and `endOfLine` (`"auto"` contributes
/// nothing). Absent or malformed files degrade to an empty configuration
/// with a warning.
pub fn prettier_config(path: &str, warnings: &mut Vec<String>) -> Configuration {
    let Some(file) = find_nearest_of(CONFIG_FILE_NAMES, path) else {
        return Configuration::default();
    };
    let content = match fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) => {
            warnings.push(format!("failed to read \"{file}\": {e}"));
            return Configuration::default();
        }
    };
    let settings: PrettierSettings = match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warnings.push(format!("failed to parse \"{file}\": {e}"));
            return Configuration::default();
        }
    };
    Configuration {
        max_line_length: settings.print_width,
        tab_size: settings.tab_width,
        eol: settings
            .end_of_line
            .as_deref()
            .and_then(EolKind::from_keyword),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_fields_mapped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".prettierrc"),
            r#"{"printWidth": 100, "tabWidth": 4, "endOfLine": "crlf", "semi": false}"#,
        )
        .unwrap();

        let mut warnings = vec![];
        let config = prettier_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config.max_line_length, Some(100));
        assert_eq!(config.tab_size, Some(4));
        assert_eq!(config.eol, Some(EolKind::CRLF));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_auto_end_of_line_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".prettierrc"), r#"{"endOfLine": "auto"}"#).unwrap();

        let mut warnings = vec![];
        let config = prettier_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config.eol, None);
    }

    #[test]
    fn test_found_in_parent_directory() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("src");
        fs::create_dir(&nested).unwrap();
        fs::write(root.path().join(".prettierrc.json"), r#"{"tabWidth": 2}"#).unwrap();

        let mut warnings = vec![];
        let config = prettier_config(&nested.to_string_lossy(), &mut warnings);
        assert_eq!(config.tab_size, Some(2));
    }

    #[test]
    fn test_malformed_file_degrades_with_warning() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".prettierrc"), "tabWidth: 2").unwrap();

        let mut warnings = vec![];
        let config = prettier_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config, Configuration::default());
        assert_eq!(warnings.len(), 1);
    }
}
