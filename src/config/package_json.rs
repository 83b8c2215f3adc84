//! The `"importSorter"` section of `package.json`.
//!
//! Manifest problems never abort a run: an unparsable manifest or an
//! invalid section contributes an empty configuration and a warning naming
//! the offending file.

use std::convert::Infallible;
use std::fs;

use serde_json::Value;

use super::json_file::fold_til_root;
use super::path::find_file_from_path_and_parents;
use super::types::Configuration;

const MANIFEST_FILE_NAME: &str = "package.json";
const SECTION_KEY: &str = "importSorter";

/// Layered manifest config for `path`: every `package.json` upward
/// contributes its `"importSorter"` section, nearest directory winning,
/// stopping at a section that sets `root: true`.
pub fn package_config(path: &str, warnings: &mut Vec<String>) -> Configuration {
    let files = find_file_from_path_and_parents(MANIFEST_FILE_NAME, Some(path));
    let layers = files
        .iter()
        .map(|file| Ok::<_, Infallible>(section_config(file, warnings)));
    match fold_til_root(layers) {
        Ok(config) => config,
        Err(never) => match never {},
    }
}

fn section_config(file: &str, warnings: &mut Vec<String>) -> Configuration {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warnings.push(format!("failed to read \"{file}\": {e}"));
            return Configuration::default();
        }
    };
    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warnings.push(format!("failed to parse \"{file}\": {e}"));
            return Configuration::default();
        }
    };
    let Some(section) = manifest.get(SECTION_KEY) else {
        return Configuration::default();
    };
    if !section.is_object() {
        warnings.push(format!(
            "bad \"{SECTION_KEY}\" config in \"{file}\": expected an object"
        ));
        return Configuration::default();
    }
    match serde_json::from_value(section.clone()) {
        Ok(config) => config,
        Err(e) => {
            warnings.push(format!("bad \"{SECTION_KEY}\" config in \"{file}\": {e}"));
            Configuration::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, content: &str) {
        fs::write(dir.join(MANIFEST_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_section_extracted() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            r#"{"name": "pkg", "importSorter": {"tabSize": 4, "exclude": ["dist"]}}"#,
        );

        let mut warnings = vec![];
        let config = package_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config.tab_size, Some(4));
        assert_eq!(config.exclude, Some(vec!["dist".to_string()]));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_section_is_empty() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), r#"{"name": "pkg"}"#);

        let mut warnings = vec![];
        let config = package_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config, Configuration::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unparsable_manifest_degrades_with_warning() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "{ not json at all");

        let mut warnings = vec![];
        let config = package_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config, Configuration::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("failed to parse"));
    }

    #[test]
    fn test_non_object_section_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), r#"{"importSorter": "not an object"}"#);

        let mut warnings = vec![];
        let config = package_config(&dir.path().to_string_lossy(), &mut warnings);
        assert_eq!(config, Configuration::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("importSorter"));
        assert!(warnings[0].contains("expected an object"));
    }

    #[test]
    fn test_layered_manifests_nearest_wins() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("packages/app");
        fs::create_dir_all(&nested).unwrap();
        write(
            root.path(),
            r#"{"importSorter": {"maxLineLength": 100, "tabSize": 8}}"#,
        );
        write(&nested, r#"{"importSorter": {"tabSize": 2}}"#);

        let mut warnings = vec![];
        let config = package_config(&nested.to_string_lossy(), &mut warnings);
        assert_eq!(config.tab_size, Some(2));
        assert_eq!(config.max_line_length, Some(100));
    }

    #[test]
    fn test_root_section_stops_search() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("app");
        fs::create_dir_all(&nested).unwrap();
        write(root.path(), r#"{"importSorter": {"maxLineLength": 100}}"#);
        write(&nested, r#"{"importSorter": {"root": true, "tabSize": 2}}"#);

        let mut warnings = vec![];
        let config = package_config(&nested.to_string_lossy(), &mut warnings);
        assert_eq!(config.tab_size, Some(2));
        assert_eq!(config.max_line_length, None);
    }
}
