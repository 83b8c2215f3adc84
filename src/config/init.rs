//! Template generation for `--init`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Template import-sorter.json with the common options spelled out.
pub const IMPORT_SORTER_JSON_TEMPLATE: &str = r#"{
  "maxLineLength": 80,
  "tabSize": 2,
  "insertFinalNewline": true,
  "exclude": ["node_modules"],
  "excludeGlob": [],
  "sortRules": {
    "paths": ["_", "aA"],
    "names": ["_", "aA"]
  }
}
"#;

/// Generate import-sorter.json in the specified directory (or the current
/// directory if None).
///
/// Returns an error if the file already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(
        || PathBuf::from("import-sorter.json"),
        |d| d.join("import-sorter.json"),
    );

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "import-sorter.json already exists",
        ));
    }

    fs::write(&path, IMPORT_SORTER_JSON_TEMPLATE)?;
    Ok(path)
}

/// Generate import-sorter.json in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
