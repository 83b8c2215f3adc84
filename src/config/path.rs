//! Separator-agnostic upward path search.
//!
//! Configuration values may have been written on a different platform than
//! the one running the tool, so `/` and `\` are both accepted as separators
//! in every input. No normalization happens beyond the rules documented on
//! each function; downstream equality checks depend on literal paths.

use std::fs;
use std::path::MAIN_SEPARATOR;

/// Search for `filename` in the directory chain of `start_path`.
///
/// Returns every existing regular file named `filename` between the starting
/// directory and the filesystem root, nearest directory first. An absolute
/// `filename` short-circuits to a single-element list without any existence
/// check. If `start_path` is an existing regular file the search begins at
/// its containing directory, otherwise at `start_path` itself.
pub fn find_file_from_path_and_parents(filename: &str, start_path: Option<&str>) -> Vec<String> {
    if filename.is_empty() {
        return vec![];
    }
    if is_absolute(filename) {
        return vec![filename.to_string()];
    }
    let Some(start) = start_path.filter(|s| !s.is_empty()) else {
        return vec![];
    };
    ancestors_of(start)
        .map(|dir| join(&dir, filename))
        .filter(|candidate| is_regular_file(candidate))
        .collect()
}

/// Parent directory of `path`.
///
/// Runs of identical separators collapse first, then the last
/// separator-delimited component is dropped. Returns an empty string when
/// `path` has no separator. Edge rules: a bare root marker (`/`, `\`,
/// `C:\`, `C:/`) is returned unchanged; a single trailing separator is
/// stripped before computing the parent (`a/b/` yields `a`); the parent of
/// a root-level entry keeps its root marker (`/a` yields `/`).
pub fn parent_folder(path: &str) -> String {
    let collapsed = collapse_separator_runs(path);
    if is_root_marker(&collapsed) {
        return collapsed;
    }
    let trimmed = collapsed
        .strip_suffix(['/', '\\'])
        .unwrap_or(collapsed.as_str());
    match trimmed.rfind(['/', '\\']) {
        None => String::new(),
        Some(0) => trimmed[..1].to_string(),
        Some(i) => {
            let parent = &trimmed[..i];
            if is_drive(parent) {
                // Keep the separator so "C:\a" yields "C:\", not "C:".
                trimmed[..=i].to_string()
            } else {
                parent.to_string()
            }
        }
    }
}

/// Directories from the one containing `start_path` (or `start_path` itself
/// when it is not an existing regular file) up to the filesystem root,
/// nearest first.
pub(crate) fn ancestors_of(start_path: &str) -> impl Iterator<Item = String> {
    let first = if is_regular_file(start_path) {
        parent_folder(start_path)
    } else {
        start_path.to_string()
    };
    std::iter::successors(Some(first), |dir| {
        let parent = parent_folder(dir);
        (!parent.is_empty() && parent != *dir).then_some(parent)
    })
    .filter(|dir| !dir.is_empty())
}

/// Nearest existing regular file among `file_names`, searching the
/// directory chain of `start_path`. Earlier names win within a directory.
pub(crate) fn find_nearest_of(file_names: &[&str], start_path: &str) -> Option<String> {
    ancestors_of(start_path).find_map(|dir| {
        file_names
            .iter()
            .map(|name| join(&dir, name))
            .find(|candidate| is_regular_file(candidate))
    })
}

/// True when `path` exists and is a regular file.
pub(crate) fn is_regular_file(path: &str) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Append `filename` to `dir` using the separator convention `dir` already
/// uses.
pub(crate) fn join(dir: &str, filename: &str) -> String {
    if dir.ends_with('/') || dir.ends_with('\\') {
        return format!("{dir}{filename}");
    }
    let sep = if dir.contains('\\') && !dir.contains('/') {
        '\\'
    } else if dir.contains('/') {
        '/'
    } else {
        MAIN_SEPARATOR
    };
    format!("{dir}{sep}{filename}")
}

fn is_absolute(filename: &str) -> bool {
    if filename.starts_with('/') {
        return true;
    }
    let b = filename.as_bytes();
    b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && (b[2] == b'\\' || b[2] == b'/')
}

fn is_root_marker(path: &str) -> bool {
    matches!(path, "/" | "\\") || {
        let b = path.as_bytes();
        b.len() == 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && (b[2] == b'\\' || b[2] == b'/')
    }
}

fn is_drive(path: &str) -> bool {
    let b = path.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

fn collapse_separator_runs(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous = '\0';
    for c in path.chars() {
        if (c == '/' || c == '\\') && c == previous {
            continue;
        }
        collapsed.push(c);
        previous = c;
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_filename_returns_nothing() {
        assert!(find_file_from_path_and_parents("", Some("/tmp")).is_empty());
    }

    #[test]
    fn test_absolute_filename_short_circuits() {
        let found = find_file_from_path_and_parents("/no/such/file.json", Some("/tmp"));
        assert_eq!(found, vec!["/no/such/file.json".to_string()]);

        let windows = find_file_from_path_and_parents("C:\\cfg\\a.json", None);
        assert_eq!(windows, vec!["C:\\cfg\\a.json".to_string()]);
    }

    #[test]
    fn test_missing_start_path_returns_nothing() {
        assert!(find_file_from_path_and_parents("a.json", None).is_empty());
        assert!(find_file_from_path_and_parents("a.json", Some("")).is_empty());
    }

    #[test]
    fn test_finds_files_nearest_first() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join("conf.json"), "{}").unwrap();
        fs::write(nested.join("conf.json"), "{}").unwrap();

        let found =
            find_file_from_path_and_parents("conf.json", Some(&nested.to_string_lossy()));
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with(&*nested.to_string_lossy()));
        assert!(found[1].starts_with(&*root.path().to_string_lossy()));
    }

    #[test]
    fn test_search_starts_at_containing_dir_for_files() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("conf.json"), "{}").unwrap();
        let source = root.path().join("index.ts");
        fs::write(&source, "").unwrap();

        let found = find_file_from_path_and_parents("conf.json", Some(&source.to_string_lossy()));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_skips_directories_with_matching_name() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("conf.json")).unwrap();

        let found = find_file_from_path_and_parents(
            "conf.json",
            Some(&root.path().to_string_lossy()),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_parent_folder_basic() {
        assert_eq!(parent_folder("a/b/c"), "a/b");
        assert_eq!(parent_folder("a\\b\\c"), "a\\b");
        assert_eq!(parent_folder("abc"), "");
        assert_eq!(parent_folder(""), "");
    }

    #[test]
    fn test_parent_folder_collapses_separator_runs() {
        assert_eq!(parent_folder("a//b///c"), "a/b");
        assert_eq!(parent_folder("a\\\\b"), "a");
    }

    #[test]
    fn test_parent_folder_root_markers() {
        assert_eq!(parent_folder("/"), "/");
        assert_eq!(parent_folder("C:\\"), "C:\\");
        assert_eq!(parent_folder("C:/"), "C:/");
        assert_eq!(parent_folder("/a"), "/");
        assert_eq!(parent_folder("C:\\a"), "C:\\");
    }

    #[test]
    fn test_parent_folder_trailing_separator() {
        assert_eq!(parent_folder("a/b/"), "a");
        assert_eq!(parent_folder("/a/"), "/");
    }

    #[test]
    fn test_ancestors_stop_at_relative_top() {
        let dirs: Vec<String> = ancestors_of("a/b/c").collect();
        assert_eq!(dirs, vec!["a/b/c", "a/b", "a"]);
    }

    #[test]
    fn test_join_follows_existing_convention() {
        assert_eq!(join("a/b", "x"), "a/b/x");
        assert_eq!(join("a\\b", "x"), "a\\b\\x");
        assert_eq!(join("/", "x"), "/x");
    }
}
