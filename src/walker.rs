use ignore::WalkBuilder;
use std::io;
use std::path::PathBuf;

/// Walk paths and yield file paths, respecting gitignore
pub fn walk_paths(paths: &[String]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut files = vec![];
    let Some((first, rest)) = paths.split_first() else {
        return files.into_iter();
    };

    let mut builder = WalkBuilder::new(first);
    for path in rest {
        builder.add(path);
    }
    builder
        .hidden(true) // Skip hidden files
        .git_ignore(true) // Respect .gitignore
        .git_global(true)
        .git_exclude(true);

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(Ok(entry.into_path()));
                }
            }
            Err(e) => files.push(Err(io::Error::other(e.to_string()))),
        }
    }

    files.into_iter()
}
