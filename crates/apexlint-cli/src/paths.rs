//! Path collection: argument conversion, directory walking, deduplication.

use std::collections::HashSet;
use std::path::PathBuf;

use apexlint_core::SourcePath;

/// Converts command-line file arguments into source paths; `-` denotes
/// standard input.
pub fn from_args<S: AsRef<str>>(args: &[S]) -> Vec<SourcePath> {
    args.iter()
        .map(|arg| SourcePath::from_arg(arg.as_ref()))
        .collect()
}

/// Expands directories into all files beneath them, recursively and in
/// name order. Ordinary files (and missing paths, whose errors surface at
/// open time) pass through unchanged.
pub fn walk(paths: Vec<SourcePath>) -> Vec<SourcePath> {
    let mut out = Vec::new();
    for path in paths {
        match path {
            SourcePath::File(dir) if dir.is_dir() => {
                let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&dir)
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            tracing::warn!("skipping unreadable entry: {e}");
                            None
                        }
                    })
                    .filter(|entry| !entry.file_type().is_dir())
                    .map(walkdir::DirEntry::into_path)
                    .collect();
                files.sort();
                out.extend(files.into_iter().map(SourcePath::File));
            }
            other => out.push(other),
        }
    }
    out
}

/// Filters out duplicate paths, comparing canonicalized forms where
/// possible so `Foo.cls` and `./Foo.cls` count once.
pub fn unique(paths: Vec<SourcePath>) -> Vec<SourcePath> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for path in paths {
        let key = match path.as_path() {
            None => SourcePath::Stdin,
            Some(p) => SourcePath::File(p.canonicalize().unwrap_or_else(|_| p.to_path_buf())),
        };
        if seen.insert(key) {
            out.push(path);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dash_becomes_stdin() {
        let paths = from_args(&["-", "./-", "Foo.cls"]);
        assert_eq!(paths[0], SourcePath::Stdin);
        assert_eq!(paths[1], SourcePath::File(PathBuf::from("./-")));
        assert_eq!(paths[2], SourcePath::File(PathBuf::from("Foo.cls")));
    }

    #[test]
    fn unique_drops_repeated_paths() {
        let paths = unique(from_args(&["Foo.cls", "Bar.cls", "Foo.cls", "-", "-"]));
        assert_eq!(
            paths,
            [
                SourcePath::File(PathBuf::from("Foo.cls")),
                SourcePath::File(PathBuf::from("Bar.cls")),
                SourcePath::Stdin,
            ]
        );
    }

    #[test]
    fn unique_resolves_equivalent_spellings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("Foo.cls");
        fs::write(&file, "").expect("write");
        let spelled = dir.path().join(".").join("Foo.cls");

        let paths = unique(vec![
            SourcePath::File(file.clone()),
            SourcePath::File(spelled),
        ]);
        assert_eq!(paths, [SourcePath::File(file)]);
    }

    #[test]
    fn walk_expands_directories_recursively() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("src/classes")).expect("mkdir");
        fs::write(dir.path().join("Foo.cls"), "").expect("write");
        fs::write(dir.path().join("src/classes/Bar.cls"), "").expect("write");

        let walked = walk(vec![SourcePath::File(dir.path().to_path_buf())]);
        assert_eq!(
            walked,
            [
                SourcePath::File(dir.path().join("Foo.cls")),
                SourcePath::File(dir.path().join("src/classes/Bar.cls")),
            ]
        );
    }

    #[test]
    fn walk_passes_files_and_missing_paths_through() {
        let walked = walk(from_args(&["Missing.cls", "-"]));
        assert_eq!(
            walked,
            [
                SourcePath::File(PathBuf::from("Missing.cls")),
                SourcePath::Stdin,
            ]
        );
    }
}
