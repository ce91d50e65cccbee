//! Source identities: ordinary files and standard input.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies where a sequence of source lines came from.
///
/// Standard input renders as `<stdin>` and is applicable to every rule
/// regardless of its file name globs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourcePath {
    /// The process's standard input.
    Stdin,
    /// An ordinary file.
    File(PathBuf),
}

impl SourcePath {
    /// Converts a command-line argument into a source path; `-` denotes
    /// standard input.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Whether this is standard input.
    #[must_use]
    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// The final path component, if this is a file with a UTF-8 name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Stdin => None,
            Self::File(path) => path.file_name().and_then(OsStr::to_str),
        }
    }

    /// The underlying filesystem path, if any.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }
}

impl From<PathBuf> for SourcePath {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
