//! Error taxonomy shared by the traversal, copy and line operations

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FileError>;

/// Every failure reported by this crate.
///
/// Traversals emit these inline (see [`crate::walk::FileList`]); copy and
/// rewrite return exactly one.
#[derive(Debug, Error)]
pub enum FileError {
    /// Traversal root or recursion target is not a directory.
    #[error("provided dir is not a dir: '{}'", path.display())]
    NotADirectory { path: PathBuf },

    /// Metadata lookup failed for a root or a single entry.
    #[error("cannot stat '{}': {source}", path.display())]
    StatFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Single-level expansion of a directory failed.
    #[error("cannot expand '{pattern}': {reason}")]
    GlobFailure { pattern: String, reason: String },

    /// Open/create/read/write/sync failure during copy, read or rewrite.
    #[error("{op} '{}': {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line did not fit in the configured read buffer.
    #[error("{}: line {line} exceeds buffer size of {buffer_size} bytes", path.display())]
    LineTooLong {
        path: PathBuf,
        line: usize,
        buffer_size: usize,
    },

    /// Directory resolves to one of its own ancestors; it is listed but not entered.
    #[error("symlink loop at '{}'", path.display())]
    SymlinkLoop { path: PathBuf },
}

impl FileError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        FileError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn stat(path: &Path, source: io::Error) -> Self {
        FileError::StatFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the failure refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileError::NotADirectory { path }
            | FileError::StatFailure { path, .. }
            | FileError::Io { path, .. }
            | FileError::LineTooLong { path, .. }
            | FileError::SymlinkLoop { path } => Some(path),
            FileError::GlobFailure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_message() {
        let err = FileError::NotADirectory {
            path: PathBuf::from("/tmp/file.txt"),
        };
        assert_eq!(err.to_string(), "provided dir is not a dir: '/tmp/file.txt'");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = FileError::io(
            "open",
            Path::new("missing.txt"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().starts_with("open 'missing.txt'"));
        assert!(err.source().is_some());
        assert_eq!(err.path(), Some(Path::new("missing.txt")));
    }
}
