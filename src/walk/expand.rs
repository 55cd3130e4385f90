//! Single-level expansion and stat helpers shared by the listers

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{FileError, Result};
use crate::sort::sort_by_name_numerically;

/// Build the `<dir>/*` pattern with every metacharacter in `dir` escaped.
pub fn child_pattern(dir: &Path) -> Result<String> {
    let dir = dir.to_str().ok_or_else(|| FileError::GlobFailure {
        pattern: dir.to_string_lossy().into_owned(),
        reason: "path is not valid UTF-8".to_string(),
    })?;
    let escaped = Pattern::escape(dir);
    Ok(Path::new(&escaped).join("*").to_string_lossy().into_owned())
}

/// Expand one level of children of `dir`, in glob order (sorted by name).
///
/// Hidden entries are included. Any error from the expansion fails the
/// whole level.
pub fn expand_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = child_pattern(dir)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let paths = glob::glob_with(&pattern, options).map_err(|e| FileError::GlobFailure {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    paths
        .map(|entry| {
            entry.map_err(|e| FileError::GlobFailure {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Read the entries of one directory, sorted numerically by name.
///
/// Unlike the listers this does not go through the glob expansion and
/// hands back the directory entries themselves, so callers can look at
/// each entry's type and metadata without building paths first.
pub fn read_dir_num_sort(dir: &Path, reverse: bool) -> Result<Vec<fs::DirEntry>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| FileError::io("read dir", dir, e))?
        .map(|entry| {
            entry
                .map(|e| (e.file_name(), e))
                .map_err(|e| FileError::io("read dir", dir, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(sort_by_name_numerically(entries, |(name, _)| name.as_os_str(), reverse)
        .into_iter()
        .map(|(_, entry)| entry)
        .collect())
}

/// Stat following symlinks; the target's type decides dir-vs-file.
pub fn stat(path: &Path) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(|e| FileError::stat(path, e))
}

/// Stat `dir` and require it to be a directory.
pub fn require_dir(dir: &Path) -> Result<()> {
    if stat(dir)?.is_dir() {
        Ok(())
    } else {
        Err(FileError::NotADirectory {
            path: dir.to_path_buf(),
        })
    }
}

/// Get the basename of a path, defaulting to the whole path for roots.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
