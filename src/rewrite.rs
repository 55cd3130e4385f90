//! In-place literal search-and-replace through a temp file
//!
//! The file is streamed line by line into a temp file in the system scratch
//! directory. Only when at least one line changed is the original overwritten
//! with the temp file's contents, so a failure part way through leaves the
//! original as it was.

use std::io::{BufWriter, Write};
use std::path::Path;

use bstr::ByteSlice;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{FileError, Result};
use crate::file_utils::copy_file;
use crate::lines::{DEFAULT_BUFFER_SIZE, read_lines};
use crate::walk::base_name;

/// A literal substitution applied to every line of a file.
///
/// Matching is on bytes, so files in any ASCII-compatible encoding can be
/// rewritten and bytes outside the match are copied as they are.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub old: String,
    pub new: String,
    /// Maximum replacements per line; zero or negative means all.
    pub limit: i64,
    pub buffer_size: usize,
}

impl Replacement {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            limit: -1,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Apply the substitution to one line.
    pub fn replace_line(&self, line: &[u8]) -> Vec<u8> {
        match usize::try_from(self.limit) {
            Ok(limit) if limit > 0 => line.replacen(&self.old, &self.new, limit),
            _ => line.replace(&self.old, &self.new),
        }
    }

    /// Rewrite `path` in place, returning the number of lines that changed.
    ///
    /// Every written line ends with `\n`, so a final line without one gains
    /// it whenever the file is rewritten. Nothing is written back when no
    /// line changed. The temp file is removed in every case.
    pub fn apply(&self, path: &Path) -> Result<usize> {
        let mut tmp = temp_file_for(path)?;
        let tmp_path = tmp.path().to_path_buf();

        let mut changed = 0;
        {
            let mut writer = BufWriter::new(&mut tmp);
            for line in read_lines(path, self.buffer_size) {
                let line = line?;
                let replaced = self.replace_line(&line);
                if replaced != line {
                    changed += 1;
                }
                writer
                    .write_all(&replaced)
                    .and_then(|()| writer.write_all(b"\n"))
                    .map_err(|e| FileError::io("write", &tmp_path, e))?;
            }
            writer
                .flush()
                .map_err(|e| FileError::io("write", &tmp_path, e))?;
        }

        if changed > 0 {
            copy_file(&tmp_path, path)?;
            debug!(path = %path.display(), lines = changed, "rewrote file");
        }
        Ok(changed)
    }
}

/// Create the scratch file for rewriting `path`, named after its basename.
fn temp_file_for(path: &Path) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(&format!("{}-", base_name(path)))
        .tempfile()
        .map_err(|e| FileError::io("create temp file for", path, e))
}

/// Replace `old` with `new` in every line of `path`, at most `n` times per
/// line (`n <= 0` replaces all). Returns the number of changed lines.
pub fn string_replace(
    path: &Path,
    old: &str,
    new: &str,
    n: i64,
    buffer_size: usize,
) -> Result<usize> {
    Replacement::new(old, new)
        .with_limit(n)
        .with_buffer_size(buffer_size)
        .apply(path)
}
