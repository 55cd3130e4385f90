//! Line-by-line reading with a bounded line buffer

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{FileError, Result};

/// Default line buffer size (64K).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Smallest buffer a reader will use; smaller requests are raised to this.
pub const MIN_BUFFER_SIZE: usize = 16;

enum State {
    Open(BufReader<File>),
    Failed(FileError),
    Done,
}

/// Lazy sequence of the lines of one file.
///
/// Lines are raw bytes split on `\n` with the terminator (and a `\r`
/// before it) removed; no encoding is assumed. A line that does not fit in the buffer, terminator included,
/// yields [`FileError::LineTooLong`] and ends the sequence, as does any
/// other read failure. End of file ends the sequence without an error.
pub struct LineReader {
    path: PathBuf,
    state: State,
    buffer_size: usize,
    line: usize,
}

impl LineReader {
    pub fn new(path: &Path, buffer_size: usize) -> Self {
        let buffer_size = buffer_size.max(MIN_BUFFER_SIZE);
        let state = match File::open(path) {
            Ok(file) => State::Open(BufReader::with_capacity(buffer_size, file)),
            Err(e) => State::Failed(FileError::io("open", path, e)),
        };
        Self {
            path: path.to_path_buf(),
            state,
            buffer_size,
            line: 0,
        }
    }

    /// Effective buffer size after applying the minimum.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Number of lines yielded so far.
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn read_line(&mut self) -> Option<Result<Vec<u8>>> {
        let State::Open(reader) = &mut self.state else {
            return None;
        };

        let mut buf = Vec::new();
        let read = reader
            .by_ref()
            .take(self.buffer_size as u64)
            .read_until(b'\n', &mut buf);

        let n = match read {
            Ok(0) => return None,
            Ok(n) => n,
            Err(e) => return Some(Err(FileError::io("read", &self.path, e))),
        };

        let terminated = buf.last() == Some(&b'\n');
        if !terminated && n == self.buffer_size {
            return Some(Err(FileError::LineTooLong {
                path: self.path.clone(),
                line: self.line + 1,
                buffer_size: self.buffer_size,
            }));
        }

        if terminated {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        self.line += 1;
        Some(Ok(buf))
    }
}

impl Iterator for LineReader {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let State::Failed(_) = self.state {
            if let State::Failed(e) = std::mem::replace(&mut self.state, State::Done) {
                return Some(Err(e));
            }
        }

        let item = self.read_line();
        if !matches!(item, Some(Ok(_))) {
            self.state = State::Done;
        }
        item
    }
}

impl std::iter::FusedIterator for LineReader {}

/// Read the lines of `path` lazily, see [`LineReader`].
pub fn read_lines(path: &Path, buffer_size: usize) -> LineReader {
    LineReader::new(path, buffer_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn lines_of(path: &Path, buffer_size: usize) -> Vec<String> {
        read_lines(path, buffer_size)
            .map(|l| String::from_utf8(l.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_reads_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"one\ntwo\nthree\n");
        assert_eq!(lines_of(&path, 1024), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"one\ntwo");
        assert_eq!(lines_of(&path, 1024), vec!["one", "two"]);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"one\r\ntwo\r\n");
        assert_eq!(lines_of(&path, 1024), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"\n\nx\n");
        assert_eq!(lines_of(&path, 1024), vec!["", "", "x"]);
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"");
        assert_eq!(read_lines(&path, 1024).count(), 0);
    }

    #[test]
    fn test_line_too_long_stops_sequence() {
        let dir = TempDir::new().unwrap();
        let long = "x".repeat(40);
        let content = format!("short\n{long}\nafter\n");
        let path = write(&dir, "f.txt", content.as_bytes());

        let results: Vec<_> = read_lines(&path, 16).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), b"short");
        assert!(matches!(
            results[1],
            Err(FileError::LineTooLong {
                line: 2,
                buffer_size: 16,
                ..
            })
        ));
    }

    #[test]
    fn test_line_exactly_filling_buffer() {
        let dir = TempDir::new().unwrap();
        // 15 bytes + newline fills a 16 byte buffer exactly
        let fits = "y".repeat(15);
        let path = write(&dir, "fits.txt", format!("{fits}\n").as_bytes());
        assert_eq!(lines_of(&path, 16), vec![fits]);

        // 16 bytes without a terminator does not fit
        let path = write(&dir, "full.txt", "z".repeat(16).as_bytes());
        let results: Vec<_> = read_lines(&path, 16).collect();
        assert!(matches!(results.as_slice(), [Err(FileError::LineTooLong { .. })]));
    }

    #[test]
    fn test_buffer_size_has_minimum() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"twelve chars\n");
        let reader = read_lines(&path, 1);
        assert_eq!(reader.buffer_size(), MIN_BUFFER_SIZE);
        assert_eq!(reader.map(|l| l.unwrap()).collect::<Vec<_>>(), vec![b"twelve chars"]);
    }

    #[test]
    fn test_missing_file_is_single_error() {
        let dir = TempDir::new().unwrap();
        let results: Vec<_> = read_lines(&dir.path().join("missing"), 1024).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(FileError::Io { op: "open", .. })));
    }

    #[test]
    fn test_non_utf8_lines_pass_through() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "latin1.txt", b"caf\xe9\r\n\xff\xfe\nx\n");
        let lines: Vec<_> = read_lines(&path, 1024).map(|l| l.unwrap()).collect();
        assert_eq!(
            lines,
            vec![b"caf\xe9".to_vec(), b"\xff\xfe".to_vec(), b"x".to_vec()]
        );
    }

    #[test]
    fn test_independent_readers() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "f.txt", b"a\nb\n");
        let mut first = read_lines(&path, 1024);
        let mut second = read_lines(&path, 1024);
        assert_eq!(first.next().unwrap().unwrap(), b"a");
        assert_eq!(second.next().unwrap().unwrap(), b"a");
        assert_eq!(first.next().unwrap().unwrap(), b"b");
        assert_eq!(first.line_number(), 2);
        assert_eq!(second.line_number(), 1);
    }
}
