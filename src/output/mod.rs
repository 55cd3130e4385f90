//! Listing output
//!
//! - `config` - Output configuration and summary counts
//! - `plain` - One path per line, optionally colored
//! - `json` - One JSON object per line

mod config;
mod json;
mod plain;

use std::io;
use std::path::Path;

use crate::error::FileError;
use crate::walk::EntryResult;

pub use config::{OutputConfig, Summary};
pub use json::{JsonEntry, JsonLinesFormatter};
pub use plain::PlainFormatter;

/// Receives the emissions of a listing for display.
pub trait PathFormatter {
    fn output_path(&mut self, path: &Path, is_dir: bool) -> io::Result<()>;

    fn output_error(&mut self, err: &FileError) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<Summary>;
}

/// Drain a listing into a formatter.
///
/// The kind printed for each path is the one the walk recorded, so no path
/// is stat'ed a second time.
pub fn write_listing<I, F>(results: I, formatter: &mut F) -> io::Result<Summary>
where
    I: IntoIterator<Item = EntryResult>,
    F: PathFormatter + ?Sized,
{
    for result in results {
        match result {
            Ok(entry) => formatter.output_path(&entry.path, entry.is_dir)?,
            Err(e) => formatter.output_error(&e)?,
        }
    }
    formatter.finish()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use termcolor::Buffer;

    use super::*;
    use crate::test_utils::TestTree;
    use crate::walk::{Entry, get_num_sort_file_list};

    #[test]
    fn test_plain_lists_paths_and_counts() {
        let tree = TestTree::new();
        tree.add_file("10/a", "");
        tree.add_file("2/b", "");

        let mut formatter = PlainFormatter::new(OutputConfig::default(), Buffer::no_color());
        let summary = write_listing(
            get_num_sort_file_list(tree.path(), true, true, false).entries(),
            &mut formatter,
        )
        .unwrap();
        assert_eq!(
            summary,
            Summary {
                dirs: 2,
                files: 2,
                errors: 0
            }
        );

        let out = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
        let lines: Vec<_> = out
            .lines()
            .map(|l| tree.relative(Path::new(l)))
            .collect();
        assert_eq!(lines, vec!["2", "2/b", "10", "10/a"]);
    }

    #[test]
    fn test_plain_summary_line() {
        let config = OutputConfig {
            use_color: false,
            summary: true,
        };
        let mut formatter = PlainFormatter::new(config, Buffer::no_color());
        formatter.output_path(Path::new("d"), true).unwrap();
        formatter.output_path(Path::new("d/f"), false).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
        assert_eq!(out, "d\nd/f\n\n1 directories, 1 files\n");
    }

    #[test]
    fn test_plain_colors_directories() {
        let mut formatter = PlainFormatter::new(OutputConfig::default(), Buffer::ansi());
        formatter.output_path(Path::new("dir"), true).unwrap();
        formatter.output_path(Path::new("file"), false).unwrap();

        let out = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
        assert!(out.contains("\u{1b}["), "directory should be colored: {out:?}");
        assert!(out.ends_with("file\n"));
    }

    #[test]
    fn test_json_lines() {
        let mut formatter = JsonLinesFormatter::new(Vec::new());
        let results: Vec<EntryResult> = vec![
            Ok(Entry {
                path: PathBuf::from("/nonexistent/plain"),
                is_dir: false,
            }),
            Err(FileError::NotADirectory {
                path: PathBuf::from("/x"),
            }),
        ];
        let summary = write_listing(results, &mut formatter).unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.errors, 1);

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        let values: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values[0]["type"], "file");
        assert_eq!(values[0]["path"], "/nonexistent/plain");
        assert_eq!(values[1]["type"], "error");
        assert_eq!(values[1]["path"], "/x");
        assert_eq!(values[1]["message"], "provided dir is not a dir: '/x'");
    }

    #[test]
    fn test_kind_comes_from_the_walk() {
        // neither path exists, so a fresh stat would call both files
        let results: Vec<EntryResult> = vec![
            Ok(Entry {
                path: PathBuf::from("/nonexistent/gone-dir"),
                is_dir: true,
            }),
            Ok(Entry {
                path: PathBuf::from("/nonexistent/gone-file"),
                is_dir: false,
            }),
        ];
        let mut formatter = PlainFormatter::new(OutputConfig::default(), Buffer::no_color());
        let summary = write_listing(results, &mut formatter).unwrap();
        assert_eq!(summary.dirs, 1);
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn test_json_error_without_path() {
        let mut formatter = JsonLinesFormatter::new(Vec::new());
        formatter
            .output_error(&FileError::GlobFailure {
                pattern: "x/*".to_string(),
                reason: "bad".to_string(),
            })
            .unwrap();
        let out = String::from_utf8(formatter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert!(value.get("path").is_none());
    }
}
