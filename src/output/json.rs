//! JSON lines output

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::FileError;

use super::PathFormatter;
use super::config::Summary;

/// One emitted entry: a path or a failure, never both.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonEntry<'a> {
    File {
        path: &'a Path,
    },
    Dir {
        path: &'a Path,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<&'a Path>,
    },
}

/// Writes one JSON object per line.
pub struct JsonLinesFormatter<W: Write = io::Stdout> {
    out: W,
    summary: Summary,
}

impl JsonLinesFormatter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: Summary::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: &JsonEntry<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry).map_err(io::Error::other)?;
        writeln!(self.out)
    }
}

impl<W: Write> PathFormatter for JsonLinesFormatter<W> {
    fn output_path(&mut self, path: &Path, is_dir: bool) -> io::Result<()> {
        self.summary.record(is_dir);
        let entry = if is_dir {
            JsonEntry::Dir { path }
        } else {
            JsonEntry::File { path }
        };
        self.write_entry(&entry)
    }

    fn output_error(&mut self, err: &FileError) -> io::Result<()> {
        self.summary.errors += 1;
        self.write_entry(&JsonEntry::Error {
            message: err.to_string(),
            path: err.path(),
        })
    }

    fn finish(&mut self) -> io::Result<Summary> {
        self.out.flush()?;
        Ok(self.summary)
    }
}
