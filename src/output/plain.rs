//! Plain one-path-per-line output

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::FileError;

use super::PathFormatter;
use super::config::{OutputConfig, Summary};

/// Writes one path per line, directories in bold blue when color is on.
/// Failures go to stderr so stdout stays a clean list.
pub struct PlainFormatter<W: WriteColor = StandardStream> {
    config: OutputConfig,
    out: W,
    summary: Summary,
}

impl PlainFormatter<StandardStream> {
    pub fn stdout(config: OutputConfig) -> Self {
        // use_color already accounts for the terminal and NO_COLOR
        let choice = if config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::new(config, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> PlainFormatter<W> {
    pub fn new(config: OutputConfig, out: W) -> Self {
        Self {
            config,
            out,
            summary: Summary::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> PathFormatter for PlainFormatter<W> {
    fn output_path(&mut self, path: &Path, is_dir: bool) -> io::Result<()> {
        self.summary.record(is_dir);
        if is_dir {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            write!(self.out, "{}", path.display())?;
            self.out.reset()?;
            writeln!(self.out)
        } else {
            writeln!(self.out, "{}", path.display())
        }
    }

    fn output_error(&mut self, err: &FileError) -> io::Result<()> {
        self.summary.errors += 1;
        eprintln!("numwalk: {}", err);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<Summary> {
        if self.config.summary {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "{} directories, {} files",
                self.summary.dirs, self.summary.files
            )?;
        }
        self.out.flush()?;
        Ok(self.summary)
    }
}
