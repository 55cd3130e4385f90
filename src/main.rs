//! CLI entry point for numwalk

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use numwalk::output::{Summary, write_listing};
use numwalk::walk::spawn;
use numwalk::{
    DEFAULT_BUFFER_SIZE, EntryResult, FileError, FileList, JsonLinesFormatter, ListConfig,
    OutputConfig, PlainFormatter, Replacement, SortDirection, SortMode, copy_file, read_lines,
};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "NUMWALK_LOG";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "numwalk")]
#[command(about = "Numerically sorted directory listings and safe in-place line replacement")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List files and directories
    Ls(LsArgs),
    /// List directories only (always recursive)
    Dirs(DirsArgs),
    /// Print the lines of a file
    Cat(CatArgs),
    /// Copy a file and sync it to disk
    Cp(CpArgs),
    /// Replace a literal string in every line of the given files
    Replace(ReplaceArgs),
}

/// Ordering flags shared by the listing commands
#[derive(Args, Debug)]
struct SortArgs {
    /// Sort each directory level numerically (1, 2, 10 instead of 1, 10, 2)
    #[arg(short = 'n', long = "numeric")]
    numeric: bool,

    /// Reverse the numeric order
    #[arg(long = "reverse", requires = "numeric")]
    reverse: bool,
}

impl SortArgs {
    fn apply(&self, config: &mut ListConfig) {
        if self.numeric {
            config.sort = SortMode::Numeric;
            config.direction = SortDirection::from_reverse(self.reverse);
        }
    }
}

#[derive(Args, Debug)]
struct LsArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Do not print directories
    #[arg(short = 'f', long = "files-only")]
    files_only: bool,

    /// Descend only N levels deep, N >= 1 (implies -r)
    #[arg(short = 'L', long = "level", value_parser = clap::value_parser!(u64).range(1..))]
    level: Option<u64>,

    #[command(flatten)]
    sort: SortArgs,

    /// Output one JSON object per entry
    #[arg(long = "json")]
    json: bool,

    /// Print directory and file counts at the end
    #[arg(long = "summary", conflicts_with = "json")]
    summary: bool,
}

#[derive(Args, Debug)]
struct DirsArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(flatten)]
    sort: SortArgs,

    /// Output one JSON object per entry
    #[arg(long = "json")]
    json: bool,

    /// Print the directory count at the end
    #[arg(long = "summary", conflicts_with = "json")]
    summary: bool,
}

#[derive(Args, Debug)]
struct CatArgs {
    file: PathBuf,

    /// Maximum line length in bytes, terminator included
    #[arg(short = 'b', long = "buffer-size", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
}

#[derive(Args, Debug)]
struct CpArgs {
    src: PathBuf,
    dst: PathBuf,
}

#[derive(Args, Debug)]
struct ReplaceArgs {
    /// Literal text to search for
    old: String,

    /// Replacement text
    new: String,

    /// Files to rewrite in place
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Replace at most N occurrences per line (0 or negative = all)
    #[arg(short = 'c', long = "count", default_value_t = 0, allow_negative_numbers = true)]
    count: i64,

    /// Maximum line length in bytes, terminator included
    #[arg(short = 'b', long = "buffer-size", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Number of files rewritten in parallel
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("numwalk={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print a listing and return whether it completed without failures.
fn print_listing(
    results: impl Iterator<Item = EntryResult>,
    json: bool,
    config: OutputConfig,
) -> io::Result<bool> {
    let summary: Summary = if json {
        write_listing(results, &mut JsonLinesFormatter::stdout())?
    } else {
        write_listing(results, &mut PlainFormatter::stdout(config))?
    };
    tracing::info!(
        dirs = summary.dirs,
        files = summary.files,
        errors = summary.errors,
        "listing finished"
    );
    Ok(summary.errors == 0)
}

fn run_ls(args: &LsArgs, use_color: bool) -> io::Result<bool> {
    let mut config = ListConfig {
        include_dirs: !args.files_only,
        recursive: args.recursive || args.level.is_some(),
        max_depth: args
            .level
            .map(|level| usize::try_from(level - 1).unwrap_or(usize::MAX)),
        ..Default::default()
    };
    args.sort.apply(&mut config);

    let output = OutputConfig {
        use_color,
        summary: args.summary,
    };
    // the walk runs on its own thread and hands entries over one at a time
    print_listing(
        spawn(FileList::new(&args.path, config).entries()),
        args.json,
        output,
    )
}

fn run_dirs(args: &DirsArgs, use_color: bool) -> io::Result<bool> {
    let mut config = ListConfig::dirs_only();
    args.sort.apply(&mut config);

    let output = OutputConfig {
        use_color,
        summary: args.summary,
    };
    print_listing(
        spawn(FileList::new(&args.path, config).entries()),
        args.json,
        output,
    )
}

fn run_cat(args: &CatArgs) -> io::Result<bool> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for line in read_lines(&args.file, args.buffer_size) {
        match line {
            Ok(line) => {
                out.write_all(&line)?;
                out.write_all(b"\n")?;
            }
            Err(e) => {
                out.flush()?;
                report(&e);
                return Ok(false);
            }
        }
    }
    out.flush()?;
    Ok(true)
}

fn run_cp(args: &CpArgs) -> bool {
    match copy_file(&args.src, &args.dst) {
        Ok(bytes) => {
            tracing::info!(bytes, "copied");
            true
        }
        Err(e) => {
            report(&e);
            false
        }
    }
}

fn rewrite_all(
    replacement: &Replacement,
    files: &[PathBuf],
    jobs: usize,
) -> Vec<Result<usize, FileError>> {
    let apply = |file: &PathBuf| replacement.apply(file);

    if jobs == 1 {
        return files.iter().map(apply).collect();
    }
    if jobs == 0 {
        return files.par_iter().map(apply).collect();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| files.par_iter().map(apply).collect()),
        // Fall back to rayon's global pool if custom pool creation fails
        Err(_) => files.par_iter().map(apply).collect(),
    }
}

fn run_replace(args: &ReplaceArgs) -> io::Result<bool> {
    let replacement = Replacement::new(args.old.as_str(), args.new.as_str())
        .with_limit(args.count)
        .with_buffer_size(args.buffer_size);

    let results = rewrite_all(&replacement, &args.files, args.jobs);

    let mut ok = true;
    let mut out = io::stdout().lock();
    for (file, result) in args.files.iter().zip(results) {
        match result {
            Ok(changed) => writeln!(out, "{}: {} lines changed", file.display(), changed)?,
            Err(e) => {
                report(&e);
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn report(err: &FileError) {
    eprintln!("numwalk: {}", err);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let use_color = should_use_color(cli.color);

    let result = match &cli.command {
        Command::Ls(args) => run_ls(args, use_color),
        Command::Dirs(args) => run_dirs(args, use_color),
        Command::Cat(args) => run_cat(args),
        Command::Cp(args) => Ok(run_cp(args)),
        Command::Replace(args) => run_replace(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("numwalk: error writing output: {}", e);
            process::exit(1);
        }
    }
}
