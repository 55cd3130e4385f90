//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print a "N directories, M files" line after the listing.
    pub summary: bool,
}

/// Counts gathered while formatting a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub dirs: usize,
    pub files: usize,
    pub errors: usize,
}

impl Summary {
    pub(crate) fn record(&mut self, is_dir: bool) {
        if is_dir {
            self.dirs += 1;
        } else {
            self.files += 1;
        }
    }
}
