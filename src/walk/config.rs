//! Configuration types for directory listing

/// How siblings within one directory level are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Glob order (sorted by name).
    #[default]
    None,
    /// Numeric-aware basename order, see [`crate::sort::numeric_cmp`].
    Numeric,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn is_reverse(self) -> bool {
        self == SortDirection::Desc
    }
}

/// Configuration for one traversal call.
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Emit directories as well as files (ignored when `dirs_only` is set).
    pub include_dirs: bool,
    pub recursive: bool,
    pub sort: SortMode,
    pub direction: SortDirection,
    /// Emit only directories. Regular files are skipped entirely.
    pub dirs_only: bool,
    /// Maximum recursion depth below the root. `Some(0)` lists only the
    /// root's own children.
    pub max_depth: Option<usize>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            include_dirs: true,
            recursive: false,
            sort: SortMode::None,
            direction: SortDirection::Asc,
            dirs_only: false,
            max_depth: None,
        }
    }
}

impl ListConfig {
    /// Configuration used by the directory-only listers: always recursive.
    pub fn dirs_only() -> Self {
        Self {
            include_dirs: true,
            recursive: true,
            dirs_only: true,
            ..Default::default()
        }
    }

    pub fn numeric(mut self, reverse: bool) -> Self {
        self.sort = SortMode::Numeric;
        self.direction = SortDirection::from_reverse(reverse);
        self
    }

    pub(crate) fn emits_dirs(&self) -> bool {
        self.dirs_only || self.include_dirs
    }

    pub(crate) fn descends_at(&self, depth: usize) -> bool {
        self.recursive && self.max_depth.is_none_or(|max| depth < max)
    }
}
