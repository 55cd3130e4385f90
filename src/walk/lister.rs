//! FileList - lazy depth-first listing of a directory tree

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{FileError, Result};
use crate::sort::sort_same_dir_files_numerically;

use super::config::{ListConfig, SortMode};
use super::expand::{expand_children, require_dir, stat};

/// One emission of a traversal: either a path or the failure that replaced it.
pub type PathResult = Result<PathBuf>;

/// A listed path with the kind the walk saw when it stat'ed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub is_dir: bool,
}

pub type EntryResult = Result<Entry>;

/// Cursor over the children of one directory level.
struct Level {
    children: std::vec::IntoIter<PathBuf>,
    /// Canonical path of the directory, used to spot symlink loops.
    canonical: Option<PathBuf>,
}

/// Lazy, depth-first, pre-order listing of a directory tree.
///
/// Each call to `next` does only the filesystem work needed for the next
/// item. Entry-level failures are yielded inline and the walk continues;
/// a failure on the root ends the sequence. Dropping the iterator stops
/// the walk.
pub struct FileList {
    config: ListConfig,
    root: Option<PathBuf>,
    stack: Vec<Level>,
    /// Directory reached last that still has to be entered.
    descend: Option<PathBuf>,
}

impl FileList {
    pub fn new(root: impl Into<PathBuf>, config: ListConfig) -> Self {
        Self {
            config,
            root: Some(root.into()),
            stack: Vec::new(),
            descend: None,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Stat, expand and optionally sort one directory, pushing its cursor.
    fn enter(&mut self, dir: &Path) -> Result<()> {
        require_dir(dir)?;
        let mut children = expand_children(dir)?;
        if self.config.sort == SortMode::Numeric {
            children =
                sort_same_dir_files_numerically(children, self.config.direction.is_reverse());
        }
        debug!(
            dir = %dir.display(),
            children = children.len(),
            depth = self.stack.len(),
            "entering directory"
        );
        self.stack.push(Level {
            children: children.into_iter(),
            canonical: fs::canonicalize(dir).ok(),
        });
        Ok(())
    }

    /// Whether `dir` resolves to the directory of any level currently open.
    fn is_loop(&self, dir: &Path) -> bool {
        let Ok(canonical) = fs::canonicalize(dir) else {
            return false;
        };
        self.stack
            .iter()
            .any(|level| level.canonical.as_deref() == Some(canonical.as_path()))
    }
}

impl FileList {
    /// Yield entries with their kind instead of bare paths.
    pub fn entries(self) -> Entries {
        Entries(self)
    }

    fn next_entry(&mut self) -> Option<EntryResult> {
        if let Some(root) = self.root.take() {
            if let Err(e) = self.enter(&root) {
                return Some(Err(e));
            }
        }

        loop {
            // a subdirectory is entered only after it has been emitted, so
            // its descendants always follow it
            if let Some(dir) = self.descend.take() {
                if self.is_loop(&dir) {
                    debug!(path = %dir.display(), "symlink loop, not descending");
                    return Some(Err(FileError::SymlinkLoop { path: dir }));
                }
                if let Err(e) = self.enter(&dir) {
                    return Some(Err(e));
                }
            }

            let depth = self.stack.len().checked_sub(1)?;
            let Some(child) = self.stack.last_mut()?.children.next() else {
                self.stack.pop();
                continue;
            };

            let meta = match stat(&child) {
                Ok(meta) => meta,
                Err(e) => return Some(Err(e)),
            };

            if !meta.is_dir() {
                if self.config.dirs_only {
                    continue;
                }
                trace!(path = %child.display(), "file");
                return Some(Ok(Entry {
                    path: child,
                    is_dir: false,
                }));
            }

            if self.config.descends_at(depth) {
                self.descend = Some(child.clone());
            }
            if self.config.emits_dirs() {
                trace!(path = %child.display(), "directory");
                return Some(Ok(Entry {
                    path: child,
                    is_dir: true,
                }));
            }
        }
    }
}

impl Iterator for FileList {
    type Item = PathResult;

    fn next(&mut self) -> Option<PathResult> {
        self.next_entry().map(|r| r.map(|entry| entry.path))
    }
}

impl std::iter::FusedIterator for FileList {}

/// A [`FileList`] that yields [`Entry`] values, see [`FileList::entries`].
pub struct Entries(FileList);

impl Iterator for Entries {
    type Item = EntryResult;

    fn next(&mut self) -> Option<EntryResult> {
        self.0.next_entry()
    }
}

impl std::iter::FusedIterator for Entries {}

/// List `root` in glob order.
pub fn get_file_list(root: impl Into<PathBuf>, include_dirs: bool, recursive: bool) -> FileList {
    FileList::new(
        root,
        ListConfig {
            include_dirs,
            recursive,
            ..Default::default()
        },
    )
}

/// List `root` with every directory level numerically sorted.
pub fn get_num_sort_file_list(
    root: impl Into<PathBuf>,
    include_dirs: bool,
    recursive: bool,
    reverse: bool,
) -> FileList {
    FileList::new(
        root,
        ListConfig {
            include_dirs,
            recursive,
            ..Default::default()
        }
        .numeric(reverse),
    )
}

/// Recursively list only the directories below `root`, in glob order.
pub fn get_dir_list(root: impl Into<PathBuf>) -> FileList {
    FileList::new(root, ListConfig::dirs_only())
}

/// Recursively list only the directories below `root`, numerically sorted.
pub fn get_num_sort_dir_list(root: impl Into<PathBuf>, reverse: bool) -> FileList {
    FileList::new(root, ListConfig::dirs_only().numeric(reverse))
}

/// Collect a listing, stopping at the first failure of any kind.
pub fn list_files(root: impl Into<PathBuf>, config: ListConfig) -> Result<Vec<PathBuf>> {
    FileList::new(root, config).collect()
}

/// Eager form of [`get_num_sort_file_list`], stopping at the first failure.
pub fn list_files_num_sort(
    root: impl Into<PathBuf>,
    include_dirs: bool,
    recursive: bool,
    reverse: bool,
) -> Result<Vec<PathBuf>> {
    get_num_sort_file_list(root, include_dirs, recursive, reverse).collect()
}
