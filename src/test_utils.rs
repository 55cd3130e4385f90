//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests, benchmarks and the `test-utils`
//! feature.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a tree with one directory per name, each holding `per_dir` files.
    ///
    /// File names are numbered, so the tree exercises numeric ordering.
    pub fn numbered(dirs: usize, per_dir: usize) -> Self {
        let tree = Self::new();
        for d in 1..=dirs {
            tree.add_dir(&d.to_string());
            for f in 1..=per_dir {
                tree.add_file(&format!("{d}/{f}"), "");
            }
        }
        tree
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an (empty) directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Render `path` relative to the tree root with `/` separators.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(self.dir.path())
            .expect("path outside test tree")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
