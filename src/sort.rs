//! Numeric-aware ordering for sibling paths
//!
//! Names that both parse as integers compare by value, so `1, 2, 10` sort as
//! numbers instead of `1, 10, 2`. Any pair involving a non-numeric name falls
//! back to byte-wise comparison.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A path paired with its basename so sorting does not re-derive it per comparison.
#[derive(Debug, Clone)]
pub struct FileParts {
    pub full: PathBuf,
    pub base: OsString,
}

impl FileParts {
    pub fn new(full: PathBuf) -> Self {
        let base = full
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| full.as_os_str().to_os_string());
        Self { full, base }
    }
}

fn parse_int(name: &OsStr) -> Option<i64> {
    name.to_str()?.parse().ok()
}

/// Compare two basenames numerically when both are integers, lexicographically otherwise.
pub fn numeric_cmp(a: &OsStr, b: &OsStr) -> Ordering {
    match (parse_int(a), parse_int(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        _ => a.as_encoded_bytes().cmp(b.as_encoded_bytes()),
    }
}

/// Sort paths that share a parent directory by basename using [`numeric_cmp`].
///
/// Ascending order is stable. With `reverse` the comparator is flipped and
/// ties still keep their input order.
pub fn sort_same_dir_files_numerically(files: Vec<PathBuf>, reverse: bool) -> Vec<PathBuf> {
    let parts: Vec<FileParts> = files.into_iter().map(FileParts::new).collect();
    sort_by_name_numerically(parts, |p| p.base.as_os_str(), reverse)
        .into_iter()
        .map(|p| p.full)
        .collect()
}

/// Sort any items by a name using [`numeric_cmp`], with the same stability
/// rules as [`sort_same_dir_files_numerically`].
pub(crate) fn sort_by_name_numerically<T, K>(items: Vec<T>, name: K, reverse: bool) -> Vec<T>
where
    K: Fn(&T) -> &OsStr,
{
    if reverse {
        merge_sort_by(items, &|a: &T, b: &T| {
            numeric_cmp(name(b), name(a)) == Ordering::Less
        })
    } else {
        merge_sort_by(items, &|a: &T, b: &T| {
            numeric_cmp(name(a), name(b)) == Ordering::Less
        })
    }
}

/// Convenience wrapper for borrowed paths.
pub fn sort_paths_numerically<P: AsRef<Path>>(files: &[P], reverse: bool) -> Vec<PathBuf> {
    sort_same_dir_files_numerically(
        files.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        reverse,
    )
}

// Mixed numeric and non-numeric names do not form a total order, which the
// std sorts are allowed to panic on. A plain merge sort only ever asks
// "is b before a" and stays deterministic whatever the answers are.
fn merge_sort_by<T, F>(mut items: Vec<T>, less: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, less);
    let right = merge_sort_by(right, less);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // take from the left on ties to keep the sort stable
        let next = if less(r, l) { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
