//! Directory listing
//!
//! Listings are lazy iterators of [`PathResult`]s that walk depth-first in
//! pre-order, optionally sorting every directory level numerically:
//!
//! - `FileList`: the general walker, configured with a `ListConfig`
//! - `get_file_list` / `get_num_sort_file_list`: files and optionally directories
//! - `get_dir_list` / `get_num_sort_dir_list`: directories only, always recursive
//! - `read_dir_num_sort`: the entries of a single directory, numerically sorted
//! - `spawn`: runs any listing on a worker thread behind a rendezvous channel

mod config;
mod expand;
mod lister;
mod producer;

pub use config::{ListConfig, SortDirection, SortMode};
pub use expand::{base_name, expand_children, read_dir_num_sort};
pub use lister::{
    Entries, Entry, EntryResult, FileList, PathResult, get_dir_list, get_file_list,
    get_num_sort_dir_list, get_num_sort_file_list, list_files, list_files_num_sort,
};
pub use producer::{Producer, spawn};
