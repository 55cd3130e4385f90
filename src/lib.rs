//! numwalk - numerically sorted directory walking and safe line rewriting

pub mod error;
pub mod file_utils;
pub mod lines;
pub mod output;
pub mod rewrite;
pub mod sort;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{FileError, Result};
pub use file_utils::copy_file;
pub use lines::{DEFAULT_BUFFER_SIZE, LineReader, read_lines};
pub use output::{JsonLinesFormatter, OutputConfig, PathFormatter, PlainFormatter};
pub use rewrite::{Replacement, string_replace};
pub use sort::{FileParts, numeric_cmp, sort_same_dir_files_numerically};
pub use walk::{
    Entry, EntryResult, FileList, ListConfig, PathResult, SortDirection, SortMode, get_dir_list,
    get_file_list, get_num_sort_dir_list, get_num_sort_file_list, list_files, list_files_num_sort,
    read_dir_num_sort,
};
