//! File copy used as the commit step of in-place rewrites

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{FileError, Result};

/// Copy the contents of `src` into `dst`, creating or truncating `dst`.
///
/// The destination is synced to disk before returning. Its parent directory
/// must already exist. On failure a partially written `dst` may remain.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let mut input = File::open(src).map_err(|e| FileError::io("open", src, e))?;
    let mut output = File::create(dst).map_err(|e| FileError::io("create", dst, e))?;

    let copied = io::copy(&mut input, &mut output).map_err(|e| FileError::io("copy", dst, e))?;
    output
        .sync_all()
        .map_err(|e| FileError::io("sync", dst, e))?;

    debug!(src = %src.display(), dst = %dst.display(), bytes = copied, "copied file");
    Ok(copied)
}
