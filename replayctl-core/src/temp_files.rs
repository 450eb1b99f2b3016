//! Temporary file management utilities.
//!
//! Output artifacts (overlay PNG, composited video, rewritten replay lists)
//! are staged next to their destination and renamed into place on success,
//! so a failure never leaves a partial file at the target path.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Creates a staging file in `dir` with prefix and extension. Auto-deleted
/// when dropped unless persisted.
pub fn create_staging_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Returns a unique path in `dir` with a random suffix. Does not create the
/// file; used for outputs written by an external process.
pub fn unique_sibling_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    use rand::distributions::Alphanumeric;
    use rand::{Rng, thread_rng};

    let random_suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let filename = format!("{prefix}_{random_suffix}.{extension}");
    dir.join(filename)
}

/// The directory a staging file for `target` should live in. Falls back to
/// the current directory for bare filenames.
pub fn staging_dir_for(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
