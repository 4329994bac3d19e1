// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Atomic output writer.
//!
//! Rendered text goes to a temporary file next to the target and is renamed
//! over it, so readers see either the old module or the new one. Identical
//! content is never rewritten, which keeps file timestamps stable for build
//! tools.

use std::{
    fs,
    io::{self, Write},
    path::Path
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::GenerateError;

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// The file did not exist and was created.
    Created,
    /// The file existed with different content and was replaced.
    Updated,
    /// The file already held exactly this content.
    Unchanged
}

impl WriteOutcome {
    /// Whether the file on disk changed.
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Compare `content` with the file at `path` without writing.
///
/// # Errors
///
/// [`GenerateError::Write`] if the existing file cannot be read.
pub fn compare(path: &Path, content: &str) -> Result<WriteOutcome, GenerateError> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => Ok(WriteOutcome::Unchanged),
        Ok(_) => Ok(WriteOutcome::Updated),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(WriteOutcome::Created),
        Err(source) => Err(write_error(path, source))
    }
}

/// Atomically write `content` to `path` unless it already matches.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// [`GenerateError::Write`] on any I/O failure. The target is left as it
/// was.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, GenerateError> {
    let outcome = compare(path, content)?;
    if !outcome.changed() {
        debug!(path = %path.display(), "output unchanged");
        return Ok(outcome);
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };
    fs::create_dir_all(parent).map_err(|source| write_error(path, source))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|source| write_error(path, source))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|source| write_error(path, source))?;
    temp.persist(path)
        .map_err(|err| write_error(path, err.error))?;

    debug!(path = %path.display(), ?outcome, "output written");
    Ok(outcome)
}

fn write_error(path: &Path, source: io::Error) -> GenerateError {
    GenerateError::Write {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_then_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.rs");

        assert_eq!(write_if_changed(&path, "a").unwrap(), WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a");

        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(write_if_changed(&path, "a").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn replaces_different_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rs");
        fs::write(&path, "old").unwrap();

        assert_eq!(write_if_changed(&path, "new").unwrap(), WriteOutcome::Updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn replaces_content_that_is_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rs");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert_eq!(compare(&path, "new").unwrap(), WriteOutcome::Updated);
        assert_eq!(write_if_changed(&path, "new").unwrap(), WriteOutcome::Updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rs");
        write_if_changed(&path, "content").unwrap();
        write_if_changed(&path, "other").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn compare_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rs");
        assert_eq!(compare(&path, "x").unwrap(), WriteOutcome::Created);
        assert!(!path.exists());
    }
}
