//! Staged filesystem writes for specgen.
//!
//! Artifacts are written to a temporary file in the target directory, synced
//! to disk, and then renamed over the target. Staging and committing are
//! separate steps so the artifact pair can be committed only after every
//! payload is safely on disk; an I/O failure during staging leaves no target
//! touched.
//!
//! # Cross-Platform Behavior
//!
//! - **POSIX**: `rename()` replaces the destination atomically when source
//!   and destination are on the same filesystem.
//! - **Windows**: `rename()` fails when the destination exists; an existing
//!   target is removed first, trading a small non-atomic window for
//!   portability.
//!
//! On crash, a temporary file may remain (named `.{filename}.tmp`).

use crate::error::{Result, SpecgenError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A payload written to a temporary file, not yet renamed over its target.
///
/// Dropping an uncommitted stage removes the temporary file.
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

/// Stage `content` for `target`: write it to a temp file in the same
/// directory and sync it to disk. The target itself is untouched.
pub fn stage<P: AsRef<Path>>(target: P, content: &str) -> Result<StagedWrite> {
    let target = target.as_ref().to_path_buf();
    let temp_path = temp_path_for(&target)?;
    write_and_sync(&temp_path, content.as_bytes())?;
    Ok(StagedWrite {
        temp_path,
        target,
        committed: false,
    })
}

impl StagedWrite {
    /// Replace the target file with the staged content.
    pub fn commit(mut self) -> Result<()> {
        replace_file(&self.temp_path, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Temp file path in the same directory as the target.
///
/// Same-directory placement keeps the final rename on one filesystem.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SpecgenError::IoError(format!("invalid file path '{}'", target.display())))?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync it to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        SpecgenError::IoError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        SpecgenError::IoError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        SpecgenError::IoError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

#[cfg(unix)]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    // On POSIX, rename() replaces the destination if it exists.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SpecgenError::IoError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Sync the parent directory so the directory entry is persisted too.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(windows)]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_file(target).map_err(|e| {
            let _ = fs::remove_file(source);
            SpecgenError::IoError(format!(
                "failed to remove existing '{}': {}",
                target.display(),
                e
            ))
        })?;
    }

    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SpecgenError::IoError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })
}
