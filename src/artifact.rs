//! Artifact persistence: writes the generated code and tests to disk.
//!
//! Paths are derived deterministically from the module name: the
//! implementation goes to `game/<module>.gd` and the tests to
//! `tests/test_<module>.gd`. Directories are created on demand; existing
//! artifacts are overwritten without backup.

use crate::config::{ARTIFACT_EXT, Config};
use crate::error::{Result, SpecgenError};
use crate::fs;
use crate::reply::GenerationReply;
use std::path::{Path, PathBuf};

/// Paths of the two files produced for a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The generated implementation file.
    pub code_path: PathBuf,
    /// The generated test file.
    pub test_path: PathBuf,
}

/// Derive both artifact paths for a module.
pub fn artifact_paths(config: &Config, module_name: &str) -> ArtifactPaths {
    ArtifactPaths {
        code_path: config
            .code_dir
            .join(format!("{}.{}", module_name, ARTIFACT_EXT)),
        test_path: config
            .test_dir
            .join(format!("test_{}.{}", module_name, ARTIFACT_EXT)),
    }
}

/// Write both artifacts for a module.
///
/// Both target paths are validated and both payloads staged to temp files
/// before either target is replaced, so an I/O failure cannot leave only
/// one of the pair updated. Directory creation is idempotent.
pub fn write_artifacts(
    config: &Config,
    module_name: &str,
    reply: &GenerationReply,
) -> Result<ArtifactPaths> {
    ensure_dir(&config.code_dir)?;
    ensure_dir(&config.test_dir)?;

    let paths = artifact_paths(config, module_name);
    ensure_replaceable(&paths.code_path)?;
    ensure_replaceable(&paths.test_path)?;

    let staged_code = fs::stage(&paths.code_path, &reply.code)?;
    let staged_tests = fs::stage(&paths.test_path, &reply.tests)?;

    staged_code.commit()?;
    staged_tests.commit()?;

    Ok(paths)
}

/// A target can only be renamed over when it is absent or a regular file.
/// Both targets are checked before either commit, so a doomed pair fails
/// while every previous artifact is still intact.
fn ensure_replaceable(path: &Path) -> Result<()> {
    if path.exists() && !path.is_file() {
        return Err(SpecgenError::IoError(format!(
            "artifact path '{}' exists and is not a regular file",
            path.display()
        )));
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        SpecgenError::IoError(format!(
            "failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })
}
