//! Runtime configuration for specgen.
//!
//! All fixed paths and service parameters are defined here, together with
//! the credential resolved once at process start. The credential is carried
//! in the `Config` value and threaded into the service client explicitly,
//! never read from the environment at call time, so tests can construct a
//! `Config` with a fake key without touching the process environment.

use crate::error::{Result, SpecgenError};
use std::path::PathBuf;

/// Environment variable holding the generation-service API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Spec document location, relative to the invocation directory.
pub const SPEC_PATH: &str = "spec/modules.md";

/// Output directory for generated module code.
pub const CODE_DIR: &str = "game";

/// Output directory for generated module tests.
pub const TEST_DIR: &str = "tests";

/// File extension of generated artifacts (GDScript).
pub const ARTIFACT_EXT: &str = "gd";

/// Model used for every generation request.
pub const MODEL: &str = "gpt-4";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generation-service API key.
    pub api_key: String,
    /// Model identifier sent with the generation request.
    pub model: String,
    /// Path of the spec document to read.
    pub spec_path: PathBuf,
    /// Directory receiving `<module>.gd`.
    pub code_dir: PathBuf,
    /// Directory receiving `test_<module>.gd`.
    pub test_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Fails with `ConfigError` when the API key variable is unset or blank.
    /// This runs before any file or network work so a missing credential
    /// aborts the invocation immediately.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            SpecgenError::ConfigError(format!(
                "environment variable {} is not set",
                API_KEY_VAR
            ))
        })?;

        if api_key.trim().is_empty() {
            return Err(SpecgenError::ConfigError(format!(
                "environment variable {} is empty",
                API_KEY_VAR
            )));
        }

        Ok(Self::with_api_key(api_key))
    }

    /// Build a configuration with the given key and all default paths.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            model: MODEL.to_string(),
            spec_path: PathBuf::from(SPEC_PATH),
            code_dir: PathBuf::from(CODE_DIR),
            test_dir: PathBuf::from(TEST_DIR),
        }
    }
}
