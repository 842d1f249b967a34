//! Error types for the specgen CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. Every error kind is fatal for the invocation; there is no
//! recovery or retry within a run.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for specgen operations.
///
/// Each variant corresponds to one pipeline stage and maps to a specific
/// exit code.
#[derive(Error, Debug)]
pub enum SpecgenError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// Required configuration (the API credential) is missing.
    #[error("{0}")]
    ConfigError(String),

    /// No matching section header in the spec document.
    #[error("no spec section found for module '{module}' in {spec_path}")]
    ModuleNotFound {
        /// The requested module name.
        module: String,
        /// The spec document that was searched.
        spec_path: String,
    },

    /// The generation service call failed (transport, auth, or service-side).
    #[error("generation service error for module '{module}': {message}")]
    ServiceError {
        /// The module being generated when the call failed.
        module: String,
        /// Transport or service diagnostic.
        message: String,
    },

    /// The service reply was not the expected two-field record.
    ///
    /// The raw reply is carried in the message so the offending text can be
    /// inspected without re-running the generation.
    #[error("invalid structured reply for module '{module}': {message}\nraw reply:\n{raw}")]
    MalformedReply {
        /// The module being generated.
        module: String,
        /// The decode error.
        message: String,
        /// The full raw reply text.
        raw: String,
    },

    /// Filesystem failure while reading the spec or writing artifacts.
    #[error("{0}")]
    IoError(String),
}

impl SpecgenError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpecgenError::UserError(_) => exit_codes::USER_ERROR,
            SpecgenError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            SpecgenError::ModuleNotFound { .. } => exit_codes::SPEC_FAILURE,
            SpecgenError::ServiceError { .. } => exit_codes::SERVICE_FAILURE,
            SpecgenError::MalformedReply { .. } => exit_codes::REPLY_FAILURE,
            SpecgenError::IoError(_) => exit_codes::WRITE_FAILURE,
        }
    }
}

/// Result type alias for specgen operations.
pub type Result<T> = std::result::Result<T, SpecgenError>;
