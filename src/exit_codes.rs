//! Exit code constants for the specgen CLI.
//!
//! Each fatal condition in the pipeline maps to its own code so callers
//! (CI jobs, wrapper scripts) can tell the failure stages apart:
//! - 0: Success
//! - 1: User error (bad arguments)
//! - 2: Configuration failure (missing credential)
//! - 3: Spec failure (module section not found)
//! - 4: Generation service failure
//! - 5: Malformed service reply
//! - 6: Artifact write failure

/// Successful execution: both artifacts written.
pub const SUCCESS: i32 = 0;

/// User error: bad or missing arguments.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: required credential not set.
pub const CONFIG_FAILURE: i32 = 2;

/// Spec failure: no section header matches the requested module.
pub const SPEC_FAILURE: i32 = 3;

/// Generation service failure: transport, auth, or service-side error.
pub const SERVICE_FAILURE: i32 = 4;

/// Malformed reply: service output was not the expected two-field record.
pub const REPLY_FAILURE: i32 = 5;

/// Artifact write failure: could not create directories or write files.
pub const WRITE_FAILURE: i32 = 6;
