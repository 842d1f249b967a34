//! Strict decoding of the generation reply.
//!
//! The service is instructed to answer with a single JSON object holding
//! exactly two string fields, `code` and `tests`. The parser does not trust
//! that instruction: anything that is not precisely that record (JSON syntax
//! errors, missing fields, extra fields, non-string values) is one fatal
//! `MalformedReply`. No repair heuristics are applied; a reply wrapped in
//! markdown fences or prose fails like any other malformed input.

use crate::error::{Result, SpecgenError};
use serde::Deserialize;

/// The structured record the service must return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationReply {
    /// Generated implementation source, written to `game/<module>.gd`.
    pub code: String,
    /// Generated test source, written to `tests/test_<module>.gd`.
    pub tests: String,
}

/// Decode `raw` into a [`GenerationReply`].
///
/// On failure the raw reply is carried in the error for diagnosis.
pub fn parse_reply(module_name: &str, raw: &str) -> Result<GenerationReply> {
    serde_json::from_str(raw).map_err(|e| SpecgenError::MalformedReply {
        module: module_name.to_string(),
        message: e.to_string(),
        raw: raw.to_string(),
    })
}
