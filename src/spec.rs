//! Spec document loading and module section extraction.
//!
//! The spec is a markdown document where each module is described under a
//! `### <ModuleName>` header. A module's section runs from its own header
//! line up to (but excluding) the next header at depth 3 or shallower
//! (`#`, `##`, or `###`), or to the end of the document. Deeper headers
//! (`####` and below) belong to the section and do not terminate it.
//!
//! Extraction is a single line-cursor scan over the document; the header
//! match itself uses a compiled regex so the module name is matched
//! literally as a whole token.

use crate::error::{Result, SpecgenError};
use regex::Regex;
use std::path::Path;

/// Read the whole spec document into memory.
pub fn load_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        SpecgenError::IoError(format!(
            "failed to read spec document '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Extract the section for `module_name` from `document`.
///
/// Returns the section as a slice of the document, starting exactly at the
/// matching `### <module_name>` header line. Only the first matching header
/// is used. Returns `None` when no header matches.
///
/// The match is case-sensitive and whole-token: `Inventory` does not match
/// a `### InventorySystem` header.
pub fn extract_section<'a>(document: &'a str, module_name: &str) -> Option<&'a str> {
    let header = header_pattern(module_name);

    let mut start: Option<usize> = None;
    let mut pos = 0;
    for line in document.split_inclusive('\n') {
        let text = line.trim_end_matches('\n').trim_end_matches('\r');
        match start {
            None => {
                if header.is_match(text) {
                    start = Some(pos);
                }
            }
            Some(s) => {
                if closes_section(text) {
                    return Some(&document[s..pos]);
                }
            }
        }
        pos += line.len();
    }

    start.map(|s| &document[s..])
}

/// Extract the section for `module_name`, failing with `ModuleNotFound`
/// when the document has no matching header.
pub fn require_section<'a>(
    document: &'a str,
    module_name: &str,
    spec_path: &Path,
) -> Result<&'a str> {
    extract_section(document, module_name).ok_or_else(|| SpecgenError::ModuleNotFound {
        module: module_name.to_string(),
        spec_path: spec_path.display().to_string(),
    })
}

/// Compile the header pattern for a module name.
fn header_pattern(module_name: &str) -> Regex {
    // The name is escaped, so the pattern is always valid.
    Regex::new(&format!(r"^###\s+{}\s*$", regex::escape(module_name)))
        .expect("escaped module name forms a valid pattern")
}

/// A line closes the current section when it is a header at depth 1..=3.
fn closes_section(line: &str) -> bool {
    let marks = line.bytes().take_while(|&b| b == b'#').count();
    (1..=3).contains(&marks)
}
