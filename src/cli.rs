//! CLI argument parsing for specgen.
//!
//! Uses clap derive macros for declarative argument definitions. Missing or
//! malformed arguments produce a usage message and a non-zero exit before
//! any pipeline work starts.

use crate::exit_codes;
use clap::Parser;
use clap::error::ErrorKind;

/// Specgen: generates a GDScript module and its GUT tests from one section
/// of the project spec.
///
/// Reads the module's section from `spec/modules.md`, asks the generation
/// service for an implementation and tests, and writes `game/<module>.gd`
/// and `tests/test_<module>.gd`.
#[derive(Parser, Debug)]
#[command(name = "specgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the module to generate. Must match a `### <Module>` header
    /// in the spec document.
    pub module: String,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// The usage message for bad or missing arguments goes to standard
    /// output, like the tool's confirmation output, and exits with the
    /// user-error code. Help and version requests also print to standard
    /// output but exit successfully.
    pub fn parse_args() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            print!("{}", err.render());
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
                _ => exit_codes::USER_ERROR,
            };
            std::process::exit(code);
        })
    }
}
