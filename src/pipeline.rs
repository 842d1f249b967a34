//! The generation pipeline for one module.
//!
//! Stages run strictly in sequence: extract the module's spec section,
//! build the prompt, call the generation service, decode the reply, persist
//! the artifact pair. The first failing stage aborts the invocation with a
//! stage-specific error; there is no retry and no partial output. Every
//! invocation starts fresh, so repeated runs for the same module simply
//! overwrite the previous artifacts.

use crate::artifact::{self, ArtifactPaths};
use crate::client::Generator;
use crate::config::Config;
use crate::error::{Result, SpecgenError};
use crate::prompt;
use crate::reply;
use crate::spec;

/// Run the full pipeline for `module_name`.
///
/// On success both artifact files are on disk and their paths are returned.
pub fn run(config: &Config, generator: &dyn Generator, module_name: &str) -> Result<ArtifactPaths> {
    if module_name.trim().is_empty() {
        return Err(SpecgenError::UserError(
            "module name must not be empty".to_string(),
        ));
    }

    let document = spec::load_document(&config.spec_path)?;
    let section = spec::require_section(&document, module_name, &config.spec_path)?;

    let prompt = prompt::build_prompt(module_name, section);
    let raw_reply = generator.generate(module_name, &prompt)?;
    let reply = reply::parse_reply(module_name, &raw_reply)?;

    artifact::write_artifacts(config, module_name, &reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Canned generation double: records the prompt it was given and
    /// returns a fixed reply.
    struct CannedGenerator {
        reply: String,
        prompts: RefCell<Vec<String>>,
    }

    impl CannedGenerator {
        fn returning(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.borrow().len()
        }
    }

    impl Generator for CannedGenerator {
        fn generate(&self, _module_name: &str, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Generation double that fails like a service outage.
    struct FailingGenerator;

    impl Generator for FailingGenerator {
        fn generate(&self, module_name: &str, _prompt: &str) -> Result<String> {
            Err(SpecgenError::ServiceError {
                module: module_name.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    fn workspace_with_spec(spec_text: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let spec_dir = dir.path().join("spec");
        std::fs::create_dir_all(&spec_dir).unwrap();
        std::fs::write(spec_dir.join("modules.md"), spec_text).unwrap();

        let mut config = Config::with_api_key("test-key".to_string());
        config.spec_path = spec_dir.join("modules.md");
        config.code_dir = dir.path().join("game");
        config.test_dir = dir.path().join("tests");
        (dir, config)
    }

    fn no_artifacts_written(config: &Config) -> bool {
        !config.code_dir.exists() && !config.test_dir.exists()
    }

    #[test]
    fn happy_path_writes_both_artifacts() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");
        let generator =
            CannedGenerator::returning(r#"{"code": "x = 1", "tests": "assert x == 1"}"#);

        let paths = run(&config, &generator, "Inventory").unwrap();

        assert_eq!(std::fs::read_to_string(&paths.code_path).unwrap(), "x = 1");
        assert_eq!(
            std::fs::read_to_string(&paths.test_path).unwrap(),
            "assert x == 1"
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn prompt_sent_to_the_service_contains_the_extracted_section() {
        let spec = "### Inventory\nSome spec text\n### NextModule\nOther text\n";
        let (_dir, config) = workspace_with_spec(spec);
        let generator = CannedGenerator::returning(r#"{"code": "a", "tests": "b"}"#);

        run(&config, &generator, "Inventory").unwrap();

        let prompts = generator.prompts.borrow();
        assert!(prompts[0].contains("### Inventory\nSome spec text\n"));
        assert!(!prompts[0].contains("NextModule"));
    }

    #[test]
    fn unknown_module_fails_before_any_generation() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");
        let generator = CannedGenerator::returning(r#"{"code": "a", "tests": "b"}"#);

        let err = run(&config, &generator, "Shop").unwrap_err();

        assert!(matches!(err, SpecgenError::ModuleNotFound { .. }));
        assert_eq!(generator.call_count(), 0);
        assert!(no_artifacts_written(&config));
    }

    #[test]
    fn empty_module_name_is_a_user_error() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");
        let generator = CannedGenerator::returning(r#"{"code": "a", "tests": "b"}"#);

        let err = run(&config, &generator, "  ").unwrap_err();

        assert!(matches!(err, SpecgenError::UserError(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn missing_spec_document_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::with_api_key("test-key".to_string());
        config.spec_path = dir.path().join("spec").join("modules.md");
        config.code_dir = dir.path().join("game");
        config.test_dir = dir.path().join("tests");
        let generator = CannedGenerator::returning(r#"{"code": "a", "tests": "b"}"#);

        let err = run(&config, &generator, "Inventory").unwrap_err();

        assert!(matches!(err, SpecgenError::IoError(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn service_failure_writes_nothing() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");

        let err = run(&config, &FailingGenerator, "Inventory").unwrap_err();

        assert!(matches!(err, SpecgenError::ServiceError { .. }));
        assert!(no_artifacts_written(&config));
    }

    #[test]
    fn malformed_reply_aborts_with_no_files() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");
        let generator = CannedGenerator::returning("not json at all");

        let err = run(&config, &generator, "Inventory").unwrap_err();

        match &err {
            SpecgenError::MalformedReply { raw, .. } => {
                assert_eq!(raw, "not json at all");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(no_artifacts_written(&config));
    }

    #[test]
    fn reply_missing_a_field_aborts_with_no_files() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");
        let generator = CannedGenerator::returning(r#"{"code": "x = 1"}"#);

        let err = run(&config, &generator, "Inventory").unwrap_err();

        assert!(matches!(err, SpecgenError::MalformedReply { .. }));
        assert!(no_artifacts_written(&config));
    }

    #[test]
    fn rerunning_overwrites_previous_artifacts() {
        let (_dir, config) = workspace_with_spec("### Inventory\nSome spec text\n");

        let first = CannedGenerator::returning(r#"{"code": "v1", "tests": "t1"}"#);
        run(&config, &first, "Inventory").unwrap();

        let second = CannedGenerator::returning(r#"{"code": "v2", "tests": "t2"}"#);
        let paths = run(&config, &second, "Inventory").unwrap();

        assert_eq!(std::fs::read_to_string(&paths.code_path).unwrap(), "v2");
        assert_eq!(std::fs::read_to_string(&paths.test_path).unwrap(), "t2");
    }

    #[test]
    fn section_extraction_honors_header_boundaries_end_to_end() {
        let spec = "\
## Modules

### Inventory
Carries items.

#### Notes
Deep header stays in.

## Appendix
Out of scope.
";
        let (_dir, config) = workspace_with_spec(spec);
        let generator = CannedGenerator::returning(r#"{"code": "a", "tests": "b"}"#);

        run(&config, &generator, "Inventory").unwrap();

        let prompts = generator.prompts.borrow();
        assert!(prompts[0].contains("#### Notes"));
        assert!(!prompts[0].contains("Appendix"));
    }
}
