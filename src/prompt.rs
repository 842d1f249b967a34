//! Prompt construction for the generation service.
//!
//! The prompt is a fixed instructional template with `{variable}`
//! placeholders for the module name and its spec section. The template
//! embeds the exact output-format contract: a single JSON object with
//! `code` and `tests` keys and nothing else.
//!
//! Rendering is fail-closed: an undefined variable is an error rather than
//! a silent empty substitution, which keeps template typos from producing
//! a subtly wrong prompt. `{{` and `}}` render literal braces.

use std::collections::HashMap;
use std::fmt;

/// Instructional template, version 1. `{module}` and `{spec_section}` are
/// the only variables.
pub const PROMPT_TEMPLATE: &str = "\
Based on the specification of the {module} module in modules.md:

{spec_section}

Generate two files as a single JSON object with the keys:
  - \"code\": the contents of {module}.gd (GDScript)
  - \"tests\": the contents of test_{module}.gd (GUT tests)
Reply with JSON only, with no additional text.";

/// Build the prompt for one module.
///
/// Pure function of its inputs: identical `(module_name, section_text)`
/// always yields an identical prompt string.
pub fn build_prompt(module_name: &str, section_text: &str) -> String {
    let variables = vars([("module", module_name), ("spec_section", section_text)]);
    // The template is a fixed constant and both variables it names are bound
    // above, so rendering cannot fail.
    render_template(PROMPT_TEMPLATE, &variables)
        .expect("prompt template renders with its fixed variables")
}

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    UndefinedVariable {
        /// The name of the undefined variable.
        name: String,
        /// The position in the template where the variable was found.
        position: usize,
    },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace {
        /// The position of the unmatched `{`.
        position: usize,
    },
    /// An empty variable name was found (e.g., `{}`).
    EmptyVariableName {
        /// The position of the empty variable.
        position: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined variable '{}' at position {} in template",
                    name, position
                )
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {} in template", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(
                    f,
                    "empty variable name '{{}}' at position {} in template",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render a template string by substituting `{variable}` placeholders.
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                // Check for escape sequence {{
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                } else {
                    let start_pos = pos;
                    let mut var_name = String::new();

                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) => var_name.push(c),
                            None => {
                                return Err(TemplateError::UnmatchedBrace {
                                    position: start_pos,
                                });
                            }
                        }
                    }

                    if var_name.is_empty() {
                        return Err(TemplateError::EmptyVariableName {
                            position: start_pos,
                        });
                    }

                    let var_name = var_name.trim();

                    match variables.get(var_name) {
                        Some(value) => result.push_str(value),
                        None => {
                            return Err(TemplateError::UndefinedVariable {
                                name: var_name.to_string(),
                                position: start_pos,
                            });
                        }
                    }
                }
            }
            '}' => {
                // Check for escape sequence }}
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                    result.push('}');
                } else {
                    // Lone } is just a regular character
                    result.push('}');
                }
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Helper to create a variables map from a list of key-value pairs.
fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
