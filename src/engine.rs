use crate::generator::GenerateError;
use crate::ioutils;
use crate::table::ReplacementTable;
use log::debug;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// The regex pattern for placeholder markers: `{{NAME}}`, no inner whitespace.
const PLACEHOLDER_PATTERN: &str = r"\{\{(?P<name>\w+)\}\}";

/// The regex pattern for conditional blocks: `{{#if NAME}}body{{/if}}`.
///
/// The body is matched lazily, so the first `{{/if}}` closes the block.
/// Nested blocks are not supported.
const CONDITIONAL_PATTERN: &str = r"(?s)\{\{#if\s+(?P<name>\w+)\}\}(?P<body>.*?)\{\{/if\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

static CONDITIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CONDITIONAL_PATTERN).expect("conditional pattern is valid"));

/// Renders placeholder templates against a [`ReplacementTable`].
///
/// Rendering runs two passes over the text:
///
/// 1. every `{{NAME}}` whose name is in the table is replaced by its value in a
///    single scan, so substituted values are never expanded again;
/// 2. every `{{#if NAME}}...{{/if}}` block is replaced by its body when `NAME`
///    holds `"true"` in the table and removed otherwise.
///
/// Unknown placeholders and unterminated `{{#if` markers are left as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Renders a template string with the given table.
    pub fn render_string(&self, template_str: &str, table: &ReplacementTable) -> String {
        let substituted = substitute_placeholders(template_str, table);
        evaluate_conditionals(&substituted, table)
    }

    /// Renders a template from a file with the given table.
    pub fn render_file(
        &self,
        template_path: &Path,
        table: &ReplacementTable,
    ) -> Result<String, GenerateError> {
        let template_str = ioutils::read_text(template_path)?;
        debug!(
            "Rendering {:?} ({} bytes)",
            template_path,
            template_str.len()
        );
        Ok(self.render_string(&template_str, table))
    }
}

fn substitute_placeholders(text: &str, table: &ReplacementTable) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| match table.get(&caps["name"]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn evaluate_conditionals(text: &str, table: &ReplacementTable) -> String {
    CONDITIONAL_RE
        .replace_all(text, |caps: &Captures| {
            if table.is_true(&caps["name"]) {
                caps["body"].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}
