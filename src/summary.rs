//! Console reports printed around a generation run.

use crate::table::ReplacementTable;
use std::fmt;
use std::path::{Path, PathBuf};

/// The configuration header printed before any template is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub organization: String,
    pub template_package: String,
    pub analytics_enabled: bool,
    pub funding_enabled: bool,
}

impl ConfigSummary {
    pub fn from_table(table: &ReplacementTable) -> Self {
        Self {
            organization: table.get("ORGANIZATION_NAME").unwrap_or_default().to_string(),
            template_package: table.get("TEMPLATE_PACKAGE").unwrap_or_default().to_string(),
            analytics_enabled: table.is_true("ANALYTICS_ENABLED"),
            funding_enabled: table.is_true("FUNDING_ENABLED"),
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for ConfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing templates with configuration:")?;
        writeln!(f, "  Organization: {}", self.organization)?;
        writeln!(f, "  Template package: {}", self.template_package)?;
        writeln!(f, "  Analytics: {}", enabled(self.analytics_enabled))?;
        writeln!(f, "  Funding: {}", enabled(self.funding_enabled))
    }
}

/// The closing report listing generated files.
#[derive(Debug, Clone)]
pub struct CompletionReport<'a> {
    pub output_dir: &'a Path,
    pub generated: &'a [PathBuf],
    pub dry_run: bool,
    pub source_repository: bool,
}

impl fmt::Display for CompletionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source_repository {
            writeln!(f, "Note: running in the review template repository.")?;
            writeln!(f, "Template files have been processed in place.")?;
            writeln!(
                f,
                "To use these in your package, copy the generated files to your package directory."
            )?;
            writeln!(f)?;
        }

        if self.dry_run {
            writeln!(f, "Dry run complete, no files written.")?;
        } else {
            writeln!(f, "Template processing complete!")?;
        }

        if self.generated.is_empty() {
            return writeln!(f, "No templates found.");
        }

        writeln!(f)?;
        writeln!(f, "Generated files:")?;
        for path in self.generated {
            let shown = path.strip_prefix(self.output_dir).unwrap_or(path);
            writeln!(f, "  - {}", shown.display())?;
        }
        Ok(())
    }
}
