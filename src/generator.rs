use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::TemplateEngine;
use crate::ioutils;
use crate::layout::{TemplateLayout, COMMAND_TEMPLATE_SUFFIX};
use crate::table::ReplacementTable;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Renders every template of a [`TemplateLayout`] and writes the results.
pub struct FileGenerator<'a> {
    engine: TemplateEngine,
    table: &'a ReplacementTable,
    dry_run: bool,
}

impl<'a> FileGenerator<'a> {
    pub fn new(engine: TemplateEngine, table: &'a ReplacementTable, dry_run: bool) -> Self {
        Self {
            engine,
            table,
            dry_run,
        }
    }

    /// Renders the guide template, if present, then every command template.
    ///
    /// Returns the output paths in the order they were produced. A missing
    /// guide template or commands directory is not an error.
    pub fn generate(&self, layout: &TemplateLayout) -> Result<Vec<PathBuf>, GenerateError> {
        let mut generated = Vec::new();

        let guide_template = layout.guide_template();
        if guide_template.is_file() {
            let output = layout.guide_output();
            self.process_file(&guide_template, &output)?;
            generated.push(output);
        } else {
            debug!("No guide template at {:?}, skipping", guide_template);
        }

        let commands_dir = layout.commands_template_dir();
        for template in ioutils::list_templates(&commands_dir, COMMAND_TEMPLATE_SUFFIX)? {
            if let Some(output) = layout.command_output(&template) {
                self.process_file(&template, &output)?;
                generated.push(output);
            }
        }

        Ok(generated)
    }

    /// Renders a single template file into `output_path`.
    pub fn process_file(&self, template_path: &Path, output_path: &Path) -> Result<(), GenerateError> {
        info!("Processing {} -> {}", template_path.display(), output_path.display());
        let rendered = self.engine.render_file(template_path, self.table)?;

        if self.dry_run {
            info!("[DRY RUN] Would write: {:?}", output_path);
        } else {
            ioutils::write_text(output_path, &rendered)?;
            debug!("Wrote {} bytes to {:?}", rendered.len(), output_path);
        }
        Ok(())
    }
}
