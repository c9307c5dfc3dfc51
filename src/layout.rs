use crate::config::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};

/// File-name suffix marking a template; stripped to get the output name.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Suffix of command templates inside the commands template directory.
pub const COMMAND_TEMPLATE_SUFFIX: &str = ".md.template";

pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const GUIDE_TEMPLATE_NAME: &str = "CLAUDE.md.template";
pub const COMMANDS_DIR: &str = "commands";

/// Where the configuration, templates and rendered outputs live.
///
/// The default layout, relative to the project root:
///
/// ```text
/// config.yml
/// templates/CLAUDE.md.template       -> CLAUDE.md
/// templates/commands/*.md.template   -> commands/*.md
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    pub config_file: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TemplateLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            config_file: root.join(DEFAULT_CONFIG_FILE),
            templates_dir: root.join(DEFAULT_TEMPLATES_DIR),
            output_dir: root.to_path_buf(),
        }
    }

    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = path;
        self
    }

    pub fn with_templates_dir(mut self, path: PathBuf) -> Self {
        self.templates_dir = path;
        self
    }

    pub fn with_output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = path;
        self
    }

    pub fn guide_template(&self) -> PathBuf {
        self.templates_dir.join(GUIDE_TEMPLATE_NAME)
    }

    pub fn guide_output(&self) -> PathBuf {
        self.output_dir
            .join(strip_template_suffix(GUIDE_TEMPLATE_NAME).unwrap_or(GUIDE_TEMPLATE_NAME))
    }

    pub fn commands_template_dir(&self) -> PathBuf {
        self.templates_dir.join(COMMANDS_DIR)
    }

    pub fn commands_output_dir(&self) -> PathBuf {
        self.output_dir.join(COMMANDS_DIR)
    }

    /// Output path for a command template, or `None` if its name has no template suffix.
    pub fn command_output(&self, template: &Path) -> Option<PathBuf> {
        let name = template.file_name()?.to_str()?;
        let stripped = strip_template_suffix(name)?;
        Some(self.commands_output_dir().join(stripped))
    }
}

/// Strips the trailing `.template` from a file name.
pub fn strip_template_suffix(name: &str) -> Option<&str> {
    name.strip_suffix(TEMPLATE_SUFFIX)
        .filter(|stripped| !stripped.is_empty())
}
