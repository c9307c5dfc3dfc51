//! Renders package review guide and command files from `config.yml`.
//!
//! Templates use two constructs only: `{{NAME}}` placeholders and
//! non-nested `{{#if NAME}} ... {{/if}}` blocks, both resolved against a
//! [`ReplacementTable`] built once from the configuration.

pub mod config;
pub mod engine;
pub mod generator;
pub mod ioutils;
pub mod layout;
pub mod summary;
pub mod table;

pub use config::{ConfigError, ReviewConfig};
pub use engine::TemplateEngine;
pub use generator::{FileGenerator, GenerateError};
pub use layout::TemplateLayout;
pub use table::ReplacementTable;
