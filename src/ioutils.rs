use crate::generator::GenerateError;
use log::{debug, error};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Reads a whole text file.
pub fn read_text(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|e| {
        error!("Failed to read file: {:?}", path);
        GenerateError::io(path, e)
    })
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).map_err(|e| {
        error!("Failed to write rendered content to file: {:?}", path);
        GenerateError::io(path, e)
    })
}

/// Ensures that the specified directory exists, creating it if necessary.
fn ensure_dir_exists(path: &Path) -> Result<(), GenerateError> {
    if !path.as_os_str().is_empty() && !path.exists() {
        debug!("Creating directory {:?}", path);
        fs::create_dir_all(path).map_err(|e| GenerateError::io(path, e))?;
    }
    Ok(())
}

/// Lists the regular files directly inside `dir` whose name ends with `suffix`, sorted.
///
/// A directory that does not exist has no templates.
pub fn list_templates(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, GenerateError> {
    if !dir.is_dir() {
        debug!("Template directory {:?} not found, nothing to list", dir);
        return Ok(Vec::new());
    }

    let mut templates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| {
        error!("Failed to read directory: {:?}", dir);
        GenerateError::io(dir, e)
    })? {
        let entry = entry.map_err(|e| {
            error!("Failed to read directory entry: {:?}", dir);
            GenerateError::io(dir, e)
        })?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix) && name.len() > suffix.len());
        if matches && path.is_file() {
            templates.push(path);
        }
    }
    templates.sort();
    Ok(templates)
}
