use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;

/// Loader for templates stored on the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
    base_dirs: Vec<PathBuf>,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader. Relative paths are tried against each of
    /// `base_dirs` in order.
    pub fn new(path: P, base_dirs: Vec<PathBuf>) -> Self {
        Self { path, base_dirs }
    }

    /// Candidate locations of the template, in lookup order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let path = self.path.as_ref();
        if path.is_absolute() || self.base_dirs.is_empty() {
            return vec![path.to_path_buf()];
        }
        self.base_dirs.iter().map(|base| base.join(path)).collect()
    }

    /// Returns the first existing candidate.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` enumerating every tried path
    pub fn resolve(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        if let Some(found) = candidates.iter().find(|candidate| candidate.exists()) {
            debug!("Resolved template to '{}'.", found.display());
            return Ok(found.clone());
        }

        Err(Error::TemplateNotFound {
            tried: candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    fn load(&self, target: &Path) -> Result<()> {
        let source = self.resolve()?;
        copy_dir(&source, target)
    }
}

/// Recursively copies `source` into `target`, creating directories as needed.
pub fn copy_dir(source: &Path, target: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &destination)?;
        }
    }
    Ok(())
}
