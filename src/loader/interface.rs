use std::path::Path;

use crate::error::Result;

/// Trait for materializing a template from one kind of source.
pub trait TemplateLoader {
    /// Populates `target` with the template's file tree.
    ///
    /// `target` must not exist yet; the loader creates it.
    fn load(&self, target: &Path) -> Result<()>;
}
