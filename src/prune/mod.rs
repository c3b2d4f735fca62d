//! Conditional pruning.
//! Normalizes the option set against the materialized tree, then removes,
//! converts or generates files so the tree matches it. Every step is
//! idempotent: a second pass over a pruned tree changes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::options::{ProjectOptions, StateLibrary};
use crate::renderer::TemplateRenderer;

pub mod entry;
pub mod routing;
pub mod state;
pub mod styling;
pub mod typescript;

/// Decisions taken while pruning that later stages depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Whether the project ended up a TypeScript one.
    pub typescript: bool,
}

/// Removes a file or directory. Missing paths are not an error.
///
/// Returns whether something was removed.
pub fn remove_path(path: &Path) -> Result<bool> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(false);
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    debug!("Removed '{}'", path.display());
    Ok(true)
}

/// Removes each of `relative` paths under `root`.
pub fn remove_all(root: &Path, relative: &[&str]) -> Result<usize> {
    let mut removed = 0;
    for path in relative {
        if remove_path(&root.join(path))? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Writes `content` to `path` unless the file already exists.
///
/// Returns whether the file was written.
pub fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!("Generated '{}'", path.display());
    Ok(true)
}

/// Returns the first of `candidates` that exists under `root`.
pub fn first_existing(root: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates.iter().map(|candidate| root.join(candidate)).find(|path| path.exists())
}

/// Rewrites the file at `path` through `edit`, writing only on change.
///
/// Returns whether the file changed.
pub fn edit_file<F>(path: &Path, edit: F) -> Result<bool>
where
    F: FnOnce(&str) -> Result<String>,
{
    let content = fs::read_to_string(path)?;
    let edited = edit(&content)?;
    if edited == content {
        return Ok(false);
    }
    fs::write(path, edited)?;
    debug!("Rewrote '{}'", path.display());
    Ok(true)
}

/// Prunes the tree at `root` to match `options`.
pub fn prune_tree(
    root: &Path,
    options: &ProjectOptions,
    project_name: &str,
    renderer: &dyn TemplateRenderer,
) -> Result<PruneOutcome> {
    let typescript = typescript::apply(root, options.typescript)?;

    styling::apply(root, options)?;
    routing::apply(root, options.route, typescript, project_name, renderer)?;
    state::apply(root, options, typescript, renderer)?;

    let features = entry::features(
        root,
        typescript,
        options.route,
        options.has_state(StateLibrary::Redux),
        options.has_state(StateLibrary::TanstackQuery),
    );
    entry::apply(root, features, renderer)?;

    Ok(PruneOutcome { typescript })
}
