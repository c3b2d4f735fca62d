//! Entry module regeneration.
//! The entry module is owned by the tool: it is rendered from scratch for
//! the final feature set instead of being patched.

use std::fs;
use std::path::Path;

use log::debug;
use regex::Regex;

use crate::error::Result;
use crate::prune::{edit_file, first_existing, remove_path};
use crate::renderer::TemplateRenderer;
use crate::scaffolds::{render_entry, EntryFeatures};

/// Entry module candidates, in lookup order.
pub const ENTRY_FILES: [&str; 4] = ["src/main.tsx", "src/main.jsx", "src/main.ts", "src/main.js"];

/// Collects the entry features for the tree at `root`.
pub fn features(
    root: &Path,
    typescript: bool,
    route: bool,
    redux: bool,
    query: bool,
) -> EntryFeatures {
    EntryFeatures {
        typescript,
        route,
        redux,
        query,
        stylesheet: root.join("src/index.css").exists(),
    }
}

/// Re-renders the entry module. Trees without one are left alone.
pub fn apply(root: &Path, features: EntryFeatures, renderer: &dyn TemplateRenderer) -> Result<()> {
    let Some(existing) = first_existing(root, &ENTRY_FILES) else {
        debug!("No entry module found, skipping regeneration");
        return Ok(());
    };

    let file_name = if features.typescript { "main.tsx" } else { "main.jsx" };
    let target = root.join("src").join(file_name);
    fs::write(&target, render_entry(renderer, features)?)?;
    if existing != target {
        remove_path(&existing)?;
    }

    let index_html = root.join("index.html");
    if index_html.exists() {
        let script = Regex::new(r#"/src/main\.[jt]sx?(["'])"#)?;
        let replacement = format!("/src/{file_name}$1");
        edit_file(&index_html, |content| {
            Ok(script.replace_all(content, replacement.as_str()).to_string())
        })?;
    }
    Ok(())
}
