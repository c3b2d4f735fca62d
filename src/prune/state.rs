//! State-management scaffolding.

use std::path::Path;

use crate::error::Result;
use crate::options::{ProjectOptions, StateLibrary};
use crate::prune::{first_existing, remove_all, write_if_absent};
use crate::renderer::TemplateRenderer;
use crate::scaffolds::{render_flavoured, COUNTER_SLICE, QUERY_CLIENT, STORE, STORE_HOOKS};

/// Conventional homes of a Redux store and its slices.
pub const STORE_DIRS: [&str; 4] = ["src/store", "src/features", "src/redux", "src/slices"];

/// Query client module the TanStack Query provider imports.
pub const QUERY_CLIENT_FILES: [&str; 2] = ["src/lib/query-client.js", "src/lib/query-client.ts"];

fn generate_store(root: &Path, typescript: bool, renderer: &dyn TemplateRenderer) -> Result<()> {
    let extension = if typescript { "ts" } else { "js" };
    let store = root.join("src/store");
    let modules = [
        ("index", STORE),
        ("counterSlice", COUNTER_SLICE),
        ("hooks", STORE_HOOKS),
    ];
    for (name, fragment) in modules {
        write_if_absent(
            &store.join(format!("{name}.{extension}")),
            &render_flavoured(renderer, fragment, typescript, "")?,
        )?;
    }
    Ok(())
}

/// Generates the Redux store and the query client for the selected state
/// libraries and removes the scaffolding of unselected ones.
pub fn apply(
    root: &Path,
    options: &ProjectOptions,
    typescript: bool,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    if options.has_state(StateLibrary::Redux) {
        if !root.join("src/store").exists() {
            generate_store(root, typescript, renderer)?;
        }
    } else {
        remove_all(root, &STORE_DIRS)?;
    }

    if !options.has_state(StateLibrary::TanstackQuery) {
        remove_all(root, &QUERY_CLIENT_FILES)?;
    } else if first_existing(root, &QUERY_CLIENT_FILES).is_none() {
        let extension = if typescript { "ts" } else { "js" };
        write_if_absent(
            &root.join(format!("src/lib/query-client.{extension}")),
            &render_flavoured(renderer, QUERY_CLIENT, typescript, "")?,
        )?;
    }
    Ok(())
}
