//! Stylesheet and UI library cleanup.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::options::{ProjectOptions, UiLibrary};
use crate::prune::{edit_file, remove_all, remove_path};

/// Tailwind configuration files, in any of the accepted module flavours.
pub const TAILWIND_CONFIG_FILES: [&str; 3] =
    ["tailwind.config.js", "tailwind.config.cjs", "tailwind.config.ts"];

/// Stylesheets that may carry Tailwind directives.
pub const STYLESHEETS: [&str; 4] =
    ["src/index.css", "src/App.css", "src/styles/globals.css", "src/styles/index.css"];

/// Directories conventionally holding a UI library's scaffolding.
pub fn scaffold_dirs(library: UiLibrary) -> &'static [&'static str] {
    match library {
        UiLibrary::Tailwind => &[],
        UiLibrary::StyledComponents => &["src/styles/styled", "src/components/styled"],
        UiLibrary::Mui => &["src/theme/mui", "src/components/mui"],
        UiLibrary::Chakra => &["src/theme/chakra", "src/components/chakra"],
    }
}

/// Removes Tailwind directives (`@tailwind`, `@import "tailwindcss"` and
/// `@config` lines pointing at a Tailwind config) from a stylesheet.
pub fn strip_tailwind_directives(content: &str) -> Result<String> {
    let directives = Regex::new(
        r#"(?m)^[ \t]*@(?:tailwind\b[^\n]*|import\s+["']tailwindcss[^\n]*|config\s+["'][^"'\n]*tailwind[^\n]*)(?:\r?\n|$)"#,
    )?;
    Ok(directives.replace_all(content, "").to_string())
}

fn remove_tailwind(root: &Path) -> Result<()> {
    remove_all(root, &TAILWIND_CONFIG_FILES)?;

    let postcss = root.join("postcss.config.js");
    if postcss.exists() && fs::read_to_string(&postcss)?.contains("tailwindcss") {
        remove_path(&postcss)?;
    }

    for stylesheet in STYLESHEETS {
        let path = root.join(stylesheet);
        if path.is_file() {
            edit_file(&path, strip_tailwind_directives)?;
        }
    }
    Ok(())
}

/// Drops the styling scaffolding of every UI library that wasn't selected.
pub fn apply(root: &Path, options: &ProjectOptions) -> Result<()> {
    if !options.has_ui(UiLibrary::Tailwind) {
        remove_tailwind(root)?;
    }
    for library in UiLibrary::ALL.into_iter().filter(|library| !options.has_ui(*library)) {
        remove_all(root, scaffold_dirs(library))?;
    }
    Ok(())
}
