//! Placeholder token substitution over the materialized tree.
//! This is a best-effort pass: unreadable or binary files are skipped.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::constants::{tokens, PROCESSABLE_EXTENSIONS};
use crate::error::Result;
use crate::options::ProjectOptions;
use crate::registry::TemplateDescriptor;

/// Fallback manifest entry when no library was selected.
const BASE_LIBRARY: &str = "base react setup";

/// Title-cases a project name: every word's first letter is capitalized,
/// then hyphens and underscores become spaces (`my-app` → `My App`).
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut previous_is_word = false;
    for c in name.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !previous_is_word {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        previous_is_word = is_word;
    }
    result.replace(['-', '_'], " ")
}

/// Package identifiers listed by the library manifest token.
pub fn selected_libraries(
    template: &TemplateDescriptor,
    options: &ProjectOptions,
) -> Vec<&'static str> {
    let mut libraries = Vec::new();
    if options.typescript || template.is_typescript() {
        libraries.push("typescript");
    }
    if options.route {
        libraries.push("react-router-dom");
    }
    if let Some(ui) = options.ui {
        libraries.push(ui.package());
    }
    libraries.extend(options.state.iter().map(|state| state.package()));
    libraries
}

/// Renders libraries as the inside of an array literal: `"a", "b"`.
pub fn render_library_list(libraries: &[&str]) -> String {
    let libraries = if libraries.is_empty() { &[BASE_LIBRARY][..] } else { libraries };
    libraries.iter().map(|library| format!("\"{library}\"")).collect::<Vec<_>>().join(", ")
}

/// Replaces every placeholder token in `content`.
pub fn substitute_tokens(content: &str, project_name: &str, libraries: &str) -> String {
    let mut content = content
        .replace(tokens::PROJECT_NAME, project_name)
        .replace(tokens::PROJECT_NAME_LOWER, &project_name.to_lowercase())
        .replace(tokens::PROJECT_NAME_TITLE, &title_case(project_name));
    if content.contains(tokens::LIBRARIES) {
        content = content.replace(tokens::LIBRARIES, libraries);
    }
    content
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

/// Whether the file at `path` goes through token substitution.
pub fn should_process_file(path: &Path) -> bool {
    let dotfile = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false);
    let processable = path
        .extension()
        .map(|ext| PROCESSABLE_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
        .unwrap_or(false);
    dotfile || processable
}

/// Rewrites placeholder tokens in every processable file under `root`.
///
/// Directories named `node_modules` or starting with `.` are not descended
/// into. Returns the number of files that changed.
pub fn transform_tree(root: &Path, project_name: &str, libraries: &str) -> Result<usize> {
    let mut changed = 0;
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !should_process_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let Ok(content) = fs::read_to_string(path) else {
            debug!("Skipping non-text file '{}'", path.display());
            continue;
        };
        let substituted = substitute_tokens(&content, project_name, libraries);
        if substituted == content {
            continue;
        }
        match fs::write(path, substituted) {
            Ok(()) => {
                debug!("Substituted tokens in '{}'", path.display());
                changed += 1;
            }
            Err(e) => debug!("Failed to write '{}': {e}", path.display()),
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my-app"), "My App");
        assert_eq!(title_case("my_app"), "My app");
        assert_eq!(title_case("hello.world"), "Hello.World");
        assert_eq!(title_case("App2go"), "App2go");
    }

    #[test]
    fn test_render_library_list() {
        assert_eq!(render_library_list(&[]), "\"base react setup\"");
        assert_eq!(
            render_library_list(&["typescript", "tailwindcss"]),
            "\"typescript\", \"tailwindcss\""
        );
    }

    #[test]
    fn test_substitute_tokens() {
        let content = "{{PROJECT_NAME}} {{project-name}} {{Project Name}} [{{RTG_LIBRARIES}}]";
        assert_eq!(
            substitute_tokens(content, "My-App", "\"typescript\""),
            "My-App my-app My App [\"typescript\"]"
        );
    }

    #[test]
    fn test_should_process_file() {
        assert!(should_process_file(Path::new("src/App.jsx")));
        assert!(should_process_file(Path::new(".env")));
        assert!(should_process_file(Path::new(".gitignore")));
        assert!(!should_process_file(Path::new("public/logo.png")));
    }
}
