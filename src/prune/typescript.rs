//! TypeScript inference, cleanup and conversion.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info};
use regex::Regex;
use walkdir::WalkDir;

use crate::addons::insert_import;
use crate::error::Result;
use crate::prune::{edit_file, remove_all, write_if_absent};
use crate::scaffolds::{TSCONFIG, TSCONFIG_NODE, VITE_ENV};

/// TypeScript-only files removed from JavaScript projects.
pub const TYPESCRIPT_CONFIG_FILES: [&str; 4] =
    ["tsconfig.json", "tsconfig.node.json", "tsconfig.app.json", "src/vite-env.d.ts"];

fn typescript_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new("**/*.ts")?);
    builder.add(Glob::new("**/*.tsx")?);
    Ok(builder.build()?)
}

fn source_files(root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0 || !(name == "node_modules" || name.starts_with('.'))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

/// Whether the tree already holds TypeScript sources (declaration files excluded).
pub fn has_typescript_files(root: &Path) -> Result<bool> {
    let globs = typescript_globs()?;
    Ok(source_files(root).any(|path| {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        globs.is_match(relative) && !relative.to_string_lossy().ends_with(".d.ts")
    }))
}

/// Adds a `React` import and type annotations to component declarations.
///
/// Only declarations shaped like `function Name() {` and
/// `const Name = (` are annotated; anything else is left as is.
pub fn upgrade_component_source(content: &str) -> Result<String> {
    let function_component = Regex::new(
        r"(?m)^(\s*(?:export\s+(?:default\s+)?)?)function\s+([A-Z][A-Za-z0-9_]*)\s*\(\s*\)\s*\{",
    )?;
    let arrow_component =
        Regex::new(r"(?m)^(\s*(?:export\s+)?)const\s+([A-Z][A-Za-z0-9_]*)\s*=\s*\(")?;

    let annotated =
        function_component.replace_all(content, "${1}function ${2}(): React.ReactElement {");
    let annotated = arrow_component
        .replace_all(&annotated, "${1}const ${2}: React.FC = (")
        .to_string();

    if annotated == content || annotated.contains("import React") {
        return Ok(annotated);
    }
    Ok(insert_import(&annotated, "import React from 'react'"))
}

fn converted_path(path: &Path) -> Option<PathBuf> {
    match path.extension()?.to_str()? {
        "jsx" => Some(path.with_extension("tsx")),
        "js" => Some(path.with_extension("ts")),
        _ => None,
    }
}

/// Renames the JavaScript sources under `src` to TypeScript and adds the
/// compiler configuration. Returns the number of converted files.
pub fn convert_to_typescript(root: &Path) -> Result<usize> {
    let src = root.join("src");
    let mut converted = 0;
    let files: Vec<PathBuf> = if src.exists() { source_files(&src).collect() } else { Vec::new() };

    for path in files {
        let Some(target) = converted_path(&path) else {
            continue;
        };
        let content = fs::read_to_string(&path)?;
        let content = if target.extension().is_some_and(|ext| ext == "tsx") {
            upgrade_component_source(&content)?
        } else {
            content
        };
        fs::write(&target, content)?;
        fs::remove_file(&path)?;
        debug!("Converted '{}' to '{}'", path.display(), target.display());
        converted += 1;
    }

    write_if_absent(&root.join("tsconfig.json"), TSCONFIG)?;
    write_if_absent(&root.join("tsconfig.node.json"), TSCONFIG_NODE)?;
    write_if_absent(&root.join("src/vite-env.d.ts"), VITE_ENV)?;

    let index_html = root.join("index.html");
    if index_html.exists() {
        let script = Regex::new(r#"(src=["']/src/[^"']+\.)(jsx?)(["'])"#)?;
        edit_file(&index_html, |content| {
            Ok(script
                .replace_all(content, |caps: &regex::Captures| {
                    let extension = if &caps[2] == "jsx" { "tsx" } else { "ts" };
                    format!("{}{}{}", &caps[1], extension, &caps[3])
                })
                .to_string())
        })?;
    }

    Ok(converted)
}

/// Settles the TypeScript decision and makes the tree match it.
///
/// TypeScript files already in the tree switch TypeScript on even when it
/// wasn't requested. A JavaScript tree is converted when it was.
pub fn apply(root: &Path, requested: bool) -> Result<bool> {
    let detected = has_typescript_files(root)?;
    let typescript = requested || detected;

    if !typescript {
        remove_all(root, &TYPESCRIPT_CONFIG_FILES)?;
    } else if !detected {
        let converted = convert_to_typescript(root)?;
        info!("Converted {converted} files to TypeScript");
    }

    Ok(typescript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_function_component() {
        let source = "import { useState } from 'react'\n\nfunction App() {\n  return <div />\n}\n\nexport default App\n";
        let upgraded = upgrade_component_source(source).unwrap();

        assert!(upgraded.contains("function App(): React.ReactElement {"));
        assert!(upgraded.contains("import { useState } from 'react'\nimport React from 'react'\n"));
        // Already upgraded sources are left alone.
        assert_eq!(upgrade_component_source(&upgraded).unwrap(), upgraded);
    }

    #[test]
    fn test_upgrade_arrow_component() {
        let source = "export const Card = ({ title }) => <h1>{title}</h1>\n";
        let upgraded = upgrade_component_source(source).unwrap();
        assert!(upgraded.contains("export const Card: React.FC = ({ title })"));
    }

    #[test]
    fn test_non_components_are_untouched() {
        let source = "const helper = () => 1\nfunction compute(a) { return a }\n";
        assert_eq!(upgrade_component_source(source).unwrap(), source);
    }
}
