//! `package.json` manipulation.
//! The manifest is kept as a `serde_json::Value` so unknown fields and key
//! order survive every edit.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::constants::PACKAGE_JSON;
use crate::error::{Error, Result};

/// Splits a package identifier into its name and version.
///
/// * `name` → (`name`, `latest`)
/// * `name@version` → split on the first `@`, version taken verbatim
/// * `@scope/name` → (`@scope/name`, `latest`)
/// * `@scope/name@version` → (`@scope/name`, `version`)
pub fn resolve_version(identifier: &str) -> (String, String) {
    let Some((prefix, rest)) = identifier.split_once('@') else {
        return (identifier.to_string(), "latest".to_string());
    };

    if !prefix.is_empty() {
        return (prefix.to_string(), rest.to_string());
    }

    match rest.split_once('@') {
        Some((scoped, version)) => (format!("@{scoped}"), version.to_string()),
        None => (identifier.to_string(), "latest".to_string()),
    }
}

/// Which dependency map of the manifest an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Dependencies,
    DevDependencies,
}

impl DependencyKind {
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Dependencies => "dependencies",
            DependencyKind::DevDependencies => "devDependencies",
        }
    }
}

/// An in-memory `package.json`.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageJson {
    /// Loads the manifest of the project at `project_dir`.
    ///
    /// Returns `Ok(None)` when the project has no `package.json`.
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Option<Self>> {
        let path = project_dir.as_ref().join(PACKAGE_JSON);
        if !path.exists() {
            debug!("No {PACKAGE_JSON} in '{}'", project_dir.as_ref().display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(root) => Ok(Some(Self { path, root })),
            _ => Err(Error::TemplateError(format!("{} is not a JSON object", path.display()))),
        }
    }

    /// Writes the manifest back with 2-space indentation and a trailing newline.
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.root)?;
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Returns the object stored at `key`, replacing any non-object value.
    pub fn object_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self.root.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just made an object"),
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.root.insert("name".to_string(), Value::String(name.to_string()));
    }

    /// Merges package identifiers into a dependency map. Existing entries
    /// with the same name are overwritten.
    pub fn merge_dependencies<I, S>(&mut self, kind: DependencyKind, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let map = self.object_mut(kind.key());
        for identifier in identifiers {
            let (name, version) = resolve_version(identifier.as_ref());
            map.insert(name, Value::String(version));
        }
    }

    pub fn remove_dependency(&mut self, kind: DependencyKind, name: &str) -> bool {
        match self.root.get_mut(kind.key()) {
            Some(Value::Object(map)) => map.shift_remove(name).is_some(),
            _ => false,
        }
    }

    pub fn dependency(&self, kind: DependencyKind, name: &str) -> Option<&str> {
        self.root.get(kind.key())?.get(name)?.as_str()
    }

    /// Merges script entries, overwriting existing ones with the same name.
    pub fn merge_scripts<I, K, V>(&mut self, scripts: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.object_mut("scripts");
        for (name, command) in scripts {
            map.insert(name.into(), Value::String(command.into()));
        }
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.root.get("scripts")?.get(name)?.as_str()
    }

    /// Sets a top-level field.
    pub fn set(&mut self, key: &str, value: Value) {
        self.root.insert(key.to_string(), value);
    }
}
