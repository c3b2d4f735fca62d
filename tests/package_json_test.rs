use std::fs;

use rtg::package_json::{DependencyKind, PackageJson};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "template",
  "private": true,
  "version": "0.0.0",
  "scripts": {
    "dev": "vite"
  },
  "dependencies": {
    "react": "^18.3.1"
  }
}
"#;

#[test]
fn test_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    assert!(PackageJson::load(temp_dir.path()).unwrap().is_none());
}

#[test]
fn test_edits_keep_key_order() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), MANIFEST).unwrap();

    let mut package = PackageJson::load(temp_dir.path()).unwrap().unwrap();
    package.set_name("my-app");
    package.merge_dependencies(DependencyKind::Dependencies, ["axios", "react@18.2.0"]);
    package.merge_dependencies(DependencyKind::DevDependencies, ["@types/react@^18"]);
    package.merge_scripts([("lint", "eslint src")]);
    package.save().unwrap();

    let content = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    assert!(content.ends_with("}\n"));

    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&content).unwrap();
    let keys: Vec<&String> = object.keys().collect();
    assert_eq!(
        keys,
        vec!["name", "private", "version", "scripts", "dependencies", "devDependencies"]
    );

    let package = PackageJson::load(temp_dir.path()).unwrap().unwrap();
    assert_eq!(package.get("name").and_then(|v| v.as_str()), Some("my-app"));
    assert_eq!(package.dependency(DependencyKind::Dependencies, "react"), Some("18.2.0"));
    assert_eq!(package.dependency(DependencyKind::Dependencies, "axios"), Some("latest"));
    assert_eq!(package.dependency(DependencyKind::DevDependencies, "@types/react"), Some("^18"));
    assert_eq!(package.script("dev"), Some("vite"));
    assert_eq!(package.script("lint"), Some("eslint src"));
}

#[test]
fn test_remove_dependency() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), MANIFEST).unwrap();

    let mut package = PackageJson::load(temp_dir.path()).unwrap().unwrap();
    assert!(package.remove_dependency(DependencyKind::Dependencies, "react"));
    assert!(!package.remove_dependency(DependencyKind::Dependencies, "react"));
    assert!(!package.remove_dependency(DependencyKind::DevDependencies, "react"));
}

#[test]
fn test_non_object_manifest_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), "[]").unwrap();
    assert!(PackageJson::load(temp_dir.path()).is_err());
}
