use std::fs;
use std::path::Path;

use rtg::addons::{AddonDescriptor, ConfigPatch};
use rtg::applier::{apply_addons, merge_addon_manifest, patch_bundler_config};
use rtg::package_json::{DependencyKind, PackageJson};
use tempfile::TempDir;

const VITE_CONFIG: &str = "import { defineConfig } from 'vite'\nimport react from '@vitejs/plugin-react'\n\nexport default defineConfig({\n  plugins: [react()],\n})\n";

fn write_project(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("package.json"),
        "{\n  \"name\": \"app\",\n  \"scripts\": {\n    \"dev\": \"vite\"\n  }\n}\n",
    )
    .unwrap();
    fs::write(root.join("vite.config.js"), VITE_CONFIG).unwrap();
    fs::write(root.join("src/index.css"), "body { margin: 0; }\n").unwrap();
}

const FIRST: AddonDescriptor = AddonDescriptor {
    name: "first",
    dependencies: &["shared@1.0.0", "only-first"],
    dev_dependencies: &[],
    files: &[],
    scripts: &[("build:extra", "first")],
    config_patches: &[],
    instructions: "",
};

const SECOND: AddonDescriptor = AddonDescriptor {
    name: "second",
    dependencies: &["shared@2.0.0"],
    dev_dependencies: &[],
    files: &[],
    scripts: &[("build:extra", "second")],
    config_patches: &[],
    instructions: "",
};

#[test]
fn test_dependency_merge_is_last_write_wins() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    let mut package = PackageJson::load(temp_dir.path()).unwrap().unwrap();
    merge_addon_manifest(&mut package, &FIRST);
    merge_addon_manifest(&mut package, &SECOND);

    assert_eq!(package.dependency(DependencyKind::Dependencies, "shared"), Some("2.0.0"));
    assert_eq!(package.dependency(DependencyKind::Dependencies, "only-first"), Some("latest"));
    assert_eq!(package.script("build:extra"), Some("second"));
}

#[test]
fn test_apply_tailwind() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_project(root);

    let applied = apply_addons(root, &["tailwind"]).unwrap();
    assert_eq!(applied.len(), 1);

    let stylesheet = fs::read_to_string(root.join("src/index.css")).unwrap();
    assert!(stylesheet.contains("@import \"tailwindcss\";"));
    assert!(root.join("tailwind.config.js").exists());

    let config = fs::read_to_string(root.join("vite.config.js")).unwrap();
    assert!(config.contains("import tailwindcss from '@tailwindcss/vite'\n"));
    assert!(config.contains("plugins: [react(), tailwindcss()],"));

    let package = PackageJson::load(root).unwrap().unwrap();
    assert_eq!(package.dependency(DependencyKind::DevDependencies, "tailwindcss"), Some("latest"));
    assert!(package.script("watch:css").is_some());
    assert_eq!(package.script("dev"), Some("vite"));
}

#[test]
fn test_apply_state_addons_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_project(root);

    let applied = apply_addons(root, &["redux", "unknown", "tanstack-query"]).unwrap();
    let names: Vec<&str> = applied.iter().map(|addon| addon.name).collect();
    assert_eq!(names, vec!["redux", "tanstack-query"]);

    let package = PackageJson::load(root).unwrap().unwrap();
    assert!(package.dependency(DependencyKind::Dependencies, "react-redux").is_some());
    assert!(package.dependency(DependencyKind::Dependencies, "@tanstack/react-query").is_some());
    assert!(!root.join("src/lib").exists());
}

#[test]
fn test_missing_bundler_config_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let addon = AddonDescriptor {
        config_patches: &[ConfigPatch::InsertImport {
            statement: "import a from 'a'",
        }],
        ..FIRST
    };
    assert_eq!(patch_bundler_config(temp_dir.path(), &addon).unwrap(), None);
}

#[test]
fn test_project_without_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let applied = apply_addons(temp_dir.path(), &["tailwind"]).unwrap();

    assert_eq!(applied.len(), 1);
    assert!(temp_dir.path().join("tailwind.config.js").exists());
    assert!(!temp_dir.path().join("package.json").exists());
}

#[test]
fn test_failed_addon_keeps_the_others() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_project(root);
    // Tailwind can't write its stylesheet when `src` is a plain file.
    fs::remove_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src"), "").unwrap();

    let applied = apply_addons(root, &["mui", "tailwind", "redux"]).unwrap();
    let names: Vec<&str> = applied.iter().map(|addon| addon.name).collect();
    assert_eq!(names, vec!["mui", "redux"]);

    let package = PackageJson::load(root).unwrap().unwrap();
    assert!(package.dependency(DependencyKind::Dependencies, "@mui/material").is_some());
    assert!(package.dependency(DependencyKind::Dependencies, "react-redux").is_some());
    assert_eq!(package.dependency(DependencyKind::DevDependencies, "tailwindcss"), None);
    assert!(package.script("watch:css").is_none());
}
