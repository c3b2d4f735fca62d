//! Add-on application.
//! Merges each selected add-on's dependencies and scripts into
//! `package.json`, writes its files and patches the bundler config.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::addons::{get_addon, AddonDescriptor};
use crate::constants::BUNDLER_CONFIG_FILES;
use crate::error::Result;
use crate::package_json::{DependencyKind, PackageJson};

/// Writes every file the add-on declares, creating parent directories.
/// Existing files are overwritten.
pub fn write_addon_files(root: &Path, addon: &AddonDescriptor) -> Result<()> {
    for (relative, content) in addon.files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        debug!("Wrote add-on file '{}'", path.display());
    }
    Ok(())
}

/// Applies the add-on's config patches to the first bundler config found.
///
/// Returns the patched file, or `None` when the add-on has no patches or
/// no candidate config exists.
pub fn patch_bundler_config(root: &Path, addon: &AddonDescriptor) -> Result<Option<PathBuf>> {
    if addon.config_patches.is_empty() {
        return Ok(None);
    }

    let Some(path) = BUNDLER_CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
    else {
        debug!("No bundler config found for add-on '{}'", addon.name);
        return Ok(None);
    };

    let content = fs::read_to_string(&path)?;
    let patched = addon
        .config_patches
        .iter()
        .fold(content, |content, patch| patch.apply(&content));
    fs::write(&path, patched)?;
    debug!("Patched '{}' for add-on '{}'", path.display(), addon.name);
    Ok(Some(path))
}

/// Merges the add-on's manifest entries into an in-memory `package.json`.
pub fn merge_addon_manifest(package: &mut PackageJson, addon: &AddonDescriptor) {
    package.merge_dependencies(DependencyKind::Dependencies, addon.dependencies);
    package.merge_dependencies(DependencyKind::DevDependencies, addon.dev_dependencies);
    package.merge_scripts(addon.scripts.iter().copied());
}

/// Applies one add-on to the project at `root`.
///
/// The manifest is only touched once the files and config patches are in
/// place.
pub fn apply_addon(
    root: &Path,
    package: Option<&mut PackageJson>,
    addon: &AddonDescriptor,
) -> Result<()> {
    write_addon_files(root, addon)?;
    patch_bundler_config(root, addon)?;
    if let Some(package) = package {
        merge_addon_manifest(package, addon);
    }
    Ok(())
}

/// Applies the named add-ons, in the given order, to the project at `root`.
///
/// Later add-ons overwrite dependency versions, scripts and files written
/// by earlier ones. Unknown names are skipped. An add-on that fails is
/// reported and skipped; the manifest still receives every add-on applied
/// before and after it.
///
/// Returns the applied add-ons.
///
/// # Errors
/// * if `package.json` can't be read or written
pub fn apply_addons(root: &Path, names: &[&str]) -> Result<Vec<&'static AddonDescriptor>> {
    let mut package = PackageJson::load(root)?;
    let mut applied = Vec::new();

    for name in names {
        let Some(addon) = get_addon(name) else {
            debug!("Unknown add-on '{name}', skipping");
            continue;
        };
        match apply_addon(root, package.as_mut(), addon) {
            Ok(()) => {
                println!("Applied add-on: '{}'", addon.name);
                applied.push(addon);
            }
            Err(e) => warn!("Failed to apply add-on '{}': {e}", addon.name),
        }
    }

    if let Some(package) = package {
        package.save()?;
    }
    Ok(applied)
}
