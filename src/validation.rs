//! Input validation performed before any file-system side effect.

use crate::constants::{MAX_PROJECT_NAME_LEN, RESERVED_NAMES};
use crate::error::{Error, Result};
use crate::options::ProjectOptions;
use crate::registry::{Registry, TemplateDescriptor};

fn invalid_name(name: &str, reason: &str) -> Error {
    Error::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Checks that `name` can be used as a project (and directory) name.
///
/// # Errors
/// * `Error::InvalidProjectName` when the name is empty, longer than 50
///   characters, contains characters outside `[A-Za-z0-9-_.]`, starts with
///   `.` or `-`, ends with `.`, or is a reserved word
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid_name(name, "project name cannot be empty"));
    }

    if name.chars().count() > MAX_PROJECT_NAME_LEN {
        return Err(invalid_name(name, "project name cannot be longer than 50 characters"));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
        return Err(invalid_name(
            name,
            "project name can only contain letters, numbers, hyphens, underscores, and dots",
        ));
    }

    if name.starts_with('.') || name.starts_with('-') {
        return Err(invalid_name(name, "project name cannot start with a dot or hyphen"));
    }

    if name.ends_with('.') {
        return Err(invalid_name(name, "project name cannot end with a dot"));
    }

    let lowered = name.to_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        return Err(invalid_name(name, "this is a reserved name"));
    }

    Ok(())
}

/// Looks `name` up in the registry.
///
/// # Errors
/// * `Error::UnknownTemplate` listing every registered name
pub fn validate_template<'a>(name: &str, registry: &'a Registry) -> Result<&'a TemplateDescriptor> {
    registry.get(name).ok_or_else(|| Error::UnknownTemplate {
        template: name.to_string(),
        available: registry.names().join(", "),
    })
}

/// Checks that every add-on selected in `options` is supported by the template.
///
/// # Errors
/// * `Error::UnsupportedAddons` naming the unsupported and the supported add-ons
pub fn validate_options(template: &TemplateDescriptor, options: &ProjectOptions) -> Result<()> {
    let unsupported: Vec<&str> = options
        .selected_addons()
        .into_iter()
        .filter(|addon| !template.supports_addon(addon))
        .collect();

    if unsupported.is_empty() {
        return Ok(());
    }

    Err(Error::UnsupportedAddons {
        template: template.name.clone(),
        unsupported: unsupported.join(", "),
        supported: template.addons.join(", "),
    })
}
