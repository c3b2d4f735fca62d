//! Template materialization.
//! Resolves a template's source and produces the populated target directory,
//! either by copying a local tree or by fetching a git repository.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::loader::git::GitLoader;
use crate::loader::interface::TemplateLoader;
use crate::loader::local::LocalLoader;
use crate::options::MaterializationContext;
use crate::registry::TemplateDescriptor;

pub mod git;
pub mod interface;
pub mod local;

/// Prefix marking a registry source as a path relative to the install.
const LOCAL_PREFIX: &str = "local:";

/// Shorthand prefixes expanded to full clone URLs.
const HOST_SHORTHANDS: [(&str, &str); 3] = [
    ("github:", "https://github.com/"),
    ("gitlab:", "https://gitlab.com/"),
    ("bitbucket:", "https://bitbucket.org/"),
];

/// Represents the source location of a template.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH), optionally followed by `#<branch>`
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

fn is_owner_repo_shorthand(s: &str) -> bool {
    let spec = s.split_once('#').map_or(s, |(spec, _)| spec);
    let Some((owner, repo)) = spec.split_once('/') else {
        return false;
    };
    let valid = |part: &str, extra: &[char]| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || extra.contains(&c))
    };
    valid(owner, &[]) && valid(repo, &['.'])
}

fn expand_shorthand(base: &str, spec: &str) -> String {
    let (spec, reference) = match spec.split_once('#') {
        Some((spec, reference)) => (spec, Some(reference)),
        None => (spec, None),
    };
    let spec = spec.trim_end_matches(".git");
    match reference {
        Some(reference) => format!("{base}{spec}.git#{reference}"),
        None => format!("{base}{spec}.git"),
    }
}

impl TemplateSource {
    /// Parses a source locator.
    ///
    /// * `local:<path>` and anything not recognized as remote is a local path
    /// * git URLs (`https://`, `git://`, `ssh://`, `git@`) are kept as is
    /// * `github:owner/repo`, `gitlab:owner/repo`, `bitbucket:owner/repo` and
    ///   a bare `owner/repo` that doesn't exist locally expand to HTTPS clone URLs
    pub fn from_string(s: &str) -> Self {
        if let Some(path) = s.strip_prefix(LOCAL_PREFIX) {
            return Self::FileSystem(PathBuf::from(path));
        }

        for (prefix, base) in HOST_SHORTHANDS {
            if let Some(spec) = s.strip_prefix(prefix) {
                return Self::Git(expand_shorthand(base, spec));
            }
        }

        if GitLoader::<&str>::is_git_url(s) {
            return Self::Git(s.to_string());
        }

        if is_owner_repo_shorthand(s) && !Path::new(s).exists() {
            return Self::Git(expand_shorthand("https://github.com/", s));
        }

        Self::FileSystem(PathBuf::from(s))
    }
}

/// Base directories a relative local template path is resolved against:
/// the current directory, the executable's directory and its parent, and
/// the directory the crate was built from.
pub fn default_base_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        if let Some(parent) = exe_dir.parent() {
            dirs.push(exe_dir.clone());
            dirs.push(parent.to_path_buf());
        } else {
            dirs.push(exe_dir);
        }
    }
    dirs.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    dirs
}

/// Makes `directory` inside `target` the new root of the tree.
///
/// The subdirectory is moved next to `target`, the rest of the tree
/// removed, and the subdirectory moved back into place.
pub fn extract_subdirectory(target: &Path, directory: &str) -> Result<()> {
    let source = target.join(directory);
    if !source.exists() {
        warn!("Template directory '{directory}' not found, keeping the whole tree");
        return Ok(());
    }

    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "template".to_string());
    let temp = target.with_file_name(format!("{name}-temp"));

    fs::rename(&source, &temp)?;
    fs::remove_dir_all(target)?;
    fs::rename(&temp, target)?;
    Ok(())
}

/// Produces the populated project directory for `template`.
///
/// The `--repo` override takes precedence over the descriptor's source.
///
/// # Errors
/// * `Error::TargetExists` if the target path is already occupied
/// * `Error::TemplateError` if no source is configured or a fetch fails
/// * `Error::TemplateNotFound` if a local source can't be resolved
pub fn materialize(
    template: &TemplateDescriptor,
    context: &MaterializationContext,
    base_dirs: Vec<PathBuf>,
) -> Result<TemplateSource> {
    let target = &context.target;
    if target.exists() {
        return Err(Error::TargetExists {
            target: target.display().to_string(),
        });
    }

    let repository = context
        .options
        .repo
        .as_deref()
        .or(template.repository.as_deref())
        .ok_or_else(|| {
            Error::TemplateError(format!(
                "No repository specified for template \"{}\"",
                template.name
            ))
        })?;

    let source = TemplateSource::from_string(repository);
    debug!("Materializing {source} into '{}'.", target.display());

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let loader: Box<dyn TemplateLoader> = match &source {
        TemplateSource::Git(repo) => Box::new(GitLoader::new(repo.clone())),
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path.clone(), base_dirs)),
    };
    loader.load(target)?;

    if let Some(directory) = &template.directory {
        extract_subdirectory(target, directory)?;
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_display() {
        let fs_source = TemplateSource::FileSystem(PathBuf::from("/path/to/template"));
        assert_eq!(format!("{}", fs_source), "local path: '/path/to/template'");

        let git_source = TemplateSource::Git("git@github.com:user/repo".to_string());
        assert_eq!(format!("{}", git_source), "git repository: 'git@github.com:user/repo'");
    }

    #[test]
    fn test_template_source_from_string() {
        assert_eq!(
            TemplateSource::from_string("local:templates/react"),
            TemplateSource::FileSystem(PathBuf::from("templates/react"))
        );
        assert_eq!(
            TemplateSource::from_string("github:user/repo"),
            TemplateSource::Git("https://github.com/user/repo.git".to_string())
        );
        assert_eq!(
            TemplateSource::from_string("user/repo#main"),
            TemplateSource::Git("https://github.com/user/repo.git#main".to_string())
        );
        assert_eq!(
            TemplateSource::from_string("https://gitlab.com/user/repo.git"),
            TemplateSource::Git("https://gitlab.com/user/repo.git".to_string())
        );
        assert_eq!(
            TemplateSource::from_string("./my/template"),
            TemplateSource::FileSystem(PathBuf::from("./my/template"))
        );
    }
}
