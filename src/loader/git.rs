use std::fs;
use std::path::Path;

use log::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;

/// Loader for templates hosted in git repositories.
///
/// The repository is cloned without tags and its `.git` directory removed,
/// leaving a fresh copy of the files only.
pub struct GitLoader<S: AsRef<str>> {
    repo: S,
}

impl<S: AsRef<str>> GitLoader<S> {
    /// Creates a new GitLoader. The repository may end with `#<branch>`.
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Checks whether the string looks like a git URL.
    pub fn is_git_url(repo: &str) -> bool {
        if repo.starts_with("git@") {
            return true;
        }
        match Url::parse(repo) {
            Ok(url) => matches!(url.scheme(), "https" | "http" | "git" | "ssh"),
            Err(_) => false,
        }
    }

    /// Splits the repository into its clone URL and optional branch.
    pub fn split_reference(&self) -> (&str, Option<&str>) {
        let repo = self.repo.as_ref();
        match repo.rsplit_once('#') {
            Some((url, reference)) if !reference.is_empty() => (url, Some(reference)),
            _ => (repo, None),
        }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<S> {
    fn load(&self, target: &Path) -> Result<()> {
        let (url, reference) = self.split_reference();
        debug!("Cloning repository '{url}' into '{}'.", target.display());

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.download_tags(git2::AutotagOption::None);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        if let Some(reference) = reference {
            builder.branch(reference);
        }

        builder.clone(url, target).map_err(|e| {
            Error::TemplateError(format!("failed to fetch repository '{url}': {}", e.message()))
        })?;

        let git_dir = target.join(".git");
        if git_dir.exists() {
            fs::remove_dir_all(git_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_git_url() {
        assert!(GitLoader::<&str>::is_git_url("https://github.com/user/repo.git"));
        assert!(GitLoader::<&str>::is_git_url("git@github.com:user/repo.git"));
        assert!(!GitLoader::<&str>::is_git_url("./templates/react"));
        assert!(!GitLoader::<&str>::is_git_url("user/repo"));
    }

    #[test]
    fn test_split_reference() {
        let loader = GitLoader::new("https://github.com/user/repo.git#dev");
        assert_eq!(loader.split_reference(), ("https://github.com/user/repo.git", Some("dev")));

        let loader = GitLoader::new("https://github.com/user/repo.git");
        assert_eq!(loader.split_reference(), ("https://github.com/user/repo.git", None));
    }
}
