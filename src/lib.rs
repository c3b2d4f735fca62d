//! rtg-template scaffolds React projects from templates.
//! A template is materialized into a new directory, its placeholder tokens
//! are substituted, the selected add-ons are layered on, unneeded scaffolding
//! is pruned and the post-install steps finish the project.

/// Add-on catalog and bundler config patches
pub mod addons;

/// Applies add-ons to a materialized project
pub mod applier;

/// Command-line interface module for the rtg-template application
pub mod cli;

pub mod constants;

/// Error types and handling for the rtg-template application
pub mod error;

/// Template materialization from local paths and git repositories
pub mod loader;

pub mod options;

/// `package.json` editing
pub mod package_json;

/// Orchestration of every stage of project creation
pub mod pipeline;

/// Finalization and post-install steps
pub mod post_install;

/// User input and interaction handling
pub mod prompt;

/// Conditional pruning of the project tree
pub mod prune;

/// Built-in and external template registries
pub mod registry;

/// Template rendering for tool-owned scaffolding
pub mod renderer;

pub mod scaffolds;

/// Placeholder token substitution
pub mod transform;

pub mod validation;
