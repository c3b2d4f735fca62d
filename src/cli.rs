//! Command-line interface implementation for rtg-template.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::options::{PackageManager, ProjectOptions, StateLibrary, UiLibrary};

/// Command-line arguments structure for rtg-template.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rtg-template: scaffold React projects from templates with add-ons",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Template name from the registry
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Name of the project directory to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Collect every option through prompts
    #[arg(short, long)]
    pub interactive: bool,

    /// Use TypeScript
    #[arg(short, long)]
    pub typescript: bool,

    /// Add Tailwind CSS
    #[arg(long, group = "ui")]
    pub tailwind: bool,

    /// Add Styled Components
    #[arg(long, group = "ui")]
    pub styled_components: bool,

    /// Add Material-UI
    #[arg(long, group = "ui")]
    pub mui: bool,

    /// Add Chakra UI
    #[arg(long, group = "ui")]
    pub chakra: bool,

    /// Add Redux Toolkit
    #[arg(long)]
    pub redux: bool,

    /// Add TanStack Query
    #[arg(long)]
    pub tanstack_query: bool,

    /// Same as --redux
    #[arg(long)]
    pub redux_toolkit: bool,

    /// Leave React Router out
    #[arg(long)]
    pub no_route: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub no_install: bool,

    /// Skip git initialization
    #[arg(long)]
    pub no_git: bool,

    /// Directory the project is created in
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Template source overriding the registry's (path, git URL or owner/repo)
    #[arg(long)]
    pub repo: Option<String>,

    /// External registry document (path or URL) merged over the built-in templates
    #[arg(long)]
    pub registry: Option<String>,

    /// Package manager used to install dependencies
    #[arg(long, value_enum, default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List available templates
    #[command(visible_alias = "ls")]
    List,
    /// Create a project through interactive prompts
    #[command(visible_alias = "i")]
    Interactive,
}

impl Args {
    /// The UI library selected by flag, if any.
    pub fn ui(&self) -> Option<UiLibrary> {
        [
            (self.tailwind, UiLibrary::Tailwind),
            (self.styled_components, UiLibrary::StyledComponents),
            (self.mui, UiLibrary::Mui),
            (self.chakra, UiLibrary::Chakra),
        ]
        .into_iter()
        .find_map(|(selected, library)| selected.then_some(library))
    }

    /// Builds the project options the flags describe.
    pub fn project_options(&self) -> ProjectOptions {
        let mut options = ProjectOptions {
            typescript: self.typescript,
            ui: self.ui(),
            install: !self.no_install,
            git: !self.no_git,
            package_manager: self.package_manager,
            repo: self.repo.clone(),
            directory: self.directory.clone(),
            ..Default::default()
        };
        if self.redux {
            options.select_state(StateLibrary::Redux);
        }
        if self.tanstack_query {
            options.select_state(StateLibrary::TanstackQuery);
        }
        options.with_legacy_flags(self.redux_toolkit, self.no_route)
    }

    /// Whether interactive mode was requested by flag or subcommand, or
    /// implied by a bare invocation without template or project name.
    pub fn is_interactive(&self) -> bool {
        self.interactive
            || self.command == Some(Commands::Interactive)
            || (self.command.is_none() && self.template.is_none() && self.project_name.is_none())
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Prints the usage summary.
pub fn print_help() {
    let result = Args::command()
        .help_template(
            r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
        )
        .print_help();
    if let Err(e) = result {
        log::error!("Failed to print help: {e}");
    }
}
