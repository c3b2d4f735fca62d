//! rtg-template's main application entry point.
//! Parses the command line, loads the registry for this invocation and
//! dispatches to listing, interactive mode or project creation.

use rtg::{
    cli::{get_args, print_help, Args, Commands},
    constants::REGISTRY_ENV,
    error::{default_error_handler, Error, Result},
    loader::default_base_dirs,
    pipeline::{create_project, print_summary},
    prompt::{prompt_project, DialoguerPrompter},
    registry::{format_template_list, load_registry},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the built-in registry, merged with an external one if configured
/// 2. Lists templates, or
/// 3. Collects options (flags or prompts) and runs the creation pipeline
fn run(args: Args) -> Result<()> {
    let registry_source = args.registry.clone().or_else(|| std::env::var(REGISTRY_ENV).ok());
    let registry = load_registry(registry_source.as_deref());

    if args.command == Some(Commands::List) {
        print!("{}", format_template_list(&registry));
        return Ok(());
    }

    let (template, project_name, options) = if args.is_interactive() {
        let prompter = DialoguerPrompter::new();
        let answers = prompt_project(&prompter, &registry)?;
        (answers.template, answers.project_name, answers.options)
    } else {
        let Some(template) = args.template.clone() else {
            print_help();
            return Err(Error::MissingArgument("Template name".to_string()));
        };
        let project_name = args
            .project_name
            .clone()
            .ok_or_else(|| Error::MissingArgument("Project name".to_string()))?;
        (template, project_name, args.project_options())
    };

    let report = create_project(&registry, &template, &project_name, options, default_base_dirs())?;
    print_summary(&report);
    Ok(())
}
