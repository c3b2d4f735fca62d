//! Interactive mode.
//! Collects the same decisions as the command-line flags through
//! `dialoguer` prompts. The UI library is a single select, so at most one
//! can be chosen.

use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{Error, Result};
use crate::options::{PackageManager, ProjectOptions, StateLibrary, UiLibrary};
use crate::registry::Registry;
use crate::validation::validate_project_name;

/// Project name suggested by the name prompt.
pub const DEFAULT_PROJECT_NAME: &str = "my-react-app";

/// The prompt primitives interactive mode is built on.
pub trait Prompter {
    /// Returns the index of the chosen item.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
    /// Returns the indices of the checked items.
    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;
    fn input(&self, prompt: &str, default: &str) -> Result<String>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(|name: &String| -> std::result::Result<(), String> {
                validate_project_name(name).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Everything interactive mode decides.
#[derive(Debug, Clone)]
pub struct InteractiveAnswers {
    pub template: String,
    pub project_name: String,
    pub options: ProjectOptions,
}

fn pick<T: Copy>(items: &[T], index: usize) -> Result<T> {
    items
        .get(index)
        .copied()
        .ok_or_else(|| Error::PromptError(format!("Selection {index} is out of range")))
}

/// Asks for the template, project name and every project option.
///
/// Only add-ons the chosen template supports are offered.
pub fn prompt_project(prompter: &dyn Prompter, registry: &Registry) -> Result<InteractiveAnswers> {
    let names = registry.names();
    if names.is_empty() {
        return Err(Error::RegistryError("No templates available".to_string()));
    }
    let items: Vec<String> = registry
        .templates
        .values()
        .map(|template| format!("{} - {}", template.name, template.description))
        .collect();
    let template_name = pick(&names, prompter.select("Select a template", &items, 0)?)?.to_string();
    let Some(template) = registry.get(&template_name) else {
        return Err(Error::UnknownTemplate {
            template: template_name,
            available: names.join(", "),
        });
    };

    let project_name = prompter.input("Project name", DEFAULT_PROJECT_NAME)?;
    let mut options = ProjectOptions::default();

    if !template.is_typescript() {
        options.typescript = prompter.confirm("Use TypeScript?", false)?;
    }

    let ui_choices: Vec<UiLibrary> = UiLibrary::ALL
        .into_iter()
        .filter(|library| template.supports_addon(library.addon_name()))
        .collect();
    if !ui_choices.is_empty() {
        let items: Vec<String> = std::iter::once("None".to_string())
            .chain(ui_choices.iter().map(|library| library.label().to_string()))
            .collect();
        let choice = prompter.select("Select a UI library", &items, 0)?;
        options.ui = choice.checked_sub(1).and_then(|index| ui_choices.get(index).copied());
    }

    let state_choices: Vec<StateLibrary> = StateLibrary::ALL
        .into_iter()
        .filter(|library| template.supports_addon(library.addon_name()))
        .collect();
    if !state_choices.is_empty() {
        let items: Vec<String> = state_choices
            .iter()
            .map(|library| library.label().to_string())
            .collect();
        for index in prompter.multi_select("Select state management libraries", &items)? {
            if let Some(library) = state_choices.get(index) {
                options.select_state(*library);
            }
        }
    }

    options.route = prompter.confirm("Include React Router?", true)?;

    let managers: Vec<String> = PackageManager::ALL.iter().map(ToString::to_string).collect();
    options.package_manager =
        pick(&PackageManager::ALL, prompter.select("Select a package manager", &managers, 0)?)?;
    options.install = prompter.confirm("Install dependencies?", true)?;
    options.git = prompter.confirm("Initialize a git repository?", true)?;

    Ok(InteractiveAnswers {
        template: template_name,
        project_name,
        options,
    })
}
