//! Project creation pipeline.
//!
//! Validation and materialization are fatal. Every stage after the tree is
//! in place degrades its failures to a warning, so a usable project is left
//! behind even when a later step goes wrong.

use std::path::PathBuf;

use log::{debug, warn};

use crate::addons::AddonDescriptor;
use crate::applier::apply_addons;
use crate::error::Result;
use crate::loader::{materialize, TemplateSource};
use crate::options::{MaterializationContext, ProjectOptions};
use crate::post_install::{finalize_manifest, run_post_install};
use crate::prune::prune_tree;
use crate::registry::Registry;
use crate::renderer::MiniJinjaRenderer;
use crate::transform::{render_library_list, selected_libraries, transform_tree};
use crate::validation::{validate_options, validate_project_name, validate_template};

/// What a successful run produced.
#[derive(Debug)]
pub struct ProjectReport {
    pub project_name: String,
    pub template: String,
    pub target: PathBuf,
    pub source: TemplateSource,
    pub typescript: bool,
    pub addons: Vec<&'static AddonDescriptor>,
    pub template_instructions: Option<String>,
    pub options: ProjectOptions,
}

/// Creates `project_name` from `template_name`.
///
/// `base_dirs` are the directories local template paths are resolved against.
///
/// # Errors
/// * `Error::InvalidProjectName`, `Error::UnknownTemplate` or
///   `Error::UnsupportedAddons` before anything is written
/// * `Error::TargetExists` if the project directory is already there
/// * any error raised while fetching or copying the template
pub fn create_project(
    registry: &Registry,
    template_name: &str,
    project_name: &str,
    options: ProjectOptions,
    base_dirs: Vec<PathBuf>,
) -> Result<ProjectReport> {
    validate_project_name(project_name)?;
    let template = validate_template(template_name, registry)?;
    validate_options(template, &options)?;

    let context = MaterializationContext::new(project_name, options);
    let target = context.target.clone();
    let options = &context.options;

    let source = materialize(template, &context, base_dirs)?;
    println!("Created '{}' from {source}", target.display());

    let libraries = selected_libraries(template, options);
    match transform_tree(&target, project_name, &render_library_list(&libraries)) {
        Ok(changed) => debug!("Substituted tokens in {changed} files"),
        Err(e) => warn!("Token substitution failed: {e}"),
    }

    let addons = apply_addons(&target, &options.selected_addons()).unwrap_or_else(|e| {
        warn!("Failed to apply add-ons: {e}");
        Vec::new()
    });

    let renderer = MiniJinjaRenderer::new();
    let typescript = match prune_tree(&target, options, project_name, &renderer) {
        Ok(outcome) => outcome.typescript,
        Err(e) => {
            warn!("Failed to prune the project: {e}");
            options.typescript || template.is_typescript()
        }
    };

    if let Err(e) = finalize_manifest(&target, project_name, template, options.route) {
        warn!("Failed to update package.json: {e}");
    }

    run_post_install(&target, template, options, typescript, &renderer);

    Ok(ProjectReport {
        project_name: project_name.to_string(),
        template: template.name.clone(),
        target,
        source,
        typescript,
        addons,
        template_instructions: template.post_install.instructions.clone(),
        options: context.options,
    })
}

/// Next-step commands shown after a successful run.
pub fn next_steps(report: &ProjectReport) -> Vec<String> {
    let manager = report.options.package_manager;
    let mut steps = vec![format!("cd {}", report.project_name)];
    if !report.options.install {
        steps.push(format!("{manager} install"));
    }
    steps.push(format!("{manager} run dev"));
    steps
}

/// Prints the success summary, next steps and every instruction line.
pub fn print_summary(report: &ProjectReport) {
    println!();
    println!("Project '{}' created successfully!", report.project_name);
    println!("Location: {}", report.target.display());
    println!("Template: {}", report.template);

    println!();
    println!("Next steps:");
    for step in next_steps(report) {
        println!("  {step}");
    }

    let instructions: Vec<&str> = report
        .template_instructions
        .as_deref()
        .into_iter()
        .chain(report.addons.iter().map(|addon| addon.instructions))
        .collect();
    if !instructions.is_empty() {
        println!();
        println!("Notes:");
        for line in instructions {
            println!("  - {line}");
        }
    }
}
