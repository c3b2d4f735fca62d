//! Post-materialization steps.
//!
//! Everything here runs after the project tree is in place, so every step
//! is recoverable: a failure is logged with `warn!` and the next step runs.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use git2::{IndexAddOption, Repository, Signature};
use log::{debug, warn};
use serde_json::json;

use crate::constants::{CUSTOM_HOOK_FILE, ROUTER_PACKAGE, TOOL_NAME};
use crate::error::{Error, Result};
use crate::options::ProjectOptions;
use crate::package_json::{resolve_version, DependencyKind, PackageJson};
use crate::prune::write_if_absent;
use crate::registry::TemplateDescriptor;
use crate::renderer::TemplateRenderer;
use crate::scaffolds::{render_flavoured, ESLINTRC, PRETTIERRC};

/// Development dependencies the linting setup relies on.
const LINT_DEV_DEPENDENCIES: [&str; 5] = [
    "eslint",
    "eslint-config-prettier",
    "eslint-plugin-prettier",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
];

const TYPESCRIPT_LINT_DEV_DEPENDENCIES: [&str; 2] =
    ["@typescript-eslint/eslint-plugin", "@typescript-eslint/parser"];

const LINT_SCRIPTS: [(&str, &str); 3] = [
    ("lint", "eslint src --ext .js,.jsx,.ts,.tsx"),
    ("lint:fix", "eslint src --ext .js,.jsx,.ts,.tsx --fix"),
    ("format", "prettier --write src/**/*.{js,jsx,ts,tsx,css,md}"),
];

const PRE_COMMIT_HOOK: &str = "npx lint-staged\n";

/// Node program loading the custom hook module and calling it with the
/// project path. The module may export a function or an object with a
/// `postInstall` function.
const CUSTOM_HOOK_LOADER: &str = "const { pathToFileURL } = require('url');\
import(pathToFileURL(process.argv[1]).href)\
.then(async (mod) => {\
const hook = mod.default ?? mod;\
const run = typeof hook === 'function' ? hook : hook.postInstall;\
if (typeof run === 'function') await run(process.argv[2]);\
})\
.catch((err) => { console.error(err); process.exit(1); });";

/// Sets the project name and merges the template's own dependencies.
///
/// With routing disabled the router package is neither merged nor kept.
pub fn finalize_manifest(
    root: &Path,
    project_name: &str,
    template: &TemplateDescriptor,
    route: bool,
) -> Result<()> {
    let Some(mut package) = PackageJson::load(root)? else {
        return Ok(());
    };
    let keep = |identifier: &&String| route || resolve_version(identifier).0 != ROUTER_PACKAGE;

    package.set_name(project_name);
    package.merge_dependencies(
        DependencyKind::Dependencies,
        template.post_install.dependencies.iter().filter(keep),
    );
    package.merge_dependencies(
        DependencyKind::DevDependencies,
        template.post_install.dev_dependencies.iter().filter(keep),
    );
    if !route {
        package.remove_dependency(DependencyKind::Dependencies, ROUTER_PACKAGE);
        package.remove_dependency(DependencyKind::DevDependencies, ROUTER_PACKAGE);
    }
    package.save()
}

/// Blanks every value of a dotenv document, keeping keys and comments.
pub fn strip_env_values(template: &str) -> String {
    template
        .split('\n')
        .map(|line| match line.split_once('=') {
            Some((key, _)) => format!("{key}="),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `.env` and `.env.example`. Existing files are kept.
pub fn write_env_files(root: &Path, env_template: &str) -> Result<()> {
    write_if_absent(&root.join(".env"), env_template)?;
    write_if_absent(&root.join(".env.example"), &strip_env_values(env_template))?;
    Ok(())
}

fn add_missing_dev_dependencies(package: &mut PackageJson, names: &[&str]) {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| package.dependency(DependencyKind::DevDependencies, name).is_none())
        .collect();
    package.merge_dependencies(DependencyKind::DevDependencies, missing);
}

/// Writes the ESLint and Prettier configuration and the lint scripts.
pub fn setup_linting(root: &Path, typescript: bool, renderer: &dyn TemplateRenderer) -> Result<()> {
    let eslintrc = render_flavoured(renderer, ESLINTRC, typescript, "")?;
    write_if_absent(&root.join(".eslintrc.cjs"), &eslintrc)?;
    write_if_absent(&root.join(".prettierrc"), PRETTIERRC)?;

    if let Some(mut package) = PackageJson::load(root)? {
        add_missing_dev_dependencies(&mut package, &LINT_DEV_DEPENDENCIES);
        if typescript {
            add_missing_dev_dependencies(&mut package, &TYPESCRIPT_LINT_DEV_DEPENDENCIES);
        }
        package.merge_scripts(LINT_SCRIPTS);
        package.save()?;
    }
    Ok(())
}

/// Adds a pre-commit hook running `lint-staged` and its configuration.
pub fn setup_git_hooks(root: &Path) -> Result<()> {
    let Some(mut package) = PackageJson::load(root)? else {
        debug!("No package.json, skipping git hooks");
        return Ok(());
    };

    let hook = root.join(".husky/pre-commit");
    write_if_absent(&hook, PRE_COMMIT_HOOK)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755))?;
    }

    add_missing_dev_dependencies(&mut package, &["husky", "lint-staged"]);
    package.merge_scripts([("prepare", "husky")]);
    if package.get("lint-staged").is_none() {
        package.set(
            "lint-staged",
            json!({
                "src/**/*.{js,jsx,ts,tsx}": ["eslint --fix", "prettier --write"],
                "src/**/*.{css,md}": ["prettier --write"],
            }),
        );
    }
    package.save()
}

/// Runs `program` in `cwd` with inherited stdio.
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running '{command_line}' in '{}'", cwd.display());

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::CommandError {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::CommandError {
            command: command_line,
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}

/// Runs a shell command line in `cwd`.
pub fn run_shell(script: &str, cwd: &Path) -> Result<()> {
    if cfg!(windows) {
        run_command("cmd", &["/C", script], cwd)
    } else {
        run_command("sh", &["-c", script], cwd)
    }
}

/// Runs the project's custom hook, if any, and deletes it on success.
///
/// Returns whether a hook was run.
pub fn run_custom_hook(root: &Path) -> Result<bool> {
    let hook = root.join(CUSTOM_HOOK_FILE);
    if !hook.is_file() {
        return Ok(false);
    }

    let hook_path = hook.to_string_lossy().into_owned();
    let root_path = root.to_string_lossy().into_owned();
    run_command(
        "node",
        &["-e", CUSTOM_HOOK_LOADER, hook_path.as_str(), root_path.as_str()],
        root,
    )?;
    fs::remove_file(&hook)?;
    Ok(true)
}

/// Creates a repository with a single commit holding the whole project.
pub fn init_git_repository(root: &Path) -> Result<git2::Oid> {
    let repo = Repository::init(root)?;
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;

    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = match repo.signature() {
        Ok(signature) => signature,
        Err(e) => {
            debug!("No git identity configured ({e}), using the tool signature");
            Signature::now(TOOL_NAME, &format!("{TOOL_NAME}@localhost"))?
        }
    };
    let message = format!("Initial commit from {TOOL_NAME}");
    Ok(repo.commit(Some("HEAD"), &signature, &signature, &message, &tree, &[])?)
}

fn recover(step: &str, result: Result<()>) {
    match result {
        Ok(()) => debug!("Post-install step '{step}' done"),
        Err(e) => warn!("Post-install step '{step}' failed: {e}"),
    }
}

/// Runs every post-install step for the project at `root`.
pub fn run_post_install(
    root: &Path,
    template: &TemplateDescriptor,
    options: &ProjectOptions,
    typescript: bool,
    renderer: &dyn TemplateRenderer,
) {
    let spec = &template.post_install;

    if let Some(env_template) = &spec.env_template {
        recover("env files", write_env_files(root, env_template));
    }

    if spec.linting {
        recover("linting", setup_linting(root, typescript, renderer));
        recover("git hooks", setup_git_hooks(root));
    }

    if options.install {
        println!("Installing dependencies with {}...", options.package_manager);
        recover("install", run_command(options.package_manager.program(), &["install"], root));
    }

    for script in &spec.scripts {
        recover(script, run_shell(script, root));
    }

    // The hook deletes itself on success, so it runs before the initial
    // commit to keep the new repository clean.
    recover(
        "custom hook",
        run_custom_hook(root).map(|ran| {
            if ran {
                println!("Ran custom post-install hook");
            }
        }),
    );

    if options.git {
        recover(
            "git",
            init_git_repository(root).map(|oid| debug!("Created initial commit {oid}")),
        );
    }
}
