//! Template registry handling.
//! The registry maps template names to their descriptors. A built-in registry
//! ships with the tool and can be overlaid by an external document
//! (JSON or YAML, local path or HTTP(S) URL).

use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Version reported by the built-in registry.
pub const BUILTIN_REGISTRY_VERSION: &str = "1.0.0";

/// Dependencies and follow-up work a template declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostInstallSpec {
    /// Package identifiers, optionally carrying a version (`name@version`).
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    /// Contents of the `.env` file created in the project.
    pub env_template: Option<String>,
    /// Shell commands run in the project after installation.
    pub scripts: Vec<String>,
    pub instructions: Option<String>,
    /// Whether ESLint/Prettier configuration is generated.
    pub linting: bool,
}

/// Metadata describing a single template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    #[serde(default)]
    pub name: String,
    pub description: String,
    /// Source locator, see `loader::TemplateSource`.
    #[serde(default)]
    pub repository: Option<String>,
    /// Subdirectory of the fetched tree used as the project root.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub addons: Vec<String>,
    #[serde(default)]
    pub post_install: PostInstallSpec,
}

impl TemplateDescriptor {
    pub fn supports_addon(&self, addon: &str) -> bool {
        self.addons.iter().any(|supported| supported == addon)
    }

    /// Whether the template is a TypeScript one regardless of user flags.
    pub fn is_typescript(&self) -> bool {
        self.frameworks.iter().any(|framework| framework == "TypeScript")
    }
}

/// A set of named templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default = "default_version")]
    pub version: String,
    pub templates: IndexMap<String, TemplateDescriptor>,
}

fn default_version() -> String {
    BUILTIN_REGISTRY_VERSION.to_string()
}

impl Registry {
    pub fn get(&self, name: &str) -> Option<&TemplateDescriptor> {
        self.templates.get(name)
    }

    /// Template names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Shallow merge: templates from `other` replace same-named ones.
    pub fn merge(mut self, other: Registry) -> Self {
        self.version = other.version;
        self.templates.extend(other.templates);
        self
    }

    /// The registry compiled into the tool.
    pub fn builtin() -> Self {
        let mut templates = IndexMap::new();
        templates.insert("react".to_string(), react_template());
        templates.insert("react-ts".to_string(), react_ts_template());
        Self {
            version: default_version(),
            templates,
        }
    }
}

const SUPPORTED_ADDONS: [&str; 6] =
    ["tailwind", "styled-components", "mui", "chakra", "redux", "tanstack-query"];

const BASE_DEPENDENCIES: [&str; 4] = ["react", "react-dom", "react-router-dom", "axios"];

const TOOLING_DEV_DEPENDENCIES: [&str; 11] = [
    "husky",
    "lint-staged",
    "eslint",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
    "eslint-plugin-react-refresh",
    "@typescript-eslint/eslint-plugin",
    "@typescript-eslint/parser",
    "prettier",
    "eslint-config-prettier",
    "eslint-plugin-prettier",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn react_template() -> TemplateDescriptor {
    let mut dev_dependencies = to_strings(&["@vitejs/plugin-react", "vite"]);
    dev_dependencies.extend(to_strings(&TOOLING_DEV_DEPENDENCIES));

    TemplateDescriptor {
        name: "react".to_string(),
        description:
            "React application with Vite, React Router, Axios, Husky, ESLint, and Prettier"
                .to_string(),
        repository: Some("local:templates/react".to_string()),
        directory: None,
        frameworks: to_strings(&[
            "React",
            "Vite",
            "React Router",
            "Axios",
            "Husky",
            "ESLint",
            "Prettier",
        ]),
        addons: to_strings(&SUPPORTED_ADDONS),
        post_install: PostInstallSpec {
            dependencies: to_strings(&BASE_DEPENDENCIES),
            dev_dependencies,
            instructions: Some("Run `npm run dev` to start the development server.".to_string()),
            linting: true,
            ..Default::default()
        },
    }
}

fn react_ts_template() -> TemplateDescriptor {
    let mut dev_dependencies = to_strings(&[
        "@vitejs/plugin-react",
        "vite",
        "typescript",
        "@types/react",
        "@types/react-dom",
    ]);
    dev_dependencies.extend(to_strings(&TOOLING_DEV_DEPENDENCIES));

    TemplateDescriptor {
        name: "react-ts".to_string(),
        description:
            "React application with TypeScript, Vite, React Router, Axios, Husky, ESLint, and Prettier"
                .to_string(),
        repository: Some("local:templates/react-ts".to_string()),
        directory: None,
        frameworks: to_strings(&[
            "React",
            "TypeScript",
            "Vite",
            "React Router",
            "Axios",
            "Husky",
            "ESLint",
            "Prettier",
        ]),
        addons: to_strings(&SUPPORTED_ADDONS),
        post_install: PostInstallSpec {
            dependencies: to_strings(&BASE_DEPENDENCIES),
            dev_dependencies,
            instructions: Some("Run `npm run dev` to start the development server.".to_string()),
            linting: true,
            ..Default::default()
        },
    }
}

/// JSON schema every external registry document must satisfy.
fn registry_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["templates"],
        "properties": {
            "version": { "type": "string" },
            "templates": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "required": ["description"],
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "repository": { "type": "string" },
                        "directory": { "type": "string" },
                        "frameworks": { "type": "array", "items": { "type": "string" } },
                        "addons": { "type": "array", "items": { "type": "string" } },
                        "postInstall": {
                            "type": "object",
                            "properties": {
                                "dependencies": { "type": "array", "items": { "type": "string" } },
                                "devDependencies": { "type": "array", "items": { "type": "string" } },
                                "envTemplate": { "type": "string" },
                                "scripts": { "type": "array", "items": { "type": "string" } },
                                "instructions": { "type": "string" },
                                "linting": { "type": "boolean" }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Parses and validates an external registry document.
///
/// The content is parsed as JSON first and as YAML if that fails. Template
/// entries without a `name` take their key.
///
/// # Errors
/// * `Error::RegistryError` if the content can't be parsed or violates the schema
pub fn parse_registry(content: &str) -> Result<Registry> {
    let raw: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::RegistryError(format!("Invalid registry format: {e}")))?,
    };

    let validator = jsonschema::validator_for(&registry_schema())
        .map_err(|e| Error::RegistryError(e.to_string()))?;
    let violations: Vec<String> = validator.iter_errors(&raw).map(|e| e.to_string()).collect();
    if !violations.is_empty() {
        return Err(Error::RegistryError(format!(
            "Invalid registry schema: {}",
            violations.join("; ")
        )));
    }

    let mut registry: Registry = serde_json::from_value(raw)
        .map_err(|e| Error::RegistryError(format!("Invalid registry schema: {e}")))?;
    for (key, template) in registry.templates.iter_mut() {
        if template.name.is_empty() {
            template.name = key.clone();
        }
    }
    Ok(registry)
}

/// Reads a registry document from an HTTP(S) URL or a local file.
pub fn fetch_registry_document(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        debug!("Fetching registry from {source}");
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::RegistryError(e.to_string()))?;
        let response =
            client.get(source).send().map_err(|e| Error::RegistryError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::RegistryError(format!("HTTP {}: {source}", response.status())));
        }
        return response.text().map_err(|e| Error::RegistryError(e.to_string()));
    }

    debug!("Reading registry from {source}");
    Ok(std::fs::read_to_string(Path::new(source))?)
}

/// Returns the registry for this invocation.
///
/// Without a source, the built-in registry is returned. With one, the
/// external document is merged over the built-in templates; any failure to
/// load it falls back to the built-ins.
pub fn load_registry(source: Option<&str>) -> Registry {
    let builtin = Registry::builtin();
    let Some(source) = source else {
        return builtin;
    };

    match fetch_registry_document(source).and_then(|content| parse_registry(&content)) {
        Ok(external) => builtin.merge(external),
        Err(e) => {
            warn!("Failed to load external registry, using builtin templates: {e}");
            builtin
        }
    }
}

/// Renders the `list` output: every template with its frameworks,
/// add-ons and usage examples.
pub fn format_template_list(registry: &Registry) -> String {
    let mut output = String::from("Available templates:\n");
    for (name, template) in &registry.templates {
        output.push_str(&format!("\n  {name}\n    {}\n", template.description));
        if !template.frameworks.is_empty() {
            output.push_str(&format!("    Frameworks: {}\n", template.frameworks.join(", ")));
        }
        if !template.addons.is_empty() {
            output.push_str(&format!("    Add-ons: {}\n", template.addons.join(", ")));
        }
    }

    if let Some(name) = registry.names().first() {
        output.push_str("\nUsage:\n");
        output.push_str(&format!("  rtg-template {name} my-app\n"));
        output.push_str(&format!("  rtg-template {name} my-app --typescript --tailwind --redux\n"));
        output.push_str("  rtg-template interactive\n");
    }
    output
}
