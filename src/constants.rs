//! Common constants used throughout rtg-template.

/// Name of the tool, used for the custom hook file and the fallback git signature.
pub const TOOL_NAME: &str = "rtg-template";

/// Custom post-install hook looked up in the materialized project.
pub const CUSTOM_HOOK_FILE: &str = ".rtg-template.js";

/// Environment variable naming an external registry document.
pub const REGISTRY_ENV: &str = "RTG_TEMPLATE_REGISTRY";

/// Manifest mutated by every stage after materialization.
pub const PACKAGE_JSON: &str = "package.json";

/// Package providing the router scaffolding.
pub const ROUTER_PACKAGE: &str = "react-router-dom";

/// Placeholder tokens rewritten by the content transformer.
pub mod tokens {
    pub const PROJECT_NAME: &str = "{{PROJECT_NAME}}";
    pub const PROJECT_NAME_LOWER: &str = "{{project-name}}";
    pub const PROJECT_NAME_TITLE: &str = "{{Project Name}}";
    pub const LIBRARIES: &str = "{{RTG_LIBRARIES}}";
}

/// Names that can not be used as a project name, compared case-insensitively.
pub const RESERVED_NAMES: [&str; 19] = [
    "node_modules",
    "package",
    "npm",
    "yarn",
    "pnpm",
    "git",
    ".git",
    "dist",
    "build",
    "public",
    "src",
    "lib",
    "bin",
    "test",
    "tests",
    "spec",
    "docs",
    "doc",
    "documentation",
];

/// Maximum accepted project name length.
pub const MAX_PROJECT_NAME_LEN: usize = 50;

/// Extensions of files visited by the content transformer.
pub const PROCESSABLE_EXTENSIONS: [&str; 9] =
    ["js", "ts", "jsx", "tsx", "json", "md", "html", "css", "env"];

/// Bundler configs an add-on config patch may target, in lookup order.
pub const BUNDLER_CONFIG_FILES: [&str; 3] =
    ["vite.config.js", "vite.config.ts", "vite.config.mjs"];
