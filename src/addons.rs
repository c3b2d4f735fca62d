//! Add-on catalog.
//! An add-on is a named bundle of dependencies, files, scripts and bundler
//! config patches layered onto a materialized template.

use log::debug;
use serde::Serialize;

/// A single edit applied to the bundler config of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ConfigPatch {
    /// Inserts an import statement after the last existing import,
    /// or at the top when there is none.
    InsertImport { statement: &'static str },
    /// Appends an item to the array literal assigned to `array`.
    InsertArrayItem {
        array: &'static str,
        item: &'static str,
    },
}

impl ConfigPatch {
    /// Applies the patch to config text. Patches already present and arrays
    /// that can't be found leave the text unchanged.
    pub fn apply(&self, content: &str) -> String {
        match self {
            ConfigPatch::InsertImport { statement } => insert_import(content, statement),
            ConfigPatch::InsertArrayItem { array, item } => {
                insert_array_item(content, array, item)
            }
        }
    }
}

/// Whether `line` ends an import statement, i.e. closes on its module specifier.
fn closes_import(line: &str) -> bool {
    let line = line.trim_end().trim_end_matches(';');
    line.ends_with('\'') || line.ends_with('"')
}

/// Inserts `statement` on its own line after the last import statement.
/// Multi-line imports are skipped as a whole.
pub fn insert_import(content: &str, statement: &str) -> String {
    if content.contains(statement) {
        return content.to_string();
    }

    let mut lines: Vec<&str> = content.lines().collect();
    let position = match lines.iter().rposition(|line| line.trim_start().starts_with("import ")) {
        Some(start) => {
            let end = lines[start..]
                .iter()
                .position(|line| closes_import(line))
                .map_or(start, |offset| start + offset);
            end + 1
        }
        None => 0,
    };
    lines.insert(position, statement);

    let mut patched = lines.join("\n");
    if content.ends_with('\n') {
        patched.push('\n');
    }
    patched
}

fn insert_array_item(content: &str, array: &str, item: &str) -> String {
    let Some(key) = content.find(&format!("{array}:")) else {
        debug!("No '{array}' array found, skipping patch");
        return content.to_string();
    };
    let Some(open) = content[key..].find('[').map(|offset| key + offset) else {
        return content.to_string();
    };

    // Finds the bracket closing the array, skipping nested calls and literals.
    let mut depth = 0usize;
    let mut close = None;
    for (offset, ch) in content[open..].char_indices() {
        match ch {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return content.to_string();
    };

    let inner = &content[open + 1..close];
    if inner.contains(item) {
        return content.to_string();
    }
    let body = inner.trim_end();
    let tail = &inner[body.len()..];
    let new_inner = if body.trim().is_empty() {
        item.to_string()
    } else if body.ends_with(',') {
        format!("{body} {item}{tail}")
    } else {
        format!("{body}, {item}{tail}")
    };

    format!("{}{}{}", &content[..=open], new_inner, &content[close..])
}

/// Declarative description of an add-on.
#[derive(Debug, Clone, Serialize)]
pub struct AddonDescriptor {
    pub name: &'static str,
    pub dependencies: &'static [&'static str],
    pub dev_dependencies: &'static [&'static str],
    /// Relative path and full content of every file the add-on writes.
    pub files: &'static [(&'static str, &'static str)],
    pub scripts: &'static [(&'static str, &'static str)],
    pub config_patches: &'static [ConfigPatch],
    pub instructions: &'static str,
}

const TAILWIND_CONFIG: &str = r#"/** @type {import('tailwindcss').Config} */
export default {
  content: [
    "./index.html",
    "./src/**/*.{js,ts,jsx,tsx}",
  ],
  theme: {
    extend: {},
  },
  plugins: [],
}
"#;

const TAILWIND_STYLESHEET: &str = r#"@import "tailwindcss";
@config "../tailwind.config.js";
"#;

/// Every add-on, in declaration order.
pub const ADDONS: [AddonDescriptor; 6] = [
    AddonDescriptor {
        name: "tailwind",
        dependencies: &[],
        dev_dependencies: &["tailwindcss", "@tailwindcss/vite", "@tailwindcss/cli"],
        files: &[
            ("tailwind.config.js", TAILWIND_CONFIG),
            ("src/index.css", TAILWIND_STYLESHEET),
        ],
        scripts: &[(
            "watch:css",
            "tailwindcss -i ./src/index.css -o ./dist/output.css --watch",
        )],
        config_patches: &[
            ConfigPatch::InsertImport {
                statement: "import tailwindcss from '@tailwindcss/vite'",
            },
            ConfigPatch::InsertArrayItem {
                array: "plugins",
                item: "tailwindcss()",
            },
        ],
        instructions: "Tailwind CSS has been configured. Make sure to import the CSS file in your main component.",
    },
    AddonDescriptor {
        name: "styled-components",
        dependencies: &["styled-components"],
        dev_dependencies: &["@types/styled-components"],
        files: &[],
        scripts: &[],
        config_patches: &[],
        instructions: "Styled Components has been installed. You can now use styled components in your React app.",
    },
    AddonDescriptor {
        name: "mui",
        dependencies: &[
            "@mui/material",
            "@emotion/react",
            "@emotion/styled",
            "@mui/icons-material",
        ],
        dev_dependencies: &[],
        files: &[],
        scripts: &[],
        config_patches: &[],
        instructions: "Material-UI has been installed. You can now use MUI components in your React app.",
    },
    AddonDescriptor {
        name: "chakra",
        dependencies: &["@chakra-ui/react", "@emotion/react", "@emotion/styled", "framer-motion"],
        dev_dependencies: &[],
        files: &[],
        scripts: &[],
        config_patches: &[],
        instructions: "Chakra UI has been installed. You can now use Chakra components in your React app.",
    },
    AddonDescriptor {
        name: "redux",
        dependencies: &["@reduxjs/toolkit", "react-redux"],
        dev_dependencies: &[],
        files: &[],
        scripts: &[],
        config_patches: &[],
        instructions: "Redux Toolkit has been installed and configured. You can now use Redux in your React app.",
    },
    AddonDescriptor {
        name: "tanstack-query",
        dependencies: &["@tanstack/react-query"],
        dev_dependencies: &[],
        files: &[],
        scripts: &[],
        config_patches: &[],
        instructions: "TanStack Query has been installed and configured. You can now use React Query in your app.",
    },
];

/// Looks an add-on up by its catalog name.
pub fn get_addon(name: &str) -> Option<&'static AddonDescriptor> {
    ADDONS.iter().find(|addon| addon.name == name)
}

/// Names of every add-on in declaration order.
pub fn addon_names() -> Vec<&'static str> {
    ADDONS.iter().map(|addon| addon.name).collect()
}
