//! Router scaffolding: generated when routing is on, stripped when it's off.

use std::path::Path;

use log::debug;
use regex::Regex;

use crate::addons::insert_import;
use crate::error::Result;
use crate::prune::{edit_file, first_existing, remove_all, write_if_absent};
use crate::renderer::TemplateRenderer;
use crate::scaffolds::{render_flavoured, HOME_PAGE, ROUTES};
use crate::transform::title_case;

/// Directories holding route and page components.
pub const ROUTER_DIRS: [&str; 5] = [
    "src/routes",
    "src/Routes",
    "src/router",
    "src/pages",
    "src/Pages",
];

/// Root component candidates, in lookup order.
pub const APP_FILES: [&str; 4] = ["src/App.tsx", "src/App.jsx", "src/App.ts", "src/App.js"];

const APP_ROUTES_IMPORT: &str = "import AppRoutes from './routes/AppRoutes'";

/// Removes router imports, router wrappers and route outlets from a component.
pub fn strip_router_usage(content: &str) -> Result<String> {
    let patterns = [
        r#"(?m)^[ \t]*import[^\n]*from\s+['"]react-router(?:-dom)?['"];?[ \t]*(?:\r?\n|$)"#,
        r#"(?m)^[ \t]*import[^\n]*from\s+['"]\.{1,2}/(?:[^'"]*/)?(?:routes|Routes|router|pages|Pages)/[^'"]*['"];?[ \t]*(?:\r?\n|$)"#,
        r"(?m)^[ \t]*</?(?:BrowserRouter|HashRouter|Router)\b[^>\n]*>[ \t]*(?:\r?\n|$)",
        r"(?m)^[ \t]*<AppRoutes\s*/>[ \t]*(?:\r?\n|$)",
        r"</?(?:BrowserRouter|HashRouter|Router)\b[^>\n]*>|<AppRoutes\s*/>",
    ];

    let mut stripped = content.to_string();
    for pattern in patterns {
        stripped = Regex::new(pattern)?.replace_all(&stripped, "").to_string();
    }
    Ok(stripped)
}

/// Adds the routes import and a `<AppRoutes />` outlet to a root component.
///
/// The outlet goes right before the closing tag of the outermost `<div>`
/// block. Components without one only get the import.
pub fn insert_routes_outlet(content: &str) -> Result<String> {
    if content.contains("<AppRoutes") {
        return Ok(content.to_string());
    }

    let with_import = insert_import(content, APP_ROUTES_IMPORT);
    let block = Regex::new(r"(?s)<div\b[^>]*>.*</div>")?;
    let Some(found) = block.find(&with_import) else {
        debug!("No <div> block found, routes outlet not inserted");
        return Ok(with_import);
    };

    let close = found.end() - "</div>".len();
    let line_start = with_import[..close].rfind('\n').map_or(0, |index| index + 1);
    let before_close = &with_import[line_start..close];

    let mut patched = String::with_capacity(with_import.len() + 32);
    if before_close.trim().is_empty() {
        patched.push_str(&with_import[..line_start]);
        patched.push_str(&format!("{before_close}  <AppRoutes />\n"));
        patched.push_str(&with_import[line_start..]);
    } else {
        patched.push_str(&with_import[..close]);
        patched.push_str("<AppRoutes />");
        patched.push_str(&with_import[close..]);
    }
    Ok(patched)
}

fn generate_router_scaffold(
    root: &Path,
    typescript: bool,
    project_name: &str,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    if ROUTER_DIRS[..3].iter().any(|dir| root.join(dir).exists()) {
        debug!("Router scaffold already present");
        return Ok(());
    }

    let extension = if typescript { "tsx" } else { "jsx" };
    let title = title_case(project_name);
    write_if_absent(
        &root.join(format!("src/routes/AppRoutes.{extension}")),
        &render_flavoured(renderer, ROUTES, typescript, &title)?,
    )?;
    write_if_absent(
        &root.join(format!("src/pages/Home.{extension}")),
        &render_flavoured(renderer, HOME_PAGE, typescript, &title)?,
    )?;

    if let Some(app) = first_existing(root, &APP_FILES) {
        edit_file(&app, insert_routes_outlet)?;
    }
    Ok(())
}

fn remove_router_scaffold(root: &Path) -> Result<()> {
    remove_all(root, &ROUTER_DIRS)?;
    for app in APP_FILES.iter().map(|file| root.join(file)).filter(|path| path.is_file()) {
        edit_file(&app, strip_router_usage)?;
    }
    Ok(())
}

/// Makes the router scaffolding match the routing switch.
pub fn apply(
    root: &Path,
    route: bool,
    typescript: bool,
    project_name: &str,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    if route {
        generate_router_scaffold(root, typescript, project_name, renderer)
    } else {
        remove_router_scaffold(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = "import './App.css'\n\nfunction App() {\n  return (\n    <div className=\"App\">\n      <h1>Hello</h1>\n    </div>\n  )\n}\n\nexport default App\n";

    #[test]
    fn test_insert_routes_outlet() {
        let patched = insert_routes_outlet(APP).unwrap();

        assert!(patched
            .starts_with("import './App.css'\nimport AppRoutes from './routes/AppRoutes'\n"));
        assert!(patched.contains("      <h1>Hello</h1>\n      <AppRoutes />\n    </div>\n"));
        assert_eq!(insert_routes_outlet(&patched).unwrap(), patched);
    }

    #[test]
    fn test_strip_router_usage() {
        let patched = insert_routes_outlet(APP).unwrap();
        assert_eq!(strip_router_usage(&patched).unwrap(), APP);
    }

    #[test]
    fn test_strip_browser_router_wrapper() {
        let content = "import { BrowserRouter } from 'react-router-dom'\nimport App from './App'\n\nroot.render(\n  <BrowserRouter>\n    <App />\n  </BrowserRouter>\n)\n";
        assert_eq!(
            strip_router_usage(content).unwrap(),
            "import App from './App'\n\nroot.render(\n    <App />\n)\n"
        );
    }
}
