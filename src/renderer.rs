//! Template renderer for the scaffolding fragments the tool generates itself.
//! Project files copied from a template are never rendered with it; they
//! only go through literal token substitution.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with block trimming enabled, so block tags
    /// don't leave blank lines in generated source files.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::MinijinjaError` if the template can't be parsed or rendered
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template("temp", template).map_err(Error::MinijinjaError)?;

        let tmpl = env.get_template("temp").map_err(Error::MinijinjaError)?;

        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minijinja_renderer() {
        let renderer = MiniJinjaRenderer::new();
        let context = serde_json::json!({ "typescript": true, "name": "App" });

        let template = "const {{ name }}{% if typescript %}: React.FC{% endif %} = () => null\n";
        let result = renderer.render(template, &context).unwrap();
        assert_eq!(result, "const App: React.FC = () => null\n");
    }

    #[test]
    fn test_block_lines_are_trimmed() {
        let renderer = MiniJinjaRenderer::new();
        let context = serde_json::json!({ "route": false });

        let result = renderer
            .render("a\n{% if route %}\nb\n{% endif %}\nc\n", &context)
            .unwrap();
        assert_eq!(result, "a\nc\n");
    }
}
