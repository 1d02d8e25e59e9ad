//! Template rendering for marked template files.
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name of the template file, reported on failure
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that keeps trailing newlines and rejects undefined variables.
    ///
    /// Output is never auto-escaped, whatever the template's file extension.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
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
    /// * `Error::TemplateRenderError` if the template fails to parse or render
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let to_error = |source| Error::TemplateRenderError { file: name.to_string(), source };

        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), template.to_string()).map_err(to_error)?;

        let tmpl = env.get_template(name).map_err(to_error)?;

        tmpl.render(context).map_err(to_error)
    }
}
