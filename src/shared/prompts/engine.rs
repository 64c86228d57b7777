//! Template engine for prompt management using Jinja2 syntax.
//!
//! Built-in templates are compiled into the binary. A template directory can
//! override any of them by providing a file with the same relative name.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use std::path::Path;
use thiserror::Error;

/// Template used for the equity research report prompt
pub const EQUITY_REPORT_TEMPLATE: &str = "equity_research/report.jinja";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[(
    EQUITY_REPORT_TEMPLATE,
    include_str!("../../../templates/prompts/equity_research/report.jinja"),
)];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to load template {path}: {message}")]
    Load { path: String, message: String },

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Holds the compiled prompt templates
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Engine with only the compiled-in templates
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        // Prompts are plain text; nothing may be escaped
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::Load {
                    path: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { env })
    }

    /// Built-in templates overridden by any `.jinja` files found under `dir`.
    ///
    /// A missing directory is not an error; a template that fails to parse is.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let mut engine = Self::builtin()?;
        let dir = dir.as_ref();

        if dir.is_dir() {
            load_templates_recursive(&mut engine.env, dir, dir)?;
        } else {
            tracing::debug!(
                "Template directory {} not found, using built-in prompts",
                dir.display()
            );
        }

        Ok(engine)
    }

    /// Render a template by name with the given context
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Check if a template exists
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }

    /// List all available templates
    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .templates()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(
    env: &mut Environment<'static>,
    base_path: &Path,
    current_path: &Path,
) -> Result<(), TemplateError> {
    let load_err = |path: &Path, message: String| TemplateError::Load {
        path: path.display().to_string(),
        message,
    };

    let entries = std::fs::read_dir(current_path).map_err(|e| load_err(current_path, e.to_string()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path)?;
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        let template_name = relative.to_string_lossy().replace('\\', "/");
        let content = std::fs::read_to_string(&path).map_err(|e| load_err(&path, e.to_string()))?;

        env.add_template_owned(template_name.clone(), content)
            .map_err(|e| load_err(&path, e.to_string()))?;
        tracing::info!("Loaded prompt template override: {}", template_name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_builtin_report_template_is_registered() {
        let engine = PromptEngine::builtin().unwrap();
        assert!(engine.template_exists(EQUITY_REPORT_TEMPLATE));
        assert!(!engine.template_exists("definitely_not_a_real_template.jinja"));
        assert_eq!(engine.list_templates(), vec![EQUITY_REPORT_TEMPLATE.to_string()]);
    }

    #[test]
    fn test_render_unknown_template() {
        let engine = PromptEngine::builtin().unwrap();
        let result = engine.render("nonexistent.jinja", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_rejects_missing_variables() {
        let engine = PromptEngine::builtin().unwrap();
        let result = engine.render(EQUITY_REPORT_TEMPLATE, context! { company_name => "Acme" });
        assert!(matches!(result, Err(TemplateError::RenderError(_))));
    }

    #[test]
    fn test_missing_directory_falls_back_to_builtin() {
        let engine = PromptEngine::from_dir("/definitely/not/a/template/dir").unwrap();
        assert!(engine.template_exists(EQUITY_REPORT_TEMPLATE));
    }

    #[test]
    fn test_directory_template_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("prompt-engine-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("equity_research")).unwrap();
        std::fs::write(
            dir.join("equity_research/report.jinja"),
            "{{ company_name }}|{{ analysis_quarter }}|{{ combined_text }}",
        )
        .unwrap();

        let engine = PromptEngine::from_dir(&dir).unwrap();
        let rendered = engine
            .render(
                EQUITY_REPORT_TEMPLATE,
                context! {
                    company_name => "Acme & Sons",
                    analysis_quarter => "Q1FY26",
                    combined_text => "<body>",
                },
            )
            .unwrap();

        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(rendered, "Acme & Sons|Q1FY26|<body>");
    }
}
