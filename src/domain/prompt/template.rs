use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use thiserror::Error;

static PROMPTS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

static ENV: OnceLock<Result<Environment<'static>, PromptError>> = OnceLock::new();

/// Errors raised while turning a template into prompt text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Prompt template '{0}' is missing")]
    MissingTemplate(String),

    #[error("Failed to render prompt template '{template}': {reason}")]
    Render { template: String, reason: String },
}

/// Render an embedded prompt template.
///
/// Undefined variables are errors, so every template input must be supplied.
pub fn render_prompt<S: Serialize>(name: &str, context: S) -> Result<String, PromptError> {
    let env = ENV.get_or_init(build_environment).as_ref().map_err(Clone::clone)?;
    let template = env.get_template(name).map_err(|err| match err.kind() {
        minijinja::ErrorKind::TemplateNotFound => PromptError::MissingTemplate(name.to_string()),
        _ => render_error(name, err),
    })?;
    template.render(context).map(|text| text.trim().to_string()).map_err(|err| render_error(name, err))
}

fn build_environment() -> Result<Environment<'static>, PromptError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);

    for file in PROMPTS_DIR.files() {
        let name = file
            .path()
            .to_str()
            .ok_or_else(|| render_error(&file.path().to_string_lossy(), "name is not UTF-8"))?;
        let source =
            file.contents_utf8().ok_or_else(|| render_error(name, "template is not UTF-8"))?;
        env.add_template(name, source).map_err(|err| render_error(name, err))?;
    }
    Ok(env)
}

fn render_error(template: &str, err: impl std::fmt::Display) -> PromptError {
    PromptError::Render { template: template.to_string(), reason: err.to_string() }
}
