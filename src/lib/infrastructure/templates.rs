//! MiniJinja template engine integration
//!
//! Mail templates are Jinja documents whose `subject`, `body_html`, and
//! `body_text` blocks are rendered independently.

use std::path::Path;

use minijinja::{path_loader, Environment, ErrorKind, Value};

use crate::domain::mail::{TemplateEngine, TemplateError, TemplateParams, TemplateRef};

/// Template engine rendering mail sections with MiniJinja.
#[derive(Debug, Default)]
pub struct JinjaEngine {
    env: Environment<'static>,
    globals: TemplateParams,
}

impl JinjaEngine {
    /// Creates an engine loading templates from a directory.
    pub fn new(templates_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_dir.as_ref()));

        Self {
            env,
            globals: TemplateParams::new(),
        }
    }

    /// Creates an engine around a prebuilt environment.
    pub fn with_environment(env: Environment<'static>) -> Self {
        Self {
            env,
            globals: TemplateParams::new(),
        }
    }

    /// Registers a parameter made available to every render.
    pub fn add_global(&mut self, key: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.globals.insert(key.into(), value);

        self
    }
}

impl TemplateEngine for JinjaEngine {
    fn resolve(&self, path: &str) -> Result<TemplateRef, TemplateError> {
        match self.env.get_template(path) {
            Ok(_) => Ok(TemplateRef::new(path)),
            Err(err) if matches!(err.kind(), ErrorKind::TemplateNotFound) => {
                Err(TemplateError::TemplateNotFound(path.to_string()))
            }
            Err(err) => Err(TemplateError::Render(err.into())),
        }
    }

    fn render_section(
        &self,
        template: &TemplateRef,
        section: &str,
        parameters: &TemplateParams,
    ) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(template.path()).map_err(|err| {
            if matches!(err.kind(), ErrorKind::TemplateNotFound) {
                TemplateError::TemplateNotFound(template.path().to_string())
            } else {
                TemplateError::Render(err.into())
            }
        })?;

        let mut state = tmpl
            .eval_to_state(Value::from_serialize(parameters))
            .map_err(|err| TemplateError::Render(err.into()))?;

        state.render_block(section).map_err(|err| {
            if matches!(err.kind(), ErrorKind::UnknownBlock) {
                TemplateError::SectionNotFound {
                    template: template.path().to_string(),
                    section: section.to_string(),
                }
            } else {
                TemplateError::Render(err.into())
            }
        })
    }

    fn merge_globals(&self, parameters: TemplateParams) -> TemplateParams {
        let mut merged = self.globals.clone();
        merged.extend(parameters);

        merged
    }
}
