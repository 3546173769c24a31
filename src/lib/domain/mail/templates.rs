//! Template rendering seam

use serde_json::{Map, Value};

#[cfg(test)]
use mockall::mock;

use super::errors::TemplateError;

/// Parameters handed to a template render.
pub type TemplateParams = Map<String, Value>;

/// A handle to a template that resolved successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef(String);

impl TemplateRef {
    /// Wraps a resolved template path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The resolved template path.
    pub fn path(&self) -> &str {
        &self.0
    }
}

/// Renders named sections out of mail templates.
///
/// One template document carries the `subject`, `body_html`, and `body_text`
/// sections of an email; the engine renders each independently.
pub trait TemplateEngine: Send + Sync + 'static {
    /// Resolves a template path to a handle.
    ///
    /// # Returns
    /// - [`Ok`] with a [`TemplateRef`] when the template exists.
    /// - [`Err`] with [`TemplateError::TemplateNotFound`] otherwise.
    fn resolve(&self, path: &str) -> Result<TemplateRef, TemplateError>;

    /// Renders one named section of a resolved template.
    ///
    /// # Returns
    /// - [`Ok`] with the rendered section.
    /// - [`Err`] with [`TemplateError::SectionNotFound`] when the template
    ///   has no such section.
    fn render_section(
        &self,
        template: &TemplateRef,
        section: &str,
        parameters: &TemplateParams,
    ) -> Result<String, TemplateError>;

    /// Merges caller parameters over the engine's process-wide globals.
    fn merge_globals(&self, parameters: TemplateParams) -> TemplateParams;
}

#[cfg(test)]
mock! {
    pub TemplateEngine {}

    impl TemplateEngine for TemplateEngine {
        fn resolve(&self, path: &str) -> Result<TemplateRef, TemplateError>;
        fn render_section(
            &self,
            template: &TemplateRef,
            section: &str,
            parameters: &TemplateParams,
        ) -> Result<String, TemplateError>;
        fn merge_globals(&self, parameters: TemplateParams) -> TemplateParams;
    }
}
