//! Configuration for the Handlebars field renderer

use std::path::PathBuf;

/// Where field templates live and how they are compiled
#[derive(Debug, Clone)]
pub struct HandlebarsConfig {
    /// Directory containing template files
    pub template_dir: PathBuf,

    /// Template file extension (default: ".hbs")
    pub template_extension: String,

    /// Namespace the directory is mounted under; `text-input.hbs` becomes
    /// the view `<namespace>.text-input`
    pub view_namespace: String,

    /// Reload templates from disk before every render
    pub dev_mode: bool,

    /// Fail on missing variables
    pub strict_mode: bool,

    /// Enable HTML escaping (default: true)
    pub escape_html: bool,
}

impl HandlebarsConfig {
    /// Configuration for `template_dir`, mounted under the configured field
    /// view namespace.
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            template_extension: ".hbs".to_string(),
            view_namespace: formwork_fields::config().view_namespace.clone(),
            dev_mode: false,
            strict_mode: false,
            escape_html: true,
        }
    }

    /// Set template file extension
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.template_extension = ext.into();
        self
    }

    /// Mount the directory under another namespace
    pub fn with_view_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.view_namespace = namespace.into();
        self
    }

    /// Reload templates on every render
    pub fn with_dev_mode(mut self, enable: bool) -> Self {
        self.dev_mode = enable;
        self
    }

    /// Error on missing variables
    pub fn with_strict_mode(mut self, enable: bool) -> Self {
        self.strict_mode = enable;
        self
    }

    /// Enable/disable HTML escaping
    pub fn with_escape_html(mut self, enable: bool) -> Self {
        self.escape_html = enable;
        self
    }
}

impl Default for HandlebarsConfig {
    fn default() -> Self {
        Self::new("templates/fields")
    }
}
