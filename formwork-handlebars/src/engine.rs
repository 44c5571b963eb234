//! Handlebars-backed field renderer

use crate::{Result, config::HandlebarsConfig, error::HandlebarsError, helpers};
use formwork_fields::{Field, FieldResult, Renderer};
use formwork_log::{debug, trace};
use handlebars::Handlebars;
use parking_lot::RwLock;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Data a field template sees
#[derive(Serialize)]
struct Binding<'a> {
    field: &'a Field,
}

/// Renders fields from a directory of Handlebars templates
#[derive(Clone)]
pub struct HandlebarsRenderer {
    handlebars: Arc<RwLock<Handlebars<'static>>>,
    config: HandlebarsConfig,
}

impl HandlebarsRenderer {
    /// Create a renderer and load every template under the configured
    /// directory.
    pub fn new(config: HandlebarsConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_mode);

        if !config.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_field_helpers(&mut handlebars);

        let renderer = Self {
            handlebars: Arc::new(RwLock::new(handlebars)),
            config,
        };
        renderer.load_templates()?;

        Ok(renderer)
    }

    fn load_templates(&self) -> Result<()> {
        if !self.config.template_dir.is_dir() {
            return Err(HandlebarsError::ConfigError(format!(
                "Template directory not found: {:?}",
                self.config.template_dir
            )));
        }

        let loaded = self.load_templates_from_dir(&self.config.template_dir)?;
        debug!(
            "Loaded {} field template(s) from {:?}",
            loaded, self.config.template_dir
        );
        Ok(())
    }

    fn load_templates_from_dir(&self, dir: &Path) -> Result<usize> {
        let extension = self.config.template_extension.trim_start_matches('.');
        let mut loaded = 0;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                loaded += self.load_templates_from_dir(&path)?;
                continue;
            }
            if path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }

            let view = self.view_for_path(&path);
            let template = fs::read_to_string(&path)?;
            trace!("Registering view `{}` from {:?}", view, path);
            self.handlebars.write().register_template_string(&view, template)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    /// View identifier for a template file: `fields/inputs/text-input.hbs`
    /// under `fields/` becomes `<namespace>.inputs.text-input`.
    pub fn view_for_path(&self, path: &Path) -> String {
        let relative = path
            .strip_prefix(&self.config.template_dir)
            .unwrap_or(path)
            .with_extension("");
        let name = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".");
        format!("{}.{}", self.config.view_namespace, name)
    }

    /// Register a template for `view` from a string
    pub fn register_view(&self, view: &str, template: &str) -> Result<()> {
        self.handlebars
            .write()
            .register_template_string(view, template)
            .map_err(HandlebarsError::from)
    }

    /// Whether a template is registered for `view`
    pub fn has_view(&self, view: &str) -> bool {
        self.handlebars.read().has_template(view)
    }

    /// Registered view identifiers, sorted
    pub fn views(&self) -> Vec<String> {
        let mut views: Vec<String> = self
            .handlebars
            .read()
            .get_templates()
            .keys()
            .cloned()
            .collect();
        views.sort();
        views
    }

    /// Render `view` with arbitrary data
    pub fn render_view<T: Serialize>(&self, view: &str, data: &T) -> Result<String> {
        if self.config.dev_mode {
            self.reload_templates()?;
        }

        let handlebars = self.handlebars.read();
        if !handlebars.has_template(view) {
            return Err(HandlebarsError::TemplateNotFound(view.to_string()));
        }
        handlebars.render(view, data).map_err(HandlebarsError::from)
    }

    /// Drop every template and load the directory again
    pub fn reload_templates(&self) -> Result<()> {
        self.handlebars.write().clear_templates();
        self.load_templates()
    }

    /// Renderer configuration
    pub fn config(&self) -> &HandlebarsConfig {
        &self.config
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(&self, view: &str, field: &Field) -> FieldResult<String> {
        Ok(self.render_view(view, &Binding { field })?)
    }
}
