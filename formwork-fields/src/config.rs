//! Field configuration

use crate::{FieldError, FieldResult};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;

static CONFIG: OnceCell<FieldsConfig> = OnceCell::new();

/// Process-wide configuration.
///
/// The one set by [`FieldsConfig::install`], or the environment's on first
/// use when nothing was installed.
pub fn config() -> &'static FieldsConfig {
    CONFIG.get_or_init(FieldsConfig::from_env)
}

/// Conventions shared by every field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Namespace views are resolved under (e.g. "formwork::fields")
    pub view_namespace: String,
    /// Token replaced by the record's primary key in nested rules
    pub record_placeholder: String,
    /// Rules a named field starts with
    pub default_rules: Vec<String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            view_namespace: "formwork::fields".to_string(),
            record_placeholder: "{{record}}".to_string(),
            default_rules: vec!["nullable".to_string()],
        }
    }
}

impl FieldsConfig {
    /// Defaults overridden by `FORMWORK_VIEW_NAMESPACE`,
    /// `FORMWORK_RECORD_PLACEHOLDER` and `FORMWORK_DEFAULT_RULES`
    /// (pipe-delimited, empty for none).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(namespace) = env::var("FORMWORK_VIEW_NAMESPACE") {
            config.view_namespace = namespace;
        }
        if let Ok(placeholder) = env::var("FORMWORK_RECORD_PLACEHOLDER") {
            config.record_placeholder = placeholder;
        }
        if let Ok(rules) = env::var("FORMWORK_DEFAULT_RULES") {
            config.default_rules = parse_rule_list(&rules);
        }

        config
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> FieldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Make this the process-wide configuration.
    ///
    /// Must run before the first field is built; fails once [`config()`]
    /// has been read or another configuration was installed.
    pub fn install(self) -> FieldResult<()> {
        CONFIG
            .set(self)
            .map_err(|_| FieldError::Config("field configuration is already in use".to_string()))
    }

    /// Set the view namespace
    pub fn with_view_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.view_namespace = namespace.into();
        self
    }

    /// Set the default rules
    pub fn with_default_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_rules = rules.into_iter().map(Into::into).collect();
        self
    }
}

fn parse_rule_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(str::to_string)
        .collect()
}
