//! Forms: ordered collections of fields

use crate::field::Attributes;
use crate::hooks::HookMap;
use crate::record::Record;
use crate::render::Renderer;
use crate::rules::RuleMap;
use crate::{Field, FieldResult, config};
use std::sync::Arc;

/// Ordered fields sharing one context and record
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
    record: Option<Arc<dyn Record>>,
}

impl Form {
    /// Bind every field to `context` and `record`.
    ///
    /// A `None` context leaves the fields' queued modifications pending.
    pub fn new(fields: Vec<Field>, context: Option<&str>, record: Option<Arc<dyn Record>>) -> Self {
        let fields = fields
            .into_iter()
            .map(|field| {
                let field = match context {
                    Some(context) => field.context(context),
                    None => field,
                };
                match &record {
                    Some(record) => field.record_shared(Arc::clone(record)),
                    None => field,
                }
            })
            .collect();

        Self { fields, record }
    }

    /// Bound fields in order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether the form has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rules of every field, concatenated per key in field order, with
    /// `{{record}}` replaced by the record key.
    pub fn get_rules(&self) -> RuleMap {
        let mut rules = RuleMap::new();
        for field in &self.fields {
            rules.extend(field.get_rules());
        }

        let key = self
            .record
            .as_ref()
            .and_then(|record| record.key())
            .unwrap_or_default();
        rules.interpolate(&config().record_placeholder, &key)
    }

    /// Attributes of every field; later fields win on name clashes.
    pub fn get_validation_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        for field in &self.fields {
            attributes.extend(field.get_validation_attributes());
        }
        attributes
    }

    /// Hooks of every field, appended per event in field order.
    pub fn get_hooks(&self) -> HookMap {
        let mut hooks = HookMap::new();
        for field in &self.fields {
            hooks.extend(field.get_hooks());
        }
        hooks
    }

    /// Render every enabled field, one per line.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &R) -> FieldResult<String> {
        let mut rendered = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if let Some(markup) = field.render(renderer)? {
                rendered.push(markup);
            }
        }
        Ok(rendered.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NameRenderer;

    impl Renderer for NameRenderer {
        fn render(&self, _view: &str, field: &Field) -> FieldResult<String> {
            Ok(field.name.clone().unwrap_or_default())
        }
    }

    fn user_fields() -> Vec<Field> {
        vec![
            Field::new("name").rules("required|max:255"),
            Field::new("email").rules("required|email|unique:users,email,{{record}}"),
            Field::new("password").only("create").rules("required|min:8"),
        ]
    }

    #[test]
    fn test_new_applies_context() {
        let form = Form::new(user_fields(), Some("edit"), None);
        assert!(form.fields().iter().all(|f| f.current_context() == Some("edit")));
        assert!(!form.fields()[2].enabled);
    }

    #[test]
    fn test_new_without_context_keeps_queue() {
        let form = Form::new(user_fields(), None, None);
        assert_eq!(form.fields()[2].pending_modifications(), 1);
        assert_eq!(form.fields()[2].current_context(), None);
    }

    #[test]
    fn test_get_rules() {
        let form = Form::new(user_fields(), Some("create"), Some(Arc::new(json!({"id": 3}))));
        let rules = form.get_rules();

        assert_eq!(rules.fields().collect::<Vec<_>>(), vec!["name", "email", "password"]);
        let email: Vec<String> = rules.get("email").unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(email, vec!["required", "email", "unique:users,email,3"]);
    }

    #[test]
    fn test_get_rules_skips_disabled() {
        let form = Form::new(user_fields(), Some("edit"), None);
        assert!(!form.get_rules().contains_field("password"));
    }

    #[test]
    fn test_attributes_later_field_wins() {
        let form = Form::new(
            vec![Field::new("email"), Field::new("email").label("Login")],
            None,
            None,
        );
        let attributes = form.get_validation_attributes();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["email"], "login");
    }

    #[test]
    fn test_hooks_collected() {
        let form = Form::new(
            vec![
                Field::new("a").register_hook("saved", |_| Ok(())),
                Field::new("b").register_hook("saved", |_| Ok(())),
            ],
            None,
            None,
        );
        assert_eq!(form.get_hooks().get("saved").len(), 2);
    }

    #[test]
    fn test_render_skips_disabled() {
        let form = Form::new(user_fields(), Some("edit"), None);
        assert_eq!(form.render(&NameRenderer).unwrap(), "name\nemail");
    }

    #[test]
    fn test_empty_form() {
        let form = Form::default();
        assert!(form.is_empty());
        assert!(form.get_rules().is_empty());
        assert!(form.get_hooks().is_empty());
    }
}
