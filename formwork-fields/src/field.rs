//! Field definitions
//!
//! A [`Field`] is one editable attribute of a record. It is configured with
//! chained builder calls, bound to a context and a record, then queried for
//! its aggregated rules, validation attributes and hooks.

use crate::context::{ContextState, Contexts, Modifier};
use crate::hooks::HookMap;
use crate::record::Record;
use crate::render::{Renderer, default_view};
use crate::rules::{RuleMap, RuleSpec};
use crate::{FieldResult, Form, config, text};
use formwork_log::{debug, trace};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Field name to lower-cased human label, as handed to validators
pub type Attributes = IndexMap<String, String>;

/// Form field definition
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name, `None` for anonymous groups
    pub name: Option<String>,
    /// HTML id
    pub id: Option<String>,
    /// Display label
    pub label: Option<String>,
    /// Disabled fields emit no rules, attributes, hooks or markup
    pub enabled: bool,
    kind: String,
    state: ContextState,
    rules: RuleMap,
    hooks: HookMap,
    record: Option<Arc<dyn Record>>,
    fields: Vec<Field>,
    view: Option<String>,
}

impl Field {
    /// Create a named field.
    ///
    /// The id is the slug of `name`, the label is the humanized last dotted
    /// segment, and the rules start from the configured defaults.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut field = Self::anonymous();
        field.id = Some(text::slug(&name));
        field.label = Some(text::label(&name));
        field.name = Some(name);
        field.rules(config().default_rules.clone())
    }

    /// Create a field without a name, id, label or rules.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            id: None,
            label: None,
            enabled: true,
            kind: "Field".to_string(),
            state: ContextState::default(),
            rules: RuleMap::new(),
            hooks: HookMap::new(),
            record: None,
            fields: Vec::new(),
            view: None,
        }
    }

    /// Set the id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the kind name views are derived from (e.g. "TextInput")
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Bind the record whose key fills `{{record}}` placeholders
    pub fn record(self, record: impl Record + 'static) -> Self {
        self.record_shared(Arc::new(record))
    }

    /// Bind a shared record
    pub fn record_shared(mut self, record: Arc<dyn Record>) -> Self {
        self.record = Some(record);
        self
    }

    /// Set the nested fields
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Override the view identifier
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Enable the field
    pub fn enable(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Disable the field
    pub fn disable(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Run `callback` on the field in place and keep chaining.
    pub fn tap<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Field),
    {
        callback(&mut self);
        self
    }

    /// Resolve the context this field is used in.
    ///
    /// The first call replays the queued modifications once; later calls
    /// only change the context.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        let replay = self.state.resolve(&context);

        debug!(
            "Field {:?} resolved to context `{}`, replaying {} modification(s)",
            self.name,
            context,
            replay.len()
        );

        replay.into_iter().fold(self, |field, modifier| modifier(field))
    }

    /// Keep the field enabled only in `contexts`.
    ///
    /// The field is disabled now and re-enabled if the context matches.
    pub fn only(self, contexts: impl Into<Contexts>) -> Self {
        self.gate(contexts.into(), None, true)
    }

    /// Apply `modifier` only in `contexts`.
    pub fn only_with<F>(self, contexts: impl Into<Contexts>, modifier: F) -> Self
    where
        F: Fn(Field) -> Field + Send + Sync + 'static,
    {
        self.gate(contexts.into(), Some(Arc::new(modifier)), true)
    }

    /// Keep the field enabled everywhere but `contexts`.
    pub fn except(self, contexts: impl Into<Contexts>) -> Self {
        self.gate(contexts.into(), None, false)
    }

    /// Apply `modifier` in every context but `contexts`.
    pub fn except_with<F>(self, contexts: impl Into<Contexts>, modifier: F) -> Self
    where
        F: Fn(Field) -> Field + Send + Sync + 'static,
    {
        self.gate(contexts.into(), Some(Arc::new(modifier)), false)
    }

    fn gate(mut self, contexts: Contexts, modifier: Option<Modifier>, included: bool) -> Self {
        let modifier = match modifier {
            Some(modifier) => modifier,
            None => {
                self.enabled = false;
                Arc::new(|field: Field| field.enable())
            }
        };

        let Some(modifier) = self.state.defer(&contexts, modifier, included) else {
            return self;
        };

        let in_contexts = self
            .state
            .current()
            .is_some_and(|context| contexts.contains(context));

        if in_contexts == included {
            modifier(self)
        } else {
            self
        }
    }

    /// Replace all rules with `spec` under this field's name.
    pub fn rules(mut self, spec: impl Into<RuleSpec>) -> Self {
        self.rules = RuleMap::single(self.rule_key(), spec);
        self
    }

    /// Merge rules per field, replacing conditions of the same type.
    pub fn add_rules<I, K, S>(mut self, spec: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        for (field, conditions) in spec {
            self.rules.add(field, conditions);
        }
        self
    }

    /// Remove rules per field. An empty list drops the field's rules.
    pub fn remove_rules<I, K, S>(mut self, spec: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        for (field, conditions) in spec {
            let field: String = field.into();
            self.rules.remove(&field, conditions);
        }
        self
    }

    /// Register a lifecycle hook
    pub fn register_hook<F>(mut self, event: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut Value) -> FieldResult<()> + Send + Sync + 'static,
    {
        self.hooks.register(event, hook);
        self
    }

    /// Key this field's own rules live under; `""` when anonymous.
    pub fn rule_key(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    /// Resolved context, `None` until [`Field::context`] is called
    pub fn current_context(&self) -> Option<&str> {
        self.state.current()
    }

    /// Modifications still waiting for a context
    pub fn pending_modifications(&self) -> usize {
        self.state.pending()
    }

    /// Kind name, e.g. "TextInput"
    pub fn kind_name(&self) -> &str {
        &self.kind
    }

    /// Rules configured on this field, without nested fields
    pub fn own_rules(&self) -> &RuleMap {
        &self.rules
    }

    /// Hooks registered on this field, without nested fields
    pub fn own_hooks(&self) -> &HookMap {
        &self.hooks
    }

    /// Nested field definitions, before context and record are applied
    pub fn nested_fields(&self) -> &[Field] {
        &self.fields
    }

    /// Primary key of the bound record, `""` when there is none
    pub fn record_key(&self) -> String {
        self.record
            .as_ref()
            .and_then(|record| record.key())
            .unwrap_or_default()
    }

    /// Nested fields bound to this field's context and record
    pub fn get_form(&self) -> Form {
        Form::new(
            self.fields.clone(),
            self.current_context(),
            self.record.clone(),
        )
    }

    /// Own rules followed by the nested form's rules. The nested form binds
    /// this field's record, so `{{record}}` is already replaced in those.
    pub fn get_rules(&self) -> RuleMap {
        if !self.enabled {
            return RuleMap::new();
        }

        let mut rules = self.rules.clone();
        rules.extend(self.get_form().get_rules());
        rules
    }

    /// Own `{name: lower-cased label}` overlaid by the nested form's.
    pub fn get_validation_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if !self.enabled {
            return attributes;
        }

        if let (Some(name), Some(label)) = (&self.name, &self.label) {
            attributes.insert(name.clone(), label.to_lowercase());
        }
        attributes.extend(self.get_form().get_validation_attributes());
        attributes
    }

    /// Own hooks with the nested form's callbacks appended per event.
    pub fn get_hooks(&self) -> HookMap {
        if !self.enabled {
            return HookMap::new();
        }

        let mut hooks = self.hooks.clone();
        hooks.extend(self.get_form().get_hooks());
        hooks
    }

    /// View identifier: the override, or the one derived from the kind
    pub fn view_name(&self) -> String {
        match &self.view {
            Some(view) => view.clone(),
            None => default_view(&config().view_namespace, &self.kind),
        }
    }

    /// Render through `renderer`; `None` when disabled.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &R) -> FieldResult<Option<String>> {
        if !self.enabled {
            trace!("Skipping disabled field {:?}", self.name);
            return Ok(None);
        }

        let view = self.view_name();
        debug!("Rendering field {:?} with view `{}`", self.name, view);
        renderer.render(&view, self).map(Some)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let form = self.get_form();
        let mut state = serializer.serialize_struct("Field", 9)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("enabled", &self.enabled)?;
        state.serialize_field("context", &self.current_context())?;
        state.serialize_field("rules", &self.get_rules())?;
        state.serialize_field("attributes", &self.get_validation_attributes())?;
        state.serialize_field("fields", form.fields())?;
        state.end()
    }
}
