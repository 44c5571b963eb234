//! Lifecycle hooks
//!
//! Named events (e.g. "before-save") each carrying an ordered list of
//! callbacks. The admin lifecycle dispatches them with the record data.

use crate::{FieldError, FieldResult};
use formwork_log::debug;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Hook callback, receives the record data for the event
pub type Hook = Arc<dyn Fn(&mut Value) -> FieldResult<()> + Send + Sync>;

/// Event name to ordered callbacks
#[derive(Clone, Default)]
pub struct HookMap {
    hooks: IndexMap<String, Vec<Hook>>,
}

impl HookMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `hook` to `event`.
    pub fn register<F>(&mut self, event: impl Into<String>, hook: F)
    where
        F: Fn(&mut Value) -> FieldResult<()> + Send + Sync + 'static,
    {
        self.hooks.entry(event.into()).or_default().push(Arc::new(hook));
    }

    /// Append every callback of `other` after this map's callbacks.
    pub fn extend(&mut self, other: HookMap) {
        for (event, hooks) in other.hooks {
            self.hooks.entry(event).or_default().extend(hooks);
        }
    }

    /// Callbacks of `event`, empty when none are registered
    pub fn get(&self, event: &str) -> &[Hook] {
        self.hooks.get(event).map(Vec::as_slice).unwrap_or_default()
    }

    /// Event names in registration order
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no event has callbacks
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the callbacks of `event` in order, stopping at the first failure.
    ///
    /// Returns how many callbacks ran.
    pub fn dispatch(&self, event: &str, data: &mut Value) -> FieldResult<usize> {
        let hooks = self.get(event);
        debug!("Dispatching `{}` to {} hook(s)", event, hooks.len());

        for hook in hooks {
            hook(data).map_err(|err| match err {
                FieldError::Hook { .. } => err,
                other => FieldError::hook(event, other.to_string()),
            })?;
        }

        Ok(hooks.len())
    }
}

impl fmt::Debug for HookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.hooks.iter().map(|(event, hooks)| (event, hooks.len())))
            .finish()
    }
}
