//! Context gating
//!
//! Fields are configured before the context they will be rendered or
//! validated in is known. Modifications restricted to a context are queued
//! while the field is [`ContextState::Unresolved`] and drained exactly once
//! when the context is set.

use crate::Field;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Deferred modification applied to a field once its context is known
pub type Modifier = Arc<dyn Fn(Field) -> Field + Send + Sync>;

/// One or more context names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contexts(Vec<String>);

impl Contexts {
    /// Whether `context` is listed
    pub fn contains(&self, context: &str) -> bool {
        self.0.iter().any(|candidate| candidate == context)
    }

    /// Listed contexts in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Contexts {
    fn from(context: &str) -> Self {
        Contexts(vec![context.to_string()])
    }
}

impl From<String> for Contexts {
    fn from(context: String) -> Self {
        Contexts(vec![context])
    }
}

impl From<Vec<&str>> for Contexts {
    fn from(contexts: Vec<&str>) -> Self {
        Contexts(contexts.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Contexts {
    fn from(contexts: Vec<String>) -> Self {
        Contexts(contexts)
    }
}

impl<const N: usize> From<[&str; N]> for Contexts {
    fn from(contexts: [&str; N]) -> Self {
        Contexts(contexts.into_iter().map(str::to_string).collect())
    }
}

/// Whether a field's context is known yet
#[derive(Clone)]
pub enum ContextState {
    /// Modifications keyed by the context they are tied to
    Unresolved {
        /// Run when the context equals the key
        included: IndexMap<String, Vec<Modifier>>,
        /// Run when the context is anything but the key
        excluded: IndexMap<String, Vec<Modifier>>,
    },
    Resolved(String),
}

impl Default for ContextState {
    fn default() -> Self {
        ContextState::Unresolved {
            included: IndexMap::new(),
            excluded: IndexMap::new(),
        }
    }
}

impl ContextState {
    /// Current context, if resolved
    pub fn current(&self) -> Option<&str> {
        match self {
            ContextState::Resolved(context) => Some(context),
            ContextState::Unresolved { .. } => None,
        }
    }

    /// Number of queued modifications (included and excluded)
    pub fn pending(&self) -> usize {
        match self {
            ContextState::Resolved(_) => 0,
            ContextState::Unresolved { included, excluded } => {
                included.values().chain(excluded.values()).map(Vec::len).sum()
            }
        }
    }

    /// Queue `modifier` for each of `contexts`.
    ///
    /// Hands `modifier` back when the context is already resolved.
    pub(crate) fn defer(
        &mut self,
        contexts: &Contexts,
        modifier: Modifier,
        included: bool,
    ) -> Option<Modifier> {
        let ContextState::Unresolved {
            included: include_queue,
            excluded: exclude_queue,
        } = self
        else {
            return Some(modifier);
        };

        let queue = if included { include_queue } else { exclude_queue };
        for context in contexts.iter() {
            queue
                .entry(context.to_string())
                .or_default()
                .push(Arc::clone(&modifier));
        }
        None
    }

    /// Move to `Resolved(context)` and return the modifications to replay:
    /// the included queue for `context`, then every excluded queue keyed by
    /// another context, each in insertion order. Both queues are discarded.
    pub(crate) fn resolve(&mut self, context: &str) -> Vec<Modifier> {
        let previous = std::mem::replace(self, ContextState::Resolved(context.to_string()));

        match previous {
            ContextState::Resolved(_) => Vec::new(),
            ContextState::Unresolved {
                mut included,
                excluded,
            } => {
                let mut replay = included.shift_remove(context).unwrap_or_default();
                replay.extend(
                    excluded
                        .into_iter()
                        .filter(|(key, _)| key != context)
                        .flat_map(|(_, modifiers)| modifiers),
                );
                replay
            }
        }
    }
}

impl fmt::Debug for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextState::Resolved(context) => f.debug_tuple("Resolved").field(context).finish(),
            ContextState::Unresolved { included, excluded } => f
                .debug_struct("Unresolved")
                .field("included", &included.keys().collect::<Vec<_>>())
                .field("excluded", &excluded.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}
