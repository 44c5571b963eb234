//! Declarative form fields for Formwork admin panels
//!
//! A [`Field`] is one editable attribute of a record: it carries a name,
//! label, validation rules, hooks and an enabled flag, and may own nested
//! fields that make up a sub-[`Form`]. Fields are configured before the
//! context they are used in ("create", "edit", ...) is known, so
//! context-restricted behavior is queued and replayed once the context is
//! set.
//!
//! ## Quick Start
//!
//! ```
//! use formwork_fields::Field;
//!
//! let field = Field::text_input("email")
//!     .required()
//!     .email()
//!     .except("view")
//!     .context("edit");
//!
//! let rules = field.get_rules();
//! let email: Vec<String> = rules.get("email").unwrap().iter().map(|c| c.to_string()).collect();
//! assert_eq!(email, vec!["required", "email"]);
//! assert!(field.enabled);
//! ```
//!
//! ## Rule merging
//!
//! Adding a condition replaces existing conditions of the same type:
//!
//! ```
//! use formwork_fields::Field;
//!
//! let field = Field::new("name")
//!     .rules("required|min:3")
//!     .add_rules([("name", "min:5")]);
//!
//! assert_eq!(field.get_rules().to_json(), serde_json::json!({"name": ["required", "min:5"]}));
//! ```
//!
//! ## Nested fields
//!
//! ```
//! use formwork_fields::Field;
//!
//! let address = Field::group(vec![
//!     Field::text_input("address.street").required(),
//!     Field::text_input("address.city"),
//! ]);
//!
//! let attributes = address.get_validation_attributes();
//! assert_eq!(attributes["address.city"], "city");
//! ```

pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod form;
pub mod hooks;
pub mod record;
pub mod render;
pub mod rules;
pub mod text;

pub use config::{FieldsConfig, config};
pub use context::{ContextState, Contexts, Modifier};
pub use error::*;
pub use field::*;
pub use form::*;
pub use hooks::{Hook, HookMap};
pub use record::Record;
pub use render::{Renderer, default_view};
pub use rules::{Condition, CustomRule, RuleMap, RuleSpec};
