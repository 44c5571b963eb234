//! Handlebars rendering for Formwork fields
//!
//! Loads a directory of Handlebars templates as field views and renders
//! [`Field`](formwork_fields::Field)s and [`Form`](formwork_fields::Form)s
//! through them. Each template is registered under the configured view
//! namespace, so `templates/fields/text-input.hbs` answers the view
//! `formwork::fields.text-input`. The field is bound as `field` inside the
//! template.
//!
//! ## Features
//!
//! - Views resolved from field kinds or explicit overrides
//! - Helpers for inspecting rules (`rule_type`, `has_rule`, `join`)
//! - Development mode with reload before every render
//! - Strict mode for missing variables
//! - HTML escaping (configurable)
//!
//! ## Example
//!
//! ```no_run
//! use formwork_fields::Field;
//! use formwork_handlebars::{HandlebarsConfig, HandlebarsRenderer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = HandlebarsRenderer::new(HandlebarsConfig::new("templates/fields"))?;
//!
//! let html = Field::text_input("email").required().render(&renderer)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Template Example
//!
//! ```handlebars
//! <label for="{{field.id}}">{{field.label}}</label>
//! <input id="{{field.id}}" name="{{field.name}}"
//!   {{#if (has_rule (lookup field.rules field.name) "required")}}required{{/if}}>
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod helpers;

pub use config::HandlebarsConfig;
pub use engine::HandlebarsRenderer;
pub use error::{HandlebarsError, Result};
