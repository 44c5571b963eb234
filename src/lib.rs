// Formwork - declarative form fields for admin panels
//
// Fields are configured once, bound to the context they are used in, and
// queried for the validation rules, attributes and hooks of the whole form.

// Re-export core functionality
pub use formwork_fields::*;

// Re-export logging macros
pub use formwork_log::{debug, error, info, trace, warn};

// Re-export optional crates
#[cfg(feature = "handlebars")]
pub use formwork_handlebars;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Attributes,
        Condition,
        Contexts,
        CustomRule,
        Field,
        FieldError,
        FieldResult,
        Form,
        HookMap,
        Record,
        Renderer,
        RuleMap,
        RuleSpec,
    };

    #[cfg(feature = "handlebars")]
    pub use formwork_handlebars::{HandlebarsConfig, HandlebarsRenderer};
}
