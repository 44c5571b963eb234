//! Rendering seam
//!
//! The template engine lives outside this crate. A field resolves its view
//! identifier and hands itself to a [`Renderer`] bound as `field`.

use crate::{Field, FieldResult, text};

/// Template engine able to render a field
pub trait Renderer {
    /// Render `view` with `field` bound as `field`.
    fn render(&self, view: &str, field: &Field) -> FieldResult<String>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, view: &str, field: &Field) -> FieldResult<String> {
        (**self).render(view, field)
    }
}

/// Conventional view for a field kind: `<namespace>.<kebab kind>`.
pub fn default_view(namespace: &str, kind: &str) -> String {
    format!("{}.{}", namespace, text::kebab(kind))
}
