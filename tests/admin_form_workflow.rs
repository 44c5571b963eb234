//! Integration tests for common Formwork workflows.
//!
//! A user resource form defined once and used for creating, editing and
//! viewing records.

use formwork::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn user_form_fields() -> Vec<Field> {
    vec![
        Field::text_input("name").required().max_length(255),
        Field::text_input("email")
            .required()
            .email()
            .unique("users", "email"),
        Field::text_input("password")
            .only("create")
            .required()
            .min_length(8)
            .confirmed(),
        Field::text_input("password")
            .only("edit")
            .min_length(8)
            .label("New password"),
        Field::select("role", ["admin", "editor"]).except_with("create", |field| {
            field.add_rules([("role", "required")])
        }),
        Field::group(vec![
            Field::text_input("address.street"),
            Field::text_input("address.city").required(),
        ])
        .except("view"),
    ]
}

fn tokens(rules: &RuleMap, field: &str) -> Vec<String> {
    rules
        .get(field)
        .unwrap_or_default()
        .iter()
        .map(ToString::to_string)
        .collect()
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_form_rules() {
    let form = Form::new(user_form_fields(), Some("create"), None);
    let rules = form.get_rules();

    assert_eq!(
        rules.fields().collect::<Vec<_>>(),
        vec!["name", "email", "password", "role", "address.street", "address.city"]
    );
    assert_eq!(tokens(&rules, "email"), vec!["required", "email", "unique:users,email,"]);
    assert_eq!(
        tokens(&rules, "password"),
        vec!["required", "min:8", "confirmed"]
    );
    assert_eq!(tokens(&rules, "role"), vec!["nullable", "in:admin,editor"]);
}

#[test]
fn test_create_form_attributes() {
    let form = Form::new(user_form_fields(), Some("create"), None);
    let attributes = form.get_validation_attributes();

    assert_eq!(attributes["password"], "password");
    assert_eq!(attributes["address.city"], "city");
}

// =============================================================================
// Edit
// =============================================================================

#[test]
fn test_edit_form_rules() {
    let form = Form::new(
        user_form_fields(),
        Some("edit"),
        Some(Arc::new(json!({"id": 42, "email": "ada@example.com"}))),
    );
    let rules = form.get_rules();

    assert_eq!(
        tokens(&rules, "email"),
        vec!["required", "email", "unique:users,email,42"]
    );
    assert_eq!(tokens(&rules, "password"), vec!["nullable", "min:8"]);
    assert_eq!(tokens(&rules, "role"), vec!["nullable", "in:admin,editor", "required"]);
    assert_eq!(form.get_validation_attributes()["password"], "new password");
}

// =============================================================================
// View
// =============================================================================

#[test]
fn test_view_form_disables_editing_only_fields() {
    let form = Form::new(user_form_fields(), Some("view"), None);

    let enabled: Vec<Option<&str>> = form
        .fields()
        .iter()
        .filter(|field| field.enabled)
        .map(|field| field.name.as_deref())
        .collect();
    assert_eq!(enabled, vec![Some("name"), Some("email"), Some("role")]);

    let rules = form.get_rules();
    assert!(!rules.contains_field("password"));
    assert!(!rules.contains_field("address.city"));
}

// =============================================================================
// Hooks and serialization
// =============================================================================

#[test]
fn test_hooks_run_in_field_order() {
    let form = Form::new(
        vec![
            Field::text_input("email").register_hook("before-save", |data| {
                let email = data["email"].as_str().unwrap_or_default().to_lowercase();
                data["email"] = json!(email);
                Ok(())
            }),
            Field::text_input("password")
                .only("create")
                .register_hook("before-save", |data| {
                    if data["password"].is_null() {
                        return Err(FieldError::hook("before-save", "password is required"));
                    }
                    Ok(())
                }),
        ],
        Some("edit"),
        None,
    );

    let mut data = json!({"email": "Ada@Example.com"});
    let ran = form.get_hooks().dispatch("before-save", &mut data).unwrap();
    assert_eq!(ran, 1);
    assert_eq!(data["email"], json!("ada@example.com"));
}

#[test]
fn test_form_serializes_for_clients() {
    let form = Form::new(user_form_fields(), Some("edit"), Some(Arc::new(7_u64)));
    let value = serde_json::to_value(form.fields()).unwrap();

    assert_eq!(value[0]["id"], json!("name"));
    assert_eq!(value[0]["kind"], json!("TextInput"));
    assert_eq!(value[2]["enabled"], json!(false));
    assert_eq!(value[5]["fields"][1]["label"], json!("City"));
}

// =============================================================================
// Rendering
// =============================================================================

#[cfg(feature = "handlebars")]
#[test]
fn test_render_edit_form() {
    use std::fs;

    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join("text-input.hbs"),
        r#"<input name="{{field.name}}">"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("select.hbs"),
        r#"<select name="{{field.name}}"></select>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("group.hbs"),
        "{{#each field.fields}}<input name=\"{{this.name}}\">{{/each}}",
    )
    .unwrap();

    let renderer = HandlebarsRenderer::new(HandlebarsConfig::new(dir.path())).unwrap();
    let form = Form::new(user_form_fields(), Some("edit"), None);

    let html = form.render(&renderer).unwrap();
    assert_eq!(
        html.lines().collect::<Vec<_>>(),
        vec![
            r#"<input name="name">"#,
            r#"<input name="email">"#,
            r#"<input name="password">"#,
            r#"<select name="role"></select>"#,
            r#"<input name="address.street"><input name="address.city">"#,
        ]
    );
}

#[cfg(feature = "handlebars")]
#[test]
fn test_render_with_bundled_templates() {
    let templates = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/fields");
    let renderer = HandlebarsRenderer::new(HandlebarsConfig::new(templates)).unwrap();

    assert!(renderer.has_view("formwork::fields.select"));

    let html = Field::select("status", ["draft", "published"])
        .required()
        .render(&renderer)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<select id="status" name="status">"#));
    assert!(html.contains(r#"<option value="draft">draft</option>"#));
    assert!(html.contains(r#"<option value="published">published</option>"#));

    let html = Field::text_input("email")
        .required()
        .email()
        .render(&renderer)
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"<input type="email" id="email" name="email" required>"#));
}
