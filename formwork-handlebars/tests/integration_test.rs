//! Integration tests for formwork-handlebars

use formwork_fields::{Field, FieldError, Form};
use formwork_handlebars::{HandlebarsConfig, HandlebarsRenderer};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn views() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("text-input.hbs"),
        concat!(
            r#"<label for="{{field.id}}">{{field.label}}</label>"#,
            r#"<input id="{{field.id}}" name="{{field.name}}""#,
            r#"{{#if (has_rule (lookup field.rules field.name) "required")}} required{{/if}}>"#,
        ),
    )
    .unwrap();
    fs::write(
        dir.path().join("group.hbs"),
        "<fieldset>{{#each field.fields}}{{#if this.enabled}}<{{this.name}}>{{/if}}{{/each}}</fieldset>",
    )
    .unwrap();
    fs::write(
        dir.path().join("textarea.hbs"),
        r#"<textarea data-rules="{{join (lookup field.rules field.name) "|"}}"></textarea>"#,
    )
    .unwrap();
    dir
}

fn bundled_renderer() -> HandlebarsRenderer {
    let templates = concat!(env!("CARGO_MANIFEST_DIR"), "/../templates/fields");
    HandlebarsRenderer::new(HandlebarsConfig::new(templates)).unwrap()
}

fn renderer(dir: &TempDir) -> HandlebarsRenderer {
    HandlebarsRenderer::new(HandlebarsConfig::new(dir.path()).with_escape_html(false)).unwrap()
}

#[test]
fn test_render_required_input() {
    let dir = views();
    let renderer = renderer(&dir);

    let html = Field::text_input("email").required().render(&renderer).unwrap();
    assert_eq!(
        html.as_deref(),
        Some(r#"<label for="email">Email</label><input id="email" name="email" required>"#)
    );

    let html = Field::text_input("nickname").render(&renderer).unwrap();
    assert_eq!(
        html.as_deref(),
        Some(r#"<label for="nickname">Nickname</label><input id="nickname" name="nickname">"#)
    );
}

#[test]
fn test_render_nested_rules_with_record() {
    let dir = views();
    let renderer = renderer(&dir);
    renderer
        .register_view("formwork::fields.profile", r#"{{join field.rules.bio "|"}}"#)
        .unwrap();

    let group = Field::group(vec![Field::textarea("bio").unique("profiles", "bio")])
        .view("formwork::fields.profile")
        .record(json!({"id": 4}));

    assert_eq!(
        group.render(&renderer).unwrap().as_deref(),
        Some("nullable|unique:profiles,bio,4")
    );
}

#[test]
fn test_render_group_follows_context() {
    let dir = views();
    let renderer = renderer(&dir);

    let group = Field::group(vec![
        Field::text_input("title"),
        Field::text_input("password").only("create"),
    ]);

    let edit = group.clone().context("edit").render(&renderer).unwrap();
    assert_eq!(edit.as_deref(), Some("<fieldset><title></fieldset>"));

    let create = group.context("create").render(&renderer).unwrap();
    assert_eq!(create.as_deref(), Some("<fieldset><title><password></fieldset>"));
}

#[test]
fn test_render_form_skips_disabled_fields() {
    let dir = views();
    let renderer = renderer(&dir);

    let form = Form::new(
        vec![
            Field::text_input("name").required(),
            Field::text_input("secret").except("edit"),
            Field::textarea("notes"),
        ],
        Some("edit"),
        Some(Arc::new(json!({"id": 1}))),
    );

    let html = form.render(&renderer).unwrap();
    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(r#"name="name" required"#));
    assert_eq!(lines[1], r#"<textarea data-rules="nullable"></textarea>"#);
}

#[test]
fn test_missing_view_is_a_render_error() {
    let dir = views();
    let renderer = renderer(&dir);

    let form = Form::new(vec![Field::checkbox("active")], None, None);
    let err = form.render(&renderer).unwrap_err();
    assert!(matches!(err, FieldError::Render(_)));
}

#[test]
fn test_escaping_enabled_by_default() {
    let dir = views();
    let renderer = HandlebarsRenderer::new(HandlebarsConfig::new(dir.path())).unwrap();

    let html = Field::text_input("bio").label("<b>Bio</b>").render(&renderer).unwrap();
    assert!(html.unwrap().starts_with(r#"<label for="bio">&lt;b&gt;Bio&lt;/b&gt;</label>"#));
}

#[test]
fn test_custom_namespace() {
    let dir = views();
    let renderer = HandlebarsRenderer::new(
        HandlebarsConfig::new(dir.path())
            .with_view_namespace("admin")
            .with_escape_html(false),
    )
    .unwrap();

    assert!(renderer.has_view("admin.text-input"));
    let html = Field::new("title").view("admin.text-input").render(&renderer).unwrap();
    assert!(html.unwrap().contains(r#"name="title""#));
}

#[test]
fn test_bundled_templates_render_field_without_rules() {
    let renderer = bundled_renderer();

    let note = Field::text_input("note").remove_rules([("note", Vec::<&str>::new())]);
    assert!(!note.get_rules().contains_field("note"));
    let html = note.render(&renderer).unwrap().unwrap();
    assert!(html.contains(r#"<input type="text" id="note" name="note">"#));

    let bio = Field::textarea("bio").remove_rules([("bio", Vec::<&str>::new())]);
    let html = bio.render(&renderer).unwrap().unwrap();
    assert!(html.contains(r#"<textarea id="bio" name="bio"></textarea>"#));

    let status = Field::select("status", ["draft"]).remove_rules([("status", Vec::<&str>::new())]);
    let html = status.render(&renderer).unwrap().unwrap();
    assert!(!html.contains("<option"));
}
