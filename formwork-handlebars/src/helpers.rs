//! Helpers for inspecting field rules inside templates

use handlebars::{Handlebars, handlebars_helper};

handlebars_helper!(rule_type: |condition: str| {
    condition.split_once(':').map_or(condition, |(kind, _)| kind).to_string()
});

// {{#each (rule_arguments "in:draft,published")}} yields "draft", "published"
handlebars_helper!(rule_arguments: |condition: str| {
    condition
        .split_once(':')
        .map(|(_, args)| args.split(',').map(str::to_string).collect::<Vec<_>>())
        .unwrap_or_default()
});

// {{#if (has_rule field.rules.email "required")}}; "min" also matches "min:3".
// A field without a rules entry looks up as null and has no rules.
handlebars_helper!(has_rule: |conditions: Json, rule: str| {
    conditions.as_array().is_some_and(|conditions| {
        conditions.iter().filter_map(|condition| condition.as_str()).any(|condition| {
            condition == rule || condition.split_once(':').is_some_and(|(kind, _)| kind == rule)
        })
    })
});

handlebars_helper!(join: |items: Json, separator: str| {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(separator)
        })
        .unwrap_or_default()
});

/// Register the field helpers
pub fn register_field_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("rule_type", Box::new(rule_type));
    handlebars.register_helper("rule_arguments", Box::new(rule_arguments));
    handlebars.register_helper("has_rule", Box::new(has_rule));
    handlebars.register_helper("join", Box::new(join));
}
