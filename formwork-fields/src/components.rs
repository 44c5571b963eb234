//! Concrete field kinds and common rule shortcuts

use crate::Field;
use crate::rules::RuleSpec;

impl Field {
    /// Single-line text input
    pub fn text_input(name: impl Into<String>) -> Self {
        Field::new(name).kind("TextInput")
    }

    /// Multi-line text input
    pub fn textarea(name: impl Into<String>) -> Self {
        Field::new(name).kind("Textarea")
    }

    /// Checkbox, validated as `boolean`
    pub fn checkbox(name: impl Into<String>) -> Self {
        Field::new(name).kind("Checkbox").with_rule("boolean")
    }

    /// Select restricted to `options` through an `in:` rule
    pub fn select<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        Field::new(name)
            .kind("Select")
            .with_rule(format!("in:{}", options.join(",")))
    }

    /// Anonymous field grouping `fields`
    pub fn group(fields: Vec<Field>) -> Self {
        Field::anonymous().kind("Group").fields(fields)
    }

    /// Add `required`, drop `nullable`
    pub fn required(self) -> Self {
        self.without_rule("nullable").with_rule("required")
    }

    /// Add `nullable`, drop `required`
    pub fn nullable(self) -> Self {
        self.without_rule("required").with_rule("nullable")
    }

    /// Add `email`
    pub fn email(self) -> Self {
        self.with_rule("email")
    }

    /// Add `confirmed`, matched against `<name>_confirmation`
    pub fn confirmed(self) -> Self {
        self.with_rule("confirmed")
    }

    /// Add or replace `min:<length>`
    pub fn min_length(self, length: usize) -> Self {
        self.with_rule(format!("min:{}", length))
    }

    /// Add or replace `max:<length>`
    pub fn max_length(self, length: usize) -> Self {
        self.with_rule(format!("max:{}", length))
    }

    /// Unique in `table.column`, ignoring the bound record
    pub fn unique(self, table: &str, column: &str) -> Self {
        let placeholder = &crate::config().record_placeholder;
        self.with_rule(format!("unique:{},{},{}", table, column, placeholder))
    }

    fn with_rule(self, spec: impl Into<RuleSpec>) -> Self {
        let key = self.rule_key();
        self.add_rules([(key, spec)])
    }

    fn without_rule(self, spec: impl Into<RuleSpec>) -> Self {
        let key = self.rule_key();
        self.remove_rules([(key, spec)])
    }
}
