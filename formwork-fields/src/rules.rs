//! Validation rule conditions and the add/remove merge
//!
//! A condition is either a string token (`"nullable"`, `"min:5"`) or an
//! opaque custom rule object. The substring before the first `:` of a token
//! is its *rule type*; merges deduplicate by type so that adding `"min:5"`
//! replaces an existing `"min:3"`.

use crate::{FieldError, FieldResult};
use formwork_log::trace;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Rule object passed through merges untouched
pub trait CustomRule: fmt::Debug + Send + Sync {
    /// Name reported to renderers and serializers
    fn name(&self) -> &str;
}

/// One validation constraint
#[derive(Debug, Clone)]
pub enum Condition {
    /// String token, `type` or `type:arg1,arg2`
    Token(String),
    /// Opaque rule object, compared by identity
    Custom(Arc<dyn CustomRule>),
}

impl Condition {
    /// Wrap a custom rule object
    pub fn custom(rule: impl CustomRule + 'static) -> Self {
        Condition::Custom(Arc::new(rule))
    }

    /// Token text, `None` for custom rules
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Condition::Token(token) => Some(token),
            Condition::Custom(_) => None,
        }
    }

    /// Rule type of a typed token (`"min"` for `"min:5"`).
    ///
    /// `None` for plain flags and custom rules.
    pub fn rule_type(&self) -> Option<&str> {
        self.as_token()
            .and_then(|token| token.split_once(':'))
            .map(|(rule_type, _)| rule_type)
    }

    /// Comma-separated arguments after the first `:`
    pub fn arguments(&self) -> Vec<&str> {
        match self.as_token().and_then(|token| token.split_once(':')) {
            Some((_, args)) => args.split(',').collect(),
            None => Vec::new(),
        }
    }

    /// Replace every `placeholder` in a token with `value`.
    pub fn interpolate(&self, placeholder: &str, value: &str) -> Self {
        match self {
            Condition::Token(token) => Condition::Token(token.replace(placeholder, value)),
            Condition::Custom(_) => self.clone(),
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Condition::Token(a), Condition::Token(b)) => a == b,
            (Condition::Custom(a), Condition::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<&str> for Condition {
    fn eq(&self, other: &&str) -> bool {
        self.as_token() == Some(*other)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Token(token) => f.write_str(token),
            Condition::Custom(rule) => f.write_str(rule.name()),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for Condition {
    fn from(token: &str) -> Self {
        Condition::Token(token.to_string())
    }
}

impl From<String> for Condition {
    fn from(token: String) -> Self {
        Condition::Token(token)
    }
}

/// Type prefix used when matching a condition being added or removed.
///
/// Everything before the first `:`, or the whole token.
fn type_prefix(token: &str) -> &str {
    token.split_once(':').map_or(token, |(rule_type, _)| rule_type)
}

/// Conditions for one field, as a piped string or a list
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// `"required|min:3"`
    Piped(String),
    /// Already split conditions
    List(Vec<Condition>),
}

impl RuleSpec {
    /// Split into conditions. A piped string always yields at least one
    /// token, so only an empty list is empty.
    pub fn into_conditions(self) -> Vec<Condition> {
        match self {
            RuleSpec::Piped(piped) => piped.split('|').map(Condition::from).collect(),
            RuleSpec::List(conditions) => conditions,
        }
    }

    /// Parse a `{field: spec}` JSON object.
    pub fn map_from_json(value: Value) -> FieldResult<Vec<(String, RuleSpec)>> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(field, spec)| Ok((field, RuleSpec::try_from(spec)?)))
                .collect(),
            other => Err(FieldError::InvalidRuleSpec(format!(
                "expected an object of field rules, got {}",
                other
            ))),
        }
    }
}

impl TryFrom<Value> for RuleSpec {
    type Error = FieldError;

    fn try_from(value: Value) -> FieldResult<Self> {
        match value {
            Value::String(piped) => Ok(RuleSpec::Piped(piped)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(token) => Ok(Condition::Token(token)),
                    other => Err(FieldError::InvalidRuleSpec(format!(
                        "rule conditions must be strings, got {}",
                        other
                    ))),
                })
                .collect::<FieldResult<Vec<_>>>()
                .map(RuleSpec::List),
            other => Err(FieldError::InvalidRuleSpec(format!(
                "expected a string or a list, got {}",
                other
            ))),
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(piped: &str) -> Self {
        RuleSpec::Piped(piped.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(piped: String) -> Self {
        RuleSpec::Piped(piped)
    }
}

impl From<Condition> for RuleSpec {
    fn from(condition: Condition) -> Self {
        RuleSpec::List(vec![condition])
    }
}

impl From<Vec<Condition>> for RuleSpec {
    fn from(conditions: Vec<Condition>) -> Self {
        RuleSpec::List(conditions)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(tokens: Vec<&str>) -> Self {
        RuleSpec::List(tokens.into_iter().map(Condition::from).collect())
    }
}

impl From<Vec<String>> for RuleSpec {
    fn from(tokens: Vec<String>) -> Self {
        RuleSpec::List(tokens.into_iter().map(Condition::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleSpec {
    fn from(tokens: [&str; N]) -> Self {
        RuleSpec::List(tokens.into_iter().map(Condition::from).collect())
    }
}

/// Field name to ordered conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMap {
    rules: IndexMap<String, Vec<Condition>>,
}

impl RuleMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single field
    pub fn single(field: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        let mut rules = IndexMap::new();
        rules.insert(field.into(), spec.into().into_conditions());
        Self { rules }
    }

    /// Conditions of `field`, if it has an entry
    pub fn get(&self, field: &str) -> Option<&[Condition]> {
        self.rules.get(field).map(Vec::as_slice)
    }

    /// Whether `field` has an entry, possibly empty
    pub fn contains_field(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Condition])> {
        self.rules
            .iter()
            .map(|(field, conditions)| (field.as_str(), conditions.as_slice()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no field has an entry
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge `spec` into the conditions of `field`.
    ///
    /// Existing tokens are dropped when they equal an added token, or when
    /// they are typed and their type equals the prefix of an added token.
    /// Plain flags and custom rules survive otherwise. Added conditions are
    /// appended after the survivors in their given order.
    pub fn add(&mut self, field: impl Into<String>, spec: impl Into<RuleSpec>) {
        let field = field.into();
        let additions = spec.into().into_conditions();
        let existing = self
            .rules
            .get_mut(&field)
            .map(std::mem::take)
            .unwrap_or_default();
        let before = existing.len();

        let mut merged: Vec<Condition> = existing
            .into_iter()
            .filter(|original| !collides_on_add(original, &additions))
            .collect();
        let replaced = before - merged.len();
        merged.extend(additions);

        trace!(
            "add rules `{}`: {} replaced, {} total",
            field,
            replaced,
            merged.len()
        );
        self.rules.insert(field, merged);
    }

    /// Remove `spec` from the conditions of `field`.
    ///
    /// An empty list deletes the field entirely. Otherwise a token is dropped
    /// when it equals a removal token, or when it is typed and shares its type
    /// with a removal token that is itself typed.
    pub fn remove(&mut self, field: &str, spec: impl Into<RuleSpec>) {
        let removals = spec.into().into_conditions();

        if removals.is_empty() {
            trace!("remove rules `{}`: dropping field", field);
            self.rules.shift_remove(field);
            return;
        }

        let existing = self
            .rules
            .get_mut(field)
            .map(std::mem::take)
            .unwrap_or_default();
        let kept: Vec<Condition> = existing
            .into_iter()
            .filter(|original| !collides_on_remove(original, &removals))
            .collect();

        trace!("remove rules `{}`: {} remaining", field, kept.len());
        self.rules.insert(field.to_string(), kept);
    }

    /// Replace the conditions of `field` wholesale.
    pub fn set(&mut self, field: impl Into<String>, conditions: Vec<Condition>) {
        self.rules.insert(field.into(), conditions);
    }

    /// Concatenate `conditions` onto `field` without deduplication.
    pub fn append<I>(&mut self, field: impl Into<String>, conditions: I)
    where
        I: IntoIterator<Item = Condition>,
    {
        self.rules.entry(field.into()).or_default().extend(conditions);
    }

    /// Append every field of `other` onto this map.
    pub fn extend(&mut self, other: RuleMap) {
        for (field, conditions) in other.rules {
            self.append(field, conditions);
        }
    }

    /// Copy with `placeholder` replaced by `value` in every token.
    pub fn interpolate(&self, placeholder: &str, value: &str) -> RuleMap {
        let rules = self
            .rules
            .iter()
            .map(|(field, conditions)| {
                let conditions = conditions
                    .iter()
                    .map(|condition| condition.interpolate(placeholder, value))
                    .collect();
                (field.clone(), conditions)
            })
            .collect();
        RuleMap { rules }
    }

    /// Plain JSON view, custom rules rendered by name.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn collides_on_add(original: &Condition, additions: &[Condition]) -> bool {
    if original.as_token().is_none() {
        return false;
    }

    if additions.iter().any(|added| added == original) {
        return true;
    }

    match original.rule_type() {
        Some(rule_type) => additions
            .iter()
            .filter_map(Condition::as_token)
            .any(|added| type_prefix(added) == rule_type),
        None => false,
    }
}

fn collides_on_remove(original: &Condition, removals: &[Condition]) -> bool {
    if original.as_token().is_none() {
        return false;
    }

    if removals.iter().any(|removed| removed == original) {
        return true;
    }

    match original.rule_type() {
        Some(rule_type) => removals
            .iter()
            .filter_map(Condition::rule_type)
            .any(|removed| removed == rule_type),
        None => false,
    }
}

impl Serialize for RuleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (field, conditions) in &self.rules {
            map.serialize_entry(field, conditions)?;
        }
        map.end()
    }
}

impl IntoIterator for RuleMap {
    type Item = (String, Vec<Condition>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Condition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<K: Into<String>, S: Into<RuleSpec>> FromIterator<(K, S)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let rules = iter
            .into_iter()
            .map(|(field, spec)| (field.into(), spec.into().into_conditions()))
            .collect();
        RuleMap { rules }
    }
}
