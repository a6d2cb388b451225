// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::ids::RecordId;
use crate::model::{Record, Value};
use crate::schema::{FieldKind, FieldSpec, Rule, Schema};
use crate::validation::{
    DATE_LAYOUT, ValidationError, parse_amount, parse_list, parse_number, parse_required_date,
    parse_whole,
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern compiles")
});

static TAX_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7,8}-[0-9kK]$").expect("tax id pattern compiles"));

/// `Rule::Pattern` sources compiled so far, keyed by source text.
static RULE_PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn rule_pattern(source: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = RULE_PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(pattern) = cache.get(source) {
        return Ok(pattern.clone());
    }
    let pattern = Regex::new(source)?;
    cache.insert(source, pattern.clone());
    Ok(pattern)
}

/// Parsed, typed values keyed by field name.
pub type Fields = BTreeMap<String, Value>;

/// Field name to the first failing rule's message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (_, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Raw text per editable field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    fields: Vec<DraftField>,
    pub errors: FieldErrors,
}

impl Draft {
    pub fn blank(schema: &Schema) -> Self {
        Self::build(schema, |field| field.default.to_owned())
    }

    pub fn from_record(schema: &Schema, record: &Record) -> Self {
        Self::build(schema, |field| field.edit_text(record.get(field.name)))
    }

    fn build(schema: &Schema, initial: impl Fn(&FieldSpec) -> String) -> Self {
        let fields = schema
            .editable_fields()
            .map(|field| DraftField {
                name: field.name,
                label: field.label,
                value: initial(field),
            })
            .collect();
        Self {
            fields,
            errors: FieldErrors::new(),
        }
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Returns false when the draft has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut DraftField> {
        self.fields.get_mut(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.to_owned(), field.value.clone()))
            .collect()
    }
}

/// Checks every editable field of `schema` against the submitted text.
///
/// `existing` is the store's current record set for uniqueness checks and
/// `exclude` is the record being edited, which never conflicts with itself.
pub fn validate_draft(
    schema: &Schema,
    values: &BTreeMap<String, String>,
    existing: &[Record],
    exclude: Option<RecordId>,
) -> Result<Fields, FieldErrors> {
    let mut parsed = Fields::new();
    let mut errors = FieldErrors::new();

    for field in schema.editable_fields() {
        let raw = values.get(field.name).map_or("", |value| value.trim());
        match check_field(field, raw, existing, exclude) {
            Ok(value) => {
                parsed.insert(field.name.to_owned(), value);
            }
            Err(message) => errors.insert(field.name, message),
        }
    }

    for field in schema.editable_fields() {
        if errors.contains(field.name) {
            continue;
        }
        for rule in field.rules {
            if let Rule::NotBefore(other) = rule
                && let Some(date) = parsed.get(field.name).and_then(Value::as_date)
                && let Some(start) = parsed.get(*other).and_then(Value::as_date)
                && date < start
            {
                errors.insert(
                    field.name,
                    format!(
                        "{} must be on/after {}",
                        field.label,
                        schema.label_for(other).to_lowercase()
                    ),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}

fn check_field(
    field: &FieldSpec,
    raw: &str,
    existing: &[Record],
    exclude: Option<RecordId>,
) -> Result<Value, String> {
    if raw.is_empty() {
        if field.is_required() {
            return Err(required_message(field));
        }
        return Ok(Value::Empty);
    }

    let value = parse_kind(field, raw)?;
    if value.is_empty() {
        if field.is_required() {
            return Err(required_message(field));
        }
        return Ok(value);
    }

    for rule in field.rules {
        check_rule(field, rule, raw, &value, existing, exclude)?;
    }
    Ok(value)
}

fn required_message(field: &FieldSpec) -> String {
    format!("{} is required", field.label)
}

fn parse_kind(field: &FieldSpec, raw: &str) -> Result<Value, String> {
    let label = field.label;
    match field.kind {
        FieldKind::Text | FieldKind::LongText => Ok(Value::text(raw)),
        FieldKind::Integer => parse_whole(raw)
            .map(Value::Integer)
            .map_err(|error| number_message(label, error)),
        FieldKind::Amount => parse_amount(raw)
            .map(Value::Integer)
            .map_err(|error| number_message(label, error)),
        FieldKind::Decimal => parse_number(raw)
            .map(Value::Decimal)
            .map_err(|error| number_message(label, error)),
        FieldKind::Date => parse_required_date(raw)
            .map(Value::Date)
            .map_err(|_| format!("{label} must be a date ({DATE_LAYOUT})")),
        FieldKind::Choice(options) => {
            if options.contains(&raw) {
                Ok(Value::text(raw))
            } else {
                Err(format!("{label} must be one of: {}", options.join(", ")))
            }
        }
        FieldKind::List => {
            let items = parse_list(raw);
            if items.is_empty() {
                Ok(Value::Empty)
            } else {
                Ok(Value::List(items))
            }
        }
    }
}

fn number_message(label: &str, error: ValidationError) -> String {
    match error {
        ValidationError::NotWhole => format!("{label} must be a whole number"),
        _ => format!("{label} must be a number"),
    }
}

fn check_rule(
    field: &FieldSpec,
    rule: &Rule,
    raw: &str,
    value: &Value,
    existing: &[Record],
    exclude: Option<RecordId>,
) -> Result<(), String> {
    let label = field.label;
    match *rule {
        Rule::Required | Rule::NotBefore(_) => Ok(()),
        Rule::MinLength(min) => {
            if raw.chars().count() < min {
                return Err(format!("{label} must be at least {min} characters"));
            }
            Ok(())
        }
        Rule::Email => {
            if !EMAIL_PATTERN.is_match(raw) {
                return Err(format!("{label} must be a valid email address"));
            }
            Ok(())
        }
        Rule::PhoneDigits { min, max } => {
            let allowed = raw
                .chars()
                .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-' | '(' | ')'));
            let digits = raw.chars().filter(char::is_ascii_digit).count();
            if !allowed || digits < min || digits > max {
                return Err(format!("{label} must have {min} to {max} digits"));
            }
            Ok(())
        }
        Rule::TaxId => {
            if !TAX_ID_PATTERN.is_match(raw) {
                return Err(format!("{label} must look like 12345678-9"));
            }
            Ok(())
        }
        Rule::NonNegative => match value.as_f64() {
            Some(number) if number < 0.0 => Err(format!("{label} cannot be negative")),
            _ => Ok(()),
        },
        Rule::Positive => match value.as_f64() {
            Some(number) if number <= 0.0 => Err(format!("{label} must be greater than zero")),
            _ => Ok(()),
        },
        Rule::Unique { case_insensitive } => {
            let candidate = value.display();
            let clashes = existing
                .iter()
                .filter(|record| Some(record.id) != exclude)
                .any(|record| {
                    let other = record.display(field.name);
                    if case_insensitive {
                        other.to_lowercase() == candidate.to_lowercase()
                    } else {
                        other == candidate
                    }
                });
            if clashes {
                return Err(format!(
                    "duplicate {}: {candidate} is already in use",
                    label.to_lowercase()
                ));
            }
            Ok(())
        }
        Rule::Pattern { regex, message } => {
            let pattern = rule_pattern(regex)
                .map_err(|error| format!("{label} pattern {regex:?} is invalid: {error}"))?;
            if !pattern.is_match(raw) {
                return Err(format!("{label} {message}"));
            }
            Ok(())
        }
    }
}
