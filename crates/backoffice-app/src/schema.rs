// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{PageKind, SortDirection, Value};
use crate::validation::{format_amount, format_decimal_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Integer,
    /// Whole-unit money.
    Amount,
    Decimal,
    Date,
    Choice(&'static [&'static str]),
    /// Entered as comma-separated text, stored as a list.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    Email,
    PhoneDigits { min: usize, max: usize },
    TaxId,
    NonNegative,
    Positive,
    Unique { case_insensitive: bool },
    Pattern {
        regex: &'static str,
        message: &'static str,
    },
    /// Date must be on or after the named date field.
    NotBefore(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Exact,
    MultiSelect,
    DateRange,
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
    pub searchable: bool,
    pub sortable: bool,
    pub filter: Option<FilterKind>,
    pub column: bool,
    pub editable: bool,
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: &[],
            searchable: false,
            sortable: false,
            filter: None,
            column: true,
            editable: true,
            default: "",
        }
    }

    pub const fn rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    /// Shown in the detail view and forms but not as a table column.
    pub const fn detail_only(mut self) -> Self {
        self.column = false;
        self
    }

    /// Computed by the pipeline; never part of a draft.
    pub const fn derived(mut self) -> Self {
        self.editable = false;
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = value;
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    pub fn choices(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }

    /// Renders a value for a table cell or detail view.
    pub fn format(&self, value: &Value) -> String {
        match (self.kind, value) {
            (FieldKind::Amount, Value::Integer(amount)) => format_amount(*amount),
            (FieldKind::Amount, Value::Decimal(amount)) => format_decimal_amount(*amount),
            _ => value.display(),
        }
    }

    /// Renders a value as editable draft text. Decimals keep full precision
    /// so saving an untouched field stores the same number.
    pub fn edit_text(&self, value: &Value) -> String {
        match value {
            Value::Decimal(number) => number.to_string(),
            other => other.display(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSpec {
    pub file_name: &'static str,
    pub columns: &'static [&'static str],
    pub list_separator: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derived {
    /// `tax_amount`, `discount` and `final_total` from `total`, `tax_percent` and `coupon`.
    SaleTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub page: PageKind,
    pub title: &'static str,
    pub singular: &'static str,
    pub fields: &'static [FieldSpec],
    pub default_sort: Option<(&'static str, SortDirection)>,
    pub page_size: usize,
    pub export: Option<ExportSpec>,
    pub derived: Option<Derived>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|field| field.name == name)
    }

    pub fn editable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|field| field.editable)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|field| field.column)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|field| field.searchable)
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|field| field.sortable)
    }

    pub fn filter_fields(
        &self,
        kind: FilterKind,
    ) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields
            .iter()
            .filter(move |field| field.filter == Some(kind))
    }

    pub fn label_for(&self, name: &str) -> &'static str {
        self.field(name).map_or("", |field| field.label)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSpec, FilterKind, Rule, Schema};
    use crate::{PageKind, SortDirection, Value};

    const STATUSES: &[&str] = &["active", "inactive"];

    const SAMPLE: Schema = Schema {
        page: PageKind::Users,
        title: "Users",
        singular: "user",
        fields: &[
            FieldSpec::new("name", "Name", FieldKind::Text)
                .rules(&[Rule::Required])
                .searchable()
                .sortable(),
            FieldSpec::new("status", "Status", FieldKind::Choice(STATUSES))
                .filter(FilterKind::Exact)
                .default_value("active"),
            FieldSpec::new("notes", "Notes", FieldKind::LongText).detail_only(),
            FieldSpec::new("total", "Total", FieldKind::Amount).derived(),
            FieldSpec::new("tax", "Tax %", FieldKind::Decimal),
        ],
        default_sort: Some(("name", SortDirection::Asc)),
        page_size: 5,
        export: None,
        derived: None,
    };

    #[test]
    fn builder_flags_select_fields() {
        let editable: Vec<_> = SAMPLE.editable_fields().map(|field| field.name).collect();
        assert_eq!(editable, vec!["name", "status", "notes", "tax"]);
        let columns: Vec<_> = SAMPLE.columns().map(|field| field.name).collect();
        assert_eq!(columns, vec!["name", "status", "total", "tax"]);
        let exact: Vec<_> = SAMPLE
            .filter_fields(FilterKind::Exact)
            .map(|field| field.name)
            .collect();
        assert_eq!(exact, vec!["status"]);
        assert_eq!(SAMPLE.searchable_fields().count(), 1);
    }

    #[test]
    fn field_lookup_and_choices() {
        let status = SAMPLE.field("status").expect("status field");
        assert_eq!(status.choices(), STATUSES);
        assert_eq!(status.default, "active");
        assert!(SAMPLE.field("name").expect("name field").is_required());
        assert!(SAMPLE.field("missing").is_none());
        assert_eq!(SAMPLE.label_for("notes"), "Notes");
    }

    #[test]
    fn amount_cells_are_grouped() {
        let total = SAMPLE.field("total").expect("total field");
        assert_eq!(total.format(&Value::Integer(1_250_000)), "$1,250,000");
        assert_eq!(total.format(&Value::Decimal(23_800.0)), "$23,800");
        assert_eq!(total.format(&Value::Empty), "");
    }

    #[test]
    fn decimal_edit_text_keeps_precision() {
        let tax = SAMPLE.field("tax").expect("tax field");
        assert_eq!(tax.format(&Value::Decimal(19.125)), "19.12");
        assert_eq!(tax.edit_text(&Value::Decimal(19.125)), "19.125");
        assert_eq!(tax.edit_text(&Value::Decimal(19.0)), "19");
        assert_eq!(tax.edit_text(&Value::Empty), "");
    }
}
