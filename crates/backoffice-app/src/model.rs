// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use time::Date;

use crate::ids::RecordId;
use crate::validation::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Dashboard,
    Users,
    Customers,
    Suppliers,
    Purchases,
    Products,
    Categories,
    Inventory,
    StockMovements,
    Orders,
    Sales,
    Invoices,
    Payments,
    Reports,
    Attendance,
    Workers,
    Roles,
    Tickets,
    WorkOrders,
}

impl PageKind {
    pub const ALL: [Self; 19] = [
        Self::Dashboard,
        Self::Users,
        Self::Customers,
        Self::Suppliers,
        Self::Purchases,
        Self::Products,
        Self::Categories,
        Self::Inventory,
        Self::StockMovements,
        Self::Orders,
        Self::Sales,
        Self::Invoices,
        Self::Payments,
        Self::Reports,
        Self::Attendance,
        Self::Workers,
        Self::Roles,
        Self::Tickets,
        Self::WorkOrders,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Customers => "customers",
            Self::Suppliers => "suppliers",
            Self::Purchases => "purchases",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Inventory => "inventory",
            Self::StockMovements => "stock",
            Self::Orders => "orders",
            Self::Sales => "sales",
            Self::Invoices => "invoices",
            Self::Payments => "payments",
            Self::Reports => "reports",
            Self::Attendance => "attendance",
            Self::Workers => "workers",
            Self::Roles => "roles",
            Self::Tickets => "tickets",
            Self::WorkOrders => "work orders",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Customers => "customers",
            Self::Suppliers => "suppliers",
            Self::Purchases => "purchases",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Inventory => "inventory",
            Self::StockMovements => "stock-movements",
            Self::Orders => "orders",
            Self::Sales => "sales",
            Self::Invoices => "invoices",
            Self::Payments => "payments",
            Self::Reports => "reports",
            Self::Attendance => "attendance",
            Self::Workers => "workers",
            Self::Roles => "roles",
            Self::Tickets => "tickets",
            Self::WorkOrders => "work-orders",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|page| page.slug() == value)
    }

    pub const fn has_records(self) -> bool {
        !matches!(self, Self::Dashboard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single scalar cell of a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(Date),
    List(Vec<String>),
}

static EMPTY: Value = Value::Empty;

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => {
                if value.fract().abs() < f64::EPSILON {
                    format!("{value:.0}")
                } else {
                    format!("{value:.2}")
                }
            }
            Self::Date(value) => format_date(Some(*value)),
            Self::List(items) => items.join(", "),
        }
    }

    /// Case-insensitive substring test; lists match when any element does.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        match self {
            Self::List(items) => items
                .iter()
                .any(|item| item.to_lowercase().contains(&needle)),
            other => other.display().to_lowercase().contains(&needle),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Integer(_) | Self::Decimal(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) => left.join(", ").cmp(&right.join(", ")),
            (left, right) => match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => left.total_cmp(&right),
                _ => left.rank().cmp(&right.rank()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_owned(), value);
    }

    pub fn display(&self, name: &str) -> String {
        self.get(name).display()
    }
}
