// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeMap, BTreeSet};
use time::Date;

use crate::model::SortDirection;
use crate::schema::Schema;

pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub field: String,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Per-page query inputs. Any change to what is shown, other than the sort,
/// sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    exact: BTreeMap<String, String>,
    multi: BTreeMap<String, BTreeSet<String>>,
    contains: BTreeMap<String, String>,
    date_range: Option<DateRange>,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            exact: BTreeMap::new(),
            multi: BTreeMap::new(),
            contains: BTreeMap::new(),
            date_range: None,
            sort: None,
            page: 1,
            page_size: PAGE_SIZES[1],
        }
    }
}

impl FilterState {
    pub fn for_schema(schema: &Schema) -> Self {
        Self {
            sort: schema.default_sort.map(|(field, direction)| SortSpec {
                field: field.to_owned(),
                direction,
            }),
            page_size: schema.page_size.max(1),
            ..Self::default()
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    pub fn exact(&self, field: &str) -> Option<&str> {
        self.exact.get(field).map(String::as_str)
    }

    pub fn exact_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exact
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// `None` or an empty value clears the filter.
    pub fn set_exact(&mut self, field: &str, value: Option<&str>) {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => {
                self.exact.insert(field.to_owned(), value.to_owned());
            }
            None => {
                self.exact.remove(field);
            }
        }
        self.page = 1;
    }

    /// Steps through all, then each option in order, then back to all.
    pub fn cycle_exact(&mut self, field: &str, options: &[&str]) {
        let next = match self.exact(field) {
            None => options.first().copied(),
            Some(current) => options
                .iter()
                .position(|option| *option == current)
                .and_then(|index| options.get(index + 1))
                .copied(),
        };
        self.set_exact(field, next);
    }

    pub fn selected(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.multi.get(field)
    }

    pub fn multi_filters(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.multi.iter().map(|(field, set)| (field.as_str(), set))
    }

    pub fn toggle_multi(&mut self, field: &str, value: &str) {
        let set = self.multi.entry(field.to_owned()).or_default();
        if !set.remove(value) {
            set.insert(value.to_owned());
        }
        if set.is_empty() {
            self.multi.remove(field);
        }
        self.page = 1;
    }

    pub fn clear_multi(&mut self, field: &str) {
        self.multi.remove(field);
        self.page = 1;
    }

    pub fn contains(&self, field: &str) -> Option<&str> {
        self.contains.get(field).map(String::as_str)
    }

    pub fn contains_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contains
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn set_contains(&mut self, field: &str, text: &str) {
        if text.trim().is_empty() {
            self.contains.remove(field);
        } else {
            self.contains.insert(field.to_owned(), text.to_owned());
        }
        self.page = 1;
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Both bounds `None` clears the range.
    pub fn set_date_range(&mut self, field: &str, from: Option<Date>, to: Option<Date>) {
        self.date_range = if from.is_none() && to.is_none() {
            None
        } else {
            Some(DateRange {
                field: field.to_owned(),
                from,
                to,
            })
        };
        self.page = 1;
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Same field flips direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.field == field => SortSpec {
                direction: current.direction.toggled(),
                ..current
            },
            _ => SortSpec {
                field: field.to_owned(),
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Stores the requested page as-is; pagination clamps it.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZES
            .iter()
            .copied()
            .find(|size| *size > self.page_size)
            .unwrap_or(PAGE_SIZES[0]);
        self.set_page_size(next);
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.exact.is_empty()
            || !self.multi.is_empty()
            || !self.contains.is_empty()
            || self.date_range.is_some()
    }

    /// Drops every filter and the search text; keeps sort and page size.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.exact.clear();
        self.multi.clear();
        self.contains.clear();
        self.date_range = None;
        self.page = 1;
    }
}
