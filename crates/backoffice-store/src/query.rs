// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use backoffice_app::{FilterState, Record, Schema, SortDirection, SortSpec};
use std::cmp::Ordering;

use crate::derived::derive;

/// Derives, filters and sorts `records`. Pure: the same inputs always give
/// the same rows, and re-running over its own output changes nothing.
pub fn run_query(schema: &Schema, records: &[Record], filter: &FilterState) -> Vec<Record> {
    let mut rows: Vec<Record> = records
        .iter()
        .map(|record| derive(schema, record))
        .filter(|record| matches(schema, record, filter))
        .collect();
    if let Some(sort) = filter.sort() {
        sort_records(&mut rows, sort);
    }
    rows
}

pub fn matches(schema: &Schema, record: &Record, filter: &FilterState) -> bool {
    matches_search(schema, record, filter.search())
        && filter
            .exact_filters()
            .all(|(field, value)| record.display(field) == value)
        && filter
            .multi_filters()
            .all(|(field, selected)| selected.is_empty() || selected.contains(&record.display(field)))
        && filter
            .contains_filters()
            .all(|(field, text)| record.get(field).matches_text(text.trim()))
        && filter.date_range().is_none_or(|range| {
            record
                .get(&range.field)
                .as_date()
                .is_some_and(|date| range.contains(date))
        })
}

fn matches_search(schema: &Schema, record: &Record, search: &str) -> bool {
    let needle = search.trim();
    if needle.is_empty() {
        return true;
    }
    schema
        .searchable_fields()
        .any(|field| record.get(field.name).matches_text(needle))
}

/// Native ordering on the sort field with record id as the tiebreak, so a
/// descending sort is the exact reverse of the ascending one.
pub fn sort_records(rows: &mut [Record], sort: &SortSpec) {
    rows.sort_by(|left, right| {
        let ordering = compare_on(left, right, &sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_on(left: &Record, right: &Record, field: &str) -> Ordering {
    left.get(field)
        .compare(right.get(field))
        .then_with(|| left.id.cmp(&right.id))
}
