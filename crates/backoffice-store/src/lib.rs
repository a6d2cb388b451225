// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod crud;
pub mod derived;
pub mod export;
pub mod paging;
pub mod query;
pub mod seed;

use anyhow::{Context, Result, bail};
use backoffice_app::{Fields, PageKind, Record, RecordId};
use std::collections::BTreeSet;

pub use crud::{commit, submit};
pub use export::{export_csv, export_path, export_to_file};
pub use paging::{PageSlice, clamp_page, paginate, total_pages};
pub use query::run_query;
pub use seed::{dashboard_counts, schema_for, seed_store};

pub const APP_NAME: &str = "backoffice";

/// In-memory records for one page, in insertion order. Lives only as long as
/// the page is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    page: PageKind,
    records: Vec<Record>,
    next_id: i64,
}

impl RecordStore {
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Adopts records with preassigned ids; new ids continue after the
    /// highest one.
    pub fn from_records(page: PageKind, records: Vec<Record>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                bail!(
                    "duplicate record id {} for {} -- ids must be unique within a page",
                    record.id,
                    page.slug()
                );
            }
        }
        let next_id = records
            .iter()
            .map(|record| record.id.get())
            .max()
            .map_or(1, |max| max + 1);
        Ok(Self {
            page,
            records,
            next_id,
        })
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn next_id(&self) -> RecordId {
        RecordId::new(self.next_id)
    }

    pub fn insert(&mut self, fields: Fields) -> RecordId {
        let id = RecordId::new(self.next_id);
        self.next_id += 1;
        self.records.push(Record { id, fields });
        id
    }

    /// Overwrites the given fields and keeps every other field as it was.
    pub fn update(&mut self, id: RecordId, fields: Fields) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .with_context(|| format!("record {id} not found -- reload the page and retry"))?;
        record.fields.extend(fields);
        Ok(())
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Record> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .with_context(|| format!("record {id} not found or already deleted"))?;
        Ok(self.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use anyhow::Result;
    use backoffice_app::{Fields, PageKind, Record, RecordId, Value};

    fn fields(name: &str) -> Fields {
        Fields::from([("name".to_owned(), Value::text(name))])
    }

    #[test]
    fn ids_continue_after_highest_existing() -> Result<()> {
        let mut store = RecordStore::from_records(
            PageKind::Categories,
            vec![
                Record::new(RecordId::new(3)),
                Record::new(RecordId::new(7)),
            ],
        )?;
        assert_eq!(store.next_id(), RecordId::new(8));
        let id = store.insert(fields("Games"));
        assert_eq!(id, RecordId::new(8));
        assert_eq!(store.next_id(), RecordId::new(9));
        Ok(())
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = RecordStore::new(PageKind::Categories);
        let first = store.insert(fields("a"));
        store.delete(first).expect("delete first");
        let second = store.insert(fields("b"));
        assert_ne!(first, second);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = RecordStore::from_records(
            PageKind::Categories,
            vec![Record::new(RecordId::new(1)), Record::new(RecordId::new(1))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_keeps_unsubmitted_fields() -> Result<()> {
        let mut store = RecordStore::new(PageKind::Categories);
        let id = store.insert(Fields::from([
            ("name".to_owned(), Value::text("Books")),
            ("status".to_owned(), Value::text("active")),
        ]));
        store.update(id, fields("Comics"))?;
        let record = store.get(id).expect("record exists");
        assert_eq!(record.display("name"), "Comics");
        assert_eq!(record.display("status"), "active");
        assert!(store.update(RecordId::new(99), fields("x")).is_err());
        Ok(())
    }
}
