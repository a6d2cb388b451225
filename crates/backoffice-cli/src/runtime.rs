// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use backoffice_app::{CommitOutcome, FilterState, PageKind, Record, Schema, Submission};
use backoffice_store::{
    RecordStore, commit, dashboard_counts, export_path, export_to_file, run_query, schema_for,
    seed_store,
};
use std::fs;
use std::path::PathBuf;

/// Owns the one mounted page store. Mounting another page drops it.
pub struct StoreRuntime {
    store: Option<RecordStore>,
    export_dir: PathBuf,
    page_size: Option<usize>,
}

impl StoreRuntime {
    pub fn new(export_dir: PathBuf, page_size: Option<usize>) -> Self {
        Self {
            store: None,
            export_dir,
            page_size,
        }
    }

    fn mounted(&mut self) -> Result<(&mut RecordStore, &'static Schema)> {
        let store = self
            .store
            .as_mut()
            .context("no page is mounted -- open a record page first")?;
        let schema = schema_for(store.page())
            .with_context(|| format!("page {} has no record table", store.page().slug()))?;
        Ok((store, schema))
    }
}

impl backoffice_tui::AppRuntime for StoreRuntime {
    fn schema(&self, page: PageKind) -> Option<&'static Schema> {
        schema_for(page)
    }

    fn mount_page(&mut self, page: PageKind) -> Result<usize> {
        let store = seed_store(page)?;
        let count = store.len();
        tracing::info!(page = page.slug(), records = count, "page mounted");
        self.store = Some(store);
        Ok(count)
    }

    fn query(&mut self, filter: &FilterState) -> Result<Vec<Record>> {
        let (store, schema) = self.mounted()?;
        Ok(run_query(schema, store.records(), filter))
    }

    fn commit(&mut self, submission: &Submission) -> Result<CommitOutcome> {
        let (store, schema) = self.mounted()?;
        commit(store, schema, submission)
    }

    fn export(&mut self, rows: &[Record]) -> Result<PathBuf> {
        let dir = self.export_dir.clone();
        let (_, schema) = self.mounted()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("create export directory {}", dir.display()))?;
        let path = export_path(schema, &dir)?;
        export_to_file(schema, rows, &path)?;
        Ok(path)
    }

    fn dashboard_counts(&mut self) -> Result<Vec<(PageKind, usize)>> {
        dashboard_counts()
    }

    fn page_size_override(&self) -> Option<usize> {
        self.page_size
    }
}
