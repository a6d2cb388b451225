// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use backoffice_app::{ExportSpec, Record, Schema, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn export_spec(schema: &Schema) -> Result<ExportSpec> {
    schema.export.with_context(|| {
        format!(
            "{} has no CSV layout -- export is available for pages with an export action",
            schema.title
        )
    })
}

/// Writes the header row plus one row per record and returns the row count.
/// Fields are quoted as needed, so commas and quotes in values survive.
pub fn export_csv<W: Write>(schema: &Schema, rows: &[Record], writer: W) -> Result<usize> {
    let spec = export_spec(schema)?;
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(spec.columns.iter().map(|column| schema.label_for(column)))
        .context("write CSV header")?;
    for record in rows {
        out.write_record(spec.columns.iter().map(|column| cell(&spec, record, column)))
            .with_context(|| format!("write CSV row for record {}", record.id))?;
    }
    out.flush().context("flush CSV output")?;
    Ok(rows.len())
}

pub fn export_path(schema: &Schema, dir: &Path) -> Result<PathBuf> {
    Ok(dir.join(export_spec(schema)?.file_name))
}

pub fn export_to_file(schema: &Schema, rows: &[Record], path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("create export file {}", path.display()))?;
    let written = export_csv(schema, rows, file)
        .with_context(|| format!("export {} to {}", schema.page.slug(), path.display()))?;
    tracing::info!(
        page = schema.page.slug(),
        path = %path.display(),
        rows = written,
        "export written"
    );
    Ok(written)
}

fn cell(spec: &ExportSpec, record: &Record, column: &str) -> String {
    match record.get(column) {
        Value::List(items) => items.join(spec.list_separator),
        value => value.display(),
    }
}
