// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = [
    "backoffice",
    "backoffice_app",
    "backoffice_store",
    "backoffice_tui",
];

/// Routes `tracing` output to `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stderr.
pub fn init_logging(level: Level, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Our crates log at `level`; dependencies stay at warn.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = vec!["warn".to_owned()];
    directives.extend(CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

pub fn parse_level(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{default_directives, parse_level};
    use tracing::Level;

    #[test]
    fn directives_cover_every_crate() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("backoffice_store=debug"));
        assert!(directives.contains("backoffice_tui=debug"));
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("INFO"), Some(Level::INFO));
        assert_eq!(parse_level(" warning "), Some(Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }
}
