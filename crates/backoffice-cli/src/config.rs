// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::logging::parse_level;
use anyhow::{Context, Result, anyhow, bail};
use backoffice_app::{PAGE_SIZES, PageKind, Theme};
use backoffice_store::APP_NAME;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "BACKOFFICE_CONFIG_PATH";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub export: Export,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            export: Export::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub theme: Option<String>,
    /// Overrides every page's own default page size.
    pub page_size: Option<usize>,
    pub start_page: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Export {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and keep values under [ui], [export], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(theme) = &self.ui.theme
            && Theme::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be \"light\" or \"dark\", got {theme:?}",
                path.display()
            );
        }

        if let Some(size) = self.ui.page_size
            && !PAGE_SIZES.contains(&size)
        {
            bail!(
                "ui.page_size in {} must be one of {PAGE_SIZES:?}, got {size}",
                path.display()
            );
        }

        if let Some(slug) = &self.ui.start_page
            && PageKind::parse(slug).is_none()
        {
            bail!(
                "ui.start_page in {} is not a known page: {slug:?}; use a slug such as \"users\" or \"work-orders\"",
                path.display()
            );
        }

        if let Some(level) = &self.log.level
            && parse_level(level).is_none()
        {
            bail!(
                "log.level in {} must be one of error, warn, info, debug, trace; got {level:?}",
                path.display()
            );
        }

        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.ui
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(Theme::Light)
    }

    pub fn page_size(&self) -> Option<usize> {
        self.ui.page_size
    }

    pub fn start_page(&self) -> PageKind {
        self.ui
            .start_page
            .as_deref()
            .and_then(PageKind::parse)
            .unwrap_or(PageKind::Dashboard)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export
            .dir
            .as_deref()
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    pub fn log_level(&self) -> Level {
        self.log
            .level
            .as_deref()
            .and_then(parse_level)
            .unwrap_or(Level::INFO)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.file {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# backoffice config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\ntheme = \"light\"\n# Optional. Each page has its own default.\n# page_size = 10\nstart_page = \"dashboard\"\n\n[export]\n# Optional. Default is the current directory.\n# dir = \"/absolute/path/to/exports\"\n\n[log]\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/backoffice/backoffice.log)\n# file = \"/absolute/path/to/backoffice.log\"\n",
            path.display(),
        )
    }
}
