// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use backoffice_app::{AppState, FilterState, PageKind};
use backoffice_store::seed::CATALOG;
use backoffice_store::{export_path, export_to_file, run_query, schema_for, seed_store};
use config::Config;
use runtime::StoreRuntime;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `backoffice --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_logging(config.log_level(), &config.log_file()?)?;

    if options.check_only {
        let pages = check_fixtures()?;
        println!("config ok; {pages} pages seeded");
        return Ok(());
    }

    if let Some(page) = options.export {
        let out = match &options.out {
            Some(path) => path.clone(),
            None => default_export_path(page, &config.export_dir())?,
        };
        let written = export_page(page, options.search.as_deref().unwrap_or(""), &out)?;
        println!("wrote {written} rows to {}", out.display());
        return Ok(());
    }

    let start_page = options.page.unwrap_or_else(|| config.start_page());
    tracing::info!(start_page = start_page.slug(), "starting");
    let mut state = AppState::new(config.theme(), start_page);
    let mut runtime = StoreRuntime::new(config.export_dir(), config.page_size());
    backoffice_tui::run_app(&mut state, &mut runtime)
}

/// Seeds every record page so broken fixtures surface before the UI starts.
fn check_fixtures() -> Result<usize> {
    for schema in CATALOG {
        seed_store(schema.page)?;
    }
    Ok(CATALOG.len())
}

fn default_export_path(page: PageKind, dir: &Path) -> Result<PathBuf> {
    let schema = schema_for(page)
        .with_context(|| format!("{} has no record table to export", page.slug()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("create export directory {}", dir.display()))?;
    export_path(schema, dir)
}

/// Writes the seeded rows of `page` that match `search`, in the page's
/// default order.
fn export_page(page: PageKind, search: &str, out: &Path) -> Result<usize> {
    let schema = schema_for(page)
        .with_context(|| format!("{} has no record table to export", page.slug()))?;
    let store = seed_store(page)?;
    let mut filter = FilterState::for_schema(schema);
    filter.set_search(search);
    let rows = run_query(schema, store.records(), &filter);
    export_to_file(schema, &rows, out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    page: Option<PageKind>,
    export: Option<PageKind>,
    search: Option<String>,
    out: Option<PathBuf>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        page: None,
        export: None,
        search: None,
        out: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--page" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--page requires a page slug"))?;
                options.page = Some(parse_page(value.as_ref())?);
            }
            "--export" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--export requires a page slug"))?;
                let page = parse_page(value.as_ref())?;
                if !page.has_records() {
                    bail!("--export needs a record page; {} has no rows", page.slug());
                }
                options.export = Some(page);
            }
            "--search" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--search requires search text"))?;
                options.search = Some(value.as_ref().to_owned());
            }
            "--out" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--out requires a file path"))?;
                options.out = Some(PathBuf::from(value.as_ref()));
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.export.is_none() && (options.search.is_some() || options.out.is_some()) {
        bail!("--search and --out only apply together with --export <page>");
    }

    Ok(options)
}

fn parse_page(value: &str) -> Result<PageKind> {
    PageKind::parse(value).ok_or_else(|| {
        let known = PageKind::ALL
            .iter()
            .map(|page| page.slug())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow!("unknown page {value:?}; expected one of: {known}")
    })
}

fn print_help() {
    println!("backoffice");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and seed every page, then exit");
    println!("  --page <slug>            Page to open after login");
    println!("  --export <slug>          Write a page's rows as CSV and exit");
    println!("  --search <text>          With --export: only rows matching the search");
    println!("  --out <path>             With --export: output file (default [export].dir)");
    println!("  --help                   Show this help");
}
