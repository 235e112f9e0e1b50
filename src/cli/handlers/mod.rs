use chrono::Utc;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::source::{ProjectSource, build_source, project_route};
use crate::model::{CatalogConfig, NewProject, ProjectRecord};
use crate::ops::filter::filter_records;
use crate::ops::freshness::{is_new, sort_by_freshness};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Read the config file and apply command-line overrides. `--file` beats
/// `--url`, and either one replaces whatever source the config names.
pub fn load_config(cli: &Cli) -> Result<CatalogConfig, ConfigError> {
    let mut config = config_io::read_config(cli.config.as_deref())?;
    apply_overrides(&mut config, cli.url.as_deref(), cli.file.as_deref());
    Ok(config)
}

fn apply_overrides(
    config: &mut CatalogConfig,
    url: Option<&str>,
    file: Option<&std::path::Path>,
) {
    if let Some(url) = url {
        config.source.url = url.to_string();
        config.source.file = None;
    }
    if let Some(file) = file {
        config.source.file = Some(file.to_path_buf());
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let source = build_source(&config.source)?;
    tracing::debug!(source = %source.describe(), "running command");

    match cli.command {
        None => Err("no command given".into()),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(source.as_ref(), &config, args, json),
            Commands::Show(args) => cmd_show(source.as_ref(), &config, args, json),
            Commands::Add(args) => cmd_add(source.as_ref(), args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

/// Fetch, filter and sort the same way the list view does
fn load_listing(
    source: &dyn ProjectSource,
    query: &str,
) -> Result<(usize, Vec<ProjectRecord>), Box<dyn std::error::Error>> {
    let records = source.fetch_all()?;
    let total = records.len();
    let mut shown = filter_records(&records, query);
    sort_by_freshness(&mut shown);
    Ok((total, shown))
}

fn cmd_list(
    source: &dyn ProjectSource,
    config: &CatalogConfig,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let new_days = config.freshness.new_days;
    let query = args.query.unwrap_or_default();
    let (total, mut shown) = load_listing(source, &query)?;
    if args.new {
        shown.retain(|r| is_new(r, now, new_days));
    }

    if json {
        let web_url = config.source.web_url.as_deref();
        let out = ListJson {
            total,
            query: (!query.is_empty()).then(|| query.clone()),
            projects: shown
                .iter()
                .map(|r| project_to_json(r, now, new_days, Some(project_route(web_url, &r.name))))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if shown.is_empty() {
        if query.is_empty() {
            println!("no projects");
        } else {
            println!("no projects match \"{}\"", query);
        }
        return Ok(());
    }
    for line in format_listing(&shown, now, new_days) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(
    source: &dyn ProjectSource,
    config: &CatalogConfig,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let new_days = config.freshness.new_days;
    let records = source.fetch_all()?;
    let record = records
        .iter()
        .find(|r| r.name == args.name)
        .ok_or_else(|| format!("project not found: {}", args.name))?;
    let route = project_route(config.source.web_url.as_deref(), &record.name);

    if json {
        let out = project_to_json(record, now, new_days, Some(route));
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_project_detail(record, now, new_days, &route) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    source: &dyn ProjectSource,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = NewProject::new(&args.name, &args.description, &args.tech)?;
    source.create(&project)?;
    tracing::info!(name = %project.name, "project created");

    if json {
        let out = serde_json::json!({ "name": project.name, "created": true });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Project {} created", project.name);
    }
    Ok(())
}
