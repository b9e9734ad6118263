//! `backoffice` executable: list a collection and print it as a table.

mod args;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use backoffice_lib::config::ConfigError;
use backoffice_lib::model::{Record, record_columns};
use backoffice_lib::resource::decode_list;
use backoffice_lib::settings::{SettingsError, SettingsProvider, SqliteBackend, TablePreferences};
use backoffice_lib::{ApiError, BackofficeConfig, ResourceSlice, RestEndpoints, ToastQueue, paths};
use clap::Parser;
use gridkit::prelude::*;
use simplelog::{Config, WriteLogger};

use args::Args;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("either --collection or --file is required")]
    NoSource,

    #[error(transparent)]
    Backoffice(#[from] backoffice_lib::Error),
}

macro_rules! via_backoffice {
    ($($err:ty),*) => {
        $(impl From<$err> for CliError {
            fn from(err: $err) -> Self {
                Self::Backoffice(err.into())
            }
        })*
    };
}

via_backoffice!(ApiError, ConfigError, SettingsError, TableError);

fn init_logging(args: &Args) {
    let path = match &args.log_file {
        Some(path) => path.clone(),
        None => match paths::log_file() {
            Some(path) => {
                paths::rotate_logs(&path);
                path
            }
            None => return,
        },
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if WriteLogger::init(args.log_level(), Config::default(), file).is_err() {
                eprintln!("Warning: logger already initialized");
            }
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
    }
}

fn load_config(args: &Args) -> Result<BackofficeConfig, CliError> {
    let mut config = BackofficeConfig::load(args.config.as_deref())?;
    if let Some(url) = &args.url {
        config.api_url = Some(url.clone());
    }
    Ok(config)
}

fn read_records(path: &Path) -> Result<Vec<Record>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(decode_list(&value)?)
}

async fn fetch_records(
    config: &BackofficeConfig,
    collection: &str,
    toasts: &ToastQueue,
) -> Result<Vec<Record>, CliError> {
    let endpoints = RestEndpoints::<Record>::new(config.client()?, collection);
    let slice = ResourceSlice::new(endpoints, toasts.clone());
    Ok(slice.fetch().await?)
}

async fn open_preferences(config: &BackofficeConfig) -> Result<TablePreferences, CliError> {
    let settings = match config.settings_path() {
        Some(path) => SettingsProvider::new(SqliteBackend::open(path).await?),
        None => {
            log::warn!("No settings location, saved views will not persist");
            SettingsProvider::in_memory()
        }
    };
    Ok(TablePreferences::new(settings))
}

fn build_table(
    args: &Args,
    config: &BackofficeConfig,
    records: Vec<Record>,
) -> Result<Table<Record>, CliError> {
    let columns = record_columns(&records, &args.columns);
    if let Some(missing) = args
        .referenced_columns()
        .find(|id| !columns.iter().any(|c| c.id == *id))
    {
        return Err(TableError::unknown_column(missing).into());
    }

    let options = config
        .table_options()
        .multi_sort(args.sort.len() > 1);
    Ok(Table::new(columns, records, options)?)
}

/// Apply the view arguments in the order a user would: layout, filters,
/// sorting, then the page window.
fn apply_args(args: &Args, table: &Table<Record>) {
    for column in &args.hide {
        table.toggle_column_visibility(column, false);
    }
    for (column, value) in &args.filter {
        table.set_column_filter(column, Some(FilterValue::Text(value.clone())));
    }
    for (column, value) in &args.select {
        table.set_column_filter(column, Some(FilterValue::Select(value.clone())));
    }
    if let Some(search) = &args.search {
        table.set_global_filter(search.as_str());
    }
    if !args.sort.is_empty() {
        table.clear_sorting();
        for sort in &args.sort {
            table.set_sort(&sort.column_id, Some(sort.direction));
        }
    }
    if let Some(page_size) = args.page_size {
        table.set_page_size(page_size);
    }
    if let Some(page) = args.page {
        table.set_page(page - 1);
    }
}

async fn run(args: &Args, toasts: &ToastQueue) -> Result<(), CliError> {
    let config = load_config(args)?;

    let records = match (&args.source.file, &args.source.collection) {
        (Some(path), _) => read_records(path)?,
        (None, Some(collection)) => fetch_records(&config, collection, toasts).await?,
        (None, None) => return Err(CliError::NoSource),
    };
    log::info!("Loaded {} records", records.len());

    let table = build_table(args, &config, records)?;

    let preferences = match &args.view {
        Some(view) => {
            let preferences = open_preferences(&config).await?;
            if preferences.apply(view, &table).await? {
                log::info!("Restored view '{}'", view);
            }
            Some((view, preferences))
        }
        None => None,
    };

    apply_args(args, &table);

    if let Some((view, preferences)) = preferences {
        preferences.save_table(view, &table).await?;
    }

    let rendered = RenderSurface::new().render(&table);
    let options = TextOptions::new().max_column_width(args.max_width);
    print!("{}", paint(&rendered, &options));
    Ok(())
}

fn print_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        eprintln!("[{}] {}", toast.level, toast.title);
        if let Some(body) = toast.body {
            for line in body.lines() {
                eprintln!("    {}", line);
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _ = dotenvy::dotenv();
    init_logging(&args);

    let toasts = ToastQueue::new();
    let result = run(&args, &toasts).await;
    print_toasts(&toasts);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        decode_list(&json!([
            {"id": 1, "status": "active", "total": 30},
            {"id": 2, "status": "pending", "total": 10},
            {"id": 3, "status": "active", "total": 20},
        ]))
        .unwrap()
    }

    fn table_for(argv: &[&str]) -> Result<Table<Record>, CliError> {
        let mut full = vec!["backoffice", "--file", "orders.json"];
        full.extend_from_slice(argv);
        let args = Args::parse_from(full);
        let table = build_table(&args, &BackofficeConfig::default(), records())?;
        apply_args(&args, &table);
        Ok(table)
    }

    fn ids(table: &Table<Record>) -> Vec<String> {
        table
            .visible_rows()
            .iter()
            .filter_map(|r| r.id_string())
            .collect()
    }

    #[test]
    fn test_select_and_sort() {
        let table = table_for(&["--select", "status=active", "--sort", "total"]).unwrap();
        assert_eq!(ids(&table), vec!["3", "1"]);
    }

    #[test]
    fn test_page_is_one_based() {
        let table = table_for(&["--page-size", "2", "--page", "2"]).unwrap();
        assert_eq!(table.pagination().page_index, 1);
        assert_eq!(ids(&table), vec!["3"]);
    }

    #[test]
    fn test_columns_and_hide() {
        let table = table_for(&["--columns", "id,status", "--hide", "id"]).unwrap();
        let visible: Vec<_> = table.visible_columns().into_iter().map(|c| c.id).collect();
        assert_eq!(visible, vec!["status"]);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let err = table_for(&["--sort", "nope"]).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
