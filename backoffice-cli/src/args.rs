//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use gridkit::{ColumnSort, SortDirection};
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Render a back-office collection as a table")]
pub struct Args {
    #[clap(flatten)]
    pub source: Source,
    /// API base URL, overriding the configured one
    #[clap(long)]
    pub url: Option<String>,
    /// Comma-separated fields to show, in order. Defaults to every field of the first record
    #[clap(long, value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Sort key as `column[:asc|desc]`. Repeat for a multi-column sort
    #[clap(long = "sort", value_parser = parse_sort)]
    pub sort: Vec<ColumnSort>,
    /// Text filter as `column=value` (case-insensitive substring)
    #[clap(long = "filter", value_parser = parse_assignment)]
    pub filter: Vec<(String, String)>,
    /// Exact-match filter as `column=value`
    #[clap(long = "select", value_parser = parse_assignment)]
    pub select: Vec<(String, String)>,
    /// Search every column
    #[clap(long)]
    pub search: Option<String>,
    /// Hide a column. Repeatable
    #[clap(long = "hide")]
    pub hide: Vec<String>,
    /// Page to show, starting at 1
    #[clap(long, value_parser = parse_positive)]
    pub page: Option<usize>,
    /// Rows per page
    #[clap(long, value_parser = parse_positive)]
    pub page_size: Option<usize>,
    /// Restore the saved view with this name before applying arguments, and save it afterwards
    #[clap(long)]
    pub view: Option<String>,
    /// Widest a column may be painted
    #[clap(long, default_value_t = 32, value_parser = parse_positive)]
    pub max_width: usize,
    /// Config file (JSON)
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Log file. Defaults to `latest.log` in the cache directory
    #[clap(long)]
    pub log_file: Option<PathBuf>,
    /// More logging (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Where the records come from.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Collection path on the API, e.g. `orders`
    #[clap(long)]
    pub collection: Option<String>,
    /// JSON file holding an array of records or `{"data": [...]}`
    #[clap(long)]
    pub file: Option<PathBuf>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Every column id named by a filter, sort or visibility argument.
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.sort
            .iter()
            .map(|s| s.column_id.as_str())
            .chain(self.filter.iter().map(|(c, _)| c.as_str()))
            .chain(self.select.iter().map(|(c, _)| c.as_str()))
            .chain(self.hide.iter().map(String::as_str))
    }
}

fn parse_sort(raw: &str) -> Result<ColumnSort, String> {
    let (column, direction) = match raw.split_once(':') {
        Some((column, direction)) => (
            column,
            direction
                .parse::<SortDirection>()
                .map_err(|e| e.to_string())?,
        ),
        None => (raw, SortDirection::Asc),
    };
    if column.trim().is_empty() {
        return Err("missing column".to_string());
    }
    Ok(ColumnSort::new(column.trim(), direction))
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected `column=value`, got '{}'", raw)),
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("price").unwrap(), ColumnSort::asc("price"));
        assert_eq!(parse_sort("price:DESC").unwrap(), ColumnSort::desc("price"));
        assert!(parse_sort("price:sideways").is_err());
        assert!(parse_sort(":asc").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("status=on hold").unwrap(),
            ("status".to_string(), "on hold".to_string())
        );
        assert_eq!(
            parse_assignment("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("status").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("3"), Ok(3));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from([
            "backoffice",
            "--collection",
            "orders",
            "--columns",
            "id,status",
            "--sort",
            "status",
            "--sort",
            "id:desc",
            "--select",
            "status=active",
            "--hide",
            "id",
            "-vv",
        ]);
        assert_eq!(args.source.collection.as_deref(), Some("orders"));
        assert_eq!(args.columns, vec!["id", "status"]);
        assert_eq!(args.sort.len(), 2);
        assert_eq!(args.log_level(), LevelFilter::Trace);
        assert_eq!(
            args.referenced_columns().collect::<Vec<_>>(),
            vec!["status", "id", "status", "id"]
        );
    }

    #[test]
    fn test_source_is_required_and_exclusive() {
        assert!(Args::try_parse_from(["backoffice"]).is_err());
        assert!(
            Args::try_parse_from(["backoffice", "--collection", "a", "--file", "b.json"]).is_err()
        );
    }
}
