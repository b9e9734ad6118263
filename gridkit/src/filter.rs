//! Row filtering and faceting.
//!
//! Works on row indices so the engine can keep the caller's rows untouched
//! and derive any number of views from them.

use std::collections::{BTreeMap, HashMap};

use crate::column::Column;
use crate::state::{FilterValue, contains_ignore_case};

/// Indices of the rows that pass all column filters and the global filter.
///
/// Column filters are combined with AND. The global filter passes when at
/// least one filterable column contains it, case-insensitively. Filters that
/// reference a column not in `columns` are ignored. A row whose accessor
/// fails never matches that column.
pub fn filter_indices<T>(
    columns: &[Column<T>],
    rows: &[T],
    column_filters: &BTreeMap<String, FilterValue>,
    global_filter: &str,
) -> Vec<usize> {
    let active: Vec<(&Column<T>, &FilterValue)> = column_filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(id, value)| columns.iter().find(|c| &c.id == id).map(|c| (c, value)))
        .collect();

    let global: Vec<&Column<T>> = if global_filter.is_empty() {
        Vec::new()
    } else {
        columns.iter().filter(|c| c.filterable).collect()
    };

    if active.is_empty() && global_filter.is_empty() {
        return (0..rows.len()).collect();
    }

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            active.iter().all(|(column, value)| {
                column
                    .try_value(row)
                    .is_some_and(|cell| value.matches(&cell))
            })
        })
        .filter(|(_, row)| {
            global_filter.is_empty()
                || global
                    .iter()
                    .filter_map(|column| column.try_value(row))
                    .any(|value| contains_ignore_case(&value.to_string(), global_filter))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Distinct stringified values of a column with their row counts.
///
/// Null values are skipped. The result is sorted by value so option lists
/// built from it are stable between renders.
pub fn faceted_values<T>(column: &Column<T>, rows: &[T]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let Some(value) = column.try_value(row).filter(|v| !v.is_null()) else {
            continue;
        };
        *counts.entry(value.to_string()).or_default() += 1;
    }

    let mut facets: Vec<(String, usize)> = counts.into_iter().collect();
    facets.sort_by(|a, b| crate::value::compare_text(&a.0, &b.0));
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    struct Item {
        name: &'static str,
        status: &'static str,
        qty: i64,
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name", |i: &Item| CellValue::from(i.name)),
            Column::new("status", "Status", |i: &Item| CellValue::from(i.status)),
            Column::new("qty", "Qty", |i: &Item| CellValue::from(i.qty)).disable_global_filter(),
        ]
    }

    fn rows() -> Vec<Item> {
        vec![
            Item { name: "Red mug", status: "active", qty: 12 },
            Item { name: "Blue mug", status: "draft", qty: 0 },
            Item { name: "Red hat", status: "active", qty: 3 },
        ]
    }

    #[test]
    fn test_no_filters_returns_all() {
        let indices = filter_indices(&columns(), &rows(), &BTreeMap::new(), "");
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_column_filters_are_anded() {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), FilterValue::Select("active".into()));
        filters.insert("name".to_string(), FilterValue::Text("mug".into()));
        let indices = filter_indices(&columns(), &rows(), &filters, "");
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn test_global_filter_skips_excluded_columns() {
        // "12" only appears in the qty column, which opted out.
        let indices = filter_indices(&columns(), &rows(), &BTreeMap::new(), "12");
        assert!(indices.is_empty());

        let indices = filter_indices(&columns(), &rows(), &BTreeMap::new(), "RED");
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_facets_count_distinct_values() {
        let cols = columns();
        let facets = faceted_values(&cols[1], &rows());
        assert_eq!(
            facets,
            vec![("active".to_string(), 2), ("draft".to_string(), 1)]
        );
    }
}
