//! Sort list transitions and the multi-key row sort.

use std::cmp::Ordering;

use crate::column::Column;
use crate::state::{ColumnSort, SortDirection};
use crate::value::CellValue;

/// Apply an explicit direction (or removal) for one column.
///
/// In single-sort mode the resulting list holds at most this column. In
/// multi-sort mode the entry is updated in place or appended, and the other
/// entries keep their relative order.
pub fn apply_sort(
    sorting: &[ColumnSort],
    column_id: &str,
    direction: Option<SortDirection>,
    multi: bool,
) -> Vec<ColumnSort> {
    if !multi {
        return match direction {
            Some(direction) => vec![ColumnSort::new(column_id, direction)],
            None => sorting
                .iter()
                .filter(|s| s.column_id != column_id)
                .cloned()
                .collect(),
        };
    }

    let mut next: Vec<ColumnSort> = sorting.to_vec();
    match direction {
        Some(direction) => match next.iter_mut().find(|s| s.column_id == column_id) {
            Some(entry) => entry.direction = direction,
            None => next.push(ColumnSort::new(column_id, direction)),
        },
        None => next.retain(|s| s.column_id != column_id),
    }
    next
}

/// Toggle the sort of one column.
///
/// Multi-sort cycles `unsorted -> asc -> desc -> unsorted`. Single-sort
/// cycles `asc -> desc -> asc` and replaces whatever column was sorted.
pub fn toggle_sort(sorting: &[ColumnSort], column_id: &str, multi: bool) -> Vec<ColumnSort> {
    let current = sorting
        .iter()
        .find(|s| s.column_id == column_id)
        .map(|s| s.direction);

    let next = if multi {
        match current {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        }
    } else {
        Some(match current {
            Some(direction) => direction.reversed(),
            None => SortDirection::Asc,
        })
    };

    apply_sort(sorting, column_id, next, multi)
}

/// Stable sort of `indices` by the given sort keys.
///
/// Each key compares its column's values; ties fall through to the next
/// key, and rows tied on every key keep their incoming order. Keys naming
/// an unknown column are skipped.
pub fn sort_indices<T>(
    columns: &[Column<T>],
    rows: &[T],
    indices: &mut Vec<usize>,
    sorting: &[ColumnSort],
) {
    let keys: Vec<(&Column<T>, SortDirection)> = sorting
        .iter()
        .filter_map(|s| {
            columns
                .iter()
                .find(|c| c.id == s.column_id)
                .map(|c| (c, s.direction))
        })
        .collect();

    if keys.is_empty() || indices.len() < 2 {
        return;
    }

    // Read every sort value once instead of once per comparison. A failing
    // accessor sorts like null.
    let mut decorated: Vec<(usize, Vec<CellValue>)> = indices
        .iter()
        .map(|&index| {
            let values = keys
                .iter()
                .map(|(column, _)| column.try_value(&rows[index]).unwrap_or_default())
                .collect();
            (index, values)
        })
        .collect();

    decorated.sort_by(|(_, a), (_, b)| {
        for (position, (_, direction)) in keys.iter().enumerate() {
            let ordering = a[position].compare(&b[position]);
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    *indices = decorated.into_iter().map(|(index, _)| index).collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sort_cycles_asc_desc() {
        let s = toggle_sort(&[], "name", false);
        assert_eq!(s, vec![ColumnSort::asc("name")]);
        let s = toggle_sort(&s, "name", false);
        assert_eq!(s, vec![ColumnSort::desc("name")]);
        let s = toggle_sort(&s, "name", false);
        assert_eq!(s, vec![ColumnSort::asc("name")]);
    }

    #[test]
    fn test_single_sort_replaces_other_column() {
        let s = toggle_sort(&[ColumnSort::desc("price")], "name", false);
        assert_eq!(s, vec![ColumnSort::asc("name")]);
    }

    #[test]
    fn test_multi_sort_cycles_through_unsorted() {
        let s = toggle_sort(&[ColumnSort::asc("price")], "name", true);
        assert_eq!(s, vec![ColumnSort::asc("price"), ColumnSort::asc("name")]);
        let s = toggle_sort(&s, "name", true);
        assert_eq!(s, vec![ColumnSort::asc("price"), ColumnSort::desc("name")]);
        let s = toggle_sort(&s, "name", true);
        assert_eq!(s, vec![ColumnSort::asc("price")]);
    }

    #[test]
    fn test_multi_apply_preserves_order() {
        let start = vec![ColumnSort::asc("a"), ColumnSort::asc("b"), ColumnSort::asc("c")];
        let s = apply_sort(&start, "b", Some(SortDirection::Desc), true);
        assert_eq!(
            s,
            vec![ColumnSort::asc("a"), ColumnSort::desc("b"), ColumnSort::asc("c")]
        );
        let s = apply_sort(&s, "a", None, true);
        assert_eq!(s, vec![ColumnSort::desc("b"), ColumnSort::asc("c")]);
    }

    #[test]
    fn test_single_apply_none_only_removes_that_column() {
        let start = vec![ColumnSort::asc("a")];
        assert_eq!(apply_sort(&start, "b", None, false), start);
        assert!(apply_sort(&start, "a", None, false).is_empty());
    }

    #[test]
    fn test_sort_indices_multi_key() {
        let rows = vec![("b", 2), ("a", 2), ("c", 1), ("a", 1)];
        let columns: Vec<Column<(&str, i64)>> = vec![
            Column::new("letter", "Letter", |r: &(&str, i64)| CellValue::from(r.0)),
            Column::new("number", "Number", |r: &(&str, i64)| CellValue::from(r.1)),
        ];
        let mut indices = vec![0, 1, 2, 3];
        sort_indices(
            &columns,
            &rows,
            &mut indices,
            &[ColumnSort::desc("number"), ColumnSort::asc("letter")],
        );
        assert_eq!(indices, vec![1, 0, 3, 2]);
    }
}
