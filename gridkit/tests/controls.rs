//! Header, filter and pagination controls dispatching into a table.

use std::time::{Duration, Instant};

use gridkit::controls::{ALL_OPTION_VALUE, search_options};
use gridkit::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Customer {
    email: &'static str,
    group: &'static str,
    points: i64,
}

fn customers() -> Vec<Customer> {
    vec![
        Customer { email: "ana@shop.test", group: "gold", points: 1200 },
        Customer { email: "ben@shop.test", group: "silver", points: 300 },
        Customer { email: "cleo@shop.test", group: "gold", points: 950 },
        Customer { email: "dev@shop.test", group: "bronze", points: 40 },
        Customer { email: "eli@shop.test", group: "silver", points: 610 },
    ]
}

fn groups() -> Vec<FilterOption> {
    vec![
        FilterOption::new("Bronze", "bronze"),
        FilterOption::new("Silver", "silver"),
        FilterOption::new("Gold", "gold"),
    ]
}

fn table(options: TableOptions) -> Table<Customer> {
    let columns = vec![
        Column::new("email", "Email", |c: &Customer| CellValue::from(c.email))
            .text_filter("Filter emails...")
            .disable_hiding(),
        Column::new("group", "Group", |c: &Customer| CellValue::from(c.group))
            .multi_select_filter(groups()),
        Column::new("points", "Points", |c: &Customer| CellValue::from(c.points))
            .align(Alignment::Right),
    ];
    Table::new(columns, customers(), options).unwrap()
}

// =============================================================================
// Column header
// =============================================================================

mod header {
    use super::*;

    #[test]
    fn test_indicator_follows_sort_state() {
        let table = table(TableOptions::new());
        let header = ColumnHeader::for_column(&table, "points").unwrap();
        assert_eq!(header.indicator(), "↕");

        header.dispatch(&table, HeaderAction::ToggleSort);
        let header = ColumnHeader::for_column(&table, "points").unwrap();
        assert_eq!(header.decorated_label(), "Points ▲");

        header.dispatch(&table, HeaderAction::SortDescending);
        let header = ColumnHeader::for_column(&table, "points").unwrap();
        assert_eq!(header.indicator(), "▼");
        assert_eq!(table.visible_rows()[0].email, "ana@shop.test");
    }

    #[test]
    fn test_multi_sort_shows_position() {
        let table = table(TableOptions::new().multi_sort(true));
        table.toggle_sort("group");
        table.toggle_sort("points");

        let headers = ColumnHeader::visible(&table);
        let labels: Vec<String> = headers.iter().map(|h| h.decorated_label()).collect();
        assert_eq!(labels, ["Email ↕", "Group ▲1", "Points ▲2"]);
    }

    #[test]
    fn test_actions_reflect_capabilities() {
        let table = table(TableOptions::new());
        let email = ColumnHeader::for_column(&table, "email").unwrap();
        assert!(!email.actions().contains(&HeaderAction::Hide));

        table.set_sort("group", Some(SortDirection::Asc));
        let group = ColumnHeader::for_column(&table, "group").unwrap();
        assert_eq!(
            group.actions(),
            vec![
                HeaderAction::ToggleSort,
                HeaderAction::SortDescending,
                HeaderAction::ClearSort,
                HeaderAction::Hide,
            ]
        );

        group.dispatch(&table, HeaderAction::ClearSort);
        assert!(table.sorting().is_empty());

        group.dispatch(&table, HeaderAction::Hide);
        assert!(!table.is_column_visible("group"));
    }

    #[test]
    fn test_sorting_disabled_hides_sort_actions() {
        let table = table(TableOptions::new().sorting(false));
        let header = ColumnHeader::for_column(&table, "points").unwrap();
        assert!(!header.sortable);
        assert_eq!(header.indicator(), "");
        assert_eq!(header.actions(), vec![HeaderAction::Hide]);
    }

    #[test]
    fn test_visibility_menu_lists_hideable_columns() {
        let table = table(TableOptions::new());
        let mut menu = ColumnVisibilityMenu::from_table(&table);
        let ids: Vec<&str> = menu.entries.iter().map(|e| e.column_id.as_str()).collect();
        assert_eq!(ids, ["group", "points"]);

        menu.toggle(&table, "points");
        assert!(!table.is_column_visible("points"));
        assert!(!menu.entries[1].visible);

        menu.toggle(&table, "points");
        assert!(table.is_column_visible("points"));
    }
}

// =============================================================================
// Filters
// =============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_text_filter_emits_each_keystroke() {
        let table = table(TableOptions::new());
        let mut input = TextFilter::column("email", None);
        let now = Instant::now();

        input.input(&table, "e", now);
        assert_eq!(table.row_count(), 5);
        input.input(&table, "el", now);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_debounced_input_waits_for_quiet_period() {
        let table = table(TableOptions::new());
        let mut search = TextFilter::global().with_debounce(Duration::from_millis(300));
        let start = Instant::now();

        search.input(&table, "gold", start);
        assert!(search.is_pending());
        assert_eq!(table.global_filter(), "");

        assert!(!search.flush(&table, start + Duration::from_millis(100)));
        assert_eq!(table.global_filter(), "");

        assert!(search.flush(&table, start + Duration::from_millis(300)));
        assert_eq!(table.global_filter(), "gold");
        assert_eq!(table.row_count(), 2);
        assert!(!search.is_pending());
    }

    #[test]
    fn test_select_all_sentinel_clears() {
        let table = table(TableOptions::new());
        let mut select = SelectFilter::new("group", groups(), None);
        assert_eq!(select.choices()[0].value, ALL_OPTION_VALUE);
        assert_eq!(select.choices().len(), 4);

        select.select(&table, "silver");
        assert_eq!(table.row_count(), 2);
        assert_eq!(select.selected(), Some("silver"));

        select.select(&table, ALL_OPTION_VALUE);
        assert_eq!(table.row_count(), 5);
        assert_eq!(select.selected(), None);
    }

    #[test]
    fn test_select_ignores_unknown_option() {
        let table = table(TableOptions::new());
        let mut select = SelectFilter::new("group", groups(), None);
        select.select(&table, "platinum");
        assert!(!table.is_filtered());
    }

    #[test]
    fn test_multiselect_toggles_membership() {
        let table = table(TableOptions::new());
        let mut multi = MultiSelectFilter::faceted(&table, "group");

        multi.toggle(&table, "gold");
        multi.toggle(&table, "bronze");
        assert_eq!(table.row_count(), 3);

        multi.toggle(&table, "gold");
        assert_eq!(table.row_count(), 1);

        multi.toggle(&table, "bronze");
        assert!(table.column_filter("group").is_none());
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_multiselect_counts_and_search() {
        let table = table(TableOptions::new());
        let multi = MultiSelectFilter::new("group", groups(), None);

        let counts: Vec<(String, usize)> = multi
            .with_counts(&table)
            .into_iter()
            .map(|(option, count)| (option.value, count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("bronze".to_string(), 1),
                ("silver".to_string(), 2),
                ("gold".to_string(), 2),
            ]
        );

        let found: Vec<&str> = multi.search("slv").iter().map(|o| o.value.as_str()).collect();
        assert_eq!(found, ["silver"]);
    }

    #[test]
    fn test_search_with_empty_query_keeps_all_options() {
        let matches = search_options("", &groups());
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_filter_bar_builds_controls_and_resets() {
        let table = table(TableOptions::new());
        let mut bar = FilterBar::from_table(&table);
        assert_eq!(bar.controls.len(), 2);

        let now = Instant::now();
        bar.global.input(&table, "shop", now);
        if let Some(FilterControl::MultiSelect(multi)) = bar.control_mut("group") {
            multi.toggle(&table, "silver");
        }
        if let Some(FilterControl::Text(text)) = bar.control_mut("email") {
            text.input(&table, "eli", now);
        }
        assert!(bar.is_filtered(&table));
        assert_eq!(table.row_count(), 1);

        bar.reset(&table);
        assert!(!bar.is_filtered(&table));
        assert_eq!(bar.global.value(), "");
        match bar.control_mut("group") {
            Some(FilterControl::MultiSelect(multi)) => assert!(multi.selected().is_empty()),
            other => panic!("unexpected control {:?}", other),
        }

        let before = table.view_state();
        bar.reset(&table);
        assert_eq!(table.view_state(), before);
    }
}

// =============================================================================
// Pagination
// =============================================================================

mod pagination {
    use super::*;

    #[test]
    fn test_boundaries_disable_navigation() {
        let table = table(TableOptions::new().page_size(2));
        let mut pager = PaginationControl::from_table(&table);
        assert!(!pager.can_first());
        assert!(!pager.can_previous());
        assert!(pager.can_next());

        pager.last(&table);
        assert_eq!(pager.page_number(), 3);
        assert!(!pager.can_next());
        assert!(!pager.can_last());

        pager.next(&table);
        assert_eq!(pager.page_index, 2);

        pager.first(&table);
        assert_eq!(pager.page_index, 0);
        pager.previous(&table);
        assert_eq!(pager.page_index, 0);
    }

    #[test]
    fn test_stale_control_reads_live_state() {
        let table = table(TableOptions::new().page_size(2));
        let mut pager = PaginationControl::from_table(&table);
        table.set_page(2);

        pager.previous(&table);
        assert_eq!(table.pagination().page_index, 1);
    }

    #[test]
    fn test_page_size_selector() {
        let table = table(TableOptions::new().page_size(2).page_size_options(vec![5, 10]));
        let mut pager = PaginationControl::from_table(&table);
        assert_eq!(pager.page_size_options, vec![2, 5, 10]);

        pager.next(&table);
        pager.set_page_size(&table, 5);
        assert_eq!(pager.page_index, 0);
        assert_eq!(pager.page_count, 1);
        assert_eq!(pager.page_label(), "Page 1 of 1");
        assert_eq!(pager.rows_label(), "5 rows");
    }

    #[test]
    fn test_manual_pagination_uses_caller_page_count() {
        let options = TableOptions::new().page_size(2).manual_pagination(9).row_count(17);
        let table = table(options);
        let pager = PaginationControl::from_table(&table);
        assert_eq!(pager.page_count, 9);
        assert_eq!(pager.rows_label(), "17 rows");
    }
}
