//! Filter input adapters.
//!
//! Each adapter turns a UI interaction into a `set_column_filter` or
//! `set_global_filter` call on the table. Debouncing, when enabled, lives
//! here and never in the engine.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::column::{FilterOption, FilterSpec};
use crate::engine::Table;
use crate::state::FilterValue;

/// Value of the "all" entry of a select filter. Choosing it clears the filter.
pub const ALL_OPTION_VALUE: &str = "__all__";

/// Where a text input writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTarget {
    /// The global filter.
    Global,
    /// One column's filter.
    Column(String),
}

// =============================================================================
// Text
// =============================================================================

/// Free-text input for a column or the global filter.
#[derive(Debug, Clone)]
pub struct TextFilter {
    pub target: FilterTarget,
    pub placeholder: Option<String>,
    value: String,
    debounce: Option<Duration>,
    /// When the last keystroke that has not been emitted yet arrived.
    pending_since: Option<Instant>,
}

impl TextFilter {
    /// Text input for the global filter.
    pub fn global() -> Self {
        Self::new(FilterTarget::Global, None)
    }

    /// Text input for one column.
    pub fn column(column_id: impl Into<String>, placeholder: Option<String>) -> Self {
        Self::new(FilterTarget::Column(column_id.into()), placeholder)
    }

    fn new(target: FilterTarget, placeholder: Option<String>) -> Self {
        Self {
            target,
            placeholder,
            value: String::new(),
            debounce: None,
            pending_since: None,
        }
    }

    /// Hold input until it has been quiet for `delay`.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Current input text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether input is waiting to be emitted.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Handle a keystroke.
    ///
    /// Without debounce the value is emitted immediately.
    pub fn input<T: Clone>(&mut self, table: &Table<T>, text: impl Into<String>, now: Instant) {
        self.value = text.into();
        match self.debounce {
            None => self.emit(table),
            Some(_) => self.pending_since = Some(now),
        }
    }

    /// Emit held input if the debounce delay has passed. Returns whether it did.
    pub fn flush<T: Clone>(&mut self, table: &Table<T>, now: Instant) -> bool {
        let (Some(since), Some(delay)) = (self.pending_since, self.debounce) else {
            return false;
        };
        if now.saturating_duration_since(since) < delay {
            return false;
        }
        self.emit(table);
        true
    }

    /// Clear the input and its filter.
    pub fn clear<T: Clone>(&mut self, table: &Table<T>) {
        self.value.clear();
        self.emit(table);
    }

    /// Pick up the table's current value, dropping pending input.
    pub fn sync<T: Clone>(&mut self, table: &Table<T>) {
        self.pending_since = None;
        self.value = match &self.target {
            FilterTarget::Global => table.global_filter(),
            FilterTarget::Column(id) => match table.column_filter(id) {
                Some(FilterValue::Text(text)) => text,
                _ => String::new(),
            },
        };
    }

    fn emit<T: Clone>(&mut self, table: &Table<T>) {
        self.pending_since = None;
        match &self.target {
            FilterTarget::Global => table.set_global_filter(self.value.clone()),
            FilterTarget::Column(id) => {
                table.set_column_filter(id, Some(FilterValue::Text(self.value.clone())))
            }
        }
    }
}

// =============================================================================
// Select
// =============================================================================

/// Single-choice filter.
#[derive(Debug, Clone)]
pub struct SelectFilter {
    pub column_id: String,
    pub options: Vec<FilterOption>,
    pub placeholder: Option<String>,
    selected: Option<String>,
}

impl SelectFilter {
    pub fn new(
        column_id: impl Into<String>,
        options: Vec<FilterOption>,
        placeholder: Option<String>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            options,
            placeholder,
            selected: None,
        }
    }

    /// Options with the "all" sentinel first.
    pub fn choices(&self) -> Vec<FilterOption> {
        let all = FilterOption::new(
            self.placeholder.clone().unwrap_or_else(|| "All".to_string()),
            ALL_OPTION_VALUE,
        );
        std::iter::once(all).chain(self.options.iter().cloned()).collect()
    }

    /// The selected value, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Choose an option by value. [`ALL_OPTION_VALUE`] clears the filter.
    pub fn select<T: Clone>(&mut self, table: &Table<T>, value: &str) {
        if value == ALL_OPTION_VALUE {
            self.clear(table);
            return;
        }
        if !self.options.iter().any(|o| o.value == value) {
            log::warn!(
                "Ignoring unknown option '{}' for filter '{}'",
                value,
                self.column_id
            );
            return;
        }
        self.selected = Some(value.to_string());
        table.set_column_filter(&self.column_id, Some(FilterValue::Select(value.to_string())));
    }

    /// Clear the selection and its filter.
    pub fn clear<T: Clone>(&mut self, table: &Table<T>) {
        self.selected = None;
        table.set_column_filter(&self.column_id, None);
    }

    /// Pick up the table's current value.
    pub fn sync<T: Clone>(&mut self, table: &Table<T>) {
        self.selected = match table.column_filter(&self.column_id) {
            Some(FilterValue::Select(value)) => Some(value),
            _ => None,
        };
    }
}

// =============================================================================
// Multiselect
// =============================================================================

/// Result of searching a multiselect's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMatch {
    /// Index into the filter's options.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Fuzzy search over option labels, best match first.
///
/// An empty query returns every option in its original order.
pub fn search_options(query: &str, options: &[FilterOption]) -> Vec<OptionMatch> {
    if query.is_empty() {
        return (0..options.len())
            .map(|index| OptionMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut matches: Vec<OptionMatch> = options
        .iter()
        .enumerate()
        .filter_map(|(index, option)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&option.label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| OptionMatch { index, score })
        })
        .collect();

    // Stable, so equal scores keep option order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Multiple-choice (faceted) filter.
#[derive(Debug, Clone)]
pub struct MultiSelectFilter {
    pub column_id: String,
    pub options: Vec<FilterOption>,
    pub placeholder: Option<String>,
    selected: BTreeSet<String>,
}

impl MultiSelectFilter {
    pub fn new(
        column_id: impl Into<String>,
        options: Vec<FilterOption>,
        placeholder: Option<String>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            options,
            placeholder,
            selected: BTreeSet::new(),
        }
    }

    /// Build a filter whose options are the distinct values of the column.
    pub fn faceted<T: Clone>(table: &Table<T>, column_id: &str) -> Self {
        let options = table
            .faceted_values(column_id)
            .into_iter()
            .map(|(value, _)| FilterOption::new(value.clone(), value))
            .collect();
        Self::new(column_id, options, None)
    }

    /// Selected values.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Whether an option value is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Add or remove a value and emit the new set.
    ///
    /// Emitting an empty set clears the filter.
    pub fn toggle<T: Clone>(&mut self, table: &Table<T>, value: &str) {
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
        table.set_column_filter(
            &self.column_id,
            Some(FilterValue::MultiSelect(self.selected.clone())),
        );
    }

    /// Deselect everything and clear the filter.
    pub fn clear<T: Clone>(&mut self, table: &Table<T>) {
        self.selected.clear();
        table.set_column_filter(&self.column_id, None);
    }

    /// Options whose label matches the query, best first.
    pub fn search(&self, query: &str) -> Vec<&FilterOption> {
        search_options(query, &self.options)
            .into_iter()
            .map(|m| &self.options[m.index])
            .collect()
    }

    /// Options paired with how many rows hold each value.
    pub fn with_counts<T: Clone>(&self, table: &Table<T>) -> Vec<(FilterOption, usize)> {
        let facets = table.faceted_values(&self.column_id);
        self.options
            .iter()
            .map(|option| {
                let count = facets
                    .iter()
                    .find(|(value, _)| *value == option.value)
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                (option.clone(), count)
            })
            .collect()
    }

    /// Pick up the table's current value.
    pub fn sync<T: Clone>(&mut self, table: &Table<T>) {
        self.selected = match table.column_filter(&self.column_id) {
            Some(FilterValue::MultiSelect(set)) => set,
            _ => BTreeSet::new(),
        };
    }
}

// =============================================================================
// Filter bar
// =============================================================================

/// One column's filter input.
#[derive(Debug, Clone)]
pub enum FilterControl {
    Text(TextFilter),
    Select(SelectFilter),
    MultiSelect(MultiSelectFilter),
}

impl FilterControl {
    /// Build the adapter a column's spec asks for.
    pub fn from_spec(column_id: &str, spec: &FilterSpec) -> Option<Self> {
        match spec {
            FilterSpec::None => None,
            FilterSpec::Text { placeholder } => Some(FilterControl::Text(TextFilter::column(
                column_id,
                placeholder.clone(),
            ))),
            FilterSpec::Select {
                options,
                placeholder,
            } => Some(FilterControl::Select(SelectFilter::new(
                column_id,
                options.clone(),
                placeholder.clone(),
            ))),
            FilterSpec::MultiSelect {
                options,
                placeholder,
            } => Some(FilterControl::MultiSelect(MultiSelectFilter::new(
                column_id,
                options.clone(),
                placeholder.clone(),
            ))),
        }
    }

    /// Column this control filters.
    pub fn column_id(&self) -> Option<&str> {
        match self {
            FilterControl::Text(text) => match &text.target {
                FilterTarget::Column(id) => Some(id),
                FilterTarget::Global => None,
            },
            FilterControl::Select(select) => Some(&select.column_id),
            FilterControl::MultiSelect(multi) => Some(&multi.column_id),
        }
    }

    fn sync<T: Clone>(&mut self, table: &Table<T>) {
        match self {
            FilterControl::Text(text) => text.sync(table),
            FilterControl::Select(select) => select.sync(table),
            FilterControl::MultiSelect(multi) => multi.sync(table),
        }
    }
}

/// The toolbar above a table: global search plus one input per filterable column.
#[derive(Debug, Clone)]
pub struct FilterBar {
    pub global: TextFilter,
    pub controls: Vec<FilterControl>,
}

impl FilterBar {
    /// Build inputs from the table's column filter specs.
    pub fn from_table<T: Clone>(table: &Table<T>) -> Self {
        let controls = table
            .columns()
            .iter()
            .filter_map(|c| FilterControl::from_spec(&c.id, &c.filter))
            .collect();
        let mut bar = Self {
            global: TextFilter::global(),
            controls,
        };
        bar.sync(table);
        bar
    }

    /// Debounce the global search input.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.global = self.global.with_debounce(delay);
        self
    }

    /// The control for a column.
    pub fn control_mut(&mut self, column_id: &str) -> Option<&mut FilterControl> {
        self.controls
            .iter_mut()
            .find(|c| c.column_id() == Some(column_id))
    }

    /// Whether the table has any active filter.
    pub fn is_filtered<T: Clone>(&self, table: &Table<T>) -> bool {
        table.is_filtered()
    }

    /// Clear every filter in one table update.
    pub fn reset<T: Clone>(&mut self, table: &Table<T>) {
        table.reset_filters();
        self.sync(table);
    }

    /// Refresh all inputs from the table.
    pub fn sync<T: Clone>(&mut self, table: &Table<T>) {
        self.global.sync(table);
        for control in &mut self.controls {
            control.sync(table);
        }
    }
}
