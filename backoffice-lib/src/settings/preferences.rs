//! Per-table view preferences.

use gridkit::{Table, ViewState};

use super::{SettingsError, SettingsProvider};

const PREFIX: &str = "table.";
const SUFFIX: &str = ".view";

/// Saves and restores each table's view state (sorting, filters, visible
/// columns, page size) under `table.<key>.view`.
#[derive(Debug, Clone)]
pub struct TablePreferences {
    settings: SettingsProvider,
}

impl TablePreferences {
    pub fn new(settings: SettingsProvider) -> Self {
        Self { settings }
    }

    fn key(table_key: &str) -> String {
        format!("{}{}{}", PREFIX, table_key, SUFFIX)
    }

    /// Saved view state of a table.
    pub async fn load(&self, table_key: &str) -> Result<Option<ViewState>, SettingsError> {
        self.settings.get(&Self::key(table_key)).await
    }

    /// Save a view state.
    pub async fn save(&self, table_key: &str, state: &ViewState) -> Result<(), SettingsError> {
        log::debug!("Saving view state for table '{}'", table_key);
        self.settings.set(&Self::key(table_key), state).await
    }

    /// Save the current view state of a table.
    pub async fn save_table<T: Clone>(
        &self,
        table_key: &str,
        table: &Table<T>,
    ) -> Result<(), SettingsError> {
        self.save(table_key, &table.view_state()).await
    }

    /// Restore a saved view state onto a table. Returns whether one existed.
    ///
    /// The saved page index is dropped so a restored table opens on its
    /// first page.
    pub async fn apply<T: Clone>(
        &self,
        table_key: &str,
        table: &Table<T>,
    ) -> Result<bool, SettingsError> {
        let Some(mut state) = self.load(table_key).await? else {
            return Ok(false);
        };
        state.pagination.page_index = 0;
        table.restore_view_state(state);
        Ok(true)
    }

    /// Forget a table's saved state.
    pub async fn clear(&self, table_key: &str) -> Result<(), SettingsError> {
        self.settings.delete(&Self::key(table_key)).await
    }

    /// Keys of all tables with saved state.
    pub async fn saved_tables(&self) -> Result<Vec<String>, SettingsError> {
        let keys = self.settings.keys_with_prefix(PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|k| k.strip_prefix(PREFIX)?.strip_suffix(SUFFIX))
            .map(str::to_string)
            .collect())
    }
}
