//! User-facing strings of the entity tables.
//!
//! Only the English set ships; other locales plug in by constructing
//! `TableStrings` with translated values.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStrings {
    pub button_create: String,
    pub button_delete: String,
    pub button_export: String,
    pub button_refresh: String,
    /// Text before the entity title in the delete confirmation
    pub confirmation_delete_several1: String,
    /// Text after the entity title in the delete confirmation
    pub confirmation_delete_several2: String,
    /// `{}` is replaced with the entity title
    pub error_delete: String,
    pub filters: String,
    pub loading: String,
    pub no_rows: String,
}

impl Default for TableStrings {
    fn default() -> Self {
        Self {
            button_create: "New".to_string(),
            button_delete: "Delete".to_string(),
            button_export: "Export".to_string(),
            button_refresh: "Refresh".to_string(),
            confirmation_delete_several1: "Delete these".to_string(),
            confirmation_delete_several2: String::new(),
            error_delete: "Error deleting the {} entries".to_string(),
            filters: "Filters".to_string(),
            loading: "Loading...".to_string(),
            no_rows: "No entries".to_string(),
        }
    }
}

impl TableStrings {
    pub fn delete_failed(&self, entity_title: &str) -> String {
        self.error_delete.replacen("{}", entity_title, 1)
    }
}
