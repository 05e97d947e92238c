pub mod api_utils;
pub mod components;
pub mod dialogs;
pub mod entity_table;
pub mod error;
pub mod error_report;
pub mod event_bus;
pub mod export;
pub mod i18n;
pub mod icons;
pub mod list_utils;
