use crate::shared::event_bus::EntityKind;
use std::fmt::Debug;
use std::hash::Hash;

/// Record type shown by an `EntityTable`
pub trait TableEntity: Clone + 'static {
    type Id: Clone + Eq + Hash + Debug + 'static;

    fn id(&self) -> Self::Id;

    /// Id as carried by UI events and DOM attributes
    fn id_string(&self) -> String;
}

/// One visible column; `property_name` is the sort key sent to the server
pub struct ColumnSpec<E> {
    pub property_name: &'static str,
    pub title: String,
    pub sortable: bool,
    pub render: fn(&E) -> String,
}

impl<E> Clone for ColumnSpec<E> {
    fn clone(&self) -> Self {
        Self {
            property_name: self.property_name,
            title: self.title.clone(),
            sortable: self.sortable,
            render: self.render,
        }
    }
}

impl<E> ColumnSpec<E> {
    pub fn new(property_name: &'static str, title: impl Into<String>, render: fn(&E) -> String) -> Self {
        Self {
            property_name,
            title: title.into(),
            sortable: false,
            render,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn value(&self, record: &E) -> String {
        (self.render)(record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub property: &'static str,
    pub ascending: bool,
}

/// Text filter on one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub property: &'static str,
    pub label: String,
}

impl FilterField {
    pub fn new(property: &'static str, label: impl Into<String>) -> Self {
        Self {
            property,
            label: label.into(),
        }
    }
}

/// CSV export of the visible rows; entities without it expose no export action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSpec {
    pub file_name: &'static str,
}

/// Per-entity customisation of the generic table
pub struct EntityTableConfig<E> {
    pub kind: EntityKind,
    /// Entity name as used in confirmations and alerts
    pub entity_title: String,
    /// Column set for a viewer with the given privilege
    pub columns: fn(privileged: bool) -> Vec<ColumnSpec<E>>,
    pub default_sort: SortSpec,
    pub filter_fields: Vec<FilterField>,
    /// Label used when listing records in the delete confirmation
    pub display_label: fn(&E) -> String,
    pub export: Option<ExportSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_size_options: vec![50, 100, 200, 500],
        }
    }
}
