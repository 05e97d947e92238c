//! Generic sortable, filterable, selectable entity table.
//!
//! `EntityTable` holds the state and the action wiring and has no DOM
//! dependencies; `EntityTableView` renders it. An entity list supplies an
//! `EntityTableConfig` instead of subclassing anything.

pub mod actions;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod filter;
pub mod selection;
pub mod services;
pub mod view;

pub use actions::{Command, DeleteButton};
pub use config::{ColumnSpec, EntityTableConfig, ExportSpec, FilterField, SortSpec, TableEntity, TableSettings};
pub use controller::{DeleteOutcome, EntityTable, EntityTableDeps, RenderedRow};
pub use filter::FilterPanel;
pub use selection::SelectionSet;
pub use services::{local_spawner, DataSource, PermissionOracle, Privilege, RemoteDeleteService, Spawner};
pub use view::EntityTableView;
