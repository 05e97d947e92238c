use super::actions::{Command, DeleteButton};
use super::config::{ColumnSpec, EntityTableConfig, SortSpec, TableEntity, TableSettings};
use super::confirm::delete_confirmation;
use super::filter::FilterPanel;
use super::selection::SelectionSet;
use super::services::{DataSource, PermissionOracle, RemoteDeleteService, Spawner};
use crate::shared::dialogs::Dialogs;
use crate::shared::error::RemoteError;
use crate::shared::error_report::ErrorReporter;
use crate::shared::event_bus::{
    AdminEvent, EntityKind, EventBus, HandlerRegistration, HandlerSet, SubscriptionRegistry,
};
use crate::shared::export::{build_csv, download_csv};
use crate::shared::i18n::TableStrings;
use contracts::shared::list::{FilterCriterion, ListQuery};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Result of one delete gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Server accepted the bulk delete of this many records
    Deleted(usize),
    /// Server rejected the request; the user has been alerted
    Failed(RemoteError),
    /// User declined the confirmation
    Cancelled,
    EmptySelection,
    /// A previous delete is still outstanding
    InFlight,
    NotPermitted,
}

/// Collaborators injected into a table
pub struct EntityTableDeps<E: TableEntity> {
    pub bus: EventBus,
    pub data_source: Rc<dyn DataSource<E>>,
    pub delete_service: Rc<dyn RemoteDeleteService<E>>,
    pub dialogs: Rc<dyn Dialogs>,
    pub reporter: Rc<dyn ErrorReporter>,
    pub spawner: Spawner,
    pub strings: TableStrings,
    pub settings: TableSettings,
}

/// Row as the view renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: String,
    pub cells: Vec<String>,
}

struct TableState<E: TableEntity> {
    query: ListQuery,
    rows: Vec<E>,
    total_count: usize,
    selection: SelectionSet<E>,
    loading: bool,
    load_error: Option<String>,
}

struct Inner<E: TableEntity> {
    config: EntityTableConfig<E>,
    privileged: bool,
    columns: Vec<ColumnSpec<E>>,
    deps: EntityTableDeps<E>,
    state: RefCell<TableState<E>>,
    delete_button: RefCell<Option<DeleteButton>>,
    registrations: RefCell<SubscriptionRegistry>,
    attached: Cell<bool>,
    delete_in_flight: Cell<bool>,
    load_seq: Cell<u64>,
    changes: HandlerSet<()>,
}

/// Sortable, filterable, selectable list of one entity type with its
/// create/delete/export actions.
///
/// Handlers registered on `attach` hold only weak references to the table
/// and are all removed on `detach`.
pub struct EntityTable<E: TableEntity> {
    inner: Rc<Inner<E>>,
}

impl<E: TableEntity> Clone for EntityTable<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: TableEntity> EntityTable<E> {
    /// Privilege is read from `permissions` once, here.
    pub fn new(
        config: EntityTableConfig<E>,
        deps: EntityTableDeps<E>,
        permissions: &dyn PermissionOracle,
    ) -> Self {
        let privileged = permissions.is_privileged();
        let columns = (config.columns)(privileged);
        let query = ListQuery::new(
            config.default_sort.property,
            config.default_sort.ascending,
            deps.settings.page_size,
        );

        Self {
            inner: Rc::new(Inner {
                config,
                privileged,
                columns,
                deps,
                state: RefCell::new(TableState {
                    query,
                    rows: Vec::new(),
                    total_count: 0,
                    selection: SelectionSet::new(),
                    loading: false,
                    load_error: None,
                }),
                delete_button: RefCell::new(None),
                registrations: RefCell::new(SubscriptionRegistry::new()),
                attached: Cell::new(false),
                delete_in_flight: Cell::new(false),
                load_seq: Cell::new(0),
                changes: HandlerSet::new(),
            }),
        }
    }

    fn downgrade(&self) -> Weak<Inner<E>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner<E>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn kind(&self) -> EntityKind {
        self.inner.config.kind
    }

    pub fn entity_title(&self) -> &str {
        &self.inner.config.entity_title
    }

    pub fn is_privileged(&self) -> bool {
        self.inner.privileged
    }

    pub fn strings(&self) -> &TableStrings {
        &self.inner.deps.strings
    }

    pub fn settings(&self) -> &TableSettings {
        &self.inner.deps.settings
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn configure_columns(&self) -> Vec<ColumnSpec<E>> {
        self.inner.columns.clone()
    }

    pub fn default_sort(&self) -> SortSpec {
        self.inner.config.default_sort
    }

    /// Filter form for this entity, already bound to the table's query
    pub fn build_filter_panel(&self) -> FilterPanel {
        let panel = FilterPanel::new(self.inner.config.filter_fields.clone());
        self.configure_filter_panel(&panel);
        panel
    }

    /// Routes the panel's `apply` to this table
    pub fn configure_filter_panel(&self, panel: &FilterPanel) {
        let weak = self.downgrade();
        panel.set_on_apply(move |criteria| {
            if let Some(table) = Self::upgrade(&weak) {
                table.apply_filters(criteria);
            }
        });
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn create_action(&self) -> Option<Command> {
        if !self.inner.privileged {
            return None;
        }
        let bus = self.inner.deps.bus.clone();
        let kind = self.kind();
        Some(Command::new(move || bus.fire(AdminEvent::CreateRequested(kind))))
    }

    /// The same button is returned until the table is detached
    pub fn delete_action(&self) -> Option<DeleteButton> {
        if !self.inner.privileged {
            return None;
        }
        Some(self.ensure_delete_button())
    }

    pub fn export_action(&self) -> Option<Command> {
        if !self.inner.privileged {
            return None;
        }
        let export = self.inner.config.export?;
        let weak = self.downgrade();
        Some(Command::new(move || {
            if let Some(table) = Self::upgrade(&weak) {
                if let Err(e) = download_csv(&table.export_csv(), export.file_name) {
                    log::error!("export of {} failed: {}", table.kind(), e);
                }
            }
        }))
    }

    fn ensure_delete_button(&self) -> DeleteButton {
        let mut slot = self.inner.delete_button.borrow_mut();
        slot.get_or_insert_with(|| DeleteButton::new(self.inner.deps.strings.button_delete.clone()))
            .clone()
    }

    /// Visible rows as CSV, one column per configured column
    pub fn export_csv(&self) -> String {
        let headers: Vec<String> = self.inner.columns.iter().map(|c| c.title.clone()).collect();
        let rows: Vec<Vec<String>> = self
            .inner
            .state
            .borrow()
            .rows
            .iter()
            .map(|row| self.inner.columns.iter().map(|c| c.value(row)).collect())
            .collect();
        build_csv(&headers, &rows)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Registers the table's handlers. Calling it twice is a no-op.
    pub fn attach(&self) {
        if self.inner.attached.replace(true) {
            return;
        }

        let kind = self.kind();
        let bus = &self.inner.deps.bus;
        let mut registry = SubscriptionRegistry::new();

        if self.inner.privileged {
            let button = self.ensure_delete_button();

            let weak = self.downgrade();
            registry.add(button.add_click_handler(move |_| {
                if let Some(table) = Self::upgrade(&weak) {
                    let spawn = Rc::clone(&table.inner.deps.spawner);
                    spawn(Box::pin(async move {
                        let outcome = table.delete_selected().await;
                        log::debug!("delete on {}: {:?}", table.kind(), outcome);
                    }));
                }
            }));

            let weak = self.downgrade();
            registry.add(bus.subscribe(move |event| {
                if let AdminEvent::SelectionChanged { kind: k, count } = event {
                    if *k == kind {
                        if let Some(table) = Self::upgrade(&weak) {
                            table.on_selection_changed(*count);
                        }
                    }
                }
            }));
        }

        let weak = self.downgrade();
        registry.add(bus.subscribe(move |event| {
            if *event == AdminEvent::ListRefreshRequested(kind) {
                if let Some(table) = Self::upgrade(&weak) {
                    table.reload();
                }
            }
        }));

        log::debug!("{} table attached with {} handlers", kind, registry.len());
        *self.inner.registrations.borrow_mut() = registry;
    }

    /// Removes every handler registered by `attach` and drops the selection
    /// and the delete button; `attach` builds them afresh.
    pub fn detach(&self) {
        if !self.inner.attached.replace(false) {
            return;
        }
        self.inner.registrations.borrow_mut().release_all();
        self.inner.delete_button.borrow_mut().take();
        self.inner.state.borrow_mut().selection.clear();
        log::debug!("{} table detached", self.kind());
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    pub fn registration_count(&self) -> usize {
        self.inner.registrations.borrow().len()
    }

    /// Called whenever the table state visible to the view changes
    pub fn on_change(&self, handler: impl Fn() + 'static) -> HandlerRegistration {
        self.inner.changes.add(move |_| handler())
    }

    fn notify(&self) {
        self.inner.changes.dispatch(&());
    }

    fn on_selection_changed(&self, count: usize) {
        if let Some(button) = self.inner.delete_button.borrow().as_ref() {
            button.set_visible(count > 0);
        }
        self.notify();
    }

    // ------------------------------------------------------------------
    // Rows and selection
    // ------------------------------------------------------------------

    pub fn rows(&self) -> Vec<E> {
        self.inner.state.borrow().rows.clone()
    }

    pub fn rendered_rows(&self) -> Vec<RenderedRow> {
        let state = self.inner.state.borrow();
        state
            .rows
            .iter()
            .map(|row| RenderedRow {
                id: row.id_string(),
                cells: self.inner.columns.iter().map(|c| c.value(row)).collect(),
            })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.inner.state.borrow().rows.len()
    }

    pub fn total_count(&self) -> usize {
        self.inner.state.borrow().total_count
    }

    pub fn total_pages(&self) -> usize {
        let state = self.inner.state.borrow();
        if state.query.page_size == 0 {
            return 0;
        }
        state.total_count.div_ceil(state.query.page_size)
    }

    pub fn query(&self) -> ListQuery {
        self.inner.state.borrow().query.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn load_error(&self) -> Option<String> {
        self.inner.state.borrow().load_error.clone()
    }

    pub fn selected_count(&self) -> usize {
        self.inner.state.borrow().selection.len()
    }

    pub fn selected_ids(&self) -> Vec<E::Id> {
        self.inner.state.borrow().selection.ids()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .state
            .borrow()
            .selection
            .iter()
            .any(|e| e.id_string() == id)
    }

    pub fn is_delete_in_flight(&self) -> bool {
        self.inner.delete_in_flight.get()
    }

    /// Row checkbox gesture; ids not on the current page are ignored
    pub fn set_selected(&self, id: &str, selected: bool) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let Some(record) = state.rows.iter().find(|r| r.id_string() == id).cloned() else {
                return;
            };
            state.selection.set_selected(&record, selected)
        };
        if changed {
            self.publish_selection();
        }
    }

    /// Header checkbox gesture
    pub fn select_all_visible(&self, selected: bool) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            if selected {
                let TableState { rows, selection, .. } = &mut *state;
                selection.select_all(rows.iter())
            } else {
                state.selection.clear()
            }
        };
        if changed {
            self.publish_selection();
        }
    }

    fn publish_selection(&self) {
        let count = self.selected_count();
        self.notify();
        self.inner.deps.bus.fire(AdminEvent::SelectionChanged {
            kind: self.kind(),
            count,
        });
    }

    /// Row click: asks the host to open the record
    pub fn open_row(&self, id: &str) {
        self.inner.deps.bus.fire(AdminEvent::ViewRequested {
            kind: self.kind(),
            id: id.to_string(),
        });
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    /// Header click; non-sortable properties are ignored
    pub fn toggle_sort(&self, property: &str) {
        let sortable = self
            .inner
            .columns
            .iter()
            .any(|c| c.property_name == property && c.sortable);
        if !sortable {
            return;
        }
        self.inner.state.borrow_mut().query.toggle_sort(property);
        self.reload();
    }

    pub fn set_page(&self, page: usize) {
        self.inner.state.borrow_mut().query.page = page;
        self.reload();
    }

    pub fn set_page_size(&self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.query.page_size = page_size;
            state.query.page = 0;
        }
        self.reload();
    }

    pub fn apply_filters(&self, criteria: Vec<FilterCriterion>) {
        self.inner.state.borrow_mut().query.set_filters(criteria);
        self.reload();
    }

    /// Schedules `refresh` on the spawner
    pub fn reload(&self) {
        let table = self.clone();
        (self.inner.deps.spawner)(Box::pin(async move {
            let _ = table.refresh().await;
        }));
    }

    /// Loads the current page. Rows are replaced, the selection is cleared
    /// and `SelectionChanged { count: 0 }` is published.
    ///
    /// A response overtaken by a newer `refresh` is dropped.
    pub async fn refresh(&self) -> Result<(), RemoteError> {
        let seq = self.inner.load_seq.get() + 1;
        self.inner.load_seq.set(seq);

        let query = {
            let mut state = self.inner.state.borrow_mut();
            state.loading = true;
            state.query.clone()
        };
        self.notify();

        let result = self.inner.deps.data_source.fetch(&query).await;
        if self.inner.load_seq.get() != seq {
            return Ok(());
        }

        let mut past_last_page = false;
        let outcome = match result {
            Ok(page) => {
                let mut state = self.inner.state.borrow_mut();
                past_last_page = page.items.is_empty() && query.page > 0 && page.total_count > 0;
                state.loading = false;
                state.rows = page.items;
                state.total_count = page.total_count;
                state.load_error = None;
                state.selection.clear();
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load {} list: {}", self.kind(), e);
                let mut state = self.inner.state.borrow_mut();
                state.loading = false;
                state.load_error = Some(e.to_string());
                Err(e)
            }
        };

        self.notify();
        if outcome.is_ok() {
            self.inner.deps.bus.fire(AdminEvent::SelectionChanged {
                kind: self.kind(),
                count: 0,
            });
        }
        if past_last_page {
            let last = self.total_pages().saturating_sub(1);
            self.set_page(last);
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Delete protocol
    // ------------------------------------------------------------------

    /// Confirms and deletes the selected records.
    ///
    /// On success a single `ListRefreshRequested` is published; on failure
    /// the user gets one alert and the error goes to the reporter. There is
    /// no retry.
    pub async fn delete_selected(&self) -> DeleteOutcome {
        if !self.inner.privileged {
            return DeleteOutcome::NotPermitted;
        }
        if self.inner.delete_in_flight.get() {
            return DeleteOutcome::InFlight;
        }

        let (ids, labels) = {
            let state = self.inner.state.borrow();
            let labels: Vec<String> = state
                .selection
                .iter()
                .map(|e| (self.inner.config.display_label)(e))
                .collect();
            (state.selection.ids(), labels)
        };
        if ids.is_empty() {
            return DeleteOutcome::EmptySelection;
        }

        let strings = &self.inner.deps.strings;
        let message = delete_confirmation(strings, &self.inner.config.entity_title, &labels);
        if !self.inner.deps.dialogs.confirm(&message) {
            return DeleteOutcome::Cancelled;
        }

        let count = ids.len();
        log::info!("deleting {} {} entries", count, self.kind());
        self.set_delete_in_flight(true);
        let result = self.inner.deps.delete_service.delete(ids).await;
        self.set_delete_in_flight(false);

        match result {
            Ok(()) => {
                self.inner
                    .deps
                    .bus
                    .fire(AdminEvent::ListRefreshRequested(self.kind()));
                DeleteOutcome::Deleted(count)
            }
            Err(e) => {
                self.inner
                    .deps
                    .dialogs
                    .alert(&strings.delete_failed(&self.inner.config.entity_title));
                self.inner
                    .deps
                    .reporter
                    .report(&format!("{}.delete", self.kind()), &e);
                DeleteOutcome::Failed(e)
            }
        }
    }

    fn set_delete_in_flight(&self, in_flight: bool) {
        self.inner.delete_in_flight.set(in_flight);
        if let Some(button) = self.inner.delete_button.borrow().as_ref() {
            button.set_enabled(!in_flight);
        }
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_table::config::{ExportSpec, FilterField};
    use crate::shared::entity_table::services::Privilege;
    use async_trait::async_trait;
    use contracts::shared::list::ListPage;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;

    const CARDS: EntityKind = EntityKind("card");

    #[derive(Clone, Debug, PartialEq)]
    struct Card {
        id: u32,
        name: String,
    }

    impl TableEntity for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn id_string(&self) -> String {
            self.id.to_string()
        }
    }

    fn card(id: u32, name: &str) -> Card {
        Card {
            id,
            name: name.to_string(),
        }
    }

    fn render_name(c: &Card) -> String {
        c.name.clone()
    }

    fn columns(privileged: bool) -> Vec<ColumnSpec<Card>> {
        if privileged {
            vec![ColumnSpec::new("name", "Name", render_name).sortable()]
        } else {
            Vec::new()
        }
    }

    fn config(export: Option<ExportSpec>) -> EntityTableConfig<Card> {
        EntityTableConfig {
            kind: CARDS,
            entity_title: "Entities".to_string(),
            columns,
            default_sort: SortSpec {
                property: "modified",
                ascending: false,
            },
            filter_fields: vec![FilterField::new("name", "Name")],
            display_label: render_name,
            export,
        }
    }

    #[derive(Default)]
    struct FakeSource {
        rows: RefCell<Vec<Card>>,
        queries: RefCell<Vec<ListQuery>>,
        fail: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl DataSource<Card> for FakeSource {
        async fn fetch(&self, query: &ListQuery) -> Result<ListPage<Card>, RemoteError> {
            self.queries.borrow_mut().push(query.clone());
            if self.fail.get() {
                return Err(RemoteError::Transport("offline".into()));
            }
            let rows = self.rows.borrow().clone();
            Ok(ListPage {
                total_count: rows.len(),
                items: rows,
            })
        }
    }

    struct FakeDeleter {
        source: Rc<FakeSource>,
        requests: RefCell<Vec<Vec<u32>>>,
        fail: Cell<bool>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl RemoteDeleteService<Card> for FakeDeleter {
        async fn delete(&self, ids: Vec<u32>) -> Result<(), RemoteError> {
            self.requests.borrow_mut().push(ids.clone());
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            if self.fail.get() {
                return Err(RemoteError::Status {
                    status: 500,
                    message: "boom".into(),
                });
            }
            self.source
                .rows
                .borrow_mut()
                .retain(|c| !ids.contains(&c.id));
            Ok(())
        }
    }

    struct FakeDialogs {
        answer: Cell<bool>,
        confirms: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl Dialogs for FakeDialogs {
        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            self.answer.get()
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct FakeReporter {
        reports: RefCell<Vec<(String, RemoteError)>>,
    }

    impl ErrorReporter for FakeReporter {
        fn report(&self, category: &str, error: &RemoteError) {
            self.reports
                .borrow_mut()
                .push((category.to_string(), error.clone()));
        }
    }

    struct Harness {
        pool: LocalPool,
        table: EntityTable<Card>,
        bus: EventBus,
        source: Rc<FakeSource>,
        deleter: Rc<FakeDeleter>,
        dialogs: Rc<FakeDialogs>,
        reporter: Rc<FakeReporter>,
        events: Rc<RefCell<Vec<AdminEvent>>>,
    }

    impl Harness {
        fn new(privileged: bool, export: Option<ExportSpec>) -> Self {
            let pool = LocalPool::new();
            let local = pool.spawner();
            let spawner: Spawner = Rc::new(move |fut: LocalBoxFuture<'static, ()>| {
                local.spawn_local(fut).expect("spawn");
            });

            let bus = EventBus::new();
            let events = Rc::new(RefCell::new(Vec::new()));
            let recorder = events.clone();
            let _ = bus.subscribe(move |e| recorder.borrow_mut().push(e.clone()));

            let source = Rc::new(FakeSource::default());
            *source.rows.borrow_mut() = vec![card(1, "Alice"), card(2, "Bob"), card(3, "Carol")];
            let deleter = Rc::new(FakeDeleter {
                source: source.clone(),
                requests: RefCell::new(Vec::new()),
                fail: Cell::new(false),
                gate: RefCell::new(None),
            });
            let dialogs = Rc::new(FakeDialogs {
                answer: Cell::new(true),
                confirms: RefCell::new(Vec::new()),
                alerts: RefCell::new(Vec::new()),
            });
            let reporter = Rc::new(FakeReporter::default());

            let deps = EntityTableDeps {
                bus: bus.clone(),
                data_source: source.clone(),
                delete_service: deleter.clone(),
                dialogs: dialogs.clone(),
                reporter: reporter.clone(),
                spawner,
                strings: TableStrings::default(),
                settings: TableSettings::default(),
            };
            let table = EntityTable::new(config(export), deps, &Privilege(privileged));

            Self {
                pool,
                table,
                bus,
                source,
                deleter,
                dialogs,
                reporter,
                events,
            }
        }

        /// Attached and loaded
        fn ready(privileged: bool) -> Self {
            let mut h = Self::new(privileged, None);
            h.table.attach();
            h.table.reload();
            h.pool.run_until_stalled();
            h
        }

        fn refresh_events(&self) -> usize {
            self.events
                .borrow()
                .iter()
                .filter(|e| matches!(e, AdminEvent::ListRefreshRequested(_)))
                .count()
        }
    }

    #[test]
    fn test_actions_present_only_for_privileged_viewer() {
        let h = Harness::new(true, None);
        assert!(h.table.create_action().is_some());
        assert!(h.table.delete_action().is_some());
        assert!(h.table.export_action().is_none());
        assert_eq!(h.table.configure_columns().len(), 1);

        let h = Harness::new(false, None);
        assert!(h.table.create_action().is_none());
        assert!(h.table.delete_action().is_none());
        assert!(h.table.export_action().is_none());
        assert!(h.table.configure_columns().is_empty());
    }

    #[test]
    fn test_export_action_requires_opt_in_and_privilege() {
        let export = Some(ExportSpec {
            file_name: "cards.csv",
        });
        assert!(Harness::new(true, export).table.export_action().is_some());
        assert!(Harness::new(false, export).table.export_action().is_none());
    }

    #[test]
    fn test_export_csv_uses_column_titles_and_values() {
        let h = Harness::ready(true);
        assert_eq!(h.table.export_csv(), "\u{FEFF}Name\nAlice\nBob\nCarol\n");
    }

    #[test]
    fn test_default_sort_initializes_query() {
        let h = Harness::new(true, None);
        let q = h.table.query();
        assert_eq!(q.sort_field, "modified");
        assert!(!q.ascending);
        assert_eq!(q.page_size, 100);
        assert_eq!(h.table.default_sort().property, "modified");
    }

    #[test]
    fn test_create_action_fires_create_requested() {
        let h = Harness::new(true, None);
        h.table.create_action().unwrap().execute();
        assert_eq!(
            *h.events.borrow(),
            vec![AdminEvent::CreateRequested(CARDS)]
        );
    }

    #[test]
    fn test_delete_button_follows_latest_selection_count() {
        let h = Harness::ready(true);
        let button = h.table.delete_action().unwrap();
        assert!(!button.is_visible());

        h.bus.fire(AdminEvent::SelectionChanged { kind: CARDS, count: 2 });
        assert!(button.is_visible());
        h.bus.fire(AdminEvent::SelectionChanged { kind: CARDS, count: 0 });
        assert!(!button.is_visible());

        // another list's selection does not matter
        h.bus.fire(AdminEvent::SelectionChanged {
            kind: EntityKind("other"),
            count: 5,
        });
        assert!(!button.is_visible());

        h.table.set_selected("2", true);
        assert!(button.is_visible());
        h.table.set_selected("2", false);
        assert!(!button.is_visible());
    }

    #[test]
    fn test_delete_three_confirmed() {
        let mut h = Harness::ready(true);
        let button = h.table.delete_action().unwrap();
        for id in ["1", "2", "3"] {
            h.table.set_selected(id, true);
        }
        assert!(button.is_visible());

        button.click();
        h.pool.run_until_stalled();

        assert_eq!(*h.deleter.requests.borrow(), vec![vec![1, 2, 3]]);
        assert_eq!(
            *h.dialogs.confirms.borrow(),
            vec!["Delete these Entities: 'Alice', 'Bob', 'Carol' ?".to_string()]
        );
        assert_eq!(h.refresh_events(), 1);
        assert_eq!(h.table.selected_count(), 0);
        assert!(h.table.rows().is_empty());
        assert!(!button.is_visible());
        assert!(h.dialogs.alerts.borrow().is_empty());
    }

    #[test]
    fn test_delete_cancelled_keeps_selection() {
        let mut h = Harness::ready(true);
        let button = h.table.delete_action().unwrap();
        h.table.set_selected("1", true);
        h.dialogs.answer.set(false);

        button.click();
        h.pool.run_until_stalled();

        assert!(h.deleter.requests.borrow().is_empty());
        assert_eq!(h.dialogs.confirms.borrow().len(), 1);
        assert!(button.is_visible());
        assert_eq!(h.table.selected_count(), 1);
        assert_eq!(h.refresh_events(), 0);
    }

    #[test]
    fn test_delete_failure_alerts_once_without_refresh() {
        let mut h = Harness::ready(true);
        h.deleter.fail.set(true);
        h.table.set_selected("2", true);

        let outcome = h.pool.run_until(h.table.delete_selected());

        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert_eq!(h.refresh_events(), 0);
        assert_eq!(
            *h.dialogs.alerts.borrow(),
            vec!["Error deleting the Entities entries".to_string()]
        );
        let reports = h.reporter.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "card.delete");
        assert_eq!(h.table.selected_count(), 1);
        assert!(!h.table.is_delete_in_flight());
    }

    #[test]
    fn test_empty_selection_is_silent() {
        let mut h = Harness::ready(true);
        let outcome = h.pool.run_until(h.table.delete_selected());
        assert_eq!(outcome, DeleteOutcome::EmptySelection);
        assert!(h.dialogs.confirms.borrow().is_empty());
        assert!(h.deleter.requests.borrow().is_empty());
    }

    #[test]
    fn test_unprivileged_delete_is_refused() {
        let mut h = Harness::ready(false);
        h.table.set_selected("1", true);
        let outcome = h.pool.run_until(h.table.delete_selected());
        assert_eq!(outcome, DeleteOutcome::NotPermitted);
        assert!(h.dialogs.confirms.borrow().is_empty());
    }

    #[test]
    fn test_second_delete_while_in_flight_is_rejected() {
        let mut h = Harness::ready(true);
        let (tx, rx) = oneshot::channel();
        *h.deleter.gate.borrow_mut() = Some(rx);
        let button = h.table.delete_action().unwrap();
        h.table.set_selected("1", true);

        button.click();
        h.pool.run_until_stalled();
        assert!(h.table.is_delete_in_flight());
        assert!(!button.is_enabled());

        // disabled button swallows the click, a direct call is refused
        button.click();
        let outcome = h.pool.run_until(h.table.delete_selected());
        assert_eq!(outcome, DeleteOutcome::InFlight);

        tx.send(()).unwrap();
        h.pool.run_until_stalled();

        assert_eq!(h.deleter.requests.borrow().len(), 1);
        assert!(button.is_enabled());
        assert_eq!(h.refresh_events(), 1);
    }

    #[test]
    fn test_detach_releases_every_handler() {
        let h = Harness::new(true, None);
        let baseline = h.bus.handler_count();

        h.table.attach();
        assert_eq!(h.table.registration_count(), 3);
        assert_eq!(h.bus.handler_count(), baseline + 2);

        h.table.detach();
        assert_eq!(h.table.registration_count(), 0);
        assert_eq!(h.bus.handler_count(), baseline);
        assert!(!h.table.is_attached());
    }

    #[test]
    fn test_reattach_does_not_duplicate_handlers() {
        let mut h = Harness::ready(true);
        let baseline = h.bus.handler_count();
        h.table.detach();
        h.table.attach();
        assert_eq!(h.bus.handler_count(), baseline);
        assert_eq!(h.table.registration_count(), 3);

        // a fresh button, one click handler on it
        let button = h.table.delete_action().unwrap();
        assert_eq!(button.click_handler_count(), 1);

        h.table.set_selected("1", true);
        button.click();
        h.pool.run_until_stalled();
        assert_eq!(h.deleter.requests.borrow().len(), 1);
        assert_eq!(h.dialogs.confirms.borrow().len(), 1);
    }

    #[test]
    fn test_detached_table_ignores_bus() {
        let mut h = Harness::ready(true);
        let loads = h.source.queries.borrow().len();
        h.table.detach();

        h.bus.fire(AdminEvent::ListRefreshRequested(CARDS));
        h.pool.run_until_stalled();
        assert_eq!(h.source.queries.borrow().len(), loads);
    }

    #[test]
    fn test_unprivileged_attach_only_listens_for_refresh() {
        let h = Harness::new(false, None);
        h.table.attach();
        assert_eq!(h.table.registration_count(), 1);
    }

    #[test]
    fn test_refresh_event_reloads_and_clears_selection() {
        let mut h = Harness::ready(true);
        h.table.set_selected("1", true);
        h.bus.fire(AdminEvent::ListRefreshRequested(CARDS));
        h.pool.run_until_stalled();

        assert_eq!(h.table.selected_count(), 0);
        assert_eq!(h.table.rows().len(), 3);
        assert_eq!(h.table.total_count(), 3);
    }

    #[test]
    fn test_load_error_is_kept_without_alert() {
        let mut h = Harness::new(true, None);
        h.source.fail.set(true);
        let result = h.pool.run_until(h.table.refresh());

        assert!(result.is_err());
        assert_eq!(
            h.table.load_error().as_deref(),
            Some("failed to send request: offline")
        );
        assert!(!h.table.is_loading());
        assert!(h.dialogs.alerts.borrow().is_empty());
    }

    #[test]
    fn test_sort_toggle_reloads_only_for_sortable_columns() {
        let mut h = Harness::ready(true);
        let loads = h.source.queries.borrow().len();

        h.table.toggle_sort("modified");
        h.pool.run_until_stalled();
        assert_eq!(h.source.queries.borrow().len(), loads);

        h.table.toggle_sort("name");
        h.pool.run_until_stalled();
        let last = h.source.queries.borrow().last().cloned().unwrap();
        assert_eq!(last.sort_field, "name");
        assert!(last.ascending);

        h.table.toggle_sort("name");
        h.pool.run_until_stalled();
        assert!(!h.table.query().ascending);
    }

    #[test]
    fn test_filter_panel_is_bound_to_query() {
        let mut h = Harness::ready(true);
        h.table.set_page(2);
        h.pool.run_until_stalled();

        let panel = h.table.build_filter_panel();
        panel.set_value("name", "ali");
        panel.apply();
        h.pool.run_until_stalled();

        let last = h.source.queries.borrow().last().cloned().unwrap();
        assert_eq!(last.filters.len(), 1);
        assert_eq!(last.filters[0].value, "ali");
        assert_eq!(last.page, 0);
    }

    #[test]
    fn test_page_size_change_restarts_paging() {
        let mut h = Harness::ready(true);
        h.table.set_page(1);
        h.pool.run_until_stalled();
        h.table.set_page_size(50);
        h.pool.run_until_stalled();

        let q = h.table.query();
        assert_eq!(q.page, 0);
        assert_eq!(q.page_size, 50);
    }

    #[test]
    fn test_row_click_requests_view() {
        let h = Harness::ready(true);
        h.table.open_row("3");
        assert!(h.events.borrow().contains(&AdminEvent::ViewRequested {
            kind: CARDS,
            id: "3".to_string()
        }));
    }

    #[test]
    fn test_select_all_visible_and_rendered_rows() {
        let h = Harness::ready(true);
        h.table.select_all_visible(true);
        assert_eq!(h.table.selected_ids(), vec![1, 2, 3]);
        assert!(h.table.is_selected("2"));

        h.table.select_all_visible(false);
        assert_eq!(h.table.selected_count(), 0);

        let rows = h.table.rendered_rows();
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].cells, vec!["Alice".to_string()]);
    }
}
