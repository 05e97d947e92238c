use super::config::TableEntity;
use super::controller::EntityTable;
use crate::shared::components::filter_panel::FilterPanelView;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Renders an `EntityTable`: action bar, filter panel with paging, and the
/// table itself.
///
/// The table is attached and loaded on mount and detached on cleanup.
#[component]
pub fn EntityTableView<E: TableEntity>(
    table: EntityTable<E>,
    /// Page heading; defaults to the entity title
    #[prop(optional, into)]
    title: Option<String>,
) -> impl IntoView {
    // bumped whenever the table reports a change
    let version = RwSignal::new(0u64);
    let change_registration = table.on_change(move || {
        version.try_update(|v| *v += 1);
    });

    table.attach();
    table.reload();

    let create = table.create_action();
    let delete = table.delete_action();
    let export = table.export_action();
    let has_create = create.is_some();
    let has_delete = delete.is_some();
    let has_export = export.is_some();

    let columns = table.configure_columns();
    let filter_panel = table.build_filter_panel();
    let fields = filter_panel.fields().to_vec();
    let strings = table.strings().clone();
    let page_size_options = table.settings().page_size_options.clone();
    let title = title.unwrap_or_else(|| table.entity_title().to_string());

    let stored = StoredValue::new_local(table);
    let create = StoredValue::new_local(create);
    let delete = StoredValue::new_local(delete);
    let export = StoredValue::new_local(export);
    let panel = StoredValue::new_local(filter_panel);
    let change_registration = StoredValue::new_local(Some(change_registration));

    on_cleanup(move || {
        change_registration.try_update_value(|r| {
            if let Some(r) = r.take() {
                r.remove_handler();
            }
        });
        stored.try_with_value(|t| t.detach());
    });

    let query = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.query())
    });
    let is_loading = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.is_loading())
    });
    let load_error = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.load_error())
    });
    let selected_count = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.selected_count())
    });
    let row_count = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.row_count())
    });
    let total_count = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.total_count())
    });
    let total_pages = Signal::derive(move || {
        version.track();
        stored.with_value(|t| t.total_pages())
    });
    let active_filters_count = Signal::derive(move || {
        version.track();
        panel.with_value(|p| p.active_count())
    });
    let delete_visible = Signal::derive(move || {
        version.track();
        delete.with_value(|d| d.as_ref().is_some_and(|b| b.is_visible()))
    });
    let delete_enabled = Signal::derive(move || {
        version.track();
        delete.with_value(|d| d.as_ref().is_some_and(|b| b.is_enabled()))
    });

    let is_filter_expanded = RwSignal::new(false);
    let no_rows = strings.no_rows.clone();
    let loading_text = strings.loading.clone();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{title}</h1>
                    <span class="badge badge--primary">{move || total_count.get().to_string()}</span>
                </div>
                <div class="header__actions">
                    {has_create.then(|| view! {
                        <button
                            class="button button--primary"
                            on:click=move |_| {
                                if let Some(cmd) = create.get_value() {
                                    cmd.execute();
                                }
                            }
                        >
                            {icon("plus")}
                            {strings.button_create.clone()}
                        </button>
                    })}
                    <button
                        class="button button--secondary"
                        on:click=move |_| stored.get_value().reload()
                        disabled=move || is_loading.get()
                    >
                        {icon("refresh")}
                        {strings.button_refresh.clone()}
                    </button>
                    {has_delete.then(|| view! {
                        <button
                            class="button button--secondary"
                            style:display=move || if delete_visible.get() { "" } else { "none" }
                            disabled=move || !delete_enabled.get()
                            on:click=move |_| {
                                if let Some(button) = delete.get_value() {
                                    button.click();
                                }
                            }
                        >
                            {icon("delete")}
                            {let label = strings.button_delete.clone();
                             move || format!("{} ({})", label, selected_count.get())}
                        </button>
                    })}
                    {has_export.then(|| view! {
                        <button
                            class="button button--secondary"
                            on:click=move |_| {
                                if let Some(cmd) = export.get_value() {
                                    cmd.execute();
                                }
                            }
                        >
                            {icon("download")}
                            {strings.button_export.clone()}
                        </button>
                    })}
                </div>
            </div>

            <FilterPanelView
                title=strings.filters.clone()
                is_expanded=is_filter_expanded
                active_filters_count=active_filters_count
                pagination_controls=move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || query.get().page)
                        total_pages=total_pages
                        total_count=total_count
                        page_size=Signal::derive(move || query.get().page_size)
                        on_page_change=Callback::new(move |page| stored.get_value().set_page(page))
                        on_page_size_change=Callback::new(move |size| stored.get_value().set_page_size(size))
                        page_size_options=page_size_options.clone()
                    />
                }
            >
                <div class="filter-panel__fields">
                    {fields.iter().map(|field| {
                        let property = field.property;
                        view! {
                            <div class="form__group">
                                <label class="form__label">{field.label.clone()}</label>
                                <input
                                    class="form__input"
                                    type="text"
                                    prop:value=move || {
                                        version.track();
                                        panel.with_value(|p| p.value(property))
                                    }
                                    on:input=move |ev| {
                                        panel.get_value().set_value(property, event_target_value(&ev));
                                    }
                                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            panel.get_value().apply();
                                        }
                                    }
                                />
                            </div>
                        }
                    }).collect_view()}
                    <button class="button button--primary" on:click=move |_| panel.get_value().apply()>
                        {icon("filter")}
                        "Apply"
                    </button>
                    <button class="button button--secondary" on:click=move |_| panel.get_value().clear()>
                        {icon("x")}
                        "Clear"
                    </button>
                </div>
            </FilterPanelView>

            {move || load_error.get().map(|e| view! {
                <div class="alert alert--error">{e}</div>
            })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {has_delete.then(|| view! {
                                <TableHeaderCheckbox
                                    selected_count=selected_count
                                    row_count=row_count
                                    on_change=Callback::new(move |all| stored.get_value().select_all_visible(all))
                                />
                            })}
                            {columns.iter().map(|column| view! {
                                <SortableHeaderCell
                                    label=column.title.clone()
                                    sort_field=column.property_name
                                    sortable=column.sortable
                                    current_sort_field=Signal::derive(move || query.get().sort_field)
                                    sort_ascending=Signal::derive(move || query.get().ascending)
                                    on_sort=Callback::new(move |field: String| stored.get_value().toggle_sort(&field))
                                    min_width=150.0
                                />
                            }).collect_view()}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            version.track();
                            let rows = stored.with_value(|t| t.rendered_rows());
                            rows.into_iter().map(|row| {
                                let id_for_open = row.id.clone();
                                let id_for_checked = row.id.clone();
                                let id_for_toggle = row.id;
                                view! {
                                    <TableRow
                                        class="table__row--clickable"
                                        on:click=move |_| stored.get_value().open_row(&id_for_open)
                                    >
                                        {has_delete.then(|| view! {
                                            <TableCellCheckbox
                                                checked=Signal::derive(move || {
                                                    version.track();
                                                    stored.with_value(|t| t.is_selected(&id_for_checked))
                                                })
                                                on_change=Callback::new(move |checked| {
                                                    stored.get_value().set_selected(&id_for_toggle, checked)
                                                })
                                            />
                                        })}
                                        {row.cells.into_iter().map(|cell| view! {
                                            <TableCell>
                                                <TableCellLayout truncate=true>{cell}</TableCellLayout>
                                            </TableCell>
                                        }).collect_view()}
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>

                {move || {
                    if is_loading.get() {
                        Some(view! { <div class="table__placeholder">{loading_text.clone()}</div> })
                    } else if row_count.get() == 0 {
                        Some(view! { <div class="table__placeholder">{no_rows.clone()}</div> })
                    } else {
                        None
                    }
                }}
            </div>
        </div>
    }
}
