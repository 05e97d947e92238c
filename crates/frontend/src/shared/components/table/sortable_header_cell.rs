//! Header cell that toggles the list sort on click
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Name"
//!     sort_field="name"
//!     current_sort_field=Signal::derive(move || query.with(|q| q.sort_field.clone()))
//!     sort_ascending=Signal::derive(move || query.with(|q| q.ascending))
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Property sent to the server as the sort key
    #[prop(into)]
    sort_field: String,

    #[prop(into)]
    current_sort_field: Signal<String>,

    #[prop(into)]
    sort_ascending: Signal<bool>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Non-sortable columns render a plain header
    #[prop(optional, default = true)]
    sortable: bool,
) -> impl IntoView {
    if !sortable {
        return view! {
            <TableHeaderCell resizable=false min_width=min_width class="resizable">
                {label}
            </TableHeaderCell>
        }
        .into_any();
    }

    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();

    view! {
        <TableHeaderCell resizable=false min_width=min_width class="resizable">
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &sort_field)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
    .into_any()
}
