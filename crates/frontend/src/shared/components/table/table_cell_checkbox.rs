use leptos::prelude::*;
use thaw::*;

/// Row selection checkbox.
///
/// Stops click propagation so ticking the box does not open the row.
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    checked: Signal<bool>,

    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableCell>
    }
}
