//! Select-all checkbox of the table header
//!
//! Shows checked when every visible row is selected and indeterminate when
//! only some are.

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(selected: usize, rows: usize) -> CheckboxState {
    if rows == 0 || selected == 0 {
        CheckboxState::Unchecked
    } else if selected >= rows {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    /// Selected rows on the current page
    #[prop(into)]
    selected_count: Signal<usize>,

    /// Rows on the current page
    #[prop(into)]
    row_count: Signal<usize>,

    /// `true` selects every visible row, `false` clears the selection
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || checkbox_state(selected_count.get(), row_count.get()));
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = matches!(state.get(), CheckboxState::Indeterminate);
        if let Some(input) = checkbox_ref.get() {
            if let Some(el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(state.get(), CheckboxState::Checked)
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
