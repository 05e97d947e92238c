use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel frame.
///
/// The header carries the title, the active filter badge and the pagination
/// slot; the form goes into `filter_content`.
#[component]
pub fn FilterPanelView(
    #[prop(into)]
    title: String,

    is_expanded: RwSignal<bool>,

    #[prop(into)]
    active_filters_count: Signal<usize>,

    #[prop(into)]
    pagination_controls: ViewFn,

    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">{title}</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {children()}
                </div>
            </div>
        </div>
    }
}
