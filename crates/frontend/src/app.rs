use crate::domain::a001_card_entity::ui::list::CardEntityList;
use crate::shared::event_bus::{AdminEvent, EventBus};
use crate::system::auth::{use_auth, AuthProvider};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let bus = EventBus::new();

    // Details and create forms are hosted elsewhere; the shell only traces
    // the requests it would route. Lives as long as the page.
    let _ = bus.subscribe(|event| match event {
        AdminEvent::CreateRequested(kind) => log::info!("create requested: {}", kind),
        AdminEvent::ViewRequested { kind, id } => log::info!("view requested: {} {}", kind, id),
        _ => {}
    });

    let bus = StoredValue::new_local(bus);

    view! {
        <AuthProvider>
            <CardEntityPage bus=bus />
        </AuthProvider>
    }
}

/// Waits for the session restore, then builds the list for that viewer
#[component]
fn CardEntityPage(bus: StoredValue<EventBus, LocalStorage>) -> impl IntoView {
    let auth = use_auth();

    move || {
        let state = auth.get();
        if !state.resolved {
            return view! { <div class="page__loading">"Loading..."</div> }.into_any();
        }
        view! { <CardEntityList bus=bus.get_value() auth=state /> }.into_any()
    }
}
