use crate::shared::event_bus::{HandlerRegistration, HandlerSet};
use std::cell::Cell;
use std::rc::Rc;

/// Action without arguments (create, export)
#[derive(Clone)]
pub struct Command {
    run: Rc<dyn Fn()>,
}

impl Command {
    pub fn new(run: impl Fn() + 'static) -> Self {
        Self { run: Rc::new(run) }
    }

    pub fn execute(&self) {
        (self.run)();
    }
}

struct ButtonInner {
    label: String,
    visible: Cell<bool>,
    enabled: Cell<bool>,
    clicks: HandlerSet<()>,
}

/// Delete button of the action bar.
///
/// Starts hidden; the table shows it while the selection is non-empty and
/// disables it while a delete request is outstanding.
#[derive(Clone)]
pub struct DeleteButton {
    inner: Rc<ButtonInner>,
}

impl DeleteButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ButtonInner {
                label: label.into(),
                visible: Cell::new(false),
                enabled: Cell::new(true),
                clicks: HandlerSet::new(),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn is_visible(&self) -> bool {
        self.inner.visible.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.inner.visible.set(visible);
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.set(enabled);
    }

    pub fn add_click_handler(&self, handler: impl Fn(&()) + 'static) -> HandlerRegistration {
        self.inner.clicks.add(handler)
    }

    pub fn click_handler_count(&self) -> usize {
        self.inner.clicks.len()
    }

    /// User click; ignored while hidden or disabled
    pub fn click(&self) {
        if self.is_visible() && self.is_enabled() {
            self.inner.clicks.dispatch(&());
        }
    }
}
