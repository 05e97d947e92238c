//! Typed publish/subscribe channel for cross-component admin notifications.
//!
//! The bus is created once by the app shell and handed to every widget that
//! needs it; there is no global instance. Everything runs on the UI thread,
//! so handlers live in `Rc<RefCell<..>>` slots.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Which entity list an event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKind(pub &'static str);

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Closed set of notifications exchanged through the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    /// Open the create form for an entity
    CreateRequested(EntityKind),
    /// Open the details form for one record
    ViewRequested { kind: EntityKind, id: String },
    /// The list must reload from the server
    ListRefreshRequested(EntityKind),
    /// Row selection changed; `count` is the new selection size
    SelectionChanged { kind: EntityKind, count: usize },
}

type Handler<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Ordered list of handlers for one source of values (bus, button clicks).
pub struct HandlerSet<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Clone for HandlerSet<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: 'static> Default for HandlerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> HandlerSet<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 1,
                handlers: Vec::new(),
            })),
        }
    }

    /// Adds a handler; it stays until the returned registration is removed.
    pub fn add(&self, handler: impl Fn(&T) + 'static) -> HandlerRegistration {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, Rc::new(handler)));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        HandlerRegistration::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.borrow_mut().handlers.retain(|(h, _)| *h != id);
            }
        })
    }

    /// Calls every handler registered at the moment of dispatch.
    ///
    /// Handlers may add or remove registrations (or dispatch again) while
    /// running; such changes apply to the next dispatch.
    pub fn dispatch(&self, value: &T) {
        let snapshot: Vec<Handler<T>> = self
            .slots
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle that detaches one handler from its `HandlerSet`.
///
/// Dropping the handle does NOT detach; call `remove_handler`.
pub struct HandlerRegistration {
    remove: Option<Box<dyn FnOnce()>>,
}

impl HandlerRegistration {
    fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    pub fn remove_handler(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

/// Event bus shared by the admin pages
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: HandlerSet<AdminEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&AdminEvent) + 'static) -> HandlerRegistration {
        self.handlers.add(handler)
    }

    pub fn fire(&self, event: AdminEvent) {
        log::debug!("event bus: {:?}", event);
        self.handlers.dispatch(&event);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Registrations owned by a widget for the time it is attached
#[derive(Default)]
pub struct SubscriptionRegistry {
    registrations: Vec<HandlerRegistration>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, registration: HandlerRegistration) {
        self.registrations.push(registration);
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Removes every handler, in registration order
    pub fn release_all(&mut self) {
        for registration in self.registrations.drain(..) {
            registration.remove_handler();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const KIND: EntityKind = EntityKind("test");

    #[test]
    fn test_fire_reaches_subscribers_in_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        let _r1 = bus.subscribe(move |_| l1.borrow_mut().push(1));
        let l2 = log.clone();
        let _r2 = bus.subscribe(move |_| l2.borrow_mut().push(2));

        bus.fire(AdminEvent::ListRefreshRequested(KIND));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_removed_handler_is_not_called() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let reg = bus.subscribe(move |_| h.set(h.get() + 1));

        bus.fire(AdminEvent::CreateRequested(KIND));
        reg.remove_handler();
        bus.fire(AdminEvent::CreateRequested(KIND));

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_handler_may_fire_while_dispatching() {
        let bus = EventBus::new();
        let refreshes = Rc::new(Cell::new(0));

        let inner_bus = bus.clone();
        let _create = bus.subscribe(move |e| {
            if matches!(e, AdminEvent::CreateRequested(_)) {
                inner_bus.fire(AdminEvent::ListRefreshRequested(KIND));
            }
        });
        let r = refreshes.clone();
        let _refresh = bus.subscribe(move |e| {
            if matches!(e, AdminEvent::ListRefreshRequested(_)) {
                r.set(r.get() + 1);
            }
        });

        bus.fire(AdminEvent::CreateRequested(KIND));
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_registry_release_all_empties_bus() {
        let bus = EventBus::new();
        let mut registry = SubscriptionRegistry::new();
        registry.add(bus.subscribe(|_| {}));
        registry.add(bus.subscribe(|_| {}));
        assert_eq!(registry.len(), 2);
        assert_eq!(bus.handler_count(), 2);

        registry.release_all();
        assert!(registry.is_empty());
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_removal_after_set_dropped_is_harmless() {
        let set: HandlerSet<()> = HandlerSet::new();
        let reg = set.add(|_| {});
        drop(set);
        reg.remove_handler();
    }
}
