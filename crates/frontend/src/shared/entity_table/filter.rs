use super::config::FilterField;
use contracts::shared::list::FilterCriterion;
use std::cell::RefCell;
use std::rc::Rc;

type ApplyHandler = Rc<dyn Fn(Vec<FilterCriterion>)>;

struct PanelInner {
    fields: Vec<FilterField>,
    values: RefCell<Vec<String>>,
    on_apply: RefCell<Option<ApplyHandler>>,
}

/// Filter form state of one entity list.
///
/// Built by the table from the entity's filter fields and bound to its
/// query; `apply` pushes the current values to the table.
#[derive(Clone)]
pub struct FilterPanel {
    inner: Rc<PanelInner>,
}

impl FilterPanel {
    pub fn new(fields: Vec<FilterField>) -> Self {
        let values = vec![String::new(); fields.len()];
        Self {
            inner: Rc::new(PanelInner {
                fields,
                values: RefCell::new(values),
                on_apply: RefCell::new(None),
            }),
        }
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.inner.fields
    }

    fn position(&self, property: &str) -> Option<usize> {
        self.inner.fields.iter().position(|f| f.property == property)
    }

    /// Unknown properties are ignored
    pub fn set_value(&self, property: &str, value: impl Into<String>) {
        if let Some(i) = self.position(property) {
            self.inner.values.borrow_mut()[i] = value.into();
        }
    }

    pub fn value(&self, property: &str) -> String {
        self.position(property)
            .map(|i| self.inner.values.borrow()[i].clone())
            .unwrap_or_default()
    }

    pub fn criteria(&self) -> Vec<FilterCriterion> {
        let values = self.inner.values.borrow();
        self.inner
            .fields
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(f, v)| FilterCriterion {
                property: f.property.to_string(),
                value: v.trim().to_string(),
            })
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.criteria().len()
    }

    pub(crate) fn set_on_apply(&self, handler: impl Fn(Vec<FilterCriterion>) + 'static) {
        *self.inner.on_apply.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn apply(&self) {
        let handler = self.inner.on_apply.borrow().clone();
        if let Some(handler) = handler {
            handler(self.criteria());
        }
    }

    /// Resets every field and applies the empty filter
    pub fn clear(&self) {
        for v in self.inner.values.borrow_mut().iter_mut() {
            v.clear();
        }
        self.apply();
    }
}
