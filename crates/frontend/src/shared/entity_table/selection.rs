use super::config::TableEntity;

/// Selected records in the order the user picked them.
///
/// Mutated only by row-selection gestures and cleared on every data refresh.
pub struct SelectionSet<E: TableEntity> {
    items: Vec<E>,
}

impl<E: TableEntity> Default for SelectionSet<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: TableEntity> SelectionSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.items.iter().any(|e| &e.id() == id)
    }

    /// Returns true when the set changed
    pub fn set_selected(&mut self, record: &E, selected: bool) -> bool {
        let id = record.id();
        let present = self.contains(&id);
        match (selected, present) {
            (true, false) => {
                self.items.push(record.clone());
                true
            }
            (false, true) => {
                self.items.retain(|e| e.id() != id);
                true
            }
            _ => false,
        }
    }

    /// Adds every record not selected yet; returns true when the set changed
    pub fn select_all<'a>(&mut self, records: impl IntoIterator<Item = &'a E>) -> bool {
        let mut changed = false;
        for record in records {
            changed |= self.set_selected(record, true);
        }
        changed
    }

    /// Returns true when the set was not empty
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<E::Id> {
        self.items.iter().map(|e| e.id()).collect()
    }
}
