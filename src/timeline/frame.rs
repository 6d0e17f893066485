use std::collections::HashMap;

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    timeline::display::{DisplayListItem, PlaceObject},
};

/// One frame: ordered display-list items plus a name index of the placements it opens.
#[derive(Debug, Default)]
pub struct Frame {
    items: Vec<DisplayListItem>,
    instances: HashMap<String, usize>,
    label: Option<String>,
}

impl Frame {
    /// Display-list items in execution order.
    pub fn items(&self) -> &[DisplayListItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when the frame has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Frame label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set or clear the frame label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Named placement opened in this frame.
    pub fn instance(&self, name: &str) -> Option<&PlaceObject> {
        let idx = *self.instances.get(name)?;
        match &self.items[idx] {
            DisplayListItem::Place(p) => Some(p),
            DisplayListItem::Remove(_) => None,
        }
    }

    /// Names of placements opened in this frame, sorted.
    pub fn instance_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.instances.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn push(&mut self, item: DisplayListItem) -> WeaveResult<()> {
        if let Some(name) = item.instance_name() {
            if self.instances.contains_key(name) {
                return Err(WeaveError::internal(
                    "frame.duplicate_instance",
                    format!("instance name '{name}' is already open in this frame"),
                ));
            }
            self.instances.insert(name.to_owned(), self.items.len());
        }
        self.items.push(item);
        Ok(())
    }

    /// Delete the items at `indices` (any order, duplicates allowed) and rebuild the name index.
    pub(crate) fn remove_at(&mut self, indices: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for idx in sorted.into_iter().rev() {
            if idx < self.items.len() {
                self.items.remove(idx);
            }
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.instances.clear();
        for (idx, item) in self.items.iter().enumerate() {
            if let Some(name) = item.instance_name() {
                self.instances.insert(name.to_owned(), idx);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frame.rs"]
mod tests;
