//! Ordered collection addressed by 1-based display indices.
//!
//! Every list in the tracker is an `IndexedList`. The off-by-one between the
//! index a user types and the storage position lives here and nowhere else:
//! callers pass display indices in and get display indices out.

use serde::{Deserialize, Serialize};

/// Insertion-ordered list whose entries are addressed by display index (1..=len)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct IndexedList<T> {
    items: Vec<T>,
}

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> IndexedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Storage slot for a display index, if it currently exists
    fn slot(&self, index: usize) -> Option<usize> {
        if index >= 1 && index <= self.items.len() {
            Some(index - 1)
        } else {
            None
        }
    }

    /// Whether `index` resolves to an entry
    pub fn contains(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    /// Append an entry and return its display index
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot(index).map(|slot| &self.items[slot])
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot(index)?;
        Some(&mut self.items[slot])
    }

    /// Remove the entry at `index`; every later entry moves down by one
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.slot(index).map(|slot| self.items.remove(slot))
    }

    /// Entries paired with their display index, in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().map(|(slot, item)| (slot + 1, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(slot, item)| (slot + 1, item))
    }
}

impl<T> FromIterator<T> for IndexedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Rewrite a reference held by a dependent list after `removed` was deleted
/// from the target list.
///
/// References past the removed position shift down by one. A reference to
/// `removed` itself must have been ruled out before the removal.
pub fn reindex_after_removal(reference: &mut usize, removed: usize) {
    debug_assert_ne!(*reference, removed, "dangling reference to removed entry");
    if *reference > removed {
        *reference -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> IndexedList<&'static str> {
        ["a", "b", "c"].into_iter().collect()
    }

    #[test]
    fn test_push_returns_display_index() {
        let mut list = IndexedList::new();
        assert_eq!(list.push("a"), 1);
        assert_eq!(list.push("b"), 2);
        assert_eq!(list.get(2), Some(&"b"));
    }

    #[test]
    fn test_zero_and_past_end_do_not_resolve() {
        let list = letters();
        assert!(!list.contains(0));
        assert!(list.contains(3));
        assert!(!list.contains(4));
        assert_eq!(list.get(0), None);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut list = letters();
        assert_eq!(list.remove(1), Some("a"));
        assert_eq!(list.get(1), Some(&"b"));
        assert_eq!(list.get(2), Some(&"c"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.remove(5), None);
    }

    #[test]
    fn test_iter_yields_display_indices() {
        let indices: Vec<usize> = letters().iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_reindex_after_removal() {
        let mut before = 1;
        let mut after = 4;
        reindex_after_removal(&mut before, 2);
        reindex_after_removal(&mut after, 2);
        assert_eq!(before, 1);
        assert_eq!(after, 3);
    }
}
