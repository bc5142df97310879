//! Selection Overlay
//!
//! Selected record ids, kept independently of windowing and of the
//! filtered view: scrolling or re-filtering never drops a selection.

use ahash::AHashSet;

use crate::domain::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: AHashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `id`; returns whether it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids no longer present in `records` (after a full reload)
    pub fn retain_present<R: Record>(&mut self, records: &[R]) {
        let present: AHashSet<&str> = records.iter().map(|r| r.id()).collect();
        self.ids.retain(|id| present.contains(id.as_str()));
    }

    /// Selected ids, unordered
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Player;

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_and_set() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(selection.is_selected("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());

        selection.set("b", true);
        selection.set("b", true);
        assert_eq!(selection.count(), 1);
        selection.set("b", false);
        assert_eq!(selection.count(), 0);
    }

    #[test]
    fn test_retain_present() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle("gone");
        selection.retain_present(&[player("a"), player("b")]);
        assert!(selection.is_selected("a"));
        assert!(!selection.is_selected("gone"));
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.is_selected("a"));
        // ids can be selected again afterwards
        assert!(selection.toggle("a"));
    }
}
