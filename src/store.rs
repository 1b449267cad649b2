//! # Label Record Store
//!
//! The ordered list of labels. Order is insertion order and is the order
//! labels appear on the sheet.
//!
//! Out-of-range indices are ignored rather than reported: a stale index
//! from a UI that has not caught up with a deletion must never corrupt the
//! list. Each operation returns whether anything changed so callers can
//! skip persistence on no-ops.

use crate::label::LabelRecord;

/// In-memory ordered label list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStore {
    labels: Vec<LabelRecord>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: Vec<LabelRecord>) -> Self {
        Self { labels }
    }

    /// Append a label. Duplicates are allowed.
    pub fn add(&mut self, label: LabelRecord) {
        self.labels.push(label);
    }

    /// Replace the label at `index`. Returns `false` if out of range.
    pub fn update(&mut self, index: usize, label: LabelRecord) -> bool {
        match self.labels.get_mut(index) {
            Some(slot) => {
                *slot = label;
                true
            }
            None => false,
        }
    }

    /// Remove the label at `index`, shifting later labels down.
    /// Returns the removed label, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<LabelRecord> {
        if index < self.labels.len() {
            Some(self.labels.remove(index))
        } else {
            None
        }
    }

    /// Remove every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Replace the whole list.
    pub fn replace(&mut self, labels: Vec<LabelRecord>) {
        self.labels = labels;
    }

    pub fn get(&self, index: usize) -> Option<&LabelRecord> {
        self.labels.get(index)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[LabelRecord] {
        &self.labels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelRecord> {
        self.labels.iter()
    }
}

impl<'a> IntoIterator for &'a LabelStore {
    type Item = &'a LabelRecord;
    type IntoIter = std::slice::Iter<'a, LabelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn charizard() -> LabelRecord {
        LabelRecord::new("1999 Base Set", "Charizard")
            .variation("Holo")
            .card_number("#4")
            .grade("MINT", "9")
    }

    #[test]
    fn test_add_to_empty() {
        let mut store = LabelStore::new();
        store.add(charizard());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(&charizard()));
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut store = LabelStore::new();
        store.add(charizard());
        store.add(charizard());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_in_range() {
        let mut store = LabelStore::from_labels(vec![charizard()]);
        let pikachu = LabelRecord::new("", "Pikachu");
        assert!(store.update(0, pikachu.clone()));
        assert_eq!(store.as_slice(), &[pikachu]);
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let mut store = LabelStore::from_labels(vec![charizard()]);
        let before = store.clone();
        assert!(!store.update(1, LabelRecord::new("", "Pikachu")));
        assert!(!store.update(usize::MAX, LabelRecord::default()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_shifts_down() {
        let mut store = LabelStore::from_labels(vec![
            LabelRecord::new("", "A"),
            LabelRecord::new("", "B"),
            LabelRecord::new("", "C"),
        ]);
        assert_eq!(store.remove(1), Some(LabelRecord::new("", "B")));
        let names: Vec<_> = store.iter().map(|l| l.player_line.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_twice_on_single_element() {
        let mut store = LabelStore::from_labels(vec![charizard()]);
        assert!(store.remove(0).is_some());
        assert!(store.remove(0).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = LabelStore::from_labels(vec![charizard(), charizard()]);
        store.clear();
        assert!(store.is_empty());
    }
}
