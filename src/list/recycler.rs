//! Row Recycler
//!
//! Maps visible row indices to a small, stable set of slot ids. A row that
//! stays in the window keeps its slot across scrolls; slots of rows that
//! left the window are handed to rows that entered it. Renderers key row
//! elements by slot, so element state is reused instead of rebuilt.

use std::ops::Range;

use ahash::AHashMap;

#[derive(Debug, Default)]
pub struct RowRecycler {
    assigned: AHashMap<usize, usize>,
    free: Vec<usize>,
    next_slot: usize,
}

impl RowRecycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign slots to `window`; returns `(index, slot)` in index order
    pub fn update(&mut self, window: Range<usize>) -> Vec<(usize, usize)> {
        let leaving: Vec<usize> = self
            .assigned
            .keys()
            .copied()
            .filter(|index| !window.contains(index))
            .collect();
        for index in leaving {
            if let Some(slot) = self.assigned.remove(&index) {
                self.free.push(slot);
            }
        }

        window
            .map(|index| {
                let slot = match self.assigned.get(&index) {
                    Some(slot) => *slot,
                    None => {
                        let slot = self.free.pop().unwrap_or_else(|| {
                            self.next_slot += 1;
                            self.next_slot - 1
                        });
                        self.assigned.insert(index, slot);
                        slot
                    }
                };
                (index, slot)
            })
            .collect()
    }

    /// Slots ever allocated
    pub fn slot_count(&self) -> usize {
        self.next_slot
    }

    /// Forget all assignments (record set replaced)
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.free.clear();
        self.next_slot = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_rows_keep_slots_while_visible() {
        let mut recycler = RowRecycler::new();
        let first = recycler.update(0..10);
        assert_eq!(recycler.slot_count(), 10);

        let second = recycler.update(3..13);
        for (index, slot) in &second {
            if *index < 10 {
                assert_eq!(first[*index].1, *slot);
            }
        }
        // rows 0..3 left, 10..13 reused their slots
        assert_eq!(recycler.slot_count(), 10);
        let slots: HashSet<usize> = second.iter().map(|(_, slot)| *slot).collect();
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn test_slots_bounded_by_window_size() {
        let mut recycler = RowRecycler::new();
        for start in (0..1000).step_by(7) {
            recycler.update(start..start + 15);
        }
        assert_eq!(recycler.slot_count(), 15);
        // scrolling back reuses the same slots
        let back = recycler.update(0..15);
        assert!(back.iter().all(|(_, slot)| *slot < 15));
        assert_eq!(recycler.slot_count(), 15);
    }

    #[test]
    fn test_reset() {
        let mut recycler = RowRecycler::new();
        recycler.update(0..5);
        recycler.reset();
        assert_eq!(recycler.slot_count(), 0);
        assert_eq!(recycler.update(100..102), vec![(100, 0), (101, 1)]);
    }
}
