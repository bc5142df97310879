//! Windowing Math
//!
//! Fixed-height rows: row `n` sits at `n * row_height`, the content is
//! `len * row_height` tall, and only rows intersecting the viewport (plus
//! `overscan` on each side) are materialized.

use std::ops::Range;

use crate::constants::SCROLL_TOP_THRESHOLD;

/// Window of rows to render, `[start_index, end_index)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowViewport {
    pub start_index: usize,
    pub end_index: usize,
    pub overscan: usize,
}

impl RowViewport {
    /// Window for `len` rows at `scroll_offset`
    pub fn compute(
        len: usize,
        row_height: f32,
        viewport_height: f32,
        scroll_offset: f32,
        overscan: usize,
    ) -> Self {
        if len == 0 || row_height <= 0.0 {
            return Self {
                overscan,
                ..Default::default()
            };
        }
        let (offset, row_height) = (f64::from(scroll_offset.max(0.0)), f64::from(row_height));
        let first = (offset / row_height).floor() as usize;
        let last = ((offset + f64::from(viewport_height.max(0.0))) / row_height).ceil() as usize;
        let end_index = last.saturating_add(overscan).min(len);
        let start_index = first.saturating_sub(overscan).min(end_index);
        Self {
            start_index,
            end_index,
            overscan,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Rows that can intersect a viewport, counting partial rows at both edges
pub fn viewport_rows(row_height: f32, viewport_height: f32) -> usize {
    if row_height <= 0.0 {
        return 0;
    }
    (f64::from(viewport_height.max(0.0)) / f64::from(row_height)).ceil() as usize + 1
}

pub fn total_height(len: usize, row_height: f32) -> f32 {
    len as f32 * row_height
}

pub fn row_offset(index: usize, row_height: f32) -> f32 {
    index as f32 * row_height
}

/// Clamp to `[0, max(0, total - viewport)]`
pub fn clamp_scroll(offset: f32, len: usize, row_height: f32, viewport_height: f32) -> f32 {
    let max = (total_height(len, row_height) - viewport_height).max(0.0);
    offset.clamp(0.0, max)
}

/// How a newly derived record set relates to the rows on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSetChange {
    /// A later page was added below the rows already shown
    Appended,
    /// A different set: new search/filter/sort, a page-1 reload, or the
    /// cached fallback
    Replaced,
}

impl RecordSetChange {
    /// Classify a change of the held records or the query; `page` is the
    /// last page the loader settled
    pub fn classify(query_changed: bool, from_cache: bool, page: u32) -> Self {
        if !query_changed && !from_cache && page > 1 {
            RecordSetChange::Appended
        } else {
            RecordSetChange::Replaced
        }
    }
}

/// Scroll position plus geometry of one list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollModel {
    offset: f32,
    row_height: f32,
    viewport_height: f32,
    overscan: usize,
}

impl ScrollModel {
    pub fn new(row_height: f32, viewport_height: f32, overscan: usize) -> Self {
        Self {
            offset: 0.0,
            row_height,
            viewport_height,
            overscan,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Scroll by `delta` pixels (positive = down); returns whether it moved
    pub fn scroll_by(&mut self, delta: f32, len: usize) -> bool {
        self.scroll_to(self.offset + delta, len)
    }

    pub fn scroll_to(&mut self, offset: f32, len: usize) -> bool {
        let clamped = clamp_scroll(offset, len, self.row_height, self.viewport_height);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0.0;
    }

    /// Follow a record-set change to `len` rows. Appends keep the offset,
    /// replacements return to the top. Returns whether row slots must be
    /// reassigned.
    pub fn apply_change(&mut self, change: RecordSetChange, len: usize) -> bool {
        match change {
            RecordSetChange::Appended => {
                self.scroll_to(self.offset, len);
                false
            }
            RecordSetChange::Replaced => {
                self.scroll_to_top();
                true
            }
        }
    }

    /// Resize; the offset is re-clamped for `len` rows
    pub fn set_viewport_height(&mut self, height: f32, len: usize) {
        self.viewport_height = height.max(0.0);
        self.scroll_to(self.offset, len);
    }

    pub fn window(&self, len: usize) -> RowViewport {
        RowViewport::compute(
            len,
            self.row_height,
            self.viewport_height,
            self.offset,
            self.overscan,
        )
    }

    /// Past the threshold a "back to top" control is offered
    pub fn show_scroll_top(&self) -> bool {
        self.offset > SCROLL_TOP_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_window_at_top() {
        let window = RowViewport::compute(1000, 120.0, 600.0, 0.0, 5);
        assert_eq!(window.range(), 0..10);
    }

    #[test]
    fn test_window_mid_scroll() {
        // rows 20..25 visible, 5 overscan each side
        let window = RowViewport::compute(1000, 120.0, 600.0, 2400.0, 5);
        assert_eq!(window.range(), 15..30);
        assert!(window.contains(15));
        assert!(!window.contains(30));
    }

    #[test]
    fn test_window_at_end_is_clamped() {
        let window = RowViewport::compute(30, 120.0, 600.0, 3000.0, 5);
        assert_eq!(window.end_index, 30);
        assert_eq!(window.start_index, 20);
    }

    #[test]
    fn test_zero_records_empty_window() {
        let window = RowViewport::compute(0, 120.0, 600.0, 500.0, 5);
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(-40.0, 100, 120.0, 600.0), 0.0);
        assert_eq!(clamp_scroll(1.0e9, 100, 120.0, 600.0), 11_400.0);
        // content shorter than the viewport never scrolls
        assert_eq!(clamp_scroll(50.0, 3, 120.0, 600.0), 0.0);
    }

    #[test]
    fn test_scroll_model() {
        let mut scroll = ScrollModel::new(120.0, 600.0, 5);
        assert!(!scroll.show_scroll_top());
        assert!(scroll.scroll_by(360.0, 100));
        assert!(scroll.show_scroll_top());
        assert!(scroll.scroll_by(-1000.0, 100));
        assert_eq!(scroll.offset(), 0.0);
        assert!(!scroll.scroll_by(-10.0, 100));

        scroll.scroll_to(11_400.0, 100);
        scroll.set_viewport_height(1200.0, 100);
        assert_eq!(scroll.offset(), 10_800.0);
    }

    #[test]
    fn test_record_set_change_classify() {
        // load-more settled page 3 with the query untouched
        assert_eq!(RecordSetChange::classify(false, false, 3), RecordSetChange::Appended);
        // search, filter or sort
        assert_eq!(RecordSetChange::classify(true, false, 3), RecordSetChange::Replaced);
        // refresh or first load
        assert_eq!(RecordSetChange::classify(false, false, 1), RecordSetChange::Replaced);
        assert_eq!(RecordSetChange::classify(false, true, 2), RecordSetChange::Replaced);
    }

    #[test]
    fn test_append_keeps_offset() {
        let mut scroll = ScrollModel::new(120.0, 600.0, 5);
        scroll.scroll_to(2400.0, 30);
        assert!(!scroll.apply_change(RecordSetChange::Appended, 60));
        assert_eq!(scroll.offset(), 2400.0);
        assert_eq!(scroll.window(60).range(), 15..30);
    }

    #[test]
    fn test_replacement_returns_to_top() {
        let mut scroll = ScrollModel::new(120.0, 600.0, 5);
        scroll.scroll_to(2400.0, 30);
        assert!(scroll.apply_change(RecordSetChange::Replaced, 30));
        assert_eq!(scroll.offset(), 0.0);
        assert!(!scroll.show_scroll_top());
    }

    #[test]
    fn test_shrinking_append_reclamps() {
        let mut scroll = ScrollModel::new(120.0, 600.0, 5);
        scroll.scroll_to(2400.0, 30);
        scroll.apply_change(RecordSetChange::Appended, 10);
        assert_eq!(scroll.offset(), 600.0);
    }

    proptest! {
        #[test]
        fn window_is_bounded(
            len in 0usize..5000,
            row_height in 10.0f32..200.0,
            viewport_height in 0.0f32..2000.0,
            offset in 0.0f32..1.0e6,
            overscan in 0usize..10,
        ) {
            let offset = clamp_scroll(offset, len, row_height, viewport_height);
            let window = RowViewport::compute(len, row_height, viewport_height, offset, overscan);
            prop_assert!(window.end_index <= len);
            prop_assert!(window.start_index <= window.end_index);
            prop_assert!(window.len() <= viewport_rows(row_height, viewport_height) + 2 * overscan);
        }

        #[test]
        fn sweeping_the_scroll_range_covers_every_row(
            len in 1usize..800,
            row_height in 10.0f32..200.0,
            viewport_height in 50.0f32..1500.0,
            overscan in 0usize..6,
        ) {
            let mut covered = vec![false; len];
            let max = clamp_scroll(f32::MAX, len, row_height, viewport_height);
            let mut offset = 0.0f32;
            loop {
                let window = RowViewport::compute(len, row_height, viewport_height, offset, overscan);
                for index in window.range() {
                    covered[index] = true;
                }
                if offset >= max {
                    break;
                }
                offset = (offset + viewport_height).min(max);
            }
            prop_assert!(covered.iter().all(|c| *c));
        }
    }
}
