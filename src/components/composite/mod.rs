//! Composite Components
//!
//! Components assembled from primitives: the windowed list, its toolbar and
//! the status screens shown in place of it.

pub mod filter_bar;
pub mod status;
pub mod virtual_list;

pub use filter_bar::{FilterBar, SortChip};
pub use status::{Banner, EmptyState, ErrorState, SkeletonList};
pub use virtual_list::{RowContext, RowRenderer, VirtualList, VirtualListEvent};
