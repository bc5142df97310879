//! List - Pipeline, Windowing and Interaction
//!
//! Renderer-neutral list logic. The GPUI view in
//! `components::composite::virtual_list` is one consumer of it.

pub mod actions;
pub mod pipeline;
pub mod policy;
pub mod presentation;
pub mod recycler;
pub mod selection;
pub mod viewport;

pub use actions::{ListCallbacks, RowAction, RowActions};
pub use pipeline::{Facet, FilterState, ListQuery, SortState, apply, facets};
pub use policy::{Dimension, RecordPolicy, SortRule, player_policy};
pub use presentation::{EmptyKind, PresentationContext, RetryAffordance, Screen, present};
pub use recycler::RowRecycler;
pub use selection::Selection;
pub use viewport::{RecordSetChange, RowViewport, ScrollModel};
