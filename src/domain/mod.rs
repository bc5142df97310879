//! Domain - Pure Data Structures and Protocol Types
//!
//! These types don't depend on GPUI and represent the business domain.

pub mod config;
pub mod player;
pub mod query;
pub mod record;

pub use config::{AppConfig, ListConfig, SourceConfig, SourceKind};
pub use player::{CommitmentStatus, Player, PlayerField};
pub use query::{FetchQuery, FetchResult, SortOrder};
pub use record::{FieldValue, Record};
