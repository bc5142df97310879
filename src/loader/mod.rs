//! Loader - Fetch, Retry and Cache
//!
//! Everything between a [`RecordSource`](crate::services::source::RecordSource)
//! and the list pipeline. No GPUI types in here.

pub mod backoff;
pub mod cache;
pub mod classify;
pub mod controller;
pub mod store;

pub use backoff::RetryPolicy;
pub use cache::{CacheEntry, CacheStore};
pub use classify::{ClassifiedError, ErrorKind, classify};
pub use controller::{LoadController, LoadControllerBuilder, LoadSnapshot, LoadState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
