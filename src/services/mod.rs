//! Service Layer
//!
//! Record sources and the tokio bridge the UI uses to drive them.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RecordSource<R> (trait)           │
//! │  ┌────────────┐ ┌────────────┐ ┌─────────┐  │
//! │  │ HttpSource │ │ DemoSource │ │source_fn│  │
//! │  └────────────┘ └────────────┘ └─────────┘  │
//! └─────────────────────────────────────────────┘
//!                       │ FetchResult / anyhow::Error
//!                       ▼
//!               loader::LoadController
//! ```

pub mod demo_source;
pub mod http_source;
pub mod runtime;
pub mod source;

pub use demo_source::{DemoSource, generate_players};
pub use http_source::HttpSource;
pub use runtime::run_in_tokio;
pub use source::{FnSource, RecordSource, source_fn};
