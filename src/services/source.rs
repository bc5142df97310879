//! Record Source - Injected Fetch Capability
//!
//! The loader is transport-agnostic: anything that can turn a [`FetchQuery`]
//! into a page of records can drive it.

use std::future::Future;

use futures::future::BoxFuture;

use crate::domain::query::{FetchQuery, FetchResult};

/// Asynchronous page fetcher
///
/// Failures are reported as `anyhow::Error` so any transport's error type can
/// flow into the classifier unchanged.
pub trait RecordSource<R>: Send + Sync + 'static {
    fn fetch(&self, query: FetchQuery) -> BoxFuture<'static, anyhow::Result<FetchResult<R>>>;
}

/// Source backed by a closure, see [`source_fn`]
#[derive(Clone)]
pub struct FnSource<F> {
    f: F,
}

/// Wrap an async closure as a [`RecordSource`]
///
/// ```ignore
/// let source = source_fn(|query: FetchQuery| async move {
///     Ok(FetchResult { records: vec![], total: 0, page: query.page, has_more: false })
/// });
/// ```
pub fn source_fn<F>(f: F) -> FnSource<F> {
    FnSource { f }
}

impl<R, F, Fut> RecordSource<R> for FnSource<F>
where
    F: Fn(FetchQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<FetchResult<R>>> + Send + 'static,
{
    fn fetch(&self, query: FetchQuery) -> BoxFuture<'static, anyhow::Result<FetchResult<R>>> {
        Box::pin((self.f)(query))
    }
}
