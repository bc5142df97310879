//! Load Controller
//!
//! State machine that drives a [`RecordSource`]:
//!
//! ```text
//!            load()                 ok
//!   Idle ───────────▶ Loading ──────────────▶ Success
//!                       ▲   │                    │
//!              retry()  │   │ err                │ search / filter / sort
//!                       │   ▼                    │
//!                      Error ◀───────────────────┘ (via Loading)
//! ```
//!
//! The controller exclusively owns the live record collection. Readers get
//! immutable [`LoadSnapshot`]s. Every request carries a sequence number and
//! only the most recently issued request may settle the state; a slow earlier
//! response can never overwrite a faster later one.

use std::sync::Arc;
use std::time::Duration;

use ahash::AHashSet;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backoff::RetryPolicy;
use super::cache::{CacheEntry, CacheStore};
use super::classify::{ClassifiedError, classify};
use super::store::KeyValueStore;
use crate::domain::config::ListConfig;
use crate::domain::query::{FetchQuery, FetchResult, SortOrder};
use crate::domain::record::Record;
use crate::error::Error;
use crate::services::source::RecordSource;

/// Loader state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

type SuccessCallback<R> = Arc<dyn Fn(&FetchResult<R>) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&ClassifiedError) + Send + Sync>;

/// Immutable view of the controller at one point in time
#[derive(Debug, Clone)]
pub struct LoadSnapshot<R> {
    pub state: LoadState,
    /// Live records (stale-but-visible after a failure)
    pub records: Arc<Vec<R>>,
    pub total: u64,
    pub page: u32,
    pub has_more: bool,
    pub error: Option<ClassifiedError>,
    pub retry_count: u32,
    pub max_retries: u32,
    /// A retry is waiting out its backoff or in flight
    pub retrying: bool,
    pub cache_enabled: bool,
    /// Last cached result set, if any
    pub cached: Option<Arc<CacheEntry<R>>>,
    /// Base query (search/filters/sort) of the current result
    pub query: FetchQuery,
}

impl<R> LoadSnapshot<R> {
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// The retry budget is used up while in the error state
    pub fn retries_exhausted(&self) -> bool {
        self.state == LoadState::Error && self.retry_count >= self.max_retries
    }

    /// Whether the UI should offer a retry control
    pub fn can_retry(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.retryable) && self.retry_count < self.max_retries
    }

    /// Cached records, when caching is on and the cache is non-empty
    pub fn cached_records(&self) -> Option<&CacheEntry<R>> {
        self.cached
            .as_deref()
            .filter(|entry| self.cache_enabled && !entry.records.is_empty())
    }
}

struct Machine<R> {
    state: LoadState,
    records: Arc<Vec<R>>,
    total: u64,
    page: u32,
    has_more: bool,
    error: Option<ClassifiedError>,
    retry_count: u32,
    retrying: bool,
    base_query: FetchQuery,
    last_request: Option<(FetchQuery, bool)>,
    latest_seq: u64,
    cached: Option<Arc<CacheEntry<R>>>,
}

struct Inner<R> {
    source: Option<Arc<dyn RecordSource<R>>>,
    cache: Option<CacheStore<R>>,
    policy: RetryPolicy,
    request_timeout: Option<Duration>,
    on_load_success: Option<SuccessCallback<R>>,
    on_error: Option<ErrorCallback>,
    machine: Mutex<Machine<R>>,
}

/// Builder for [`LoadController`]
pub struct LoadControllerBuilder<R> {
    config: ListConfig,
    source: Option<Arc<dyn RecordSource<R>>>,
    store: Option<Arc<dyn KeyValueStore>>,
    initial_records: Option<Vec<R>>,
    on_load_success: Option<SuccessCallback<R>>,
    on_error: Option<ErrorCallback>,
}

impl<R> LoadControllerBuilder<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    /// Set the fetch capability
    pub fn source(mut self, source: impl RecordSource<R>) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Set the persistence backing the cache
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Start in `Success` with caller-supplied records
    pub fn initial_records(mut self, records: Vec<R>) -> Self {
        self.initial_records = Some(records);
        self
    }

    pub fn on_load_success(mut self, f: impl Fn(&FetchResult<R>) + Send + Sync + 'static) -> Self {
        self.on_load_success = Some(Arc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&ClassifiedError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Build the controller; reads the cache once
    pub fn build(self) -> LoadController<R> {
        let config = self.config;
        let cache = match (config.enable_cache, self.store) {
            (true, Some(store)) => Some(CacheStore::new(store, config.cache_key.clone())),
            _ => None,
        };
        let cached = cache.as_ref().and_then(CacheStore::read).map(Arc::new);
        if let Some(entry) = &cached {
            tracing::debug!("Loaded {} cached records", entry.records.len());
        }

        let base_query = FetchQuery {
            limit: config.effective_page_size(),
            ..Default::default()
        };

        let (state, records) = match self.initial_records {
            Some(records) => (LoadState::Success, records),
            None => (LoadState::Idle, Vec::new()),
        };

        LoadController {
            inner: Arc::new(Inner {
                source: self.source,
                cache,
                policy: RetryPolicy::new(config.retry_delay(), config.max_retries),
                request_timeout: config.request_timeout(),
                on_load_success: self.on_load_success,
                on_error: self.on_error,
                machine: Mutex::new(Machine {
                    state,
                    total: records.len() as u64,
                    records: Arc::new(records),
                    page: 1,
                    has_more: false,
                    error: None,
                    retry_count: 0,
                    retrying: false,
                    base_query,
                    last_request: None,
                    latest_seq: 0,
                    cached,
                }),
            }),
        }
    }
}

/// Resilient loader for one list
///
/// Cheap to clone; clones share state.
pub struct LoadController<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for LoadController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R> LoadController<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    pub fn builder(config: ListConfig) -> LoadControllerBuilder<R> {
        LoadControllerBuilder {
            config,
            source: None,
            store: None,
            initial_records: None,
            on_load_success: None,
            on_error: None,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> LoadSnapshot<R> {
        let m = self.inner.machine.lock();
        LoadSnapshot {
            state: m.state,
            records: m.records.clone(),
            total: m.total,
            page: m.page,
            has_more: m.has_more,
            error: m.error.clone(),
            retry_count: m.retry_count,
            max_retries: self.inner.policy.max_retries,
            retrying: m.retrying,
            cache_enabled: self.inner.cache.is_some(),
            cached: m.cached.clone(),
            query: m.base_query.clone(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.inner.machine.lock().state
    }

    pub fn has_source(&self) -> bool {
        self.inner.source.is_some()
    }

    /// Initial load; only runs from `Idle`
    pub async fn start(&self) {
        let query = {
            let m = self.inner.machine.lock();
            if m.state != LoadState::Idle {
                return;
            }
            m.base_query.clone()
        };
        self.load(query, false).await;
    }

    /// Fetch `query`, replacing the records or appending to them.
    ///
    /// Never fails: the outcome lands in the state and the callbacks.
    pub async fn load(&self, query: FetchQuery, append: bool) {
        let Some(source) = self.inner.source.clone() else {
            tracing::debug!("load ignored: no record source configured");
            return;
        };

        let seq = {
            let mut m = self.inner.machine.lock();
            m.latest_seq += 1;
            m.state = LoadState::Loading;
            m.error = None;
            m.last_request = Some((query.clone(), append));
            m.latest_seq
        };
        tracing::debug!(
            "Request #{} page {} (append: {}, search: {:?})",
            seq,
            query.page,
            append,
            query.search
        );

        let outcome = match query.validate() {
            Ok(()) => self.fetch(source, query.clone()).await,
            Err(e) => Err(anyhow::Error::new(e)),
        };

        match outcome {
            Ok(result) => self.settle_success(seq, &query, append, result),
            Err(e) => self.settle_failure(seq, e),
        }
    }

    async fn fetch(
        &self,
        source: Arc<dyn RecordSource<R>>,
        query: FetchQuery,
    ) -> anyhow::Result<FetchResult<R>> {
        let request = source.fetch(query);
        match self.inner.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::Error::new(Error::Timeout {
                    message: format!("request timed out after {}s", limit.as_secs()),
                })),
            },
            None => request.await,
        }
    }

    fn settle_success(&self, seq: u64, query: &FetchQuery, append: bool, mut result: FetchResult<R>) {
        let limit = query.limit as usize;
        if result.records.len() > limit {
            tracing::warn!(
                "Source returned {} records for limit {}; truncating",
                result.records.len(),
                limit
            );
            result.records.truncate(limit);
        }

        let records = {
            let mut m = self.inner.machine.lock();
            if seq != m.latest_seq {
                tracing::debug!("Discarding stale response #{} (latest #{})", seq, m.latest_seq);
                return;
            }

            let merged = if append {
                let mut seen: AHashSet<String> =
                    m.records.iter().map(|r| r.id().to_string()).collect();
                let mut merged = Vec::with_capacity(m.records.len() + result.records.len());
                merged.extend(m.records.iter().cloned());
                merged.extend(
                    result
                        .records
                        .iter()
                        .filter(|r| seen.insert(r.id().to_string()))
                        .cloned(),
                );
                merged
            } else {
                result.records.clone()
            };

            m.records = Arc::new(merged);
            m.total = result.total;
            m.has_more = result.has_more;
            m.page = query.page;
            m.state = LoadState::Success;
            m.error = None;
            m.retry_count = 0;
            m.records.clone()
        };
        tracing::info!(
            "Loaded page {} ({} records held, {} total)",
            query.page,
            records.len(),
            result.total
        );

        if let Some(cache) = &self.inner.cache
            && let Some(entry) = cache.write(&records)
        {
            let mut m = self.inner.machine.lock();
            if seq == m.latest_seq {
                m.cached = Some(Arc::new(entry));
            }
        }

        if let Some(callback) = &self.inner.on_load_success {
            callback(&result);
        }
    }

    fn settle_failure(&self, seq: u64, error: anyhow::Error) {
        let classified = classify(error);
        {
            let mut m = self.inner.machine.lock();
            if seq != m.latest_seq {
                tracing::debug!("Discarding stale failure #{} (latest #{})", seq, m.latest_seq);
                return;
            }
            m.state = LoadState::Error;
            m.error = Some(classified.clone());
        }
        tracing::warn!(
            "Load failed ({}, retryable: {}): {}",
            classified.kind,
            classified.retryable,
            classified
                .cause
                .as_ref()
                .map(|c| format!("{c:#}"))
                .unwrap_or_else(|| classified.message.clone())
        );

        if let Some(callback) = &self.inner.on_error {
            callback(&classified);
        }
    }

    /// Retry the last request after an exponential backoff.
    ///
    /// Only runs from `Error`. Returns `false` without doing anything when
    /// the budget is spent, the error is not retryable, a retry is already
    /// pending, or there is nothing to retry.
    pub async fn retry(&self) -> bool {
        let (delay, query, append, attempt) = {
            let mut m = self.inner.machine.lock();
            if m.state != LoadState::Error {
                return false;
            }
            if m.retrying || !self.inner.policy.allows(m.retry_count) {
                return false;
            }
            if m.error.as_ref().is_some_and(|e| !e.retryable) {
                return false;
            }
            let Some((query, append)) = m.last_request.clone() else {
                return false;
            };
            let delay = self.inner.policy.delay_for(m.retry_count);
            m.retry_count += 1;
            m.retrying = true;
            (delay, query, append, m.retry_count)
        };
        tracing::info!(
            "Retrying in {}ms (attempt {}/{})",
            delay.as_millis(),
            attempt,
            self.inner.policy.max_retries
        );

        tokio::time::sleep(delay).await;
        self.load(query, append).await;

        self.inner.machine.lock().retrying = false;
        true
    }

    /// Fetch the next page and append it; only when more pages exist and
    /// nothing is loading
    pub async fn load_more(&self) -> bool {
        let query = {
            let m = self.inner.machine.lock();
            if !m.has_more || m.state == LoadState::Loading {
                return false;
            }
            m.base_query.with_page(m.page + 1)
        };
        self.load(query, true).await;
        true
    }

    /// Change query parameters and reload from page 1
    pub async fn update_query(&self, change: impl FnOnce(&mut FetchQuery) + Send) {
        let query = {
            let mut m = self.inner.machine.lock();
            change(&mut m.base_query);
            m.base_query.page = 1;
            m.base_query.clone()
        };
        self.load(query, false).await;
    }

    pub async fn set_search(&self, search: impl Into<String> + Send) {
        let search = search.into();
        self.update_query(move |q| q.search = search).await;
    }

    pub async fn set_filters(
        &self,
        filters: std::collections::BTreeMap<String, serde_json::Value>,
    ) {
        self.update_query(move |q| q.filters = filters).await;
    }

    pub async fn set_sort(&self, sort_by: Option<String>, sort_order: SortOrder) {
        self.update_query(move |q| {
            q.sort_by = sort_by;
            q.sort_order = sort_order;
        })
        .await;
    }

    /// Reload the current query from page 1 without touching the retry budget
    pub async fn refresh(&self) {
        self.update_query(|_| {}).await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::player::Player;
    use crate::loader::classify::ErrorKind;
    use crate::loader::store::MemoryStore;
    use crate::services::source::source_fn;

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            full_name: format!("Player {id}"),
            grad_year: 2026,
            primary_position: "SS".to_string(),
            ..Default::default()
        }
    }

    fn page(ids: &[&str], page: u32, has_more: bool) -> FetchResult<Player> {
        FetchResult {
            records: ids.iter().map(|id| player(id)).collect(),
            total: 100,
            page,
            has_more,
        }
    }

    enum Step {
        Ok(FetchResult<Player>),
        Fail(&'static str),
        Hang,
    }

    /// Source answering with scripted steps, one per call
    fn scripted(steps: Vec<Step>) -> (impl RecordSource<Player>, Arc<AtomicUsize>) {
        let steps = Arc::new(Mutex::new(VecDeque::from(steps)));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let source = source_fn(move |_query: FetchQuery| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            let step = steps.lock().pop_front();
            async move {
                match step {
                    Some(Step::Ok(result)) => Ok(result),
                    Some(Step::Fail(message)) => Err(anyhow::anyhow!(message)),
                    Some(Step::Hang) => {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        Ok(FetchResult::empty())
                    }
                    None => Err(anyhow::anyhow!("script exhausted")),
                }
            }
        });
        (source, calls)
    }

    fn config() -> ListConfig {
        ListConfig {
            retry_delay_ms: 1000,
            max_retries: 3,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_without_source_is_noop() {
        let controller = LoadController::<Player>::builder(config()).build();
        controller.load(FetchQuery::default(), false).await;
        assert_eq!(controller.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_success_updates_state_cache_and_callback() {
        let (source, _) = scripted(vec![Step::Ok(page(&["a", "b"], 1, true))]);
        let store = Arc::new(MemoryStore::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let controller = LoadController::builder(config())
            .source(source)
            .store(store.clone())
            .on_load_success(move |result: &FetchResult<Player>| {
                seen_clone.store(result.records.len(), Ordering::SeqCst);
            })
            .build();

        controller.start().await;

        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Success);
        assert_eq!(snap.records.len(), 2);
        assert_eq!(snap.total, 100);
        assert!(snap.has_more);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        let cached = snap.cached.expect("cache written");
        assert_eq!(cached.records.len(), 2);
        assert!(store.get("player_list_cache").expect("get").is_some());
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_records_and_fires_callback() {
        let (source, _) = scripted(vec![
            Step::Ok(page(&["a"], 1, false)),
            Step::Fail("Failed to fetch"),
        ]);
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let kinds_clone = kinds.clone();
        let controller = LoadController::builder(config())
            .source(source)
            .on_error(move |e: &ClassifiedError| kinds_clone.lock().push(e.kind))
            .build();

        controller.start().await;
        controller.set_search("zed").await;

        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Error);
        assert_eq!(snap.records.len(), 1);
        let error = snap.error.expect("error stored");
        assert_eq!(error.kind, ErrorKind::Network);
        assert!(error.retryable);
        assert_eq!(*kinds.lock(), vec![ErrorKind::Network]);
        assert_eq!(snap.query.search, "zed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_backoff_doubles_and_stops_at_budget() {
        let (source, calls) = scripted(vec![
            Step::Fail("HTTP 500"),
            Step::Fail("HTTP 500"),
            Step::Fail("HTTP 500"),
            Step::Fail("HTTP 500"),
        ]);
        let controller = LoadController::builder(config()).source(source).build();
        controller.start().await;

        for (n, expected_ms) in [(1u32, 1000u64), (2, 2000), (3, 4000)] {
            let started = tokio::time::Instant::now();
            assert!(controller.retry().await);
            assert_eq!(started.elapsed(), Duration::from_millis(expected_ms));
            let snap = controller.snapshot();
            assert_eq!(snap.retry_count, n);
            assert_eq!(snap.state, LoadState::Error);
        }

        let snap = controller.snapshot();
        assert!(snap.retries_exhausted());
        assert!(!snap.can_retry());
        assert!(!controller.retry().await);
        assert_eq!(controller.snapshot().retry_count, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_retry_resets_counter() {
        let (source, _) = scripted(vec![
            Step::Fail("request timed out"),
            Step::Ok(page(&["a"], 1, false)),
        ]);
        let controller = LoadController::builder(config()).source(source).build();
        controller.start().await;
        assert_eq!(controller.snapshot().error.map(|e| e.kind), Some(ErrorKind::Timeout));

        assert!(controller.retry().await);
        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Success);
        assert_eq!(snap.retry_count, 0);
        assert!(!snap.retrying);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_only_runs_from_error() {
        let (source, calls) = scripted(vec![Step::Ok(page(&["a"], 1, false))]);
        let controller = LoadController::builder(config()).source(source).build();

        // nothing issued yet
        assert!(!controller.retry().await);

        controller.start().await;
        assert_eq!(controller.state(), LoadState::Success);
        assert!(!controller.retry().await);

        let snap = controller.snapshot();
        assert_eq!(snap.retry_count, 0);
        assert!(!snap.retrying);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let (source, calls) = scripted(vec![Step::Fail("validation failed: grad_year")]);
        let controller = LoadController::builder(config()).source(source).build();
        controller.start().await;

        let snap = controller.snapshot();
        assert_eq!(snap.error.as_ref().map(|e| e.kind), Some(ErrorKind::Validation));
        assert!(!snap.can_retry());
        assert!(!controller.retry().await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let source = source_fn(|query: FetchQuery| async move {
            let (delay, ids) = if query.search == "slow" {
                (500, vec!["slow-1"])
            } else {
                (10, vec!["fast-1", "fast-2"])
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(FetchResult {
                records: ids.into_iter().map(player).collect(),
                total: 2,
                page: query.page,
                has_more: false,
            })
        });
        let successes = Arc::new(AtomicUsize::new(0));
        let successes_clone = successes.clone();
        let controller = LoadController::builder(config())
            .source(source)
            .on_load_success(move |_: &FetchResult<Player>| {
                successes_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        let slow = FetchQuery {
            search: "slow".to_string(),
            ..Default::default()
        };
        let fast = FetchQuery {
            search: "fast".to_string(),
            ..Default::default()
        };
        tokio::join!(controller.load(slow, false), controller.load(fast, false));

        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Success);
        let ids: Vec<_> = snap.records.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["fast-1", "fast-2"]);
        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_more_appends_and_dedupes() {
        let (source, calls) = scripted(vec![
            Step::Ok(page(&["a", "b"], 1, true)),
            Step::Ok(page(&["b", "c"], 2, false)),
        ]);
        let controller = LoadController::builder(config()).source(source).build();
        controller.start().await;

        assert!(controller.load_more().await);
        let snap = controller.snapshot();
        let ids: Vec<_> = snap.records.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(snap.page, 2);
        assert!(!snap.has_more);

        // no more pages
        assert!(!controller.load_more().await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_query_changes_accumulate_and_restart_paging() {
        let queries = Arc::new(Mutex::new(Vec::<FetchQuery>::new()));
        let seen = queries.clone();
        let source = source_fn(move |query: FetchQuery| {
            let page_no = query.page;
            seen.lock().push(query);
            async move { Ok::<_, anyhow::Error>(page(&["a", "b"], page_no, true)) }
        });
        let controller = LoadController::builder(config()).source(source).build();
        controller.start().await;
        assert!(controller.load_more().await);
        assert_eq!(controller.snapshot().page, 2);

        let mut filters = std::collections::BTreeMap::new();
        filters.insert("position".to_string(), serde_json::json!(["SS"]));
        controller.set_filters(filters.clone()).await;
        controller
            .set_sort(Some("sixty_time".to_string()), SortOrder::Asc)
            .await;

        let queries = queries.lock();
        let last = queries.last().expect("queries issued");
        assert_eq!(queries.len(), 4);
        assert_eq!(last.page, 1);
        assert_eq!(last.filters, filters);
        assert_eq!(last.sort_by.as_deref(), Some("sixty_time"));
        assert_eq!(last.sort_order, SortOrder::Asc);

        let snap = controller.snapshot();
        assert_eq!(snap.page, 1);
        assert_eq!(snap.query.filters, filters);
        assert_eq!(snap.query.sort_by.as_deref(), Some("sixty_time"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_never_leaves_loading() {
        let (source, _) = scripted(vec![Step::Hang]);
        let controller = LoadController::builder(ListConfig {
            request_timeout_secs: 5,
            ..config()
        })
        .source(source)
        .build();

        controller.start().await;
        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Error);
        assert_eq!(snap.error.map(|e| e.kind), Some(ErrorKind::Timeout));
    }

    #[tokio::test]
    async fn test_oversized_page_is_truncated() {
        let (source, _) = scripted(vec![Step::Ok(page(&["a", "b", "c"], 1, false))]);
        let controller = LoadController::builder(ListConfig {
            page_size: 2,
            ..config()
        })
        .source(source)
        .build();
        controller.start().await;
        assert_eq!(controller.snapshot().records.len(), 2);
    }

    #[tokio::test]
    async fn test_cache_read_at_build_and_disabled_cache() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        CacheStore::<Player>::new(store.clone(), "player_list_cache")
            .write(&[player("x")])
            .expect("seeded");

        let controller = LoadController::<Player>::builder(config())
            .store(store.clone())
            .build();
        let snap = controller.snapshot();
        assert_eq!(snap.cached_records().map(|e| e.records.len()), Some(1));

        let disabled = LoadController::<Player>::builder(ListConfig {
            enable_cache: false,
            ..config()
        })
        .store(store)
        .build();
        assert!(disabled.snapshot().cached_records().is_none());
    }

    #[tokio::test]
    async fn test_initial_records_start_in_success() {
        let controller = LoadController::builder(config())
            .initial_records(vec![player("a")])
            .build();
        let snap = controller.snapshot();
        assert_eq!(snap.state, LoadState::Success);
        assert_eq!(snap.records.len(), 1);
        // start() only runs from Idle
        controller.start().await;
        assert_eq!(controller.state(), LoadState::Success);
    }

    #[tokio::test]
    async fn test_invalid_query_is_a_validation_error() {
        let (source, calls) = scripted(vec![]);
        let controller = LoadController::builder(config()).source(source).build();
        controller
            .load(
                FetchQuery {
                    page: 0,
                    ..Default::default()
                },
                false,
            )
            .await;
        let snap = controller.snapshot();
        assert_eq!(snap.error.map(|e| e.kind), Some(ErrorKind::Validation));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
