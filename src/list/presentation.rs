//! Presentation Policy
//!
//! Decides which screen the list shows for a loader snapshot. Renderers
//! only draw the chosen [`Screen`]; custom loading/error/empty views replace
//! the visuals, never this decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::loader::cache::CacheEntry;
use crate::loader::classify::ClassifiedError;
use crate::loader::controller::{LoadSnapshot, LoadState};
use crate::utils::format::{Age, age_of};

pub const CONNECTION_LOST_TITLE: &str = "Connection Lost";
pub const LOAD_FAILED_TITLE: &str = "Failed to Load Players";
pub const RETRIES_EXHAUSTED_MESSAGE: &str =
    "Maximum retry attempts reached. Please try again later.";

/// Inputs besides the snapshot
#[derive(Debug, Clone)]
pub struct PresentationContext<'a> {
    /// Skeleton rows while the first page loads
    pub page_size: u32,
    /// Client-side search text
    pub search: &'a str,
    /// Client-side filters are active
    pub filters_active: bool,
    /// Records left after the client-side pipeline
    pub visible_len: usize,
    pub now: DateTime<Utc>,
}

/// Retry control offered on the error screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAffordance {
    /// Retry button; `attempt` retries already made
    Available {
        attempt: u32,
        max: u32,
        retrying: bool,
    },
    /// Budget spent: show [`RETRIES_EXHAUSTED_MESSAGE`]
    Exhausted,
    /// Error is not retryable
    NotOffered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyKind {
    /// Search matched nothing
    NoResults { query: String },
    /// Filters matched nothing
    Filtered,
    /// The source holds no records at all
    NoData,
}

#[derive(Debug, Clone)]
pub enum Screen<R> {
    /// Placeholder rows during the first load
    Skeleton { rows: usize },
    /// Load failed; showing the last cached result
    CachedFallback {
        entry: Arc<CacheEntry<R>>,
        /// `None` when the timestamp is unusable
        age: Option<Age>,
        /// "Showing cached data from 10m ago"
        banner: String,
        /// The cached rows were narrowed to nothing
        empty: Option<EmptyKind>,
    },
    Error {
        title: &'static str,
        message: String,
        network: bool,
        retry: RetryAffordance,
    },
    Empty {
        kind: EmptyKind,
        /// A failure whose held records were all narrowed away
        stale_error: Option<ClassifiedError>,
    },
    /// The windowed list
    List {
        /// A later page or a refresh is in flight
        loading_more: bool,
        /// A failure that left the held records visible
        stale_error: Option<ClassifiedError>,
    },
}

/// Pick the screen for `snapshot`
pub fn present<R>(snapshot: &LoadSnapshot<R>, ctx: &PresentationContext<'_>) -> Screen<R> {
    let has_records = !snapshot.records.is_empty();

    match snapshot.state {
        LoadState::Loading if !has_records => {
            return Screen::Skeleton {
                rows: ctx.page_size as usize,
            };
        }
        LoadState::Error if !has_records => {
            if snapshot.cached_records().is_some()
                && let Some(entry) = &snapshot.cached
            {
                let age = entry.captured_at().map(|at| age_of(at, ctx.now));
                let words = age.as_ref().map_or_else(|| "earlier".to_string(), Age::to_string);
                return Screen::CachedFallback {
                    entry: entry.clone(),
                    banner: format!("Showing cached data from {words}"),
                    age,
                    empty: (ctx.visible_len == 0).then(|| empty_kind(snapshot, ctx)),
                };
            }
            return error_screen(snapshot);
        }
        LoadState::Idle | LoadState::Success | LoadState::Error if ctx.visible_len == 0 => {
            return Screen::Empty {
                kind: empty_kind(snapshot, ctx),
                stale_error: match snapshot.state {
                    LoadState::Error => snapshot.error.clone(),
                    _ => None,
                },
            };
        }
        _ => {}
    }

    Screen::List {
        loading_more: snapshot.state == LoadState::Loading,
        stale_error: match snapshot.state {
            LoadState::Error => snapshot.error.clone(),
            _ => None,
        },
    }
}

fn error_screen<R>(snapshot: &LoadSnapshot<R>) -> Screen<R> {
    let Some(error) = snapshot.error.as_ref() else {
        return Screen::Empty {
            kind: EmptyKind::NoData,
            stale_error: None,
        };
    };
    let retry = if snapshot.can_retry() {
        RetryAffordance::Available {
            attempt: snapshot.retry_count,
            max: snapshot.max_retries,
            retrying: snapshot.retrying,
        }
    } else if snapshot.retries_exhausted() {
        RetryAffordance::Exhausted
    } else {
        RetryAffordance::NotOffered
    };
    Screen::Error {
        title: if error.is_network() {
            CONNECTION_LOST_TITLE
        } else {
            LOAD_FAILED_TITLE
        },
        message: error.message.clone(),
        network: error.is_network(),
        retry,
    }
}

fn empty_kind<R>(snapshot: &LoadSnapshot<R>, ctx: &PresentationContext<'_>) -> EmptyKind {
    let search = match ctx.search.trim() {
        "" => snapshot.query.search.trim(),
        search => search,
    };
    if !search.is_empty() {
        EmptyKind::NoResults {
            query: search.to_string(),
        }
    } else if ctx.filters_active || !snapshot.query.filters.is_empty() {
        EmptyKind::Filtered
    } else {
        EmptyKind::NoData
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::TimeZone;

    use super::*;
    use crate::domain::config::ListConfig;
    use crate::domain::player::Player;
    use crate::domain::query::{FetchQuery, FetchResult};
    use crate::loader::cache::CacheStore;
    use crate::loader::controller::LoadController;
    use crate::loader::store::{KeyValueStore, MemoryStore};
    use crate::services::source::source_fn;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("time")
    }

    fn ctx(visible_len: usize) -> PresentationContext<'static> {
        PresentationContext {
            page_size: 10,
            search: "",
            filters_active: false,
            visible_len,
            now: now(),
        }
    }

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn failing(message: &'static str) -> LoadController<Player> {
        LoadController::builder(ListConfig::default())
            .source(source_fn(move |_: FetchQuery| async move {
                Err::<FetchResult<Player>, _>(anyhow::anyhow!(message))
            }))
            .build()
    }

    #[tokio::test]
    async fn test_failed_to_fetch_shows_connection_lost_with_retry() {
        let controller = failing("Failed to fetch");
        controller.start().await;

        match present(&controller.snapshot(), &ctx(0)) {
            Screen::Error {
                title,
                network,
                retry,
                ..
            } => {
                assert_eq!(title, CONNECTION_LOST_TITLE);
                assert!(network);
                assert_eq!(
                    retry,
                    RetryAffordance::Available {
                        attempt: 0,
                        max: 3,
                        retrying: false
                    }
                );
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_result_without_query_is_no_data() {
        let controller = LoadController::builder(ListConfig::default())
            .source(source_fn(|_: FetchQuery| async move {
                Ok(FetchResult::<Player>::empty())
            }))
            .build();
        controller.start().await;

        let screen = present(&controller.snapshot(), &ctx(0));
        assert!(
            matches!(
                screen,
                Screen::Empty {
                    kind: EmptyKind::NoData,
                    stale_error: None
                }
            ),
            "{screen:?}"
        );
    }

    #[test]
    fn test_empty_kinds_follow_narrowing() {
        let controller = LoadController::builder(ListConfig::default())
            .initial_records(vec![player("a")])
            .build();
        let snapshot = controller.snapshot();

        let searching = PresentationContext {
            search: " zed ",
            ..ctx(0)
        };
        assert_eq!(
            match present(&snapshot, &searching) {
                Screen::Empty { kind, .. } => kind,
                other => panic!("unexpected screen {other:?}"),
            },
            EmptyKind::NoResults {
                query: "zed".to_string()
            }
        );

        let filtering = PresentationContext {
            filters_active: true,
            ..ctx(0)
        };
        assert!(matches!(
            present(&snapshot, &filtering),
            Screen::Empty {
                kind: EmptyKind::Filtered,
                stale_error: None
            }
        ));

        assert!(matches!(
            present(&snapshot, &ctx(1)),
            Screen::List {
                loading_more: false,
                stale_error: None
            }
        ));
    }

    #[tokio::test]
    async fn test_cached_fallback_banner() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cached: Vec<Player> = (0..8).map(|i| player(&i.to_string())).collect();
        CacheStore::new(store.clone(), "player_list_cache")
            .write_at(&cached, now() - chrono::Duration::minutes(10))
            .expect("seeded");

        let controller = LoadController::builder(ListConfig::default())
            .store(store)
            .source(source_fn(|_: FetchQuery| async move {
                Err::<FetchResult<Player>, _>(anyhow::anyhow!("HTTP 500"))
            }))
            .build();
        controller.start().await;

        match present(&controller.snapshot(), &ctx(0)) {
            Screen::CachedFallback {
                entry,
                age,
                banner,
                empty,
            } => {
                assert_eq!(entry.records.len(), 8);
                assert_eq!(age, Some(Age::Minutes(10)));
                assert_eq!(banner, "Showing cached data from 10m ago");
                assert_eq!(empty, None);
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_with_records_narrowed_to_nothing_keeps_error() {
        let calls = Arc::new(AtomicBool::new(false));
        let calls_clone = calls.clone();
        let controller = LoadController::builder(ListConfig::default())
            .source(source_fn(move |_: FetchQuery| {
                let failed_before = calls_clone.swap(true, Ordering::SeqCst);
                async move {
                    if failed_before {
                        Err(anyhow::anyhow!("Failed to fetch"))
                    } else {
                        Ok(FetchResult {
                            records: vec![player("a"), player("b")],
                            total: 2,
                            page: 1,
                            has_more: false,
                        })
                    }
                }
            }))
            .build();
        controller.start().await;
        controller.refresh().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, LoadState::Error);
        assert_eq!(snapshot.records.len(), 2);

        let filtering = PresentationContext {
            filters_active: true,
            ..ctx(0)
        };
        match present(&snapshot, &filtering) {
            Screen::Empty { kind, stale_error } => {
                assert_eq!(kind, EmptyKind::Filtered);
                let error = stale_error.expect("error kept");
                assert!(error.is_network());
            }
            other => panic!("unexpected screen {other:?}"),
        }

        // rows still visible: the list with its banner
        assert!(matches!(
            present(&snapshot, &PresentationContext { filters_active: true, ..ctx(1) }),
            Screen::List {
                stale_error: Some(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cached_rows_narrowed_to_nothing() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        CacheStore::new(store.clone(), "player_list_cache")
            .write_at(&[player("a")], now())
            .expect("seeded");
        let controller = LoadController::builder(ListConfig::default())
            .store(store)
            .source(source_fn(|_: FetchQuery| async move {
                Err::<FetchResult<Player>, _>(anyhow::anyhow!("HTTP 500"))
            }))
            .build();
        controller.start().await;

        let searching = PresentationContext {
            search: "zed",
            ..ctx(0)
        };
        match present(&controller.snapshot(), &searching) {
            Screen::CachedFallback { age, empty, .. } => {
                assert_eq!(age, Some(Age::JustNow));
                assert_eq!(
                    empty,
                    Some(EmptyKind::NoResults {
                        query: "zed".to_string()
                    })
                );
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_hide_retry() {
        let controller = failing("HTTP 500");
        controller.start().await;
        for _ in 0..3 {
            assert!(controller.retry().await);
        }

        match present(&controller.snapshot(), &ctx(0)) {
            Screen::Error { title, retry, .. } => {
                assert_eq!(title, LOAD_FAILED_TITLE);
                assert_eq!(retry, RetryAffordance::Exhausted);
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_error_offers_no_retry() {
        let controller = failing("validation failed");
        controller.start().await;
        match present(&controller.snapshot(), &ctx(0)) {
            Screen::Error { retry, message, .. } => {
                assert_eq!(retry, RetryAffordance::NotOffered);
                assert_eq!(message, "Invalid request. Please check your filters.");
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_loading_states() {
        let release = Arc::new(AtomicBool::new(false));
        let release_clone = release.clone();
        let controller = LoadController::builder(ListConfig::default())
            .source(source_fn(move |query: FetchQuery| {
                let release = release_clone.clone();
                async move {
                    while !release.load(Ordering::SeqCst) {
                        tokio::task::yield_now().await;
                    }
                    Ok(FetchResult {
                        records: vec![player(&query.page.to_string())],
                        total: 2,
                        page: query.page,
                        has_more: query.page < 2,
                    })
                }
            }))
            .build();

        let loader = controller.clone();
        let first = tokio::spawn(async move { loader.start().await });
        tokio::task::yield_now().await;
        while controller.state() != LoadState::Loading {
            tokio::task::yield_now().await;
        }
        assert!(matches!(
            present(&controller.snapshot(), &ctx(0)),
            Screen::Skeleton { rows: 10 }
        ));
        release.store(true, Ordering::SeqCst);
        first.await.expect("join");

        assert!(matches!(
            present(&controller.snapshot(), &ctx(1)),
            Screen::List {
                loading_more: false,
                ..
            }
        ));
    }
}
