//! Roster Controller
//!
//! Runs loader operations on the tokio runtime on behalf of the roster page.
//! While an operation is in flight the page re-reads the loader snapshot on
//! a short timer (so "Loading" and "Retrying..." show up), and once more when
//! it settles.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::{Either, select};
use gpui::Context;

use crate::domain::player::{Player, PlayerField};
use crate::domain::query::{FetchQuery, SortOrder};
use crate::features::roster::page::RosterPage;
use crate::list::pipeline::ListQuery;
use crate::loader::controller::{LoadController, LoadSnapshot};
use crate::services::runtime::run_in_tokio;

/// Interval between snapshot refreshes while an operation runs
const PROGRESS_INTERVAL_MS: u64 = 100;

/// Loader operations the page can trigger
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderOp {
    /// Initial load (only from idle)
    Start,
    /// Retry the failed request after backoff
    Retry,
    /// Append the next page
    LoadMore,
    /// Reload from page 1
    Refresh,
    /// Server-side search text
    Search(String),
    /// Server-side filter parameters
    Filters(BTreeMap<String, serde_json::Value>),
    /// Server-side sort field key and direction
    Sort(Option<String>, SortOrder),
    /// Replace search, filters and sort in one request
    Query {
        search: String,
        filters: BTreeMap<String, serde_json::Value>,
        sort_by: Option<String>,
        order: SortOrder,
    },
}

fn sort_params(query: &ListQuery<PlayerField>) -> (Option<String>, SortOrder) {
    match &query.sort {
        Some(sort) => (Some(sort.field.key().to_string()), sort.order),
        None => (None, FetchQuery::default().sort_order),
    }
}

impl LoaderOp {
    pub fn search_of(query: &ListQuery<PlayerField>) -> Self {
        LoaderOp::Search(query.search.trim().to_string())
    }

    pub fn filters_of(query: &ListQuery<PlayerField>) -> Self {
        LoaderOp::Filters(query.filters.to_params())
    }

    pub fn sort_of(query: &ListQuery<PlayerField>) -> Self {
        let (sort_by, order) = sort_params(query);
        LoaderOp::Sort(sort_by, order)
    }

    /// The whole client query as server parameters
    pub fn query_of(query: &ListQuery<PlayerField>) -> Self {
        let (sort_by, order) = sort_params(query);
        LoaderOp::Query {
            search: query.search.trim().to_string(),
            filters: query.filters.to_params(),
            sort_by,
            order,
        }
    }
}

/// Roster page controller
pub struct RosterController {
    loader: LoadController<Player>,
}

impl RosterController {
    pub fn new(loader: LoadController<Player>) -> Self {
        Self { loader }
    }

    pub fn snapshot(&self) -> LoadSnapshot<Player> {
        self.loader.snapshot()
    }

    pub fn has_source(&self) -> bool {
        self.loader.has_source()
    }

    /// Run `op` in the background and keep the page in sync with it
    pub fn dispatch(&self, op: LoaderOp, cx: &mut Context<RosterPage>) {
        let loader = self.loader.clone();
        tracing::debug!("Dispatching loader operation {:?}", op);

        let work = async move {
            match op {
                LoaderOp::Start => loader.start().await,
                LoaderOp::Retry => {
                    if !loader.retry().await {
                        tracing::debug!("Retry refused");
                    }
                }
                LoaderOp::LoadMore => {
                    loader.load_more().await;
                }
                LoaderOp::Refresh => loader.refresh().await,
                LoaderOp::Search(search) => loader.set_search(search).await,
                LoaderOp::Filters(filters) => loader.set_filters(filters).await,
                LoaderOp::Sort(sort_by, order) => loader.set_sort(sort_by, order).await,
                LoaderOp::Query {
                    search,
                    filters,
                    sort_by,
                    order,
                } => {
                    loader
                        .update_query(move |q| {
                            q.search = search;
                            q.filters = filters;
                            q.sort_by = sort_by;
                            q.sort_order = order;
                        })
                        .await
                }
            }
        };

        cx.spawn(async move |page, cx| {
            let mut work = std::pin::pin!(run_in_tokio(work));
            loop {
                let tick = cx
                    .background_executor()
                    .timer(Duration::from_millis(PROGRESS_INTERVAL_MS));
                match select(work.as_mut(), tick).await {
                    Either::Left(_) => break,
                    Either::Right(_) => {
                        if page.update(cx, |page, cx| page.sync(cx)).is_err() {
                            return;
                        }
                    }
                }
            }
            let _ = page.update(cx, |page, cx| page.sync(cx));
        })
        .detach();
    }
}
