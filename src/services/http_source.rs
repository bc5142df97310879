//! HTTP Record Source
//!
//! `GET <endpoint>?page=&limit=&search=&sortBy=&sortOrder=&<filters>` returning
//! `{ "players" | "records": [...], "total", "page", "hasMore" }`.

use std::marker::PhantomData;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;

use super::source::RecordSource;
use crate::domain::query::{FetchQuery, FetchResult};
use crate::error::{Error, Result};

/// Paged JSON endpoint
pub struct HttpSource<R> {
    client: reqwest::Client,
    endpoint: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> HttpSource<R> {
    /// Source for `endpoint`; `timeout` bounds each request at the transport
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.into();
        if reqwest::Url::parse(&endpoint).is_err() {
            return Err(Error::Invalid {
                message: format!("invalid endpoint url: {endpoint}"),
            });
        }
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            _marker: PhantomData,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Query-string pairs for `query`
pub fn query_params(query: &FetchQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_string(), query.page.to_string()),
        ("limit".to_string(), query.limit.to_string()),
    ];
    let search = query.search.trim();
    if !search.is_empty() {
        params.push(("search".to_string(), search.to_string()));
    }
    if let Some(sort_by) = &query.sort_by {
        params.push(("sortBy".to_string(), sort_by.clone()));
        params.push(("sortOrder".to_string(), query.sort_order.as_str().to_string()));
    }
    for (key, value) in &query.filters {
        let value = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        };
        params.push((key.clone(), value));
    }
    params
}

async fn fetch_page<R: DeserializeOwned>(
    client: reqwest::Client,
    endpoint: String,
    query: FetchQuery,
) -> Result<FetchResult<R>> {
    let response = client
        .get(&endpoint)
        .query(&query_params(&query))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match body.trim() {
            "" => status.canonical_reason().unwrap_or("request failed").to_string(),
            body => body.chars().take(200).collect(),
        };
        return Err(Error::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl<R> RecordSource<R> for HttpSource<R>
where
    R: DeserializeOwned + Send + 'static,
{
    fn fetch(&self, query: FetchQuery) -> BoxFuture<'static, anyhow::Result<FetchResult<R>>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let page = query.page;
            tracing::debug!("GET {} page {}", endpoint, page);
            fetch_page(client, endpoint, query)
                .await
                .map_err(|e| anyhow::Error::new(e).context(format!("loading page {page}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::player::Player;
    use crate::domain::query::SortOrder;
    use crate::loader::classify::{ErrorKind, classify};

    #[test]
    fn test_query_params() {
        let mut filters = BTreeMap::new();
        filters.insert("position".to_string(), serde_json::json!(["C", "SS"]));
        filters.insert("class".to_string(), serde_json::json!(2026));
        filters.insert("ignored".to_string(), serde_json::Value::Null);
        let query = FetchQuery {
            page: 2,
            limit: 25,
            search: "  reed ".to_string(),
            filters,
            sort_by: Some("gpa".to_string()),
            sort_order: SortOrder::Desc,
        };

        let params = query_params(&query);
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("page"), Some("2"));
        assert_eq!(get("limit"), Some("25"));
        assert_eq!(get("search"), Some("reed"));
        assert_eq!(get("sortBy"), Some("gpa"));
        assert_eq!(get("sortOrder"), Some("desc"));
        assert_eq!(get("position"), Some("C,SS"));
        assert_eq!(get("class"), Some("2026"));
        assert_eq!(get("ignored"), None);
    }

    #[test]
    fn test_blank_search_and_unsorted_omitted() {
        let params = query_params(&FetchQuery::default());
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(HttpSource::<Player>::new("not a url", None).is_err());
        let source = HttpSource::<Player>::new("http://localhost:9/players", None).expect("source");
        assert_eq!(source.endpoint(), "http://localhost:9/players");
    }

    #[tokio::test]
    async fn test_unreachable_server_classifies_as_network() {
        // port 9 (discard) is closed on test hosts
        let source = HttpSource::<Player>::new(
            "http://127.0.0.1:9/players",
            Some(Duration::from_secs(5)),
        )
        .expect("source");
        let err = source
            .fetch(FetchQuery::default())
            .await
            .expect_err("connection refused");
        let kind = classify(err).kind;
        assert!(
            matches!(kind, ErrorKind::Network | ErrorKind::Timeout),
            "{kind}"
        );
    }
}
