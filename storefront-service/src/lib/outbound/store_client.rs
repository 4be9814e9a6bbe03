//! Client for the external store's PostgREST interface.
//!
//! Every table lives under `<url>/rest/v1/<table>`. Requests carry the
//! project key twice, as `apikey` and as a bearer token. Filters travel as
//! query parameters built by [`StoreQuery`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::domain::errors::StoreError;
use crate::domain::health::StoreProbe;

const REST_PATH: &str = "rest/v1";

/// Shared handle to the external store.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client with the key headers and the request timeout applied.
    ///
    /// # Errors
    /// * `Unavailable` - The key is not a valid header value or the HTTP client failed to build
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Unavailable(format!("Invalid API key format: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::Unavailable(format!("Invalid API key format: {e}")))?;

        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                base_url: config.url.trim_end_matches('/').to_string(),
            }),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.inner.base_url, REST_PATH, table)
    }

    /// Read rows from `table` matching `query`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &StoreQuery,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.table_url(table))
            .query(query.params())
            .send()
            .await
            .map_err(transport_error)?;

        read_rows(response).await
    }

    /// Insert one row and return the stored representation.
    ///
    /// # Errors
    /// * `Empty` - The store accepted the insert but returned no row
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(transport_error)?;

        read_rows::<T>(response)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::Empty)
    }
}

#[async_trait]
impl StoreProbe for SupabaseClient {
    async fn ping(&self) -> Result<(), StoreError> {
        let query = StoreQuery::new().select("id").limit(1);
        self.select::<serde_json::Value>("users", &query).await?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Unavailable(e.to_string())
    }
}

async fn read_rows<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>, StoreError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "Store rejected request");
        return Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<Vec<T>>().await.map_err(|e| {
        if e.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Decode(e.to_string())
        }
    })
}

/// PostgREST errors carry a JSON body with a `message` field.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Query-string builder for PostgREST filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreQuery {
    params: Vec<(String, String)>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return, `*` when never called.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Exact match: `column=eq.value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring match on any of `columns`.
    ///
    /// Wildcard characters in `term` are dropped so it only matches literally.
    pub fn ilike_any(mut self, columns: &[&str], term: &str) -> Self {
        let literal: String = term.chars().filter(|c| !matches!(c, '*' | '%')).collect();
        let pattern = quote(&format!("*{literal}*"));
        let filters = columns
            .iter()
            .map(|column| format!("{column}.ilike.{pattern}"))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push(("or".to_string(), format!("({filters})")));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Double-quote a filter value so commas and parentheses in it stay literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
