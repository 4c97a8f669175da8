//! HTTP transport for the cost backend.
//!
//! Plain request/response: no retries, no caching and no timeout beyond the
//! reqwest defaults. Every call either yields decoded entities or a
//! [`ClientError`].

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use costview_core::{CostRecord, CostSummary};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Operations the cost backend exposes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CostApi: Send + Sync {
    /// `GET /costs` - every record, unpaginated
    async fn list_costs(&self) -> ClientResult<Vec<CostRecord>>;

    /// `GET /costs/summary`
    async fn get_summary(&self) -> ClientResult<CostSummary>;

    /// `GET /costs/provider/{provider}`
    async fn list_costs_by_provider(&self, provider: &str) -> ClientResult<Vec<CostRecord>>;

    /// `GET /costs/service/{service}`
    async fn list_costs_by_service(&self, service: &str) -> ClientResult<Vec<CostRecord>>;

    /// `GET /costs/{id}`
    async fn get_cost(&self, id: i64) -> ClientResult<CostRecord>;

    /// `GET /costs/date-range?startDate=..&endDate=..` with ISO-8601 bounds
    async fn list_costs_by_date_range(&self, start: &str, end: &str)
        -> ClientResult<Vec<CostRecord>>;

    /// `DELETE /costs/{id}`
    async fn delete_cost(&self, id: i64) -> ClientResult<()>;
}

/// [`CostApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCostClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpCostClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let raw = config.base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(raw.to_string()));
        }

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Client for the backend named by `COSTVIEW_API_URL`.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_records(&self, url: Url) -> ClientResult<Vec<CostRecord>> {
        let items: Vec<Value> = self.get_json(url).await?;
        Ok(decode_records(items))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let response = ensure_success(response, &url).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Decode a record list element by element. Elements that do not decode
/// (e.g. no usable `id`) are skipped with a warning so one bad row cannot
/// take down the whole list.
fn decode_records(items: Vec<Value>) -> Vec<CostRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed cost record at index {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Turn a non-2xx response into [`ClientError::Status`].
async fn ensure_success(response: Response, url: &Url) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}

/// Map a 404 on a by-id call to [`ClientError::NotFound`].
fn not_found_for(id: i64) -> impl FnOnce(ClientError) -> ClientError {
    move |err| match err {
        ClientError::Status { status: 404, .. } => ClientError::NotFound { id },
        other => other,
    }
}

#[async_trait]
impl CostApi for HttpCostClient {
    async fn list_costs(&self) -> ClientResult<Vec<CostRecord>> {
        let url = self.endpoint(&["costs"])?;
        self.get_records(url).await
    }

    async fn get_summary(&self) -> ClientResult<CostSummary> {
        let url = self.endpoint(&["costs", "summary"])?;
        self.get_json(url).await
    }

    async fn list_costs_by_provider(&self, provider: &str) -> ClientResult<Vec<CostRecord>> {
        let url = self.endpoint(&["costs", "provider", provider])?;
        self.get_records(url).await
    }

    async fn list_costs_by_service(&self, service: &str) -> ClientResult<Vec<CostRecord>> {
        let url = self.endpoint(&["costs", "service", service])?;
        self.get_records(url).await
    }

    async fn get_cost(&self, id: i64) -> ClientResult<CostRecord> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["costs", id_segment.as_str()])?;
        self.get_json(url).await.map_err(not_found_for(id))
    }

    async fn list_costs_by_date_range(
        &self,
        start: &str,
        end: &str,
    ) -> ClientResult<Vec<CostRecord>> {
        let mut url = self.endpoint(&["costs", "date-range"])?;
        url.query_pairs_mut()
            .append_pair("startDate", start)
            .append_pair("endDate", end);
        self.get_records(url).await
    }

    async fn delete_cost(&self, id: i64) -> ClientResult<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["costs", id_segment.as_str()])?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url.clone()).send().await?;
        ensure_success(response, &url)
            .await
            .map(|_| ())
            .map_err(not_found_for(id))
    }
}
