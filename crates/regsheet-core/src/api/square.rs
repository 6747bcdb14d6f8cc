//! API client for the Square Orders and Catalog endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::SquareEnvironment;
use crate::models::{CatalogObject, Order};

use super::error::square_error_message;
use super::{ApiError, CatalogSource, OrderSource, Partial, RemoteError};

// ============================================================================
// Constants
// ============================================================================

const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";
const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";

/// API version pinned via the `Square-Version` header
const SQUARE_VERSION: &str = "2024-10-17";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct SearchOrdersRequest<'a> {
    location_ids: &'a [String],
    limit: u32,
}

#[derive(Debug, Default, Deserialize)]
struct SearchOrdersResponse {
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    errors: Vec<RemoteError>,
}

#[derive(Debug, Serialize)]
struct BatchRetrieveRequest<'a> {
    object_ids: &'a [String],
    catalog_version: i64,
}

#[derive(Debug, Default, Deserialize)]
struct BatchRetrieveResponse {
    #[serde(default)]
    objects: Vec<CatalogObject>,
    #[serde(default)]
    errors: Vec<RemoteError>,
}

/// Responses that may carry an `errors` array next to their data
trait ErrorPayload {
    fn errors(&self) -> &[RemoteError];
}

impl ErrorPayload for SearchOrdersResponse {
    fn errors(&self) -> &[RemoteError] {
        &self.errors
    }
}

impl ErrorPayload for BatchRetrieveResponse {
    fn errors(&self) -> &[RemoteError] {
        &self.errors
    }
}

/// Square API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SquareClient {
    client: Client,
    base_url: String,
    token: String,
}

impl SquareClient {
    pub fn new(environment: SquareEnvironment, token: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url = match environment {
            SquareEnvironment::Production => PRODUCTION_BASE_URL,
            SquareEnvironment::Sandbox => SANDBOX_BASE_URL,
        };

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token,
        })
    }

    /// Point the client at a different host (proxies, local stubs)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// POST a JSON body, attempting the request exactly once.
    ///
    /// A non-2xx response whose body still parses into `R` with a non-empty
    /// `errors` array is returned as data; anything else is an `ApiError`.
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + ErrorPayload,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Square-Version", SQUARE_VERSION)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(url = %url, status = %status, "Square response received");

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e)));
        }

        match serde_json::from_str::<R>(&text) {
            Ok(parsed) if !parsed.errors().is_empty() => Ok(parsed),
            _ => Err(ApiError::from_status(status, &square_error_message(&text))),
        }
    }
}

#[async_trait]
impl OrderSource for SquareClient {
    async fn search_orders(&self, location_ids: &[String], limit: u32) -> Result<Partial<Order>, ApiError> {
        let request = SearchOrdersRequest { location_ids, limit };
        let response: SearchOrdersResponse = self.post("/v2/orders/search", &request).await?;
        Ok(Partial {
            items: response.orders,
            errors: response.errors,
        })
    }
}

#[async_trait]
impl CatalogSource for SquareClient {
    async fn batch_get(&self, object_ids: &[String], catalog_version: i64) -> Result<Partial<CatalogObject>, ApiError> {
        let request = BatchRetrieveRequest {
            object_ids,
            catalog_version,
        };
        let response: BatchRetrieveResponse = self.post("/v2/catalog/batch-retrieve", &request).await?;
        Ok(Partial {
            items: response.objects,
            errors: response.errors,
        })
    }
}
