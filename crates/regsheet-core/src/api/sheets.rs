//! Minimal client for the Google Sheets v4 values API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::report::SheetValues;

use super::ApiError;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct ValueRange<'a> {
    values: &'a [Vec<String>],
}

#[derive(Debug, Default, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    updated_cells: u64,
}

#[derive(Debug, Default, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: UpdateResponse,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// Pull `error.message` out of a Google API error body, falling back to the raw body
fn google_error_message(body: &str) -> String {
    serde_json::from_str::<GoogleErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl SheetsClient {
    pub fn new(token: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: SHEETS_BASE_URL.to_string(),
            token,
        })
    }

    /// Build `<base>/<sheet_id>/values/<range><suffix>` with each segment escaped
    fn values_url(&self, sheet_id: &str, range: &str, suffix: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidResponse(format!("Invalid sheets base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidResponse("Sheets base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(sheet_id)
            .push("values")
            .push(&format!("{}{}", range, suffix));
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ValueRange<'_>>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.request(method, url.clone()).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.query(&[("valueInputOption", "RAW")]).json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(url = %url, status = %status, "Sheets response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &google_error_message(&text)));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(format!("Failed to parse sheets response: {}", e)))
    }
}

#[async_trait]
impl SheetValues for SheetsClient {
    async fn get_values(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, ApiError> {
        let url = self.values_url(sheet_id, range, "")?;
        let response: ValuesResponse = self.send(Method::GET, url, None).await?;
        Ok(response.values)
    }

    async fn clear(&self, sheet_id: &str, range: &str) -> Result<(), ApiError> {
        let url = self.values_url(sheet_id, range, ":clear")?;
        let _: serde_json::Value = self.send(Method::POST, url, None).await?;
        Ok(())
    }

    async fn update(&self, sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError> {
        let url = self.values_url(sheet_id, range, "")?;
        let response: UpdateResponse = self.send(Method::PUT, url, Some(&ValueRange { values: rows })).await?;
        Ok(response.updated_cells)
    }

    async fn append(&self, sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError> {
        let url = self.values_url(sheet_id, range, ":append")?;
        let response: AppendResponse = self.send(Method::POST, url, Some(&ValueRange { values: rows })).await?;
        Ok(response.updates.updated_cells)
    }
}
