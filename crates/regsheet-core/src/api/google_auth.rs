//! Bearer tokens for the Google Sheets API.

use gcp_auth::{CustomServiceAccount, TokenProvider};
use tracing::debug;

use crate::config::GoogleCredentials;

use super::ApiError;

/// Read/write access to spreadsheets
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Resolve credentials to a bearer token for the Sheets API.
///
/// A service-account key is signed into a JWT and exchanged at the key's
/// `token_uri`; a pre-minted token is used as-is.
pub async fn sheets_access_token(credentials: &GoogleCredentials) -> Result<String, ApiError> {
    let key_json = match credentials {
        GoogleCredentials::AccessToken(token) => return Ok(token.clone()),
        GoogleCredentials::ServiceAccount(key_json) => key_json,
    };

    let account = CustomServiceAccount::from_json(key_json)
        .map_err(|e| ApiError::AuthFailed(format!("Invalid service account key: {}", e)))?;
    let token = account
        .token(&[SHEETS_SCOPE])
        .await
        .map_err(|e| ApiError::AuthFailed(format!("Token exchange failed: {}", e)))?;

    debug!("Exchanged service account key for a Sheets token");
    Ok(token.as_str().to_string())
}
