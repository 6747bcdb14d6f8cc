//! Application configuration management.
//!
//! Settings come from an optional JSON file at
//! `~/.config/regsheet/config.json`, overridden by environment variables
//! (which the binary may populate from a `.env` file first). Validation is
//! split by output: Square settings are always required, Google Sheets
//! settings only when writing to a sheet.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Application name used for the config directory path
const APP_NAME: &str = "regsheet";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_FETCH_LIMIT: u32 = 70;
const DEFAULT_SHEET_NAME: &str = "Sheet1";
const SERVICE_ACCOUNT_TYPE: &str = "service_account";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid JSON in GOOGLE_CREDENTIALS_JSON: {0}")]
    InvalidCredentials(String),

    #[error("Failed to read config file {path}: {message}")]
    File { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SquareEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl FromStr for SquareEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(SquareEnvironment::Production),
            "sandbox" => Ok(SquareEnvironment::Sandbox),
            _ => Err(ConfigError::Invalid {
                key: "SQUARE_ENVIRONMENT",
                expected: "'production' or 'sandbox'",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(WriteMode::Overwrite),
            "append" => Ok(WriteMode::Append),
            _ => Err(ConfigError::Invalid {
                key: "WRITE_MODE",
                expected: "'overwrite' or 'append'",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "overwrite"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}

/// On-disk settings. Every key is optional; environment variables win.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    pub square_access_token: Option<String>,
    pub square_location_id: Option<String>,
    pub square_fetch_limit: Option<u32>,
    pub square_environment: Option<String>,
    pub google_sheet_id: Option<String>,
    pub google_credentials_json: Option<String>,
    pub sheet_name: Option<String>,
    pub write_mode: Option<String>,
}

impl FileSettings {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let file_error = |message: String| ConfigError::File {
            path: path.to_path_buf(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| file_error(e.to_string()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Raw, merged settings. Use `validate_square` / `validate_sheets` to get
/// the checked values each output needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub square_access_token: String,
    pub square_location_id: String,
    pub square_fetch_limit: u32,
    pub square_environment: SquareEnvironment,
    pub google_sheet_id: String,
    pub google_credentials_json: String,
    pub sheet_name: String,
    /// Kept raw; only checked when writing to a sheet
    pub write_mode: String,
}

/// Checked settings for the Square API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareSettings {
    pub access_token: String,
    pub location_id: String,
    pub fetch_limit: u32,
    pub environment: SquareEnvironment,
}

/// Where and how rows land in a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub sheet_id: String,
    pub sheet_name: String,
    pub write_mode: WriteMode,
}

impl SheetTarget {
    pub fn url(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.sheet_id)
    }
}

/// How the Sheets client authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleCredentials {
    /// Service-account key JSON; exchanged for a bearer token before writing
    ServiceAccount(String),
    /// Bearer token minted elsewhere
    AccessToken(String),
}

impl GoogleCredentials {
    /// Accepts a service-account key or `{"access_token": "..."}`.
    /// Key material is only checked when it is exchanged for a token.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let shape: CredentialsShape =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;

        if let Some(token) = present(shape.access_token) {
            return Ok(GoogleCredentials::AccessToken(token));
        }
        if let Some(kind) = shape.key_type.filter(|k| k != SERVICE_ACCOUNT_TYPE) {
            return Err(ConfigError::Invalid {
                key: "GOOGLE_CREDENTIALS_JSON type",
                expected: "'service_account'",
                value: kind,
            });
        }
        present(shape.private_key).ok_or(ConfigError::Missing("GOOGLE_CREDENTIALS_JSON private_key"))?;
        present(shape.client_email).ok_or(ConfigError::Missing("GOOGLE_CREDENTIALS_JSON client_email"))?;
        present(shape.token_uri).ok_or(ConfigError::Missing("GOOGLE_CREDENTIALS_JSON token_uri"))?;

        Ok(GoogleCredentials::ServiceAccount(json.to_string()))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct CredentialsShape {
    access_token: Option<String>,
    #[serde(rename = "type")]
    key_type: Option<String>,
    private_key: Option<String>,
    client_email: Option<String>,
    token_uri: Option<String>,
}

/// Checked settings for the Google Sheets output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSettings {
    pub target: SheetTarget,
    pub credentials: GoogleCredentials,
}

impl Config {
    /// Load from the default config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = match FileSettings::default_path() {
            Some(path) => FileSettings::load_from(&path)?,
            None => FileSettings::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge file settings with a key lookup (normally `std::env::var`).
    /// Empty values count as unset.
    pub fn from_sources<F>(file: FileSettings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, fallback: Option<String>| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .or(fallback.filter(|v| !v.is_empty()))
        };

        let square_fetch_limit = match lookup("SQUARE_FETCH_LIMIT").filter(|v| !v.is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SQUARE_FETCH_LIMIT",
                expected: "a positive integer",
                value: raw.clone(),
            })?,
            None => file.square_fetch_limit.unwrap_or(DEFAULT_FETCH_LIMIT),
        };

        let square_environment = match get("SQUARE_ENVIRONMENT", file.square_environment) {
            Some(raw) => raw.parse()?,
            None => SquareEnvironment::default(),
        };

        Ok(Self {
            square_access_token: get("SQUARE_ACCESS_TOKEN", file.square_access_token).unwrap_or_default(),
            square_location_id: get("SQUARE_LOCATION_ID", file.square_location_id).unwrap_or_default(),
            square_fetch_limit,
            square_environment,
            google_sheet_id: get("GOOGLE_SHEET_ID", file.google_sheet_id).unwrap_or_default(),
            google_credentials_json: get("GOOGLE_CREDENTIALS_JSON", file.google_credentials_json)
                .unwrap_or_default(),
            sheet_name: get("SHEET_NAME", file.sheet_name).unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            write_mode: get("WRITE_MODE", file.write_mode).unwrap_or_else(|| WriteMode::default().to_string()),
        })
    }

    pub fn validate_square(&self) -> Result<SquareSettings, ConfigError> {
        if self.square_access_token.is_empty() {
            return Err(ConfigError::Missing("SQUARE_ACCESS_TOKEN"));
        }
        if self.square_location_id.is_empty() {
            return Err(ConfigError::Missing("SQUARE_LOCATION_ID"));
        }
        Ok(SquareSettings {
            access_token: self.square_access_token.clone(),
            location_id: self.square_location_id.clone(),
            fetch_limit: self.square_fetch_limit,
            environment: self.square_environment,
        })
    }

    pub fn validate_sheets(&self) -> Result<SheetSettings, ConfigError> {
        if self.google_sheet_id.is_empty() {
            return Err(ConfigError::Missing("GOOGLE_SHEET_ID"));
        }
        if self.google_credentials_json.is_empty() {
            return Err(ConfigError::Missing("GOOGLE_CREDENTIALS_JSON"));
        }
        let write_mode: WriteMode = self.write_mode.parse()?;

        let credentials = GoogleCredentials::parse(&self.google_credentials_json)?;

        Ok(SheetSettings {
            target: SheetTarget {
                sheet_id: self.google_sheet_id.clone(),
                sheet_name: self.sheet_name.clone(),
                write_mode,
            },
            credentials,
        })
    }
}
