//! Environment-driven configuration.
//!
//! | Variable            | Required | Meaning                                         |
//! |---------------------|----------|-------------------------------------------------|
//! | `PANEL_API_URL`     | yes      | Absolute URL or a path such as `/api/`          |
//! | `PANEL_API_ORIGIN`  | no       | Origin a relative `PANEL_API_URL` resolves from |
//! | `PANEL_API_TOKEN`   | yes      | Bearer token                                    |
//! | `PANEL_APP_ENV`     | yes      | Deployment name, e.g. `production`              |
//! | `PANEL_MAX_RETRIES` | no       | Extra attempts for GET requests, at most 10     |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::env;

use domain_panel_api::{ApiBaseUrl, ApiConfig, ApiConfigError, DEFAULT_MAX_RETRIES};
use url::Url;

pub const API_URL_VAR: &str = "PANEL_API_URL";
pub const API_ORIGIN_VAR: &str = "PANEL_API_ORIGIN";
pub const API_TOKEN_VAR: &str = "PANEL_API_TOKEN";
pub const APP_ENV_VAR: &str = "PANEL_APP_ENV";
pub const MAX_RETRIES_VAR: &str = "PANEL_MAX_RETRIES";

/// Highest accepted `PANEL_MAX_RETRIES`.
pub const MAX_RETRIES_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error(transparent)]
    Api(#[from] ApiConfigError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: ApiBaseUrl,
    pub api_origin: Option<Url>,
    pub api_token: String,
    pub app_env: String,
    pub max_retries: u32,
}

impl AppConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = get(API_URL_VAR)
            .ok_or(ConfigError::Missing(API_URL_VAR))?
            .parse::<ApiBaseUrl>()?;

        let api_origin = get(API_ORIGIN_VAR)
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    var: API_ORIGIN_VAR,
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let api_token = get(API_TOKEN_VAR).ok_or(ConfigError::Missing(API_TOKEN_VAR))?;
        let app_env = get(APP_ENV_VAR).ok_or(ConfigError::Missing(APP_ENV_VAR))?;

        let max_retries = match get(MAX_RETRIES_VAR) {
            Some(raw) => parse_max_retries(&raw)?,
            None => DEFAULT_MAX_RETRIES,
        };

        let config = Self {
            api_url,
            api_origin,
            api_token,
            app_env,
            max_retries,
        };
        // Fail at startup, not on the first request.
        config.api_config()?;
        Ok(config)
    }

    /// Client settings with the base URL resolved.
    pub fn api_config(&self) -> Result<ApiConfig, ApiConfigError> {
        let base_url = self.api_url.resolve(self.api_origin.as_ref())?;
        let config =
            ApiConfig::new(base_url, self.api_token.clone()).with_max_retries(self.max_retries);
        config.validate()?;
        Ok(config)
    }
}

fn parse_max_retries(raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
        var: MAX_RETRIES_VAR,
        reason: format!("'{raw}' is not a non-negative integer"),
    })?;
    if value > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Invalid {
            var: MAX_RETRIES_VAR,
            reason: format!("{value} exceeds the limit of {MAX_RETRIES_LIMIT}"),
        });
    }
    Ok(value)
}
