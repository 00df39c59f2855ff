//! `reqwest` implementation of [`DomainApi`](crate::DomainApi).

mod api;
mod error;
mod http;

use reqwest::Client;
use url::Url;

use crate::config::{ApiConfig, ApiConfigError};

/// Back-office REST client.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools connections.
pub struct RestDomainApi {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) token: String,
    pub(crate) max_retries: u32,
}

impl RestDomainApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiConfigError> {
        config.validate()?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("domain-panel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiConfigError::ClientBuild(e.to_string()))?;

        log::debug!("API client ready: {config:?}");

        Ok(Self {
            client,
            base_url: config.base_url,
            token: config.token,
            max_retries: config.max_retries,
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
