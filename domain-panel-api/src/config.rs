//! API client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of extra attempts for idempotent requests.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiConfigError {
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("API base path '{path}' is relative and no origin was configured")]
    MissingOrigin { path: String },

    #[error("API token must not be empty")]
    EmptyToken,

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Where the back-office API lives.
///
/// Either a full `http(s)` URL or a path such as `/api/` that is resolved
/// against the origin the panel is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBaseUrl {
    Absolute(Url),
    Relative(String),
}

impl ApiBaseUrl {
    /// Resolve to an absolute URL with a trailing `/`, so endpoint paths join
    /// underneath it instead of replacing its last segment.
    pub fn resolve(&self, origin: Option<&Url>) -> Result<Url, ApiConfigError> {
        let url = match self {
            Self::Absolute(url) => url.clone(),
            Self::Relative(path) => {
                let origin = origin.ok_or_else(|| ApiConfigError::MissingOrigin {
                    path: path.clone(),
                })?;
                origin
                    .join(path)
                    .map_err(|e| ApiConfigError::InvalidBaseUrl {
                        value: path.clone(),
                        reason: e.to_string(),
                    })?
            }
        };
        Ok(with_trailing_slash(url))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl FromStr for ApiBaseUrl {
    type Err = ApiConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.starts_with('/') {
            return Ok(Self::Relative(value.to_string()));
        }
        let url = Url::parse(value).map_err(|e| ApiConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Absolute(url)),
            other => Err(ApiConfigError::InvalidBaseUrl {
                value: value.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) => write!(f, "{url}"),
            Self::Relative(path) => write!(f, "{path}"),
        }
    }
}

/// Settings for [`RestDomainApi`](crate::RestDomainApi).
#[derive(Clone)]
pub struct ApiConfig {
    /// Absolute API root. Always ends with `/`.
    pub base_url: Url,
    /// Bearer token attached to every request.
    pub token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Extra attempts for GET requests; mutations are always sent once.
    pub max_retries: u32,
}

impl ApiConfig {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            token: token.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn validate(&self) -> Result<(), ApiConfigError> {
        if self.token.trim().is_empty() {
            return Err(ApiConfigError::EmptyToken);
        }
        Ok(())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "token",
                &crate::utils::log_sanitizer::mask_token(&self.token),
            )
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_and_relative() {
        assert!(matches!(
            "https://panel.example.com/api".parse::<ApiBaseUrl>(),
            Ok(ApiBaseUrl::Absolute(_))
        ));
        assert_eq!(
            "/api/".parse::<ApiBaseUrl>(),
            Ok(ApiBaseUrl::Relative("/api/".to_string()))
        );
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!("ftp://example.com".parse::<ApiBaseUrl>().is_err());
        assert!("api/v1".parse::<ApiBaseUrl>().is_err());
        assert!("".parse::<ApiBaseUrl>().is_err());
    }

    #[test]
    fn relative_needs_origin() {
        let base: ApiBaseUrl = "/api".parse().unwrap();
        assert_eq!(
            base.resolve(None),
            Err(ApiConfigError::MissingOrigin {
                path: "/api".to_string()
            })
        );
        let origin = Url::parse("https://panel.example.com/dashboard").unwrap();
        assert_eq!(
            base.resolve(Some(&origin)).unwrap().as_str(),
            "https://panel.example.com/api/"
        );
    }

    #[test]
    fn resolved_base_joins_endpoint_paths() {
        let base: ApiBaseUrl = "http://127.0.0.1:3000/v1".parse().unwrap();
        let url = base.resolve(None).unwrap();
        assert_eq!(
            url.join("domains/42").unwrap().as_str(),
            "http://127.0.0.1:3000/v1/domains/42"
        );
    }

    #[test]
    fn debug_masks_token() {
        let cfg = ApiConfig::new(
            Url::parse("https://panel.example.com/api/").unwrap(),
            "secret-token-value-1234",
        );
        let out = format!("{cfg:?}");
        assert!(!out.contains("secret-token"));
        assert!(out.contains("***1234"));
        assert_eq!(cfg.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn empty_token_rejected() {
        let cfg = ApiConfig::new(Url::parse("https://panel.example.com/").unwrap(), "  ");
        assert_eq!(cfg.validate(), Err(ApiConfigError::EmptyToken));
    }
}
