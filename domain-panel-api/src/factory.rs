//! Client factory.

use std::sync::Arc;

use crate::config::{ApiConfig, ApiConfigError};
use crate::rest::RestDomainApi;
use crate::traits::DomainApi;

/// Creates the default [`DomainApi`] implementation from `config`.
///
/// The client is returned as `Arc<dyn DomainApi>` so it can be shared across
/// async tasks and swapped for a mock in tests.
///
/// # Examples
///
/// ```rust,no_run
/// use domain_panel_api::{ApiConfig, create_api};
///
/// let base = "https://panel.example.com/api/".parse().unwrap();
/// let api = create_api(ApiConfig::new(base, "token")).unwrap();
/// ```
pub fn create_api(config: ApiConfig) -> Result<Arc<dyn DomainApi>, ApiConfigError> {
    Ok(Arc::new(RestDomainApi::new(config)?))
}
