//! # domain-panel-api
//!
//! Typed client for the domain inventory back-office API: registrar domains,
//! domain groups, linked cPanel accounts and the background sync jobs.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_panel_api::{
//!     ApiConfig, DomainApi, DomainListQuery, DomainSortBy, StatusFilter, create_api,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = "https://panel.example.com/api/".parse()?;
//!     let api = create_api(ApiConfig::new(base, "token"))?;
//!
//!     let query = DomainListQuery::new()
//!         .sort_by(DomainSortBy::ExpiryDate)
//!         .status(StatusFilter::NeedsRenewal);
//!     let page = api.list_domains(&query).await?;
//!     for domain in &page.data {
//!         println!("{} expires {}", domain.name, domain.expires);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Query strings
//!
//! [`DomainListQuery::to_query_string`] is deterministic and omits defaults, so
//! its output can be used directly as a cache key:
//!
//! ```rust
//! use domain_panel_api::{DomainListQuery, ListingScope, StatusFilter, UsedFilter};
//!
//! let q = DomainListQuery::new()
//!     .status(StatusFilter::All)
//!     .used_filter(UsedFilter::All)
//!     .page(1);
//! assert_eq!(q.to_query_string(ListingScope::Domains), "?usedFilter=all&page=1");
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Transient errors
//! (`NetworkError`, `Timeout`, `RateLimited`, `Gateway`) are retried with exponential
//! backoff for `GET` requests only. Use [`ApiError::display_message`] for text
//! shown to operators.

mod config;
mod error;
mod factory;
mod http_client;
mod query;
mod rest;
mod traits;
mod types;
mod utils;

pub use config::{
    ApiBaseUrl, ApiConfig, ApiConfigError, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_RETRIES,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE, Result};
pub use factory::create_api;
pub use query::{
    DomainListQuery, DomainSortBy, ListingScope, NawalaFilter, PageLimit, QueryField, SortOrder,
    StatusFilter, UsedFilter,
};
pub use rest::RestDomainApi;
pub use traits::DomainApi;
pub use types::{
    BulkMarkUsedResult, CpanelAccount, CreateGroupRequest, Domain, DomainCategory, DomainGroup,
    DomainGroupRef, DomainListResponse, LinkedCpanel, ListMeta, MAX_NAME_SERVERS, PAGE_SIZE_OPTIONS,
    RefreshNameServersResult, RefreshNawalaResult, RenewDomainRequest, SetNameServersRequest,
    SyncMetadata, SyncResult, UpdateDomainRequest, UpdateGroupRequest,
};

pub use utils::datetime;
pub use utils::log_sanitizer;
