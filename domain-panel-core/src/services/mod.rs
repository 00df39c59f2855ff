//! Business logic service layer

mod cpanel_service;
mod domain_service;
mod group_service;
mod sync_service;

pub use cpanel_service::CpanelService;
pub use domain_service::DomainService;
pub use group_service::GroupService;
pub use sync_service::SyncService;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use domain_panel_api::{ApiError, DomainApi};

use crate::error::{CoreError, CoreResult};
use crate::traits::Clock;

/// Service context: holds every dependency.
///
/// The application layer builds this once and shares it between services.
pub struct ServiceContext {
    /// Back-office API client
    pub api: Arc<dyn DomainApi>,
    /// Time source for lifecycle decisions
    pub clock: Arc<dyn Clock>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(api: Arc<dyn DomainApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }
}

/// Replace an API 404 with the domain-specific "not found" error.
pub(crate) fn map_not_found<T>(
    result: Result<T, ApiError>,
    not_found: impl FnOnce() -> CoreError,
) -> CoreResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ApiError::NotFound { .. }) => Err(not_found()),
        Err(e) => Err(CoreError::Api(e)),
    }
}

/// Log a failed operation at a level matching the error kind.
pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
}
