//! Application bootstrap for the domain inventory panel.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (API client and
//! clock injection), environment configuration and logging setup.

pub mod config;
pub mod logging;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain_panel_api::{create_api, DomainApi, SyncMetadata};
use domain_panel_core::error::{CoreError, CoreResult};
use domain_panel_core::services::{
    CpanelService, DomainService, GroupService, ServiceContext, SyncService,
};
use domain_panel_core::traits::{Clock, SystemClock};

pub use config::{AppConfig, ConfigError};

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (API client and clock)
    pub ctx: Arc<ServiceContext>,
    pub domain_service: DomainService,
    pub cpanel_service: CpanelService,
    pub group_service: GroupService,
    pub sync_service: SyncService,
}

impl AppState {
    /// Fetch and log when the background jobs last ran.
    ///
    /// Never fails: an unreachable API at startup is logged and the panel
    /// still comes up.
    pub async fn run_startup(&self) -> Option<SyncMetadata> {
        match self.sync_service.sync_metadata().await {
            Ok(meta) => {
                log::info!(
                    "Last domain sync: {}, name-server refresh: {}, nawala check: {}",
                    describe(meta.last_domain_sync),
                    describe(meta.last_name_server_refresh),
                    describe(meta.last_nawala_check)
                );
                Some(meta)
            }
            Err(e) => {
                log::warn!("Could not load sync metadata: {e}");
                None
            }
        }
    }
}

fn describe(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
}

/// Builder for constructing `AppState`.
///
/// # Required
/// - `api`, or a `config` to build the REST client from
///
/// # Optional
/// - `clock`: defaults to `SystemClock`
pub struct AppStateBuilder {
    api: Option<Arc<dyn DomainApi>>,
    config: Option<AppConfig>,
    clock: Option<Arc<dyn Clock>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: None,
            config: None,
            clock: None,
        }
    }

    #[must_use]
    pub fn api(mut self, api: Arc<dyn DomainApi>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the `AppState`.
    ///
    /// An explicit `api` wins over `config`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if neither is given or the client
    /// cannot be built from the configuration.
    pub fn build(self) -> CoreResult<AppState> {
        let api = match (self.api, self.config) {
            (Some(api), _) => api,
            (None, Some(config)) => {
                log::info!("Connecting to panel API ({} environment)", config.app_env);
                config
                    .api_config()
                    .and_then(create_api)
                    .map_err(|e| CoreError::ValidationError(e.to_string()))?
            }
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "api or config is required".to_string(),
                ))
            }
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let ctx = Arc::new(ServiceContext::new(api, clock));

        Ok(AppState {
            domain_service: DomainService::new(Arc::clone(&ctx)),
            cpanel_service: CpanelService::new(Arc::clone(&ctx)),
            group_service: GroupService::new(Arc::clone(&ctx)),
            sync_service: SyncService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
