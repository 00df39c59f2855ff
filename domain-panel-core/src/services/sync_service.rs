//! Background job triggers

use std::sync::Arc;

use domain_panel_api::{
    BulkMarkUsedResult, RefreshNameServersResult, RefreshNawalaResult, SyncMetadata, SyncResult,
};

use crate::error::{CoreError, CoreResult};
use crate::services::{log_failure, ServiceContext};

/// Triggers the server-side sync jobs and reports their counters.
pub struct SyncService {
    ctx: Arc<ServiceContext>,
}

impl SyncService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Import the registrar inventory.
    pub async fn sync_domains(&self) -> CoreResult<SyncResult> {
        let result = self
            .ctx
            .api
            .sync_domains()
            .await
            .map_err(|e| failed("Domain sync", e.into()))?;
        log::info!(
            "Domain sync finished: {} added, {} updated, {} name server changes",
            result.added,
            result.updated,
            result.ns_updated
        );
        Ok(result)
    }

    pub async fn refresh_name_servers(&self) -> CoreResult<RefreshNameServersResult> {
        let result = self
            .ctx
            .api
            .refresh_name_servers()
            .await
            .map_err(|e| failed("Name server refresh", e.into()))?;
        log::info!("Name server refresh finished: {} updated", result.updated);
        Ok(result)
    }

    pub async fn refresh_nawala(&self) -> CoreResult<RefreshNawalaResult> {
        let result = self
            .ctx
            .api
            .refresh_nawala()
            .await
            .map_err(|e| failed("Nawala check", e.into()))?;
        log::info!(
            "Nawala check finished: {} checked, {} updated",
            result.checked,
            result.updated
        );
        Ok(result)
    }

    /// Upload a file listing domain names (one per line) to mark them as used.
    pub async fn bulk_mark_used(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> CoreResult<BulkMarkUsedResult> {
        if contents.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "file '{file_name}' is empty"
            )));
        }
        let result = self
            .ctx
            .api
            .bulk_mark_used(file_name, contents)
            .await
            .map_err(|e| failed("Bulk mark used", e.into()))?;
        log::info!(
            "Bulk mark used from '{file_name}': {} matched, {} updated",
            result.matched,
            result.updated
        );
        Ok(result)
    }

    pub async fn sync_metadata(&self) -> CoreResult<SyncMetadata> {
        Ok(self.ctx.api.sync_metadata().await?)
    }
}

fn failed(job: &str, err: CoreError) -> CoreError {
    log_failure(job, &err);
    err
}
