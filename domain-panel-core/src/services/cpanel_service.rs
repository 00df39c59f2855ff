//! cPanel account service

use std::sync::Arc;

use domain_panel_api::{CpanelAccount, DomainListQuery, UpdateDomainRequest};

use crate::error::{CoreError, CoreResult};
use crate::services::{map_not_found, ServiceContext};
use crate::types::DomainPage;

/// Hosting accounts and the domains linked to them.
pub struct CpanelService {
    ctx: Arc<ServiceContext>,
}

impl CpanelService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list_accounts(&self) -> CoreResult<Vec<CpanelAccount>> {
        Ok(self.ctx.api.list_cpanel_accounts().await?)
    }

    pub async fn get_account(&self, cpanel_id: i64) -> CoreResult<CpanelAccount> {
        map_not_found(self.ctx.api.get_cpanel_account(cpanel_id).await, || {
            CoreError::CpanelNotFound(cpanel_id)
        })
    }

    /// Domains linked to one account. Nawala and unlinked-only filters do not
    /// apply to this listing and are left out of the request.
    pub async fn list_domains(
        &self,
        cpanel_id: i64,
        query: &DomainListQuery,
    ) -> CoreResult<DomainPage> {
        let response = map_not_found(
            self.ctx.api.list_cpanel_domains(cpanel_id, query).await,
            || CoreError::CpanelNotFound(cpanel_id),
        )?;
        Ok(DomainPage::from_response(response, self.ctx.now()))
    }

    /// Detach a domain from whichever account it is linked to.
    pub async fn unlink_domain(&self, domain_id: &str) -> CoreResult<()> {
        let req = UpdateDomainRequest {
            cpanel_id: Some(None),
            ..UpdateDomainRequest::default()
        };
        map_not_found(self.ctx.api.update_domain(domain_id, &req).await, || {
            CoreError::DomainNotFound(domain_id.to_string())
        })?;
        log::info!("Domain {domain_id} unlinked from cPanel");
        Ok(())
    }
}
