//! Domain management service

use std::collections::HashSet;
use std::sync::Arc;

use domain_panel_api::{
    Domain, DomainCategory, DomainListQuery, UpdateDomainRequest, MAX_NAME_SERVERS,
};

use crate::error::{CoreError, CoreResult};
use crate::lifecycle::{list_action, DomainListAction};
use crate::services::{log_failure, map_not_found, ServiceContext};
use crate::types::DomainPage;

/// Longest description the back office stores.
pub const MAX_DESCRIPTION_LEN: usize = 500;
/// Longest renewal the registrar accepts in one call.
pub const MAX_RENEW_YEARS: u32 = 10;

/// Domain management service
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// One classified page of the domain listing.
    pub async fn list_domains(&self, query: &DomainListQuery) -> CoreResult<DomainPage> {
        let response = self.ctx.api.list_domains(query).await?;
        log::debug!(
            "Listed {} of {} domains (page {})",
            response.data.len(),
            response.meta.total,
            response.meta.page
        );
        Ok(DomainPage::from_response(response, self.ctx.now()))
    }

    pub async fn get_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        map_not_found(self.ctx.api.get_domain(domain_id).await, || {
            CoreError::DomainNotFound(domain_id.to_string())
        })
    }

    /// Send a partial update.
    pub async fn update_domain(&self, domain_id: &str, req: &UpdateDomainRequest) -> CoreResult<()> {
        validate_update(req)?;
        let result = map_not_found(self.ctx.api.update_domain(domain_id, req).await, || {
            CoreError::DomainNotFound(domain_id.to_string())
        });
        if let Err(ref e) = result {
            log_failure(&format!("Update of domain {domain_id}"), e);
        }
        result
    }

    /// Update `domain` and return the patched copy without refetching it.
    pub async fn update_cached(
        &self,
        domain: &Domain,
        req: &UpdateDomainRequest,
    ) -> CoreResult<Domain> {
        self.update_domain(&domain.id, req).await?;
        let mut updated = domain.clone();
        req.apply_to(&mut updated);
        Ok(updated)
    }

    pub async fn set_used(&self, domain_id: &str, is_used: bool) -> CoreResult<()> {
        let req = UpdateDomainRequest {
            is_used: Some(is_used),
            ..UpdateDomainRequest::default()
        };
        self.update_domain(domain_id, &req).await
    }

    pub async fn set_category(
        &self,
        domain_id: &str,
        category: Option<DomainCategory>,
    ) -> CoreResult<()> {
        let req = UpdateDomainRequest {
            category: Some(category),
            ..UpdateDomainRequest::default()
        };
        self.update_domain(domain_id, &req).await
    }

    /// A blank description clears it.
    pub async fn set_description(
        &self,
        domain_id: &str,
        description: Option<String>,
    ) -> CoreResult<()> {
        let description = description.filter(|d| !d.trim().is_empty());
        let req = UpdateDomainRequest {
            description: Some(description),
            ..UpdateDomainRequest::default()
        };
        self.update_domain(domain_id, &req).await
    }

    pub async fn set_group(&self, domain_id: &str, group_id: Option<i64>) -> CoreResult<()> {
        let req = UpdateDomainRequest {
            group_id: Some(group_id),
            ..UpdateDomainRequest::default()
        };
        self.update_domain(domain_id, &req).await
    }

    /// Link the domain to a cPanel account, or unlink it with `None`.
    pub async fn link_cpanel(&self, domain_id: &str, cpanel_id: Option<i64>) -> CoreResult<()> {
        let req = UpdateDomainRequest {
            cpanel_id: Some(cpanel_id),
            ..UpdateDomainRequest::default()
        };
        self.update_domain(domain_id, &req).await?;
        match cpanel_id {
            Some(id) => log::info!("Domain {domain_id} linked to cPanel account {id}"),
            None => log::info!("Domain {domain_id} unlinked from cPanel"),
        }
        Ok(())
    }

    /// Replace the name servers, returning the list that was sent.
    pub async fn set_name_servers(
        &self,
        domain_id: &str,
        name_servers: Vec<String>,
    ) -> CoreResult<Vec<String>> {
        let name_servers = normalize_name_servers(name_servers)?;
        map_not_found(
            self.ctx
                .api
                .set_name_servers(domain_id, &name_servers)
                .await,
            || CoreError::DomainNotFound(domain_id.to_string()),
        )?;
        log::info!(
            "Name servers of domain {domain_id} set to {}",
            name_servers.join(", ")
        );
        Ok(name_servers)
    }

    /// Renew a domain that has not expired yet.
    pub async fn renew(&self, domain: &Domain, years: u32) -> CoreResult<Domain> {
        if domain.is_expired {
            return Err(CoreError::ActionNotAvailable {
                domain: domain.name.clone(),
                action: DomainListAction::Renew.to_string(),
                reason: "domain has expired, reactivate it instead".to_string(),
            });
        }
        if !(1..=MAX_RENEW_YEARS).contains(&years) {
            return Err(CoreError::ValidationError(format!(
                "renewal period must be between 1 and {MAX_RENEW_YEARS} years, got {years}"
            )));
        }

        let renewed = self.ctx.api.renew_domain(&domain.id, years).await.map_err(|e| {
            let e = CoreError::from(e);
            log_failure(&format!("Renewal of {}", domain.name), &e);
            e
        })?;
        log::info!("Domain {} renewed for {years} year(s)", domain.name);
        Ok(renewed)
    }

    /// Reactivate an expired domain.
    pub async fn reactivate(&self, domain: &Domain) -> CoreResult<Domain> {
        if !domain.is_expired {
            return Err(CoreError::ActionNotAvailable {
                domain: domain.name.clone(),
                action: DomainListAction::Reactivate.to_string(),
                reason: "domain has not expired".to_string(),
            });
        }

        let reactivated = self
            .ctx
            .api
            .reactivate_domain(&domain.id)
            .await
            .map_err(|e| {
                let e = CoreError::from(e);
                log_failure(&format!("Reactivation of {}", domain.name), &e);
                e
            })?;
        log::info!("Domain {} reactivated", domain.name);
        Ok(reactivated)
    }

    /// Run the row action recommended for `domain` right now.
    ///
    /// Renewals are for one year. Returns `None` when the recommendation is
    /// only to open the details.
    pub async fn perform_action(&self, domain: &Domain) -> CoreResult<Option<Domain>> {
        match list_action(domain, self.ctx.now()) {
            DomainListAction::Reactivate => self.reactivate(domain).await.map(Some),
            DomainListAction::Renew => self.renew(domain, 1).await.map(Some),
            DomainListAction::Details => Ok(None),
        }
    }
}

fn validate_update(req: &UpdateDomainRequest) -> CoreResult<()> {
    if req.is_empty() {
        return Err(CoreError::ValidationError(
            "update does not change any field".to_string(),
        ));
    }
    if let Some(Some(ref description)) = req.description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CoreError::ValidationError(format!(
                "description must be at most {MAX_DESCRIPTION_LEN} characters, got {len}"
            )));
        }
    }
    Ok(())
}

/// Trim entries, drop blanks, then require one or two distinct
/// (case-insensitive) name servers.
fn normalize_name_servers(name_servers: Vec<String>) -> CoreResult<Vec<String>> {
    let cleaned: Vec<String> = name_servers
        .into_iter()
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(CoreError::ValidationError(
            "at least one name server is required".to_string(),
        ));
    }
    if cleaned.len() > MAX_NAME_SERVERS {
        return Err(CoreError::ValidationError(format!(
            "at most {MAX_NAME_SERVERS} name servers are allowed"
        )));
    }

    let mut seen = HashSet::new();
    for ns in &cleaned {
        if !seen.insert(ns.to_ascii_lowercase()) {
            return Err(CoreError::ValidationError(format!(
                "duplicate name server: {ns}"
            )));
        }
    }
    Ok(cleaned)
}
