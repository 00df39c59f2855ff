//! Test helper module
//!
//! Provides an in-memory API mock and convenient test factories.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain_panel_api::{
    ApiError, BulkMarkUsedResult, CpanelAccount, CreateGroupRequest, Domain, DomainApi,
    DomainGroup, DomainListQuery, DomainListResponse, LinkedCpanel, ListMeta,
    RefreshNameServersResult, RefreshNawalaResult, Result, SyncMetadata, SyncResult,
    UpdateDomainRequest, UpdateGroupRequest,
};
use tokio::sync::RwLock;

use crate::services::{CpanelService, DomainService, GroupService, ServiceContext, SyncService};
use crate::traits::FixedClock;

/// "Now" used by every test context: 2025-03-01 09:00 in UTC+7.
pub const TEST_NOW: &str = "2025-03-01T09:00:00+07:00";

// ===== MockDomainApi =====

pub struct MockDomainApi {
    domains: RwLock<BTreeMap<String, Domain>>,
    groups: RwLock<BTreeMap<i64, DomainGroup>>,
    accounts: RwLock<Vec<CpanelAccount>>,
    /// Every mutating call, e.g. `"renew 42 1"`.
    calls: RwLock<Vec<String>>,
    /// Queries passed to the listing endpoints, with the cPanel id if scoped.
    queries: RwLock<Vec<(Option<i64>, DomainListQuery)>>,
    /// Returned (once) by the next call instead of the normal result.
    fail_next: RwLock<Option<ApiError>>,
}

impl MockDomainApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(BTreeMap::new()),
            groups: RwLock::new(BTreeMap::new()),
            accounts: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            queries: RwLock::new(Vec::new()),
            fail_next: RwLock::new(None),
        }
    }

    pub async fn insert_domain(&self, domain: Domain) {
        self.domains.write().await.insert(domain.id.clone(), domain);
    }

    pub async fn insert_account(&self, account: CpanelAccount) {
        self.accounts.write().await.push(account);
    }

    pub async fn domain(&self, id: &str) -> Option<Domain> {
        self.domains.read().await.get(id).cloned()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn queries(&self) -> Vec<(Option<i64>, DomainListQuery)> {
        self.queries.read().await.clone()
    }

    pub async fn fail_next(&self, err: ApiError) {
        *self.fail_next.write().await = Some(err);
    }

    async fn check_failure(&self) -> Result<()> {
        match self.fail_next.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn record(&self, call: String) {
        self.calls.write().await.push(call);
    }

    fn not_found(path: String) -> ApiError {
        ApiError::NotFound {
            path,
            raw_message: None,
        }
    }

    fn page(data: Vec<Domain>, query: &DomainListQuery) -> DomainListResponse {
        let limit = query.limit.map_or(10, |l| l.value());
        let total = u32::try_from(data.len()).unwrap_or(u32::MAX);
        DomainListResponse {
            data,
            meta: ListMeta {
                total,
                page: query.page.unwrap_or(1).max(1),
                limit,
                total_pages: total.div_ceil(limit),
            },
        }
    }
}

#[async_trait]
impl DomainApi for MockDomainApi {
    async fn list_domains(&self, query: &DomainListQuery) -> Result<DomainListResponse> {
        self.check_failure().await?;
        self.queries.write().await.push((None, query.clone()));
        let data = self.domains.read().await.values().cloned().collect();
        Ok(Self::page(data, query))
    }

    async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        self.check_failure().await?;
        self.domain(domain_id)
            .await
            .ok_or_else(|| Self::not_found(format!("domains/{domain_id}")))
    }

    async fn update_domain(&self, domain_id: &str, req: &UpdateDomainRequest) -> Result<()> {
        self.check_failure().await?;
        let mut domains = self.domains.write().await;
        let domain = domains
            .get_mut(domain_id)
            .ok_or_else(|| Self::not_found(format!("domains/{domain_id}")))?;
        req.apply_to(domain);
        if let Some(Some(cpanel_id)) = req.cpanel_id {
            domain.cpanel = Some(LinkedCpanel {
                id: cpanel_id,
                ip_server: "10.0.0.1".to_string(),
                username: format!("acct{cpanel_id}"),
                main_domain: None,
            });
        }
        drop(domains);
        self.record(format!("update {domain_id}")).await;
        Ok(())
    }

    async fn renew_domain(&self, domain_id: &str, years: u32) -> Result<Domain> {
        self.check_failure().await?;
        self.record(format!("renew {domain_id} {years}")).await;
        self.get_domain(domain_id).await
    }

    async fn reactivate_domain(&self, domain_id: &str) -> Result<Domain> {
        self.check_failure().await?;
        let mut domains = self.domains.write().await;
        let domain = domains
            .get_mut(domain_id)
            .ok_or_else(|| Self::not_found(format!("domains/{domain_id}/reactivate")))?;
        domain.is_expired = false;
        let domain = domain.clone();
        drop(domains);
        self.record(format!("reactivate {domain_id}")).await;
        Ok(domain)
    }

    async fn set_name_servers(&self, domain_id: &str, name_servers: &[String]) -> Result<()> {
        self.check_failure().await?;
        let mut domains = self.domains.write().await;
        let domain = domains
            .get_mut(domain_id)
            .ok_or_else(|| Self::not_found(format!("domains/{domain_id}/name-servers")))?;
        domain.name_servers = name_servers.to_vec();
        drop(domains);
        self.record(format!("name-servers {domain_id} {}", name_servers.join(",")))
            .await;
        Ok(())
    }

    async fn sync_domains(&self) -> Result<SyncResult> {
        self.check_failure().await?;
        self.record("sync".to_string()).await;
        Ok(SyncResult {
            added: 3,
            updated: 5,
            ns_updated: 1,
        })
    }

    async fn refresh_name_servers(&self) -> Result<RefreshNameServersResult> {
        self.check_failure().await?;
        self.record("refresh-ns".to_string()).await;
        Ok(RefreshNameServersResult { updated: 4 })
    }

    async fn refresh_nawala(&self) -> Result<RefreshNawalaResult> {
        self.check_failure().await?;
        self.record("refresh-nawala".to_string()).await;
        Ok(RefreshNawalaResult {
            checked: 10,
            updated: 2,
        })
    }

    /// Marks every domain named on a line of the file as used.
    async fn bulk_mark_used(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkMarkUsedResult> {
        self.check_failure().await?;
        let text = String::from_utf8_lossy(&contents);
        let names: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let mut matched = 0;
        let mut updated = 0;
        for domain in self.domains.write().await.values_mut() {
            if names.contains(&domain.name.as_str()) {
                matched += 1;
                if !domain.is_used {
                    domain.is_used = true;
                    updated += 1;
                }
            }
        }
        self.record(format!("bulk-mark-used {file_name}")).await;
        Ok(BulkMarkUsedResult { matched, updated })
    }

    async fn sync_metadata(&self) -> Result<SyncMetadata> {
        self.check_failure().await?;
        Ok(SyncMetadata::default())
    }

    async fn list_groups(&self) -> Result<Vec<DomainGroup>> {
        self.check_failure().await?;
        Ok(self.groups.read().await.values().cloned().collect())
    }

    async fn get_group(&self, group_id: i64) -> Result<DomainGroup> {
        self.check_failure().await?;
        self.groups
            .read()
            .await
            .get(&group_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("domains/groups/{group_id}")))
    }

    async fn create_group(&self, req: &CreateGroupRequest) -> Result<DomainGroup> {
        self.check_failure().await?;
        let mut groups = self.groups.write().await;
        let id = groups.keys().next_back().map_or(1, |last| last + 1);
        let group = DomainGroup {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
        };
        groups.insert(id, group.clone());
        Ok(group)
    }

    async fn update_group(&self, group_id: i64, req: &UpdateGroupRequest) -> Result<DomainGroup> {
        self.check_failure().await?;
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| Self::not_found(format!("domains/groups/{group_id}")))?;
        if let Some(ref name) = req.name {
            group.name.clone_from(name);
        }
        if req.description.is_some() {
            group.description.clone_from(&req.description);
        }
        Ok(group.clone())
    }

    async fn delete_group(&self, group_id: i64) -> Result<()> {
        self.check_failure().await?;
        self.groups
            .write()
            .await
            .remove(&group_id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(format!("domains/groups/{group_id}")))
    }

    async fn list_cpanel_accounts(&self) -> Result<Vec<CpanelAccount>> {
        self.check_failure().await?;
        Ok(self.accounts.read().await.clone())
    }

    async fn get_cpanel_account(&self, cpanel_id: i64) -> Result<CpanelAccount> {
        self.check_failure().await?;
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.id == cpanel_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("cpanel/{cpanel_id}")))
    }

    async fn list_cpanel_domains(
        &self,
        cpanel_id: i64,
        query: &DomainListQuery,
    ) -> Result<DomainListResponse> {
        self.check_failure().await?;
        self.queries
            .write()
            .await
            .push((Some(cpanel_id), query.clone()));
        let data = self
            .domains
            .read()
            .await
            .values()
            .filter(|d| d.cpanel.as_ref().is_some_and(|c| c.id == cpanel_id))
            .cloned()
            .collect();
        Ok(Self::page(data, query))
    }
}

// ===== Fixtures =====

/// Domain expiring `expires`, neither expired nor locked.
pub fn test_domain(id: &str, name: &str, expires: &str) -> Domain {
    Domain::new(id, name, expires)
}

pub fn test_cpanel_account(id: i64) -> CpanelAccount {
    CpanelAccount {
        id,
        ip_server: format!("10.0.0.{id}"),
        username: format!("acct{id}"),
        password: "hunter2".to_string(),
        package: Some("starter".to_string()),
        main_domain: None,
        email: None,
        name_server: None,
        status: Some("active".to_string()),
        created_at: None,
        updated_at: None,
    }
}

// ===== Factories =====

/// Create a test `ServiceContext` pinned to [`TEST_NOW`]
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockDomainApi>) {
    let api = Arc::new(MockDomainApi::new());
    let clock = FixedClock::parse(TEST_NOW).unwrap();
    let ctx = Arc::new(ServiceContext::new(api.clone(), Arc::new(clock)));
    (ctx, api)
}

pub fn create_test_domain_service() -> (DomainService, Arc<MockDomainApi>) {
    let (ctx, api) = create_test_context();
    (DomainService::new(ctx), api)
}

pub fn create_test_cpanel_service() -> (CpanelService, Arc<MockDomainApi>) {
    let (ctx, api) = create_test_context();
    (CpanelService::new(ctx), api)
}

pub fn create_test_group_service() -> (GroupService, Arc<MockDomainApi>) {
    let (ctx, api) = create_test_context();
    (GroupService::new(ctx), api)
}

pub fn create_test_sync_service() -> (SyncService, Arc<MockDomainApi>) {
    let (ctx, api) = create_test_context();
    (SyncService::new(ctx), api)
}
