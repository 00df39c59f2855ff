//! `DomainApi` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::query::{DomainListQuery, ListingScope};
use crate::traits::DomainApi;
use crate::types::{
    BulkMarkUsedResult, CpanelAccount, CreateGroupRequest, Domain, DomainGroup,
    DomainListResponse, RefreshNameServersResult, RefreshNawalaResult, RenewDomainRequest,
    SetNameServersRequest, SyncMetadata, SyncResult, UpdateDomainRequest, UpdateGroupRequest,
};

use super::{RestDomainApi, segment};

#[async_trait]
impl DomainApi for RestDomainApi {
    async fn list_domains(&self, query: &DomainListQuery) -> Result<DomainListResponse> {
        let qs = query.to_query_string(ListingScope::Domains);
        self.get(&format!("domains{qs}")).await
    }

    async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        self.get(&format!("domains/{}", segment(domain_id))).await
    }

    async fn update_domain(&self, domain_id: &str, req: &UpdateDomainRequest) -> Result<()> {
        self.patch_no_content(&format!("domains/{}", segment(domain_id)), req)
            .await
    }

    async fn renew_domain(&self, domain_id: &str, years: u32) -> Result<Domain> {
        let body = RenewDomainRequest { years };
        self.post(&format!("domains/{}/renew", segment(domain_id)), Some(&body))
            .await
    }

    async fn reactivate_domain(&self, domain_id: &str) -> Result<Domain> {
        self.post::<_, ()>(&format!("domains/{}/reactivate", segment(domain_id)), None)
            .await
    }

    async fn set_name_servers(&self, domain_id: &str, name_servers: &[String]) -> Result<()> {
        let body = SetNameServersRequest::from_list(name_servers);
        self.patch_no_content(
            &format!("domains/{}/name-servers", segment(domain_id)),
            &body,
        )
        .await
    }

    async fn sync_domains(&self) -> Result<SyncResult> {
        self.post::<_, ()>("domains/sync", None).await
    }

    async fn refresh_name_servers(&self) -> Result<RefreshNameServersResult> {
        self.post::<_, ()>("domains/refresh-ns", None).await
    }

    async fn refresh_nawala(&self) -> Result<RefreshNawalaResult> {
        self.post::<_, ()>("domains/refresh-nawala", None).await
    }

    async fn bulk_mark_used(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkMarkUsedResult> {
        self.post_file("domains/bulk-mark-used", file_name, contents)
            .await
    }

    async fn sync_metadata(&self) -> Result<SyncMetadata> {
        self.get("domains/sync-metadata").await
    }

    async fn list_groups(&self) -> Result<Vec<DomainGroup>> {
        self.get("domains/groups").await
    }

    async fn get_group(&self, group_id: i64) -> Result<DomainGroup> {
        self.get(&format!("domains/groups/{group_id}")).await
    }

    async fn create_group(&self, req: &CreateGroupRequest) -> Result<DomainGroup> {
        self.post("domains/groups", Some(req)).await
    }

    async fn update_group(&self, group_id: i64, req: &UpdateGroupRequest) -> Result<DomainGroup> {
        self.patch(&format!("domains/groups/{group_id}"), req).await
    }

    async fn delete_group(&self, group_id: i64) -> Result<()> {
        self.delete(&format!("domains/groups/{group_id}")).await
    }

    async fn list_cpanel_accounts(&self) -> Result<Vec<CpanelAccount>> {
        self.get("cpanel").await
    }

    async fn get_cpanel_account(&self, cpanel_id: i64) -> Result<CpanelAccount> {
        self.get(&format!("cpanel/{cpanel_id}")).await
    }

    async fn list_cpanel_domains(
        &self,
        cpanel_id: i64,
        query: &DomainListQuery,
    ) -> Result<DomainListResponse> {
        let qs = query.to_query_string(ListingScope::CpanelDomains);
        self.get(&format!("cpanel/{cpanel_id}/domains{qs}")).await
    }
}
