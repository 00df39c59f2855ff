//! Domain group service

use std::sync::Arc;

use domain_panel_api::{CreateGroupRequest, DomainGroup, UpdateGroupRequest};

use crate::error::{CoreError, CoreResult};
use crate::services::{map_not_found, ServiceContext};

/// Longest group name accepted.
pub const MAX_GROUP_NAME_LEN: usize = 100;

/// CRUD for domain groups
pub struct GroupService {
    ctx: Arc<ServiceContext>,
}

impl GroupService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list_groups(&self) -> CoreResult<Vec<DomainGroup>> {
        Ok(self.ctx.api.list_groups().await?)
    }

    pub async fn get_group(&self, group_id: i64) -> CoreResult<DomainGroup> {
        map_not_found(self.ctx.api.get_group(group_id).await, || {
            CoreError::GroupNotFound(group_id)
        })
    }

    pub async fn create_group(
        &self,
        name: &str,
        description: Option<String>,
    ) -> CoreResult<DomainGroup> {
        let req = CreateGroupRequest {
            name: validate_group_name(name)?,
            description: normalize_description(description),
        };
        let group = self.ctx.api.create_group(&req).await?;
        log::info!("Created domain group {} ({})", group.name, group.id);
        Ok(group)
    }

    pub async fn update_group(
        &self,
        group_id: i64,
        name: Option<&str>,
        description: Option<String>,
    ) -> CoreResult<DomainGroup> {
        let req = UpdateGroupRequest {
            name: name.map(validate_group_name).transpose()?,
            description: normalize_description(description),
        };
        if req.name.is_none() && req.description.is_none() {
            return Err(CoreError::ValidationError(
                "update does not change any field".to_string(),
            ));
        }
        map_not_found(self.ctx.api.update_group(group_id, &req).await, || {
            CoreError::GroupNotFound(group_id)
        })
    }

    pub async fn delete_group(&self, group_id: i64) -> CoreResult<()> {
        map_not_found(self.ctx.api.delete_group(group_id).await, || {
            CoreError::GroupNotFound(group_id)
        })?;
        log::info!("Deleted domain group {group_id}");
        Ok(())
    }
}

fn validate_group_name(name: &str) -> CoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "group name is required".to_string(),
        ));
    }
    if name.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(CoreError::ValidationError(format!(
            "group name must be at most {MAX_GROUP_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_group_service;

    #[tokio::test]
    async fn create_trims_and_validates() {
        let (svc, _api) = create_test_group_service();

        let g = svc
            .create_group("  Campaign A ", Some("  ".into()))
            .await
            .unwrap();
        assert_eq!(g.name, "Campaign A");
        assert_eq!(g.description, None);

        assert!(matches!(
            svc.create_group("   ", None).await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            svc.create_group(&"x".repeat(MAX_GROUP_NAME_LEN + 1), None)
                .await,
            Err(CoreError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn crud_round() {
        let (svc, _api) = create_test_group_service();
        let g = svc.create_group("Alpha", None).await.unwrap();

        let updated = svc
            .update_group(g.id, Some("Beta"), Some("landing pages".into()))
            .await
            .unwrap();
        assert_eq!(updated.name, "Beta");
        assert_eq!(svc.get_group(g.id).await.unwrap(), updated);
        assert_eq!(svc.list_groups().await.unwrap().len(), 1);

        svc.delete_group(g.id).await.unwrap();
        assert!(matches!(
            svc.get_group(g.id).await,
            Err(CoreError::GroupNotFound(_))
        ));
        assert!(matches!(
            svc.delete_group(g.id).await,
            Err(CoreError::GroupNotFound(_))
        ));
    }

    #[tokio::test]
    async fn empty_update_rejected() {
        let (svc, _api) = create_test_group_service();
        let g = svc.create_group("Alpha", None).await.unwrap();
        assert!(matches!(
            svc.update_group(g.id, None, None).await,
            Err(CoreError::ValidationError(_))
        ));
    }
}
