use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::query::DomainListQuery;
use crate::types::{
    BulkMarkUsedResult, CpanelAccount, CreateGroupRequest, Domain, DomainGroup,
    DomainListResponse, RefreshNameServersResult, RefreshNawalaResult, SyncMetadata, SyncResult,
    UpdateDomainRequest, UpdateGroupRequest,
};

/// Error body returned by the back-office API (internal use).
///
/// The server answers failed requests with `{ "message": "...", "errors": [...] }`;
/// either field may be missing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub(crate) struct RawApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl RawApiError {
    /// Parse an error body, falling back to treating the whole body as the message.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Self>(body).unwrap_or_else(|_| {
            let trimmed = body.trim();
            Self {
                message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                errors: Vec::new(),
            }
        })
    }

    /// First human-readable message: `errors[0]`, then `message`.
    pub fn first_message(&self) -> Option<String> {
        self.errors
            .first()
            .cloned()
            .or_else(|| self.message.clone())
            .filter(|m| !m.is_empty())
    }
}

/// Extra information used while mapping an error (internal use).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Request path, reported by `NotFound`.
    pub path: String,
    /// `Retry-After` header value in seconds.
    pub retry_after: Option<u64>,
}

/// Maps non-success HTTP responses to [`ApiError`] (internal use).
pub(crate) trait ApiErrorMapper {
    /// Map a non-2xx status and its parsed body to the unified error type.
    fn map_error(&self, status: u16, raw: RawApiError, context: ErrorContext) -> ApiError {
        match status {
            401 => ApiError::Unauthorized {
                raw_message: raw.first_message(),
            },
            403 => ApiError::Forbidden {
                raw_message: raw.first_message(),
            },
            404 => ApiError::NotFound {
                path: context.path,
                raw_message: raw.first_message(),
            },
            429 => ApiError::RateLimited {
                retry_after: context.retry_after,
                raw_message: raw.first_message(),
            },
            502..=504 => ApiError::Gateway {
                status,
                raw_message: raw.first_message(),
            },
            400..=499 => {
                let errors = if raw.errors.is_empty() {
                    raw.message.into_iter().collect()
                } else {
                    raw.errors
                };
                ApiError::Validation { status, errors }
            }
            500..=599 => ApiError::ServerError {
                status,
                raw_message: raw.first_message(),
            },
            _ => self.unknown_error(Some(status), raw),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, status: Option<u16>, raw: RawApiError) -> ApiError {
        ApiError::Unknown {
            status,
            raw_message: raw
                .first_message()
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }
}

/// Back-office domain inventory API.
///
/// One method per endpoint. Path parameters are passed unencoded; implementations
/// take care of escaping them.
#[async_trait]
pub trait DomainApi: Send + Sync {
    // ===== Domains =====

    /// `GET domains{query}`
    async fn list_domains(&self, query: &DomainListQuery) -> Result<DomainListResponse>;

    /// `GET domains/{id}`
    async fn get_domain(&self, domain_id: &str) -> Result<Domain>;

    /// `PATCH domains/{id}`. The response body is ignored.
    async fn update_domain(&self, domain_id: &str, req: &UpdateDomainRequest) -> Result<()>;

    /// `POST domains/{id}/renew`
    async fn renew_domain(&self, domain_id: &str, years: u32) -> Result<Domain>;

    /// `POST domains/{id}/reactivate`
    async fn reactivate_domain(&self, domain_id: &str) -> Result<Domain>;

    /// `PATCH domains/{id}/name-servers`
    async fn set_name_servers(&self, domain_id: &str, name_servers: &[String]) -> Result<()>;

    // ===== Jobs =====

    /// `POST domains/sync`: pull the registrar inventory.
    async fn sync_domains(&self) -> Result<SyncResult>;

    /// `POST domains/refresh-ns`
    async fn refresh_name_servers(&self) -> Result<RefreshNameServersResult>;

    /// `POST domains/refresh-nawala`
    async fn refresh_nawala(&self) -> Result<RefreshNawalaResult>;

    /// `POST domains/bulk-mark-used` with a multipart `file` field.
    async fn bulk_mark_used(&self, file_name: &str, contents: Vec<u8>)
    -> Result<BulkMarkUsedResult>;

    /// `GET domains/sync-metadata`
    async fn sync_metadata(&self) -> Result<SyncMetadata>;

    // ===== Groups =====

    /// `GET domains/groups`
    async fn list_groups(&self) -> Result<Vec<DomainGroup>>;

    /// `GET domains/groups/{id}`
    async fn get_group(&self, group_id: i64) -> Result<DomainGroup>;

    /// `POST domains/groups`
    async fn create_group(&self, req: &CreateGroupRequest) -> Result<DomainGroup>;

    /// `PATCH domains/groups/{id}`
    async fn update_group(&self, group_id: i64, req: &UpdateGroupRequest) -> Result<DomainGroup>;

    /// `DELETE domains/groups/{id}`
    async fn delete_group(&self, group_id: i64) -> Result<()>;

    // ===== cPanel =====

    /// `GET cpanel`
    async fn list_cpanel_accounts(&self) -> Result<Vec<CpanelAccount>>;

    /// `GET cpanel/{id}`
    async fn get_cpanel_account(&self, cpanel_id: i64) -> Result<CpanelAccount>;

    /// `GET cpanel/{id}/domains{query}`, serialized with the cPanel listing scope.
    async fn list_cpanel_domains(
        &self,
        cpanel_id: i64,
        query: &DomainListQuery,
    ) -> Result<DomainListResponse>;
}
