use serde::{Deserialize, Serialize};

// ============ Domain ============

/// Business category an operator assigns to a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainCategory {
    #[serde(rename = "MS")]
    Ms,
    #[serde(rename = "WP")]
    Wp,
    #[serde(rename = "LP")]
    Lp,
    #[serde(rename = "RTP")]
    Rtp,
    Other,
}

impl DomainCategory {
    /// Wire representation (`"MS"`, `"WP"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ms => "MS",
            Self::Wp => "WP",
            Self::Lp => "LP",
            Self::Rtp => "RTP",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weak reference to the group a domain belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainGroupRef {
    pub id: i64,
    pub name: String,
}

/// Weak reference to the hosting account a domain is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedCpanel {
    pub id: i64,
    pub ip_server: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_domain: Option<String>,
}

/// A registered domain as returned by the back-office API.
///
/// Mirrors the registrar listing (`ID`, `Name`, `User`, `Created`, `Expires`,
/// `IsExpired`, `IsLocked`, `AutoRenew`, `WhoisGuard`, `IsPremium`, `IsOurDNS`)
/// plus the fields the back office stores on top of it.
///
/// The record is server-owned; the client only changes it through
/// [`UpdateDomainRequest`] and the lifecycle endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Opaque identifier.
    pub id: String,
    /// Domain name (e.g., `"example.com"`).
    pub name: String,
    /// Registrar account owning the domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Registration date, registrar format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Expiry date in `MM/DD/YYYY`, kept verbatim.
    #[serde(default)]
    pub expires: String,
    /// Set by the registrar; never derived client-side.
    #[serde(default)]
    pub is_expired: bool,
    /// Set by the registrar; never derived client-side.
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whois_guard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(
        default,
        rename = "isOurDNS",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_our_dns: Option<bool>,
    /// Free-form operator notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered name server list.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Blocked by the nawala content filter. Read-only.
    #[serde(default)]
    pub nawala: bool,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub is_defense: bool,
    #[serde(default)]
    pub is_link_alt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DomainCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<DomainGroupRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpanel: Option<LinkedCpanel>,
}

impl Domain {
    /// Minimal record with only the identifying fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, expires: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            user: None,
            created: None,
            expires: expires.into(),
            is_expired: false,
            is_locked: false,
            auto_renew: false,
            whois_guard: None,
            is_premium: None,
            is_our_dns: None,
            description: None,
            name_servers: Vec::new(),
            nawala: false,
            is_used: false,
            is_defense: false,
            is_link_alt: false,
            category: None,
            group: None,
            cpanel: None,
        }
    }
}

/// Allowed page sizes for domain listings.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 50, 100];

/// Pagination metadata attached to a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Total number of matching domains across all pages.
    pub total: u32,
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size used for this request.
    pub limit: u32,
    pub total_pages: u32,
}

impl ListMeta {
    /// Whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of the domain listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainListResponse {
    pub data: Vec<Domain>,
    pub meta: ListMeta,
}

// ============ Mutations ============

/// Partial update for `PATCH domains/{id}`.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` is sent
/// as an explicit `null` and clears the value on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<DomainCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_defense: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_link_alt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpanel_id: Option<Option<i64>>,
}

impl UpdateDomainRequest {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.is_used.is_none()
            && self.is_defense.is_none()
            && self.is_link_alt.is_none()
            && self.group_id.is_none()
            && self.cpanel_id.is_none()
    }

    /// Apply the patch to a cached copy of the domain.
    ///
    /// Group and cPanel references only carry an id here, so a reference that
    /// points somewhere else afterwards is dropped until the record is fetched again.
    pub fn apply_to(&self, domain: &mut Domain) {
        if let Some(ref description) = self.description {
            domain.description.clone_from(description);
        }
        if let Some(category) = self.category {
            domain.category = category;
        }
        if let Some(is_used) = self.is_used {
            domain.is_used = is_used;
        }
        if let Some(is_defense) = self.is_defense {
            domain.is_defense = is_defense;
        }
        if let Some(is_link_alt) = self.is_link_alt {
            domain.is_link_alt = is_link_alt;
        }
        if let Some(group_id) = self.group_id {
            if domain.group.as_ref().map(|g| g.id) != group_id {
                domain.group = None;
            }
        }
        if let Some(cpanel_id) = self.cpanel_id {
            if domain.cpanel.as_ref().map(|c| c.id) != cpanel_id {
                domain.cpanel = None;
            }
        }
    }
}

/// Body of `POST domains/{id}/renew`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewDomainRequest {
    pub years: u32,
}

/// Name-server slots a domain can be given.
pub const MAX_NAME_SERVERS: usize = 2;

/// Body of `PATCH domains/{id}/name-servers`.
///
/// The backend takes two fixed slots; an unused slot is sent as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetNameServersRequest {
    #[serde(rename = "nameServer1")]
    pub name_server_1: String,
    #[serde(rename = "nameServer2")]
    pub name_server_2: String,
}

impl SetNameServersRequest {
    /// Fill the slots in order. Entries past [`MAX_NAME_SERVERS`] are ignored.
    pub fn from_list(name_servers: &[String]) -> Self {
        let mut slots = name_servers.iter().cloned();
        Self {
            name_server_1: slots.next().unwrap_or_default(),
            name_server_2: slots.next().unwrap_or_default(),
        }
    }
}

// ============ Groups ============

/// A named group of domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST domains/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PATCH domains/groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============ cPanel ============

/// Stored hosting credentials for a cPanel server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpanelAccount {
    pub id: i64,
    pub ip_server: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub main_domain: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name_server: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl std::fmt::Debug for CpanelAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpanelAccount")
            .field("id", &self.id)
            .field("ip_server", &self.ip_server)
            .field("username", &self.username)
            .field("password", &"***")
            .field("package", &self.package)
            .field("main_domain", &self.main_domain)
            .field("email", &self.email)
            .field("name_server", &self.name_server)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

// ============ Background jobs ============

/// Result of `POST domains/sync` (registrar → database import).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub added: u32,
    pub updated: u32,
    pub ns_updated: u32,
}

/// Result of `POST domains/refresh-ns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshNameServersResult {
    pub updated: u32,
}

/// Result of `POST domains/refresh-nawala`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshNawalaResult {
    pub checked: u32,
    pub updated: u32,
}

/// Result of `POST domains/bulk-mark-used`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkMarkUsedResult {
    pub matched: u32,
    pub updated: u32,
}

/// Last run of each background job, `None` when the job never ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    #[serde(default, with = "crate::utils::datetime")]
    pub last_domain_sync: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub last_name_server_refresh: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub last_nawala_check: Option<chrono::DateTime<chrono::Utc>>,
}
