//! Listing query serialization.
//!
//! [`DomainListQuery`] is the filter/sort/page request for the domain listing
//! endpoints. [`DomainListQuery::to_query_string`] turns it into the canonical
//! query string the backend expects; the output doubles as a cache key, so
//! equal queries always serialize to the same bytes.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::types::PAGE_SIZE_OPTIONS;

// ============ Field values ============

/// Sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainSortBy {
    Name,
    ExpiryDate,
    Created,
    Status,
}

impl DomainSortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ExpiryDate => "expiryDate",
            Self::Created => "created",
            Self::Status => "status",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Lifecycle filter. `All` is the "no filter" sentinel and is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    All,
    Expired,
    /// Expiring within the renewal window.
    NeedsRenewal,
    Active,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Expired => "expired",
            Self::NeedsRenewal => "needsRenewal",
            Self::Active => "active",
        }
    }
}

/// Usage filter. Unlike the other filters, `All` is sent explicitly because the
/// backend defaults to used domains only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsedFilter {
    Used,
    NotUsed,
    All,
}

impl UsedFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Used => "used",
            Self::NotUsed => "notUsed",
            Self::All => "all",
        }
    }
}

/// Nawala (content blocking) filter. `All` is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NawalaFilter {
    All,
    Blocked,
    NotBlocked,
}

impl NawalaFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Blocked => "blocked",
            Self::NotBlocked => "notBlocked",
        }
    }
}

/// Page size accepted by the listing endpoints (see [`PAGE_SIZE_OPTIONS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageLimit {
    Ten,
    Fifty,
    Hundred,
}

impl PageLimit {
    pub fn value(self) -> u32 {
        match self {
            Self::Ten => PAGE_SIZE_OPTIONS[0],
            Self::Fifty => PAGE_SIZE_OPTIONS[1],
            Self::Hundred => PAGE_SIZE_OPTIONS[2],
        }
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(format!(
                "unsupported page size {other}, expected one of {PAGE_SIZE_OPTIONS:?}"
            )),
        }
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.value()
    }
}

// ============ Fields & scopes ============

/// A query parameter recognised by at least one listing endpoint.
///
/// [`QueryField::ALL`] is the canonical emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    SortBy,
    SortOrder,
    Search,
    Status,
    UsedFilter,
    NawalaFilter,
    Page,
    Limit,
    UnlinkedOnly,
}

impl QueryField {
    pub const ALL: [Self; 9] = [
        Self::SortBy,
        Self::SortOrder,
        Self::Search,
        Self::Status,
        Self::UsedFilter,
        Self::NawalaFilter,
        Self::Page,
        Self::Limit,
        Self::UnlinkedOnly,
    ];

    /// Parameter name on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Self::SortBy => "sortBy",
            Self::SortOrder => "sortOrder",
            Self::Search => "search",
            Self::Status => "status",
            Self::UsedFilter => "usedFilter",
            Self::NawalaFilter => "nawalaFilter",
            Self::Page => "page",
            Self::Limit => "limit",
            Self::UnlinkedOnly => "unlinkedOnly",
        }
    }
}

/// Which listing endpoint a query is built for. Each scope recognises a subset
/// of [`QueryField::ALL`]; unrecognised fields are silently left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingScope {
    /// `GET domains`
    Domains,
    /// `GET cpanel/{id}/domains`
    CpanelDomains,
}

impl ListingScope {
    pub fn recognizes(self, field: QueryField) -> bool {
        match self {
            Self::Domains => true,
            Self::CpanelDomains => {
                !matches!(field, QueryField::NawalaFilter | QueryField::UnlinkedOnly)
            }
        }
    }
}

// ============ Query ============

/// Filter/sort/page request for a domain listing.
///
/// Every recognised parameter is declared here; there is no open-ended map,
/// so a misspelled filter is a compile error instead of a silently dropped key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<DomainSortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Sent verbatim; trimming is the caller's job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_filter: Option<UsedFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nawala_filter: Option<NawalaFilter>,
    /// 1-indexed; 0 is treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<PageLimit>,
    /// Only domains without a linked cPanel account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlinked_only: Option<bool>,
}

impl DomainListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: DomainSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn used_filter(mut self, used_filter: UsedFilter) -> Self {
        self.used_filter = Some(used_filter);
        self
    }

    #[must_use]
    pub fn nawala_filter(mut self, nawala_filter: NawalaFilter) -> Self {
        self.nawala_filter = Some(nawala_filter);
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: PageLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn unlinked_only(mut self, unlinked_only: bool) -> Self {
        self.unlinked_only = Some(unlinked_only);
        self
    }

    /// Wire value for `field`, or `None` when the parameter must be omitted.
    fn value_for(&self, field: QueryField) -> Option<String> {
        match field {
            QueryField::SortBy => self.sort_by.map(|v| v.as_str().to_string()),
            QueryField::SortOrder => self.sort_order.map(|v| v.as_str().to_string()),
            QueryField::Search => self.search.clone().filter(|s| !s.is_empty()),
            QueryField::Status => self
                .status
                .filter(|s| *s != StatusFilter::All)
                .map(|v| v.as_str().to_string()),
            QueryField::UsedFilter => self.used_filter.map(|v| v.as_str().to_string()),
            QueryField::NawalaFilter => self
                .nawala_filter
                .filter(|n| *n != NawalaFilter::All)
                .map(|v| v.as_str().to_string()),
            QueryField::Page => self.page.filter(|p| *p >= 1).map(|p| p.to_string()),
            QueryField::Limit => self.limit.map(|l| l.value().to_string()),
            QueryField::UnlinkedOnly => self
                .unlinked_only
                .filter(|u| *u)
                .map(|_| "true".to_string()),
        }
    }

    /// Parameters that apply under `scope`, in canonical order.
    pub fn to_pairs(&self, scope: ListingScope) -> Vec<(&'static str, String)> {
        QueryField::ALL
            .iter()
            .filter(|field| scope.recognizes(**field))
            .filter_map(|field| self.value_for(*field).map(|v| (field.key(), v)))
            .collect()
    }

    /// Canonical query string: `?k=v&k=v` (form-urlencoded), or `""` when no
    /// parameter applies.
    pub fn to_query_string(&self, scope: ListingScope) -> String {
        let pairs = self.to_pairs(scope);
        if pairs.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }
}
