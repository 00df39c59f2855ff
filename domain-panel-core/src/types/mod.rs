//! Type definitions

mod page;

pub use page::{DomainPage, DomainRow};

// Re-export the API library's public types
pub use domain_panel_api::{
    BulkMarkUsedResult, CpanelAccount, CreateGroupRequest, Domain, DomainCategory, DomainGroup,
    DomainGroupRef, DomainListQuery, DomainListResponse, DomainSortBy, LinkedCpanel, ListMeta,
    ListingScope, NawalaFilter, PageLimit, RefreshNameServersResult, RefreshNawalaResult,
    SortOrder, StatusFilter, SyncMetadata, SyncResult, UpdateDomainRequest, UpdateGroupRequest,
    UsedFilter,
};
