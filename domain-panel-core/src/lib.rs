//! Domain Panel Core Library
//!
//! Business logic for the domain inventory panel:
//! - Lifecycle classification (status label and recommended row action)
//! - Listing view state and classified listing pages
//! - Domain, cPanel, group and sync services on top of [`DomainApi`]
//!
//! The API client and the clock are injected through [`ServiceContext`], so
//! every service can run against an in-memory mock and a pinned time.

pub mod error;
pub mod lifecycle;
pub mod listing;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use domain_panel_api::DomainApi;
pub use error::{CoreError, CoreResult};
pub use lifecycle::{
    classify, list_action, status_display, DomainClassification, DomainListAction,
    DomainStatusDisplay,
};
pub use listing::DomainListState;
pub use services::{CpanelService, DomainService, GroupService, ServiceContext, SyncService};
pub use traits::{Clock, FixedClock, SystemClock};
