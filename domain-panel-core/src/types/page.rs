//! Classified listing pages

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use domain_panel_api::{Domain, DomainListResponse, ListMeta};

use crate::lifecycle::{classify, DomainClassification};

/// A domain together with its derived status and action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRow {
    pub domain: Domain,
    pub classification: DomainClassification,
}

/// One classified page of a domain listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPage {
    pub rows: Vec<DomainRow>,
    pub meta: ListMeta,
}

impl DomainPage {
    /// Classify every domain of `response` against the same `now`.
    #[must_use]
    pub fn from_response(response: DomainListResponse, now: DateTime<FixedOffset>) -> Self {
        let rows = response
            .data
            .into_iter()
            .map(|domain| DomainRow {
                classification: classify(&domain, now),
                domain,
            })
            .collect();
        Self {
            rows,
            meta: response.meta,
        }
    }

    /// Pager label such as `"11-20 of 57"`, or `None` for an empty result.
    pub fn range_label(&self) -> Option<String> {
        let ListMeta {
            total, page, limit, ..
        } = self.meta;
        if total == 0 {
            return None;
        }
        let start = page.saturating_sub(1).saturating_mul(limit).saturating_add(1);
        let end = page.saturating_mul(limit).min(total);
        Some(format!("{start}-{end} of {total}"))
    }
}
