//! Listing view state.
//!
//! The listing screen owns one [`DomainListState`] and hands a snapshot to the
//! query builder on every fetch. Changing any filter, the sort or the page size
//! jumps back to the first page.

use serde::{Deserialize, Serialize};

use domain_panel_api::{
    DomainListQuery, DomainSortBy, NawalaFilter, PageLimit, SortOrder, StatusFilter, UsedFilter,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListState {
    pub sort_by: DomainSortBy,
    pub sort_order: SortOrder,
    /// Trimmed; empty means no search.
    pub search: String,
    pub status: StatusFilter,
    pub used_filter: UsedFilter,
    pub nawala_filter: NawalaFilter,
    pub page: u32,
    pub limit: PageLimit,
    pub unlinked_only: bool,
}

impl Default for DomainListState {
    /// Name ascending, used domains only, first page of ten.
    fn default() -> Self {
        Self {
            sort_by: DomainSortBy::Name,
            sort_order: SortOrder::Asc,
            search: String::new(),
            status: StatusFilter::All,
            used_filter: UsedFilter::Used,
            nawala_filter: NawalaFilter::All,
            page: 1,
            limit: PageLimit::Ten,
            unlinked_only: false,
        }
    }
}

impl DomainListState {
    pub fn set_search(&mut self, input: &str) {
        self.search = input.trim().to_string();
        self.page = 1;
    }

    pub fn set_sort_by(&mut self, sort_by: DomainSortBy) {
        self.sort_by = sort_by;
        self.page = 1;
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_used_filter(&mut self, used_filter: UsedFilter) {
        self.used_filter = used_filter;
        self.page = 1;
    }

    pub fn set_nawala_filter(&mut self, nawala_filter: NawalaFilter) {
        self.nawala_filter = nawala_filter;
        self.page = 1;
    }

    pub fn set_unlinked_only(&mut self, unlinked_only: bool) {
        self.unlinked_only = unlinked_only;
        self.page = 1;
    }

    pub fn set_limit(&mut self, limit: PageLimit) {
        self.limit = limit;
        self.page = 1;
    }

    /// Pages below 1 are clamped to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Snapshot for the query builder.
    pub fn to_query(&self) -> DomainListQuery {
        let mut query = DomainListQuery::new()
            .sort_by(self.sort_by)
            .sort_order(self.sort_order)
            .status(self.status)
            .used_filter(self.used_filter)
            .nawala_filter(self.nawala_filter)
            .page(self.page)
            .limit(self.limit);
        if !self.search.is_empty() {
            query = query.search(self.search.clone());
        }
        if self.unlinked_only {
            query = query.unlinked_only(true);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_panel_api::ListingScope;

    #[test]
    fn default_state_query() {
        let qs = DomainListState::default()
            .to_query()
            .to_query_string(ListingScope::Domains);
        assert_eq!(qs, "?sortBy=name&sortOrder=asc&usedFilter=used&page=1&limit=10");
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = DomainListState::default();
        state.set_page(4);
        state.set_status(StatusFilter::Expired);
        assert_eq!(state.page, 1);

        state.set_page(3);
        state.set_limit(PageLimit::Hundred);
        assert_eq!(state.page, 1);

        state.set_page(2);
        state.set_search("  shop  ");
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "shop");
    }

    #[test]
    fn blank_search_is_dropped() {
        let mut state = DomainListState::default();
        state.set_search("   ");
        assert_eq!(state.to_query().search, None);
    }

    #[test]
    fn sort_changes_reset_page() {
        let mut state = DomainListState::default();
        state.set_page(5);
        state.set_sort_by(DomainSortBy::ExpiryDate);
        assert_eq!(state.page, 1);
        state.set_page(5);
        state.set_sort_order(SortOrder::Desc);
        assert_eq!(state.page, 1);
        assert_eq!(
            state.to_query().to_query_string(ListingScope::Domains),
            "?sortBy=expiryDate&sortOrder=desc&usedFilter=used&page=1&limit=10"
        );
    }

    #[test]
    fn page_zero_clamps() {
        let mut state = DomainListState::default();
        state.set_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn unlinked_only_reaches_query() {
        let mut state = DomainListState::default();
        state.set_unlinked_only(true);
        assert_eq!(state.to_query().unlinked_only, Some(true));
        state.set_unlinked_only(false);
        assert_eq!(state.to_query().unlinked_only, None);
    }
}
