use serde::Serialize;

use crate::error::ApiError;
use crate::model::ResultsPage;

/// Rows requested per page of history.
pub const RESULTS_PAGE_SIZE: u32 = 15;

/// One history request as the endpoint expects it. Empty filter strings
/// mean "match all".
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultsQuery {
    pub page: u32,
    pub page_size: u32,
    pub subject_id: String,
    pub search: String,
}

/// Client state of the historical results listing.
///
/// Filters and pagination are coupled: changing a filter snaps the page
/// back to 1 so a now-invalid page number is never carried over. A
/// failed fetch keeps the previously displayed page.
#[derive(Debug)]
pub struct ResultsBrowser {
    page: u32,
    subject_filter: String,
    name_filter: String,
    current: Option<ResultsPage>,
    loading: bool,
    error: Option<String>,
}

impl Default for ResultsBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsBrowser {
    pub fn new() -> Self {
        Self {
            page: 1,
            subject_filter: String::new(),
            name_filter: String::new(),
            current: None,
            loading: false,
            error: None,
        }
    }

    /// Pages are 1-based; requests for page 0 are clamped up.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        if self.current.as_ref().is_some_and(|p| p.pagination.has_next) {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self
            .current
            .as_ref()
            .is_some_and(|p| p.pagination.has_previous)
        {
            self.page = (self.page - 1).max(1);
        }
    }

    /// Filter by subject id (stringly typed on the wire; empty = all).
    pub fn set_subject_filter(&mut self, subject_id: impl Into<String>) {
        let subject_id = subject_id.into();
        if subject_id != self.subject_filter {
            self.subject_filter = subject_id;
            self.page = 1;
        }
    }

    /// Filter by student name (empty = all).
    pub fn set_name_filter(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name_filter {
            self.name_filter = name;
            self.page = 1;
        }
    }

    /// The request matching the current page and filters.
    pub fn query(&self) -> ResultsQuery {
        ResultsQuery {
            page: self.page,
            page_size: RESULTS_PAGE_SIZE,
            subject_id: self.subject_filter.clone(),
            search: self.name_filter.clone(),
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies a finished fetch. Errors leave the prior page in place.
    pub fn apply(&mut self, outcome: Result<ResultsPage, ApiError>) {
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.current = Some(page);
                self.error = None;
            }
            Err(err) => {
                log::warn!("results fetch failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn current(&self) -> Option<&ResultsPage> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pagination;

    fn page_with(current_page: u32, has_next: bool, has_previous: bool) -> ResultsPage {
        ResultsPage {
            results: vec![],
            pagination: Pagination {
                current_page,
                total_pages: 3,
                total_count: 31,
                has_next,
                has_previous,
            },
        }
    }

    #[test]
    fn filter_change_resets_the_page() {
        let mut browser = ResultsBrowser::new();
        browser.set_page(3);
        browser.set_subject_filter("2");
        assert_eq!(browser.page(), 1);

        browser.set_page(2);
        browser.set_name_filter("ali");
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn page_change_preserves_filters() {
        let mut browser = ResultsBrowser::new();
        browser.set_subject_filter("2");
        browser.set_name_filter("ali");
        browser.set_page(4);

        let query = browser.query();
        assert_eq!(query.page, 4);
        assert_eq!(query.subject_id, "2");
        assert_eq!(query.search, "ali");
        assert_eq!(query.page_size, RESULTS_PAGE_SIZE);
    }

    #[test]
    fn clearing_one_filter_keeps_the_other_and_resets_the_page() {
        let mut browser = ResultsBrowser::new();
        browser.set_subject_filter("2");
        browser.set_name_filter("ali");
        browser.set_page(3);

        browser.set_subject_filter("");
        let query = browser.query();
        assert_eq!(query.page, 1);
        assert_eq!(query.subject_id, "");
        assert_eq!(query.search, "ali");
    }

    #[test]
    fn setting_the_same_filter_again_does_not_reset_the_page() {
        let mut browser = ResultsBrowser::new();
        browser.set_subject_filter("2");
        browser.set_page(3);

        browser.set_subject_filter("2");
        assert_eq!(browser.page(), 3);
    }

    #[test]
    fn failed_fetch_keeps_the_prior_page_visible() {
        let mut browser = ResultsBrowser::new();
        browser.begin_fetch();
        browser.apply(Ok(page_with(1, true, false)));
        assert!(browser.current().is_some());

        browser.set_page(2);
        browser.begin_fetch();
        assert!(browser.is_loading());
        browser.apply(Err(ApiError::Network {
            url: "http://test/results".to_string(),
            message: "connection refused".to_string(),
        }));

        assert!(!browser.is_loading());
        assert!(browser.error().is_some());
        let shown = browser.current().unwrap();
        assert_eq!(shown.pagination.current_page, 1);
    }

    #[test]
    fn page_stepping_follows_the_pagination_flags() {
        let mut browser = ResultsBrowser::new();
        browser.next_page();
        assert_eq!(browser.page(), 1);

        browser.apply(Ok(page_with(1, true, false)));
        browser.next_page();
        assert_eq!(browser.page(), 2);

        browser.apply(Ok(page_with(2, false, true)));
        browser.next_page();
        assert_eq!(browser.page(), 2);
        browser.previous_page();
        assert_eq!(browser.page(), 1);
    }
}
