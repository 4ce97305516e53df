//! Previous/next button state for the item listing.

use crate::models::ItemPage;

/// Page cursor plus the last page the API returned.
#[derive(Debug, Clone)]
pub struct Pagination {
    page: u64,
    last: Option<PageSummary>,
}

#[derive(Debug, Clone, Copy)]
struct PageSummary {
    current_page: u64,
    total_pages: u64,
    item_count: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self { page: 1, last: None }
    }

    /// Page to request next.
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Remember the page the API returned.
    pub fn observe(&mut self, page: &ItemPage) {
        self.last = Some(PageSummary {
            current_page: page.current_page,
            total_pages: page.total_pages,
            item_count: page.items.len(),
        });
    }

    /// Back to page 1, e.g. after the filters change.
    pub fn reset(&mut self) {
        self.page = 1;
        self.last = None;
    }

    fn is_empty(&self) -> bool {
        self.last.is_none_or(|last| last.item_count == 0)
    }

    pub fn can_go_previous(&self) -> bool {
        self.page() > 1 && !self.is_empty()
    }

    pub fn can_go_next(&self) -> bool {
        match self.last {
            Some(last) => last.item_count > 0 && last.current_page != last.total_pages,
            None => false,
        }
    }

    /// Returns whether the page moved.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.page = self.page() - 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.page = self.page() + 1;
        true
    }

    /// "Page X of Y", with Y at least 1.
    pub fn label(&self) -> String {
        let total = self.last.map_or(0, |last| last.total_pages).max(1);
        format!("Page {} of {}", self.page(), total)
    }
}
