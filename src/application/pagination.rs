// src/application/pagination.rs
use crate::domain::DomainError;
use tracing::debug;

/// Current page and the page count reported by the last applied response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Move to page `n`; rejected without state change outside `1..=total_pages`.
    pub fn set_page(&mut self, n: u32) -> Result<(), DomainError> {
        if n < 1 || n > self.total_pages {
            debug!(requested = n, total = self.total_pages, "Rejecting page change");
            return Err(DomainError::PageOutOfRange {
                requested: n,
                total: self.total_pages,
            });
        }
        self.current_page = n;
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), DomainError> {
        self.set_page(self.current_page.saturating_add(1))
    }

    pub fn previous(&mut self) -> Result<(), DomainError> {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn reset_on_filter_change(&mut self) {
        self.current_page = 1;
    }

    pub fn update_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
    }

    /// Controls are only worth showing when there is somewhere to go.
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}
