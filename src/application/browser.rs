// src/application/browser.rs
use crate::application::Pagination;
use crate::domain::{DomainError, NotesPage, SearchQuery, TagFilter};
use tracing::debug;

/// Filter context of the list view: committed search text, tag filter and
/// pagination. Produces the `SearchQuery` to fetch.
#[derive(Debug, Clone, Default)]
pub struct NotesBrowser {
    text: String,
    tag: TagFilter,
    pagination: Pagination,
}

impl NotesBrowser {
    pub fn new(tag: TagFilter) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> TagFilter {
        self.tag
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Apply a debounced search term. Returns whether the filter changed.
    pub fn commit_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        debug!(from = %self.text, to = %text, "Search term changed");
        self.text = text;
        self.pagination.reset_on_filter_change();
        true
    }

    /// Switch tag filter. Returns whether the filter changed.
    pub fn set_tag(&mut self, tag: TagFilter) -> bool {
        if tag == self.tag {
            return false;
        }
        debug!(from = %self.tag, to = %tag, "Tag filter changed");
        self.tag = tag;
        self.pagination.reset_on_filter_change();
        true
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), DomainError> {
        self.pagination.set_page(page)
    }

    pub fn next_page(&mut self) -> Result<(), DomainError> {
        self.pagination.next()
    }

    pub fn previous_page(&mut self) -> Result<(), DomainError> {
        self.pagination.previous()
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone(), self.pagination.current_page(), self.tag)
    }

    /// Record the page count of the page that became visible.
    pub fn observe(&mut self, page: &NotesPage) {
        self.pagination.update_total_pages(page.total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;

    fn on_page_three() -> NotesBrowser {
        let mut browser = NotesBrowser::new(TagFilter::All);
        browser.observe(&NotesPage {
            notes: vec![],
            page: 1,
            total_pages: 5,
        });
        browser.set_page(3).expect("Page 3 exists");
        browser
    }

    #[test]
    fn given_later_page_when_search_committed_then_resets_to_first() {
        let mut browser = on_page_three();

        let changed = browser.commit_search("cat");

        assert!(changed);
        assert_eq!(browser.query(), SearchQuery::new("cat", 1, TagFilter::All));
    }

    #[test]
    fn given_later_page_when_tag_changes_then_resets_to_first() {
        let mut browser = on_page_three();

        assert!(browser.set_tag(TagFilter::Only(Tag::Work)));

        assert_eq!(browser.query().page, 1);
        assert_eq!(browser.query().tag, TagFilter::Only(Tag::Work));
    }

    #[test]
    fn given_same_search_when_committed_again_then_page_kept() {
        let mut browser = on_page_three();
        browser.commit_search("");

        assert_eq!(browser.query().page, 3);
    }

    #[test]
    fn given_same_tag_when_set_again_then_page_kept() {
        let mut browser = on_page_three();

        assert!(!browser.set_tag(TagFilter::All));
        assert_eq!(browser.query().page, 3);
    }

    #[test]
    fn given_out_of_range_page_when_setting_then_query_unchanged() {
        let mut browser = on_page_three();
        let before = browser.query();

        assert!(browser.set_page(6).is_err());
        assert!(browser.set_page(0).is_err());
        assert_eq!(browser.query(), before);
    }
}
