/// Pagination Module
///
/// Page controls for list views: page count and neighbouring locations.
use serde::Serialize;

use crate::query::location_with_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based current page
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self { page: page.max(1), page_size, total }
    }

    /// Number of pages, at least 1 so an empty list still has a page
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages()).then(|| self.page + 1)
    }

    pub fn prev_location(&self, path: &str) -> Option<String> {
        self.prev_page().map(|page| location_with_page(path, page))
    }

    pub fn next_location(&self, path: &str) -> Option<String> {
        self.next_page().map(|page| location_with_page(path, page))
    }

    /// One-line footer such as `Page 2 of 5 (42 total) | prev: /events | next: /events?page=3`
    pub fn footer(&self, path: &str) -> String {
        let mut line = format!("Page {} of {} ({} total)", self.page, self.total_pages(), self.total);
        if let Some(prev) = self.prev_location(path) {
            line.push_str(&format!(" | prev: {}", prev));
        }
        if let Some(next) = self.next_location(path) {
            line.push_str(&format!(" | next: {}", next));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages(), 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages(), 1);
        assert_eq!(Pagination::new(1, 10, 42).total_pages(), 5);
    }

    #[test]
    fn test_neighbours() {
        let first = Pagination::new(1, 10, 42);
        assert_eq!(first.prev_page(), None);
        assert_eq!(first.next_location("/events").as_deref(), Some("/events?page=2"));

        let second = Pagination::new(2, 10, 42);
        assert_eq!(second.prev_location("/events").as_deref(), Some("/events"));

        let last = Pagination::new(5, 10, 42);
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn test_footer() {
        assert_eq!(
            Pagination::new(2, 10, 42).footer("/events"),
            "Page 2 of 5 (42 total) | prev: /events | next: /events?page=3"
        );
        assert_eq!(Pagination::new(1, 10, 0).footer("/events"), "Page 1 of 1 (0 total)");
    }
}
