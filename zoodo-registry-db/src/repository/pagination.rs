/// Offset-based pagination request, used when listing the transaction log
///
/// # Example
/// ```
/// use zoodo_registry_db::repository::pagination::PageRequest;
///
/// let first = PageRequest::new(20, 0);
/// let second = PageRequest::for_page(20, 2);
/// assert_eq!(second.offset, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Create a page request for a 1-based page number
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        let page_number = page_number.max(1);
        Self {
            limit: page_size,
            offset: (page_number - 1).saturating_mul(page_size),
        }
    }

    /// The `start..end` range this request selects out of `total` items
    pub fn bounds(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(total);
        let end = start.saturating_add(self.limit).min(total);
        start..end
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// Paginated response containing items and metadata
///
/// # Example
/// ```
/// use zoodo_registry_db::repository::pagination::Page;
///
/// let page = Page::new(vec![1, 2, 3], 100, 20, 0);
/// assert!(page.has_more());
/// assert_eq!(page.total_pages(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Maximum number of items per page
    pub limit: usize,
    /// Number of items skipped before this page
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Convert the items, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total
    }

    /// Current page number (1-based)
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp_to_total() {
        assert_eq!(PageRequest::new(10, 0).bounds(25), 0..10);
        assert_eq!(PageRequest::new(10, 20).bounds(25), 20..25);
        assert_eq!(PageRequest::new(10, 40).bounds(25), 25..25);
        assert_eq!(PageRequest::new(usize::MAX, 5).bounds(25), 5..25);
    }

    #[test]
    fn test_for_page_treats_zero_as_first_page() {
        assert_eq!(PageRequest::for_page(20, 0), PageRequest::new(20, 0));
        assert_eq!(PageRequest::for_page(20, 3).offset, 40);
    }

    #[test]
    fn test_for_page_huge_page_number_saturates() {
        let request = PageRequest::for_page(20, usize::MAX);
        assert_eq!(request.offset, usize::MAX);
        assert_eq!(request.bounds(25), 25..25);

        let page: Page<u64> = Page::new(Vec::new(), 25, request.limit, request.offset);
        assert!(!page.has_more());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1u64, 2, 3], 7, 3, 3).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_more());
    }
}
