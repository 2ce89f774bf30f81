use crate::types::PagedResponse;

/// Client-side accumulator for a paged backend listing.
///
/// Page zero replaces the buffer, later pages append, so a refresh and a
/// load-more share one code path. `has_more` reflects whether a page
/// exists after the last one absorbed.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    items: Vec<T>,
    next_page: u32,
    has_more: bool,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 0,
            has_more: false,
        }
    }
}

impl<T> Feed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// The page number to request next.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.next_page = 0;
        self.has_more = false;
    }

    /// Absorb one page of results. `page` is the page number that was
    /// requested, so callers can refresh by absorbing page zero.
    pub fn absorb(&mut self, page: u32, response: PagedResponse<T>) {
        self.absorb_filtered(page, response, |_| true);
    }

    /// Absorb one page, keeping only items the filter accepts. The page
    /// arithmetic still uses the server's totals, so filtered-out rows do
    /// not stall pagination.
    pub fn absorb_filtered(
        &mut self,
        page: u32,
        response: PagedResponse<T>,
        keep: impl Fn(&T) -> bool,
    ) {
        let PagedResponse {
            content,
            total_pages,
            ..
        } = response;
        let kept = content.into_iter().filter(|item| keep(item));
        if page == 0 {
            self.items = kept.collect();
        } else {
            self.items.extend(kept);
        }
        self.has_more = page + 1 < total_pages;
        self.next_page = page + 1;
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(page: u32, total_pages: u32, values: &[i32]) -> PagedResponse<i32> {
        PagedResponse {
            content: values.to_vec(),
            page,
            size: values.len() as u32,
            total_elements: 0,
            total_pages,
        }
    }

    #[test]
    fn test_page_zero_replaces_buffer() {
        let mut feed = Feed::new();
        feed.absorb(0, page_of(0, 2, &[1, 2]));
        feed.absorb(0, page_of(0, 2, &[3]));
        assert_eq!(feed.items(), &[3]);
    }

    #[test]
    fn test_later_pages_append() {
        let mut feed = Feed::new();
        feed.absorb(0, page_of(0, 2, &[1, 2]));
        feed.absorb(1, page_of(1, 2, &[3, 4]));
        assert_eq!(feed.items(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_has_more_boundary() {
        let mut feed = Feed::new();
        feed.absorb(0, page_of(0, 2, &[1]));
        assert!(feed.has_more());
        assert_eq!(feed.next_page(), 1);

        feed.absorb(1, page_of(1, 2, &[2]));
        assert!(!feed.has_more());
    }

    #[test]
    fn test_empty_result_has_no_more() {
        let mut feed: Feed<i32> = Feed::new();
        feed.absorb(0, page_of(0, 0, &[]));
        assert!(feed.is_empty());
        assert!(!feed.has_more());
    }

    #[test]
    fn test_filtered_absorb_keeps_server_pagination() {
        let mut feed = Feed::new();
        // Every row filtered out, but more pages exist server-side.
        feed.absorb_filtered(0, page_of(0, 3, &[1, 2]), |_| false);
        assert!(feed.is_empty());
        assert!(feed.has_more());
        assert_eq!(feed.next_page(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut feed = Feed::new();
        feed.absorb(0, page_of(0, 5, &[1]));
        feed.reset();
        assert!(feed.is_empty());
        assert!(!feed.has_more());
        assert_eq!(feed.next_page(), 0);
    }
}
