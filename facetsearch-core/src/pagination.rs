use crate::models::SearchOptions;

/// "Show more" window over the visible items.
///
/// Sits on top of the filter output and never feeds back into it: the pager
/// only decides how many of the already-visible items get rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    limit: usize,
}

impl Pager {
    /// A zero page size is bumped to one so "show more" always makes progress
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            limit: page_size,
        }
    }

    /// A pager that shows everything
    pub fn unbounded() -> Self {
        Self {
            page_size: usize::MAX,
            limit: usize::MAX,
        }
    }

    pub fn from_options(options: &SearchOptions) -> Self {
        options
            .pagination_count
            .map(Pager::new)
            .unwrap_or_else(Pager::unbounded)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// How many of `active_count` matching items are shown
    pub fn visible_count(&self, active_count: usize) -> usize {
        active_count.min(self.limit)
    }

    pub fn window<'a, T>(&self, visible: &'a [T]) -> &'a [T] {
        &visible[..self.visible_count(visible.len())]
    }

    /// Whether the "show more" control should be offered
    pub fn has_more(&self, active_count: usize) -> bool {
        self.visible_count(active_count) < active_count
    }

    /// Grow the window by one page
    pub fn show_more(&mut self) {
        self.limit = self.limit.saturating_add(self.page_size);
    }
}

impl Default for Pager {
    fn default() -> Self {
        Pager::unbounded()
    }
}
