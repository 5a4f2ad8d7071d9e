//! Page-number pagination over a counted result set.
//!
//! The page requested by a client is only a hint: anything that is not a
//! number resolves to the first page, and numbers outside `1..=num_pages`
//! are clamped to the nearest valid page. An empty result set still has
//! one (empty) page.

use serde::Serialize;

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based number of the page that was actually served.
    pub number: i64,
    pub num_pages: i64,
    /// Total number of matching rows across all pages.
    pub count: i64,
    pub per_page: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<i64>,
    pub previous_page_number: Option<i64>,
}

impl Page {
    /// Resolve the raw `page` query value against a total row count.
    pub fn resolve(requested: Option<&str>, count: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let count = count.max(0);
        let num_pages = num_pages(count, per_page);

        let number = requested
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .clamp(1, num_pages);

        let has_next = number < num_pages;
        let has_previous = number > 1;

        Self {
            number,
            num_pages,
            count,
            per_page,
            has_next,
            has_previous,
            next_page_number: has_next.then_some(number + 1),
            previous_page_number: has_previous.then_some(number - 1),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    /// Row limit for this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

fn num_pages(count: i64, per_page: i64) -> i64 {
    if count == 0 {
        1
    } else {
        (count + per_page - 1) / per_page
    }
}
