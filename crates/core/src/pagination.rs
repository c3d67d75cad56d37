//! Fixed-size page slicing for result lists and limit/offset clamping.

use serde::Serialize;

/// Page size used when displaying live duplicate-detection results.
pub const LIVE_PAGE_SIZE: usize = 10;

/// Default number of records per admin list page.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of records per admin list page.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index actually returned (clamped to the last page).
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into page `page` of `page_size`.
///
/// Out-of-range pages clamp to the last page; an empty list yields one empty
/// page. A `page_size` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start.min(total_items)..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Clamp a user-provided limit to `[1, max]`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
