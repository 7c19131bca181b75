//! Fixed-size page slicing of ordered result sets.

/// Items per page on every paginated endpoint.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th slice (1-indexed) of `items`.
///
/// Page `0` is treated as page `1`. Pages past the end yield an empty slice.
pub fn paginate<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    let index = page.max(1) as usize - 1;
    let start = index.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
