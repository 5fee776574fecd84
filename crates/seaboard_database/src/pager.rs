//! Page math for the listing views.

/// A clamped page window: the resolved page number, the page count, and
/// the row offset of the page's first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Resolved page number, `1 <= page <= num_pages`
    pub page: i64,
    /// Total page count, at least 1 even for an empty table
    pub num_pages: i64,
    /// Row offset of the first row on the page
    pub offset: i64,
}

/// Compute the page window for a listing.
///
/// Out-of-range requests (page 0, negative pages, pages past the end) are
/// clamped to the nearest valid page rather than rejected, so any integer
/// input yields a valid window. An empty table still has one (empty) page.
///
/// # Examples
///
/// ```
/// use seaboard_database::paginate;
///
/// let window = paginate(45, 5, 20);
/// assert_eq!(window.num_pages, 3);
/// assert_eq!(window.page, 3);
/// assert_eq!(window.offset, 40);
/// ```
pub fn paginate(total_count: i64, requested_page: i64, page_size: i64) -> PageWindow {
    let page_size = page_size.max(1);
    let total_count = total_count.max(0);

    let num_pages = ((total_count + page_size - 1) / page_size).max(1);
    let page = requested_page.clamp(1, num_pages);
    let offset = (page - 1) * page_size;

    PageWindow {
        page,
        num_pages,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_last_page_rounds_up() {
        assert_eq!(paginate(45, 1, 20).num_pages, 3);
        assert_eq!(paginate(40, 1, 20).num_pages, 2);
        assert_eq!(paginate(41, 1, 20).num_pages, 3);
    }

    #[test]
    fn empty_table_still_has_one_page() {
        let window = paginate(0, 1, 20);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        assert_eq!(paginate(45, 0, 20).page, 1);
        assert_eq!(paginate(45, -3, 20).page, 1);
        assert_eq!(paginate(45, 5, 20).page, 3);
        assert_eq!(paginate(45, i64::MAX, 20).page, 3);
    }

    #[test]
    fn offset_follows_the_clamped_page() {
        assert_eq!(paginate(45, 5, 20).offset, 40);
        assert_eq!(paginate(45, 2, 20).offset, 20);
        assert_eq!(paginate(45, -1, 20).offset, 0);
    }

    #[test]
    fn page_always_within_bounds() {
        for total in [0_i64, 1, 19, 20, 21, 45, 1000] {
            for requested in [i64::MIN, -1, 0, 1, 2, 3, 50, i64::MAX] {
                let window = paginate(total, requested, 20);
                assert!(window.page >= 1);
                assert!(window.page <= window.num_pages);
                assert!(window.num_pages >= 1);
            }
        }
    }
}
