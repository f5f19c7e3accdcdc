//! Page arithmetic for the employee table.

pub const ITEMS_PER_PAGE: usize = 10;

/// Number of pages for `count` rows, never less than one.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One entry of the page-number strip under the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number { page: usize, active: bool },
    Ellipsis,
}

/// A resolved page of rows plus the numbers needed to render its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub rows: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub start: usize,
    pub end: usize,
}

impl<T> PageWindow<T> {
    /// Slices `[ (page-1)*per_page, page*per_page )` out of `items` after clamping.
    pub fn slice(items: Vec<T>, requested_page: usize, per_page: usize) -> Self {
        let total_rows = items.len();
        let total_pages = total_pages(total_rows, per_page);
        let current_page = clamp_page(requested_page, total_pages);
        let start = (current_page - 1) * per_page;
        let end = start + per_page;
        let rows = items.into_iter().skip(start).take(per_page).collect();
        PageWindow {
            rows,
            current_page,
            total_pages,
            total_rows,
            start,
            end,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// "Showing 11 to 12 of 12 employees"; `None` when nothing matched.
    pub fn summary(&self) -> Option<String> {
        if self.total_rows == 0 {
            return None;
        }
        Some(format!(
            "Showing {} to {} of {} employees",
            self.start + 1,
            self.end.min(self.total_rows),
            self.total_rows
        ))
    }

    /// First, last and neighbouring pages; gaps of two collapse to an ellipsis.
    pub fn links(&self) -> Vec<PageLink> {
        let current = self.current_page;
        (1..=self.total_pages)
            .filter_map(|page| {
                if page == 1 || page == self.total_pages || page.abs_diff(current) <= 1 {
                    Some(PageLink::Number {
                        page,
                        active: page == current,
                    })
                } else if page.abs_diff(current) == 2 {
                    Some(PageLink::Ellipsis)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    #[test]
    fn total_pages_matches_ceiling_formula() {
        for count in 0..250usize {
            let expected = std::cmp::max(1, (count + 9) / 10);
            assert_eq!(total_pages(count, 10), expected, "count {count}");
        }
    }

    #[test]
    fn stale_page_clamps_to_last() {
        let window = PageWindow::slice((1..=12).collect::<Vec<_>>(), 5, 10);
        assert_eq!(window.current_page, 2);
        assert_eq!(window.rows, vec![11, 12]);
    }

    #[test]
    fn empty_input_is_page_one_of_one() {
        let window = PageWindow::<u32>::slice(Vec::new(), 3, 10);
        assert_eq!(window.current_page, 1);
        assert_eq!(window.total_pages, 1);
        assert!(window.rows.is_empty());
        assert_eq!(window.summary(), None);
    }

    #[test]
    fn summary_caps_end_at_total() {
        let window = PageWindow::slice((1..=12).collect::<Vec<_>>(), 2, 10);
        assert_eq!(
            window.summary().as_deref(),
            Some("Showing 11 to 12 of 12 employees")
        );
        assert!(window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn links_collapse_distant_pages() {
        let window = PageWindow::slice((1..=100).collect::<Vec<_>>(), 5, 10);
        assert_eq!(
            window.links(),
            vec![
                PageLink::Number { page: 1, active: false },
                PageLink::Ellipsis,
                PageLink::Number { page: 4, active: false },
                PageLink::Number { page: 5, active: true },
                PageLink::Number { page: 6, active: false },
                PageLink::Ellipsis,
                PageLink::Number { page: 10, active: false },
            ]
        );
    }

    #[test]
    fn links_on_first_page() {
        let window = PageWindow::slice((1..=30).collect::<Vec<_>>(), 1, 10);
        assert_eq!(
            window.links(),
            vec![
                PageLink::Number { page: 1, active: true },
                PageLink::Number { page: 2, active: false },
                PageLink::Number { page: 3, active: false },
            ]
        );
    }
}
