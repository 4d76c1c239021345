//! Search and pagination shared by the list views.

use serde::Serialize;

use wapi_common::traits::Entity;

/// Keep the entries matching `term`. A blank term keeps everything.
pub fn search<T: Entity>(items: Vec<T>, term: &str) -> Vec<T> {
    let term = term.trim();
    if term.is_empty() {
        return items;
    }
    items.into_iter().filter(|i| i.matches_search(term)).collect()
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages`.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(all: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total = all.len();
        let total_pages = total.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));
        let items = all
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();
        Self { items, page, per_page, total, total_pages }
    }

    /// The "Showing X to Y of Z entries" line, 1-based and inclusive.
    pub fn showing(&self) -> (usize, usize, usize) {
        if self.total == 0 {
            return (0, 0, 0);
        }
        let from = (self.page - 1) * self.per_page + 1;
        let to = (self.page * self.per_page).min(self.total);
        (from, to, self.total)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_short() {
        let p = Paginated::new((1..=23).collect::<Vec<_>>(), 3, 10);
        assert_eq!(p.items, vec![21, 22, 23]);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.showing(), (21, 23, 23));
        assert!(!p.has_next());
        assert!(p.has_previous());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let p = Paginated::new(vec!['a', 'b'], 9, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.items, vec!['a', 'b']);

        let empty: Paginated<u8> = Paginated::new(vec![], 0, 10);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.showing(), (0, 0, 0));
    }
}
