//! Length-aware pagination over a search result.

use std::cell::{Ref, RefMut};

use crate::error::{DevToolsError, Result};
use crate::search::result::{Hit, SearchResult, SharedItems};

/// Page size and page number, with the window arithmetic derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    per_page: u64,
    page: u64,
    offset: u64,
}

impl PageWindow {
    /// Create a window; both `per_page` and `page` must be at least 1 and
    /// the offset of the page must fit in a `u64`.
    pub fn new(per_page: u64, page: u64) -> Result<Self> {
        if per_page == 0 {
            return Err(DevToolsError::invalid_argument(
                "page size must be at least 1",
            ));
        }
        if page == 0 {
            return Err(DevToolsError::invalid_argument(
                "page number must be at least 1",
            ));
        }
        let offset = per_page.checked_mul(page - 1).ok_or_else(|| {
            DevToolsError::invalid_argument(format!(
                "page {page} of size {per_page} is out of range"
            ))
        })?;
        Ok(PageWindow {
            per_page,
            page,
            offset,
        })
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Offset of the first document of this page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of pages needed for `total` documents; 0 when there are none.
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

/// One page of a search result.
///
/// The item list is the result's hit list: replacing or editing the items
/// is visible through [`result`](Self::result) and the other way round.
/// [`hydrate`](Self::hydrate) turns the raw hits into other records while
/// keeping the two views on one buffer.
#[derive(Debug)]
pub struct Paginator<T = Hit> {
    result: SearchResult<T>,
    items: SharedItems<T>,
    window: PageWindow,
}

impl<T> Clone for Paginator<T> {
    fn clone(&self) -> Self {
        Paginator {
            result: self.result.clone(),
            items: self.items.clone(),
            window: self.window,
        }
    }
}

impl<T> Paginator<T> {
    /// Wrap a result fetched for `window`.
    pub fn new(result: SearchResult<T>, window: PageWindow) -> Self {
        let items = result.shared_hits();
        Paginator {
            result,
            items,
            window,
        }
    }

    pub fn current_page(&self) -> u64 {
        self.window.page()
    }

    pub fn per_page(&self) -> u64 {
        self.window.per_page()
    }

    /// Total number of matching documents.
    pub fn total(&self) -> u64 {
        self.result.total_hits()
    }

    pub fn last_page(&self) -> u64 {
        self.window.last_page(self.total())
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page() < self.last_page()
    }

    /// Borrow the items of this page.
    pub fn items(&self) -> Ref<'_, Vec<T>> {
        self.items.borrow()
    }

    /// Borrow the items mutably for in-place edits.
    pub fn items_mut(&self) -> RefMut<'_, Vec<T>> {
        self.items.borrow_mut()
    }

    /// Replace the items; the underlying result observes the new list.
    pub fn set_items(&self, items: Vec<T>) {
        self.items.replace(items);
    }

    /// Replace the items with records of another type.
    ///
    /// `hydrate` receives the current items; its output becomes the item
    /// list of the returned paginator and the hit list of its result.
    pub fn hydrate<U, F>(self, hydrate: F) -> Result<Paginator<U>>
    where
        F: FnOnce(Vec<T>) -> Result<Vec<U>>,
    {
        let Paginator { result, window, .. } = self;
        Ok(Paginator::new(result.hydrate(hydrate)?, window))
    }

    /// Number of items on this page.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page() <= 1
    }

    /// 1-based position of the first item of this page, if any.
    pub fn first_item(&self) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        self.window.offset().checked_add(1)
    }

    /// 1-based position of the last item of this page, if any.
    pub fn last_item(&self) -> Option<u64> {
        let rest = u64::try_from(self.count()).ok()?.checked_sub(1)?;
        self.first_item()?.checked_add(rest)
    }

    pub fn next_page(&self) -> Option<u64> {
        if !self.has_more_pages() {
            return None;
        }
        self.current_page().checked_add(1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (!self.on_first_page()).then(|| self.current_page() - 1)
    }

    /// The wrapped result.
    pub fn result(&self) -> &SearchResult<T> {
        &self.result
    }

    pub fn into_result(self) -> SearchResult<T> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_of(total: u64, ids: &[&str], per_page: u64, page: u64) -> Result<Paginator> {
        let hits: Vec<_> = ids.iter().map(|id| json!({"_id": id})).collect();
        let result = SearchResult::from_response(json!({
            "hits": {"total": {"value": total}, "hits": hits}
        }))?;
        Ok(Paginator::new(result, PageWindow::new(per_page, page)?))
    }

    #[test]
    fn test_window_arithmetic() -> Result<()> {
        let window = PageWindow::new(25, 3)?;
        assert_eq!(window.offset(), 50);
        assert_eq!(window.last_page(97), 4);
        assert_eq!(window.last_page(100), 4);
        assert_eq!(window.last_page(0), 0);
        assert_eq!(PageWindow::new(25, 1)?.offset(), 0);
        Ok(())
    }

    #[test]
    fn test_oversized_window_rejected() -> Result<()> {
        assert!(matches!(
            PageWindow::new(u64::MAX, 2),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(PageWindow::new(2, u64::MAX).is_err());

        let widest = PageWindow::new(u64::MAX, 1)?;
        assert_eq!(widest.offset(), 0);
        assert_eq!(widest.last_page(10), 1);
        Ok(())
    }

    #[test]
    fn test_item_positions_near_the_limit() -> Result<()> {
        let result = SearchResult::from_response(json!({
            "hits": {"total": u64::MAX, "hits": [{"_id": "a"}, {"_id": "b"}]}
        }))?;
        let paginator = Paginator::new(result, PageWindow::new(1, u64::MAX)?);

        assert_eq!(paginator.first_item(), Some(u64::MAX));
        assert_eq!(paginator.last_item(), None);
        assert_eq!(paginator.next_page(), None);
        Ok(())
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            PageWindow::new(0, 1),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(matches!(
            PageWindow::new(10, 0),
            Err(DevToolsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_page_navigation() -> Result<()> {
        let paginator = page_of(97, &["a", "b"], 25, 3)?;

        assert_eq!(paginator.last_page(), 4);
        assert!(paginator.has_more_pages());
        assert_eq!(paginator.next_page(), Some(4));
        assert_eq!(paginator.previous_page(), Some(2));
        assert_eq!(paginator.first_item(), Some(51));
        assert_eq!(paginator.last_item(), Some(52));

        let last = page_of(97, &["z"], 25, 4)?;
        assert!(!last.has_more_pages());
        assert_eq!(last.next_page(), None);

        let empty = page_of(0, &[], 25, 1)?;
        assert!(empty.on_first_page());
        assert_eq!(empty.previous_page(), None);
        assert_eq!(empty.first_item(), None);
        Ok(())
    }

    #[test]
    fn test_items_shared_with_result() -> Result<()> {
        let paginator = page_of(2, &["a", "b"], 10, 1)?;

        paginator.set_items(vec![Hit::new("hydrated")]);
        assert_eq!(paginator.result().hits()[0].id, "hydrated");

        paginator.result().hits_mut().push(Hit::new("late"));
        assert_eq!(paginator.count(), 2);
        Ok(())
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Product {
        id: u32,
        name: String,
    }

    #[test]
    fn test_hydrated_items_shared_with_result() -> Result<()> {
        let paginator = page_of(40, &["7", "9"], 2, 3)?;

        let products = paginator.hydrate(|hits| {
            hits.into_iter()
                .map(|hit| -> Result<Product> {
                    let id = hit.id.parse::<u32>().map_err(|_| {
                        DevToolsError::invalid_argument(format!("bad product id {}", hit.id))
                    })?;
                    Ok(Product {
                        id,
                        name: format!("product {id}"),
                    })
                })
                .collect()
        })?;

        assert_eq!(products.current_page(), 3);
        assert_eq!(products.total(), 40);
        assert_eq!(products.first_item(), Some(5));
        assert_eq!(products.items()[1].id, 9);
        assert_eq!(products.result().hits()[0].name, "product 7");

        products.items_mut()[0].name = "espresso machine".to_string();
        assert_eq!(products.result().hits()[0].name, "espresso machine");

        products.result().set_hits(vec![Product {
            id: 1,
            name: "grinder".to_string(),
        }]);
        assert_eq!(products.count(), 1);
        assert_eq!(products.items()[0].name, "grinder");
        Ok(())
    }
}
