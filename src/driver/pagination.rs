//! Cursor pagination.
//!
//! # States
//! ```text
//! HasMore(cursor) → fetch page → HasMore(next) | Done
//! ```
//! The loop starts in `HasMore(None)`, so at least one page is always
//! fetched. It reaches `Done` only when a page reports a null cursor.

use std::future::Future;

use crate::blockchain::types::Page;

/// Pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<C> {
    /// Another page must be fetched starting at this cursor.
    HasMore(Option<C>),
    Done,
}

/// Tracks the cursor across page fetches.
#[derive(Debug, Clone)]
pub struct Paginator<C> {
    state: PageState<C>,
    pages: usize,
}

impl<C: Clone> Paginator<C> {
    pub fn new() -> Self {
        Self {
            state: PageState::HasMore(None),
            pages: 0,
        }
    }

    /// Cursor for the next fetch, or `None` once done.
    pub fn pending(&self) -> Option<Option<C>> {
        match &self.state {
            PageState::HasMore(cursor) => Some(cursor.clone()),
            PageState::Done => None,
        }
    }

    /// Record a fetched page's `nextCursor`.
    pub fn advance(&mut self, next_cursor: Option<C>) {
        self.pages += 1;
        self.state = match next_cursor {
            Some(cursor) => PageState::HasMore(Some(cursor)),
            None => PageState::Done,
        };
    }

    pub fn state(&self) -> &PageState<C> {
        &self.state
    }

    pub fn pages(&self) -> usize {
        self.pages
    }
}

impl<C: Clone> Default for Paginator<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Items gathered by [`paginate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<U> {
    pub items: Vec<U>,
    pub pages: usize,
}

/// Fetch pages until the cursor is null, handing each page to `on_page`.
///
/// Whatever `on_page` yields is appended in page order. Any error from
/// `fetch` or `on_page` stops iteration immediately.
pub async fn paginate<T, C, U, E, F, FFut, H, HFut>(
    mut fetch: F,
    mut on_page: H,
) -> Result<Collected<U>, E>
where
    C: Clone,
    F: FnMut(Option<C>) -> FFut,
    FFut: Future<Output = Result<Page<T, C>, E>>,
    H: FnMut(Page<T, C>) -> HFut,
    HFut: Future<Output = Result<Vec<U>, E>>,
{
    let mut paginator = Paginator::new();
    let mut items = Vec::new();

    while let Some(cursor) = paginator.pending() {
        let page = fetch(cursor).await?;
        let next_cursor = page.next_cursor.clone();
        items.extend(on_page(page).await?);
        paginator.advance(next_cursor);
    }

    Ok(Collected {
        items,
        pages: paginator.pages(),
    })
}
