//! Page-at-a-time iteration over a locator-paged result

use super::errors::TransportError;
use super::page::{Page, QueryLocator};

/// Performs one page fetch against the remote store
///
/// `locator == None` requests the first page. Transport, authentication and
/// timeouts are the implementor's concern.
pub trait PageSource {
    fn fetch_page(&mut self, query: &str, locator: Option<&QueryLocator>) -> Result<Page, TransportError>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, query: &str, locator: Option<&QueryLocator>) -> Result<Page, TransportError> {
        (**self).fetch_page(query, locator)
    }
}

/// Yields the pages of one query in order, replaying each locator verbatim.
///
/// Each fetch is a blocking round trip; nothing is prefetched. After the
/// first error the stream is finished.
pub struct PageStream<'a, S: PageSource + ?Sized> {
    source: &'a mut S,
    query: &'a str,
    first_page: Option<Page>,
    next_locator: Option<QueryLocator>,
    started: bool,
    finished: bool,
    pages_fetched: usize,
}

impl<'a, S: PageSource + ?Sized> PageStream<'a, S> {
    /// A stream that fetches the first page itself
    pub fn new(source: &'a mut S, query: &'a str) -> Self {
        Self {
            source,
            query,
            first_page: None,
            next_locator: None,
            started: false,
            finished: false,
            pages_fetched: 0,
        }
    }

    /// A stream starting from a first page the caller already fetched
    pub fn resume_from(source: &'a mut S, query: &'a str, first_page: Page) -> Self {
        Self {
            first_page: Some(first_page),
            ..Self::new(source, query)
        }
    }

    /// True once a page marked done was yielded (or a fetch failed)
    pub fn is_done(&self) -> bool {
        self.finished
    }

    /// Locator of the next unfetched page, if more pages remain
    pub fn next_locator(&self) -> Option<&QueryLocator> {
        self.next_locator.as_ref()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch and return the next page, or `None` once the result is done
    pub fn next_page(&mut self) -> Result<Option<Page>, TransportError> {
        if self.finished {
            return Ok(None);
        }

        let fetched = if !self.started {
            self.started = true;
            match self.first_page.take() {
                Some(page) => Ok(page),
                None => self.source.fetch_page(self.query, None),
            }
        } else {
            match self.next_locator.as_ref() {
                Some(locator) => self.source.fetch_page(self.query, Some(locator)),
                None => Err(TransportError::missing_locator()),
            }
        };

        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                self.finished = true;
                return Err(err);
            }
        };

        self.pages_fetched += 1;
        self.finished = page.done;
        self.next_locator = if page.done {
            None
        } else {
            page.query_locator.clone()
        };

        Ok(Some(page))
    }
}

impl<S: PageSource + ?Sized> Iterator for PageStream<'_, S> {
    type Item = Result<Page, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_page().transpose()
    }
}
