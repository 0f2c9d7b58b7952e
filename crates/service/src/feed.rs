//! Push-style delivery of search pages.
//!
//! A `PageFeed` holds the latest page of some search and notifies every
//! subscriber when a new one is published. The pipeline never touches it;
//! the service publishes into it after a search completes.

use pipeline::Page;
use tokio::sync::watch;

pub struct PageFeed<T> {
    sender: watch::Sender<Page<T>>,
}

impl<T: Clone> PageFeed<T> {
    /// A feed whose current value is the empty page
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Page::empty());
        Self { sender }
    }

    /// A receiver that sees the current page and every later one
    pub fn subscribe(&self) -> watch::Receiver<Page<T>> {
        self.sender.subscribe()
    }

    /// Replace the current page and wake all subscribers.
    ///
    /// Works with no subscribers too; the page is kept for later ones.
    pub fn publish(&self, page: Page<T>) {
        self.sender.send_replace(page);
    }

    /// Snapshot of the latest page
    pub fn current(&self) -> Page<T> {
        self.sender.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone> Default for PageFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}
