use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::Item;
use crate::query::{ItemFilter, PageWindow};

/// Storage for menu items.
///
/// Implementations enforce unique names and report violations as
/// [`ItemError::DuplicateName`](crate::error::ItemError::DuplicateName).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> ItemResult<Option<Item>>;

    /// Matching items, newest first, limited to `window`
    async fn list(&self, filter: ItemFilter, window: PageWindow) -> ItemResult<Vec<Item>>;

    /// Number of items matching `filter`
    async fn count(&self, filter: ItemFilter) -> ItemResult<u64>;

    /// Overwrite a stored item
    async fn replace(&self, item: Item) -> ItemResult<Item>;

    /// Remove an item. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> ItemResult<bool>;
}
