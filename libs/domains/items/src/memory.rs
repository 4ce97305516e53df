//! In-process ItemRepository for tests and local runs without MongoDB.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::query::{ItemFilter, PageWindow};
use crate::repository::ItemRepository;

/// Map-backed repository with the same uniqueness and ordering rules as MongoDB.
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<Uuid, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Matching items, newest first.
    fn matching(items: &HashMap<Uuid, Item>, filter: &ItemFilter) -> Vec<Item> {
        let mut found: Vec<Item> = items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        found
    }

    fn name_taken(items: &HashMap<Uuid, Item>, item: &Item) -> bool {
        items
            .values()
            .any(|other| other.id != item.id && other.name == item.name)
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        if Self::name_taken(&items, &item) {
            return Err(ItemError::DuplicateName(item.name));
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.values().find(|item| item.name == name).cloned())
    }

    async fn list(&self, filter: ItemFilter, window: PageWindow) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(Self::matching(&items, &filter)
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn count(&self, filter: ItemFilter) -> ItemResult<u64> {
        let items = self.items.read().await;
        Ok(items.values().filter(|item| filter.matches(item)).count() as u64)
    }

    async fn replace(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        if !items.contains_key(&item.id) {
            return Err(ItemError::NotFound(item.id));
        }
        if Self::name_taken(&items, &item) {
            return Err(ItemError::DuplicateName(item.name));
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> ItemResult<bool> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}
