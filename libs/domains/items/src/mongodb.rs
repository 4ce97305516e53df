//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::query::{ItemFilter, PageWindow, collation};
use crate::repository::ItemRepository;

const NAME_INDEX: &str = "items_name_unique";

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<Item>,
}

impl MongoItemRepository {
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(client.database("diner"));
    /// repo.ensure_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, "items")
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Item>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    /// Create the unique index on `name`. Safe to call on every start.
    #[instrument(skip(self))]
    pub async fn ensure_indexes(&self) -> ItemResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name(NAME_INDEX.to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(index = NAME_INDEX, "Item indexes ready");
        Ok(())
    }

    fn write_error(err: mongodb::error::Error, name: &str) -> ItemError {
        if is_duplicate_key(&err) {
            ItemError::DuplicateName(name.to_string())
        } else {
            ItemError::from(err)
        }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id, item_name = %item.name))]
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        self.collection
            .insert_one(&item)
            .await
            .map_err(|e| Self::write_error(e, &item.name))?;

        tracing::info!(item_id = %item.id, "Item created");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let item = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ItemResult<Option<Item>> {
        let item = self.collection.find_one(doc! { "name": name }).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ItemFilter, window: PageWindow) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let limit = i64::try_from(window.limit).unwrap_or(i64::MAX);
        let cursor = self
            .collection
            .find(filter.to_document())
            .sort(doc! { "_id": -1 })
            .skip(window.skip)
            .limit(limit)
            .collation(collation())
            .await?;
        let items: Vec<Item> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ItemFilter) -> ItemResult<u64> {
        let count = self
            .collection
            .count_documents(filter.to_document())
            .collation(collation())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn replace(&self, item: Item) -> ItemResult<Item> {
        let result = self
            .collection
            .replace_one(doc! { "_id": item.id.to_string() }, &item)
            .await
            .map_err(|e| Self::write_error(e, &item.name))?;

        if result.matched_count == 0 {
            return Err(ItemError::NotFound(item.id));
        }

        tracing::info!(item_id = %item.id, "Item updated");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ItemResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        tracing::info!(item_id = %id, deleted = result.deleted_count, "Item delete");
        Ok(result.deleted_count > 0)
    }
}
