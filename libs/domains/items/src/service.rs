//! Item Service - Business logic layer

use media::{ImageUpload, MediaStore};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemPage, ItemPatch, ItemQuery, NewItem};
use crate::query::{ItemFilter, PageWindow};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// Inputs arrive already parsed and validated (see [`crate::form`]). The
/// service checks name uniqueness, stores items and uploads images.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    media: Arc<dyn MediaStore>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repository: Arc::new(repository),
            media,
        }
    }

    /// One page of items matching the query's search and category.
    #[instrument(skip(self))]
    pub async fn list_items(&self, query: ItemQuery) -> ItemResult<ItemPage> {
        let filter = ItemFilter::from_query(&query);
        let window = PageWindow::from_query(&query);

        let (items, total_count) = tokio::try_join!(
            self.repository.list(filter.clone(), window),
            self.repository.count(filter),
        )?;

        Ok(ItemPage::new(items, total_count, &query))
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Create an item, then attach the uploaded image if one was sent.
    ///
    /// An upload failure leaves the item stored with its original image.
    #[instrument(skip(self, input, image), fields(item_name = %input.name))]
    pub async fn create_item(
        &self,
        input: NewItem,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(ItemError::DuplicateName(input.name));
        }

        let mut item = self.repository.insert(Item::new(input)).await?;

        if let Some(image) = image {
            let url = self.upload(image).await.inspect_err(|e| {
                tracing::error!(item_id = %item.id, error = %e, "Image upload failed after insert");
            })?;
            item.image = url;
            item = self.repository.replace(item).await?;
        }

        Ok(item)
    }

    /// Merge `patch` onto the stored item. An uploaded image replaces any
    /// `image` URL in the patch.
    #[instrument(skip(self, patch, image))]
    pub async fn update_item(
        &self,
        id: Uuid,
        mut patch: ItemPatch,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item> {
        let mut item = self.get_item(id).await?;

        if let Some(name) = patch.name.as_deref() {
            if name != item.name && self.repository.find_by_name(name).await?.is_some() {
                return Err(ItemError::DuplicateName(name.to_string()));
            }
        }

        if let Some(image) = image {
            patch.image = Some(self.upload(image).await?);
        }

        item.apply_patch(patch);
        self.repository.replace(item).await
    }

    /// Delete an item. Missing ids are not an error.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ItemResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(item_id = %id, "Delete of unknown item");
        }
        Ok(())
    }

    async fn upload(&self, image: ImageUpload) -> ItemResult<String> {
        tracing::debug!(store = self.media.name(), file_name = %image.file_name, "Uploading item image");
        Ok(self.media.upload(image).await?)
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            media: Arc::clone(&self.media),
        }
    }
}
