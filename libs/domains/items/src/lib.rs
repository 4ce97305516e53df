//! Items Domain
//!
//! Menu items stored in MongoDB: the public listing pipeline (search,
//! category, pagination) and admin create/update/delete with image upload.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, session and admin gates
//! └──────┬──────┘
//!        │   form: multipart/JSON → NewItem / ItemPatch
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness, image upload, paging
//! └──────┬──────┘
//!        │   query: filter document, collation, page window
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, inputs, page
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_items::{ItemService, MongoItemRepository, handlers};
//! use media::{CloudinaryConfig, CloudinaryStore};
//! use std::sync::Arc;
//!
//! let repository = MongoItemRepository::new(client.database("diner"));
//! repository.ensure_indexes().await?;
//!
//! let media = Arc::new(CloudinaryStore::new(CloudinaryConfig::from_env()?));
//! let service = ItemService::new(repository, media);
//!
//! let router = handlers::router(service, session_gate);
//! ```

pub mod error;
pub mod form;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryItemRepository;
pub use models::{
    DEFAULT_IMAGE, DEFAULT_PAGE_SIZE, Item, ItemMessage, ItemPage, ItemPatch, ItemQuery,
    MealCategory, MessageResponse, NewItem,
};
pub use mongodb::MongoItemRepository;
pub use query::{ItemFilter, PageWindow};
pub use repository::ItemRepository;
pub use service::ItemService;
