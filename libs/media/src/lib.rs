//! Image upload adapter.
//!
//! Domain code depends on the [`MediaStore`] trait; [`CloudinaryStore`] is the
//! production implementation and [`InMemoryMediaStore`] backs tests and local
//! runs without credentials.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use media::{CloudinaryConfig, CloudinaryStore, ImageUpload, MediaStore};
//!
//! let store = CloudinaryStore::new(CloudinaryConfig::from_env()?);
//! let url = store.upload(ImageUpload::new("pancakes.png", "image/png", bytes)?).await?;
//! ```

pub mod cloudinary;
pub mod error;
pub mod memory;
pub mod store;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore};
pub use error::{MediaError, MediaResult};
pub use memory::InMemoryMediaStore;
pub use store::{ImageUpload, MAX_IMAGE_BYTES, MediaStore};
