//! # Diner Client
//!
//! Non-visual side of the diner frontend:
//!
//! - **[`DinerClient`]**: typed calls for every API endpoint, with a cookie jar
//!   for the session
//! - **[`SearchDebouncer`]**: delay-and-cancel search input
//! - **[`Pagination`]**: previous/next availability and the "Page X of Y" label
//! - **[`CartCounter`]**: cart badge count
//!
//! ```rust,ignore
//! use diner_client::{ClientConfig, DinerClient, ListQuery, Pagination};
//! use core_config::FromEnv;
//!
//! let client = DinerClient::new(&ClientConfig::from_env()?)?;
//! let mut pagination = Pagination::new();
//!
//! let page = client
//!     .list_items(&ListQuery { page: pagination.page(), ..Default::default() })
//!     .await?;
//! pagination.observe(&page);
//! println!("{}", pagination.label());
//! ```

pub mod api;
pub mod cart;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod pagination;

pub use api::DinerClient;
pub use cart::CartCounter;
pub use config::ClientConfig;
pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use error::{ClientError, ClientResult};
pub use models::{
    ImageFile, Item, ItemForm, ItemMessage, ItemPage, ListQuery, MessageResponse,
    PAGE_SIZE_OPTIONS, RegisterForm, Registered, Session, SignInForm, SignedIn, SignedInUser,
    User,
};
pub use pagination::Pagination;
