//! Wire types as the API sends and accepts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page sizes offered by the listing screen. The first is the API default.
pub const PAGE_SIZE_OPTIONS: [u64; 3] = [6, 12, 24];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub meal_category: String,
    pub image: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemMessage {
    pub message: String,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Listing parameters. Blank `category` and `search` are left out of the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub category: String,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE_OPTIONS[0],
            category: String::new(),
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if !self.category.trim().is_empty() {
            pairs.push(("category", self.category.trim().to_string()));
        }
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.trim().to_string()));
        }
        pairs
    }
}

/// Image file attached to an item form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Create or edit form for an item. Unset fields are not sent, so the same
/// form serves full creates and partial updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub meal_category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    /// Image URL, used when no file is attached.
    pub image: Option<String>,
    pub file: Option<ImageFile>,
}

impl ItemForm {
    /// Text fields in the order the form lists them.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(category) = &self.meal_category {
            fields.push(("mealCategory", category.clone()));
        }
        if let Some(price) = self.price {
            fields.push(("price", price.to_string()));
        }
        if let Some(quantity) = self.quantity {
            fields.push(("quantity", quantity.to_string()));
        }
        if let Some(image) = &self.image {
            fields.push(("image", image.clone()));
        }
        fields
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Registered {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignedInUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignedIn {
    pub token: String,
    pub user: SignedInUser,
}

/// Current session as reported by `/api/auth/validate_token`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn detail_messages(&self) -> Vec<String> {
        match &self.details {
            Some(serde_json::Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}
