use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Image used when an item is created without one.
pub const DEFAULT_IMAGE: &str = "https://i.imgur.com/oaNsfJ0.png";

/// First page-size option offered by the menu screen.
pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// Menu section an item is listed under
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Drinks,
}

/// Menu item as stored in the `items` collection and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Time-ordered identifier, stored as `_id`
    #[serde(rename = "_id", with = "database::mongodb::uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub meal_category: MealCategory,
    /// Public image URL
    pub image: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub meal_category: MealCategory,
    #[validate(range(min = 0.0, message = "Price must be greater than or equal to 0"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: i64,
    /// Explicit image URL; the uploaded file wins over it
    pub image: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub meal_category: Option<MealCategory>,
    #[validate(range(min = 0.0, message = "Price must be greater than or equal to 0"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: Option<i64>,
    pub image: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query string of `GET /items`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: u64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    pub limit: u64,
    /// Meal category, matched case-insensitively
    pub category: Option<String>,
    /// Case-insensitive substring of the item name
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            category: None,
            search: None,
        }
    }
}

/// One page of the item listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Body of create and update responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemMessage {
    pub message: String,
    pub item: Item,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl Item {
    pub fn new(input: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            meal_category: input.meal_category,
            image: input.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            price: input.price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(meal_category) = patch.meal_category {
            self.meal_category = meal_category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pancakes() -> NewItem {
        NewItem {
            name: "Pancakes".to_string(),
            description: "Stack of three".to_string(),
            meal_category: MealCategory::Breakfast,
            price: 5.5,
            quantity: 10,
            image: None,
        }
    }

    #[test]
    fn test_meal_category_parsing() {
        assert_eq!(
            MealCategory::from_str("Dinner").unwrap(),
            MealCategory::Dinner
        );
        assert_eq!(MealCategory::Drinks.to_string(), "drinks");
        assert!(MealCategory::from_str("brunch").is_err());
    }

    #[test]
    fn test_new_item_defaults_image() {
        let item = Item::new(pancakes());
        assert_eq!(item.image, DEFAULT_IMAGE);
        assert_eq!(item.created_at, item.updated_at);

        let with_image = Item::new(NewItem {
            image: Some("https://cdn.test/p.png".to_string()),
            ..pancakes()
        });
        assert_eq!(with_image.image, "https://cdn.test/p.png");
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new(pancakes());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["_id"], item.id.to_string());
        assert_eq!(json["mealCategory"], "breakfast");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_apply_patch_only_touches_provided_fields() {
        let mut item = Item::new(pancakes());
        item.apply_patch(ItemPatch {
            price: Some(0.0),
            quantity: Some(0),
            ..Default::default()
        });

        assert_eq!(item.name, "Pancakes");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 0);
        assert_eq!(item.image, DEFAULT_IMAGE);
        assert!(item.updated_at >= item.created_at);
    }

    #[test]
    fn test_validation_messages() {
        let invalid = NewItem {
            name: String::new(),
            price: -1.0,
            ..pancakes()
        };
        let errors = invalid.validate().unwrap_err();
        assert_eq!(
            axum_helpers::errors::validation_messages(&errors),
            vec![
                "Name is required".to_string(),
                "Price must be greater than or equal to 0".to_string()
            ]
        );

        assert!(ItemPatch::default().validate().is_ok());
        assert!(ItemPatch::default().is_empty());
    }

    #[test]
    fn test_query_defaults() {
        let query: ItemQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);

        let zero = ItemQuery {
            page: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }
}
