//! Turns submitted item forms into typed inputs.
//!
//! Browser forms deliver everything as text, so numbers and the meal
//! category are parsed here and every problem is reported as a message the
//! admin form can show next to the inputs.

use axum_helpers::{FormPayload, UploadedFile, errors::validation_messages};
use media::ImageUpload;
use std::str::FromStr;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{ItemPatch, MealCategory, NewItem};

const PRICE_INVALID: &str = "Price must be greater than or equal to 0";
const QUANTITY_INVALID: &str = "Quantity must be greater than or equal to 0";
/// Multipart field carrying the dish photo.
pub const IMAGE_FIELD: &str = "image";

const CATEGORY_INVALID: &str = "Meal category must be one of: breakfast, lunch, dinner, drinks";

/// Trimmed text of a field; blank counts as absent.
fn text(form: &FormPayload, name: &str) -> Option<String> {
    form.text(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_price(raw: &str, errors: &mut Vec<String>) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => {
            errors.push(PRICE_INVALID.to_string());
            None
        }
    }
}

fn parse_quantity(raw: &str, errors: &mut Vec<String>) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(quantity) if quantity >= 0 => Some(quantity),
        _ => {
            errors.push(QUANTITY_INVALID.to_string());
            None
        }
    }
}

fn parse_category(raw: &str, errors: &mut Vec<String>) -> Option<MealCategory> {
    match MealCategory::from_str(raw) {
        Ok(category) => Some(category),
        Err(_) => {
            errors.push(CATEGORY_INVALID.to_string());
            None
        }
    }
}

fn required(value: Option<String>, message: &str, errors: &mut Vec<String>) -> Option<String> {
    if value.is_none() {
        errors.push(message.to_string());
    }
    value
}

fn finish<T: Validate>(value: T, mut errors: Vec<String>) -> ItemResult<T> {
    if let Err(e) = value.validate() {
        for message in validation_messages(&e) {
            if !errors.contains(&message) {
                errors.push(message);
            }
        }
    }
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(ItemError::Validation(errors))
    }
}

/// Parse a create form. Every field but `image` is required.
pub fn new_item(form: &FormPayload) -> ItemResult<NewItem> {
    let mut errors = Vec::new();

    let name = required(text(form, "name"), "Name is required", &mut errors);
    let description = required(
        text(form, "description"),
        "Description is required",
        &mut errors,
    );
    let meal_category = required(
        text(form, "mealCategory"),
        "Meal category is required",
        &mut errors,
    )
    .and_then(|raw| parse_category(&raw, &mut errors));
    let price = required(text(form, "price"), "Price is required", &mut errors)
        .and_then(|raw| parse_price(&raw, &mut errors));
    let quantity = required(text(form, "quantity"), "Quantity is required", &mut errors)
        .and_then(|raw| parse_quantity(&raw, &mut errors));

    match (name, description, meal_category, price, quantity) {
        (Some(name), Some(description), Some(meal_category), Some(price), Some(quantity)) => {
            let item = NewItem {
                name,
                description,
                meal_category,
                price,
                quantity,
                image: text(form, IMAGE_FIELD),
            };
            finish(item, errors)
        }
        _ => Err(ItemError::Validation(errors)),
    }
}

/// Parse an update form. Absent or blank fields are left untouched.
pub fn item_patch(form: &FormPayload) -> ItemResult<ItemPatch> {
    let mut errors = Vec::new();

    let patch = ItemPatch {
        name: text(form, "name"),
        description: text(form, "description"),
        meal_category: text(form, "mealCategory")
            .and_then(|raw| parse_category(&raw, &mut errors)),
        price: text(form, "price").and_then(|raw| parse_price(&raw, &mut errors)),
        quantity: text(form, "quantity").and_then(|raw| parse_quantity(&raw, &mut errors)),
        image: text(form, IMAGE_FIELD),
    };

    finish(patch, errors)
}

/// Check an uploaded file against the media limits before anything is written.
pub fn image_upload(file: UploadedFile) -> ItemResult<ImageUpload> {
    if file.field != IMAGE_FIELD {
        return Err(ItemError::Validation(vec![format!(
            "Image must be uploaded in the '{IMAGE_FIELD}' field"
        )]));
    }
    let upload = ImageUpload::new(file.file_name, file.content_type, file.bytes.to_vec())?;
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn full_form() -> FormPayload {
        FormPayload::new()
            .with_field("name", " Spicy Wings ")
            .with_field("description", "Six wings")
            .with_field("mealCategory", "Dinner")
            .with_field("price", "9.5")
            .with_field("quantity", "12")
    }

    fn messages(result: ItemResult<impl std::fmt::Debug>) -> Vec<String> {
        match result {
            Err(ItemError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_item_from_full_form() {
        let item = new_item(&full_form()).unwrap();
        assert_eq!(item.name, "Spicy Wings");
        assert_eq!(item.meal_category, MealCategory::Dinner);
        assert_eq!(item.price, 9.5);
        assert_eq!(item.quantity, 12);
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_new_item_missing_fields() {
        let messages = messages(new_item(&FormPayload::new()));
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Description is required",
                "Meal category is required",
                "Price is required",
                "Quantity is required",
            ]
        );
    }

    #[test]
    fn test_new_item_rejects_bad_numbers_and_category() {
        let form = full_form()
            .with_field("price", "-1")
            .with_field("quantity", "two")
            .with_field("mealCategory", "brunch");

        let messages = messages(new_item(&form));
        assert!(messages.contains(&CATEGORY_INVALID.to_string()));
        assert!(messages.contains(&QUANTITY_INVALID.to_string()));
        assert!(messages.contains(&PRICE_INVALID.to_string()));
    }

    #[test]
    fn test_new_item_keeps_explicit_image() {
        let form = full_form().with_field("image", "https://cdn.test/wings.png");
        let item = new_item(&form).unwrap();
        assert_eq!(item.image.as_deref(), Some("https://cdn.test/wings.png"));
    }

    #[test]
    fn test_patch_only_has_provided_fields() {
        let form = FormPayload::new()
            .with_field("price", "0")
            .with_field("name", "   ");

        let patch = item_patch(&form).unwrap();
        assert_eq!(patch.price, Some(0.0));
        assert_eq!(patch.name, None);
        assert_eq!(patch.quantity, None);

        assert!(item_patch(&FormPayload::new()).unwrap().is_empty());
    }

    #[test]
    fn test_patch_rejects_negative_quantity() {
        let form = FormPayload::new().with_field("quantity", "-3");
        assert_eq!(messages(item_patch(&form)), vec![QUANTITY_INVALID]);
    }

    #[test]
    fn test_image_upload_rejects_empty_file() {
        let file = UploadedFile {
            field: "image".to_string(),
            file_name: "empty.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::new(),
        };
        assert!(matches!(image_upload(file), Err(ItemError::Upload(_))));
    }

    #[test]
    fn test_image_upload_only_from_image_field() {
        let file = UploadedFile {
            field: "avatar".to_string(),
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"PNG"),
        };
        assert_eq!(
            messages(image_upload(file)),
            vec!["Image must be uploaded in the 'image' field"]
        );
    }

    #[test]
    fn test_image_upload_rejects_non_image() {
        let file = UploadedFile {
            field: IMAGE_FIELD.to_string(),
            file_name: "menu.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: Bytes::from_static(b"hello"),
        };
        match image_upload(file) {
            Err(ItemError::Upload(e)) => assert!(e.is_client_error()),
            other => panic!("expected upload error, got {other:?}"),
        }
    }
}
