//! Item listing pipeline: filter, search, pagination and collation.
//!
//! The same [`ItemFilter`] drives the MongoDB query (as a filter document
//! evaluated under [`collation`]) and the in-memory store (as a predicate),
//! so both return identical pages.

use mongodb::bson::{Document, Regex, doc};
use mongodb::options::{Collation, CollationStrength};

use crate::models::{Item, ItemPage, ItemQuery};

/// Normalized search and category filters. Blank inputs are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    search: Option<String>,
    category: Option<String>,
}

const MAX_WINDOW: u64 = i64::MAX as u64;

/// Slice of the filtered, newest-first result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ItemFilter {
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: non_blank(search),
            category: non_blank(category),
        }
    }

    pub fn from_query(query: &ItemQuery) -> Self {
        Self::new(query.search.as_deref(), query.category.as_deref())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// MongoDB filter document. User text is escaped so it matches literally.
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(search) = &self.search {
            filter.insert(
                "name",
                Regex {
                    pattern: regex::escape(search),
                    options: "i".to_string(),
                },
            );
        }

        if let Some(category) = &self.category {
            filter.insert(
                "mealCategory",
                Regex {
                    pattern: format!("^{}$", regex::escape(category)),
                    options: "i".to_string(),
                },
            );
        }

        filter
    }

    /// Same semantics as [`Self::to_document`], evaluated in process.
    pub fn matches(&self, item: &Item) -> bool {
        let search_ok = self
            .search
            .as_ref()
            .is_none_or(|s| item.name.to_lowercase().contains(&s.to_lowercase()));

        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| item.meal_category.to_string() == c.to_lowercase());

        search_ok && category_ok
    }
}

impl PageWindow {
    /// `page` and `limit` are 1-based and already validated.
    ///
    /// Both values are capped at `i64::MAX`, the largest skip and limit the
    /// database accepts, so a page far past the end is simply empty.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit).min(MAX_WINDOW),
            limit: limit.min(MAX_WINDOW),
        }
    }

    pub fn from_query(query: &ItemQuery) -> Self {
        Self::new(query.page, query.limit)
    }
}

/// Case-insensitive, locale-aware comparison used by find and count.
pub fn collation() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

pub fn total_pages(total_count: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_count.div_ceil(limit)
}

impl ItemPage {
    pub fn new(items: Vec<Item>, total_count: u64, query: &ItemQuery) -> Self {
        Self {
            items,
            total_count,
            total_pages: total_pages(total_count, query.limit),
            current_page: query.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;
    use crate::models::{MealCategory, NewItem};

    fn item(name: &str, meal_category: MealCategory) -> Item {
        Item::new(NewItem {
            name: name.to_string(),
            description: "test".to_string(),
            meal_category,
            price: 1.0,
            quantity: 1,
            image: None,
        })
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let filter = ItemFilter::new(Some("  "), Some(""));
        assert_eq!(filter, ItemFilter::default());
        assert!(filter.to_document().is_empty());
    }

    #[test]
    fn test_search_document_is_escaped_regex() {
        let filter = ItemFilter::new(Some("wings (large)"), None);
        let document = filter.to_document();

        let Some(Bson::RegularExpression(regex)) = document.get("name") else {
            panic!("expected regex for name");
        };
        assert_eq!(regex.pattern, r"wings \(large\)");
        assert_eq!(regex.options, "i");
        assert!(!document.contains_key("mealCategory"));
    }

    #[test]
    fn test_category_document_is_anchored() {
        let document = ItemFilter::new(None, Some("Dinner")).to_document();
        let Some(Bson::RegularExpression(regex)) = document.get("mealCategory") else {
            panic!("expected regex for mealCategory");
        };
        assert_eq!(regex.pattern, "^Dinner$");
        assert_eq!(regex.options, "i");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let wings = item("Spicy Wings", MealCategory::Dinner);
        assert!(ItemFilter::new(Some("spicy"), None).matches(&wings));
        assert!(ItemFilter::new(Some("WING"), None).matches(&wings));
        assert!(!ItemFilter::new(Some("salad"), None).matches(&wings));
    }

    #[test]
    fn test_category_is_case_insensitive_equality() {
        let latte = item("Latte", MealCategory::Drinks);
        assert!(ItemFilter::new(None, Some("DRINKS")).matches(&latte));
        assert!(!ItemFilter::new(None, Some("drink")).matches(&latte));
        assert!(ItemFilter::new(None, None).matches(&latte));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(PageWindow::new(1, 6), PageWindow { skip: 0, limit: 6 });
        assert_eq!(PageWindow::new(3, 12), PageWindow { skip: 24, limit: 12 });
    }

    #[test]
    fn test_page_window_caps_huge_pages() {
        let window = PageWindow::new(u64::MAX, 6);
        assert_eq!(window.skip, i64::MAX as u64);
        assert_eq!(window.limit, 6);

        assert_eq!(PageWindow::new(1, u64::MAX).limit, i64::MAX as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(25, 12), 3);
    }

    #[test]
    fn test_collation_is_english_secondary() {
        let collation = collation();
        assert_eq!(collation.locale, "en");
        assert!(matches!(
            collation.strength,
            Some(CollationStrength::Secondary)
        ));
    }
}
