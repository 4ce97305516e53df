//! Serde adapter that stores a [`Uuid`] as its hyphenated string.
//!
//! The BSON serializer is not human readable, so a plain `Uuid` field lands
//! as binary. Documents here key on the string form instead, which keeps
//! `_id` filters (`doc! { "_id": id.to_string() }`) and JSON output in step.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Item {
//!     #[serde(rename = "_id", with = "database::mongodb::uuid_as_string")]
//!     id: Uuid,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serializer, de::Error};
use uuid::Uuid;

pub fn serialize<S>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&id.hyphenated())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Uuid::parse_str(&raw).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{self, Bson, doc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(rename = "_id", with = "super")]
        id: Uuid,
    }

    #[test]
    fn test_bson_stores_string() {
        let id = Uuid::now_v7();
        let document = bson::to_document(&Doc { id }).unwrap();
        assert_eq!(document.get("_id"), Some(&Bson::String(id.to_string())));

        let back: Doc = bson::from_document(document).unwrap();
        assert_eq!(back.id, id);
    }

    #[test]
    fn test_rejects_non_uuid() {
        let result: Result<Doc, _> = bson::from_document(doc! { "_id": "not-a-uuid" });
        assert!(result.is_err());
    }
}
