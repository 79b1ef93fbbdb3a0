//! The listing entity and its create/update DTOs.
//!
//! These types are shared by the record store, the API server and the
//! client, so they carry serde derives but no storage specifics. The
//! database row mapping lives in `roehrenboerse-db`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search;
use crate::tags::normalize_tags;
use crate::types::{DbId, Timestamp};
use crate::validation::{require_non_blank, require_non_blank_if_set};

/// A marketplace entry describing an item for sale or trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: DbId,
    pub title: String,
    pub tags: Vec<String>,
    pub price: String,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub label: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Listing {
    /// Whether this listing matches a search query (title substring or exact tag).
    pub fn matches_query(&self, query: &str) -> bool {
        search::matches_query(&self.title, &self.tags, query)
    }
}

/// DTO for creating a new listing. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateListing {
    pub title: String,
    pub tags: Vec<String>,
    pub price: String,
    pub location: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CreateListing {
    /// Validate required fields and drop blank tags.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("price", &self.price)?;
        require_non_blank("location", &self.location)?;
        require_non_blank("category", &self.category)?;
        self.tags = normalize_tags(&self.tags);
        Ok(self)
    }
}

/// DTO for a partial update. Only `Some` fields are applied.
///
/// `id` and `created_at` are absent: they never change after
/// creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UpdateListing {
    /// Reject patches that would blank a required field and drop blank tags.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        require_non_blank_if_set("title", self.title.as_deref())?;
        require_non_blank_if_set("price", self.price.as_deref())?;
        require_non_blank_if_set("location", self.location.as_deref())?;
        require_non_blank_if_set("category", self.category.as_deref())?;
        self.tags = self.tags.map(|t| normalize_tags(&t));
        Ok(self)
    }

    /// Apply the set fields onto an existing listing.
    pub fn apply_to(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title.clone_from(title);
        }
        if let Some(tags) = &self.tags {
            listing.tags.clone_from(tags);
        }
        if let Some(price) = &self.price {
            listing.price.clone_from(price);
        }
        if let Some(location) = &self.location {
            listing.location.clone_from(location);
        }
        if let Some(category) = &self.category {
            listing.category.clone_from(category);
        }
        if let Some(label) = &self.label {
            listing.label = Some(label.clone());
        }
        if let Some(user_id) = &self.user_id {
            listing.user_id = Some(user_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn input() -> CreateListing {
        CreateListing {
            title: "ECC83 Telefunken".into(),
            tags: vec!["NOS".into(), " ".into(), " getestet ".into()],
            price: "120 €".into(),
            location: "Berlin".into(),
            category: "Röhre".into(),
            label: None,
            user_id: None,
        }
    }

    #[test]
    fn create_normalization_drops_blank_tags() {
        let normalized = input().normalized().unwrap();
        assert_eq!(normalized.tags, vec!["NOS", "getestet"]);
    }

    #[test]
    fn create_requires_title() {
        let mut bad = input();
        bad.title = "  ".into();
        assert_eq!(
            bad.normalized(),
            Err(CoreError::Validation("title must not be empty".into()))
        );
    }

    #[test]
    fn update_rejects_blanking_required_field() {
        let patch = UpdateListing {
            price: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.normalized().is_err());
    }

    #[test]
    fn update_applies_only_set_fields() {
        let mut listing = Listing {
            id: 7,
            title: "EL34".into(),
            tags: vec!["matched".into()],
            price: "80 €".into(),
            location: "Hamburg".into(),
            category: "Endröhre".into(),
            label: None,
            created_at: Utc::now(),
            user_id: None,
        };
        let before = listing.clone();
        let patch = UpdateListing {
            price: Some("100 €".into()),
            label: Some("SALE".into()),
            ..Default::default()
        };
        patch.apply_to(&mut listing);

        assert_eq!(listing.price, "100 €");
        assert_eq!(listing.label.as_deref(), Some("SALE"));
        assert_eq!(listing.id, before.id);
        assert_eq!(listing.created_at, before.created_at);
        assert_eq!(listing.title, before.title);
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let json = serde_json::to_value(UpdateListing::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
