//! User input for a new star and the row handed to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starweave_galaxy::{StarId, StarRecord, UserId};

use crate::error::CatalogError;

/// What a user fills in when creating a star.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StarDraft {
    pub name: String,
    pub surname: String,
    pub message: String,
    pub photo_url: Option<String>,
}

impl StarDraft {
    pub fn new(name: &str, surname: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            message: message.to_string(),
            photo_url: None,
        }
    }

    pub fn with_photo(mut self, url: &str) -> Self {
        self.photo_url = Some(url.to_string());
        self
    }

    /// Trim every field and reject empty required ones.
    ///
    /// An empty photo URL is treated as no photo.
    pub fn validate(self) -> Result<Self, CatalogError> {
        let required = |value: String, field: &'static str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(CatalogError::InvalidDraft(field))
            } else {
                Ok(trimmed.to_string())
            }
        };
        Ok(Self {
            name: required(self.name, "name")?,
            surname: required(self.surname, "surname")?,
            message: required(self.message, "message")?,
            photo_url: self
                .photo_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

/// A fully placed star waiting for a store-assigned id and timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewStarRecord {
    pub user_id: UserId,
    pub name: String,
    pub surname: String,
    pub message: String,
    pub photo_url: Option<String>,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub color_hex: String,
    pub size: f32,
}

impl NewStarRecord {
    /// The stored row once the store has assigned `id` and `created_at`.
    pub fn into_record(self, id: StarId, created_at: DateTime<Utc>) -> StarRecord {
        StarRecord {
            id,
            user_id: self.user_id,
            name: self.name,
            surname: self.surname,
            message: self.message,
            photo_url: self.photo_url,
            position_x: Some(self.position_x),
            position_y: Some(self.position_y),
            position_z: Some(self.position_z),
            color_hex: Some(self.color_hex),
            size: Some(self.size),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_fields() {
        let draft = StarDraft::new("  Ada ", "Lovelace", " hi ")
            .with_photo("  ")
            .validate()
            .unwrap();
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.message, "hi");
        assert_eq!(draft.photo_url, None, "blank photo URL should be dropped");
    }

    #[test]
    fn test_validate_rejects_blank_required_field() {
        let err = StarDraft::new("Ada", "   ", "hi").validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDraft("surname")));

        let err = StarDraft::new("", "", "").validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDraft("name")));
    }
}
