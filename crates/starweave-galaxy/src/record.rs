//! Custom star records as delivered by the backing store.

use std::fmt;

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GalaxyError;

/// Store-assigned identifier of a custom star.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub String);

impl From<&str> for StarId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the user owning a custom star.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the `custom_stars` collection.
///
/// Position components are optional on the wire so that a broken row can be
/// reported instead of silently landing at the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub id: StarId,
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub position_x: Option<f32>,
    #[serde(default)]
    pub position_y: Option<f32>,
    #[serde(default)]
    pub position_z: Option<f32>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub size: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl StarRecord {
    /// The stored position, or [`GalaxyError::MalformedRecord`] naming the
    /// first missing or non-finite component.
    pub fn position(&self) -> Result<Vec3, GalaxyError> {
        let component = |value: Option<f32>, field: &'static str| match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(GalaxyError::MalformedRecord {
                id: self.id.clone(),
                field,
            }),
        };
        Ok(Vec3::new(
            component(self.position_x, "position_x")?,
            component(self.position_y, "position_y")?,
            component(self.position_z, "position_z")?,
        ))
    }

    /// `name surname`, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r##"{
        "id": "s1",
        "user_id": "u1",
        "name": "Vega",
        "surname": "Lyra",
        "message": "hello",
        "photo_url": null,
        "position_x": 1.0,
        "position_y": 2.0,
        "position_z": 3.0,
        "color_hex": "#ffcc6f",
        "size": 0.7,
        "created_at": "2024-05-01T12:00:00Z"
    }"##;

    #[test]
    fn test_parse_store_row() {
        let record: StarRecord = serde_json::from_str(ROW).unwrap();
        assert_eq!(record.id, StarId::from("s1"));
        assert_eq!(record.user_id, UserId::from("u1"));
        assert_eq!(record.position().unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(record.display_name(), "Vega Lyra");
        assert_eq!(record.photo_url, None);
    }

    #[test]
    fn test_missing_position_is_malformed() {
        let json = ROW.replace("\"position_y\": 2.0,", "");
        let record: StarRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(
            record.position(),
            Err(GalaxyError::MalformedRecord {
                id: StarId::from("s1"),
                field: "position_y",
            })
        );
    }

    #[test]
    fn test_null_position_is_malformed() {
        let json = ROW.replace("\"position_z\": 3.0", "\"position_z\": null");
        let record: StarRecord = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            record.position(),
            Err(GalaxyError::MalformedRecord { field: "position_z", .. })
        ));
    }

    #[test]
    fn test_non_finite_position_is_malformed() {
        let mut record: StarRecord = serde_json::from_str(ROW).unwrap();
        record.position_x = Some(f32::NAN);
        assert!(record.position().is_err());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&StarId::from("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
