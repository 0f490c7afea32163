use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    models::Manifest,
    value_objects::{AssetType, RowStatus, Visibility},
};

/// A sprite, background or sound available to projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub category: String,
    pub is_public: Visibility,
    #[serde(with = "manifest_string")]
    pub address: Manifest,
    pub asset_type: AssetType,
    #[serde(with = "decimal_string")]
    pub click_count: u64,
    pub status: RowStatus,
    #[serde(rename = "cTime")]
    pub c_time: DateTime<Utc>,
    #[serde(rename = "uTime")]
    pub u_time: DateTime<Utc>,
}

impl Asset {
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

/// `address` travels as the JSON text of the manifest
mod manifest_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};

    use crate::domain::models::Manifest;

    pub fn serialize<S: Serializer>(manifest: &Manifest, serializer: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(manifest).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Manifest, D::Error> {
        let text = String::deserialize(deserializer)?;
        serde_json::from_str(&text).map_err(D::Error::custom)
    }
}

/// Counters are exposed as decimal strings
mod decimal_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.trim().parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Asset {
        let now = Utc::now();
        Asset {
            id: "a1".into(),
            name: "cat".into(),
            author_id: "u1".into(),
            category: "animals".into(),
            is_public: Visibility::Public,
            address: Manifest::single_image("sprites/cat.png"),
            asset_type: AssetType::Sprite,
            click_count: 42,
            status: RowStatus::Active,
            c_time: now,
            u_time: now,
        }
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["clickCount"], "42");
        assert_eq!(json["assetType"], "0");
        assert_eq!(json["isPublic"], 1);
        let address = json["address"].as_str().unwrap();
        let manifest: Manifest = serde_json::from_str(address).unwrap();
        assert_eq!(manifest.assets["image"], "sprites/cat.png");
    }

    #[test]
    fn test_wire_round_trip() {
        let asset = sample();
        let text = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&text).unwrap();
        assert_eq!(back, asset);
    }
}
