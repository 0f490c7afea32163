use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Who may read a row: only its author, or everyone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Visibility {
    Personal,
    Public,
}

impl Visibility {
    pub fn as_i64(self) -> i64 {
        match self {
            Visibility::Personal => 0,
            Visibility::Public => 1,
        }
    }

    /// Parse the string form used by request arguments ("0" / "1")
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim() {
            "0" => Ok(Visibility::Personal),
            "1" => Ok(Visibility::Public),
            other => Err(ValidationError::InvalidVisibility(other.to_string())),
        }
    }
}

impl From<Visibility> for i64 {
    fn from(value: Visibility) -> Self {
        value.as_i64()
    }
}

impl TryFrom<i64> for Visibility {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visibility::Personal),
            1 => Ok(Visibility::Public),
            other => Err(ValidationError::InvalidVisibility(other.to_string())),
        }
    }
}

/// Soft-delete marker on every row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum RowStatus {
    Deleted,
    Active,
}

impl RowStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            RowStatus::Deleted => 0,
            RowStatus::Active => 1,
        }
    }
}

impl From<RowStatus> for i64 {
    fn from(value: RowStatus) -> Self {
        value.as_i64()
    }
}

impl TryFrom<i64> for RowStatus {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RowStatus::Deleted),
            1 => Ok(RowStatus::Active),
            other => Err(ValidationError::InvalidStatus(other)),
        }
    }
}

/// Kind of asset. Serialized as the decimal strings "0", "1", "2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AssetType {
    Sprite,
    Background,
    Sound,
}

impl AssetType {
    pub fn as_i64(self) -> i64 {
        match self {
            AssetType::Sprite => 0,
            AssetType::Background => 1,
            AssetType::Sound => 2,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim() {
            "0" => Ok(AssetType::Sprite),
            "1" => Ok(AssetType::Background),
            "2" => Ok(AssetType::Sound),
            other => Err(ValidationError::InvalidAssetType(other.to_string())),
        }
    }
}

impl TryFrom<i64> for AssetType {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::parse(&value.to_string())
    }
}

impl TryFrom<String> for AssetType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetType> for String {
    fn from(value: AssetType) -> Self {
        value.as_i64().to_string()
    }
}
