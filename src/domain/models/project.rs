use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{RowStatus, Visibility};

/// An uploaded program bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Empty until the first save assigns one
    pub id: String,
    pub name: String,
    pub author_id: String,
    /// Relative blob key when stored; public URL when returned by a read
    pub address: String,
    pub is_public: Visibility,
    pub status: RowStatus,
    pub version: i64,
    #[serde(rename = "cTime")]
    pub c_time: DateTime<Utc>,
    #[serde(rename = "uTime")]
    pub u_time: DateTime<Utc>,
}

impl Project {
    /// A project that has never been saved
    pub fn draft(name: impl Into<String>, author_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            author_id: author_id.into(),
            address: String::new(),
            is_public: Visibility::Personal,
            status: RowStatus::Active,
            version: 0,
            c_time: now,
            u_time: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}
