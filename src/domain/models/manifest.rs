use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Relative key every sprite manifest points at for its index document
pub const SPRITE_INDEX_JSON: &str = "index.json";

/// Slot used by single-image sprites
pub const IMAGE_SLOT: &str = "image";

/// Slot used by sound assets
pub const SOUND_SLOT: &str = "sound";

/// How the blobs of a manifest are meant to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ManifestKind {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "gif")]
    Gif,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// The document stored in `asset.address`: named blob slots plus optional
/// index document and animated preview.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: BTreeMap<String, String>,
    #[serde(rename = "indexJson", default, deserialize_with = "null_as_default")]
    pub index_json: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ManifestKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl Manifest {
    /// Manifest of a sprite made of one still image
    pub fn single_image(key: impl Into<String>) -> Self {
        Self {
            assets: BTreeMap::from([(IMAGE_SLOT.to_string(), key.into())]),
            index_json: SPRITE_INDEX_JSON.to_string(),
            kind: ManifestKind::Image,
            url: String::new(),
        }
    }

    /// Manifest of a sprite with frames `image0..image{n-1}` and an animated preview
    pub fn frames<I, S>(keys: I, animated: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let assets = keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| (format!("{IMAGE_SLOT}{i}"), key.into()))
            .collect();
        Self {
            assets,
            index_json: SPRITE_INDEX_JSON.to_string(),
            kind: ManifestKind::Gif,
            url: animated.into(),
        }
    }

    /// Manifest of a sound asset: a single `sound` slot and nothing else
    pub fn sound(key: impl Into<String>) -> Self {
        Self {
            assets: BTreeMap::from([(SOUND_SLOT.to_string(), key.into())]),
            ..Self::default()
        }
    }

    /// The key a single-blob asset is stored under: the `sound` slot when
    /// present, otherwise the first slot in canonical order.
    pub fn primary_key(&self) -> Option<&str> {
        self.assets
            .get(SOUND_SLOT)
            .or_else(|| self.assets.values().next())
            .map(String::as_str)
    }

    /// Every non-empty key the manifest references
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.assets
            .values()
            .map(String::as_str)
            .chain([self.index_json.as_str(), self.url.as_str()])
            .filter(|key| !key.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
