use crate::domain::{
    errors::{ControllerError, ControllerResult},
    models::Manifest,
};

/// Converts asset manifests between their stored JSON text and the
/// structured form, and between relative blob keys and public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCodec {
    cdn_prefix: String,
}

impl AddressCodec {
    pub fn new(cdn_prefix: impl Into<String>) -> Self {
        let cdn_prefix = cdn_prefix.into().trim_end_matches('/').to_string();
        Self { cdn_prefix }
    }

    pub fn cdn_prefix(&self) -> &str {
        &self.cdn_prefix
    }

    /// Canonical JSON text of a manifest. Slots serialize in sorted order.
    pub fn encode(manifest: &Manifest) -> ControllerResult<String> {
        serde_json::to_string(manifest)
            .map_err(|e| ControllerError::internal(format!("Failed to encode manifest: {}", e)))
    }

    pub fn decode(text: &str) -> ControllerResult<Manifest> {
        let manifest: Manifest = serde_json::from_str(text)
            .map_err(|e| ControllerError::bad_input(format!("Malformed manifest: {}", e)))?;
        if manifest.assets.is_empty() {
            return Err(ControllerError::bad_input("Malformed manifest: no assets"));
        }
        Ok(manifest)
    }

    /// Join the CDN prefix and `key` with exactly one `/`
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.cdn_prefix, key.trim_start_matches('/'))
    }

    /// Replace every non-empty key with its public URL. Apply exactly once.
    pub fn rewrite(&self, manifest: &Manifest) -> Manifest {
        let absolute = |key: &str| {
            if key.is_empty() {
                String::new()
            } else {
                self.public_url(key)
            }
        };

        Manifest {
            assets: manifest
                .assets
                .iter()
                .map(|(slot, key)| (slot.clone(), absolute(key)))
                .collect(),
            index_json: absolute(&manifest.index_json),
            kind: manifest.kind,
            url: absolute(&manifest.url),
        }
    }

    /// Inverse of `public_url`: the relative key behind a URL under this CDN
    pub fn strip_public_prefix(&self, url: &str) -> ControllerResult<String> {
        let rest = url
            .strip_prefix(self.cdn_prefix.as_str())
            .filter(|rest| rest.starts_with('/'))
            .ok_or_else(|| {
                ControllerError::bad_input(format!(
                    "URL '{}' is not under the CDN prefix '{}'",
                    url, self.cdn_prefix
                ))
            })?;

        let key = rest.trim_start_matches('/');
        if key.is_empty() {
            return Err(ControllerError::bad_input(format!("URL '{}' names no object", url)));
        }
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ManifestKind;

    fn codec() -> AddressCodec {
        AddressCodec::new("https://cdn.example.com/")
    }

    #[test]
    fn test_public_url_uses_single_slash() {
        let codec = codec();
        assert_eq!(codec.cdn_prefix(), "https://cdn.example.com");
        assert_eq!(codec.public_url("sprites/a.png"), "https://cdn.example.com/sprites/a.png");
        assert_eq!(codec.public_url("/sprites/a.png"), "https://cdn.example.com/sprites/a.png");
    }

    #[test]
    fn test_decode_stored_sprite() {
        let text = r#"{"assets":{"image0":"sprites/a.png","image1":"sprites/b.png"},"indexJson":"index.json","type":"gif","url":"gifs/x.gif"}"#;
        let manifest = AddressCodec::decode(text).unwrap();
        assert_eq!(manifest.assets.len(), 2);
        assert_eq!(manifest.kind, ManifestKind::Gif);
        assert_eq!(manifest.url, "gifs/x.gif");
        assert_eq!(AddressCodec::encode(&manifest).unwrap(), text);
    }

    #[test]
    fn test_decode_sound_without_optional_fields() {
        let manifest = AddressCodec::decode(r#"{"assets":{"sound":"sounds/s.wav"}}"#).unwrap();
        assert_eq!(manifest, Manifest::sound("sounds/s.wav"));
        assert_eq!(manifest.kind, ManifestKind::Unspecified);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            AddressCodec::decode("not json"),
            Err(ControllerError::BadInput { .. })
        ));
        assert!(matches!(
            AddressCodec::decode(r#"{"assets":{}}"#),
            Err(ControllerError::BadInput { .. })
        ));
    }

    #[test]
    fn test_rewrite_preserves_empty_strings() {
        let codec = codec();
        let rewritten = codec.rewrite(&Manifest::sound("sounds/s.wav"));
        assert_eq!(rewritten.assets["sound"], "https://cdn.example.com/sounds/s.wav");
        assert_eq!(rewritten.index_json, "");
        assert_eq!(rewritten.url, "");
    }

    #[test]
    fn test_rewrite_every_key() {
        let codec = codec();
        let manifest = Manifest::frames(["sprites/a.png", "sprites/b.png"], "gifs/x.gif");
        let rewritten = codec.rewrite(&manifest);
        assert_eq!(rewritten.assets["image0"], "https://cdn.example.com/sprites/a.png");
        assert_eq!(rewritten.assets["image1"], "https://cdn.example.com/sprites/b.png");
        assert_eq!(rewritten.index_json, "https://cdn.example.com/index.json");
        assert_eq!(rewritten.url, "https://cdn.example.com/gifs/x.gif");
        assert_eq!(rewritten.kind, ManifestKind::Gif);
    }

    #[test]
    fn test_strip_public_prefix() {
        let codec = codec();
        assert_eq!(
            codec.strip_public_prefix("https://cdn.example.com/gifs/x.gif").unwrap(),
            "gifs/x.gif"
        );
        assert!(codec.strip_public_prefix("https://other.example.com/gifs/x.gif").is_err());
        assert!(codec.strip_public_prefix("https://cdn.example.comgifs/x.gif").is_err());
        assert!(codec.strip_public_prefix("https://cdn.example.com/").is_err());
    }
}
