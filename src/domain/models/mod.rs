pub mod asset;
pub mod filter;
pub mod format;
pub mod manifest;
pub mod page;
pub mod project;
pub mod upload;

pub use asset::Asset;
pub use filter::*;
pub use format::{FormatError, FormatResponse};
pub use manifest::{IMAGE_SLOT, Manifest, ManifestKind, SOUND_SLOT, SPRITE_INDEX_JSON};
pub use page::{MAX_PAGE_SIZE, Page, PageRequest};
pub use project::Project;
pub use upload::{SpriteUpload, UploadedFile};
