mod blob_key;
mod flags;

pub use blob_key::BlobKey;
pub use flags::{AssetType, RowStatus, Visibility};
