mod address_codec;
mod asset_service_impl;
mod media_service_impl;
mod project_service_impl;

pub use address_codec::AddressCodec;
pub use asset_service_impl::AssetServiceImpl;
pub use media_service_impl::MediaServiceImpl;
pub use project_service_impl::ProjectServiceImpl;
