pub mod gif_encoder;

pub use gif_encoder::GifAnimationEncoder;
