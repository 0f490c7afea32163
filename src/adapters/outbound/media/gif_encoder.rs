use async_trait::async_trait;
use bytes::Bytes;
use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};
use tracing::debug;

use crate::{
    domain::errors::{ControllerError, ControllerResult},
    ports::toolchain::AnimationEncoder,
};

/// Inter-frame delay: 10 hundredths of a second
pub const FRAME_DELAY_MS: u32 = 100;

/// Composes still images into a looping animated GIF
#[derive(Debug, Clone, Copy, Default)]
pub struct GifAnimationEncoder;

impl GifAnimationEncoder {
    pub fn new() -> Self {
        Self
    }

    fn encode_blocking(frames: Vec<Bytes>) -> ControllerResult<Vec<u8>> {
        if frames.is_empty() {
            return Err(ControllerError::bad_input("at least one frame is required"));
        }

        let rasters = frames
            .iter()
            .enumerate()
            .map(|(index, data)| {
                image::load_from_memory(data)
                    .map(|img| img.to_rgba8())
                    .map_err(|e| {
                        ControllerError::bad_input(format!("frame {} is not an image: {}", index, e))
                    })
            })
            .collect::<ControllerResult<Vec<RgbaImage>>>()?;

        let dimensions = rasters[0].dimensions();
        if let Some((index, odd)) = rasters
            .iter()
            .enumerate()
            .find(|(_, raster)| raster.dimensions() != dimensions)
        {
            return Err(ControllerError::bad_input(format!(
                "frame {} is {}x{}, expected {}x{}",
                index,
                odd.width(),
                odd.height(),
                dimensions.0,
                dimensions.1
            )));
        }

        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            encoder.set_repeat(Repeat::Infinite).map_err(encode_error)?;
            let delay = Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1);
            encoder
                .encode_frames(
                    rasters
                        .into_iter()
                        .map(|raster| Frame::from_parts(raster, 0, 0, delay)),
                )
                .map_err(encode_error)?;
        }
        Ok(out)
    }
}

fn encode_error(err: image::ImageError) -> ControllerError {
    ControllerError::internal(format!("Failed to encode animation: {}", err))
}

#[async_trait]
impl AnimationEncoder for GifAnimationEncoder {
    async fn encode(&self, frames: Vec<Bytes>) -> ControllerResult<Bytes> {
        let count = frames.len();
        let encoded = tokio::task::spawn_blocking(move || Self::encode_blocking(frames))
            .await
            .map_err(|e| ControllerError::internal(format!("Encoder task failed: {}", e)))??;

        debug!(frames = count, size = encoded.len(), "encoded animation");
        Ok(Bytes::from(encoded))
    }

    fn extension(&self) -> &'static str {
        "gif"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, codecs::gif::GifDecoder, AnimationDecoder};
    use std::io::Cursor;

    fn png(width: u32, height: u32, color: [u8; 4]) -> Bytes {
        let raster = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        raster.write_to(&mut out, ImageFormat::Png).unwrap();
        Bytes::from(out.into_inner())
    }

    #[tokio::test]
    async fn test_encodes_looping_gif() {
        let encoder = GifAnimationEncoder::new();
        let gif = encoder
            .encode(vec![
                png(4, 4, [255, 0, 0, 255]),
                png(4, 4, [0, 255, 0, 255]),
                png(4, 4, [0, 0, 255, 255]),
            ])
            .await
            .unwrap();

        assert!(gif.starts_with(b"GIF89a"));
        let decoder = GifDecoder::new(Cursor::new(gif.to_vec())).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);
        let (numer, denom) = frames[0].delay().numer_denom_ms();
        assert_eq!(numer / denom, FRAME_DELAY_MS);
    }

    #[tokio::test]
    async fn test_rejects_mismatched_dimensions() {
        let encoder = GifAnimationEncoder::new();
        let result = encoder
            .encode(vec![png(4, 4, [0, 0, 0, 255]), png(8, 4, [0, 0, 0, 255])])
            .await;
        assert!(matches!(result, Err(ControllerError::BadInput { .. })));
    }

    #[tokio::test]
    async fn test_rejects_empty_and_garbage_input() {
        let encoder = GifAnimationEncoder::new();
        assert!(matches!(
            encoder.encode(Vec::new()).await,
            Err(ControllerError::BadInput { .. })
        ));
        assert!(matches!(
            encoder.encode(vec![Bytes::from_static(b"not an image")]).await,
            Err(ControllerError::BadInput { .. })
        ));
    }
}
