//! Image processor - decode, width cap and avatar crop

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::geometry::{fit_within, CropRect, PictureSize};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

const JPEG_QUALITY: u8 = 90;

/// Outcome of [`ImageProcessor::cap_width`].
#[derive(Debug)]
pub struct CappedUpload {
    pub original: PictureSize,
    pub size: PictureSize,
    /// Re-encoded JPEG, present only when the picture had to shrink
    pub resized: Option<Vec<u8>>,
}

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode image bytes, guessing the format from the content.
    pub fn decode(data: &[u8]) -> ProcessingResult<DynamicImage> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;
        reader
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))
    }

    pub fn dimensions(data: &[u8]) -> ProcessingResult<PictureSize> {
        let (width, height) = Self::decode(data)?.dimensions();
        Ok(PictureSize::new(width, height))
    }

    /// Shrink an upload to at most `max_width` pixels wide.
    ///
    /// `resized` is `None` when the picture is already narrow enough, so the
    /// original bytes can be kept as they are.
    pub fn cap_width(data: &[u8], max_width: u32) -> ProcessingResult<CappedUpload> {
        let img = Self::decode(data)?;
        let (width, height) = img.dimensions();
        let original = PictureSize::new(width, height);

        if width <= max_width {
            return Ok(CappedUpload {
                original,
                size: original,
                resized: None,
            });
        }

        let target = fit_within(original, max_width, height);
        tracing::debug!(
            from_width = width,
            from_height = height,
            to_width = target.width,
            to_height = target.height,
            "Capping upload width"
        );

        let resized = img.resize_exact(target.width, target.height, FilterType::Lanczos3);
        Ok(CappedUpload {
            original,
            size: target,
            resized: Some(Self::encode_jpeg(&resized)?),
        })
    }

    /// Crop `rect` out of the picture and shrink the result to fit within
    /// `max_side` x `max_side`. The rectangle is clipped to the image first,
    /// so a selection running past an edge loses its w:h ratio instead of
    /// being padded with black.
    pub fn crop_to_avatar(data: &[u8], rect: CropRect, max_side: u32) -> ProcessingResult<Vec<u8>> {
        let img = Self::decode(data)?;
        let (width, height) = img.dimensions();
        let rect = rect.clamp_to(PictureSize::new(width, height))?;

        let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
        let target = fit_within(rect.size(), max_side, max_side);

        let avatar = if target == rect.size() {
            cropped
        } else {
            cropped.resize_exact(target.width, target.height, FilterType::Lanczos3)
        };

        Self::encode_jpeg(&avatar)
    }

    /// Encode as baseline JPEG. Alpha is dropped since JPEG cannot carry it.
    pub fn encode_jpeg(img: &DynamicImage) -> ProcessingResult<Vec<u8>> {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}
