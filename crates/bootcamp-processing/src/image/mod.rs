//! Image processing module
//!
//! - Geometry helpers for shrink-to-fit sizing and crop rectangles (geometry)
//! - Decode/encode and the upload/avatar transforms (processor)

pub mod geometry;
pub mod processor;

pub use geometry::{fit_within, CropRect, PictureSize};
pub use processor::{CappedUpload, ImageProcessor};
