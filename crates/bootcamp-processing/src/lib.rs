//! Bootcamp Processing Library
//!
//! Synchronous image operations behind the profile picture workflow:
//! decoding, width capping, cropping and avatar thumbnails. Callers running
//! on an async runtime should wrap these in `spawn_blocking`.

pub mod error;
pub mod image;

pub use error::{ProcessingError, ProcessingResult};
pub use crate::image::{fit_within, CappedUpload, CropRect, ImageProcessor, PictureSize};
