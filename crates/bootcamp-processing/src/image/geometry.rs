//! Sizing and crop geometry, independent of pixel data.

use crate::error::{ProcessingError, ProcessingResult};

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureSize {
    pub width: u32,
    pub height: u32,
}

impl PictureSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Shrink `(width, height)` to fit inside `max_width` x `max_height`,
/// preserving aspect ratio. Never enlarges; sizes already inside the box are
/// returned unchanged. Each side is at least 1 px.
pub fn fit_within(size: PictureSize, max_width: u32, max_height: u32) -> PictureSize {
    if size.width == 0 || size.height == 0 {
        return size;
    }
    if size.width <= max_width && size.height <= max_height {
        return size;
    }

    let wratio = f64::from(max_width) / f64::from(size.width);
    let hratio = f64::from(max_height) / f64::from(size.height);
    let ratio = wratio.min(hratio);

    let width = ((f64::from(size.width) * ratio).round() as u32).clamp(1, max_width.max(1));
    let height = ((f64::from(size.height) * ratio).round() as u32).clamp(1, max_height.max(1));

    PictureSize { width, height }
}

/// Crop rectangle submitted by the client: top-left corner plus width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Parse the four raw form values. Each must be an integer; the corner must
    /// be non-negative and the extent positive.
    pub fn parse(
        x: Option<&str>,
        y: Option<&str>,
        w: Option<&str>,
        h: Option<&str>,
    ) -> ProcessingResult<Self> {
        let x = parse_coordinate("x", x)?;
        let y = parse_coordinate("y", y)?;
        let width = parse_coordinate("w", w)?;
        let height = parse_coordinate("h", h)?;

        if width == 0 || height == 0 {
            return Err(ProcessingError::InvalidCrop(
                "crop width and height must be positive".to_string(),
            ));
        }

        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Intersect the rectangle with an image of `bounds`. Errors when nothing
    /// of the rectangle lies inside the image.
    pub fn clamp_to(&self, bounds: PictureSize) -> ProcessingResult<CropRect> {
        if self.x >= bounds.width || self.y >= bounds.height {
            return Err(ProcessingError::InvalidCrop(format!(
                "corner ({}, {}) lies outside a {}x{} image",
                self.x, self.y, bounds.width, bounds.height
            )));
        }

        let width = self.width.min(bounds.width - self.x);
        let height = self.height.min(bounds.height - self.y);

        Ok(CropRect {
            x: self.x,
            y: self.y,
            width,
            height,
        })
    }

    pub fn size(&self) -> PictureSize {
        PictureSize::new(self.width, self.height)
    }
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> ProcessingResult<u32> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        ProcessingError::InvalidCrop(format!("missing crop field '{}'", name))
    })?;
    let value: i64 = raw.parse().map_err(|_| {
        ProcessingError::InvalidCrop(format!("crop field '{}' is not an integer: {:?}", name, raw))
    })?;
    u32::try_from(value)
        .map_err(|_| ProcessingError::InvalidCrop(format!("crop field '{}' out of range", name)))
}
