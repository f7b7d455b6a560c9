//! Side-by-side reconstruction rendering.

use crate::error::{ImagingError, Result};
use crate::pgm::GrayImage;

/// Intensity offset applied to the completed pane so estimates centered
/// around zero land in the visible range.
const RECENTER_OFFSET: f64 = 127.0;

/// Stitch original, corrupted and completed images into one horizontal
/// strip for export.
///
/// With `recenter_completed` set, the completed pane is shifted by +127
/// before export, matching the usual display of estimates whose
/// intensities may dip below zero.
///
/// # Errors
///
/// Returns [`ImagingError::Shape`] if the three images do not share the
/// same dimensions.
pub fn comparison_strip(
    original: &GrayImage,
    corrupted: &GrayImage,
    completed: &GrayImage,
    recenter_completed: bool,
) -> Result<GrayImage> {
    let (width, height) = (original.width(), original.height());
    for (name, image) in [("corrupted", corrupted), ("completed", completed)] {
        if image.width() != width || image.height() != height {
            return Err(ImagingError::shape_error(format!(
                "{} pane is {}x{}, expected {}x{}",
                name,
                image.width(),
                image.height(),
                width,
                height
            )));
        }
    }

    let mut samples = Vec::with_capacity(3 * width * height);
    for y in 0..height {
        for x in 0..width {
            samples.push(original.sample(x, y));
        }
        for x in 0..width {
            samples.push(corrupted.sample(x, y));
        }
        for x in 0..width {
            let s = completed.sample(x, y);
            samples.push(if recenter_completed {
                s + RECENTER_OFFSET
            } else {
                s
            });
        }
    }

    GrayImage::new(3 * width, height, samples)
}
