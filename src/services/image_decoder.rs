use crate::error::AnalysisError;
use crate::models::ImageSource;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Decode an image and resample it to exactly `size x size` RGB8 pixels.
///
/// The aspect ratio is not preserved; alpha is dropped.
pub fn decode_pixels(
    id: &str,
    source: &ImageSource,
    size: u32,
) -> Result<Vec<[u8; 3]>, AnalysisError> {
    let failure = |reason: String| AnalysisError::DecodeFailure {
        id: id.to_string(),
        reason,
    };

    let img = decode(source).map_err(|e| failure(e.to_string()))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(failure("image has no pixels".to_string()));
    }

    let rgb = img.resize_exact(size, size, FilterType::Triangle).to_rgb8();
    Ok(rgb.pixels().map(|p| p.0).collect())
}

fn decode(source: &ImageSource) -> image::ImageResult<DynamicImage> {
    match source {
        ImageSource::Path(path) => ImageReader::open(path)?.with_guessed_format()?.decode(),
        ImageSource::Bytes(bytes) => ImageReader::new(Cursor::new(&bytes[..]))
            .with_guessed_format()?
            .decode(),
    }
}
