//! Turning arbitrary pictures into the square, masked grayscale grid the selector expects.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GrayImage, Luma};

use crate::error::Result;

/// Intensity given to pixels outside the pin circle.
pub const BACKGROUND: u8 = 255;

/// Decodes the file at `path` and [`prepare`]s it.
pub fn open(path: impl AsRef<Path>) -> Result<GrayImage> {
    Ok(prepare(image::open(path)?))
}

/// Converts to 8-bit luma, stretches to a square as wide as the longest side and masks
/// everything outside the inscribed circle.
pub fn prepare(image: DynamicImage) -> GrayImage {
    let side = image.width().max(image.height());
    let mut luma = image.into_luma8();
    if luma.width() != side || luma.height() != side {
        luma = image::imageops::resize(&luma, side, side, FilterType::Lanczos3);
    }
    apply_circular_mask(&mut luma);
    luma
}

/// Forces pixels outside the circle of radius `side / 2` centered at `(side / 2, side / 2)`
/// to [`BACKGROUND`], so they hold no darkness for chords to chase.
pub fn apply_circular_mask(image: &mut GrayImage) {
    let side = image.width().min(image.height()) as i64;
    let center = side / 2;
    let radius_sq = center * center;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as i64 - center;
        let dy = y as i64 - center;
        if dx * dx + dy * dy > radius_sq {
            *pixel = Luma([BACKGROUND]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_squares_the_image() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 20, Luma([0])));
        let prepared = prepare(image);
        assert_eq!(prepared.dimensions(), (40, 40));
    }

    #[test]
    fn mask_whitens_the_corners_only() {
        let mut image = GrayImage::from_pixel(20, 20, Luma([0]));
        apply_circular_mask(&mut image);
        assert_eq!(image.get_pixel(0, 0)[0], BACKGROUND);
        assert_eq!(image.get_pixel(19, 19)[0], BACKGROUND);
        assert_eq!(image.get_pixel(0, 19)[0], BACKGROUND);
        assert_eq!(image.get_pixel(10, 10)[0], 0);
        assert_eq!(image.get_pixel(1, 10)[0], 0);
        assert_eq!(image.get_pixel(10, 19)[0], 0);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let path = std::env::temp_dir().join("string_chord_no_such_image.png");
        assert!(matches!(open(&path), Err(crate::Error::Image(_))));
    }
}
