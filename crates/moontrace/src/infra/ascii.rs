use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;

/// Banner width in terminal cells.
pub const BANNER_WIDTH: u32 = 30;
/// Banner height in terminal cells.
pub const BANNER_HEIGHT: u32 = 8;

/// Characters ordered from darkest to brightest.
const LUMINANCE_RAMP: &[u8] = b" .,:;i1tfLCG08@";

#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("failed to load banner image: {0}")]
    Image(#[from] image::ImageError),
}

/// Loads the image at `path` and renders it as `width` x `height` ASCII art.
///
/// # Errors
/// Returns [`BannerError`] when the file cannot be opened or decoded.
pub fn image_file_to_ascii(path: &Path, width: u32, height: u32) -> Result<String, BannerError> {
    let image = image::open(path)?;

    Ok(image_to_ascii(&image, width, height))
}

/// Renders `image` as ASCII art, one `\n`-terminated row per cell row.
pub fn image_to_ascii(image: &DynamicImage, width: u32, height: u32) -> String {
    let luma = image
        .resize_exact(width, height, FilterType::Nearest)
        .to_luma8();
    let last_index = LUMINANCE_RAMP.len() - 1;
    let mut art = String::with_capacity(((width + 1) * height) as usize);

    for row in luma.rows() {
        for pixel in row {
            let index = usize::from(pixel.0[0]) * last_index / usize::from(u8::MAX);
            art.push(char::from(LUMINANCE_RAMP[index]));
        }
        art.push('\n');
    }

    art
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_image_to_ascii_maps_white_to_densest_character() {
        // Arrange
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 2, Luma([u8::MAX])));

        // Act
        let art = image_to_ascii(&image, 4, 2);

        // Assert
        assert_eq!(art, "@@@@\n@@@@\n");
    }

    #[test]
    fn test_image_to_ascii_maps_black_to_blank() {
        // Arrange
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([0])));

        // Act
        let art = image_to_ascii(&image, 3, 1);

        // Assert
        assert_eq!(art, "   \n");
    }

    #[test]
    fn test_image_file_to_ascii_rejects_missing_file() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");

        // Act
        let result = image_file_to_ascii(
            &temp_dir.path().join("moon.png"),
            BANNER_WIDTH,
            BANNER_HEIGHT,
        );

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_image_file_to_ascii_reads_png() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("moon.png");
        GrayImage::from_pixel(60, 16, Luma([u8::MAX]))
            .save(&path)
            .expect("failed to write png");

        // Act
        let art = image_file_to_ascii(&path, BANNER_WIDTH, BANNER_HEIGHT)
            .expect("expected png to decode");

        // Assert
        assert_eq!(art.lines().count(), BANNER_HEIGHT as usize);
        assert!(art.lines().all(|line| line.len() == BANNER_WIDTH as usize));
    }
}
