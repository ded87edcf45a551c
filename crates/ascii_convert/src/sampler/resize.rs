use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::debug;

use super::grid::{ColorSample, SampleGrid};

/// Smallest column count that still produces a usable glyph grid.
pub const MIN_COLUMNS: u32 = 5;

/// Grid width derived from the image width and cell size, unless an
/// explicit override is set.
pub(crate) fn derive_columns(image_width: u32, cell_size: u32, override_columns: Option<u32>) -> f32 {
    match override_columns {
        Some(columns) => columns as f32,
        None => image_width as f32 / cell_size.max(1) as f32,
    }
}

/// Downscales the image to the target column count and extracts every
/// pixel into a dense grid of normalized samples.
pub(crate) fn sample_grid(image: &DynamicImage, columns: f32) -> SampleGrid {
    let resized = scale_to_columns(image, columns);
    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgba.pixels() {
        samples.push(ColorSample::from_rgba8(pixel.0));
    }

    SampleGrid::new(width, height, samples)
}

/// Scales the image so its width matches the rounded column count while
/// preserving the aspect ratio. Column counts at or below one sample
/// the original image directly; counts beyond the smaller image
/// dimension are clamped to it.
fn scale_to_columns(image: &DynamicImage, columns: f32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if columns <= 1.0 {
        return image.clone();
    }

    let limit = width.min(height).max(1);
    let target_width = (columns.round() as u32).clamp(1, limit);
    let target_height =
        ((target_width as f32 * height as f32 / width as f32).round() as u32).max(1);

    debug!("scaling {}x{} to a {}x{} sample grid", width, height, target_width, target_height);
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255])))
    }

    #[test]
    fn columns_follow_width_over_cell_size() {
        assert_eq!(derive_columns(40, 10, None), 4.0);
        assert_eq!(derive_columns(200, 4, None), 50.0);
    }

    #[test]
    fn explicit_override_wins() {
        assert_eq!(derive_columns(40, 10, Some(32)), 32.0);
    }

    #[test]
    fn resize_preserves_aspect_ratio() {
        let grid = sample_grid(&solid(200, 100), 50.0);
        assert_eq!((grid.width(), grid.height()), (50, 25));
    }

    #[test]
    fn tiny_column_count_skips_resizing() {
        let grid = sample_grid(&solid(8, 6), 1.0);
        assert_eq!((grid.width(), grid.height()), (8, 6));
    }

    #[test]
    fn columns_clamp_to_the_smaller_dimension() {
        let grid = sample_grid(&solid(10, 4), 8.0);
        assert_eq!((grid.width(), grid.height()), (4, 2));
    }

    #[test]
    fn every_cell_is_populated_and_normalized() {
        let grid = sample_grid(&solid(10, 10), 5.0);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let sample = grid.get(row, col).expect("populated cell");
                for channel in [sample.r, sample.g, sample.b, sample.a] {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }
}
