use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::sampler::grid::SampleGrid;
use crate::ConvertOptions;

use super::font;

/// Neutral foreground for grayscale mode; the luminance rides in the
/// alpha channel.
const GRAY: [u8; 3] = [128, 128, 128];

/// Re-renders the sampled grid as a raster matching the source image's
/// dimensions, one glyph per cell. Missing cells are skipped.
pub(crate) fn assemble(
    source: &DynamicImage,
    grid: &SampleGrid,
    options: &ConvertOptions,
) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut canvas = match options.background {
        Some(color) => RgbaImage::from_pixel(width, height, color),
        None => RgbaImage::new(width, height),
    };

    let cell = options.cell_size;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let Some(sample) = grid.get(row, col) else {
                continue;
            };
            let luminance = sample.luminance(options.reversed_luminance);
            let glyph = options.glyphs.glyph_for(luminance);
            let color = if options.grayscale {
                Rgba([GRAY[0], GRAY[1], GRAY[2], (luminance * 255.0 + 0.5) as u8])
            } else {
                Rgba(sample.to_rgba8())
            };
            font::draw_glyph(&mut canvas, glyph, (col * cell, row * cell), cell, color);
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use crate::sampler::grid::ColorSample;

    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
    }

    fn grid_from(source: &DynamicImage, width: u32, height: u32) -> SampleGrid {
        let rgba = source.to_rgba8();
        let pixel = rgba.get_pixel(0, 0).0;
        let samples = vec![ColorSample::from_rgba8(pixel); (width * height) as usize];
        SampleGrid::new(width, height, samples)
    }

    #[test]
    fn canvas_matches_source_dimensions() {
        let source = solid(10, 10, [0, 0, 0, 255]);
        let grid = grid_from(&source, 5, 5);
        let canvas = assemble(&source, &grid, &ConvertOptions { cell_size: 2, ..Default::default() });
        assert_eq!(canvas.dimensions(), (10, 10));
    }

    #[test]
    fn dark_cells_draw_in_the_sampled_color() {
        let source = solid(10, 10, [0, 0, 0, 255]);
        let grid = grid_from(&source, 5, 5);
        let canvas = assemble(&source, &grid, &ConvertOptions { cell_size: 2, ..Default::default() });
        assert!(canvas.pixels().any(|pixel| pixel.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn background_fills_untouched_pixels() {
        let source = solid(10, 10, [255, 255, 255, 255]);
        let grid = grid_from(&source, 5, 5);
        let options = ConvertOptions {
            cell_size: 2,
            background: Some(Rgba([10, 20, 30, 255])),
            ..Default::default()
        };
        // White samples map to the blank glyph, so only the fill shows.
        let canvas = assemble(&source, &grid, &options);
        assert!(canvas.pixels().all(|pixel| pixel.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn grayscale_modulates_opacity_with_luminance() {
        let source = solid(10, 10, [128, 128, 128, 255]);
        let grid = grid_from(&source, 5, 5);
        let options =
            ConvertOptions { cell_size: 8, grayscale: true, ..Default::default() };
        let canvas = assemble(&source, &grid, &options);
        let lit = canvas.pixels().find(|pixel| pixel.0[3] != 0).expect("drawn glyph pixel");
        assert_eq!(lit.0[0], GRAY[0]);
        assert!(lit.0[3] > 100 && lit.0[3] < 160);
    }
}
