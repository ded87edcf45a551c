mod glyph;
mod render;
mod sampler;
pub mod task;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::debug;

pub use glyph::table::{GlyphEntry, GlyphTable};
pub use sampler::grid::{ColorSample, SampleGrid};
pub use sampler::resize::MIN_COLUMNS;
pub use task::TaskHandle;

use sampler::resize;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("source image has a zero dimension")]
    EmptyImage,
    #[error("column count {columns} is below the minimum of 5; reduce the cell size")]
    TooFewColumns { columns: u32 },
}

/// Per-conversion configuration. Read, never mutated, during a run;
/// rebuild the converter to change it.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub glyphs: GlyphTable,
    /// Draw glyphs in neutral gray with luminance-scaled opacity
    /// instead of each cell's own color (bitmap mode only).
    pub grayscale: bool,
    /// Replace every luminance value with its complement.
    pub reversed_luminance: bool,
    /// Background fill for bitmap mode; `None` leaves it transparent.
    pub background: Option<Rgba<u8>>,
    /// Edge length of one glyph cell in pixels.
    pub cell_size: u32,
    /// Explicit column count, bypassing the cell-size derivation.
    pub columns: Option<u32>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            glyphs: GlyphTable::default(),
            grayscale: false,
            reversed_luminance: false,
            background: None,
            cell_size: 18,
            columns: None,
        }
    }
}

/// Converts raster images into ASCII text grids or glyph bitmaps.
///
/// Every conversion is a self-contained pipeline run: sample the image
/// into a grid, map each cell's luminance through the glyph table,
/// assemble the output. No state is retained between calls.
#[derive(Clone, Debug, Default)]
pub struct AsciiConverter {
    options: ConvertOptions,
}

impl AsciiConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Renders the image as a newline-separated grid of glyphs.
    pub fn to_text(&self, image: &DynamicImage) -> Result<String, ConvertError> {
        render_text(image, &self.options)
    }

    /// Re-renders the image as a raster of its own size with one glyph
    /// drawn per sampled cell.
    pub fn to_bitmap(&self, image: &DynamicImage) -> Result<RgbaImage, ConvertError> {
        render_bitmap(image, &self.options)
    }

    /// Text conversion on a worker thread; block on the handle for the
    /// result.
    pub fn to_text_task(&self, image: DynamicImage) -> TaskHandle<String> {
        let options = self.options.clone();
        task::spawn(move || render_text(&image, &options))
    }

    /// Bitmap conversion on a worker thread.
    pub fn to_bitmap_task(&self, image: DynamicImage) -> TaskHandle<RgbaImage> {
        let options = self.options.clone();
        task::spawn(move || render_bitmap(&image, &options))
    }

    /// Text conversion delivered through a completion callback, invoked
    /// exactly once.
    pub fn to_text_with<C>(&self, image: DynamicImage, callback: C)
    where
        C: FnOnce(Result<String, ConvertError>) + Send + 'static,
    {
        let options = self.options.clone();
        task::spawn_with(move || render_text(&image, &options), callback);
    }

    /// Bitmap conversion delivered through a completion callback.
    pub fn to_bitmap_with<C>(&self, image: DynamicImage, callback: C)
    where
        C: FnOnce(Result<RgbaImage, ConvertError>) + Send + 'static,
    {
        let options = self.options.clone();
        task::spawn_with(move || render_bitmap(&image, &options), callback);
    }
}

/// Validates the input and downsamples it into the cell grid. Both
/// checks run before any resize or sampling work.
fn sample(image: &DynamicImage, options: &ConvertOptions) -> Result<SampleGrid, ConvertError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage);
    }

    let columns = resize::derive_columns(width, options.cell_size, options.columns);
    if columns < MIN_COLUMNS as f32 {
        return Err(ConvertError::TooFewColumns { columns: columns as u32 });
    }

    debug!("sampling {}x{} image into {} columns", width, height, columns);
    Ok(resize::sample_grid(image, columns))
}

fn render_text(image: &DynamicImage, options: &ConvertOptions) -> Result<String, ConvertError> {
    let grid = sample(image, options)?;
    Ok(render::text::assemble(&grid, &options.glyphs, options.reversed_luminance))
}

fn render_bitmap(image: &DynamicImage, options: &ConvertOptions) -> Result<RgbaImage, ConvertError> {
    let grid = sample(image, options)?;
    Ok(render::bitmap::assemble(image, &grid, options))
}
